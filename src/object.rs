use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Linked object code as three ordered token sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCode {
    pub module: Vec<String>,
    pub data: Vec<String>,
    pub relocate: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    Module,
    Data,
    Relocate,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Module, Section::Data, Section::Relocate];

    pub fn name(self) -> &'static str {
        match self {
            Section::Module => "module",
            Section::Data => "data",
            Section::Relocate => "relocate",
        }
    }

    fn from_name(s: &str) -> Option<Self> {
        Section::ALL.into_iter().find(|sec| sec.name() == s)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("line {line}: expected `<section> <tokens>`, found no tokens")]
    MissingTokens { line: usize },
    #[error("line {line}: expected `<section> <tokens>`, found extra fields")]
    ExtraFields { line: usize },
    #[error("line {line}: unknown section `{name}`")]
    UnknownSection { line: usize, name: String },
}

impl ObjectCode {
    pub fn section(&self, s: Section) -> &[String] {
        match s {
            Section::Module => &self.module,
            Section::Data => &self.data,
            Section::Relocate => &self.relocate,
        }
    }

    fn section_mut(&mut self, s: Section) -> &mut Vec<String> {
        match s {
            Section::Module => &mut self.module,
            Section::Data => &mut self.data,
            Section::Relocate => &mut self.relocate,
        }
    }

    /// Parses `<section> <tok>,<tok>,...` lines. Repeated sections append;
    /// blank lines and empty tokens (trailing commas) are ignored.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut obj = ObjectCode::default();
        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let mut fields = raw.split_whitespace();
            let Some(name) = fields.next() else { continue };
            let tokens = fields.next().ok_or(LoadError::MissingTokens { line })?;
            if fields.next().is_some() {
                return Err(LoadError::ExtraFields { line });
            }
            let sec = Section::from_name(name)
                .ok_or_else(|| LoadError::UnknownSection { line, name: name.to_string() })?;
            obj.section_mut(sec)
                .extend(tokens.split(',').filter(|t| !t.is_empty()).map(str::to_string));
        }
        Ok(obj)
    }
}

impl FromStr for ObjectCode {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectCode::parse(s)
    }
}
