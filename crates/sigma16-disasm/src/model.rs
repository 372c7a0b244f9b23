use anyhow::{Context, Result};
use std::path::Path;

use sigma16_rs::{ObjectCode, Section};

/// Reads and parses a `<section> <tokens>` object file.
pub fn load_object(path: &Path) -> Result<ObjectCode> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let obj = text
        .parse::<ObjectCode>()
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(obj)
}

/// `(section name, token count)` for every section, in file order.
pub fn section_summary(obj: &ObjectCode) -> Vec<(&'static str, usize)> {
    Section::ALL.iter().map(|&s| (s.name(), obj.section(s).len())).collect()
}
