use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assembly::{AssemblyMap, Unit, Variable};
use crate::decoder::{Decoder, Fault, Format};
use crate::disasm::{fmt_decoded, render_listing};
use crate::isa::sigma16::Sigma16Decoder;
use crate::object::ObjectCode;
use crate::relocate;
use crate::word::Word;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisasmConfig {
    pub relocate: bool, // run the relocation pass after decoding
}

impl Default for DisasmConfig {
    fn default() -> Self {
        Self { relocate: true }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed word `{token}` at data index {index}")]
    MalformedWord { index: usize, token: String },
    #[error("Unknown {format} opcode in word {word} at {addr:04x}")]
    UnknownOpcode { addr: u32, word: Word, format: Format },
    #[error("Truncated {format} instruction {word} at {addr:04x}: needs {needed} words, {available} left")]
    TruncatedInstruction { addr: u32, word: Word, format: Format, needed: u8, available: usize },
    #[error("Malformed relocation entry `{token}`")]
    MalformedRelocation { token: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    CodeScan,
    VarScan,
    Done,
}

/// One pass over the data words. `ip` indexes the word slice, `addr` is the
/// memory address of the next unit; both advance by the unit's width.
#[derive(Debug)]
pub struct Scanner<'a> {
    words: &'a [Word],
    ip: usize,
    addr: u32,
    phase: Phase,
    vars: usize,
    map: AssemblyMap,
}

impl<'a> Scanner<'a> {
    pub fn new(words: &'a [Word]) -> Self {
        Self { words, ip: 0, addr: 0, phase: Phase::CodeScan, vars: 0, map: AssemblyMap::new() }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn addr(&self) -> u32 {
        self.addr
    }

    pub fn map(&self) -> &AssemblyMap {
        &self.map
    }

    pub fn into_map(self) -> AssemblyMap {
        self.map
    }

    /// Decodes at most one unit, or moves to the next phase when the words
    /// run out. Returns the phase after the step.
    pub fn step<D: Decoder>(&mut self, dec: &D) -> Result<Phase, DecodeError> {
        match self.phase {
            Phase::CodeScan => {
                let words = self.words;
                let Some(&word) = words.get(self.ip) else {
                    self.enter(Phase::VarScan);
                    return Ok(self.phase);
                };
                let rest = &words[self.ip + 1..];
                let d = dec.decode(word, rest).map_err(|f| self.fault(word, f))?;
                debug!(addr = self.addr, format = %d.format(), text = %fmt_decoded(&d), "decoded");
                let trap = d.is_trap();
                self.push(Unit::Code(d));
                if trap {
                    self.enter(Phase::VarScan);
                }
            }
            Phase::VarScan => {
                let Some(&word) = self.words.get(self.ip) else {
                    self.enter(Phase::Done);
                    return Ok(self.phase);
                };
                let var = Variable { ordinal: self.vars, value: word.value() };
                debug!(addr = self.addr, name = %var.name(), value = var.value, "variable");
                self.vars += 1;
                self.push(Unit::Data(var));
            }
            Phase::Done => {}
        }
        Ok(self.phase)
    }

    fn push(&mut self, unit: Unit) {
        let width = unit.width();
        self.map.insert(self.addr, unit);
        self.ip += width as usize;
        self.addr += width;
    }

    fn enter(&mut self, next: Phase) {
        debug!(from = ?self.phase, to = ?next, ip = self.ip, "phase change");
        self.phase = next;
    }

    fn fault(&self, word: Word, fault: Fault) -> DecodeError {
        match fault {
            Fault::UnknownOpcode(format) => DecodeError::UnknownOpcode { addr: self.addr, word, format },
            Fault::Truncated { format, needed } => DecodeError::TruncatedInstruction {
                addr: self.addr,
                word,
                format,
                needed,
                available: self.words.len() - self.ip,
            },
        }
    }
}

/// Result of a complete run: the patched map plus the words it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub map: AssemblyMap,
    pub words: Vec<Word>,
    pub relocated: usize,
}

impl Listing {
    pub fn render(&self) -> String {
        render_listing(&self.map)
    }

    /// Source words of the unit at `addr`.
    pub fn words_of(&self, addr: u32, unit: &Unit) -> &[Word] {
        let start = addr as usize;
        let end = start.saturating_add(unit.width() as usize).min(self.words.len());
        self.words.get(start..end).unwrap_or(&[])
    }
}

pub struct Disassembler<D: Decoder = Sigma16Decoder> {
    decoder: D,
    cfg: DisasmConfig,
}

impl Disassembler {
    pub fn new() -> Self {
        Self::with_config(DisasmConfig::default())
    }

    pub fn with_config(cfg: DisasmConfig) -> Self {
        Self { decoder: Sigma16Decoder::new(), cfg }
    }
}

impl Default for Disassembler {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Decoder> Disassembler<D> {
    pub fn with_decoder(decoder: D, cfg: DisasmConfig) -> Self {
        Self { decoder, cfg }
    }

    pub fn run(&self, obj: &ObjectCode) -> Result<Listing, DecodeError> {
        let words = parse_words(&obj.data)?;
        let mut scan = Scanner::new(&words);
        while scan.step(&self.decoder)? != Phase::Done {}
        let mut map = scan.into_map();

        let relocated = if self.cfg.relocate { relocate::resolve(&mut map, &obj.relocate)? } else { 0 };
        debug!(units = map.len(), relocated, "disassembly complete");
        Ok(Listing { map, words, relocated })
    }
}

pub fn parse_words(tokens: &[String]) -> Result<Vec<Word>, DecodeError> {
    tokens
        .iter()
        .enumerate()
        .map(|(index, tok)| {
            Word::parse(tok).ok_or_else(|| DecodeError::MalformedWord { index, token: tok.clone() })
        })
        .collect()
}

/// Decodes, relocates and renders one object with the default configuration.
pub fn disassemble(obj: &ObjectCode) -> Result<String, DecodeError> {
    Ok(Disassembler::new().run(obj)?.render())
}
