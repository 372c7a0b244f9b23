use serde::{Deserialize, Serialize};
use std::fmt;

use crate::instructions::{RrrOp, RxOp};
use crate::word::Word;

/// Encoding format, selected by the leading nibble of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    Rrr,
    Rx,
    Exp,
}

impl Format {
    /// Any leading nibble other than `e`/`f` is treated as RRR; an unassigned
    /// RRR opcode is reported later by the RRR decoder.
    pub fn classify(w: Word) -> Self {
        match w.nibble(1) {
            0xf => Format::Rx,
            0xe => Format::Exp,
            _ => Format::Rrr,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Rrr => "RRR",
            Format::Rx => "RX",
            Format::Exp => "EXP",
        })
    }
}

/// RX displacement: raw as linked, or a variable name after relocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Displacement {
    Raw(Word),
    Symbol(String),
}

impl fmt::Display for Displacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Displacement::Raw(w) => write!(f, "{w}"),
            Displacement::Symbol(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Insn {
    Rrr { op: RrrOp, d: u8, a: u8, b: u8 },
    Rx { op: RxOp, d: u8, disp: Displacement, idx: u8 },
    Resume,
    /// Two-word EXP form. No mnemonics are assigned to these codes yet, so the
    /// raw fields are kept as-is.
    Exp2 { code: u8, d: u8, operand: Word },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    pub insn: Insn,
    pub width: u8, // words consumed: 1 or 2
}

impl Decoded {
    pub fn format(&self) -> Format {
        match self.insn {
            Insn::Rrr { .. } => Format::Rrr,
            Insn::Rx { .. } => Format::Rx,
            Insn::Resume | Insn::Exp2 { .. } => Format::Exp,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        match &self.insn {
            Insn::Rrr { op, .. } => op.mnemonic(),
            Insn::Rx { op, .. } => op.mnemonic(),
            Insn::Resume => "resume",
            Insn::Exp2 { .. } => "exp2",
        }
    }

    /// `trap` ends the code section.
    pub fn is_trap(&self) -> bool {
        matches!(self.insn, Insn::Rrr { op: RrrOp::Trap, .. })
    }

    /// Canonical machine words for this instruction. `None` once the
    /// displacement has been replaced by a symbol.
    pub fn encode(&self) -> Option<Vec<Word>> {
        match &self.insn {
            Insn::Rrr { op, d, a, b } => Some(vec![Word::from_nibbles([op.opcode(), *d, *a, *b])]),
            Insn::Rx { op, d, disp: Displacement::Raw(w), idx } => {
                Some(vec![Word::from_nibbles([0xf, *d, *idx, op.opcode()]), *w])
            }
            Insn::Rx { .. } => None,
            Insn::Resume => Some(vec![Word(0xe000)]),
            Insn::Exp2 { code, d, operand } => {
                Some(vec![Word::from_nibbles([0xe, *d, code >> 4, code & 0xF]), *operand])
            }
        }
    }
}

/// Why a word group could not be decoded. The engine attaches the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    UnknownOpcode(Format),
    Truncated { format: Format, needed: u8 },
}

pub trait Decoder {
    /// Decodes the unit starting at `word`; `rest` holds every data word after it.
    fn decode(&self, word: Word, rest: &[Word]) -> Result<Decoded, Fault>;
}
