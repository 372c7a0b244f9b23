use serde::{Deserialize, Serialize};
use std::fmt;

/// One 16-bit Sigma16 machine word, written in object files as 4 hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word(pub u16);

impl Word {
    /// Parses a data-section token. Exactly 4 hex digits, either case.
    pub fn parse(tok: &str) -> Option<Self> {
        if tok.len() != 4 || !tok.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u16::from_str_radix(tok, 16).ok().map(Word)
    }

    pub fn from_nibbles(n: [u8; 4]) -> Self {
        Word(n.iter().fold(0u16, |acc, &x| (acc << 4) | u16::from(x & 0xF)))
    }

    /// Nibble `i`, counted from 1 at the leading end (nibble 1 is the opcode).
    #[inline]
    pub fn nibble(self, i: u8) -> u8 {
        debug_assert!((1..=4).contains(&i));
        ((self.0 >> (4 * (4 - u16::from(i)))) & 0xF) as u8
    }

    /// Nibbles 3 and 4 read as one byte.
    #[inline]
    pub fn low_byte(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    #[inline]
    pub fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}", self.0)
    }
}
