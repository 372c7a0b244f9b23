use crate::decoder::{Decoded, Decoder, Displacement, Fault, Format, Insn};
use crate::instructions::{RrrOp, RxOp, EXP2_CODES, EXP_RESUME};
use crate::word::Word;

/// Sigma16 decoder for the RRR, RX and EXP formats.
///
/// Operand fields are nibbles of the first word: for RRR `op d a b`, for RX
/// `f d idx op` followed by the displacement word, for EXP `e d code code`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sigma16Decoder;

impl Sigma16Decoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for Sigma16Decoder {
    fn decode(&self, word: Word, rest: &[Word]) -> Result<Decoded, Fault> {
        match Format::classify(word) {
            Format::Rrr => decode_rrr(word),
            Format::Rx => decode_rx(word, rest),
            Format::Exp => decode_exp(word, rest),
        }
    }
}

fn decode_rrr(w: Word) -> Result<Decoded, Fault> {
    let op = RrrOp::from_nibble(w.nibble(1)).ok_or(Fault::UnknownOpcode(Format::Rrr))?;
    Ok(Decoded {
        insn: Insn::Rrr { op, d: w.nibble(2), a: w.nibble(3), b: w.nibble(4) },
        width: 1,
    })
}

fn decode_rx(w: Word, rest: &[Word]) -> Result<Decoded, Fault> {
    let op = RxOp::from_nibble(w.nibble(4)).ok_or(Fault::UnknownOpcode(Format::Rx))?;
    let &disp = rest.first().ok_or(Fault::Truncated { format: Format::Rx, needed: 2 })?;
    Ok(Decoded {
        insn: Insn::Rx { op, d: w.nibble(2), disp: Displacement::Raw(disp), idx: w.nibble(3) },
        width: 2,
    })
}

fn decode_exp(w: Word, rest: &[Word]) -> Result<Decoded, Fault> {
    let code = w.low_byte();
    if code == EXP_RESUME {
        return Ok(Decoded { insn: Insn::Resume, width: 1 });
    }
    if !EXP2_CODES.contains(&code) {
        return Err(Fault::UnknownOpcode(Format::Exp));
    }
    let &operand = rest.first().ok_or(Fault::Truncated { format: Format::Exp, needed: 2 })?;
    Ok(Decoded { insn: Insn::Exp2 { code, d: w.nibble(2), operand }, width: 2 })
}
