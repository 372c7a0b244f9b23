//! Link-time relocation of RX displacements.
//!
//! Each relocation entry names the address of an RX instruction's
//! displacement word, so the instruction itself sits one word earlier. When
//! the displacement points at a trailing variable it is replaced by that
//! variable's name. Entries that do not lead to a raw RX displacement and a
//! variable are skipped.

use tracing::{debug, trace};

use crate::assembly::{AssemblyMap, Unit};
use crate::decoder::{Decoded, Displacement, Insn};
use crate::engine::DecodeError;

/// Applies every entry to `map` and returns how many displacements changed.
/// Running it again on the result changes nothing.
pub fn resolve(map: &mut AssemblyMap, entries: &[String]) -> Result<usize, DecodeError> {
    let mut patched = 0;
    for token in entries {
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DecodeError::MalformedRelocation { token: token.clone() });
        }
        // digits are checked above, so the only parse failure left is overflow
        let Ok(at) = u32::from_str_radix(token, 16) else {
            trace!(reloc = %token, "relocation beyond address space, skipped");
            continue;
        };
        if resolve_one(map, at) {
            patched += 1;
        }
    }
    Ok(patched)
}

fn resolve_one(map: &mut AssemblyMap, at: u32) -> bool {
    let Some(target) = at.checked_sub(1) else {
        trace!(reloc = at, "relocation before first word, skipped");
        return false;
    };
    let dest = match map.get(target) {
        Some(Unit::Code(Decoded { insn: Insn::Rx { disp: Displacement::Raw(w), .. }, .. })) => {
            u32::from(w.value())
        }
        _ => {
            trace!(reloc = at, target, "no raw RX displacement at target, skipped");
            return false;
        }
    };
    let name = match map.get(dest) {
        Some(Unit::Data(var)) => var.name(),
        _ => {
            trace!(reloc = at, target, dest, "displacement does not address a variable, skipped");
            return false;
        }
    };
    match map.get_mut(target) {
        Some(Unit::Code(Decoded { insn: Insn::Rx { disp, .. }, .. })) => {
            debug!(addr = target, symbol = %name, "relocated displacement");
            *disp = Displacement::Symbol(name);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::Variable;
    use crate::instructions::{RrrOp, RxOp};
    use crate::word::Word;

    fn rx(disp: u16) -> Unit {
        Unit::Code(Decoded {
            insn: Insn::Rx { op: RxOp::Store, d: 4, disp: Displacement::Raw(Word(disp)), idx: 0 },
            width: 2,
        })
    }

    fn map() -> AssemblyMap {
        let mut m = AssemblyMap::new();
        m.insert(0, rx(0x0004));
        m.insert(2, rx(0x0003));
        m.insert(
            4,
            Unit::Code(Decoded { insn: Insn::Rrr { op: RrrOp::Trap, d: 0, a: 0, b: 0 }, width: 1 }),
        );
        m.insert(5, Unit::Data(Variable { ordinal: 0, value: 7 }));
        m
    }

    #[test]
    fn only_variable_targets_are_renamed() {
        let mut m = map();
        // 0x0001 -> store at 0, displacement 4 is trap: left alone.
        // 0x0003 -> store at 2, displacement 3 is mid-instruction: left alone.
        assert_eq!(resolve(&mut m, &["1".into(), "3".into()]).unwrap(), 0);
        assert_eq!(m, map());
    }

    #[test]
    fn zero_and_non_rx_targets_skip() {
        let mut m = map();
        assert_eq!(resolve(&mut m, &["0".into(), "5".into(), "6".into(), "ffff".into()]).unwrap(), 0);
        assert_eq!(m, map());
    }

    #[test]
    fn bad_token_is_an_error() {
        let mut m = map();
        assert_eq!(
            resolve(&mut m, &["0g".into()]),
            Err(DecodeError::MalformedRelocation { token: "0g".into() })
        );
    }
}
