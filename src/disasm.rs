use serde::Serialize;
use std::fmt::Write as _;

use crate::assembly::{AssemblyMap, Unit};
use crate::decoder::{Decoded, Insn};
use crate::engine::Listing;

pub fn fmt_decoded(d: &Decoded) -> String {
    match &d.insn {
        Insn::Rrr { op, d, a, b } => format!("{}\tR{d},R{a},R{b}", op.mnemonic()),
        Insn::Rx { op, d, disp, idx } => format!("{}\tR{d},{disp}[{idx}]", op.mnemonic()),
        Insn::Resume => "resume".to_string(),
        Insn::Exp2 { code, d, operand } => format!("exp2\t{code:02x},R{d},{operand}"),
    }
}

pub fn fmt_unit(u: &Unit) -> String {
    match u {
        Unit::Code(d) => fmt_decoded(d),
        Unit::Data(v) => format!("{}\tdata\t{}", v.name(), v.value),
    }
}

/// `<addr>\t<text>\n` per unit, addresses as 4 lowercase hex digits.
pub fn render_listing(map: &AssemblyMap) -> String {
    let mut buf = String::new();
    for (addr, unit) in map.iter() {
        let _ = writeln!(buf, "{addr:04x}\t{}", fmt_unit(unit));
    }
    buf
}

/// Same as [`render_listing`] with the unit's source words appended.
pub fn render_annotated(listing: &Listing) -> String {
    let mut buf = String::new();
    for (addr, unit) in listing.map.iter() {
        let _ = write!(buf, "{addr:04x}\t{}\t;", fmt_unit(unit));
        for w in listing.words_of(addr, unit) {
            let _ = write!(buf, " {w}");
        }
        buf.push('\n');
    }
    buf
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingLine {
    pub addr: u32,
    pub text: String,
    pub words: Vec<String>,
}

pub fn listing_lines(listing: &Listing) -> Vec<ListingLine> {
    listing
        .map
        .iter()
        .map(|(addr, unit)| ListingLine {
            addr,
            text: fmt_unit(unit),
            words: listing.words_of(addr, unit).iter().map(ToString::to_string).collect(),
        })
        .collect()
}
