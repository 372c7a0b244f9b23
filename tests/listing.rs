use pretty_assertions::assert_eq;

use sigma16_rs::isa::sigma16::Sigma16Decoder;
use sigma16_rs::{disassemble, ObjectCode, Phase, Scanner, Unit, Word};

fn obj(data: &[&str], relocate: &[&str]) -> ObjectCode {
    ObjectCode {
        module: vec![],
        data: data.iter().map(|s| s.to_string()).collect(),
        relocate: relocate.iter().map(|s| s.to_string()).collect(),
    }
}

fn words(raw: &[u16]) -> Vec<Word> {
    raw.iter().copied().map(Word).collect()
}

#[test]
fn push_load_trap_listing() {
    let out = disassemble(&obj(&["8123", "f031", "000a", "b000"], &[])).unwrap();
    assert_eq!(out, "0000\tpush\tR1,R2,R3\n0001\tload\tR0,000a[3]\n0003\ttrap\tR0,R0,R0\n");
}

#[test]
fn words_after_trap_become_variables() {
    let out = disassemble(&obj(&["b000", "0005", "000a"], &[])).unwrap();
    assert_eq!(out, "0000\ttrap\tR0,R0,R0\n0001\tVar0\tdata\t5\n0002\tVar1\tdata\t10\n");
}

#[test]
fn variables_may_look_like_code() {
    // after trap nothing is decoded as an instruction, not even RX/EXP words
    let out = disassemble(&obj(&["c123", "f031", "e0ff", "ffff"], &[])).unwrap();
    assert_eq!(
        out,
        "0000\ttrap\tR1,R2,R3\n0001\tVar0\tdata\t61489\n0002\tVar1\tdata\t57599\n0003\tVar2\tdata\t65535\n"
    );
}

#[test]
fn code_without_trap_has_no_variables() {
    let out = disassemble(&obj(&["e000", "1234", "f102", "0010"], &[])).unwrap();
    assert_eq!(out, "0000\tresume\n0001\tsub\tR2,R3,R4\n0002\tstore\tR1,0010[0]\n");
}

#[test]
fn empty_data_gives_empty_listing() {
    assert_eq!(disassemble(&obj(&[], &[])).unwrap(), "");
}

#[test]
fn address_is_sum_of_widths() {
    let dec = Sigma16Decoder::new();

    let uniform = words(&[0xf001, 0x0000, 0xf002, 0x0001, 0xf003, 0x0002]);
    let mut scan = Scanner::new(&uniform);
    for n in 1..=3u32 {
        scan.step(&dec).unwrap();
        assert_eq!(scan.addr(), n * 2);
        assert_eq!(scan.ip(), scan.addr() as usize);
    }

    // 1 + 2 + 1 + 2 + 1
    let mixed = words(&[0x0123, 0xf001, 0x0009, 0xe000, 0xe305, 0x0000, 0xb000]);
    let mut scan = Scanner::new(&mixed);
    let mut addrs = vec![];
    while scan.phase() == Phase::CodeScan {
        addrs.push(scan.addr());
        scan.step(&dec).unwrap();
    }
    assert_eq!(addrs, vec![0, 1, 3, 4, 6]);
    assert_eq!(scan.addr(), 7);
}

#[test]
fn leading_trap_enters_var_scan() {
    let dec = Sigma16Decoder::new();
    let data = words(&[0xb000, 0x0001]);
    let mut scan = Scanner::new(&data);
    assert_eq!(scan.phase(), Phase::CodeScan);
    assert_eq!(scan.step(&dec).unwrap(), Phase::VarScan);
    assert_eq!(scan.map().variables().count(), 0);
    assert_eq!(scan.step(&dec).unwrap(), Phase::VarScan);
    assert_eq!(scan.step(&dec).unwrap(), Phase::Done);
    // Done is terminal
    assert_eq!(scan.step(&dec).unwrap(), Phase::Done);

    let map = scan.into_map();
    assert!(matches!(map.get(1), Some(Unit::Data(v)) if v.name() == "Var0" && v.value == 1));
}

#[test]
fn exhausted_code_goes_through_var_scan() {
    let dec = Sigma16Decoder::new();
    let data = words(&[0x0123]);
    let mut scan = Scanner::new(&data);
    assert_eq!(scan.step(&dec).unwrap(), Phase::CodeScan);
    assert_eq!(scan.step(&dec).unwrap(), Phase::VarScan);
    assert_eq!(scan.step(&dec).unwrap(), Phase::Done);
}

#[test]
fn json_lines_carry_source_words() {
    use sigma16_rs::disasm::{listing_lines, render_annotated};
    use sigma16_rs::Disassembler;

    let listing = Disassembler::new().run(&obj(&["f031", "000a", "b000", "0005"], &[])).unwrap();
    let json = serde_json::to_value(listing_lines(&listing)).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            { "addr": 0, "text": "load\tR0,000a[3]", "words": ["f031", "000a"] },
            { "addr": 2, "text": "trap\tR0,R0,R0", "words": ["b000"] },
            { "addr": 3, "text": "Var0\tdata\t5", "words": ["0005"] },
        ])
    );
    assert_eq!(
        render_annotated(&listing),
        "0000\tload\tR0,000a[3]\t; f031 000a\n0002\ttrap\tR0,R0,R0\t; b000\n0003\tVar0\tdata\t5\t; 0005\n"
    );
}

/// Treats every word as a one-word `top`, so nothing ever traps.
struct AllTop;

impl sigma16_rs::decoder::Decoder for AllTop {
    fn decode(
        &self,
        word: Word,
        _rest: &[Word],
    ) -> Result<sigma16_rs::decoder::Decoded, sigma16_rs::decoder::Fault> {
        use sigma16_rs::decoder::{Decoded, Insn};
        use sigma16_rs::instructions::RrrOp;
        Ok(Decoded {
            insn: Insn::Rrr { op: RrrOp::Top, d: word.nibble(2), a: word.nibble(3), b: word.nibble(4) },
            width: 1,
        })
    }
}

#[test]
fn custom_decoder_drives_the_scan() {
    use sigma16_rs::decoder::Format;
    use sigma16_rs::{Disassembler, DisasmConfig};

    let dis = Disassembler::with_decoder(AllTop, DisasmConfig::default());
    let listing = dis.run(&obj(&["f031", "e000", "b000"], &[])).unwrap();
    assert_eq!(listing.render(), "0000\ttop\tR0,R3,R1\n0001\ttop\tR0,R0,R0\n0002\ttop\tR0,R0,R0\n");
    assert_eq!(listing.map.variables().count(), 0);
    for (_, unit) in listing.map.iter() {
        assert!(matches!(unit, Unit::Code(d) if d.format() == Format::Rrr));
    }
}
