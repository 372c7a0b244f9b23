use serde::{Deserialize, Serialize};

/// Primary opcodes of the three-register format (leading nibble).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RrrOp {
    Add,
    Sub,
    Mul,
    Div,
    Addc,
    Muln,
    Divn,
    Cmp,
    Push,
    Pop,
    Top,
    Trap,
}

impl RrrOp {
    pub const ALL: [RrrOp; 12] = [
        RrrOp::Add,
        RrrOp::Sub,
        RrrOp::Mul,
        RrrOp::Div,
        RrrOp::Addc,
        RrrOp::Muln,
        RrrOp::Divn,
        RrrOp::Cmp,
        RrrOp::Push,
        RrrOp::Pop,
        RrrOp::Top,
        RrrOp::Trap,
    ];

    /// `b` and `c` are both trap; `d` is unassigned.
    pub fn from_nibble(n: u8) -> Option<Self> {
        Some(match n {
            0x0 => RrrOp::Add,
            0x1 => RrrOp::Sub,
            0x2 => RrrOp::Mul,
            0x3 => RrrOp::Div,
            0x4 => RrrOp::Addc,
            0x5 => RrrOp::Muln,
            0x6 => RrrOp::Divn,
            0x7 => RrrOp::Cmp,
            0x8 => RrrOp::Push,
            0x9 => RrrOp::Pop,
            0xa => RrrOp::Top,
            0xb | 0xc => RrrOp::Trap,
            _ => return None,
        })
    }

    /// Canonical opcode nibble.
    pub fn opcode(self) -> u8 {
        match self {
            RrrOp::Add => 0x0,
            RrrOp::Sub => 0x1,
            RrrOp::Mul => 0x2,
            RrrOp::Div => 0x3,
            RrrOp::Addc => 0x4,
            RrrOp::Muln => 0x5,
            RrrOp::Divn => 0x6,
            RrrOp::Cmp => 0x7,
            RrrOp::Push => 0x8,
            RrrOp::Pop => 0x9,
            RrrOp::Top => 0xa,
            RrrOp::Trap => 0xb,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            RrrOp::Add => "add",
            RrrOp::Sub => "sub",
            RrrOp::Mul => "mul",
            RrrOp::Div => "div",
            RrrOp::Addc => "addc",
            RrrOp::Muln => "muln",
            RrrOp::Divn => "divn",
            RrrOp::Cmp => "cmp",
            RrrOp::Push => "push",
            RrrOp::Pop => "pop",
            RrrOp::Top => "top",
            RrrOp::Trap => "trap",
        }
    }
}

/// Secondary opcodes of the RX format (trailing nibble).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RxOp {
    Lea,
    Load,
    Store,
    Jump,
    Jal,
    Jumpc0,
    Jumpc1,
    Jumpn,
    Jumpz,
    Jumpnz,
    Jumpp,
    Testset,
}

impl RxOp {
    pub const ALL: [RxOp; 12] = [
        RxOp::Lea,
        RxOp::Load,
        RxOp::Store,
        RxOp::Jump,
        RxOp::Jal,
        RxOp::Jumpc0,
        RxOp::Jumpc1,
        RxOp::Jumpn,
        RxOp::Jumpz,
        RxOp::Jumpnz,
        RxOp::Jumpp,
        RxOp::Testset,
    ];

    pub fn from_nibble(n: u8) -> Option<Self> {
        RxOp::ALL.get(usize::from(n)).copied()
    }

    pub fn opcode(self) -> u8 {
        self as u8
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            RxOp::Lea => "lea",
            RxOp::Load => "load",
            RxOp::Store => "store",
            RxOp::Jump => "jump",
            RxOp::Jal => "jal",
            RxOp::Jumpc0 => "jumpc0",
            RxOp::Jumpc1 => "jumpc1",
            RxOp::Jumpn => "jumpn",
            RxOp::Jumpz => "jumpz",
            RxOp::Jumpnz => "jumpnz",
            RxOp::Jumpp => "jumpp",
            RxOp::Testset => "testset",
        }
    }
}

/// Secondary opcode of the only single-word EXP instruction.
pub const EXP_RESUME: u8 = 0x00;
/// Secondary opcodes of the two-word EXP sub-form.
pub const EXP2_CODES: std::ops::RangeInclusive<u8> = 0x01..=0x0a;
