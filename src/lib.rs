pub mod assembly;
pub mod decoder;
pub mod disasm;
pub mod engine;
pub mod instructions;
pub mod object;
pub mod relocate;
pub mod word;

pub mod isa {
    pub mod sigma16; // Sigma16 RRR/RX/EXP encodings
}

pub use assembly::{AssemblyMap, Unit, Variable};
pub use engine::{disassemble, DecodeError, Disassembler, DisasmConfig, Listing, Phase, Scanner};
pub use object::{LoadError, ObjectCode, Section};
pub use word::Word;
