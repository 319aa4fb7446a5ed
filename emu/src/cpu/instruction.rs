use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::cpu::opcode::OpcodeByte;
use crate::cpu::registers::{ByteRegister, Register};

/// `opr` of `mov r16, imm16` (0xB8..=0xBF).
pub const MOV_R_IMM16: u8 = 0x17;
/// `opr` of `mov r8, imm8` (0xB0..=0xB7).
pub const MOV_R_IMM8: u8 = 0x16;
/// `op` of `xor r/m, reg` (0x30..=0x33).
pub const XOR_RR: u8 = 0x0C;
/// `op` of `imul reg, r/m, imm` (0x68..=0x6B).
pub const IMUL_RR_IMM16: u8 = 0x1A;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum OpcodeClass {
    Xor,
    Mov,
    Imul,
}

impl OpcodeClass {
    /// Classifies an opcode byte. One-byte register forms are matched
    /// before the two-byte opcode families.
    #[must_use]
    pub fn classify(opcode: OpcodeByte) -> Option<Self> {
        match opcode.opr() {
            MOV_R_IMM16 | MOV_R_IMM8 => return Some(Self::Mov),
            _ => {}
        }

        match opcode.op() {
            XOR_RR => Some(Self::Xor),
            IMUL_RR_IMM16 => Some(Self::Imul),
            _ => None,
        }
    }
}

impl Display for OpcodeClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mnemonic = match self {
            Self::Xor => "xor",
            Self::Mov => "mov",
            Self::Imul => "imul",
        };
        write!(f, "{mnemonic}")
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub enum OperandSize {
    Byte,
    #[default]
    Word,
}

impl From<bool> for OperandSize {
    fn from(s: bool) -> Self {
        if s { Self::Word } else { Self::Byte }
    }
}

/// A fully decoded instruction, handed from the decoder to the executor.
///
/// Register fields are raw 3-bit indices; `size` says whether they name
/// [`Register`]s or [`ByteRegister`]s.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Instruction {
    Xor {
        size: OperandSize,
        destination_register: u8,
        source_register: u8,
    },
    Mov {
        size: OperandSize,
        destination_register: u8,
        immediate: u16,
    },
    /// `source_register:destination_register = destination_register * immediate`
    Imul {
        destination_register: u8,
        source_register: u8,
        immediate: u16,
    },
}

impl Instruction {
    #[must_use]
    pub const fn class(&self) -> OpcodeClass {
        match self {
            Self::Xor { .. } => OpcodeClass::Xor,
            Self::Mov { .. } => OpcodeClass::Mov,
            Self::Imul { .. } => OpcodeClass::Imul,
        }
    }
}

fn register_name(size: OperandSize, idx: u8) -> String {
    match size {
        OperandSize::Byte => ByteRegister::from(idx).to_string(),
        OperandSize::Word => Register::from(idx).to_string(),
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Xor {
                size,
                destination_register,
                source_register,
            } => write!(
                f,
                "xor {}, {}",
                register_name(size, destination_register),
                register_name(size, source_register)
            ),
            Self::Mov {
                size: OperandSize::Byte,
                destination_register,
                immediate,
            } => write!(
                f,
                "mov {}, 0x{immediate:02x}",
                register_name(OperandSize::Byte, destination_register)
            ),
            Self::Mov {
                size: OperandSize::Word,
                destination_register,
                immediate,
            } => write!(
                f,
                "mov {}, 0x{immediate:04x}",
                register_name(OperandSize::Word, destination_register)
            ),
            Self::Imul {
                destination_register,
                source_register,
                immediate,
            } => {
                let low = Register::from(destination_register);
                let high = Register::from(source_register);
                write!(f, "imul {high}:{low}, {low}, 0x{immediate:04x}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn classify_recognized_opcodes() {
        for byte in 0xB0_u8..=0xBF {
            assert_eq!(
                OpcodeClass::classify(byte.into()),
                Some(OpcodeClass::Mov),
                "0x{byte:02X}"
            );
        }
        for byte in 0x30_u8..=0x33 {
            assert_eq!(OpcodeClass::classify(byte.into()), Some(OpcodeClass::Xor));
        }
        for byte in 0x68_u8..=0x6B {
            assert_eq!(OpcodeClass::classify(byte.into()), Some(OpcodeClass::Imul));
        }
    }

    #[test]
    fn classify_unknown_opcodes() {
        for byte in [0x00_u8, 0x34, 0x67, 0x6C, 0x90, 0xAF, 0xC0, 0xFF] {
            assert_eq!(OpcodeClass::classify(byte.into()), None, "0x{byte:02X}");
        }
    }

    #[test]
    fn disassemble() {
        let xor = Instruction::Xor {
            size: OperandSize::Word,
            destination_register: 2,
            source_register: 2,
        };
        assert_eq!(xor.to_string(), "xor dx, dx");

        let mov = Instruction::Mov {
            size: OperandSize::Word,
            destination_register: 0,
            immediate: 0xEDCC,
        };
        assert_eq!(mov.to_string(), "mov ax, 0xedcc");

        let mov8 = Instruction::Mov {
            size: OperandSize::Byte,
            destination_register: 4,
            immediate: 0x7F,
        };
        assert_eq!(mov8.to_string(), "mov ah, 0x7f");

        let imul = Instruction::Imul {
            destination_register: 0,
            source_register: 2,
            immediate: 0x5678,
        };
        assert_eq!(imul.to_string(), "imul dx:ax, ax, 0x5678");
        assert_eq!(imul.class(), OpcodeClass::Imul);
    }
}
