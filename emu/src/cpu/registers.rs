//! # 8086 Register File
//!
//! Eight 16-bit general-purpose registers, in encoding order:
//!
//! | idx | 16-bit | 8-bit |
//! |-----|--------|-------|
//! | 0   | AX     | AL    |
//! | 1   | CX     | CL    |
//! | 2   | DX     | DL    |
//! | 3   | BX     | BL    |
//! | 4   | SP     | AH    |
//! | 5   | BP     | CH    |
//! | 6   | SI     | DH    |
//! | 7   | DI     | BH    |
//!
//! The 8-bit view only reaches AX..BX: indices 0-3 are the low bytes and
//! 4-7 the high bytes of the same four registers.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Register {
    AX,
    CX,
    DX,
    BX,
    SP,
    BP,
    SI,
    DI,
}

impl Register {
    pub const ALL: [Self; 8] = [
        Self::AX,
        Self::CX,
        Self::DX,
        Self::BX,
        Self::SP,
        Self::BP,
        Self::SI,
        Self::DI,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl From<u8> for Register {
    /// Only the low 3 bits are considered.
    fn from(value: u8) -> Self {
        Self::ALL[usize::from(value & 0b111)]
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::AX => "ax",
            Self::CX => "cx",
            Self::DX => "dx",
            Self::BX => "bx",
            Self::SP => "sp",
            Self::BP => "bp",
            Self::SI => "si",
            Self::DI => "di",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum ByteRegister {
    AL,
    CL,
    DL,
    BL,
    AH,
    CH,
    DH,
    BH,
}

impl ByteRegister {
    const ALL: [Self; 8] = [
        Self::AL,
        Self::CL,
        Self::DL,
        Self::BL,
        Self::AH,
        Self::CH,
        Self::DH,
        Self::BH,
    ];

    /// The 16-bit register holding this byte and which of its bytes it is.
    #[must_use]
    pub const fn location(self) -> (Register, u8) {
        match self {
            Self::AL => (Register::AX, 0),
            Self::CL => (Register::CX, 0),
            Self::DL => (Register::DX, 0),
            Self::BL => (Register::BX, 0),
            Self::AH => (Register::AX, 1),
            Self::CH => (Register::CX, 1),
            Self::DH => (Register::DX, 1),
            Self::BH => (Register::BX, 1),
        }
    }
}

impl From<u8> for ByteRegister {
    fn from(value: u8) -> Self {
        Self::ALL[usize::from(value & 0b111)]
    }
}

impl Display for ByteRegister {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (reg, byte) = self.location();
        let reg = reg.to_string();
        let half = if byte == 0 { 'l' } else { 'h' };
        write!(f, "{}{half}", &reg[..1])
    }
}

/// The eight general-purpose registers of one session.
///
/// Only the executor writes here; the decoder never touches registers.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registers([u16; 8]);

impl Registers {
    #[must_use]
    pub const fn register_at(&self, reg: Register) -> u16 {
        self.0[reg.index()]
    }

    pub const fn set_register_at(&mut self, reg: Register, new_value: u16) {
        self.0[reg.index()] = new_value;
    }

    #[must_use]
    pub fn byte_register_at(&self, reg: ByteRegister) -> u8 {
        let (full, byte) = reg.location();
        self.register_at(full).get_byte(byte)
    }

    pub fn set_byte_register_at(&mut self, reg: ByteRegister, new_value: u8) {
        let (full, byte) = reg.location();
        self.0[full.index()].set_byte(byte, new_value);
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<u16> {
        self.0.to_vec()
    }

    /// `(register, value)` pairs in encoding order.
    pub fn iter(&self) -> impl Iterator<Item = (Register, u16)> + '_ {
        Register::ALL.into_iter().zip(self.0.iter().copied())
    }
}

impl Display for Registers {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let line = self
            .iter()
            .map(|(reg, value)| format!("{}:{value:04X}", reg.to_string().to_uppercase()))
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{line}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn register_from_index() {
        assert_eq!(Register::from(0_u8), Register::AX);
        assert_eq!(Register::from(2_u8), Register::DX);
        assert_eq!(Register::from(7_u8), Register::DI);
        assert_eq!(Register::from(0b1010_u8), Register::DX);
    }

    #[test]
    fn byte_registers_alias_low_and_high_halves() {
        let mut registers = Registers::default();
        registers.set_register_at(Register::CX, 0x1234);

        assert_eq!(registers.byte_register_at(ByteRegister::CL), 0x34);
        assert_eq!(registers.byte_register_at(ByteRegister::CH), 0x12);

        registers.set_byte_register_at(ByteRegister::CH, 0xAB);
        assert_eq!(registers.register_at(Register::CX), 0xAB34);

        registers.set_byte_register_at(ByteRegister::CL, 0xCD);
        assert_eq!(registers.register_at(Register::CX), 0xABCD);
    }

    #[test]
    fn byte_register_names() {
        assert_eq!(ByteRegister::from(0_u8).to_string(), "al");
        assert_eq!(ByteRegister::from(6_u8).to_string(), "dh");
    }

    #[test]
    fn display_all_registers() {
        let mut registers = Registers::default();
        registers.set_register_at(Register::AX, 0xFFA0);
        registers.set_register_at(Register::DX, 0xF9D9);

        assert_eq!(
            registers.to_string(),
            "AX:FFA0 CX:0000 DX:F9D9 BX:0000 SP:0000 BP:0000 SI:0000 DI:0000"
        );
    }
}
