//! # Opcode and Addressing Bytes
//!
//! The same opcode byte is read through two layouts, depending on the
//! instruction family:
//!
//! ```text
//!  7 6 5 4 3 2 1 0
//! ┌───────────┬─┬─┐
//! │    op     │d│s│   two-byte forms (XOR, IMUL): op, direction, size
//! ├─────────┬─┴─┴─┤
//! │   opr   │  r  │   one-byte forms (MOV reg, imm): operand, register
//! └─────────┴─────┘
//!
//!  7 6 5 4 3 2 1 0
//! ┌───┬─────┬─────┐
//! │mod│ reg │ r/m │   addressing (ModRM) byte
//! └───┴─────┴─────┘
//! ```

use std::fmt::{Display, Formatter};
use std::ops::Deref;

use crate::bitwise::Bits;

/// `mod` value for register-direct operands.
pub const MOD_REGISTER: u8 = 0b11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeByte(u8);

impl From<u8> for OpcodeByte {
    fn from(byte: u8) -> Self {
        Self(byte)
    }
}

impl OpcodeByte {
    /// Operand size: 0 = 8-bit, 1 = 16-bit.
    #[must_use]
    pub fn s(self) -> bool {
        self.0.get_bit(0)
    }

    /// Direction: when set the `reg` field of the addressing byte is the
    /// destination, otherwise `r/m` is.
    #[must_use]
    pub fn d(self) -> bool {
        self.0.get_bit(1)
    }

    #[must_use]
    pub fn op(self) -> u8 {
        self.0.get_bits(2..=7)
    }

    #[must_use]
    pub fn opr(self) -> u8 {
        self.0.get_bits(3..=7)
    }

    #[must_use]
    pub fn r(self) -> u8 {
        self.0.get_bits(0..=2)
    }
}

impl Deref for OpcodeByte {
    type Target = u8;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModRm(u8);

impl From<u8> for ModRm {
    fn from(byte: u8) -> Self {
        Self(byte)
    }
}

impl ModRm {
    #[must_use]
    pub fn mode(self) -> u8 {
        self.0.get_bits(6..=7)
    }

    #[must_use]
    pub fn reg(self) -> u8 {
        self.0.get_bits(3..=5)
    }

    #[must_use]
    pub fn rm(self) -> u8 {
        self.0.get_bits(0..=2)
    }

    #[must_use]
    pub fn is_register_direct(self) -> bool {
        self.mode() == MOD_REGISTER
    }
}

impl Deref for ModRm {
    type Target = u8;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn raw_bits(byte: u8) -> String {
    let mut bits = String::new();
    for c in format!("{byte:08b}").chars() {
        bits.push(c);
        bits.push('_');
    }
    bits.pop();
    bits
}

impl Display for OpcodeByte {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "POS: |7_6_5_4_3_2_1_0|")?;
        writeln!(f, "RAW: |{}|", raw_bits(self.0))?;
        writeln!(f, "FMT: |____op_____|d|s| op=0x{:02X}", self.op())?;
        write!(f, "FMT: |___opr___|__r__| opr=0x{:02X}", self.opr())
    }
}

impl Display for ModRm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "POS: |7_6_5_4_3_2_1_0|")?;
        writeln!(f, "RAW: |{}|", raw_bits(self.0))?;
        write!(
            f,
            "FMT: |mod|_reg_|_r/m_| mod={} reg={} rm={}",
            self.mode(),
            self.reg(),
            self.rm()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn xor_opcode_fields() {
        let op = OpcodeByte::from(0x31);
        assert_eq!(op.op(), 0x0C);
        assert!(!op.d());
        assert!(op.s());
    }

    #[test]
    fn mov_opcode_fields() {
        let op = OpcodeByte::from(0xBB);
        assert_eq!(op.opr(), 0x17);
        assert_eq!(op.r(), 3);
    }

    #[test]
    fn imul_opcode_fields() {
        let op = OpcodeByte::from(0x69);
        assert_eq!(op.op(), 0x1A);
        assert!(!op.d());
        assert!(op.s());
    }

    #[test]
    fn modrm_fields() {
        let modrm = ModRm::from(0xD0);
        assert_eq!(modrm.mode(), 0b11);
        assert_eq!(modrm.reg(), 2);
        assert_eq!(modrm.rm(), 0);
        assert!(modrm.is_register_direct());

        assert!(!ModRm::from(0x50).is_register_direct());
    }

    #[test]
    fn modrm_display() {
        assert_eq!(
            ModRm::from(0xD2).to_string(),
            "POS: |7_6_5_4_3_2_1_0|\nRAW: |1_1_0_1_0_0_1_0|\nFMT: |mod|_reg_|_r/m_| mod=3 reg=2 rm=2"
        );
    }
}
