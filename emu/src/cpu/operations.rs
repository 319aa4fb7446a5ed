use tracing::debug;

use crate::cpu::i8086::I8086;
use crate::cpu::instruction::OperandSize;
use crate::cpu::multiply::signed_multiply;
use crate::cpu::registers::{ByteRegister, Register};

impl I8086 {
    pub(crate) fn xor(&mut self, size: OperandSize, destination: u8, source: u8) {
        match size {
            OperandSize::Word => {
                let (rd, rs) = (Register::from(destination), Register::from(source));
                let value = self.registers.register_at(rd) ^ self.registers.register_at(rs);
                self.registers.set_register_at(rd, value);
            }
            OperandSize::Byte => {
                let (rd, rs) = (ByteRegister::from(destination), ByteRegister::from(source));
                let value =
                    self.registers.byte_register_at(rd) ^ self.registers.byte_register_at(rs);
                self.registers.set_byte_register_at(rd, value);
            }
        }
    }

    pub(crate) fn mov(&mut self, size: OperandSize, destination: u8, immediate: u16) {
        match size {
            OperandSize::Word => self
                .registers
                .set_register_at(Register::from(destination), immediate),
            OperandSize::Byte => self.registers.set_byte_register_at(
                ByteRegister::from(destination),
                immediate.to_le_bytes()[0],
            ),
        }
    }

    /// `high:low = low * immediate`, signed. `destination` is both the
    /// multiplier and the low half of the result; `source` gets the high half.
    ///
    /// When both name the same register it ends up holding the low half.
    pub(crate) fn imul(&mut self, destination: u8, source: u8, immediate: u16) {
        let (low, high) = (Register::from(destination), Register::from(source));

        let product = signed_multiply(self.registers.register_at(low), immediate);
        debug!("{high}:{low} = {:08X}", product.value());

        self.registers.set_register_at(high, product.high);
        self.registers.set_register_at(low, product.low);
    }
}
