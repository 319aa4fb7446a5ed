//! # Byte-Stream Decoder
//!
//! Instructions are decoded one byte at a time, without look-ahead:
//!
//! ```text
//!                 ┌──────────── expect == 0 ─────────────┐
//!                 ▼                                      │
//!  ┌─────────────────┐  XOR/IMUL  ┌────────────────┐     │
//!  │   OperandByte   │ ─────────► │ AddressingByte │ ────┤
//!  └─────────────────┘            └────────────────┘     │
//!          │ MOV                          │ expect > 0   │
//!          ▼                              ▼              │
//!  ┌─────────────────┐                                   │
//!  │  ImmediateByte  │ ◄─────────────────────────────────┤
//!  └─────────────────┘ ─── expect == 0 ──────────────────┘
//! ```
//!
//! | Opcode            | Bytes after opcode  | `expect` |
//! |-------------------|---------------------|----------|
//! | `31 /r`           | ModRM               | 1        |
//! | `B8+r iw`         | imm lo, imm hi      | 2        |
//! | `B0+r ib`         | imm                 | 1        |
//! | `69 /r iw`        | ModRM, imm lo, hi   | 3        |
//!
//! The decoder only builds [`Instruction`]s; it never touches registers.

use tracing::{debug, trace};

use crate::cpu::instruction::{Instruction, MOV_R_IMM16, OpcodeClass, OperandSize};
use crate::cpu::opcode::{ModRm, OpcodeByte};
use crate::error::{EmuError, EmuResult};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    #[default]
    OperandByte,
    AddressingByte,
    ImmediateByte,
}

/// Fields collected while an instruction is being decoded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PendingInstruction {
    pub opcode_class: Option<OpcodeClass>,
    /// 0 = 8-bit, 1 = 16-bit operands.
    pub operand_size_flag: bool,
    pub direction_flag: bool,
    pub destination_register: u8,
    pub source_register: u8,
    /// Immediate being assembled, little-endian.
    pub shadow: u16,
    /// Bytes still needed before the instruction is complete.
    pub expect: u8,
    /// Set for the form with an addressing byte *and* an immediate (IMUL).
    pub tertiary: bool,
}

impl PendingInstruction {
    fn instruction(&self) -> Option<Instruction> {
        let size = OperandSize::from(self.operand_size_flag);

        self.opcode_class.map(|class| match class {
            OpcodeClass::Xor => Instruction::Xor {
                size,
                destination_register: self.destination_register,
                source_register: self.source_register,
            },
            OpcodeClass::Mov => Instruction::Mov {
                size,
                destination_register: self.destination_register,
                immediate: self.shadow,
            },
            OpcodeClass::Imul => Instruction::Imul {
                destination_register: self.destination_register,
                source_register: self.source_register,
                immediate: self.shadow,
            },
        })
    }
}

/// Decoding context of one session.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Decoder {
    state: DecodeState,
    pending: PendingInstruction,
    offset: usize,
}

impl Decoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> DecodeState {
        self.state
    }

    #[must_use]
    pub const fn pending(&self) -> &PendingInstruction {
        &self.pending
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Consumes one byte. Returns the instruction it completes, if any.
    ///
    /// # Errors
    ///
    /// [`EmuError::UnsupportedOpcode`] for an opcode byte outside the
    /// recognized families, [`EmuError::UnsupportedAddressingMode`] for an
    /// addressing byte with a memory operand.
    pub fn feed(&mut self, byte: u8) -> EmuResult<Option<Instruction>> {
        let offset = self.offset;

        debug!("decoding 0x{byte:02X} at {offset} in state {:?}", self.state);

        let completed = match self.state {
            DecodeState::OperandByte => {
                self.decode_opcode(byte, offset)?;
                None
            }
            DecodeState::AddressingByte => {
                self.decode_addressing(byte, offset)?;
                self.consume()
            }
            DecodeState::ImmediateByte => {
                self.decode_immediate(byte);
                self.consume()
            }
        };

        self.offset += 1;
        Ok(completed)
    }

    /// Checks the stream did not stop halfway through an instruction.
    ///
    /// # Errors
    ///
    /// [`EmuError::TruncatedInstruction`] when bytes are still expected.
    pub fn finish(&self) -> EmuResult<()> {
        match self.state {
            DecodeState::OperandByte => Ok(()),
            DecodeState::AddressingByte | DecodeState::ImmediateByte => {
                Err(EmuError::TruncatedInstruction {
                    missing: self.pending.expect,
                })
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn decode_opcode(&mut self, byte: u8, offset: usize) -> EmuResult<()> {
        let opcode = OpcodeByte::from(byte);
        trace!("opcode byte\n{opcode}");

        let Some(class) = OpcodeClass::classify(opcode) else {
            tracing::warn!("unsupported opcode 0x{byte:02X} at {offset}");
            return Err(EmuError::UnsupportedOpcode { byte, offset });
        };

        let mut pending = PendingInstruction {
            opcode_class: Some(class),
            direction_flag: opcode.d(),
            operand_size_flag: opcode.s(),
            ..PendingInstruction::default()
        };

        self.state = match class {
            OpcodeClass::Mov => {
                // One-byte form: `opr` selects the width, `r` the register.
                pending.destination_register = opcode.r();
                pending.operand_size_flag = opcode.opr() == MOV_R_IMM16;
                pending.expect = if pending.operand_size_flag { 2 } else { 1 };
                DecodeState::ImmediateByte
            }
            OpcodeClass::Xor => {
                pending.expect = 1;
                pending.tertiary = false;
                DecodeState::AddressingByte
            }
            OpcodeClass::Imul => {
                pending.expect = 3;
                pending.tertiary = true;
                DecodeState::AddressingByte
            }
        };

        debug!("{class} opcode, {} byte(s) to go", pending.expect);
        self.pending = pending;
        Ok(())
    }

    fn decode_addressing(&mut self, byte: u8, offset: usize) -> EmuResult<()> {
        let modrm = ModRm::from(byte);
        trace!("addressing byte\n{modrm}");

        if !modrm.is_register_direct() {
            tracing::warn!("memory operand in addressing byte 0x{byte:02X} at {offset}");
            return Err(EmuError::UnsupportedAddressingMode { byte, offset });
        }

        if self.pending.direction_flag {
            self.pending.destination_register = modrm.reg();
            self.pending.source_register = modrm.rm();
        } else {
            self.pending.destination_register = modrm.rm();
            self.pending.source_register = modrm.reg();
        }

        debug!(
            "mod {} reg {} rm {}, dest {} src {}",
            modrm.mode(),
            modrm.reg(),
            modrm.rm(),
            self.pending.destination_register,
            self.pending.source_register
        );
        Ok(())
    }

    fn decode_immediate(&mut self, byte: u8) {
        let pending = &mut self.pending;

        if pending.tertiary || pending.operand_size_flag {
            // Low byte first: each byte enters at the top and pushes the
            // previous one down.
            pending.shadow = (pending.shadow >> 8) | (u16::from(byte) << 8);
        } else {
            pending.shadow = u16::from(byte);
        }
    }

    fn consume(&mut self) -> Option<Instruction> {
        self.pending.expect -= 1;

        if self.pending.expect > 0 {
            self.state = DecodeState::ImmediateByte;
            return None;
        }

        let instruction = std::mem::take(&mut self.pending).instruction();
        self.state = DecodeState::OperandByte;
        instruction
    }
}
