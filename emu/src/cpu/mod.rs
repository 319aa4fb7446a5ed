//! # 16-bit x86 Subset
//!
//! Just enough of the 8086 to run a register-only software multiply:
//!
//! | Instruction            | Encoding     |
//! |------------------------|--------------|
//! | `xor r/m16, r16`       | `31 /r`      |
//! | `mov r16, imm16`       | `B8+r iw`    |
//! | `imul r16, r/m16, imm16` | `69 /r iw` |
//!
//! ## Submodules
//!
//! - [`decoder`] - Byte-at-a-time state machine producing [`instruction::Instruction`]s
//! - [`operations`] - Execution against the register file
//! - [`multiply`] - Shift-and-add multiply shared by IMUL and the numeric entry point
//! - [`i8086`] - Session driver tying decoder and register file together

pub mod decoder;
pub mod i8086;
pub mod instruction;

#[allow(clippy::cast_possible_truncation)]
pub mod multiply;
pub mod opcode;

#[allow(clippy::similar_names)]
mod operations;
pub mod registers;
