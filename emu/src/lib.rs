#[allow(clippy::cast_possible_truncation)]
mod bitwise;

pub mod cpu;
pub mod error;
pub mod hex;

pub use cpu::i8086::I8086;
pub use cpu::multiply::{Product, signed_multiply, unsigned_multiply};
pub use error::{EmuError, EmuResult};
