use tracing::{debug, trace};

use crate::cpu::decoder::Decoder;
use crate::cpu::instruction::Instruction;
use crate::cpu::multiply::Product;
use crate::cpu::registers::{Register, Registers};
use crate::error::{EmuError, EmuResult};

/// One interpretation session: a register file and the decoder feeding it.
///
/// Bytes go in via [`I8086::step`]; every completed instruction is executed
/// before the next byte is looked at. The first error halts the session and
/// is returned again by any further call.
#[derive(Debug, Default, Clone)]
pub struct I8086 {
    pub registers: Registers,
    decoder: Decoder,
    executed: usize,
    fault: Option<EmuError>,
}

impl I8086 {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes one byte and executes the instruction it completes, if any.
    ///
    /// # Errors
    ///
    /// Any decode error, or the error that already halted the session.
    pub fn step(&mut self, byte: u8) -> EmuResult<Option<Instruction>> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }

        let decoded = self.decoder.feed(byte).inspect_err(|e| {
            self.fault = Some(e.clone());
        })?;

        if let Some(instruction) = decoded {
            self.execute(instruction);
        }

        Ok(decoded)
    }

    /// Feeds the whole stream, then reports DX:AX.
    ///
    /// # Errors
    ///
    /// Stops at the first decode error; a stream ending mid-instruction is
    /// [`EmuError::TruncatedInstruction`].
    pub fn run(&mut self, program: &[u8]) -> EmuResult<Product> {
        for &byte in program {
            self.step(byte)?;
        }

        self.decoder.finish().inspect_err(|e| {
            self.fault = Some(e.clone());
        })?;

        Ok(self.result())
    }

    pub fn execute(&mut self, instruction: Instruction) {
        use Instruction::{Imul, Mov, Xor};

        debug!("executing {instruction}");

        match instruction {
            Xor {
                size,
                destination_register,
                source_register,
            } => self.xor(size, destination_register, source_register),
            Mov {
                size,
                destination_register,
                immediate,
            } => self.mov(size, destination_register, immediate),
            Imul {
                destination_register,
                source_register,
                immediate,
            } => self.imul(destination_register, source_register, immediate),
        }

        self.executed += 1;
        trace!("{}", self.registers);
    }

    /// The 32-bit result pair, DX (high) and AX (low).
    #[must_use]
    pub const fn result(&self) -> Product {
        Product {
            high: self.registers.register_at(Register::DX),
            low: self.registers.register_at(Register::AX),
        }
    }

    #[must_use]
    pub const fn executed(&self) -> usize {
        self.executed
    }

    #[must_use]
    pub const fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
