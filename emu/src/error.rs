use thiserror::Error;

/// Everything that can stop an interpretation session.
///
/// All variants are terminal: once one is returned the session does not try
/// to resynchronize on the byte stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmuError {
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    #[error("unsupported opcode 0x{byte:02X} at offset {offset}")]
    UnsupportedOpcode { byte: u8, offset: usize },

    /// Only register-direct operands (`mod == 0b11`) are decodable.
    #[error("unsupported addressing byte {byte:08b} at offset {offset}")]
    UnsupportedAddressingMode { byte: u8, offset: usize },

    #[error("input ended in the middle of an instruction, {missing} byte(s) missing")]
    TruncatedInstruction { missing: u8 },
}

impl EmuError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }
}

pub type EmuResult<T> = Result<T, EmuError>;
