//! Text front-end: turning the input token into bytes.
//!
//! Two shapes of token are accepted:
//!
//! - a **program**: an even-length hex string, one byte per digit pair, in
//!   stream order (`31d2b8cced69d07856`);
//! - a **packed operand pair**: exactly 8 hex digits holding two
//!   little-endian 16-bit numbers (`34127856` is `0x1234` and `0x5678`).

use crate::error::{EmuError, EmuResult};

/// Parses a hex program token into its byte stream.
///
/// # Errors
///
/// Returns [`EmuError::MalformedInput`] when the token is empty, has an odd
/// number of digits, or contains a character that is not a hex digit.
pub fn parse_program(token: &str) -> EmuResult<Vec<u8>> {
    let token = token.trim();

    if token.is_empty() {
        return Err(EmuError::malformed("empty token"));
    }

    if token.len() % 2 != 0 {
        return Err(EmuError::malformed(format!(
            "odd number of hex digits ({})",
            token.len()
        )));
    }

    token
        .as_bytes()
        .chunks_exact(2)
        .enumerate()
        .map(|(idx, pair)| {
            let high = hex_digit(pair[0], idx * 2)?;
            let low = hex_digit(pair[1], idx * 2 + 1)?;
            Ok((high << 4) | low)
        })
        .collect()
}

/// Splits a packed literal into its two little-endian 16-bit operands.
///
/// # Errors
///
/// Returns [`EmuError::MalformedInput`] unless the token is exactly 8 hex
/// digits.
pub fn unpack_operands(token: &str) -> EmuResult<(u16, u16)> {
    let bytes = parse_program(token)?;

    match bytes.as_slice() {
        [a_lo, a_hi, b_lo, b_hi] => Ok((
            u16::from_le_bytes([*a_lo, *a_hi]),
            u16::from_le_bytes([*b_lo, *b_hi]),
        )),
        _ => Err(EmuError::malformed(format!(
            "packed operands need 8 hex digits, got {}",
            bytes.len() * 2
        ))),
    }
}

fn hex_digit(c: u8, position: usize) -> EmuResult<u8> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(EmuError::malformed(format!(
            "invalid hex digit {:?} at position {position}",
            char::from(c)
        ))),
    }
}
