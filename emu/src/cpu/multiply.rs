//! # Software Multiply
//!
//! 16×16→32 multiplication by shift-and-add, for a machine that can only add
//! and shift 16-bit registers.
//!
//! ```text
//!   carry  : shadow        32-bit multiplicand, shifted left every round
//!   high   : low           32-bit result, split across two registers
//!
//!   while multiplier != 0 && multiplicand != 0:
//!       if multiplier & 1:  high:low += carry:shadow
//!       carry:shadow <<= 1
//!       multiplier   >>= 1
//! ```
//!
//! `carry` catches the bits that fall out of the top of `shadow`. Adding the
//! 32-bit multiplicand is done as two 16-bit adds, with the carry-out of the
//! low add folded into the high add.
//!
//! Signed operands go through sign-magnitude: the result sign is the XOR of
//! the operand signs, both operands are made positive, multiplied unsigned,
//! and the 32-bit result is negated at the end when needed.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;

/// A 32-bit product held as two 16-bit halves (conventionally DX:AX).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub high: u16,
    pub low: u16,
}

impl Product {
    #[must_use]
    pub const fn value(self) -> u32 {
        ((self.high as u32) << 16) | self.low as u32
    }

    /// Two's-complement negation across both halves: complement each half,
    /// then increment the low half and carry into the high half when the
    /// low half wraps.
    #[must_use]
    pub const fn negated(self) -> Self {
        let high = !self.high;
        let low = !self.low;

        if low < u16::MAX {
            Self {
                high,
                low: low + 1,
            }
        } else {
            Self {
                high: high.wrapping_add(1),
                low: 0,
            }
        }
    }
}

impl From<u32> for Product {
    fn from(value: u32) -> Self {
        Self {
            high: (value >> 16) as u16,
            low: value as u16,
        }
    }
}

impl Display for Product {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08x}", self.value())
    }
}

/// Unsigned 16×16→32 multiply.
#[must_use]
pub fn unsigned_multiply(multiplier: u16, multiplicand: u16) -> Product {
    let mut multiplier = multiplier;
    let mut shadow = multiplicand;
    let mut carry: u16 = 0;
    let mut product = Product::default();

    // The multiplicand is `carry:shadow`; `shadow` alone can reach zero while
    // bits are still parked in `carry`.
    while multiplier != 0 && (shadow != 0 || carry != 0) {
        if multiplier.get_bit(0) {
            let (low, overflow) = product.low.overflowing_add(shadow);
            product.low = low;
            product.high = product
                .high
                .wrapping_add(carry)
                .wrapping_add(u16::from(overflow));
        }

        carry = (carry << 1) | u16::from(shadow.sign_bit());
        shadow <<= 1;
        multiplier >>= 1;

        tracing::trace!(
            "multiplier {multiplier:016b} multiplicand {carry:016b}_{shadow:016b} result {:016b}_{:016b}",
            product.high,
            product.low
        );
    }

    product
}

/// Signed (two's-complement) 16×16→32 multiply.
#[must_use]
pub fn signed_multiply(multiplier: u16, multiplicand: u16) -> Product {
    let negative = multiplier.sign_bit() ^ multiplicand.sign_bit();

    let magnitude = |value: u16| {
        if value.sign_bit() {
            value.twos_complement()
        } else {
            value
        }
    };

    let product = unsigned_multiply(magnitude(multiplier), magnitude(multiplicand));

    if negative { product.negated() } else { product }
}
