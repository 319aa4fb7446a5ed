use std::fmt::Debug;
use std::mem::size_of;
use std::ops::RangeInclusive;

/// Shift-and-mask helpers to pull sub-byte fields out of opcode and
/// addressing bytes, and to work on the halves of 16-bit registers.
/// The index (`bit_idx`) goes from lsb to msb (right to left).
pub trait Bits
where
    Self: Copy + Into<u32> + TryFrom<u32>,
    <Self as TryFrom<u32>>::Error: Debug,
{
    const WIDTH: u8 = (size_of::<Self>() * 8) as u8;

    fn widened(self) -> u32 {
        <Self as Into<u32>>::into(self)
    }

    fn get_bit(self, bit_idx: u8) -> bool {
        debug_assert!(bit_idx < Self::WIDTH);
        (self.widened() >> bit_idx) & 1 == 1
    }

    /// The most significant bit, i.e. the sign of a two's-complement value.
    fn sign_bit(self) -> bool {
        self.get_bit(Self::WIDTH - 1)
    }

    fn get_bits(self, bits_range: RangeInclusive<u8>) -> Self {
        let start = *bits_range.start();
        let end = *bits_range.end();
        debug_assert!(start <= end && end < Self::WIDTH);

        // `length` ones moved to the right place, e.g. 3..=5 is 0b0011_1000.
        let length = u32::from(end - start + 1);
        let mask = u32::MAX >> (32 - length);

        // The masked value always fits in `Self`.
        Self::try_from((self.widened() >> start) & mask).unwrap()
    }

    fn get_byte(self, byte_nth: u8) -> u8 {
        debug_assert!(byte_nth < Self::WIDTH / 8);
        ((self.widened() >> (byte_nth * 8)) & 0xFF) as u8
    }

    fn set_byte(&mut self, byte_nth: u8, value: u8) {
        debug_assert!(byte_nth < Self::WIDTH / 8);
        let shift = byte_nth * 8;
        let cleared = self.widened() & !(0xFF << shift);
        *self = Self::try_from(cleared | (u32::from(value) << shift)).unwrap();
    }

    /// Two's-complement negation (`~x + 1`) at the width of `Self`.
    fn twos_complement(self) -> Self {
        let mask = u32::MAX >> (32 - u32::from(Self::WIDTH));
        let negated = (!self.widened()).wrapping_add(1) & mask;
        Self::try_from(negated).unwrap()
    }
}

impl Bits for u32 {}
impl Bits for u16 {}
impl Bits for u8 {}
