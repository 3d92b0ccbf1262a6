//! A single contiguous bit range and the arithmetic needed to copy it out of a byte slice.

use crate::{
    bits::{BYTE_SIZE, byte_len},
    errors::BoundsError,
};

/// How the source bytes line up with the destination bytes during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// The last extracted bit is the low bit of a source byte: a straight copy.
    Aligned,
    /// Destination and source span the same number of bytes; each destination
    /// byte blends the previous and the current source byte.
    BiasedToPreviousByte,
    /// The source spans one more byte than the destination; each destination
    /// byte blends the current and the next source byte.
    BiasedToNextByte,
}

/// Extracts `length` bits starting at `bit_start` from byte slices.
///
/// The extracted bits are right-aligned in the smallest buffer able to hold
/// them, so extracting 12 bits yields 2 bytes whose top 4 bits are zero.
///
/// Extractors are `Copy` and can be shared freely between threads. Changing the
/// bounds with [BitExtractor::set_bounds] requires exclusive access.
///
/// ```
/// use bitextract::BitExtractor;
///
/// let ex = BitExtractor::new(4, 8);
/// assert_eq!(ex.extract(&[0xAB, 0xCD]), vec![0xBC]);
/// assert_eq!(ex.extract_u64(&[0xAB, 0xCD]), 0xBC);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitExtractor {
    bit_start: usize,
    length: usize,
    byte_start: usize,
    src_len: usize,
    dest_len: usize,
    alignment: Alignment,
    rshift: u8,
    lshift: u8,
    mask: u8,
}

impl BitExtractor {
    /// Builds an extractor for the bits `[start, start + length)`.
    ///
    /// Usable in `const` context. Panics if `length` is zero or the range
    /// overflows; use [BitExtractor::try_new] for untrusted bounds.
    pub const fn new(start: usize, length: usize) -> Self {
        match Self::try_new(start, length) {
            Ok(ex) => ex,
            Err(BoundsError::ZeroLength) => panic!("bit extractor length must be at least 1"),
            Err(BoundsError::Overflow { .. }) => panic!("bit extractor range overflows"),
        }
    }

    /// Builds an extractor for the bits `[start, start + length)`.
    pub const fn try_new(start: usize, length: usize) -> Result<Self, BoundsError> {
        if length < 1 {
            return Err(BoundsError::ZeroLength);
        }
        let end = match start.checked_add(length) {
            Some(end) => end,
            None => return Err(BoundsError::Overflow { start, length }),
        };

        let byte_start = start / BYTE_SIZE;
        let src_end_byte = (end - 1) / BYTE_SIZE;
        let src_end_offset = ((end - 1) % BYTE_SIZE) as u8;

        let src_len = src_end_byte - byte_start + 1;
        let dest_len = byte_len(length);
        let rshift = 7 - src_end_offset;
        let lshift = src_end_offset + 1;
        let mask = if length % BYTE_SIZE == 0 {
            0xFF
        } else {
            (1u8 << (length % BYTE_SIZE)) - 1
        };

        let alignment = if rshift == 0 {
            Alignment::Aligned
        } else if src_len == dest_len {
            Alignment::BiasedToPreviousByte
        } else {
            Alignment::BiasedToNextByte
        };

        Ok(BitExtractor {
            bit_start: start,
            length,
            byte_start,
            src_len,
            dest_len,
            alignment,
            rshift,
            lshift,
            mask,
        })
    }

    /// Changes the extractor's start bit and bit length. On error the extractor is unchanged.
    pub fn set_bounds(&mut self, start: usize, length: usize) -> Result<(), BoundsError> {
        *self = Self::try_new(start, length)?;
        Ok(())
    }

    pub fn bit_start(&self) -> usize {
        self.bit_start
    }

    pub fn bit_length(&self) -> usize {
        self.length
    }

    /// Index of the source byte holding the first extracted bit.
    pub fn byte_start(&self) -> usize {
        self.byte_start
    }

    /// Number of source bytes the bit range touches.
    pub fn src_len(&self) -> usize {
        self.src_len
    }

    /// Number of bytes this extractor extracts: `ex.extract(data).len() == ex.byte_len()`.
    pub fn byte_len(&self) -> usize {
        self.dest_len
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn rshift(&self) -> u8 {
        self.rshift
    }

    pub fn lshift(&self) -> u8 {
        self.lshift
    }

    /// Mask applied to the first destination byte.
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Returns a zeroed buffer of the size needed by [BitExtractor::extract_into].
    pub fn buffer(&self) -> Vec<u8> {
        vec![0; self.dest_len]
    }

    /// Extracts the bits into a newly allocated, right-sized buffer.
    pub fn extract(&self, src: &[u8]) -> Vec<u8> {
        let mut dest = self.buffer();
        self.extract_into(&mut dest, src);
        dest
    }

    /// Extracts the bits as a big-endian unsigned integer.
    ///
    /// Panics if the extractor's byte length is greater than 8.
    pub fn extract_u64(&self, src: &[u8]) -> u64 {
        assert!(
            self.dest_len <= 8,
            "cannot extract {} bytes into a u64",
            self.dest_len
        );

        let mut scratch = [0u8; 8];
        self.extract_into(&mut scratch[8 - self.dest_len..], src);
        u64::from_be_bytes(scratch)
    }

    /// Extracts the bits into the first [BitExtractor::byte_len] bytes of `dest`.
    ///
    /// Never allocates. Panics if `src` doesn't contain the whole bit range or
    /// `dest` is smaller than [BitExtractor::byte_len].
    pub fn extract_into(&self, dest: &mut [u8], src: &[u8]) {
        assert!(
            src.len() >= self.byte_start + self.src_len,
            "cannot extract {} bytes from source[{}..{}], as it only has {} total bytes",
            self.src_len,
            self.byte_start,
            self.byte_start + self.src_len,
            src.len()
        );
        assert!(
            dest.len() >= self.dest_len,
            "destination size {} is too small (should be at least {})",
            dest.len(),
            self.dest_len
        );

        let src = &src[self.byte_start..self.byte_start + self.src_len];
        let dest = &mut dest[..self.dest_len];

        match self.alignment {
            Alignment::Aligned => dest.copy_from_slice(src),
            Alignment::BiasedToPreviousByte => {
                dest[0] = src[0] >> self.rshift;
                for i in 1..dest.len() {
                    // previous byte shifts up; current byte shifts down
                    dest[i] = src[i - 1] << self.lshift | src[i] >> self.rshift;
                }
            }
            Alignment::BiasedToNextByte => {
                for i in 0..dest.len() {
                    // current byte shifts up; next byte shifts down
                    dest[i] = src[i] << self.lshift | src[i + 1] >> self.rshift;
                }
            }
        }

        dest[0] &= self.mask;
    }

    /// Writes the low [BitExtractor::bit_length] bits of `value` into the
    /// extractor's bit range of `dest`, leaving every other bit untouched.
    ///
    /// This is the inverse of [BitExtractor::extract_u64]. Panics if the range
    /// is wider than 64 bits, `dest` doesn't contain the range, or `value`
    /// doesn't fit in the range.
    pub fn insert_u64(&self, dest: &mut [u8], value: u64) {
        assert!(
            self.length <= 64,
            "cannot insert a u64 into a {} bit range",
            self.length
        );
        assert!(
            dest.len() >= self.byte_start + self.src_len,
            "cannot insert into destination[{}..{}], as it only has {} total bytes",
            self.byte_start,
            self.byte_start + self.src_len,
            dest.len()
        );
        assert!(
            self.length == 64 || value >> self.length == 0,
            "value {value} does not fit in {} bits",
            self.length
        );

        let mut pos = self.bit_start;
        let mut remaining = self.length;
        while remaining > 0 {
            let offset = pos % BYTE_SIZE;
            let take = (BYTE_SIZE - offset).min(remaining);
            let shift = BYTE_SIZE - offset - take;

            let chunk = (value >> (remaining - take)) as u8 & low_bits(take);
            let mask = low_bits(take) << shift;

            let byte = &mut dest[pos / BYTE_SIZE];
            *byte = (*byte & !mask) | (chunk << shift);

            pos += take;
            remaining -= take;
        }
    }
}

/// A byte with its low `n` bits set, `n` in `1..=8`.
fn low_bits(n: usize) -> u8 {
    (0xFFu16 >> (BYTE_SIZE - n)) as u8
}
