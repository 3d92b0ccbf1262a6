//! Error types for building extractors and exploders, and for reading fields.

use thiserror::Error;

/// Errors produced when configuring a [crate::BitExtractor] with [crate::BitExtractor::set_bounds].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoundsError {
    /// The extracted range must contain at least one bit.
    #[error("bit length must be at least 1")]
    ZeroLength,
    /// `start + length` does not fit in a `usize`.
    #[error("start ({start}) plus length ({length}) overflows")]
    Overflow { start: usize, length: usize },
}

/// Errors produced when building a [crate::BitExploder] or exploding data with it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExplodeError {
    /// No field widths were given.
    #[error("widths list is empty")]
    EmptyWidths,
    /// A field width is zero.
    #[error("widths must be > 0, but width {index} is 0")]
    ZeroWidth { index: usize },
    /// The widths add up to more bits than can be addressed.
    #[error("field {index} is out of bounds: {source}")]
    Bounds {
        index: usize,
        #[source]
        source: BoundsError,
    },
    /// Input data is shorter than the exploder's total bit length.
    #[error("invalid data length {actual_bits} bits; expected at least {expected_bits} bits")]
    DataTooShort {
        expected_bits: usize,
        actual_bits: usize,
    },
    /// Input was given as hex and isn't valid hex.
    #[error("unable to decode data as hex: {0}")]
    Hex(#[from] HexError),
    /// A widths configuration string couldn't be parsed.
    #[error("invalid widths: {0}")]
    Widths(#[from] WidthsError),
}

/// Conditions reported by [crate::BitReader::read].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// Every field has been read; use `reset` or `set_data` to read again.
    #[error("no more fields to read")]
    EndOfData,
    /// The buffer can't hold the current field. The reader did not advance.
    #[error("buffer too small: field needs {needed} bytes, buffer has {available}")]
    ShortBuffer { needed: usize, available: usize },
}

/// Errors produced by [crate::split_widths].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidthsError {
    /// An entry is empty after trimming whitespace.
    #[error("width {index} is empty")]
    EmptyEntry { index: usize },
    /// An entry isn't a non-negative base-10 integer.
    #[error("unable to convert width {index} ({entry:?})")]
    InvalidEntry { index: usize, entry: String },
}

/// Errors produced by [crate::bits::decode_hex].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    /// Hex strings encode whole bytes, so they need an even number of digits.
    #[error("odd length hex string ({0} digits)")]
    OddLength(usize),
    /// A character isn't a hex digit.
    #[error("invalid hex digit {ch:?} at index {index}")]
    InvalidDigit { index: usize, ch: char },
}
