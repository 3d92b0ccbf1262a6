//! Error types for SGTIN decoding, validation and encoding, and for ASCII packing.

use bitextract::HexError;
use thiserror::Error;

use crate::sgtin::{Filter, Scheme};

/// Errors produced by the SGTIN codec.
///
/// The first group means the data can't be decoded at all. The rest are
/// reported by [crate::Sgtin::validate_ranges] or the encoders for SGTINs that
/// decode fine but break the Tag Data Standard's rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SgtinError {
    /// The input is empty.
    #[error("no data provided")]
    Empty,
    /// The input was given as hex and isn't valid hex.
    #[error("unable to decode EPC as hex: {0}")]
    Hex(#[from] HexError),
    /// The first byte is neither the SGTIN-96 nor the SGTIN-198 header.
    #[error("not an SGTIN header: {0:#04X}")]
    UnknownHeader(u8),
    /// The input length doesn't match the scheme named by the header.
    #[error("{scheme} should have {expected} bytes, but has {actual}")]
    WrongLength {
        scheme: Scheme,
        expected: usize,
        actual: usize,
    },
    /// The partition is greater than 6, so the field split is unknown.
    #[error("invalid partition: {0}")]
    InvalidPartition(u8),

    /// The filter is outside 0..=7 or one of the GS1 reserved values.
    #[error("invalid filter: {} ({})", .0.value(), .0)]
    InvalidFilter(Filter),
    /// The indicator isn't a single digit.
    #[error("invalid indicator: {0}")]
    InvalidIndicator(u8),
    /// The item reference has more digits than the partition allows.
    #[error("item refs in partition {partition} must be in [0, {max}], but is {item_ref}")]
    ItemRefOutOfRange {
        partition: u8,
        max: u64,
        item_ref: u64,
    },
    /// The company prefix has more digits than the partition allows.
    #[error(
        "company prefix in partition {partition} must be in [0, {max}], but is {company_prefix}"
    )]
    CompanyPrefixOutOfRange {
        partition: u8,
        max: u64,
        company_prefix: u64,
    },
    /// The serial is empty.
    #[error("serial is empty")]
    EmptySerial,
    /// The serial is longer than 20 characters.
    #[error(
        "SGTIN serial numbers are limited to at most 20 characters, but this serial has {0} characters"
    )]
    SerialTooLong(usize),
    /// The serial has characters outside the GS1 AI character set, or
    /// non-null characters after a null.
    #[error("serial {0:?} is not encodable with the GS1 AI character set")]
    SerialCharset(String),

    /// SGTIN-96 serials are decimal numbers.
    #[error("SGTIN-96 serials must consist of digits 0-9 only")]
    NonNumericSerial,
    /// SGTIN-96 serials must fit in 38 bits.
    #[error("SGTIN-96 serials must be less than 2^38")]
    SerialOutOfRange,
    /// SGTIN-96 serials can't start with '0', except the serial "0" itself.
    #[error("serials cannot have leading '0's, except for the unique value '0'")]
    LeadingZeroSerial,
    /// The serial couldn't be packed as 7-bit ASCII.
    #[error(transparent)]
    Ascii(#[from] AsciiError),
}

/// Errors produced when packing text as 7-bit ASCII.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsciiError {
    /// A byte is outside 0..=0x7F.
    #[error("byte {byte:#04X} at index {index} is not 7-bit ASCII")]
    NotAscii { index: usize, byte: u8 },
}
