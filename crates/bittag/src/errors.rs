//! Error types for tag URI decoders.

use bitextract::{ExplodeError, HexError};
use thiserror::Error;

/// Errors produced when configuring a [crate::Decoder], decoding tag data, or
/// parsing a tag URI.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    /// The tagging entity's authority is empty.
    #[error("missing tagging entity authority")]
    MissingAuthority,
    /// The tagging entity's date is empty.
    #[error("missing tagging entity date")]
    MissingDate,
    /// The authority isn't a lower-case fully-qualified domain name.
    #[error(
        "bad authority '{0}': authority must be a fully-qualified domain name, \
         using only lower-case a-z, digits 0-9, periods ('.') and hyphens ('-'), \
         fewer than 256 total characters, with individual parts \
         (separated by '.') containing 63 characters or fewer"
    )]
    InvalidAuthority(String),
    /// The date isn't a real calendar date written as `yyyy-MM-dd`.
    #[error("invalid authority date '{0}': expected a yyyy-MM-dd date")]
    InvalidDate(String),
    /// The data couldn't be exploded into fields.
    #[error(transparent)]
    Explode(#[from] ExplodeError),
    /// The data was given as hex and isn't valid hex.
    #[error("unable to decode tag data as hex: {0}")]
    Hex(#[from] HexError),
    /// The URI doesn't start with the decoder's prefix and a ':'.
    #[error("prefix should be '{0}'")]
    WrongPrefix(String),
    /// The URI has fewer fields than the decoder.
    #[error("missing {0} fields")]
    MissingFields(usize),
    /// A URI field is empty or contains something other than digits 0-9.
    #[error("field {0} is invalid (it's empty or contains non-numeric characters)")]
    InvalidField(usize),
    /// A field index past the last field.
    #[error("not enough fields to get index {index}; there are {count}")]
    FieldIndex { index: usize, count: usize },
}
