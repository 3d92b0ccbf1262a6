//! # bittag
//!
//! Turns fixed-width binary tag data into RFC 4151 `tag:` URIs.
//!
//! A [Decoder] pairs a tagging entity (`tag:authority,date`) with a list of
//! adjacent field widths. Decoding splits the data into those fields and
//! yields a [BitTag], whose URI lists the fields as base-10 numbers:
//! `tag:test.com,2019-01-01:15.12.5330`. The decoder can also take such a URI
//! back apart with [Decoder::fields].
//!
//! The URI is only as stable as the field layout; use a standard encoding
//! such as SGTIN when the data has one.

pub mod decoder;
pub mod errors;
#[cfg(feature = "serde")]
pub mod serde;
pub mod tag;

pub use decoder::Decoder;
pub use errors::TagError;
pub use tag::{BitTag, FieldValue};
