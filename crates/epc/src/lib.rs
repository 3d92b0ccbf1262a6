//! # epc
//!
//! Codecs for the GS1 EPC Tag Data Standard.
//!
//! - [Sgtin] decodes, validates and encodes SGTIN-96 and SGTIN-198 EPCs and
//!   renders them as GTIN-14 element strings or Pure Identity URIs.
//! - [decode_ascii_at] and [encode_ascii_at] handle the 7-bit packed text
//!   used by SGTIN-198 serials.
//! - [escape_gs1] and the `is_gs1_*` checks cover GS1 character sets and the
//!   percent-escaping used in URIs.
//!
//! Decoding is tolerant: it only rejects data whose structure is unknown.
//! Call [Sgtin::validate_ranges] to check the decoded values.
//!
//! ## Example
//!
//! ```
//! use epc::{Scheme, Sgtin};
//!
//! let sgtin = Sgtin::decode_hex("300000000000044000000001").unwrap();
//! sgtin.validate_ranges().unwrap();
//!
//! assert_eq!(sgtin.gtin(), "10000000000014");
//! assert_eq!(sgtin.uri(), "urn:epc:id:sgtin:000000000001.1.1");
//! assert_eq!(
//!     sgtin.encode_hex(Scheme::Sgtin96).unwrap(),
//!     "300000000000044000000001"
//! );
//! ```

pub mod ascii;
pub mod errors;
pub mod gs1;
#[cfg(feature = "serde")]
pub mod serde;
pub mod sgtin;

pub use ascii::{Ascii7, decode_ascii_at, encode_ascii_at, pack_ascii_at};
pub use errors::{AsciiError, SgtinError};
pub use gs1::{escape_gs1, is_gs1_ai_encodable, is_gs1_comp_part_encodable, unescape_gs1};
pub use sgtin::{
    Filter, MAX_SERIAL_LEN, MAX_SGTIN96_SERIAL, SGTIN_PURE_URI_PREFIX, Scheme, Sgtin,
    sgtin_to_gtin14, sgtin_to_pure_uri,
};
