//! # bitextract
//!
//! Extracts arbitrary, non-byte-aligned bit ranges from byte slices.
//!
//! Bits are numbered MSB-first: bit 0 is the most significant bit of byte 0,
//! and indices increase left to right, byte to byte.
//!
//! - [BitExtractor] describes one contiguous bit range and copies it,
//!   right-aligned, into the smallest buffer that holds it.
//! - [BitExploder] splits a buffer into consecutive fields of fixed widths.
//! - [BitReader] walks an exploder's fields one `read` at a time.
//!
//! Misusing an extractor (a source that doesn't contain its range, a
//! destination that's too small) is a programming error and panics. Bad input
//! data, such as a buffer too short for an exploder, is reported as an error.
//!
//! ## Example
//!
//! ```
//! use bitextract::BitExploder;
//!
//! let exploder = BitExploder::new(&[8, 48, 40]).unwrap();
//! let fields = exploder.explode_hex("0F00000000000C00000014D2").unwrap();
//!
//! assert_eq!(&fields[0], &[0x0F]);
//! assert_eq!(&fields[2], &[0x00, 0x00, 0x00, 0x14, 0xD2]);
//! ```

pub mod bits;
pub mod errors;
pub mod exploder;
pub mod extractor;
pub mod reader;
#[cfg(feature = "serde")]
pub mod serde;

pub use errors::{BoundsError, ExplodeError, HexError, ReadError, WidthsError};
pub use exploder::{BitExploder, Exploded, split_widths};
pub use extractor::{Alignment, BitExtractor};
pub use reader::BitReader;
