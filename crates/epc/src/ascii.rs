//! 7-bit ISO 646 (ASCII) text packed into bit strings, as used by SGTIN-198 serials.

use bitextract::{BitExtractor, bits::byte_len};

use crate::errors::AsciiError;

const NULL: u8 = 0;
const CHAR_BITS: usize = 7;

/// One extractor per bit offset within a byte at which a character can start.
const CHAR_EXTRACTORS: [BitExtractor; 8] = [
    BitExtractor::new(0, CHAR_BITS),
    BitExtractor::new(1, CHAR_BITS),
    BitExtractor::new(2, CHAR_BITS),
    BitExtractor::new(3, CHAR_BITS),
    BitExtractor::new(4, CHAR_BITS),
    BitExtractor::new(5, CHAR_BITS),
    BitExtractor::new(6, CHAR_BITS),
    BitExtractor::new(7, CHAR_BITS),
];

/// Text decoded by [decode_ascii_at].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ascii7 {
    /// Every decoded character, nulls included.
    pub text: String,
    /// Index of the first null character, or `text.len()` if there is none.
    /// `&text[..null_index]` is the null-terminated string.
    pub null_index: usize,
    /// True if a non-null character follows a null, i.e. the text isn't
    /// cleanly null-terminated.
    pub trailing_after_null: bool,
}

impl Ascii7 {
    /// The characters before the first null.
    pub fn terminated(&self) -> &str {
        &self.text[..self.null_index]
    }
}

/// Decodes 7-bit packed ASCII whose first character starts at bit `offset` of `data[0]`.
///
/// Every run of 7 bits becomes one character, so the result has
/// `floor((data.len() * 8 - offset) / 7)` characters; leftover bits are
/// ignored. No input is invalid.
///
/// Input too short for a single character decodes to empty text, flagged as
/// trailing garbage only when it is a single non-zero byte.
///
/// Panics if `offset` is greater than 7.
///
/// ```
/// // "Hi" = 1001000 1101001, starting at bit 1
/// let decoded = epc::decode_ascii_at(&[0b0100_1000, 0b1101_0010], 1);
/// assert_eq!(decoded.text, "Hi");
/// ```
pub fn decode_ascii_at(data: &[u8], offset: usize) -> Ascii7 {
    assert!(offset <= 7, "invalid offset {offset}");

    let count = (data.len() * 8).saturating_sub(offset) / CHAR_BITS;
    if count == 0 {
        return Ascii7 {
            text: String::new(),
            null_index: 0,
            trailing_after_null: data.len() == 1 && data[0] != NULL,
        };
    }

    let mut text = String::with_capacity(count);
    let mut null_index = None;
    let mut trailing_after_null = false;
    let mut ch = [0u8; 1];

    for i in 0..count {
        let bit = offset + i * CHAR_BITS;
        CHAR_EXTRACTORS[bit % 8].extract_into(&mut ch, &data[bit / 8..]);

        if ch[0] == NULL {
            null_index.get_or_insert(i);
        } else if null_index.is_some() {
            trailing_after_null = true;
        }
        text.push(char::from(ch[0]));
    }

    Ascii7 {
        null_index: null_index.unwrap_or(count),
        text,
        trailing_after_null,
    }
}

/// Packs `text` as 7-bit characters into `dest`, starting at bit `start_bit`.
///
/// Only the bits holding the characters are written. Fails without writing
/// anything if a byte of `text` isn't ASCII; panics if `dest` is too short.
pub fn pack_ascii_at(dest: &mut [u8], start_bit: usize, text: &[u8]) -> Result<(), AsciiError> {
    if let Some(index) = text.iter().position(|b| !b.is_ascii()) {
        return Err(AsciiError::NotAscii {
            index,
            byte: text[index],
        });
    }
    assert!(
        start_bit + text.len() * CHAR_BITS <= dest.len() * 8,
        "{} characters at bit {} don't fit in {} bytes",
        text.len(),
        start_bit,
        dest.len()
    );

    for (i, &b) in text.iter().enumerate() {
        BitExtractor::new(start_bit + i * CHAR_BITS, CHAR_BITS).insert_u64(dest, u64::from(b));
    }

    Ok(())
}

/// Packs `text` as 7-bit characters into a new buffer, the first character
/// starting at bit `offset` of byte 0. Unused leading and trailing bits are 0.
///
/// Panics if `offset` is greater than 7.
pub fn encode_ascii_at(text: &str, offset: usize) -> Result<Vec<u8>, AsciiError> {
    assert!(offset <= 7, "invalid offset {offset}");

    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut out = vec![0u8; byte_len(offset + text.len() * CHAR_BITS)];
    pack_ascii_at(&mut out, offset, text.as_bytes())?;

    Ok(out)
}
