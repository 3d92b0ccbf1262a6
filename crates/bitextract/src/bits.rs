//! Low-level helpers shared by the extractors and by callers that accept hex input.
//!
//! Bits are addressed in MSB-first order: bit 0 is the high bit of the first byte.

use crate::errors::HexError;

/// Number of bits in a byte.
pub const BYTE_SIZE: usize = 8;

/// Number of bytes needed to hold `bits` bits.
pub const fn byte_len(bits: usize) -> usize {
    bits / BYTE_SIZE + if bits % BYTE_SIZE == 0 { 0 } else { 1 }
}

/// Decodes a hex string (upper or lower case, no separators) into bytes.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, HexError> {
    let digits = s.as_bytes();
    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength(digits.len()));
    }

    let mut out = Vec::with_capacity(digits.len() / 2);
    for (i, pair) in digits.chunks_exact(2).enumerate() {
        let hi = hex_value(pair[0]).ok_or_else(|| invalid_digit(s, i * 2))?;
        let lo = hex_value(pair[1]).ok_or_else(|| invalid_digit(s, i * 2 + 1))?;
        out.push(hi << 4 | lo);
    }

    Ok(out)
}

/// Encodes bytes as an upper-case hex string.
pub fn encode_hex(data: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = String::with_capacity(data.len() * 2);
    for &b in data {
        out.push(DIGITS[(b >> 4) as usize] as char);
        out.push(DIGITS[(b & 0x0F) as usize] as char);
    }

    out
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn invalid_digit(s: &str, index: usize) -> HexError {
    // index may fall inside a multi-byte char; report the char that contains it
    let ch = s
        .char_indices()
        .take_while(|(pos, _)| *pos <= index)
        .last()
        .map_or('\u{FFFD}', |(_, c)| c);

    HexError::InvalidDigit { index, ch }
}
