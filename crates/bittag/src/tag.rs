use std::fmt;

use num_bigint::BigUint;

/// The value of one decoded field.
///
/// Fields of up to 8 bytes are plain integers; wider fields, whose values
/// can't fit a `u64`, are arbitrary-precision.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    FixedWidth(u64),
    Arbitrary(BigUint),
}

impl FieldValue {
    /// Interprets big-endian, right-aligned field bytes.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        if bytes.len() > 8 {
            return FieldValue::Arbitrary(BigUint::from_bytes_be(bytes));
        }

        let mut buf = [0u8; 8];
        buf[8 - bytes.len()..].copy_from_slice(bytes);
        FieldValue::FixedWidth(u64::from_be_bytes(buf))
    }

    /// The value as a `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        match self {
            FieldValue::FixedWidth(v) => Some(*v),
            FieldValue::Arbitrary(v) => u64::try_from(v).ok(),
        }
    }

    /// The value as a [BigUint], regardless of width.
    pub fn to_biguint(&self) -> BigUint {
        match self {
            FieldValue::FixedWidth(v) => BigUint::from(*v),
            FieldValue::Arbitrary(v) => v.clone(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::FixedWidth(v) => fmt::Display::fmt(v, f),
            FieldValue::Arbitrary(v) => fmt::Display::fmt(v, f),
        }
    }
}

impl fmt::UpperHex for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::FixedWidth(v) => fmt::UpperHex::fmt(v, f),
            FieldValue::Arbitrary(v) => fmt::UpperHex::fmt(v, f),
        }
    }
}

/// Tag data split into numeric fields, plus the URI prefix of the tagging
/// entity that decoded it.
///
/// A unique binary encoding maps to a unique URI, but the URI depends on the
/// exact field layout. Prefer a standard encoding when one is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitTag {
    prefix: String,
    fields: Vec<FieldValue>,
}

impl BitTag {
    pub(crate) fn new(prefix: String, fields: Vec<FieldValue>) -> Self {
        BitTag { prefix, fields }
    }

    /// The tag URI, derived from RFC 4151:
    ///
    /// ```text
    /// tagURI        = "tag:" taggingEntity ":" specific
    /// taggingEntity = authorityName "," date
    /// specific      = the fields as "." separated base-10 values
    /// ```
    pub fn uri(&self) -> String {
        format!("{}:{}", self.prefix, self)
    }

    /// `tag:authority,date`, the part of the URI before the fields.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[FieldValue] {
        &self.fields
    }

    pub fn field(&self, idx: usize) -> Option<&FieldValue> {
        self.fields.get(idx)
    }

    /// Field `idx` as upper-case hex, zero-padded on the left to `width` characters.
    pub fn hex_field(&self, idx: usize, width: usize) -> Option<String> {
        self.fields.get(idx).map(|v| format!("{v:0width$X}"))
    }
}

/// The fields as "." separated base-10 values.
impl fmt::Display for BitTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}
