//! Decoders that turn fixed-width binary tag data into tag URIs.

use std::sync::LazyLock;

use bitextract::{BitExploder, bits::decode_hex};
use chrono::NaiveDate;
use log::{debug, trace};
use regex::Regex;

use crate::{
    errors::TagError,
    tag::{BitTag, FieldValue},
};

const MAX_AUTHORITY_LEN: usize = 255;
const MAX_LABEL_LEN: usize = 63;

/// Lower-case DNS names (RFC 1035, RFC 3986 section 3.2).
static AUTHORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][-a-z0-9]*(\.[-a-z0-9]+)*$").expect("authority pattern compiles")
});

/// Splits tag data into fields of fixed, adjacent bit widths and returns
/// [BitTag]s carrying the decoder's tagging entity.
///
/// ```
/// use bittag::Decoder;
///
/// let decoder = Decoder::new("test.com", "2019-01-01", &[8, 48, 40]).unwrap();
/// let tag = decoder.decode_hex("0F00000000000C00000014D2").unwrap();
///
/// assert_eq!(tag.uri(), "tag:test.com,2019-01-01:15.12.5330");
/// assert_eq!(tag.hex_field(2, 4).unwrap(), "14D2");
/// assert_eq!(decoder.field(&tag.uri(), 2).unwrap(), "5330");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoder {
    // RFC 4151: "tag:" authorityName "," date
    prefix: String,
    exploder: BitExploder,
}

impl Decoder {
    /// Builds a decoder for the given tagging entity and field widths.
    /// See [Decoder::set_tagging_entity] for the rules on `authority` and `date`.
    pub fn new(authority: &str, date: &str, widths: &[usize]) -> Result<Self, TagError> {
        let prefix = tagging_entity(authority, date)?;
        let exploder = BitExploder::new(widths)?;
        debug!("built tag decoder {prefix} with {} fields", exploder.num_fields());

        Ok(Decoder { prefix, exploder })
    }

    /// Builds a decoder around an existing exploder.
    pub fn with_exploder(
        authority: &str,
        date: &str,
        exploder: BitExploder,
    ) -> Result<Self, TagError> {
        let prefix = tagging_entity(authority, date)?;
        Ok(Decoder { prefix, exploder })
    }

    /// Changes the URI prefix of tags decoded from now on. Tags already
    /// decoded keep their prefix. On error the decoder is unchanged.
    ///
    /// Both parts are restricted forms of what RFC 4151 allows. The authority
    /// must be a lower-case, fully-qualified domain name: a-z, 0-9, '.' and
    /// '-', starting with a letter, at most 255 characters, with each
    /// '.'-separated label at most 63 characters. The date must be a real
    /// `yyyy-MM-dd` date, which should be one on which the authority owned the
    /// domain. Neither is checked against DNS.
    pub fn set_tagging_entity(&mut self, authority: &str, date: &str) -> Result<(), TagError> {
        self.prefix = tagging_entity(authority, date)?;
        Ok(())
    }

    /// `tag:authority,date`
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn exploder(&self) -> &BitExploder {
        &self.exploder
    }

    pub fn num_fields(&self) -> usize {
        self.exploder.num_fields()
    }

    /// Total bits the decoder consumes.
    pub fn bit_length(&self) -> usize {
        self.exploder.bit_length()
    }

    /// Decodes tag data. Bytes past the decoder's bit length are ignored.
    pub fn decode(&self, data: &[u8]) -> Result<BitTag, TagError> {
        let exploded = self.exploder.explode(data)?;
        let fields: Vec<FieldValue> = exploded.iter().map(FieldValue::from_be_bytes).collect();
        trace!("decoded {} fields for {}", fields.len(), self.prefix);

        Ok(BitTag::new(self.prefix.clone(), fields))
    }

    /// Decodes hex-encoded tag data. See [Decoder::decode].
    pub fn decode_hex(&self, data: &str) -> Result<BitTag, TagError> {
        let data = decode_hex(data)?;
        self.decode(&data)
    }

    /// Returns the URI's fields, or an error if the URI isn't one this
    /// decoder could have produced.
    ///
    /// The URI must start with the decoder's prefix and a ':', followed by
    /// exactly as many '.'-separated fields as the decoder has, each made only
    /// of digits 0-9.
    pub fn fields<'a>(&self, uri: &'a str) -> Result<Vec<&'a str>, TagError> {
        let specific = uri
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix(':'))
            .ok_or_else(|| TagError::WrongPrefix(self.prefix.clone()))?;

        let num_fields = self.num_fields();
        // any extra '.' ends up in the last field, which then isn't numeric
        let fields: Vec<&str> = specific.splitn(num_fields, '.').collect();
        if fields.len() < num_fields {
            return Err(TagError::MissingFields(num_fields - fields.len()));
        }

        if let Some(i) = fields
            .iter()
            .position(|f| f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(TagError::InvalidField(i));
        }

        Ok(fields)
    }

    /// Returns field `idx` of the URI. The whole URI is validated, so when
    /// using several fields, call [Decoder::fields] once instead.
    pub fn field<'a>(&self, uri: &'a str, idx: usize) -> Result<&'a str, TagError> {
        let fields = self.fields(uri)?;
        fields.get(idx).copied().ok_or(TagError::FieldIndex {
            index: idx,
            count: fields.len(),
        })
    }
}

fn tagging_entity(authority: &str, date: &str) -> Result<String, TagError> {
    if authority.is_empty() {
        return Err(TagError::MissingAuthority);
    }
    if date.is_empty() {
        return Err(TagError::MissingDate);
    }

    if !is_valid_authority(authority) {
        debug!("rejecting tag authority {authority:?}");
        return Err(TagError::InvalidAuthority(authority.to_string()));
    }
    if !is_valid_date(date) {
        debug!("rejecting tag authority date {date:?}");
        return Err(TagError::InvalidDate(date.to_string()));
    }

    Ok(format!("tag:{authority},{date}"))
}

fn is_valid_authority(authority: &str) -> bool {
    authority.len() <= MAX_AUTHORITY_LEN
        && AUTHORITY.is_match(authority)
        && authority.split('.').all(|label| label.len() <= MAX_LABEL_LEN)
}

/// Exactly `yyyy-MM-dd`, naming a day that exists.
fn is_valid_date(date: &str) -> bool {
    let b = date.as_bytes();
    let shape = b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());

    shape && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}
