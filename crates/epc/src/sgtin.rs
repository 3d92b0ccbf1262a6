//! Serialized Global Trade Item Numbers, encoded as SGTIN-96 or SGTIN-198.

use std::fmt;

use bitextract::{
    BitExtractor,
    bits::{decode_hex, encode_hex},
};
use log::{debug, trace};

use crate::{
    ascii::{decode_ascii_at, pack_ascii_at},
    errors::SgtinError,
    gs1::{escape_gs1, is_gs1_ai_encodable},
};

/// Prefix of every SGTIN Pure Identity URI.
pub const SGTIN_PURE_URI_PREFIX: &str = "urn:epc:id:sgtin";

/// Longest serial the GS1 General Specifications allow.
pub const MAX_SERIAL_LEN: usize = 20;

/// Largest serial an SGTIN-96 can hold: 2^38 - 1.
pub const MAX_SGTIN96_SERIAL: u64 = (1 << 38) - 1;

const GCP_START_BIT: usize = 8 + 3 + 3; // header + filter + partition
const SERIAL_START_BIT: usize = GCP_START_BIT + 44; // company prefix + indicator/item ref

const HEADER: BitExtractor = BitExtractor::new(0, 8);
const FILTER: BitExtractor = BitExtractor::new(8, 3);
const PARTITION: BitExtractor = BitExtractor::new(11, 3);
const SERIAL96: BitExtractor = BitExtractor::new(SERIAL_START_BIT, 38);

// The 44 bits after the partition are split between the company prefix and
// the indicator digit + item reference, leaving room for 10^(12-partition)
// prefixes and 10^(partition+1) indicator/item ref values.
const COMPANY_PREFIX: [BitExtractor; 7] = [
    BitExtractor::new(GCP_START_BIT, 40),
    BitExtractor::new(GCP_START_BIT, 37),
    BitExtractor::new(GCP_START_BIT, 34),
    BitExtractor::new(GCP_START_BIT, 30),
    BitExtractor::new(GCP_START_BIT, 27),
    BitExtractor::new(GCP_START_BIT, 24),
    BitExtractor::new(GCP_START_BIT, 20),
];

const INDICATOR_ITEM_REF: [BitExtractor; 7] = [
    BitExtractor::new(SERIAL_START_BIT - 4, 4),
    BitExtractor::new(SERIAL_START_BIT - 7, 7),
    BitExtractor::new(SERIAL_START_BIT - 10, 10),
    BitExtractor::new(SERIAL_START_BIT - 14, 14),
    BitExtractor::new(SERIAL_START_BIT - 17, 17),
    BitExtractor::new(SERIAL_START_BIT - 20, 20),
    BitExtractor::new(SERIAL_START_BIT - 24, 24),
];

/// Number of item references each partition allows: 10^partition.
/// Partition 0 has no item reference; think of it as a single item, 0.
const MAX_ITEMS: [u64; 7] = [1, 10, 100, 1_000, 10_000, 100_000, 1_000_000];

/// Largest company prefix each partition allows (many are forbidden by GS1 rules).
const MAX_PREFIX: [u64; 7] = [
    999_999_999_999,
    99_999_999_999,
    9_999_999_999,
    999_999_999,
    99_999_999,
    9_999_999,
    999_999,
];

/// The binary SGTIN encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scheme {
    /// 96 bits with a numeric, 38-bit serial.
    Sgtin96,
    /// 198 bits (25 bytes, 2 bits of padding) with a 20-character 7-bit ASCII serial.
    Sgtin198,
}

impl Scheme {
    pub const fn header(self) -> u8 {
        match self {
            Scheme::Sgtin96 => 0x30,
            Scheme::Sgtin198 => 0x36,
        }
    }

    /// Exact encoded length in bytes.
    pub const fn byte_len(self) -> usize {
        match self {
            Scheme::Sgtin96 => 12,
            Scheme::Sgtin198 => 25,
        }
    }

    pub const fn from_header(header: u8) -> Option<Scheme> {
        match header {
            0x30 => Some(Scheme::Sgtin96),
            0x36 => Some(Scheme::Sgtin198),
            _ => None,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Sgtin96 => f.write_str("SGTIN-96"),
            Scheme::Sgtin198 => f.write_str("SGTIN-198"),
        }
    }
}

/// The 3-bit filter value, which tells readers what kind of object is tagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Filter(u8);

impl Filter {
    pub const OTHER: Filter = Filter(0);
    pub const POS: Filter = Filter(1);
    pub const FULL_CASE: Filter = Filter(2);
    pub const INNER_PACK: Filter = Filter(4);
    pub const UNIT_LOAD: Filter = Filter(6);
    pub const UNIT_PACK: Filter = Filter(7);

    pub const fn new(value: u8) -> Self {
        Filter(value)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// False if the value doesn't fit in 3 bits or is GS1-reserved (3 and 5).
    pub const fn is_valid(self) -> bool {
        matches!(self.0, 0 | 1 | 2 | 4 | 6 | 7)
    }
}

impl From<u8> for Filter {
    fn from(value: u8) -> Self {
        Filter(value)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => f.write_str("Other"),
            1 => f.write_str("POS"),
            2 => f.write_str("Full Case"),
            4 => f.write_str("Inner Pack"),
            6 => f.write_str("Unit Load"),
            7 => f.write_str("Unit Pack"),
            3 | 5 => f.write_str("Reserved"),
            v => write!(f, "Unknown filter value: {v}"),
        }
    }
}

/// A GS1 GTIN plus a serial identifying one instance of that trade item.
///
/// Serials are strings: GS1 permits alphanumeric serials and treats `"0"`,
/// `"07"` and `"007"` as distinct. SGTIN-96 can only hold decimal serials
/// without leading zeros (see [Sgtin::can_encode_as_sgtin96]); SGTIN-198 holds
/// any serial of up to 20 characters from the GS1 AI character set.
///
/// The company prefix and item reference are kept as integers: the partition
/// fixes their digit counts, so their leading zeros are implied.
///
/// ```
/// use epc::Sgtin;
///
/// let sgtin = Sgtin::decode_hex("3034257BF400B7800004CB2F").unwrap();
/// sgtin.validate_ranges().unwrap();
/// assert_eq!(sgtin.gtin(), "00614141007349");
/// assert_eq!(sgtin.uri(), "urn:epc:id:sgtin:0614141.000734.314159");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "crate::serde::SgtinDef"))]
pub struct Sgtin {
    filter: Filter,
    partition: u8,
    company_prefix: u64,
    indicator: u8,
    item_ref: u64,
    serial: String,
}

impl Sgtin {
    /// Builds an SGTIN from its parts, failing if they break [Sgtin::validate_ranges].
    pub fn new(
        filter: Filter,
        partition: u8,
        indicator: u8,
        company_prefix: u64,
        item_ref: u64,
        serial: impl Into<String>,
    ) -> Result<Self, SgtinError> {
        let sgtin = Sgtin {
            filter,
            partition,
            company_prefix,
            indicator,
            item_ref,
            serial: serial.into(),
        };
        sgtin.validate_ranges()?;

        Ok(sgtin)
    }

    /// Decodes an SGTIN-96 or SGTIN-198 EPC.
    ///
    /// Only the structure is checked: a known header, the matching length and
    /// a partition of at most 6. Field values aren't validated; use
    /// [Sgtin::validate_ranges] to check them against the standard.
    ///
    /// SGTIN-198 data is 198 bits padded with two trailing zero bits to 25 bytes.
    /// Its serial is cut at the first null, unless a non-null character follows
    /// that null: then all 20 characters are kept, nulls included, and
    /// [Sgtin::validate_ranges] rejects the serial. [Sgtin::uri] drops nulls,
    /// so on such an unvalidated value it joins the text on either side of them.
    pub fn decode(data: &[u8]) -> Result<Sgtin, SgtinError> {
        let header = *data.first().ok_or(SgtinError::Empty)?;
        let Some(scheme) = Scheme::from_header(header) else {
            debug!("rejecting EPC with unknown header {header:#04X}");
            return Err(SgtinError::UnknownHeader(header));
        };

        if data.len() != scheme.byte_len() {
            debug!("rejecting {scheme} EPC with {} bytes", data.len());
            return Err(SgtinError::WrongLength {
                scheme,
                expected: scheme.byte_len(),
                actual: data.len(),
            });
        }

        let partition = PARTITION.extract_u64(data) as u8;
        if partition > 6 {
            debug!("rejecting {scheme} EPC with partition {partition}");
            return Err(SgtinError::InvalidPartition(partition));
        }
        let p = usize::from(partition);

        let filter = Filter(FILTER.extract_u64(data) as u8);
        let company_prefix = COMPANY_PREFIX[p].extract_u64(data);
        let iir = INDICATOR_ITEM_REF[p].extract_u64(data);

        let serial = match scheme {
            Scheme::Sgtin96 => SERIAL96.extract_u64(data).to_string(),
            Scheme::Sgtin198 => decode_serial198(data),
        };

        trace!("decoded {scheme}: partition {partition}, filter {filter}");

        Ok(Sgtin {
            filter,
            partition,
            company_prefix,
            // at most 2^24 / 10^6, so it fits; validation rejects anything > 9
            indicator: (iir / MAX_ITEMS[p]) as u8,
            item_ref: iir % MAX_ITEMS[p],
            serial,
        })
    }

    /// Decodes a big-endian, hex-encoded SGTIN EPC. See [Sgtin::decode].
    pub fn decode_hex(epc: &str) -> Result<Sgtin, SgtinError> {
        let data = decode_hex(epc)?;
        Self::decode(&data)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn partition(&self) -> u8 {
        self.partition
    }

    pub fn company_prefix(&self) -> u64 {
        self.company_prefix
    }

    pub fn indicator(&self) -> u8 {
        self.indicator
    }

    pub fn item_ref(&self) -> u64 {
        self.item_ref
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// Checks that every field fits the range the Tag Data Standard gives it.
    ///
    /// GS1 forbids many values that would fit (RCNs with GS1 prefix '02', for
    /// example, aren't valid GTINs); those aren't checked here.
    pub fn validate_ranges(&self) -> Result<(), SgtinError> {
        if !self.filter.is_valid() {
            return Err(SgtinError::InvalidFilter(self.filter));
        }
        if self.indicator > 9 {
            return Err(SgtinError::InvalidIndicator(self.indicator));
        }
        if self.partition > 6 {
            return Err(SgtinError::InvalidPartition(self.partition));
        }

        let p = usize::from(self.partition);
        if self.item_ref >= MAX_ITEMS[p] {
            return Err(SgtinError::ItemRefOutOfRange {
                partition: self.partition,
                max: MAX_ITEMS[p] - 1,
                item_ref: self.item_ref,
            });
        }
        if self.company_prefix > MAX_PREFIX[p] {
            return Err(SgtinError::CompanyPrefixOutOfRange {
                partition: self.partition,
                max: MAX_PREFIX[p],
                company_prefix: self.company_prefix,
            });
        }

        if self.serial.is_empty() {
            return Err(SgtinError::EmptySerial);
        }
        let serial_len = self.serial.chars().count();
        if serial_len > MAX_SERIAL_LEN {
            return Err(SgtinError::SerialTooLong(serial_len));
        }
        if !is_gs1_ai_encodable(&self.serial) {
            return Err(SgtinError::SerialCharset(self.serial.clone()));
        }

        Ok(())
    }

    /// Checks whether the serial can be encoded as SGTIN-96: decimal digits
    /// only, less than 2^38, and no leading '0' unless the serial is "0".
    pub fn can_encode_as_sgtin96(&self) -> Result<(), SgtinError> {
        parse_sgtin96_serial(&self.serial).map(|_| ())
    }

    /// The GS1 check digit of the GTIN.
    pub fn check_digit(&self) -> u8 {
        // only the parity of a digit's position matters, so the company
        // prefix may be anchored at 13 - partition instead of partition + 1
        let sum = check_sum(self.item_ref, 1)
            + check_sum(self.company_prefix, 13 - u32::from(self.partition))
            + check_sum(u64::from(self.indicator), 13);

        ((10 - sum % 10) % 10) as u8
    }

    /// The GS1 GTIN-14 element string: 14 digits, no separators.
    pub fn gtin(&self) -> String {
        let p = usize::from(self.partition);
        if p == 0 {
            // no item reference
            return format!(
                "{}{:012}{}",
                self.indicator,
                self.company_prefix,
                self.check_digit()
            );
        }

        format!(
            "{}{:0cw$}{:0iw$}{}",
            self.indicator,
            self.company_prefix,
            self.item_ref,
            self.check_digit(),
            cw = 12 - p,
            iw = p,
        )
    }

    /// The EPC Pure Identity URI:
    /// `urn:epc:id:sgtin:CompanyPrefix.IndicatorItemRef.EscapedSerial`.
    pub fn uri(&self) -> String {
        let p = usize::from(self.partition);
        let serial = escape_gs1(&self.serial);
        if p == 0 {
            // no item reference; just the indicator
            return format!(
                "{SGTIN_PURE_URI_PREFIX}:{:012}.{}.{serial}",
                self.company_prefix, self.indicator
            );
        }

        format!(
            "{SGTIN_PURE_URI_PREFIX}:{:0cw$}.{}{:0iw$}.{serial}",
            self.company_prefix,
            self.indicator,
            self.item_ref,
            cw = 12 - p,
            iw = p,
        )
    }

    /// Encodes the SGTIN with the given scheme.
    pub fn encode(&self, scheme: Scheme) -> Result<Vec<u8>, SgtinError> {
        match scheme {
            Scheme::Sgtin96 => self.encode_sgtin96().map(|b| b.to_vec()),
            Scheme::Sgtin198 => self.encode_sgtin198().map(|b| b.to_vec()),
        }
    }

    /// Encodes the SGTIN as upper-case hex with the given scheme.
    pub fn encode_hex(&self, scheme: Scheme) -> Result<String, SgtinError> {
        Ok(encode_hex(&self.encode(scheme)?))
    }

    /// Encodes the SGTIN as SGTIN-96. Fails if the fields are out of range or
    /// the serial isn't SGTIN-96 encodable.
    pub fn encode_sgtin96(&self) -> Result<[u8; 12], SgtinError> {
        self.validate_ranges()?;
        let serial = parse_sgtin96_serial(&self.serial)?;

        let mut out = [0u8; 12];
        self.encode_gtin_fields(&mut out, Scheme::Sgtin96);
        SERIAL96.insert_u64(&mut out, serial);

        Ok(out)
    }

    /// Encodes the SGTIN as SGTIN-198, null-padding the serial to 20 characters.
    pub fn encode_sgtin198(&self) -> Result<[u8; 25], SgtinError> {
        self.validate_ranges()?;

        let mut out = [0u8; 25];
        self.encode_gtin_fields(&mut out, Scheme::Sgtin198);
        pack_ascii_at(&mut out, SERIAL_START_BIT, self.serial.as_bytes())?;

        Ok(out)
    }

    /// Writes header, filter, partition, company prefix and indicator/item ref.
    /// The fields must already be validated.
    fn encode_gtin_fields(&self, out: &mut [u8], scheme: Scheme) {
        let p = usize::from(self.partition);

        HEADER.insert_u64(out, u64::from(scheme.header()));
        FILTER.insert_u64(out, u64::from(self.filter.value()));
        PARTITION.insert_u64(out, u64::from(self.partition));
        COMPANY_PREFIX[p].insert_u64(out, self.company_prefix);
        INDICATOR_ITEM_REF[p].insert_u64(
            out,
            u64::from(self.indicator) * MAX_ITEMS[p] + self.item_ref,
        );
    }
}

impl fmt::Display for Sgtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}

/// Decodes a hex SGTIN EPC, validates it and returns its GTIN-14 element string.
pub fn sgtin_to_gtin14(epc: &str) -> Result<String, SgtinError> {
    let sgtin = Sgtin::decode_hex(epc)?;
    sgtin.validate_ranges()?;
    Ok(sgtin.gtin())
}

/// Decodes a hex SGTIN EPC, validates it and returns its Pure Identity URI.
pub fn sgtin_to_pure_uri(epc: &str) -> Result<String, SgtinError> {
    let sgtin = Sgtin::decode_hex(epc)?;
    sgtin.validate_ranges()?;
    Ok(sgtin.uri())
}

/// The 140-bit serial region holds 20 characters. A cleanly terminated serial
/// is cut at its first null; otherwise all 20 characters are kept so that
/// validation reports the garbage after the null.
fn decode_serial198(data: &[u8]) -> String {
    let mut decoded = decode_ascii_at(&data[SERIAL_START_BIT / 8..], SERIAL_START_BIT % 8);
    decoded.text.truncate(MAX_SERIAL_LEN);

    if !decoded.trailing_after_null {
        decoded.text.truncate(decoded.null_index);
    }
    decoded.text
}

fn parse_sgtin96_serial(serial: &str) -> Result<u64, SgtinError> {
    if serial.is_empty() {
        return Err(SgtinError::EmptySerial);
    }
    if !serial.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SgtinError::NonNumericSerial);
    }
    if serial.starts_with('0') && serial != "0" {
        return Err(SgtinError::LeadingZeroSerial);
    }

    match serial.parse::<u64>() {
        Ok(value) if value <= MAX_SGTIN96_SERIAL => Ok(value),
        _ => Err(SgtinError::SerialOutOfRange),
    }
}

/// The part of the GS1 check sum that `n` contributes, given that its ones
/// digit sits at 1-indexed position `first_position` of the whole number
/// (counted from the right, excluding the check digit).
///
/// Digits in odd positions weigh 3, even positions 1; the check digit is
/// `(10 - sum(parts) % 10) % 10`.
fn check_sum(mut n: u64, first_position: u32) -> u64 {
    let mut sum = 0;
    let mut position = first_position;
    while n > 0 {
        let weight = if position % 2 == 1 { 3 } else { 1 };
        sum += (n % 10) * weight;
        n /= 10;
        position += 1;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sgtin(partition: u8, company_prefix: u64, indicator: u8, item_ref: u64) -> Sgtin {
        Sgtin {
            filter: Filter::OTHER,
            partition,
            company_prefix,
            indicator,
            item_ref,
            serial: "0".to_string(),
        }
    }

    #[test]
    fn test_decode_partitions() {
        let cases = [
            ("300000000000044000000001", "10000000000014", "000000000001.1.1"),
            ("300400000000204000000001", "00000000000116", "00000000001.01.1"),
            ("300800000001004000000001", "00000000001014", "0000000001.001.1"),
            ("300C00000010004000000001", "00000000010016", "000000001.0001.1"),
            ("301000000080004000000001", "00000000100014", "00000001.00001.1"),
            ("301400000400004000000001", "00000001000016", "0000001.000001.1"),
            ("301800004000004000000001", "00000010000014", "000001.0000001.1"),
            ("301800000000004000000001", "00000000000017", "000000.0000001.1"),
            ("301800004000000000000001", "00000010000007", "000001.0000000.1"),
        ];

        for (epc, gtin, uri) in cases {
            let sgtin = Sgtin::decode_hex(epc).unwrap();
            sgtin.validate_ranges().unwrap();
            assert_eq!(sgtin.gtin(), gtin, "{epc}");
            assert_eq!(sgtin.uri(), format!("{SGTIN_PURE_URI_PREFIX}:{uri}"), "{epc}");
        }
    }

    #[test]
    fn test_decode_real_tags() {
        let cases = [
            ("30143639F84191AD22901607", "00888446671424", "0888446.067142.193853396487"),
            ("3034257BF400B7800004CB2F", "00614141007349", "0614141.000734.314159"),
            ("300000662D3D311048C6D8D9", "40004285602049", "000428560204.4.69940467929"),
            ("3000011B896A506B29C18539", "10011892394440", "001189239444.1.185384142137"),
            (
                "36143639F8419198B966E1AB366E5B3470DC00000000000000",
                "00888446671424",
                "0888446.067142.193853396487",
            ),
            (
                "36143639F84191A465D9B37A176C5EB1769D72E557D52E5CBC",
                "00888446671424",
                "0888446.067142.Hello!;1=1;'..*_*..%2F",
            ),
        ];

        for (epc, gtin, uri) in cases {
            assert_eq!(sgtin_to_gtin14(epc).unwrap(), gtin, "{epc}");
            assert_eq!(
                sgtin_to_pure_uri(epc).unwrap(),
                format!("{SGTIN_PURE_URI_PREFIX}:{uri}"),
                "{epc}"
            );
        }
    }

    #[test]
    fn test_decode_fields() {
        let sgtin = Sgtin::decode_hex("3034257BF400B7800004CB2F").unwrap();
        assert_eq!(sgtin.filter(), Filter::POS);
        assert_eq!(sgtin.partition(), 5);
        assert_eq!(sgtin.company_prefix(), 614141);
        assert_eq!(sgtin.indicator(), 0);
        assert_eq!(sgtin.item_ref(), 734);
        assert_eq!(sgtin.serial(), "314159");
        assert_eq!(sgtin.check_digit(), 9);
    }

    #[test]
    fn test_decode_structural_errors() {
        assert_eq!(Sgtin::decode(&[]).unwrap_err(), SgtinError::Empty);
        assert_eq!(
            Sgtin::decode_hex("E2801160600002054CC2096F").unwrap_err(),
            SgtinError::UnknownHeader(0xE2)
        );
        assert_eq!(
            Sgtin::decode_hex("30180000400000400000000011").unwrap_err(),
            SgtinError::WrongLength {
                scheme: Scheme::Sgtin96,
                expected: 12,
                actual: 13
            }
        );
        assert!(matches!(
            Sgtin::decode_hex("3018000040000040000000"),
            Err(SgtinError::WrongLength { actual: 11, .. })
        ));
        assert!(matches!(
            Sgtin::decode_hex("36143639F84191A465D9B37A176C5EB1769D72E557D52E5CBADDFC"),
            Err(SgtinError::WrongLength { scheme: Scheme::Sgtin198, .. })
        ));
        assert!(matches!(
            Sgtin::decode_hex("36143636C5EB1769D72E557D52E5CBADDF"),
            Err(SgtinError::WrongLength { scheme: Scheme::Sgtin198, .. })
        ));
        assert_eq!(
            Sgtin::decode_hex("301C00004000004000000001").unwrap_err(),
            SgtinError::InvalidPartition(7)
        );
        assert!(matches!(
            Sgtin::decode_hex("30ZZ"),
            Err(SgtinError::Hex(_))
        ));
    }

    #[test]
    fn test_decode_26_bytes_with_sgtin96_header() {
        let mut data = vec![0u8; 26];
        data[0] = 0x30;
        assert!(matches!(
            Sgtin::decode(&data),
            Err(SgtinError::WrongLength { expected: 12, actual: 26, .. })
        ));
    }

    #[test]
    fn test_decodable_but_out_of_range() {
        let cases = [
            // partition 0, indicator/item ref bits 1111
            ("30000000000007C000000001", SgtinError::InvalidIndicator(15)),
            // partition 6, all 20 company prefix bits set
            (
                "301BFFFFC000004000000001",
                SgtinError::CompanyPrefixOutOfRange {
                    partition: 6,
                    max: 999_999,
                    company_prefix: 1_048_575,
                },
            ),
            // reserved filter 3
            ("307800004000004000000001", SgtinError::InvalidFilter(Filter::new(3))),
        ];

        for (epc, err) in cases {
            let sgtin = Sgtin::decode_hex(epc).unwrap();
            assert_eq!(sgtin.validate_ranges(), Err(err.clone()), "{epc}: {sgtin:?}");
            assert_eq!(sgtin_to_pure_uri(epc), Err(err.clone()));
            assert_eq!(sgtin_to_gtin14(epc), Err(err));
        }
    }

    #[test]
    fn test_serial_with_chars_after_null() {
        let sgtin = Sgtin::decode_hex("36143639F84191A465D9B37A176C5EB1769D72E557D5005CBC").unwrap();
        assert_eq!(sgtin.serial(), "Hello!;1=1;'..*_*\0./");
        assert!(matches!(
            sgtin.validate_ranges(),
            Err(SgtinError::SerialCharset(_))
        ));
        // nulls vanish from the URI, joining the text around them
        assert_eq!(
            sgtin.uri(),
            "urn:epc:id:sgtin:0888446.067142.Hello!;1=1;'..*_*.%2F"
        );
    }

    #[test]
    fn test_serial_with_control_chars() {
        let sgtin = Sgtin::decode_hex("36044032EAC191A465D9B37A176C5EB1769D72E557D5200CBC").unwrap();
        assert_eq!(sgtin.serial().len(), MAX_SERIAL_LEN);
        assert!(matches!(
            sgtin.validate_ranges(),
            Err(SgtinError::SerialCharset(_))
        ));
    }

    #[test]
    fn test_validate_ranges() {
        let valid = sgtin(6, 999_999, 9, 999_999);
        valid.validate_ranges().unwrap();

        let mut s = valid.clone();
        s.filter = Filter::new(3);
        assert_eq!(s.validate_ranges(), Err(SgtinError::InvalidFilter(Filter::new(3))));
        s.filter = Filter::new(5);
        assert!(s.validate_ranges().is_err());
        s.filter = Filter::new(8);
        assert!(s.validate_ranges().is_err());

        let mut s = valid.clone();
        s.indicator = 10;
        assert_eq!(s.validate_ranges(), Err(SgtinError::InvalidIndicator(10)));

        let mut s = valid.clone();
        s.partition = 7;
        assert_eq!(s.validate_ranges(), Err(SgtinError::InvalidPartition(7)));

        let mut s = valid.clone();
        s.item_ref = 1_000_000;
        assert!(matches!(
            s.validate_ranges(),
            Err(SgtinError::ItemRefOutOfRange { max: 999_999, .. })
        ));

        let mut s = valid.clone();
        s.company_prefix = 1_000_000;
        assert!(matches!(
            s.validate_ranges(),
            Err(SgtinError::CompanyPrefixOutOfRange { max: 999_999, .. })
        ));

        let mut s = valid.clone();
        s.serial = String::new();
        assert_eq!(s.validate_ranges(), Err(SgtinError::EmptySerial));
        s.serial = "1".repeat(21);
        assert_eq!(s.validate_ranges(), Err(SgtinError::SerialTooLong(21)));
        s.serial = "a b".to_string();
        assert!(matches!(
            s.validate_ranges(),
            Err(SgtinError::SerialCharset(_))
        ));
    }

    #[test]
    fn test_partition0_has_no_item_ref() {
        let s = sgtin(0, 1, 1, 1);
        assert!(matches!(
            s.validate_ranges(),
            Err(SgtinError::ItemRefOutOfRange { max: 0, .. })
        ));
        sgtin(0, 999_999_999_999, 9, 0).validate_ranges().unwrap();
    }

    #[test]
    fn test_new_validates() {
        assert!(Sgtin::new(Filter::UNIT_PACK, 5, 0, 614141, 734, "314159").is_ok());
        assert_eq!(
            Sgtin::new(Filter::OTHER, 5, 0, 614141, 734, "").unwrap_err(),
            SgtinError::EmptySerial
        );
    }

    #[test]
    fn test_can_encode_as_sgtin96() {
        let with_serial = |serial: &str| Sgtin {
            serial: serial.to_string(),
            ..sgtin(0, 0, 0, 0)
        };

        for serial in ["0", "1", "10", "274877906943"] {
            assert_eq!(with_serial(serial).can_encode_as_sgtin96(), Ok(()), "{serial}");
        }

        assert_eq!(
            with_serial("").can_encode_as_sgtin96(),
            Err(SgtinError::EmptySerial)
        );
        assert_eq!(
            with_serial("A1").can_encode_as_sgtin96(),
            Err(SgtinError::NonNumericSerial)
        );
        assert_eq!(
            with_serial(" 0").can_encode_as_sgtin96(),
            Err(SgtinError::NonNumericSerial)
        );
        for serial in ["00", "000", "01"] {
            assert_eq!(
                with_serial(serial).can_encode_as_sgtin96(),
                Err(SgtinError::LeadingZeroSerial),
                "{serial}"
            );
        }
        assert_eq!(
            with_serial("274877906944").can_encode_as_sgtin96(),
            Err(SgtinError::SerialOutOfRange)
        );
        assert_eq!(
            with_serial("99999999999999999999999").can_encode_as_sgtin96(),
            Err(SgtinError::SerialOutOfRange)
        );
    }

    #[test]
    fn test_check_digit_single_digit() {
        // With one non-zero digit d, the check digit is 10 - d in even
        // positions and (10 - 3d) mod 10 in odd positions.
        let expected = |digit: u64, position: u32| -> u8 {
            let weighted = if position % 2 == 0 { digit } else { 3 * digit };
            ((10 - weighted % 10) % 10) as u8
        };

        for partition in 0..=6u8 {
            let p = u32::from(partition);
            for digit in 1..10u64 {
                for place in 1..=12 - p {
                    let s = sgtin(partition, digit * 10u64.pow(place - 1), 0, 0);
                    s.validate_ranges().unwrap();
                    assert_eq!(s.check_digit(), expected(digit, place + p));
                }

                for place in 1..=p {
                    let s = sgtin(partition, 0, 0, digit * 10u64.pow(place - 1));
                    s.validate_ranges().unwrap();
                    assert_eq!(s.check_digit(), expected(digit, place));
                }

                let s = sgtin(partition, 0, digit as u8, 0);
                assert_eq!(s.check_digit(), expected(digit, 13));
            }
        }
    }

    #[test]
    fn test_check_digit_zero() {
        assert_eq!(sgtin(3, 0, 0, 0).check_digit(), 0);
    }

    #[test]
    fn test_encode_sgtin96() {
        let sgtin = Sgtin::new(Filter::POS, 5, 0, 614141, 734, "314159").unwrap();
        assert_eq!(
            sgtin.encode_hex(Scheme::Sgtin96).unwrap(),
            "3034257BF400B7800004CB2F"
        );
    }

    #[test]
    fn test_encode_sgtin198() {
        let epc = "36143639F84191A465D9B37A176C5EB1769D72E557D52E5CBC";
        let sgtin = Sgtin::decode_hex(epc).unwrap();
        assert_eq!(sgtin.serial(), "Hello!;1=1;'..*_*../");
        assert_eq!(sgtin.encode_hex(Scheme::Sgtin198).unwrap(), epc);
    }

    #[test]
    fn test_boundary_round_trips() {
        for partition in 0..=6u8 {
            let p = usize::from(partition);
            let extremes = [
                (MAX_PREFIX[p], MAX_ITEMS[p] - 1, 9, "274877906943"),
                (0, 0, 0, "0"),
            ];

            for (company_prefix, item_ref, indicator, serial) in extremes {
                let sgtin = Sgtin::new(
                    Filter::UNIT_PACK,
                    partition,
                    indicator,
                    company_prefix,
                    item_ref,
                    serial,
                )
                .unwrap();

                for scheme in [Scheme::Sgtin96, Scheme::Sgtin198] {
                    let bytes = sgtin.encode(scheme).unwrap();
                    assert_eq!(bytes.len(), scheme.byte_len());
                    assert_eq!(
                        Sgtin::decode(&bytes).unwrap(),
                        sgtin,
                        "{scheme}, partition {partition}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_encode_rejects_invalid() {
        let alpha = Sgtin::new(Filter::OTHER, 6, 1, 1, 1, "A1").unwrap();
        assert_eq!(
            alpha.encode_sgtin96().unwrap_err(),
            SgtinError::NonNumericSerial
        );
        assert!(alpha.encode_sgtin198().is_ok());

        let bad = sgtin(6, 1, 12, 1);
        assert_eq!(
            bad.encode(Scheme::Sgtin198).unwrap_err(),
            SgtinError::InvalidIndicator(12)
        );
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(Filter::FULL_CASE.to_string(), "Full Case");
        assert_eq!(Filter::new(5).to_string(), "Reserved");
        assert_eq!(Filter::new(9).to_string(), "Unknown filter value: 9");
        assert!(Filter::UNIT_LOAD.is_valid());
        assert!(!Filter::new(3).is_valid());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_scheme_serde() {
        assert_eq!(
            serde_json::to_string(&Scheme::Sgtin198).unwrap(),
            "\"Sgtin198\""
        );
    }

    #[test]
    fn test_scheme() {
        assert_eq!(Scheme::from_header(0x30), Some(Scheme::Sgtin96));
        assert_eq!(Scheme::from_header(0x36), Some(Scheme::Sgtin198));
        assert_eq!(Scheme::from_header(0x35), None);
        assert_eq!(Scheme::Sgtin198.to_string(), "SGTIN-198");
    }
}
