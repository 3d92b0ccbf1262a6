//! Splits one byte slice into a series of consecutive bit fields.

use std::ops::Index;

use log::trace;

use crate::{
    bits::{self, BYTE_SIZE},
    errors::{ExplodeError, WidthsError},
    extractor::BitExtractor,
    reader::BitReader,
};

/// Explodes byte data into consecutive fields of predefined bit widths.
///
/// Field `i` holds the bits `[sum(widths[..i]), sum(widths[..i]) + widths[i])`,
/// right-aligned in the smallest number of bytes able to hold them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitExploder {
    bit_length: usize,
    exploded_byte_len: usize,
    extractors: Vec<BitExtractor>,
}

impl BitExploder {
    /// Builds an exploder from a list of field widths, in bits.
    pub fn new(widths: &[usize]) -> Result<Self, ExplodeError> {
        let mut exploder = BitExploder {
            bit_length: 0,
            exploded_byte_len: 0,
            extractors: Vec::new(),
        };
        exploder.set_widths(widths)?;

        Ok(exploder)
    }

    /// Builds an exploder from a delimited widths string such as `"8.44.44"`.
    pub fn from_spec(conf: &str, delim: &str) -> Result<Self, ExplodeError> {
        let widths = split_widths(conf, delim)?;
        Self::new(&widths)
    }

    /// Replaces the exploder's widths. On error the exploder is unchanged.
    pub fn set_widths(&mut self, widths: &[usize]) -> Result<(), ExplodeError> {
        if widths.is_empty() {
            return Err(ExplodeError::EmptyWidths);
        }

        let mut bit_length = 0usize;
        let mut exploded_byte_len = 0;
        let mut extractors = Vec::with_capacity(widths.len());

        for (index, &width) in widths.iter().enumerate() {
            if width == 0 {
                return Err(ExplodeError::ZeroWidth { index });
            }

            let ex = BitExtractor::try_new(bit_length, width)
                .map_err(|source| ExplodeError::Bounds { index, source })?;

            bit_length += width;
            exploded_byte_len += ex.byte_len();
            extractors.push(ex);
        }

        trace!(
            "exploder configured: {} fields, {} bits, {} exploded bytes",
            extractors.len(),
            bit_length,
            exploded_byte_len
        );

        self.bit_length = bit_length;
        self.exploded_byte_len = exploded_byte_len;
        self.extractors = extractors;

        Ok(())
    }

    pub fn num_fields(&self) -> usize {
        self.extractors.len()
    }

    /// Sum of all field widths, in bits.
    pub fn bit_length(&self) -> usize {
        self.bit_length
    }

    /// Minimum number of bytes needed to hold the input data.
    pub fn byte_len(&self) -> usize {
        bits::byte_len(self.bit_length)
    }

    /// Minimum number of bytes needed to store all exploded fields.
    ///
    /// Usually larger than [BitExploder::byte_len]; they're equal only when
    /// every field width is a multiple of 8.
    pub fn exploded_byte_len(&self) -> usize {
        self.exploded_byte_len
    }

    pub fn extractors(&self) -> &[BitExtractor] {
        &self.extractors
    }

    /// The field widths this exploder was built from.
    pub fn widths(&self) -> Vec<usize> {
        self.extractors.iter().map(BitExtractor::bit_length).collect()
    }

    /// Explodes `data` into one contiguous buffer, viewed as per-field slices.
    pub fn explode(&self, data: &[u8]) -> Result<Exploded, ExplodeError> {
        self.check_len(data)?;

        let mut buf = vec![0u8; self.exploded_byte_len];
        let mut ends = Vec::with_capacity(self.extractors.len());
        {
            let mut views: Vec<&mut [u8]> = Vec::with_capacity(self.extractors.len());
            let mut rest = buf.as_mut_slice();
            let mut end = 0;
            for ex in &self.extractors {
                let (view, tail) = std::mem::take(&mut rest).split_at_mut(ex.byte_len());
                views.push(view);
                rest = tail;
                end += ex.byte_len();
                ends.push(end);
            }

            self.explode_into(&mut views, data);
        }

        Ok(Exploded { buf, ends })
    }

    /// Convenience for [BitExploder::explode] on hex-encoded data.
    pub fn explode_hex(&self, data: &str) -> Result<Exploded, ExplodeError> {
        let bytes = bits::decode_hex(data)?;
        self.explode(&bytes)
    }

    /// Explodes `data` into caller-provided buffers, one per field.
    ///
    /// Never allocates. Panics if there are fewer buffers than fields, if any
    /// buffer is smaller than its field's byte length, or if `data` is too short.
    pub fn explode_into<D: AsMut<[u8]>>(&self, dest: &mut [D], data: &[u8]) {
        assert!(
            dest.len() >= self.extractors.len(),
            "not enough destination buffers ({}) to extract {} fields",
            dest.len(),
            self.extractors.len()
        );

        for (ex, buf) in self.extractors.iter().zip(dest.iter_mut()) {
            ex.extract_into(buf.as_mut(), data);
        }
    }

    /// Returns one zeroed buffer per field, each sized for [BitExploder::explode_into].
    pub fn buffers(&self) -> Vec<Vec<u8>> {
        self.extractors.iter().map(BitExtractor::buffer).collect()
    }

    /// Returns a [BitReader] that reads the fields of `data` one at a time.
    pub fn reader<'a>(&'a self, data: &'a [u8]) -> Result<BitReader<'a>, ExplodeError> {
        BitReader::new(self, data)
    }

    pub(crate) fn check_len(&self, data: &[u8]) -> Result<(), ExplodeError> {
        if data.len() * BYTE_SIZE < self.bit_length {
            return Err(ExplodeError::DataTooShort {
                expected_bits: self.bit_length,
                actual_bits: data.len() * BYTE_SIZE,
            });
        }

        Ok(())
    }
}

/// The fields produced by [BitExploder::explode], backed by a single buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exploded {
    buf: Vec<u8>,
    ends: Vec<usize>,
}

impl Exploded {
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// Bytes of field `index`, or `None` if there's no such field.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        let end = *self.ends.get(index)?;
        let start = if index == 0 { 0 } else { self.ends[index - 1] };
        Some(&self.buf[start..end])
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// The backing buffer: every field, back to back.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

impl Index<usize> for Exploded {
    type Output = [u8];

    fn index(&self, index: usize) -> &[u8] {
        match self.get(index) {
            Some(field) => field,
            None => panic!(
                "field index {} out of range for {} fields",
                index,
                self.len()
            ),
        }
    }
}

/// Splits a delimited widths configuration string into a list of widths.
///
/// Entries are trimmed; empty or non-numeric entries are rejected. Zero widths
/// are accepted here and rejected by [BitExploder::new].
///
/// ```
/// let widths = bitextract::split_widths("8. 44 .44", ".").unwrap();
/// assert_eq!(widths, vec![8, 44, 44]);
/// ```
pub fn split_widths(conf: &str, delim: &str) -> Result<Vec<usize>, WidthsError> {
    conf.split(delim)
        .enumerate()
        .map(|(index, entry)| {
            let entry = entry.trim();
            if entry.is_empty() {
                return Err(WidthsError::EmptyEntry { index });
            }

            entry.parse::<usize>().map_err(|_| WidthsError::InvalidEntry {
                index,
                entry: entry.to_string(),
            })
        })
        .collect()
}
