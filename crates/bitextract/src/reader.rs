//! Sequential, resettable access to an exploder's fields.

use crate::{
    errors::{ExplodeError, ReadError},
    exploder::BitExploder,
};

/// Reads the fields of a [BitExploder] from a data slice, one field per call.
///
/// ```
/// use bitextract::{BitExploder, ReadError};
///
/// let exploder = BitExploder::new(&[4, 12]).unwrap();
/// let mut reader = exploder.reader(&[0xAB, 0xCD]).unwrap();
///
/// let mut buf = [0u8; 2];
/// assert_eq!(reader.read(&mut buf), Ok(2));
/// assert_eq!(buf, [0x00, 0x0A]);
/// assert_eq!(reader.read(&mut buf), Ok(2));
/// assert_eq!(buf, [0x0B, 0xCD]);
/// assert_eq!(reader.read(&mut buf), Err(ReadError::EndOfData));
/// ```
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    exploder: &'a BitExploder,
    data: &'a [u8],
    field: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a reader over `data`. Fails if `data` is shorter than the exploder's bit length.
    pub fn new(exploder: &'a BitExploder, data: &'a [u8]) -> Result<Self, ExplodeError> {
        exploder.check_len(data)?;

        Ok(Self {
            exploder,
            data,
            field: 0,
        })
    }

    /// Extracts the current field into the trailing bytes of `buf`, zeroing
    /// any leading bytes, and advances to the next field.
    ///
    /// Returns `buf.len()` on success, regardless of the field's size. If `buf`
    /// is too small for the field, returns [ReadError::ShortBuffer] and does not
    /// advance. Once every field has been read, returns [ReadError::EndOfData].
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, ReadError> {
        let ex = self
            .exploder
            .extractors()
            .get(self.field)
            .ok_or(ReadError::EndOfData)?;

        let needed = ex.byte_len();
        if buf.len() < needed {
            return Err(ReadError::ShortBuffer {
                needed,
                available: buf.len(),
            });
        }

        let (lead, field) = buf.split_at_mut(buf.len() - needed);
        lead.fill(0);
        ex.extract_into(field, self.data);
        self.field += 1;

        Ok(buf.len())
    }

    /// Starts reading again from field 0. The data is unchanged.
    pub fn reset(&mut self) {
        self.field = 0;
    }

    /// Replaces the underlying data and resets the reader.
    pub fn set_data(&mut self, data: &'a [u8]) -> Result<(), ExplodeError> {
        self.exploder.check_len(data)?;
        self.data = data;
        self.field = 0;

        Ok(())
    }

    /// Index of the field the next [BitReader::read] returns.
    pub fn field_index(&self) -> usize {
        self.field
    }

    pub fn is_exhausted(&self) -> bool {
        self.field >= self.exploder.num_fields()
    }
}
