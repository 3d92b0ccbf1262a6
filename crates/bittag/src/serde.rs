//! Serde-deserializable decoder configuration.
//!
//! ```json
//! { "authority": "test.com", "date": "2019-01-01", "widths": [8, 48, 40] }
//! { "authority": "test.com", "date": "2019-01-01", "widths": { "spec": "8.48.40" } }
//! ```

use bitextract::{BitExploder, serde::WidthsDef};
use serde::{Deserialize, Serialize};

use crate::{decoder::Decoder, errors::TagError};

/// A tagging entity plus the field widths of the tag data it decodes.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DecoderDef {
    pub authority: String,
    pub date: String,
    pub widths: WidthsDef,
}

impl TryFrom<DecoderDef> for Decoder {
    type Error = TagError;

    fn try_from(value: DecoderDef) -> Result<Self, Self::Error> {
        let exploder = BitExploder::new(&value.widths.to_widths()?)?;
        Decoder::with_exploder(&value.authority, &value.date, exploder)
    }
}
