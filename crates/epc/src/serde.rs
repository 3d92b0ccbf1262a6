//! Serde-deserializable SGTIN definition.
//!
//! An [Sgtin] deserializes through [SgtinDef], so every field passes
//! [Sgtin::validate_ranges] before the value exists:
//!
//! ```json
//! { "filter": 1, "partition": 5, "company_prefix": 614141,
//!   "indicator": 0, "item_ref": 734, "serial": "314159" }
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    errors::SgtinError,
    sgtin::{Filter, Sgtin},
};

/// The fields of an [Sgtin], unchecked.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SgtinDef {
    pub filter: Filter,
    pub partition: u8,
    pub company_prefix: u64,
    pub indicator: u8,
    pub item_ref: u64,
    pub serial: String,
}

impl TryFrom<SgtinDef> for Sgtin {
    type Error = SgtinError;

    fn try_from(value: SgtinDef) -> Result<Self, Self::Error> {
        Sgtin::new(
            value.filter,
            value.partition,
            value.indicator,
            value.company_prefix,
            value.item_ref,
            value.serial,
        )
    }
}

impl From<&Sgtin> for SgtinDef {
    fn from(value: &Sgtin) -> Self {
        SgtinDef {
            filter: value.filter(),
            partition: value.partition(),
            company_prefix: value.company_prefix(),
            indicator: value.indicator(),
            item_ref: value.item_ref(),
            serial: value.serial().to_string(),
        }
    }
}
