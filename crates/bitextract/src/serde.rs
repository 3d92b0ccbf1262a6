//! Serde-deserializable exploder configuration.
//!
//! An exploder is described either by an explicit list of widths or by a
//! delimited widths string, as found in configuration files:
//!
//! ```json
//! { "widths": [8, 48, 40] }
//! { "widths": { "spec": "8.48.40", "delimiter": "." } }
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    errors::ExplodeError,
    exploder::{BitExploder, split_widths},
};

/// Field widths, either listed or given as a delimited string.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum WidthsDef {
    /// Widths in bits, in field order.
    List(Vec<usize>),
    /// A delimited widths string such as `"8.44.44"`.
    Spec {
        spec: String,
        /// Separator between entries; defaults to `"."`.
        #[serde(default = "default_delimiter")]
        delimiter: String,
    },
}

fn default_delimiter() -> String {
    ".".to_string()
}

impl WidthsDef {
    /// Resolves the definition into a widths list.
    pub fn to_widths(&self) -> Result<Vec<usize>, ExplodeError> {
        match self {
            WidthsDef::List(widths) => Ok(widths.clone()),
            WidthsDef::Spec { spec, delimiter } => Ok(split_widths(spec, delimiter)?),
        }
    }
}

/// Top-level exploder definition.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ExploderDef {
    pub widths: WidthsDef,
}

impl TryFrom<ExploderDef> for BitExploder {
    type Error = ExplodeError;

    fn try_from(value: ExploderDef) -> Result<Self, Self::Error> {
        BitExploder::new(&value.widths.to_widths()?)
    }
}

impl From<&BitExploder> for ExploderDef {
    fn from(value: &BitExploder) -> Self {
        ExploderDef {
            widths: WidthsDef::List(value.widths()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_list() {
        let def: ExploderDef = serde_json::from_str(r#"{ "widths": [8, 48, 40] }"#).unwrap();
        let exploder = BitExploder::try_from(def).unwrap();
        assert_eq!(exploder.widths(), vec![8, 48, 40]);
    }

    #[test]
    fn test_widths_spec() {
        let def: ExploderDef =
            serde_json::from_str(r#"{ "widths": { "spec": "8,44,44", "delimiter": "," } }"#)
                .unwrap();
        let exploder = BitExploder::try_from(def).unwrap();
        assert_eq!(exploder.bit_length(), 96);
    }

    #[test]
    fn test_widths_spec_default_delimiter() {
        let def: ExploderDef =
            serde_json::from_str(r#"{ "widths": { "spec": "8.44.44" } }"#).unwrap();
        assert_eq!(def.widths.to_widths().unwrap(), vec![8, 44, 44]);
    }

    #[test]
    fn test_invalid_widths() {
        let def: ExploderDef = serde_json::from_str(r#"{ "widths": [8, 0] }"#).unwrap();
        assert_eq!(
            BitExploder::try_from(def).unwrap_err(),
            ExplodeError::ZeroWidth { index: 1 }
        );
    }

    #[test]
    fn test_round_trip_definition() {
        let exploder = BitExploder::new(&[3, 5]).unwrap();
        let json = serde_json::to_string(&ExploderDef::from(&exploder)).unwrap();
        assert_eq!(json, r#"{"widths":[3,5]}"#);
    }
}
