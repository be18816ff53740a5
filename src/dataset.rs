//! Dataset record types and the wire shape persisted to the ledger.
//!
//! Serde renames pin the persisted JSON field names so any existing ledger
//! data stays readable.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Fixed dataset categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataCategory {
    Genomic,
    Medical,
    Clinical,
    Other,
}

impl DataCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataCategory::Genomic => "genomic",
            DataCategory::Medical => "medical",
            DataCategory::Clinical => "clinical",
            DataCategory::Other => "other",
        }
    }
}

impl fmt::Display for DataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataCategory {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "genomic" => Ok(DataCategory::Genomic),
            "medical" => Ok(DataCategory::Medical),
            "clinical" => Ok(DataCategory::Clinical),
            "other" => Ok(DataCategory::Other),
            unknown => Err(EngineError::Validation(format!(
                "unknown data category: {unknown}"
            ))),
        }
    }
}

/// A registered research dataset.
///
/// `id` is unique within a session's collection and assigned sequentially
/// at creation. `protected_value` is the only persisted form of the numeric
/// payload. `created_at` and `creator` never change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub id: u64,
    pub title: String,
    pub description: String,
    #[serde(rename = "encryptedData")]
    pub protected_value: String,
    #[serde(rename = "dataType")]
    pub category: DataCategory,
    /// Identity addresses, insertion-ordered, starting with the creator.
    pub contributors: IndexSet<String>,
    #[serde(rename = "timestamp")]
    pub created_at: i64,
    pub creator: String,
}

/// Caller-supplied input for registering a dataset.
///
/// `seed_value` is the initial numeric payload; the engine never generates
/// domain values itself.
#[derive(Debug, Clone)]
pub struct NewDataset {
    pub title: String,
    pub description: String,
    pub category: DataCategory,
    pub seed_value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_values() {
        for (category, wire) in [
            (DataCategory::Genomic, "\"genomic\""),
            (DataCategory::Medical, "\"medical\""),
            (DataCategory::Clinical, "\"clinical\""),
            (DataCategory::Other, "\"other\""),
        ] {
            assert_eq!(serde_json::to_string(&category).unwrap(), wire);
        }
        assert_eq!("clinical".parse::<DataCategory>().unwrap(), DataCategory::Clinical);
        assert!("unknown".parse::<DataCategory>().is_err());
    }

    #[test]
    fn test_record_wire_field_names() {
        let mut contributors = IndexSet::new();
        contributors.insert("5GrwvaEF".to_string());
        let record = DatasetRecord {
            id: 1,
            title: "Genome Atlas".to_string(),
            description: "Aggregated variants".to_string(),
            protected_value: crate::codec::encode(50.0),
            category: DataCategory::Genomic,
            contributors,
            created_at: 1_700_000_000,
            creator: "5GrwvaEF".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("encryptedData").is_some());
        assert!(json.get("dataType").is_some());
        assert!(json.get("timestamp").is_some());
        assert!(json.get("protected_value").is_none());

        let back: DatasetRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
