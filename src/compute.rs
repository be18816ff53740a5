//! Fixed operation set applied to protected values.
//!
//! Each operation is a pure, total function of the decoded value. The value
//! is decoded only long enough to run the transform and is re-encoded
//! immediately; the plaintext never leaves this module.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::dataset::DatasetRecord;
use crate::error::{EngineError, Result};

/// Transformations the engine can run against a protected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Average,
    Sum,
    Normalize,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Average, Operation::Sum, Operation::Normalize];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Average => "average",
            Operation::Sum => "sum",
            Operation::Normalize => "normalize",
        }
    }

    /// The pure transform behind the operation.
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Operation::Average => value * 0.5,
            Operation::Sum => value * 2.0,
            Operation::Normalize => value / 100.0,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "average" => Ok(Operation::Average),
            "sum" => Ok(Operation::Sum),
            "normalize" => Ok(Operation::Normalize),
            unknown => Err(EngineError::Validation(format!(
                "unknown operation: {unknown}"
            ))),
        }
    }
}

/// Apply an operation to a record's protected value.
///
/// Returns a new record with only `protected_value` changed; every other
/// field is carried over untouched.
pub fn apply(record: &DatasetRecord, operation: Operation) -> Result<DatasetRecord> {
    let value = codec::decode(&record.protected_value)?;
    let mut updated = record.clone();
    updated.protected_value = codec::encode(operation.apply(value));
    Ok(updated)
}
