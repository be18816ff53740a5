//! Session-scoped audit trail.
//!
//! Append-only, newest first, never persisted to the ledger: the log dies
//! with the session.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::util::unix_timestamp;

/// What a log entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Upload,
    Compute,
    Decrypt,
}

/// One audit entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEntry {
    pub kind: ActionKind,
    pub timestamp: i64,
    pub details: String,
}

/// Append-only audit trail, newest first.
#[derive(Debug, Default)]
pub struct ActionLog {
    entries: VecDeque<ActionEntry>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a new entry.
    pub fn record(&mut self, kind: ActionKind, details: impl Into<String>) {
        self.entries.push_front(ActionEntry {
            kind,
            timestamp: unix_timestamp(),
            details: details.into(),
        });
    }

    /// All entries, newest first.
    pub fn snapshot(&self) -> Vec<ActionEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&ActionEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
