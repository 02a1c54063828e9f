//! ClassificationRecord — one row per distinct grid

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of classifying one distinct grid. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    /// Store-assigned sequence number, starting at 1
    pub id: u64,
    /// SHA256 hex digest of the rows, unique within a store
    pub fingerprint: String,
    pub is_mutant: bool,
    /// Rows as validated (uppercased when normalizing)
    pub raw_sequence: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ClassificationRecord {
    pub fn new(id: u64, fingerprint: String, is_mutant: bool, raw_sequence: Vec<String>) -> Self {
        Self {
            id,
            fingerprint,
            is_mutant,
            raw_sequence,
            created_at: Utc::now(),
        }
    }

    pub fn label(&self) -> &'static str {
        if self.is_mutant { "mutant" } else { "human" }
    }

    pub fn summary(&self) -> String {
        format!(
            "#{} {} | {} | {}x{} | {}",
            self.id,
            &self.fingerprint[..self.fingerprint.len().min(12)],
            self.label(),
            self.raw_sequence.len(),
            self.raw_sequence.len(),
            self.created_at.to_rfc3339()
        )
    }
}
