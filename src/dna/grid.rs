//! Grid — a validated square matrix of nucleotides
//!
//! Only the validator builds a `Grid`, so every instance is square and
//! restricted to `ACGT`. The fingerprint is a SHA256 digest over the
//! concatenated rows and serves as the dedup key in the store.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The four bases accepted in a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nucleotide {
    A,
    C,
    G,
    T,
}

impl Nucleotide {
    /// Accepted bytes, uppercase only
    pub const VALID_BYTES: &'static [u8] = b"ACGT";

    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'A' => Some(Self::A),
            b'C' => Some(Self::C),
            b'G' => Some(Self::G),
            b'T' => Some(Self::T),
            _ => None,
        }
    }
}

/// An immutable, validated N×N grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    rows: Vec<String>,
}

impl Grid {
    /// Caller guarantees squareness and alphabet; see `Validator::validate`.
    pub(crate) fn from_validated(rows: Vec<String>) -> Self {
        Self { size: rows.len(), rows }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Byte at row `r`, column `c`
    #[inline]
    pub fn at(&self, r: usize, c: usize) -> u8 {
        self.rows[r].as_bytes()[c]
    }

    /// Content digest: SHA256 over the rows in order, hex encoded (64 chars).
    ///
    /// Rows all have length N, so plain concatenation is unambiguous.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for row in &self.rows {
            hasher.update(row.as_bytes());
        }
        hex::encode(hasher.finalize())
    }

    pub fn summary(&self) -> String {
        format!("Grid {}x{} | fingerprint={}", self.size, self.size, &self.fingerprint()[..12])
    }
}
