//! Validator — structural checks on a submitted grid
//!
//! Rules run in a fixed order and the first failure wins:
//! non-empty, square, alphabet, minimum size.

use super::grid::{Grid, Nucleotide};
use crate::config::{CasePolicy, DetectorConfig};

/// Why a row sequence is not a valid grid
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid DNA: sequence is empty")]
    Empty,

    #[error("Invalid DNA: matrix is not square, row {row} has length {len}, expected {expected}")]
    MalformedGrid { row: usize, len: usize, expected: usize },

    #[error("Invalid DNA: character '{ch}' at row {row}, column {col} is not one of A, C, G, T")]
    InvalidAlphabet { row: usize, col: usize, ch: char },

    #[error("Invalid DNA: grid is {size}x{size}, minimum is {min}x{min}")]
    GridTooSmall { size: usize, min: usize },
}

/// Stateless grid validator
#[derive(Debug, Clone)]
pub struct Validator {
    min_size: usize,
    case_policy: CasePolicy,
}

impl Validator {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            min_size: config.min_size,
            case_policy: config.case_policy,
        }
    }

    pub fn validate<S: AsRef<str>>(&self, rows: &[S]) -> Result<Grid, ValidationError> {
        if rows.is_empty() {
            return Err(ValidationError::Empty);
        }

        let n = rows.len();
        for (i, row) in rows.iter().enumerate() {
            // Length in characters, so multi-byte input reports sensibly.
            let len = row.as_ref().chars().count();
            if len != n {
                return Err(ValidationError::MalformedGrid { row: i, len, expected: n });
            }
        }

        let mut normalized = Vec::with_capacity(n);
        for (i, row) in rows.iter().enumerate() {
            let row = match self.case_policy {
                CasePolicy::Strict => row.as_ref().to_string(),
                CasePolicy::Normalize => row.as_ref().to_ascii_uppercase(),
            };
            if let Some((col, ch)) = row
                .chars()
                .enumerate()
                .find(|&(_, ch)| !ch.is_ascii() || Nucleotide::from_byte(ch as u8).is_none())
            {
                return Err(ValidationError::InvalidAlphabet { row: i, col, ch });
            }
            normalized.push(row);
        }

        if n < self.min_size {
            return Err(ValidationError::GridTooSmall { size: n, min: self.min_size });
        }

        Ok(Grid::from_validated(normalized))
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(&DetectorConfig::default())
    }
}
