//! RequestHandler — validate → scan → store-if-new → respond
//!
//! Transport-neutral: takes a raw JSON body and hands back a status code
//! plus JSON body. Mutant maps to 200, human to 403, anything the client
//! got wrong to 400.

use crate::config::DetectorConfig;
use crate::dna::{ValidationError, Validator};
use crate::stats::{Stats, StatsAggregator};
use crate::storage::{ClassificationRecord, FingerprintStore};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_FORBIDDEN: u16 = 403;

/// Body of a classification request: `{"dna": ["ATGC", ...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnaRequest {
    #[serde(default)]
    pub dna: Option<Vec<String>>,
}

/// Status code plus JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: serde_json::Value,
}

impl Response {
    fn message(status: u16, message: &str) -> Self {
        Self { status, body: json!({ "message": message }) }
    }

    fn error(err: &RequestError) -> Self {
        Self { status: err.status(), body: json!({ "error": err.to_string() }) }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Client-side failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl RequestError {
    pub fn status(&self) -> u16 {
        STATUS_BAD_REQUEST
    }
}

/// Front door for classification and stats queries
pub struct RequestHandler {
    validator: Validator,
    store: Arc<FingerprintStore>,
}

impl RequestHandler {
    pub fn new(store: Arc<FingerprintStore>, config: &DetectorConfig) -> Self {
        Self {
            validator: Validator::new(config),
            store,
        }
    }

    pub fn store(&self) -> &FingerprintStore {
        &self.store
    }

    /// Parse a JSON body into rows
    pub fn parse(body: &str) -> Result<Vec<String>, RequestError> {
        let request: DnaRequest = serde_json::from_str(body)
            .map_err(|e| RequestError::MalformedRequest(e.to_string()))?;
        request
            .dna
            .ok_or_else(|| RequestError::MalformedRequest("field 'dna' is required".into()))
    }

    /// Typed entry point: validate, then classify once per distinct grid.
    pub fn check<S: AsRef<str>>(&self, rows: &[S]) -> Result<ClassificationRecord, RequestError> {
        let grid = self.validator.validate(rows)?;
        Ok(self.store.classify_and_record(&grid))
    }

    /// `POST /mutant` equivalent
    pub fn handle_mutant(&self, body: &str) -> Response {
        let result = Self::parse(body).and_then(|rows| self.check(&rows));
        match result {
            Ok(record) if record.is_mutant => Response::message(STATUS_OK, "Mutant detected"),
            Ok(_) => Response::message(STATUS_FORBIDDEN, "Not a mutant"),
            Err(e) => {
                warn!("Rejected request: {}", e);
                Response::error(&e)
            }
        }
    }

    pub fn stats(&self) -> Stats {
        StatsAggregator::new(self.store.as_ref()).stats()
    }

    /// `GET /stats` equivalent
    pub fn handle_stats(&self) -> Response {
        let stats = self.stats();
        info!(
            "Stats: {} mutant, {} human, ratio {:.3}",
            stats.mutant_count, stats.human_count, stats.ratio
        );
        Response {
            status: STATUS_OK,
            body: json!({
                "count_mutant_dna": stats.mutant_count,
                "count_human_dna": stats.human_count,
                "ratio": stats.ratio,
            }),
        }
    }
}
