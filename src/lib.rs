//! Mutant DNA — classify square nucleotide grids by repeated runs
//!
//! A grid is a mutant when it holds at least two runs of four identical
//! bases, horizontally, vertically or along either diagonal. Every distinct
//! grid is classified once and counted in the running stats.

pub mod config;
pub mod dna;
pub mod storage;
pub mod stats;
pub mod api;

pub use config::{CasePolicy, DetectorConfig, ServiceConfig};
pub use dna::{Grid, SequenceScanner, ValidationError, Validator};
pub use storage::{ClassificationRecord, FingerprintStore};
pub use stats::{Stats, StatsAggregator};
pub use api::RequestHandler;
