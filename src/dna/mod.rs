//! DNA grids — the pure half of the service
//!
//! A grid is validated once, then scanned for repeated same-letter runs.
//! Nothing in here touches storage or does I/O.

mod grid;
mod validator;
mod scanner;

pub use grid::{Grid, Nucleotide};
pub use validator::{ValidationError, Validator};
pub use scanner::{Direction, Line, SequenceScanner};
