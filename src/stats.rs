//! Stats — aggregate counts over everything ever classified
//!
//! Holds no state; every call recounts through the store's query
//! interface, so the numbers are never stale.

use serde::{Deserialize, Serialize};

/// Read side of a record collection
pub trait RecordSource {
    /// Number of records with the given classification
    fn count(&self, is_mutant: bool) -> u64;

    /// (mutant, human) as one consistent read
    fn counts(&self) -> (u64, u64) {
        (self.count(true), self.count(false))
    }
}

/// Aggregate view, serialized with the public field names
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(rename = "count_mutant_dna")]
    pub mutant_count: u64,
    #[serde(rename = "count_human_dna")]
    pub human_count: u64,
    /// mutant / human, or 0 with no humans recorded
    pub ratio: f64,
}

impl Stats {
    pub fn from_counts(mutant_count: u64, human_count: u64) -> Self {
        let ratio = if human_count > 0 {
            mutant_count as f64 / human_count as f64
        } else {
            0.0
        };
        Self { mutant_count, human_count, ratio }
    }
}

/// Derives `Stats` from any record source
pub struct StatsAggregator<'a, S: RecordSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: RecordSource + ?Sized> StatsAggregator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    pub fn stats(&self) -> Stats {
        let (mutant, human) = self.source.counts();
        Stats::from_counts(mutant, human)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u64, u64);

    impl RecordSource for Fixed {
        fn count(&self, is_mutant: bool) -> u64 {
            if is_mutant { self.0 } else { self.1 }
        }
    }

    #[test]
    fn test_empty_stats() {
        let stats = StatsAggregator::new(&Fixed(0, 0)).stats();
        assert_eq!(stats, Stats { mutant_count: 0, human_count: 0, ratio: 0.0 });
    }

    #[test]
    fn test_no_humans_ratio_is_zero() {
        let stats = StatsAggregator::new(&Fixed(5, 0)).stats();
        assert_eq!(stats.mutant_count, 5);
        assert_eq!(stats.ratio, 0.0);
    }

    #[test]
    fn test_ratio() {
        let stats = StatsAggregator::new(&Fixed(2, 3)).stats();
        assert!((stats.ratio - 0.6667).abs() < 0.01);
        let stats = StatsAggregator::new(&Fixed(40, 100)).stats();
        assert!((stats.ratio - 0.4).abs() < 1e-9);
    }

    struct Snapshot {
        calls: std::cell::Cell<u32>,
    }

    impl RecordSource for Snapshot {
        fn count(&self, _is_mutant: bool) -> u64 {
            self.calls.set(self.calls.get() + 1);
            0
        }

        fn counts(&self) -> (u64, u64) {
            (3, 6)
        }
    }

    #[test]
    fn test_stats_uses_combined_counts() {
        let source = Snapshot { calls: std::cell::Cell::new(0) };
        let stats = StatsAggregator::new(&source).stats();
        assert_eq!((stats.mutant_count, stats.human_count), (3, 6));
        assert!((stats.ratio - 0.5).abs() < 1e-9);
        assert_eq!(source.calls.get(), 0);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(Stats::from_counts(1, 1)).unwrap();
        assert_eq!(json["count_mutant_dna"], 1);
        assert_eq!(json["count_human_dna"], 1);
        assert_eq!(json["ratio"], 1.0);
    }
}
