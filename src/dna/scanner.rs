//! SequenceScanner — decides mutant vs human
//!
//! Every direction is reduced to a set of lines (start cell + step). A single
//! traversal walks each line once, tracking the current same-letter run; a
//! run is counted the moment it reaches `min_run_length`, so a maximal run
//! of any length counts exactly once. Scanning stops as soon as the
//! required number of runs has been seen.

use super::grid::Grid;
use crate::config::DetectorConfig;
use log::debug;

/// Scan directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Left to right within a row
    Horizontal,
    /// Top to bottom within a column
    Vertical,
    /// Top-left to bottom-right
    Diagonal,
    /// Top-right to bottom-left
    AntiDiagonal,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
        Direction::AntiDiagonal,
    ];

    /// (row step, column step)
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }

    /// All lines of this direction covering an `n`×`n` grid.
    pub fn lines(self, n: usize) -> impl Iterator<Item = Line> {
        let step = self.step();
        let starts: Box<dyn Iterator<Item = (usize, usize)>> = match self {
            Direction::Horizontal => Box::new((0..n).map(|r| (r, 0))),
            Direction::Vertical => Box::new((0..n).map(|c| (0, c))),
            // Left column downwards, then top row rightwards.
            Direction::Diagonal => Box::new((0..n).rev().map(|r| (r, 0)).chain((1..n).map(|c| (0, c)))),
            // Top row, then right column downwards.
            Direction::AntiDiagonal => Box::new(
                (0..n)
                    .map(|c| (0, c))
                    .chain((1..n).map(move |r| (r, n - 1))),
            ),
        };
        starts.map(move |start| Line::new(start, step, n))
    }
}

/// A straight line of cells through the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub start: (usize, usize),
    pub step: (isize, isize),
    pub len: usize,
}

impl Line {
    fn new(start: (usize, usize), step: (isize, isize), n: usize) -> Self {
        let (r, c) = start;
        let rows_left = if step.0 > 0 { n - r } else { usize::MAX };
        let cols_left = match step.1 {
            1 => n - c,
            -1 => c + 1,
            _ => usize::MAX,
        };
        Self { start, step, len: rows_left.min(cols_left) }
    }

    /// Coordinates along the line, in order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (r0, c0) = (self.start.0 as isize, self.start.1 as isize);
        (0..self.len as isize).map(move |i| {
            ((r0 + i * self.step.0) as usize, (c0 + i * self.step.1) as usize)
        })
    }
}

/// The detection algorithm
#[derive(Debug, Clone)]
pub struct SequenceScanner {
    min_run_length: usize,
    required_runs: usize,
}

impl SequenceScanner {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            min_run_length: config.min_run_length,
            required_runs: config.required_runs,
        }
    }

    pub fn is_mutant(&self, grid: &Grid) -> bool {
        let found = self.count_runs(grid, self.required_runs);
        debug!("{} | qualifying runs seen: {}", grid.summary(), found);
        found >= self.required_runs
    }

    /// Count qualifying runs, stopping once `limit` is reached.
    pub fn count_runs(&self, grid: &Grid, limit: usize) -> usize {
        if limit == 0 {
            return 0;
        }
        let n = grid.size();
        let mut found = 0;
        for direction in Direction::ALL {
            for line in direction.lines(n) {
                if line.len < self.min_run_length {
                    continue;
                }
                found += self.scan_line(grid, &line, limit - found);
                if found >= limit {
                    return found;
                }
            }
        }
        found
    }

    /// Runs on one line, at most `limit`.
    fn scan_line(&self, grid: &Grid, line: &Line, limit: usize) -> usize {
        let mut found = 0;
        let mut prev = 0u8;
        let mut run = 0usize;
        for (r, c) in line.cells() {
            let base = grid.at(r, c);
            if base == prev {
                run += 1;
            } else {
                prev = base;
                run = 1;
            }
            // Equality, not >=: a longer run must not be counted again.
            if run == self.min_run_length {
                found += 1;
                if found >= limit {
                    break;
                }
            }
        }
        found
    }
}

impl Default for SequenceScanner {
    fn default() -> Self {
        Self::new(&DetectorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dna::Validator;
    use proptest::prelude::*;

    fn grid(rows: &[&str]) -> Grid {
        Validator::default().validate(rows).unwrap()
    }

    fn all_runs(rows: &[&str]) -> usize {
        SequenceScanner::default().count_runs(&grid(rows), usize::MAX)
    }

    #[test]
    fn test_line_coverage() {
        let n = 6;
        assert_eq!(Direction::Horizontal.lines(n).count(), n);
        assert_eq!(Direction::Vertical.lines(n).count(), n);
        assert_eq!(Direction::Diagonal.lines(n).count(), 2 * n - 1);
        assert_eq!(Direction::AntiDiagonal.lines(n).count(), 2 * n - 1);
        for d in Direction::ALL {
            let cells: usize = d.lines(n).map(|l| l.len).sum();
            assert_eq!(cells, n * n, "{:?} should cover every cell once", d);
        }
    }

    #[test]
    fn test_anti_diagonal_cells() {
        let line = Direction::AntiDiagonal.lines(4).nth(3).unwrap();
        let cells: Vec<_> = line.cells().collect();
        assert_eq!(cells, vec![(0, 3), (1, 2), (2, 1), (3, 0)]);

        let tail = Direction::AntiDiagonal.lines(4).last().unwrap();
        assert_eq!(tail.cells().collect::<Vec<_>>(), vec![(3, 3)]);
    }

    #[test]
    fn test_reference_mutant() {
        let g = grid(&["ATGCGA", "CAGTGC", "TTATGT", "AGAAGG", "CCCCTA", "TCACTG"]);
        assert!(SequenceScanner::default().is_mutant(&g));
    }

    #[test]
    fn test_reference_human() {
        let g = grid(&["ATGCGA", "CAGTGC", "TTATTT", "AGACGG", "GCGTCA", "TCACTG"]);
        assert!(!SequenceScanner::default().is_mutant(&g));
        assert_eq!(all_runs(&["ATGCGA", "CAGTGC", "TTATTT", "AGACGG", "GCGTCA", "TCACTG"]), 0);
    }

    #[test]
    fn test_single_run_is_human() {
        let rows = ["AAAATG", "TGCAGT", "GCTTCT", "CGATCT", "AGTACG", "TGACTA"];
        assert_eq!(all_runs(&rows), 1);
        assert!(!SequenceScanner::default().is_mutant(&grid(&rows)));
    }

    #[test]
    fn test_two_horizontal_runs() {
        let rows = ["AAAATG", "TGCAGT", "GCTTTT", "CGATCT", "AGTACG", "TGACTA"];
        assert!(SequenceScanner::default().is_mutant(&grid(&rows)));
    }

    #[test]
    fn test_vertical_runs() {
        let rows = ["ATGCGA", "ATGTGC", "ATATGT", "AGAAGG", "CCCCTA", "TCACTG"];
        assert!(SequenceScanner::default().is_mutant(&grid(&rows)));
    }

    #[test]
    fn test_long_run_counts_once() {
        // Row 0 is a single run of 6; nothing else qualifies.
        let rows = ["AAAAAA", "CATGCA", "ATTCAA", "AACCAT", "GTCCGT", "AATGTA"];
        assert_eq!(all_runs(&rows), 1);
        assert!(!SequenceScanner::default().is_mutant(&grid(&rows)));
    }

    #[test]
    fn test_broken_run_is_two_runs() {
        let rows = [
            "AAAACAAAA",
            "GACGCCGGG",
            "ACGCCGCAT",
            "ATAAAGGTA",
            "CGCCCGACC",
            "ATTATACAG",
            "GTAGCCATC",
            "TGCGTCTGA",
            "CATCGCATT",
        ];
        assert_eq!(all_runs(&rows), 2);
        assert!(SequenceScanner::default().is_mutant(&grid(&rows)));
    }

    #[test]
    fn test_off_center_diagonal() {
        // ↘ diagonal starting at (0, 2) and ↙ diagonal starting at (2, 5).
        let rows = ["CTTCCC", "TCTTTG", "TTTCTG", "TTAAGT", "GACGTC", "GAGACG"];
        let g = grid(&rows);
        assert_eq!(all_runs(&rows), 2);
        assert!(SequenceScanner::default().is_mutant(&g));
    }

    #[test]
    fn test_one_run_per_direction_mix() {
        // One vertical run (col 0) and one on the main anti-diagonal.
        let rows = ["GAGGGA", "GGCTCC", "GCGCGG", "GGCTCC", "GCCCAA", "AGATTA"];
        assert_eq!(all_runs(&rows), 2);
        assert!(SequenceScanner::default().is_mutant(&grid(&rows)));
    }

    #[test]
    fn test_early_termination_respects_limit() {
        let rows = ["AAAAAA", "CCCCCC", "GGGGGG", "TTTTTT", "AAAAAA", "CCCCCC"];
        let scanner = SequenceScanner::default();
        assert_eq!(scanner.count_runs(&grid(&rows), 2), 2);
        assert!(scanner.count_runs(&grid(&rows), usize::MAX) > 2);
    }

    #[test]
    fn test_uniform_grid() {
        let rows = ["AAAA", "AAAA", "AAAA", "AAAA"];
        // 4 rows + 4 columns + 1 diagonal + 1 anti-diagonal
        assert_eq!(all_runs(&rows), 10);
    }

    /// Maximal runs of length >= 4, counted cell by cell in each direction.
    fn brute_force_runs(rows: &[String]) -> usize {
        let n = rows.len() as isize;
        let at = |r: isize, c: isize| -> Option<u8> {
            if r < 0 || c < 0 || r >= n || c >= n {
                None
            } else {
                Some(rows[r as usize].as_bytes()[c as usize])
            }
        };
        let mut total = 0;
        for (dr, dc) in [(0, 1), (1, 0), (1, 1), (1, -1)] {
            for r in 0..n {
                for c in 0..n {
                    let base = at(r, c);
                    if at(r - dr, c - dc) == base {
                        continue; // not the start of a run
                    }
                    let mut len = 1;
                    while at(r + len * dr, c + len * dc) == base {
                        len += 1;
                    }
                    if len >= 4 {
                        total += 1;
                    }
                }
            }
        }
        total
    }

    fn random_rows() -> impl Strategy<Value = Vec<String>> {
        (4usize..=10, any::<bool>()).prop_flat_map(|(n, narrow)| {
            let letters: Vec<char> = if narrow { vec!['A', 'T'] } else { vec!['A', 'C', 'G', 'T'] };
            proptest::collection::vec(proptest::sample::select(letters), n * n).prop_map(
                move |cells| {
                    cells.chunks(n).map(|row| row.iter().collect::<String>()).collect::<Vec<String>>()
                },
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(512))]

        #[test]
        fn scanner_matches_brute_force(rows in random_rows()) {
            let g = Validator::default().validate(&rows).unwrap();
            let scanner = SequenceScanner::default();
            let expected = brute_force_runs(&rows);
            prop_assert_eq!(scanner.count_runs(&g, usize::MAX), expected);
            prop_assert_eq!(scanner.is_mutant(&g), expected >= 2);
        }
    }

    #[test]
    fn test_custom_run_length() {
        let config = DetectorConfig { min_run_length: 3, min_size: 3, ..DetectorConfig::default() };
        let g = Validator::new(&config).validate(&["AAA", "CGT", "GGG"]).unwrap();
        assert!(SequenceScanner::new(&config).is_mutant(&g));
        assert!(!SequenceScanner::default().is_mutant(&g));
    }
}
