use criterion::{criterion_group, criterion_main, Criterion};
use mutant_dna::{DetectorConfig, FingerprintStore, SequenceScanner, Validator};

/// Repeating ACGT shifted by two per row: no runs in any direction.
fn human_grid(n: usize) -> Vec<String> {
    let bases = b"ACGT";
    (0..n)
        .map(|r| (0..n).map(|c| bases[(c + 2 * r) % 4] as char).collect())
        .collect()
}

fn bench_scanner(c: &mut Criterion) {
    let validator = Validator::default();
    let scanner = SequenceScanner::default();

    let reference = validator
        .validate(&["ATGCGA", "CAGTGC", "TTATGT", "AGAAGG", "CCCCTA", "TCACTG"])
        .unwrap();
    c.bench_function("scan_6x6_mutant", |b| b.iter(|| scanner.is_mutant(&reference)));

    for n in [16, 128, 512] {
        let grid = validator.validate(&human_grid(n)).unwrap();
        c.bench_function(&format!("scan_{}x{}_human_full", n, n), |b| {
            b.iter(|| scanner.is_mutant(&grid))
        });
    }

    let grid = validator.validate(&human_grid(128)).unwrap();
    c.bench_function("fingerprint_128x128", |b| b.iter(|| grid.fingerprint()));

    let store = FingerprintStore::in_memory(&DetectorConfig::default());
    store.classify_and_record(&reference);
    c.bench_function("classify_duplicate_6x6", |b| {
        b.iter(|| store.classify_and_record(&reference))
    });
}

criterion_group!(benches, bench_scanner);
criterion_main!(benches);
