//! Mutant CLI — classify DNA grids and inspect the record store
//!
//! Commands:
//!   mutant check   — classify a JSON payload from a file or stdin
//!   mutant stats   — show mutant/human counts and ratio
//!   mutant list    — list stored records
//!   mutant random  — classify randomly generated grids
//!   mutant demo    — run the reference grids through the pipeline

use mutant_dna::api::{RequestHandler, Response};
use mutant_dna::config::{ServiceConfig, STORE_ENV};
use mutant_dna::dna::Nucleotide;
use mutant_dna::FingerprintStore;
use rand::Rng;
use std::env;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

const DEMO_GRIDS: [[&str; 6]; 5] = [
    ["ATGCGA", "CAGTGC", "TTATGT", "AGAAGG", "CCCCTA", "TCACTG"],
    ["AAAATG", "TGCAGT", "GCTTTT", "CGATCT", "AGTACG", "TGACTA"],
    ["ATGCGA", "CAGTGC", "TTATTT", "AGACGG", "GCGTCA", "TCACTG"],
    ["ATGCGA", "CAGTAC", "TTATCG", "AGACGG", "GCGTCA", "TCACTG"],
    ["AAAATG", "TGCAGT", "GCTTCT", "CGATCT", "AGTACG", "TGACTA"],
];

fn print_usage() {
    println!(
        r#"
╔══════════════════════════════════════════════════════════════╗
║        Mutant DNA — run detection over nucleotide grids      ║
╚══════════════════════════════════════════════════════════════╝

Usage: mutant [--config <file>] <command> [options]

Commands:
  check   <file|->          Classify a {{"dna": [...]}} payload
  stats                     Show mutant/human counts and ratio
  list                      List stored records
  random  <n> [count]       Classify `count` random n×n grids (default 10)
  demo                      Run the reference grids

Environment:
  {STORE_ENV}              Store snapshot path (default mutant-store.json)
  RUST_LOG                  Log filter (default info)

Examples:
  mutant check payload.json
  echo '{{"dna":["AAAA","CCCC","GTGT","TGTG"]}}' | mutant check -
  mutant random 8 100
  mutant stats
"#
    );
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let config_path = match take_config_flag(&mut args) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };
    if args.is_empty() {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let config = match ServiceConfig::load(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("  {}", e);
            return ExitCode::from(2);
        }
    };

    let result = match args[0].as_str() {
        "check" => cmd_check(&config, &args[1..]),
        "stats" => cmd_stats(&config),
        "list" => cmd_list(&config),
        "random" => cmd_random(&config, &args[1..]),
        "demo" => cmd_demo(&config),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => Err(format!("Unknown command: {}", other)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("  {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Strip `--config <file>` from the argument list
fn take_config_flag(args: &mut Vec<String>) -> Result<Option<PathBuf>, String> {
    let Some(pos) = args.iter().position(|a| a == "--config") else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        return Err("--config needs a file argument".into());
    }
    let path = PathBuf::from(args.remove(pos + 1));
    args.remove(pos);
    Ok(Some(path))
}

fn open_handler(config: &ServiceConfig) -> RequestHandler {
    let store = FingerprintStore::open(&config.store_path, &config.detector);
    println!("  Store: {} ({} records)", config.store_path.display(), store.len());
    RequestHandler::new(Arc::new(store), &config.detector)
}

fn save(handler: &RequestHandler) -> Result<(), String> {
    handler.store().save().map_err(|e| format!("Failed to save: {}", e))
}

fn print_response(resp: &Response) {
    println!("  {} {}", resp.status, resp.body);
}

fn cmd_check(config: &ServiceConfig, args: &[String]) -> Result<(), String> {
    let source = args.first().ok_or("Usage: mutant check <file|->")?;
    let body = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Cannot read stdin: {}", e))?;
        buf
    } else {
        std::fs::read_to_string(source).map_err(|e| format!("Cannot read {}: {}", source, e))?
    };

    let handler = open_handler(config);
    let resp = handler.handle_mutant(&body);
    print_response(&resp);
    save(&handler)
}

fn cmd_stats(config: &ServiceConfig) -> Result<(), String> {
    let handler = open_handler(config);
    print_response(&handler.handle_stats());
    Ok(())
}

fn cmd_list(config: &ServiceConfig) -> Result<(), String> {
    let handler = open_handler(config);
    let records = handler.store().records();
    if records.is_empty() {
        println!("\n  No records. Use 'mutant check' or 'mutant demo' to get started.");
        return Ok(());
    }
    println!("\n  Records ({}):", records.len());
    println!("  {}", "-".repeat(72));
    for record in &records {
        println!("  {}", record.summary());
    }
    Ok(())
}

fn random_grid(rng: &mut impl Rng, n: usize) -> Vec<String> {
    let bases = Nucleotide::VALID_BYTES;
    (0..n)
        .map(|_| (0..n).map(|_| bases[rng.gen_range(0..bases.len())] as char).collect())
        .collect()
}

fn cmd_random(config: &ServiceConfig, args: &[String]) -> Result<(), String> {
    let n: usize = args
        .first()
        .ok_or("Usage: mutant random <n> [count]")?
        .parse()
        .map_err(|_| "n must be a number".to_string())?;
    let count: usize = match args.get(1) {
        Some(s) => s.parse().map_err(|_| "count must be a number".to_string())?,
        None => 10,
    };

    let handler = open_handler(config);
    let mut rng = rand::thread_rng();
    let (mut mutants, mut humans) = (0usize, 0usize);
    for _ in 0..count {
        let record = handler.check(&random_grid(&mut rng, n)).map_err(|e| e.to_string())?;
        if record.is_mutant { mutants += 1 } else { humans += 1 }
    }
    println!("\n  Classified {} random {}x{} grids: {} mutant, {} human", count, n, n, mutants, humans);
    print_response(&handler.handle_stats());
    save(&handler)
}

fn cmd_demo(config: &ServiceConfig) -> Result<(), String> {
    let handler = open_handler(config);
    println!("\n  === Classifying reference grids ===");
    for rows in DEMO_GRIDS.iter().chain(DEMO_GRIDS.iter().take(1)) {
        let record = handler.check(rows).map_err(|e| e.to_string())?;
        println!("  {}", record.summary());
    }

    println!("\n  === Rejected input ===");
    for body in [
        r#"{"dna": ["ATXCGA","CAGTGC","TTATTT","AGACGG","GCGTCA","TCACTG"]}"#,
        r#"{"dna": ["ATGCGA","CAGTGC","TTAT","AGACGG","GCGTCA","TCACTG"]}"#,
        r#"{"dna": ["ATG","CAG","TTA"]}"#,
        r#"{ this is not valid json }"#,
    ] {
        print_response(&handler.handle_mutant(body));
    }

    println!("\n  === Stats ===");
    print_response(&handler.handle_stats());
    save(&handler)
}
