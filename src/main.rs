//! Golden test-vector generator for fixed-point Gaussian CDF implementations.
//!
//! Usage:
//!   generate [OUTPUT_PATH]
//!
//! Reads SEED, VECTORS_OUT and ORACLE from .env or environment. The positional
//! argument overrides VECTORS_OUT.

use std::time::Instant;

use cdf_vectors::config::{Config, CASES_PER_REGIME};
use cdf_vectors::engine::suite::generate;
use cdf_vectors::output::writer::write_document;

fn fail(stage: &str, e: impl std::fmt::Display) -> ! {
    eprintln!("[MAIN] {} failed: {}", stage, e);
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let mut config = Config::from_env().unwrap_or_else(|e| fail("Config", e));
    match std::env::args().nth(1).as_deref() {
        Some("--help") | Some("-h") => {
            eprintln!("Usage: generate [OUTPUT_PATH]\n\nEnv: SEED=<u64|random>  VECTORS_OUT=<path>  ORACLE=<statrs|legacy-erfc>");
            return;
        }
        Some(path) => config.output_path = path.to_string(),
        None => {}
    }

    eprintln!("╔══════════════════════════════════════════════════╗");
    eprintln!("║  Gaussian CDF WAD Test Vectors");
    eprintln!("║  Started: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    eprintln!("║  Seed: {} | Oracle: {}", config.seed_label(), config.oracle.label());
    eprintln!("║  Cases/regime: {} | Out: {}", CASES_PER_REGIME, config.output_path);
    eprintln!("╚══════════════════════════════════════════════════╝");

    let t0 = Instant::now();
    let doc = generate(&config).unwrap_or_else(|e| fail("Generation", e));
    write_document(&doc, &config.output_path)
        .await
        .unwrap_or_else(|e| fail("Write", e));

    eprintln!(
        "[MAIN] Test cases saved to {} ({:.0}ms)",
        config.output_path,
        t0.elapsed().as_secs_f64() * 1000.0
    );
}
