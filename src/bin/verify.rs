//! Offline checker for a generated vectors file.
//!
//! Usage:
//!   verify [OPTIONS] [PATH]
//!     PATH                 Vectors file (default: $VECTORS_OUT or "input/tests.json")
//!     --max-report <n>     Violations to print (default: 10)
//!     --help, -h           Show this help

use cdf_vectors::config::Config;
use cdf_vectors::engine::verify::{load_document, verify_document};

// ─── CLI Args ───────────────────────────────────────────────────────

struct Args {
    path: String,
    max_report: usize,
}

impl Args {
    fn from_cli(default_path: String) -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut a = Args {
            path: default_path,
            max_report: 10,
        };
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--max-report" => {
                    i += 1;
                    a.max_report = match args.get(i).and_then(|s| s.parse().ok()) {
                        Some(n) => n,
                        None => {
                            eprintln!("--max-report needs a number");
                            print_usage();
                            std::process::exit(1);
                        }
                    };
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other if other.starts_with('-') => {
                    eprintln!("Unknown arg: {}", other);
                    print_usage();
                    std::process::exit(1);
                }
                path => a.path = path.to_string(),
            }
            i += 1;
        }
        a
    }
}

fn print_usage() {
    eprintln!(
        "Usage: verify [OPTIONS] [PATH]\n\
         \n\
         Options:\n\
         \x20 --max-report <n>   Violations to print (default: 10)\n\
         \x20 --help, -h         Show this help"
    );
}

fn main() {
    let _ = dotenvy::dotenv();
    let default_path = match Config::from_env() {
        Ok(c) => c.output_path,
        Err(e) => {
            eprintln!("[VERIFY] {}", e);
            std::process::exit(1);
        }
    };
    let args = Args::from_cli(default_path);

    let doc = match load_document(&args.path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("[VERIFY] {}", e);
            std::process::exit(1);
        }
    };

    let report = verify_document(&doc, args.max_report);
    for v in &report.violations {
        eprintln!("[VERIFY] {}", v);
    }
    if report.violation_count > report.violations.len() {
        eprintln!(
            "[VERIFY] ... and {} more",
            report.violation_count - report.violations.len()
        );
    }
    eprintln!(
        "[VERIFY] {}: {} cases checked, {} violation(s)",
        args.path, report.cases_checked, report.violation_count
    );

    if let Err(e) = report.into_result() {
        eprintln!("[VERIFY] {}", e);
        std::process::exit(1);
    }
}
