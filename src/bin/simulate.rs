//! Summon rate simulator CLI.
//!
//! Draws a pool many times and compares observed rarity frequencies with the
//! configured rates.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                         # 100k draws from basic
//!   cargo run --bin simulate -- -p premium -n 1000000
//!   cargo run --bin simulate -- --seed 42 --json     # Reproducible, JSON to stdout
//!   cargo run --bin simulate -- --quick              # 1k draws

use idlegacha::items::pools::get_all_pools;
use idlegacha::simulator::{run_simulation, SimConfig};
use std::env;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Fallback warnings fire per draw; keep them out of the default output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,idlegacha::items::drops=error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let Some((config, json)) = parse_args(&args) else {
        return ExitCode::SUCCESS;
    };

    if !json && config.verbosity > 0 {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              IDLEGACHA SUMMON SIMULATOR                       ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Pool:           {}", config.pool_id);
        println!("  Draws:          {}", config.num_draws);
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let Some(report) = run_simulation(&config) else {
        let known: Vec<String> = get_all_pools().into_iter().map(|p| p.id).collect();
        eprintln!(
            "Unknown pool '{}'. Known pools: {}",
            config.pool_id,
            known.join(", ")
        );
        return ExitCode::FAILURE;
    };

    if json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }
    ExitCode::SUCCESS
}

/// None when help was printed.
fn parse_args(args: &[String]) -> Option<(SimConfig, bool)> {
    let mut config = SimConfig::default();
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-p" | "--pool" => {
                if i + 1 < args.len() {
                    config.pool_id = args[i + 1].clone();
                    i += 1;
                }
            }
            "-n" | "--draws" => {
                if i + 1 < args.len() {
                    config.num_draws = args[i + 1].parse().unwrap_or(100_000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--json" => {
                json = true;
            }
            "--quick" => {
                config = SimConfig {
                    verbosity: config.verbosity,
                    ..SimConfig::quick(&config.pool_id)
                };
            }
            "--check" => {
                let seed = args.get(i + 1).and_then(|s| s.parse::<u64>().ok());
                if seed.is_some() {
                    i += 1;
                }
                config = SimConfig {
                    verbosity: config.verbosity,
                    ..SimConfig::distribution_check(&config.pool_id, seed.unwrap_or(42))
                };
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "-h" | "--help" => {
                print_help();
                return None;
            }
            other => {
                eprintln!("Ignoring unknown option: {}", other);
            }
        }
        i += 1;
    }

    Some((config, json))
}

fn print_help() {
    println!("Idlegacha Summon Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -p, --pool <ID>     Pool to draw from (default: basic)");
    println!("    -n, --draws <N>     Number of draws (default: 100,000)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    --quick             Small run (1,000 draws)");
    println!("    --check [SEED]      Seeded 1,000,000-draw rate check (default seed: 42)");
    println!("    --json              Print the report as JSON");
    println!("    -v, --verbose       Print progress while drawing");
    println!("    -q, --quiet         Skip the banner");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                          # Default run");
    println!("    cargo run --bin simulate -- -p premium -n 1000000 # Big premium run");
    println!("    cargo run --bin simulate -- --seed 42             # Reproducible");
    println!("    cargo run --bin simulate -- -p premium --check    # Rate check");
}
