//! Arcade Headless Balance Simulator
//!
//! Plays seeded runs of a game with a scripted autopilot and prints how long
//! they last and how far the pace escalates. Uses the same tick function as
//! the interactive game.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --game NAME        race | snake (default: race)
//!   --runs N           Number of runs with incrementing seeds (default: 100)
//!   --seed N           RNG seed (default: random)
//!   --difficulty NAME  novice | apprentice | journeyman | master, or 0-3
//!   --max-ticks N      Tick limit per run (default: 20000)
//!   --verbose          Per-run lines; repeat for per-event logging
//!   --quiet            Only the final summary line

use arcade::games::{GameKind, RaceDifficulty};
use arcade::simulator::{run_simulation, SimConfig};
use std::process::ExitCode;

enum Command {
    Run(SimConfig),
    Help,
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{flag} requires a value"))?;
    value
        .parse()
        .map_err(|_| format!("{flag} requires a number, got '{value}'"))
}

fn parse_difficulty(value: &str) -> Option<usize> {
    if let Ok(index) = value.parse::<usize>() {
        return (index < RaceDifficulty::ALL.len()).then_some(index);
    }
    RaceDifficulty::ALL
        .iter()
        .position(|d| d.difficulty_str() == value.to_ascii_lowercase())
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut config = SimConfig::default();
    let mut quiet = false;
    let mut verbose = 0u8;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--game" => {
                i += 1;
                let name = args.get(i).ok_or("--game requires a value")?;
                config.game =
                    GameKind::parse(name).ok_or_else(|| format!("Unknown game: {name}"))?;
            }
            "--runs" => {
                i += 1;
                config.num_runs = parse_number("--runs", args.get(i))?;
            }
            "--seed" => {
                i += 1;
                config.seed = Some(parse_number("--seed", args.get(i))?);
            }
            "--difficulty" => {
                i += 1;
                let name = args.get(i).ok_or("--difficulty requires a value")?;
                config.difficulty =
                    parse_difficulty(name).ok_or_else(|| format!("Unknown difficulty: {name}"))?;
            }
            "--max-ticks" => {
                i += 1;
                config.max_ticks_per_run = parse_number("--max-ticks", args.get(i))?;
            }
            "--verbose" | "-v" => verbose += 1,
            "--quiet" | "-q" => quiet = true,
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("Unknown argument: {other}")),
        }
        i += 1;
    }

    config.verbosity = if quiet { 0 } else { 1 + verbose.min(2) };
    Ok(Command::Run(config))
}

fn print_usage() {
    eprintln!(
        "Arcade Headless Balance Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --game NAME        race | snake (default: race)\n\
         \x20 --runs N           Number of runs with incrementing seeds (default: 100)\n\
         \x20 --seed N           RNG seed (default: random)\n\
         \x20 --difficulty NAME  novice | apprentice | journeyman | master, or 0-3\n\
         \x20 --max-ticks N      Tick limit per run (default: 20000)\n\
         \x20 --verbose, -v      Per-run lines; repeat for per-event logging\n\
         \x20 --quiet, -q        Only the final summary line\n\
         \x20 --help, -h         Show this help"
    );
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let config = match parse_args(&args) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    if config.verbosity >= 1 {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              ARCADE BALANCE SIMULATOR                         ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Game:           {}", config.game.name());
        println!("  Difficulty:     {}", config.difficulty_name());
        println!("  Runs:           {}", config.num_runs);
        println!("  Max Ticks:      {}", config.max_ticks_per_run);
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
    }

    let report = run_simulation(&config);

    if config.verbosity == 0 {
        println!("{}", report.summary_line());
    } else {
        println!();
        print!("{}", report.to_text());
    }
    ExitCode::SUCCESS
}
