/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Playground pattern interpreter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 *
 * 1. OPEN SOURCE: You may use this file under the terms of the GNU Affero
 * General Public License v3.0. If you link to this code, your ENTIRE
 * application must be open-sourced under AGPLv3.
 *
 * 2. COMMERCIAL: For proprietary use, you must obtain a Commercial License
 * from Sovereign Systems.
 *
 * NO IMPLIED LICENSE to rights of Mohamad Al-Zawahreh or Sovereign Systems.
 */

use playground_core::config::Config;
use playground_core::lesson::run_lesson;
use playground_core::progress::{FileStore, ProgressTracker, Reward};
use playground_core::replay::{Replay, ReplayTiming};
use playground_core::result::LineResult;
use playground_core::scenario::ScenarioId;
use playground_core::session::Session;
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;
use std::thread;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "playground")]
#[command(about = "Interpret playground code against one scenario")]
struct Args {
    /// Scenario id; unknown ids fall back to programming
    scenario: String,

    /// Program file, or `-` for stdin
    #[arg(required_unless_present = "lesson", conflicts_with = "lesson")]
    file: Option<String>,

    /// Run the scenario's lesson with the blocks in this order, e.g. `0,1,2,3`
    #[arg(long, value_delimiter = ',', num_args = 1)]
    lesson: Option<Vec<usize>>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Replay the recorded steps with their delays before printing
    #[arg(long)]
    replay: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_source(arg: &str) -> io::Result<String> {
    if arg == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(arg)
    }
}

fn print_results(results: &[LineResult], json: bool) {
    if json {
        match serde_json::to_string_pretty(results) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Serialization Error: {}", e),
        }
    } else {
        for result in results {
            println!("{}", result.render());
        }
    }
}

fn replay(results: &[LineResult], speed: f64) {
    for frame in Replay::new(results, ReplayTiming::scaled(speed)) {
        thread::sleep(frame.delay);
        match frame.step {
            None => println!("▶ {}", frame.source_line),
            Some(step) => println!("    {:?}", step),
        }
    }
}

fn record_progress(config: &Config, scenario: ScenarioId) {
    let Some(path) = &config.progress_path else {
        return;
    };
    let mut tracker = match ProgressTracker::load(FileStore::new(path)) {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, path = %path.display(), "could not load progress");
            return;
        }
    };
    match tracker.complete_current(scenario) {
        Ok(Some(Reward::Granted {
            xp_gained, level, ..
        })) => println!("+{} XP (level {})", xp_gained, level),
        Ok(Some(Reward::AlreadyCompleted)) => println!("lesson already completed"),
        Ok(None) => {}
        Err(e) => warn!(error = %e, "could not save progress"),
    }
}

fn main() -> ExitCode {
    init_logging();

    let args = Args::parse();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let scenario = ScenarioId::resolve(&args.scenario);
    let mut session = Session::open(scenario, config.clone());

    let results = match (&args.lesson, &args.file) {
        (Some(order), _) => match run_lesson(&mut session, order) {
            Ok(results) => {
                record_progress(&config, scenario);
                results
            }
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        (None, Some(file)) => match read_source(file) {
            Ok(code) => session.run(&code),
            Err(e) => {
                eprintln!("Failed to read {}: {}", file, e);
                return ExitCode::FAILURE;
            }
        },
        // clap requires one of the two
        (None, None) => return ExitCode::FAILURE,
    };

    if args.replay {
        replay(&results, config.replay_speed);
    }
    print_results(&results, args.json);

    if results.iter().all(LineResult::is_success) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_and_flags() {
        let args = Args::try_parse_from(["playground", "math", "prog.txt", "--json"]).unwrap();
        assert_eq!(args.scenario, "math");
        assert_eq!(args.file.as_deref(), Some("prog.txt"));
        assert!(args.json);
        assert!(!args.replay);
        assert_eq!(args.lesson, None);
    }

    #[test]
    fn test_lesson_order_after_other_flags() {
        let args = Args::try_parse_from(["playground", "game", "--json", "--lesson", "0,1,2,3"])
            .unwrap();
        assert_eq!(args.lesson, Some(vec![0, 1, 2, 3]));
        assert_eq!(args.file, None);
        assert!(args.json);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["playground", "math", "prog.txt", "--jsno"]).is_err());
    }

    #[test]
    fn test_file_or_lesson_required() {
        assert!(Args::try_parse_from(["playground", "math"]).is_err());
        assert!(
            Args::try_parse_from(["playground", "math", "prog.txt", "--lesson", "0,1"]).is_err()
        );
        assert!(Args::try_parse_from(["playground", "math", "--lesson", "0,x"]).is_err());
    }
}
