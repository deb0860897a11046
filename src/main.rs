// src/main.rs

use env_logger::Env;
use num::BigInt;
use qsieve::config::QsieveConfig;
use qsieve::orchestrator::Orchestrator;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

fn main() -> ExitCode {
    let config = QsieveConfig::load().unwrap_or_else(|e| {
        eprintln!("warning: failed to load configuration, using defaults: {}", e);
        QsieveConfig::default()
    });

    let env = Env::default().default_filter_or(config.log_level.clone());
    env_logger::Builder::from_env(env).init();

    let mut args = std::env::args().skip(1);
    let n_arg = match args.next() {
        Some(a) => a,
        None => {
            eprintln!("usage: qsieve <N> [--shard-dir <path>]");
            return ExitCode::FAILURE;
        }
    };

    let n = match BigInt::from_str(&n_arg) {
        Ok(n) => n,
        Err(_) => {
            eprintln!("invalid N: {:?}", n_arg);
            return ExitCode::FAILURE;
        }
    };

    // `--shard-dir <path>` selects the file-based run mode (§6 "Shard file
    // format"): shards are written to disk and read back before sieving,
    // instead of staying in memory between InputBuilder and the workers.
    let mut shard_dir: Option<PathBuf> = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--shard-dir" => match args.next() {
                Some(path) => shard_dir = Some(PathBuf::from(path)),
                None => {
                    eprintln!("--shard-dir requires a path argument");
                    return ExitCode::FAILURE;
                }
            },
            other => {
                eprintln!("unrecognized argument: {:?}", other);
                return ExitCode::FAILURE;
            }
        }
    }

    let orchestrator = Orchestrator::new(config.shard_length, config.mask_cap);
    if orchestrator.cancellation.install_ctrlc_handler().is_err() {
        log::warn!("failed to install Ctrl+C handler; cancellation unavailable");
    }

    let result = orchestrator.run_with_shard_dir(&n, config.threads, shard_dir.as_deref());

    match result {
        Ok((f1, f2)) => {
            let mut stdout = std::io::stdout();
            let wrote = writeln!(stdout, "Factor1\t{}", f1).and_then(|_| writeln!(stdout, "Factor2\t{}", f2));
            match wrote {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    orchestrator.counters.bump_unable_to_output();
                    orchestrator.counters.log_summary();
                    eprintln!("failed to write factor output: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("factorization failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
