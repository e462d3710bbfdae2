mod benchmark;
mod config;
mod query;
mod runner;
mod storage;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use benchmark::run_benchmarks;
use config::RunConfig;

/// Count queries over Hive-style partitioned text tables
#[derive(Parser, Debug)]
#[command(name = "hiveq")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer every query in a file against a database directory
    Run {
        /// Database root; each subdirectory is a table
        #[arg(long)]
        database: PathBuf,
        /// One query per line
        #[arg(long)]
        queries: PathBuf,
        /// Receives one count per query
        #[arg(long)]
        output: PathBuf,
    },

    /// Run with `database/`, `params.txt` and `out.txt` next to the current directory
    Deployed,

    /// Generate a synthetic database and time each evaluation strategy
    Bench {
        /// Directory the synthetic tables are written to
        #[arg(long)]
        dir: PathBuf,
    },
}

fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run_queries(config: RunConfig) -> Result<(), runner::RunError> {
    init_logging(config.log_level());
    runner::run(&config).map(|_| ())
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run { database, queries, output } => {
            run_queries(RunConfig::local(database, queries, output))
        }
        Command::Deployed => std::env::current_dir()
            .map_err(runner::RunError::from)
            .and_then(|cwd| run_queries(RunConfig::deployed(&cwd))),
        Command::Bench { dir } => {
            init_logging(LevelFilter::Info);
            run_benchmarks(&dir).map_err(runner::RunError::from)
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
