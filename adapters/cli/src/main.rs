#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for inspecting board layouts.

mod commands;
mod layout;
mod layout_transfer;

use std::{path::PathBuf, process::ExitCode};

use board_topology_core::GridCoord;
use clap::{Parser, Subcommand};

use crate::commands::{parse_coord, OutputFormat};

/// Analyse, number and query authored board layouts.
#[derive(Parser, Debug)]
#[command(name = "board-topology")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Default log filter, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run every validation rule and print the report
    Validate {
        /// Layout file (JSON or transfer string)
        layout: PathBuf,

        /// JSON file overriding the default validation thresholds
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Assign sequential ids from the canonical start
    Number {
        /// Layout file (JSON or transfer string)
        layout: PathBuf,

        /// Reject branching layouts before numbering
        #[arg(long)]
        linear: bool,

        /// Write the numbered layout to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Find the shortest walkable path between two tiles
    Path {
        /// Layout file (JSON or transfer string)
        layout: PathBuf,

        /// Start tile as x,z
        #[arg(long, value_parser = parse_coord, allow_hyphen_values = true)]
        from: GridCoord,

        /// Goal tile as x,z
        #[arg(long, value_parser = parse_coord, allow_hyphen_values = true)]
        to: GridCoord,

        /// Maximum number of nodes the search may expand
        #[arg(short, long)]
        budget: Option<usize>,
    },

    /// List tiles reachable within a number of steps
    Reach {
        /// Layout file (JSON or transfer string)
        layout: PathBuf,

        /// Start tile as x,z
        #[arg(long, value_parser = parse_coord, allow_hyphen_values = true)]
        from: GridCoord,

        /// Maximum number of steps
        #[arg(short, long)]
        steps: u32,
    },

    /// Convert a layout into a single-line transfer string
    Encode {
        /// Layout file (JSON or transfer string)
        layout: PathBuf,
    },

    /// Print a layout as JSON
    Decode {
        /// Layout file (JSON or transfer string)
        layout: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level.as_str()),
    )
    .try_init();

    let result = match args.command {
        Commands::Validate {
            layout,
            rules,
            format,
        } => commands::validate(&layout, rules.as_deref(), format),
        Commands::Number {
            layout,
            linear,
            output,
        } => commands::number(&layout, linear, output.as_deref()),
        Commands::Path {
            layout,
            from,
            to,
            budget,
        } => commands::path(&layout, from, to, budget),
        Commands::Reach {
            layout,
            from,
            steps,
        } => commands::reach(&layout, from, steps),
        Commands::Encode { layout } => commands::encode(&layout),
        Commands::Decode { layout } => commands::decode(&layout),
    };

    match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
