//! Implementations of the command-line subcommands.

use std::{fs, path::Path, process::ExitCode};

use anyhow::{Context, Result};
use board_topology_board::{apply, query, Board};
use board_topology_connectivity::ConnectivityAnalyzer;
use board_topology_core::{GridCoord, Structure};
use board_topology_numbering::SequentialIdAssigner;
use board_topology_pathfinding::{PathFinder, PathResult};
use board_topology_validation::{ValidationEngine, ValidationReport, ValidationRules};
use clap::ValueEnum;

use crate::layout::BoardLayout;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Parses a coordinate written as `x,z`.
pub(crate) fn parse_coord(value: &str) -> Result<GridCoord, String> {
    let (x, z) = value
        .split_once(',')
        .ok_or_else(|| format!("expected x,z but found '{value}'"))?;
    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|error| format!("invalid x in '{value}': {error}"))?;
    let z = z
        .trim()
        .parse::<i32>()
        .map_err(|error| format!("invalid z in '{value}': {error}"))?;
    Ok(GridCoord::new(x, z))
}

fn load_board(path: &Path) -> Result<Board> {
    BoardLayout::load(path)?
        .to_board()
        .with_context(|| format!("layout in {} does not form a board", path.display()))
}

fn load_rules(path: Option<&Path>) -> Result<ValidationRules> {
    let Some(path) = path else {
        return Ok(ValidationRules::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read rules file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid validation rules in {}", path.display()))
}

fn exit_status(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Validates a layout and prints every issue.
pub(crate) fn validate(
    layout: &Path,
    rules: Option<&Path>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let board = load_board(layout)?;
    let engine = ValidationEngine::new(load_rules(rules)?);
    let report = engine.validate(&board);

    match format {
        OutputFormat::Text => print_report(&report, engine.is_board_complete(&board)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("could not serialise report")?;
            println!("{json}");
        }
    }

    Ok(exit_status(report.is_valid()))
}

fn print_report(report: &ValidationReport, complete: bool) {
    for issue in report.issues() {
        println!("{issue}");
    }

    let stats = report.statistics();
    println!(
        "{} path tiles, {} structures, {} regions, {} dead ends",
        stats.path_tile_count, stats.structure_count, stats.region_count, stats.dead_end_count
    );
    for (kind, count) in &stats.kind_distribution {
        println!("  {:<9}{count}", kind.name());
    }
    for (group, count) in &stats.group_distribution {
        println!("  {group}: {count}");
    }

    let verdict = if report.is_valid() { "valid" } else { "invalid" };
    let completeness = if complete { "complete" } else { "incomplete" };
    println!(
        "board is {verdict} and {completeness} ({} errors, {} warnings)",
        report.errors().count(),
        report.warnings().count()
    );
}

/// Assigns sequential ids and prints them in id order.
pub(crate) fn number(layout: &Path, linear: bool, output: Option<&Path>) -> Result<ExitCode> {
    let mut board = load_board(layout)?;
    let command = SequentialIdAssigner::new()
        .require_linear_topology(linear)
        .assign_command(&board)
        .context("could not number the board")?;

    let mut events = Vec::new();
    apply(&mut board, command, &mut events);
    for event in &events {
        log::debug!("{event:?}");
    }

    let mut numbered: Vec<(u16, GridCoord)> = query::grid(&board)
        .iter()
        .filter_map(|tile| {
            tile.sequential_id()
                .position()
                .map(|position| (position, tile.coord()))
        })
        .collect();
    numbered.sort_unstable();
    for (position, coord) in numbered {
        println!("{},{} -> {position}", coord.x(), coord.z());
    }

    let mut structures: Vec<&Structure> = query::structures(&board).collect();
    structures.sort_by_key(|structure| structure.sequential_id());
    for structure in structures {
        println!(
            "structure {} at {} -> {}",
            structure.id().get(),
            structure.footprint().origin(),
            structure.sequential_id()
        );
    }

    let numbered_tiles = query::grid(&board)
        .iter()
        .filter(|tile| tile.sequential_id().is_valid())
        .count();
    let unreached = query::path_tile_count(&board).saturating_sub(numbered_tiles);
    if unreached > 0 {
        log::warn!("{unreached} path tiles are unreachable from the start and keep no id");
    }

    if let Some(output) = output {
        BoardLayout::from_board(&board).save(output)?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Prints the shortest path between two tiles.
pub(crate) fn path(
    layout: &Path,
    from: GridCoord,
    to: GridCoord,
    budget: Option<usize>,
) -> Result<ExitCode> {
    let board = load_board(layout)?;
    let mut finder = PathFinder::new(query::grid(&board));
    if let Some(budget) = budget {
        finder = finder.with_expansion_budget(budget);
    }

    match finder.find_path(from, to) {
        PathResult::Found(path) => {
            let route: Vec<String> = path.iter().map(ToString::to_string).collect();
            println!("{}", route.join(" -> "));
            println!("{} steps", path.len().saturating_sub(1));
            Ok(ExitCode::SUCCESS)
        }
        PathResult::NoPath => {
            let analyzer = ConnectivityAnalyzer::path_cells(query::grid(&board));
            if analyzer.same_region(from, to) {
                println!("no path");
            } else {
                println!("no path: {from} and {to} are not in the same region");
            }
            Ok(ExitCode::FAILURE)
        }
        PathResult::BudgetExhausted { expanded } => {
            println!("search abandoned after {expanded} expansions");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Prints every tile reachable within the step limit.
pub(crate) fn reach(layout: &Path, from: GridCoord, steps: u32) -> Result<ExitCode> {
    let board = load_board(layout)?;
    let reachable = PathFinder::new(query::grid(&board)).get_reachable(from, steps);

    for coord in &reachable {
        println!("{},{}", coord.x(), coord.z());
    }
    log::info!("{} tiles reachable from {from} within {steps} steps", reachable.len());

    Ok(ExitCode::SUCCESS)
}

/// Prints the transfer string for a layout.
pub(crate) fn encode(layout: &Path) -> Result<ExitCode> {
    let layout = BoardLayout::load(layout)?;
    println!("{}", layout.encode().context("could not encode layout")?);
    Ok(ExitCode::SUCCESS)
}

/// Prints a layout as pretty JSON, whichever form it was stored in.
pub(crate) fn decode(layout: &Path) -> Result<ExitCode> {
    let layout = BoardLayout::load(layout)?;
    let json = serde_json::to_string_pretty(&layout).context("could not serialise layout")?;
    println!("{json}");
    Ok(ExitCode::SUCCESS)
}
