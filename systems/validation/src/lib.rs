#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Rule-based structural and balance checks for authored boards.
//!
//! Every rule runs on every pass; a failing rule appends to the report and
//! the engine moves on. Gating play on the outcome is left to the caller.

mod report;
mod rules;

use std::collections::{BTreeMap, BTreeSet};

use board_topology_board::{query, Board};
use board_topology_connectivity::ConnectivityAnalyzer;
use board_topology_core::{GridCoord, PathKind, PropertyGroup, TileKind};
use log::debug;

pub use report::{
    BoardStatistics, Category, IssueKind, Severity, ValidationIssue, ValidationReport,
};
pub use rules::ValidationRules;

/// Runs the configured rule set against boards.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValidationEngine {
    rules: ValidationRules,
}

impl ValidationEngine {
    /// Creates an engine that applies the provided thresholds.
    #[must_use]
    pub const fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Thresholds applied by the engine.
    #[must_use]
    pub const fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Validates the board, collecting every violation into one report.
    #[must_use]
    pub fn validate(&self, board: &Board) -> ValidationReport {
        let survey = Survey::collect(board);
        let mut issues = Vec::new();

        self.check_tile_count(&survey, &mut issues);
        self.check_special_tiles(&survey, &mut issues);
        self.check_properties(&survey, &mut issues);
        self.check_connectivity(&survey, &mut issues);
        self.check_dead_ends(&survey, &mut issues);
        self.check_group_balance(&survey, &mut issues);

        let blocking = issues
            .iter()
            .filter(|issue| issue.severity().is_blocking())
            .count();
        debug!(
            "validation found {} issues ({blocking} blocking) across {} path tiles",
            issues.len(),
            survey.statistics.path_tile_count
        );

        ValidationReport::new(issues, survey.statistics)
    }

    /// Quick completeness check used before a board may be saved as playable.
    ///
    /// Requires a start position, at least the minimum number of path tiles
    /// and a single path region.
    #[must_use]
    pub fn is_board_complete(&self, board: &Board) -> bool {
        let grid = query::grid(board);
        has_start_position(board)
            && query::path_tile_count(board) >= self.rules.min_tiles
            && ConnectivityAnalyzer::path_cells(grid).is_connected()
    }

    fn check_tile_count(&self, survey: &Survey, issues: &mut Vec<ValidationIssue>) {
        let count = survey.statistics.path_tile_count;
        if count < self.rules.min_tiles {
            issues.push(ValidationIssue::new(
                IssueKind::InsufficientTiles {
                    count,
                    min: self.rules.min_tiles,
                },
                None,
            ));
        }
        if count > self.rules.max_tiles {
            issues.push(ValidationIssue::new(
                IssueKind::TooManyTiles {
                    count,
                    max: self.rules.max_tiles,
                },
                None,
            ));
        }
    }

    fn check_special_tiles(&self, survey: &Survey, issues: &mut Vec<ValidationIssue>) {
        if self.rules.require_start_tile && !survey.has_start {
            issues.push(ValidationIssue::new(IssueKind::NoStart, None));
        }
        if self.rules.require_hospital && !survey.has_hospital {
            issues.push(ValidationIssue::new(IssueKind::NoHospital, None));
        }
    }

    fn check_properties(&self, survey: &Survey, issues: &mut Vec<ValidationIssue>) {
        let count = survey.statistics.structure_count;
        if count < self.rules.min_properties {
            issues.push(ValidationIssue::new(
                IssueKind::InsufficientProperties {
                    count,
                    min: self.rules.min_properties,
                },
                None,
            ));
        }
    }

    fn check_connectivity(&self, survey: &Survey, issues: &mut Vec<ValidationIssue>) {
        if !self.rules.require_connected || survey.statistics.region_count == 1 {
            return;
        }

        issues.push(ValidationIssue::new(
            IssueKind::NotConnected {
                regions: survey.statistics.region_count,
            },
            survey.second_region_start,
        ));
    }

    fn check_dead_ends(&self, survey: &Survey, issues: &mut Vec<ValidationIssue>) {
        let count = survey.dead_ends.len();
        if count > self.rules.max_dead_ends {
            issues.push(ValidationIssue::new(
                IssueKind::TooManyDeadEnds {
                    count,
                    max: self.rules.max_dead_ends,
                },
                survey.dead_ends.first().copied(),
            ));
        }
    }

    fn check_group_balance(&self, survey: &Survey, issues: &mut Vec<ValidationIssue>) {
        for (&group, &count) in &survey.statistics.group_distribution {
            let position = survey.group_anchors.get(&group).copied();
            if count < self.rules.min_group_size {
                issues.push(ValidationIssue::new(
                    IssueKind::PropertyGroupSmall { group, count },
                    position,
                ));
            } else if count > self.rules.max_group_size {
                issues.push(ValidationIssue::new(
                    IssueKind::PropertyGroupLarge { group, count },
                    position,
                ));
            }
        }

        let groups = survey.statistics.group_distribution.len();
        if groups < self.rules.min_group_variety {
            issues.push(ValidationIssue::new(
                IssueKind::LowPropertyVariety {
                    groups,
                    min: self.rules.min_group_variety,
                },
                None,
            ));
        }
    }
}

/// Start positions accept either a start or a hospital tile.
fn has_start_position(board: &Board) -> bool {
    query::grid(board).iter().any(|tile| {
        matches!(
            tile.kind(),
            TileKind::Path(PathKind::Start | PathKind::Hospital)
        )
    })
}

/// Measurements shared by the rules of one validation pass.
struct Survey {
    statistics: BoardStatistics,
    has_start: bool,
    has_hospital: bool,
    dead_ends: Vec<GridCoord>,
    second_region_start: Option<GridCoord>,
    group_anchors: BTreeMap<PropertyGroup, GridCoord>,
}

impl Survey {
    fn collect(board: &Board) -> Self {
        let grid = query::grid(board);
        let analyzer = ConnectivityAnalyzer::path_cells(grid);
        let regions: Vec<BTreeSet<GridCoord>> = analyzer.find_connected_regions();
        let dead_ends = analyzer.find_dead_ends();

        let mut kind_distribution = BTreeMap::new();
        for kind in grid.iter().filter_map(|tile| tile.kind().path_kind()) {
            *kind_distribution.entry(kind).or_insert(0) += 1;
        }

        let mut group_distribution = BTreeMap::new();
        let mut group_anchors: BTreeMap<PropertyGroup, GridCoord> = BTreeMap::new();
        for structure in query::structures(board) {
            *group_distribution.entry(structure.group()).or_insert(0) += 1;
            let origin = structure.footprint().origin();
            let anchor = group_anchors.entry(structure.group()).or_insert(origin);
            *anchor = (*anchor).min(origin);
        }

        let statistics = BoardStatistics {
            tile_count: grid.len(),
            path_tile_count: query::path_tile_count(board),
            structure_count: query::structure_count(board),
            region_count: regions.len(),
            dead_end_count: dead_ends.len(),
            kind_distribution,
            group_distribution,
        };

        Self {
            has_start: has_start_position(board),
            has_hospital: statistics
                .kind_distribution
                .contains_key(&PathKind::Hospital),
            second_region_start: regions
                .get(1)
                .and_then(|region| region.iter().next().copied()),
            statistics,
            dead_ends,
            group_anchors,
        }
    }
}
