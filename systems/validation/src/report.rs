//! Typed validation issues and the report that aggregates them.

use std::{collections::BTreeMap, fmt};

use board_topology_core::{GridCoord, PathKind, PropertyGroup};
use serde::Serialize;

/// How strongly an issue blocks play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Balance concern that does not prevent play.
    Warning,
    /// Structural problem that prevents play.
    Error,
    /// Structural problem that leaves the board unusable.
    Critical,
}

impl Severity {
    /// Reports whether the severity invalidates the board.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Error | Self::Critical)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Broad family an issue belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Layout problems: counts, markers, connectivity.
    Structural,
    /// Gameplay balance heuristics.
    Balance,
}

/// Specific rule violation together with the values that triggered it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    /// Fewer path tiles than the configured minimum.
    InsufficientTiles {
        /// Path tiles present.
        count: usize,
        /// Configured minimum.
        min: usize,
    },
    /// More path tiles than the configured maximum.
    TooManyTiles {
        /// Path tiles present.
        count: usize,
        /// Configured maximum.
        max: usize,
    },
    /// No start or hospital tile exists.
    NoStart,
    /// No hospital tile exists.
    NoHospital,
    /// Fewer ownable structures than the configured minimum.
    InsufficientProperties {
        /// Structures present.
        count: usize,
        /// Configured minimum.
        min: usize,
    },
    /// Path tiles split into several regions.
    NotConnected {
        /// Number of regions found.
        regions: usize,
    },
    /// More dead ends than tolerated.
    TooManyDeadEnds {
        /// Dead ends present.
        count: usize,
        /// Configured maximum.
        max: usize,
    },
    /// A property group holds too few structures.
    PropertyGroupSmall {
        /// Offending group.
        group: PropertyGroup,
        /// Structures in the group.
        count: usize,
    },
    /// A property group holds too many structures.
    PropertyGroupLarge {
        /// Offending group.
        group: PropertyGroup,
        /// Structures in the group.
        count: usize,
    },
    /// Too few distinct property groups.
    LowPropertyVariety {
        /// Distinct groups present.
        groups: usize,
        /// Configured minimum.
        min: usize,
    },
}

impl IssueKind {
    /// Stable machine-readable identifier.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InsufficientTiles { .. } => "INSUFFICIENT_TILES",
            Self::TooManyTiles { .. } => "TOO_MANY_TILES",
            Self::NoStart => "NO_START",
            Self::NoHospital => "NO_HOSPITAL",
            Self::InsufficientProperties { .. } => "INSUFFICIENT_PROPERTIES",
            Self::NotConnected { .. } => "NOT_CONNECTED",
            Self::TooManyDeadEnds { .. } => "TOO_MANY_DEAD_ENDS",
            Self::PropertyGroupSmall { .. } => "PROPERTY_GROUP_SMALL",
            Self::PropertyGroupLarge { .. } => "PROPERTY_GROUP_LARGE",
            Self::LowPropertyVariety { .. } => "LOW_PROPERTY_VARIETY",
        }
    }

    /// Severity every occurrence of this issue carries.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::NoStart | Self::NoHospital | Self::NotConnected { .. } => Severity::Critical,
            Self::InsufficientTiles { .. }
            | Self::TooManyTiles { .. }
            | Self::InsufficientProperties { .. } => Severity::Error,
            Self::TooManyDeadEnds { .. }
            | Self::PropertyGroupSmall { .. }
            | Self::PropertyGroupLarge { .. }
            | Self::LowPropertyVariety { .. } => Severity::Warning,
        }
    }

    /// Family the issue belongs to.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::PropertyGroupSmall { .. }
            | Self::PropertyGroupLarge { .. }
            | Self::LowPropertyVariety { .. } => Category::Balance,
            _ => Category::Structural,
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientTiles { count, min } => {
                write!(f, "board needs at least {min} path tiles, found {count}")
            }
            Self::TooManyTiles { count, max } => {
                write!(f, "board allows at most {max} path tiles, found {count}")
            }
            Self::NoStart => f.write_str("board has no start position"),
            Self::NoHospital => f.write_str("board has no hospital tile"),
            Self::InsufficientProperties { count, min } => {
                write!(f, "board needs at least {min} properties, found {count}")
            }
            Self::NotConnected { regions: 0 } => f.write_str("board has no path tiles"),
            Self::NotConnected { regions } => {
                write!(f, "path tiles are split into {regions} isolated regions")
            }
            Self::TooManyDeadEnds { count, max } => {
                write!(f, "board has {count} dead ends, at most {max} recommended")
            }
            Self::PropertyGroupSmall { group, count } => {
                write!(f, "{group} has only {count} properties")
            }
            Self::PropertyGroupLarge { group, count } => {
                write!(f, "{group} has {count} properties, which may be too many")
            }
            Self::LowPropertyVariety { groups, min } => {
                write!(f, "only {groups} property groups present, {min} recommended")
            }
        }
    }
}

/// One rule violation found on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    #[serde(flatten)]
    kind: IssueKind,
    severity: Severity,
    position: Option<GridCoord>,
}

impl ValidationIssue {
    /// Creates an issue with the severity implied by its kind.
    #[must_use]
    pub const fn new(kind: IssueKind, position: Option<GridCoord>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            position,
        }
    }

    /// Violated rule and its measurements.
    #[must_use]
    pub const fn kind(&self) -> IssueKind {
        self.kind
    }

    /// Severity of the violation.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Cell that best locates the violation, when one exists.
    #[must_use]
    pub const fn position(&self) -> Option<GridCoord> {
        self.position
    }

    /// Stable machine-readable identifier of the violated rule.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.kind.code(), self.kind)?;
        if let Some(position) = self.position {
            write!(f, " at {position}")?;
        }
        Ok(())
    }
}

/// Summary counts gathered during a validation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BoardStatistics {
    /// Every tile, structure placeholders included.
    pub tile_count: usize,
    /// Walkable path tiles.
    pub path_tile_count: usize,
    /// Registered ownable structures.
    pub structure_count: usize,
    /// Connected regions formed by path tiles.
    pub region_count: usize,
    /// Path tiles with exactly one path neighbour.
    pub dead_end_count: usize,
    /// Path tiles per kind.
    pub kind_distribution: BTreeMap<PathKind, usize>,
    /// Structures per property group.
    pub group_distribution: BTreeMap<PropertyGroup, usize>,
}

/// Ordered issues produced by one validation pass plus board statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
    statistics: BoardStatistics,
}

impl ValidationReport {
    pub(crate) fn new(issues: Vec<ValidationIssue>, statistics: BoardStatistics) -> Self {
        Self { issues, statistics }
    }

    /// Reports whether no issue blocks play.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(|issue| issue.severity.is_blocking())
    }

    /// Every issue in rule order.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Issues of severity error or critical.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity.is_blocking())
    }

    /// Issues of severity warning.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| !issue.severity.is_blocking())
    }

    /// First issue carrying the provided code.
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&ValidationIssue> {
        self.issues.iter().find(|issue| issue.code() == code)
    }

    /// Counts gathered while validating.
    #[must_use]
    pub fn statistics(&self) -> &BoardStatistics {
        &self.statistics
    }
}
