use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::DetailedFileMetrics;

/// Staleness score given to files the visit collaborator has never seen
pub const UNVISITED_STALENESS: f64 = 1000.0;

/// Visit/staleness signal for one file, supplied by an external collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitSignal {
    pub visit_count: u32,

    #[serde(default)]
    pub last_visited: Option<DateTime<Utc>>,

    pub staleness_score: f64,
}

impl VisitSignal {
    /// Signal for a file that has never been visited
    pub fn unvisited() -> Self {
        Self {
            visit_count: 0,
            last_visited: None,
            staleness_score: UNVISITED_STALENESS,
        }
    }
}

/// Field recommendations are ranked by (descending)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortKey {
    Complexity,
    Length,
    Duplication,
    Priority,
    #[default]
    Staleness,
}

/// A file worth refactoring, with the signals that ranked it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefactorRecommendation {
    #[serde(flatten)]
    pub metrics: DetailedFileMetrics,

    pub visit_count: u32,
    pub last_visited: Option<DateTime<Utc>>,
    pub staleness_score: f64,

    /// Composite refactor priority
    pub priority: f64,
}
