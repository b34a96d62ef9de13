use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Severity bands for synthesized issues
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IssueSeverity {
    Low,
    Medium,
    High,
}

impl IssueSeverity {
    /// Get the emoji representation of this severity
    pub fn emoji(&self) -> &'static str {
        match self {
            IssueSeverity::High => "🔥",
            IssueSeverity::Medium => "⚠️",
            IssueSeverity::Low => "💡",
        }
    }
}

/// What kind of problem an issue describes
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IssueCategory {
    /// File is too long
    Length,

    /// A function is too complex
    Complexity,

    /// Too much of the file is duplicated
    Duplication,

    /// Too many TODO/FIXME/HACK markers
    TechnicalDebt,

    /// Too many imports
    Coupling,
}

impl IssueCategory {
    /// Name of the analyzer credited with issues of this category
    pub fn tool_name(&self) -> &'static str {
        match self {
            IssueCategory::Length => "line-counter",
            IssueCategory::Complexity => "complexity-analyzer",
            IssueCategory::Duplication => "duplication-detector",
            IssueCategory::TechnicalDebt => "debt-scanner",
            IssueCategory::Coupling => "import-analyzer",
        }
    }
}

/// Lifecycle state of a persisted issue
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum IssueStatus {
    #[default]
    Open,
    Ignored,
    Resolved,
}

/// A single synthesized finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Scenario the file belongs to
    pub scenario: String,

    /// Path relative to the scenario root
    pub file_path: String,

    /// Line number (1-indexed)
    pub line: usize,

    /// Column number (1-indexed)
    pub column: usize,

    /// Short headline
    pub title: String,

    /// Human-readable explanation with observed value and threshold
    pub message: String,

    pub severity: IssueSeverity,

    /// Analyzer credited with the finding
    pub tool: String,

    pub category: IssueCategory,
}

/// An issue as held by the issue store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredIssue {
    pub id: u64,

    #[serde(flatten)]
    pub issue: Issue,

    pub status: IssueStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
