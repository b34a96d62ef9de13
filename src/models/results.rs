//! Outcomes of the external complexity and duplication analyzers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complexity of a single function as reported by the external tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionComplexity {
    /// Cyclomatic complexity
    pub complexity: u32,

    /// Package or module the function belongs to
    pub package: String,

    /// Function or method identifier
    pub function: String,

    /// Path relative to the scenario root
    pub file: String,

    /// Line number (1-indexed)
    pub line: usize,

    /// Column number (1-indexed)
    pub column: usize,
}

/// Summary of a successful complexity run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexitySummary {
    /// Name of the tool that produced the numbers
    pub tool: String,

    /// Threshold used for the over-threshold report
    pub threshold: u32,

    pub average_complexity: f64,
    pub max_complexity: u32,
    pub total_functions: usize,

    /// Functions above the threshold
    pub over_threshold: Vec<FunctionComplexity>,

    /// Every function seen by the unfiltered run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionComplexity>,
}

/// Max and mean complexity of one file's functions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileComplexity {
    pub max: u32,
    pub average: f64,
}

impl ComplexitySummary {
    /// Build summary statistics from parsed tool output
    pub fn from_functions(
        tool: impl Into<String>,
        threshold: u32,
        over_threshold: Vec<FunctionComplexity>,
        functions: Vec<FunctionComplexity>,
    ) -> Self {
        let total_functions = functions.len();
        let max_complexity = functions.iter().map(|f| f.complexity).max().unwrap_or(0);
        let average_complexity = if total_functions == 0 {
            0.0
        } else {
            functions.iter().map(|f| f.complexity as f64).sum::<f64>() / total_functions as f64
        };

        Self {
            tool: tool.into(),
            threshold,
            average_complexity,
            max_complexity,
            total_functions,
            over_threshold,
            functions,
        }
    }

    /// Per-file max/mean complexity keyed by relative path
    pub fn per_file(&self) -> HashMap<String, FileComplexity> {
        let mut grouped: HashMap<&str, Vec<u32>> = HashMap::new();
        for function in &self.functions {
            grouped
                .entry(function.file.as_str())
                .or_default()
                .push(function.complexity);
        }

        grouped
            .into_iter()
            .map(|(file, values)| {
                let max = values.iter().copied().max().unwrap_or(0);
                let average = values.iter().map(|v| *v as f64).sum::<f64>() / values.len() as f64;
                (file.to_string(), FileComplexity { max, average })
            })
            .collect()
    }
}

/// Outcome of complexity analysis for one language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComplexityResult {
    /// Analysis did not run
    Skipped { reason: String },

    /// Analysis ran and produced statistics
    Analyzed(ComplexitySummary),
}

impl ComplexityResult {
    /// Create a skipped outcome
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    pub fn skip_reason(&self) -> Option<&str> {
        match self {
            Self::Skipped { reason } => Some(reason),
            Self::Analyzed(_) => None,
        }
    }

    pub fn summary(&self) -> Option<&ComplexitySummary> {
        match self {
            Self::Skipped { .. } => None,
            Self::Analyzed(summary) => Some(summary),
        }
    }
}

/// A file range inside a duplicate block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLocation {
    /// Path relative to the scenario root
    pub path: String,
    pub start_line: usize,
    pub end_line: usize,
}

impl FileLocation {
    /// Inclusive number of lines in the range
    pub fn span(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

/// Two or more locations sharing near-identical code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateBlock {
    pub locations: Vec<FileLocation>,

    /// Line count of the first location's range
    pub lines: usize,

    /// Token count, when the tool reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<usize>,
}

impl DuplicateBlock {
    /// Create a block; `lines` comes from the first location only
    pub fn new(locations: Vec<FileLocation>, tokens: Option<usize>) -> Self {
        let lines = locations.first().map(FileLocation::span).unwrap_or(0);
        Self {
            locations,
            lines,
            tokens,
        }
    }
}

/// Summary of a successful duplication run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicationSummary {
    /// Name of the tool that produced the blocks
    pub tool: String,

    /// Duplicate blocks in tool order
    pub blocks: Vec<DuplicateBlock>,

    /// Sum over blocks of `lines` times the number of locations
    pub total_duplicate_lines: usize,
}

impl DuplicationSummary {
    pub fn new(tool: impl Into<String>, blocks: Vec<DuplicateBlock>) -> Self {
        let total_duplicate_lines = blocks
            .iter()
            .map(|block| block.lines * block.locations.len())
            .sum();
        Self {
            tool: tool.into(),
            blocks,
            total_duplicate_lines,
        }
    }

    /// Duplicated line count per relative path
    pub fn lines_per_file(&self) -> HashMap<String, usize> {
        let mut per_file: HashMap<String, usize> = HashMap::new();
        for block in &self.blocks {
            for location in &block.locations {
                *per_file.entry(location.path.clone()).or_insert(0) += block.lines;
            }
        }
        per_file
    }
}

/// Outcome of duplication detection for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DuplicateResult {
    /// Detection did not run
    Skipped { reason: String },

    /// Detection ran
    Analyzed(DuplicationSummary),
}

impl DuplicateResult {
    /// Create a skipped outcome
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    pub fn skip_reason(&self) -> Option<&str> {
        match self {
            Self::Skipped { reason } => Some(reason),
            Self::Analyzed(_) => None,
        }
    }

    pub fn summary(&self) -> Option<&DuplicationSummary> {
        match self {
            Self::Skipped { .. } => None,
            Self::Analyzed(summary) => Some(summary),
        }
    }
}
