use serde::{Deserialize, Serialize};

use super::Language;

/// Textual quality signals for a single file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileMetrics {
    /// Path relative to the scenario root
    pub path: String,

    /// Lines containing the word "todo"
    pub todo_count: usize,

    /// Lines containing the word "fixme"
    pub fixme_count: usize,

    /// Lines containing the word "hack"
    pub hack_count: usize,

    /// Import statements
    pub import_count: usize,

    /// Function and method definitions
    pub function_count: usize,

    /// Non-blank, non-comment lines
    pub code_lines: usize,

    /// Comment lines
    pub comment_lines: usize,

    /// Comment lines divided by code lines
    pub comment_ratio: f64,
}

impl FileMetrics {
    /// Sum of all technical-debt markers
    pub fn tech_debt_total(&self) -> usize {
        self.todo_count + self.fixme_count + self.hack_count
    }
}

/// Aggregate metrics for every analyzed file of one language
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeMetrics {
    /// Language these metrics describe
    pub language: Option<Language>,

    /// Files that were opened and scanned
    pub files_analyzed: usize,

    pub todo_count: usize,
    pub fixme_count: usize,
    pub hack_count: usize,

    pub total_imports: usize,
    pub total_functions: usize,

    pub avg_imports_per_file: f64,
    pub max_imports_per_file: usize,
    pub avg_functions_per_file: f64,
    pub max_functions_per_file: usize,

    /// Per-file breakdown, when requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileMetrics>,
}

/// One record per file joining every analyzer's view of it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedFileMetrics {
    /// Path relative to the scenario root
    pub file_path: String,

    /// Language, if the extension is tracked
    pub language: Option<Language>,

    /// Non-blank line count
    pub line_count: usize,

    pub todo_count: usize,
    pub fixme_count: usize,
    pub hack_count: usize,
    pub import_count: usize,
    pub function_count: usize,
    pub code_lines: usize,
    pub comment_lines: usize,
    pub comment_ratio: f64,

    /// Whether a matching test file exists (or the file is a test)
    pub has_test_file: bool,

    /// Highest function complexity; `None` when complexity was not measured
    pub max_complexity: Option<u32>,

    /// Mean function complexity; `None` when complexity was not measured
    pub avg_complexity: Option<f64>,

    /// Share of the file's lines inside duplicate blocks; `None` when not measured
    pub duplication_percentage: Option<f64>,
}

impl DetailedFileMetrics {
    /// Minimal record for a file whose language is untracked
    pub fn untracked(file_path: impl Into<String>, line_count: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line_count,
            ..Default::default()
        }
    }

    /// Build a record from a language's per-file metrics
    pub fn from_file_metrics(
        metrics: FileMetrics,
        language: Language,
        line_count: usize,
        has_test_file: bool,
    ) -> Self {
        Self {
            file_path: metrics.path,
            language: Some(language),
            line_count,
            todo_count: metrics.todo_count,
            fixme_count: metrics.fixme_count,
            hack_count: metrics.hack_count,
            import_count: metrics.import_count,
            function_count: metrics.function_count,
            code_lines: metrics.code_lines,
            comment_lines: metrics.comment_lines,
            comment_ratio: metrics.comment_ratio,
            has_test_file,
            max_complexity: None,
            avg_complexity: None,
            duplication_percentage: None,
        }
    }

    /// Sum of all technical-debt markers
    pub fn tech_debt_total(&self) -> usize {
        self.todo_count + self.fixme_count + self.hack_count
    }
}
