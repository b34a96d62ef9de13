//! Per-file textual metrics: debt markers, imports, definitions, comments

use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::models::{CodeMetrics, FileMetrics, Language};

pub mod heuristics;

/// Scan a file's content and compute its metrics
pub fn analyze_content(language: Language, path: &str, content: &str) -> FileMetrics {
    let mut metrics = FileMetrics {
        path: path.to_string(),
        ..Default::default()
    };

    for line in content.lines() {
        let markers = heuristics::debt_markers(line);
        metrics.todo_count += usize::from(markers.todo);
        metrics.fixme_count += usize::from(markers.fixme);
        metrics.hack_count += usize::from(markers.hack);

        if heuristics::is_import_line(language, line) {
            metrics.import_count += 1;
        }
        if heuristics::is_function_line(language, line) {
            metrics.function_count += 1;
        }

        if line.trim().is_empty() {
            continue;
        }
        if heuristics::is_comment_line(language, line) {
            metrics.comment_lines += 1;
        } else {
            metrics.code_lines += 1;
        }
    }

    metrics.comment_ratio = if metrics.code_lines == 0 {
        0.0
    } else {
        metrics.comment_lines as f64 / metrics.code_lines as f64
    };

    metrics
}

/// Computes code metrics for files of one language under a scenario root
#[derive(Debug, Clone)]
pub struct CodeMetricsAnalyzer {
    scenario_root: PathBuf,
}

impl CodeMetricsAnalyzer {
    /// Create an analyzer resolving relative paths against `scenario_root`
    pub fn new(scenario_root: impl Into<PathBuf>) -> Self {
        Self {
            scenario_root: scenario_root.into(),
        }
    }

    /// Analyze a single file given by its scenario-relative path
    pub fn analyze_file(&self, language: Language, relative: &str) -> io::Result<FileMetrics> {
        let bytes = fs::read(self.scenario_root.join(relative))?;
        Ok(analyze_content(
            language,
            relative,
            &String::from_utf8_lossy(&bytes),
        ))
    }

    /// Analyze every file and aggregate. Unreadable files are skipped.
    pub fn analyze(
        &self,
        language: Language,
        files: &[String],
        include_breakdown: bool,
    ) -> CodeMetrics {
        let per_file: Vec<FileMetrics> = files
            .iter()
            .filter_map(|file| match self.analyze_file(language, file) {
                Ok(metrics) => Some(metrics),
                Err(err) => {
                    warn!("Skipping {}: {}", file, err);
                    None
                }
            })
            .collect();

        debug!(
            "Analyzed {}/{} {} files",
            per_file.len(),
            files.len(),
            language
        );

        let mut aggregate = aggregate_metrics(&per_file);
        aggregate.language = Some(language);
        if include_breakdown {
            aggregate.files = per_file;
        }
        aggregate
    }

    pub fn scenario_root(&self) -> &Path {
        &self.scenario_root
    }
}

/// Fold per-file metrics into totals, averages and maxima
pub fn aggregate_metrics(files: &[FileMetrics]) -> CodeMetrics {
    let mut aggregate = CodeMetrics::default();
    if files.is_empty() {
        return aggregate;
    }

    for file in files {
        aggregate.todo_count += file.todo_count;
        aggregate.fixme_count += file.fixme_count;
        aggregate.hack_count += file.hack_count;
        aggregate.total_imports += file.import_count;
        aggregate.total_functions += file.function_count;
        aggregate.max_imports_per_file = aggregate.max_imports_per_file.max(file.import_count);
        aggregate.max_functions_per_file =
            aggregate.max_functions_per_file.max(file.function_count);
    }

    let count = files.len() as f64;
    aggregate.files_analyzed = files.len();
    aggregate.avg_imports_per_file = aggregate.total_imports as f64 / count;
    aggregate.avg_functions_per_file = aggregate.total_functions as f64 / count;
    aggregate
}
