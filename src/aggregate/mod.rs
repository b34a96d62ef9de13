//! Joins detection, code metrics and tool outcomes into one record per file

use log::warn;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::detection::{count_non_blank_lines_in_file, LanguageDetector};
use crate::errors::AugurError;
use crate::metrics::{heuristics, CodeMetricsAnalyzer};
use crate::models::{ComplexityResult, DetailedFileMetrics, DuplicateResult, Inventory, Language};

/// Builds `DetailedFileMetrics` for a scenario
pub struct DetailedMetricsAggregator<D: LanguageDetector> {
    detector: D,
}

impl<D: LanguageDetector> DetailedMetricsAggregator<D> {
    pub fn new(detector: D) -> Self {
        Self { detector }
    }

    /// Run detection once, then build one record per file in `files`
    pub fn collect(
        &self,
        scenario_root: &Path,
        files: &[String],
    ) -> Result<Vec<DetailedFileMetrics>, AugurError> {
        let inventory = self.detector.detect(scenario_root)?;
        Ok(collect_with_inventory(scenario_root, files, &inventory))
    }
}

/// Build one record per file using an existing detection result.
///
/// Files that cannot be read still get a minimal record with a zero line
/// count, so the output always lines up with `files`.
///
/// Complexity and duplication stay `None`; see [`apply_complexity`] and
/// [`apply_duplication`].
pub fn collect_with_inventory(
    scenario_root: &Path,
    files: &[String],
    inventory: &Inventory,
) -> Vec<DetailedFileMetrics> {
    let mut language_of: HashMap<&str, Language> = HashMap::new();
    let mut names_by_language: HashMap<Language, HashSet<&str>> = HashMap::new();
    for (language, inv) in inventory {
        let names = names_by_language.entry(*language).or_default();
        for file in &inv.files {
            language_of.insert(file.as_str(), *language);
            names.insert(file_name(file));
        }
    }

    let analyzer = CodeMetricsAnalyzer::new(scenario_root);
    let mut records = Vec::with_capacity(files.len());

    for file in files {
        let Some(&language) = language_of.get(file.as_str()) else {
            let lines = count_non_blank_lines_in_file(&scenario_root.join(file)).unwrap_or(0);
            records.push(DetailedFileMetrics::untracked(file.clone(), lines));
            continue;
        };

        let metrics = match analyzer.analyze_file(language, file) {
            Ok(metrics) => metrics,
            Err(err) => {
                warn!("Could not read {}: {}", file, err);
                records.push(DetailedFileMetrics {
                    language: Some(language),
                    ..DetailedFileMetrics::untracked(file.clone(), 0)
                });
                continue;
            }
        };

        let line_count = inventory
            .get(&language)
            .and_then(|inv| inv.line_counts.get(file))
            .copied()
            .unwrap_or(metrics.code_lines + metrics.comment_lines);

        let has_test_file = heuristics::is_test_file(language, file)
            || names_by_language.get(&language).is_some_and(|names| {
                heuristics::test_file_names(language, file_name(file))
                    .iter()
                    .any(|candidate| names.contains(candidate.as_str()))
            });

        records.push(DetailedFileMetrics::from_file_metrics(
            metrics,
            language,
            line_count,
            has_test_file,
        ));
    }

    records
}

/// Fill max/average complexity for records of `language` from a batch outcome.
/// Skipped outcomes leave the fields `None`.
pub fn apply_complexity(
    records: &mut [DetailedFileMetrics],
    language: Language,
    result: &ComplexityResult,
) {
    let Some(summary) = result.summary() else {
        return;
    };

    let per_file = summary.per_file();
    for record in records
        .iter_mut()
        .filter(|r| r.language == Some(language))
    {
        let (max, average) = per_file
            .get(&record.file_path)
            .map(|fc| (fc.max, fc.average))
            .unwrap_or((0, 0.0));
        record.max_complexity = Some(max);
        record.avg_complexity = Some(average);
    }
}

/// Fill duplication percentage for records of `language` from a batch outcome.
/// Skipped outcomes leave the field `None`.
pub fn apply_duplication(
    records: &mut [DetailedFileMetrics],
    language: Language,
    result: &DuplicateResult,
) {
    let Some(summary) = result.summary() else {
        return;
    };

    let per_file = summary.lines_per_file();
    for record in records
        .iter_mut()
        .filter(|r| r.language == Some(language))
    {
        let duplicated = per_file.get(&record.file_path).copied().unwrap_or(0);
        let percentage = if record.line_count == 0 {
            0.0
        } else {
            (duplicated as f64 / record.line_count as f64 * 100.0).min(100.0)
        };
        record.duplication_percentage = Some(percentage);
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
