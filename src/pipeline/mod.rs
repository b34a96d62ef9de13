//! Orchestrates one scan: detection, metrics, external tools, aggregation, issues

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::aggregate::{apply_complexity, apply_duplication, collect_with_inventory};
use crate::config::AugurConfig;
use crate::detection::LanguageDetector;
use crate::errors::AugurError;
use crate::issues::generate_issues;
use crate::metrics::CodeMetricsAnalyzer;
use crate::models::{
    CodeMetrics, ComplexityResult, DetailedFileMetrics, DuplicateResult, Inventory, Issue,
    Language, ScanRecord,
};
use crate::store::{IssueStore, MetricsStore, ScanHistory};
use crate::tools::{ComplexityAnalyzer, DuplicationDetector};

/// Everything one scan produced
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub scenario: String,
    pub root: PathBuf,
    pub scanned_at: DateTime<Utc>,
    pub inventory: Inventory,
    pub code_metrics: BTreeMap<Language, CodeMetrics>,
    pub complexity: BTreeMap<Language, ComplexityResult>,
    pub duplication: BTreeMap<Language, DuplicateResult>,
    pub files: Vec<DetailedFileMetrics>,
    pub issues: Vec<Issue>,
}

impl ScanReport {
    /// Human-readable reasons for every skipped tool analysis
    pub fn skipped_analyses(&self) -> Vec<String> {
        let complexity = self.complexity.iter().filter_map(|(language, result)| {
            result
                .skip_reason()
                .map(|reason| format!("complexity ({}): {}", language, reason))
        });
        let duplication = self.duplication.iter().filter_map(|(language, result)| {
            result
                .skip_reason()
                .map(|reason| format!("duplication ({}): {}", language, reason))
        });
        complexity.chain(duplication).collect()
    }

    /// History entry describing this scan
    pub fn to_record(&self) -> ScanRecord {
        ScanRecord {
            scenario: self.scenario.clone(),
            scanned_at: self.scanned_at,
            files_scanned: self.files.len(),
            issues_found: self.issues.len(),
            languages: self
                .inventory
                .iter()
                .map(|(language, inv)| (*language, inv.file_count))
                .collect(),
            skipped: self.skipped_analyses(),
        }
    }

    /// Write metrics, issues and a history entry; returns the number of new issues
    pub fn persist<S>(&self, store: &S) -> Result<usize, AugurError>
    where
        S: MetricsStore + IssueStore + ScanHistory + ?Sized,
    {
        store.upsert_file_metrics(&self.scenario, &self.files)?;
        let inserted = store.upsert_issues(&self.issues)?;
        store.record_scan(self.to_record())?;
        debug!(
            "Persisted {} files and {} issues ({} new) for '{}'",
            self.files.len(),
            self.issues.len(),
            inserted,
            self.scenario
        );
        Ok(inserted)
    }
}

/// Runs every analysis stage for a scenario, one after another
pub struct ScanPipeline<D: LanguageDetector> {
    detector: D,
    config: AugurConfig,
}

impl<D: LanguageDetector> ScanPipeline<D> {
    pub fn new(detector: D, config: AugurConfig) -> Self {
        Self { detector, config }
    }

    pub async fn run(&self, scenario: &str, root: &Path) -> Result<ScanReport, AugurError> {
        self.run_with_progress(scenario, root, |_| {}).await
    }

    /// Run the scan, reporting each stage to `on_stage`
    pub async fn run_with_progress(
        &self,
        scenario: &str,
        root: &Path,
        mut on_stage: impl FnMut(&str),
    ) -> Result<ScanReport, AugurError> {
        on_stage("Detecting languages");
        let inventory = self.detector.detect(root)?;
        info!(
            "Scenario '{}': {} languages, {} files",
            scenario,
            inventory.len(),
            inventory.values().map(|inv| inv.file_count).sum::<usize>()
        );

        let metrics_analyzer = CodeMetricsAnalyzer::new(root);
        let complexity_analyzer = ComplexityAnalyzer::new(root, self.config.complexity.clone());
        let duplication_detector = DuplicationDetector::new(root, self.config.duplication.clone());

        let mut code_metrics = BTreeMap::new();
        let mut complexity = BTreeMap::new();
        let mut duplication = BTreeMap::new();

        for (language, inv) in &inventory {
            let files: Vec<String> = inv.files.iter().cloned().collect();

            on_stage(&format!("Measuring {} code", language));
            code_metrics.insert(*language, metrics_analyzer.analyze(*language, &files, false));

            on_stage(&format!("Analyzing {} complexity", language));
            let outcome = complexity_analyzer.analyze(*language, &files).await;
            if let Some(reason) = outcome.skip_reason() {
                debug!("Complexity skipped for {}: {}", language, reason);
            }
            complexity.insert(*language, outcome);

            on_stage(&format!("Detecting {} duplication", language));
            let outcome = duplication_detector.detect(*language, &files).await;
            if let Some(reason) = outcome.skip_reason() {
                debug!("Duplication skipped for {}: {}", language, reason);
            }
            duplication.insert(*language, outcome);
        }

        on_stage("Aggregating file metrics");
        let all_files: Vec<String> = inventory
            .values()
            .flat_map(|inv| inv.files.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut files = collect_with_inventory(root, &all_files, &inventory);
        for (language, outcome) in &complexity {
            apply_complexity(&mut files, *language, outcome);
        }
        for (language, outcome) in &duplication {
            apply_duplication(&mut files, *language, outcome);
        }

        on_stage("Generating issues");
        let issues = generate_issues(scenario, &files, &self.config.thresholds);
        info!(
            "Scenario '{}': {} files aggregated, {} issues",
            scenario,
            files.len(),
            issues.len()
        );

        Ok(ScanReport {
            scenario: scenario.to_string(),
            root: root.to_path_buf(),
            scanned_at: Utc::now(),
            inventory,
            code_metrics,
            complexity,
            duplication,
            files,
            issues,
        })
    }
}
