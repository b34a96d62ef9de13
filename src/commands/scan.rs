use colored::Colorize;
use log::info;
use std::path::Path;

use crate::detection::LanguageDetector;
use crate::errors::AugurError;
use crate::output::{OutputFormatter, Progress};
use crate::pipeline::{ScanPipeline, ScanReport};
use crate::store::{IssueStore, MetricsStore, ScanHistory};

/// Command handler for the scan command
pub struct ScanCommand<'a, D: LanguageDetector> {
    pipeline: ScanPipeline<D>,
    output_formatter: &'a dyn OutputFormatter,
    show_progress: bool,
}

impl<'a, D: LanguageDetector> ScanCommand<'a, D> {
    pub fn new(
        pipeline: ScanPipeline<D>,
        output_formatter: &'a dyn OutputFormatter,
        show_progress: bool,
    ) -> Self {
        Self {
            pipeline,
            output_formatter,
            show_progress,
        }
    }

    /// Scan the scenario and, when a store is given, persist the results
    pub async fn execute<S>(
        &self,
        scenario: &str,
        root: &Path,
        store: Option<&S>,
    ) -> Result<ScanReport, AugurError>
    where
        S: MetricsStore + IssueStore + ScanHistory + ?Sized,
    {
        let progress = Progress::new(self.show_progress);
        let report = self
            .pipeline
            .run_with_progress(scenario, root, |stage| progress.set_message(stage.to_string()))
            .await?;
        progress.finish_and_clear();

        println!("{}", self.output_formatter.format_scan(&report));

        match store {
            Some(store) => {
                let inserted = report.persist(store)?;
                info!("{} new issues recorded for '{}'", inserted, scenario);
                if self.show_progress {
                    eprintln!(
                        "{}",
                        format!("✨ Recorded scan ({} new issues)", inserted).dimmed()
                    );
                }
            }
            None => info!("Results for '{}' not persisted", scenario),
        }

        Ok(report)
    }
}
