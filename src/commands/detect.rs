use log::debug;
use std::path::Path;

use crate::config::AugurConfig;
use crate::detection::LanguageDetector;
use crate::errors::AugurError;
use crate::models::Inventory;
use crate::output::OutputFormatter;
use crate::tools::{tool_statuses, ToolStatus};

/// Command handler for the detect command
pub struct DetectCommand<'a, D: LanguageDetector> {
    detector: D,
    output_formatter: &'a dyn OutputFormatter,
}

impl<'a, D: LanguageDetector> DetectCommand<'a, D> {
    pub fn new(detector: D, output_formatter: &'a dyn OutputFormatter) -> Self {
        Self {
            detector,
            output_formatter,
        }
    }

    /// Detect languages under `root` and probe the configured tools
    pub fn execute(
        &self,
        root: &Path,
        config: &AugurConfig,
    ) -> Result<(Inventory, Vec<ToolStatus>), AugurError> {
        let inventory = self.detector.detect(root)?;
        let tools = tool_statuses(config);
        debug!(
            "{} of {} tools available",
            tools.iter().filter(|t| t.available()).count(),
            tools.len()
        );

        println!("{}", self.output_formatter.format_detection(&inventory, &tools));
        Ok((inventory, tools))
    }
}
