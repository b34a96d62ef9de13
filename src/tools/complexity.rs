//! Cyclomatic complexity via gocyclo

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::config::ComplexityConfig;
use crate::models::{ComplexityResult, ComplexitySummary, FunctionComplexity, Language};
use crate::tools::executor::ToolExecutor;
use crate::utils;

/// Shell command that installs the Go complexity tool
pub const GOCYCLO_INSTALL_HINT: &str = "go install github.com/fzipp/gocyclo/cmd/gocyclo@latest";

// Format: <complexity> <package> <function> <file>:<line>:<column>
static GOCYCLO_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\s+(\S+)\s+(\S+)\s+(.+):(\d+):(\d+)\s*$").expect("valid gocyclo pattern")
});

/// Parse gocyclo output into per-function results. Unrecognized lines are ignored.
pub fn parse_gocyclo_output(output: &str, scenario_root: &Path) -> Vec<FunctionComplexity> {
    output
        .lines()
        .filter_map(|line| {
            let caps = GOCYCLO_LINE.captures(line)?;
            Some(FunctionComplexity {
                complexity: caps[1].parse().ok()?,
                package: caps[2].to_string(),
                function: caps[3].to_string(),
                file: utils::relativize_tool_path(scenario_root, &caps[4]),
                line: caps[5].parse().ok()?,
                column: caps[6].parse().ok()?,
            })
        })
        .collect()
}

/// Delegates complexity measurement to an external tool per language
#[derive(Debug, Clone)]
pub struct ComplexityAnalyzer {
    scenario_root: PathBuf,
    config: ComplexityConfig,
}

impl ComplexityAnalyzer {
    /// Create a new complexity analyzer
    pub fn new(scenario_root: impl Into<PathBuf>, config: ComplexityConfig) -> Self {
        Self {
            scenario_root: scenario_root.into(),
            config,
        }
    }

    /// Analyze `files` (scenario-relative) of `language`
    pub async fn analyze(&self, language: Language, files: &[String]) -> ComplexityResult {
        match language {
            Language::Go => self.analyze_go(files).await,
            Language::TypeScript | Language::JavaScript => ComplexityResult::skipped(format!(
                "complexity analysis for {} has no local tool wiring",
                language
            )),
            Language::Python | Language::Rust => ComplexityResult::skipped(format!(
                "complexity analysis is not implemented for {}",
                language
            )),
        }
    }

    async fn analyze_go(&self, files: &[String]) -> ComplexityResult {
        let tool = self.config.executable.as_str();
        let Some(executable) = utils::resolve_command(tool) else {
            return ComplexityResult::skipped(format!(
                "{} is not installed; install it with `{}` and make sure it is on PATH",
                tool, GOCYCLO_INSTALL_HINT
            ));
        };

        if files.is_empty() {
            return ComplexityResult::skipped("no go files to analyze");
        }

        let absolute: Vec<PathBuf> = files.iter().map(|f| self.scenario_root.join(f)).collect();
        let executor = ToolExecutor::new(self.config.timeout());
        let threshold = self.config.threshold;

        let mut over_command = Command::new(&executable);
        over_command
            .arg("-over")
            .arg(threshold.to_string())
            .args(&absolute)
            .current_dir(&self.scenario_root);

        let over_threshold = match executor.run(tool, over_command).await {
            Ok(output) => {
                // gocyclo exits non-zero whenever it reports offenders
                if !output.success() && !output.stderr.trim().is_empty() {
                    debug!("{} stderr: {}", tool, output.stderr.trim());
                }
                parse_gocyclo_output(&output.stdout, &self.scenario_root)
            }
            Err(err) => {
                warn!("Complexity analysis skipped: {}", err);
                return ComplexityResult::skipped(err.to_string());
            }
        };

        let mut full_command = Command::new(&executable);
        full_command.args(&absolute).current_dir(&self.scenario_root);

        let functions = match executor.run(tool, full_command).await {
            Ok(output) => parse_gocyclo_output(&output.stdout, &self.scenario_root),
            Err(err) => {
                warn!("Complexity analysis skipped: {}", err);
                return ComplexityResult::skipped(err.to_string());
            }
        };

        debug!(
            "{} reported {} functions, {} over {}",
            tool,
            functions.len(),
            over_threshold.len(),
            threshold
        );

        ComplexityResult::Analyzed(ComplexitySummary::from_functions(
            tool,
            threshold,
            over_threshold,
            functions,
        ))
    }
}
