//! Duplicate-code detection via dupl (Go) and jscpd (TypeScript/JavaScript)

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::config::DuplicationConfig;
use crate::errors::ToolError;
use crate::models::{DuplicateBlock, DuplicateResult, DuplicationSummary, FileLocation, Language};
use crate::tools::executor::ToolExecutor;
use crate::utils;

/// File name jscpd gives its JSON report
pub const JSCPD_REPORT_FILE: &str = "jscpd-report.json";

static CLONE_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*found\s+(\d+)\s+clones?:?\s*$").expect("valid clone header pattern")
});

// Format: [loc N: ]<path>:<start>,<end> (a dash is accepted between start and end)
static CLONE_LOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:loc\s+\d+:\s*)?(.+?):(\d+)[,-](\d+),?\s*$")
        .expect("valid clone location pattern")
});

/// stderr fragments that mean the package runner could not find the detector
const TOOL_MISSING_PATTERNS: [&str; 5] = [
    "could not determine executable to run",
    "command not found",
    "not found: jscpd",
    "404 not found",
    "enoent",
];

fn close_block(blocks: &mut Vec<DuplicateBlock>, locations: Vec<FileLocation>) {
    if locations.len() >= 2 {
        blocks.push(DuplicateBlock::new(locations, None));
    } else if !locations.is_empty() {
        debug!("Dropping clone group with {} location(s)", locations.len());
    }
}

fn parse_location(line: &str, scenario_root: &Path) -> Option<FileLocation> {
    let caps = CLONE_LOCATION.captures(line)?;
    Some(FileLocation {
        path: utils::relativize_tool_path(scenario_root, caps[1].trim()),
        start_line: caps[2].parse().ok()?,
        end_line: caps[3].parse().ok()?,
    })
}

/// Parse dupl's text output into duplicate blocks.
///
/// A `found N clones` header owns every location line up to the next header
/// or the end of input. Locations seen before the first header are closed
/// into one block by that header. Anything else is ignored.
pub fn parse_dupl_output(output: &str, scenario_root: &Path) -> Vec<DuplicateBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<Vec<FileLocation>> = None;
    let mut leading: Vec<FileLocation> = Vec::new();

    for line in output.lines() {
        if CLONE_HEADER.is_match(line) {
            if let Some(locations) = current.take() {
                close_block(&mut blocks, locations);
            }
            close_block(&mut blocks, std::mem::take(&mut leading));
            current = Some(Vec::new());
            continue;
        }

        let Some(location) = parse_location(line, scenario_root) else {
            continue;
        };

        match current.as_mut() {
            Some(locations) => locations.push(location),
            None => leading.push(location),
        }
    }

    if let Some(locations) = current.take() {
        close_block(&mut blocks, locations);
    }
    if !leading.is_empty() {
        debug!("Ignoring {} clone location(s) without a header", leading.len());
    }

    blocks
}

#[derive(Debug, Deserialize)]
struct JscpdReport {
    #[serde(default)]
    duplicates: Vec<JscpdDuplicate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JscpdDuplicate {
    first_file: JscpdFile,
    second_file: JscpdFile,
    #[serde(default)]
    lines: Option<usize>,
    #[serde(default)]
    tokens: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct JscpdFile {
    name: String,
    start: usize,
    end: usize,
}

impl JscpdFile {
    fn into_location(self, scenario_root: &Path) -> FileLocation {
        FileLocation {
            path: utils::relativize_tool_path(scenario_root, &self.name),
            start_line: self.start,
            end_line: self.end,
        }
    }
}

/// Parse a jscpd JSON report. Malformed JSON yields no blocks.
pub fn parse_jscpd_report(json: &str, scenario_root: &Path) -> Vec<DuplicateBlock> {
    let report: JscpdReport = match serde_json::from_str(json) {
        Ok(report) => report,
        Err(err) => {
            warn!("Could not parse jscpd report: {}", err);
            return Vec::new();
        }
    };

    report
        .duplicates
        .into_iter()
        .map(|dup| {
            let locations = vec![
                dup.first_file.into_location(scenario_root),
                dup.second_file.into_location(scenario_root),
            ];
            let mut block = DuplicateBlock::new(locations, dup.tokens);
            if let Some(lines) = dup.lines {
                block.lines = lines;
            }
            block
        })
        .collect()
}

/// Whether stderr says the package runner could not find the detector
pub fn is_tool_missing(stderr: &str) -> bool {
    let stderr = stderr.to_lowercase();
    TOOL_MISSING_PATTERNS
        .iter()
        .any(|pattern| stderr.contains(pattern))
}

/// Delegates duplicate detection to an external tool per language family
#[derive(Debug, Clone)]
pub struct DuplicationDetector {
    scenario_root: PathBuf,
    config: DuplicationConfig,
}

impl DuplicationDetector {
    /// Create a new duplication detector
    pub fn new(scenario_root: impl Into<PathBuf>, config: DuplicationConfig) -> Self {
        Self {
            scenario_root: scenario_root.into(),
            config,
        }
    }

    /// Detect duplicates among `files` (scenario-relative) of `language`
    pub async fn detect(&self, language: Language, files: &[String]) -> DuplicateResult {
        match language {
            Language::Go => self.detect_go(files).await,
            Language::TypeScript | Language::JavaScript => {
                self.detect_javascript(language, files).await
            }
            Language::Python | Language::Rust => DuplicateResult::skipped(format!(
                "duplicate detection is not implemented for {}",
                language
            )),
        }
    }

    async fn detect_go(&self, files: &[String]) -> DuplicateResult {
        let tool = self.config.go_executable.as_str();
        let Some(executable) = utils::resolve_command(tool) else {
            return DuplicateResult::skipped(format!(
                "{} is not installed; install it with `go install github.com/mibk/dupl@latest`",
                tool
            ));
        };

        if files.is_empty() {
            return DuplicateResult::skipped("no go files to analyze");
        }

        let mut command = Command::new(&executable);
        command
            .arg("-t")
            .arg(self.config.go_min_tokens.to_string())
            .args(files.iter().map(|f| self.scenario_root.join(f)))
            .current_dir(&self.scenario_root);

        let executor = ToolExecutor::new(self.config.timeout());
        match executor.run(tool, command).await {
            Ok(output) => {
                let blocks = parse_dupl_output(&output.stdout, &self.scenario_root);
                debug!("{} reported {} duplicate blocks", tool, blocks.len());
                DuplicateResult::Analyzed(DuplicationSummary::new(tool, blocks))
            }
            Err(err) => {
                warn!("Duplicate detection skipped: {}", err);
                DuplicateResult::skipped(err.to_string())
            }
        }
    }

    async fn detect_javascript(&self, language: Language, files: &[String]) -> DuplicateResult {
        if files.is_empty() {
            return DuplicateResult::skipped(format!("no {} files to analyze", language));
        }

        let runner = self.config.package_runner.as_str();
        let Some(executable) = utils::resolve_command(runner) else {
            return DuplicateResult::skipped(format!(
                "{} is not installed; install Node.js to run {}",
                runner, self.config.js_tool
            ));
        };

        let target = self.scenario_root.join(&self.config.ui_source_dir);
        if !target.is_dir() {
            return DuplicateResult::skipped(format!(
                "UI source directory {} does not exist",
                self.config.ui_source_dir
            ));
        }

        let report_dir = match tempfile::Builder::new().prefix("augur-jscpd-").tempdir() {
            Ok(dir) => dir,
            Err(err) => {
                return DuplicateResult::skipped(format!(
                    "could not create a report directory: {}",
                    err
                ))
            }
        };

        let tool = self.config.js_tool.as_str();
        let mut command = Command::new(&executable);
        command
            .arg(tool)
            .args(["--reporters", "json", "--silent"])
            .arg("--output")
            .arg(report_dir.path())
            .arg("--min-lines")
            .arg(self.config.js_min_lines.to_string())
            .arg("--min-tokens")
            .arg(self.config.js_min_tokens.to_string())
            .arg(&target)
            .current_dir(&self.scenario_root);

        let executor = ToolExecutor::new(self.config.timeout());
        let output = match executor.run(tool, command).await {
            Ok(output) => output,
            Err(ToolError::NotFound(name)) => {
                return DuplicateResult::skipped(format!("{} is not installed", name));
            }
            Err(err) => {
                warn!("Duplicate detection skipped: {}", err);
                return DuplicateResult::skipped(err.to_string());
            }
        };

        if is_tool_missing(&output.stderr) {
            return DuplicateResult::skipped(format!(
                "{} is not available through {}; install it with `npm install -g {}`",
                tool, runner, tool
            ));
        }
        if !output.success() {
            let detail = output.stderr.lines().next().unwrap_or("no error output");
            return DuplicateResult::skipped(format!(
                "{} failed with exit code {:?}: {}",
                tool, output.exit_code, detail
            ));
        }

        let report = fs::read_to_string(report_dir.path().join(JSCPD_REPORT_FILE))
            .unwrap_or_else(|_| output.stdout.clone());

        let relevant: HashSet<&str> = files.iter().map(String::as_str).collect();
        let blocks: Vec<DuplicateBlock> = parse_jscpd_report(&report, &self.scenario_root)
            .into_iter()
            .filter(|block| {
                block
                    .locations
                    .iter()
                    .any(|loc| relevant.contains(loc.path.as_str()))
            })
            .collect();

        debug!("{} reported {} {} duplicate blocks", tool, blocks.len(), language);
        DuplicateResult::Analyzed(DuplicationSummary::new(tool, blocks))
    }
}
