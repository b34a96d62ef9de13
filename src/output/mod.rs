//! Output formatting for Augur

use colored::Colorize;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::models::{
    ComplexityResult, DuplicateResult, Inventory, IssueSeverity, IssueStatus, RefactorRecommendation,
    ScanRecord, StoredIssue,
};
use crate::pipeline::ScanReport;
use crate::tools::ToolStatus;

mod progress;

pub use progress::Progress;

/// Trait for formatting command results
pub trait OutputFormatter {
    /// Format detected languages and tool availability
    fn format_detection(&self, inventory: &Inventory, tools: &[ToolStatus]) -> String;

    /// Format the outcome of a scan
    fn format_scan(&self, report: &ScanReport) -> String;

    /// Format a list of recorded issues
    fn format_issues(&self, issues: &[StoredIssue]) -> String;

    /// Format a single issue after a status change
    fn format_issue_update(&self, issue: &StoredIssue) -> String;

    /// Format ranked refactor recommendations
    fn format_recommendations(&self, recommendations: &[RefactorRecommendation]) -> String;

    /// Format scan history
    fn format_history(&self, scans: &[ScanRecord]) -> String;
}

/// Pick the formatter for an output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Pretty => Box::new(PrettyFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Colored, human-readable output
#[derive(Debug, Clone)]
pub struct PrettyFormatter {
    /// Whether to use emojis
    use_emoji: bool,
}

impl Default for PrettyFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl PrettyFormatter {
    pub fn new() -> Self {
        Self { use_emoji: true }
    }

    pub fn without_emoji() -> Self {
        Self { use_emoji: false }
    }

    fn icon(&self, emoji: &str) -> String {
        if self.use_emoji {
            format!("{} ", emoji)
        } else {
            String::new()
        }
    }

    fn section(&self, emoji: &str, title: &str) -> String {
        format!("\n{}{}\n{}\n", self.icon(emoji), title.bold(), "━".repeat(60).dimmed())
    }

    fn severity(&self, severity: IssueSeverity) -> String {
        let label = format!("{:<6}", severity.to_string());
        let label = match severity {
            IssueSeverity::High => label.red().bold(),
            IssueSeverity::Medium => label.yellow(),
            IssueSeverity::Low => label.blue(),
        };
        format!("{}{}", self.icon(severity.emoji()), label)
    }

    fn status(&self, status: IssueStatus) -> String {
        match status {
            IssueStatus::Open => status.to_string().normal().to_string(),
            IssueStatus::Ignored => status.to_string().dimmed().to_string(),
            IssueStatus::Resolved => status.to_string().green().to_string(),
        }
    }

    fn complexity_line(&self, result: &ComplexityResult) -> String {
        match result {
            ComplexityResult::Skipped { reason } => {
                format!("complexity  {} {}", "skipped".yellow(), reason.dimmed())
            }
            ComplexityResult::Analyzed(summary) => format!(
                "complexity  {} functions, avg {:.1}, max {}, {} over {}",
                summary.total_functions,
                summary.average_complexity,
                summary.max_complexity,
                summary.over_threshold.len(),
                summary.threshold
            ),
        }
    }

    fn duplication_line(&self, result: &DuplicateResult) -> String {
        match result {
            DuplicateResult::Skipped { reason } => {
                format!("duplication {} {}", "skipped".yellow(), reason.dimmed())
            }
            DuplicateResult::Analyzed(summary) => format!(
                "duplication {} blocks, {} duplicated lines",
                summary.blocks.len(),
                summary.total_duplicate_lines
            ),
        }
    }
}

impl OutputFormatter for PrettyFormatter {
    fn format_detection(&self, inventory: &Inventory, tools: &[ToolStatus]) -> String {
        let mut output = self.section("🔮", "Languages");

        if inventory.is_empty() {
            output.push_str(&format!("{}\n", "No tracked source files found".dimmed()));
        }
        for (language, inv) in inventory {
            output.push_str(&format!(
                "{}{:<11} │ {:>5} files │ {:>7} lines │ {}\n",
                self.icon(language.emoji()),
                language.to_string(),
                inv.file_count,
                inv.total_lines,
                inv.primary_directory.dimmed()
            ));
        }

        output.push_str(&self.section("🧰", "Tools"));
        for tool in tools {
            let state = if tool.available() {
                "available".green()
            } else {
                "missing".red()
            };
            let languages: Vec<String> = tool.languages.iter().map(|l| l.to_string()).collect();
            output.push_str(&format!(
                "{:<8} {:<10} {} ({})\n",
                tool.name.bold(),
                state,
                tool.purpose,
                languages.join(", ").dimmed()
            ));
        }

        output
    }

    fn format_scan(&self, report: &ScanReport) -> String {
        let mut output = self.section("🔮", &format!("Scan of '{}'", report.scenario));

        for (language, inv) in &report.inventory {
            output.push_str(&format!(
                "{}{} ({} files)\n",
                self.icon(language.emoji()),
                language.to_string().bold(),
                inv.file_count
            ));
            if let Some(metrics) = report.code_metrics.get(language) {
                output.push_str(&format!(
                    "  markers     {} todo, {} fixme, {} hack\n",
                    metrics.todo_count, metrics.fixme_count, metrics.hack_count
                ));
                output.push_str(&format!(
                    "  structure   {} imports, {} functions\n",
                    metrics.total_imports, metrics.total_functions
                ));
            }
            if let Some(result) = report.complexity.get(language) {
                output.push_str(&format!("  {}\n", self.complexity_line(result)));
            }
            if let Some(result) = report.duplication.get(language) {
                output.push_str(&format!("  {}\n", self.duplication_line(result)));
            }
        }

        output.push_str(&self.section("📋", "Issues"));
        if report.issues.is_empty() {
            output.push_str(&format!("{}\n", "No issues found".green()));
        }
        for issue in &report.issues {
            output.push_str(&format!(
                "{} {:<15} {} {}\n",
                self.severity(issue.severity),
                issue.category.to_string(),
                issue.file_path.bold(),
                issue.message.dimmed()
            ));
        }

        output.push_str(&format!(
            "\n{} files, {} issues\n",
            report.files.len(),
            report.issues.len()
        ));
        output
    }

    fn format_issues(&self, issues: &[StoredIssue]) -> String {
        let mut output = self.section("📋", "Issues");
        if issues.is_empty() {
            output.push_str(&format!("{}\n", "No issues recorded".dimmed()));
            return output;
        }

        for stored in issues {
            let issue = &stored.issue;
            output.push_str(&format!(
                "#{:<5} {} {:<9} {:<15} {}\n        {}\n",
                stored.id,
                self.severity(issue.severity),
                self.status(stored.status),
                issue.category.to_string(),
                issue.file_path.bold(),
                issue.message.dimmed()
            ));
        }
        output
    }

    fn format_issue_update(&self, issue: &StoredIssue) -> String {
        format!(
            "{}Issue #{} ({}) is now {}",
            self.icon("✨"),
            issue.id,
            issue.issue.file_path,
            self.status(issue.status)
        )
    }

    fn format_recommendations(&self, recommendations: &[RefactorRecommendation]) -> String {
        let mut output = self.section("🧭", "Refactor recommendations");
        if recommendations.is_empty() {
            output.push_str(&format!(
                "{}\n",
                "No files recorded yet; run a scan first".dimmed()
            ));
            return output;
        }

        output.push_str(&format!(
            "{}\n",
            format!(
                "{:>3}  {:>8}  {:>9}  {:>6}  {:>5}  {:>5}  {:>6}  path",
                "#", "priority", "staleness", "visits", "lines", "cc", "dup%"
            )
            .dimmed()
        ));

        for (rank, rec) in recommendations.iter().enumerate() {
            let metrics = &rec.metrics;
            output.push_str(&format!(
                "{:>3}  {:>8.1}  {:>9.1}  {:>6}  {:>5}  {:>5}  {:>6}  {}\n",
                rank + 1,
                rec.priority,
                rec.staleness_score,
                rec.visit_count,
                metrics.line_count,
                metrics
                    .max_complexity
                    .map_or_else(|| "-".to_string(), |c| c.to_string()),
                metrics
                    .duplication_percentage
                    .map_or_else(|| "-".to_string(), |d| format!("{:.1}", d)),
                metrics.file_path.bold()
            ));
        }
        output
    }

    fn format_history(&self, scans: &[ScanRecord]) -> String {
        let mut output = self.section("📜", "Scan history");
        if scans.is_empty() {
            output.push_str(&format!("{}\n", "No scans recorded".dimmed()));
            return output;
        }

        for scan in scans {
            output.push_str(&format!(
                "{}  {:>5} files  {:>4} issues\n",
                scan.scanned_at.format("%Y-%m-%d %H:%M:%S").to_string().bold(),
                scan.files_scanned,
                scan.issues_found
            ));
            for reason in &scan.skipped {
                output.push_str(&format!("    {}\n", reason.dimmed()));
            }
        }
        output
    }
}

/// Machine-readable JSON output
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

#[derive(Serialize)]
struct DetectionOutput<'a> {
    languages: &'a Inventory,
    tools: &'a [ToolStatus],
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": {:?}}}", e.to_string()))
}

impl OutputFormatter for JsonFormatter {
    fn format_detection(&self, inventory: &Inventory, tools: &[ToolStatus]) -> String {
        to_json(&DetectionOutput {
            languages: inventory,
            tools,
        })
    }

    fn format_scan(&self, report: &ScanReport) -> String {
        to_json(report)
    }

    fn format_issues(&self, issues: &[StoredIssue]) -> String {
        to_json(issues)
    }

    fn format_issue_update(&self, issue: &StoredIssue) -> String {
        to_json(issue)
    }

    fn format_recommendations(&self, recommendations: &[RefactorRecommendation]) -> String {
        to_json(recommendations)
    }

    fn format_history(&self, scans: &[ScanRecord]) -> String {
        to_json(scans)
    }
}
