//! Threshold-based issue synthesis.
//!
//! Every check raises an issue only when the observed value is strictly
//! greater than its threshold. Severity bands per category:
//!
//! | category       | high             | medium           |
//! |----------------|------------------|------------------|
//! | length         | ratio > 3.0      | ratio > 2.0      |
//! | complexity     | > 2 x threshold  | > threshold + 5  |
//! | duplication    | > 3 x threshold  | > 2 x threshold  |
//! | technical_debt | > 3 x threshold  | > 2 x threshold  |
//! | coupling       | > 2 x threshold  | > threshold + 10 |
//!
//! Anything else over the threshold is low.

use crate::config::IssueThresholds;
use crate::models::{DetailedFileMetrics, Issue, IssueCategory, IssueSeverity};

pub fn length_severity(lines: usize, threshold: usize) -> Option<IssueSeverity> {
    if lines <= threshold {
        return None;
    }
    let ratio = lines as f64 / threshold as f64;
    Some(if ratio > 3.0 {
        IssueSeverity::High
    } else if ratio > 2.0 {
        IssueSeverity::Medium
    } else {
        IssueSeverity::Low
    })
}

pub fn complexity_severity(complexity: u32, threshold: u32) -> Option<IssueSeverity> {
    if complexity <= threshold {
        return None;
    }
    Some(if complexity > threshold.saturating_mul(2) {
        IssueSeverity::High
    } else if complexity > threshold.saturating_add(5) {
        IssueSeverity::Medium
    } else {
        IssueSeverity::Low
    })
}

pub fn duplication_severity(percentage: f64, threshold: f64) -> Option<IssueSeverity> {
    if percentage <= threshold {
        return None;
    }
    Some(if percentage > threshold * 3.0 {
        IssueSeverity::High
    } else if percentage > threshold * 2.0 {
        IssueSeverity::Medium
    } else {
        IssueSeverity::Low
    })
}

pub fn tech_debt_severity(markers: usize, threshold: usize) -> Option<IssueSeverity> {
    if markers <= threshold {
        return None;
    }
    Some(if markers > threshold.saturating_mul(3) {
        IssueSeverity::High
    } else if markers > threshold.saturating_mul(2) {
        IssueSeverity::Medium
    } else {
        IssueSeverity::Low
    })
}

pub fn coupling_severity(imports: usize, threshold: usize) -> Option<IssueSeverity> {
    if imports <= threshold {
        return None;
    }
    Some(if imports > threshold.saturating_mul(2) {
        IssueSeverity::High
    } else if imports > threshold.saturating_add(10) {
        IssueSeverity::Medium
    } else {
        IssueSeverity::Low
    })
}

fn file_issue(
    scenario: &str,
    record: &DetailedFileMetrics,
    category: IssueCategory,
    severity: IssueSeverity,
    title: &str,
    message: String,
) -> Issue {
    Issue {
        scenario: scenario.to_string(),
        file_path: record.file_path.clone(),
        line: 1,
        column: 1,
        title: title.to_string(),
        message,
        severity,
        tool: category.tool_name().to_string(),
        category,
    }
}

/// Issues for one file, in category order
pub fn issues_for_file(
    scenario: &str,
    record: &DetailedFileMetrics,
    thresholds: &IssueThresholds,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    if let Some(severity) = length_severity(record.line_count, thresholds.long_file_lines) {
        issues.push(file_issue(
            scenario,
            record,
            IssueCategory::Length,
            severity,
            "Long file",
            format!(
                "File has {} lines (threshold {})",
                record.line_count, thresholds.long_file_lines
            ),
        ));
    }

    if let Some(max) = record.max_complexity {
        if let Some(severity) = complexity_severity(max, thresholds.max_complexity) {
            issues.push(file_issue(
                scenario,
                record,
                IssueCategory::Complexity,
                severity,
                "High complexity",
                format!(
                    "Most complex function scores {} (threshold {})",
                    max, thresholds.max_complexity
                ),
            ));
        }
    }

    if let Some(percentage) = record.duplication_percentage {
        if let Some(severity) = duplication_severity(percentage, thresholds.max_duplication_pct) {
            issues.push(file_issue(
                scenario,
                record,
                IssueCategory::Duplication,
                severity,
                "Duplicated code",
                format!(
                    "{:.1}% of the file is duplicated (threshold {:.1}%)",
                    percentage, thresholds.max_duplication_pct
                ),
            ));
        }
    }

    let markers = record.tech_debt_total();
    if let Some(severity) = tech_debt_severity(markers, thresholds.max_tech_debt) {
        issues.push(file_issue(
            scenario,
            record,
            IssueCategory::TechnicalDebt,
            severity,
            "Technical debt markers",
            format!(
                "{} TODO/FIXME/HACK markers ({} todo, {} fixme, {} hack; threshold {})",
                markers,
                record.todo_count,
                record.fixme_count,
                record.hack_count,
                thresholds.max_tech_debt
            ),
        ));
    }

    if let Some(severity) = coupling_severity(record.import_count, thresholds.max_imports) {
        issues.push(file_issue(
            scenario,
            record,
            IssueCategory::Coupling,
            severity,
            "High coupling",
            format!(
                "File has {} imports (threshold {})",
                record.import_count, thresholds.max_imports
            ),
        ));
    }

    issues
}

/// Issues for every file, in input order
pub fn generate_issues(
    scenario: &str,
    records: &[DetailedFileMetrics],
    thresholds: &IssueThresholds,
) -> Vec<Issue> {
    records
        .iter()
        .flat_map(|record| issues_for_file(scenario, record, thresholds))
        .collect()
}
