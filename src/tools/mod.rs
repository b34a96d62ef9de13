//! External analysis tools Augur delegates to

use serde::Serialize;
use std::path::PathBuf;

use crate::config::AugurConfig;
use crate::models::Language;
use crate::utils;

pub mod complexity;
pub mod duplication;
pub mod executor;

pub use complexity::{parse_gocyclo_output, ComplexityAnalyzer};
pub use duplication::{parse_dupl_output, parse_jscpd_report, DuplicationDetector};
pub use executor::{ToolExecutor, ToolOutput};

/// Whether an external tool can be found
#[derive(Debug, Clone, Serialize)]
pub struct ToolStatus {
    /// Executable name
    pub name: String,

    /// What the tool is used for
    pub purpose: &'static str,

    /// Languages it serves
    pub languages: Vec<Language>,

    /// Resolved location, when found
    pub path: Option<PathBuf>,
}

impl ToolStatus {
    fn probe(name: &str, purpose: &'static str, languages: Vec<Language>) -> Self {
        Self {
            name: name.to_string(),
            purpose,
            languages,
            path: utils::resolve_command(name),
        }
    }

    pub fn available(&self) -> bool {
        self.path.is_some()
    }
}

/// Probe every configured external tool
pub fn tool_statuses(config: &AugurConfig) -> Vec<ToolStatus> {
    vec![
        ToolStatus::probe(
            &config.complexity.executable,
            "cyclomatic complexity",
            vec![Language::Go],
        ),
        ToolStatus::probe(
            &config.duplication.go_executable,
            "duplicate detection",
            vec![Language::Go],
        ),
        ToolStatus::probe(
            &config.duplication.package_runner,
            "duplicate detection (runs jscpd)",
            vec![Language::TypeScript, Language::JavaScript],
        ),
    ]
}
