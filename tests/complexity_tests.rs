use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::Path;
use tempfile::TempDir;

use augur::config::ComplexityConfig;
use augur::models::{ComplexityResult, ComplexitySummary, FunctionComplexity, Language};
use augur::tools::complexity::GOCYCLO_INSTALL_HINT;
use augur::tools::{parse_gocyclo_output, ComplexityAnalyzer};

fn missing_tool_config() -> ComplexityConfig {
    ComplexityConfig {
        executable: "augur-test-no-such-gocyclo".to_string(),
        ..Default::default()
    }
}

fn function(complexity: u32, file: &str) -> FunctionComplexity {
    FunctionComplexity {
        complexity,
        package: "pkg".to_string(),
        function: "F".to_string(),
        file: file.to_string(),
        line: 1,
        column: 1,
    }
}

#[test]
fn test_parse_gocyclo_output() {
    let output = "\
14 handlers (*Server).ServeUser /scenario/api/handlers/user.go:42:1
3 main main /scenario/api/main.go:10:1
not a gocyclo line
Average: 8.5
";
    let functions = parse_gocyclo_output(output, Path::new("/scenario"));

    assert_eq!(functions.len(), 2);
    assert_eq!(
        functions[0],
        FunctionComplexity {
            complexity: 14,
            package: "handlers".to_string(),
            function: "(*Server).ServeUser".to_string(),
            file: "api/handlers/user.go".to_string(),
            line: 42,
            column: 1,
        }
    );
    assert_eq!(functions[1].file, "api/main.go");
    assert_eq!(functions[1].complexity, 3);
}

#[test]
fn test_parse_gocyclo_keeps_relative_paths() {
    let functions = parse_gocyclo_output("7 x Run api/x.go:3:1\n", Path::new("/scenario"));
    assert_eq!(functions[0].file, "api/x.go");
}

#[test]
fn test_summary_statistics() {
    let functions = vec![function(4, "a.go"), function(12, "a.go"), function(2, "b.go")];
    let over = vec![function(12, "a.go")];
    let summary = ComplexitySummary::from_functions("gocyclo", 10, over, functions);

    assert_eq!(summary.total_functions, 3);
    assert_eq!(summary.max_complexity, 12);
    assert_eq!(summary.average_complexity, 6.0);
    assert_eq!(summary.over_threshold.len(), 1);

    let per_file = summary.per_file();
    assert_eq!(per_file["a.go"].max, 12);
    assert_eq!(per_file["a.go"].average, 8.0);
    assert_eq!(per_file["b.go"].max, 2);
}

#[test]
fn test_summary_of_no_functions_is_zero() {
    let summary = ComplexitySummary::from_functions("gocyclo", 10, Vec::new(), Vec::new());
    assert_eq!(summary.average_complexity, 0.0);
    assert_eq!(summary.max_complexity, 0);
    assert_eq!(summary.total_functions, 0);
}

#[tokio::test]
async fn test_missing_tool_is_skipped_with_install_hint() {
    let temp = TempDir::new().unwrap();
    let analyzer = ComplexityAnalyzer::new(temp.path(), missing_tool_config());

    let result = analyzer
        .analyze(Language::Go, &["api/main.go".to_string()])
        .await;

    assert!(result.is_skipped());
    let reason = result.skip_reason().unwrap();
    assert!(reason.contains("not installed"));
    assert!(reason.contains(GOCYCLO_INSTALL_HINT));
    assert!(result.summary().is_none());
}

#[rstest]
#[case(Language::TypeScript, "no local tool wiring")]
#[case(Language::JavaScript, "no local tool wiring")]
#[case(Language::Python, "not implemented")]
#[case(Language::Rust, "not implemented")]
#[tokio::test]
async fn test_other_languages_are_skipped(#[case] language: Language, #[case] expected: &str) {
    let temp = TempDir::new().unwrap();
    let analyzer = ComplexityAnalyzer::new(temp.path(), missing_tool_config());

    let result = analyzer.analyze(language, &["x".to_string()]).await;

    let reason = result.skip_reason().unwrap();
    assert!(reason.contains(expected), "unexpected reason: {}", reason);
    assert!(reason.contains(&language.to_string()));
}

#[test]
fn test_result_serializes_with_status_tag() {
    let skipped = serde_json::to_value(ComplexityResult::skipped("tool missing")).unwrap();
    assert_eq!(skipped["status"], "skipped");
    assert_eq!(skipped["reason"], "tool missing");

    let analyzed = serde_json::to_value(ComplexityResult::Analyzed(
        ComplexitySummary::from_functions("gocyclo", 10, Vec::new(), Vec::new()),
    ))
    .unwrap();
    assert_eq!(analyzed["status"], "analyzed");
    assert_eq!(analyzed["tool"], "gocyclo");
    assert!(analyzed.get("reason").is_none());
}

/// Write an executable shell script standing in for an external tool
#[cfg(unix)]
fn fake_tool(dir: &Path, name: &str, body: &str) -> String {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string_lossy().into_owned()
}

#[cfg(unix)]
#[tokio::test]
async fn test_gocyclo_runs_twice_and_reports_offenders() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let bin = TempDir::new().unwrap();
    let script = format!(
        r#"echo "$*" >> "{log}"
if [ "$1" = "-over" ]; then
  echo "22 api big {root}/api/a.go:3:1"
  exit 1
fi
echo "22 api big {root}/api/a.go:3:1"
echo "4 api small {root}/api/a.go:30:1"
exit 1"#,
        log = bin.path().join("calls.log").display(),
        root = root.display()
    );
    let config = ComplexityConfig {
        executable: fake_tool(bin.path(), "gocyclo", &script),
        ..Default::default()
    };

    let result = ComplexityAnalyzer::new(root, config)
        .analyze(Language::Go, &["api/a.go".to_string()])
        .await;

    // A non-zero exit still counts as a finished analysis
    let summary = result.summary().expect("analysis should succeed");
    assert_eq!(summary.max_complexity, 22);
    assert_eq!(summary.total_functions, 2);
    assert_eq!(summary.average_complexity, 13.0);
    assert_eq!(summary.threshold, 10);
    assert_eq!(summary.over_threshold.len(), 1);
    assert_eq!(summary.over_threshold[0].function, "big");
    assert_eq!(summary.over_threshold[0].file, "api/a.go");
    assert_eq!(summary.over_threshold[0].line, 3);

    let calls = std::fs::read_to_string(bin.path().join("calls.log")).unwrap();
    let calls: Vec<&str> = calls.lines().collect();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].starts_with("-over 10 "));
    assert!(calls[0].ends_with("/api/a.go"));
    assert!(!calls[1].contains("-over"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_gocyclo_timeout_is_skipped() {
    let temp = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    let config = ComplexityConfig {
        executable: fake_tool(bin.path(), "gocyclo", "sleep 10"),
        timeout_secs: 1,
        ..Default::default()
    };

    let result = ComplexityAnalyzer::new(temp.path(), config)
        .analyze(Language::Go, &["api/a.go".to_string()])
        .await;

    let reason = result.skip_reason().expect("timeout should skip");
    assert!(reason.contains("timed out after 1s"), "unexpected reason: {}", reason);
}

#[cfg(unix)]
#[tokio::test]
async fn test_gocyclo_without_files_is_skipped() {
    let temp = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    let config = ComplexityConfig {
        executable: fake_tool(bin.path(), "gocyclo", "exit 0"),
        ..Default::default()
    };

    let result = ComplexityAnalyzer::new(temp.path(), config)
        .analyze(Language::Go, &[])
        .await;

    assert_eq!(result.skip_reason(), Some("no go files to analyze"));
}
