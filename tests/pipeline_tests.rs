use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use augur::config::{AugurConfig, ComplexityConfig, DuplicationConfig};
use augur::detection::DefaultLanguageDetector;
use augur::models::{IssueCategory, Language};
use augur::pipeline::ScanPipeline;
use augur::store::{IssueStore, JsonStore, MetricsStore, ScanHistory};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Config whose external tools can never be found
fn offline_config() -> AugurConfig {
    AugurConfig {
        complexity: ComplexityConfig {
            executable: "augur-test-missing-gocyclo".to_string(),
            ..Default::default()
        },
        duplication: DuplicationConfig {
            go_executable: "augur-test-missing-dupl".to_string(),
            package_runner: "augur-test-missing-npx".to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn fixture() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    let long_body: String = (0..600).map(|i| format!("var v{} = {}\n", i, i)).collect();
    write(root, "api/big.go", &format!("package api\n{}", long_body));
    write(root, "api/small.go", "package api\n\nfunc Small() {}\n");
    write(root, "ui/src/index.ts", "export const answer = 42;\n");
    write(root, "api/vendor/lib.go", "package vendor\n");
    temp
}

fn pipeline() -> ScanPipeline<DefaultLanguageDetector> {
    ScanPipeline::new(DefaultLanguageDetector::new(), offline_config())
}

#[tokio::test]
async fn test_scan_without_external_tools() {
    let temp = fixture();
    let report = pipeline().run("demo", temp.path()).await.unwrap();

    assert_eq!(report.scenario, "demo");
    assert_eq!(
        report.inventory.keys().copied().collect::<Vec<_>>(),
        vec![Language::Go, Language::TypeScript]
    );
    assert_eq!(
        report
            .files
            .iter()
            .map(|f| f.file_path.as_str())
            .collect::<Vec<_>>(),
        vec!["api/big.go", "api/small.go", "ui/src/index.ts"]
    );

    // Every tool-backed analysis is skipped, none fails the scan
    assert!(report.complexity.values().all(|r| r.is_skipped()));
    assert!(report.duplication.values().all(|r| r.is_skipped()));
    let skipped = report.skipped_analyses();
    assert_eq!(skipped.len(), 4);
    assert!(skipped
        .iter()
        .any(|s| s.starts_with("complexity (go)") && s.contains("augur-test-missing-gocyclo")));

    assert!(report.files.iter().all(|f| f.max_complexity.is_none()));
    assert!(report.files.iter().all(|f| f.duplication_percentage.is_none()));

    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].file_path, "api/big.go");
    assert_eq!(report.issues[0].category, IssueCategory::Length);

    let go_metrics = &report.code_metrics[&Language::Go];
    assert_eq!(go_metrics.files_analyzed, 2);
}

#[tokio::test]
async fn test_progress_stages_are_reported() {
    let temp = fixture();
    let mut stages = Vec::new();
    pipeline()
        .run_with_progress("demo", temp.path(), |stage| stages.push(stage.to_string()))
        .await
        .unwrap();

    assert_eq!(stages.first().map(String::as_str), Some("Detecting languages"));
    assert_eq!(stages.last().map(String::as_str), Some("Generating issues"));
    assert!(stages.contains(&"Analyzing go complexity".to_string()));
}

#[tokio::test]
async fn test_rescans_do_not_duplicate_issues() {
    let temp = fixture();
    let store = JsonStore::in_memory();

    let first = pipeline().run("demo", temp.path()).await.unwrap();
    assert_eq!(first.persist(&store).unwrap(), 1);

    let second = pipeline().run("demo", temp.path()).await.unwrap();
    assert_eq!(second.persist(&store).unwrap(), 0);

    assert_eq!(store.issues("demo", None).unwrap().len(), 1);
    assert_eq!(store.file_metrics("demo", 0).unwrap().len(), 3);

    let history = store.scan_history("demo").unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].files_scanned, 3);
    assert_eq!(history[1].issues_found, 1);
    assert_eq!(history[1].languages[&Language::Go], 2);
    assert_eq!(history[1].skipped.len(), 4);
}

#[tokio::test]
async fn test_missing_scenario_root_is_an_error() {
    let temp = TempDir::new().unwrap();
    let result = pipeline().run("demo", &temp.path().join("absent")).await;
    assert!(result.is_err());
}
