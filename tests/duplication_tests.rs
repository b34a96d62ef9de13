use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::Path;
use tempfile::TempDir;

use augur::config::DuplicationConfig;
use augur::models::{DuplicateBlock, DuplicateResult, DuplicationSummary, FileLocation, Language};
use augur::tools::duplication::is_tool_missing;
use augur::tools::{parse_dupl_output, parse_jscpd_report, DuplicationDetector};

fn location(path: &str, start_line: usize, end_line: usize) -> FileLocation {
    FileLocation {
        path: path.to_string(),
        start_line,
        end_line,
    }
}

#[test]
fn test_trailing_header_closes_pending_locations() {
    let output = "/scenario/api/a.go:10-20\n/scenario/api/b.go:30-40\nfound 2 clones\n";
    let blocks = parse_dupl_output(output, Path::new("/scenario"));

    assert_eq!(blocks.len(), 1);
    assert_eq!(
        blocks[0].locations,
        vec![location("api/a.go", 10, 20), location("api/b.go", 30, 40)]
    );
    assert_eq!(blocks[0].lines, 11);
}

#[rstest]
#[case(2)]
#[case(3)]
#[case(5)]
fn test_header_owns_following_locations(#[case] clones: usize) {
    let mut output = format!("found {} clones:\n", clones);
    for i in 0..clones {
        output.push_str(&format!("  loc {}: /root/api/f{}.go:{},{}\n", i + 1, i, 5, 9 + i));
    }

    let blocks = parse_dupl_output(&output, Path::new("/root"));

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].locations.len(), clones);
    // first location only: 9 - 5 + 1
    assert_eq!(blocks[0].lines, 5);
    assert_eq!(blocks[0].locations[1].path, "api/f1.go");
}

#[test]
fn test_multiple_groups_and_noise() {
    let output = "\
found 2 clones:
  api/a.go:1,10
  api/b.go:3,12

something unrelated
found 2 clones:
  api/c.go:20,25
  api/d.go:40,45

Found total 2 clone groups.
";
    let blocks = parse_dupl_output(output, Path::new("/scenario"));

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].lines, 10);
    assert_eq!(blocks[1].lines, 6);
    assert_eq!(blocks[1].locations[0].path, "api/c.go");
}

#[test]
fn test_header_owns_locations_beyond_its_count() {
    let output = "\
found 2 clones:
/s/a.go:1,5
/s/b.go:1,5
/s/c.go:1,5
found 2 clones:
/s/d.go:10,20
/s/e.go:10,20
";
    let blocks = parse_dupl_output(output, Path::new("/s"));

    assert_eq!(blocks.len(), 2);
    assert_eq!(
        blocks[0].locations,
        vec![location("a.go", 1, 5), location("b.go", 1, 5), location("c.go", 1, 5)]
    );
    assert_eq!(
        blocks[1].locations,
        vec![location("d.go", 10, 20), location("e.go", 10, 20)]
    );
    assert_eq!(blocks[1].lines, 11);
}

#[test]
fn test_trailing_headers_over_several_groups() {
    let output = "\
api/a.go:1-4
api/b.go:1-4
found 2 clones
api/c.go:8-9
api/d.go:8-9
found 2 clones
";
    let blocks = parse_dupl_output(output, Path::new("/scenario"));

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].locations[0].path, "api/a.go");
    assert_eq!(blocks[1].locations[0].path, "api/c.go");
}

#[test]
fn test_single_location_groups_are_dropped() {
    let output = "found 1 clone\napi/a.go:1,10\n";
    assert!(parse_dupl_output(output, Path::new("/scenario")).is_empty());
    assert!(parse_dupl_output("", Path::new("/scenario")).is_empty());
}

#[test]
fn test_parse_jscpd_report() {
    let json = r#"{
        "duplicates": [
            {
                "format": "typescript",
                "lines": 12,
                "tokens": 80,
                "firstFile": {"name": "/scenario/ui/src/a.ts", "start": 1, "end": 12},
                "secondFile": {"name": "ui/src/b.ts", "start": 20, "end": 31}
            },
            {
                "firstFile": {"name": "/scenario/ui/src/c.js", "start": 5, "end": 9},
                "secondFile": {"name": "/scenario/ui/src/d.js", "start": 5, "end": 9}
            }
        ],
        "statistics": {}
    }"#;

    let blocks = parse_jscpd_report(json, Path::new("/scenario"));

    assert_eq!(blocks.len(), 2);
    assert_eq!(
        blocks[0],
        DuplicateBlock {
            locations: vec![location("ui/src/a.ts", 1, 12), location("ui/src/b.ts", 20, 31)],
            lines: 12,
            tokens: Some(80),
        }
    );
    assert_eq!(blocks[1].lines, 5);
    assert_eq!(blocks[1].tokens, None);
}

#[rstest]
#[case("")]
#[case("not json")]
#[case("{\"duplicates\": [{\"firstFile\": 3}]}")]
fn test_malformed_jscpd_report_is_empty(#[case] json: &str) {
    assert!(parse_jscpd_report(json, Path::new("/scenario")).is_empty());
}

#[test]
fn test_report_without_duplicates_is_empty() {
    assert!(parse_jscpd_report("{}", Path::new("/scenario")).is_empty());
}

#[test]
fn test_summary_totals_and_per_file_lines() {
    let blocks = vec![
        DuplicateBlock::new(vec![location("a.go", 1, 10), location("b.go", 1, 10)], None),
        DuplicateBlock::new(
            vec![
                location("a.go", 50, 54),
                location("c.go", 1, 5),
                location("d.go", 7, 11),
            ],
            None,
        ),
    ];
    let summary = DuplicationSummary::new("dupl", blocks);

    assert_eq!(summary.total_duplicate_lines, 10 * 2 + 5 * 3);
    let per_file = summary.lines_per_file();
    assert_eq!(per_file["a.go"], 15);
    assert_eq!(per_file["b.go"], 10);
    assert_eq!(per_file["d.go"], 5);
}

#[rstest]
#[case("npm ERR! could not determine executable to run", true)]
#[case("sh: jscpd: command not found", true)]
#[case("npm ERR! 404 Not Found - GET https://registry.npmjs.org/jscpd", true)]
#[case("Error: out of memory", false)]
fn test_tool_missing_patterns(#[case] stderr: &str, #[case] expected: bool) {
    assert_eq!(is_tool_missing(stderr), expected);
}

#[tokio::test]
async fn test_missing_go_detector_is_skipped() {
    let temp = TempDir::new().unwrap();
    let config = DuplicationConfig {
        go_executable: "augur-test-no-such-dupl".to_string(),
        ..Default::default()
    };
    let detector = DuplicationDetector::new(temp.path(), config);

    let result = detector.detect(Language::Go, &["api/a.go".to_string()]).await;

    assert!(result.is_skipped());
    assert!(result.skip_reason().unwrap().contains("not installed"));
}

#[tokio::test]
async fn test_missing_package_runner_is_skipped() {
    let temp = TempDir::new().unwrap();
    let config = DuplicationConfig {
        package_runner: "augur-test-no-such-npx".to_string(),
        ..Default::default()
    };
    let detector = DuplicationDetector::new(temp.path(), config);

    let result = detector
        .detect(Language::TypeScript, &["ui/src/a.ts".to_string()])
        .await;

    assert!(result.skip_reason().unwrap().contains("not installed"));
}

#[rstest]
#[case(Language::Python)]
#[case(Language::Rust)]
#[tokio::test]
async fn test_unsupported_languages_are_skipped(#[case] language: Language) {
    let temp = TempDir::new().unwrap();
    let detector = DuplicationDetector::new(temp.path(), DuplicationConfig::default());

    let result = detector.detect(language, &["x".to_string()]).await;

    assert!(result.skip_reason().unwrap().contains("not implemented"));
}

#[test]
fn test_result_serializes_with_status_tag() {
    let value = serde_json::to_value(DuplicateResult::skipped("no go files")).unwrap();
    assert_eq!(value["status"], "skipped");
    assert_eq!(value["reason"], "no go files");
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
async fn test_dupl_output_becomes_analyzed_result() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let bin = TempDir::new().unwrap();
    let script = format!(
        r#"echo "$*" > "{log}"
echo "found 2 clones:"
echo "  loc 1: {root}/api/a.go:10,20"
echo "  loc 2: {root}/api/b.go:30,40"
echo ""
echo "Found total 1 clone groups.""#,
        log = bin.path().join("args.log").display(),
        root = root.display()
    );
    let config = DuplicationConfig {
        go_executable: fake_tool(bin.path(), "dupl", &script),
        ..Default::default()
    };

    let result = DuplicationDetector::new(root, config)
        .detect(Language::Go, &["api/a.go".to_string(), "api/b.go".to_string()])
        .await;

    let summary = match result {
        DuplicateResult::Analyzed(summary) => summary,
        other => panic!("expected an analyzed result, got {:?}", other),
    };
    assert_eq!(summary.blocks.len(), 1);
    assert_eq!(
        summary.blocks[0].locations,
        vec![location("api/a.go", 10, 20), location("api/b.go", 30, 40)]
    );
    assert_eq!(summary.total_duplicate_lines, 22);

    let args = std::fs::read_to_string(bin.path().join("args.log")).unwrap();
    assert!(args.starts_with("-t 15 "));
}

#[cfg(unix)]
#[tokio::test]
async fn test_dupl_timeout_is_skipped() {
    let temp = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    let config = DuplicationConfig {
        go_executable: fake_tool(bin.path(), "dupl", "sleep 10"),
        timeout_secs: 1,
        ..Default::default()
    };

    let result = DuplicationDetector::new(temp.path(), config)
        .detect(Language::Go, &["api/a.go".to_string()])
        .await;

    let reason = result.skip_reason().expect("timeout should skip");
    assert!(reason.contains("timed out after 1s"), "unexpected reason: {}", reason);
}
