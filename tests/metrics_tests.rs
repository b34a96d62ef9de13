use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

use augur::metrics::heuristics::{
    debt_markers, is_comment_line, is_function_line, is_import_line, is_test_file, test_file_names,
};
use augur::metrics::{aggregate_metrics, analyze_content, CodeMetricsAnalyzer};
use augur::models::{CodeMetrics, Language};

#[test]
fn test_empty_file_list_gives_zero_aggregate() {
    let temp = TempDir::new().unwrap();
    let metrics = CodeMetricsAnalyzer::new(temp.path()).analyze(Language::Go, &[], true);

    assert_eq!(metrics.files_analyzed, 0);
    assert_eq!(metrics.todo_count, 0);
    assert_eq!(metrics.total_functions, 0);
    assert_eq!(metrics.avg_imports_per_file, 0.0);
    assert_eq!(metrics.avg_functions_per_file, 0.0);
    assert!(metrics.files.is_empty());
    assert_eq!(aggregate_metrics(&[]), CodeMetrics::default());
}

#[test]
fn test_go_debt_markers() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("api")).unwrap();
    fs::write(
        temp.path().join("api/x.go"),
        "package x\n\n// TODO: x\n// FIXME: y\nfunc X() {}\n",
    )
    .unwrap();

    let metrics = CodeMetricsAnalyzer::new(temp.path()).analyze(
        Language::Go,
        &["api/x.go".to_string()],
        false,
    );

    assert_eq!(metrics.files_analyzed, 1);
    assert_eq!(metrics.todo_count, 1);
    assert_eq!(metrics.fixme_count, 1);
    assert_eq!(metrics.hack_count, 0);
    assert_eq!(metrics.total_functions, 1);
    assert_eq!(metrics.language, Some(Language::Go));
}

#[test]
fn test_debt_counts_one_per_line_per_category() {
    let content = "\
// TODO todo TODO
// fixme and a hack
x := 1 // Hack: TODO later
// todos and hacky code are not markers
// mastodon
";
    let metrics = analyze_content(Language::Go, "a.go", content);

    let expected_todo = content.lines().filter(|l| debt_markers(l).todo).count();
    let expected_fixme = content.lines().filter(|l| debt_markers(l).fixme).count();
    let expected_hack = content.lines().filter(|l| debt_markers(l).hack).count();

    assert_eq!(metrics.todo_count, expected_todo);
    assert_eq!(metrics.fixme_count, expected_fixme);
    assert_eq!(metrics.hack_count, expected_hack);
    assert_eq!((metrics.todo_count, metrics.fixme_count, metrics.hack_count), (2, 1, 2));
}

#[test]
fn test_unreadable_files_are_skipped() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("ok.py"), "import os\n").unwrap();

    let metrics = CodeMetricsAnalyzer::new(temp.path()).analyze(
        Language::Python,
        &["ok.py".to_string(), "missing.py".to_string()],
        true,
    );

    assert_eq!(metrics.files_analyzed, 1);
    assert_eq!(metrics.total_imports, 1);
    assert_eq!(metrics.files.len(), 1);
    assert_eq!(metrics.files[0].path, "ok.py");
}

#[test]
fn test_aggregate_averages_and_maxima() {
    let a = analyze_content(Language::Python, "a.py", "import a\nimport b\ndef f():\n    pass\n");
    let b = analyze_content(Language::Python, "b.py", "def g():\n    pass\ndef h():\n    pass\n");

    let aggregate = aggregate_metrics(&[a, b]);
    assert_eq!(aggregate.files_analyzed, 2);
    assert_eq!(aggregate.total_imports, 2);
    assert_eq!(aggregate.max_imports_per_file, 2);
    assert_eq!(aggregate.avg_imports_per_file, 1.0);
    assert_eq!(aggregate.total_functions, 3);
    assert_eq!(aggregate.max_functions_per_file, 2);
    assert_eq!(aggregate.avg_functions_per_file, 1.5);
}

#[test]
fn test_comment_ratio() {
    let content = "// one\n// two\n\nfunc a() {}\nfunc b() {}\nvar x = 1\nvar y = 2\n";
    let metrics = analyze_content(Language::Go, "a.go", content);

    assert_eq!(metrics.comment_lines, 2);
    assert_eq!(metrics.code_lines, 4);
    assert_eq!(metrics.comment_ratio, 0.5);

    let only_comments = analyze_content(Language::Go, "b.go", "// nothing\n");
    assert_eq!(only_comments.comment_ratio, 0.0);
}

#[rstest]
#[case(Language::Go, "import \"fmt\"", true)]
#[case(Language::Go, "import \"fmt\" // logging", false)]
#[case(Language::Go, "// import \"fmt\"", false)]
#[case(Language::TypeScript, "import { a } from './a';", true)]
#[case(Language::JavaScript, "import{a} from './a';", true)]
#[case(Language::JavaScript, "const a = require('a');", false)]
#[case(Language::Python, "import os", true)]
#[case(Language::Python, "from os import path", true)]
#[case(Language::Python, "# import os", false)]
#[case(Language::Rust, "use std::fs;", true)]
#[case(Language::Rust, "pub use crate::a;", false)]
fn test_import_detection(#[case] language: Language, #[case] line: &str, #[case] expected: bool) {
    assert_eq!(is_import_line(language, line), expected);
}

#[rstest]
#[case(Language::Go, "func main() {", true)]
#[case(Language::Go, "func (s *Server) Start() error {", true)]
#[case(Language::Python, "    def method(self):", true)]
#[case(Language::Python, "async def main():", false)]
#[case(Language::Rust, "fn helper() {", true)]
#[case(Language::Rust, "pub fn api() {", true)]
#[case(Language::Rust, "pub(crate) fn internal() {", false)]
#[case(Language::TypeScript, "function render() {", true)]
#[case(Language::TypeScript, "const onClick = () => setOpen(true);", true)]
#[case(Language::TypeScript, "  handleSubmit(event) {", true)]
#[case(Language::TypeScript, "if (ready) {", false)]
#[case(Language::TypeScript, "for (const x of xs) {", false)]
#[case(Language::JavaScript, "const total = 1;", false)]
#[case(Language::JavaScript, "// helper(a) {", true)]
fn test_function_detection(#[case] language: Language, #[case] line: &str, #[case] expected: bool) {
    assert_eq!(is_function_line(language, line), expected);
}

#[rstest]
#[case(Language::Go, "// note", true)]
#[case(Language::TypeScript, "/* block", true)]
#[case(Language::Rust, " * continued", true)]
#[case(Language::Python, "# note", true)]
#[case(Language::Python, "// not python", false)]
#[case(Language::Go, "x := 1 // trailing", false)]
fn test_comment_detection(#[case] language: Language, #[case] line: &str, #[case] expected: bool) {
    assert_eq!(is_comment_line(language, line), expected);
}

#[rstest]
#[case(Language::Go, "server.go", vec!["server_test.go"])]
#[case(Language::Python, "views.py", vec!["test_views.py", "views_test.py"])]
#[case(Language::TypeScript, "App.tsx", vec!["App.test.tsx", "App.spec.tsx"])]
#[case(Language::Rust, "parser.rs", vec!["parser_test.rs", "parser_tests.rs"])]
fn test_test_file_names(#[case] language: Language, #[case] file: &str, #[case] expected: Vec<&str>) {
    assert_eq!(test_file_names(language, file), expected);
}

#[rstest]
#[case(Language::Go, "api/server_test.go", true)]
#[case(Language::Go, "api/server.go", false)]
#[case(Language::Python, "cli/test_main.py", true)]
#[case(Language::JavaScript, "ui/src/a.spec.js", true)]
#[case(Language::Rust, "tests/parser.rs", true)]
#[case(Language::Rust, "cli/tests/parser.rs", true)]
#[case(Language::Rust, "cli/src/parser.rs", false)]
fn test_is_test_file(#[case] language: Language, #[case] path: &str, #[case] expected: bool) {
    assert_eq!(is_test_file(language, path), expected);
}

#[test]
fn test_non_utf8_content_is_decoded_lossily() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bin.go"), b"// TODO \xff\xfe\nfunc A() {}\n").unwrap();

    let metrics = CodeMetricsAnalyzer::new(temp.path())
        .analyze_file(Language::Go, "bin.go")
        .unwrap();
    assert_eq!(metrics.todo_count, 1);
    assert_eq!(metrics.function_count, 1);
}
