//! Line-level heuristics for each tracked language.
//!
//! Every function here is a pure classifier over a single line of text. The
//! TypeScript/JavaScript function detector is deliberately approximate:
//! issue thresholds were tuned against its exact counts, so its margin errors
//! (arrow functions bound through destructuring, `} else if (...) {` lines)
//! are kept as they are.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Language;

static TODO_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\btodo\b").expect("valid todo pattern"));
static FIXME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bfixme\b").expect("valid fixme pattern"));
static HACK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bhack\b").expect("valid hack pattern"));

const JS_DECLARATION_PREFIXES: [&str; 5] = ["function ", "async function ", "const ", "let ", "var "];
const JS_CONTROL_FLOW_PREFIXES: [&str; 5] = ["if ", "while ", "for ", "switch ", "catch "];

/// Technical-debt markers present on one line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebtMarkers {
    pub todo: bool,
    pub fixme: bool,
    pub hack: bool,
}

/// Find TODO/FIXME/HACK as case-insensitive whole words anywhere on the line
pub fn debt_markers(line: &str) -> DebtMarkers {
    DebtMarkers {
        todo: TODO_PATTERN.is_match(line),
        fixme: FIXME_PATTERN.is_match(line),
        hack: HACK_PATTERN.is_match(line),
    }
}

/// Whether the line is a comment in `language`
pub fn is_comment_line(language: Language, line: &str) -> bool {
    let trimmed = line.trim_start();
    if language.uses_c_comments() {
        trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*')
    } else {
        trimmed.starts_with('#')
    }
}

/// Whether the line is an import statement in `language`
pub fn is_import_line(language: Language, line: &str) -> bool {
    if is_comment_line(language, line) {
        return false;
    }

    let trimmed = line.trim_start();
    match language {
        Language::Go => trimmed.starts_with("import ") && !trimmed.contains("//"),
        Language::TypeScript | Language::JavaScript => {
            trimmed.starts_with("import ") || trimmed.starts_with("import{")
        }
        Language::Python => trimmed.starts_with("import ") || trimmed.starts_with("from "),
        Language::Rust => trimmed.starts_with("use "),
    }
}

/// Whether the line opens a function or method definition in `language`
pub fn is_function_line(language: Language, line: &str) -> bool {
    let trimmed = line.trim_start();
    match language {
        Language::Go => trimmed.starts_with("func "),
        Language::Python => trimmed.starts_with("def "),
        Language::Rust => trimmed.starts_with("fn ") || trimmed.starts_with("pub fn "),
        Language::TypeScript | Language::JavaScript => is_js_function_line(trimmed),
    }
}

fn is_js_function_line(trimmed: &str) -> bool {
    let has_paren = trimmed.contains('(');

    let declared = JS_DECLARATION_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix));
    if declared && has_paren && (trimmed.contains("=>") || trimmed.contains('{')) {
        return true;
    }

    has_paren
        && trimmed.contains('{')
        && !JS_CONTROL_FLOW_PREFIXES
            .iter()
            .any(|keyword| trimmed.starts_with(keyword))
}

/// Candidate test-file names for a source file of `language`
pub fn test_file_names(language: Language, file_name: &str) -> Vec<String> {
    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) => (stem, ext),
        None => return Vec::new(),
    };

    match language {
        Language::Go => vec![format!("{stem}_test.{ext}")],
        Language::Python => vec![format!("test_{stem}.{ext}"), format!("{stem}_test.{ext}")],
        Language::TypeScript | Language::JavaScript => {
            vec![format!("{stem}.test.{ext}"), format!("{stem}.spec.{ext}")]
        }
        Language::Rust => vec![format!("{stem}_test.{ext}"), format!("{stem}_tests.{ext}")],
    }
}

/// Whether the relative path names a test file in `language`
pub fn is_test_file(language: Language, relative_path: &str) -> bool {
    let file_name = relative_path.rsplit('/').next().unwrap_or(relative_path);
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name);

    match language {
        Language::Go => stem.ends_with("_test"),
        Language::Python => stem.starts_with("test_") || stem.ends_with("_test"),
        Language::TypeScript | Language::JavaScript => {
            stem.ends_with(".test") || stem.ends_with(".spec")
        }
        Language::Rust => {
            stem.ends_with("_test")
                || stem.ends_with("_tests")
                || relative_path.starts_with("tests/")
                || relative_path.contains("/tests/")
        }
    }
}
