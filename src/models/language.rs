use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

/// Languages tracked by Augur
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Sequence,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    /// Go programming language
    Go,

    /// TypeScript programming language
    TypeScript,

    /// JavaScript programming language
    JavaScript,

    /// Python programming language
    Python,

    /// Rust programming language
    Rust,
}

impl Language {
    /// File extensions that map to this language
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Go => &["go"],
            Language::TypeScript => &["ts", "tsx"],
            Language::JavaScript => &["js", "jsx", "mjs", "cjs"],
            Language::Python => &["py"],
            Language::Rust => &["rs"],
        }
    }

    /// Look up a language by extension (without the dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        enum_iterator::all::<Language>().find(|lang| lang.extensions().contains(&ext.as_str()))
    }

    /// Classify a path by its extension. Untracked extensions yield `None`.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Whether the language shares the C-style `//` and `/* */` comment syntax
    pub fn uses_c_comments(&self) -> bool {
        !matches!(self, Language::Python)
    }

    /// Get the emoji representation of this language
    pub fn emoji(&self) -> &'static str {
        match self {
            Language::Go => "🐹",
            Language::TypeScript => "📘",
            Language::JavaScript => "🌐",
            Language::Python => "🐍",
            Language::Rust => "🦀",
        }
    }
}
