//! Source directory scanning.
//!
//! Input files are named `<prefix><identifier><suffix>`, e.g. `app_fr.arb`.
//! The identifier (usually a language code) names the output artifact.

use std::{
    fmt::{Display, Formatter},
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use tracing::debug;
use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// File name pattern of pipeline inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePattern {
    pub prefix: String,
    pub suffix: String,
}

impl FilePattern {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Strips prefix and suffix from `file_name`.
    ///
    /// Returns `None` when either is missing or nothing remains in between.
    ///
    /// ```rust
    /// use arbgen::scan::FilePattern;
    /// let pattern = FilePattern::new("app_", ".arb");
    /// assert_eq!(pattern.identifier("app_fr.arb"), Some("fr"));
    /// assert_eq!(pattern.identifier("app_english.arb"), Some("english"));
    /// assert_eq!(pattern.identifier("messages_fr.arb"), None);
    /// ```
    pub fn identifier<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        let rest = file_name
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())?;
        (!rest.is_empty()).then_some(rest)
    }
}

/// Which identifiers a pipeline accepts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IdentifierRule {
    #[default]
    Any,
    /// Exactly this many characters, e.g. two-letter language codes.
    Length(usize),
    /// A well-formed BCP 47 language identifier (`fr`, `pt-BR`, `zh_Hant`).
    LanguageTag,
}

impl IdentifierRule {
    pub fn accepts(&self, identifier: &str) -> bool {
        match self {
            IdentifierRule::Any => true,
            IdentifierRule::Length(len) => identifier.chars().count() == *len,
            IdentifierRule::LanguageTag => identifier
                .replace('_', "-")
                .parse::<LanguageIdentifier>()
                .is_ok(),
        }
    }
}

impl Display for IdentifierRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifierRule::Any => write!(f, "any"),
            IdentifierRule::Length(len) => write!(f, "length:{}", len),
            IdentifierRule::LanguageTag => write!(f, "language-tag"),
        }
    }
}

/// Parses `any`, `length:N` or `language-tag`.
impl FromStr for IdentifierRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if let Some(len) = normalized.strip_prefix("length:") {
            return match len.trim().parse::<usize>() {
                Ok(len) if len > 0 => Ok(IdentifierRule::Length(len)),
                _ => Err(Error::config_error(format!(
                    "invalid identifier length in `{}`",
                    s
                ))),
            };
        }
        match normalized.replace('_', "-").as_str() {
            "any" => Ok(IdentifierRule::Any),
            "language-tag" | "langid" => Ok(IdentifierRule::LanguageTag),
            _ => Err(Error::config_error(format!(
                "unknown identifier rule `{}`. Supported rules: any, length:N, language-tag",
                s
            ))),
        }
    }
}

/// One input file accepted by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub file_name: String,
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanOutcome {
    /// Files to process, sorted by file name.
    pub matched: Vec<SourceFile>,
    /// File names that match the pattern but whose identifier was rejected.
    pub rejected: Vec<String>,
}

/// Lists the files of `dir` (not recursive) that match `pattern`.
///
/// Fails with [`Error::Scan`] when the directory cannot be read.
pub fn scan_dir(
    dir: &Path,
    pattern: &FilePattern,
    rule: &IdentifierRule,
) -> Result<ScanOutcome, Error> {
    let scan_error = |source: std::io::Error| Error::Scan {
        path: dir.to_path_buf(),
        source,
    };
    let mut outcome = ScanOutcome::default();

    for dent in fs::read_dir(dir).map_err(scan_error)? {
        let dent = dent.map_err(scan_error)?;
        // Non UTF-8 names cannot match a UTF-8 pattern.
        let Ok(file_name) = dent.file_name().into_string() else {
            continue;
        };
        let Some(identifier) = pattern.identifier(&file_name).map(str::to_string) else {
            continue;
        };
        let path = dent.path();
        if !path.is_file() {
            continue;
        }
        if !rule.accepts(&identifier) {
            debug!(file = %file_name, %identifier, rule = %rule, "identifier rejected");
            outcome.rejected.push(file_name);
            continue;
        }
        outcome.matched.push(SourceFile {
            path,
            file_name,
            identifier,
        });
    }

    outcome.matched.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    outcome.rejected.sort();
    Ok(outcome)
}
