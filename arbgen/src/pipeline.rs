//! Scan, filter and emit: one pipeline run.
//!
//! A run lists the matching ARB files, loads each one, projects it onto the
//! configured [`Allowlist`], renders it in the configured [`OutputFormat`] and
//! writes it under the output directory. Files are handled one at a time and
//! independently of each other.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::{
    error::Error,
    filter::Allowlist,
    formats::{ArbRecord, OutputFormat},
    output::{OutputLayout, write_artifact},
    scan::{FilePattern, IdentifierRule, SourceFile, scan_dir},
    traits::Parser,
};

pub const DEFAULT_SOURCE_DIR: &str = "lib/l10n";
pub const DEFAULT_ANDROID_RES_DIR: &str = "android/app/src/main/res";
pub const DEFAULT_ANDROID_ASSETS_DIR: &str = "android/app/src/main/assets";
pub const DEFAULT_PREFIX: &str = "app_";
pub const DEFAULT_SUFFIX: &str = ".arb";

/// Everything a pipeline needs to know about its inputs and outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub pattern: FilePattern,
    pub identifier_rule: IdentifierRule,
    pub allowlist: Allowlist,
    pub format: OutputFormat,
    pub layout: OutputLayout,
}

impl PipelineConfig {
    /// Accessibility strings into `values-<lang>/strings.xml`, two-letter
    /// language codes only.
    pub fn android_strings() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            output_dir: PathBuf::from(DEFAULT_ANDROID_RES_DIR),
            pattern: FilePattern::new(DEFAULT_PREFIX, DEFAULT_SUFFIX),
            identifier_rule: IdentifierRule::Length(2),
            allowlist: Allowlist::accessibility_strings(),
            format: OutputFormat::AndroidStrings,
            layout: OutputLayout::android_values(),
        }
    }

    /// Runtime configuration keys into `app_<lang>.json` assets.
    pub fn runtime_json() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            output_dir: PathBuf::from(DEFAULT_ANDROID_ASSETS_DIR),
            pattern: FilePattern::new(DEFAULT_PREFIX, DEFAULT_SUFFIX),
            identifier_rule: IdentifierRule::Any,
            allowlist: Allowlist::runtime_config(),
            format: OutputFormat::JsonMap,
            layout: OutputLayout::json_assets(),
        }
    }

    pub fn with_source_dir(mut self, source_dir: impl Into<PathBuf>) -> Self {
        self.source_dir = source_dir.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_pattern(mut self, pattern: FilePattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_identifier_rule(mut self, identifier_rule: IdentifierRule) -> Self {
        self.identifier_rule = identifier_rule;
        self
    }

    pub fn with_allowlist(mut self, allowlist: Allowlist) -> Self {
        self.allowlist = allowlist;
        self
    }

    /// Rejects configurations that would match every file or emit nothing.
    pub fn validate(&self) -> Result<(), Error> {
        if self.pattern.prefix.is_empty() && self.pattern.suffix.is_empty() {
            return Err(Error::config_error(
                "file pattern needs a prefix or a suffix",
            ));
        }
        if self.allowlist.is_empty() {
            return Err(Error::config_error("allowlist is empty"));
        }
        Ok(())
    }
}

/// What to do when an input file cannot be parsed or rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop the run at the first bad file.
    #[default]
    Abort,
    /// Log a warning, record the file as skipped and continue.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunOptions {
    pub on_file_error: ErrorPolicy,
    /// Load, filter and render, but write nothing.
    pub dry_run: bool,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error_policy(mut self, on_file_error: ErrorPolicy) -> Self {
        self.on_file_error = on_file_error;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// One produced (or, in a dry run, planned) output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub source: SourceFile,
    pub path: PathBuf,
    pub file_name: String,
    pub keys: Vec<String>,
    pub written: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub file_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunReport {
    pub artifacts: Vec<Artifact>,
    pub skipped: Vec<SkippedFile>,
    /// Inputs whose identifier the pipeline's rule rejected.
    pub rejected: Vec<String>,
}

/// Runs the pipeline described by `config`.
///
/// `on_artifact` is called right after each artifact is produced, so callers
/// can report progress file by file.
///
/// # Errors
///
/// Fails on an unreadable source directory, on any write failure, and, under
/// [`ErrorPolicy::Abort`], on the first file that cannot be parsed or rendered.
/// Per-file failures are wrapped in [`Error::File`].
pub fn run_pipeline<F>(
    config: &PipelineConfig,
    options: &RunOptions,
    mut on_artifact: F,
) -> Result<RunReport, Error>
where
    F: FnMut(&Artifact),
{
    config.validate()?;

    let scan = scan_dir(&config.source_dir, &config.pattern, &config.identifier_rule)?;
    info!(
        source = %config.source_dir.display(),
        format = %config.format,
        matched = scan.matched.len(),
        rejected = scan.rejected.len(),
        "scanned source directory"
    );

    let mut report = RunReport {
        rejected: scan.rejected,
        ..RunReport::default()
    };

    for source in scan.matched {
        let file_name = source.file_name.clone();
        match process_file(config, options, source) {
            Ok(artifact) => {
                on_artifact(&artifact);
                report.artifacts.push(artifact);
            }
            Err(err) if options.on_file_error == ErrorPolicy::Skip && err.is_content_error() => {
                warn!(file = %file_name, error = %err, "skipping file");
                report.skipped.push(SkippedFile {
                    file_name,
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(Error::in_file(file_name, err)),
        }
    }

    Ok(report)
}

fn process_file(
    config: &PipelineConfig,
    options: &RunOptions,
    source: SourceFile,
) -> Result<Artifact, Error> {
    let record = ArbRecord::read_from(&source.path)?;
    if let Some(locale) = record.locale() {
        if !same_locale(locale, &source.identifier) {
            warn!(
                file = %source.file_name,
                locale,
                identifier = %source.identifier,
                "@@locale does not match the file name; using the file name"
            );
        }
    }

    let filtered = config.allowlist.filter(&record);
    let contents = config.format.render(&filtered)?;
    let target = config
        .layout
        .target(&config.output_dir, &config.pattern, &source.identifier);

    let path = if options.dry_run {
        target.path()
    } else {
        write_artifact(&target.dir, &target.file_name, &contents)?
    };
    debug!(
        file = %source.file_name,
        output = %path.display(),
        keys = filtered.len(),
        dry_run = options.dry_run,
        "processed file"
    );

    Ok(Artifact {
        keys: filtered.keys().map(str::to_string).collect(),
        file_name: target.file_name,
        written: !options.dry_run,
        path,
        source,
    })
}

fn same_locale(locale: &str, identifier: &str) -> bool {
    let normalize = |s: &str| s.replace('-', "_").to_ascii_lowercase();
    normalize(locale) == normalize(identifier)
}
