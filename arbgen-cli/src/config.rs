use std::fs;
use std::path::{Path, PathBuf};

use arbgen::{Allowlist, Error, FilePattern, IdentifierRule, PipelineConfig};
use serde::Deserialize;

/// Overrides read from a TOML file passed with `--config`.
///
/// ```toml
/// source_dir = "lib/l10n"
/// output_dir = "android/app/src/main/res"
/// prefix = "app_"
/// suffix = ".arb"
/// identifier_rule = "length:2"
/// keys = ["btn_cancel"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub source_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub identifier_rule: Option<String>,
    pub keys: Option<Vec<String>>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config_error(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
            .map_err(|e| Error::config_error(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Applies every field that is set on top of `config`.
    ///
    /// A replacement allowlist keeps the metadata marker of the one it replaces.
    pub fn apply(self, mut config: PipelineConfig) -> Result<PipelineConfig, Error> {
        if let Some(source_dir) = self.source_dir {
            config.source_dir = source_dir;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(prefix) = self.prefix {
            config.pattern.prefix = prefix;
        }
        if let Some(suffix) = self.suffix {
            config.pattern.suffix = suffix;
        }
        if let Some(rule) = self.identifier_rule {
            config.identifier_rule = rule.parse::<IdentifierRule>()?;
        }
        if let Some(keys) = self.keys {
            let mut allowlist = Allowlist::new(keys);
            if let Some(marker) = config.allowlist.metadata_marker() {
                allowlist = allowlist.with_metadata_marker(marker);
            }
            config.allowlist = allowlist;
        }
        Ok(config)
    }
}

/// Flag values that override both the defaults and the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

/// Resolves the effective configuration: defaults, then config file, then flags.
pub fn resolve(defaults: PipelineConfig, overrides: &Overrides) -> Result<PipelineConfig, Error> {
    let mut config = match &overrides.config {
        Some(path) => FileConfig::load(path)?.apply(defaults)?,
        None => defaults,
    };
    if let Some(source) = &overrides.source {
        config.source_dir = source.clone();
    }
    if let Some(output) = &overrides.output {
        config.output_dir = output.clone();
    }
    if overrides.prefix.is_some() || overrides.suffix.is_some() {
        config.pattern = FilePattern::new(
            overrides
                .prefix
                .clone()
                .unwrap_or_else(|| config.pattern.prefix.clone()),
            overrides
                .suffix
                .clone()
                .unwrap_or_else(|| config.pattern.suffix.clone()),
        );
    }
    config.validate()?;
    Ok(config)
}
