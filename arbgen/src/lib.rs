#![forbid(unsafe_code)]
//! Regenerates app resources from Flutter ARB localization bundles.
//!
//! Two pipelines share the same three stages: scan a directory for
//! `<prefix><lang><suffix>` files, project each ARB record onto a fixed
//! allowlist of keys, and write one artifact per language.
//!
//! - **Android strings**: accessibility strings into
//!   `values-<lang>/strings.xml`.
//! - **Runtime JSON**: runtime configuration keys into `app_<lang>.json`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use arbgen::{PipelineConfig, RunOptions, run_pipeline};
//!
//! let config = PipelineConfig::android_strings()
//!     .with_source_dir("lib/l10n")
//!     .with_output_dir("android/app/src/main/res");
//! let report = run_pipeline(&config, &RunOptions::new(), |artifact| {
//!     println!("Created translation for {}: {}", artifact.source.identifier, artifact.path.display());
//! })?;
//! assert!(report.skipped.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod filter;
pub mod formats;
pub mod output;
pub mod pipeline;
pub mod scan;
pub mod traits;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    filter::{Allowlist, FilteredRecord},
    formats::{ArbRecord, OutputFormat},
    output::OutputLayout,
    pipeline::{
        Artifact, ErrorPolicy, PipelineConfig, RunOptions, RunReport, SkippedFile, run_pipeline,
    },
    scan::{FilePattern, IdentifierRule, SourceFile},
};
