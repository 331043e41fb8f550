use std::path::PathBuf;

use arbgen::{Artifact, Error, ErrorPolicy, PipelineConfig, RunOptions, RunReport, run_pipeline};
use clap::Args;
use tracing::debug;

use crate::config::{Overrides, resolve};

/// Flags shared by both tools. All of them are optional.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Directory containing the ARB files
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Directory the generated files are written to
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// File name prefix of ARB files
    #[arg(long)]
    pub prefix: Option<String>,

    /// File name suffix of ARB files
    #[arg(long)]
    pub suffix: Option<String>,

    /// TOML file overriding the built-in configuration
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip files that cannot be parsed instead of stopping
    #[arg(long)]
    pub keep_going: bool,

    /// Report what would be written without touching the output directory
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CommonArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            config: self.config.clone(),
            source: self.source.clone(),
            output: self.output.clone(),
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
        }
    }

    pub fn run_options(&self) -> RunOptions {
        let policy = if self.keep_going {
            ErrorPolicy::Skip
        } else {
            ErrorPolicy::Abort
        };
        RunOptions::new()
            .with_error_policy(policy)
            .with_dry_run(self.dry_run)
    }
}

/// Resolves the configuration and runs one pipeline, printing `progress` for
/// every artifact as soon as it is produced.
pub fn run_tool<F>(
    defaults: PipelineConfig,
    args: &CommonArgs,
    progress: F,
) -> Result<RunReport, Error>
where
    F: Fn(&Artifact) -> String,
{
    let config = resolve(defaults, &args.overrides())?;
    debug!(?config, "resolved configuration");
    run_pipeline(&config, &args.run_options(), |artifact| {
        println!("{}", progress(artifact))
    })
}

/// Prints the run summary, or the error and exits with status 1.
pub fn finish(result: Result<RunReport, Error>, dry_run: bool) {
    match result {
        Ok(report) => println!("{}", summary(&report, dry_run)),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn summary(report: &RunReport, dry_run: bool) -> String {
    let count = report.artifacts.len();
    let mut line = if dry_run {
        format!("✅ Dry run: {} file(s) would be written", count)
    } else {
        format!("✅ Wrote {} file(s)", count)
    };
    if !report.skipped.is_empty() {
        line.push_str(&format!(", skipped {}", report.skipped.len()));
    }
    if !report.rejected.is_empty() {
        line.push_str(&format!(", ignored {}", report.rejected.join(", ")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbgen::SkippedFile;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestArgs {
        #[command(flatten)]
        common: CommonArgs,
    }

    #[test]
    fn test_no_arguments_required() {
        let args = TestArgs::try_parse_from(["tool"]).unwrap();
        assert!(args.common.source.is_none());
        assert!(!args.common.keep_going);
        assert_eq!(args.common.run_options(), RunOptions::new());
    }

    #[test]
    fn test_flags_parse() {
        let args = TestArgs::try_parse_from([
            "tool",
            "--source",
            "l10n",
            "-o",
            "res",
            "--keep-going",
            "--dry-run",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.common.source, Some(PathBuf::from("l10n")));
        assert_eq!(args.common.output, Some(PathBuf::from("res")));
        assert_eq!(args.common.verbose, 2);
        let options = args.common.run_options();
        assert_eq!(options.on_file_error, ErrorPolicy::Skip);
        assert!(options.dry_run);
    }

    #[test]
    fn test_summary() {
        let report = RunReport {
            skipped: vec![SkippedFile {
                file_name: "app_de.arb".to_string(),
                reason: "parse error".to_string(),
            }],
            rejected: vec!["app_english.arb".to_string()],
            ..RunReport::default()
        };
        assert_eq!(
            summary(&report, false),
            "✅ Wrote 0 file(s), skipped 1, ignored app_english.arb"
        );
        assert_eq!(
            summary(&RunReport::default(), true),
            "✅ Dry run: 0 file(s) would be written"
        );
    }
}
