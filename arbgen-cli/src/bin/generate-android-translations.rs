use arbgen::PipelineConfig;
use arbgen_cli::{CommonArgs, finish, logging::init_logging, run_tool};
use clap::Parser;

/// Copy the accessibility strings of every `app_<lang>.arb` into
/// `values-<lang>/strings.xml`. Only two-letter language codes are processed.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() {
    let args = Args::parse();
    init_logging(args.common.verbose);

    let dry_run = args.common.dry_run;
    let result = run_tool(PipelineConfig::android_strings(), &args.common, |artifact| {
        let verb = if dry_run { "Would create" } else { "Created" };
        format!(
            "{} translation for {}: {}",
            verb,
            artifact.source.identifier,
            artifact.path.display()
        )
    });
    finish(result, dry_run);
}
