use arbgen::PipelineConfig;
use arbgen_cli::{CommonArgs, finish, logging::init_logging, run_tool};
use clap::Parser;

/// Write the runtime configuration keys of every `app_<lang>.arb` to
/// `app_<lang>.json` in the Android assets directory.
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
    let result = run_tool(PipelineConfig::runtime_json(), &args.common, |artifact| {
        let verb = if dry_run { "Would convert" } else { "Converted" };
        format!("{} {} to {}", verb, artifact.source.file_name, artifact.file_name)
    });
    finish(result, dry_run);
}
