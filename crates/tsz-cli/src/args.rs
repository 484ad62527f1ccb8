use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the tsz-classinfo binary.
#[derive(Parser, Debug)]
#[command(
    name = "tsz-classinfo",
    version,
    about = "Report how TypeScript class fields would be lowered to assignments"
)]
pub struct CliArgs {
    /// Files or directories to analyse. Directories are searched for
    /// `.ts`, `.tsx`, `.mts` and `.cts` files, skipping declaration files.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Print the analysis as JSON.
    #[arg(long)]
    pub json: bool,

    /// Keep class fields as native fields; only report parameter properties
    /// and erased declarations.
    #[arg(long = "disable-es-transforms", alias = "disableESTransforms")]
    pub disable_es_transforms: bool,

    /// JSON file with analysis options, e.g. `{"disableESTransforms": true}`.
    /// Flags given on the command line take precedence.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long = "no-color", alias = "noColor")]
    pub no_color: bool,
}
