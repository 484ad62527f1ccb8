#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use tsz_cli::args::CliArgs;
use tsz_cli::{driver, reporter::Reporter, tracing_config};

const EXIT_DIAGNOSTICS: i32 = 1;

fn main() -> Result<()> {
    // Only installs a subscriber when TSZ_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let result = driver::run(&args)?;
    tracing::debug!(
        files = result.files.len(),
        classes = result.classes.len(),
        "analysis finished"
    );

    let color = !args.no_color && std::io::stdout().is_terminal();
    let reporter = Reporter::new(color);

    if args.json {
        let json = reporter
            .render_json(&result.classes)
            .context("failed to serialize class info")?;
        println!("{json}");
    } else if !result.classes.is_empty() {
        print!("{}", reporter.render_classes(&result.classes));
    }

    if !result.diagnostics.is_empty() {
        let color = !args.no_color && std::io::stderr().is_terminal();
        let mut diagnostics_reporter = Reporter::new(color);
        eprintln!("{}", diagnostics_reporter.render(&result.diagnostics));
        std::process::exit(EXIT_DIAGNOSTICS);
    }
    Ok(())
}
