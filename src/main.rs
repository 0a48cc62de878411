use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use cell_placeholder_fill::{Context, ResolveOptions, Resolver};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Fill `${key}` / `${root.attr}` markers in template text.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Template cell texts; each is resolved and printed on its own line.
    #[arg(required = true)]
    text: Vec<String>,
    /// Context as an inline JSON object.
    #[arg(long, conflicts_with = "context_file")]
    context: Option<String>,
    /// Read the context JSON object from a file.
    #[arg(long)]
    context_file: Option<PathBuf>,
    /// Resolver options as a JSON file (`chained_paths`, `max_passes`).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Accept `${root.a.b}` chains (overrides the config file).
    #[arg(long)]
    chained: bool,
    /// Extra re-scan passes allowed per phase (overrides the config file).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_passes: Option<u32>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    // Build options: config file first, then flags.
    let mut opts = match &args.config {
        Some(p) => serde_json::from_str::<ResolveOptions>(&std::fs::read_to_string(p)?)?,
        None => ResolveOptions::default(),
    };
    if args.chained {
        opts.chained_paths = true;
    }
    if let Some(n) = args.max_passes.and_then(|n| NonZeroUsize::new(n as usize)) {
        opts.max_passes = n;
    }

    let ctx = match (&args.context, &args.context_file) {
        (Some(json), _) => Context::from_json_str(json)?,
        (None, Some(p)) => Context::from_json_str(&std::fs::read_to_string(p)?)?,
        (None, None) => Context::new(),
    };
    tracing::debug!(keys = ctx.len(), ?opts, "context loaded");

    let resolver = Resolver::new(opts);
    for text in &args.text {
        println!("{}", resolver.resolve(text, &ctx)?);
    }
    Ok(())
}
