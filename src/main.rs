use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use handoff::{util, Config, Snapshotter};

/// Archive a dated copy of HANDOFF.md and refresh its header line
#[derive(Debug, Parser)]
#[command(name = "handoff-snapshot", version)]
struct Cli {
    /// Directory holding HANDOFF.md and logs/
    ///
    /// Defaults to the parent of the directory containing this binary.
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Log each step to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries the confirmation line
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let root = match cli.root {
        Some(root) => root,
        None => util::root_from_exe()?,
    };
    tracing::debug!(root = %root.display(), "Resolved root directory");

    let config = Config::load(&root);
    let snapshotter = Snapshotter::new(config);

    if let Some(report) = snapshotter
        .run(&root)
        .with_context(|| format!("Snapshot failed under {}", root.display()))?
    {
        println!("Wrote snapshot: {}", report.snapshot_path.display());
    }

    Ok(())
}
