//! Reads a family declaration and constructs the variants named on the command line.
//! Each result is printed with the number of the instance it resolved to, so
//! repeated numbers show instances reused from the family's cache.
use anyhow::Context as _;
use clap::Parser;
use noomer_tools::{FamilyConfig, Invocation, Session};
use std::{
    io::{self, IsTerminal as _, Write as _},
    path::PathBuf,
};
use tracing::metadata::LevelFilter;
use tracing_subscriber::{prelude::*, EnvFilter, Registry};

/// Command-line application constructing variants of a declared family.
#[derive(Debug, Parser)]
struct Args {
    /// Verify the declaration file instead of constructing anything.
    #[arg(long, conflicts_with = "invocations")]
    verify_config: bool,
    /// Path to a JSON file with the family declaration.
    #[arg(long, default_value = "family.json")]
    config_file: PathBuf,
    /// Variants to construct, as `Variant` or `Variant=<json>`.
    invocations: Vec<Invocation>,
}

fn main() -> anyhow::Result<()> {
    let args: Args = Args::parse();

    // Human-readable logs on stderr, INFO and above unless RUST_LOG says otherwise.
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(std::env::var("NO_COLOR").is_err() && io::stderr().is_terminal())
        .with_file(false)
        .with_line_number(false)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        );
    tracing::subscriber::set_global_default(Registry::default().with(stderr_log))
        .context("set_global_default()")?;
    tracing::trace!(?args, "Starting");

    tracing::debug!("Loading declaration.");
    let config = FamilyConfig::read(&args.config_file).context("FamilyConfig::read()")?;
    let family = config.build().context("FamilyConfig::build()")?;

    if args.verify_config {
        tracing::info!(
            "Declaration of {} verified: {} variants.",
            family.name(),
            family.variants().count()
        );
        return Ok(());
    }

    let mut session = Session::new(&family);
    let mut out = io::stdout().lock();
    for inv in &args.invocations {
        let (n, instance) = session.invoke(inv).with_context(|| inv.to_string())?;
        writeln!(out, "#{n} {instance:?}")?;
    }
    tracing::info!(
        "{} invocations, {} distinct instances.",
        args.invocations.len(),
        session.distinct()
    );
    Ok(())
}
