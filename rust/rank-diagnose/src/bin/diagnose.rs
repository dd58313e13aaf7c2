use anyhow::Result;
use clap::Parser;
use rank_diagnose::DiagnoseCli;
use tracing_subscriber::{EnvFilter, fmt};

pub fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = DiagnoseCli::parse();
    print!("{}", cli.run()?);
    Ok(())
}
