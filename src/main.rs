mod cli;

use anyhow::Result;
use clap::Parser;
use ebook2txt::Converter;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = cli.output_path()?;
    Converter::new(cli.options()).dispatch(&cli.input, &output, &cli.format_tag())?;

    eprintln!("Converted {} to {}", cli.input.display(), output.display());
    Ok(())
}
