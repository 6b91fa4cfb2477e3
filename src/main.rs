//! # Glint - PHP Source to HTML
//!
//! Renders a PHP file as numbered, styled HTML rows.
//!
//! ## Quick Start
//!
//! ```bash
//! # Highlight a whole file
//! cargo run -- path/to/file.php
//!
//! # Show 8 lines either side of line 120
//! cargo run -- path/to/file.php --line 120
//!
//! # Lines 10 to 40 with the stylesheet, focusing line 25
//! cargo run -- path/to/file.php --start 10 --end 40 --focus 25 --styles
//! ```

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glint_core::{Config, Highlighter};

/// Glint - windowed PHP source highlighting to HTML
#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// PHP file to highlight
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Line to extract around; overrides --start, --end and --focus
    #[arg(short, long, allow_negative_numbers = true)]
    line: Option<i64>,

    /// Lines shown either side of --line (1 to 30)
    #[arg(short, long, allow_negative_numbers = true)]
    buffer: Option<i64>,

    /// First line to render
    #[arg(long)]
    start: Option<usize>,

    /// Last line to render
    #[arg(long)]
    end: Option<usize>,

    /// Line to mark as highlighted
    #[arg(long)]
    focus: Option<usize>,

    /// Prepend the bundled stylesheet
    #[arg(short, long)]
    styles: bool,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path)
                .with_context(|| format!("Failed to load config from {}", path.display())),
            None => Ok(Config::load()),
        }
    }
}

/// Highlights the requested part of `args.file`.
fn render(args: &Args, config: &Config) -> anyhow::Result<String> {
    anyhow::ensure!(args.file.exists(), "File not found: {}", args.file.display());

    let highlighter = Highlighter::new();
    let markup = match args.line {
        Some(line) => {
            let buffer = args.buffer.unwrap_or(config.window.buffer);
            highlighter.extract_from_file(&args.file, line, buffer)?
        }
        None => highlighter.highlight_file(&args.file, args.start, args.end, args.focus)?,
    };

    if args.styles || config.output.inline_styles {
        Ok(format!("{}\n{}", highlighter.export_inline_styles(), markup))
    } else {
        Ok(markup)
    }
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting Glint v{}", env!("CARGO_PKG_VERSION"));

    let config = args.load_config()?;
    let output = render(&args, &config)?;
    println!("{output}");

    Ok(())
}
