use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use academic_humanizer::{HumanizeOptions, Humanizer, HumanizerConfig};

#[derive(Parser)]
#[command(
    name = "academic-humanizer",
    about = "Rewrite prose in a more academic register",
    version
)]
struct Cli {
    /// File paths to rewrite (reads stdin if none provided)
    files: Vec<String>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<String>,

    /// Enable passive-voice rewrites
    #[arg(long)]
    passive: bool,

    /// Enable synonym substitution
    #[arg(long)]
    synonyms: bool,

    /// Seed for deterministic output
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the dependency parser
    #[arg(long)]
    no_parser: bool,

    /// Print JSON with input/output statistics
    #[arg(long)]
    json: bool,

    /// Verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct Stats {
    input_words: usize,
    output_words: usize,
    input_chars: usize,
    output_chars: usize,
}

#[derive(Debug, Serialize)]
struct Report {
    text: String,
    stats: Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => HumanizerConfig::load(path)?,
        None => HumanizerConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if cli.no_parser {
        config.use_parser = false;
    }
    let options = HumanizeOptions {
        enable_passive: cli.passive,
        enable_synonyms: cli.synonyms,
    };
    let humanizer = Humanizer::new(config);

    if cli.files.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
        emit(&humanizer, &input, options, cli.json)?;
    } else {
        for path in &cli.files {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {path}"))?;
            emit(&humanizer, &text, options, cli.json)?;
        }
    }
    Ok(())
}

fn emit(humanizer: &Humanizer, input: &str, options: HumanizeOptions, json: bool) -> Result<()> {
    let text = humanizer.humanize(input, options)?;
    if json {
        let report = Report {
            stats: Stats {
                input_words: input.split_whitespace().count(),
                output_words: text.split_whitespace().count(),
                input_chars: input.chars().count(),
                output_chars: text.chars().count(),
            },
            text,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{text}");
    }
    Ok(())
}
