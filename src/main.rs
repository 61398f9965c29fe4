//! recall - spaced-revision engine speaking a line-oriented JSON protocol

use anyhow::{Context, Result};
use clap::Parser;
use recall::command::CommandProcessor;
use recall::config::Settings;
use recall::logging::init_tracing;
use recall::{sample, RetentionEngine};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

/// Answers retention queries. With COMMAND, runs it once; otherwise reads
/// `COMMAND [DATA]` lines from stdin until EOF, an empty line, or EXIT.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, allow_negative_numbers = true)]
struct Cli {
    /// Protocol command, e.g. GET_STATS or REVISE_CONCEPT
    command: Option<String>,

    /// Command payload; may start with `-` (e.g. a negative day count)
    #[arg(allow_hyphen_values = true)]
    data: Option<String>,

    /// TOML settings file
    #[arg(short, long, env = "RECALL_CONFIG")]
    config: Option<PathBuf>,

    /// Override the decay rate from the settings file
    #[arg(long)]
    decay_rate: Option<f64>,

    /// Start with an empty engine instead of the sample curriculum
    #[arg(long)]
    no_sample: bool,

    /// Log filter used when RECALL_LOG is unset
    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(rate) = cli.decay_rate {
        settings.engine.decay_rate = rate;
    }
    if cli.no_sample {
        settings.seed_sample = false;
    }
    if let Some(level) = &cli.log_level {
        settings.log_level = level.clone();
    }

    init_tracing(&settings.log_level);

    let mut engine =
        RetentionEngine::with_config(settings.engine.clone()).context("invalid engine settings")?;
    if settings.seed_sample {
        sample::seed(&mut engine).context("failed to seed sample curriculum")?;
    }
    info!(
        concepts = engine.total_concepts(),
        decay_rate = engine.decay_rate(),
        "engine ready"
    );

    let mut processor = CommandProcessor::new(engine, settings.queue_length);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(command) = &cli.command {
        let reply = processor.respond(command, cli.data.as_deref().unwrap_or(""));
        writeln!(out, "{reply}")?;
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        match processor.respond_line(&line) {
            Some(reply) => {
                writeln!(out, "{reply}")?;
                out.flush()?;
            }
            None => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_payload_is_data_not_flag() {
        let cli = Cli::try_parse_from(["recall", "SET_DECAY_RATE", "-0.5"]).unwrap();
        assert_eq!(cli.command.as_deref(), Some("SET_DECAY_RATE"));
        assert_eq!(cli.data.as_deref(), Some("-0.5"));

        let cli = Cli::try_parse_from(["recall", "--no-sample", "SIMULATE_TIME", "-3"]).unwrap();
        assert!(cli.no_sample);
        assert_eq!(cli.data.as_deref(), Some("-3"));
    }
}
