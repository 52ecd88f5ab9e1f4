use grid_search::config::{Cli, Config, Part};
use grid_search::puzzle::{self, Answer, Puzzle};
use grid_search::stat::Stats;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// One solved part, as printed with `--json`.
#[derive(Serialize)]
struct Report<'a> {
    puzzle: Puzzle,
    part: Part,
    answer: &'a Answer,
    stats: &'a Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)
            .with_context(|| format!("failed to read config file: {config_file}"))?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        Config::default()
    }
    .override_from_command_line(&cli)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    if cli.config.is_none() {
        info!("No config file specified, using default config");
    }

    let input = std::fs::read_to_string(&config.input_path)
        .with_context(|| format!("failed to read input file: {}", config.input_path))?;
    let solver = puzzle::build(config.puzzle, &input, &config.params)
        .with_context(|| format!("invalid input for {}: {}", config.puzzle, config.input_path))?;

    for part in config.part.parts() {
        let mut stats = Stats::default();
        let start = Instant::now();
        let answer = solver.solve(part, &mut stats);
        stats.time_us = start.elapsed().as_micros() as usize;
        stats.print();

        if config.output_json {
            let report = Report {
                puzzle: config.puzzle,
                part,
                answer: &answer,
                stats: &stats,
            };
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{} part {part:?}: {answer}", config.puzzle);
        }
    }

    Ok(())
}
