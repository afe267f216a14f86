mod core;
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::archiver;
use crate::core::sampler;
use crate::core::source::VideoSource;
use crate::core::workspace::Workspace;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a video into flip book pages and write them as a ZIP archive
    Extract {
        /// Video file to sample
        #[arg(short, long)]
        input: PathBuf,
        /// Seconds between pages (0.1 - 2.0)
        #[arg(short = 't', long, default_value_t = 0.5, value_parser = parse_interval)]
        interval: f64,
        /// Where to write the flip book archive
        #[arg(short, long, default_value = "flip_book.zip")]
        output: PathBuf,
    },
    /// Inspect a video and report the page count an interval would produce
    Probe {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short = 't', long, default_value_t = 0.5, value_parser = parse_interval)]
        interval: f64,
    },
    /// Interactive mode (menu)
    Interactive {
        /// Directory scanned for video files
        #[arg(short, long, default_value = "videos")]
        videos_dir: PathBuf,
    },
}

fn parse_interval(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("`{s}` is not a number"))?;
    if !(0.1..=2.0).contains(&value) {
        return Err(format!(
            "interval must be between 0.1 and 2.0 seconds, got {value}"
        ));
    }
    Ok(value)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Extract {
            input,
            interval,
            output,
        } => extract(input, *interval, output),
        Commands::Probe { input, interval } => probe(input, *interval),
        Commands::Interactive { videos_dir } => ui::interactive::run(videos_dir),
    }
}

fn extract(input: &Path, interval: f64, output: &Path) -> Result<()> {
    // Pages live in a per-run workspace and are gone once the archive is
    // written, whichever way this function exits.
    let workspace = Workspace::new().context("failed to create workspace")?;

    let source = VideoSource::open(input)?;
    let pages = sampler::sample_frames(source, interval, workspace.pages_dir())?;
    let archive = archiver::build_archive(&pages)?;

    fs::write(output, &archive)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(pages = pages.len(), output = %output.display(), "flip book written");
    println!(
        "✅ {} pages -> {} ({} bytes)",
        pages.len(),
        output.display(),
        archive.len()
    );
    Ok(())
}

#[derive(Serialize)]
struct ProbeReport {
    path: String,
    frame_rate: f64,
    total_frames: i64,
    duration_seconds: f64,
    interval: f64,
    stride: i64,
    expected_pages: i64,
}

fn probe(input: &Path, interval: f64) -> Result<()> {
    let source = VideoSource::open(input)?;
    let stride = sampler::stride_for(source.frame_rate(), interval);

    let report = ProbeReport {
        path: input.display().to_string(),
        frame_rate: source.frame_rate(),
        total_frames: source.total_frames(),
        duration_seconds: source.duration_seconds(),
        interval,
        stride,
        expected_pages: sampler::expected_pages(source.total_frames(), stride),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_parser_enforces_the_surface_range() {
        assert_eq!(parse_interval("0.5").unwrap(), 0.5);
        assert_eq!(parse_interval("0.1").unwrap(), 0.1);
        assert_eq!(parse_interval("2.0").unwrap(), 2.0);
        assert!(parse_interval("0").is_err());
        assert!(parse_interval("2.5").is_err());
        assert!(parse_interval("-0.5").is_err());
        assert!(parse_interval("fast").is_err());
    }
}
