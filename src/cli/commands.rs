//! Command implementations

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::adapters::toml_config::ClipperConfig;
use crate::adapters::TracingLogAdapter;
use crate::app::{AppContainer, BatchRequest, DependencyReport};
use crate::cli::args::{CheckArgs, ProbeArgs, RunArgs};
use crate::domain::errors::ClipperError;
use crate::domain::model::{BatchReport, ClipOutcome, ClipRequest, SourceDescriptor};
use crate::utils::time::TimeParser;

/// TOML clip list: a sequence of `[[clip]]` tables
#[derive(Debug, Deserialize)]
struct ClipFile {
    #[serde(default)]
    clip: Vec<ClipRequest>,
}

/// Read clip rows from a `.json` array or a TOML file
pub fn load_clip_file(path: &Path) -> Result<Vec<ClipRequest>, ClipperError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ClipperError::BadArgs(format!("Cannot read clip file {}: {}", path.display(), e))
    })?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        serde_json::from_str(&content).map_err(|e| {
            ClipperError::BadArgs(format!("Invalid JSON clip file {}: {}", path.display(), e))
        })
    } else {
        toml::from_str::<ClipFile>(&content)
            .map(|file| file.clip)
            .map_err(|e| {
                ClipperError::BadArgs(format!("Invalid TOML clip file {}: {}", path.display(), e))
            })
    }
}

/// File rows first, then `--clip` rows, in the order given
pub fn collect_clips(args: &RunArgs) -> Result<Vec<ClipRequest>, ClipperError> {
    let mut clips = match &args.clips {
        Some(path) => load_clip_file(path)?,
        None => Vec::new(),
    };
    for spec in &args.clip {
        clips.push(ClipRequest::parse_spec(spec)?);
    }
    Ok(clips)
}

/// Execute the run command
pub async fn run(container: &dyn AppContainer, config: &ClipperConfig, args: &RunArgs) -> Result<()> {
    let clips = collect_clips(args)?;
    let source = args
        .source
        .descriptor(config.defaults.quality)
        .context("Either --url or --file is required")?;

    info!("Source: {}", source);
    info!("Output directory: {}", args.output_dir.display());

    let request = BatchRequest {
        clips,
        source,
        output_dir: args.output_dir.clone(),
        format: config.defaults.format,
        keep_original: config.defaults.keep_original,
        download_dir: config.defaults.download_dir.clone(),
        check_bounds: args.check_bounds,
    };

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, stopping after the current clip");
                cancel.cancel();
            }
        })
    };

    let sink = TracingLogAdapter::new();
    let result = container
        .batch_interactor()
        .run(&request, &sink, &sink, &cancel)
        .await;
    interrupt.abort();

    let report = result?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if !report.all_succeeded() {
        bail!("{}", report.summary());
    }
    Ok(())
}

fn print_report(report: &BatchReport) {
    for result in &report.results {
        match result.outcome {
            ClipOutcome::Succeeded => println!(
                "OK    {:<20} {}",
                result.entry.name(),
                result.output_path.display()
            ),
            ClipOutcome::Failed => println!(
                "FAIL  {:<20} {}",
                result.entry.name(),
                result.error.as_deref().unwrap_or("unknown error")
            ),
            ClipOutcome::Skipped => println!("SKIP  {}", result.entry.name()),
        }
    }
    if report.source.is_temporary && !report.source_removed {
        println!("Downloaded video kept at {}", report.source.path.display());
    }
    println!("{}", report.summary());
}

#[derive(Debug, Serialize)]
struct ProbeOutput {
    source: String,
    duration_seconds: f64,
    duration: String,
}

/// Execute the probe command
pub async fn probe(container: &dyn AppContainer, args: &ProbeArgs) -> Result<()> {
    let source = args
        .source
        .descriptor(Default::default())
        .context("Either --url or --file is required")?;

    let sink = TracingLogAdapter::new();
    let probe = container.duration_probe();
    let duration = match &source {
        SourceDescriptor::Remote { url, .. } => probe.probe_remote(url, &sink).await?,
        SourceDescriptor::Local { path } => {
            if !path.exists() {
                return Err(ClipperError::SourceNotFound { path: path.clone() }.into());
            }
            probe.probe_local(path, &sink).await?
        }
    };

    let Some(duration) = duration else {
        bail!("Could not determine the duration of {}", source);
    };

    let output = ProbeOutput {
        source: source.to_string(),
        duration_seconds: duration.as_secs_f64(),
        duration: TimeParser::format_time(duration),
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} ({:.3}s)", output.duration, output.duration_seconds);
    }
    Ok(())
}

/// Execute the check command
pub async fn check(container: &dyn AppContainer, args: &CheckArgs) -> Result<()> {
    let report = container
        .dependency_checker()
        .check_all(&TracingLogAdapter::new())
        .await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_dependencies(&report);
    }

    if !report.all_available() {
        bail!("Some external tools are missing or not working");
    }
    Ok(())
}

fn print_dependencies(report: &DependencyReport) {
    for status in &report.tools {
        let mark = if status.available { "OK  " } else { "MISS" };
        let detail = status.version.as_deref().unwrap_or(&status.message);
        println!("{} {:<8} {}", mark, status.tool.name(), detail);
        if let Some(path) = &status.path {
            println!("     {}", path.display());
        }
    }
}
