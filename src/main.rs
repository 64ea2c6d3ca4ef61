//! convergeviz - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use convergeviz::{
    cli::{Args, Commands, Config, FrameFormat, Verbosity},
    export::FrameExport,
    render::{RecordingRenderer, TerminalRenderer},
    scene::ConvergenceScene,
    series::Series,
    telemetry::TelemetryDisplay,
    timeline::{ConvergenceTimeline, IdentityMapper},
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(message) = args.validate() {
        eprintln!("{} {}", "Error:".red(), message);
        std::process::exit(2);
    }

    // `config --init` may point at a file that does not exist yet
    let mut config = match (&args.command, &args.config) {
        (Some(Commands::Config { init: true }), Some(path)) if !path.exists() => Config::default(),
        _ => Config::load(args.config.clone())?,
    };
    args.apply_to(&mut config);
    config
        .validate()
        .context("Invalid configuration after applying command-line flags")?;

    let verbosity = if args.quiet || args.verbose > 0 {
        args.verbosity()
    } else {
        config.default_verbosity()
    };

    match &args.command {
        Some(Commands::Frames { format, output }) => {
            export_frames(&config, verbosity, *format, output.as_deref())
        }
        Some(Commands::Config { init }) => show_config(&args, &config, *init),
        Some(Commands::Play) | None => play(&args, &config, verbosity),
    }
}

/// Animate the configured series in the terminal (or record it with --dry-run)
fn play(args: &Args, config: &Config, verbosity: Verbosity) -> Result<()> {
    let series = config.timeline.series.build()?;
    let limit = series.limit();
    let timeline = ConvergenceTimeline::initialize(series, config.timeline.max_index)?;

    let mut scene = ConvergenceScene::new(timeline, config.axes()?)
        .with_timings(config.timings())
        .with_curve_samples(config.axes.curve_samples);

    let summary = if args.dry_run {
        let mut recorder = RecordingRenderer::new();
        let summary = scene.play(&mut recorder)?;

        if verbosity.show_events() {
            println!("{}", serde_json::to_string_pretty(recorder.commands())?);
        } else if verbosity.show_progress() {
            println!(
                "Recorded {} render commands ({:?} of animation)",
                recorder.commands().len(),
                recorder.total_duration()
            );
        }
        summary
    } else {
        let stdout = std::io::stdout();
        let mut renderer = TerminalRenderer::new(stdout.lock(), config.terminal_options());
        scene.play(&mut renderer)?
    };

    if verbosity.show_progress() {
        println!("\n{} {}", "✓".green(), summary.final_label.bold());
    }
    TelemetryDisplay::new(scene.telemetry(), verbosity).display_summary(limit);

    Ok(())
}

/// Run the timeline to its bound and write every frame
fn export_frames(
    config: &Config,
    verbosity: Verbosity,
    format: FrameFormat,
    output: Option<&Path>,
) -> Result<()> {
    let series = config.timeline.series.build()?;
    let mut timeline = ConvergenceTimeline::initialize(series, config.timeline.max_index)?;

    // Progress only when stdout is not the export itself
    let pb = if output.is_some() && verbosity.show_progress() && config.display.show_progress_bars {
        let pb = ProgressBar::new(config.timeline.max_index);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("Frames [{bar:40.cyan/blue}] {pos}/{len} | ETA: {eta}")?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let export = FrameExport::collect(&mut timeline, &IdentityMapper, |_| {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    })?;

    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }

    let contents = match format {
        FrameFormat::Json => export.to_json()?,
        FrameFormat::Table => export.to_table(),
    };
    FrameExport::write_to(&contents, output)?;

    if let Some(path) = output {
        if verbosity.show_progress() {
            println!(
                "{} Wrote {} frames to {}",
                "✓".green(),
                export.frames.len(),
                path.display()
            );
        }
    }

    Ok(())
}

/// Print the effective configuration, or write it with --init
fn show_config(args: &Args, config: &Config, init: bool) -> Result<()> {
    if init {
        let path = match &args.config {
            Some(path) => path.clone(),
            None => Config::default_path().context("Could not determine home directory")?,
        };
        config.save(&path)?;
        println!("{} Wrote configuration to {}", "✓".green(), path.display());
        return Ok(());
    }

    println!("{}", "Effective configuration".bold().cyan());
    if let Some(path) = Config::default_path() {
        println!("{}", format!("# default location: {}", path.display()).dimmed());
    }
    println!("{}", config.to_toml()?);

    Ok(())
}
