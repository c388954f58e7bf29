use anyhow::{Context, Result};
use cli::{Cli, Commands, RenderArgs};
use config_wizard::Configuration;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use sinks::RenderStats;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod cli;
mod config_wizard;
mod detection;
mod logging;
mod sinks {
    mod pdf;
    pub use pdf::{PageNumberStyle, Position, RenderStats, StandardFont, PDF};
}
mod source;

fn main() -> ExitCode {
    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    let level = logging::level_for(cli.verbose, cli.quiet);
    logging::init(level)?;

    match &cli.command {
        Some(Commands::Config) => config_wizard::run(&cli.config),
        Some(Commands::Render(args)) => render(&cli, args, level),
        None => render(&cli, &RenderArgs::default(), level),
    }
}

fn render(cli: &Cli, args: &RenderArgs, level: LevelFilter) -> Result<()> {
    // per-page log lines would fight with the bar for the terminal
    let progress = if level >= LevelFilter::Debug {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(0)
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .with_context(|| "Failed to parse progress bar template")?
            .progress_chars("#>-"),
    );

    let (outfile, stats) = render_notebook(&cli.config, args, &progress)?;

    println!();
    println!("  Topics:   {}", stats.topic_count);
    if stats.skipped_topics > 0 {
        println!("  Skipped:  {} (zero pages)", stats.skipped_topics);
    }
    println!("  Pages:    {}", stats.page_count);
    println!("  Notebook: {}", outfile.display());

    Ok(())
}

/// Load the configuration, read the topics and write the notebook, returning where it went
fn render_notebook(
    config: &Path,
    args: &RenderArgs,
    progress: &ProgressBar,
) -> Result<(PathBuf, RenderStats)> {
    println!("Loading configuration...");
    let Configuration {
        mut source,
        mut pdf,
    } = Configuration::load(config)?;
    if let Some(input) = &args.input {
        source.path = input.clone();
    }
    if let Some(output) = &args.output {
        pdf.outfile = output.clone();
    }

    println!("Reading topics from {}...", source.path.display());
    let topics = source
        .topics()
        .with_context(|| "Failed to read topics")?;

    let stats = pdf
        .render(&topics, progress)
        .with_context(|| "Failed to render PDF")?;
    Ok((pdf.outfile, stats))
}
