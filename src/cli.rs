use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Configuration file read when `--config` isn't given
pub const DEFAULT_CONFIG: &str = "notebook.toml";

#[derive(Args, Debug, Default, Clone)]
pub struct RenderArgs {
    /// Topic table to read instead of the configured one
    #[clap(short, long)]
    pub input: Option<PathBuf>,
    /// PDF file to write instead of the configured one
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generates a notebook.toml config file
    Config,
    /// Renders the notebook (the default when no command is given)
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// Configuration file; built-in defaults are used if it doesn't exist
    #[clap(short, long, global = true, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
    /// Log more (-v info, -vv debug, -vvv trace)
    #[clap(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    /// Only log errors
    #[clap(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
    #[clap(subcommand)]
    pub command: Option<Commands>,
}
