//! Command-line interface for the headless splash driver

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use paint_splash::app::script::ScriptedEvent;
use paint_splash::config::{WINDOW_HEIGHT, WINDOW_WIDTH};

#[derive(Parser)]
#[command(name = "paint_splash")]
#[command(about = "Headless driver for the paint splash particle effect", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./splash_config.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate a page session frame by frame
    Run(RunArgs),

    /// Print the effective configuration as TOML
    Config,
}

#[derive(Args)]
pub struct RunArgs {
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 240)]
    pub frames: u64,

    /// Viewport width in pixels
    #[arg(long, default_value_t = WINDOW_WIDTH)]
    pub width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    pub height: u32,

    /// Total scrollable page height in pixels
    #[arg(long, default_value_t = 4000.0)]
    pub document_height: f64,

    /// Seed for reproducible particle speeds and scroll splash positions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Click at X,Y on a frame, e.g. 120,80@30 (repeatable)
    #[arg(long = "click", value_parser = ScriptedEvent::parse_click)]
    pub clicks: Vec<ScriptedEvent>,

    /// Scroll to SCROLL_Y on a frame, e.g. 900@45 (repeatable)
    #[arg(long = "scroll", value_parser = ScriptedEvent::parse_scroll)]
    pub scrolls: Vec<ScriptedEvent>,

    /// Open the document modal on FRAME (repeatable)
    #[arg(long = "modal", value_parser = ScriptedEvent::parse_modal)]
    pub modals: Vec<ScriptedEvent>,

    /// Resize the viewport, e.g. 1024x768@90 (repeatable)
    #[arg(long = "resize", value_parser = ScriptedEvent::parse_resize)]
    pub resizes: Vec<ScriptedEvent>,

    /// Write the final engine state as JSON
    #[arg(long)]
    pub dump: Option<PathBuf>,

    /// Print the run report as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}
