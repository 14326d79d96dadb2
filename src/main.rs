//! Main entry point for the paint_splash headless driver

mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::{Cli, Commands, RunArgs};
use paint_splash::app::{self, HeadlessRun};
use paint_splash::init_config::SplashConfigFile;
use paint_splash::surface::FixedViewport;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.verbose > 0 {
        log::set_max_level(match cli.verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    } else if cli.quiet {
        log::set_max_level(log::LevelFilter::Error);
    }

    let config = match &cli.config {
        Some(path) => SplashConfigFile::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SplashConfigFile::load_default().context("loading splash_config.toml")?,
    };

    match cli.command {
        Commands::Run(args) => execute_run(config, args),
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

fn execute_run(config: SplashConfigFile, args: RunArgs) -> Result<()> {
    let events = args
        .clicks
        .into_iter()
        .chain(args.scrolls)
        .chain(args.modals)
        .chain(args.resizes)
        .collect();

    let report = app::run(HeadlessRun {
        splash: config.splash,
        triggers: config.triggers,
        frames: args.frames,
        viewport: FixedViewport::new(args.width, args.height),
        document_height: args.document_height,
        seed: args.seed,
        events,
        snapshot_path: args.dump,
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("frames:          {}", report.frames);
        println!("emitted:         {}", report.stats.emitted);
        println!("expired:         {}", report.stats.expired);
        println!("dropped:         {}", report.stats.dropped);
        println!("active splashes: {}", report.active_splashes);
        println!("peak splashes:   {}", report.peak_splashes);
        println!("live particles:  {}", report.live_particles);
        println!("circles drawn:   {}", report.fills);
        println!("surface size:    {}x{}", report.surface_size.0, report.surface_size.1);
    }
    Ok(())
}
