//! Face-follow application: replays face detections and moves an element after the face.

use anyhow::Result;
use clap::Parser;
use face_follow::{
    app::{AppConfig, DetectionInput, FaceFollowApp},
    config::{Config, ConfigOverrides},
};
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Recorded detections (JSON Lines, one array of faces per frame), `-` for stdin
    #[arg(short, long, default_value = "-")]
    replay: String,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    #[command(flatten)]
    overrides: ConfigOverrides,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Face Follow");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Command line flags override the file
    config.apply_overrides(&args.overrides)?;

    config.validate()?;

    if args.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Create and run application
    let mut app = FaceFollowApp::new(AppConfig {
        input: DetectionInput::from_arg(&args.replay),
        config,
    })?;
    let stats = app.run()?;

    let position = app.position();
    info!(
        "Final position ({:.2}, {:.2}) after {} tracked of {} frames",
        position.x, position.y, stats.tracked, stats.frames
    );

    Ok(())
}
