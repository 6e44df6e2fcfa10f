use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use photo_mapper::{config, kml, pipeline};

#[derive(Parser, Debug)]
#[command(
    name = "photo-mapper",
    version,
    about = "Build a chronological KML map — placemarks and a route line — from the GPS metadata in a folder of photos"
)]
struct Cli {
    /// Root directory to scan for photos
    #[arg(value_name = "DIR")]
    root: Option<PathBuf>,

    /// Path to config file (default: photo-mapper.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config file and exit
    #[arg(long)]
    init: bool,

    /// Directory the two KML documents are written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let config = config::Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => config::Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    let Some(root) = cli.root else {
        anyhow::bail!("No root directory specified. Use --help for usage.");
    };

    // A scan only reads a config file when one is named explicitly.
    let config = match cli.config.as_deref() {
        Some(path) => config::Config::load(Some(path))?,
        None => config::Config::default(),
    };

    let points_path = cli.output_dir.join("points.kml");
    let route_path = cli.output_dir.join("route.kml");
    let mut writer = kml::KmlWriter::create(&points_path, &route_path, &config)?;

    let stats = pipeline::scan(&root, &config, &mut writer)?;
    writer.close()?;

    log::info!(
        "Done: {} photo(s) mapped, {} skipped out of {} candidate(s) in {} directories",
        stats.mapped,
        stats.skipped(),
        stats.candidates,
        stats.directories
    );
    if stats.truncated > 0 {
        log::info!("{} truncated file(s) were skipped", stats.truncated);
    }

    Ok(())
}
