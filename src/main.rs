use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use routier;

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct PointsLoadError(PathBuf, #[source] routier::LoadError);

/// Converts a waypoint table into an optimized vehicle route and exports
/// it as GeoJSON, KML and trajectory JSON for the navigation device.
#[derive(Parser)]
struct Cli {
    /// The path to the waypoint CSV (columns: id, x, y)
    points_file: PathBuf,

    /// Suffix for the trajectory name and the output folder
    name: String,

    /// API token for the optimization service;
    /// defaults to the ORS_API_KEY environment variable
    #[arg(long)]
    api_key: Option<String>,

    /// URL of the optimization endpoint
    #[arg(long, default_value = routier::ors::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Where to place the artifacts;
    /// defaults to a dated folder next to the input file
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let api_key = match cli.api_key {
        Some(key) => key,
        None => std::env::var("ORS_API_KEY")
            .map_err(|_| "no API token: pass --api-key or set ORS_API_KEY")?,
    };

    let points = routier::points_from_file(&cli.points_file)
        .map_err(|e| PointsLoadError(cli.points_file.clone(), e))?;
    let points = routier::PointSet::new(points)?;

    let names = routier::RunNames::today();
    let output_dir = match cli.output_dir {
        Some(dir) => dir,
        None => cli
            .points_file
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(names.output_folder(&cli.name)),
    };

    let client = routier::ors::Client::new(&cli.endpoint, &api_key)?;
    match routier::run(&client, &points, &output_dir, &cli.name, &names)? {
        routier::Outcome::NoRoutes { response_path } => {
            log::warn!(
                "no routes found; raw response kept at {}",
                response_path.display()
            );
        }
        routier::Outcome::Complete {
            trajectory_path,
            trajectory_name,
            ..
        } => {
            log::info!(
                "trajectory \"{}\" written to {}",
                trajectory_name,
                trajectory_path.display()
            );
            println!("{}", output_dir.display());
        }
    }

    Ok(())
}
