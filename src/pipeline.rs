// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use crate::convert;
use crate::naming::RunNames;
use crate::ors;
use crate::points::PointSet;
use crate::polyline::DecodeError;

/// Error conditions which may abort a pipeline run. All of them are
/// fatal: the remaining stages are skipped and no further artifacts
/// are written.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Service(#[from] ors::Error),

    #[error("failed to decode route geometry: {0}")]
    Geometry(#[from] DecodeError),

    #[error(transparent)]
    Parse(#[from] convert::ParseError),

    #[error("failed to serialize artifact: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write artifact: {0}")]
    Io(#[from] io::Error),
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The optimizer found no routes. The raw response was persisted,
    /// no derived artifacts were produced. Not an error.
    NoRoutes { response_path: PathBuf },

    /// All four artifacts were written.
    Complete {
        response_path: PathBuf,
        geojson_path: PathBuf,
        kml_path: PathBuf,
        trajectory_path: PathBuf,
        /// Display name of the trajectory, as embedded in the artifact.
        trajectory_name: String,
    },
}

/// Runs the whole pipeline: builds the optimization request, submits it,
/// and converts the response into the output artifacts.
///
/// Nothing is written to `output_dir` until the service call has
/// succeeded; a [ors::Error] therefore leaves the directory untouched.
pub fn run(
    client: &ors::Client,
    points: &PointSet,
    output_dir: &Path,
    name_suffix: &str,
    names: &RunNames,
) -> Result<Outcome, PipelineError> {
    let request = ors::OptimizationRequest::from_points(points);
    log::info!(
        "requesting optimization: {} jobs, {} points total",
        request.jobs.len(),
        points.len()
    );
    let document = client.optimize(&request)?;
    convert_response(&document, output_dir, name_suffix, names)
}

/// The response-to-files half of [run]: persists the raw response
/// document and derives the GeoJSON, KML and trajectory artifacts
/// from it, in that order.
pub fn convert_response(
    document: &serde_json::Value,
    output_dir: &Path,
    name_suffix: &str,
    names: &RunNames,
) -> Result<Outcome, PipelineError> {
    std::fs::create_dir_all(output_dir)?;

    let response_path = output_dir.join(names.response_json());
    write_atomic(&response_path, &serde_json::to_vec_pretty(document)?)?;
    log::info!("response saved to {}", response_path.display());

    let routes = ors::routes_from_document(document)?;
    if routes.is_empty() {
        log::warn!("no routes in the optimization response");
        return Ok(Outcome::NoRoutes { response_path });
    }

    let collection = convert::geojson_from_routes(&routes)?;
    let geojson_path = output_dir.join(names.geojson());
    write_atomic(&geojson_path, &serde_json::to_vec_pretty(&collection)?)?;
    log::info!("GeoJSON saved to {}", geojson_path.display());

    let kml_path = output_dir.join(names.kml());
    let mut kml = Vec::new();
    convert::write_kml(&mut kml, &collection)?;
    write_atomic(&kml_path, &kml)?;
    log::info!("KML saved to {}", kml_path.display());

    // The trajectory stage re-reads the KML artifact from disk, so the
    // file consumed downstream is exactly the one that was converted.
    let coordinates = convert::kml_first_linestring(io::BufReader::new(File::open(&kml_path)?))?;
    let trajectory_name = names.trajectory_name(name_suffix);
    let trajectory = convert::trajectory_from_coordinates(&coordinates, &trajectory_name);
    let trajectory_path = output_dir.join(names.trajectory_json(name_suffix));
    write_atomic(&trajectory_path, &serde_json::to_vec(&trajectory)?)?;
    log::info!("trajectory saved to {}", trajectory_path.display());

    Ok(Outcome::Complete {
        response_path,
        geojson_path,
        kml_path,
        trajectory_path,
        trajectory_name,
    })
}

/// Writes through a temporary sibling file and renames it into place,
/// so a crash mid-write cannot leave a truncated artifact behind.
fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, data)?;
    std::fs::rename(&tmp, path)
}
