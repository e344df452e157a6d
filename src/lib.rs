// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Waypoint-to-route conversion and export for car navigation devices.
//!
//! `routier` takes a small ordered set of surveyed waypoints (a CSV table
//! with `id`, `x`, `y` columns), asks the
//! [openrouteservice optimization API](https://openrouteservice.org/dev/#/api-docs/optimization)
//! for an optimized vehicle route, and re-exports the result as GeoJSON,
//! KML 2.2 and a fixed-point trajectory JSON understood by the navigation
//! device. Route optimization itself is fully delegated to the remote
//! service; this crate is the conversion pipeline around it.
//!
//! # Example
//!
//! ```no_run
//! let points = routier::points_from_file("path/to/points.csv")
//!     .expect("failed to load points.csv");
//! let points = routier::PointSet::new(points).expect("invalid point set");
//!
//! let client = routier::ors::Client::new(routier::ors::DEFAULT_ENDPOINT, "my-api-token")
//!     .expect("failed to build client");
//!
//! let names = routier::RunNames::today();
//! let outcome = routier::run(&client, &points, "output/".as_ref(), "Paris", &names)
//!     .expect("pipeline failed");
//!
//! println!("Outcome: {:?}", outcome);
//! ```

mod convert;
pub mod layer;
mod naming;
pub mod ors;
mod pipeline;
mod points;
mod polyline;

pub use convert::{
    geojson_from_routes, kml_first_linestring, trajectory_from_coordinates, write_kml,
    FeatureCollection, ParseError, Trajectory, COORDINATE_SCALE,
};
pub use naming::RunNames;
pub use pipeline::{convert_response, run, Outcome, PipelineError};
pub use points::{
    points_from_buffer, points_from_file, points_from_io, LoadError, PointSet, ValidationError,
    MAX_POINTS,
};
pub use polyline::{decode_polyline, encode_polyline, DecodeError};

use serde::{Deserialize, Serialize};

/// A single surveyed waypoint.
///
/// `x` and `y` are in the coordinate system expected by the route service
/// (longitude/latitude degrees); callers must reproject beforehand, see
/// [layer::GeoLayerSource::reproject_to].
///
/// The point with `id == 0` is the route start and the point with the
/// highest id is the route end; every other point is an intermediate stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}
