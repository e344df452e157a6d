// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Converters between the optimizer response and the exported formats.
//!
//! The conversion is a chain: response routes → GeoJSON FeatureCollection
//! → KML 2.2 document → fixed-point trajectory JSON. Each stage is a pure
//! function of its input; file placement is the pipeline's job.

mod geojson;
mod kml;
mod trajectory;

pub use geojson::{geojson_from_routes, Feature, FeatureCollection, Geometry, Properties};
pub use kml::{first_linestring as kml_first_linestring, write_kml, ParseError};
pub use trajectory::{
    trajectory_from_coordinates, ScaledPoint, Station, Trajectory, WaypointType, COORDINATE_SCALE,
};
