// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::ors::Route;
use crate::polyline::{decode_polyline, DecodeError};

/// A GeoJSON FeatureCollection of route LineStrings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    type_: &'static str,
    pub features: Vec<Feature>,
}

/// One route as a GeoJSON Feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    type_: &'static str,
    pub geometry: Geometry,
    pub properties: Properties,
}

/// A GeoJSON LineString geometry. Coordinates are `[longitude, latitude]`,
/// the reverse of the polyline decoder's native order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    type_: &'static str,
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Properties {
    pub vehicle_id: Option<i64>,
    pub distance: Option<f64>,
    pub duration: Option<f64>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            type_: "FeatureCollection",
            features,
        }
    }
}

/// Converts optimizer routes into a GeoJSON FeatureCollection,
/// one LineString Feature per route with a non-empty geometry.
/// Routes without a geometry string are skipped.
pub fn geojson_from_routes(routes: &[Route]) -> Result<FeatureCollection, DecodeError> {
    let mut features = Vec::with_capacity(routes.len());

    for route in routes {
        let geometry = match route.geometry.as_deref() {
            Some(g) if !g.is_empty() => g,
            _ => continue,
        };

        let coordinates = decode_polyline(geometry)?
            .into_iter()
            .map(|(lat, lon)| [lon, lat])
            .collect();

        features.push(Feature {
            type_: "Feature",
            geometry: Geometry {
                type_: "LineString",
                coordinates,
            },
            properties: Properties {
                vehicle_id: route.vehicle,
                distance: route.distance,
                duration: route.duration,
            },
        });
    }

    Ok(FeatureCollection::new(features))
}
