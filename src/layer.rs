// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Narrow abstraction over a GIS point layer.
//!
//! The surveying side of the workflow lives in a GIS host application;
//! this crate only needs a handful of operations from it: enumerate the
//! point features, reproject them to WGS-84, rewrite the attribute
//! schema, and export the table as the CSV the pipeline consumes.
//! [GeoLayerSource] captures exactly that surface, and [MemoryLayer] is
//! the in-crate binding used by tests and non-GIS callers. Bindings to a
//! concrete host are separate adapters and never part of the core.

use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::Point;

/// Coordinate reference systems understood by [MemoryLayer].
/// The route service expects WGS-84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crs {
    /// EPSG:4326, longitude/latitude degrees.
    Wgs84,

    /// EPSG:3857, spherical-mercator metres.
    WebMercator,
}

/// Earth radius of the spherical-mercator projection, in metres.
const MERCATOR_RADIUS: f64 = 6_378_137.0;

/// Attribute kinds a layer schema can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Real,
    Text,
    Bool,
}

/// One declared attribute column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldDef {
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

/// One point feature: a position plus its attribute values,
/// keyed by field name.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub x: f64,
    pub y: f64,
    pub attributes: BTreeMap<String, String>,
}

impl Feature {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            attributes: BTreeMap::new(),
        }
    }
}

/// The operations the pipeline needs from a GIS point layer.
///
/// Implementations receive all inputs as parameters and report failures
/// as errors; they must not reach into any global host state.
pub trait GeoLayerSource {
    type Error: std::error::Error;

    /// Returns all point features, in layer order.
    fn list_features(&self) -> Vec<Feature>;

    /// Reprojects every feature's position into the given CRS.
    fn reproject_to(&mut self, crs: Crs) -> Result<(), Self::Error>;

    /// Replaces the attribute schema. Attribute values of dropped
    /// fields are discarded.
    fn set_fields(&mut self, schema: &[FieldDef]) -> Result<(), Self::Error>;

    /// Writes the layer as a CSV table: one column per declared field,
    /// one row per feature.
    fn write_csv(&self, path: &Path) -> Result<(), Self::Error>;
}

/// Error conditions reported by [MemoryLayer].
#[derive(Debug, thiserror::Error)]
pub enum LayerError {
    #[error("feature index {0} out of range")]
    IndexOutOfRange(usize),

    #[error("start and end must be different features")]
    StartEqualsEnd,

    #[error("failed to write CSV: {0}")]
    Io(#[from] io::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// An in-memory [GeoLayerSource].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryLayer {
    crs: Crs,
    fields: Vec<FieldDef>,
    features: Vec<Feature>,
}

impl MemoryLayer {
    pub fn new(crs: Crs, features: Vec<Feature>) -> Self {
        Self {
            crs,
            fields: Vec::new(),
            features,
        }
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Prepares the layer for the routing pipeline: assigns waypoint ids
    /// (`start` becomes id 0, `end` becomes the highest id, the remaining
    /// features are numbered 1.. in layer order), fills the `x`/`y`
    /// attributes from the geometry, and resets the schema to
    /// `id`, `x`, `y`. The layer should be in [Crs::Wgs84] first.
    ///
    /// `start` and `end` are indices into the feature list, as shown by
    /// [list_features](GeoLayerSource::list_features).
    pub fn assign_waypoint_ids(&mut self, start: usize, end: usize) -> Result<(), LayerError> {
        let n = self.features.len();
        for index in [start, end] {
            if index >= n {
                return Err(LayerError::IndexOutOfRange(index));
            }
        }
        if start == end {
            return Err(LayerError::StartEqualsEnd);
        }

        self.set_fields(&[
            FieldDef::new("id", FieldKind::Integer),
            FieldDef::new("x", FieldKind::Real),
            FieldDef::new("y", FieldKind::Real),
        ])?;

        let mut next_id = 1;
        for (index, feature) in self.features.iter_mut().enumerate() {
            let id = if index == start {
                0
            } else if index == end {
                n - 1
            } else {
                let id = next_id;
                next_id += 1;
                id
            };
            feature.attributes.insert("id".to_string(), id.to_string());
            feature
                .attributes
                .insert("x".to_string(), feature.x.to_string());
            feature
                .attributes
                .insert("y".to_string(), feature.y.to_string());
        }

        Ok(())
    }

    /// Shortcut: the layer's features as pipeline [Points](Point),
    /// after [assign_waypoint_ids](Self::assign_waypoint_ids).
    pub fn to_points(&self) -> Vec<Point> {
        self.features
            .iter()
            .filter_map(|f| {
                Some(Point {
                    id: f.attributes.get("id")?.parse().ok()?,
                    x: f.x,
                    y: f.y,
                })
            })
            .collect()
    }
}

impl GeoLayerSource for MemoryLayer {
    type Error = LayerError;

    fn list_features(&self) -> Vec<Feature> {
        self.features.clone()
    }

    fn reproject_to(&mut self, crs: Crs) -> Result<(), Self::Error> {
        if self.crs == crs {
            return Ok(());
        }

        for feature in &mut self.features {
            let (x, y) = match (self.crs, crs) {
                (Crs::WebMercator, Crs::Wgs84) => mercator_to_wgs84(feature.x, feature.y),
                (Crs::Wgs84, Crs::WebMercator) => wgs84_to_mercator(feature.x, feature.y),
                _ => unreachable!("equal systems are handled above"),
            };
            feature.x = x;
            feature.y = y;
        }

        self.crs = crs;
        Ok(())
    }

    fn set_fields(&mut self, schema: &[FieldDef]) -> Result<(), Self::Error> {
        self.fields = schema.to_vec();
        let keep = schema.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();
        for feature in &mut self.features {
            feature.attributes.retain(|name, _| keep.contains(&name.as_str()));
        }
        Ok(())
    }

    fn write_csv(&self, path: &Path) -> Result<(), Self::Error> {
        let mut writer = csv::Writer::from_writer(File::create(path)?);

        writer.write_record(self.fields.iter().map(|f| f.name.as_str()))?;
        for feature in &self.features {
            writer.write_record(self.fields.iter().map(|f| {
                feature
                    .attributes
                    .get(&f.name)
                    .map(String::as_str)
                    .unwrap_or_default()
            }))?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Parses a surveyed clearance height in centimetres into metres,
/// rounded to 2 decimals. Returns None for absent or non-numeric
/// values; the caller skips the field in that case.
pub fn parse_height_cm(value: &str) -> Option<f64> {
    let centimetres: f64 = value.trim().parse().ok()?;
    let metres = centimetres / 100.0;
    Some((metres * 100.0).round() / 100.0)
}

fn mercator_to_wgs84(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / MERCATOR_RADIUS).to_degrees();
    let lat = (y / MERCATOR_RADIUS).sinh().atan().to_degrees();
    (lon, lat)
}

fn wgs84_to_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let x = lon.to_radians() * MERCATOR_RADIUS;
    let y = (lat.to_radians() / 2.0 + std::f64::consts::FRAC_PI_4)
        .tan()
        .ln()
        * MERCATOR_RADIUS;
    (x, y)
}
