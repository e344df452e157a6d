// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::Point;

/// Maximum number of waypoints accepted in a single run.
/// The optimization service handles small batches only.
pub const MAX_POINTS: usize = 50;

/// Error conditions which may occur when loading a point table.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to open point table: {0}")]
    Io(#[from] io::Error),

    #[error("malformed point table: {0}")]
    Csv(#[from] csv::Error),
}

/// Error conditions which may occur during [PointSet::new].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A route needs at least a start and an end point.
    #[error("expected at least 2 points, got {0}")]
    TooFewPoints(usize),

    /// More points than [MAX_POINTS] were supplied.
    #[error("expected at most {MAX_POINTS} points, got {0}")]
    TooManyPoints(usize),

    /// Two points share the same id.
    #[error("duplicate point id: {0}")]
    DuplicateId(u32),

    /// No point is marked as the route start (`id == 0`).
    #[error("no point with id 0 (route start)")]
    NoStartPoint,
}

/// Parses points from a CSV table with an `id`, `x`, `y` header.
pub fn points_from_io<R: io::Read>(reader: R) -> Result<Vec<Point>, LoadError> {
    let mut rows = csv::Reader::from_reader(reader);
    let mut points = Vec::new();
    for row in rows.deserialize() {
        points.push(row?);
    }
    Ok(points)
}

/// Parses points from a CSV file at the provided path.
pub fn points_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Point>, LoadError> {
    let f = File::open(path)?;
    points_from_io(io::BufReader::new(f))
}

/// Parses points from a static buffer of CSV data.
pub fn points_from_buffer(data: &[u8]) -> Result<Vec<Point>, LoadError> {
    points_from_io(io::Cursor::new(data))
}

/// An ordered set of [Points](Point) with the route invariants checked:
/// at least 2 and at most [MAX_POINTS] points, unique ids, exactly one
/// point with `id == 0` (the start). The point with the highest id is
/// the end; it always exists once the other invariants hold.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet(Vec<Point>);

impl PointSet {
    /// Validates the provided points and wraps them in a PointSet.
    pub fn new(points: Vec<Point>) -> Result<Self, ValidationError> {
        if points.len() < 2 {
            return Err(ValidationError::TooFewPoints(points.len()));
        }
        if points.len() > MAX_POINTS {
            return Err(ValidationError::TooManyPoints(points.len()));
        }

        let mut seen = HashSet::with_capacity(points.len());
        for point in &points {
            if !seen.insert(point.id) {
                return Err(ValidationError::DuplicateId(point.id));
            }
        }

        if !seen.contains(&0) {
            return Err(ValidationError::NoStartPoint);
        }

        Ok(Self(points))
    }

    /// Returns the number of points in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns an iterator over all points, in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.0.iter()
    }

    /// The route start: the point with `id == 0`.
    pub fn start(&self) -> Point {
        *self.0.iter().find(|p| p.id == 0).unwrap()
    }

    /// The route end: the point with the highest id.
    pub fn end(&self) -> Point {
        *self.0.iter().max_by_key(|p| p.id).unwrap()
    }

    /// Returns an iterator over the intermediate stops,
    /// everything except the start and end points.
    pub fn intermediates(&self) -> impl Iterator<Item = &Point> {
        let max_id = self.end().id;
        self.0.iter().filter(move |p| p.id != 0 && p.id != max_id)
    }
}
