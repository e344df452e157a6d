// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::PointSet;

/// Carrying capacity of the single vehicle, in delivery units.
/// Must cover one unit per job; [MAX_POINTS](crate::MAX_POINTS) keeps
/// the job count far below this.
pub const DEFAULT_CAPACITY: u32 = 9999;

/// A single delivery stop the optimizer must visit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    pub id: u32,
    pub service: u32,
    pub delivery: [u32; 1],
    pub location: [f64; 2],
}

/// The single routing agent with fixed start, end and capacity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    pub id: u32,
    pub profile: &'static str,
    pub start: [f64; 2],
    pub end: [f64; 2],
    pub capacity: [u32; 1],
}

/// Optimization options; `g` asks the service to return the
/// encoded route geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestOptions {
    pub g: bool,
}

/// The body POSTed to the optimization endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationRequest {
    pub jobs: Vec<Job>,
    pub vehicles: Vec<Vehicle>,
    pub options: RequestOptions,
}

impl OptimizationRequest {
    /// Builds a request from a validated point set: one job per
    /// intermediate point (a 1-unit delivery with a nominal service time
    /// of 1 second, at the point's raw location) and exactly one
    /// "driving-car" vehicle going from the `id == 0` point to the
    /// highest-id point.
    pub fn from_points(points: &PointSet) -> Self {
        let jobs = points
            .intermediates()
            .map(|p| Job {
                id: p.id,
                service: 1,
                delivery: [1],
                location: [p.x, p.y],
            })
            .collect();

        let start = points.start();
        let end = points.end();
        let vehicle = Vehicle {
            id: 1,
            profile: "driving-car",
            start: [start.x, start.y],
            end: [end.x, end.y],
            capacity: [DEFAULT_CAPACITY],
        };

        Self {
            jobs,
            vehicles: vec![vehicle],
            options: RequestOptions { g: true },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    fn point_set(n: u32) -> PointSet {
        let points = (0..n)
            .map(|id| Point {
                id,
                x: 2.0 + id as f64 * 0.01,
                y: 48.0 + id as f64 * 0.01,
            })
            .collect();
        PointSet::new(points).unwrap()
    }

    #[test]
    fn test_one_job_per_intermediate_point() {
        for n in [2, 3, 10, 50] {
            let request = OptimizationRequest::from_points(&point_set(n));
            assert_eq!(request.jobs.len(), n as usize - 2);
            assert_eq!(request.vehicles.len(), 1);
        }
    }

    #[test]
    fn test_vehicle_endpoints_and_capacity() {
        let request = OptimizationRequest::from_points(&point_set(5));
        let vehicle = &request.vehicles[0];
        assert_eq!(vehicle.profile, "driving-car");
        assert_eq!(vehicle.start, [2.0, 48.0]);
        assert_eq!(vehicle.end, [2.04, 48.04]);
        assert!(vehicle.capacity[0] as usize >= request.jobs.len());
    }

    #[test]
    fn test_jobs_carry_one_delivery_unit() {
        let request = OptimizationRequest::from_points(&point_set(4));
        for job in &request.jobs {
            assert_eq!(job.service, 1);
            assert_eq!(job.delivery, [1]);
        }
    }

    #[test]
    fn test_wire_shape() {
        let request = OptimizationRequest::from_points(&point_set(3));
        let wire = serde_json::to_value(&request).unwrap();

        assert_eq!(wire["options"]["g"], serde_json::json!(true));
        assert_eq!(wire["jobs"][0]["id"], serde_json::json!(1));
        assert_eq!(wire["jobs"][0]["location"], serde_json::json!([2.01, 48.01]));
        assert_eq!(wire["vehicles"][0]["profile"], serde_json::json!("driving-car"));
        assert_eq!(wire["vehicles"][0]["capacity"], serde_json::json!([9999]));
    }
}
