// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Client for the [openrouteservice optimization endpoint](https://openrouteservice.org/dev/#/api-docs/optimization).
//!
//! The optimizer's own schema is treated as opaque: requests are built
//! from a validated [PointSet](crate::PointSet), and of the response only
//! `routes[].geometry`, `vehicle`, `distance` and `duration` are read.

mod client;
mod request;
mod response;

pub use client::{Client, Error, DEFAULT_ENDPOINT, REQUEST_TIMEOUT};
pub use request::{Job, OptimizationRequest, RequestOptions, Vehicle, DEFAULT_CAPACITY};
pub use response::{routes_from_document, Route};
