// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use serde::Deserialize;

/// The fields of an optimizer route consumed downstream. Everything
/// else in the response document is passed through untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub geometry: Option<String>,
    #[serde(default)]
    pub vehicle: Option<i64>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ResponseView {
    #[serde(default)]
    routes: Vec<Route>,
}

/// Extracts the typed route list from an optimization response document.
/// A document without a `routes` key yields an empty list, which is a
/// valid "no routes" outcome, not an error.
pub fn routes_from_document(document: &serde_json::Value) -> Result<Vec<Route>, serde_json::Error> {
    Ok(ResponseView::deserialize(document)?.routes)
}
