// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use chrono::{Datelike, NaiveDate};

/// Deterministic file and folder names for a single pipeline run.
///
/// Every artifact name is derived from a calendar date: the day as
/// `DDMMYYYY` and the ISO-8601 week number (Monday-first weeks) as
/// `Semaine_WW`, zero-padded. Two runs on the same date with the same
/// suffix therefore produce identical names, and the later run
/// overwrites the earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunNames {
    date_str: String,
    week_str: String,
}

impl RunNames {
    /// Derives the names for the given date.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date_str: date.format("%d%m%Y").to_string(),
            week_str: format!("Semaine_{:02}", date.iso_week().week()),
        }
    }

    /// Derives the names for the current local date.
    pub fn today() -> Self {
        Self::for_date(chrono::Local::now().date_naive())
    }

    /// The day part, `DDMMYYYY`.
    pub fn date_str(&self) -> &str {
        &self.date_str
    }

    /// The ISO week part, `Semaine_WW`.
    pub fn week_str(&self) -> &str {
        &self.week_str
    }

    /// Name of the raw optimization response dump.
    pub fn response_json(&self) -> String {
        format!("Result_API_ORS_{}_{}.json", self.week_str, self.date_str)
    }

    /// Name of the GeoJSON artifact.
    pub fn geojson(&self) -> String {
        format!("GeometryWay_{}_{}.geojson", self.week_str, self.date_str)
    }

    /// Name of the KML artifact.
    pub fn kml(&self) -> String {
        format!("GeometryWay_{}_{}.kml", self.week_str, self.date_str)
    }

    /// Display name of the trajectory, also its file stem.
    pub fn trajectory_name(&self, suffix: &str) -> String {
        format!("Trajet_{}_{}_{}", self.week_str, self.date_str, suffix)
    }

    /// Name of the trajectory JSON artifact.
    pub fn trajectory_json(&self, suffix: &str) -> String {
        format!("{}.json", self.trajectory_name(suffix))
    }

    /// Name of the per-run output folder.
    pub fn output_folder(&self, suffix: &str) -> String {
        format!("trajet_{}_{}_{}", self.week_str, self.date_str, suffix)
    }
}
