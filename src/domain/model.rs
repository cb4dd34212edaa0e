use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub type District = String;
pub type Station = String;
pub type StationsByDistrict = HashMap<District, Vec<Station>>;

/// What the data provider hands to the exporter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub districts: Vec<District>,
    pub stations_by_district: StationsByDistrict,
}

impl Dataset {
    /// Mapping keys that never appear in the district list. They are not exported.
    pub fn orphan_districts(&self) -> Vec<District> {
        let listed: HashSet<&str> = self.districts.iter().map(String::as_str).collect();
        let mut orphans: Vec<District> = self
            .stations_by_district
            .keys()
            .filter(|key| !listed.contains(key.as_str()))
            .cloned()
            .collect();
        orphans.sort();
        orphans
    }
}

/// One CSV data row. `station` has already had commas replaced.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct StationRow {
    pub district: District,
    pub station: Station,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub rows: usize,
    pub districts_listed: usize,
    pub districts_exported: usize,
    pub orphan_districts: Vec<District>,
    pub first_district: Option<District>,
    pub last_district: Option<District>,
    pub bytes: usize,
    pub generated_at: DateTime<Utc>,
}

impl ExportSummary {
    pub fn new(dataset: &Dataset, rows: &[StationRow], bytes: usize) -> Self {
        let mut districts_exported = 0;
        let mut previous: Option<&str> = None;
        for row in rows {
            if previous != Some(row.district.as_str()) {
                districts_exported += 1;
                previous = Some(row.district.as_str());
            }
        }

        Self {
            rows: rows.len(),
            districts_listed: dataset.districts.len(),
            districts_exported,
            orphan_districts: dataset.orphan_districts(),
            first_district: rows.first().map(|row| row.district.clone()),
            last_district: rows.last().map(|row| row.district.clone()),
            bytes,
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub rows: Vec<StationRow>,
    pub csv_output: String,
    pub summary: ExportSummary,
}

#[derive(Debug, Clone)]
pub struct ExportReport {
    /// `None` for a dry run.
    pub output_path: Option<String>,
    pub summary: ExportSummary,
}
