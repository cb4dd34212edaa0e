//! District/station CSV export.
//!
//! [`export`] turns the provider's district list and station mapping into
//! ordered rows; [`render_csv`] serializes those rows into the text that is
//! written to disk.

use crate::domain::model::{StationRow, StationsByDistrict};
use crate::utils::error::{ExportError, Result};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

pub const HEADER: [&str; 2] = ["District", "Station"];

/// Replaces every comma with a semicolon. Nothing else is escaped.
pub fn escape_station(station: &str) -> Cow<'_, str> {
    if station.contains(',') {
        Cow::Owned(station.replace(',', ";"))
    } else {
        Cow::Borrowed(station)
    }
}

/// Builds the sorted, deduplicated rows for every listed district that has
/// an entry in `stations_by_district`.
///
/// Each exported district also lists itself as a station. Stations are
/// deduplicated and ordered after comma substitution, so two names that only
/// differ by `,` versus `;` collapse into one row.
pub fn export(districts: &[String], stations_by_district: &StationsByDistrict) -> Vec<StationRow> {
    let selected: BTreeMap<&str, &Vec<String>> = districts
        .iter()
        .filter_map(|district| stations_by_district.get_key_value(district.as_str()))
        .map(|(district, stations)| (district.as_str(), stations))
        .collect();

    let mut rows = Vec::new();
    for (district, stations) in selected {
        let mut unique: BTreeSet<Cow<'_, str>> =
            stations.iter().map(|station| escape_station(station)).collect();
        unique.insert(escape_station(district));

        rows.extend(unique.into_iter().map(|station| StationRow {
            district: district.to_string(),
            station: station.into_owned(),
        }));
    }
    rows
}

/// Writes the header and rows as `\n`-terminated lines with no quoting.
pub fn render_csv(rows: &[StationRow]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::IoError(e.into_error()))?;

    String::from_utf8(bytes).map_err(|e| ExportError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}
