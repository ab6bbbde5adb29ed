//! Explodes per-age-band vaccination lists into one row per band.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};

use crate::covid::types::{AgeBandRecord, Observation, SmoothedObservation, VaccinationWideRow};

/// Rows that carry a date, an area and a (possibly empty) age-band list.
pub trait AgeBandSource {
    fn date(&self) -> NaiveDate;
    fn area(&self) -> &str;
    fn age_bands(&self) -> &[AgeBandRecord];
}

impl AgeBandSource for Observation {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn area(&self) -> &str {
        &self.area
    }

    fn age_bands(&self) -> &[AgeBandRecord] {
        self.vaccination_age_breakdown.as_deref().unwrap_or_default()
    }
}

impl AgeBandSource for SmoothedObservation {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn area(&self) -> &str {
        &self.area
    }

    fn age_bands(&self) -> &[AgeBandRecord] {
        SmoothedObservation::age_bands(self)
    }
}

/// Lazily yields one [`VaccinationWideRow`] per age band of every row.
///
/// Band keys are copied as-is, except those listed in `renames`. A row with a
/// missing or empty list yields nothing.
pub fn flatten_age_bands<'a, R: AgeBandSource>(
    rows: &'a [R],
    renames: &'a BTreeMap<String, String>,
) -> impl Iterator<Item = VaccinationWideRow> + 'a {
    rows.iter().flat_map(move |row| {
        row.age_bands().iter().map(move |band| VaccinationWideRow {
            date: row.date(),
            area: row.area().to_string(),
            fields: rename_keys(band, renames),
        })
    })
}

fn rename_keys(band: &AgeBandRecord, renames: &BTreeMap<String, String>) -> Map<String, Value> {
    band.0
        .iter()
        .map(|(key, value)| {
            let key = renames.get(key).unwrap_or(key).clone();
            (key, value.clone())
        })
        .collect()
}

impl VaccinationWideRow {
    /// Value of `column`. Band fields shadow the row's own `date` and `area`.
    pub fn get(&self, column: &str) -> Value {
        if let Some(value) = self.fields.get(column) {
            return value.clone();
        }
        match column {
            "date" => Value::String(self.date.to_string()),
            "area" => Value::String(self.area.clone()),
            _ => Value::Null,
        }
    }
}

/// Column order for the wide table: `date`, `area`, then band keys in the
/// order they are first seen.
pub fn wide_columns(rows: &[VaccinationWideRow]) -> Vec<String> {
    let mut columns = vec!["date".to_string(), "area".to_string()];
    let mut seen: HashSet<&str> = columns.iter().map(String::as_str).collect();
    let mut extra = Vec::new();

    for row in rows {
        for key in row.fields.keys() {
            if seen.insert(key.as_str()) {
                extra.push(key.clone());
            }
        }
    }

    columns.extend(extra);
    columns
}
