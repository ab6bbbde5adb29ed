//! Raw dashboard records → [`Observation`]s.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::covid::types::{AgeBandRecord, Observation};
use crate::error::NormalizeError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Shape of one record as returned by the dashboard API. Canonical rows
/// (`area` instead of `areaName`) are accepted too.
#[derive(Deserialize)]
struct RawRecord {
    date: String,
    #[serde(rename = "areaName", alias = "area")]
    area: String,
    #[serde(default)]
    daily_cases: Option<i64>,
    #[serde(default)]
    cumulative_cases: Option<i64>,
    #[serde(default)]
    daily_deaths: Option<i64>,
    #[serde(default)]
    cumulative_deaths: Option<i64>,
    #[serde(default)]
    cumulative_vaccinated: Option<i64>,
    #[serde(default)]
    vaccination_age: Option<Vec<AgeBandRecord>>,
}

/// Drops rows for `excluded_area`, canonicalizes the area column and parses
/// dates. Input order is preserved; a repeated (area, date) keeps its first
/// occurrence.
///
/// # Errors
///
/// Any record that does not match the expected shape, or whose date is not
/// `YYYY-MM-DD`, aborts normalization.
pub fn normalize(
    records: Vec<Value>,
    excluded_area: &str,
) -> Result<Vec<Observation>, NormalizeError> {
    let total = records.len();
    let mut seen: HashSet<(String, NaiveDate)> = HashSet::with_capacity(total);
    let mut out = Vec::with_capacity(total);
    let mut excluded = 0usize;

    for (index, value) in records.into_iter().enumerate() {
        let raw: RawRecord = serde_json::from_value(value)
            .map_err(|source| NormalizeError::InvalidRecord { index, source })?;

        if raw.area == excluded_area {
            excluded += 1;
            continue;
        }

        let date = NaiveDate::parse_from_str(&raw.date, DATE_FORMAT).map_err(|source| {
            NormalizeError::InvalidDate {
                index,
                area: raw.area.clone(),
                value: raw.date.clone(),
                source,
            }
        })?;

        if !seen.insert((raw.area.clone(), date)) {
            warn!(area = %raw.area, %date, "Duplicate observation ignored");
            continue;
        }

        out.push(Observation {
            date,
            area: raw.area,
            daily_cases: raw.daily_cases,
            cumulative_cases: raw.cumulative_cases,
            daily_deaths: raw.daily_deaths,
            cumulative_deaths: raw.cumulative_deaths,
            cumulative_vaccinated: raw.cumulative_vaccinated,
            vaccination_age_breakdown: raw.vaccination_age,
        });
    }

    debug!(total, excluded, kept = out.len(), "Records normalized");
    Ok(out)
}
