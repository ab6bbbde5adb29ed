//! Row types flowing through the statistics pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Output field name → dashboard metric name, sent as the `structure`
/// query parameter. The output names are what [`Observation`] deserializes.
pub const STRUCTURE: &[(&str, &str)] = &[
    ("date", "date"),
    ("areaName", "areaName"),
    ("daily_cases", "newCasesByPublishDate"),
    ("cumulative_cases", "cumCasesByPublishDate"),
    ("daily_deaths", "newDeathsByPublishDate"),
    ("cumulative_deaths", "cumDeathsByPublishDate"),
    ("cumulative_vaccinated", "cumPeopleVaccinatedCompleteByVaccinationDate"),
    ("vaccination_age", "vaccinationsAgeDemographics"),
];

/// Vaccination metrics for one age band, e.g.
/// `{"age": "50_54", "cumPeopleVaccinatedFirstDoseByVaccinationDate": 1234, ...}`.
///
/// Key sets differ between bands and over time; absent keys are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgeBandRecord(pub Map<String, Value>);

impl AgeBandRecord {
    pub fn age(&self) -> Option<&str> {
        self.0.get("age").and_then(Value::as_str)
    }
}

/// One (area, date) record after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub area: String,
    pub daily_cases: Option<i64>,
    pub cumulative_cases: Option<i64>,
    pub daily_deaths: Option<i64>,
    pub cumulative_deaths: Option<i64>,
    pub cumulative_vaccinated: Option<i64>,
    #[serde(rename = "vaccination_age")]
    pub vaccination_age_breakdown: Option<Vec<AgeBandRecord>>,
}

impl Observation {
    pub fn cumulative(&self, field: CumulativeField) -> Option<i64> {
        match field {
            CumulativeField::Cases => self.cumulative_cases,
            CumulativeField::Deaths => self.cumulative_deaths,
            CumulativeField::Vaccinated => self.cumulative_vaccinated,
        }
    }

    pub fn cumulative_mut(&mut self, field: CumulativeField) -> &mut Option<i64> {
        match field {
            CumulativeField::Cases => &mut self.cumulative_cases,
            CumulativeField::Deaths => &mut self.cumulative_deaths,
            CumulativeField::Vaccinated => &mut self.cumulative_vaccinated,
        }
    }

    pub fn daily(&self, field: DailyField) -> Option<i64> {
        match field {
            DailyField::Cases => self.daily_cases,
            DailyField::Deaths => self.daily_deaths,
        }
    }
}

/// Running-total columns eligible for gap-filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CumulativeField {
    Cases,
    Deaths,
    Vaccinated,
}

impl CumulativeField {
    pub const ALL: [CumulativeField; 3] = [
        CumulativeField::Deaths,
        CumulativeField::Cases,
        CumulativeField::Vaccinated,
    ];

    pub fn column(self) -> &'static str {
        match self {
            CumulativeField::Cases => "cumulative_cases",
            CumulativeField::Deaths => "cumulative_deaths",
            CumulativeField::Vaccinated => "cumulative_vaccinated",
        }
    }
}

/// Per-day columns that get a rolling average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyField {
    Cases,
    Deaths,
}

/// An observation whose daily columns have been replaced by their rolling
/// averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmoothedObservation {
    pub date: NaiveDate,
    pub area: String,
    pub cumulative_cases: Option<i64>,
    pub cumulative_deaths: Option<i64>,
    pub cumulative_vaccinated: Option<i64>,
    pub daily_cases_roll_avg: Option<f64>,
    pub daily_deaths_roll_avg: Option<f64>,
    #[serde(skip)]
    pub vaccination_age_breakdown: Option<Vec<AgeBandRecord>>,
}

impl SmoothedObservation {
    pub fn age_bands(&self) -> &[AgeBandRecord] {
        self.vaccination_age_breakdown.as_deref().unwrap_or_default()
    }
}

/// One (date, area, age band) row of the wide vaccination table.
#[derive(Debug, Clone, PartialEq)]
pub struct VaccinationWideRow {
    pub date: NaiveDate,
    pub area: String,
    pub fields: Map<String, Value>,
}
