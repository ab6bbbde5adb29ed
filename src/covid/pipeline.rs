use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use crate::config::CovidConfig;
use crate::covid::filter::retain_complete;
use crate::covid::flatten::flatten_age_bands;
use crate::covid::gapfill::backfill_cumulative;
use crate::covid::normalize::normalize;
use crate::covid::rolling::smooth;
use crate::covid::summary::{MissingDataSummary, missing_data_summary};
use crate::covid::types::{CumulativeField, STRUCTURE, SmoothedObservation, VaccinationWideRow};
use crate::error::NormalizeError;
use crate::services::statistics_api::StatisticsApi;

pub const NATION_FILTER: &str = "areaType=nation";
pub const REGION_FILTER: &str = "areaType=region";

/// Everything the statistics pipeline produces.
#[derive(Debug)]
pub struct CovidReport {
    /// Missing-value rates of the normalized table, before any filling.
    pub missing: Vec<MissingDataSummary>,
    /// Smoothed rows sorted by (area, date).
    pub rows: Vec<SmoothedObservation>,
    pub records_in: usize,
    pub cells_filled: usize,
    pub rows_dropped: usize,
}

impl CovidReport {
    /// The wide per-age-band vaccination table, built lazily.
    pub fn vaccinations<'a>(
        &'a self,
        config: &'a CovidConfig,
    ) -> impl Iterator<Item = VaccinationWideRow> + 'a {
        flatten_age_bands(&self.rows, &config.band_column_renames)
    }
}

/// Runs every transformation step on already-fetched records.
pub fn process(records: Vec<Value>, config: &CovidConfig) -> Result<CovidReport, NormalizeError> {
    let records_in = records.len();

    let mut observations = normalize(records, &config.excluded_area)?;
    let missing = missing_data_summary(&observations);

    let cells_filled = backfill_cumulative(&mut observations, &CumulativeField::ALL);

    let before = observations.len();
    let observations = retain_complete(observations, config.completeness_filter.required_fields());
    let rows_dropped = before - observations.len();

    let rows = smooth(observations, config.rolling_window);

    Ok(CovidReport {
        missing,
        rows,
        records_in,
        cells_filled,
        rows_dropped,
    })
}

/// Fetches national and regional records and processes them together.
pub async fn run<S>(api: &S, config: &CovidConfig) -> Result<CovidReport>
where
    S: StatisticsApi + ?Sized,
{
    let national = api
        .fetch_records(NATION_FILTER, STRUCTURE)
        .await
        .context("fetching national statistics")?;
    let regional = api
        .fetch_records(REGION_FILTER, STRUCTURE)
        .await
        .context("fetching regional statistics")?;
    info!(national = national.len(), regional = regional.len(), "Statistics fetched");

    let mut records = national;
    records.extend(regional);

    let report = process(records, config).context("processing statistics")?;
    info!(
        records = report.records_in,
        rows = report.rows.len(),
        filled = report.cells_filled,
        dropped = report.rows_dropped,
        "Statistics pipeline finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompletenessFilter;
    use serde_json::json;

    fn records() -> Vec<Value> {
        vec![
            json!({"date": "2021-01-03", "areaName": "England", "daily_cases": 100,
                   "cumulative_cases": 1000, "cumulative_vaccinated": 10}),
            json!({"date": "2021-01-02", "areaName": "Wales", "daily_cases": 2,
                   "cumulative_cases": null, "cumulative_vaccinated": null}),
            json!({"date": "2021-01-03", "areaName": "Wales", "daily_cases": 4,
                   "cumulative_cases": 50, "cumulative_vaccinated": 5,
                   "vaccination_age": [{"age": "18_24"}, {"age": "25_29"}]}),
            json!({"date": "2021-01-01", "areaName": "Wales", "daily_cases": 6,
                   "cumulative_cases": 40, "cumulative_vaccinated": null}),
        ]
    }

    #[test]
    fn test_process_end_to_end() {
        let config = CovidConfig::default();
        let report = process(records(), &config).unwrap();

        assert_eq!(report.records_in, 4);
        // the 01-01 vaccination gap is filled from 01-03
        assert_eq!(report.rows_dropped, 0);
        assert_eq!(report.rows.len(), 3);
        assert!(report.rows.iter().all(|r| r.area != "England"));

        let jan2 = &report.rows[1];
        assert_eq!(jan2.date.to_string(), "2021-01-02");
        assert_eq!(jan2.cumulative_cases, Some(50));
        assert_eq!(jan2.cumulative_vaccinated, Some(5));
        assert_eq!(jan2.daily_cases_roll_avg, Some(4.0));

        let wide: Vec<_> = report.vaccinations(&config).collect();
        assert_eq!(wide.len(), 2);
    }

    #[test]
    fn test_missing_summary_taken_before_fill() {
        let report = process(records(), &CovidConfig::default()).unwrap();
        let cases = report
            .missing
            .iter()
            .find(|m| m.column == "cumulative_cases")
            .unwrap();
        assert_eq!(cases.missing, 1);
    }

    #[test]
    fn test_all_cumulative_filter_drops_rows_without_deaths() {
        let config = CovidConfig {
            completeness_filter: CompletenessFilter::AllCumulative,
            ..CovidConfig::default()
        };
        let report = process(records(), &config).unwrap();
        assert!(report.rows.is_empty());
        assert_eq!(report.rows_dropped, 3);
    }
}
