//! Missing-data rates per column.

use serde::Serialize;

use crate::covid::types::Observation;

/// How many values of one column are missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingDataSummary {
    pub column: &'static str,
    pub missing: usize,
    pub percent: f64,
}

pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// One entry per observation column, in table order.
pub fn missing_data_summary(rows: &[Observation]) -> Vec<MissingDataSummary> {
    let total = rows.len();
    let count = |pred: fn(&Observation) -> bool| rows.iter().filter(|r| pred(r)).count();

    let columns: [(&'static str, usize); 8] = [
        ("date", 0),
        ("area", count(|r| r.area.is_empty())),
        ("daily_cases", count(|r| r.daily_cases.is_none())),
        ("cumulative_cases", count(|r| r.cumulative_cases.is_none())),
        ("daily_deaths", count(|r| r.daily_deaths.is_none())),
        ("cumulative_deaths", count(|r| r.cumulative_deaths.is_none())),
        ("cumulative_vaccinated", count(|r| r.cumulative_vaccinated.is_none())),
        ("vaccination_age", count(|r| r.vaccination_age_breakdown.is_none())),
    ];

    columns
        .into_iter()
        .map(|(column, missing)| MissingDataSummary {
            column,
            missing,
            percent: pct(missing, total),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(cases: Option<i64>) -> Observation {
        Observation {
            date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            area: "North West".to_string(),
            daily_cases: Some(1),
            cumulative_cases: cases,
            daily_deaths: None,
            cumulative_deaths: None,
            cumulative_vaccinated: None,
            vaccination_age_breakdown: Some(vec![]),
        }
    }

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(pct(10, 0), 0.0);
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(pct(50, 100), 50.0);
        assert_eq!(pct(1, 4), 25.0);
    }

    #[test]
    fn test_summary_counts() {
        let rows = vec![obs(Some(1)), obs(None), obs(None), obs(Some(4))];
        let summary = missing_data_summary(&rows);

        let get = |name: &str| summary.iter().find(|s| s.column == name).unwrap();
        assert_eq!(summary.len(), 8);
        assert_eq!(get("cumulative_cases").missing, 2);
        assert_eq!(get("cumulative_cases").percent, 50.0);
        assert_eq!(get("daily_deaths").percent, 100.0);
        assert_eq!(get("daily_cases").missing, 0);
        assert_eq!(get("vaccination_age").missing, 0);
    }

    #[test]
    fn test_summary_of_empty_table() {
        let summary = missing_data_summary(&[]);
        assert!(summary.iter().all(|s| s.missing == 0 && s.percent == 0.0));
    }
}
