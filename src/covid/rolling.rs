//! Trailing moving averages of the daily columns.

use tracing::debug;

use crate::covid::types::{DailyField, Observation, SmoothedObservation};

/// Mean of the trailing `window` values ending at each position.
///
/// The window narrows at the start of the series. Missing values are skipped;
/// a window holding no values at all yields `None`.
pub fn rolling_mean(values: &[Option<i64>], window: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    (0..values.len())
        .map(|k| {
            let start = k.saturating_sub(window - 1);
            let (sum, n) = values[start..=k]
                .iter()
                .flatten()
                .fold((0.0, 0usize), |(sum, n), &v| (sum + v as f64, n + 1));
            (n > 0).then(|| sum / n as f64)
        })
        .collect()
}

/// Sorts by (area, date), averages the daily columns per area and drops the
/// raw daily values.
pub fn smooth(mut rows: Vec<Observation>, window: usize) -> Vec<SmoothedObservation> {
    rows.sort_by(|a, b| a.area.cmp(&b.area).then(a.date.cmp(&b.date)));

    let mut out = Vec::with_capacity(rows.len());
    let mut areas = 0;

    for group in rows.chunk_by(|a, b| a.area == b.area) {
        areas += 1;
        let series = |field: DailyField| -> Vec<Option<i64>> {
            group.iter().map(|r| r.daily(field)).collect()
        };
        let cases = rolling_mean(&series(DailyField::Cases), window);
        let deaths = rolling_mean(&series(DailyField::Deaths), window);

        out.extend(group.iter().zip(cases).zip(deaths).map(|((row, cases), deaths)| {
            SmoothedObservation {
                date: row.date,
                area: row.area.clone(),
                cumulative_cases: row.cumulative_cases,
                cumulative_deaths: row.cumulative_deaths,
                cumulative_vaccinated: row.cumulative_vaccinated,
                daily_cases_roll_avg: cases,
                daily_deaths_roll_avg: deaths,
                vaccination_age_breakdown: row.vaccination_age_breakdown.clone(),
            }
        }));
    }

    debug!(areas, rows = out.len(), window, "Rolling averages computed");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(area: &str, day: u32, cases: Option<i64>, deaths: Option<i64>) -> Observation {
        Observation {
            date: NaiveDate::from_ymd_opt(2021, 1, day).unwrap(),
            area: area.to_string(),
            daily_cases: cases,
            cumulative_cases: None,
            daily_deaths: deaths,
            cumulative_deaths: None,
            cumulative_vaccinated: None,
            vaccination_age_breakdown: None,
        }
    }

    #[test]
    fn test_window_narrows_at_start() {
        let values: Vec<Option<i64>> = (1..=3).map(Some).collect();
        assert_eq!(rolling_mean(&values, 7), vec![Some(1.0), Some(1.5), Some(2.0)]);
    }

    #[test]
    fn test_full_window_trails_by_seven() {
        let values: Vec<Option<i64>> = (1..=10).map(Some).collect();
        let avg = rolling_mean(&values, 7);

        for (k, got) in avg.iter().enumerate() {
            let start = k.saturating_sub(6);
            let expected = values[start..=k].iter().flatten().sum::<i64>() as f64
                / (k - start + 1) as f64;
            assert_eq!(*got, Some(expected), "row {k}");
        }
        assert_eq!(avg[9], Some(7.0));
    }

    #[test]
    fn test_missing_values_skipped() {
        let values = vec![None, Some(4), None, Some(8)];
        assert_eq!(rolling_mean(&values, 7), vec![None, Some(4.0), Some(4.0), Some(6.0)]);
    }

    #[test]
    fn test_smooth_is_per_area_and_sorted() {
        let rows = vec![
            obs("B", 2, Some(20), None),
            obs("A", 2, Some(4), Some(1)),
            obs("B", 1, Some(10), None),
            obs("A", 1, Some(2), Some(3)),
        ];
        let smoothed = smooth(rows, 7);

        let keys: Vec<_> = smoothed.iter().map(|r| (r.area.as_str(), r.date)).collect();
        let day = |d| NaiveDate::from_ymd_opt(2021, 1, d).unwrap();
        assert_eq!(keys, vec![("A", day(1)), ("A", day(2)), ("B", day(1)), ("B", day(2))]);

        assert_eq!(smoothed[0].daily_cases_roll_avg, Some(2.0));
        assert_eq!(smoothed[1].daily_cases_roll_avg, Some(3.0));
        assert_eq!(smoothed[1].daily_deaths_roll_avg, Some(2.0));
        assert_eq!(smoothed[2].daily_cases_roll_avg, Some(10.0));
        assert_eq!(smoothed[3].daily_cases_roll_avg, Some(15.0));
        assert_eq!(smoothed[3].daily_deaths_roll_avg, None);
    }

    #[test]
    fn test_window_of_one_is_identity() {
        let values = vec![Some(3), None, Some(5)];
        assert_eq!(rolling_mean(&values, 1), vec![Some(3.0), None, Some(5.0)]);
    }
}
