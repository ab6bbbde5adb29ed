//! Per-area backward fill of cumulative columns.

use std::collections::HashMap;
use tracing::debug;

use crate::covid::types::{CumulativeField, Observation};

/// Fills missing cumulative values from the most recent later-dated known
/// value of the same area.
///
/// Each area is scanned newest to oldest and every field is carried
/// independently. Values with no later known value stay missing. Rows are
/// modified in place; their order and number never change.
///
/// Returns the number of cells filled.
pub fn backfill_cumulative(rows: &mut [Observation], fields: &[CumulativeField]) -> usize {
    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, row) in rows.iter().enumerate() {
        groups.entry(row.area.as_str()).or_default().push(idx);
    }

    let mut groups: Vec<Vec<usize>> = groups.into_values().collect();
    for indices in &mut groups {
        indices.sort_by(|&a, &b| rows[b].date.cmp(&rows[a].date));
    }

    let mut filled = 0;
    for indices in &groups {
        for &field in fields {
            let mut carry = None;
            for &idx in indices {
                let cell = rows[idx].cumulative_mut(field);
                match *cell {
                    Some(value) => carry = Some(value),
                    None if carry.is_some() => {
                        *cell = carry;
                        filled += 1;
                    }
                    None => {}
                }
            }
        }
    }

    debug!(areas = groups.len(), filled, "Cumulative gaps filled");
    filled
}
