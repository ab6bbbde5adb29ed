//! Drops observations still missing required cumulative values.

use tracing::{debug, warn};

use crate::covid::types::{CumulativeField, Observation};

/// Keeps only rows that carry every field in `required`.
///
/// A field that is absent from every input row empties the table; that is
/// logged as a warning since it usually means the source never publishes it.
pub fn retain_complete(rows: Vec<Observation>, required: &[CumulativeField]) -> Vec<Observation> {
    if rows.is_empty() || required.is_empty() {
        return rows;
    }

    for &field in required {
        if rows.iter().all(|r| r.cumulative(field).is_none()) {
            warn!(
                column = field.column(),
                "Column has no values at all; every row will be dropped"
            );
        }
    }

    let before = rows.len();
    let kept: Vec<Observation> = rows
        .into_iter()
        .filter(|r| required.iter().all(|&f| r.cumulative(f).is_some()))
        .collect();

    debug!(before, kept = kept.len(), "Incomplete rows dropped");
    kept
}
