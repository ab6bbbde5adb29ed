//! COVID-19 dashboard statistics pipeline.
//!
//! Raw records from the nation and region queries are normalized, gaps in
//! the cumulative columns are back-filled per area, incomplete rows are
//! dropped, daily columns are replaced by rolling averages and the per-age
//! vaccination lists are flattened into a wide table.

pub mod filter;
pub mod flatten;
pub mod gapfill;
pub mod normalize;
pub mod pipeline;
pub mod rolling;
pub mod summary;
pub mod types;

pub use pipeline::{CovidReport, process, run};
