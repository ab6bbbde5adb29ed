//! Output formatting and persistence for pipeline results.
//!
//! Supports table printing, JSON pretty-printing and CSV export.

use anyhow::{Context, Result};
use comfy_table::{Table, presets::UTF8_FULL};
use csv::WriterBuilder;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::covid::flatten::wide_columns;
use crate::covid::summary::MissingDataSummary;
use crate::covid::types::{SmoothedObservation, VaccinationWideRow};
use crate::text::TextSummary;

fn new_table<I, S>(header: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: ToString,
{
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(header.into_iter().map(|h| h.to_string()).collect::<Vec<_>>());
    table
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn missing_table(summary: &[MissingDataSummary]) -> Table {
    let mut table = new_table(["column", "missing", "missing %"]);
    for s in summary {
        table.add_row(vec![
            s.column.to_string(),
            s.missing.to_string(),
            format!("{:.2}", s.percent),
        ]);
    }
    table
}

/// The first `head` smoothed rows.
pub fn covid_table(rows: &[SmoothedObservation], head: usize) -> Table {
    let mut table = new_table([
        "date",
        "area",
        "cumulative_cases",
        "cumulative_deaths",
        "cumulative_vaccinated",
        "daily_cases_roll_avg",
        "daily_deaths_roll_avg",
    ]);
    for r in rows.iter().take(head) {
        table.add_row(vec![
            r.date.to_string(),
            r.area.clone(),
            opt(r.cumulative_cases),
            opt(r.cumulative_deaths),
            opt(r.cumulative_vaccinated),
            opt(r.daily_cases_roll_avg.map(|v| format!("{v:.2}"))),
            opt(r.daily_deaths_roll_avg.map(|v| format!("{v:.2}"))),
        ]);
    }
    table
}

pub fn text_table(summaries: &[TextSummary]) -> Table {
    let mut table = new_table([
        "winner name",
        "count words",
        "count sentences",
        "count paragraphs",
        "common words",
        "common words after preprocessing",
    ]);
    for s in summaries {
        table.add_row(vec![
            s.name.clone(),
            s.count_words.to_string(),
            s.count_sentences.to_string(),
            s.count_paragraphs.to_string(),
            s.common_words.join(", "),
            s.common_words_processed.join(", "),
        ]);
    }
    table
}

/// Prints a table to stdout.
pub fn print_table(title: &str, table: &Table) {
    println!("{title}\n{table}");
}

/// Prints any serializable value as pretty JSON to stdout.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes `rows` to a new CSV file at `path`, replacing any existing file.
pub fn write_records<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = rows.len(), "CSV written");
    Ok(())
}

/// Writes the wide vaccination table. Columns are the union of all band
/// keys; a band without a key leaves that cell empty.
pub fn write_wide_csv(path: &Path, rows: &[VaccinationWideRow]) -> Result<()> {
    let columns = wide_columns(rows);
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    writer.write_record(&columns)?;
    for row in rows {
        writer.write_record(columns.iter().map(|c| cell(&row.get(c))))?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = rows.len(), columns = columns.len(), "Wide CSV written");
    Ok(())
}

/// Flat CSV shape of a [`TextSummary`]; token lists are joined with `|`.
#[derive(Serialize)]
struct TextSummaryRecord<'a> {
    winner_name: &'a str,
    count_words: usize,
    count_sentences: usize,
    count_paragraphs: usize,
    common_words: String,
    common_words_processed: String,
}

pub fn write_text_summaries(path: &Path, summaries: &[TextSummary]) -> Result<()> {
    let records: Vec<TextSummaryRecord> = summaries
        .iter()
        .map(|s| TextSummaryRecord {
            winner_name: &s.name,
            count_words: s.count_words,
            count_sentences: s.count_sentences,
            count_paragraphs: s.count_paragraphs,
            common_words: s.common_words.join("|"),
            common_words_processed: s.common_words_processed.join("|"),
        })
        .collect();
    write_records(path, &records)
}
