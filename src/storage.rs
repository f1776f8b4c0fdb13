//! CSV hand-off files between the two pipelines.
//!
//! Both tables are built fully in memory and written once; at a few thousand
//! rows per league season that is well within budget.

use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;
use tracing::info;

use crate::constants::columns::{MATCH_ID, ROUND, TOURNAMENT_SEASON};
use crate::data_fetcher::models::{MatchRecord, RoundRow};
use crate::error::AppError;

/// Writes the rounds table with header `Tournament_Season,Round,Match_ID`.
/// The header is written even when no rows were discovered.
pub fn write_round_rows(path: &Path, rows: &[RoundRow]) -> Result<(), AppError> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record([TOURNAMENT_SEASON, ROUND, MATCH_ID])?;
    for row in rows {
        writer.write_record([
            row.tournament_season.clone(),
            row.round.to_string(),
            row.match_id.to_string(),
        ])?;
    }
    writer.flush()?;
    info!("Wrote {} match ids to {}", rows.len(), path.display());
    Ok(())
}

/// Reads the `Match_ID` column of one CSV, in file order. Blank cells are skipped.
pub fn read_match_ids(path: &Path) -> Result<Vec<u64>, AppError> {
    let display = path.display().to_string();
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;

    let column = reader
        .headers()?
        .iter()
        .position(|header| header == MATCH_ID)
        .ok_or_else(|| AppError::missing_column(&display, MATCH_ID))?;

    let mut ids = Vec::new();
    for record in reader.records() {
        let record = record?;
        let Some(value) = record.get(column) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        let id = value
            .parse::<u64>()
            .map_err(|_| AppError::invalid_match_id(&display, value))?;
        ids.push(id);
    }
    Ok(ids)
}

/// Concatenates the ids of every file in order, without deduplication.
pub fn read_all_match_ids<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<u64>, AppError> {
    let mut all_ids = Vec::new();
    for path in paths {
        let ids = read_match_ids(path.as_ref())?;
        info!("Read {} match ids from {}", ids.len(), path.as_ref().display());
        all_ids.extend(ids);
    }
    Ok(all_ids)
}

/// Writes the match statistics table. With `with_index` a leading unnamed
/// column numbers the rows from 0.
pub fn write_match_records(
    path: &Path,
    records: &[MatchRecord],
    with_index: bool,
) -> Result<(), AppError> {
    let mut writer = WriterBuilder::new().from_path(path)?;

    let mut header: Vec<&str> = Vec::with_capacity(MatchRecord::FIELDS.len() + 1);
    if with_index {
        header.push("");
    }
    header.extend(MatchRecord::FIELDS);
    writer.write_record(&header)?;

    for (index, record) in records.iter().enumerate() {
        let mut row = Vec::with_capacity(header.len());
        if with_index {
            row.push(index.to_string());
        }
        row.extend(record.to_row());
        writer.write_record(&row)?;
    }
    writer.flush()?;
    info!("Wrote {} match records to {}", records.len(), path.display());
    Ok(())
}
