//! CSV loader for workflow task tables.

use chrono_tz::Tz;
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use taskpulse_core::TaskRecord;
use tracing::{debug, info};

use crate::columns::{Column, ColumnMap};
use crate::error::{IngestError, IngestResult};
use crate::timestamp::parse_timestamp;

/// Load-time settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    /// Zone that offset-bearing timestamps are converted into.
    pub timezone: Tz,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { timezone: Tz::UTC }
    }
}

/// Load a task table from a CSV file.
pub fn load_tasks_csv(path: impl AsRef<Path>, opts: &LoadOptions) -> IngestResult<Vec<TaskRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_tasks_csv(file, opts)?;
    info!(rows = records.len(), path = %path.display(), "loaded task records");
    Ok(records)
}

/// Parse a task table from any CSV reader (header row required).
///
/// Any malformed timestamp aborts the whole load.
pub fn read_tasks_csv<R: Read>(reader: R, opts: &LoadOptions) -> IngestResult<Vec<TaskRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(rdr.headers()?)?;
    let mut out = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        // Header is line 1.
        let line = record.position().map(|p| p.line()).unwrap_or(i as u64 + 2);
        out.push(parse_row(&columns, &record, line, opts)?);
    }

    Ok(out)
}

fn parse_row(
    columns: &ColumnMap,
    record: &StringRecord,
    line: u64,
    opts: &LoadOptions,
) -> IngestResult<TaskRecord> {
    let timestamp = |col: Column| {
        let value = columns.cell(record, col);
        parse_timestamp(value, opts.timezone).map_err(|reason| IngestError::MalformedInput {
            line,
            column: col.name(),
            value: value.to_string(),
            reason,
        })
    };
    let number = |col: Column| parse_number(columns.cell(record, col), col, line);
    let text = |col: Column| columns.cell(record, col).to_string();

    let approval = columns.cell(record, Column::ApprovalLevel);

    Ok(TaskRecord {
        start_time: timestamp(Column::StartTime)?,
        end_time: timestamp(Column::EndTime)?,
        department: text(Column::Department),
        priority_level: text(Column::PriorityLevel),
        assigned_employee: text(Column::AssignedEmployee),
        approval_level: (!approval.is_empty()).then(|| approval.to_string()),
        estimated_duration: number(Column::EstimatedDuration),
        actual_duration: number(Column::ActualDuration),
        cost_per_task: number(Column::CostPerTask),
    })
}

/// Blank, non-numeric and non-finite cells become null.
fn parse_number(cell: &str, col: Column, line: u64) -> Option<f64> {
    if cell.is_empty() {
        debug!(line, column = col.name(), "blank cell treated as null");
        return None;
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            debug!(line, column = col.name(), value = cell, "non-numeric cell treated as null");
            None
        }
    }
}
