// Statcast CSV loading and schema checks.
//
// The engine trusts its input, so this is where malformed rows are rejected.
// Unlike the registry loader, a bad event row aborts the whole load.

use crate::events::event::StatcastRow;
use std::io::Read;
use std::path::Path;
use tracing::info;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse event at data row {row}: {source}")]
    Parse { row: usize, source: csv::Error },

    #[error("malformed event at data row {row}: {message}")]
    Malformed { row: usize, message: String },
}

// ---------------------------------------------------------------------------
// Schema checks
// ---------------------------------------------------------------------------

/// Check the invariants every later stage assumes. `Err` carries a short
/// description of the first violation.
fn check_row(row: &StatcastRow) -> Result<(), String> {
    if row.inning == 0 {
        return Err("inning must be at least 1".into());
    }
    if row.home_team.trim().is_empty() || row.away_team.trim().is_empty() {
        return Err("home_team and away_team must be non-empty".into());
    }
    if row.home_team == row.away_team {
        return Err(format!(
            "home_team and away_team are both '{}'",
            row.home_team
        ));
    }
    if row.description.trim().is_empty() {
        return Err("description must be non-empty".into());
    }
    Ok(())
}

/// Validate rows built in memory. Row numbers in errors are 1-based.
pub fn validate_rows(rows: &[StatcastRow]) -> Result<(), IngestError> {
    for (idx, row) in rows.iter().enumerate() {
        check_row(row).map_err(|message| IngestError::Malformed {
            row: idx + 1,
            message,
        })?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Read statcast rows from any CSV source with a header line.
///
/// Extra columns are ignored and blank cells become `None`. The first row
/// that fails to deserialize or violates the schema stops the load.
pub fn read_events<R: Read>(rdr: R) -> Result<Vec<StatcastRow>, IngestError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize::<StatcastRow>().enumerate() {
        let row = idx + 1;
        let parsed = result.map_err(|source| IngestError::Parse { row, source })?;
        check_row(&parsed).map_err(|message| IngestError::Malformed { row, message })?;
        rows.push(parsed);
    }
    Ok(rows)
}

/// Load a statcast export from disk.
pub fn load_events(path: &Path) -> Result<Vec<StatcastRow>, IngestError> {
    let file = std::fs::File::open(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let rows = read_events(file)?;
    info!("Loaded {} pitch rows from {}", rows.len(), path.display());
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
