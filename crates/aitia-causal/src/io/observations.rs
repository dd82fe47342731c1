//! Observation table: `case, label, timestamp`, one record per row.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use aitia_core::config::IngestConfig;
use aitia_core::constants::OBSERVATION_HEADER;
use aitia_core::errors::{ExportError, SchemaError};
use aitia_core::Observation;
use tracing::info;

use super::csv::{escape_field, records, split_record};
use crate::index::ObservationIndex;

/// Parse an observation table. Column order is fixed; header names are not checked.
pub fn read_observations<R: BufRead>(
    reader: R,
    config: &IngestConfig,
) -> Result<Vec<Observation>, SchemaError> {
    let delimiter = config.effective_delimiter();
    let mut rows = records(reader.lines(), delimiter);

    if config.effective_has_header() {
        match rows.next() {
            Some(header) => {
                header.map_err(read_error)?;
            }
            None => return Err(SchemaError::MissingHeader),
        }
    }

    let mut observations = Vec::new();
    for (position, record) in rows.enumerate() {
        let row = position + 1;
        let record = record.map_err(read_error)?;
        let fields = split_record(&record, delimiter).map_err(|message| SchemaError::Read {
            message: format!("row {row}: {message}"),
        })?;
        observations.push(parse_fields(fields, row)?);
    }
    Ok(observations)
}

/// Read an observation table from `path`.
pub fn load_observations(path: &Path, config: &IngestConfig) -> Result<Vec<Observation>, SchemaError> {
    let file = File::open(path).map_err(|e| SchemaError::Read {
        message: format!("{}: {e}", path.display()),
    })?;
    let observations = read_observations(BufReader::new(file), config)?;
    info!(path = %path.display(), records = observations.len(), "observations loaded");
    Ok(observations)
}

/// Read an observation table from `path` and index it.
pub fn load_index(path: &Path, config: &IngestConfig) -> Result<ObservationIndex, SchemaError> {
    ObservationIndex::build(load_observations(path, config)?)
}

/// Write records as an observation table with a header row.
pub fn write_observations<'a, W, I>(
    mut writer: W,
    observations: I,
    config: &IngestConfig,
) -> Result<(), ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a Observation>,
{
    let delimiter = config.effective_delimiter();
    let sep = delimiter.to_string();
    writeln!(writer, "{}", OBSERVATION_HEADER.join(sep.as_str()))?;
    for record in observations {
        writeln!(
            writer,
            "{}{sep}{}{sep}{}",
            escape_field(&record.case_id, delimiter),
            escape_field(&record.label, delimiter),
            record.timestamp,
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn parse_fields(fields: Vec<String>, row: usize) -> Result<Observation, SchemaError> {
    let [case_id, label, timestamp]: [String; 3] =
        fields
            .try_into()
            .map_err(|fields: Vec<String>| SchemaError::FieldCount {
                row,
                found: fields.len(),
            })?;

    if case_id.is_empty() {
        return Err(SchemaError::MissingField {
            row,
            field: "case_id",
        });
    }
    if label.is_empty() {
        return Err(SchemaError::MissingField {
            row,
            field: "label",
        });
    }
    let raw = timestamp.trim();
    if raw.is_empty() {
        return Err(SchemaError::MissingField {
            row,
            field: "timestamp",
        });
    }
    let timestamp = raw
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite())
        .ok_or_else(|| SchemaError::InvalidTimestamp {
            row,
            value: raw.to_string(),
        })?;

    Ok(Observation {
        case_id,
        label,
        timestamp,
    })
}

fn read_error(e: std::io::Error) -> SchemaError {
    SchemaError::Read {
        message: e.to_string(),
    }
}
