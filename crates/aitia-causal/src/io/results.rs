//! Epsilon result table: `cause, effect, w-start, w-end, epsilon`.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use aitia_core::config::ExportConfig;
use aitia_core::constants::RESULT_HEADER;
use aitia_core::errors::ExportError;
use aitia_core::Window;
use tracing::info;

use super::csv::{escape_field, records, split_record};
use crate::epsilon::EpsilonRow;

/// Write one row per result, after a header row. An undefined epsilon is
/// written as the configured marker.
pub fn write_results<W: Write>(
    mut writer: W,
    rows: &[EpsilonRow],
    config: &ExportConfig,
) -> Result<(), ExportError> {
    let delimiter = config.effective_delimiter();
    let marker = config.effective_undefined_marker();
    let sep = delimiter.to_string();

    writeln!(writer, "{}", RESULT_HEADER.join(sep.as_str()))?;
    for row in rows {
        let epsilon = match row.epsilon {
            Some(value) => value.to_string(),
            None => marker.to_string(),
        };
        writeln!(
            writer,
            "{}{sep}{}{sep}{}{sep}{}{sep}{}",
            escape_field(&row.cause, delimiter),
            escape_field(&row.effect, delimiter),
            row.window.start(),
            row.window.end(),
            escape_field(&epsilon, delimiter),
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the result table to `path`, replacing any existing file.
pub fn save_results(path: &Path, rows: &[EpsilonRow], config: &ExportConfig) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_results(BufWriter::new(file), rows, config)?;
    info!(path = %path.display(), rows = rows.len(), "results written");
    Ok(())
}

/// Parse a result table written by [`write_results`]. The undefined marker
/// and an empty epsilon field both read back as `None`.
pub fn read_results<R: BufRead>(
    reader: R,
    config: &ExportConfig,
) -> Result<Vec<EpsilonRow>, ExportError> {
    let delimiter = config.effective_delimiter();
    let marker = config.effective_undefined_marker();
    let mut lines = records(reader.lines(), delimiter);

    match lines.next() {
        Some(header) => {
            header?;
        }
        None => return Err(ExportError::MissingHeader),
    }

    let mut rows = Vec::new();
    for (position, record) in lines.enumerate() {
        let row = position + 1;
        let record = record?;
        let fields = split_record(&record, delimiter)
            .map_err(|message| ExportError::MalformedRow { row, message })?;
        rows.push(parse_row(fields, row, marker)?);
    }
    Ok(rows)
}

fn parse_row(fields: Vec<String>, row: usize, marker: &str) -> Result<EpsilonRow, ExportError> {
    let malformed = |message: String| ExportError::MalformedRow { row, message };

    let [cause, effect, start, end, epsilon]: [String; 5] =
        fields.try_into().map_err(|fields: Vec<String>| {
            malformed(format!("expected 5 fields, found {}", fields.len()))
        })?;

    let start = parse_number(&start, "w-start").map_err(malformed)?;
    let end = parse_number(&end, "w-end").map_err(malformed)?;
    let window = Window::new(start, end).map_err(|e| malformed(e.to_string()))?;

    let epsilon = match epsilon.trim() {
        "" => None,
        token if token == marker => None,
        token => Some(parse_number(token, "epsilon").map_err(malformed)?),
    };

    Ok(EpsilonRow {
        cause,
        effect,
        window,
        epsilon,
    })
}

fn parse_number(raw: &str, column: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| format!("{column} `{raw}` is not a number"))
}
