//! Delimited coordinate tables: one point per row, three numeric fields.
use constants::processing::{TABLE_COMMENT_PREFIX, TABLE_DELIMITER};
use planar_alignment::ShapeError;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Parse table text into `[x, y, z]` rows.
/// Blank lines and `#` comments are skipped; row numbers in errors are
/// 1-based physical line numbers.
pub fn parse_table(text: &str) -> Result<Vec<[f64; 3]>, ShapeError> {
    let mut rows = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(TABLE_COMMENT_PREFIX) {
            continue;
        }

        let row = idx + 1;
        let fields: Vec<&str> = line.split(TABLE_DELIMITER).map(str::trim).collect();
        if fields.len() != 3 {
            return Err(ShapeError::FieldCount {
                row,
                found: fields.len(),
            });
        }

        let mut values = [0.0; 3];
        for (field, (value, raw)) in values.iter_mut().zip(&fields).enumerate() {
            *value = raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ShapeError::NotNumeric {
                    row,
                    field: field + 1,
                    value: raw.to_string(),
                })?;
        }
        rows.push(values);
    }

    Ok(rows)
}

/// Read a coordinate table from disk.
pub fn read_table(path: &Path) -> Result<Vec<[f64; 3]>, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    Ok(parse_table(&text)?)
}

/// Format one row with shortest round-trip float formatting.
pub fn format_row(row: &[f64; 3]) -> String {
    format!(
        "{}{d}{}{d}{}",
        row[0],
        row[1],
        row[2],
        d = TABLE_DELIMITER
    )
}

/// Write rows to disk, one per line, in the given order.
pub fn write_table(path: &Path, rows: &[[f64; 3]]) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = BufWriter::new(File::create(path)?);
    for row in rows {
        writeln!(writer, "{}", format_row(row))?;
    }
    writer.flush()?;
    Ok(())
}
