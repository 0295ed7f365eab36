//! Line-delimited JSON export and import.
//!
//! One receipt per line, in append order. Each line parses on its own, and
//! a whole file can be checked with [`verify_receipts`](crate::verify_receipts).

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use erl_types::Receipt;

use crate::error::ExportError;

/// Serialize receipts, one JSON object per element.
pub fn to_json_lines(receipts: &[Receipt]) -> Result<Vec<String>, ExportError> {
    receipts
        .iter()
        .enumerate()
        .map(|(index, receipt)| {
            serde_json::to_string(receipt).map_err(|e| ExportError::Serialize {
                index,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Write receipts as newline-terminated JSON lines.
pub fn write_json_lines<W: Write>(receipts: &[Receipt], mut writer: W) -> Result<(), ExportError> {
    for line in to_json_lines(receipts)? {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Parse an export. Blank lines are skipped; line numbers in errors are 1-based.
pub fn read_export<R: BufRead>(reader: R) -> Result<Vec<Receipt>, ExportError> {
    let mut receipts = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let receipt = serde_json::from_str(&line).map_err(|e| ExportError::Parse {
            line: i + 1,
            message: e.to_string(),
        })?;
        receipts.push(receipt);
    }
    Ok(receipts)
}

pub fn read_export_file(path: &Path) -> Result<Vec<Receipt>, ExportError> {
    read_export(BufReader::new(File::open(path)?))
}
