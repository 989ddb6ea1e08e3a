//! Benchmark results CSV/TSV reader.
use std::path::Path;

use anyhow::{Context, Result};
use csv::StringRecord;

use crate::data_handling::{Algorithm, BenchmarkRecord, BenchmarkTable};
use crate::error::ReportError;

/// Accepted header names for each logical column of the results table.
///
/// Header matching is case-insensitive and ignores surrounding whitespace.
/// The first alias present in the header wins.
#[derive(Debug, Clone)]
pub struct ResultsReaderConfig {
    pub array_type_columns: Vec<String>,
    pub algorithm_columns: Vec<String>,
    pub threshold_columns: Vec<String>,
    pub size_columns: Vec<String>,
    pub time_columns: Vec<String>,
    /// Field delimiter. When `None`, `.tsv` files use tabs and everything else commas.
    pub delimiter: Option<u8>,
}

impl Default for ResultsReaderConfig {
    fn default() -> Self {
        Self {
            array_type_columns: to_strings(&["array_type", "type", "тип_массива"]),
            algorithm_columns: to_strings(&["algorithm", "algo", "алгоритм"]),
            threshold_columns: to_strings(&["threshold", "порог"]),
            size_columns: to_strings(&["size", "n", "размер"]),
            time_columns: to_strings(&["time_microseconds", "time_us", "время_мкс"]),
            delimiter: None,
        }
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    array_type: usize,
    algorithm: usize,
    threshold: usize,
    size: usize,
    time: usize,
}

/// Read a benchmark results file using the default column aliases.
pub fn read_results_csv<P: AsRef<Path>>(path: P) -> Result<BenchmarkTable> {
    read_results_csv_with_config(path, &ResultsReaderConfig::default())
}

/// Read a benchmark results file using a custom configuration.
pub fn read_results_csv_with_config<P: AsRef<Path>>(
    path: P,
    config: &ResultsReaderConfig,
) -> Result<BenchmarkTable> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ReportError::InputNotFound(path.to_path_buf()).into());
    }

    let delimiter = config.delimiter.unwrap_or_else(|| delimiter_for(path));
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open results file: {}", path.display()))?;

    let headers = reader
        .headers()
        .map_err(|e| ReportError::malformed(0, e.to_string()))
        .with_context(|| format!("Failed to read header of {}", path.display()))?
        .clone();
    let columns = resolve_columns(&headers, config)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (row_idx, result) in reader.records().enumerate() {
        let row = row_idx + 1;
        let record = result.map_err(|e| ReportError::malformed(row, e.to_string()))?;
        match parse_record(&record, &columns, row)? {
            Some(parsed) => records.push(parsed),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!(
            "[sortbench::io] Skipped {} rows with an algorithm other than merge or hybrid",
            skipped
        );
    }
    log::info!(
        "[sortbench::io] Read {} rows from {}",
        records.len(),
        path.display()
    );
    Ok(BenchmarkTable::new(records))
}

fn delimiter_for(path: &Path) -> u8 {
    let is_tsv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("tsv"))
        .unwrap_or(false);
    if is_tsv {
        b'\t'
    } else {
        b','
    }
}

fn find_any_column(headers: &StringRecord, names: &[String]) -> Option<usize> {
    names.iter().find_map(|name| {
        headers
            .iter()
            .position(|h| h.trim().to_lowercase() == name.to_lowercase())
    })
}

fn resolve_columns(
    headers: &StringRecord,
    config: &ResultsReaderConfig,
) -> Result<ColumnIndices, ReportError> {
    let find = |names: &[String]| {
        find_any_column(headers, names).ok_or_else(|| {
            ReportError::malformed(
                0,
                format!("missing column, expected one of: {}", names.join(", ")),
            )
        })
    };

    Ok(ColumnIndices {
        array_type: find(&config.array_type_columns)?,
        algorithm: find(&config.algorithm_columns)?,
        threshold: find(&config.threshold_columns)?,
        size: find(&config.size_columns)?,
        time: find(&config.time_columns)?,
    })
}

fn field<'r>(
    record: &'r StringRecord,
    idx: usize,
    name: &str,
    row: usize,
) -> Result<&'r str, ReportError> {
    record
        .get(idx)
        .ok_or_else(|| ReportError::malformed(row, format!("missing {} value", name)))
}

/// Parse one data row. Rows of an algorithm other than merge or hybrid yield `None`.
fn parse_record(
    record: &StringRecord,
    columns: &ColumnIndices,
    row: usize,
) -> Result<Option<BenchmarkRecord>, ReportError> {
    let array_type = field(record, columns.array_type, "array type", row)?;
    if array_type.is_empty() {
        return Err(ReportError::malformed(row, "empty array type"));
    }

    let algorithm_raw = field(record, columns.algorithm, "algorithm", row)?;
    let algorithm = match algorithm_raw.parse::<Algorithm>() {
        Ok(algorithm) => algorithm,
        Err(_) => {
            log::debug!(
                "[sortbench::io] Row {}: skipping algorithm '{}'",
                row,
                algorithm_raw
            );
            return Ok(None);
        }
    };

    let threshold_raw = field(record, columns.threshold, "threshold", row)?;
    let threshold = match algorithm {
        Algorithm::Merge => None,
        Algorithm::Hybrid => Some(threshold_raw.parse::<i64>().map_err(|_| {
            ReportError::malformed(
                row,
                format!("invalid threshold '{}' for hybrid row", threshold_raw),
            )
        })?),
    };

    let size_raw = field(record, columns.size, "size", row)?;
    let size = size_raw
        .parse::<u64>()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| ReportError::malformed(row, format!("invalid size '{}'", size_raw)))?;

    let time_raw = field(record, columns.time, "time", row)?;
    let time_microseconds = time_raw
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite() && *t >= 0.0)
        .ok_or_else(|| ReportError::malformed(row, format!("invalid time '{}'", time_raw)))?;

    Ok(Some(BenchmarkRecord {
        array_type: array_type.to_string(),
        algorithm,
        threshold,
        size,
        time_microseconds,
    }))
}
