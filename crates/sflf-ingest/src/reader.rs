//! Reading CSV files and spreadsheets into a rectangular grid of cells.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use sflf_model::{CellValue, DATE_FORMAT};

use crate::error::{LoadError, Result};
use crate::format::SourceFormat;

/// Maximum accepted upload size (50 MB).
pub const MAX_UPLOAD_SIZE: u64 = 50 * 1024 * 1024;

/// Rows of cells, all padded to the same width.
pub type Grid = Vec<Vec<CellValue>>;

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_UPLOAD_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| LoadError::io(path, e))?;
    if metadata.len() > max_size {
        return Err(LoadError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Rejects UTF-16 text. A UTF-8 BOM is accepted and stripped while reading.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| LoadError::io(path, e))?;
    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(LoadError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }
    Ok(())
}

/// Reads the file into a grid without interpreting any row as a header.
pub fn read_grid(path: &Path, format: SourceFormat) -> Result<Grid> {
    let mut grid = match format {
        SourceFormat::Csv => read_csv_grid(path)?,
        SourceFormat::Spreadsheet => read_spreadsheet_grid(path)?,
    };
    pad_rows(&mut grid);
    Ok(grid)
}

fn read_csv_grid(path: &Path) -> Result<Grid> {
    validate_encoding(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| csv_error(path, source))?;
    let mut grid = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|source| csv_error(path, source))?;
        let row = record
            .iter()
            .enumerate()
            .map(|(column, field)| {
                let field = if index == 0 && column == 0 {
                    field.trim_start_matches('\u{feff}')
                } else {
                    field
                };
                CellValue::from_field(field)
            })
            .collect();
        grid.push(row);
    }
    Ok(grid)
}

fn csv_error(path: &Path, source: csv::Error) -> LoadError {
    if let csv::ErrorKind::Io(io) = source.kind()
        && io.kind() == std::io::ErrorKind::NotFound
    {
        return LoadError::FileNotFound {
            path: path.to_path_buf(),
        };
    }
    LoadError::CsvParse {
        path: path.to_path_buf(),
        source,
    }
}

fn read_spreadsheet_grid(path: &Path) -> Result<Grid> {
    let spreadsheet_error = |message: String| LoadError::Spreadsheet {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_error(e.to_string()))?;
    let Some(range) = workbook.worksheet_range_at(0) else {
        return Err(spreadsheet_error("workbook has no worksheets".to_string()));
    };
    let range = range.map_err(|e| spreadsheet_error(e.to_string()))?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(spreadsheet_cell).collect())
        .collect())
}

fn spreadsheet_cell(data: &Data) -> CellValue {
    match data {
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Float(value) => CellValue::Number(*value),
        Data::String(text) => CellValue::text(text.as_str()),
        Data::Bool(flag) => CellValue::Text(if *flag { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(value) => match value.as_datetime() {
            Some(datetime) if datetime.time() == chrono::NaiveTime::MIN => {
                CellValue::Date(datetime.date())
            }
            Some(datetime) => CellValue::Text(datetime.to_string()),
            None => CellValue::Number(value.as_f64()),
        },
        Data::DateTimeIso(text) => NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map(CellValue::Date)
            .unwrap_or_else(|_| CellValue::text(text.as_str())),
        Data::DurationIso(text) => CellValue::text(text.as_str()),
        Data::Error(_) | Data::Empty => CellValue::Missing,
    }
}

fn pad_rows(grid: &mut Grid) {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    for row in grid.iter_mut() {
        row.resize(width, CellValue::Missing);
    }
}
