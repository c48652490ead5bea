// CSV / Excel import into a Table

use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use tracing::{debug, info};

use super::Table;
use crate::error::{GraphNarratorError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceFormat {
    Csv,
    Excel,
}

impl SourceFormat {
    fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "xlsx" | "xls" | "ods" => Ok(SourceFormat::Excel),
            other => Err(GraphNarratorError::unsupported(format!(
                "file format '{}'",
                other
            ))),
        }
    }
}

pub fn load_from_path(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    // reject before touching the filesystem
    SourceFormat::from_extension(ext)?;
    let bytes = std::fs::read(path)?;
    info!("Loaded {} bytes from {}", bytes.len(), path.display());
    load_from_bytes(&bytes, ext)
}

/// Downloads a CSV or Excel file and parses it in memory.
pub async fn load_from_url(url: &str) -> Result<Table> {
    let parsed = reqwest::Url::parse(url).map_err(|e| GraphNarratorError::Data {
        message: format!("Invalid data URL '{}': {}", url, e),
    })?;
    let ext = parsed
        .path()
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_string())
        .unwrap_or_default();
    SourceFormat::from_extension(&ext)?;

    let response = reqwest::get(parsed).await?;
    if !response.status().is_success() {
        return Err(GraphNarratorError::RemoteCall {
            message: format!("Data download returned {}", response.status()),
        });
    }
    let bytes = response.bytes().await?;
    debug!("Downloaded {} bytes from {}", bytes.len(), url);
    load_from_bytes(&bytes, &ext)
}

pub fn load_from_bytes(bytes: &[u8], ext: &str) -> Result<Table> {
    match SourceFormat::from_extension(ext)? {
        SourceFormat::Csv => parse_csv(&decode_text(bytes)),
        SourceFormat::Excel => parse_excel(bytes),
    }
}

/// UTF-8 first; Japanese spreadsheets are commonly exported as Shift-JIS.
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s.trim_start_matches('\u{feff}')),
        Err(_) => {
            debug!("Input is not UTF-8, decoding as Shift-JIS");
            let (decoded, _, _) = encoding_rs::SHIFT_JIS.decode(bytes);
            decoded
        }
    }
}

fn parse_number(field: &str) -> f64 {
    field.trim().replace(',', "").parse::<f64>().unwrap_or(f64::NAN)
}

/// First column is the index, the header row names the columns.
fn parse_csv(content: &str) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let Some(index_name) = headers.get(0) else {
        return Err(GraphNarratorError::Data {
            message: "CSV has no header row".to_string(),
        });
    };
    let column_names: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut index = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); column_names.len()];
    for result in reader.records() {
        let record = result?;
        index.push(record.get(0).unwrap_or_default().to_string());
        for (col_idx, values) in columns.iter_mut().enumerate() {
            values.push(record.get(col_idx + 1).map_or(f64::NAN, parse_number));
        }
    }

    let table = column_names
        .into_iter()
        .zip(columns)
        .fold(Table::new(index_name, index), |table, (name, values)| {
            table.with_column(name, values)
        });
    Ok(table)
}

fn cell_to_f64(cell: &Data) -> f64 {
    match cell {
        Data::Int(i) => *i as f64,
        Data::Float(f) => *f,
        Data::String(s) => parse_number(s),
        _ => f64::NAN,
    }
}

/// Reads the first worksheet with the same layout rules as CSV.
fn parse_excel(bytes: &[u8]) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| GraphNarratorError::Data {
            message: "Excel file contains no sheets".to_string(),
        })??;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(GraphNarratorError::Data {
            message: "Excel sheet is empty".to_string(),
        });
    };
    let index_name = header.first().map(|c| c.to_string()).unwrap_or_default();
    let column_names: Vec<String> = header.iter().skip(1).map(|c| c.to_string()).collect();

    let mut index = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); column_names.len()];
    for row in rows {
        index.push(row.first().map(|c| c.to_string()).unwrap_or_default());
        for (col_idx, values) in columns.iter_mut().enumerate() {
            values.push(row.get(col_idx + 1).map_or(f64::NAN, cell_to_f64));
        }
    }

    let table = column_names
        .into_iter()
        .zip(columns)
        .fold(Table::new(index_name, index), |table, (name, values)| {
            table.with_column(name, values)
        });
    Ok(table)
}
