//! Spreadsheet loader
//!
//! Reads the first worksheet of an Excel or OpenDocument workbook. The
//! first row is the header; blank header cells become `Unnamed: <i>`.

use crate::error::{LoadError, LoadResult};
use crate::file::FileType;
use crate::loaders::TableLoader;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use duel_model::{Dataset, Scalar};
use std::io::Cursor;

/// Spreadsheet loader
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetLoader;

impl SpreadsheetLoader {
    /// Create new spreadsheet loader
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TableLoader for SpreadsheetLoader {
    fn file_type(&self) -> FileType {
        FileType::Spreadsheet
    }

    fn extensions(&self) -> &[&str] {
        &["xlsx", "xls", "xlsm", "xlsb", "ods", "excel"]
    }

    fn load(&self, bytes: &[u8]) -> LoadResult<Dataset> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| LoadError::parse(FileType::Spreadsheet, e))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| LoadError::parse(FileType::Spreadsheet, "workbook has no sheets"))?
            .map_err(|e| LoadError::parse(FileType::Spreadsheet, e))?;

        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return Ok(Dataset::empty());
        };

        let headers = header
            .iter()
            .enumerate()
            .map(|(i, cell)| match cell {
                Data::Empty => format!("Unnamed: {i}"),
                other => other.to_string(),
            })
            .collect();

        let records = rows.map(|row| row.iter().map(to_scalar).collect::<Vec<_>>());

        Dataset::from_rows(headers, records)
            .map_err(|e| LoadError::invalid_shape(FileType::Spreadsheet, &e))
    }
}

fn to_scalar(cell: &Data) -> Scalar {
    match cell {
        Data::Empty => Scalar::Null,
        Data::Int(v) => Scalar::Int(*v),
        Data::Float(v) => Scalar::Float(*v),
        Data::Bool(v) => Scalar::Bool(*v),
        Data::String(v) => Scalar::Text(v.clone()),
        other => Scalar::Text(other.to_string()),
    }
}
