//! CSV loader
//!
//! First record is the header. Cells are type-inferred one by one.

use crate::error::{LoadError, LoadResult};
use crate::file::FileType;
use crate::loaders::TableLoader;
use duel_model::{Dataset, Scalar};

/// CSV loader
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvLoader;

impl CsvLoader {
    /// Create new CSV loader
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TableLoader for CsvLoader {
    fn file_type(&self) -> FileType {
        FileType::Csv
    }

    fn extensions(&self) -> &[&str] {
        &["csv"]
    }

    fn load(&self, bytes: &[u8]) -> LoadResult<Dataset> {
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| LoadError::parse(FileType::Csv, e))?
            .iter()
            .map(str::to_string)
            .collect();

        if headers.is_empty() {
            return Err(LoadError::parse(
                FileType::Csv,
                "no columns to parse from file",
            ));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| LoadError::parse(FileType::Csv, e))?;
            rows.push(record.iter().map(Scalar::infer).collect::<Vec<_>>());
        }

        Dataset::from_rows(headers, rows).map_err(|e| LoadError::invalid_shape(FileType::Csv, &e))
    }
}
