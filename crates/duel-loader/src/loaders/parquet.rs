//! Parquet loader
//!
//! Reads every row group through the record API. Nested values are
//! rendered as text.

use crate::error::{LoadError, LoadResult};
use crate::file::FileType;
use crate::loaders::TableLoader;
use ::parquet::file::reader::{FileReader, SerializedFileReader};
use ::parquet::record::Field;
use bytes::Bytes;
use duel_model::{Dataset, Scalar};

/// Parquet loader
#[derive(Debug, Clone, Copy, Default)]
pub struct ParquetLoader;

impl ParquetLoader {
    /// Create new Parquet loader
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TableLoader for ParquetLoader {
    fn file_type(&self) -> FileType {
        FileType::Parquet
    }

    fn extensions(&self) -> &[&str] {
        &["parquet"]
    }

    fn load(&self, bytes: &[u8]) -> LoadResult<Dataset> {
        let reader = SerializedFileReader::new(Bytes::copy_from_slice(bytes))
            .map_err(|e| LoadError::parse(FileType::Parquet, e))?;

        let headers: Vec<String> = reader
            .metadata()
            .file_metadata()
            .schema_descr()
            .root_schema()
            .get_fields()
            .iter()
            .map(|field| field.name().to_string())
            .collect();

        let rows = reader
            .get_row_iter(None)
            .map_err(|e| LoadError::parse(FileType::Parquet, e))?;

        let mut records = Vec::new();
        for row in rows {
            let row = row.map_err(|e| LoadError::parse(FileType::Parquet, e))?;
            records.push(
                row.get_column_iter()
                    .map(|(_, field)| to_scalar(field))
                    .collect::<Vec<_>>(),
            );
        }

        Dataset::from_rows(headers, records)
            .map_err(|e| LoadError::invalid_shape(FileType::Parquet, &e))
    }
}

fn to_scalar(field: &Field) -> Scalar {
    match field {
        Field::Null => Scalar::Null,
        Field::Bool(v) => Scalar::Bool(*v),
        Field::Byte(v) => Scalar::Int(i64::from(*v)),
        Field::Short(v) => Scalar::Int(i64::from(*v)),
        Field::Int(v) => Scalar::Int(i64::from(*v)),
        Field::Long(v) => Scalar::Int(*v),
        Field::UByte(v) => Scalar::Int(i64::from(*v)),
        Field::UShort(v) => Scalar::Int(i64::from(*v)),
        Field::UInt(v) => Scalar::Int(i64::from(*v)),
        Field::ULong(v) => i64::try_from(*v).map_or_else(|_| Scalar::Text(v.to_string()), Scalar::Int),
        Field::Float(v) => Scalar::Float(f64::from(*v)),
        Field::Double(v) => Scalar::Float(*v),
        Field::Str(v) => Scalar::Text(v.clone()),
        other => Scalar::Text(other.to_string()),
    }
}
