//! Tabular datasets
//!
//! A [`Dataset`] is an ordered set of named columns sharing one row count.
//! Uploads replace the whole dataset; nothing is ever merged.

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Single cell value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Missing value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit integer
    Int(i64),
    /// 64-bit float
    Float(f64),
    /// Anything else, kept verbatim
    Text(String),
}

impl Scalar {
    /// Infer the narrowest scalar for a raw text field
    ///
    /// Empty → `Null`, then integer, float, `true`/`false`, else text.
    #[must_use]
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Scalar::Null;
        }
        if let Ok(v) = trimmed.parse::<i64>() {
            return Scalar::Int(v);
        }
        if let Ok(v) = trimmed.parse::<f64>() {
            return Scalar::Float(v);
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return Scalar::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Scalar::Bool(false);
        }
        Scalar::Text(raw.to_string())
    }

    /// Check for missing value
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Text(v) => f.write_str(v),
        }
    }
}

/// Named column of scalars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column header
    pub name: String,
    /// Values in row order
    pub values: Vec<Scalar>,
}

impl Column {
    /// Create column
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<Scalar>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Number of values
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if column has no values
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Rectangular table of named columns
///
/// # Invariants
/// - Every column has exactly `row_count` values
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// The canonical empty dataset
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from columns
    ///
    /// # Errors
    /// Returns [`ModelError::RaggedColumn`] if lengths differ
    pub fn new(columns: Vec<Column>) -> ModelResult<Self> {
        let row_count = columns.first().map_or(0, Column::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != row_count) {
            return Err(ModelError::ragged(&bad.name, row_count, bad.len()));
        }
        Ok(Self { columns, row_count })
    }

    /// Build from a header and row-major records
    ///
    /// # Errors
    /// Returns [`ModelError::RaggedRow`] if a record has the wrong width
    pub fn from_rows<I>(headers: Vec<String>, rows: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = Vec<Scalar>>,
    {
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::new()))
            .collect();

        let mut row_count = 0;
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(ModelError::RaggedRow {
                    row: index,
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.values.push(value);
            }
            row_count += 1;
        }

        if columns.is_empty() {
            row_count = 0;
        }

        Ok(Self { columns, row_count })
    }

    /// Synthetic two-column integer table (`A`, `B` = `0..rows`)
    #[must_use]
    pub fn synthetic(rows: usize) -> Self {
        let values: Vec<Scalar> = (0..rows)
            .map(|i| Scalar::Int(i64::try_from(i).unwrap_or(i64::MAX)))
            .collect();
        Self {
            columns: vec![Column::new("A", values.clone()), Column::new("B", values)],
            row_count: rows,
        }
    }

    /// Number of rows
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns
    #[inline]
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when there are no columns or no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.row_count == 0
    }

    /// Columns in order
    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// First column with the given name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column headers in order
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Values of one row, in column order
    #[must_use]
    pub fn row(&self, index: usize) -> Option<Vec<&Scalar>> {
        if index >= self.row_count {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[index]).collect())
    }
}
