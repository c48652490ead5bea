//! Tabular input for charts: file/URL loaders and built-in samples.

pub mod loader;
pub mod sample;

pub use loader::{load_from_bytes, load_from_path, load_from_url};
pub use sample::{SampleDataset, generate_sample_data};

use serde::{Deserialize, Serialize};

/// A named numeric column. Cells that failed to parse are `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// Index labels plus numeric columns of the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub index_name: String,
    pub index: Vec<String>,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(index_name: impl Into<String>, index: Vec<String>) -> Self {
        Self {
            index_name: index_name.into(),
            index,
            columns: Vec::new(),
        }
    }

    /// Appends a column, padding or truncating it to the index length.
    pub fn with_column(mut self, name: impl Into<String>, mut values: Vec<f64>) -> Self {
        values.resize(self.index.len(), f64::NAN);
        self.columns.push(Column {
            name: name.into(),
            values,
        });
        self
    }

    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty() || self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}
