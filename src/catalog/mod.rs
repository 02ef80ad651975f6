//! Product catalog: the ordered, immutable set of records loaded at startup.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

pub mod compare;
pub mod loader;
pub mod record;

pub use compare::{compare, Comparison, ComparisonRow, FieldSelection, ProductNotFound};
pub use loader::{load_catalog, parse_catalog};
pub use record::{display_name_from_id, product_id, Record, SpecField, MISSING_VALUE};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("catalog row at line {line} has no company or model name")]
    MissingIdentity { line: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<Record>,
}

impl Catalog {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One entry per distinct id, in order of first occurrence.
    pub fn products(&self) -> Vec<ProductSummary> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter_map(|record| {
                let id = record.product_id();
                seen.insert(id.clone()).then(|| ProductSummary {
                    id,
                    name: record.display_name(),
                })
            })
            .collect()
    }

    /// First record whose identity key equals `id` after the same
    /// normalization (so a display name also matches).
    pub fn find(&self, id: &str) -> Option<&Record> {
        let wanted = product_id(id.trim());
        if wanted.is_empty() {
            return None;
        }
        self.records
            .iter()
            .find(|record| record.product_id() == wanted)
    }
}
