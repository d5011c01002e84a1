//! Feature schema artifacts and vector alignment.
//!
//! A schema is the ordered column list a model was trained against,
//! persisted alongside the model artifact. Alignment projects a named
//! feature mapping onto that order, which keeps the extractors decoupled
//! from schema drift: columns the extractor never produced become 0.0, and
//! keys the schema never listed are dropped.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::features::FeatureMap;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("failed to read feature schema {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse feature schema {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("feature schema {0} contains no columns")]
    Empty(PathBuf),
}

#[derive(Debug, Clone)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Load a schema from a JSON artifact (an array of column names).
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let columns: Vec<String> =
            serde_json::from_str(&content).map_err(|source| SchemaError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if columns.is_empty() {
            return Err(SchemaError::Empty(path.to_path_buf()));
        }
        debug!("loaded feature schema {} ({} columns)", path.display(), columns.len());
        Ok(Self { columns })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Project a feature mapping onto the schema's column order. The result
    /// always has exactly `len()` values.
    pub fn align(&self, features: &FeatureMap) -> Vec<f64> {
        self.columns
            .iter()
            .map(|column| features.get(column).copied().unwrap_or(0.0))
            .collect()
    }
}
