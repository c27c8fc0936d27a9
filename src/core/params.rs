use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Classification parameters suitable for config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierParams {
    /// Compute in f64 even when the input is not f64
    pub force_f64: bool,
    /// Per-band no-data values in [B1, B2, B3, B4, B5, B7] order
    pub nodata: [Option<f64>; 6],
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            force_f64: false,
            nodata: [None; 6],
        }
    }
}

impl ClassifierParams {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
