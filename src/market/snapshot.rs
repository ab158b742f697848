use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One instrument as supplied by the market data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: CompactString,
    #[serde(default)]
    pub name: String,
    /// Sector label used for two-level heatmaps
    #[serde(default = "unclassified")]
    pub sector: CompactString,
    #[serde(default)]
    pub price: f64,
    /// Daily change in percent (display only, never a weight)
    #[serde(default)]
    pub change_percent: f64,
    #[serde(default)]
    pub market_cap: f64,
    #[serde(default)]
    pub volume: f64,
}

fn unclassified() -> CompactString {
    CompactString::const_new("Unclassified")
}

/// A full market snapshot as served by the data endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Timestamp of the data, passed through untouched
    #[serde(default)]
    pub as_of: Option<String>,
    pub quotes: Vec<Quote>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Snapshot {
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let file = File::open(path)?;
        let snapshot = Self::from_reader(BufReader::new(file))?;
        tracing::info!(
            "Loaded {} quotes from {} (as of {})",
            snapshot.quotes.len(),
            path.display(),
            snapshot.as_of.as_deref().unwrap_or("unknown")
        );
        Ok(snapshot)
    }
}
