use compact_str::CompactString;
use thiserror::Error;

/// Invalid input rejected by the layout engine. No partial output is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Width or height negative or not finite. Zero is valid and lays out nothing.
    #[error("invalid container: {width}x{height}")]
    InvalidContainer { width: f64, height: f64 },

    /// Non-positive weight under the reject policy, or a NaN/infinite weight.
    #[error("invalid weight {weight} for '{id}'")]
    InvalidWeight { id: CompactString, weight: f64 },

    /// Padding, minimum cell, header height or floor epsilon out of range.
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
