//! Market data contract: what the data source supplies and how it becomes
//! weighted items and sector groups for the layout engine.

pub mod format;
pub mod grouping;
pub mod snapshot;

pub use self::grouping::{
    group_by_sector, items_from_quotes, retain_positive, sort_by_weight_desc,
    sort_groups_by_weight_desc, WeightMetric,
};
pub use self::snapshot::{Quote, Snapshot, SnapshotError};
