pub mod query;
pub mod snapshot;

pub use query::{compute_stats, filter_todos, Stats};
pub use snapshot::{export_snapshot, parse_snapshot, Snapshot, SnapshotError, SNAPSHOT_VERSION};
