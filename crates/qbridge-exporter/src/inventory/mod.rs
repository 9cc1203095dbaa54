//! Queue inventory: the published snapshot and the task that refreshes it.

pub mod refresher;
pub mod snapshot;

pub use refresher::{discover, DiscoveryFilter, InventoryRefresher};
pub use snapshot::{Snapshot, SnapshotCell};
