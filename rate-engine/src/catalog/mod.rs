//! Rate catalog indexing and snapshots.

mod index;
mod snapshot;

pub use index::CatalogIndex;
pub use snapshot::{CatalogSnapshot, SnapshotHolder};
