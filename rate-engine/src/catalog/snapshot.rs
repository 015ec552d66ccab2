//! Catalog snapshots and atomic refresh.
//!
//! A `CatalogSnapshot` bundles the three family indexes and the geo
//! resolver into one immutable unit. Each query resolves against a single
//! snapshot `Arc`, so no leg can change state mid-resolution. Refreshing
//! the catalog builds a new snapshot and swaps the holder's pointer;
//! in-flight queries finish against whichever snapshot they began with.

use std::sync::{Arc, RwLock};

use crate::domain::RateLeg;
use crate::georef::GeoResolver;

use super::index::CatalogIndex;

/// An immutable view of the three rate pools plus reference data.
#[derive(Debug)]
pub struct CatalogSnapshot {
    pub precarriage: CatalogIndex,
    pub mainline: CatalogIndex,
    pub lastmile: CatalogIndex,
    pub georef: GeoResolver,
}

impl CatalogSnapshot {
    /// Builds a snapshot from the three rate pools.
    pub fn build(
        precarriage: Vec<RateLeg>,
        mainline: Vec<RateLeg>,
        lastmile: Vec<RateLeg>,
        georef: GeoResolver,
    ) -> Self {
        Self {
            precarriage: CatalogIndex::build(precarriage),
            mainline: CatalogIndex::build(mainline),
            lastmile: CatalogIndex::build(lastmile),
            georef,
        }
    }
}

/// Shared handle to the current snapshot.
///
/// Readers take an `Arc` clone and drop the lock immediately; a refresh is
/// one pointer store and never blocks a query mid-resolution.
#[derive(Debug)]
pub struct SnapshotHolder {
    current: RwLock<Arc<CatalogSnapshot>>,
}

impl SnapshotHolder {
    /// Creates a holder around an initial snapshot.
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Returns the current snapshot.
    pub fn load(&self) -> Arc<CatalogSnapshot> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replaces the current snapshot. In-flight queries keep the `Arc`
    /// they already loaded.
    pub fn store(&self, snapshot: CatalogSnapshot) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(snapshot);
    }
}
