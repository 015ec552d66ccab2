//! Rate catalog index.
//!
//! Buckets a family's legs by origin and destination location for
//! sub-linear lookup: a query touches only the bucket for its endpoint and
//! then scans it for validity. Built once per snapshot; rebuilding is the
//! only way to reflect catalog changes.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{LegStatus, Location, RateLeg};

/// Lookup structure over one family's rate pool.
///
/// Inactive legs are dropped at build time: a leg with status other than
/// `Active` is never eligible for matching regardless of date, so keeping
/// it in the buckets would only lengthen every scan.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    legs: Vec<Arc<RateLeg>>,
    by_origin: HashMap<Location, Vec<usize>>,
    by_destination: HashMap<Location, Vec<usize>>,
}

impl CatalogIndex {
    /// Build an index over a family's legs. O(n) over the input.
    pub fn build(legs: Vec<RateLeg>) -> Self {
        let mut index = CatalogIndex::default();

        for leg in legs {
            if leg.status() != LegStatus::Active {
                continue;
            }
            let leg = Arc::new(leg);
            let slot = index.legs.len();
            index
                .by_origin
                .entry(leg.origin().clone())
                .or_default()
                .push(slot);
            index
                .by_destination
                .entry(leg.destination().clone())
                .or_default()
                .push(slot);
            index.legs.push(leg);
        }

        index
    }

    /// Active legs departing `origin` whose validity contains `as_of`.
    ///
    /// Order follows build input order, so repeated queries against the
    /// same snapshot see identical sequences.
    pub fn legs_from(&self, origin: &Location, as_of: NaiveDate) -> Vec<Arc<RateLeg>> {
        self.lookup(&self.by_origin, origin, as_of)
    }

    /// Active legs arriving at `destination` whose validity contains `as_of`.
    pub fn legs_to(&self, destination: &Location, as_of: NaiveDate) -> Vec<Arc<RateLeg>> {
        self.lookup(&self.by_destination, destination, as_of)
    }

    fn lookup(
        &self,
        buckets: &HashMap<Location, Vec<usize>>,
        key: &Location,
        as_of: NaiveDate,
    ) -> Vec<Arc<RateLeg>> {
        buckets
            .get(key)
            .map(|slots| {
                slots
                    .iter()
                    .map(|&slot| &self.legs[slot])
                    .filter(|leg| leg.matchable_on(as_of))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of indexed (active) legs.
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }
}
