//! Itinerary ranking and deduplication.
//!
//! Leg pricing itself lives on the domain types (`PriceSchedule::quote`,
//! `Itinerary::new`); this module orders what assembly produced. Output
//! order is fully deterministic: ties break by the leg-id triple, so the
//! same query against the same snapshot always yields the same sequence.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Deserialize;

use crate::domain::{Itinerary, LegId};

/// Which derived field to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    TotalPrice,
    TransitDays,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Caller-specified ranking criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortKey {
    fn default() -> Self {
        Self {
            field: SortField::TotalPrice,
            direction: SortDirection::Ascending,
        }
    }
}

/// Remove itineraries referencing the same leg ids in the same roles.
///
/// Keeps the first occurrence, preserving assembly order for the survivors.
pub fn dedupe(itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    let mut seen: HashSet<(Option<LegId>, LegId, Option<LegId>)> = HashSet::new();
    itineraries
        .into_iter()
        .filter(|itinerary| {
            let (pre, main, last) = itinerary.key();
            seen.insert((pre.cloned(), main.clone(), last.cloned()))
        })
        .collect()
}

/// Sort itineraries by the given key, best-first.
///
/// Price sorting only compares single-currency totals; mixed-currency
/// itineraries have no one comparable amount, so they sort after all
/// single-currency ones in either direction, still ordered among
/// themselves by the id-triple tie-break.
pub fn rank(mut itineraries: Vec<Itinerary>, key: SortKey) -> Vec<Itinerary> {
    itineraries.sort_by(|a, b| compare(a, b, key));
    itineraries
}

fn compare(a: &Itinerary, b: &Itinerary, key: SortKey) -> Ordering {
    let primary = match key.field {
        SortField::TotalPrice => match (comparable_price(a), comparable_price(b)) {
            (Some(x), Some(y)) => directed(x.cmp(&y), key.direction),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortField::TransitDays => {
            directed(a.transit_days().cmp(&b.transit_days()), key.direction)
        }
    };

    primary.then_with(|| a.key().cmp(&b.key()))
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// The total amount when the itinerary is priced in one currency.
fn comparable_price(itinerary: &Itinerary) -> Option<i64> {
    if itinerary.mixed_currency() {
        return None;
    }
    itinerary.totals().first().map(|money| money.amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AdminArea, CargoProfile, ContainerType, Currency, LegId, LegStatus, Location,
        PortCode, PriceSchedule, RateLeg, ServiceFamily, Validity,
    };
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn port(s: &str) -> Location {
        Location::Port(PortCode::parse(s).unwrap())
    }

    fn mainline(id: &str, currency: &str, price: i64, transit_days: u32) -> Arc<RateLeg> {
        Arc::new(
            RateLeg::new(
                LegId::new(id).unwrap(),
                ServiceFamily::Mainline,
                port("CNSHA"),
                port("USLAX"),
                Validity::new(d("2024-05-01"), d("2024-12-31")).unwrap(),
                LegStatus::Active,
                Currency::parse(currency).unwrap(),
                PriceSchedule::PerContainer(
                    [(ContainerType::C20Gp, price)].into_iter().collect(),
                ),
                Some(transit_days),
            )
            .unwrap(),
        )
    }

    fn cargo() -> CargoProfile {
        CargoProfile::fcl(vec![(ContainerType::C20Gp, 1)]).unwrap()
    }

    fn itinerary(id: &str, price: i64, transit_days: u32) -> Itinerary {
        Itinerary::new(
            None,
            mainline(id, "USD", price, transit_days),
            None,
            &cargo(),
            d("2024-06-01"),
        )
        .unwrap()
    }

    fn mixed_itinerary(id: &str) -> Itinerary {
        let pre = Arc::new(
            RateLeg::new(
                LegId::new(format!("{id}-pre")).unwrap(),
                ServiceFamily::Precarriage,
                Location::Area(AdminArea::new("Shanghai", "Shanghai", "Pudong")),
                port("CNSHA"),
                Validity::new(d("2024-05-01"), d("2024-12-31")).unwrap(),
                LegStatus::Active,
                Currency::parse("CNY").unwrap(),
                PriceSchedule::PerContainer(
                    [(ContainerType::C20Gp, 80_000)].into_iter().collect(),
                ),
                Some(1),
            )
            .unwrap(),
        );
        Itinerary::new(
            Some(pre),
            mainline(id, "USD", 100_000, 18),
            None,
            &cargo(),
            d("2024-06-01"),
        )
        .unwrap()
    }

    #[test]
    fn sort_by_price_ascending() {
        let ranked = rank(
            vec![
                itinerary("ML-2", 180_000, 15),
                itinerary("ML-1", 150_000, 20),
            ],
            SortKey::default(),
        );
        assert_eq!(ranked[0].mainline().id().as_str(), "ML-1");
        assert_eq!(ranked[1].mainline().id().as_str(), "ML-2");
    }

    #[test]
    fn sort_by_price_descending() {
        let ranked = rank(
            vec![
                itinerary("ML-1", 150_000, 20),
                itinerary("ML-2", 180_000, 15),
            ],
            SortKey {
                field: SortField::TotalPrice,
                direction: SortDirection::Descending,
            },
        );
        assert_eq!(ranked[0].mainline().id().as_str(), "ML-2");
    }

    #[test]
    fn sort_by_transit_days() {
        let ranked = rank(
            vec![
                itinerary("ML-1", 150_000, 20),
                itinerary("ML-2", 180_000, 15),
            ],
            SortKey {
                field: SortField::TransitDays,
                direction: SortDirection::Ascending,
            },
        );
        assert_eq!(ranked[0].mainline().id().as_str(), "ML-2");
    }

    #[test]
    fn price_ties_break_by_leg_id() {
        let ranked = rank(
            vec![
                itinerary("ML-B", 150_000, 15),
                itinerary("ML-A", 150_000, 20),
            ],
            SortKey::default(),
        );
        assert_eq!(ranked[0].mainline().id().as_str(), "ML-A");
        assert_eq!(ranked[1].mainline().id().as_str(), "ML-B");
    }

    #[test]
    fn mixed_currency_sorts_after_single_in_both_directions() {
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let ranked = rank(
                vec![mixed_itinerary("ML-A"), itinerary("ML-Z", 999_000, 40)],
                SortKey {
                    field: SortField::TotalPrice,
                    direction,
                },
            );
            assert!(!ranked[0].mixed_currency());
            assert!(ranked[1].mixed_currency());
        }
    }

    #[test]
    fn dedupe_keeps_first_of_each_triple() {
        let a = itinerary("ML-1", 150_000, 18);
        let b = itinerary("ML-1", 150_000, 18);
        let c = itinerary("ML-2", 180_000, 15);

        let result = dedupe(vec![a, b, c]);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].mainline().id().as_str(), "ML-1");
        assert_eq!(result[1].mainline().id().as_str(), "ML-2");
    }

    #[test]
    fn empty_input() {
        assert!(rank(vec![], SortKey::default()).is_empty());
        assert!(dedupe(vec![]).is_empty());
    }

    #[test]
    fn sort_key_deserializes() {
        let key: SortKey = serde_json::from_str(
            r#"{"field": "transit_days", "direction": "descending"}"#,
        )
        .unwrap();
        assert_eq!(key.field, SortField::TransitDays);
        assert_eq!(key.direction, SortDirection::Descending);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{
        CargoProfile, ContainerType, Currency, LegId, LegStatus, Location, PortCode,
        PriceSchedule, RateLeg, ServiceFamily, Validity,
    };
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn cargo() -> CargoProfile {
        CargoProfile::fcl(vec![(ContainerType::C20Gp, 1)]).unwrap()
    }

    fn make_itinerary(id_num: u32, price: i64, transit_days: u32) -> Itinerary {
        let leg = Arc::new(
            RateLeg::new(
                LegId::new(format!("ML-{id_num}")).unwrap(),
                ServiceFamily::Mainline,
                Location::Port(PortCode::parse("CNSHA").unwrap()),
                Location::Port(PortCode::parse("USLAX").unwrap()),
                Validity::new(d("2024-05-01"), d("2024-12-31")).unwrap(),
                LegStatus::Active,
                Currency::parse("USD").unwrap(),
                PriceSchedule::PerContainer(
                    [(ContainerType::C20Gp, price)].into_iter().collect(),
                ),
                Some(transit_days),
            )
            .unwrap(),
        );
        Itinerary::new(None, leg, None, &cargo(), d("2024-06-01")).unwrap()
    }

    fn itineraries_strategy() -> impl Strategy<Value = Vec<Itinerary>> {
        // Few distinct ids so duplicates actually occur
        prop::collection::vec((0u32..8, 1i64..500_000, 1u32..40), 0..20).prop_map(|params| {
            params
                .into_iter()
                .map(|(id, price, days)| make_itinerary(id, price, days))
                .collect()
        })
    }

    proptest! {
        /// No two survivors of dedupe share an id triple.
        #[test]
        fn dedupe_no_duplicate_triples(itineraries in itineraries_strategy()) {
            let result = dedupe(itineraries);
            for (i, a) in result.iter().enumerate() {
                for b in result.iter().skip(i + 1) {
                    prop_assert!(a.key() != b.key());
                }
            }
        }

        /// Dedupe never grows the input.
        #[test]
        fn dedupe_subset(itineraries in itineraries_strategy()) {
            let original_len = itineraries.len();
            prop_assert!(dedupe(itineraries).len() <= original_len);
        }

        /// Ranking is a permutation: nothing added or dropped.
        #[test]
        fn rank_preserves_elements(itineraries in itineraries_strategy()) {
            let original_len = itineraries.len();
            prop_assert_eq!(rank(itineraries, SortKey::default()).len(), original_len);
        }

        /// Ranking twice yields the same order (determinism).
        #[test]
        fn rank_is_idempotent(itineraries in itineraries_strategy()) {
            let once = rank(itineraries, SortKey::default());
            let keys_once: Vec<_> =
                once.iter().map(|it| format!("{:?}", it.key())).collect();
            let twice = rank(once, SortKey::default());
            let keys_twice: Vec<_> =
                twice.iter().map(|it| format!("{:?}", it.key())).collect();
            prop_assert_eq!(keys_once, keys_twice);
        }

        /// Ascending price sort really is sorted.
        #[test]
        fn rank_price_sorted(itineraries in itineraries_strategy()) {
            let ranked = rank(itineraries, SortKey::default());
            for window in ranked.windows(2) {
                let a = window[0].totals()[0].amount;
                let b = window[1].totals()[0].amount;
                prop_assert!(a <= b);
            }
        }
    }
}
