//! Assembled itinerary type.
//!
//! An `Itinerary` is a complete door-to-door quote: an optional precarriage
//! leg, a mainline leg, and an optional lastmile leg, with derived totals.
//! It is validated at construction, immutable once produced, and lives only
//! for the duration of a single query.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Days, NaiveDate};

use super::{CargoProfile, DomainError, LegId, LegStatus, Money, RateLeg, ServiceFamily};

/// A complete assembled quote composed of compatible legs.
///
/// # Invariants
///
/// - `precarriage.destination == mainline.origin` when precarriage present
/// - `lastmile.origin == mainline.destination` when lastmile present
/// - Every leg is active and valid on the ship date
/// - Every leg can price the cargo profile the itinerary was built for
#[derive(Debug, Clone)]
pub struct Itinerary {
    precarriage: Option<Arc<RateLeg>>,
    mainline: Arc<RateLeg>,
    lastmile: Option<Arc<RateLeg>>,
    /// One total per currency, sorted by currency code. Never summed
    /// across currencies.
    totals: Vec<Money>,
    mixed_currency: bool,
    transit_days: u32,
    /// Set when any leg lacks a transit-day figure (it contributed zero).
    transit_incomplete: bool,
    etd: NaiveDate,
    eta: NaiveDate,
}

impl Itinerary {
    /// Assembles and validates an itinerary, computing derived fields.
    ///
    /// # Errors
    ///
    /// Returns `Err` if port continuity is broken, a leg is inactive or
    /// outside validity on the ship date, or a leg cannot price `cargo`.
    pub fn new(
        precarriage: Option<Arc<RateLeg>>,
        mainline: Arc<RateLeg>,
        lastmile: Option<Arc<RateLeg>>,
        cargo: &CargoProfile,
        ship_date: NaiveDate,
    ) -> Result<Self, DomainError> {
        if let Some(pre) = &precarriage {
            if pre.destination() != mainline.origin() {
                return Err(DomainError::LegsNotConnected {
                    family: ServiceFamily::Precarriage,
                    from: pre.destination().clone(),
                    to: mainline.origin().clone(),
                });
            }
        }
        if let Some(last) = &lastmile {
            if last.origin() != mainline.destination() {
                return Err(DomainError::LegsNotConnected {
                    family: ServiceFamily::Lastmile,
                    from: mainline.destination().clone(),
                    to: last.origin().clone(),
                });
            }
        }

        let legs: Vec<&Arc<RateLeg>> = precarriage
            .iter()
            .chain(std::iter::once(&mainline))
            .chain(lastmile.iter())
            .collect();

        let mut totals: BTreeMap<_, Money> = BTreeMap::new();
        let mut transit_days: u32 = 0;
        let mut transit_incomplete = false;

        for leg in &legs {
            if leg.status() != LegStatus::Active {
                return Err(DomainError::LegNotActive(leg.id().clone()));
            }
            if !leg.validity().contains(ship_date) {
                return Err(DomainError::LegOutsideValidity(leg.id().clone()));
            }
            let amount = leg
                .quote(cargo)
                .ok_or_else(|| DomainError::UnpriceableCargo(leg.id().clone()))?;
            let total = totals
                .entry(leg.currency())
                .or_insert_with(|| Money::new(0, leg.currency()));
            *total = total
                .checked_add(Money::new(amount, leg.currency()))
                .ok_or_else(|| DomainError::TotalOverflow(leg.id().clone()))?;

            match leg.transit_days() {
                Some(days) => {
                    transit_days = transit_days
                        .checked_add(days)
                        .ok_or_else(|| DomainError::TotalOverflow(leg.id().clone()))?;
                }
                None => transit_incomplete = true,
            }
        }

        let mixed_currency = totals.len() > 1;
        let totals = totals.into_values().collect();

        let etd = ship_date;
        let eta = etd
            .checked_add_days(Days::new(u64::from(transit_days)))
            .unwrap_or(etd);

        Ok(Itinerary {
            precarriage,
            mainline,
            lastmile,
            totals,
            mixed_currency,
            transit_days,
            transit_incomplete,
            etd,
            eta,
        })
    }

    pub fn precarriage(&self) -> Option<&Arc<RateLeg>> {
        self.precarriage.as_ref()
    }

    pub fn mainline(&self) -> &Arc<RateLeg> {
        &self.mainline
    }

    pub fn lastmile(&self) -> Option<&Arc<RateLeg>> {
        self.lastmile.as_ref()
    }

    /// One total per currency, sorted by currency code.
    pub fn totals(&self) -> &[Money] {
        &self.totals
    }

    /// True when legs are priced in more than one currency. Totals stay
    /// per-currency; the engine never applies an exchange rate.
    pub fn mixed_currency(&self) -> bool {
        self.mixed_currency
    }

    /// Sum of the legs' declared transit days; legs without a figure
    /// contribute zero (see [`transit_incomplete`](Self::transit_incomplete)).
    pub fn transit_days(&self) -> u32 {
        self.transit_days
    }

    pub fn transit_incomplete(&self) -> bool {
        self.transit_incomplete
    }

    /// Estimated departure: the mainline leg departs on the ship date.
    pub fn etd(&self) -> NaiveDate {
        self.etd
    }

    /// Estimated arrival: ETD plus total transit days.
    pub fn eta(&self) -> NaiveDate {
        self.eta
    }

    /// The identity of this itinerary for deduplication: the leg ids per
    /// role. Two itineraries with the same key are equivalent.
    pub fn key(&self) -> (Option<&LegId>, &LegId, Option<&LegId>) {
        (
            self.precarriage.as_ref().map(|leg| leg.id()),
            self.mainline.id(),
            self.lastmile.as_ref().map(|leg| leg.id()),
        )
    }
}
