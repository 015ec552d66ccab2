//! Rate leg types.
//!
//! A `RateLeg` is one independently priced, geographically bounded segment
//! of a shipment's route: precarriage trucking, mainline carriage, or
//! lastmile delivery. Validity and endpoints are validated at construction
//! so matching and assembly can trust them.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use super::{CargoProfile, ContainerType, Currency, DomainError, Location};

/// Error returned for a malformed leg id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("leg id must be non-empty")]
pub struct InvalidLegId;

/// A unique rate-leg identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LegId(String);

impl LegId {
    /// Creates a leg id, rejecting empty or blank input.
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidLegId> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(InvalidLegId);
        }
        Ok(LegId(id))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The three service families a shipment can be composed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceFamily {
    Precarriage,
    Mainline,
    Lastmile,
}

impl fmt::Display for ServiceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceFamily::Precarriage => "precarriage",
            ServiceFamily::Mainline => "mainline",
            ServiceFamily::Lastmile => "lastmile",
        };
        f.write_str(s)
    }
}

/// Lifecycle status of a catalog rate.
///
/// Only `Active` legs are ever eligible for matching, regardless of date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegStatus {
    Active,
    Expired,
    Withdrawn,
}

/// An inclusive calendar-date validity interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validity {
    from: NaiveDate,
    to: NaiveDate,
}

impl Validity {
    /// Creates a validity interval.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `to` is before `from`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, DomainError> {
        if to < from {
            return Err(DomainError::InvalidValidity);
        }
        Ok(Validity { from, to })
    }

    /// Returns true if `date` falls within the interval (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }
}

/// The unit a per-unit rate is charged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeUnit {
    /// Once per bill of lading.
    PerBill,
    /// Per metric ton, rounded up.
    PerTon,
    /// Per cubic metre, rounded up.
    PerCbm,
    /// Per hour of service. Not quotable from a cargo profile; a leg whose
    /// schedule offers only hourly prices cannot match any query.
    PerHour,
}

/// One per-unit price entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitPrice {
    pub unit: ChargeUnit,
    /// Amount in minor units.
    pub amount: i64,
}

/// A leg's price schedule: per-container-type or per-unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceSchedule {
    /// Container type -> amount in minor units.
    PerContainer(BTreeMap<ContainerType, i64>),
    /// Ordered unit prices; the first unit applicable to the cargo profile
    /// wins. The ordering is part of the catalog data, not engine policy.
    PerUnit(Vec<UnitPrice>),
}

impl PriceSchedule {
    /// Quotes this schedule against a cargo profile.
    ///
    /// Returns `None` when the schedule cannot price the profile: a missing
    /// container type is exclusion, never a zero default.
    pub fn quote(&self, cargo: &CargoProfile) -> Option<i64> {
        match (self, cargo) {
            (PriceSchedule::PerContainer(prices), CargoProfile::Fcl(containers)) => {
                let mut total: i64 = 0;
                for (container_type, count) in containers {
                    let price = prices.get(container_type)?;
                    total = total.checked_add(price.checked_mul(i64::from(*count))?)?;
                }
                Some(total)
            }
            // Tonnage and volume are unknown for FCL cargo, so only a flat
            // per-bill charge is applicable.
            (PriceSchedule::PerUnit(units), CargoProfile::Fcl(_)) => units
                .iter()
                .find(|u| u.unit == ChargeUnit::PerBill)
                .map(|u| u.amount),
            (
                PriceSchedule::PerUnit(units),
                CargoProfile::Lcl {
                    weight_kg,
                    volume_cbm_x100,
                },
            ) => {
                for unit_price in units {
                    let quantity = match unit_price.unit {
                        ChargeUnit::PerBill => 1,
                        ChargeUnit::PerTon => i64::from(weight_kg.div_ceil(1000)),
                        ChargeUnit::PerCbm => i64::from(volume_cbm_x100.div_ceil(100)),
                        ChargeUnit::PerHour => continue,
                    };
                    return unit_price.amount.checked_mul(quantity);
                }
                None
            }
            (PriceSchedule::PerContainer(_), CargoProfile::Lcl { .. }) => None,
        }
    }
}

/// One priced segment of a shipment route.
///
/// # Invariants
///
/// - Origin and destination differ
/// - Validity interval is well-formed (checked on [`Validity`])
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLeg {
    id: LegId,
    family: ServiceFamily,
    origin: Location,
    destination: Location,
    /// Vendor offering the rate; legs sharing endpoints but differing in
    /// vendor are distinct candidates.
    vendor: Option<String>,
    carrier: Option<String>,
    validity: Validity,
    status: LegStatus,
    currency: Currency,
    schedule: PriceSchedule,
    transit_days: Option<u32>,
}

impl RateLeg {
    /// Construct a leg, validating that the endpoints differ.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: LegId,
        family: ServiceFamily,
        origin: Location,
        destination: Location,
        validity: Validity,
        status: LegStatus,
        currency: Currency,
        schedule: PriceSchedule,
        transit_days: Option<u32>,
    ) -> Result<Self, DomainError> {
        if origin == destination {
            return Err(DomainError::SameEndpoints);
        }

        Ok(RateLeg {
            id,
            family,
            origin,
            destination,
            vendor: None,
            carrier: None,
            validity,
            status,
            currency,
            schedule,
            transit_days,
        })
    }

    /// Sets the vendor name.
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    /// Sets the carrier name.
    pub fn with_carrier(mut self, carrier: impl Into<String>) -> Self {
        self.carrier = Some(carrier.into());
        self
    }

    pub fn id(&self) -> &LegId {
        &self.id
    }

    pub fn family(&self) -> ServiceFamily {
        self.family
    }

    pub fn origin(&self) -> &Location {
        &self.origin
    }

    pub fn destination(&self) -> &Location {
        &self.destination
    }

    pub fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref()
    }

    pub fn carrier(&self) -> Option<&str> {
        self.carrier.as_deref()
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    pub fn status(&self) -> LegStatus {
        self.status
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn schedule(&self) -> &PriceSchedule {
        &self.schedule
    }

    pub fn transit_days(&self) -> Option<u32> {
        self.transit_days
    }

    /// Returns true if this leg may match a query shipping on `as_of`:
    /// status is active and the date falls within the validity interval.
    pub fn matchable_on(&self, as_of: NaiveDate) -> bool {
        self.status == LegStatus::Active && self.validity.contains(as_of)
    }

    /// Quotes this leg against a cargo profile.
    pub fn quote(&self, cargo: &CargoProfile) -> Option<i64> {
        self.schedule.quote(cargo)
    }
}
