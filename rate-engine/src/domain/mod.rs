//! Domain types for the rate combination engine.
//!
//! This module contains the core domain model types that represent
//! validated rate-catalog data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod cargo;
mod error;
mod itinerary;
mod leg;
mod location;
mod money;

pub use cargo::{CargoProfile, ContainerType, InvalidContainerType};
pub use error::DomainError;
pub use itinerary::Itinerary;
pub use leg::{
    ChargeUnit, InvalidLegId, LegId, LegStatus, PriceSchedule, RateLeg, ServiceFamily,
    UnitPrice, Validity,
};
pub use location::{AdminArea, FacilityCode, InvalidPortCode, Location, PortCode};
pub use money::{Currency, InvalidCurrency, Money};
