//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They
//! are distinct from resolution and facade errors.

use super::{LegId, Location, ServiceFamily};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// A leg's origin and destination are the same location
    #[error("leg origin and destination must differ")]
    SameEndpoints,

    /// Validity interval runs backwards
    #[error("validity interval must not end before it starts")]
    InvalidValidity,

    /// Cargo profile has no container entries
    #[error("cargo profile must list at least one container")]
    EmptyCargo,

    /// Cargo profile lists the same container type twice
    #[error("cargo profile lists a container type more than once")]
    DuplicateContainerType,

    /// Cargo profile has a zero count for a container type
    #[error("container count must be at least 1")]
    ZeroContainerCount,

    /// A leg's price schedule cannot price the given cargo profile
    #[error("leg {0} cannot price the given cargo profile")]
    UnpriceableCargo(LegId),

    /// Adjacent legs in an itinerary don't share a port
    #[error("{family} leg does not connect: {from} vs {to}")]
    LegsNotConnected {
        family: ServiceFamily,
        from: Location,
        to: Location,
    },

    /// A leg's validity interval excludes the ship date
    #[error("leg {0} is not valid on the ship date")]
    LegOutsideValidity(LegId),

    /// Accumulating a leg's contribution overflowed an itinerary total
    #[error("itinerary total overflows adding leg {0}")]
    TotalOverflow(LegId),

    /// A non-active leg was offered for assembly
    #[error("leg {0} is not active")]
    LegNotActive(LegId),
}
