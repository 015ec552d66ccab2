//! Cargo profile types.
//!
//! A `CargoProfile` describes the shipment being quoted: whole containers
//! (FCL) or a weight/volume pair (LCL and air freight).

use std::fmt;

use super::DomainError;

/// Error returned when parsing an unknown container type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown container type: {0}")]
pub struct InvalidContainerType(pub String);

/// ISO container types priced by per-container rate schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContainerType {
    C20Gp,
    C40Gp,
    C40Hc,
    C45Hc,
    C40Nor,
}

impl ContainerType {
    /// Parse a container type from its catalog spelling ("20GP", "40HC", ...).
    pub fn parse(s: &str) -> Result<Self, InvalidContainerType> {
        match s {
            "20GP" => Ok(ContainerType::C20Gp),
            "40GP" => Ok(ContainerType::C40Gp),
            "40HC" => Ok(ContainerType::C40Hc),
            "45HC" => Ok(ContainerType::C45Hc),
            "40NOR" => Ok(ContainerType::C40Nor),
            other => Err(InvalidContainerType(other.to_string())),
        }
    }

    /// Returns the catalog spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerType::C20Gp => "20GP",
            ContainerType::C40Gp => "40GP",
            ContainerType::C40Hc => "40HC",
            ContainerType::C45Hc => "45HC",
            ContainerType::C40Nor => "40NOR",
        }
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The shipment being quoted.
///
/// # Invariants
///
/// - FCL: at least one entry, counts >= 1, no duplicate container type
///   (enforced by [`CargoProfile::fcl`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CargoProfile {
    /// Full container load: (container type, count) pairs.
    Fcl(Vec<(ContainerType, u32)>),
    /// Less-than-container-load or air freight.
    Lcl {
        weight_kg: u32,
        /// Volume in hundredths of a cubic metre (2.5 CBM = 250).
        volume_cbm_x100: u32,
    },
}

impl CargoProfile {
    /// Constructs a validated FCL profile.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the list is empty, a count is zero, or a container
    /// type appears more than once.
    pub fn fcl(containers: Vec<(ContainerType, u32)>) -> Result<Self, DomainError> {
        if containers.is_empty() {
            return Err(DomainError::EmptyCargo);
        }
        for (i, (container_type, count)) in containers.iter().enumerate() {
            if *count == 0 {
                return Err(DomainError::ZeroContainerCount);
            }
            if containers[..i].iter().any(|(ct, _)| ct == container_type) {
                return Err(DomainError::DuplicateContainerType);
            }
        }
        Ok(CargoProfile::Fcl(containers))
    }

    /// Constructs an LCL/air profile.
    pub fn lcl(weight_kg: u32, volume_cbm_x100: u32) -> Self {
        CargoProfile::Lcl {
            weight_kg,
            volume_cbm_x100,
        }
    }

}
