//! Canonical location keys.
//!
//! Every rate leg is bounded by two `Location`s. Locations compare equal
//! only on exact canonical-key match; any geographic containment (a zip
//! inside a delivery zone, an area served by a port) is resolved explicitly
//! by the geo resolver, never implied here.

use std::fmt;

/// Error returned when parsing an invalid port code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid port code: {reason}")]
pub struct InvalidPortCode {
    reason: &'static str,
}

/// A valid 5-character UN/LOCODE-style port code.
///
/// Port codes are 5 uppercase ASCII characters: a 2-letter country prefix
/// followed by 3 letters or digits (e.g. `CNSHA`, `USLAX`). This type
/// guarantees that any `PortCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use rate_engine::domain::PortCode;
///
/// let shanghai = PortCode::parse("CNSHA").unwrap();
/// assert_eq!(shanghai.as_str(), "CNSHA");
///
/// // Lowercase is rejected
/// assert!(PortCode::parse("cnsha").is_err());
///
/// // Wrong length is rejected
/// assert!(PortCode::parse("CNSH").is_err());
/// assert!(PortCode::parse("CNSHAX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortCode([u8; 5]);

impl PortCode {
    /// Parse a port code from a string.
    ///
    /// The input must be exactly 5 uppercase ASCII characters: 2 letters
    /// (country) followed by 3 letters or digits (location).
    pub fn parse(s: &str) -> Result<Self, InvalidPortCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 5 {
            return Err(InvalidPortCode {
                reason: "must be exactly 5 characters",
            });
        }

        for &b in &bytes[..2] {
            if !b.is_ascii_uppercase() {
                return Err(InvalidPortCode {
                    reason: "country prefix must be uppercase ASCII letters",
                });
            }
        }

        for &b in &bytes[2..] {
            if !b.is_ascii_uppercase() && !b.is_ascii_digit() {
                return Err(InvalidPortCode {
                    reason: "location part must be uppercase letters or digits",
                });
            }
        }

        Ok(PortCode([bytes[0], bytes[1], bytes[2], bytes[3], bytes[4]]))
    }

    /// Returns the port code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store ASCII uppercase letters and digits
        std::str::from_utf8(&self.0).unwrap()
    }

}

impl fmt::Debug for PortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PortCode({})", self.as_str())
    }
}

impl fmt::Display for PortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An administrative-hierarchy path: province/city/district, with an
/// optional street level.
///
/// Equality is exact on all present components. A partially matching
/// path (same province and city, different district) is a different area.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AdminArea {
    pub province: String,
    pub city: String,
    pub district: String,
    pub street: Option<String>,
}

impl AdminArea {
    /// Creates an area at district granularity.
    pub fn new(
        province: impl Into<String>,
        city: impl Into<String>,
        district: impl Into<String>,
    ) -> Self {
        Self {
            province: province.into(),
            city: city.into(),
            district: district.into(),
            street: None,
        }
    }

    /// Creates an area including the street level.
    pub fn with_street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    /// Returns the same area with the street level stripped.
    ///
    /// Port service areas are configured at district granularity, so
    /// containment checks compare against the district-level key.
    pub fn district_level(&self) -> AdminArea {
        AdminArea {
            province: self.province.clone(),
            city: self.city.clone(),
            district: self.district.clone(),
            street: None,
        }
    }
}

impl fmt::Display for AdminArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.province, self.city, self.district)?;
        if let Some(street) = &self.street {
            write!(f, "/{}", street)?;
        }
        Ok(())
    }
}

/// A fixed-facility key: a warehouse code or a zip code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FacilityCode {
    /// Warehouse code (e.g. an Amazon FBA code like "ONT8").
    Warehouse(String),
    /// Zip/postal code.
    Zip(String),
}

impl fmt::Display for FacilityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacilityCode::Warehouse(code) => write!(f, "warehouse {}", code),
            FacilityCode::Zip(zip) => write!(f, "zip {}", zip),
        }
    }
}

/// A canonical location key.
///
/// One of: a port, an administrative area, or a fixed facility. Two
/// locations are equal only if their canonical keys are identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    Port(PortCode),
    Area(AdminArea),
    Facility(FacilityCode),
}

impl Location {
    /// Returns the port code if this location is a port.
    pub fn as_port(&self) -> Option<PortCode> {
        match self {
            Location::Port(code) => Some(*code),
            _ => None,
        }
    }

}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Port(code) => write!(f, "port {}", code),
            Location::Area(area) => write!(f, "area {}", area),
            Location::Facility(facility) => facility.fmt(f),
        }
    }
}
