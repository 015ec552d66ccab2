//! Reference-data resolution.
//!
//! `GeoResolver` normalizes heterogeneous geographic identifiers (port
//! codes, administrative tuples, warehouse codes, zip/address pairs) into
//! canonical `Location` keys, and answers the explicit containment
//! questions the matcher needs ("which ports serve this area?").
//!
//! Resolution is deterministic and total over well-formed input. There is
//! no fuzzy matching: a near-miss administrative name or an unmapped zip is
//! an error, never a guess, so a quote can never be silently misrouted.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::domain::{AdminArea, FacilityCode, Location, PortCode};

use super::error::ResolutionError;

/// A raw, caller-supplied location before canonicalization.
///
/// This is the shape the calling UI submits: either a structured key or a
/// free-text address anchored by a zip code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawLocation {
    /// UN/LOCODE-style port code string.
    Port(String),
    /// Administrative hierarchy tuple.
    Admin {
        province: String,
        city: String,
        district: String,
        #[serde(default)]
        street: Option<String>,
    },
    /// Warehouse code.
    Warehouse(String),
    /// Zip code with a free-text address. Only the zip participates in
    /// resolution; the address is carried for display by the caller.
    ZipAddress {
        zip: String,
        #[serde(default)]
        address: Option<String>,
    },
}

/// Canonical location resolver over explicit reference tables.
///
/// The tables are populated once at snapshot-build time and read-only
/// afterwards, so a resolver can be shared freely across queries.
#[derive(Debug, Default, Clone)]
pub struct GeoResolver {
    /// zip code -> the delivery-zone location it belongs to.
    zip_zones: HashMap<String, Location>,
    /// warehouse code -> the site location it resolves to.
    warehouse_sites: HashMap<String, Location>,
    /// Known administrative areas, at district granularity.
    admin_areas: HashSet<AdminArea>,
    /// port -> administrative areas within its service zone.
    port_service_areas: HashMap<PortCode, Vec<AdminArea>>,
}

impl GeoResolver {
    /// Creates an empty resolver with no reference data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a zip code as belonging to a delivery zone.
    pub fn with_zip_zone(mut self, zip: impl Into<String>, zone: Location) -> Self {
        self.zip_zones.insert(zip.into(), zone);
        self
    }

    /// Registers a warehouse code and the site it resolves to.
    pub fn with_warehouse(mut self, code: impl Into<String>, site: Location) -> Self {
        self.warehouse_sites.insert(code.into(), site);
        self
    }

    /// Registers a known administrative area.
    pub fn with_admin_area(mut self, area: AdminArea) -> Self {
        self.admin_areas.insert(area.district_level());
        self
    }

    /// Registers an administrative area as inside a port's service zone.
    ///
    /// Also registers the area itself as known.
    pub fn with_port_service_area(mut self, port: PortCode, area: AdminArea) -> Self {
        let area = area.district_level();
        self.admin_areas.insert(area.clone());
        self.port_service_areas.entry(port).or_default().push(area);
        self
    }

    /// Resolves a raw location into its canonical key.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the input references reference data this resolver
    /// does not carry: an unmapped zip, an unknown warehouse code, or an
    /// administrative tuple that does not match a known node exactly.
    pub fn resolve(&self, raw: &RawLocation) -> Result<Location, ResolutionError> {
        match raw {
            RawLocation::Port(code) => {
                let port = PortCode::parse(code)?;
                Ok(Location::Port(port))
            }
            RawLocation::Admin {
                province,
                city,
                district,
                street,
            } => {
                let mut area = AdminArea::new(province.clone(), city.clone(), district.clone());
                if !self.admin_areas.contains(&area) {
                    return Err(ResolutionError::UnknownAdminArea(area.to_string()));
                }
                if let Some(street) = street {
                    area = area.with_street(street.clone());
                }
                Ok(Location::Area(area))
            }
            RawLocation::Warehouse(code) => self
                .warehouse_sites
                .get(code)
                .cloned()
                .ok_or_else(|| ResolutionError::UnknownWarehouse(code.clone())),
            RawLocation::ZipAddress { zip, .. } => self
                .zip_zones
                .get(zip)
                .cloned()
                .ok_or_else(|| ResolutionError::UnknownZip(zip.clone())),
        }
    }

    /// Returns the ports whose service zones contain `area`.
    ///
    /// Containment is checked at district granularity.
    pub fn ports_serving(&self, area: &AdminArea) -> Vec<PortCode> {
        let key = area.district_level();
        let mut ports: Vec<PortCode> = self
            .port_service_areas
            .iter()
            .filter(|(_, areas)| areas.contains(&key))
            .map(|(port, _)| *port)
            .collect();
        // HashMap iteration order is arbitrary; sort for determinism
        ports.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ports
    }

    /// Returns the delivery zone a zip code belongs to, if configured.
    pub fn zone_of_zip(&self, zip: &str) -> Option<&Location> {
        self.zip_zones.get(zip)
    }

    /// Returns the site a warehouse code resolves to, if configured.
    pub fn site_of_warehouse(&self, code: &str) -> Option<&Location> {
        self.warehouse_sites.get(code)
    }

    /// Resolves a facility key into the zone/site location it belongs to.
    ///
    /// Used by the matcher to decide whether a leg bounded by a facility
    /// reaches the query's endpoint zone.
    pub fn zone_of_facility(&self, facility: &FacilityCode) -> Option<&Location> {
        match facility {
            FacilityCode::Zip(zip) => self.zone_of_zip(zip),
            FacilityCode::Warehouse(code) => self.site_of_warehouse(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(s: &str) -> PortCode {
        PortCode::parse(s).unwrap()
    }

    fn pudong() -> AdminArea {
        AdminArea::new("Shanghai", "Shanghai", "Pudong")
    }

    fn resolver() -> GeoResolver {
        GeoResolver::new()
            .with_port_service_area(port("CNSHA"), pudong())
            .with_zip_zone(
                "91761",
                Location::Area(AdminArea::new("California", "Ontario", "Inland Empire")),
            )
            .with_warehouse(
                "ONT8",
                Location::Area(AdminArea::new("California", "Ontario", "Inland Empire")),
            )
    }

    #[test]
    fn resolve_port_code() {
        let loc = resolver()
            .resolve(&RawLocation::Port("CNSHA".into()))
            .unwrap();
        assert_eq!(loc, Location::Port(port("CNSHA")));
    }

    #[test]
    fn resolve_bad_port_code_fails() {
        let result = resolver().resolve(&RawLocation::Port("shanghai".into()));
        assert!(matches!(result, Err(ResolutionError::BadPortCode(_))));
    }

    #[test]
    fn resolve_known_admin_area() {
        let loc = resolver()
            .resolve(&RawLocation::Admin {
                province: "Shanghai".into(),
                city: "Shanghai".into(),
                district: "Pudong".into(),
                street: None,
            })
            .unwrap();
        assert_eq!(loc, Location::Area(pudong()));
    }

    #[test]
    fn resolve_unknown_admin_area_fails() {
        let result = resolver().resolve(&RawLocation::Admin {
            province: "Shanghai".into(),
            city: "Shanghai".into(),
            district: "Nowhere".into(),
            street: None,
        });
        assert!(matches!(result, Err(ResolutionError::UnknownAdminArea(_))));
    }

    #[test]
    fn near_miss_admin_name_is_rejected_not_corrected() {
        // "Pu Dong" is close to "Pudong" but must not resolve
        let result = resolver().resolve(&RawLocation::Admin {
            province: "Shanghai".into(),
            city: "Shanghai".into(),
            district: "Pu Dong".into(),
            street: None,
        });
        assert!(matches!(result, Err(ResolutionError::UnknownAdminArea(_))));
    }

    #[test]
    fn resolve_admin_area_keeps_street() {
        let loc = resolver()
            .resolve(&RawLocation::Admin {
                province: "Shanghai".into(),
                city: "Shanghai".into(),
                district: "Pudong".into(),
                street: Some("Century Ave".into()),
            })
            .unwrap();
        assert_eq!(
            loc,
            Location::Area(pudong().with_street("Century Ave"))
        );
    }

    #[test]
    fn resolve_zip_to_zone() {
        let loc = resolver()
            .resolve(&RawLocation::ZipAddress {
                zip: "91761".into(),
                address: Some("123 E Main St".into()),
            })
            .unwrap();
        assert_eq!(
            loc,
            Location::Area(AdminArea::new("California", "Ontario", "Inland Empire"))
        );
    }

    #[test]
    fn resolve_unmapped_zip_fails() {
        let result = resolver().resolve(&RawLocation::ZipAddress {
            zip: "99999".into(),
            address: None,
        });
        assert_eq!(result, Err(ResolutionError::UnknownZip("99999".into())));
    }

    #[test]
    fn resolve_warehouse() {
        let loc = resolver()
            .resolve(&RawLocation::Warehouse("ONT8".into()))
            .unwrap();
        assert!(matches!(loc, Location::Area(_)));
    }

    #[test]
    fn resolve_unknown_warehouse_fails() {
        let result = resolver().resolve(&RawLocation::Warehouse("XXX1".into()));
        assert_eq!(
            result,
            Err(ResolutionError::UnknownWarehouse("XXX1".into()))
        );
    }

    #[test]
    fn ports_serving_checks_exact_district() {
        let r = resolver();
        assert_eq!(r.ports_serving(&pudong()), vec![port("CNSHA")]);
        assert!(
            r.ports_serving(&AdminArea::new("Shanghai", "Shanghai", "Minhang"))
                .is_empty()
        );
    }

    #[test]
    fn ports_serving_ignores_street_level() {
        let r = resolver();
        assert_eq!(
            r.ports_serving(&pudong().with_street("Century Ave")),
            vec![port("CNSHA")]
        );
    }

    #[test]
    fn ports_serving_is_sorted_and_deterministic() {
        let r = GeoResolver::new()
            .with_port_service_area(port("CNSHA"), pudong())
            .with_port_service_area(port("CNNGB"), pudong());
        assert_eq!(r.ports_serving(&pudong()), vec![port("CNNGB"), port("CNSHA")]);
    }

    #[test]
    fn ports_serving_unknown_area_is_empty() {
        let r = resolver();
        let unknown = AdminArea::new("Zhejiang", "Ningbo", "Beilun");
        assert!(r.ports_serving(&unknown).is_empty());
    }

    #[test]
    fn zone_of_facility() {
        let r = resolver();
        assert!(r.zone_of_facility(&FacilityCode::Zip("91761".into())).is_some());
        assert!(r.zone_of_facility(&FacilityCode::Zip("00000".into())).is_none());
        assert!(
            r.zone_of_facility(&FacilityCode::Warehouse("ONT8".into()))
                .is_some()
        );
    }

    #[test]
    fn raw_location_deserializes() {
        let raw: RawLocation =
            serde_json::from_str(r#"{"port": "CNSHA"}"#).unwrap();
        assert_eq!(raw, RawLocation::Port("CNSHA".into()));

        let raw: RawLocation = serde_json::from_str(
            r#"{"zip_address": {"zip": "91761", "address": "123 E Main St"}}"#,
        )
        .unwrap();
        assert!(matches!(raw, RawLocation::ZipAddress { .. }));

        let raw: RawLocation = serde_json::from_str(
            r#"{"admin": {"province": "Shanghai", "city": "Shanghai", "district": "Pudong"}}"#,
        )
        .unwrap();
        assert!(matches!(raw, RawLocation::Admin { street: None, .. }));
    }
}
