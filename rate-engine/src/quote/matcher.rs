//! Leg matching.
//!
//! For a resolved query, finds the candidate legs per service family: the
//! mainline legs connecting ports near the origin to ports near the
//! destination, the precarriage legs feeding those origin ports, and the
//! lastmile legs departing the destination ports. Vendors are never
//! collapsed here; identical corridors from different vendors stay distinct
//! candidates and selection is deferred to assembly.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::catalog::CatalogSnapshot;
use crate::domain::{Location, PortCode, RateLeg};
use crate::georef::GeoResolver;

/// Which optional service families the query asked for. Mainline is
/// always included; the facade rejects queries without it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceSelection {
    pub precarriage: bool,
    pub lastmile: bool,
}

/// Candidate legs per family for one query.
#[derive(Debug, Default)]
pub struct MatchedLegs {
    pub precarriage: Vec<Arc<RateLeg>>,
    pub mainline: Vec<Arc<RateLeg>>,
    pub lastmile: Vec<Arc<RateLeg>>,
}

/// Find all candidate legs for a query against one snapshot.
///
/// Mainline legs are matched first; the optional families are then matched
/// against the mainline legs' actual endpoint ports, so a precarriage leg
/// ending at a port no matched mainline leg departs from is never retained.
pub fn match_legs(
    origin: &Location,
    destination: &Location,
    ship_date: NaiveDate,
    selection: ServiceSelection,
    snapshot: &CatalogSnapshot,
) -> MatchedLegs {
    let georef = &snapshot.georef;

    let origin_ports = candidate_ports(origin, georef);
    let destination_ports = candidate_ports(destination, georef);
    let destination_port_set: HashSet<PortCode> = destination_ports.iter().copied().collect();

    // Mainline: legs departing a port near the origin and arriving at a
    // port near the destination.
    let mut mainline = Vec::new();
    for port in &origin_ports {
        for leg in snapshot
            .mainline
            .legs_from(&Location::Port(*port), ship_date)
        {
            let arrives_near = leg
                .destination()
                .as_port()
                .is_some_and(|p| destination_port_set.contains(&p));
            if arrives_near {
                mainline.push(leg);
            }
        }
    }

    // The optional families key off the matched mainline legs' endpoints,
    // preserving first-seen port order for determinism.
    let mut matched = MatchedLegs::default();

    if selection.precarriage {
        let mut seen = HashSet::new();
        for leg in &mainline {
            let Some(port) = leg.origin().as_port() else {
                continue;
            };
            if !seen.insert(port) {
                continue;
            }
            for candidate in snapshot
                .precarriage
                .legs_to(&Location::Port(port), ship_date)
            {
                if endpoint_matches(candidate.origin(), origin, georef) {
                    matched.precarriage.push(candidate);
                }
            }
        }
    }

    if selection.lastmile {
        let mut seen = HashSet::new();
        for leg in &mainline {
            let Some(port) = leg.destination().as_port() else {
                continue;
            };
            if !seen.insert(port) {
                continue;
            }
            for candidate in snapshot
                .lastmile
                .legs_from(&Location::Port(port), ship_date)
            {
                if endpoint_matches(candidate.destination(), destination, georef) {
                    matched.lastmile.push(candidate);
                }
            }
        }
    }

    matched.mainline = mainline;

    debug!(
        precarriage = matched.precarriage.len(),
        mainline = matched.mainline.len(),
        lastmile = matched.lastmile.len(),
        "matched candidate legs"
    );

    matched
}

/// Ports "near" a resolved query endpoint: the port itself, or every port
/// whose configured service zone contains the endpoint's area. An area with
/// no configured serving port yields no candidates (never a guess).
fn candidate_ports(endpoint: &Location, georef: &GeoResolver) -> Vec<PortCode> {
    match endpoint {
        Location::Port(port) => vec![*port],
        Location::Area(area) => georef.ports_serving(area),
        Location::Facility(facility) => match georef.zone_of_facility(facility) {
            Some(Location::Port(port)) => vec![*port],
            Some(Location::Area(area)) => georef.ports_serving(area),
            _ => Vec::new(),
        },
    }
}

/// Does a leg endpoint reach the query endpoint?
///
/// Exact canonical-key match, area match at district granularity, or a
/// facility-bounded leg whose configured zone is the query endpoint.
fn endpoint_matches(leg_endpoint: &Location, query_endpoint: &Location, georef: &GeoResolver) -> bool {
    if leg_endpoint == query_endpoint {
        return true;
    }
    match (leg_endpoint, query_endpoint) {
        (Location::Area(leg_area), Location::Area(query_area)) => {
            leg_area.district_level() == query_area.district_level()
        }
        (Location::Facility(facility), _) => georef
            .zone_of_facility(facility)
            .is_some_and(|zone| zones_equal(zone, query_endpoint)),
        (_, Location::Facility(facility)) => georef
            .zone_of_facility(facility)
            .is_some_and(|zone| zones_equal(zone, leg_endpoint)),
        _ => false,
    }
}

fn zones_equal(a: &Location, b: &Location) -> bool {
    match (a, b) {
        (Location::Area(x), Location::Area(y)) => x.district_level() == y.district_level(),
        _ => a == b,
    }
}
