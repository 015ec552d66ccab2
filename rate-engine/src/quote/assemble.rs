//! Combination assembly.
//!
//! Takes the matched candidate legs and produces every valid itinerary:
//! the Cartesian product over {precarriage} x {mainline} x {lastmile},
//! with the optional slots fixed to "none" when their family was not
//! requested. Incompatible triples (broken port continuity, unpriceable
//! cargo, validity miss) are discarded by `Itinerary::new`.

use chrono::NaiveDate;
use tracing::trace;

use crate::domain::{CargoProfile, Itinerary};

use super::matcher::{MatchedLegs, ServiceSelection};

/// Assemble candidate itineraries from matched legs.
///
/// When a family toggle is on, every produced itinerary carries a leg of
/// that family; a requested family with no candidates therefore yields no
/// itineraries at all. Complexity is O(p*m*l); the matcher keeps p and l
/// small so no further pruning is applied here.
pub fn assemble(
    matched: &MatchedLegs,
    cargo: &CargoProfile,
    ship_date: NaiveDate,
    selection: ServiceSelection,
) -> Vec<Itinerary> {
    let precarriage_options: Vec<_> = if selection.precarriage {
        matched.precarriage.iter().map(|leg| Some(leg.clone())).collect()
    } else {
        vec![None]
    };
    let lastmile_options: Vec<_> = if selection.lastmile {
        matched.lastmile.iter().map(|leg| Some(leg.clone())).collect()
    } else {
        vec![None]
    };

    let mut itineraries = Vec::new();

    for mainline in &matched.mainline {
        for precarriage in &precarriage_options {
            for lastmile in &lastmile_options {
                match Itinerary::new(
                    precarriage.clone(),
                    mainline.clone(),
                    lastmile.clone(),
                    cargo,
                    ship_date,
                ) {
                    Ok(itinerary) => itineraries.push(itinerary),
                    Err(reason) => {
                        trace!(mainline = %mainline.id(), %reason, "discarded combination");
                    }
                }
            }
        }
    }

    itineraries
}
