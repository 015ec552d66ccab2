//! Query facade.
//!
//! The single entry point exposed to calling UI/API code. Validates the
//! request, orchestrates resolution, matching, assembly, and ranking, and
//! shapes the result set with pagination. Serde lives here at the
//! boundary; the domain types underneath stay serialization-free.

use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::CatalogSnapshot;
use crate::domain::{
    CargoProfile, ContainerType, DomainError, InvalidContainerType, Itinerary,
};
use crate::georef::{RawLocation, ResolutionError};

use super::assemble::assemble;
use super::config::QuoteConfig;
use super::matcher::{ServiceSelection, match_legs};
use super::pricing::{SortKey, dedupe, rank};

/// Error from quote resolution.
///
/// Everything here is a caller input problem or missing reference data;
/// nothing is retried internally. "No route exists" is not an error; see
/// [`QuoteOutcome::NoRouteFound`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum QuoteError {
    /// The mainline family toggle was off; at least mainline is required
    #[error("a quote must include the mainline service family")]
    MainlineRequired,

    /// Cargo profile named an unknown container type
    #[error(transparent)]
    UnknownContainerType(#[from] InvalidContainerType),

    /// Cargo profile failed domain validation
    #[error("invalid cargo profile: {0}")]
    InvalidCargo(#[from] DomainError),

    /// Page number or size is zero
    #[error("page number and size must be at least 1")]
    InvalidPage,

    /// Requested page size exceeds the configured maximum
    #[error("page size {requested} exceeds maximum {max}")]
    PageSizeTooLarge { requested: u32, max: u32 },

    /// Origin or destination could not be resolved
    #[error("unresolvable location: {0}")]
    Unresolvable(#[from] ResolutionError),

    /// The configured deadline elapsed mid-resolution
    #[error("quote resolution exceeded its deadline")]
    Timeout,
}

/// One (container type, count) entry of an FCL cargo profile.
#[derive(Debug, Clone, Deserialize)]
pub struct ContainerEntry {
    pub container_type: String,
    pub count: u32,
}

/// Wire shape of a cargo profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CargoDto {
    Fcl { containers: Vec<ContainerEntry> },
    Lcl { weight_kg: u32, volume_cbm_x100: u32 },
}

impl CargoDto {
    fn to_profile(&self) -> Result<CargoProfile, QuoteError> {
        match self {
            CargoDto::Fcl { containers } => {
                let mut parsed = Vec::with_capacity(containers.len());
                for entry in containers {
                    let container_type = ContainerType::parse(&entry.container_type)?;
                    parsed.push((container_type, entry.count));
                }
                Ok(CargoProfile::fcl(parsed)?)
            }
            CargoDto::Lcl {
                weight_kg,
                volume_cbm_x100,
            } => Ok(CargoProfile::lcl(*weight_kg, *volume_cbm_x100)),
        }
    }
}

/// Requested result page, 1-based.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageRequest {
    pub number: u32,
    #[serde(default)]
    pub size: Option<u32>,
}

/// A door-to-door quote request, mirroring the calling UI's form: origin
/// and destination (structured or raw address), cargo profile, ship date,
/// and the three service-family checkboxes.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequest {
    pub origin: RawLocation,
    pub destination: RawLocation,
    pub cargo: CargoDto,
    pub ship_date: NaiveDate,
    #[serde(default)]
    pub include_precarriage: bool,
    #[serde(default = "default_true")]
    pub include_mainline: bool,
    #[serde(default)]
    pub include_lastmile: bool,
    #[serde(default)]
    pub sort: Option<SortKey>,
    #[serde(default)]
    pub page: Option<PageRequest>,
}

fn default_true() -> bool {
    true
}

/// One per-currency total on an itinerary.
#[derive(Debug, Clone, Serialize)]
pub struct MoneyDto {
    /// Amount in minor units.
    pub amount: i64,
    pub currency: String,
}

/// One ranked itinerary in a quote result.
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryDto {
    pub precarriage_leg_id: Option<String>,
    pub mainline_leg_id: String,
    pub lastmile_leg_id: Option<String>,
    pub totals: Vec<MoneyDto>,
    /// Legs are priced in more than one currency; totals are reported per
    /// currency and never summed across.
    pub mixed_currency: bool,
    pub transit_days: u32,
    /// At least one leg lacked a transit-day figure.
    pub transit_incomplete: bool,
    pub etd: NaiveDate,
    pub eta: NaiveDate,
}

impl ItineraryDto {
    fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            precarriage_leg_id: itinerary
                .precarriage()
                .map(|leg| leg.id().as_str().to_string()),
            mainline_leg_id: itinerary.mainline().id().as_str().to_string(),
            lastmile_leg_id: itinerary
                .lastmile()
                .map(|leg| leg.id().as_str().to_string()),
            totals: itinerary
                .totals()
                .iter()
                .map(|money| MoneyDto {
                    amount: money.amount,
                    currency: money.currency.as_str().to_string(),
                })
                .collect(),
            mixed_currency: itinerary.mixed_currency(),
            transit_days: itinerary.transit_days(),
            transit_incomplete: itinerary.transit_incomplete(),
            etd: itinerary.etd(),
            eta: itinerary.eta(),
        }
    }
}

/// Pagination metadata for a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub number: u32,
    pub size: u32,
    pub total_items: usize,
    pub total_pages: u32,
}

/// Distinguishes "no itinerary exists" from "query malformed": the latter
/// is a `QuoteError`, the former is this typed empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteOutcome {
    Found,
    NoRouteFound,
}

/// An ordered, paginated list of assembled itineraries.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteResult {
    pub itineraries: Vec<ItineraryDto>,
    pub page: PageInfo,
    pub outcome: QuoteOutcome,
}

/// Resolve a quote request against one catalog snapshot.
///
/// The snapshot is immutable for the duration of the call: concurrent
/// catalog refreshes swap in a new snapshot elsewhere and never affect a
/// resolution already in flight.
///
/// # Errors
///
/// Returns `Err` for malformed requests and unresolvable endpoints. An
/// empty result set is not an error; it comes back as
/// [`QuoteOutcome::NoRouteFound`].
pub fn resolve_quote(
    request: &QuoteRequest,
    snapshot: &CatalogSnapshot,
    config: &QuoteConfig,
) -> Result<QuoteResult, QuoteError> {
    let started = Instant::now();

    if !request.include_mainline {
        return Err(QuoteError::MainlineRequired);
    }

    let cargo = request.cargo.to_profile()?;
    let (page_number, page_size) = validate_page(request.page, config)?;

    // Endpoints must resolve before any matching happens
    let origin = snapshot.georef.resolve(&request.origin)?;
    let destination = snapshot.georef.resolve(&request.destination)?;
    check_deadline(started, config)?;

    let selection = ServiceSelection {
        precarriage: request.include_precarriage,
        lastmile: request.include_lastmile,
    };

    let matched = match_legs(&origin, &destination, request.ship_date, selection, snapshot);
    check_deadline(started, config)?;

    let itineraries = assemble(&matched, &cargo, request.ship_date, selection);
    check_deadline(started, config)?;

    let sort_key = request.sort.unwrap_or_default();
    let mut ranked = rank(dedupe(itineraries), sort_key);
    ranked.truncate(config.max_results);

    debug!(
        itineraries = ranked.len(),
        %origin,
        %destination,
        ship_date = %request.ship_date,
        "resolved quote"
    );

    if ranked.is_empty() {
        return Ok(QuoteResult {
            itineraries: Vec::new(),
            page: PageInfo {
                number: page_number,
                size: page_size,
                total_items: 0,
                total_pages: 0,
            },
            outcome: QuoteOutcome::NoRouteFound,
        });
    }

    let total_items = ranked.len();
    let total_pages = total_items.div_ceil(page_size as usize) as u32;
    let start = (page_number as usize - 1).saturating_mul(page_size as usize);
    let page_items: Vec<ItineraryDto> = ranked
        .iter()
        .skip(start)
        .take(page_size as usize)
        .map(ItineraryDto::from_itinerary)
        .collect();

    Ok(QuoteResult {
        itineraries: page_items,
        page: PageInfo {
            number: page_number,
            size: page_size,
            total_items,
            total_pages,
        },
        outcome: QuoteOutcome::Found,
    })
}

fn validate_page(
    page: Option<PageRequest>,
    config: &QuoteConfig,
) -> Result<(u32, u32), QuoteError> {
    let (number, size) = match page {
        Some(page) => (
            page.number,
            page.size.unwrap_or(config.default_page_size),
        ),
        None => (1, config.default_page_size),
    };
    if number == 0 || size == 0 {
        return Err(QuoteError::InvalidPage);
    }
    if size > config.max_page_size {
        return Err(QuoteError::PageSizeTooLarge {
            requested: size,
            max: config.max_page_size,
        });
    }
    Ok((number, size))
}

fn check_deadline(started: Instant, config: &QuoteConfig) -> Result<(), QuoteError> {
    if let Some(deadline) = config.deadline {
        if started.elapsed() > deadline {
            return Err(QuoteError::Timeout);
        }
    }
    Ok(())
}
