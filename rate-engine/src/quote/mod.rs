//! Quote resolution pipeline: matching, assembly, ranking, facade.

mod assemble;
mod config;
mod facade;
mod matcher;
mod pricing;


pub use assemble::assemble;
pub use config::QuoteConfig;
pub use facade::{
    CargoDto, ContainerEntry, ItineraryDto, MoneyDto, PageInfo, PageRequest, QuoteError,
    QuoteOutcome, QuoteRequest, QuoteResult, resolve_quote,
};
pub use matcher::{MatchedLegs, ServiceSelection, match_legs};
pub use pricing::{SortDirection, SortField, SortKey, dedupe, rank};
