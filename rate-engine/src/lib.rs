//! Rate combination resolution engine.
//!
//! Assembles door-to-door freight quotes by stitching independently priced
//! legs (precarriage trucking, ocean/air mainline, lastmile delivery) into
//! valid, priced, rankable itineraries over an immutable catalog snapshot.

pub mod catalog;
pub mod domain;
pub mod georef;
pub mod quote;
