//! Reference-data adapter: canonical location resolution.

mod error;
mod resolver;

pub use error::ResolutionError;
pub use resolver::{GeoResolver, RawLocation};
