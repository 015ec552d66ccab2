//! Quote resolution configuration.

use std::time::Duration;

/// Configuration parameters for quote resolution.
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    /// Page size used when the request does not specify one.
    pub default_page_size: u32,

    /// Largest page size a caller may request.
    pub max_page_size: u32,

    /// Hard cap on ranked itineraries kept per query.
    pub max_results: usize,

    /// Optional soft deadline for a single resolution call. Checked at
    /// stage boundaries; exceeding it yields a `Timeout` error rather than
    /// blocking indefinitely.
    pub deadline: Option<Duration>,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 200,
            max_results: 1000,
            deadline: None,
        }
    }
}
