//! Geo resolution error types.

use crate::domain::InvalidPortCode;

/// Errors from resolving a raw location into a canonical key.
///
/// These indicate bad or missing reference data. They are surfaced to the
/// caller, never retried: a missing delivery-zone mapping will stay missing
/// until the reference tables change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    /// Zip code has no configured delivery-zone mapping
    #[error("zip code {0} has no configured delivery zone")]
    UnknownZip(String),

    /// Warehouse code is not in the reference tables
    #[error("unknown warehouse code: {0}")]
    UnknownWarehouse(String),

    /// Administrative tuple references an unknown node. Partial or
    /// near-miss names are rejected, not corrected.
    #[error("unknown administrative area: {0}")]
    UnknownAdminArea(String),

    /// Port code failed validation
    #[error("bad port code: {0}")]
    BadPortCode(#[from] InvalidPortCode),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ResolutionError::UnknownZip("91761".into());
        assert_eq!(
            err.to_string(),
            "zip code 91761 has no configured delivery zone"
        );

        let err = ResolutionError::UnknownWarehouse("ONT8".into());
        assert_eq!(err.to_string(), "unknown warehouse code: ONT8");

        let err = ResolutionError::UnknownAdminArea("Guangdong/Shenzhen/Nowhere".into());
        assert_eq!(
            err.to_string(),
            "unknown administrative area: Guangdong/Shenzhen/Nowhere"
        );
    }
}
