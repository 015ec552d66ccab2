//! Currency and money types.
//!
//! Amounts are carried as `i64` minor units (cents, fen). The engine never
//! converts between currencies; totals are kept side by side per currency
//! and mixed-currency itineraries are flagged for the caller.

use std::fmt;

/// Error returned when parsing an invalid currency code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid currency code: {reason}")]
pub struct InvalidCurrency {
    reason: &'static str,
}

/// A valid 3-letter ISO 4217 currency code.
///
/// Always 3 uppercase ASCII letters; valid by construction.
///
/// # Examples
///
/// ```
/// use rate_engine::domain::Currency;
///
/// let usd = Currency::parse("USD").unwrap();
/// assert_eq!(usd.as_str(), "USD");
/// assert!(Currency::parse("usd").is_err());
/// assert!(Currency::parse("US").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Currency([u8; 3]);

impl Currency {
    /// Parse a currency code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters.
    pub fn parse(s: &str) -> Result<Self, InvalidCurrency> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidCurrency {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidCurrency {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(Currency([bytes[0], bytes[1], bytes[2]]))
    }

    /// Returns the currency code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store valid ASCII uppercase letters
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Currency({})", self.as_str())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An amount in a single currency, in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money {
    /// Amount in minor units (cents, fen).
    pub amount: i64,
    pub currency: Currency,
}

impl Money {
    /// Creates a new amount.
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Adds another amount of the same currency, checking overflow.
    ///
    /// Returns `None` if the currencies differ or the sum overflows.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money {
            amount: self.amount.checked_add(other.amount)?,
            currency: self.currency,
        })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02} {}",
            self.amount / 100,
            (self.amount % 100).abs(),
            self.currency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_currency() {
        assert!(Currency::parse("USD").is_ok());
        assert!(Currency::parse("CNY").is_ok());
        assert!(Currency::parse("EUR").is_ok());
    }

    #[test]
    fn reject_invalid_currency() {
        assert!(Currency::parse("usd").is_err());
        assert!(Currency::parse("US").is_err());
        assert!(Currency::parse("USDX").is_err());
        assert!(Currency::parse("U$D").is_err());
        assert!(Currency::parse("").is_err());
    }

    #[test]
    fn currency_ordering_by_code() {
        let cny = Currency::parse("CNY").unwrap();
        let usd = Currency::parse("USD").unwrap();
        assert!(cny < usd);
    }

    #[test]
    fn money_checked_add_same_currency() {
        let usd = Currency::parse("USD").unwrap();
        let a = Money::new(150_000, usd);
        let b = Money::new(25_000, usd);
        assert_eq!(a.checked_add(b), Some(Money::new(175_000, usd)));
    }

    #[test]
    fn money_checked_add_mixed_currency_fails() {
        let usd = Currency::parse("USD").unwrap();
        let cny = Currency::parse("CNY").unwrap();
        let a = Money::new(100, usd);
        let b = Money::new(100, cny);
        assert_eq!(a.checked_add(b), None);
    }

    #[test]
    fn money_checked_add_overflow_fails() {
        let usd = Currency::parse("USD").unwrap();
        let a = Money::new(i64::MAX, usd);
        let b = Money::new(1, usd);
        assert_eq!(a.checked_add(b), None);
    }

    #[test]
    fn money_display() {
        let usd = Currency::parse("USD").unwrap();
        assert_eq!(Money::new(150_000, usd).to_string(), "1500.00 USD");
        assert_eq!(Money::new(99, usd).to_string(), "0.99 USD");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn valid_currency_string() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[A-Z]{3}").unwrap()
    }

    proptest! {
        #[test]
        fn roundtrip(s in valid_currency_string()) {
            let currency = Currency::parse(&s).unwrap();
            prop_assert_eq!(currency.as_str(), s.as_str());
        }

        #[test]
        fn add_is_commutative(a in -1_000_000_i64..1_000_000, b in -1_000_000_i64..1_000_000) {
            let usd = Currency::parse("USD").unwrap();
            let x = Money::new(a, usd);
            let y = Money::new(b, usd);
            prop_assert_eq!(x.checked_add(y), y.checked_add(x));
        }
    }
}
