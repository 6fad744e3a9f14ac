//! Currency types for valuation reporting.
//!
//! This module provides ISO 4217 currency codes with display metadata
//! and serialisation support.
//!
//! # Examples
//!
//! ```
//! use valuation_core::types::currency::Currency;
//!
//! let usd = Currency::USD;
//! assert_eq!(usd.code(), "USD");
//! assert_eq!(usd.symbol(), "$");
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::CurrencyError;

/// ISO 4217 currency codes with display metadata.
///
/// Tags a fundamentals snapshot and every monetary figure derived from it.
/// The valuation engines never convert between currencies; a run is
/// single-currency end to end.
///
/// # Variants
/// - `USD`: United States Dollar
/// - `EUR`: Euro
/// - `GBP`: British Pound Sterling
/// - `JPY`: Japanese Yen
/// - `CHF`: Swiss Franc
///
/// # Examples
///
/// ```
/// use valuation_core::types::currency::Currency;
///
/// // Get currency code
/// assert_eq!(Currency::USD.code(), "USD");
///
/// // Get display symbol
/// assert_eq!(Currency::GBP.symbol(), "£");
///
/// // Parse from string (case-insensitive)
/// let eur: Currency = "eur".parse().unwrap();
/// assert_eq!(eur, Currency::EUR);
/// ```
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Currency {
    /// United States Dollar
    ///
    /// ISO 4217 code: USD
    USD,

    /// Euro
    ///
    /// ISO 4217 code: EUR
    EUR,

    /// British Pound Sterling
    ///
    /// ISO 4217 code: GBP
    GBP,

    /// Japanese Yen
    ///
    /// ISO 4217 code: JPY
    JPY,

    /// Swiss Franc
    ///
    /// ISO 4217 code: CHF
    CHF,
}

impl Currency {
    /// Returns the ISO 4217 three-letter currency code.
    ///
    /// # Examples
    ///
    /// ```
    /// use valuation_core::types::currency::Currency;
    ///
    /// assert_eq!(Currency::USD.code(), "USD");
    /// assert_eq!(Currency::EUR.code(), "EUR");
    /// assert_eq!(Currency::GBP.code(), "GBP");
    /// assert_eq!(Currency::JPY.code(), "JPY");
    /// assert_eq!(Currency::CHF.code(), "CHF");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
        }
    }

    /// Returns the display symbol used when rendering per-share prices.
    ///
    /// # Examples
    ///
    /// ```
    /// use valuation_core::types::currency::Currency;
    ///
    /// assert_eq!(Currency::USD.symbol(), "$");
    /// assert_eq!(Currency::EUR.symbol(), "€");
    /// assert_eq!(Currency::JPY.symbol(), "¥");
    /// ```
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::CHF => "Fr",
        }
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    /// Parses ISO 4217 currency code (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use valuation_core::types::currency::Currency;
    ///
    /// let usd: Currency = "USD".parse().unwrap();
    /// assert_eq!(usd, Currency::USD);
    ///
    /// // Case-insensitive
    /// let eur: Currency = "eur".parse().unwrap();
    /// assert_eq!(eur, Currency::EUR);
    ///
    /// // Unknown currency returns error
    /// let result: Result<Currency, _> = "XYZ".parse();
    /// assert!(result.is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, CurrencyError> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            "CHF" => Ok(Currency::CHF),
            _ => Err(CurrencyError::UnknownCurrency(s.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    /// Formats as ISO 4217 code.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
