//! Money type for representing monetary values.
//!
//! Amounts are held in minor units (kopecks, cents) so cart totals never
//! accumulate floating-point error. The remote API speaks decimal major units;
//! the [`decimal`] and [`decimal_opt`] serde adapters convert at the boundary.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storefront currency. Prices are quoted in roubles only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    RUB,
}

impl Currency {
    /// Get the currency code (e.g., "RUB").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::RUB => "RUB",
        }
    }

    /// Get the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::RUB => "\u{20bd}",
        }
    }

    /// Number of minor units per major unit, as a power of ten.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    fn multiplier(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in minor currency units.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a whole-unit value in the default currency.
    ///
    /// ```
    /// use lumen_commerce::money::Money;
    /// assert_eq!(Money::from_major(1000).amount_minor, 100_000);
    /// ```
    pub fn from_major(amount: i64) -> Self {
        let currency = Currency::default();
        Self::new(amount.saturating_mul(currency.multiplier()), currency)
    }

    /// Create a value from a decimal amount of major units.
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_minor = (amount * currency.multiplier() as f64).round() as i64;
        Self::new(amount_minor, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Convert to a decimal value in major units.
    pub fn to_decimal(&self) -> f64 {
        self.amount_minor as f64 / self.currency.multiplier() as f64
    }

    /// Format for display. Whole amounts drop the fraction ("5000 ₽").
    pub fn display(&self) -> String {
        format!("{} {}", self.display_amount(), self.currency.symbol())
    }

    /// Format the amount without a symbol.
    pub fn display_amount(&self) -> String {
        let multiplier = self.currency.multiplier();
        if self.amount_minor % multiplier == 0 {
            format!("{}", self.amount_minor / multiplier)
        } else {
            let places = self.currency.decimal_places() as usize;
            format!("{:.places$}", self.to_decimal())
        }
    }

    /// Add another value, failing on overflow.
    pub fn try_add(&self, other: &Money) -> Result<Money, CommerceError> {
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Multiply by a quantity.
    pub fn try_multiply(&self, factor: i64) -> Result<Money, CommerceError> {
        self.amount_minor
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
            .ok_or(CommerceError::Overflow)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serde adapter: a non-negative decimal number of major units in the default currency.
pub mod decimal {
    use super::{Currency, Money};
    use crate::error::CommerceError;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        let multiplier = 10_i64.pow(money.currency.decimal_places());
        if money.amount_minor % multiplier == 0 {
            serializer.serialize_i64(money.amount_minor / multiplier)
        } else {
            serializer.serialize_f64(money.to_decimal())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(D::Error::custom(CommerceError::InvalidPrice(amount)));
        }
        Ok(Money::from_decimal(amount, Currency::default()))
    }
}

/// Serde adapter for optional decimal prices (`old_price`).
pub mod decimal_opt {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Wrapper(#[serde(with = "super::decimal")] Money);

    pub fn serialize<S: Serializer>(money: &Option<Money>, serializer: S) -> Result<S::Ok, S::Error> {
        money.map(Wrapper).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Money>, D::Error> {
        Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|w| w.0))
    }
}
