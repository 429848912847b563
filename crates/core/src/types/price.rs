//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are exact decimals, never floats; cart subtotals and checkout
//! totals are computed with [`Price::times`] and [`core::ops::Add`].

use core::fmt;
use core::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// ## Examples
///
/// ```
/// use vital_harvest_core::Price;
///
/// let unit = Price::rupees(1500);
/// let line = unit.times(2);
/// assert_eq!(line.display(), "Rs 3000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paisa).
    amount: Decimal,
    /// ISO 4217 currency code.
    currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a whole-rupee price (the storefront's default currency).
    #[must_use]
    pub fn rupees(amount: i64) -> Self {
        Self::new(Decimal::new(amount, 0), CurrencyCode::PKR)
    }

    /// A zero price in the given currency.
    #[must_use]
    pub fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency code.
    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// Multiply the unit price by a quantity, yielding a line total.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// Format for display (e.g., "Rs 1500").
    ///
    /// Trailing fractional zeros are dropped; whole amounts print without a
    /// decimal point.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {}", self.currency_code.symbol(), self.amount.normalize())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

// Addition assumes a single-currency cart; the catalog carries one currency.
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.amount + rhs.amount, self.currency_code)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.amount += rhs.amount;
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    PKR,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::PKR => "Rs",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::PKR => "PKR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }
}
