//! [`Money`]-related definitions.

use std::{fmt, ops, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};
use serde::{Deserialize, Serialize};

use crate::define_kind;

/// Amount of money in some [`Currency`], always kept in major units.
///
/// Arithmetic between [`Money`] values assumes the same [`Currency`]: a single
/// snapshot of records is normalized into one [`Currency`] at its boundary.
/// Addition, subtraction and multiplication saturate at the [`Decimal`]
/// bounds instead of overflowing.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a zero [`Money`] in the provided [`Currency`].
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Creates a new [`Money`] from the provided `value` expressed in the
    /// provided [`Unit`]s of the `currency`.
    #[must_use]
    pub fn from_units(value: Decimal, unit: Unit, currency: Currency) -> Self {
        Self {
            amount: unit.normalize(value, currency),
            currency,
        }
    }

    /// Indicates whether this [`Money`] is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Returns this [`Money`] floored at zero.
    #[must_use]
    pub fn floored(self) -> Self {
        Self {
            amount: self.amount.max(Decimal::ZERO),
            currency: self.currency,
        }
    }

    /// Sums the provided [`Money`] values, starting from zero in the provided
    /// `currency`.
    pub fn sum(
        currency: Currency,
        values: impl IntoIterator<Item = Self>,
    ) -> Self {
        values.into_iter().fold(Self::zero(currency), ops::Add::add)
    }
}

impl ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(self.currency, rhs.currency, "currency mismatch");
        Self {
            amount: self.amount.saturating_add(rhs.amount),
            currency: self.currency,
        }
    }
}

impl ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl ops::Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(self.currency, rhs.currency, "currency mismatch");
        Self {
            amount: self.amount.saturating_sub(rhs.amount),
            currency: self.currency,
        }
    }
}

impl ops::Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self {
            amount: self.amount.saturating_mul(rhs),
            currency: self.currency,
        }
    }
}

impl ops::Div<Decimal> for Money {
    type Output = Self;

    fn div(self, rhs: Decimal) -> Self::Output {
        Self {
            amount: self.amount / rhs,
            currency: self.currency,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        let amount = amount.normalize();
        match amount.is_integer().then(|| amount.to_i128()).flatten() {
            Some(int) => write!(f, "{int}{currency}"),
            None => write!(f, "{amount}{currency}"),
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "US Dollar."]
        Usd = 1,

        #[doc = "Euro."]
        Eur = 2,

        #[doc = "Russian Ruble."]
        Rub = 3,

        #[doc = "Turkish Lira."]
        Try = 4,
    }
}

impl Currency {
    /// Number of decimal digits of the minor unit of this [`Currency`].
    #[must_use]
    pub const fn exponent(self) -> u32 {
        match self {
            Self::Usd | Self::Eur | Self::Rub | Self::Try => 2,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::Try
    }
}

define_kind! {
    #[doc = "Unit in which raw amounts of a [`Currency`] are expressed."]
    enum Unit {
        #[doc = "Major units (lira, dollars), possibly fractional."]
        Major = 1,

        #[doc = "Minor units (kuruş, cents), integral."]
        Minor = 2,
    }
}

impl Unit {
    /// Normalizes the provided raw `value` of this [`Unit`] into major units
    /// of the `currency`.
    #[must_use]
    pub fn normalize(self, value: Decimal, currency: Currency) -> Decimal {
        match self {
            Self::Major => value,
            Self::Minor => {
                let mut scale = Decimal::ONE;
                for _ in 0..currency.exponent() {
                    scale *= Decimal::TEN;
                }
                value / scale
            }
        }
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}{currency}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer;
    /// - `currency` is a three-letter currency code.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}
