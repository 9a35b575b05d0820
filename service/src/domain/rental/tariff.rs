//! [`Tariff`] and [`Installments`] of a [`Rental`].

use common::{Currency, Money};

#[cfg(doc)]
use super::Rental;

/// Prices a [`Rental`] is billed by.
///
/// Every field is taken as entered: negative values act as credits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Tariff {
    /// Price of a single rental day.
    pub daily_rate: Money,

    /// Flat fee for driving over the included distance.
    pub distance_fee: Money,

    /// Flat cleaning fee.
    pub cleaning_fee: Money,

    /// Flat fee for road tolls.
    pub toll_fee: Money,

    /// Flat fee for damages.
    pub damage_fee: Money,

    /// Flat fee for missing fuel.
    pub fuel_fee: Money,
}

impl Tariff {
    /// Creates a [`Tariff`] with every price being zero.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            daily_rate: Money::zero(currency),
            distance_fee: Money::zero(currency),
            cleaning_fee: Money::zero(currency),
            toll_fee: Money::zero(currency),
            damage_fee: Money::zero(currency),
            fuel_fee: Money::zero(currency),
        }
    }

    /// Returns all the itemized flat fees of this [`Tariff`].
    #[must_use]
    pub const fn fees(&self) -> [Money; 5] {
        [
            self.distance_fee,
            self.cleaning_fee,
            self.toll_fee,
            self.damage_fee,
            self.fuel_fee,
        ]
    }
}

/// Fixed payment slots stored directly on a [`Rental`].
///
/// Slots carry no date of their own.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Installments {
    /// Payment taken when the [`Rental`] was made.
    pub upfront: Money,

    /// First follow-up payment.
    pub pay1: Money,

    /// Second follow-up payment.
    pub pay2: Money,

    /// Third follow-up payment.
    pub pay3: Money,

    /// Fourth follow-up payment.
    pub pay4: Money,
}

impl Installments {
    /// Creates [`Installments`] with every slot being empty.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            upfront: Money::zero(currency),
            pay1: Money::zero(currency),
            pay2: Money::zero(currency),
            pay3: Money::zero(currency),
            pay4: Money::zero(currency),
        }
    }

    /// Returns all the slots of these [`Installments`].
    #[must_use]
    pub const fn slots(&self) -> [Money; 5] {
        [self.upfront, self.pay1, self.pay2, self.pay3, self.pay4]
    }
}
