//! Charge [`Breakdown`] of a [`Rental`].

use common::Money;
use rust_decimal::Decimal;

use crate::domain::{rental, Rental};

/// Amount owed for a [`Rental`], along with its components.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Breakdown {
    /// Nominal [`rental::Days`] billed.
    pub days: rental::Days,

    /// Price of a single day.
    pub daily_rate: Money,

    /// Charge for the rental days: `days × daily_rate`.
    pub rental_charge: Money,

    /// Distance overage fee.
    pub distance_fee: Money,

    /// Cleaning fee.
    pub cleaning_fee: Money,

    /// Road toll fee.
    pub toll_fee: Money,

    /// Damage fee.
    pub damage_fee: Money,

    /// Fuel fee.
    pub fuel_fee: Money,

    /// Total amount owed: [`rental_charge`] plus all the fees.
    ///
    /// [`rental_charge`]: Breakdown::rental_charge
    pub total_due: Money,
}

impl Breakdown {
    /// Calculates the [`Breakdown`] of the provided [`Rental`].
    ///
    /// Bills the nominal [`Rental::days`], not its calendar span.
    #[must_use]
    pub fn of(rental: &Rental) -> Self {
        let rental::Tariff {
            daily_rate,
            distance_fee,
            cleaning_fee,
            toll_fee,
            damage_fee,
            fuel_fee,
        } = rental.tariff;

        let rental_charge = daily_rate * Decimal::from(rental.days);
        let total_due =
            Money::sum(rental.currency(), rental.tariff.fees()) + rental_charge;

        Self {
            days: rental.days,
            daily_rate,
            rental_charge,
            distance_fee,
            cleaning_fee,
            toll_fee,
            damage_fee,
            fuel_fee,
            total_due,
        }
    }

    /// Returns the sum of all the itemized fees.
    #[must_use]
    pub fn fees(&self) -> Money {
        Money::sum(
            self.daily_rate.currency,
            [
                self.distance_fee,
                self.cleaning_fee,
                self.toll_fee,
                self.damage_fee,
                self.fuel_fee,
            ],
        )
    }
}
