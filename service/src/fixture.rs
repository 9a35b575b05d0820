//! Builders of domain records for tests.

use common::{Currency, Date, DateTime, Money};
use rust_decimal::Decimal;

use crate::domain::{
    customer, payment, rental, vehicle, Payment, Rental,
};

pub(crate) fn decimal(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub(crate) fn lira(s: &str) -> Money {
    Money {
        amount: decimal(s),
        currency: Currency::Try,
    }
}

pub(crate) fn date(s: &str) -> Date {
    s.parse().unwrap()
}

pub(crate) fn datetime(s: &str) -> DateTime {
    DateTime::from_rfc3339(s).unwrap()
}

/// Creates a zero-priced [`Rental`] of `days` spanning `start..=end`.
pub(crate) fn rental(start: &str, end: &str, days: u32) -> Rental {
    Rental {
        id: rental::Id::new(),
        vehicle_id: vehicle::Id::new(),
        customer_id: customer::Id::new(),
        start_date: date(start).coerce(),
        end_date: date(end).coerce(),
        days: days.into(),
        tariff: rental::Tariff::zero(Currency::Try),
        installments: rental::Installments::zero(Currency::Try),
        status: rental::Status::Completed,
        note: None,
        created_at: datetime(&format!("{start}T09:00:00Z")).coerce(),
    }
}

/// Creates a [`Payment`] of `amount` for the provided [`Rental`].
pub(crate) fn payment(rental: &Rental, amount: &str, at: &str) -> Payment {
    Payment {
        id: payment::Id::new(),
        rental_id: rental.id,
        amount: lira(amount),
        method: payment::Method::Cash,
        paid_at: datetime(at).coerce(),
    }
}
