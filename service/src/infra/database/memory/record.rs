//! Raw snapshot records, as handed over by the data layer.

use std::str::FromStr;

use common::{Currency, DateTimeOf, Money, Unit};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::Error;
use crate::domain::{customer, payment, rental, vehicle};

/// Raw snapshot of records.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Snapshot {
    /// [`Currency`] of all the amounts, if specified.
    #[serde(default)]
    pub(super) currency: Option<Currency>,

    /// [`Unit`] of all the amounts, if specified.
    #[serde(default)]
    pub(super) unit: Option<Unit>,

    /// Raw [`vehicle::Vehicle`]s.
    #[serde(default)]
    pub(super) vehicles: Vec<Vehicle>,

    /// Raw [`customer::Customer`]s.
    #[serde(default)]
    pub(super) customers: Vec<Customer>,

    /// Raw [`rental::Rental`]s along with their [`payment::Payment`]s.
    #[serde(default)]
    pub(super) rentals: Vec<Rental>,
}

/// Raw [`Vehicle`](vehicle::Vehicle) record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Vehicle {
    id: vehicle::Id,
    plate: String,
    status: vehicle::Status,
}

impl Vehicle {
    /// Validates this record into a domain [`Vehicle`](vehicle::Vehicle).
    pub(super) fn into_domain(self) -> Result<vehicle::Vehicle, Error> {
        let Self { id, plate, status } = self;
        Ok(vehicle::Vehicle {
            id,
            plate: parse("Vehicle", "plate", &plate)?,
            status,
        })
    }
}

/// Raw [`Customer`](customer::Customer) record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Customer {
    id: customer::Id,
    name: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl Customer {
    /// Validates this record into a domain [`Customer`](customer::Customer).
    pub(super) fn into_domain(self) -> Result<customer::Customer, Error> {
        let Self {
            id,
            name,
            phone,
            email,
        } = self;
        Ok(customer::Customer {
            id,
            name: parse("Customer", "name", &name)?,
            phone: phone.filter(|p| !p.trim().is_empty()),
            email: email.filter(|e| !e.trim().is_empty()),
        })
    }
}

/// Raw [`Rental`](rental::Rental) record.
///
/// Missing or `null` amounts are zero.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Rental {
    id: rental::Id,
    vehicle_id: vehicle::Id,
    customer_id: customer::Id,
    start_date: String,
    end_date: String,
    #[serde(default)]
    days: Option<u32>,
    #[serde(default)]
    daily_rate: Option<Decimal>,
    #[serde(default)]
    distance_fee: Option<Decimal>,
    #[serde(default)]
    cleaning_fee: Option<Decimal>,
    #[serde(default)]
    toll_fee: Option<Decimal>,
    #[serde(default)]
    damage_fee: Option<Decimal>,
    #[serde(default)]
    fuel_fee: Option<Decimal>,
    #[serde(default)]
    upfront: Option<Decimal>,
    #[serde(default)]
    pay1: Option<Decimal>,
    #[serde(default)]
    pay2: Option<Decimal>,
    #[serde(default)]
    pay3: Option<Decimal>,
    #[serde(default)]
    pay4: Option<Decimal>,
    status: rental::Status,
    #[serde(default)]
    note: Option<String>,
    created_at: String,
    #[serde(default)]
    payments: Vec<Payment>,
}

impl Rental {
    /// Validates this record into a domain [`Rental`](rental::Rental) and its
    /// [`Payment`](payment::Payment)s, normalizing all the amounts from the
    /// provided [`Unit`].
    pub(super) fn into_domain(
        self,
        currency: Currency,
        unit: Unit,
    ) -> Result<(rental::Rental, Vec<payment::Payment>), Error> {
        let money = |v: Option<Decimal>| {
            Money::from_units(v.unwrap_or_default(), unit, currency)
        };

        let rental = rental::Rental {
            id: self.id,
            vehicle_id: self.vehicle_id,
            customer_id: self.customer_id,
            start_date: parse("Rental", "startDate", &self.start_date)?,
            end_date: parse("Rental", "endDate", &self.end_date)?,
            days: self.days.unwrap_or_default().into(),
            tariff: rental::Tariff {
                daily_rate: money(self.daily_rate),
                distance_fee: money(self.distance_fee),
                cleaning_fee: money(self.cleaning_fee),
                toll_fee: money(self.toll_fee),
                damage_fee: money(self.damage_fee),
                fuel_fee: money(self.fuel_fee),
            },
            installments: rental::Installments {
                upfront: money(self.upfront),
                pay1: money(self.pay1),
                pay2: money(self.pay2),
                pay3: money(self.pay3),
                pay4: money(self.pay4),
            },
            status: self.status,
            note: self.note.as_deref().and_then(rental::Note::new),
            created_at: datetime("Rental", "createdAt", &self.created_at)?,
        };
        let payments = self
            .payments
            .into_iter()
            .map(|p| {
                Ok(payment::Payment {
                    id: p.id,
                    rental_id: rental.id,
                    amount: money(p.amount),
                    method: p.method,
                    paid_at: datetime("Payment", "paidAt", &p.paid_at)?,
                })
            })
            .collect::<Result<_, Error>>()?;

        Ok((rental, payments))
    }
}

/// Raw [`Payment`](payment::Payment) record, nested into its
/// [`Rental`](rental::Rental).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Payment {
    id: payment::Id,
    #[serde(default)]
    amount: Option<Decimal>,
    method: payment::Method,
    paid_at: String,
}

/// Parses the provided `value` of a record `field`.
fn parse<T: FromStr>(
    record: &'static str,
    field: &'static str,
    value: &str,
) -> Result<T, Error> {
    value.parse().map_err(|_| invalid(record, field, value))
}

/// Parses the provided RFC 3339 `value` of a record `field`.
fn datetime<Of: ?Sized>(
    record: &'static str,
    field: &'static str,
    value: &str,
) -> Result<DateTimeOf<Of>, Error> {
    DateTimeOf::from_rfc3339(value).map_err(|_| invalid(record, field, value))
}

/// Creates an [`Error::InvalidField`].
fn invalid(record: &'static str, field: &'static str, value: &str) -> Error {
    Error::InvalidField {
        record,
        field,
        value: value.to_owned(),
    }
}
