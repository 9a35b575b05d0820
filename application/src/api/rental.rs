//! [`Statement`]-related definitions.

use common::{Date, DateTime, Money};
use derive_more::{Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, query, read, Query as _};
use uuid::Uuid;

use crate::{api, AsError, Context, Error};

/// Reconciled statement of a single rental: what is charged, what is paid and
/// what is still owed.
#[derive(Clone, Debug, From)]
pub struct Statement(read::Statement);

/// Reconciled statement of a single rental: what is charged, what is paid and
/// what is still owed.
#[graphql_object(name = "RentalStatement", context = Context)]
impl Statement {
    /// Unique identifier of the rental.
    pub fn id(&self) -> Id {
        self.0.rental.id.into()
    }

    /// ID of the rented `Vehicle`.
    pub fn vehicle_id(&self) -> api::vehicle::Id {
        self.0.rental.vehicle_id.into()
    }

    /// Rented `Vehicle`, unless it's missing in the snapshot.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RentalStatement.vehicle",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn vehicle(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Vehicle>, Error> {
        ctx.service()
            .execute(query::vehicle::ById::by(self.0.rental.vehicle_id))
            .map_ok(|v| v.map(Into::into))
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .await
    }

    /// ID of the renting `Customer`.
    pub fn customer_id(&self) -> api::customer::Id {
        self.0.rental.customer_id.into()
    }

    /// Renting `Customer`, unless it's missing in the snapshot.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RentalStatement.customer",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn customer(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Customer>, Error> {
        ctx.service()
            .execute(query::customer::ById::by(self.0.rental.customer_id))
            .map_ok(|c| c.map(Into::into))
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .await
    }

    /// First calendar day of the rental.
    pub fn start_date(&self) -> Date {
        self.0.rental.start_date.coerce()
    }

    /// Last calendar day of the rental.
    pub fn end_date(&self) -> Date {
        self.0.rental.end_date.coerce()
    }

    /// Lifecycle status of the rental.
    pub fn status(&self) -> Status {
        self.0.rental.status.into()
    }

    /// Free-text note of the rental.
    pub fn note(&self) -> Option<&str> {
        self.0.rental.note.as_ref().map(AsRef::<str>::as_ref)
    }

    /// Itemized charges of the rental.
    pub fn charge(&self) -> Charge {
        Charge(self.0.charge)
    }

    /// Sum of the installment slots stored on the rental.
    pub fn installments_paid(&self) -> Money {
        self.0.paid.installments
    }

    /// Sum of the ledger payments made for the rental.
    pub fn ledger_paid(&self) -> Money {
        self.0.paid.ledger
    }

    /// Total paid for the rental.
    pub fn paid(&self) -> Money {
        self.0.paid.paid
    }

    /// Signed difference between the charged and the paid totals.
    ///
    /// Negative when the rental is overpaid.
    pub fn raw_balance(&self) -> Money {
        self.0.balance.raw
    }

    /// Amount still owed, never negative.
    pub fn balance(&self) -> Money {
        self.0.balance.display
    }

    /// Payment status of the rental.
    pub fn balance_status(&self) -> BalanceStatus {
        self.0.balance.status.into()
    }

    /// Number of days the unpaid balance is past the rental end.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RentalStatement.overdueDays",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn overdue_days(&self, ctx: &Context) -> Result<i32, Error> {
        i32::try_from(self.0.overdue.days())
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Collection risk tier of the rental.
    pub fn tier(&self) -> Tier {
        self.0.tier.into()
    }

    /// Day the payments first covered the charged total, if they did.
    pub fn settled_on(&self) -> Option<Date> {
        self.0.settled_on
    }

    /// `DateTime` of the most recent payment for the rental, if any.
    ///
    /// Installments carry no date of their own, so they are considered paid
    /// when the rental was created.
    pub fn last_paid_at(&self) -> Option<DateTime> {
        self.0.last_paid_at
    }
}

/// Itemized charges of a rental.
#[derive(Clone, Copy, Debug)]
pub struct Charge(read::charge::Breakdown);

/// Itemized charges of a rental.
#[graphql_object(name = "RentalCharge", context = Context)]
impl Charge {
    /// Number of billed days.
    pub fn days(&self, ctx: &Context) -> Result<i32, Error> {
        i32::try_from(u32::from(self.0.days))
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Price of a single billed day.
    pub fn daily_rate(&self) -> Money {
        self.0.daily_rate
    }

    /// Billed days multiplied by the daily rate.
    pub fn rental_charge(&self) -> Money {
        self.0.rental_charge
    }

    /// Fee for the driven distance.
    pub fn distance_fee(&self) -> Money {
        self.0.distance_fee
    }

    /// Fee for cleaning the vehicle.
    pub fn cleaning_fee(&self) -> Money {
        self.0.cleaning_fee
    }

    /// Fee for the road tolls.
    pub fn toll_fee(&self) -> Money {
        self.0.toll_fee
    }

    /// Fee for the caused damage.
    pub fn damage_fee(&self) -> Money {
        self.0.damage_fee
    }

    /// Fee for the missing fuel.
    pub fn fuel_fee(&self) -> Money {
        self.0.fuel_fee
    }

    /// Sum of all the itemized fees.
    pub fn fees(&self) -> Money {
        self.0.fees()
    }

    /// Total charged for the rental.
    pub fn total_due(&self) -> Money {
        self.0.total_due
    }
}

/// Unique identifier of a rental.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::rental::Id)]
#[into(domain::rental::Id)]
#[graphql(name = "RentalId", transparent)]
pub struct Id(Uuid);

/// Lifecycle status of a rental.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "RentalStatus")]
pub enum Status {
    /// The vehicle is booked, but not handed over yet.
    Reserved,

    /// The vehicle is handed over to the customer.
    Active,

    /// The vehicle is returned.
    Completed,

    /// The rental is called off.
    Cancelled,
}

impl From<domain::rental::Status> for Status {
    fn from(status: domain::rental::Status) -> Self {
        use domain::rental::Status as S;
        match status {
            S::Reserved => Self::Reserved,
            S::Active => Self::Active,
            S::Completed => Self::Completed,
            S::Cancelled => Self::Cancelled,
        }
    }
}

impl From<Status> for domain::rental::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Reserved => Self::Reserved,
            Status::Active => Self::Active,
            Status::Completed => Self::Completed,
            Status::Cancelled => Self::Cancelled,
        }
    }
}

/// Payment status of a rental.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
pub enum BalanceStatus {
    /// Nothing is owed.
    Paid,

    /// Something is paid, but not everything.
    Partial,

    /// Nothing is paid while something is owed.
    Unpaid,
}

impl From<read::balance::Status> for BalanceStatus {
    fn from(status: read::balance::Status) -> Self {
        use read::balance::Status as S;
        match status {
            S::Paid => Self::Paid,
            S::Partial => Self::Partial,
            S::Unpaid => Self::Unpaid,
        }
    }
}

/// Collection risk tier of a rental.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "RiskTier")]
pub enum Tier {
    /// Small balance, recently ended.
    Low,

    /// Noticeable balance or a couple of weeks late.
    Medium,

    /// Large balance or a month late.
    High,

    /// Very large balance or two months late.
    Critical,
}

impl From<read::balance::Tier> for Tier {
    fn from(tier: read::balance::Tier) -> Self {
        use read::balance::Tier as T;
        match tier {
            T::Low => Self::Low,
            T::Medium => Self::Medium,
            T::High => Self::High,
            T::Critical => Self::Critical,
        }
    }
}
