//! [`Risk`] report definitions.

use common::{DateTime, Money};
use derive_more::From;
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLEnum};
use service::{query, read, Query as _};

#[cfg(doc)]
use crate::api::Customer;
use crate::{api, AsError, Context, Error};

/// Payment behaviour of a [`Customer`] across all their rentals.
#[derive(Clone, Copy, Debug, From)]
pub struct Risk(read::risk::Profile);

/// Payment behaviour of a `Customer` across all their rentals.
#[graphql_object(name = "CustomerRiskProfile", context = Context)]
impl Risk {
    /// Number of rentals made by the `Customer`.
    pub fn rentals_count(&self, ctx: &Context) -> Result<i32, Error> {
        i32::try_from(self.0.rentals)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Total charged for all the rentals.
    pub fn total_billed(&self) -> Money {
        self.0.total_billed
    }

    /// Total paid for all the rentals.
    pub fn total_paid(&self) -> Money {
        self.0.total_paid
    }

    /// Amount still owed for all the rentals.
    pub fn current_debt(&self) -> Money {
        self.0.current_debt
    }

    /// Average number of days between the end of a fully paid rental and the
    /// day its payments covered it.
    ///
    /// `null` if there is no such rental.
    pub fn avg_payment_delay(&self) -> Option<f64> {
        self.0.avg_payment_delay
    }

    /// Number of rentals in the `CRITICAL` risk tier.
    pub fn critical_rentals_count(&self, ctx: &Context) -> Result<i32, Error> {
        i32::try_from(self.0.critical_rentals)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Risk score in the `0..=100` range.
    pub fn score(&self) -> i32 {
        u8::from(self.0.score).into()
    }

    /// Display level of the risk score.
    pub fn level(&self) -> Level {
        self.0.score.level().into()
    }

    /// `DateTime` of the most recent payment of the `Customer`, if any.
    ///
    /// Installments carry no date of their own, so they are considered paid
    /// when their rental was created.
    pub fn last_payment_at(&self) -> Option<DateTime> {
        self.0.last_payment_at
    }
}

/// Ranked [`Risk`] of a single [`Customer`].
#[derive(Clone, Copy, Debug, From)]
pub struct Row(query::report::risk::Row);

/// Ranked risk of a single `Customer`.
#[graphql_object(name = "CustomerRiskRow", context = Context)]
impl Row {
    /// ID of the assessed `Customer`.
    pub fn customer_id(&self) -> api::customer::Id {
        self.0.customer_id.into()
    }

    /// Assessed `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "CustomerRiskRow.customer",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn customer(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Customer>, Error> {
        ctx.service()
            .execute(query::customer::ById::by(self.0.customer_id))
            .map_ok(|c| c.map(Into::into))
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .await
    }

    /// Assessed `CustomerRiskProfile`.
    pub fn profile(&self) -> Risk {
        Risk(self.0.profile)
    }
}

/// Display level of a risk score.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "RiskLevel")]
pub enum Level {
    /// No risk at all.
    Clear,

    /// Score below 40.
    Low,

    /// Score below 70.
    Elevated,

    /// Score of 70 and above.
    Severe,
}

impl From<read::risk::Level> for Level {
    fn from(level: read::risk::Level) -> Self {
        use read::risk::Level as L;
        match level {
            L::Clear => Self::Clear,
            L::Low => Self::Low,
            L::Elevated => Self::Elevated,
            L::Severe => Self::Severe,
        }
    }
}
