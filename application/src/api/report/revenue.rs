//! [`Revenue`] report definition.

use std::sync::Arc;

use common::{Date, Money, YearMonth};
use derive_more::From;
use futures::TryFutureExt as _;
use juniper::graphql_object;
use service::{query, read, Query as _};

use crate::{api, AsError, Context, Error};

/// Report attributing the revenue of rentals to calendar months and
/// [`Vehicle`]s.
///
/// [`Vehicle`]: api::Vehicle
#[derive(Clone, Debug, From)]
pub struct Revenue(Arc<query::report::revenue::Output>);

/// Report attributing the revenue of rentals to calendar months and
/// `Vehicle`s.
#[graphql_object(name = "MonthlyRevenueReport", context = Context)]
impl Revenue {
    /// Revenue per month and `Vehicle`, ordered by month and then by
    /// `Vehicle`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "MonthlyRevenueReport.rows",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    #[must_use]
    pub fn rows(&self) -> Vec<Row> {
        self.0.rows.iter().copied().map(Row).collect()
    }

    /// Revenue per month of the whole fleet, ordered by month.
    #[must_use]
    pub fn totals(&self) -> Vec<Total> {
        self.0.totals.iter().copied().map(Total).collect()
    }

    /// Total revenue of the whole report, if it's not empty.
    #[must_use]
    pub fn grand_total(&self) -> Option<Money> {
        let mut totals = self.0.totals.iter().map(|t| t.revenue);
        let first = totals.next()?;
        Some(totals.fold(first, |sum, m| sum + m))
    }

    /// Rentals left out of the report for ending before they start.
    #[must_use]
    pub fn skipped(&self) -> Vec<Skipped> {
        self.0.skipped.iter().copied().map(Skipped).collect()
    }
}

/// Revenue of a single `Vehicle` in a single month.
#[derive(Clone, Copy, Debug)]
pub struct Row(read::revenue::Row);

/// Revenue of a single `Vehicle` in a single month.
#[graphql_object(name = "MonthlyRevenueRow", context = Context)]
impl Row {
    /// Month the revenue is attributed to.
    #[must_use]
    pub fn month(&self) -> YearMonth {
        self.0.month
    }

    /// ID of the `Vehicle` earning the revenue.
    #[must_use]
    pub fn vehicle_id(&self) -> api::vehicle::Id {
        self.0.vehicle_id.into()
    }

    /// `Vehicle` earning the revenue, unless it's missing in the snapshot.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "MonthlyRevenueRow.vehicle",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn vehicle(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Vehicle>, Error> {
        ctx.service()
            .execute(query::vehicle::ById::by(self.0.vehicle_id))
            .map_ok(|v| v.map(Into::into))
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .await
    }

    /// Attributed revenue.
    #[must_use]
    pub fn revenue(&self) -> Money {
        self.0.revenue
    }
}

/// Revenue of the whole fleet in a single month.
#[derive(Clone, Copy, Debug)]
pub struct Total(read::revenue::Total);

/// Revenue of the whole fleet in a single month.
#[graphql_object(name = "MonthlyRevenueTotal", context = Context)]
impl Total {
    /// Month the revenue is attributed to.
    #[must_use]
    pub fn month(&self) -> YearMonth {
        self.0.month
    }

    /// Attributed revenue.
    #[must_use]
    pub fn revenue(&self) -> Money {
        self.0.revenue
    }
}

/// Rental left out of a [`Revenue`] report.
#[derive(Clone, Copy, Debug)]
pub struct Skipped(read::revenue::MalformedRental);

/// Rental left out of a `MonthlyRevenueReport` for ending before it starts.
#[graphql_object(name = "SkippedRental", context = Context)]
impl Skipped {
    /// ID of the skipped rental.
    #[must_use]
    pub fn rental_id(&self) -> api::rental::Id {
        self.0.rental_id.into()
    }

    /// Day the skipped rental starts on.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.0.start_date.coerce()
    }

    /// Day the skipped rental ends on.
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.0.end_date.coerce()
    }
}
