//! GraphQL [`Query`]s definitions.

use common::Date;
use juniper::graphql_object;
use service::{query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Draws up the `RentalStatement` of the rental with the specified ID.
    ///
    /// Overdue days are counted as of `today`, which defaults to the current
    /// day.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `RENTAL_NOT_EXISTS` - the rental with the specified ID does not
    ///                         exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "rentalStatement",
            otel.name = Self::SPAN_NAME,
            today = ?today,
        ),
    )]
    pub async fn rental_statement(
        id: api::rental::Id,
        today: Option<Date>,
        ctx: &Context,
    ) -> Result<api::Statement, Error> {
        ctx.service()
            .execute(query::rental::Statement {
                rental_id: id.into(),
                today: ctx.today(today),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| RentalError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Draws up the `RentalStatement`s of the rentals matching all the
    /// specified filters, the largest balance first.
    #[tracing::instrument(
        skip_all,
        fields(
            customer_id = ?customer_id.map(|id| id.to_string()),
            gql.name = "rentalStatements",
            otel.name = Self::SPAN_NAME,
            outstanding_only = ?outstanding_only,
            status = ?status,
            today = ?today,
            vehicle_id = ?vehicle_id.map(|id| id.to_string()),
        ),
    )]
    pub async fn rental_statements(
        customer_id: Option<api::customer::Id>,
        vehicle_id: Option<api::vehicle::Id>,
        status: Option<api::rental::Status>,
        outstanding_only: Option<bool>,
        today: Option<Date>,
        ctx: &Context,
    ) -> Result<Vec<api::Statement>, Error> {
        ctx.service()
            .execute(query::rentals::Statements {
                filter: read::rental::Filter {
                    customer_id: customer_id.map(Into::into),
                    vehicle_id: vehicle_id.map(Into::into),
                    status: status.map(Into::into),
                },
                outstanding_only: outstanding_only.unwrap_or(false),
                today: ctx.today(today),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|s| s.into_iter().map(Into::into).collect())
    }

    /// Draws up the `RentalStatement`s still owing something, the largest
    /// balance first.
    #[tracing::instrument(
        skip_all,
        fields(
            customer_id = ?customer_id.map(|id| id.to_string()),
            gql.name = "outstandingRentals",
            otel.name = Self::SPAN_NAME,
            today = ?today,
            vehicle_id = ?vehicle_id.map(|id| id.to_string()),
        ),
    )]
    pub async fn outstanding_rentals(
        customer_id: Option<api::customer::Id>,
        vehicle_id: Option<api::vehicle::Id>,
        today: Option<Date>,
        ctx: &Context,
    ) -> Result<Vec<api::Statement>, Error> {
        Self::rental_statements(
            customer_id,
            vehicle_id,
            None,
            Some(true),
            today,
            ctx,
        )
        .await
    }

    /// Attributes the revenue of the rentals to calendar months and
    /// `Vehicle`s.
    ///
    /// Cancelled rentals earn nothing.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "monthlyRevenue",
            otel.name = Self::SPAN_NAME,
            vehicle_id = ?vehicle_id.map(|id| id.to_string()),
            year = ?year,
        ),
    )]
    pub async fn monthly_revenue(
        year: Option<i32>,
        vehicle_id: Option<api::vehicle::Id>,
        ctx: &Context,
    ) -> Result<api::report::Revenue, Error> {
        ctx.service()
            .execute(query::report::revenue::Monthly {
                year,
                vehicle_id: vehicle_id.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Assesses the `CustomerRiskProfile` of the `Customer` with the
    /// specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CUSTOMER_NOT_EXISTS` - the `Customer` with the specified ID does not
    ///                           exist and has no rentals.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "customerRisk",
            otel.name = Self::SPAN_NAME,
            today = ?today,
        ),
    )]
    pub async fn customer_risk(
        id: api::customer::Id,
        today: Option<Date>,
        ctx: &Context,
    ) -> Result<api::report::Risk, Error> {
        ctx.service()
            .execute(query::report::risk::Customer {
                customer_id: id.into(),
                today: ctx.today(today),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| CustomerError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Ranks all the `Customer`s, including renters missing from the
    /// `Customer`s list, from the riskiest one.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "customerRisks",
            otel.name = Self::SPAN_NAME,
            today = ?today,
        ),
    )]
    pub async fn customer_risks(
        today: Option<Date>,
        ctx: &Context,
    ) -> Result<Vec<api::report::risk::Row>, Error> {
        ctx.service()
            .execute(query::report::risk::Customers {
                today: ctx.today(today),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|rows| rows.iter().copied().map(Into::into).collect())
    }

    /// Returns the `Vehicle` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `VEHICLE_NOT_EXISTS` - the `Vehicle` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "vehicle",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn vehicle(
        id: api::vehicle::Id,
        ctx: &Context,
    ) -> Result<api::Vehicle, Error> {
        ctx.service()
            .execute(query::vehicle::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| VehicleError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Customer` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CUSTOMER_NOT_EXISTS` - the `Customer` with the specified ID does not
    ///                           exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "customer",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn customer(
        id: api::customer::Id,
        ctx: &Context,
    ) -> Result<api::Customer, Error> {
        ctx.service()
            .execute(query::customer::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| CustomerError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }
}

define_error! {
    enum CustomerError {
        #[code = "CUSTOMER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Customer` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum RentalError {
        #[code = "RENTAL_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "Rental with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum VehicleError {
        #[code = "VEHICLE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Vehicle` with the specified ID does not exist"]
        NotExists,
    }
}
