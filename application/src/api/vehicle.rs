//! [`Vehicle`]-related definitions.

use derive_more::{Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::Context;

/// A vehicle of the fleet.
#[derive(Clone, Debug, From)]
pub struct Vehicle(domain::Vehicle);

/// A vehicle of the fleet.
#[graphql_object(context = Context)]
impl Vehicle {
    /// Unique identifier of this `Vehicle`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// License plate of this `Vehicle`.
    pub fn plate(&self) -> &str {
        self.0.plate.as_ref()
    }

    /// Availability status of this `Vehicle`.
    pub fn status(&self) -> Status {
        self.0.status.into()
    }
}

/// Unique identifier of a `Vehicle`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::vehicle::Id)]
#[into(domain::vehicle::Id)]
#[graphql(name = "VehicleId", transparent)]
pub struct Id(Uuid);

/// Availability status of a `Vehicle`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "VehicleStatus")]
pub enum Status {
    /// Parked and available.
    Idle,

    /// Handed over to a customer.
    Rented,

    /// Booked for an upcoming rental.
    Reserved,

    /// Under maintenance.
    Service,
}

impl From<domain::vehicle::Status> for Status {
    fn from(status: domain::vehicle::Status) -> Self {
        use domain::vehicle::Status as S;
        match status {
            S::Idle => Self::Idle,
            S::Rented => Self::Rented,
            S::Reserved => Self::Reserved,
            S::Service => Self::Service,
        }
    }
}
