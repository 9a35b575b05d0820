//! [`Customer`]-related definitions.

use derive_more::{Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::Context;

/// A customer renting vehicles.
#[derive(Clone, Debug, From)]
pub struct Customer(domain::Customer);

/// A customer renting vehicles.
#[graphql_object(context = Context)]
impl Customer {
    /// Unique identifier of this `Customer`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Full name of this `Customer`.
    pub fn name(&self) -> &str {
        self.0.name.as_ref()
    }

    /// Phone number of this `Customer`, if known.
    pub fn phone(&self) -> Option<&str> {
        self.0.phone.as_deref()
    }

    /// Email address of this `Customer`, if known.
    pub fn email(&self) -> Option<&str> {
        self.0.email.as_deref()
    }
}

/// Unique identifier of a `Customer`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::customer::Id)]
#[into(domain::customer::Id)]
#[graphql(name = "CustomerId", transparent)]
pub struct Id(Uuid);
