//! [`Vehicle`] definitions.

use common::define_kind;
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Rental;

/// Vehicle of the fleet, rented out by [`Rental`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vehicle {
    /// ID of this [`Vehicle`].
    pub id: Id,

    /// License [`Plate`] of this [`Vehicle`].
    pub plate: Plate,

    /// Current [`Status`] of this [`Vehicle`].
    pub status: Status,
}

/// ID of a [`Vehicle`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// License plate of a [`Vehicle`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Plate(String);

impl Plate {
    /// Creates a new [`Plate`] if the given `plate` is valid.
    #[must_use]
    pub fn new(plate: impl Into<String>) -> Option<Self> {
        let plate = plate.into();
        Self::check(&plate).then_some(Self(plate))
    }

    /// Checks whether the given `plate` is a valid [`Plate`].
    fn check(plate: impl AsRef<str>) -> bool {
        let plate = plate.as_ref();
        plate.trim() == plate && !plate.is_empty() && plate.len() <= 32
    }
}

impl FromStr for Plate {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Plate`")
    }
}

define_kind! {
    #[doc = "Availability status of a [`Vehicle`]."]
    enum Status {
        #[doc = "Parked and available."]
        Idle = 1,

        #[doc = "Handed over to a customer."]
        Rented = 2,

        #[doc = "Booked for an upcoming rental."]
        Reserved = 3,

        #[doc = "Under maintenance."]
        Service = 4,
    }
}
