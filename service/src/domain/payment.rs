//! [`Payment`] definitions.

use common::{define_kind, DateTimeOf, Money};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::rental;
#[cfg(doc)]
use crate::domain::Rental;

/// Discrete payment made towards a [`Rental`], apart from its
/// [`rental::Installments`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Payment {
    /// ID of this [`Payment`].
    pub id: Id,

    /// ID of the [`Rental`] this [`Payment`] is made for.
    pub rental_id: rental::Id,

    /// Paid amount.
    pub amount: Money,

    /// [`Method`] of this [`Payment`].
    pub method: Method,

    /// [`DateTime`] when this [`Payment`] was made.
    ///
    /// [`DateTime`]: common::DateTime
    pub paid_at: PaymentDateTime,
}

/// ID of a [`Payment`].
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
    PartialEq,
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

define_kind! {
    #[doc = "Method of a [`Payment`]."]
    enum Method {
        #[doc = "Paid in cash."]
        Cash = 1,

        #[doc = "Paid by a card."]
        Card = 2,

        #[doc = "Paid by a bank transfer."]
        Transfer = 3,
    }
}

/// [`DateTime`] when a [`Payment`] was made.
///
/// [`DateTime`]: common::DateTime
pub type PaymentDateTime = DateTimeOf<Payment>;
