//! [`Rental`] definitions.

pub mod tariff;

use common::{define_kind, Currency, DateOf, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{customer, vehicle};
#[cfg(doc)]
use crate::domain::{Customer, Vehicle};

pub use self::tariff::{Installments, Tariff};

/// Rental of a [`Vehicle`] by a [`Customer`].
#[derive(Clone, Debug)]
pub struct Rental {
    /// ID of this [`Rental`].
    pub id: Id,

    /// ID of the rented [`Vehicle`].
    pub vehicle_id: vehicle::Id,

    /// ID of the [`Customer`] renting the [`Vehicle`].
    pub customer_id: customer::Id,

    /// First calendar day of this [`Rental`].
    pub start_date: StartDate,

    /// Last calendar day of this [`Rental`] (inclusive).
    pub end_date: EndDate,

    /// Nominal duration of this [`Rental`] used for billing.
    ///
    /// Edited independently from the [`start_date`]..=[`end_date`] span, so
    /// the two may disagree.
    ///
    /// [`end_date`]: Rental::end_date
    /// [`start_date`]: Rental::start_date
    pub days: Days,

    /// [`Tariff`] this [`Rental`] is billed by.
    pub tariff: Tariff,

    /// [`Installments`] paid directly on this [`Rental`].
    pub installments: Installments,

    /// Lifecycle [`Status`] of this [`Rental`].
    pub status: Status,

    /// Free-text [`Note`] about this [`Rental`], if any.
    pub note: Option<Note>,

    /// [`DateTime`] when this [`Rental`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: CreationDateTime,
}

impl Rental {
    /// Returns the [`Currency`] this [`Rental`] is billed in.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.tariff.daily_rate.currency
    }

    /// Returns the number of calendar days in the
    /// [`start_date`]..=[`end_date`] span.
    ///
    /// The result is not positive if the span is malformed.
    ///
    /// [`end_date`]: Rental::end_date
    /// [`start_date`]: Rental::start_date
    #[must_use]
    pub fn span_days(&self) -> i64 {
        self.end_date.days_since(self.start_date) + 1
    }
}

/// ID of a [`Rental`].
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

/// Nominal number of days of a [`Rental`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Days(u32);

impl From<Days> for Decimal {
    fn from(days: Days) -> Self {
        days.0.into()
    }
}

/// Free-text note of a [`Rental`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Note(String);

impl Note {
    /// Creates a new [`Note`] if the given `note` is not blank.
    ///
    /// The `note` is trimmed.
    #[must_use]
    pub fn new(note: impl AsRef<str>) -> Option<Self> {
        let note = note.as_ref().trim();
        (!note.is_empty()).then(|| Self(note.to_owned()))
    }
}

impl FromStr for Note {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("blank `Note`")
    }
}

define_kind! {
    #[doc = "Lifecycle status of a [`Rental`]."]
    enum Status {
        #[doc = "The [`Vehicle`] is booked, but not handed over yet."]
        Reserved = 1,

        #[doc = "The [`Vehicle`] is handed over to the [`Customer`]."]
        Active = 2,

        #[doc = "The [`Vehicle`] is returned."]
        Completed = 3,

        #[doc = "The [`Rental`] is called off."]
        Cancelled = 4,
    }
}

/// Marker type indicating a [`Rental`] start.
#[derive(Clone, Copy, Debug)]
pub struct Start;

/// Marker type indicating a [`Rental`] end.
#[derive(Clone, Copy, Debug)]
pub struct End;

/// Marker type indicating a [`Rental`] creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// First calendar day of a [`Rental`].
pub type StartDate = DateOf<(Rental, Start)>;

/// Last calendar day of a [`Rental`].
pub type EndDate = DateOf<(Rental, End)>;

/// [`DateTime`] when a [`Rental`] was created.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(Rental, Creation)>;
