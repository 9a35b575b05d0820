//! [`Balance`] of a [`Rental`] and its classification.

use common::{define_kind, Date, Money};
use derive_more::{Display, From, Into};
use rust_decimal::Decimal;

use crate::domain::{rental, Rental};

/// Outstanding amount of a [`Rental`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Balance {
    /// Total amount owed.
    pub due: Money,

    /// Total amount paid.
    pub paid: Money,

    /// Signed difference between [`due`] and [`paid`].
    ///
    /// Negative on overpayment.
    ///
    /// [`due`]: Balance::due
    /// [`paid`]: Balance::paid
    pub raw: Money,

    /// [`raw`] floored at zero, as shown to users.
    ///
    /// [`raw`]: Balance::raw
    pub display: Money,

    /// Payment [`Status`] of this [`Balance`].
    pub status: Status,
}

impl Balance {
    /// Resolves the [`Balance`] from the `due` and `paid` amounts.
    #[must_use]
    pub fn resolve(due: Money, paid: Money) -> Self {
        let raw = due - paid;
        let status = if !raw.is_positive() {
            Status::Paid
        } else if paid.is_positive() {
            Status::Partial
        } else {
            Status::Unpaid
        };
        Self {
            due,
            paid,
            raw,
            display: raw.floored(),
            status,
        }
    }
}

define_kind! {
    #[doc = "Payment status of a [`Balance`]."]
    enum Status {
        #[doc = "Nothing is owed anymore."]
        Paid = 1,

        #[doc = "Something is paid, but something is still owed."]
        Partial = 2,

        #[doc = "Nothing is paid, while something is owed."]
        Unpaid = 3,
    }
}

/// Number of days a [`Rental`] stays unpaid past its end.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct Overdue(u32);

impl Overdue {
    /// Counts the [`Overdue`] days of the provided [`Rental`] as of `today`.
    ///
    /// Zero for a [`Status::Paid`] [`Balance`] or a [`rental::Status::Active`]
    /// [`Rental`], and for a [`Rental`] ending in the future.
    #[must_use]
    pub fn of(balance: &Balance, rental: &Rental, today: Date) -> Self {
        if balance.status == Status::Paid
            || rental.status == rental::Status::Active
        {
            return Self(0);
        }
        let days = today.days_since(rental.end_date).max(0);
        Self(u32::try_from(days).unwrap_or(u32::MAX))
    }

    /// Returns the number of days.
    #[must_use]
    pub const fn days(self) -> u32 {
        self.0
    }
}

define_kind! {
    #[doc = "Collection urgency of an outstanding [`Balance`]."]
    enum Tier {
        #[doc = "Nothing or little is owed for a short time."]
        Low = 1,

        #[doc = "Over 5000 owed or over 15 days overdue."]
        Medium = 2,

        #[doc = "Over 10000 owed or over 30 days overdue."]
        High = 3,

        #[doc = "Over 15000 owed or over 60 days overdue."]
        Critical = 4,
    }
}

impl Tier {
    /// Amount and [`Overdue`] days thresholds, checked from the most urgent.
    const THRESHOLDS: [(Self, i64, u32); 3] = [
        (Self::Critical, 15_000, 60),
        (Self::High, 10_000, 30),
        (Self::Medium, 5_000, 15),
    ];

    /// Classifies the provided displayed balance and its [`Overdue`] days.
    ///
    /// Any threshold exceeded by either the amount or the days is enough.
    #[must_use]
    pub fn of(display: Money, overdue: Overdue) -> Self {
        if !display.is_positive() {
            return Self::Low;
        }
        Self::THRESHOLDS
            .into_iter()
            .find(|(_, amount, days)| {
                display.amount > Decimal::from(*amount)
                    || overdue.days() > *days
            })
            .map_or(Self::Low, |(tier, ..)| tier)
    }
}
