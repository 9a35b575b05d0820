//! Risk [`Profile`] of a [`Customer`].
//!
//! [`Customer`]: crate::domain::Customer

use common::{define_kind, Currency, DateTime, Money};
use derive_more::{Display, Into};
use rust_decimal::Decimal;

use crate::read::{
    balance::{self, Tier},
    Statement,
};

/// Debt above which a [`Customer`] is considered heavily indebted.
///
/// [`Customer`]: crate::domain::Customer
const HEAVY_DEBT: i64 = 10_000;

/// Average payment delay in days above which a [`Customer`] is considered a
/// late payer.
///
/// [`Customer`]: crate::domain::Customer
const LATE_PAYER_DAYS: f64 = 15.0;

/// Payment behaviour of a [`Customer`] across all their [`Rental`]s.
///
/// [`Customer`]: crate::domain::Customer
/// [`Rental`]: crate::domain::Rental
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Profile {
    /// Number of assessed [`Rental`]s.
    ///
    /// [`Rental`]: crate::domain::Rental
    pub rentals: usize,

    /// Total amount owed.
    pub total_billed: Money,

    /// Total amount paid.
    pub total_paid: Money,

    /// Sum of the displayed balances still owed.
    pub current_debt: Money,

    /// Mean number of days between the end of a fully paid [`Rental`] and its
    /// settlement.
    ///
    /// [`None`] if no fully paid [`Rental`] has a known settlement date.
    ///
    /// [`Rental`]: crate::domain::Rental
    pub avg_payment_delay: Option<f64>,

    /// Number of [`Rental`]s in the [`Tier::Critical`].
    ///
    /// [`Rental`]: crate::domain::Rental
    pub critical_rentals: usize,

    /// Risk [`Score`].
    pub score: Score,

    /// [`DateTime`] of the latest payment, if any.
    ///
    /// [`Installments`] count as paid on the [`Rental`] creation, which is
    /// only an approximation: their slots carry no date.
    ///
    /// [`Installments`]: crate::domain::rental::Installments
    /// [`Rental`]: crate::domain::Rental
    pub last_payment_at: Option<DateTime>,
}

impl Profile {
    /// Assesses the [`Profile`] from the provided [`Statement`]s of a single
    /// [`Customer`].
    ///
    /// [`Customer`]: crate::domain::Customer
    #[must_use]
    pub fn assess<'s>(
        currency: Currency,
        statements: impl IntoIterator<Item = &'s Statement>,
    ) -> Self {
        let mut rentals = 0;
        let mut total_billed = Money::zero(currency);
        let mut total_paid = Money::zero(currency);
        let mut current_debt = Money::zero(currency);
        let mut critical_rentals = 0;
        let mut last_payment_at = None;
        let mut delays = Vec::new();

        for s in statements {
            rentals += 1;
            total_billed += s.balance.due;
            total_paid += s.balance.paid;
            current_debt += s.balance.display;
            if s.tier == Tier::Critical {
                critical_rentals += 1;
            }
            last_payment_at = last_payment_at.max(s.last_paid_at);
            if s.balance.status == balance::Status::Paid {
                if let Some(settled) = s.settled_on {
                    delays.push(settled.days_since(s.rental.end_date).max(0));
                }
            }
        }

        let avg_payment_delay = mean(&delays);
        let score = Score::calculate(
            current_debt,
            avg_payment_delay,
            critical_rentals,
        );

        Self {
            rentals,
            total_billed,
            total_paid,
            current_debt,
            avg_payment_delay,
            critical_rentals,
            score,
            last_payment_at,
        }
    }
}

/// Returns the arithmetic mean of the provided day counts, if there are any.
#[expect(clippy::cast_precision_loss, reason = "day counts are small")]
fn mean(days: &[i64]) -> Option<f64> {
    (!days.is_empty())
        .then(|| days.iter().sum::<i64>() as f64 / days.len() as f64)
}

/// Risk score of a [`Customer`] in the `0..=100` range.
///
/// [`Customer`]: crate::domain::Customer
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, Into, Ord, PartialEq,
    PartialOrd,
)]
pub struct Score(u8);

impl Score {
    /// Maximum possible [`Score`].
    pub const MAX: Self = Self(100);

    /// Calculates the [`Score`] out of the payment behaviour indicators.
    ///
    /// Outstanding debt adds 30, heavy debt adds 20 more, late payments on
    /// average add 20 and each [`Tier::Critical`] rental adds 10, up to 30.
    #[must_use]
    pub fn calculate(
        current_debt: Money,
        avg_payment_delay: Option<f64>,
        critical_rentals: usize,
    ) -> Self {
        let mut score = 0;
        if current_debt.is_positive() {
            score += 30;
        }
        if current_debt.amount > Decimal::from(HEAVY_DEBT) {
            score += 20;
        }
        if avg_payment_delay.is_some_and(|d| d > LATE_PAYER_DAYS) {
            score += 20;
        }
        score += match critical_rentals {
            0 => 0,
            1 => 10,
            2 => 20,
            _ => 30,
        };
        Self(score.min(Self::MAX.0))
    }

    /// Returns the [`Level`] of this [`Score`].
    #[must_use]
    pub const fn level(self) -> Level {
        match self.0 {
            0 => Level::Clear,
            1..40 => Level::Low,
            40..70 => Level::Elevated,
            _ => Level::Severe,
        }
    }
}

define_kind! {
    #[doc = "Display level of a risk [`Score`]."]
    enum Level {
        #[doc = "No risk at all."]
        Clear = 1,

        #[doc = "Score below 40."]
        Low = 2,

        #[doc = "Score below 70."]
        Elevated = 3,

        #[doc = "Score of 70 and above."]
        Severe = 4,
    }
}
