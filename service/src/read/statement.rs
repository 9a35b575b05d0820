//! [`Statement`] read model definition.

use common::{Date, DateTime};

use crate::{
    domain::{Payment, Rental},
    read::{
        balance::{Balance, Overdue, Tier},
        charge, payment,
    },
};

/// Financial state of a [`Rental`] as of a specific day.
///
/// The only place where due, paid and balance amounts of a [`Rental`] are
/// derived, so every consumer sees the same numbers.
#[derive(Clone, Debug)]
pub struct Statement {
    /// [`Rental`] this [`Statement`] is about.
    pub rental: Rental,

    /// Amount owed.
    pub charge: charge::Breakdown,

    /// Amount paid.
    pub paid: payment::Total,

    /// Outstanding [`Balance`].
    pub balance: Balance,

    /// [`Overdue`] days as of the statement day.
    pub overdue: Overdue,

    /// Collection urgency [`Tier`].
    pub tier: Tier,

    /// [`Date`] when the paid amount reached the owed one, if it did.
    pub settled_on: Option<Date>,

    /// [`DateTime`] of the latest payment, if any.
    ///
    /// [`Installments`] count as paid on the [`Rental`] creation, which is
    /// only an approximation: their slots carry no date.
    ///
    /// [`Installments`]: crate::domain::rental::Installments
    pub last_paid_at: Option<DateTime>,
}

impl Statement {
    /// Draws up the [`Statement`] of the provided [`Rental`] and its
    /// [`Payment`]s as of `today`.
    #[must_use]
    pub fn new(rental: Rental, payments: &[Payment], today: Date) -> Self {
        let charge = charge::Breakdown::of(&rental);
        let paid = payment::Total::of(&rental, payments);
        let balance = Balance::resolve(charge.total_due, paid.paid);
        let overdue = Overdue::of(&balance, &rental, today);
        let tier = Tier::of(balance.display, overdue);
        let settled_on =
            payment::settled_on(charge.total_due, &rental, payments);
        let last_paid_at = payment::last_paid_at(&rental, payments);

        Self {
            rental,
            charge,
            paid,
            balance,
            overdue,
            tier,
            settled_on,
            last_paid_at,
        }
    }

    /// Indicates whether anything is still owed on this [`Statement`].
    #[must_use]
    pub fn is_outstanding(&self) -> bool {
        self.balance.display.is_positive()
    }
}
