//! Payment [`Total`] of a [`Rental`] and its settlement.

use common::{Date, DateTime, Money};

use crate::domain::{Payment, Rental};

/// Amount paid towards a [`Rental`], along with its components.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Total {
    /// Sum of the [`Installments`] slots stored on the [`Rental`].
    ///
    /// [`Installments`]: crate::domain::rental::Installments
    pub installments: Money,

    /// Sum of the ledger [`Payment`]s referencing the [`Rental`].
    pub ledger: Money,

    /// Total amount paid: [`installments`] plus [`ledger`].
    ///
    /// [`installments`]: Total::installments
    /// [`ledger`]: Total::ledger
    pub paid: Money,
}

impl Total {
    /// Calculates the [`Total`] paid towards the provided [`Rental`].
    ///
    /// [`Payment`]s referencing other [`Rental`]s are ignored, so every
    /// ledger [`Payment`] is counted exactly once.
    #[must_use]
    pub fn of<'p>(
        rental: &Rental,
        payments: impl IntoIterator<Item = &'p Payment>,
    ) -> Self {
        let currency = rental.currency();
        let installments = Money::sum(currency, rental.installments.slots());
        let ledger = Money::sum(
            currency,
            payments
                .into_iter()
                .filter(|p| p.rental_id == rental.id)
                .map(|p| p.amount),
        );
        Self {
            installments,
            ledger,
            paid: installments + ledger,
        }
    }
}

/// Single dated amount paid towards a [`Rental`].
#[derive(Clone, Copy, Debug)]
struct Event {
    at: DateTime,
    amount: Money,
}

/// Orders all the amounts paid towards the provided [`Rental`] by date.
///
/// Non-zero [`Installments`] are collapsed into a single event dated at the
/// [`Rental`] creation, as their slots carry no date of their own.
///
/// [`Installments`]: crate::domain::rental::Installments
fn events<'p>(
    rental: &Rental,
    payments: impl IntoIterator<Item = &'p Payment>,
) -> Vec<Event> {
    let installments = Money::sum(rental.currency(), rental.installments.slots());

    let mut events = (!installments.amount.is_zero())
        .then(|| Event {
            at: rental.created_at.coerce(),
            amount: installments,
        })
        .into_iter()
        .chain(
            payments
                .into_iter()
                .filter(|p| p.rental_id == rental.id)
                .map(|p| Event {
                    at: p.paid_at.coerce(),
                    amount: p.amount,
                }),
        )
        .collect::<Vec<_>>();
    // Stable, so installments stay first among simultaneous events.
    events.sort_by_key(|e| e.at);
    events
}

/// Returns the [`Date`] at which the running sum of the amounts paid towards
/// the provided [`Rental`] first reached the `due` amount.
///
/// [`None`] if it never did.
#[must_use]
pub fn settled_on<'p>(
    due: Money,
    rental: &Rental,
    payments: impl IntoIterator<Item = &'p Payment>,
) -> Option<Date> {
    events(rental, payments)
        .into_iter()
        .scan(Money::zero(rental.currency()), |running, e| {
            *running += e.amount;
            Some((e.at, *running))
        })
        .find(|(_, running)| running.amount >= due.amount)
        .map(|(at, _)| at.date())
}

/// Returns the [`DateTime`] of the latest amount paid towards the provided
/// [`Rental`], if any.
#[must_use]
pub fn last_paid_at<'p>(
    rental: &Rental,
    payments: impl IntoIterator<Item = &'p Payment>,
) -> Option<DateTime> {
    events(rental, payments).into_iter().map(|e| e.at).max()
}
