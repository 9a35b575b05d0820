//! [`Rental`] read model definitions.

use crate::domain::{customer, rental, vehicle, Rental};

/// Filter for selecting [`Rental`]s.
///
/// Every set criterion must match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Filter {
    /// ID of the [`Customer`] the [`Rental`]s should belong to.
    ///
    /// [`Customer`]: crate::domain::Customer
    pub customer_id: Option<customer::Id>,

    /// ID of the [`Vehicle`] the [`Rental`]s should be of.
    ///
    /// [`Vehicle`]: crate::domain::Vehicle
    pub vehicle_id: Option<vehicle::Id>,

    /// [`rental::Status`] the [`Rental`]s should have.
    pub status: Option<rental::Status>,
}

impl Filter {
    /// Checks whether the provided [`Rental`] satisfies this [`Filter`].
    #[must_use]
    pub fn matches(&self, rental: &Rental) -> bool {
        self.customer_id.map_or(true, |id| id == rental.customer_id)
            && self.vehicle_id.map_or(true, |id| id == rental.vehicle_id)
            && self.status.map_or(true, |s| s == rental.status)
    }
}
