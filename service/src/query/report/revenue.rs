//! [`Monthly`] revenue report definition.

use std::sync::Arc;

use common::{
    operations::{By, Select},
    Currency,
};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Vehicle;
use crate::{
    domain::{rental, vehicle, Rental},
    infra::{database, memory::Digest, Database},
    memo,
    read::{self, revenue},
    Query, Service,
};

/// [`Query`] attributing the revenue of [`Rental`]s to months and
/// [`Vehicle`]s.
///
/// [`rental::Status::Cancelled`] [`Rental`]s earn nothing. Malformed
/// [`Rental`]s are skipped.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Monthly {
    /// Year to keep the months of, if any.
    pub year: Option<i32>,

    /// ID of the [`Vehicle`] to keep the revenue of, if any.
    pub vehicle_id: Option<vehicle::Id>,
}

/// Output of the [`Monthly`] [`Query`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Revenue per month and [`Vehicle`], ordered by month and then by
    /// [`Vehicle`].
    pub rows: Vec<revenue::Row>,

    /// Revenue per month of all the [`Vehicle`]s, ordered by month.
    pub totals: Vec<revenue::Total>,

    /// [`Rental`]s excluded from the report for being malformed.
    pub skipped: Vec<revenue::MalformedRental>,
}

impl Output {
    /// Attributes the revenue of the provided [`Rental`]s.
    fn collect<'r>(
        currency: Currency,
        rentals: impl IntoIterator<Item = &'r Rental>,
        year: Option<i32>,
    ) -> Self {
        let mut monthly = revenue::Monthly::new(currency);
        let mut skipped = Vec::new();
        for rental in rentals {
            if rental.status == rental::Status::Cancelled {
                continue;
            }
            match revenue::samples(rental) {
                Ok(samples) => monthly.extend(samples),
                Err(e) => {
                    log::warn!("skipping rental from revenue report: {e}");
                    skipped.push(e);
                }
            }
        }
        if let Some(year) = year {
            monthly.retain(|month, _| month.year == year);
        }

        Self {
            rows: monthly.rows().collect(),
            totals: monthly.totals(),
            skipped,
        }
    }
}

impl<Db> Query<Monthly> for Service<Db>
where
    Db: Database<
            Select<By<Digest, ()>>,
            Ok = Digest,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Currency, ()>>,
            Ok = Currency,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Rental>, read::rental::Filter>>,
            Ok = Vec<Rental>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Arc<Output>;
    type Err = Traced<database::Error>;

    async fn execute(&self, query: Monthly) -> Result<Self::Ok, Self::Err> {
        let digest = self
            .database()
            .execute(Select(By::<Digest, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;

        let db = self.database();
        self.memos()
            .revenue
            .get_or_try_insert_with(
                memo::Key::of(&(digest, query)),
                move || async move {
                    let currency = db
                        .execute(Select(By::<Currency, _>::new(())))
                        .await
                        .map_err(tracerr::wrap!())?;
                    let rentals = db
                        .execute(Select(By::<Vec<Rental>, _>::new(
                            read::rental::Filter {
                                vehicle_id: query.vehicle_id,
                                ..read::rental::Filter::default()
                            },
                        )))
                        .await
                        .map_err(tracerr::wrap!())?;
                    Ok::<_, Traced<database::Error>>(Output::collect(
                        currency,
                        &rentals,
                        query.year,
                    ))
                },
            )
            .await
    }
}
