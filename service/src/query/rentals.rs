//! [`Query`] collection related to multiple [`Rental`]s.

use std::collections::HashMap;

use common::{
    operations::{By, Select},
    Date,
};
use tracerr::Traced;

use crate::{
    domain::{rental, Payment, Rental},
    infra::{database, Database},
    read, Service,
};

use super::Query;

/// [`Query`] drawing up the [`read::Statement`]s of multiple [`Rental`]s.
///
/// [`read::Statement`]s are ordered by their displayed balance, the largest
/// first.
#[derive(Clone, Copy, Debug)]
pub struct Statements {
    /// [`read::rental::Filter`] selecting the [`Rental`]s.
    pub filter: read::rental::Filter,

    /// Whether to keep only the [`read::Statement`]s still owing something.
    pub outstanding_only: bool,

    /// Day the [`read::Statement`]s are drawn up on.
    pub today: Date,
}

impl<Db> Query<Statements> for Service<Db>
where
    Db: Database<
            Select<By<Vec<Rental>, read::rental::Filter>>,
            Ok = Vec<Rental>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<rental::Id, Vec<Payment>>, Vec<rental::Id>>>,
            Ok = HashMap<rental::Id, Vec<Payment>>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Vec<read::Statement>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Statements {
            filter,
            outstanding_only,
            today,
        }: Statements,
    ) -> Result<Self::Ok, Self::Err> {
        let rentals = self
            .database()
            .execute(Select(By::<Vec<Rental>, _>::new(filter)))
            .await
            .map_err(tracerr::wrap!())?;

        let mut statements = self
            .statements(rentals, today)
            .await
            .map_err(tracerr::wrap!())?;
        if outstanding_only {
            statements.retain(read::Statement::is_outstanding);
        }
        statements.sort_by(|a, b| {
            b.balance.display.amount.cmp(&a.balance.display.amount)
        });

        Ok(statements)
    }
}

impl<Db> Service<Db>
where
    Db: Database<
        Select<By<HashMap<rental::Id, Vec<Payment>>, Vec<rental::Id>>>,
        Ok = HashMap<rental::Id, Vec<Payment>>,
        Err = Traced<database::Error>,
    >,
{
    /// Draws up the [`read::Statement`]s of the provided [`Rental`]s, keeping
    /// their order.
    pub(crate) async fn statements(
        &self,
        rentals: Vec<Rental>,
        today: Date,
    ) -> Result<Vec<read::Statement>, Traced<database::Error>> {
        let ids = rentals.iter().map(|r| r.id).collect::<Vec<_>>();
        let payments = self
            .database()
            .execute(Select(By::<HashMap<_, Vec<Payment>>, _>::new(ids)))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(rentals
            .into_iter()
            .map(|r| {
                let paid = payments.get(&r.id).map_or(&[][..], Vec::as_slice);
                read::Statement::new(r, paid, today)
            })
            .collect())
    }
}

#[cfg(test)]
mod spec {
    use common::Currency;

    use crate::{
        domain::rental,
        fixture::{date, lira, payment, rental},
        infra::Memory,
        read, Config, Query as _, Service,
    };

    use super::Statements;

    #[tokio::test]
    async fn orders_outstanding_by_balance() {
        let mut small = rental("2024-01-01", "2024-01-10", 10);
        small.tariff.daily_rate = lira("100");
        let mut paid = rental("2024-01-01", "2024-01-10", 10);
        paid.tariff.daily_rate = lira("100");
        paid.customer_id = small.customer_id;
        let mut large = rental("2024-02-01", "2024-02-10", 10);
        large.tariff.daily_rate = lira("900");
        large.customer_id = small.customer_id;
        let foreign = rental("2024-02-01", "2024-02-10", 10);
        let payments = vec![
            payment(&paid, "1000", "2024-01-10T10:00:00Z"),
            payment(&large, "500", "2024-02-10T10:00:00Z"),
        ];
        let service = Service::new(
            Config::default(),
            Memory::from_records(
                Currency::Try,
                vec![small.clone(), paid.clone(), large.clone(), foreign],
                payments,
                vec![],
                vec![],
            ),
        );

        let outstanding = service
            .execute(Statements {
                filter: read::rental::Filter {
                    customer_id: Some(small.customer_id),
                    ..read::rental::Filter::default()
                },
                outstanding_only: true,
                today: date("2024-03-01"),
            })
            .await
            .unwrap();

        assert_eq!(
            outstanding.iter().map(|s| s.rental.id).collect::<Vec<_>>(),
            [large.id, small.id],
        );
        assert_eq!(outstanding[0].balance.display, lira("8500"));
        assert_eq!(outstanding[1].balance.display, lira("1000"));
    }

    #[tokio::test]
    async fn keeps_settled_unless_outstanding_only() {
        let mut r = rental("2024-01-01", "2024-01-10", 10);
        r.tariff.daily_rate = lira("100");
        r.status = rental::Status::Completed;
        let payments = vec![payment(&r, "1000", "2024-01-10T10:00:00Z")];
        let service = Service::new(
            Config::default(),
            Memory::from_records(
                Currency::Try,
                vec![r.clone()],
                payments,
                vec![],
                vec![],
            ),
        );

        let all = service
            .execute(Statements {
                filter: read::rental::Filter::default(),
                outstanding_only: false,
                today: date("2024-03-01"),
            })
            .await
            .unwrap();
        let outstanding = service
            .execute(Statements {
                filter: read::rental::Filter::default(),
                outstanding_only: true,
                today: date("2024-03-01"),
            })
            .await
            .unwrap();

        assert_eq!(all.len(), 1);
        assert!(outstanding.is_empty());
    }
}
