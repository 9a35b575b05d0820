//! [`Query`] collection related to a single [`Rental`].

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

use super::{DatabaseQuery, Query};

/// Queries a [`Rental`] by its [`rental::Id`].
pub type ById = DatabaseQuery<By<Option<Rental>, rental::Id>>;

/// [`Query`] drawing up the [`read::Statement`] of a single [`Rental`].
#[derive(Clone, Copy, Debug)]
pub struct Statement {
    /// ID of the [`Rental`] to draw up the [`read::Statement`] of.
    pub rental_id: rental::Id,

    /// Day the [`read::Statement`] is drawn up on.
    pub today: Date,
}

impl<Db> Query<Statement> for Service<Db>
where
    Db: Database<
            Select<By<Option<Rental>, rental::Id>>,
            Ok = Option<Rental>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Payment>, rental::Id>>,
            Ok = Vec<Payment>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Option<read::Statement>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Statement { rental_id, today }: Statement,
    ) -> Result<Self::Ok, Self::Err> {
        let Some(rental) = self
            .database()
            .execute(Select(By::<Option<Rental>, _>::new(rental_id)))
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        let payments = self
            .database()
            .execute(Select(By::<Vec<Payment>, _>::new(rental_id)))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(Some(read::Statement::new(rental, &payments, today)))
    }
}

#[cfg(test)]
mod spec {
    use common::Currency;

    use crate::{
        domain::rental,
        fixture::{date, lira, payment, rental},
        infra::Memory,
        read::balance::{Status, Tier},
        Config, Query as _, Service,
    };

    use super::{ById, Statement};

    #[tokio::test]
    async fn draws_up_statement() {
        let mut r = rental("2024-01-01", "2024-01-30", 30);
        r.tariff.daily_rate = lira("500");
        r.tariff.distance_fee = lira("600");
        r.tariff.cleaning_fee = lira("100");
        r.tariff.toll_fee = lira("50");
        r.installments.upfront = lira("5000");
        let payments = vec![
            payment(&r, "3000", "2024-01-10T10:00:00Z"),
            payment(&r, "2000", "2024-01-20T10:00:00Z"),
        ];
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

        let s = service
            .execute(Statement {
                rental_id: r.id,
                today: date("2024-03-15"),
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(s.rental.id, r.id);
        assert_eq!(s.charge.total_due, lira("15750"));
        assert_eq!(s.paid.paid, lira("10000"));
        assert_eq!(s.balance.display, lira("5750"));
        assert_eq!(s.balance.status, Status::Partial);
        assert_eq!(s.overdue.days(), 45);
        assert_eq!(s.tier, Tier::High);
    }

    #[tokio::test]
    async fn unknown_rental_has_no_statement() {
        let service = Service::new(
            Config::default(),
            Memory::from_records(Currency::Try, vec![], vec![], vec![], vec![]),
        );

        let s = service
            .execute(Statement {
                rental_id: rental::Id::new(),
                today: date("2024-03-15"),
            })
            .await
            .unwrap();

        assert!(s.is_none());
    }

    #[tokio::test]
    async fn selects_rental_by_id() {
        let r = rental("2024-01-01", "2024-01-30", 30);
        let service = Service::new(
            Config::default(),
            Memory::from_records(
                Currency::Try,
                vec![r.clone()],
                vec![],
                vec![],
                vec![],
            ),
        );

        let found = service.execute(ById::by(r.id)).await.unwrap();

        assert_eq!(found.map(|r| r.id), Some(r.id));
    }
}
