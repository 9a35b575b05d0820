//! Customer risk reports definitions.

use std::{collections::HashMap, sync::Arc};

use common::{
    operations::{By, Select},
    Currency, Date,
};
use itertools::Itertools as _;
use tracerr::Traced;

use crate::{
    domain::{customer, rental, Payment, Rental},
    infra::{database, memory::Digest, Database},
    memo,
    read::{self, risk},
    Query, Service,
};

/// [`Query`] assessing the [`risk::Profile`] of a single [`Customer`].
///
/// [`Customer`]: crate::domain::Customer
#[derive(Clone, Copy, Debug)]
pub struct Customer {
    /// ID of the [`Customer`] to assess.
    ///
    /// [`Customer`]: crate::domain::Customer
    pub customer_id: customer::Id,

    /// Day the assessment is made on.
    pub today: Date,
}

impl<Db> Query<Customer> for Service<Db>
where
    Db: Database<
            Select<By<Option<crate::domain::Customer>, customer::Id>>,
            Ok = Option<crate::domain::Customer>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Currency, ()>>,
            Ok = Currency,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Rental>, read::rental::Filter>>,
            Ok = Vec<Rental>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<rental::Id, Vec<Payment>>, Vec<rental::Id>>>,
            Ok = HashMap<rental::Id, Vec<Payment>>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Option<risk::Profile>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Customer { customer_id, today }: Customer,
    ) -> Result<Self::Ok, Self::Err> {
        let rentals = self
            .database()
            .execute(Select(By::<Vec<Rental>, _>::new(read::rental::Filter {
                customer_id: Some(customer_id),
                ..read::rental::Filter::default()
            })))
            .await
            .map_err(tracerr::wrap!())?;
        if rentals.is_empty() {
            let customer = self
                .database()
                .execute(Select(
                    By::<Option<crate::domain::Customer>, _>::new(customer_id),
                ))
                .await
                .map_err(tracerr::wrap!())?;
            if customer.is_none() {
                return Ok(None);
            }
        }

        let currency = self
            .database()
            .execute(Select(By::<Currency, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        let statements = self
            .statements(rentals, today)
            .await
            .map_err(tracerr::wrap!())?;

        Ok(Some(risk::Profile::assess(currency, &statements)))
    }
}

/// [`Query`] ranking all the [`Customer`]s by their [`risk::Profile`]s.
///
/// [`Customer`]: crate::domain::Customer
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Customers {
    /// Day the assessment is made on.
    pub today: Date,
}

/// Row in the output of the [`Customers`] [`Query`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Row {
    /// ID of the assessed [`Customer`].
    ///
    /// [`Customer`]: crate::domain::Customer
    pub customer_id: customer::Id,

    /// Assessed [`risk::Profile`].
    pub profile: risk::Profile,
}

impl<Db> Query<Customers> for Service<Db>
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
            Select<By<Vec<customer::Id>, ()>>,
            Ok = Vec<customer::Id>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Rental>, read::rental::Filter>>,
            Ok = Vec<Rental>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<rental::Id, Vec<Payment>>, Vec<rental::Id>>>,
            Ok = HashMap<rental::Id, Vec<Payment>>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Arc<Vec<Row>>;
    type Err = Traced<database::Error>;

    async fn execute(&self, query: Customers) -> Result<Self::Ok, Self::Err> {
        let digest = self
            .database()
            .execute(Select(By::<Digest, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;

        self.memos()
            .risks
            .get_or_try_insert_with(
                memo::Key::of(&(digest, query)),
                move || self.rank_customers(query.today),
            )
            .await
    }
}

impl<Db> Service<Db>
where
    Db: Database<
            Select<By<Currency, ()>>,
            Ok = Currency,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<customer::Id>, ()>>,
            Ok = Vec<customer::Id>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Rental>, read::rental::Filter>>,
            Ok = Vec<Rental>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<rental::Id, Vec<Payment>>, Vec<rental::Id>>>,
            Ok = HashMap<rental::Id, Vec<Payment>>,
            Err = Traced<database::Error>,
        >,
{
    /// Assesses every known [`Customer`] and every renter missing from the
    /// [`Customer`]s list, ordered from the riskiest one: by [`risk::Score`]
    /// and then by current debt.
    ///
    /// [`Customer`]: crate::domain::Customer
    async fn rank_customers(
        &self,
        today: Date,
    ) -> Result<Vec<Row>, Traced<database::Error>> {
        let currency = self
            .database()
            .execute(Select(By::<Currency, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        let customer_ids = self
            .database()
            .execute(Select(By::<Vec<customer::Id>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        let rentals = self
            .database()
            .execute(Select(By::<Vec<Rental>, _>::new(
                read::rental::Filter::default(),
            )))
            .await
            .map_err(tracerr::wrap!())?;

        let mut by_customer = self
            .statements(rentals, today)
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .into_group_map_by(|s| s.rental.customer_id);

        let mut rows = customer_ids
            .into_iter()
            .map(|customer_id| {
                let statements =
                    by_customer.remove(&customer_id).unwrap_or_default();
                (customer_id, statements)
            })
            .collect::<Vec<_>>();
        rows.extend(by_customer);
        let mut rows = rows
            .into_iter()
            .map(|(customer_id, statements)| Row {
                customer_id,
                profile: risk::Profile::assess(currency, &statements),
            })
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| {
            b.profile
                .score
                .cmp(&a.profile.score)
                .then_with(|| {
                    b.profile
                        .current_debt
                        .amount
                        .cmp(&a.profile.current_debt.amount)
                })
                .then_with(|| a.customer_id.cmp(&b.customer_id))
        });

        Ok(rows)
    }
}

#[cfg(test)]
mod spec {
    use common::Currency;

    use crate::{
        domain::{customer, Customer},
        fixture::{date, lira, payment, rental},
        infra::Memory,
        read::risk::Level,
        Config, Query as _, Service,
    };

    use super::{Customer as CustomerRisk, Customers};

    fn customer(name: &str) -> Customer {
        Customer {
            id: customer::Id::new(),
            name: customer::Name::new(name).unwrap(),
            phone: None,
            email: None,
        }
    }

    #[tokio::test]
    async fn assesses_single_customer() {
        let c = customer("Ayşe");
        let mut owing = rental("2024-01-01", "2024-01-10", 10);
        owing.customer_id = c.id;
        owing.tariff.daily_rate = lira("2000");
        let mut late = rental("2024-01-01", "2024-01-10", 10);
        late.customer_id = c.id;
        late.tariff.daily_rate = lira("10");
        let payments = vec![payment(&late, "100", "2024-02-09T10:00:00Z")];
        let svc = Service::new(
            Config::default(),
            Memory::from_records(
                Currency::Try,
                vec![owing, late],
                payments,
                vec![c.clone()],
                vec![],
            ),
        );

        let p = svc
            .execute(CustomerRisk {
                customer_id: c.id,
                today: date("2024-06-01"),
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(p.rentals, 2);
        assert_eq!(p.current_debt, lira("20000"));
        assert_eq!(p.critical_rentals, 1);
        assert_eq!(p.avg_payment_delay, Some(30.0));
        assert_eq!(u8::from(p.score), 80);
        assert_eq!(p.score.level(), Level::Severe);
    }

    #[tokio::test]
    async fn unknown_customer_has_no_profile() {
        let svc = Service::new(
            Config::default(),
            Memory::from_records(Currency::Try, vec![], vec![], vec![], vec![]),
        );

        let p = svc
            .execute(CustomerRisk {
                customer_id: customer::Id::new(),
                today: date("2024-06-01"),
            })
            .await
            .unwrap();

        assert!(p.is_none());
    }

    #[tokio::test]
    async fn assesses_renters_missing_from_customers() {
        let stranger = customer::Id::new();
        let mut owing = rental("2024-01-01", "2024-01-10", 10);
        owing.customer_id = stranger;
        owing.tariff.daily_rate = lira("5000");
        let svc = Service::new(
            Config::default(),
            Memory::from_records(
                Currency::Try,
                vec![owing],
                vec![],
                vec![customer("Known")],
                vec![],
            ),
        );

        let rows = svc
            .execute(Customers {
                today: date("2024-06-01"),
            })
            .await
            .unwrap();
        let p = svc
            .execute(CustomerRisk {
                customer_id: stranger,
                today: date("2024-06-01"),
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].customer_id, stranger);
        assert_eq!(rows[0].profile.current_debt, lira("50000"));
        assert_eq!(p.current_debt, lira("50000"));
        assert_eq!(p.rentals, 1);
    }

    #[tokio::test]
    async fn ranks_riskiest_first() {
        let clean = customer("Clean");
        let small = customer("Small");
        let large = customer("Large");
        let idle = customer("Idle");
        let mut a = rental("2024-01-01", "2024-01-10", 10);
        a.customer_id = clean.id;
        a.tariff.daily_rate = lira("100");
        let mut b = rental("2024-05-01", "2024-05-10", 10);
        b.customer_id = small.id;
        b.tariff.daily_rate = lira("10");
        let mut c = rental("2024-05-01", "2024-05-10", 10);
        c.customer_id = large.id;
        c.tariff.daily_rate = lira("20");
        let payments = vec![payment(&a, "1000", "2024-01-10T10:00:00Z")];
        let svc = Service::new(
            Config::default(),
            Memory::from_records(
                Currency::Try,
                vec![a, b, c],
                payments,
                vec![clean.clone(), small.clone(), large.clone(), idle],
                vec![],
            ),
        );

        let rows = svc
            .execute(Customers {
                today: date("2024-05-20"),
            })
            .await
            .unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].customer_id, large.id);
        assert_eq!(rows[1].customer_id, small.id);
        assert_eq!(u8::from(rows[0].profile.score), 30);
        assert_eq!(u8::from(rows[2].profile.score), 0);
        assert_eq!(u8::from(rows[3].profile.score), 0);
        assert!(rows.iter().any(|r| r.customer_id == clean.id));
    }
}
