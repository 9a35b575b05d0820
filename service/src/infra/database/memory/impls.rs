//! [`Database`] implementations of the [`Memory`] snapshot.

use std::collections::HashMap;

use common::{
    operations::{By, Select},
    Currency,
};
use tracerr::Traced;

use super::{Digest, Memory};
use crate::{
    domain::{customer, rental, vehicle, Customer, Payment, Rental, Vehicle},
    infra::{database, Database},
    read,
};

impl Database<Select<By<Digest, ()>>> for Memory {
    type Ok = Digest;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Digest, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.0.digest)
    }
}

impl Database<Select<By<Currency, ()>>> for Memory {
    type Ok = Currency;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Currency, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.0.currency)
    }
}

impl Database<Select<By<Option<Rental>, rental::Id>>> for Memory {
    type Ok = Option<Rental>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Rental>, rental::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .0
            .rental_index
            .get(&id)
            .and_then(|&i| self.0.rentals.get(i))
            .cloned())
    }
}

impl Database<Select<By<Vec<Rental>, read::rental::Filter>>> for Memory {
    type Ok = Vec<Rental>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Rental>, read::rental::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        Ok(self
            .0
            .rentals
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }
}

impl Database<Select<By<Vec<Payment>, rental::Id>>> for Memory {
    type Ok = Vec<Payment>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Payment>, rental::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .0
            .payments
            .get(by.inner())
            .cloned()
            .unwrap_or_default())
    }
}

impl<IDs> Database<Select<By<HashMap<rental::Id, Vec<Payment>>, IDs>>>
    for Memory
where
    IDs: AsRef<[rental::Id]>,
{
    type Ok = HashMap<rental::Id, Vec<Payment>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<rental::Id, Vec<Payment>>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(by
            .inner()
            .as_ref()
            .iter()
            .filter_map(|id| {
                self.0.payments.get(id).map(|p| (*id, p.clone()))
            })
            .collect())
    }
}

impl Database<Select<By<Option<Customer>, customer::Id>>> for Memory {
    type Ok = Option<Customer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Customer>, customer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.0.customers.get(by.inner()).cloned())
    }
}

impl Database<Select<By<Vec<customer::Id>, ()>>> for Memory {
    type Ok = Vec<customer::Id>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<customer::Id>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut ids = self.0.customers.keys().copied().collect::<Vec<_>>();
        ids.sort_unstable();
        Ok(ids)
    }
}

impl Database<Select<By<Option<Vehicle>, vehicle::Id>>> for Memory {
    type Ok = Option<Vehicle>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Vehicle>, vehicle::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.0.vehicles.get(by.inner()).cloned())
    }
}

#[cfg(test)]
mod spec {
    use std::collections::HashMap;

    use common::{
        operations::{By, Select},
        Currency,
    };

    use crate::{
        domain::{customer, rental, Customer, Payment, Rental},
        fixture::{payment, rental},
        infra::{database::memory::Memory, Database as _},
        read,
    };

    fn customer(name: &str) -> Customer {
        Customer {
            id: customer::Id::new(),
            name: customer::Name::new(name).unwrap(),
            phone: None,
            email: None,
        }
    }

    #[tokio::test]
    async fn selects_rentals_by_filter() {
        let a = rental("2024-01-01", "2024-01-02", 2);
        let mut b = rental("2024-01-01", "2024-01-02", 2);
        b.customer_id = a.customer_id;
        b.status = rental::Status::Cancelled;
        let c = rental("2024-01-01", "2024-01-02", 2);
        let db = Memory::from_records(
            Currency::Try,
            vec![a.clone(), b.clone(), c.clone()],
            vec![],
            vec![],
            vec![],
        );

        let all = db
            .execute(Select(By::<Vec<Rental>, _>::new(
                read::rental::Filter::default(),
            )))
            .await
            .unwrap();
        assert_eq!(
            all.iter().map(|r| r.id).collect::<Vec<_>>(),
            [a.id, b.id, c.id],
        );

        let of_customer = db
            .execute(Select(By::<Vec<Rental>, _>::new(read::rental::Filter {
                customer_id: Some(a.customer_id),
                ..read::rental::Filter::default()
            })))
            .await
            .unwrap();
        assert_eq!(of_customer.len(), 2);

        let cancelled = db
            .execute(Select(By::<Vec<Rental>, _>::new(read::rental::Filter {
                customer_id: Some(a.customer_id),
                status: Some(rental::Status::Cancelled),
                vehicle_id: None,
            })))
            .await
            .unwrap();
        assert_eq!(cancelled.len(), 1);
        assert_eq!(cancelled[0].id, b.id);
    }

    #[tokio::test]
    async fn groups_payments_by_rental() {
        let a = rental("2024-01-01", "2024-01-02", 2);
        let b = rental("2024-01-01", "2024-01-02", 2);
        let db = Memory::from_records(
            Currency::Try,
            vec![a.clone(), b.clone()],
            vec![
                payment(&a, "10", "2024-01-02T10:00:00Z"),
                payment(&a, "20", "2024-01-03T10:00:00Z"),
            ],
            vec![],
            vec![],
        );

        let of_a = db
            .execute(Select(By::<Vec<Payment>, _>::new(a.id)))
            .await
            .unwrap();
        assert_eq!(of_a.len(), 2);

        let of_b = db
            .execute(Select(By::<Vec<Payment>, _>::new(b.id)))
            .await
            .unwrap();
        assert!(of_b.is_empty());

        let many = db
            .execute(Select(By::<HashMap<_, Vec<Payment>>, _>::new(vec![
                a.id, b.id,
            ])))
            .await
            .unwrap();
        assert_eq!(many.len(), 1);
        assert_eq!(many[&a.id].len(), 2);
    }

    #[tokio::test]
    async fn selects_customers() {
        let ayse = customer("Ayşe");
        let mehmet = customer("Mehmet");
        let db = Memory::from_records(
            Currency::Try,
            vec![],
            vec![],
            vec![ayse.clone(), mehmet.clone()],
            vec![],
        );

        let found = db
            .execute(Select(By::<Option<Customer>, _>::new(ayse.id)))
            .await
            .unwrap();
        assert_eq!(found, Some(ayse.clone()));

        let missing = db
            .execute(Select(By::<Option<Customer>, _>::new(
                customer::Id::new(),
            )))
            .await
            .unwrap();
        assert_eq!(missing, None);

        let ids = db
            .execute(Select(By::<Vec<customer::Id>, _>::new(())))
            .await
            .unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&ayse.id) && ids.contains(&mehmet.id));
    }
}
