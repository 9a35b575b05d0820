//! In-memory [`Database`] implementation over a snapshot of records.

mod impls;
mod record;

use std::{collections::HashMap, fmt, io, path::Path, sync::Arc};

use common::{Currency, Unit};
use derive_more::{Display, Error as StdError, From};
use smart_default::SmartDefault;
use tracerr::Traced;
use uuid::Uuid;
use xxhash_rust::xxh3;

use crate::{
    domain::{customer, rental, vehicle, Customer, Payment, Rental, Vehicle},
    infra::database,
};
#[cfg(doc)]
use crate::infra::Database;

/// In-memory [`Database`] serving an immutable snapshot of records.
///
/// Cheap to clone: clones share the same snapshot.
#[derive(Clone, Debug)]
pub struct Memory(Arc<Snapshot>);

/// Defaults for the values a snapshot may omit.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// [`Currency`] of the amounts, unless the snapshot specifies one.
    #[default(Currency::Try)]
    pub currency: Currency,

    /// [`Unit`] of the amounts, unless the snapshot specifies one.
    #[default(Unit::Minor)]
    pub unit: Unit,
}

/// Digest identifying the contents of a [`Memory`] snapshot.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[display("{_0:032x}")]
pub struct Digest(u128);

impl Digest {
    /// Calculates the [`Digest`] of the provided raw snapshot bytes.
    #[must_use]
    pub fn of(bytes: &[u8]) -> Self {
        let mut hasher = xxh3::Xxh3Builder::new().build();
        hasher.update(bytes);
        Self(hasher.digest128())
    }

    /// Generates a [`Digest`] unlike any other.
    #[must_use]
    pub fn unique() -> Self {
        Self::of(Uuid::new_v4().as_bytes())
    }
}

/// Records of a [`Memory`] snapshot.
struct Snapshot {
    /// [`Digest`] of this [`Snapshot`].
    digest: Digest,

    /// [`Currency`] of all the amounts in this [`Snapshot`].
    currency: Currency,

    /// [`Rental`]s in their original order.
    rentals: Vec<Rental>,

    /// Positions of the [`Rental`]s by their IDs.
    rental_index: HashMap<rental::Id, usize>,

    /// [`Payment`]s grouped by the [`Rental`] they reference.
    payments: HashMap<rental::Id, Vec<Payment>>,

    /// [`Customer`]s by their IDs.
    customers: HashMap<customer::Id, Customer>,

    /// [`Vehicle`]s by their IDs.
    vehicles: HashMap<vehicle::Id, Vehicle>,
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("digest", &self.digest)
            .field("currency", &self.currency)
            .field("rentals", &self.rentals.len())
            .field("customers", &self.customers.len())
            .field("vehicles", &self.vehicles.len())
            .finish_non_exhaustive()
    }
}

impl Memory {
    /// Loads a [`Memory`] snapshot from the JSON file at the provided `path`.
    ///
    /// # Errors
    ///
    /// If the file cannot be read or its contents are invalid.
    pub async fn load(
        path: impl AsRef<Path>,
        conf: Config,
    ) -> Result<Self, Traced<database::Error>> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        let this = Self::from_json(&bytes, conf)?;
        tracing::info!(
            path = %path.display(),
            digest = %this.digest(),
            rentals = this.0.rentals.len(),
            "snapshot loaded",
        );
        Ok(this)
    }

    /// Parses a [`Memory`] snapshot from the provided raw JSON `bytes`.
    ///
    /// # Errors
    ///
    /// If the `bytes` are not a valid snapshot.
    pub fn from_json(
        bytes: &[u8],
        conf: Config,
    ) -> Result<Self, Traced<database::Error>> {
        let raw = serde_json::from_slice::<record::Snapshot>(bytes)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        let currency = raw.currency.unwrap_or(conf.currency);
        let unit = raw.unit.unwrap_or(conf.unit);

        let mut rentals = Vec::with_capacity(raw.rentals.len());
        let mut payments = Vec::new();
        for r in raw.rentals {
            let (rental, paid) = r
                .into_domain(currency, unit)
                .map_err(tracerr::wrap!())
                .map_err(tracerr::map_from)?;
            rentals.push(rental);
            payments.extend(paid);
        }
        let customers = raw
            .customers
            .into_iter()
            .map(record::Customer::into_domain)
            .collect::<Result<Vec<_>, _>>()
            .map_err(tracerr::wrap!())
            .map_err(tracerr::map_from)?;
        let vehicles = raw
            .vehicles
            .into_iter()
            .map(record::Vehicle::into_domain)
            .collect::<Result<Vec<_>, _>>()
            .map_err(tracerr::wrap!())
            .map_err(tracerr::map_from)?;

        Ok(Self::new(
            Digest::of(bytes),
            currency,
            rentals,
            payments,
            customers,
            vehicles,
        ))
    }

    /// Creates a [`Memory`] snapshot out of the provided records.
    ///
    /// All the amounts are expected to be in the provided [`Currency`].
    #[must_use]
    pub fn from_records(
        currency: Currency,
        rentals: Vec<Rental>,
        payments: Vec<Payment>,
        customers: Vec<Customer>,
        vehicles: Vec<Vehicle>,
    ) -> Self {
        Self::new(
            Digest::unique(),
            currency,
            rentals,
            payments,
            customers,
            vehicles,
        )
    }

    /// Indexes the provided records into a new [`Memory`] snapshot.
    fn new(
        digest: Digest,
        currency: Currency,
        rentals: Vec<Rental>,
        payments: Vec<Payment>,
        customers: Vec<Customer>,
        vehicles: Vec<Vehicle>,
    ) -> Self {
        let rental_index =
            rentals.iter().enumerate().map(|(i, r)| (r.id, i)).collect();
        let mut by_rental = HashMap::<_, Vec<_>>::new();
        for p in payments {
            by_rental.entry(p.rental_id).or_default().push(p);
        }
        Self(Arc::new(Snapshot {
            digest,
            currency,
            rentals,
            rental_index,
            payments: by_rental,
            customers: customers.into_iter().map(|c| (c.id, c)).collect(),
            vehicles: vehicles.into_iter().map(|v| (v.id, v)).collect(),
        }))
    }

    /// Returns the [`Digest`] of this [`Memory`] snapshot.
    #[must_use]
    pub fn digest(&self) -> Digest {
        self.0.digest
    }
}

/// [`Memory`] database [`Error`].
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Failed to read the snapshot.
    #[display("Failed to read snapshot: {_0}")]
    Io(io::Error),

    /// Snapshot is not a valid JSON of the expected shape.
    #[display("Malformed snapshot: {_0}")]
    Json(serde_json::Error),

    /// Snapshot record has an invalid field value.
    #[display("`{record}` record has invalid `{field}`: {value:?}")]
    #[from(ignore)]
    InvalidField {
        /// Kind of the record.
        record: &'static str,

        /// Name of the invalid field.
        field: &'static str,

        /// Invalid value.
        value: String,
    },
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Select},
        Currency,
    };

    use super::{Config, Digest, Memory};
    use crate::{
        domain::{rental, Rental},
        fixture::{date, lira},
        infra::{database, Database as _},
    };

    const SNAPSHOT: &str = r#"{
        "vehicles": [{
            "id": "5a1b3b5e-6f55-4c28-9d0e-2a2a3c0c7a01",
            "plate": "34 ABC 12",
            "status": "RENTED"
        }],
        "customers": [{
            "id": "0c6f7b2e-1b1a-4b8e-8f5e-0d3e2f6a9b02",
            "name": "Ayşe Yılmaz",
            "phone": "+90 555 000 00 00"
        }],
        "rentals": [{
            "id": "9e0f3a4b-2c1d-4e5f-8a9b-0c1d2e3f4a03",
            "vehicleId": "5a1b3b5e-6f55-4c28-9d0e-2a2a3c0c7a01",
            "customerId": "0c6f7b2e-1b1a-4b8e-8f5e-0d3e2f6a9b02",
            "startDate": "2024-01-01",
            "endDate": "2024-01-30",
            "days": 30,
            "dailyRate": 50000,
            "distanceFee": "60000",
            "cleaningFee": 10000,
            "tollFee": 5000,
            "damageFee": null,
            "upfront": 500000,
            "pay1": null,
            "status": "COMPLETED",
            "note": "  ",
            "createdAt": "2024-01-01T09:00:00Z",
            "payments": [{
                "id": "1d2e3f4a-5b6c-4d7e-8f9a-0b1c2d3e4f04",
                "amount": 300000,
                "method": "CARD",
                "paidAt": "2024-01-10T10:00:00Z"
            }, {
                "id": "2d2e3f4a-5b6c-4d7e-8f9a-0b1c2d3e4f05",
                "amount": 200000,
                "method": "CASH",
                "paidAt": "2024-01-20T10:00:00Z"
            }]
        }]
    }"#;

    fn rental_id() -> rental::Id {
        "9e0f3a4b-2c1d-4e5f-8a9b-0c1d2e3f4a03".parse().unwrap()
    }

    #[test]
    fn digests_raw_bytes() {
        assert_eq!(Digest::of(b"abc"), Digest::of(b"abc"));
        assert_ne!(Digest::of(b"abc"), Digest::of(b"abd"));
        assert_ne!(Digest::unique(), Digest::unique());
        assert_eq!(Digest::of(b"abc").to_string().len(), 32);
    }

    #[tokio::test]
    async fn normalizes_minor_units() {
        let db = Memory::from_json(SNAPSHOT.as_bytes(), Config::default())
            .unwrap();

        let rental = db
            .execute(Select(By::<Option<Rental>, _>::new(rental_id())))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(rental.currency(), Currency::Try);
        assert_eq!(rental.tariff.daily_rate, lira("500"));
        assert_eq!(rental.tariff.distance_fee, lira("600"));
        assert_eq!(rental.tariff.damage_fee, lira("0"));
        assert_eq!(rental.tariff.fuel_fee, lira("0"));
        assert_eq!(rental.installments.upfront, lira("5000"));
        assert_eq!(rental.installments.pay4, lira("0"));
        assert_eq!(rental.end_date, date("2024-01-30").coerce());
        assert_eq!(rental.status, rental::Status::Completed);
        assert_eq!(rental.note, None);

        let payments = db
            .execute(Select(By::<Vec<_>, _>::new(rental_id())))
            .await
            .unwrap();
        assert_eq!(payments.len(), 2);
        assert_eq!(payments[0].amount, lira("3000"));
    }

    #[tokio::test]
    async fn keeps_major_units() {
        let json = SNAPSHOT.replacen('{', r#"{"unit": "MAJOR","#, 1);

        let db = Memory::from_json(json.as_bytes(), Config::default())
            .unwrap();
        let rental = db
            .execute(Select(By::<Option<Rental>, _>::new(rental_id())))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(rental.tariff.daily_rate, lira("50000"));
    }

    #[test]
    fn identifies_snapshot_by_contents() {
        let a = Memory::from_json(SNAPSHOT.as_bytes(), Config::default())
            .unwrap();
        let b = Memory::from_json(SNAPSHOT.as_bytes(), Config::default())
            .unwrap();
        let changed = SNAPSHOT.replace("50000", "50001");
        let c = Memory::from_json(changed.as_bytes(), Config::default())
            .unwrap();

        assert_eq!(a.digest(), b.digest());
        assert_ne!(a.digest(), c.digest());
    }

    #[test]
    fn rejects_invalid_date() {
        let json = SNAPSHOT.replace("2024-01-30", "2024-02-30");

        let err = Memory::from_json(json.as_bytes(), Config::default())
            .unwrap_err();

        assert!(
            matches!(
                err.as_ref(),
                database::Error::Memory(super::Error::InvalidField {
                    field: "endDate",
                    ..
                }),
            ),
            "{err}",
        );
    }

    #[test]
    fn rejects_unknown_status() {
        let json = SNAPSHOT.replace("COMPLETED", "LOST");

        let err = Memory::from_json(json.as_bytes(), Config::default())
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            database::Error::Memory(super::Error::Json(_)),
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(Memory::from_json(b"{", Config::default()).is_err());
    }

    #[tokio::test]
    async fn fails_on_missing_file() {
        let err = Memory::load("/nonexistent/snapshot.json", Config::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            database::Error::Memory(super::Error::Io(_)),
        ));
    }
}
