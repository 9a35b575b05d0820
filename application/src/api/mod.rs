//! GraphQL API definitions.

pub mod customer;
mod query;
pub mod rental;
pub mod report;
pub mod vehicle;

use juniper::{EmptyMutation, EmptySubscription};

use crate::Context;

pub use self::{
    customer::Customer, query::Query, rental::Statement, vehicle::Vehicle,
};

/// GraphQL schema.
///
/// Reports are read-only, so there are no mutations or subscriptions.
pub type Schema = juniper::RootNode<
    'static,
    Query,
    EmptyMutation<Context>,
    EmptySubscription<Context>,
>;

/// Creates a new [`Schema`].
#[must_use]
pub fn schema() -> Schema {
    Schema::new(Query, EmptyMutation::new(), EmptySubscription::new())
}

#[cfg(test)]
mod spec {
    use common::Date;
    use juniper::{graphql_value, Value, Variables};
    use service::infra::{memory, Memory};

    use crate::{Context, Service};

    use super::schema;

    const SNAPSHOT: &str = r#"{
        "currency": "TRY",
        "unit": "MAJOR",
        "vehicles": [{
            "id": "5a1b3b5e-6f55-4c28-9d0e-2a2a3c0c7a01",
            "plate": "34 ABC 12",
            "status": "IDLE"
        }],
        "customers": [{
            "id": "0c6f7b2e-1b1a-4b8e-8f5e-0d3e2f6a9b02",
            "name": "Ayse Yilmaz",
            "email": "ayse@example.com"
        }],
        "rentals": [{
            "id": "9e0f3a4b-2c1d-4e5f-8a9b-0c1d2e3f4a03",
            "vehicleId": "5a1b3b5e-6f55-4c28-9d0e-2a2a3c0c7a01",
            "customerId": "0c6f7b2e-1b1a-4b8e-8f5e-0d3e2f6a9b02",
            "startDate": "2024-01-30",
            "endDate": "2024-02-02",
            "days": 4,
            "dailyRate": 100,
            "distanceFee": 40,
            "cleaningFee": 10,
            "upfront": 100,
            "status": "COMPLETED",
            "createdAt": "2024-01-29T10:00:00Z",
            "payments": [{
                "id": "1d2e3f4a-5b6c-4d7e-8f9a-0b1c2d3e4f04",
                "amount": 200,
                "method": "CASH",
                "paidAt": "2024-02-03T09:00:00Z"
            }]
        }, {
            "id": "7b0f3a4b-2c1d-4e5f-8a9b-0c1d2e3f4a06",
            "vehicleId": "5a1b3b5e-6f55-4c28-9d0e-2a2a3c0c7a01",
            "customerId": "0c6f7b2e-1b1a-4b8e-8f5e-0d3e2f6a9b02",
            "startDate": "2024-02-10",
            "endDate": "2024-02-11",
            "days": 2,
            "dailyRate": 1000,
            "status": "CANCELLED",
            "createdAt": "2024-02-01T10:00:00Z",
            "payments": []
        }]
    }"#;

    async fn execute(query: &str) -> (Value, Vec<String>) {
        let memory =
            Memory::from_json(SNAPSHOT.as_bytes(), memory::Config::default())
                .unwrap();
        let ctx = Context::new(
            Service::new(service::Config::default(), memory),
            "2024-03-01".parse::<Date>().unwrap(),
        );

        let (value, errors) =
            juniper::execute(query, None, &schema(), &Variables::new(), &ctx)
                .await
                .unwrap();
        let codes = errors
            .iter()
            .filter_map(|e| {
                e.error()
                    .extensions()
                    .as_object_value()?
                    .get_field_value("code")?
                    .as_string_value()
                    .map(ToOwned::to_owned)
            })
            .collect();
        (value, codes)
    }

    #[tokio::test]
    async fn draws_up_rental_statement() {
        let (value, errors) = execute(
            r#"{
                rentalStatement(id: "9e0f3a4b-2c1d-4e5f-8a9b-0c1d2e3f4a03") {
                    charge { days fees totalDue }
                    paid
                    balance
                    balanceStatus
                    overdueDays
                    tier
                    settledOn
                    vehicle { plate status }
                    customer { name phone }
                }
            }"#,
        )
        .await;

        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(
            value,
            graphql_value!({
                "rentalStatement": {
                    "charge": {
                        "days": 4,
                        "fees": "50TRY",
                        "totalDue": "450TRY",
                    },
                    "paid": "300TRY",
                    "balance": "150TRY",
                    "balanceStatus": "PARTIAL",
                    "overdueDays": 28,
                    "tier": "MEDIUM",
                    "settledOn": null,
                    "vehicle": {"plate": "34 ABC 12", "status": "IDLE"},
                    "customer": {"name": "Ayse Yilmaz", "phone": null},
                },
            }),
        );
    }

    #[tokio::test]
    async fn reports_missing_rental() {
        let (_, errors) = execute(
            r#"{
                rentalStatement(id: "00000000-0000-4000-8000-000000000000") {
                    balance
                }
            }"#,
        )
        .await;

        assert_eq!(errors, ["RENTAL_NOT_EXISTS"]);
    }

    #[tokio::test]
    async fn lists_outstanding_rentals_by_balance() {
        let (value, errors) = execute(
            r#"{
                outstandingRentals(
                    customerId: "0c6f7b2e-1b1a-4b8e-8f5e-0d3e2f6a9b02"
                ) {
                    id
                    balance
                    status
                }
            }"#,
        )
        .await;

        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(
            value,
            graphql_value!({
                "outstandingRentals": [{
                    "id": "7b0f3a4b-2c1d-4e5f-8a9b-0c1d2e3f4a06",
                    "balance": "2000TRY",
                    "status": "CANCELLED",
                }, {
                    "id": "9e0f3a4b-2c1d-4e5f-8a9b-0c1d2e3f4a03",
                    "balance": "150TRY",
                    "status": "COMPLETED",
                }],
            }),
        );
    }

    #[tokio::test]
    async fn attributes_monthly_revenue() {
        let (value, errors) = execute(
            r"{
                monthlyRevenue {
                    rows { month revenue vehicle { plate } }
                    totals { month revenue }
                    grandTotal
                    skipped { rentalId }
                }
            }",
        )
        .await;

        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(
            value,
            graphql_value!({
                "monthlyRevenue": {
                    "rows": [{
                        "month": "2024-01",
                        "revenue": "220TRY",
                        "vehicle": {"plate": "34 ABC 12"},
                    }, {
                        "month": "2024-02",
                        "revenue": "220TRY",
                        "vehicle": {"plate": "34 ABC 12"},
                    }],
                    "totals": [
                        {"month": "2024-01", "revenue": "220TRY"},
                        {"month": "2024-02", "revenue": "220TRY"},
                    ],
                    "grandTotal": "440TRY",
                    "skipped": [],
                },
            }),
        );
    }

    #[tokio::test]
    async fn assesses_customer_risk() {
        let (value, errors) = execute(
            r#"{
                customerRisk(id: "0c6f7b2e-1b1a-4b8e-8f5e-0d3e2f6a9b02") {
                    rentalsCount
                    totalBilled
                    totalPaid
                    currentDebt
                    avgPaymentDelay
                    criticalRentalsCount
                    score
                    level
                    lastPaymentAt
                }
                customerRisks { customer { name } profile { score } }
            }"#,
        )
        .await;

        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(
            value,
            graphql_value!({
                "customerRisk": {
                    "rentalsCount": 2,
                    "totalBilled": "2450TRY",
                    "totalPaid": "300TRY",
                    "currentDebt": "2150TRY",
                    "avgPaymentDelay": null,
                    "criticalRentalsCount": 0,
                    "score": 30,
                    "level": "LOW",
                    "lastPaymentAt": "2024-02-03T09:00:00Z",
                },
                "customerRisks": [{
                    "customer": {"name": "Ayse Yilmaz"},
                    "profile": {"score": 30},
                }],
            }),
        );
    }

    #[tokio::test]
    async fn reports_missing_customer() {
        let (_, errors) = execute(
            r#"{
                customer(id: "00000000-0000-4000-8000-000000000000") { name }
            }"#,
        )
        .await;

        assert_eq!(errors, ["CUSTOMER_NOT_EXISTS"]);
    }
}
