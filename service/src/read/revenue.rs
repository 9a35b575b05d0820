//! Revenue attribution of [`Rental`]s to calendar days and months.

use std::collections::BTreeMap;

use common::{Currency, Date, Money, YearMonth};
use derive_more::{Display, Error};
use itertools::Itertools as _;
use rust_decimal::Decimal;

use crate::domain::{rental, vehicle, Rental};

/// Revenue of a single [`Rental`] attributed to a single calendar day.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DailySample {
    /// Calendar day the revenue is attributed to.
    pub date: Date,

    /// ID of the rented [`Vehicle`].
    ///
    /// [`Vehicle`]: crate::domain::Vehicle
    pub vehicle_id: vehicle::Id,

    /// ID of the [`Rental`] earning the revenue.
    pub rental_id: rental::Id,

    /// Attributed revenue.
    pub revenue: Money,
}

/// [`Rental`] ending before it starts.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display(
    "`Rental(id: {rental_id})` ends on {end_date} before it starts on \
     {start_date}"
)]
pub struct MalformedRental {
    /// ID of the malformed [`Rental`].
    pub rental_id: rental::Id,

    /// Start of the malformed span.
    pub start_date: rental::StartDate,

    /// End of the malformed span.
    pub end_date: rental::EndDate,
}

/// Returns the revenue of the provided [`Rental`] subject to attribution.
///
/// Only the days of the calendar span and the distance fee are attributable:
/// other fees are not revenue of the [`Vehicle`].
///
/// # Errors
///
/// If the [`Rental`] span is malformed.
///
/// [`Vehicle`]: crate::domain::Vehicle
pub fn attributable(rental: &Rental) -> Result<Money, MalformedRental> {
    let span = span(rental)?;
    Ok(rental.tariff.daily_rate * span + rental.tariff.distance_fee)
}

/// Spreads the [`attributable`] revenue of the provided [`Rental`] evenly
/// over every calendar day of its span, both ends inclusive.
///
/// # Errors
///
/// If the [`Rental`] span is malformed.
pub fn samples(rental: &Rental) -> Result<Vec<DailySample>, MalformedRental> {
    let span = span(rental)?;
    let per_day = attributable(rental)? / span;
    Ok(rental
        .start_date
        .through(rental.end_date)
        .map(|date| DailySample {
            date,
            vehicle_id: rental.vehicle_id,
            rental_id: rental.id,
            revenue: per_day,
        })
        .collect())
}

/// Returns the number of calendar days in the span of the provided
/// [`Rental`].
fn span(rental: &Rental) -> Result<Decimal, MalformedRental> {
    let days = rental.span_days();
    if days < 1 {
        return Err(MalformedRental {
            rental_id: rental.id,
            start_date: rental.start_date,
            end_date: rental.end_date,
        });
    }
    Ok(days.into())
}

/// Revenue of a [`Vehicle`] in a month.
///
/// [`Vehicle`]: crate::domain::Vehicle
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Row {
    /// Month of the revenue.
    pub month: YearMonth,

    /// ID of the [`Vehicle`] earning the revenue.
    ///
    /// [`Vehicle`]: crate::domain::Vehicle
    pub vehicle_id: vehicle::Id,

    /// Revenue earned.
    pub revenue: Money,
}

/// Revenue of all [`Vehicle`]s in a month.
///
/// [`Vehicle`]: crate::domain::Vehicle
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Total {
    /// Month of the revenue.
    pub month: YearMonth,

    /// Revenue earned.
    pub revenue: Money,
}

/// Monthly revenue per [`Vehicle`], aggregated from [`DailySample`]s.
///
/// [`Vehicle`]: crate::domain::Vehicle
#[derive(Clone, Debug)]
pub struct Monthly {
    /// [`Currency`] of the aggregated revenue.
    currency: Currency,

    /// Revenue buckets, ordered by month and then by [`vehicle::Id`].
    buckets: BTreeMap<(YearMonth, vehicle::Id), Money>,
}

impl Monthly {
    /// Creates an empty [`Monthly`] aggregation.
    #[must_use]
    pub const fn new(currency: Currency) -> Self {
        Self {
            currency,
            buckets: BTreeMap::new(),
        }
    }

    /// Aggregates the provided [`DailySample`]s.
    #[must_use]
    pub fn collect(
        currency: Currency,
        samples: impl IntoIterator<Item = DailySample>,
    ) -> Self {
        let mut monthly = Self::new(currency);
        monthly.extend(samples);
        monthly
    }

    /// Adds the provided [`DailySample`] to its bucket.
    pub fn add(&mut self, sample: DailySample) {
        *self
            .buckets
            .entry((sample.date.year_month(), sample.vehicle_id))
            .or_insert(Money::zero(self.currency)) += sample.revenue;
    }

    /// Keeps only the buckets satisfying the provided predicate.
    pub fn retain(&mut self, mut f: impl FnMut(YearMonth, vehicle::Id) -> bool) {
        self.buckets.retain(|(month, vehicle), _| f(*month, *vehicle));
    }

    /// Returns the revenue of the provided [`Vehicle`] in the provided
    /// `month`, if it earned any.
    ///
    /// [`Vehicle`]: crate::domain::Vehicle
    #[must_use]
    pub fn get(&self, vehicle_id: vehicle::Id, month: YearMonth) -> Option<Money> {
        self.buckets.get(&(month, vehicle_id)).copied()
    }

    /// Returns the revenue of all [`Vehicle`]s in the provided `month`, if
    /// any of them earned any.
    ///
    /// [`Vehicle`]: crate::domain::Vehicle
    #[must_use]
    pub fn total(&self, month: YearMonth) -> Option<Money> {
        self.totals()
            .into_iter()
            .find_map(|t| (t.month == month).then_some(t.revenue))
    }

    /// Returns all the [`Row`]s, ordered by month and then by [`Vehicle`].
    ///
    /// [`Vehicle`]: crate::domain::Vehicle
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.buckets
            .iter()
            .map(|(&(month, vehicle_id), &revenue)| Row {
                month,
                vehicle_id,
                revenue,
            })
    }

    /// Returns the [`Total`]s of every month, ordered by month.
    #[must_use]
    pub fn totals(&self) -> Vec<Total> {
        self.rows()
            .chunk_by(|row| row.month)
            .into_iter()
            .map(|(month, rows)| Total {
                month,
                revenue: Money::sum(self.currency, rows.map(|r| r.revenue)),
            })
            .collect()
    }
}

impl Extend<DailySample> for Monthly {
    fn extend<I: IntoIterator<Item = DailySample>>(&mut self, iter: I) {
        for sample in iter {
            self.add(sample);
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{Currency, Money, YearMonth};
    use rust_decimal::Decimal;

    use crate::fixture::{date, lira, rental};

    use super::{attributable, samples, Monthly};

    fn month(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    fn assert_close(actual: Money, expected: Money) {
        let epsilon = Decimal::new(1, 12);
        assert!(
            (actual.amount - expected.amount).abs() < epsilon,
            "{actual} != {expected}",
        );
    }

    #[test]
    fn spreads_evenly_over_span() {
        let mut r = rental("2024-03-01", "2024-03-10", 10);
        r.tariff.daily_rate = lira("400");
        r.tariff.distance_fee = lira("200");
        r.tariff.cleaning_fee = lira("999");

        let s = samples(&r).unwrap();

        assert_eq!(s.len(), 10);
        assert_eq!(s[0].date, date("2024-03-01"));
        assert_eq!(s[9].date, date("2024-03-10"));
        assert!(s.iter().all(|s| s.revenue == lira("420")));
        assert!(s.iter().all(|s| s.rental_id == r.id));
        assert!(s.iter().all(|s| s.vehicle_id == r.vehicle_id));
    }

    #[test]
    fn conserves_attributable_revenue() {
        let mut r = rental("2024-01-29", "2024-03-02", 5);
        r.tariff.daily_rate = lira("333.33");
        r.tariff.distance_fee = lira("101");

        let s = samples(&r).unwrap();
        let total = Money::sum(Currency::Try, s.iter().map(|s| s.revenue));

        assert_eq!(s.len(), 34);
        assert_close(total, attributable(&r).unwrap());
    }

    #[test]
    fn splits_across_months_by_days() {
        let mut r = rental("2024-01-07", "2024-02-05", 30);
        r.tariff.daily_rate = lira("500");
        r.tariff.distance_fee = lira("600");

        let m = Monthly::collect(Currency::Try, samples(&r).unwrap());

        assert_eq!(m.get(r.vehicle_id, month("2024-01")), Some(lira("13000")));
        assert_eq!(m.get(r.vehicle_id, month("2024-02")), Some(lira("2600")));
        assert_eq!(m.get(r.vehicle_id, month("2024-03")), None);
    }

    #[test]
    fn single_month_yields_single_bucket() {
        let mut r = rental("2024-03-01", "2024-03-10", 10);
        r.tariff.daily_rate = lira("400");
        r.tariff.distance_fee = lira("200");

        let m = Monthly::collect(Currency::Try, samples(&r).unwrap());

        assert_eq!(m.rows().count(), 1);
        assert_eq!(m.get(r.vehicle_id, month("2024-03")), Some(lira("4200")));
    }

    #[test]
    fn single_day_takes_everything() {
        let mut r = rental("2024-03-05", "2024-03-05", 1);
        r.tariff.daily_rate = lira("700");
        r.tariff.distance_fee = lira("50");

        let s = samples(&r).unwrap();

        assert_eq!(s.len(), 1);
        assert_eq!(s[0].revenue, lira("750"));
    }

    #[test]
    fn ignores_nominal_days() {
        let mut r = rental("2024-03-01", "2024-03-04", 99);
        r.tariff.daily_rate = lira("100");

        assert_eq!(attributable(&r).unwrap(), lira("400"));
    }

    #[test]
    fn rejects_malformed_span() {
        let r = rental("2024-03-10", "2024-03-01", 10);

        let err = samples(&r).unwrap_err();

        assert_eq!(err.rental_id, r.id);
        assert!(err.to_string().contains("2024-03-01"));
        assert!(attributable(&r).is_err());
    }

    #[test]
    fn totals_all_vehicles_per_month() {
        let mut a = rental("2024-01-30", "2024-02-02", 4);
        a.tariff.daily_rate = lira("100");
        let mut b = rental("2024-02-01", "2024-02-01", 1);
        b.tariff.daily_rate = lira("50");

        let m = Monthly::collect(
            Currency::Try,
            samples(&a).unwrap().into_iter().chain(samples(&b).unwrap()),
        );

        assert_eq!(m.rows().count(), 3);
        assert_eq!(m.total(month("2024-01")), Some(lira("200")));
        assert_eq!(m.total(month("2024-02")), Some(lira("250")));
        assert_eq!(m.total(month("2024-03")), None);

        let totals = m.totals();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].month, month("2024-01"));
        assert_eq!(totals[1].month, month("2024-02"));
    }

    #[test]
    fn sums_rentals_of_same_vehicle() {
        let mut a = rental("2024-05-01", "2024-05-02", 2);
        a.tariff.daily_rate = lira("100");
        let mut b = rental("2024-05-20", "2024-05-20", 1);
        b.vehicle_id = a.vehicle_id;
        b.tariff.daily_rate = lira("30");

        let mut m = Monthly::new(Currency::Try);
        m.extend(samples(&a).unwrap());
        m.extend(samples(&b).unwrap());

        assert_eq!(m.get(a.vehicle_id, month("2024-05")), Some(lira("230")));
    }

    #[test]
    fn retains_requested_buckets() {
        let mut r = rental("2023-12-31", "2024-01-01", 2);
        r.tariff.daily_rate = lira("10");

        let mut m = Monthly::collect(Currency::Try, samples(&r).unwrap());
        m.retain(|month, _| month.year == 2024);

        assert_eq!(m.rows().count(), 1);
        assert_eq!(m.total(month("2024-01")), Some(lira("10")));
    }
}
