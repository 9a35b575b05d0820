//! Service contains the reconciliation and reporting logic of the
//! application.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod domain;
#[cfg(test)]
mod fixture;
pub mod infra;
pub mod memo;
pub mod query;
pub mod read;

use std::sync::Arc;

use derive_more::Debug;

#[cfg(doc)]
use infra::Database;

pub use self::{memo::Memo, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    /// [`Memo`] configuration of the reports.
    pub memo: memo::Config,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// Memoized reports of this [`Service`].
    #[debug(skip)]
    memos: Arc<Memos>,
}

/// [`Memo`]s of the reports computed by a [`Service`].
#[derive(Debug)]
struct Memos {
    /// [`query::report::revenue::Monthly`] reports.
    revenue: Memo<query::report::revenue::Output>,

    /// [`query::report::risk::Customers`] rankings.
    risks: Memo<Vec<query::report::risk::Row>>,
}

impl<Db> Service<Db> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(config: Config, database: Db) -> Self {
        let memos = Arc::new(Memos {
            revenue: Memo::new(config.memo),
            risks: Memo::new(config.memo),
        });
        Self {
            config,
            database,
            memos,
        }
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns [`Memos`] of this [`Service`].
    fn memos(&self) -> &Memos {
        &self.memos
    }
}
