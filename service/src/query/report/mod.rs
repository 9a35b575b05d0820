//! Reports [`Query`] collection.

pub mod revenue;
pub mod risk;

#[cfg(doc)]
use crate::Query;
