//! Read models derived from domain records.
//!
//! Every read model is recomputed on demand and is never persisted.

pub mod balance;
pub mod charge;
pub mod payment;
pub mod rental;
pub mod revenue;
pub mod risk;
pub mod statement;

pub use self::statement::Statement;
