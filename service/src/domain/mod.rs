//! Domain definitions.

pub mod customer;
pub mod payment;
pub mod rental;
pub mod vehicle;

pub use self::{
    customer::Customer, payment::Payment, rental::Rental, vehicle::Vehicle,
};
