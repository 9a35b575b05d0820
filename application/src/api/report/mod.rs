//! Report definitions.

pub mod revenue;
pub mod risk;

pub use self::{revenue::Revenue, risk::Risk};
