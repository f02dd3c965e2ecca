//! Database entities module

pub mod actor;
pub mod customer;

pub use actor::Entity as Actor;
pub use customer::Entity as Customer;
