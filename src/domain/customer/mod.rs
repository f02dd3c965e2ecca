//! Customer aggregate

pub mod model;
pub mod repository;

mod dto;

pub use dto::{NewCustomer, UpdateCustomerDto};
pub use model::Customer;
pub use repository::CustomerRepositoryInterface;
