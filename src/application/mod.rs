//! Application layer: use cases over the domain repositories

pub mod customers;
pub mod identity;

pub use customers::CustomerService;
pub use identity::{ActorService, LoginResult};
