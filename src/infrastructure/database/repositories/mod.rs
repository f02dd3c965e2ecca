//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories.

pub mod actor_repository;
pub mod customer_repository;

pub use actor_repository::ActorRepository;
pub use customer_repository::CustomerRepository;
