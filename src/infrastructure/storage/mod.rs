//! In-memory storage implementations

mod memory;

pub use memory::{InMemoryActorRepository, InMemoryCustomerRepository};
