//! Domain layer: entities, DTOs and repository interfaces

pub mod actor;
pub mod customer;

pub use actor::{
    Actor, ActorRepositoryInterface, CreateActorDto, NewActor, UpdateActorDto, ADMIN_ROLE_ID,
    DEFAULT_ROLE_ID,
};
pub use customer::{Customer, CustomerRepositoryInterface, NewCustomer, UpdateCustomerDto};

pub use crate::shared::{DomainError, DomainResult};
