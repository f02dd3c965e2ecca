//! Actor aggregate
//!
//! Contains the Actor entity, DTOs, and repository interface.

pub mod model;
pub mod repository;

mod dto;

pub use dto::{CreateActorDto, NewActor, UpdateActorDto};
pub use model::{Actor, ADMIN_ROLE_ID, DEFAULT_ROLE_ID};
pub use repository::ActorRepositoryInterface;
