use async_trait::async_trait;

use super::{Actor, NewActor, UpdateActorDto};
use crate::shared::DomainResult;

#[async_trait]
pub trait ActorRepositoryInterface: Send + Sync {
    /// Fails with `Conflict` when the username is taken.
    async fn create_actor(&self, actor: NewActor) -> DomainResult<Actor>;

    async fn get_actor_by_id(&self, id: i32) -> DomainResult<Option<Actor>>;
    async fn get_actor_by_username(&self, username: &str) -> DomainResult<Option<Actor>>;

    /// `dto.password`, when set, must already be a digest.
    async fn update_actor(&self, id: i32, dto: UpdateActorDto) -> DomainResult<Option<Actor>>;

    /// Fails with `NotFound` when no row matched.
    async fn delete_actor_by_username(&self, username: &str) -> DomainResult<()>;

    async fn count_actors(&self) -> DomainResult<u64>;
}
