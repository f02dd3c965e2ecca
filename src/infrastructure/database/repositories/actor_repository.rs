use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, Set, SqlErr,
};

use crate::domain::{
    Actor, ActorRepositoryInterface, DomainError, DomainResult, NewActor, UpdateActorDto,
};
use crate::infrastructure::database::entities::actor;
use crate::shared::InfraError;

pub struct ActorRepository {
    db: DatabaseConnection,
}

impl ActorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn actor_model_to_domain(model: actor::Model) -> Actor {
    Actor {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        role_id: model.role_id,
        verified: model.verified,
        active: model.active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    InfraError::Database(e).into()
}

fn write_err(e: sea_orm::DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::Conflict("Username already exists".to_string())
        }
        _ => db_err(e),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ActorRepositoryInterface for ActorRepository {
    async fn create_actor(&self, new_actor: NewActor) -> DomainResult<Actor> {
        let now = Utc::now();

        let model = actor::ActiveModel {
            id: NotSet,
            username: Set(new_actor.username),
            password_hash: Set(new_actor.password_hash),
            role_id: Set(new_actor.role_id),
            verified: Set(new_actor.verified),
            active: Set(new_actor.active),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&self.db).await.map_err(write_err)?;
        Ok(actor_model_to_domain(inserted))
    }

    async fn get_actor_by_id(&self, id: i32) -> DomainResult<Option<Actor>> {
        let model = actor::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(actor_model_to_domain))
    }

    async fn get_actor_by_username(&self, username: &str) -> DomainResult<Option<Actor>> {
        let model = actor::Entity::find()
            .filter(actor::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(actor_model_to_domain))
    }

    async fn update_actor(&self, id: i32, dto: UpdateActorDto) -> DomainResult<Option<Actor>> {
        let existing = actor::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: actor::ActiveModel = existing.into();

        if let Some(username) = dto.username {
            active.username = Set(username);
        }
        if let Some(password_hash) = dto.password {
            active.password_hash = Set(password_hash);
        }
        if let Some(role_id) = dto.role_id {
            active.role_id = Set(role_id);
        }
        if let Some(verified) = dto.verified {
            active.verified = Set(verified);
        }
        if let Some(flag) = dto.active {
            active.active = Set(flag);
        }

        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(write_err)?;
        Ok(Some(actor_model_to_domain(updated)))
    }

    async fn delete_actor_by_username(&self, username: &str) -> DomainResult<()> {
        let result = actor::Entity::delete_many()
            .filter(actor::Column::Username.eq(username))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Actor", "username", username));
        }

        Ok(())
    }

    async fn count_actors(&self) -> DomainResult<u64> {
        actor::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
