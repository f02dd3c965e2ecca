//! Actor service: application-layer orchestration
//!
//! Registration, login and actor management. HTTP handlers are thin
//! wrappers that delegate here.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::domain::{
    Actor, ActorRepositoryInterface, CreateActorDto, DomainError, DomainResult, NewActor,
    UpdateActorDto, ADMIN_ROLE_ID, DEFAULT_ROLE_ID,
};
use crate::infrastructure::crypto::jwt::TokenIssuer;
use crate::infrastructure::crypto::password::{
    fits_bcrypt, hash_password, verify_password, MAX_PASSWORD_BYTES,
};
use crate::shared::InfraError;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 50;
pub const PASSWORD_MIN_LEN: usize = 6;

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub expires_in: i64,
    pub actor: Actor,
}

pub struct ActorService {
    repo: Arc<dyn ActorRepositoryInterface>,
    issuer: TokenIssuer,
    bcrypt_cost: u32,
    /// Verified against on unknown-user logins so both failure paths pay
    /// for one bcrypt round at the configured cost.
    dummy_digest: OnceCell<String>,
}

impl ActorService {
    pub fn new(repo: Arc<dyn ActorRepositoryInterface>, issuer: TokenIssuer, bcrypt_cost: u32) -> Self {
        Self {
            repo,
            issuer,
            bcrypt_cost,
            dummy_digest: OnceCell::new(),
        }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check credentials and mint a token.
    ///
    /// Unknown usernames and wrong passwords return the same error, and
    /// both run a bcrypt verification. A signing failure aborts the login.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<LoginResult> {
        let Some(actor) = self.repo.get_actor_by_username(username).await? else {
            let digest = self.dummy_digest().await?;
            self.verify(password, digest).await?;
            metrics::counter!("logins_total", "outcome" => "unknown_user").increment(1);
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !self.verify(password, &actor.password_hash).await? {
            metrics::counter!("logins_total", "outcome" => "bad_password").increment(1);
            warn!(username = %actor.username, "Login rejected: wrong password");
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let token = self
            .issuer
            .issue(&actor.username, actor.role_id)
            .map_err(InfraError::from)?;

        metrics::counter!("logins_total", "outcome" => "success").increment(1);
        info!(actor_id = actor.id, username = %actor.username, "Actor logged in");

        Ok(LoginResult {
            token,
            expires_in: self.issuer.ttl_secs(),
            actor,
        })
    }

    // ── Registration ────────────────────────────────────────────

    /// Self-registration. New actors always start with the default role,
    /// unverified and inactive.
    pub async fn register(&self, dto: CreateActorDto) -> DomainResult<Actor> {
        validate_username(&dto.username)?;
        validate_password(&dto.password)?;

        if self.repo.get_actor_by_username(&dto.username).await?.is_some() {
            return Err(DomainError::Conflict("Username already exists".into()));
        }

        let password_hash = self.hash(dto.password).await?;
        let actor = self
            .repo
            .create_actor(NewActor {
                username: dto.username,
                password_hash,
                role_id: DEFAULT_ROLE_ID,
                verified: false,
                active: false,
            })
            .await?;

        info!(actor_id = actor.id, username = %actor.username, "New actor registered");
        Ok(actor)
    }

    /// Create a verified, active administrator if no actors exist yet.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> DomainResult<Option<Actor>> {
        if self.repo.count_actors().await? > 0 {
            return Ok(None);
        }

        validate_username(username)?;
        validate_password(password)?;

        let password_hash = self.hash(password.to_string()).await?;
        let actor = self
            .repo
            .create_actor(NewActor {
                username: username.to_string(),
                password_hash,
                role_id: ADMIN_ROLE_ID,
                verified: true,
                active: true,
            })
            .await?;

        info!(username = %actor.username, "Default admin created");
        Ok(Some(actor))
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_actor(&self, id: i32) -> DomainResult<Actor> {
        self.repo
            .get_actor_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Actor", "id", id))
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Partial update. A new password is hashed before it is stored.
    pub async fn update_actor(&self, id: i32, mut dto: UpdateActorDto) -> DomainResult<Actor> {
        if let Some(ref username) = dto.username {
            validate_username(username)?;
        }
        if let Some(password) = dto.password.take() {
            validate_password(&password)?;
            dto.password = Some(self.hash(password).await?);
        }

        let actor = self
            .repo
            .update_actor(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("Actor", "id", id))?;

        info!(actor_id = actor.id, "Actor updated");
        Ok(actor)
    }

    pub async fn delete_actor(&self, username: &str) -> DomainResult<()> {
        self.repo.delete_actor_by_username(username).await?;
        info!(username, "Actor deleted");
        Ok(())
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn hash(&self, password: String) -> DomainResult<String> {
        let cost = self.bcrypt_cost;
        let digest = tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| DomainError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(InfraError::from)?;
        Ok(digest)
    }

    async fn dummy_digest(&self) -> DomainResult<&str> {
        let digest = self
            .dummy_digest
            .get_or_try_init(|| self.hash("unknown-actor-placeholder".to_string()))
            .await?;
        Ok(digest.as_str())
    }

    async fn verify(&self, password: &str, digest: &str) -> DomainResult<bool> {
        let password = password.to_string();
        let digest = digest.to_string();
        tokio::task::spawn_blocking(move || verify_password(&password, &digest))
            .await
            .map_err(|e| DomainError::Internal(format!("Verification task failed: {}", e)))
    }
}

fn validate_username(username: &str) -> DomainResult<()> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(DomainError::Validation(format!(
            "Username must be {}-{} characters",
            USERNAME_MIN_LEN, USERNAME_MAX_LEN
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(DomainError::Validation(
            "Username must not contain whitespace".into(),
        ));
    }
    Ok(())
}

fn validate_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(DomainError::Validation(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN_LEN
        )));
    }
    if !fits_bcrypt(password) {
        return Err(DomainError::Validation(format!(
            "Password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }
    Ok(())
}
