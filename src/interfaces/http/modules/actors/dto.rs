//! Actor DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Actor, CreateActorDto, UpdateActorDto};

/// Registration body. Role and account flags are assigned by the server;
/// any such fields in the body are ignored.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateActorRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(length(min = 6, max = 72, message = "password must be 6-72 characters"))]
    pub password: String,
}

impl From<CreateActorRequest> for CreateActorDto {
    fn from(req: CreateActorRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

/// Partial update; omitted fields keep their value
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateActorRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: Option<String>,
    #[validate(length(min = 6, max = 72, message = "password must be 6-72 characters"))]
    pub password: Option<String>,
    pub role_id: Option<i32>,
    pub verified: Option<bool>,
    pub active: Option<bool>,
}

impl From<UpdateActorRequest> for UpdateActorDto {
    fn from(req: UpdateActorRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            role_id: req.role_id,
            verified: req.verified,
            active: req.active,
        }
    }
}

/// Public view of an actor. The password hash never leaves the server.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActorDto {
    pub id: i32,
    pub username: String,
    pub role_id: i32,
    pub verified: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Actor> for ActorDto {
    fn from(a: Actor) -> Self {
        Self {
            id: a.id,
            username: a.username,
            role_id: a.role_id,
            verified: a.verified,
            active: a.active,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_dto_omits_password_hash() {
        let now = Utc::now();
        let dto = ActorDto::from(Actor {
            id: 1,
            username: "john".into(),
            password_hash: "$2b$04$secret".into(),
            role_id: 2,
            verified: false,
            active: false,
            created_at: now,
            updated_at: now,
        });
        let json = serde_json::to_string(&dto).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("$2b$"));
    }

    #[test]
    fn registration_ignores_extra_fields() {
        let req: CreateActorRequest = serde_json::from_str(
            r#"{"username":"john","password":"secret1","role_id":1,"active":true}"#,
        )
        .unwrap();
        assert_eq!(req.username, "john");
    }

    #[test]
    fn update_validates_only_present_fields() {
        assert!(UpdateActorRequest::default().validate().is_ok());

        let short = UpdateActorRequest {
            password: Some("123".into()),
            ..Default::default()
        };
        assert!(short.validate().is_err());
    }

    #[test]
    fn passwords_past_bcrypt_input_limit_are_rejected() {
        let fits = CreateActorRequest {
            username: "john".into(),
            password: "a".repeat(72),
        };
        assert!(fits.validate().is_ok());

        let too_long = CreateActorRequest {
            username: "john".into(),
            password: "a".repeat(73),
        };
        assert!(too_long.validate().is_err());

        let update = UpdateActorRequest {
            password: Some("a".repeat(73)),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
