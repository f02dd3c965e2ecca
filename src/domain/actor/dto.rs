/// Registration input as received from the caller
#[derive(Debug, Clone)]
pub struct CreateActorDto {
    pub username: String,
    pub password: String,
}

/// Fully prepared actor row, password already hashed
#[derive(Debug, Clone)]
pub struct NewActor {
    pub username: String,
    pub password_hash: String,
    pub role_id: i32,
    pub verified: bool,
    pub active: bool,
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateActorDto {
    pub username: Option<String>,
    /// Plaintext on the way into the service, digest on the way into the repository
    pub password: Option<String>,
    pub role_id: Option<i32>,
    pub verified: Option<bool>,
    pub active: Option<bool>,
}
