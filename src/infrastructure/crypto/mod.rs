//! Password hashing and token signing

pub mod jwt;
pub mod password;

pub use jwt::{JwtConfig, TokenClaims, TokenError, TokenIssuer, TokenVerifier};
pub use password::{hash_password, verify_password};
