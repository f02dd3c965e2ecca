//! Identity module: actor management and authentication

pub mod service;

pub use service::{ActorService, LoginResult};
