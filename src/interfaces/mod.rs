//! External interfaces

pub mod http;
