//! Core types for the protection order e-filing service: configuration,
//! error taxonomy, encryption keyring, and domain models.

pub mod config;
pub mod encryption;
pub mod error;
pub mod models;

pub use config::Config;
pub use encryption::Keyring;
pub use error::{AppError, ErrorMetadata, LogLevel};
