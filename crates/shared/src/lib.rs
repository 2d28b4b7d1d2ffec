//! Shared types, errors, and configuration for finops.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe record references
//! - The client session and user roles
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod types;

pub use auth::{Role, Session};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
