//! Shared types, errors, and configuration for Predio.
//!
//! This crate provides common types used across all other crates:
//! - Cent-precision money helpers for monetary comparisons
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
