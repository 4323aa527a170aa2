//! Shared types, errors, and configuration for Fintrack.
//!
//! This crate provides common types used across all other crates:
//! - Numeric record IDs and their typed wrappers
//! - Money parsing and formatting with decimal precision
//! - Month tokens (`YYYY-MM`) and their calendar windows
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
