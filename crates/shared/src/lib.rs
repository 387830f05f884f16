//! Shared types, errors, and configuration for Expensa.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management
//! - JWT issuance and validation
//! - SMS gateway for OTP delivery

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod sms;
pub mod types;

pub use auth::Claims;
pub use config::{AppConfig, JwtConfig, SmsConfig, SmsProvider};
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService};
pub use sms::{HttpSmsGateway, LogSmsGateway, SmsError, SmsGateway, gateway_from_config};
