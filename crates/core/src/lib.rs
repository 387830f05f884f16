//! Core business logic for Expensa.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `eligibility` - Report-creation rules and the engine that applies them
//! - `expense` - Expense types and validation
//! - `report` - Reports, report codes, notifications
//! - `tier` - Spending tiers and category caps
//! - `event` - Rostered events
//! - `listing` - List and detail projections
//! - `auth` - MPIN hashing, OTPs, credential shape checks

pub mod auth;
pub mod eligibility;
pub mod event;
pub mod expense;
pub mod listing;
pub mod report;
pub mod tier;
