//! Persistence layer for the Charity CMS backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations with the shared dynamic-filter pattern

pub mod db;
pub mod entities;
pub mod filter;
pub mod metrics;
pub mod repositories;
