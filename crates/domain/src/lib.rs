//! Domain layer for the Charity CMS backend.
//!
//! This crate contains:
//! - Domain models and request/response DTOs per managed entity
//! - Partial-update (`Patch`) semantics
//! - The media-host abstraction and asset cleanup policy

pub mod models;
pub mod services;
