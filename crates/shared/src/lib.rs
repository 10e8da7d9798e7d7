//! Shared utilities and common types for the Charity CMS backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Offset pagination arithmetic
//! - Password hashing with Argon2id
//! - The process-wide cache-tag registry
//! - Membership expiry date arithmetic
//! - Session token generation

pub mod cache;
pub mod membership;
pub mod pagination;
pub mod password;
pub mod session;
