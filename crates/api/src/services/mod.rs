//! External collaborators and shared handler services.

pub mod assets;
pub mod cookies;
pub mod media;
