//! Domain services for the Charity CMS.

pub mod media;

pub use media::{CleanupPolicy, MediaError, MediaStore, MockMediaStore};
