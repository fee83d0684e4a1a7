//! Utility modules for the access core

pub mod error;
pub mod logging;

pub use error::{AccessError, Result};

use uuid::Uuid;

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
