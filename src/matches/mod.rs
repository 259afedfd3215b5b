// Public API - what other modules can use
pub use handlers::{create_match, get_match, list_matches};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
mod validation;
