// Public API - what other modules can use
pub use handlers::get_summary;

// Internal modules
mod handlers;
pub mod service;
pub mod types;
