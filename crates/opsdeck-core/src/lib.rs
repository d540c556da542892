pub mod auth;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod remote;
pub mod stats;
pub mod store;
pub mod tracing_setup;

// Re-export the types most callers need at the crate root
pub use config::CoreConfig;
pub use error::{CoreError, RemoteError};
