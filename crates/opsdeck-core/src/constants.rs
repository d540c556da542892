//! Application-wide constants
//!
//! Centralized location for magic strings shared across modules.

/// Sentinel passed as the document id on create; tells the remote store to
/// generate a unique id server-side.
pub const GENERATED_ID: &str = "unique()";

/// Navigation destination exempt from the session guard.
pub const LOGIN_ROUTE: &str = "/login";

/// Fixed status classification attached to any failed remote call.
pub const INTERNAL_ERROR_STATUS: u16 = 500;

/// Environment variable controlling the log filter.
pub const LOG_ENV_VAR: &str = "OPSDECK_LOG";

// Environment variable names understood by `CoreConfig::from_env`
pub mod env {
    pub const ENDPOINT: &str = "OPSDECK_ENDPOINT";
    pub const PROJECT_ID: &str = "OPSDECK_PROJECT_ID";
    pub const API_KEY: &str = "OPSDECK_API_KEY";
    pub const DATABASE_ID: &str = "OPSDECK_DATABASE_ID";
    pub const PROJECTS_COLLECTION_ID: &str = "OPSDECK_PROJECTS_COLLECTION_ID";
    pub const TASKS_COLLECTION_ID: &str = "OPSDECK_TASKS_COLLECTION_ID";
    pub const USERS_COLLECTION_ID: &str = "OPSDECK_USERS_COLLECTION_ID";
    pub const FINANCES_COLLECTION_ID: &str = "OPSDECK_FINANCES_COLLECTION_ID";
}
