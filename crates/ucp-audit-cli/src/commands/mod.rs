//! Command implementations.

pub mod audit;
pub mod config;
pub mod models;

pub use self::audit::execute_audit;
pub use self::config::execute_config;
pub use self::models::execute_models;
