//! Helpers for loading configuration from the environment.

mod error;
pub use error::ConfigError;

mod env_utils;
pub use env_utils::{load_list_opt, load_string, load_string_opt, load_u64, load_u64_opt};
