//! Client-side domain logic: session lifecycle, forms and the code-execution API

pub mod config;
pub mod execution;
pub mod forms;
pub mod session;
pub mod validation;

pub use config::{ApiConfig, Config, ConfigError};
