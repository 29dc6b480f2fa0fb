//! Configuration storage.

pub mod config;
pub mod paths;

pub use config::{Config, ResolvedConfig};
pub use paths::AppPaths;
