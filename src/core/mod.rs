//! Framework core: commands, the registry, the application, logging.

pub mod app;
pub mod command;
pub mod logging;
pub mod registry;

pub use app::App;
pub use command::{Command, CommandFactory, factory};
pub use registry::CommandManager;
