//! Output rendering.

pub mod error;

pub use error::{RenderOptions, render_error};
