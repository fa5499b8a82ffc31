//! StarScore Application
//!
//! Native demo shell: a winit window rendering one rating control with
//! Vello, with keyboard shortcuts for the control's properties.

mod app;
mod shortcuts;

pub use app::{App, AppConfig, AppError};
pub use shortcuts::Shortcut;
