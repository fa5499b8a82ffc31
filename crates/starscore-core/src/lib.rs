//! StarScore Core Library
//!
//! Platform-agnostic state, geometry and input handling for the StarScore
//! star-rating control. Hosts (egui, a winit shell, tests) feed pointer
//! events in and read star visuals out.

pub mod color;
pub mod config;
pub mod geometry;
pub mod hit_test;
pub mod input;
pub mod widget;

pub use color::SerializableColor;
pub use config::{ConfigError, ConfigResult, RatingConfig};
pub use geometry::{
    StarCell, StarFill, StarLayout, StarVisual, HALF_STAR_VERTICES, READOUT_FONT_SIZE, ROW_HEIGHT,
    STAR_VERTICES,
};
pub use input::{InteractionState, PointerEvent};
pub use widget::{ChangeKind, RatingWidget, Readout, ValueChanged};
