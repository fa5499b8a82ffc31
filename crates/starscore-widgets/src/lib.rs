//! egui hosting for the StarScore rating control.
//!
//! - **Rating**: [`StarRating`] drives a [`RatingWidget`](starscore_core::RatingWidget)
//!   from egui pointer input and paints it with egui meshes
//! - **Paint**: color conversion and star mesh helpers

pub mod paint;
pub mod rating;

pub use paint::{fan_mesh, to_color32};
pub use rating::StarRating;

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Readout text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Focus ring drawn around a control while it tracks a gesture
    pub const FOCUS: Color32 = Color32::from_rgb(59, 130, 246);
}
