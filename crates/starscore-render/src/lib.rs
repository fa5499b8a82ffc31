//! StarScore Render Library
//!
//! Turns the state of a [`RatingWidget`](starscore_core::RatingWidget) into
//! drawing commands. The default implementation uses Vello; an SVG writer is
//! always available for snapshots and export.

mod renderer;
mod svg;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{display_list, DrawCommand, RenderContext, RenderResult, Renderer, RendererError};
pub use svg::SvgRenderer;

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
