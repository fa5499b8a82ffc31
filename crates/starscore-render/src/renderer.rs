//! Renderer trait abstraction and the shared display list.

use kurbo::{BezPath, Rect};
use peniko::Color;
use starscore_core::geometry::{half_star_path, star_path, READOUT_FONT_SIZE};
use starscore_core::{RatingWidget, StarFill};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The control to render.
    pub widget: &'a RatingWidget,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Fill behind the star row. Defaults to the control's background.
    pub background_color: Color,
    /// Readout text color.
    pub text_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(widget: &'a RatingWidget) -> Self {
        Self {
            widget,
            scale_factor: 1.0,
            background_color: widget.background_color(),
            text_color: Color::BLACK,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the readout text color.
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }
}

/// One backend-independent drawing operation, in control coordinates.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Fill a closed path.
    Fill { path: BezPath, color: Color },
    /// Draw a single line of text, left-aligned and vertically centered in `rect`.
    Text {
        text: String,
        rect: Rect,
        font_size: f64,
        color: Color,
    },
}

/// Build the drawing operations for the current state of `ctx.widget`.
///
/// Order matters: background first, then stars left to right (a half star is
/// its normal-colored outline followed by the accent left lobe), then the
/// readout.
pub fn display_list(ctx: &RenderContext) -> Vec<DrawCommand> {
    let widget = ctx.widget;
    let mut commands = Vec::new();

    if ctx.background_color.to_rgba8().a > 0 {
        let area = widget.drawing_rect();
        let mut path = BezPath::new();
        path.move_to((area.x0, area.y0));
        path.line_to((area.x1, area.y0));
        path.line_to((area.x1, area.y1));
        path.line_to((area.x0, area.y1));
        path.close_path();
        commands.push(DrawCommand::Fill {
            path,
            color: ctx.background_color,
        });
    }

    for visual in widget.star_visuals() {
        match visual.fill {
            StarFill::Normal => commands.push(DrawCommand::Fill {
                path: star_path(visual.frame),
                color: widget.normal_color(),
            }),
            StarFill::Accent => commands.push(DrawCommand::Fill {
                path: star_path(visual.frame),
                color: widget.accent_color(),
            }),
            StarFill::Half => {
                commands.push(DrawCommand::Fill {
                    path: star_path(visual.frame),
                    color: widget.normal_color(),
                });
                commands.push(DrawCommand::Fill {
                    path: half_star_path(visual.frame),
                    color: widget.accent_color(),
                });
            }
        }
    }

    if let Some(rect) = widget.readout_rect() {
        commands.push(DrawCommand::Text {
            text: widget.readout_text().to_string(),
            rect,
            font_size: READOUT_FONT_SIZE,
            color: ctx.text_color,
        });
    }

    commands
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the scene/command buffer for a frame.
    ///
    /// Called whenever the host redraws; output depends only on `ctx`.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fills(commands: &[DrawCommand]) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { .. }))
            .count()
    }

    #[test]
    fn test_one_fill_per_star() {
        let widget = RatingWidget::new();
        let commands = display_list(&RenderContext::new(&widget));
        assert_eq!(commands.len(), 5);
        assert_eq!(fills(&commands), 5);
    }

    #[test]
    fn test_half_star_adds_overlay() {
        let mut widget = RatingWidget::new();
        widget.set_allows_half_stars(true);
        widget.set_value(2.5);
        let commands = display_list(&RenderContext::new(&widget));
        assert_eq!(fills(&commands), 6);

        match (&commands[2], &commands[3]) {
            (DrawCommand::Fill { color: under, .. }, DrawCommand::Fill { color: over, .. }) => {
                assert_eq!(under.to_rgba8(), widget.normal_color().to_rgba8());
                assert_eq!(over.to_rgba8(), widget.accent_color().to_rgba8());
            }
            other => panic!("unexpected commands {:?}", other),
        }
    }

    #[test]
    fn test_background_and_readout() {
        let mut widget = RatingWidget::with_frame(kurbo::Size::new(305.0, 44.0));
        widget.set_show_value_label(true);
        widget.set_value(3.0);

        let ctx = RenderContext::new(&widget).with_background(Color::WHITE);
        let commands = display_list(&ctx);
        assert_eq!(commands.len(), 7);
        assert!(matches!(commands[0], DrawCommand::Fill { .. }));
        match commands.last() {
            Some(DrawCommand::Text { text, rect, .. }) => {
                assert_eq!(text, "3.0");
                assert_eq!(rect.x0, 255.0);
            }
            other => panic!("expected readout, got {:?}", other),
        }
    }

    #[test]
    fn test_readout_uses_text_color() {
        let mut widget = RatingWidget::with_frame(kurbo::Size::new(305.0, 44.0));
        widget.set_show_value_label(true);
        let gray = Color::from_rgba8(60, 60, 60, 255);
        let ctx = RenderContext::new(&widget).with_text_color(gray);
        match display_list(&ctx).last() {
            Some(DrawCommand::Text { color, .. }) => assert_eq!(color.to_rgba8(), gray.to_rgba8()),
            other => panic!("expected readout, got {:?}", other),
        }
    }

    #[test]
    fn test_error_messages() {
        let err = RendererError::RenderFailed("device lost".to_string());
        assert_eq!(err.to_string(), "Render failed: device lost");
        let err = RendererError::InitFailed("no adapter".to_string());
        assert_eq!(err.to_string(), "Initialization failed: no adapter");
    }

    #[test]
    fn test_zero_stars_draws_nothing() {
        let mut widget = RatingWidget::new();
        widget.set_star_count(0);
        assert!(display_list(&RenderContext::new(&widget)).is_empty());
    }

    #[test]
    fn test_display_list_is_stable() {
        let mut widget = RatingWidget::new();
        widget.set_allows_half_stars(true);
        widget.set_value(3.5);
        let ctx = RenderContext::new(&widget);
        let a = format!("{:?}", display_list(&ctx));
        let b = format!("{:?}", display_list(&ctx));
        assert_eq!(a, b);
    }
}
