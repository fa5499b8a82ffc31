//! SVG renderer for snapshots and export.

use crate::renderer::{display_list, DrawCommand, RenderContext, Renderer};
use peniko::Color;

/// Writes the display list as a standalone SVG document.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last document built.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Take ownership of the document (resets internal buffer).
    pub fn take_document(&mut self) -> String {
        std::mem::take(&mut self.document)
    }
}

fn svg_color(color: Color) -> (String, f32) {
    let rgba = color.to_rgba8();
    (
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b),
        rgba.a as f32 / 255.0,
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl Renderer for SvgRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        let frame = ctx.widget.frame();
        let scale = ctx.scale_factor;
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n",
            frame.width * scale,
            frame.height * scale,
            frame.width * scale,
            frame.height * scale,
        );
        out.push_str(&format!("<g transform=\"scale({})\">\n", scale));

        for command in display_list(ctx) {
            match command {
                DrawCommand::Fill { path, color } => {
                    let (fill, opacity) = svg_color(color);
                    out.push_str(&format!(
                        "<path d=\"{}\" fill=\"{}\" fill-opacity=\"{}\" stroke-linejoin=\"round\"/>\n",
                        path.to_svg(),
                        fill,
                        opacity,
                    ));
                }
                DrawCommand::Text {
                    text,
                    rect,
                    font_size,
                    color,
                } => {
                    let (fill, opacity) = svg_color(color);
                    out.push_str(&format!(
                        "<text x=\"{}\" y=\"{}\" font-family=\"sans-serif\" font-size=\"{}\" dominant-baseline=\"middle\" fill=\"{}\" fill-opacity=\"{}\">{}</text>\n",
                        rect.x0,
                        rect.center().y,
                        font_size,
                        fill,
                        opacity,
                        escape(&text),
                    ));
                }
            }
        }

        out.push_str("</g>\n</svg>\n");
        self.document = out;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starscore_core::RatingWidget;

    #[test]
    fn test_document_shape() {
        let mut widget = RatingWidget::new();
        widget.set_value(2.0);
        let mut renderer = SvgRenderer::new();
        renderer.build_scene(&RenderContext::new(&widget));

        let doc = renderer.document();
        assert!(doc.starts_with("<svg"));
        assert!(doc.trim_end().ends_with("</svg>"));
        assert_eq!(doc.matches("<path").count(), 5);
        assert_eq!(doc.matches("#007aff").count(), 2);
        assert_eq!(doc.matches("#efeff4").count(), 3);
        assert!(doc.contains("width=\"250\""));
    }

    #[test]
    fn test_scale_factor() {
        let widget = RatingWidget::new();
        let mut renderer = SvgRenderer::new();
        renderer.build_scene(&RenderContext::new(&widget).with_scale_factor(2.0));
        assert!(renderer.document().contains("width=\"500\""));
        assert!(renderer.document().contains("scale(2)"));
    }

    #[test]
    fn test_readout_text() {
        let mut widget = RatingWidget::with_frame(kurbo::Size::new(305.0, 44.0));
        widget.set_show_value_label(true);
        widget.set_value(4.5);
        let mut renderer = SvgRenderer::new();
        renderer.build_scene(&RenderContext::new(&widget));
        assert!(renderer.document().contains(">4.5</text>"));
    }

    #[test]
    fn test_take_document_resets() {
        let widget = RatingWidget::new();
        let mut renderer = SvgRenderer::new();
        renderer.build_scene(&RenderContext::new(&widget));
        let doc = renderer.take_document();
        assert!(!doc.is_empty());
        assert!(renderer.document().is_empty());
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&c"), "a&lt;b&gt;&amp;c");
    }
}
