//! egui host for [`RatingWidget`].

use egui::{vec2, Align2, CursorIcon, FontId, Rect, Response, Sense, Shape, Stroke, StrokeKind, Ui, Vec2};
use starscore_core::geometry::{half_star_polygon, star_kernel, star_polygon};
use starscore_core::{RatingWidget, StarFill};

use crate::paint::{fan_mesh, local_point, to_color32};
use crate::theme;

/// Shows a [`RatingWidget`] inside an egui `Ui`.
///
/// The control is allocated at its intrinsic size unless [`StarRating::size`]
/// overrides it. egui pointer state is translated into press-start, move,
/// end and cancel calls in control-local coordinates.
pub struct StarRating<'a> {
    widget: &'a mut RatingWidget,
    size: Option<Vec2>,
    focus_ring: bool,
}

impl<'a> StarRating<'a> {
    pub fn new(widget: &'a mut RatingWidget) -> Self {
        Self {
            widget,
            size: None,
            focus_ring: false,
        }
    }

    /// Allocate a fixed size instead of the intrinsic size.
    pub fn size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    /// Outline the control while it holds focus.
    pub fn focus_ring(mut self, show: bool) -> Self {
        self.focus_ring = show;
        self
    }

    /// Show the control. The response is marked changed when the value moved.
    pub fn show(self, ui: &mut Ui) -> Response {
        let widget = self.widget;
        let intrinsic = widget.intrinsic_size();
        let desired = self
            .size
            .unwrap_or_else(|| vec2(intrinsic.width as f32, intrinsic.height as f32));
        let (rect, mut response) = ui.allocate_exact_size(desired, Sense::click_and_drag());

        let frame = kurbo::Size::new(rect.width() as f64, rect.height() as f64);
        if widget.frame() != frame {
            widget.set_frame(frame);
        }

        let before = widget.value();
        track_pointer(ui, rect, &response, widget);
        if widget.value() != before {
            response.mark_changed();
        }

        if widget.take_redraw_request() {
            ui.ctx().request_repaint();
        }

        if ui.is_rect_visible(rect) {
            paint(ui, rect, widget, self.focus_ring);
        }

        if !widget.is_read_only() {
            response = response.on_hover_cursor(CursorIcon::PointingHand);
        }
        response
    }
}

/// Feed this frame's pointer state into the control.
fn track_pointer(ui: &Ui, rect: Rect, response: &Response, widget: &mut RatingWidget) {
    let (latest, released, down) = ui.input(|i| {
        (
            i.pointer.latest_pos(),
            i.pointer.primary_released(),
            i.pointer.primary_down(),
        )
    });
    let local = latest.map(|pos| local_point(rect, pos));

    if !widget.is_focused() {
        if response.is_pointer_button_down_on() || response.clicked() {
            if let Some(p) = local {
                widget.press_start(p);
            }
        }
    } else if !released {
        if let Some(p) = local {
            widget.press_move(p);
        }
    }

    if widget.is_focused() {
        if released {
            match local {
                Some(p) => widget.press_end(p),
                None => widget.press_cancel(),
            }
        } else if !down {
            widget.press_cancel();
        }
    }
}

fn paint(ui: &Ui, rect: Rect, widget: &RatingWidget, focus_ring: bool) {
    let painter = ui.painter_at(rect);
    let normal = to_color32(widget.normal_color());
    let accent = to_color32(widget.accent_color());

    let background = to_color32(widget.background_color());
    if background.a() > 0 {
        let area = widget.drawing_rect();
        let area = Rect::from_min_size(
            rect.min + vec2(area.x0 as f32, area.y0 as f32),
            vec2(area.width() as f32, area.height() as f32),
        );
        painter.rect_filled(area, 0.0, background);
    }

    for visual in widget.star_visuals() {
        let kernel = star_kernel(visual.frame);
        let outline = star_polygon(visual.frame);
        match visual.fill {
            StarFill::Normal => {
                painter.add(Shape::mesh(fan_mesh(rect.min, kernel, &outline, normal)));
            }
            StarFill::Accent => {
                painter.add(Shape::mesh(fan_mesh(rect.min, kernel, &outline, accent)));
            }
            StarFill::Half => {
                painter.add(Shape::mesh(fan_mesh(rect.min, kernel, &outline, normal)));
                let lobe = half_star_polygon(visual.frame);
                painter.add(Shape::mesh(fan_mesh(rect.min, kernel, &lobe, accent)));
            }
        }
    }

    if let Some(readout) = widget.readout_rect() {
        painter.text(
            rect.min + vec2(readout.x0 as f32, readout.center().y as f32),
            Align2::LEFT_CENTER,
            widget.readout_text(),
            FontId::proportional(starscore_core::READOUT_FONT_SIZE as f32),
            theme::TEXT,
        );
    }

    if focus_ring && widget.is_focused() {
        painter.rect_stroke(rect, 4.0, Stroke::new(1.0, theme::FOCUS), StrokeKind::Inside);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Context, Event, Modifiers, PointerButton, Pos2, RawInput};
    use starscore_core::ChangeKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn raw_input(events: Vec<Event>) -> RawInput {
        RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0))),
            events,
            ..Default::default()
        }
    }

    fn press(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::default(),
        }
    }

    /// Run one frame and return the rect the control was allocated.
    fn frame(ctx: &Context, widget: &mut RatingWidget, events: Vec<Event>) -> Rect {
        let mut rect = Rect::NOTHING;
        let _ = ctx.run(raw_input(events), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                rect = StarRating::new(widget).show(ui).rect;
            });
        });
        rect
    }

    fn tap(ctx: &Context, widget: &mut RatingWidget, pos: Pos2) {
        frame(ctx, widget, vec![Event::PointerMoved(pos), press(pos, true)]);
        frame(ctx, widget, vec![press(pos, false)]);
        frame(ctx, widget, vec![]);
    }

    #[test]
    fn test_allocates_intrinsic_size() {
        let ctx = Context::default();
        let mut widget = RatingWidget::new();
        let rect = frame(&ctx, &mut widget, vec![]);
        assert_eq!(rect.size(), vec2(250.0, 44.0));
        assert_eq!(widget.frame(), kurbo::Size::new(250.0, 44.0));
    }

    #[test]
    fn test_tap_sets_value_and_commits() {
        let ctx = Context::default();
        let mut widget = RatingWidget::new();
        let commits = Rc::new(RefCell::new(0));
        let sink = commits.clone();
        widget.on_value_changed(move |e| {
            if e.kind == ChangeKind::Commit {
                *sink.borrow_mut() += 1;
            }
        });

        let rect = frame(&ctx, &mut widget, vec![]);
        tap(&ctx, &mut widget, rect.min + vec2(160.0, 22.0));

        assert_eq!(widget.value(), 4.0);
        assert_eq!(*commits.borrow(), 1);
        assert!(!widget.is_focused());
    }

    #[test]
    fn test_read_only_ignores_taps() {
        let ctx = Context::default();
        let mut widget = RatingWidget::new();
        widget.set_read_only(true);
        widget.set_value(2.0);

        let rect = frame(&ctx, &mut widget, vec![]);
        tap(&ctx, &mut widget, rect.min + vec2(230.0, 22.0));

        assert_eq!(widget.value(), 2.0);
        assert!(!widget.is_focused());
    }

    #[test]
    fn test_custom_size_updates_frame() {
        let ctx = Context::default();
        let mut widget = RatingWidget::new();
        let _ = ctx.run(raw_input(vec![]), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                StarRating::new(&mut widget).size(vec2(400.0, 60.0)).show(ui);
            });
        });
        assert_eq!(widget.frame(), kurbo::Size::new(400.0, 60.0));
    }
}
