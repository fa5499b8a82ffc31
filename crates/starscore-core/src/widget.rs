//! The rating control itself.
//!
//! `RatingWidget` owns all configuration, the readout, the interaction
//! state and the registered observers. It never draws: hosts ask it for
//! [`StarVisual`]s and the readout rect, and feed pointer events back in.
//! Every setter clamps its input and requests a redraw; the host polls
//! [`RatingWidget::take_redraw_request`] once per frame.

use crate::config::{ConfigResult, RatingConfig};
use crate::geometry::{self, StarFill, StarLayout, StarVisual};
use crate::hit_test;
use crate::input::{InteractionState, PointerEvent};
use kurbo::{Point, Rect, Size};
use peniko::Color;
use std::fmt;

/// Why a value-changed notification fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// The stored value changed (direct set or mid-gesture update).
    Continuous,
    /// A gesture ended on a value different from where it started.
    Commit,
}

/// Payload delivered to value-changed observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueChanged {
    pub old: f64,
    pub new: f64,
    pub kind: ChangeKind,
}

type Observer = Box<dyn FnMut(&ValueChanged)>;

/// Numeric readout shown on the trailing edge of the control.
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    text: String,
    visible: bool,
    width: f64,
}

impl Readout {
    fn new(width: f64) -> Self {
        Self {
            text: "5.0".to_string(),
            visible: false,
            width,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn width(&self) -> f64 {
        self.width
    }
}

/// Interactive star-rating control.
pub struct RatingWidget {
    frame: Size,
    star_count: usize,
    minimum_value: f64,
    value: f64,
    spacing: f64,
    allows_half_stars: bool,
    read_only: bool,
    show_value_label: bool,
    normal_color: Color,
    accent_color: Color,
    background_color: Color,
    exclusive_touch: bool,
    readout: Readout,
    interaction: InteractionState,
    focused: bool,
    needs_redraw: bool,
    observers: Vec<Observer>,
}

impl fmt::Debug for RatingWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatingWidget")
            .field("frame", &self.frame)
            .field("star_count", &self.star_count)
            .field("minimum_value", &self.minimum_value)
            .field("value", &self.value)
            .field("spacing", &self.spacing)
            .field("allows_half_stars", &self.allows_half_stars)
            .field("read_only", &self.read_only)
            .field("show_value_label", &self.show_value_label)
            .field("interaction", &self.interaction)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Default for RatingWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl RatingWidget {
    /// Create a control with default settings at its intrinsic size.
    pub fn new() -> Self {
        Self::from_config(&RatingConfig::default())
    }

    /// Create a control with default settings and the given bounds.
    pub fn with_frame(frame: Size) -> Self {
        Self::from_config(&RatingConfig {
            frame: Some(frame),
            ..Default::default()
        })
    }

    /// Create a control from a serialized description.
    pub fn from_config(config: &RatingConfig) -> Self {
        let star_count = config.star_count;
        let spacing = config.spacing.max(0.0);
        let mut widget = Self {
            frame: config
                .frame
                .unwrap_or_else(|| geometry::intrinsic_size(star_count, spacing)),
            star_count,
            minimum_value: config.minimum_value.max(0.0),
            value: hit_test::clamp_to_range(config.value, 0.0, star_count),
            spacing,
            allows_half_stars: config.allows_half_stars,
            read_only: config.read_only,
            show_value_label: config.show_value_label,
            normal_color: config.normal_color.into(),
            accent_color: config.accent_color.into(),
            background_color: Color::TRANSPARENT,
            exclusive_touch: false,
            readout: Readout::new(config.label_width.max(0.0)),
            interaction: InteractionState::Idle,
            focused: false,
            needs_redraw: false,
            observers: Vec::new(),
        };
        widget.init();
        widget
    }

    /// Create a control from a JSON description.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        RatingConfig::from_json(json).map(|config| Self::from_config(&config))
    }

    /// Shared by every constructor.
    fn init(&mut self) {
        self.background_color = Color::TRANSPARENT;
        self.exclusive_touch = true;
        self.readout.visible = self.show_value_label;
        if self.readout.visible {
            self.refresh_readout();
        }
        self.request_redraw();
    }

    /// Snapshot the current properties.
    pub fn to_config(&self) -> RatingConfig {
        RatingConfig {
            star_count: self.star_count,
            minimum_value: self.minimum_value,
            value: self.value,
            spacing: self.spacing,
            allows_half_stars: self.allows_half_stars,
            read_only: self.read_only,
            show_value_label: self.show_value_label,
            normal_color: self.normal_color.into(),
            accent_color: self.accent_color.into(),
            label_width: self.readout.width,
            frame: Some(self.frame),
        }
    }

    // --- Properties ---

    pub fn frame(&self) -> Size {
        self.frame
    }

    pub fn set_frame(&mut self, frame: Size) {
        self.frame = frame;
        self.request_redraw();
    }

    pub fn star_count(&self) -> usize {
        self.star_count
    }

    /// Set the number of stars. The value is pulled down if it no longer fits.
    pub fn set_star_count(&mut self, star_count: usize) {
        self.star_count = star_count;
        if self.value > star_count as f64 {
            self.set_value(self.value);
        }
        self.request_redraw();
    }

    pub fn minimum_value(&self) -> f64 {
        self.minimum_value
    }

    /// Set the lowest value a gesture can produce. Negative input stores 0.
    pub fn set_minimum_value(&mut self, minimum_value: f64) {
        self.minimum_value = minimum_value.max(0.0);
        self.request_redraw();
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Set the rating.
    ///
    /// The stored value is clamped to `[0, star_count]` but not raised to the
    /// minimum; only gestures honor the minimum. Observers are notified when
    /// the stored value changes and the control is not read-only.
    pub fn set_value(&mut self, value: f64) {
        let old = self.value;
        self.value = hit_test::clamp_to_range(value, 0.0, self.star_count);

        if self.value != old && !self.read_only {
            self.notify(ChangeKind::Continuous, old, self.value);
        }
        if self.readout.visible {
            self.refresh_readout();
        }
        self.request_redraw();
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Set the gap between stars. Negative input stores 0.
    pub fn set_spacing(&mut self, spacing: f64) {
        self.spacing = spacing.max(0.0);
        self.request_redraw();
    }

    pub fn allows_half_stars(&self) -> bool {
        self.allows_half_stars
    }

    pub fn set_allows_half_stars(&mut self, allows_half_stars: bool) {
        self.allows_half_stars = allows_half_stars;
        self.request_redraw();
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
        self.request_redraw();
    }

    pub fn shows_value_label(&self) -> bool {
        self.show_value_label
    }

    /// Show or hide the readout. Showing it refreshes the text immediately.
    pub fn set_show_value_label(&mut self, show: bool) {
        self.show_value_label = show;
        self.readout.visible = show;
        if show {
            self.refresh_readout();
        } else {
            self.readout.text.clear();
        }
        self.request_redraw();
    }

    pub fn label_width(&self) -> f64 {
        self.readout.width
    }

    pub fn set_label_width(&mut self, width: f64) {
        self.readout.width = width.max(0.0);
        self.request_redraw();
    }

    pub fn normal_color(&self) -> Color {
        self.normal_color
    }

    pub fn set_normal_color(&mut self, color: impl Into<Color>) {
        self.normal_color = color.into();
        self.request_redraw();
    }

    pub fn accent_color(&self) -> Color {
        self.accent_color
    }

    pub fn set_accent_color(&mut self, color: impl Into<Color>) {
        self.accent_color = color.into();
        self.request_redraw();
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    /// Whether the control claims a touch exclusively while tracking it.
    pub fn is_exclusive_touch(&self) -> bool {
        self.exclusive_touch
    }

    pub fn readout(&self) -> &Readout {
        &self.readout
    }

    pub fn readout_text(&self) -> &str {
        &self.readout.text
    }

    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    pub fn is_tracking(&self) -> bool {
        self.interaction.is_tracking()
    }

    /// Whether the control currently holds input focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    // --- Notifications and redraw ---

    /// Register an observer for value changes.
    pub fn on_value_changed<F>(&mut self, observer: F)
    where
        F: FnMut(&ValueChanged) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, kind: ChangeKind, old: f64, new: f64) {
        log::debug!("Rating {:?}: {} -> {}", kind, old, new);
        let event = ValueChanged { old, new, kind };
        for observer in self.observers.iter_mut() {
            observer(&event);
        }
    }

    fn refresh_readout(&mut self) {
        self.readout.text = format!("{:.1}", self.value);
    }

    fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Return whether a redraw was requested since the last call, and clear it.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    // --- Geometry ---

    /// Preferred size for the current star count and spacing.
    pub fn intrinsic_size(&self) -> Size {
        geometry::intrinsic_size(self.star_count, self.spacing)
    }

    /// Area the stars occupy, excluding the readout when shown.
    pub fn drawing_rect(&self) -> Rect {
        geometry::drawing_rect(self.frame, self.show_value_label, self.readout.width)
    }

    /// Readout rect, when the readout is shown.
    pub fn readout_rect(&self) -> Option<Rect> {
        self.readout
            .visible
            .then(|| geometry::readout_rect(self.frame, self.readout.width))
    }

    /// Star positions for the current frame.
    pub fn layout(&self) -> StarLayout {
        StarLayout::compute(self.drawing_rect(), self.star_count, self.spacing)
    }

    /// What to paint for every star, in order.
    pub fn star_visuals(&self) -> Vec<StarVisual> {
        self.layout()
            .cells
            .into_iter()
            .map(|cell| StarVisual {
                index: cell.index,
                frame: cell.frame,
                fill: StarFill::for_star(cell.index, self.value, self.allows_half_stars),
            })
            .collect()
    }

    // --- Pointer input ---

    /// Dispatch a pointer event. Returns whether the value changed.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> bool {
        let before = self.value;
        match event {
            PointerEvent::Down { position } => self.press_start(position),
            PointerEvent::Move { position } => self.press_move(position),
            PointerEvent::Up { position } => self.press_end(position),
            PointerEvent::Cancel => self.press_cancel(),
        }
        self.value != before
    }

    /// Begin a gesture. Read-only controls take focus but do not track.
    pub fn press_start(&mut self, position: Point) {
        self.focused = true;
        if self.read_only {
            return;
        }
        self.interaction = InteractionState::Tracking {
            start_value: self.value,
        };
        self.track(position);
    }

    /// Continue a gesture.
    pub fn press_move(&mut self, position: Point) {
        if self.read_only || !self.interaction.is_tracking() {
            return;
        }
        self.track(position);
    }

    /// Finish a gesture, committing if the value moved since press-start.
    pub fn press_end(&mut self, position: Point) {
        self.focused = false;
        let Some(start_value) = self.interaction.start_value() else {
            return;
        };
        self.interaction = InteractionState::Idle;
        if self.read_only {
            return;
        }

        self.track(position);
        if self.value != start_value {
            self.notify(ChangeKind::Commit, start_value, self.value);
        }
    }

    /// Abandon a gesture without a final update or notification.
    pub fn press_cancel(&mut self) {
        self.focused = false;
        self.interaction = InteractionState::Idle;
    }

    fn track(&mut self, position: Point) {
        let area = self.drawing_rect();
        let Some(candidate) = hit_test::pointer_value(
            area,
            position,
            self.star_count,
            self.allows_half_stars,
            self.show_value_label,
        ) else {
            log::trace!("Ignoring pointer at ({}, {})", position.x, position.y);
            return;
        };
        self.set_value(hit_test::clamp_to_range(
            candidate,
            self.minimum_value,
            self.star_count,
        ));
    }
}
