//! Layout and shape math for the star row.
//!
//! Everything here is a pure function of its arguments. The widget
//! recomputes the layout on every draw instead of caching it.

use kurbo::{BezPath, Point, Rect, Size};

/// Height of one star row, also the intrinsic height of the control.
pub const ROW_HEIGHT: f64 = 44.0;

/// Gap between the star row and the readout.
pub const LABEL_GAP: f64 = 5.0;

/// Point size of the readout text.
pub const READOUT_FONT_SIZE: f64 = 14.0;

/// Star outline as proportions of its bounding square, clockwise from the top tip.
pub const STAR_VERTICES: [(f64, f64); 10] = [
    (0.5, 0.0),
    (0.66, 0.28),
    (0.98, 0.35),
    (0.76, 0.58),
    (0.79, 0.9),
    (0.5, 0.78),
    (0.21, 0.9),
    (0.24, 0.58),
    (0.02, 0.35),
    (0.34, 0.28),
];

/// Left lobe of the star: top tip, counter-clockwise to the bottom notch.
pub const HALF_STAR_VERTICES: [(f64, f64); 6] = [
    STAR_VERTICES[0],
    STAR_VERTICES[9],
    STAR_VERTICES[8],
    STAR_VERTICES[7],
    STAR_VERTICES[6],
    STAR_VERTICES[5],
];

/// A point every star vertex is visible from, as a proportion of the frame.
///
/// It sits inside the inner pentagon and on the closing edge of the half
/// star, so both outlines can be triangulated as a fan around it.
pub const STAR_KERNEL: (f64, f64) = (0.5, 0.5);

/// Rectangle the stars are laid out in.
///
/// When the readout is shown its width plus [`LABEL_GAP`] is carved off the
/// trailing edge.
pub fn drawing_rect(bounds: Size, show_label: bool, label_width: f64) -> Rect {
    let width = if show_label {
        bounds.width - (label_width + LABEL_GAP)
    } else {
        bounds.width
    };
    Rect::new(0.0, 0.0, width.max(0.0), bounds.height)
}

/// Rectangle of the readout: flush with the trailing edge, full height.
pub fn readout_rect(bounds: Size, label_width: f64) -> Rect {
    let x0 = (bounds.width - label_width).max(0.0);
    Rect::new(x0, 0.0, bounds.width, bounds.height)
}

/// Preferred size of a control with `star_count` stars.
pub fn intrinsic_size(star_count: usize, spacing: f64) -> Size {
    let count = star_count as f64;
    Size::new(count * ROW_HEIGHT + (count + 1.0) * spacing, ROW_HEIGHT)
}

/// One star slot in the row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarCell {
    /// Zero-based star index.
    pub index: usize,
    /// Centre of the star.
    pub center: Point,
    /// Square bounding box of the star.
    pub frame: Rect,
}

/// Positions and sizes of every star for one drawing area.
#[derive(Debug, Clone, PartialEq)]
pub struct StarLayout {
    /// Width allotted to each star, excluding spacing.
    pub cell_width: f64,
    /// Side of each star's bounding square.
    pub star_side: f64,
    pub cells: Vec<StarCell>,
}

impl StarLayout {
    /// Lay out `star_count` stars in `area`.
    ///
    /// Spacing is applied between stars and at both ends of the row. Stars
    /// are square and never taller than the area. A zero star count yields
    /// an empty layout.
    pub fn compute(area: Rect, star_count: usize, spacing: f64) -> Self {
        if star_count == 0 {
            return Self {
                cell_width: 0.0,
                star_side: 0.0,
                cells: Vec::new(),
            };
        }

        let count = star_count as f64;
        let available = area.width() - spacing * (count + 1.0);
        let cell_width = (available / count).max(0.0);
        let star_side = cell_width.min(area.height()).max(0.0);

        let cells = (0..star_count)
            .map(|index| {
                let i = index as f64;
                let center = Point::new(
                    area.x0 + cell_width * i + cell_width / 2.0 + spacing * (i + 1.0),
                    area.y0 + area.height() / 2.0,
                );
                StarCell {
                    index,
                    center,
                    frame: Rect::from_center_size(center, Size::new(star_side, star_side)),
                }
            })
            .collect();

        Self {
            cell_width,
            star_side,
            cells,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// How a single star is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarFill {
    /// Whole star in the normal color.
    Normal,
    /// Whole star in the accent color.
    Accent,
    /// Whole star in the normal color, left lobe overlaid in the accent color.
    Half,
}

impl StarFill {
    /// Decide the fill of star `index` for `value`.
    ///
    /// A star is highlighted when its ordinal is within `ceil(value)`. The
    /// highlighted star whose ordinal exceeds `value` is the fractional one;
    /// it is drawn as a half star only when half stars are allowed.
    pub fn for_star(index: usize, value: f64, allows_half_stars: bool) -> Self {
        let ordinal = (index + 1) as f64;
        let highlighted = ordinal <= value.ceil();
        let half = highlighted && ordinal > value;

        if half && allows_half_stars {
            StarFill::Half
        } else if highlighted {
            StarFill::Accent
        } else {
            StarFill::Normal
        }
    }
}

/// Everything a renderer needs to paint one star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarVisual {
    pub index: usize,
    pub frame: Rect,
    pub fill: StarFill,
}

fn project(frame: Rect, (px, py): (f64, f64)) -> Point {
    Point::new(frame.x0 + px * frame.width(), frame.y0 + py * frame.height())
}

/// Vertices of the full star inside `frame`.
pub fn star_polygon(frame: Rect) -> [Point; 10] {
    STAR_VERTICES.map(|v| project(frame, v))
}

/// Vertices of the half star (left lobe) inside `frame`.
pub fn half_star_polygon(frame: Rect) -> [Point; 6] {
    HALF_STAR_VERTICES.map(|v| project(frame, v))
}

/// Fan centre for triangulating either outline inside `frame`.
pub fn star_kernel(frame: Rect) -> Point {
    project(frame, STAR_KERNEL)
}

/// Closed path through `points`.
pub fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

/// Closed outline of the full star inside `frame`.
pub fn star_path(frame: Rect) -> BezPath {
    polygon_path(&star_polygon(frame))
}

/// Closed outline of the half star inside `frame`.
pub fn half_star_path(frame: Rect) -> BezPath {
    polygon_path(&half_star_polygon(frame))
}
