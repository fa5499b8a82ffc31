//! Mapping pointer positions to rating values.

use kurbo::{Point, Rect};

/// Candidate value under `point`, before range clamping.
///
/// Cells for hit-testing divide `area` evenly and ignore spacing. With half
/// stars allowed, the left half of a cell maps to `n + 0.5`; otherwise the
/// whole cell maps to its ordinal.
///
/// Returns `None` when there are no stars, the area has no width, or
/// `require_inside` is set and the point lies outside `area`.
pub fn pointer_value(
    area: Rect,
    point: Point,
    star_count: usize,
    allows_half_stars: bool,
    require_inside: bool,
) -> Option<f64> {
    if star_count == 0 || area.width() <= 0.0 {
        return None;
    }
    if require_inside && !area.contains(point) {
        return None;
    }

    let cell_width = area.width() / star_count as f64;
    let raw = (point.x - area.x0) / cell_width;

    if allows_half_stars && raw + 0.5 < raw.ceil() {
        Some(raw.floor() + 0.5)
    } else {
        Some(raw.ceil())
    }
}

/// Clamp a pointer-derived value into `[minimum, star_count]`.
///
/// The upper bound wins when `minimum` exceeds the star count. Zero is always
/// returned as `+0.0`, so a pointer just left of the row never yields `-0.0`.
pub fn clamp_to_range(candidate: f64, minimum: f64, star_count: usize) -> f64 {
    let value = candidate.max(minimum).min(star_count as f64);
    if value == 0.0 { 0.0 } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: Rect = Rect::new(0.0, 0.0, 250.0, 44.0);

    #[test]
    fn test_whole_stars() {
        assert_eq!(pointer_value(AREA, Point::new(10.0, 20.0), 5, false, false), Some(1.0));
        assert_eq!(pointer_value(AREA, Point::new(60.0, 20.0), 5, false, false), Some(2.0));
        assert_eq!(pointer_value(AREA, Point::new(249.0, 20.0), 5, false, false), Some(5.0));
    }

    #[test]
    fn test_half_stars() {
        // Cells are 50 wide.
        assert_eq!(pointer_value(AREA, Point::new(110.0, 20.0), 5, true, false), Some(2.5));
        assert_eq!(pointer_value(AREA, Point::new(125.0, 20.0), 5, true, false), Some(3.0));
        assert_eq!(pointer_value(AREA, Point::new(140.0, 20.0), 5, true, false), Some(3.0));
    }

    #[test]
    fn test_cell_boundary_is_whole() {
        assert_eq!(pointer_value(AREA, Point::new(100.0, 20.0), 5, true, false), Some(2.0));
    }

    #[test]
    fn test_outside_area() {
        let outside = Point::new(260.0, 20.0);
        assert_eq!(pointer_value(AREA, outside, 5, false, true), None);
        assert_eq!(pointer_value(AREA, outside, 5, false, false), Some(6.0));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(pointer_value(AREA, Point::new(10.0, 20.0), 0, true, false), None);
        let empty = Rect::new(0.0, 0.0, 0.0, 44.0);
        assert_eq!(pointer_value(empty, Point::new(0.0, 20.0), 5, true, false), None);
    }

    #[test]
    fn test_clamp_to_range() {
        assert_eq!(clamp_to_range(0.0, 1.0, 5), 1.0);
        assert_eq!(clamp_to_range(-2.0, 0.0, 5), 0.0);
        assert_eq!(clamp_to_range(6.0, 1.0, 5), 5.0);
        assert_eq!(clamp_to_range(3.5, 1.0, 5), 3.5);
        assert_eq!(clamp_to_range(2.0, 7.0, 5), 5.0);
    }

    #[test]
    fn test_clamp_never_returns_negative_zero() {
        let left_of_row = pointer_value(AREA, Point::new(-10.0, 20.0), 5, false, false);
        assert_eq!(left_of_row, Some(-0.0));
        let clamped = clamp_to_range(-0.0, 0.0, 5);
        assert!(clamped.is_sign_positive());
        assert!(clamp_to_range(-0.0, -0.0, 5).is_sign_positive());
        assert!(clamp_to_range(-3.0, 0.0, 0).is_sign_positive());
    }
}
