//! Painting helpers: color conversion and star meshes.

use egui::epaint::Mesh;
use egui::{Color32, Pos2, Rect};
use kurbo::Point;
use peniko::Color;

/// Convert a peniko color to an egui color.
pub fn to_color32(color: Color) -> Color32 {
    let rgba = color.to_rgba8();
    Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, rgba.a)
}

fn to_pos(origin: Pos2, p: Point) -> Pos2 {
    Pos2::new(origin.x + p.x as f32, origin.y + p.y as f32)
}

/// Triangle fan around `center` covering the polygon `points`.
///
/// egui only fills convex paths correctly, so the star outlines are
/// submitted as meshes instead. `center` must see every vertex, which holds
/// for the star kernel. Coordinates are offset by `origin`.
pub fn fan_mesh(origin: Pos2, center: Point, points: &[Point], color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    if points.len() < 3 {
        return mesh;
    }

    mesh.colored_vertex(to_pos(origin, center), color);
    for p in points {
        mesh.colored_vertex(to_pos(origin, *p), color);
    }

    let n = points.len() as u32;
    for i in 1..n {
        mesh.add_triangle(0, i, i + 1);
    }
    mesh.add_triangle(0, n, 1);
    mesh
}

/// Convert an egui rect into control-local kurbo coordinates.
pub(crate) fn local_point(rect: Rect, pos: Pos2) -> Point {
    Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64)
}
