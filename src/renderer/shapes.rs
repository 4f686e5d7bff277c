//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Segments used for circles unless a caller asks otherwise
pub const DEFAULT_SEGMENTS: u32 = 24;

/// Point on a circle at the given angle
#[inline]
fn on_circle(center: Vec2, radius: f32, theta: f32) -> Vec2 {
    Vec2::new(center.x + radius * theta.cos(), center.y + radius * theta.sin())
}

/// Two triangles covering the quad a-b-c-d (in winding order)
fn quad(vertices: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) {
    vertices.push(Vertex::new(a.x, a.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(d.x, d.y, color));

    vertices.push(Vertex::new(d.x, d.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(c.x, c.y, color));
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        let p1 = on_circle(center, radius, theta1);
        let p2 = on_circle(center, radius, theta2);
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        quad(
            &mut vertices,
            on_circle(center, inner_radius, theta1),
            on_circle(center, outer_radius, theta1),
            on_circle(center, outer_radius, theta2),
            on_circle(center, inner_radius, theta2),
            color,
        );
    }

    vertices
}

/// Filled axis-aligned rectangle
pub fn rect(origin: Vec2, extent: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    quad(
        &mut vertices,
        origin,
        Vec2::new(origin.x + extent.x, origin.y),
        origin + extent,
        Vec2::new(origin.x, origin.y + extent.y),
        color,
    );
    vertices
}

/// Outline of an axis-aligned rectangle, `width` thick, drawn inside the bounds
pub fn rect_outline(origin: Vec2, extent: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let w = width.min(extent.x / 2.0).min(extent.y / 2.0);
    let mut vertices = Vec::with_capacity(24);

    // Top, bottom, left, right bands
    vertices.extend(rect(origin, Vec2::new(extent.x, w), color));
    vertices.extend(rect(
        Vec2::new(origin.x, origin.y + extent.y - w),
        Vec2::new(extent.x, w),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(origin.x, origin.y + w),
        Vec2::new(w, extent.y - 2.0 * w),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(origin.x + extent.x - w, origin.y + w),
        Vec2::new(w, extent.y - 2.0 * w),
        color,
    ));

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        let verts = circle(Vec2::ZERO, 5.0, [1.0; 4], 12);
        assert_eq!(verts.len(), 36);
        // Every rim vertex sits on the radius
        for v in verts.iter().skip(1).step_by(3) {
            let p = Vec2::from(v.position);
            assert!((p.length() - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_ring_stays_between_radii() {
        let verts = ring(Vec2::new(10.0, 10.0), 4.0, 5.0, [1.0; 4], 8);
        assert_eq!(verts.len(), 48);
        for v in &verts {
            let d = Vec2::from(v.position).distance(Vec2::new(10.0, 10.0));
            assert!(d > 3.999 && d < 5.001);
        }
    }

    #[test]
    fn test_rect_outline_inside_bounds() {
        let origin = Vec2::new(0.0, 0.0);
        let extent = Vec2::new(100.0, 50.0);
        let verts = rect_outline(origin, extent, 1.0, [0.0; 4]);
        assert_eq!(verts.len(), 24);
        for v in &verts {
            assert!(v.position[0] >= 0.0 && v.position[0] <= 100.0);
            assert!(v.position[1] >= 0.0 && v.position[1] <= 50.0);
        }
    }
}
