//! Rectangle and point math shared by the layout, containment and hit-testing code
//!
//! Everything here is a pure function over `egui`'s math types. Rectangles are
//! treated as closed: a rectangle touching the edge of another still counts as
//! contained.

use egui::{Pos2, Rect, Vec2};

/// Returns true if `inner` lies completely inside `outer` (edges inclusive).
pub fn encloses(outer: Rect, inner: Rect) -> bool {
    inner.min.x >= outer.min.x
        && inner.min.y >= outer.min.y
        && inner.max.x <= outer.max.x
        && inner.max.y <= outer.max.y
}

/// Area of a rectangle, zero for degenerate ones
pub fn area(rect: Rect) -> f32 {
    rect.width().max(0.0) * rect.height().max(0.0)
}

/// Shrinks `rect` by `top` on the top edge and `side` on the other three.
pub fn inset(rect: Rect, side: f32, top: f32) -> Rect {
    Rect::from_min_max(
        Pos2::new(rect.min.x + side, rect.min.y + top),
        Pos2::new(rect.max.x - side, rect.max.y - side),
    )
}

/// Clamps `value` into `[lo, hi]`, pinning to `lo` when the interval is empty.
pub fn clamp_or_pin(value: f32, lo: f32, hi: f32) -> f32 {
    if hi < lo {
        lo
    } else {
        value.clamp(lo, hi)
    }
}

/// Returns the top-left position that keeps a box of `size` inside `bounds`,
/// moving it as little as possible from `min`.
///
/// On an axis where the box is larger than `bounds` it is pinned to the
/// bounds' minimum corner.
pub fn clamp_position(min: Pos2, size: Vec2, bounds: Rect) -> Pos2 {
    Pos2::new(
        clamp_or_pin(min.x, bounds.min.x, bounds.max.x - size.x),
        clamp_or_pin(min.y, bounds.min.y, bounds.max.y - size.y),
    )
}

/// Evenly spaces `count` points along a span of `extent`, keeping `margin`
/// free at both ends. The first and last points sit exactly on the margins;
/// a single point is centred on the span.
pub fn distribute_linear(count: usize, extent: f32, margin: f32) -> Vec<f32> {
    if count == 1 {
        return vec![extent / 2.0];
    }
    let usable = extent - 2.0 * margin;
    let spacing = usable / (count.saturating_sub(1).max(1)) as f32;
    (0..count).map(|i| margin + i as f32 * spacing).collect()
}

/// Angles in degrees for `count` rays spaced `step` apart and centred on 0°.
pub fn fan_angles(count: usize, step: f32) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    let start = -((count - 1) as f32 * step) / 2.0;
    (0..count).map(|i| start + i as f32 * step).collect()
}

/// Offset at `radius` along the direction `degrees` (0° points right, y grows down).
pub fn polar(radius: f32, degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radius * radians.cos(), radius * radians.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_min_size(Pos2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_encloses_is_edge_inclusive() {
        let outer = rect(0.0, 0.0, 100.0, 100.0);
        assert!(encloses(outer, outer));
        assert!(encloses(outer, rect(10.0, 10.0, 20.0, 20.0)));
        assert!(!encloses(outer, rect(90.0, 10.0, 20.0, 20.0)));
        assert!(!encloses(rect(10.0, 10.0, 20.0, 20.0), outer));
    }

    #[test]
    fn test_inset_uses_larger_top() {
        let interior = inset(rect(100.0, 100.0, 400.0, 300.0), 10.0, 40.0);
        assert_eq!(interior.min, Pos2::new(110.0, 140.0));
        assert_eq!(interior.max, Pos2::new(490.0, 390.0));
    }

    #[test]
    fn test_clamp_position_pins_oversized_box() {
        let bounds = rect(0.0, 0.0, 100.0, 100.0);
        let clamped = clamp_position(Pos2::new(50.0, -20.0), Vec2::new(150.0, 20.0), bounds);
        assert_eq!(clamped, Pos2::new(0.0, 0.0));

        let clamped = clamp_position(Pos2::new(95.0, 95.0), Vec2::new(10.0, 10.0), bounds);
        assert_eq!(clamped, Pos2::new(90.0, 90.0));
    }

    #[test]
    fn test_distribute_linear_includes_endpoints() {
        assert_eq!(distribute_linear(3, 350.0, 20.0), vec![20.0, 175.0, 330.0]);
        assert_eq!(distribute_linear(1, 350.0, 20.0), vec![175.0]);
        assert!(distribute_linear(0, 350.0, 20.0).is_empty());
    }

    #[test]
    fn test_fan_angles_are_centred() {
        assert_eq!(fan_angles(3, 20.0), vec![-20.0, 0.0, 20.0]);
        assert_eq!(fan_angles(2, 20.0), vec![-10.0, 10.0]);
        assert_eq!(fan_angles(1, 20.0), vec![0.0]);
    }

    #[test]
    fn test_polar_points_right_at_zero() {
        let v = polar(80.0, 0.0);
        assert!((v.x - 80.0).abs() < 1e-4);
        assert!(v.y.abs() < 1e-4);
        let v = polar(80.0, 90.0);
        assert!(v.x.abs() < 1e-3);
        assert!((v.y - 80.0).abs() < 1e-3);
    }
}
