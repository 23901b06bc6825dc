//! Geometry kernel
//!
//! Pure functions over point lists. Nothing in here touches editor state, so
//! every function can be called freely from previews, validation and tests.
//!
//! Point-in-polygon uses an exclusive boundary: a point lying exactly on an
//! edge or a vertex is reported as outside.

use crate::model::Point;
use serde::{Deserialize, Serialize};

/// Drag distances below this are treated as "no rounding".
pub const MIN_ARC_OFFSET: f64 = 1.0;

/// Tolerance used by the on-edge test of [`point_in_polygon`].
pub const BOUNDARY_EPSILON: f64 = 1e-9;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// The four corners, counter-clockwise from the minimum corner.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance_to(&b)
}

pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Unit vector perpendicular to the edge `a -> b` (edge direction rotated 90°).
///
/// Returns `None` for a zero-length edge.
pub fn perpendicular_direction(a: Point, b: Point) -> Option<Point> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length = (dx * dx + dy * dy).sqrt();
    if length <= f64::EPSILON {
        return None;
    }
    Some(Point::new(-dy / length, dx / length))
}

/// Signed shoelace area (positive for counter-clockwise winding).
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        sum += p.x * q.y - q.x * p.y;
    }
    sum / 2.0
}

/// Polygon area by the shoelace formula.
///
/// Only meaningful for closed shapes; callers guard with the closed flag.
pub fn polygon_area(points: &[Point]) -> f64 {
    signed_area(points).abs()
}

/// Sum of edge lengths, including the closing edge only when `closed`.
pub fn polygon_perimeter(points: &[Point], closed: bool) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let open: f64 = points.windows(2).map(|w| distance(w[0], w[1])).sum();
    if closed {
        open + distance(points[points.len() - 1], points[0])
    } else {
        open
    }
}

/// Check whether `p` lies on the segment `a-b` within `tolerance`.
pub fn point_on_segment(p: Point, a: Point, b: Point, tolerance: f64) -> bool {
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    let length = distance(a, b);
    if length <= f64::EPSILON {
        return distance(p, a) <= tolerance;
    }
    if cross.abs() / length > tolerance {
        return false;
    }
    let dot = (p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y);
    dot >= -tolerance * length && dot <= length * length + tolerance * length
}

/// Even-odd ray casting test with an exclusive boundary.
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    for i in 0..n {
        if point_on_segment(p, polygon[i], polygon[(i + 1) % n], BOUNDARY_EPSILON) {
            return false;
        }
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Fit a circular arc on the chord `p1-p2`.
///
/// `offset` is the signed drag distance measured along
/// [`perpendicular_direction`]`(p1, p2)`. The bulge (sagitta) is `|offset|`
/// clamped to `chord / 2 - 1` so the arc never reaches a semicircle. The
/// centre sits on the side given by the sign of `offset`, which puts the
/// arc's apex on the opposite side of the chord.
///
/// Returns `segments + 1` points starting at `p1` and ending at `p2`, or just
/// `[p1, p2]` when the offset (or the clamped bulge) is below one unit or
/// the offset is not finite.
pub fn arc_points(p1: Point, p2: Point, offset: f64, segments: usize) -> Vec<Point> {
    if !offset.is_finite() || offset.abs() < MIN_ARC_OFFSET || segments == 0 {
        return vec![p1, p2];
    }

    let chord = distance(p1, p2);
    let sagitta = offset.abs().min(chord / 2.0 - 1.0);
    if sagitta < MIN_ARC_OFFSET {
        return vec![p1, p2];
    }
    let Some(perp) = perpendicular_direction(p1, p2) else {
        return vec![p1, p2];
    };

    let radius = sagitta / 2.0 + (chord * chord) / (8.0 * sagitta);
    let side = offset.signum();
    let mid = midpoint(p1, p2);
    let center = Point::new(
        mid.x + perp.x * (radius - sagitta) * side,
        mid.y + perp.y * (radius - sagitta) * side,
    );

    let start = (p1.y - center.y).atan2(p1.x - center.x);
    let end = (p2.y - center.y).atan2(p2.x - center.x);
    let mut sweep = end - start;
    if sweep > std::f64::consts::PI {
        sweep -= 2.0 * std::f64::consts::PI;
    } else if sweep < -std::f64::consts::PI {
        sweep += 2.0 * std::f64::consts::PI;
    }

    let mut points = Vec::with_capacity(segments + 1);
    points.push(p1);
    for i in 1..segments {
        let angle = start + sweep * (i as f64 / segments as f64);
        points.push(Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        ));
    }
    points.push(p2);
    points
}

/// Bounding box of a point list, `None` when empty.
pub fn bounding_box(points: &[Point]) -> Option<BoundingBox> {
    let first = points.first()?;
    let init = BoundingBox {
        min_x: first.x,
        min_y: first.y,
        max_x: first.x,
        max_y: first.y,
    };
    Some(points.iter().skip(1).fold(init, |bb, p| BoundingBox {
        min_x: bb.min_x.min(p.x),
        min_y: bb.min_y.min(p.y),
        max_x: bb.max_x.max(p.x),
        max_y: bb.max_y.max(p.y),
    }))
}

/// Vertex average; the centroid of a regular polygon.
pub fn vertex_centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

/// Snap each axis independently to the nearest multiple of `step`.
pub fn snap_to_grid(p: Point, step: f64) -> Point {
    if step <= 0.0 || !step.is_finite() {
        return p;
    }
    Point::new((p.x / step).round() * step, (p.y / step).round() * step)
}

/// Edge direction in degrees, measured from the positive x axis.
pub fn edge_angle_degrees(a: Point, b: Point) -> f64 {
    (b.y - a.y).atan2(b.x - a.x).to_degrees()
}
