//! Pure 2D helpers used by the layout generator and the snap engine.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `self` along `angle` (radians, y axis pointing down).
    pub fn polar_offset(self, radius: f64, angle: f64) -> Self {
        Self::new(self.x + radius * angle.cos(), self.y + radius * angle.sin())
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance(self, other: Point) -> f64 {
        distance(self, other)
    }
}

pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Z component of `(b - a) x (c - a)`. Zero when the three points are collinear.
pub fn cross(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Point on the segment `a`-`b` that `p` maps to.
///
/// `p` is first clamped to the segment's bounding box. The coordinate along
/// the axis the segment spans more is kept and the other one is recovered
/// from the line equation, so the mapping runs parallel to an axis rather
/// than perpendicular to the segment. The only divisor is the larger span,
/// which keeps near-vertical and near-horizontal segments stable. A
/// zero-length segment yields `a`.
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    if dx == 0.0 && dy == 0.0 {
        return a;
    }

    let x = p.x.clamp(a.x.min(b.x), a.x.max(b.x));
    let y = p.y.clamp(a.y.min(b.y), a.y.max(b.y));

    if dx.abs() < dy.abs() {
        Point::new(a.x + (y - a.y) * dx / dy, y)
    } else {
        Point::new(x, a.y + (x - a.x) * dy / dx)
    }
}
