//! Geometry kernel: pure 2D math over world coordinates (centimeters).
//!
//! Nothing here holds state. Snapping, hit testing, and the interaction
//! layer are all built from these primitives.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

// ─── Vec2 ────────────────────────────────────────────────────────────────

/// A point or displacement in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    #[serde(serialize_with = "crate::io::serialize_number")]
    pub x: f64,
    #[serde(serialize_with = "crate::io::serialize_number")]
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

// ─── Distances & projection ──────────────────────────────────────────────

/// Euclidean distance between two points.
pub fn distance(a: Vec2, b: Vec2) -> f64 {
    (a - b).length()
}

/// Result of projecting a point onto a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Closest point on the segment.
    pub point: Vec2,
    /// Parameter along `a → b`, clamped to `[0, 1]`.
    pub t: f64,
    /// Distance from the query point to `point`.
    pub distance: f64,
}

fn clamped_t(p: Vec2, a: Vec2, b: Vec2) -> f64 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 > 0.0 {
        ((p - a).dot(ab) / len2).clamp(0.0, 1.0)
    } else {
        // Degenerate segment: behaves like the single point `a`.
        0.0
    }
}

/// Orthogonal projection of `p` onto segment `a → b`, clamped to the segment.
pub fn project_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Projection {
    let t = clamped_t(p, a, b);
    let point = a + (b - a) * t;
    Projection {
        point,
        t,
        distance: distance(p, point),
    }
}

/// Whether `p` lies within `tolerance` of segment `a → b`.
/// Compares squared distances, so no square root is taken.
pub fn hit_test_segment(p: Vec2, a: Vec2, b: Vec2, tolerance: f64) -> bool {
    let t = clamped_t(p, a, b);
    let closest = a + (b - a) * t;
    (p - closest).length_squared() <= tolerance * tolerance
}

/// Even-odd ray casting. Edges are tested with a strict `>` on y, so a
/// point level with a horizontal edge consistently counts as outside.
pub fn point_in_polygon(p: Vec2, points: &[Vec2]) -> bool {
    let n = points.len();
    if n == 0 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > p.y) != (pj.y > p.y) && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

// ─── Centroids & rotation ────────────────────────────────────────────────

pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Arithmetic mean of the vertices (not the area centroid).
pub fn centroid(points: &[Vec2]) -> Option<Vec2> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + *p);
    Some(Vec2::new(sum.x / n, sum.y / n))
}

/// Rotate `p` about `center` by `angle` radians (counter-clockwise in a
/// y-up frame, clockwise on screen).
pub fn rotate_about(p: Vec2, center: Vec2, angle: f64) -> Vec2 {
    let (s, c) = angle.sin_cos();
    let d = p - center;
    Vec2::new(center.x + d.x * c - d.y * s, center.y + d.x * s + d.y * c)
}

// ─── Bounds ──────────────────────────────────────────────────────────────

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Normalized box spanned by two opposite corners (e.g. a drag).
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Tight box around a point set. `None` when empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::from_corners(first, first), |b, p| Self {
            min: Vec2::new(b.min.x.min(p.x), b.min.y.min(p.y)),
            max: Vec2::new(b.max.x.max(p.x), b.max.y.max(p.y)),
        }))
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Inclusive containment of another box.
    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }

    /// The four corners, clockwise on screen starting at `min`.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }
}
