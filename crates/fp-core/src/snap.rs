//! Snapping search over a plan's vertices and boundary segments.
//!
//! Targets are collected once per query from every wall endpoint and room
//! vertex (plus the segments joining them), excluding the entity being
//! edited so a dragged point never snaps to itself.

use crate::geometry::{Vec2, distance, project_point_on_segment};
use crate::model::{EntityRef, Plan};

/// What a snapped point attached to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapKind {
    Vertex,
    Segment,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapHit {
    pub point: Vec2,
    pub distance: f64,
    pub kind: SnapKind,
}

/// Snap candidates gathered from a plan.
#[derive(Debug, Clone, Default)]
pub struct SnapTargets {
    pub vertices: Vec<Vec2>,
    pub segments: Vec<(Vec2, Vec2)>,
}

impl SnapTargets {
    /// Collect every wall endpoint, room vertex, wall segment and room edge
    /// (closing edge included), skipping `exclude`.
    pub fn collect(plan: &Plan, exclude: Option<EntityRef>) -> Self {
        let mut targets = Self::default();

        for wall in &plan.walls {
            if exclude == Some(EntityRef::wall(wall.id)) {
                continue;
            }
            targets.vertices.push(wall.a);
            targets.vertices.push(wall.b);
            targets.segments.push((wall.a, wall.b));
        }

        for room in &plan.rooms {
            if exclude == Some(EntityRef::room(room.id)) {
                continue;
            }
            let n = room.points.len();
            targets.vertices.extend_from_slice(&room.points);
            for i in 0..n {
                targets.segments.push((room.points[i], room.points[(i + 1) % n]));
            }
        }

        targets
    }

    /// Nearest target within `tolerance`. Vertices are examined first and a
    /// segment projection only wins when strictly closer.
    pub fn find(&self, p: Vec2, tolerance: f64) -> Option<SnapHit> {
        let mut best: Option<SnapHit> = None;

        for &v in &self.vertices {
            let d = distance(p, v);
            if d <= tolerance && best.is_none_or(|b| d < b.distance) {
                best = Some(SnapHit {
                    point: v,
                    distance: d,
                    kind: SnapKind::Vertex,
                });
            }
        }

        for &(a, b) in &self.segments {
            let proj = project_point_on_segment(p, a, b);
            if proj.distance <= tolerance && best.is_none_or(|h| proj.distance < h.distance) {
                best = Some(SnapHit {
                    point: proj.point,
                    distance: proj.distance,
                    kind: SnapKind::Segment,
                });
            }
        }

        best
    }

    /// `p` moved onto the nearest target, or `p` unchanged.
    pub fn snap(&self, p: Vec2, tolerance: f64) -> Vec2 {
        self.find(p, tolerance).map_or(p, |hit| hit.point)
    }

    /// Snap a rigid segment. Each endpoint gets its own correction (zero
    /// when nothing is in tolerance) and the smaller of the two moves both
    /// ends, so the segment only snaps when both ends have a target.
    pub fn snap_rigid(&self, a: Vec2, b: Vec2, tolerance: f64) -> (Vec2, Vec2) {
        let da = self.snap(a, tolerance) - a;
        let db = self.snap(b, tolerance) - b;
        let delta = if da.length() < db.length() { da } else { db };
        (a + delta, b + delta)
    }
}
