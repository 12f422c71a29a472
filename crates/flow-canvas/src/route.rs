/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Edge routing between node cards.
//!
//! Nodes render as fixed-size cards positioned by their top-left
//! corner. An edge leaves the source card's right-center anchor and
//! enters the target card's left-center anchor along a cubic whose
//! control points sit at the horizontal midpoint, each keeping its own
//! endpoint's y — the curve stays smooth under any vertical offset
//! between source and target.

use euclid::default::Point2D;

pub const NODE_WIDTH: f32 = 180.0;
pub const NODE_HEIGHT: f32 = 72.0;

/// Vertical lift applied to the label anchor so text clears the stroke.
pub const LABEL_CLEARANCE: f32 = 12.0;

/// Segment count used when flattening a cubic for distance queries.
const FLATTEN_STEPS: usize = 24;

/// A routed cubic edge in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicPath {
    pub from: Point2D<f32>,
    pub c1: Point2D<f32>,
    pub c2: Point2D<f32>,
    pub to: Point2D<f32>,
}

/// Right-center anchor of a card: where outgoing edges leave.
pub fn source_anchor(node_pos: Point2D<f32>) -> Point2D<f32> {
    Point2D::new(node_pos.x + NODE_WIDTH, node_pos.y + NODE_HEIGHT / 2.0)
}

/// Left-center anchor of a card: where incoming edges enter.
pub fn target_anchor(node_pos: Point2D<f32>) -> Point2D<f32> {
    Point2D::new(node_pos.x, node_pos.y + NODE_HEIGHT / 2.0)
}

/// Route an edge between two cards given their top-left positions.
pub fn route_edge(source_pos: Point2D<f32>, target_pos: Point2D<f32>) -> CubicPath {
    route_between(source_anchor(source_pos), target_anchor(target_pos))
}

/// Route between two explicit anchor points. The edge-creation preview
/// uses this with the pointer's world position as the free endpoint.
pub fn route_between(from: Point2D<f32>, to: Point2D<f32>) -> CubicPath {
    let mid_x = (from.x + to.x) / 2.0;
    CubicPath {
        from,
        c1: Point2D::new(mid_x, from.y),
        c2: Point2D::new(mid_x, to.y),
        to,
    }
}

impl CubicPath {
    /// Point on the curve at parameter `t` in [0, 1] (De Casteljau).
    pub fn point_at(&self, t: f32) -> Point2D<f32> {
        let a = self.from.lerp(self.c1, t);
        let b = self.c1.lerp(self.c2, t);
        let c = self.c2.lerp(self.to, t);
        let ab = a.lerp(b, t);
        let bc = b.lerp(c, t);
        ab.lerp(bc, t)
    }

    /// Anchor for the edge label: curve midpoint, lifted clear of the
    /// stroke.
    pub fn label_anchor(&self) -> Point2D<f32> {
        let mid = self.point_at(0.5);
        Point2D::new(mid.x, mid.y - LABEL_CLEARANCE)
    }

    /// Approximate distance from a point to the curve, via polyline
    /// flattening. Used for edge hit testing.
    pub fn distance_to(&self, point: Point2D<f32>) -> f32 {
        let mut best = f32::INFINITY;
        let mut prev = self.from;
        for step in 1..=FLATTEN_STEPS {
            let t = step as f32 / FLATTEN_STEPS as f32;
            let next = self.point_at(t);
            best = best.min(segment_distance(prev, next, point));
            prev = next;
        }
        best
    }
}

fn segment_distance(a: Point2D<f32>, b: Point2D<f32>, p: Point2D<f32>) -> f32 {
    let ab = b - a;
    let len_sq = ab.square_length();
    if len_sq <= f32::EPSILON {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;
    (p - closest).length()
}
