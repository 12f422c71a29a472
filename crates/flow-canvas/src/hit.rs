/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Hit testing in world coordinates.
//!
//! Callers pass node entries in stacking order (bottom first); the
//! scan runs topmost-first so overlapping cards resolve the way they
//! render. The connector handle wins over the card body it overlaps.

use euclid::default::Point2D;

use crate::route::{CubicPath, NODE_HEIGHT, NODE_WIDTH, source_anchor};

/// Radius of the connect-affordance disc on the right-center anchor.
pub const CONNECTOR_RADIUS: f32 = 9.0;

/// Maximum distance at which a pointer still hits a routed edge.
pub const EDGE_HIT_TOLERANCE: f32 = 6.0;

/// What a pointer position resolves to on a node card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeHit<I> {
    /// The connect affordance (edge creation starts here).
    Connector(I),
    /// The card body (drag starts here).
    Body(I),
}

/// True when the point lies inside the card rect.
pub fn node_body_contains(node_pos: Point2D<f32>, point: Point2D<f32>) -> bool {
    point.x >= node_pos.x
        && point.x <= node_pos.x + NODE_WIDTH
        && point.y >= node_pos.y
        && point.y <= node_pos.y + NODE_HEIGHT
}

/// True when the point lies on the connector handle disc.
pub fn connector_contains(node_pos: Point2D<f32>, point: Point2D<f32>) -> bool {
    (point - source_anchor(node_pos)).length() <= CONNECTOR_RADIUS
}

/// Resolve a pointer position against node cards, topmost-first.
pub fn hit_test_nodes<I: Copy>(
    nodes: &[(I, Point2D<f32>)],
    point: Point2D<f32>,
) -> Option<NodeHit<I>> {
    for (id, pos) in nodes.iter().rev() {
        if connector_contains(*pos, point) {
            return Some(NodeHit::Connector(*id));
        }
        if node_body_contains(*pos, point) {
            return Some(NodeHit::Body(*id));
        }
    }
    None
}

/// Resolve a pointer position against routed edges, topmost-first.
pub fn hit_test_edges<I: Copy>(edges: &[(I, CubicPath)], point: Point2D<f32>) -> Option<I> {
    edges
        .iter()
        .rev()
        .find(|(_, path)| path.distance_to(point) <= EDGE_HIT_TOLERANCE)
        .map(|(id, _)| *id)
}
