/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Framework-agnostic canvas geometry for the Flowdeck editor.
//!
//! Pure math, no graph model and no UI toolkit:
//! - `camera`: screen ↔ world projection under zoom and pan
//! - `route`: cubic edge paths and label anchors between node cards
//! - `hit`: point-in-card, connector-handle, and edge-proximity tests

pub mod camera;
pub mod hit;
pub mod route;

pub use camera::{Camera, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP, ZoomDirection};
pub use hit::{CONNECTOR_RADIUS, EDGE_HIT_TOLERANCE, NodeHit};
pub use route::{CubicPath, NODE_HEIGHT, NODE_WIDTH};
