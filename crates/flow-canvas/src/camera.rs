/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Camera: the bidirectional mapping between pointer (screen)
//! coordinates and logical canvas (world) coordinates.
//!
//! Zoom is visual scaling of the whole canvas, never a rewrite of node
//! positions; pan is expressed in world units. The zoom factor is
//! clamped to [`ZOOM_MIN`, `ZOOM_MAX`] after every operation.

use euclid::default::{Point2D, Vector2D};
use serde::{Deserialize, Serialize};

pub const ZOOM_MIN: f32 = 0.5;
pub const ZOOM_MAX: f32 = 2.0;
pub const ZOOM_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Viewport state owned by the editor session; reset when the open
/// workflow changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    zoom: f32,
    pan: Vector2D<f32>,
    /// Screen position of the canvas rect's top-left corner.
    canvas_origin: Point2D<f32>,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            pan: Vector2D::zero(),
            canvas_origin: Point2D::origin(),
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Vector2D<f32> {
        self.pan
    }

    pub fn canvas_origin(&self) -> Point2D<f32> {
        self.canvas_origin
    }

    /// Record where the host UI placed the canvas rect on screen.
    pub fn set_canvas_origin(&mut self, origin: Point2D<f32>) {
        self.canvas_origin = origin;
    }

    /// Screen → world: `(screen - canvas_origin) / zoom - pan`.
    pub fn to_world(&self, screen: Point2D<f32>) -> Point2D<f32> {
        let v = (screen - self.canvas_origin) / self.zoom - self.pan;
        v.to_point()
    }

    /// World → screen: `(world + pan) * zoom + canvas_origin`.
    pub fn to_screen(&self, world: Point2D<f32>) -> Point2D<f32> {
        let v = (world.to_vector() + self.pan) * self.zoom;
        self.canvas_origin + v
    }

    /// Step the zoom by one fixed increment, clamped to the bounds.
    /// Returns the new factor.
    pub fn zoom_step(&mut self, direction: ZoomDirection) -> f32 {
        let delta = match direction {
            ZoomDirection::In => ZOOM_STEP,
            ZoomDirection::Out => -ZOOM_STEP,
        };
        self.set_zoom(self.zoom + delta)
    }

    /// Set the zoom factor, clamped to the bounds.
    pub fn set_zoom(&mut self, zoom: f32) -> f32 {
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        self.zoom
    }

    pub fn zoom_reset(&mut self) {
        self.zoom = 1.0;
    }

    pub fn set_pan(&mut self, pan: Vector2D<f32>) {
        self.pan = pan;
    }

    pub fn pan_by(&mut self, delta: Vector2D<f32>) {
        self.pan += delta;
    }

    /// Back to the identity view; the canvas origin is a host-layout
    /// fact and survives the reset.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Vector2D::zero();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
