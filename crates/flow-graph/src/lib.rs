/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Workflow graph kernel for Flowdeck.
//!
//! Core structures:
//! - `Workflow`: the authoritative automation graph backed by
//!   petgraph::StableGraph, with uuid-indexed nodes and edges
//! - `catalog`: the static node-type registry (triggers, actions,
//!   conditions) and their configuration-field schemas
//! - `snapshot`: serializable mirror types for the persisted workflow
//!   record, plus the JSON codec
//!
//! Boundary: all topology mutation goes through `Workflow`'s operations.
//! Each either succeeds or fails with a `GraphError` without touching
//! anything.

pub mod catalog;
pub mod graph;
pub mod snapshot;

pub use graph::{
    Edge, EdgeAttrs, EdgeKind, EdgeView, GraphError, Node, NodeCategory, NodeData, Workflow,
    WorkflowStatus,
};
