/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Workflow graph model.
//!
//! Core structures:
//! - `Workflow`: automation graph container backed by petgraph::StableGraph
//! - `Node`: one step (trigger/action/condition) with a canvas position
//! - `Edge`: directed, optionally labeled connection between steps
//!
//! Boundary: every mutation either succeeds and leaves all invariants
//! holding, or fails with a `GraphError` and mutates nothing:
//! 1. edge endpoints always reference present nodes
//! 2. no edge targets a trigger node
//! 3. no two edges share an ordered (source, target) pair
//! 4. node and edge ids are unique within the workflow

use euclid::default::Point2D;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::{Directed, Direction};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::catalog::{self, IconId, NodeTypeDefinition};

/// Stable node handle (petgraph NodeIndex — survives other deletions)
pub type NodeKey = NodeIndex;

/// Stable edge handle (petgraph EdgeIndex)
pub type EdgeKey = EdgeIndex;

/// Seed position for the trigger node of a freshly created workflow.
pub const TRIGGER_SEED_POSITION: (f32, f32) = (100.0, 100.0);

/// Node category; triggers start a workflow and accept no incoming edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCategory {
    Trigger,
    Action,
    Condition,
}

/// Workflow publication status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowStatus {
    #[default]
    Draft,
    Active,
    Paused,
    Archived,
}

/// Rendering style of an edge; carries no graph semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeKind {
    #[default]
    Standard,
    Success,
    Failure,
}

/// Display payload of a node. `config` is shaped by the catalog schema
/// of the node's concrete type and written by the external config form.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub label: String,
    pub description: Option<String>,
    pub icon: IconId,
    pub config: Map<String, Value>,
}

/// A step in a workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Stable node identity.
    pub id: Uuid,

    /// Catalog identifier of the concrete type (e.g. "send_email").
    pub type_id: String,

    pub category: NodeCategory,

    /// Position in logical canvas units (card top-left corner).
    pub position: Point2D<f32>,

    pub data: NodeData,
}

/// A directed connection between two steps. Endpoints live in the
/// graph topology; the payload carries identity and rendering attrs.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Stable edge identity, independent of its endpoints.
    pub id: Uuid,

    pub label: Option<String>,
    pub kind: EdgeKind,
    pub animated: bool,
}

/// Attributes for a new edge.
#[derive(Debug, Clone, Default)]
pub struct EdgeAttrs {
    pub label: Option<String>,
    pub kind: EdgeKind,
    pub animated: bool,
}

/// Read-only view of an edge with resolved endpoint ids.
#[derive(Debug, Clone, Copy)]
pub struct EdgeView<'a> {
    pub id: Uuid,
    pub source: Uuid,
    pub target: Uuid,
    pub edge: &'a Edge,
}

/// Errors from workflow graph operations.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    NodeNotFound(Uuid),
    EdgeNotFound(Uuid),
    DuplicateEdge { source: Uuid, target: Uuid },
    TriggerTarget(Uuid),
    SelfEdge(Uuid),
    UnknownType(String),
    MissingConfigField { type_id: String, key: String },
    Snapshot(String),
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::NodeNotFound(id) => write!(f, "node {id} not found"),
            GraphError::EdgeNotFound(id) => write!(f, "edge {id} not found"),
            GraphError::DuplicateEdge { source, target } => {
                write!(f, "an edge from {source} to {target} already exists")
            }
            GraphError::TriggerTarget(id) => {
                write!(f, "trigger node {id} cannot receive incoming edges")
            }
            GraphError::SelfEdge(id) => write!(f, "node {id} cannot connect to itself"),
            GraphError::UnknownType(type_id) => write!(f, "unknown node type '{type_id}'"),
            GraphError::MissingConfigField { type_id, key } => {
                write!(f, "node type '{type_id}' requires config field '{key}'")
            }
            GraphError::Snapshot(msg) => write!(f, "invalid workflow snapshot: {msg}"),
        }
    }
}

pub(crate) fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// The authoritative in-memory workflow graph.
#[derive(Clone)]
pub struct Workflow {
    /// Stable workflow identity.
    pub id: Uuid,

    pub name: String,
    pub description: String,
    pub status: WorkflowStatus,

    /// Catalog identifier of the trigger type this workflow starts from.
    pub trigger_type: String,

    /// Trigger-level configuration (mirrors the trigger node's schema).
    pub trigger_config: Map<String, Value>,

    /// The underlying petgraph stable graph.
    pub(crate) inner: StableGraph<Node, Edge, Directed>,

    /// Stable UUID to node mapping.
    id_to_node: HashMap<Uuid, NodeKey>,

    /// Stable UUID to edge mapping.
    id_to_edge: HashMap<Uuid, EdgeKey>,

    /// Creation timestamp, epoch seconds.
    pub created_at: u64,

    /// Last-mutation timestamp, epoch seconds.
    pub updated_at: u64,
}

impl Workflow {
    /// Create a workflow seeded with one trigger node of the given type.
    pub fn new(name: impl Into<String>, trigger: &NodeTypeDefinition) -> Self {
        let now = now_secs();
        let mut workflow = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            status: WorkflowStatus::Draft,
            trigger_type: trigger.type_id.to_string(),
            trigger_config: Map::new(),
            inner: StableGraph::new(),
            id_to_node: HashMap::new(),
            id_to_edge: HashMap::new(),
            created_at: now,
            updated_at: now,
        };
        let (x, y) = TRIGGER_SEED_POSITION;
        workflow.add_node(trigger, trigger.name, Point2D::new(x, y));
        workflow
    }

    /// Rebuild-path constructor: an empty shell with no trigger node,
    /// used by snapshot restore which replays persisted nodes itself.
    pub(crate) fn empty(id: Uuid, name: String, trigger_type: String) -> Self {
        let now = now_secs();
        Self {
            id,
            name,
            description: String::new(),
            status: WorkflowStatus::Draft,
            trigger_type,
            trigger_config: Map::new(),
            inner: StableGraph::new(),
            id_to_node: HashMap::new(),
            id_to_edge: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a node of a catalog type. Always succeeds; assigns a fresh id.
    pub fn add_node(
        &mut self,
        def: &NodeTypeDefinition,
        label: impl Into<String>,
        position: Point2D<f32>,
    ) -> Uuid {
        self.add_node_with_id(
            Uuid::new_v4(),
            def.type_id.to_string(),
            def.category,
            position,
            NodeData {
                label: label.into(),
                description: None,
                icon: def.icon,
                config: Map::new(),
            },
        )
    }

    /// Add a node with pre-existing identity and payload (snapshot replay).
    pub(crate) fn add_node_with_id(
        &mut self,
        id: Uuid,
        type_id: String,
        category: NodeCategory,
        position: Point2D<f32>,
        data: NodeData,
    ) -> Uuid {
        let key = self.inner.add_node(Node {
            id,
            type_id,
            category,
            position,
            data,
        });
        self.id_to_node.insert(id, key);
        self.touch();
        id
    }

    /// Remove a node and every edge whose source or target it is.
    pub fn remove_node(&mut self, id: Uuid) -> Result<Node, GraphError> {
        let key = self.node_key(id)?;
        let incident: Vec<Uuid> = self
            .inner
            .edges_directed(key, Direction::Outgoing)
            .chain(self.inner.edges_directed(key, Direction::Incoming))
            .map(|edge| edge.weight().id)
            .collect();
        for edge_id in incident {
            self.id_to_edge.remove(&edge_id);
        }
        let Some(node) = self.inner.remove_node(key) else {
            return Err(GraphError::NodeNotFound(id));
        };
        self.id_to_node.remove(&id);
        self.touch();
        Ok(node)
    }

    /// Replace a node's canvas position. Idempotent for equal positions.
    pub fn update_node_position(
        &mut self,
        id: Uuid,
        position: Point2D<f32>,
    ) -> Result<(), GraphError> {
        let key = self.node_key(id)?;
        let Some(node) = self.inner.node_weight_mut(key) else {
            return Err(GraphError::NodeNotFound(id));
        };
        if node.position != position {
            node.position = position;
            self.touch();
        }
        Ok(())
    }

    /// Replace a node's display label.
    pub fn update_node_label(&mut self, id: Uuid, label: impl Into<String>) -> Result<(), GraphError> {
        let key = self.node_key(id)?;
        let Some(node) = self.inner.node_weight_mut(key) else {
            return Err(GraphError::NodeNotFound(id));
        };
        node.data.label = label.into();
        self.touch();
        Ok(())
    }

    /// Replace a node's config map, validating required fields against
    /// the catalog schema for its type (when the type is still known).
    pub fn update_node_config(
        &mut self,
        id: Uuid,
        config: Map<String, Value>,
    ) -> Result<(), GraphError> {
        let key = self.node_key(id)?;
        let type_id = match self.inner.node_weight(key) {
            Some(node) => node.type_id.clone(),
            None => return Err(GraphError::NodeNotFound(id)),
        };
        if let Some(def) = catalog::definition(&type_id) {
            catalog::validate_config(def, &config)?;
        }
        if let Some(node) = self.inner.node_weight_mut(key) {
            node.data.config = config;
            self.touch();
        }
        Ok(())
    }

    /// Connect two nodes. Fails without mutating on a missing endpoint,
    /// a trigger target, a self-edge, or a duplicate ordered pair.
    pub fn add_edge(
        &mut self,
        source: Uuid,
        target: Uuid,
        attrs: EdgeAttrs,
    ) -> Result<Uuid, GraphError> {
        self.add_edge_with_id(Uuid::new_v4(), source, target, attrs)
    }

    /// Connect with pre-existing identity (snapshot replay). Same
    /// validation as `add_edge`.
    pub(crate) fn add_edge_with_id(
        &mut self,
        id: Uuid,
        source: Uuid,
        target: Uuid,
        attrs: EdgeAttrs,
    ) -> Result<Uuid, GraphError> {
        if source == target {
            return Err(GraphError::SelfEdge(source));
        }
        let source_key = self.node_key(source)?;
        let target_key = self.node_key(target)?;
        if let Some(node) = self.inner.node_weight(target_key)
            && node.category == NodeCategory::Trigger
        {
            return Err(GraphError::TriggerTarget(target));
        }
        if self.inner.find_edge(source_key, target_key).is_some() {
            return Err(GraphError::DuplicateEdge { source, target });
        }
        let key = self.inner.add_edge(
            source_key,
            target_key,
            Edge {
                id,
                label: attrs.label,
                kind: attrs.kind,
                animated: attrs.animated,
            },
        );
        self.id_to_edge.insert(id, key);
        self.touch();
        Ok(id)
    }

    /// Remove an edge by id.
    pub fn remove_edge(&mut self, id: Uuid) -> Result<Edge, GraphError> {
        let Some(key) = self.id_to_edge.remove(&id) else {
            return Err(GraphError::EdgeNotFound(id));
        };
        let Some(edge) = self.inner.remove_edge(key) else {
            return Err(GraphError::EdgeNotFound(id));
        };
        self.touch();
        Ok(edge)
    }

    /// Get a node by id.
    pub fn node(&self, id: Uuid) -> Option<&Node> {
        let key = *self.id_to_node.get(&id)?;
        self.inner.node_weight(key)
    }

    /// True when the node id is present.
    pub fn contains_node(&self, id: Uuid) -> bool {
        self.id_to_node.contains_key(&id)
    }

    /// Get an edge view by id.
    pub fn edge(&self, id: Uuid) -> Option<EdgeView<'_>> {
        let key = *self.id_to_edge.get(&id)?;
        let (source_key, target_key) = self.inner.edge_endpoints(key)?;
        let edge = self.inner.edge_weight(key)?;
        Some(EdgeView {
            id,
            source: self.inner.node_weight(source_key)?.id,
            target: self.inner.node_weight(target_key)?.id,
            edge,
        })
    }

    /// True when the edge id is present.
    pub fn contains_edge(&self, id: Uuid) -> bool {
        self.id_to_edge.contains_key(&id)
    }

    /// Iterate over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.inner.node_indices().map(|idx| &self.inner[idx])
    }

    /// Iterate over all edges as views with resolved endpoint ids.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> {
        self.inner.edge_references().filter_map(|edge| {
            Some(EdgeView {
                id: edge.weight().id,
                source: self.inner.node_weight(edge.source())?.id,
                target: self.inner.node_weight(edge.target())?.id,
                edge: edge.weight(),
            })
        })
    }

    /// True when a directed edge from `source` to `target` exists.
    pub fn has_edge_between(&self, source: Uuid, target: Uuid) -> bool {
        let (Some(&source_key), Some(&target_key)) =
            (self.id_to_node.get(&source), self.id_to_node.get(&target))
        else {
            return false;
        };
        self.inner.find_edge(source_key, target_key).is_some()
    }

    /// Ids of nodes reachable over one outgoing edge.
    pub fn outgoing(&self, id: Uuid) -> Vec<Uuid> {
        let Some(&key) = self.id_to_node.get(&id) else {
            return Vec::new();
        };
        self.inner
            .neighbors_directed(key, Direction::Outgoing)
            .filter_map(|idx| self.inner.node_weight(idx).map(|n| n.id))
            .collect()
    }

    /// Ids of nodes with an edge into this node.
    pub fn incoming(&self, id: Uuid) -> Vec<Uuid> {
        let Some(&key) = self.id_to_node.get(&id) else {
            return Vec::new();
        };
        self.inner
            .neighbors_directed(key, Direction::Incoming)
            .filter_map(|idx| self.inner.node_weight(idx).map(|n| n.id))
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Rename the workflow.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    pub fn set_status(&mut self, status: WorkflowStatus) {
        self.status = status;
        self.touch();
    }

    pub fn set_trigger_config(&mut self, config: Map<String, Value>) {
        self.trigger_config = config;
        self.touch();
    }

    fn node_key(&self, id: Uuid) -> Result<NodeKey, GraphError> {
        self.id_to_node
            .get(&id)
            .copied()
            .ok_or(GraphError::NodeNotFound(id))
    }

    fn touch(&mut self) {
        self.updated_at = now_secs();
    }
}
