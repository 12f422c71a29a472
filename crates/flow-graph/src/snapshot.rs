/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Serializable mirror types for the persisted workflow record.
//!
//! The JSON shape here is the contract with the external store:
//! node `type` carries the category, the concrete subtype id rides in
//! `data.type_id` so the config form can re-resolve its field schema.
//! Restore replays every node and edge through the kernel operations,
//! so a snapshot that violates the structural invariants fails to load
//! instead of silently losing entries.

use euclid::default::Point2D;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::catalog::IconId;
use crate::graph::{
    EdgeAttrs, EdgeKind, GraphError, NodeCategory, NodeData, Workflow, WorkflowStatus,
};

/// Workflow status for persistence (mirrors `WorkflowStatus`).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PersistedStatus {
    Draft,
    Active,
    Paused,
    Archived,
}

/// Node category for persistence (mirrors `NodeCategory`).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PersistedCategory {
    Trigger,
    Action,
    Condition,
}

/// Edge rendering kind for persistence (mirrors `EdgeKind`).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PersistedEdgeKind {
    Standard,
    Success,
    Failure,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PersistedPosition {
    pub x: f32,
    pub y: f32,
}

/// Persisted node display payload.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PersistedNodeData {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Concrete catalog subtype id ("send_email", "wait", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
}

/// Persisted node.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PersistedNode {
    /// Stable node identity.
    pub id: String,
    #[serde(rename = "type")]
    pub category: PersistedCategory,
    pub position: PersistedPosition,
    pub data: PersistedNodeData,
}

/// Persisted edge.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PersistedEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PersistedEdgeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
}

/// Full persisted workflow record.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PersistedWorkflow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: PersistedStatus,
    pub trigger_type: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub trigger_config: Map<String, Value>,
    pub nodes: Vec<PersistedNode>,
    pub edges: Vec<PersistedEdge>,
    pub created_at: u64,
    pub updated_at: u64,
}

impl PersistedWorkflow {
    pub fn to_json(&self) -> Result<String, GraphError> {
        serde_json::to_string_pretty(self).map_err(|e| GraphError::Snapshot(e.to_string()))
    }

    pub fn from_json(raw: &str) -> Result<Self, GraphError> {
        serde_json::from_str(raw).map_err(|e| GraphError::Snapshot(e.to_string()))
    }
}

fn parse_uuid(raw: &str, what: &str) -> Result<Uuid, GraphError> {
    Uuid::parse_str(raw).map_err(|_| GraphError::Snapshot(format!("{what} id '{raw}' is not a uuid")))
}

impl Workflow {
    /// Serialize the workflow to its persisted record.
    pub fn to_snapshot(&self) -> PersistedWorkflow {
        let nodes = self
            .nodes()
            .map(|node| PersistedNode {
                id: node.id.to_string(),
                category: match node.category {
                    NodeCategory::Trigger => PersistedCategory::Trigger,
                    NodeCategory::Action => PersistedCategory::Action,
                    NodeCategory::Condition => PersistedCategory::Condition,
                },
                position: PersistedPosition {
                    x: node.position.x,
                    y: node.position.y,
                },
                data: PersistedNodeData {
                    label: node.data.label.clone(),
                    description: node.data.description.clone(),
                    icon: Some(node.data.icon.as_str().to_string()),
                    type_id: Some(node.type_id.clone()),
                    config: if node.data.config.is_empty() {
                        None
                    } else {
                        Some(node.data.config.clone())
                    },
                },
            })
            .collect();

        let edges = self
            .edges()
            .map(|edge| PersistedEdge {
                id: edge.id.to_string(),
                source: edge.source.to_string(),
                target: edge.target.to_string(),
                label: edge.edge.label.clone(),
                kind: match edge.edge.kind {
                    EdgeKind::Standard => None,
                    EdgeKind::Success => Some(PersistedEdgeKind::Success),
                    EdgeKind::Failure => Some(PersistedEdgeKind::Failure),
                },
                animated: edge.edge.animated.then_some(true),
            })
            .collect();

        PersistedWorkflow {
            id: self.id.to_string(),
            name: self.name.clone(),
            description: self.description.clone(),
            status: match self.status {
                WorkflowStatus::Draft => PersistedStatus::Draft,
                WorkflowStatus::Active => PersistedStatus::Active,
                WorkflowStatus::Paused => PersistedStatus::Paused,
                WorkflowStatus::Archived => PersistedStatus::Archived,
            },
            trigger_type: self.trigger_type.clone(),
            trigger_config: self.trigger_config.clone(),
            nodes,
            edges,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Rebuild a workflow from its persisted record.
    ///
    /// Every edge replays through the kernel's validation; any entry
    /// that would break an invariant fails the whole load.
    pub fn from_snapshot(snapshot: &PersistedWorkflow) -> Result<Self, GraphError> {
        let id = parse_uuid(&snapshot.id, "workflow")?;
        let mut workflow = Workflow::empty(id, snapshot.name.clone(), snapshot.trigger_type.clone());
        workflow.description = snapshot.description.clone();
        workflow.status = match snapshot.status {
            PersistedStatus::Draft => WorkflowStatus::Draft,
            PersistedStatus::Active => WorkflowStatus::Active,
            PersistedStatus::Paused => WorkflowStatus::Paused,
            PersistedStatus::Archived => WorkflowStatus::Archived,
        };
        workflow.trigger_config = snapshot.trigger_config.clone();

        for pnode in &snapshot.nodes {
            let node_id = parse_uuid(&pnode.id, "node")?;
            if workflow.contains_node(node_id) {
                return Err(GraphError::Snapshot(format!(
                    "duplicate node id {node_id}"
                )));
            }
            let category = match pnode.category {
                PersistedCategory::Trigger => NodeCategory::Trigger,
                PersistedCategory::Action => NodeCategory::Action,
                PersistedCategory::Condition => NodeCategory::Condition,
            };
            let icon = pnode
                .data
                .icon
                .as_deref()
                .and_then(IconId::from_name)
                .unwrap_or_else(|| IconId::fallback(category));
            workflow.add_node_with_id(
                node_id,
                pnode.data.type_id.clone().unwrap_or_default(),
                category,
                Point2D::new(pnode.position.x, pnode.position.y),
                NodeData {
                    label: pnode.data.label.clone(),
                    description: pnode.data.description.clone(),
                    icon,
                    config: pnode.data.config.clone().unwrap_or_default(),
                },
            );
        }

        for pedge in &snapshot.edges {
            let edge_id = parse_uuid(&pedge.id, "edge")?;
            if workflow.contains_edge(edge_id) {
                return Err(GraphError::Snapshot(format!(
                    "duplicate edge id {edge_id}"
                )));
            }
            let source = parse_uuid(&pedge.source, "edge source")?;
            let target = parse_uuid(&pedge.target, "edge target")?;
            workflow
                .add_edge_with_id(
                    edge_id,
                    source,
                    target,
                    EdgeAttrs {
                        label: pedge.label.clone(),
                        kind: match pedge.kind {
                            None | Some(PersistedEdgeKind::Standard) => EdgeKind::Standard,
                            Some(PersistedEdgeKind::Success) => EdgeKind::Success,
                            Some(PersistedEdgeKind::Failure) => EdgeKind::Failure,
                        },
                        animated: pedge.animated.unwrap_or(false),
                    },
                )
                .map_err(|e| GraphError::Snapshot(format!("edge {edge_id}: {e}")))?;
        }

        // Replay bumped updated_at; the record's timestamps win.
        workflow.created_at = snapshot.created_at;
        workflow.updated_at = snapshot.updated_at;
        Ok(workflow)
    }
}
