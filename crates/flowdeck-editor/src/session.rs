/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Editor session state and the intent reducer.
//!
//! The session is the single write path to the open workflow: pointer
//! gestures, the context menu, keyboard shortcuts, and the external
//! config form all funnel into [`EditIntent`]s applied one at a time.
//! A kernel failure aborts that one intent, surfaces through the
//! notification collaborator, and leaves everything else standing.

use euclid::default::{Point2D, Vector2D};
use log::{info, warn};
use serde_json::{Map, Value};
use uuid::Uuid;

use flow_canvas::camera::{Camera, ZoomDirection};
use flow_graph::catalog;
use flow_graph::{EdgeAttrs, GraphError, Workflow, WorkflowStatus};

use crate::interaction::InteractionState;
use crate::services::{
    Capabilities, ConfirmationDialog, NotificationSink, WorkflowStore, WorkflowSummary,
};

/// Currently selected graph entity, exposed to the external
/// configuration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphTarget {
    Node(Uuid),
    Edge(Uuid),
}

/// External services the session delegates to.
pub struct Collaborators {
    pub notifications: Box<dyn NotificationSink>,
    pub confirm: Box<dyn ConfirmationDialog>,
    pub store: Box<dyn WorkflowStore>,
    pub capabilities: Capabilities,
}

/// Deterministic mutation intent boundary for editor state updates.
#[derive(Debug, Clone)]
pub enum EditIntent {
    AddNode {
        type_id: String,
        position: Point2D<f32>,
    },
    RemoveNode {
        id: Uuid,
    },
    RemoveEdge {
        id: Uuid,
    },
    AddEdge {
        source: Uuid,
        target: Uuid,
    },
    SetNodePosition {
        id: Uuid,
        position: Point2D<f32>,
    },
    UpdateNodeLabel {
        id: Uuid,
        label: String,
    },
    UpdateNodeConfig {
        id: Uuid,
        config: Map<String, Value>,
    },
    SelectNode {
        id: Uuid,
    },
    SelectEdge {
        id: Uuid,
    },
    ClearSelection,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    PanBy {
        delta: Vector2D<f32>,
    },
    RenameWorkflow {
        name: String,
    },
    SetStatus {
        status: WorkflowStatus,
    },
}

/// The active editor session. Owns exactly one workflow.
pub struct EditorSession {
    pub workflow: Workflow,
    pub camera: Camera,
    pub(crate) interaction: InteractionState,
    selected: Option<GraphTarget>,
    dirty: bool,
    collaborators: Collaborators,
}

impl EditorSession {
    pub fn new(workflow: Workflow, collaborators: Collaborators) -> Self {
        Self {
            workflow,
            camera: Camera::new(),
            interaction: InteractionState::Idle,
            selected: None,
            dirty: false,
            collaborators,
        }
    }

    /// Create a session around a fresh workflow seeded with one
    /// trigger node of the given type.
    pub fn create(
        name: &str,
        trigger_type: &str,
        collaborators: Collaborators,
    ) -> Result<Self, GraphError> {
        let Some(trigger) = catalog::definition(trigger_type) else {
            return Err(GraphError::UnknownType(trigger_type.to_string()));
        };
        let mut session = Self::new(Workflow::new(name, trigger), collaborators);
        session.dirty = true;
        info!("created workflow '{}' ({})", name, session.workflow.id);
        Ok(session)
    }

    pub fn selected(&self) -> Option<GraphTarget> {
        self.selected
    }

    /// The selected node, for the external config form.
    pub fn selected_node(&self) -> Option<&flow_graph::Node> {
        match self.selected {
            Some(GraphTarget::Node(id)) => self.workflow.node(id),
            _ => None,
        }
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn capabilities(&self) -> Capabilities {
        self.collaborators.capabilities
    }

    /// True when in-memory edits have not been saved to the store.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn notifications(&self) -> &dyn NotificationSink {
        self.collaborators.notifications.as_ref()
    }

    pub fn apply_intents<I>(&mut self, intents: I)
    where
        I: IntoIterator<Item = EditIntent>,
    {
        for intent in intents {
            self.apply_intent(intent);
        }
    }

    pub fn apply_intent(&mut self, intent: EditIntent) {
        match intent {
            EditIntent::AddNode { type_id, position } => {
                let Some(def) = catalog::definition(&type_id) else {
                    let err = GraphError::UnknownType(type_id);
                    warn!("refused AddNode: {err}");
                    self.collaborators.notifications.error(&err.to_string());
                    return;
                };
                let id = self.workflow.add_node(def, def.name, position);
                self.selected = Some(GraphTarget::Node(id));
                self.dirty = true;
            }
            EditIntent::RemoveNode { id } => self.remove_node_confirmed(id),
            EditIntent::RemoveEdge { id } => match self.workflow.remove_edge(id) {
                Ok(_) => {
                    self.dirty = true;
                    self.prune_stale_references();
                    self.collaborators.notifications.success("Connection removed");
                }
                Err(e) => self.report(e),
            },
            EditIntent::AddEdge { source, target } => {
                match self.workflow.add_edge(source, target, EdgeAttrs::default()) {
                    Ok(_) => self.dirty = true,
                    Err(e) => self.report(e),
                }
            }
            EditIntent::SetNodePosition { id, position } => {
                if let Err(e) = self.workflow.update_node_position(id, position) {
                    self.report(e);
                } else {
                    self.dirty = true;
                }
            }
            EditIntent::UpdateNodeLabel { id, label } => {
                if let Err(e) = self.workflow.update_node_label(id, label) {
                    self.report(e);
                } else {
                    self.dirty = true;
                }
            }
            EditIntent::UpdateNodeConfig { id, config } => {
                match self.workflow.update_node_config(id, config) {
                    Ok(()) => {
                        self.dirty = true;
                        self.collaborators.notifications.success("Step configuration saved");
                    }
                    Err(e) => self.report(e),
                }
            }
            EditIntent::SelectNode { id } => {
                if self.workflow.contains_node(id) {
                    self.selected = Some(GraphTarget::Node(id));
                } else {
                    warn!("ignored selection of missing node {id}");
                }
            }
            EditIntent::SelectEdge { id } => {
                if self.workflow.contains_edge(id) {
                    self.selected = Some(GraphTarget::Edge(id));
                } else {
                    warn!("ignored selection of missing edge {id}");
                }
            }
            EditIntent::ClearSelection => self.selected = None,
            EditIntent::ZoomIn => {
                self.camera.zoom_step(ZoomDirection::In);
            }
            EditIntent::ZoomOut => {
                self.camera.zoom_step(ZoomDirection::Out);
            }
            EditIntent::ZoomReset => self.camera.zoom_reset(),
            EditIntent::PanBy { delta } => self.camera.pan_by(delta),
            EditIntent::RenameWorkflow { name } => {
                self.workflow.rename(name);
                self.dirty = true;
            }
            EditIntent::SetStatus { status } => {
                self.workflow.set_status(status);
                self.dirty = true;
            }
        }
    }

    /// Node deletion goes through the confirmation collaborator; a
    /// declined prompt leaves everything untouched.
    fn remove_node_confirmed(&mut self, id: Uuid) {
        let Some(node) = self.workflow.node(id) else {
            self.report(GraphError::NodeNotFound(id));
            return;
        };
        let prompt = format!("Delete step \"{}\" and its connections?", node.data.label);
        if !self.collaborators.confirm.confirm(&prompt) {
            return;
        }
        match self.workflow.remove_node(id) {
            Ok(node) => {
                self.dirty = true;
                self.prune_stale_references();
                self.collaborators
                    .notifications
                    .success(&format!("Step \"{}\" deleted", node.data.label));
            }
            Err(e) => self.report(e),
        }
    }

    /// Drop selection and in-flight gestures that reference entities
    /// no longer present (a delete can race a gesture from another
    /// interaction path).
    pub(crate) fn prune_stale_references(&mut self) {
        if let Some(target) = self.selected {
            let alive = match target {
                GraphTarget::Node(id) => self.workflow.contains_node(id),
                GraphTarget::Edge(id) => self.workflow.contains_edge(id),
            };
            if !alive {
                self.selected = None;
            }
        }
        let gesture_alive = match &self.interaction {
            InteractionState::Idle => true,
            InteractionState::DraggingNode { id, .. } => self.workflow.contains_node(*id),
            InteractionState::CreatingEdge { source, .. } => self.workflow.contains_node(*source),
            InteractionState::ContextMenu(menu) => menu.target_alive(&self.workflow),
        };
        if !gesture_alive {
            self.interaction = InteractionState::Idle;
        }
    }

    /// Reset any in-flight gesture (Escape).
    pub fn cancel_gesture(&mut self) {
        self.interaction = InteractionState::Idle;
    }

    /// Replace the open workflow with a freshly created one.
    pub fn new_workflow(&mut self, name: &str, trigger_type: &str) {
        if !self.collaborators.capabilities.can_create {
            self.collaborators
                .notifications
                .error("You do not have permission to create workflows");
            return;
        }
        let Some(trigger) = catalog::definition(trigger_type) else {
            self.report(GraphError::UnknownType(trigger_type.to_string()));
            return;
        };
        self.workflow = Workflow::new(name, trigger);
        self.reset_view();
        self.dirty = true;
        info!("created workflow '{}' ({})", name, self.workflow.id);
        self.collaborators
            .notifications
            .success(&format!("Workflow \"{name}\" created"));
    }

    /// Load a workflow from the store, replacing the open one. On any
    /// failure the current workflow stays open and untouched.
    pub fn open_workflow(&mut self, id: Uuid) {
        let snapshot = match self.collaborators.store.load(id) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("failed to load workflow {id}: {e}");
                self.collaborators.notifications.error(&e.to_string());
                return;
            }
        };
        match Workflow::from_snapshot(&snapshot) {
            Ok(workflow) => {
                info!("opened workflow '{}' ({id})", workflow.name);
                self.workflow = workflow;
                self.reset_view();
                self.dirty = false;
            }
            Err(e) => {
                warn!("failed to restore workflow {id}: {e}");
                self.collaborators.notifications.error(&e.to_string());
            }
        }
    }

    /// Persist the open workflow. Fire-and-forget: a failure notifies
    /// and keeps the in-memory graph so the user can correct and retry.
    pub fn save_workflow(&mut self) {
        let snapshot = self.workflow.to_snapshot();
        match self.collaborators.store.save(&snapshot) {
            Ok(()) => {
                self.dirty = false;
                info!("saved workflow '{}' ({})", self.workflow.name, self.workflow.id);
                self.collaborators
                    .notifications
                    .success(&format!("Workflow \"{}\" saved", self.workflow.name));
            }
            Err(e) => {
                warn!("failed to save workflow {}: {e}", self.workflow.id);
                self.collaborators.notifications.error(&e.to_string());
            }
        }
    }

    /// Delete a stored workflow after explicit confirmation.
    pub fn delete_workflow(&mut self, id: Uuid, name: &str) {
        if !self.collaborators.capabilities.can_delete {
            self.collaborators
                .notifications
                .error("You do not have permission to delete workflows");
            return;
        }
        let prompt = format!("Delete workflow \"{name}\"? This cannot be undone.");
        if !self.collaborators.confirm.confirm(&prompt) {
            return;
        }
        match self.collaborators.store.delete(id) {
            Ok(()) => {
                info!("deleted workflow {id}");
                self.collaborators
                    .notifications
                    .success(&format!("Workflow \"{name}\" deleted"));
            }
            Err(e) => {
                warn!("failed to delete workflow {id}: {e}");
                self.collaborators.notifications.error(&e.to_string());
            }
        }
    }

    /// Workflow list for the picker; an unreachable store yields an
    /// empty list plus a notification.
    pub fn list_workflows(&self) -> Vec<WorkflowSummary> {
        match self.collaborators.store.list() {
            Ok(summaries) => summaries,
            Err(e) => {
                warn!("failed to list workflows: {e}");
                self.collaborators.notifications.error(&e.to_string());
                Vec::new()
            }
        }
    }

    fn reset_view(&mut self) {
        self.camera.reset();
        self.selected = None;
        self.interaction = InteractionState::Idle;
    }

    fn report(&self, error: GraphError) {
        warn!("{error}");
        self.collaborators.notifications.error(&error.to_string());
    }
}
