/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Pointer interaction state machine.
//!
//! One tagged union holds the whole gesture state — dragging, edge
//! creation, and the context menu cannot coexist, so impossible
//! combinations are unrepresentable. Hit testing runs on pointer-down
//! only; move handling during a gesture is O(1).
//!
//! Stale-id guard: a gesture captured a node id at pointer-down. If
//! that node is deleted from another interaction path before the
//! gesture finishes, the controller silently cancels to `Idle` instead
//! of acting on the stale id.

use euclid::default::{Point2D, Vector2D};
use uuid::Uuid;

use flow_canvas::hit::{self, NodeHit};
use flow_canvas::route::{self, CubicPath};

use crate::menu::{MenuState, MenuTarget};
use crate::session::{EditIntent, EditorSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
}

/// A pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub button: PointerButton,
    pub kind: PointerEventKind,
    pub screen: Point2D<f32>,
}

impl PointerEvent {
    pub fn primary_down(screen: Point2D<f32>) -> Self {
        Self {
            button: PointerButton::Primary,
            kind: PointerEventKind::Down,
            screen,
        }
    }

    pub fn primary_move(screen: Point2D<f32>) -> Self {
        Self {
            button: PointerButton::Primary,
            kind: PointerEventKind::Move,
            screen,
        }
    }

    pub fn primary_up(screen: Point2D<f32>) -> Self {
        Self {
            button: PointerButton::Primary,
            kind: PointerEventKind::Up,
            screen,
        }
    }

    pub fn secondary_down(screen: Point2D<f32>) -> Self {
        Self {
            button: PointerButton::Secondary,
            kind: PointerEventKind::Down,
            screen,
        }
    }
}

/// Gesture state of the editor canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState {
    Idle,
    DraggingNode {
        id: Uuid,
        /// Pointer offset inside the card at grab time, so the node
        /// does not jump to the pointer on the first move.
        grab_offset: Vector2D<f32>,
    },
    CreatingEdge {
        source: Uuid,
        /// Transient preview endpoint in world coordinates; rendering
        /// only, the graph is untouched until the gesture completes.
        preview: Point2D<f32>,
    },
    ContextMenu(MenuState),
}

/// What a pointer-down position resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CanvasTarget {
    NodeConnector(Uuid),
    NodeBody(Uuid),
    Edge(Uuid),
    Canvas,
}

impl EditorSession {
    /// Feed one pointer event through the state machine.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        let world = self.camera.to_world(event.screen);

        if event.button == PointerButton::Secondary && event.kind == PointerEventKind::Down {
            self.open_context_menu(world, event.screen);
            return;
        }

        match self.interaction.clone() {
            InteractionState::Idle => self.handle_idle(event, world),
            InteractionState::DraggingNode { id, grab_offset } => {
                self.handle_drag(event, world, id, grab_offset);
            }
            InteractionState::CreatingEdge { source, .. } => {
                self.handle_edge_creation(event, world, source);
            }
            InteractionState::ContextMenu(_) => {
                // Primary click elsewhere dismisses with no side effect.
                if event.kind == PointerEventKind::Down {
                    self.interaction = InteractionState::Idle;
                }
            }
        }
    }

    /// Preview path for the edge being created, for rendering.
    pub fn edge_preview(&self) -> Option<CubicPath> {
        let InteractionState::CreatingEdge { source, preview } = &self.interaction else {
            return None;
        };
        let node = self.workflow.node(*source)?;
        Some(route::route_between(
            route::source_anchor(node.position),
            *preview,
        ))
    }

    fn handle_idle(&mut self, event: PointerEvent, world: Point2D<f32>) {
        if event.kind != PointerEventKind::Down {
            return;
        }
        match self.resolve_target(world) {
            CanvasTarget::NodeConnector(id) => {
                self.interaction = InteractionState::CreatingEdge {
                    source: id,
                    preview: world,
                };
            }
            CanvasTarget::NodeBody(id) => {
                let Some(node) = self.workflow.node(id) else {
                    return;
                };
                let grab_offset = world - node.position;
                self.interaction = InteractionState::DraggingNode { id, grab_offset };
                self.apply_intent(EditIntent::SelectNode { id });
            }
            CanvasTarget::Edge(id) => {
                self.apply_intent(EditIntent::SelectEdge { id });
            }
            CanvasTarget::Canvas => {
                self.apply_intent(EditIntent::ClearSelection);
            }
        }
    }

    fn handle_drag(
        &mut self,
        event: PointerEvent,
        world: Point2D<f32>,
        id: Uuid,
        grab_offset: Vector2D<f32>,
    ) {
        if !self.workflow.contains_node(id) {
            self.interaction = InteractionState::Idle;
            return;
        }
        match event.kind {
            PointerEventKind::Move => {
                self.apply_intent(EditIntent::SetNodePosition {
                    id,
                    position: world - grab_offset,
                });
            }
            PointerEventKind::Up => self.interaction = InteractionState::Idle,
            PointerEventKind::Down => {}
        }
    }

    fn handle_edge_creation(&mut self, event: PointerEvent, world: Point2D<f32>, source: Uuid) {
        if !self.workflow.contains_node(source) {
            self.interaction = InteractionState::Idle;
            return;
        }
        match event.kind {
            PointerEventKind::Move => {
                self.interaction = InteractionState::CreatingEdge {
                    source,
                    preview: world,
                };
            }
            PointerEventKind::Down => {
                let completed = match self.resolve_target(world) {
                    CanvasTarget::NodeBody(target) | CanvasTarget::NodeConnector(target)
                        if target != source =>
                    {
                        Some(target)
                    }
                    _ => None,
                };
                // Success or validation failure, the gesture ends; a
                // failure is reported, never retried automatically.
                self.interaction = InteractionState::Idle;
                if let Some(target) = completed {
                    self.apply_intent(EditIntent::AddEdge { source, target });
                }
            }
            PointerEventKind::Up => {}
        }
    }

    fn open_context_menu(&mut self, world: Point2D<f32>, screen: Point2D<f32>) {
        let target = match self.resolve_target(world) {
            CanvasTarget::NodeConnector(id) | CanvasTarget::NodeBody(id) => MenuTarget::Node(id),
            CanvasTarget::Edge(id) => MenuTarget::Edge(id),
            CanvasTarget::Canvas => MenuTarget::Canvas(world),
        };
        self.interaction = InteractionState::ContextMenu(MenuState {
            target,
            anchor: screen,
        });
    }

    fn resolve_target(&self, world: Point2D<f32>) -> CanvasTarget {
        let nodes: Vec<(Uuid, Point2D<f32>)> = self
            .workflow
            .nodes()
            .map(|node| (node.id, node.position))
            .collect();
        if let Some(hit) = hit::hit_test_nodes(&nodes, world) {
            return match hit {
                NodeHit::Connector(id) => CanvasTarget::NodeConnector(id),
                NodeHit::Body(id) => CanvasTarget::NodeBody(id),
            };
        }

        let edges: Vec<(Uuid, CubicPath)> = self
            .workflow
            .edges()
            .filter_map(|edge| {
                let source = self.workflow.node(edge.source)?.position;
                let target = self.workflow.node(edge.target)?.position;
                Some((edge.id, route::route_edge(source, target)))
            })
            .collect();
        if let Some(id) = hit::hit_test_edges(&edges, world) {
            return CanvasTarget::Edge(id);
        }
        CanvasTarget::Canvas
    }
}
