/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Context menu: tracks the targeted entity and the action set offered
//! for it.
//!
//! The action list is derived per target and gated by the capability
//! flags; executing an action maps to intents and dismisses the menu.
//! Actual mutation stays with the session reducer.

use euclid::default::Point2D;
use uuid::Uuid;

use flow_graph::{NodeCategory, Workflow, catalog};

use crate::interaction::InteractionState;
use crate::session::{EditIntent, EditorSession};

/// Entity a context menu was opened on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuTarget {
    Node(Uuid),
    Edge(Uuid),
    /// Empty canvas; carries the click's world position so added steps
    /// land under the pointer.
    Canvas(Point2D<f32>),
}

/// Open context menu state: the target plus the screen anchor the
/// host UI places the menu at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuState {
    pub target: MenuTarget,
    pub anchor: Point2D<f32>,
}

impl MenuState {
    pub(crate) fn target_alive(&self, workflow: &Workflow) -> bool {
        match self.target {
            MenuTarget::Node(id) => workflow.contains_node(id),
            MenuTarget::Edge(id) => workflow.contains_edge(id),
            MenuTarget::Canvas(_) => true,
        }
    }
}

/// One entry of an open context menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuAction {
    EditNode(Uuid),
    DeleteNode(Uuid),
    EditEdge(Uuid),
    DeleteEdge(Uuid),
    AddNode {
        type_id: &'static str,
        at: Point2D<f32>,
    },
}

impl MenuAction {
    /// Display label for the menu entry.
    pub fn label(&self) -> String {
        match self {
            Self::EditNode(_) => "Edit step".to_string(),
            Self::DeleteNode(_) => "Delete step".to_string(),
            Self::EditEdge(_) => "Edit connection".to_string(),
            Self::DeleteEdge(_) => "Delete connection".to_string(),
            Self::AddNode { type_id, .. } => match catalog::definition(type_id) {
                Some(def) => format!("Add {}", def.name),
                None => format!("Add {type_id}"),
            },
        }
    }
}

impl EditorSession {
    /// The open context menu, if the interaction state is showing one.
    pub fn context_menu(&self) -> Option<&MenuState> {
        match &self.interaction {
            InteractionState::ContextMenu(menu) => Some(menu),
            _ => None,
        }
    }

    /// Entries offered for the open menu's target, capability-gated.
    pub fn menu_actions(&self) -> Vec<MenuAction> {
        let Some(menu) = self.context_menu() else {
            return Vec::new();
        };
        let caps = self.capabilities();
        let mut actions = Vec::new();
        match menu.target {
            MenuTarget::Node(id) => {
                if caps.can_edit {
                    actions.push(MenuAction::EditNode(id));
                }
                if caps.can_delete {
                    actions.push(MenuAction::DeleteNode(id));
                }
            }
            MenuTarget::Edge(id) => {
                if caps.can_edit {
                    actions.push(MenuAction::EditEdge(id));
                }
                if caps.can_delete {
                    actions.push(MenuAction::DeleteEdge(id));
                }
            }
            MenuTarget::Canvas(at) => {
                if caps.can_create {
                    for def in catalog::definitions_in(NodeCategory::Action)
                        .chain(catalog::definitions_in(NodeCategory::Condition))
                    {
                        actions.push(MenuAction::AddNode {
                            type_id: def.type_id,
                            at,
                        });
                    }
                }
            }
        }
        actions
    }

    /// Execute one menu entry and dismiss the menu.
    pub fn execute_menu_action(&mut self, action: MenuAction) {
        self.interaction = InteractionState::Idle;
        match action {
            MenuAction::EditNode(id) => self.apply_intent(EditIntent::SelectNode { id }),
            MenuAction::DeleteNode(id) => self.apply_intent(EditIntent::RemoveNode { id }),
            MenuAction::EditEdge(id) => self.apply_intent(EditIntent::SelectEdge { id }),
            MenuAction::DeleteEdge(id) => self.apply_intent(EditIntent::RemoveEdge { id }),
            MenuAction::AddNode { type_id, at } => self.apply_intent(EditIntent::AddNode {
                type_id: type_id.to_string(),
                position: at,
            }),
        }
    }

    pub fn dismiss_menu(&mut self) {
        if matches!(self.interaction, InteractionState::ContextMenu(_)) {
            self.interaction = InteractionState::Idle;
        }
    }
}
