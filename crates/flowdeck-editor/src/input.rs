/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Keyboard input for the editor.
//!
//! The host UI detects key presses and fills a [`KeyboardActions`];
//! conversion to intents is pure state mapping, so the whole path is
//! testable without a windowing toolkit.

use crate::session::{EditIntent, EditorSession, GraphTarget};

/// Keyboard actions collected by the host UI for one event batch.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyboardActions {
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub zoom_reset: bool,
    pub delete_selected: bool,
    /// Escape: cancel the in-flight gesture or dismiss the menu.
    pub cancel: bool,
}

/// Convert keyboard actions to intents without applying them.
pub fn intents_from_actions(
    actions: &KeyboardActions,
    selected: Option<GraphTarget>,
) -> Vec<EditIntent> {
    let mut intents = Vec::new();
    if actions.zoom_in {
        intents.push(EditIntent::ZoomIn);
    }
    if actions.zoom_out {
        intents.push(EditIntent::ZoomOut);
    }
    if actions.zoom_reset {
        intents.push(EditIntent::ZoomReset);
    }
    if actions.delete_selected {
        match selected {
            Some(GraphTarget::Node(id)) => intents.push(EditIntent::RemoveNode { id }),
            Some(GraphTarget::Edge(id)) => intents.push(EditIntent::RemoveEdge { id }),
            None => {}
        }
    }
    intents
}

impl EditorSession {
    /// Apply one batch of keyboard actions.
    pub fn handle_keyboard(&mut self, actions: &KeyboardActions) {
        if actions.cancel {
            self.cancel_gesture();
        }
        let mut actions = *actions;
        if actions.delete_selected && !self.capabilities().can_delete {
            self.notifications()
                .error("You do not have permission to delete");
            actions.delete_selected = false;
        }
        let intents = intents_from_actions(&actions, self.selected());
        self.apply_intents(intents);
    }
}
