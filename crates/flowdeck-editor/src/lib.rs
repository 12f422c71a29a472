/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Flowdeck editor session.
//!
//! One workflow is open at a time, exclusively owned by an
//! [`EditorSession`]. All graph mutation flows through the session's
//! intent reducer; pointer and keyboard events are translated into
//! intents by the interaction state machine. The surrounding product
//! (toasts, dialogs, the hosted store, permissions) is reached only
//! through the collaborator traits in [`services`].

pub mod input;
pub mod interaction;
pub mod menu;
pub mod services;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod testkit;

pub use interaction::{InteractionState, PointerButton, PointerEvent, PointerEventKind};
pub use menu::{MenuAction, MenuState, MenuTarget};
pub use services::{
    Capabilities, ConfirmationDialog, NotificationSink, StoreError, WorkflowStore, WorkflowSummary,
};
pub use session::{Collaborators, EditIntent, EditorSession, GraphTarget};
pub use store::JsonFileStore;
