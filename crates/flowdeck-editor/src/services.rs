/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Collaborator boundaries to the surrounding product.
//!
//! The editor never renders toasts, opens dialogs, talks to the hosted
//! store, or computes permissions itself; it reaches each concern
//! through one of these traits. Everything here is synchronous — the
//! session runs on a single cooperative event loop.

use uuid::Uuid;

use flow_graph::snapshot::{PersistedStatus, PersistedWorkflow};

/// Receives success/error messages for model operations (toasts).
pub trait NotificationSink {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Modal yes/no prompt, invoked before destructive deletes.
pub trait ConfirmationDialog {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Permission flags supplied by the product; the editor only reads
/// them to decide which actions it exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl Capabilities {
    pub fn all() -> Self {
        Self {
            can_create: true,
            can_edit: true,
            can_delete: true,
        }
    }

    pub fn read_only() -> Self {
        Self {
            can_create: false,
            can_edit: false,
            can_delete: false,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

/// Errors from the workflow store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    Io(String),
    Codec(String),
    NotFound(Uuid),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "store IO error: {e}"),
            StoreError::Codec(e) => write!(f, "store codec error: {e}"),
            StoreError::NotFound(id) => write!(f, "workflow {id} not found"),
        }
    }
}

/// One row of the workflow list view.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSummary {
    pub id: Uuid,
    pub name: String,
    pub status: PersistedStatus,
    pub updated_at: u64,
}

/// Load/save boundary to the hosted workflow store. Saves are
/// fire-and-forget from the session's perspective: a failure is
/// surfaced and the in-memory graph stays untouched.
pub trait WorkflowStore {
    fn list(&self) -> Result<Vec<WorkflowSummary>, StoreError>;
    fn load(&self, id: Uuid) -> Result<PersistedWorkflow, StoreError>;
    fn save(&self, workflow: &PersistedWorkflow) -> Result<(), StoreError>;
    fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}
