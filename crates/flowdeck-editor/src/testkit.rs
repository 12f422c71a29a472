/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Recording collaborator doubles for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use uuid::Uuid;

use flow_graph::snapshot::PersistedWorkflow;

use crate::services::{
    Capabilities, ConfirmationDialog, NotificationSink, StoreError, WorkflowStore, WorkflowSummary,
};
use crate::session::{Collaborators, EditorSession};

#[derive(Clone, Default)]
pub(crate) struct NotificationProbe {
    events: Rc<RefCell<Vec<(bool, String)>>>,
}

impl NotificationProbe {
    pub(crate) fn successes(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter(|(ok, _)| *ok)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    pub(crate) fn errors(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter(|(ok, _)| !*ok)
            .map(|(_, msg)| msg.clone())
            .collect()
    }
}

impl NotificationSink for NotificationProbe {
    fn success(&self, message: &str) {
        self.events.borrow_mut().push((true, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.events.borrow_mut().push((false, message.to_string()));
    }
}

pub(crate) struct ScriptedConfirm {
    accept: bool,
}

impl ConfirmationDialog for ScriptedConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.accept
    }
}

#[derive(Clone, Default)]
pub(crate) struct InMemoryStore {
    records: Rc<RefCell<HashMap<Uuid, PersistedWorkflow>>>,
}

impl WorkflowStore for InMemoryStore {
    fn list(&self) -> Result<Vec<WorkflowSummary>, StoreError> {
        Ok(self
            .records
            .borrow()
            .values()
            .filter_map(|record| {
                Some(WorkflowSummary {
                    id: Uuid::parse_str(&record.id).ok()?,
                    name: record.name.clone(),
                    status: record.status,
                    updated_at: record.updated_at,
                })
            })
            .collect())
    }

    fn load(&self, id: Uuid) -> Result<PersistedWorkflow, StoreError> {
        self.records
            .borrow()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn save(&self, workflow: &PersistedWorkflow) -> Result<(), StoreError> {
        let id = Uuid::parse_str(&workflow.id)
            .map_err(|_| StoreError::Codec("workflow id is not a uuid".to_string()))?;
        self.records.borrow_mut().insert(id, workflow.clone());
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.records
            .borrow_mut()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}

pub(crate) fn harness_with(
    capabilities: Capabilities,
    confirm_accept: bool,
) -> (EditorSession, NotificationProbe) {
    let probe = NotificationProbe::default();
    let collaborators = Collaborators {
        notifications: Box::new(probe.clone()),
        confirm: Box::new(ScriptedConfirm {
            accept: confirm_accept,
        }),
        store: Box::new(InMemoryStore::default()),
        capabilities,
    };
    let session = EditorSession::create("Bienvenida", "contact_created", collaborators)
        .expect("test trigger type exists");
    (session, probe)
}

/// Session over a one-trigger workflow, all capabilities, confirming
/// every prompt.
pub(crate) fn harness() -> (EditorSession, NotificationProbe) {
    harness_with(Capabilities::all(), true)
}
