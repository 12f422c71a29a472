/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use euclid::default::Point2D;
use uuid::Uuid;

use flow_canvas::route::{NODE_HEIGHT, NODE_WIDTH};
use flow_graph::snapshot::PersistedWorkflow;
use flowdeck_editor::{
    Capabilities, Collaborators, ConfirmationDialog, EditIntent, EditorSession, GraphTarget,
    NotificationSink, PointerEvent, StoreError, WorkflowStore, WorkflowSummary,
};

#[derive(Clone, Default)]
pub struct NotificationLog {
    events: Rc<RefCell<Vec<(bool, String)>>>,
}

impl NotificationLog {
    pub fn errors(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter(|(ok, _)| !*ok)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter(|(ok, _)| *ok)
            .map(|(_, msg)| msg.clone())
            .collect()
    }
}

impl NotificationSink for NotificationLog {
    fn success(&self, message: &str) {
        self.events.borrow_mut().push((true, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.events.borrow_mut().push((false, message.to_string()));
    }
}

pub struct AlwaysConfirm;

impl ConfirmationDialog for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// In-memory store with a switchable failure mode for save calls.
#[derive(Clone, Default)]
pub struct FlakyStore {
    records: Rc<RefCell<HashMap<Uuid, PersistedWorkflow>>>,
    fail_saves: Rc<Cell<bool>>,
}

impl FlakyStore {
    pub fn fail_next_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    pub fn record_count(&self) -> usize {
        self.records.borrow().len()
    }
}

impl WorkflowStore for FlakyStore {
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
        if self.fail_saves.get() {
            return Err(StoreError::Io("the hosted store is unreachable".to_string()));
        }
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

pub struct Scenario {
    pub session: EditorSession,
    pub notifications: NotificationLog,
    pub store: FlakyStore,
}

impl Scenario {
    pub fn new() -> Self {
        let notifications = NotificationLog::default();
        let store = FlakyStore::default();
        let collaborators = Collaborators {
            notifications: Box::new(notifications.clone()),
            confirm: Box::new(AlwaysConfirm),
            store: Box::new(store.clone()),
            capabilities: Capabilities::all(),
        };
        let session = EditorSession::create("Bienvenida", "contact_created", collaborators)
            .expect("trigger type registered");
        Self {
            session,
            notifications,
            store,
        }
    }

    pub fn trigger_id(&self) -> Uuid {
        self.session
            .workflow
            .nodes()
            .next()
            .expect("workflow seeds a trigger")
            .id
    }

    /// Add a step through the reducer and return its id.
    pub fn add_step(&mut self, type_id: &str, x: f32, y: f32) -> Uuid {
        self.session.apply_intent(EditIntent::AddNode {
            type_id: type_id.to_string(),
            position: Point2D::new(x, y),
        });
        match self.session.selected() {
            Some(GraphTarget::Node(id)) => id,
            other => panic!("expected new step selected, got {other:?}"),
        }
    }

    /// Drive a full drag gesture: grab the card body, move, release.
    pub fn drag_node(&mut self, id: Uuid, to_world: Point2D<f32>) {
        let pos = self.session.workflow.node(id).expect("node exists").position;
        let grab = Point2D::new(pos.x + 10.0, pos.y + 10.0);
        self.session
            .handle_pointer_event(PointerEvent::primary_down(self.to_screen(grab)));
        let target = Point2D::new(to_world.x + 10.0, to_world.y + 10.0);
        self.session
            .handle_pointer_event(PointerEvent::primary_move(self.to_screen(target)));
        self.session
            .handle_pointer_event(PointerEvent::primary_up(self.to_screen(target)));
    }

    /// Drive a full edge-creation gesture from one node's connector to
    /// another node's body.
    pub fn connect(&mut self, source: Uuid, target: Uuid) {
        let source_pos = self
            .session
            .workflow
            .node(source)
            .expect("source exists")
            .position;
        let connector = Point2D::new(
            source_pos.x + NODE_WIDTH,
            source_pos.y + NODE_HEIGHT / 2.0,
        );
        self.session
            .handle_pointer_event(PointerEvent::primary_down(self.to_screen(connector)));

        let target_pos = self
            .session
            .workflow
            .node(target)
            .expect("target exists")
            .position;
        let body = Point2D::new(target_pos.x + 15.0, target_pos.y + 15.0);
        self.session
            .handle_pointer_event(PointerEvent::primary_down(self.to_screen(body)));
    }

    fn to_screen(&self, world: Point2D<f32>) -> Point2D<f32> {
        self.session.camera.to_screen(world)
    }
}
