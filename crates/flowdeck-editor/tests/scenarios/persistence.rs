/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Save/load flows against the store collaborator, including failure
//! behavior: the in-memory graph is never rolled back by the store.

use euclid::default::Point2D;
use serde_json::{Map, Value};

use flowdeck_editor::{EditIntent, JsonFileStore, WorkflowStore};

use crate::harness::Scenario;

#[test]
fn save_then_reopen_round_trips_the_workflow() {
    let mut scenario = Scenario::new();
    let trigger = scenario.trigger_id();
    let email = scenario.add_step("send_email", 400.0, 100.0);
    scenario.connect(trigger, email);
    let mut config = Map::new();
    config.insert("subject".to_string(), Value::String("Hola!".into()));
    config.insert("body".to_string(), Value::String("Bienvenido".into()));
    scenario
        .session
        .apply_intent(EditIntent::UpdateNodeConfig { id: email, config });

    scenario.session.save_workflow();
    assert!(!scenario.session.is_dirty());
    assert_eq!(scenario.store.record_count(), 1);

    // Drift the in-memory copy, then reopen the saved one.
    let workflow_id = scenario.session.workflow.id;
    scenario.drag_node(email, Point2D::new(0.0, 0.0));
    scenario.session.apply_intent(EditIntent::ZoomIn);
    scenario.session.open_workflow(workflow_id);

    let reopened = &scenario.session.workflow;
    assert_eq!(reopened.id, workflow_id);
    assert_eq!(reopened.node_count(), 2);
    assert_eq!(reopened.edge_count(), 1);
    let email_node = reopened.nodes().find(|n| n.type_id == "send_email").unwrap();
    assert_eq!(email_node.position, Point2D::new(400.0, 100.0));
    assert_eq!(email_node.data.config["subject"], Value::String("Hola!".into()));
    // Switching workflows resets the viewport.
    assert_eq!(scenario.session.camera.zoom(), 1.0);
}

#[test]
fn failed_save_reports_and_keeps_the_graph() {
    let mut scenario = Scenario::new();
    let trigger = scenario.trigger_id();
    let email = scenario.add_step("send_email", 400.0, 100.0);
    scenario.connect(trigger, email);

    scenario.store.fail_next_saves(true);
    scenario.session.save_workflow();

    // Still dirty, nothing lost, failure surfaced.
    assert!(scenario.session.is_dirty());
    assert_eq!(scenario.session.workflow.node_count(), 2);
    assert_eq!(scenario.session.workflow.edge_count(), 1);
    let errors = scenario.notifications.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("unreachable"));

    // The store recovers; retrying the save succeeds.
    scenario.store.fail_next_saves(false);
    scenario.session.save_workflow();
    assert!(!scenario.session.is_dirty());
    assert_eq!(scenario.store.record_count(), 1);
}

#[test]
fn opening_a_missing_workflow_keeps_the_current_one() {
    let mut scenario = Scenario::new();
    let open_id = scenario.session.workflow.id;
    scenario.session.open_workflow(uuid::Uuid::new_v4());

    assert_eq!(scenario.session.workflow.id, open_id);
    assert_eq!(scenario.notifications.errors().len(), 1);
}

#[test]
fn deleting_a_stored_workflow_needs_only_one_confirmed_prompt() {
    let mut scenario = Scenario::new();
    scenario.session.save_workflow();
    assert_eq!(scenario.store.record_count(), 1);

    let id = scenario.session.workflow.id;
    scenario.session.delete_workflow(id, "Bienvenida");
    assert_eq!(scenario.store.record_count(), 0);
    assert!(
        scenario
            .notifications
            .successes()
            .iter()
            .any(|msg| msg.contains("deleted"))
    );
}

#[test]
fn list_reflects_saved_workflows() {
    let mut scenario = Scenario::new();
    assert!(scenario.session.list_workflows().is_empty());
    scenario.session.save_workflow();

    let summaries = scenario.session.list_workflows();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].name, "Bienvenida");
    assert_eq!(summaries[0].id, scenario.session.workflow.id);
}

#[test]
fn json_file_store_round_trips_through_disk() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path().to_path_buf()).unwrap();

    let mut scenario = Scenario::new();
    let trigger = scenario.trigger_id();
    let email = scenario.add_step("send_email", 400.0, 100.0);
    scenario.connect(trigger, email);

    let snapshot = scenario.session.workflow.to_snapshot();
    store.save(&snapshot).unwrap();
    let loaded = store.load(scenario.session.workflow.id).unwrap();
    assert_eq!(loaded, snapshot);
}
