/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Authoring a workflow end-to-end through pointer gestures.

use euclid::default::Point2D;

use flowdeck_editor::{EditIntent, InteractionState, MenuAction, PointerEvent};

use crate::harness::Scenario;

#[test]
fn author_a_welcome_workflow_with_gestures() {
    let mut scenario = Scenario::new();
    let trigger = scenario.trigger_id();
    scenario.session.apply_intent(EditIntent::UpdateNodeLabel {
        id: trigger,
        label: "Nuevo Contacto".to_string(),
    });

    // Add an email step and wire trigger -> email with a drag-to-connect.
    let email = scenario.add_step("send_email", 400.0, 100.0);
    scenario.connect(trigger, email);

    assert_eq!(scenario.session.workflow.node_count(), 2);
    assert_eq!(scenario.session.workflow.edge_count(), 1);
    assert!(scenario.session.workflow.has_edge_between(trigger, email));

    // Reposition the email step; the graph follows the pointer.
    scenario.drag_node(email, Point2D::new(420.0, 260.0));
    assert_eq!(
        scenario.session.workflow.node(email).unwrap().position,
        Point2D::new(420.0, 260.0)
    );
    assert!(scenario.notifications.errors().is_empty());
}

#[test]
fn connecting_back_into_the_trigger_is_refused_and_reported() {
    let mut scenario = Scenario::new();
    let trigger = scenario.trigger_id();
    let email = scenario.add_step("send_email", 400.0, 100.0);
    scenario.connect(trigger, email);

    scenario.connect(email, trigger);

    assert_eq!(scenario.session.workflow.edge_count(), 1);
    let errors = scenario.notifications.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("cannot receive incoming edges"));
    assert_eq!(*scenario.session.interaction(), InteractionState::Idle);
}

#[test]
fn duplicate_connection_is_refused_and_reported() {
    let mut scenario = Scenario::new();
    let trigger = scenario.trigger_id();
    let email = scenario.add_step("send_email", 400.0, 100.0);
    scenario.connect(trigger, email);
    scenario.connect(trigger, email);

    assert_eq!(scenario.session.workflow.edge_count(), 1);
    let errors = scenario.notifications.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("already exists"));
}

#[test]
fn deleting_a_step_from_the_menu_cascades_its_connections() {
    let mut scenario = Scenario::new();
    let trigger = scenario.trigger_id();
    let email = scenario.add_step("send_email", 400.0, 100.0);
    scenario.connect(trigger, email);

    // Right-click the email card and take "Delete step".
    let pos = scenario.session.workflow.node(email).unwrap().position;
    scenario
        .session
        .handle_pointer_event(PointerEvent::secondary_down(Point2D::new(
            pos.x + 12.0,
            pos.y + 12.0,
        )));
    let delete = scenario
        .session
        .menu_actions()
        .into_iter()
        .find(|a| matches!(a, MenuAction::DeleteNode(_)))
        .unwrap();
    scenario.session.execute_menu_action(delete);

    assert_eq!(scenario.session.workflow.node_count(), 1);
    assert_eq!(scenario.session.workflow.edge_count(), 0);
    assert_eq!(*scenario.session.interaction(), InteractionState::Idle);
}

#[test]
fn condition_branches_fan_out_to_distinct_targets() {
    let mut scenario = Scenario::new();
    let trigger = scenario.trigger_id();
    let condition = scenario.add_step("has_tag", 360.0, 100.0);
    let yes = scenario.add_step("send_email", 640.0, 20.0);
    let no = scenario.add_step("wait", 640.0, 220.0);

    scenario.connect(trigger, condition);
    scenario.connect(condition, yes);
    scenario.connect(condition, no);

    assert_eq!(scenario.session.workflow.edge_count(), 3);
    assert_eq!(scenario.session.workflow.outgoing(condition).len(), 2);
    assert!(scenario.notifications.errors().is_empty());
}

#[test]
fn menu_opened_mid_gesture_cancels_the_gesture() {
    let mut scenario = Scenario::new();
    let trigger = scenario.trigger_id();

    // Start an edge-creation gesture, then right-click empty canvas.
    let pos = scenario.session.workflow.node(trigger).unwrap().position;
    scenario
        .session
        .handle_pointer_event(PointerEvent::primary_down(Point2D::new(
            pos.x + flow_canvas::route::NODE_WIDTH,
            pos.y + flow_canvas::route::NODE_HEIGHT / 2.0,
        )));
    scenario
        .session
        .handle_pointer_event(PointerEvent::secondary_down(Point2D::new(900.0, 650.0)));

    assert!(scenario.session.context_menu().is_some());
    assert!(scenario.session.edge_preview().is_none());

    // Dismissing the menu lands back in Idle with nothing mutated.
    scenario
        .session
        .handle_pointer_event(PointerEvent::primary_down(Point2D::new(10.0, 10.0)));
    assert_eq!(*scenario.session.interaction(), InteractionState::Idle);
    assert_eq!(scenario.session.workflow.edge_count(), 0);
}
