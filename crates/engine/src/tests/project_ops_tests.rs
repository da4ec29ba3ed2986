// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crewflow_domain::{AssignmentStage, ProfileStage, ProjectStage};
use crewflow_history::DocumentRef;
use crewflow_persistence::queries;

use crate::error::EngineError;
use crate::project_ops;
use crate::requests::TransitionRequest;
use crate::tests::helpers::{actor, add_assignment, date, seed_project, seed_worker, setup};

#[test]
fn test_start_planning_moves_approved_project() {
    let mut persistence = setup();
    let project_id: i64 = seed_project(&mut persistence, ProjectStage::Approved, None, None);

    let response = project_ops::start_planning(
        &mut persistence,
        project_id,
        &TransitionRequest::default(),
        &actor(),
    )
    .unwrap();

    assert_eq!(response.from, ProjectStage::Approved);
    assert_eq!(response.to, ProjectStage::Planning);
    assert_eq!(response.affected_workers, 0);
    assert_eq!(
        persistence.get_project(project_id).unwrap().stage,
        ProjectStage::Planning
    );

    let history = persistence.project_stage_history(project_id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].from_stage, Some("Approved".to_string()));
    assert_eq!(history[0].to_stage, "Planning");
    assert_eq!(history[0].actor_id, "ops-1");
}

#[test]
fn test_start_planning_rejects_wrong_stage() {
    let mut persistence = setup();
    let project_id: i64 = seed_project(&mut persistence, ProjectStage::Shared, None, None);

    let result = project_ops::start_planning(
        &mut persistence,
        project_id,
        &TransitionRequest::default(),
        &actor(),
    );

    match result {
        Err(EngineError::InvalidTransition { entity, from, to }) => {
            assert_eq!(entity, "Project");
            assert_eq!(from, "Shared");
            assert_eq!(to, "Planning");
        }
        other => panic!("Expected InvalidTransition, got {other:?}"),
    }
    // Nothing was written.
    assert!(persistence.project_stage_history(project_id).unwrap().is_empty());
}

#[test]
fn test_terminal_project_rejects_everything() {
    let mut persistence = setup();
    let project_id: i64 = seed_project(&mut persistence, ProjectStage::Completed, None, None);

    let result = project_ops::terminate_project(
        &mut persistence,
        project_id,
        date(2026, 6, 1),
        &TransitionRequest::default(),
        &actor(),
    );

    match result {
        Err(EngineError::TerminalStage { entity, stage }) => {
            assert_eq!(entity, "Project");
            assert_eq!(stage, "Completed");
        }
        other => panic!("Expected TerminalStage, got {other:?}"),
    }
}

#[test]
fn test_unknown_project_is_not_found() {
    let mut persistence = setup();

    let result = project_ops::start_planning(
        &mut persistence,
        42,
        &TransitionRequest::default(),
        &actor(),
    );

    match result {
        Err(EngineError::NotFound { entity, id }) => {
            assert_eq!(entity, "Project");
            assert_eq!(id, 42);
        }
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_share_confirms_matched_workers() {
    let mut persistence = setup();
    let project_id: i64 = seed_project(&mut persistence, ProjectStage::Planning, None, None);
    let worker_a: i64 = seed_worker(&mut persistence, "Asha Rao", ProfileStage::Matched);
    let worker_b: i64 = seed_worker(&mut persistence, "Benoit Ly", ProfileStage::Matched);
    let assignment_a: i64 =
        add_assignment(&mut persistence, project_id, worker_a, AssignmentStage::Matched);
    add_assignment(&mut persistence, project_id, worker_b, AssignmentStage::Matched);

    let response = project_ops::share_project(
        &mut persistence,
        project_id,
        &TransitionRequest::default(),
        &actor(),
    )
    .unwrap();

    assert_eq!(response.affected_workers, 2);
    assert_eq!(
        persistence.get_assignment(assignment_a).unwrap().stage,
        AssignmentStage::Assigned
    );
    assert_eq!(
        persistence.get_profile(worker_a).unwrap().current_stage,
        ProfileStage::Assigned
    );
    assert_eq!(
        persistence.get_profile(worker_b).unwrap().current_stage,
        ProfileStage::Assigned
    );

    // One worker ledger row per affected worker, naming the project.
    let worker_history = persistence.profile_stage_history(worker_a).unwrap();
    assert_eq!(worker_history.len(), 1);
    assert_eq!(worker_history[0].project_id, Some(project_id));
    // Exactly one project ledger row.
    assert_eq!(persistence.project_stage_history(project_id).unwrap().len(), 1);
}

#[test]
fn test_start_stamps_date_and_deploys_workers() {
    let mut persistence = setup();
    let project_id: i64 = seed_project(
        &mut persistence,
        ProjectStage::Shared,
        Some(date(2026, 3, 1)),
        None,
    );
    let worker: i64 = seed_worker(&mut persistence, "Asha Rao", ProfileStage::Assigned);
    let assignment: i64 =
        add_assignment(&mut persistence, project_id, worker, AssignmentStage::Assigned);

    let response = project_ops::start_project(
        &mut persistence,
        project_id,
        date(2026, 3, 1),
        &TransitionRequest::default(),
        &actor(),
    )
    .unwrap();

    assert_eq!(response.to, ProjectStage::Ongoing);
    let project = persistence.get_project(project_id).unwrap();
    assert_eq!(project.stage, ProjectStage::Ongoing);
    assert_eq!(project.actual_start_date, Some(date(2026, 3, 1)));

    let deployed = persistence.get_assignment(assignment).unwrap();
    assert_eq!(deployed.stage, AssignmentStage::OnSite);
    assert!(deployed.deployed_at.is_some());
    assert_eq!(
        persistence.get_profile(worker).unwrap().current_stage,
        ProfileStage::OnSite
    );
}

#[test]
fn test_complete_benches_only_free_workers() {
    let mut persistence = setup();
    let project_id: i64 = seed_project(
        &mut persistence,
        ProjectStage::Ongoing,
        Some(date(2026, 1, 5)),
        Some(date(2026, 6, 30)),
    );
    let other_project: i64 = seed_project(
        &mut persistence,
        ProjectStage::Ongoing,
        Some(date(2026, 2, 1)),
        None,
    );
    let free_worker: i64 = seed_worker(&mut persistence, "Asha Rao", ProfileStage::OnSite);
    let busy_worker: i64 = seed_worker(&mut persistence, "Benoit Ly", ProfileStage::OnSite);
    add_assignment(&mut persistence, project_id, free_worker, AssignmentStage::OnSite);
    let busy_here: i64 =
        add_assignment(&mut persistence, project_id, busy_worker, AssignmentStage::OnSite);
    add_assignment(
        &mut persistence,
        other_project,
        busy_worker,
        AssignmentStage::Assigned,
    );

    let response = project_ops::complete_project(
        &mut persistence,
        project_id,
        date(2026, 7, 1),
        &TransitionRequest::default(),
        &actor(),
    )
    .unwrap();

    assert_eq!(response.to, ProjectStage::Completed);
    let project = persistence.get_project(project_id).unwrap();
    assert_eq!(project.completion_date, Some(date(2026, 7, 1)));
    assert_eq!(project.actual_end_date, Some(date(2026, 7, 1)));

    // Both assignments on the completed project are severed.
    let severed = persistence.get_assignment(busy_here).unwrap();
    assert_eq!(severed.stage, AssignmentStage::Completed);
    assert!(severed.removed_at.is_some());

    // The free worker is benched; the busy one follows its other engagement.
    assert_eq!(
        persistence.get_profile(free_worker).unwrap().current_stage,
        ProfileStage::Benched
    );
    assert_eq!(
        persistence.get_profile(busy_worker).unwrap().current_stage,
        ProfileStage::Assigned
    );
}

#[test]
fn test_complete_requires_documents_when_flagged() {
    let mut persistence = setup();
    let project_id: i64 = seed_project(&mut persistence, ProjectStage::Ongoing, None, None);

    let request = TransitionRequest {
        require_documents: true,
        ..TransitionRequest::default()
    };
    let result = project_ops::complete_project(
        &mut persistence,
        project_id,
        date(2026, 7, 1),
        &request,
        &actor(),
    );

    match result {
        Err(EngineError::MissingDocuments { stage }) => assert_eq!(stage, "Completed"),
        other => panic!("Expected MissingDocuments, got {other:?}"),
    }
    assert_eq!(
        persistence.get_project(project_id).unwrap().stage,
        ProjectStage::Ongoing
    );
}

#[test]
fn test_complete_records_supplied_documents() {
    let mut persistence = setup();
    let project_id: i64 = seed_project(&mut persistence, ProjectStage::Ongoing, None, None);

    let request = TransitionRequest {
        reason: Some(String::from("Work delivered")),
        documents: vec![DocumentRef::new(
            String::from("Completion certificate"),
            String::from("s3://docs/cert.pdf"),
            Some(String::from("ops-1")),
        )],
        require_documents: true,
    };
    let response = project_ops::complete_project(
        &mut persistence,
        project_id,
        date(2026, 7, 1),
        &request,
        &actor(),
    )
    .unwrap();

    let documents = queries::history::documents_for_history_row(
        persistence.connection(),
        response.history_id,
    )
    .unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].title, "Completion certificate");
}

#[test]
fn test_short_close_leaves_completion_date_unset() {
    let mut persistence = setup();
    let project_id: i64 = seed_project(
        &mut persistence,
        ProjectStage::Ongoing,
        Some(date(2026, 1, 5)),
        Some(date(2026, 12, 31)),
    );

    let response = project_ops::short_close_project(
        &mut persistence,
        project_id,
        date(2026, 5, 1),
        &TransitionRequest::with_reason("Employer downsized the site"),
        &actor(),
    )
    .unwrap();

    assert_eq!(response.to, ProjectStage::ShortClosed);
    let project = persistence.get_project(project_id).unwrap();
    assert_eq!(project.stage, ProjectStage::ShortClosed);
    assert_eq!(project.actual_end_date, Some(date(2026, 5, 1)));
    assert_eq!(project.completion_date, None);
}

#[test]
fn test_cancel_rejects_started_project() {
    let mut persistence = setup();
    let project_id: i64 = seed_project(&mut persistence, ProjectStage::Shared, None, None);
    crewflow_persistence::mutations::projects::set_actual_start_date(
        persistence.connection(),
        project_id,
        date(2026, 2, 1),
    )
    .unwrap();

    let result = project_ops::cancel_project(
        &mut persistence,
        project_id,
        &TransitionRequest::default(),
        &actor(),
    );

    match result {
        Err(EngineError::Precondition(msg)) => assert!(msg.contains("already started")),
        other => panic!("Expected Precondition, got {other:?}"),
    }
}

#[test]
fn test_cancel_only_before_work_begins() {
    let mut persistence = setup();
    let project_id: i64 = seed_project(&mut persistence, ProjectStage::Ongoing, None, None);

    let result = project_ops::cancel_project(
        &mut persistence,
        project_id,
        &TransitionRequest::default(),
        &actor(),
    );

    match result {
        Err(EngineError::InvalidTransition { from, to, .. }) => {
            assert_eq!(from, "Ongoing");
            assert_eq!(to, "Cancelled");
        }
        other => panic!("Expected InvalidTransition, got {other:?}"),
    }
}

#[test]
fn test_match_worker_requires_matchable_stage() {
    let mut persistence = setup();
    let project_id: i64 = seed_project(&mut persistence, ProjectStage::Planning, None, None);
    let candidate: i64 =
        seed_worker(&mut persistence, "Asha Rao", ProfileStage::NewRegistration);

    let result = project_ops::match_worker(
        &mut persistence,
        project_id,
        candidate,
        &TransitionRequest::default(),
        &actor(),
    );

    match result {
        Err(EngineError::InvalidTransition { entity, from, to }) => {
            assert_eq!(entity, "Profile");
            assert_eq!(from, "NewRegistration");
            assert_eq!(to, "Matched");
        }
        other => panic!("Expected InvalidTransition, got {other:?}"),
    }
}

#[test]
fn test_remove_worker_derives_next_stage() {
    let mut persistence = setup();
    let project_id: i64 = seed_project(&mut persistence, ProjectStage::Ongoing, None, None);
    crewflow_persistence::mutations::projects::set_actual_start_date(
        persistence.connection(),
        project_id,
        date(2026, 1, 5),
    )
    .unwrap();
    let worker: i64 = seed_worker(&mut persistence, "Asha Rao", ProfileStage::OnSite);
    let assignment: i64 =
        add_assignment(&mut persistence, project_id, worker, AssignmentStage::OnSite);

    project_ops::remove_worker(
        &mut persistence,
        assignment,
        &TransitionRequest::with_reason("Disciplinary removal"),
        &actor(),
    )
    .unwrap();

    let removed = persistence.get_assignment(assignment).unwrap();
    assert_eq!(removed.stage, AssignmentStage::Removed);
    assert_eq!(removed.removal_reason, Some("Disciplinary removal".to_string()));
    assert_eq!(
        persistence.get_profile(worker).unwrap().current_stage,
        ProfileStage::Benched
    );
    // The project itself did not change stage.
    assert!(persistence.project_stage_history(project_id).unwrap().is_empty());
}
