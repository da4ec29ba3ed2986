// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crewflow_domain::{
    AssignmentStage, BatchStatus, EnrollmentStatus, HoldAttribution, ProfileStage, ProjectStage,
};

use crate::tests::helpers::{date, seed_employer, seed_profile, seed_project, setup};
use crate::{
    AssignmentRecord, BatchRecord, EnrollmentRecord, Persistence, PersistenceError, ProfileRecord,
    ProjectRecord, mutations, queries,
};

#[test]
fn test_profile_round_trip() {
    let mut persistence: Persistence = setup();
    let id: i64 = mutations::profiles::insert_profile(
        persistence.connection(),
        "Asha Rao",
        Some("CAND-0042"),
        ProfileStage::Screening,
    )
    .unwrap();

    let profile: ProfileRecord = persistence.get_profile(id).unwrap();
    assert_eq!(profile.full_name, "Asha Rao");
    assert_eq!(profile.candidate_code, Some("CAND-0042".to_string()));
    assert_eq!(profile.worker_code, None);
    assert_eq!(profile.current_stage, ProfileStage::Screening);
}

#[test]
fn test_soft_deleted_profile_is_invisible() {
    let mut persistence: Persistence = setup();
    let id: i64 = seed_profile(
        persistence.connection(),
        "Asha Rao",
        ProfileStage::Benched,
    );

    mutations::profiles::soft_delete_profile(persistence.connection(), id).unwrap();

    match persistence.get_profile(id) {
        Err(PersistenceError::NotFound(_)) => {}
        other => panic!("Expected NotFound, got {other:?}"),
    }

    // A second delete sees no live row either.
    match mutations::profiles::soft_delete_profile(persistence.connection(), id) {
        Err(PersistenceError::NotFound(_)) => {}
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_worker_code_is_recorded() {
    let mut persistence: Persistence = setup();
    let id: i64 = seed_profile(persistence.connection(), "Asha Rao", ProfileStage::Trained);

    mutations::profiles::set_worker_code(persistence.connection(), id, "WRK-7731").unwrap();

    let profile: ProfileRecord = persistence.get_profile(id).unwrap();
    assert_eq!(profile.worker_code, Some("WRK-7731".to_string()));
}

#[test]
fn test_project_round_trip_with_dates() {
    let mut persistence: Persistence = setup();
    let employer_id: i64 = seed_employer(persistence.connection());
    let id: i64 = seed_project(
        persistence.connection(),
        employer_id,
        ProjectStage::Approved,
        Some(date(2026, 3, 1)),
        Some(date(2026, 9, 30)),
    );

    let project: ProjectRecord = persistence.get_project(id).unwrap();
    assert!(project.project_code.starts_with("PRJ-"));
    assert_eq!(project.employer_id, employer_id);
    assert_eq!(project.stage, ProjectStage::Approved);
    assert_eq!(project.start_date, Some(date(2026, 3, 1)));
    assert_eq!(project.end_date, Some(date(2026, 9, 30)));
    assert_eq!(project.actual_start_date, None);
    assert_eq!(project.on_hold_attribution, None);
}

#[test]
fn test_hold_attribution_set_and_cleared() {
    let mut persistence: Persistence = setup();
    let employer_id: i64 = seed_employer(persistence.connection());
    let id: i64 = seed_project(
        persistence.connection(),
        employer_id,
        ProjectStage::Ongoing,
        None,
        None,
    );

    mutations::projects::set_hold_attribution(
        persistence.connection(),
        id,
        Some(HoldAttribution::ForceMajeure),
    )
    .unwrap();
    assert_eq!(
        persistence.get_project(id).unwrap().on_hold_attribution,
        Some(HoldAttribution::ForceMajeure)
    );

    mutations::projects::set_hold_attribution(persistence.connection(), id, None).unwrap();
    assert_eq!(
        persistence.get_project(id).unwrap().on_hold_attribution,
        None
    );
}

#[test]
fn test_active_assignments_exclude_closed_rows() {
    let mut persistence: Persistence = setup();
    let employer_id: i64 = seed_employer(persistence.connection());
    let project_id: i64 = seed_project(
        persistence.connection(),
        employer_id,
        ProjectStage::Ongoing,
        None,
        None,
    );
    let worker_a: i64 = seed_profile(persistence.connection(), "Asha Rao", ProfileStage::OnSite);
    let worker_b: i64 = seed_profile(persistence.connection(), "Benoit Ly", ProfileStage::OnSite);

    let kept: i64 = mutations::assignments::insert_assignment(
        persistence.connection(),
        project_id,
        worker_a,
        AssignmentStage::OnSite,
    )
    .unwrap();
    let closed: i64 = mutations::assignments::insert_assignment(
        persistence.connection(),
        project_id,
        worker_b,
        AssignmentStage::OnSite,
    )
    .unwrap();
    mutations::assignments::close_assignment(
        persistence.connection(),
        closed,
        AssignmentStage::Removed,
        "Left the roster",
    )
    .unwrap();

    let active: Vec<AssignmentRecord> = queries::assignments::active_assignments_for_project(
        persistence.connection(),
        project_id,
        None,
    )
    .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, kept);

    let removed: AssignmentRecord = persistence.get_assignment(closed).unwrap();
    assert_eq!(removed.stage, AssignmentStage::Removed);
    assert!(removed.removed_at.is_some());
    assert_eq!(removed.removal_reason, Some("Left the roster".to_string()));
}

#[test]
fn test_active_assignments_filter_by_stage() {
    let mut persistence: Persistence = setup();
    let employer_id: i64 = seed_employer(persistence.connection());
    let project_id: i64 = seed_project(
        persistence.connection(),
        employer_id,
        ProjectStage::Ongoing,
        None,
        None,
    );
    let worker_a: i64 = seed_profile(persistence.connection(), "Asha Rao", ProfileStage::OnSite);
    let worker_b: i64 = seed_profile(persistence.connection(), "Benoit Ly", ProfileStage::OnHold);

    mutations::assignments::insert_assignment(
        persistence.connection(),
        project_id,
        worker_a,
        AssignmentStage::OnSite,
    )
    .unwrap();
    let held: i64 = mutations::assignments::insert_assignment(
        persistence.connection(),
        project_id,
        worker_b,
        AssignmentStage::OnHold,
    )
    .unwrap();

    let on_hold: Vec<AssignmentRecord> = queries::assignments::active_assignments_for_project(
        persistence.connection(),
        project_id,
        Some(AssignmentStage::OnHold),
    )
    .unwrap();
    assert_eq!(on_hold.len(), 1);
    assert_eq!(on_hold[0].id, held);
}

#[test]
fn test_other_engagements_exclude_dead_projects() {
    let mut persistence: Persistence = setup();
    let employer_id: i64 = seed_employer(persistence.connection());
    let worker: i64 = seed_profile(persistence.connection(), "Asha Rao", ProfileStage::OnSite);

    let releasing: i64 = seed_project(
        persistence.connection(),
        employer_id,
        ProjectStage::Ongoing,
        None,
        None,
    );
    let live: i64 = seed_project(
        persistence.connection(),
        employer_id,
        ProjectStage::Ongoing,
        Some(date(2026, 1, 1)),
        None,
    );
    let finished: i64 = seed_project(
        persistence.connection(),
        employer_id,
        ProjectStage::Completed,
        None,
        None,
    );

    mutations::assignments::insert_assignment(
        persistence.connection(),
        releasing,
        worker,
        AssignmentStage::OnSite,
    )
    .unwrap();
    mutations::assignments::insert_assignment(
        persistence.connection(),
        live,
        worker,
        AssignmentStage::Assigned,
    )
    .unwrap();
    mutations::assignments::insert_assignment(
        persistence.connection(),
        finished,
        worker,
        AssignmentStage::OnSite,
    )
    .unwrap();

    let others = queries::assignments::active_assignments_for_profile_excluding(
        persistence.connection(),
        worker,
        releasing,
    )
    .unwrap();
    assert_eq!(others.len(), 1);
    assert_eq!(others[0].1.id, live);
    assert_eq!(others[0].0.stage, AssignmentStage::Assigned);
}

#[test]
fn test_has_completed_assignment_ignores_excluded_project() {
    let mut persistence: Persistence = setup();
    let employer_id: i64 = seed_employer(persistence.connection());
    let worker: i64 = seed_profile(persistence.connection(), "Asha Rao", ProfileStage::Benched);
    let project_id: i64 = seed_project(
        persistence.connection(),
        employer_id,
        ProjectStage::Completed,
        None,
        None,
    );

    let assignment: i64 = mutations::assignments::insert_assignment(
        persistence.connection(),
        project_id,
        worker,
        AssignmentStage::OnSite,
    )
    .unwrap();
    mutations::assignments::update_assignment_stage(
        persistence.connection(),
        assignment,
        AssignmentStage::Completed,
    )
    .unwrap();

    assert!(
        queries::assignments::has_completed_assignment(persistence.connection(), worker, 999)
            .unwrap()
    );
    assert!(
        !queries::assignments::has_completed_assignment(
            persistence.connection(),
            worker,
            project_id
        )
        .unwrap()
    );
}

#[test]
fn test_batch_and_enrollment_round_trip() {
    let mut persistence: Persistence = setup();
    let worker: i64 = seed_profile(persistence.connection(), "Asha Rao", ProfileStage::Approved);
    let batch_id: i64 = mutations::training::insert_batch(
        persistence.connection(),
        "BATCH-07",
        "Forklift certification",
        Some(date(2026, 4, 6)),
        Some(date(2026, 4, 24)),
    )
    .unwrap();

    let batch: BatchRecord = persistence.get_batch(batch_id).unwrap();
    assert_eq!(batch.status, BatchStatus::Scheduled);
    assert_eq!(batch.start_date, Some(date(2026, 4, 6)));

    let enrollment_id: i64 =
        mutations::training::insert_enrollment(persistence.connection(), batch_id, worker).unwrap();

    let active = queries::training::active_enrollment_for_profile(persistence.connection(), worker)
        .unwrap();
    let (enrollment, joined_batch): (EnrollmentRecord, BatchRecord) = active.unwrap();
    assert_eq!(enrollment.id, enrollment_id);
    assert_eq!(joined_batch.id, batch_id);

    mutations::training::update_enrollment_status(
        persistence.connection(),
        enrollment_id,
        EnrollmentStatus::Completed,
        Some(date(2026, 4, 24)),
    )
    .unwrap();

    let finished: EnrollmentRecord =
        queries::training::get_enrollment(persistence.connection(), enrollment_id).unwrap();
    assert_eq!(finished.status, EnrollmentStatus::Completed);
    assert_eq!(finished.completion_date, Some(date(2026, 4, 24)));
    assert!(
        queries::training::active_enrollment_for_profile(persistence.connection(), worker)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_enrollments_for_batch_filters_by_status() {
    let mut persistence: Persistence = setup();
    let worker_a: i64 = seed_profile(persistence.connection(), "Asha Rao", ProfileStage::Approved);
    let worker_b: i64 = seed_profile(persistence.connection(), "Benoit Ly", ProfileStage::Approved);
    let batch_id: i64 = mutations::training::insert_batch(
        persistence.connection(),
        "BATCH-07",
        "Forklift certification",
        None,
        None,
    )
    .unwrap();

    mutations::training::insert_enrollment(persistence.connection(), batch_id, worker_a).unwrap();
    let dropped: i64 =
        mutations::training::insert_enrollment(persistence.connection(), batch_id, worker_b)
            .unwrap();
    mutations::training::update_enrollment_status(
        persistence.connection(),
        dropped,
        EnrollmentStatus::Dropped,
        None,
    )
    .unwrap();

    let enrolled = queries::training::enrollments_for_batch(
        persistence.connection(),
        batch_id,
        EnrollmentStatus::Enrolled,
    )
    .unwrap();
    assert_eq!(enrolled.len(), 1);
    assert_eq!(enrolled[0].profile_id, worker_a);
}
