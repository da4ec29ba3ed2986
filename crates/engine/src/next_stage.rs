// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Next-stage derivation for workers a project releases.
//!
//! When a project completes, short-closes, terminates after starting, or is
//! otherwise done with a worker, the worker's next profile stage depends on
//! what else the worker has going on. The rules run inside the releasing
//! operation's transaction so they see its own severing writes.

use crewflow_domain::{AssignmentStage, BatchStatus, ProfileStage};
use crewflow_persistence::{PersistenceError, SqliteConnection, queries};

/// Derives the profile stage a released worker lands on.
///
/// Priority order:
/// 1. Another active assignment on a live project keeps the worker in the
///    stage matching that assignment. The earliest-starting project wins.
/// 2. A live enrollment pins the worker to the training track.
/// 3. A release before the project ever started benches experienced workers
///    and returns first-timers to `Trained`.
/// 4. Everyone else goes to the bench.
///
/// # Errors
///
/// Returns an error if a lookup fails.
pub fn derive_next_stage(
    conn: &mut SqliteConnection,
    profile_id: i64,
    released_project_id: i64,
    project_started: bool,
) -> Result<ProfileStage, PersistenceError> {
    let mut others = queries::assignments::active_assignments_for_profile_excluding(
        conn,
        profile_id,
        released_project_id,
    )?;
    // Dated projects take priority over undated ones, earliest first.
    others.sort_by(|(_, a), (_, b)| match (a.start_date, b.start_date) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });

    if let Some((assignment, _)) = others.first() {
        let stage: ProfileStage = match assignment.stage {
            AssignmentStage::Matched => ProfileStage::Matched,
            AssignmentStage::Assigned => ProfileStage::Assigned,
            AssignmentStage::OnHold => ProfileStage::OnHold,
            _ => ProfileStage::OnSite,
        };
        return Ok(stage);
    }

    if let Some((_, batch)) = queries::training::active_enrollment_for_profile(conn, profile_id)? {
        let stage: ProfileStage = match batch.status {
            BatchStatus::Ongoing => ProfileStage::InTraining,
            _ => ProfileStage::TrainingScheduled,
        };
        return Ok(stage);
    }

    if !project_started {
        let experienced: bool =
            queries::assignments::has_completed_assignment(conn, profile_id, released_project_id)?;
        return Ok(if experienced {
            ProfileStage::Benched
        } else {
            ProfileStage::Trained
        });
    }

    Ok(ProfileStage::Benched)
}
