// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crewflow_domain::{AssignmentStage, ProfileStage, ProjectStage};
use crewflow_persistence::{NewProject, Persistence, mutations};
use std::sync::atomic::{AtomicU64, Ordering};
use time::{Date, Month};

static CODE_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn setup() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn date(year: i32, month: u8, day: u8) -> Date {
    Date::from_calendar_date(year, Month::try_from(month).unwrap(), day).unwrap()
}

pub fn seed_project(
    persistence: &mut Persistence,
    stage: ProjectStage,
    start_date: Option<Date>,
    end_date: Option<Date>,
) -> i64 {
    let employer_id: i64 =
        mutations::employers::insert_employer(persistence.connection(), "Acme Logistics").unwrap();
    let code: String = format!("PRJ-{:03}", CODE_COUNTER.fetch_add(1, Ordering::SeqCst));
    mutations::projects::insert_project(
        persistence.connection(),
        &NewProject {
            project_code: &code,
            employer_id,
            name: "Warehouse expansion",
            stage,
            start_date,
            end_date,
        },
    )
    .unwrap()
}

pub fn seed_worker(persistence: &mut Persistence, name: &str, stage: ProfileStage) -> i64 {
    mutations::profiles::insert_profile(persistence.connection(), name, None, stage).unwrap()
}

pub fn add_assignment(
    persistence: &mut Persistence,
    project_id: i64,
    profile_id: i64,
    stage: AssignmentStage,
) -> i64 {
    mutations::assignments::insert_assignment(
        persistence.connection(),
        project_id,
        profile_id,
        stage,
    )
    .unwrap()
}

pub fn seed_batch(
    persistence: &mut Persistence,
    start_date: Option<Date>,
    end_date: Option<Date>,
) -> i64 {
    let code: String = format!("BATCH-{:03}", CODE_COUNTER.fetch_add(1, Ordering::SeqCst));
    mutations::training::insert_batch(
        persistence.connection(),
        &code,
        "Forklift certification",
        start_date,
        end_date,
    )
    .unwrap()
}
