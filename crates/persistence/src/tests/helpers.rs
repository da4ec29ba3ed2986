// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crewflow_domain::{ProfileStage, ProjectStage};
use diesel::SqliteConnection;
use std::sync::atomic::{AtomicU64, Ordering};
use time::{Date, Month};

use crate::mutations::projects::NewProject;
use crate::{Persistence, mutations};

// Project codes are unique across the whole table.
static PROJECT_CODE_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn setup() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn date(year: i32, month: u8, day: u8) -> Date {
    Date::from_calendar_date(year, Month::try_from(month).unwrap(), day).unwrap()
}

pub fn seed_employer(conn: &mut SqliteConnection) -> i64 {
    mutations::employers::insert_employer(conn, "Acme Logistics").unwrap()
}

pub fn seed_profile(conn: &mut SqliteConnection, name: &str, stage: ProfileStage) -> i64 {
    mutations::profiles::insert_profile(conn, name, None, stage).unwrap()
}

pub fn seed_project(
    conn: &mut SqliteConnection,
    employer_id: i64,
    stage: ProjectStage,
    start_date: Option<Date>,
    end_date: Option<Date>,
) -> i64 {
    let code: String = format!(
        "PRJ-{:03}",
        PROJECT_CODE_COUNTER.fetch_add(1, Ordering::SeqCst)
    );
    mutations::projects::insert_project(
        conn,
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
