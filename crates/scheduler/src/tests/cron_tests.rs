// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Scheduler, SchedulerConfig, SchedulerError, parse_cron};

#[test]
fn test_parse_cron_midnight() {
    assert!(parse_cron("0 0 * * *").is_ok());
}

#[test]
fn test_parse_cron_weekdays_8am() {
    assert!(parse_cron("0 8 * * 1-5").is_ok());
}

#[test]
fn test_parse_cron_invalid() {
    let result = parse_cron("not a cron");
    match result {
        Err(SchedulerError::InvalidCron { expr, .. }) => assert_eq!(expr, "not a cron"),
        other => panic!("Expected InvalidCron, got {other:?}"),
    }
}

#[test]
fn test_default_config_builds_a_schedule() {
    let scheduler = Scheduler::new(&SchedulerConfig::default()).unwrap();
    assert!(scheduler.next_run().is_some());
    assert!(scheduler.local_today().is_ok());
}

#[test]
fn test_invalid_timezone_is_rejected() {
    let config = SchedulerConfig {
        timezone: String::from("Mars/Olympus_Mons"),
        ..SchedulerConfig::default()
    };
    match Scheduler::new(&config) {
        Err(SchedulerError::InvalidTimezone(name)) => assert_eq!(name, "Mars/Olympus_Mons"),
        other => panic!("Expected InvalidTimezone, got {other:?}"),
    }
}
