//! Scenario tests for the monitor's observable behavior.
//!
//! Each test drives a short, hand-written log through a monitor with a
//! manual clock and checks what the operator would see.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use wfc_core::{
    Classifier, Monitor, MonitorConfig, NodeRow, SessionStatus, Summary, count_todays_calls,
};
use wfc_harness::{InvariantRegistry, ManualClock, Observer};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

fn line(body: &str) -> String {
    format!("2024-05-01 09:30:00 INFO: {body}")
}

fn monitor_with(excluded: &[&str]) -> (Monitor<ManualClock>, ManualClock) {
    let clock = ManualClock::new(day());
    let config = MonitorConfig {
        excluded_users: excluded.iter().map(|u| u.to_string()).collect::<BTreeSet<_>>(),
        ..MonitorConfig::new(4)
    };
    (Monitor::new(&config, clock.clone()), clock)
}

#[test]
fn caller_walks_through_a_session() {
    let (mut monitor, _) = monitor_with(&[]);
    let registry = InvariantRegistry::standard();
    let mut observer = Observer::new();

    let steps = [
        (line("Connection From: 1.2.3.4 on Node 1"), SessionStatus::new("Unknown User", "1.2.3.4")),
        (line("bob logged in on node 1"), SessionStatus::new("bob", "logging in...")),
        (
            line("bob loading menu menus/main_menu.toml on node 1"),
            SessionStatus::new("bob", "At Main_menu"),
        ),
        (line("bob running door lord on node 1"), SessionStatus::new("bob", "At Lord")),
    ];

    for (log, expected) in steps {
        monitor.ingest(&log);
        registry.assert_all(&observer.observe(&monitor), &log);
        assert_eq!(monitor.sessions().status(1), Some(&expected), "after {log}");
    }

    monitor.ingest(&line("Node 1 logged off"));
    registry.assert_all(&observer.observe(&monitor), "after logoff");

    let snapshot = monitor.tick().unwrap();
    assert_eq!(snapshot.rows, vec![NodeRow { node: 1, status: None }]);
    assert_eq!(
        snapshot.summary,
        Summary { last_logged_off: Some("bob".into()), todays_calls: 1 }
    );
}

#[test]
fn signup_never_becomes_last_user() {
    let (mut monitor, _) = monitor_with(&[]);
    monitor.ingest(&line("Connection From: 5.6.7.8 on Node 2"));
    monitor.ingest(&line("New user signing up on node 2"));
    assert_eq!(
        monitor.sessions().status(2),
        Some(&SessionStatus::new("New User", "Signing up..."))
    );

    monitor.ingest(&line("Node 2 logged off"));
    assert_eq!(monitor.stats().last_logged_off(), None);
    assert!(monitor.sessions().is_empty());
}

#[test]
fn repeat_callers_count_every_login() {
    let (mut monitor, _) = monitor_with(&[]);
    for user in ["alice", "bob", "alice"] {
        monitor.ingest(&line(&format!("{user} logged in on node 1")));
        monitor.ingest(&line("Node 1 logged off"));
    }
    assert_eq!(monitor.stats().calls().count, 3);
    assert_eq!(monitor.stats().last_logged_off(), Some("alice"));
}

#[test]
fn excluded_user_is_not_counted() {
    let (mut monitor, _) = monitor_with(&["sysop"]);
    monitor.ingest(&line("sysop logged in on node 1"));
    monitor.ingest(&line("alice logged in on node 2"));
    monitor.ingest(&line("Node 1 logged off"));

    assert_eq!(monitor.stats().calls().count, 1);
    assert_eq!(monitor.stats().last_logged_off(), Some("sysop"));
}

#[test]
fn midnight_resets_the_count_on_next_tick() {
    let (mut monitor, clock) = monitor_with(&[]);
    monitor.ingest(&line("alice logged in on node 1"));
    monitor.tick();
    assert_eq!(monitor.stats().calls().count, 1);

    clock.advance_days(1);
    let snapshot = monitor.tick().unwrap();
    assert!(snapshot.rows.is_empty());
    assert_eq!(snapshot.summary.todays_calls, 0);

    // A login stamped yesterday but seen after midnight does not count.
    monitor.ingest(&line("bob logged in on node 2"));
    assert_eq!(monitor.stats().calls().count, 0);
    monitor.ingest("2024-05-02 00:00:07 INFO: carol logged in on node 3");
    assert_eq!(monitor.stats().calls().count, 1);
}

#[test]
fn login_stamped_after_midnight_before_the_clock_turns_still_counts() {
    let (mut monitor, clock) = monitor_with(&[]);
    let lines = [
        "2024-05-01 23:59:58 INFO: alice logged in on node 1",
        "2024-05-02 00:00:01 INFO: bob logged in on node 2",
    ];
    for log in lines {
        monitor.ingest(log);
    }
    assert_eq!(monitor.stats().calls().count, 1);

    let next = clock.advance_days(1);
    let snapshot = monitor.tick().unwrap();
    let rescan = count_todays_calls(lines, &Classifier::new(), next, &BTreeSet::new());
    assert_eq!(rescan, 1);
    assert_eq!(snapshot.summary.todays_calls, rescan);
}

#[test]
fn seeded_history_sets_summary_but_not_sessions() {
    let (mut monitor, _) = monitor_with(&[]);
    let history = [
        line("dave logged in on node 1"),
        line("Node 1 logged off"),
        line("erin logged in on node 2"),
        "2024-04-30 23:59:59 INFO: frank logged in on node 3".to_string(),
    ];
    monitor.seed(&history);

    assert!(monitor.sessions().is_empty());
    let snapshot = monitor.redraw();
    assert_eq!(snapshot.summary.last_logged_off.as_deref(), Some("dave"));
    assert_eq!(snapshot.summary.todays_calls, 2);
    assert!(snapshot.rows.iter().all(|row| row.status.is_none()));
    assert_eq!(monitor.tick(), None);
}

#[test]
fn undisplayed_node_still_updates_summary() {
    let (mut monitor, _) = monitor_with(&[]);
    monitor.ingest(&line("zed logged in on node 12"));
    monitor.ingest(&line("Node 12 logged off"));

    let snapshot = monitor.tick().unwrap();
    assert!(snapshot.rows.is_empty());
    assert_eq!(snapshot.summary.last_logged_off.as_deref(), Some("zed"));
    assert_eq!(snapshot.summary.todays_calls, 1);
}
