//! Runtime behavior tests.
//!
//! The full pipeline runs against a scripted source and a recording sink
//! under a paused tokio clock, so redraw timing is exact and every test is
//! deterministic.

use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::mpsc;
use wfc_app::{Control, Runtime};
use wfc_core::{Monitor, MonitorConfig, SessionStatus};
use wfc_harness::{ManualClock, RecordingSink, SimSource};

const REDRAW: Duration = Duration::from_millis(500);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn line(body: &str) -> String {
    format!("2024-05-01 21:00:00 INFO: {body}")
}

fn monitor() -> Monitor<ManualClock> {
    let clock = ManualClock::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    Monitor::new(&MonitorConfig::new(4), clock)
}

/// Runtime that stops once the script is exhausted and the screen is
/// up to date.
fn runtime(
    source: SimSource,
    sink: RecordingSink,
) -> (Runtime<SimSource, RecordingSink, ManualClock>, mpsc::Sender<Control>) {
    let (tx, rx) = mpsc::channel(8);
    let runtime = Runtime::new(monitor(), source, sink, rx, REDRAW).exit_when_drained(true);
    (runtime, tx)
}

#[tokio::test(start_paused = true)]
async fn first_render_is_full() {
    let sink = RecordingSink::new();
    let (runtime, _tx) = runtime(SimSource::new(), sink.clone());

    runtime.run().await.unwrap();

    let snapshots = sink.snapshots();
    assert_eq!(snapshots.len(), 1);
    assert!(snapshots[0].full);
    assert_eq!(snapshots[0].rows.iter().map(|r| r.node).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    assert!(snapshots[0].rows.iter().all(|r| r.display().is_idle()));
}

#[tokio::test(start_paused = true)]
async fn changes_within_one_interval_coalesce() {
    let source = SimSource::new()
        .line(ms(10), line("Connection From: 1.2.3.4 on Node 1"))
        .line(ms(20), line("bob logged in on node 1"))
        .line(ms(30), line("bob loading menu menus/main.toml on node 1"));
    let sink = RecordingSink::new();
    let (runtime, _tx) = runtime(source, sink.clone());

    runtime.run().await.unwrap();

    let snapshots = sink.snapshots();
    assert_eq!(snapshots.len(), 2, "initial render plus one coalesced tick");
    assert!(!snapshots[1].full);
    assert_eq!(snapshots[1].rows.len(), 1);
    assert_eq!(snapshots[1].rows[0].status, Some(SessionStatus::new("bob", "At Main")));
    assert_eq!(snapshots[1].summary.todays_calls, 1);
}

#[tokio::test(start_paused = true)]
async fn changes_in_separate_intervals_render_separately() {
    let source = SimSource::new()
        .line(ms(100), line("alice logged in on node 2"))
        .line(ms(700), line("Node 2 logged off"));
    let sink = RecordingSink::new();
    let (runtime, _tx) = runtime(source, sink.clone());

    runtime.run().await.unwrap();

    assert_eq!(sink.render_count(), 3);
    let screen = sink.screen();
    assert_eq!(screen.row(2), Some(&SessionStatus::idle()));
    assert_eq!(screen.summary().last_logged_off.as_deref(), Some("alice"));
}

#[tokio::test(start_paused = true)]
async fn quiet_ticks_render_nothing() {
    let source = SimSource::new()
        .line(ms(10), line("alice logged in on node 1"))
        .line(ms(5_000), line("DEBUG: idle"));
    let sink = RecordingSink::new();
    let (runtime, _tx) = runtime(source, sink.clone());

    runtime.run().await.unwrap();

    assert_eq!(sink.render_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn source_errors_do_not_stop_ingestion() {
    let source = SimSource::new()
        .line(ms(10), line("bob logged in on node 3"))
        .error(ms(20), "disk hiccup")
        .line(ms(30), line("Node 3 logged off"));
    let sink = RecordingSink::new();
    let (runtime, _tx) = runtime(source, sink.clone());

    let monitor = runtime.run().await.unwrap();

    assert_eq!(monitor.stats().last_logged_off(), Some("bob"));
    assert_eq!(sink.screen().summary().last_logged_off.as_deref(), Some("bob"));
}

#[tokio::test(start_paused = true)]
async fn sink_errors_are_fatal() {
    let source = SimSource::new().line(ms(10), line("bob logged in on node 1"));
    let (runtime, _tx) = runtime(source, RecordingSink::failing_after(1));

    let err = runtime.run().await.unwrap_err();
    assert_eq!(err.rendered, 1);
}

#[tokio::test(start_paused = true)]
async fn quit_stops_the_pipeline() {
    let source = SimSource::new()
        .line(ms(100), line("alice logged in on node 1"))
        .line(Duration::from_secs(60), line("bob logged in on node 2"));
    let sink = RecordingSink::new();
    let (runtime, tx) = runtime(source, sink.clone());

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(2)).await;
        let _ = tx.send(Control::Quit).await;
    });
    let monitor = runtime.run().await.unwrap();

    assert_eq!(monitor.sessions().active_user(1), Some("alice"));
    assert_eq!(monitor.sessions().active_user(2), None);
}

#[tokio::test(start_paused = true)]
async fn redraw_request_renders_every_node() {
    let source = SimSource::new().line(Duration::from_secs(60), line("DEBUG: idle"));
    let sink = RecordingSink::new();
    let (runtime, tx) = runtime(source, sink.clone());

    tx.send(Control::Redraw).await.unwrap();
    tx.send(Control::Quit).await.unwrap();
    runtime.run().await.unwrap();

    let snapshots = sink.snapshots();
    assert_eq!(snapshots.len(), 2);
    assert!(snapshots.iter().all(|s| s.full && s.rows.len() == 4));
}

#[tokio::test(start_paused = true)]
async fn undisplayed_nodes_never_reach_the_sink() {
    let source = SimSource::new()
        .line(ms(10), line("eve logged in on node 9"))
        .line(ms(20), line("Node 9 logged off"));
    let sink = RecordingSink::new();
    let (runtime, _tx) = runtime(source, sink.clone());

    runtime.run().await.unwrap();

    for snapshot in sink.snapshots() {
        assert!(snapshot.rows.iter().all(|row| row.node <= 4));
    }
    assert_eq!(sink.screen().summary().last_logged_off.as_deref(), Some("eve"));
}

#[tokio::test(start_paused = true)]
async fn midnight_rollover_redraws_the_summary() {
    let clock = ManualClock::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    let mut monitor = Monitor::new(&MonitorConfig::new(2), clock.clone());
    monitor.ingest(&line("alice logged in on node 1"));

    let source = SimSource::new().line(Duration::from_secs(3), line("DEBUG: idle"));
    let sink = RecordingSink::new();
    let (_tx, rx) = mpsc::channel(1);
    let runtime = Runtime::new(monitor, source, sink.clone(), rx, REDRAW).exit_when_drained(true);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1_200)).await;
        clock.advance_days(1);
    });
    runtime.run().await.unwrap();

    let counts: Vec<u64> = sink.snapshots().iter().map(|s| s.summary.todays_calls).collect();
    assert_eq!(counts.first(), Some(&1));
    assert_eq!(counts.last(), Some(&0));
    assert_eq!(sink.screen().row(1).map(|s| s.user.as_str()), Some("alice"));
}
