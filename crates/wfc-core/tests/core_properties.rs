//! Property-based tests for the pure core.
//!
//! Classification and formatting must be total: arbitrary input never
//! panics, and the structural guarantees hold for every string.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use proptest::prelude::*;
use wfc_core::{
    Classifier, Event, LOCATION_PREFIX, SessionStore, StatsAggregator, UpdateScheduler,
    count_todays_calls, format_location,
};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

fn event_strategy() -> impl Strategy<Value = Event> {
    let node = 0u32..8;
    let user = "[a-z]{1,8}";
    prop_oneof![
        (node.clone(), "[0-9.]{1,15}")
            .prop_map(|(node, remote_addr)| Event::Connect { node, remote_addr }),
        (node.clone(), user).prop_map(|(node, user)| Event::Login { node, user }),
        node.clone().prop_map(|node| Event::NewUserSignup { node }),
        (node.clone(), user, "[a-z/._ ]{0,20}")
            .prop_map(|(node, user, menu)| Event::MenuChange { node, user, menu }),
        node.prop_map(|node| Event::Disconnect { node }),
    ]
}

proptest! {
    #[test]
    fn prop_classify_is_total_and_pure(line in any::<String>()) {
        let classifier = Classifier::new();
        let first = classifier.classify(&line);
        prop_assert_eq!(&first, &classifier.classify(&line));
        prop_assert_eq!(first, Classifier::new().classify(&line));
    }

    #[test]
    fn prop_classify_info_shaped_lines_is_pure(body in "[ -~]{0,60}") {
        let line = format!("2024-05-01 10:00:00 INFO: {body}");
        let classifier = Classifier::new();
        let first = classifier.classify(&line);
        prop_assert_eq!(&first, &classifier.classify(&line));
        prop_assert_eq!(first, Classifier::new().classify(&line));
    }

    #[test]
    fn prop_classify_event_shaped_lines_is_pure(
        user in "[a-z]{1,8}",
        node in 0u32..300,
        verb in prop::sample::select(vec!["logged in on", "loading menu main on", "running door lord on"]),
    ) {
        let line = format!("2024-05-01 10:00:00 INFO: {user} {verb} node {node}");
        let classifier = Classifier::new();
        let first = classifier.classify(&line);
        prop_assert!(first.is_some());
        prop_assert_eq!(&first, &classifier.classify(&line));
        prop_assert_eq!(first, Classifier::new().classify(&line));
    }

    #[test]
    fn prop_location_always_prefixed(raw in any::<String>()) {
        prop_assert!(format_location(&raw).starts_with(LOCATION_PREFIX));
    }

    #[test]
    fn prop_store_key_sets_match(events in prop::collection::vec(event_strategy(), 0..64)) {
        let mut store = SessionStore::new();
        for event in &events {
            store.apply(event);
            let occupied: BTreeSet<_> = store.occupied().map(|(node, _)| node).collect();
            let indexed: BTreeSet<_> = store.indexed_nodes().collect();
            prop_assert_eq!(occupied, indexed);
        }
    }

    #[test]
    fn prop_disconnect_always_idles(events in prop::collection::vec(event_strategy(), 0..32), node in 0u32..8) {
        let mut store = SessionStore::new();
        for event in &events {
            store.apply(event);
        }
        store.apply(&Event::Disconnect { node });
        prop_assert!(store.status(node).is_none());
        prop_assert!(store.active_user(node).is_none());
    }

    #[test]
    fn prop_drain_leaves_scheduler_clean(nodes in prop::collection::vec(0u32..16, 0..32)) {
        let mut scheduler = UpdateScheduler::new();
        for node in &nodes {
            scheduler.mark(*node);
        }
        let dirty = scheduler.drain();
        prop_assert_eq!(dirty.nodes.len(), nodes.iter().collect::<BTreeSet<_>>().len());
        prop_assert!(!scheduler.is_dirty());
    }

    #[test]
    fn prop_seed_counts_like_rescan(users in prop::collection::vec("[a-z]{1,6}", 0..20)) {
        let lines: Vec<String> = users
            .iter()
            .map(|u| format!("2024-05-01 08:00:00 INFO: {u} logged in on node 1"))
            .collect();
        let excluded = BTreeSet::from(["sysop".to_string()]);
        let classifier = Classifier::new();

        let mut stats = StatsAggregator::new(day(), excluded.clone());
        stats.seed(&lines, 200, &classifier, day());

        prop_assert_eq!(stats.calls().count, count_todays_calls(&lines, &classifier, day(), &excluded));
    }
}
