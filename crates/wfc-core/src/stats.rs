//! Derived statistics: today's call count and the last user to log off.
//!
//! The call count is maintained incrementally after one startup scan. The
//! rule is the same on both paths: a line counts when it classifies as a
//! login, its date prefix equals today (local time), and the user is not
//! excluded. [`count_todays_calls`] is the full-rescan reference and the
//! incremental path must always agree with it.
//!
//! Logins dated after the current day (log timestamps running ahead of the
//! local clock) are held per date and become the new day's starting count at
//! rollover, so the rescan of the final day still matches.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::{Classifier, Event, SessionStore, Summary, line_date};

/// Default number of trailing log lines scanned for the last logged-off user.
pub const DEFAULT_HISTORY_WINDOW: usize = 200;

/// Qualifying logins seen on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCallCounter {
    /// Day being counted.
    pub day: NaiveDate,
    /// Qualifying logins on `day`.
    pub count: u64,
}

impl DailyCallCounter {
    /// Zero count for `day`.
    pub fn new(day: NaiveDate) -> Self {
        Self { day, count: 0 }
    }
}

/// Count qualifying logins dated `today` by scanning every line.
pub fn count_todays_calls<I>(
    lines: I,
    classifier: &Classifier,
    today: NaiveDate,
    excluded: &BTreeSet<String>,
) -> u64
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut count = 0;
    for line in lines {
        let line = line.as_ref();
        if line_date(line) != Some(today) {
            continue;
        }
        if let Some(Event::Login { user, .. }) = classifier.classify(line)
            && !excluded.contains(&user)
        {
            count += 1;
        }
    }
    count
}

/// Most recent completed login/disconnect pair within the last `window`
/// lines, reconstructed against a scratch session store.
pub fn last_logged_off_in<S: AsRef<str>>(
    lines: &[S],
    window: usize,
    classifier: &Classifier,
) -> Option<String> {
    let start = lines.len().saturating_sub(window);
    let mut scratch = SessionStore::new();
    let mut last = None;

    for line in &lines[start..] {
        if let Some(event) = classifier.classify(line.as_ref())
            && let Some(user) = scratch.apply(&event).logged_off
        {
            last = Some(user);
        }
    }
    last
}

/// Owner of the two derived statistics.
#[derive(Debug, Clone)]
pub struct StatsAggregator {
    excluded: BTreeSet<String>,
    calls: DailyCallCounter,
    ahead: BTreeMap<NaiveDate, u64>,
    last_logged_off: Option<String>,
}

impl StatsAggregator {
    /// Empty statistics for `today`.
    pub fn new(today: NaiveDate, excluded: BTreeSet<String>) -> Self {
        Self {
            excluded,
            calls: DailyCallCounter::new(today),
            ahead: BTreeMap::new(),
            last_logged_off: None,
        }
    }

    /// Seed both statistics from the log contents at startup.
    ///
    /// The call count comes from a full scan of `lines`; the last logged-off
    /// user from the final `window` lines only. A log longer than `window`
    /// may hide an older disconnect; that is an accepted accuracy trade-off.
    pub fn seed<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        window: usize,
        classifier: &Classifier,
        today: NaiveDate,
    ) {
        self.calls = DailyCallCounter::new(today);
        self.ahead.clear();
        for line in lines {
            let line = line.as_ref();
            if let Some(Event::Login { user, .. }) = classifier.classify(line) {
                self.count_login(line_date(line), &user);
            }
        }
        let count = self.calls.count;
        self.last_logged_off = last_logged_off_in(lines, window, classifier);

        tracing::info!(
            %today,
            todays_calls = count,
            last_user = self.last_logged_off.as_deref().unwrap_or("None"),
            scanned = lines.len(),
            "seeded statistics"
        );
    }

    /// Start a new counter when the calendar day changed.
    ///
    /// The new count is re-seeded from logins already seen that are dated
    /// `today`; held counts for earlier days are dropped. Returns `true` when
    /// a rollover happened.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.calls.day == today {
            return false;
        }

        let mut later = self.ahead.split_off(&today);
        let count = later.remove(&today).unwrap_or(0);
        self.ahead = later;

        tracing::info!(from = %self.calls.day, to = %today, todays_calls = count, "day rollover");
        self.calls = DailyCallCounter { day: today, count };
        true
    }

    /// Record a login seen live. Returns `true` when it counted towards
    /// today's calls.
    pub fn record_login(&mut self, date: Option<NaiveDate>, user: &str, today: NaiveDate) -> bool {
        self.roll_over(today);
        self.count_login(date, user)
    }

    fn count_login(&mut self, date: Option<NaiveDate>, user: &str) -> bool {
        let Some(date) = date else {
            return false;
        };
        if date < self.calls.day || self.excluded.contains(user) {
            return false;
        }
        if date == self.calls.day {
            self.calls.count += 1;
            true
        } else {
            *self.ahead.entry(date).or_default() += 1;
            false
        }
    }

    /// Record the identity of a completed session.
    pub fn record_logoff(&mut self, user: String) {
        self.last_logged_off = Some(user);
    }

    /// Current counter.
    pub fn calls(&self) -> DailyCallCounter {
        self.calls
    }

    /// Most recent user to complete a session.
    pub fn last_logged_off(&self) -> Option<&str> {
        self.last_logged_off.as_deref()
    }

    /// Read-only copy for rendering.
    pub fn summary(&self) -> Summary {
        Summary { last_logged_off: self.last_logged_off.clone(), todays_calls: self.calls.count }
    }
}
