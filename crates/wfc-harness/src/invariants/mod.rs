//! Invariant checking for deterministic simulation testing.
//!
//! Invariants are properties that must always hold while the monitor runs.
//! Unlike example-based tests that check specific scenarios, invariants
//! verify behavioral properties across every generated log.
//!
//! # Usage
//!
//! ```
//! use wfc_core::{Monitor, MonitorConfig, SystemClock};
//! use wfc_harness::{InvariantRegistry, Observer};
//!
//! let registry = InvariantRegistry::standard();
//! let mut observer = Observer::new();
//! let mut monitor = Monitor::new(&MonitorConfig::new(4), SystemClock);
//!
//! monitor.ingest("INFO: bob logged in on node 1");
//! registry.assert_all(&observer.observe(&monitor), "after login");
//! ```

mod checks;
mod snapshot;

use std::fmt;

pub use checks::{CallCountMonotonic, DisplayedNodesInRange, KeySetsMatch, LastUserNeverPlaceholder};
pub use snapshot::{MonitorSnapshot, Observer};

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Which invariant was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantKind {
    /// Session table and active user index keys diverged.
    KeySetsMatch,
    /// Call count went down within a day, or the day went back.
    CallCountMonotonic,
    /// Signup placeholder reported as last user.
    LastUserNeverPlaceholder,
    /// Full redraw rows are not exactly `1..=max_nodes`.
    DisplayedNodesInRange,
}

impl fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InvariantKind::KeySetsMatch => "key_sets_match",
            InvariantKind::CallCountMonotonic => "call_count_monotonic",
            InvariantKind::LastUserNeverPlaceholder => "last_user_never_placeholder",
            InvariantKind::DisplayedNodesInRange => "displayed_nodes_in_range",
        };
        f.write_str(name)
    }
}

/// Invariant violation with context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Violated invariant.
    pub invariant: InvariantKind,
    /// Description of what went wrong.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// An invariant that can be checked against monitor state.
pub trait Invariant: Send + Sync {
    /// Which invariant this is.
    fn kind(&self) -> InvariantKind;

    /// Check the invariant against a snapshot.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing what went wrong.
    fn check(&self, state: &MonitorSnapshot) -> InvariantResult;
}

/// Registry of invariants to check.
#[derive(Default)]
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every standard invariant.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(KeySetsMatch);
        registry.add(CallCountMonotonic);
        registry.add(LastUserNeverPlaceholder);
        registry.add(DisplayedNodesInRange);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against the given state.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, state: &MonitorSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking with every violation.
    ///
    /// # Panics
    ///
    /// Panics if any invariant is violated.
    #[allow(clippy::panic)]
    pub fn assert_all(&self, state: &MonitorSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_invariants() {
        assert_eq!(InvariantRegistry::standard().len(), 4);
    }

    #[test]
    fn empty_snapshot_passes_invariants() {
        let registry = InvariantRegistry::standard();
        assert!(registry.check_all(&MonitorSnapshot::empty()).is_ok());
    }
}
