//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use wfc_core::NEW_USER;

use super::{Invariant, InvariantKind, InvariantResult, MonitorSnapshot, Violation};

/// Session table and active user index have identical key sets.
pub struct KeySetsMatch;

impl Invariant for KeySetsMatch {
    fn kind(&self) -> InvariantKind {
        InvariantKind::KeySetsMatch
    }

    fn check(&self, state: &MonitorSnapshot) -> InvariantResult {
        if state.occupied != state.indexed {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "session table {:?} vs active user index {:?}",
                    state.occupied, state.indexed
                ),
            });
        }
        Ok(())
    }
}

/// The call count never decreases within one day, and days never go back.
pub struct CallCountMonotonic;

impl Invariant for CallCountMonotonic {
    fn kind(&self) -> InvariantKind {
        InvariantKind::CallCountMonotonic
    }

    fn check(&self, state: &MonitorSnapshot) -> InvariantResult {
        for window in state.call_history.windows(2) {
            let (before, after) = (window[0], window[1]);
            let regressed = after.day < before.day
                || (after.day == before.day && after.count < before.count);
            if regressed {
                return Err(Violation {
                    invariant: self.kind(),
                    message: format!(
                        "{} calls on {} followed by {} calls on {}",
                        before.count, before.day, after.count, after.day
                    ),
                });
            }
        }
        Ok(())
    }
}

/// The signup placeholder is never reported as the last user.
pub struct LastUserNeverPlaceholder;

impl Invariant for LastUserNeverPlaceholder {
    fn kind(&self) -> InvariantKind {
        InvariantKind::LastUserNeverPlaceholder
    }

    fn check(&self, state: &MonitorSnapshot) -> InvariantResult {
        if state.last_logged_off.as_deref() == Some(NEW_USER) {
            return Err(Violation {
                invariant: self.kind(),
                message: format!("last logged-off user is {NEW_USER:?}"),
            });
        }
        Ok(())
    }
}

/// A full redraw covers exactly nodes `1..=max_nodes`, in order.
pub struct DisplayedNodesInRange;

impl Invariant for DisplayedNodesInRange {
    fn kind(&self) -> InvariantKind {
        InvariantKind::DisplayedNodesInRange
    }

    fn check(&self, state: &MonitorSnapshot) -> InvariantResult {
        let expected: Vec<_> = (1..=state.max_nodes).collect();
        if state.displayed != expected {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "displayed {:?} with max_nodes {}",
                    state.displayed, state.max_nodes
                ),
            });
        }
        Ok(())
    }
}
