// src/controllers/mod.rs

//! Page controllers: each one owns the local state of a view, calls the
//! services it needs and exposes a read-only snapshot for rendering.

pub mod attempt;
pub mod community;
pub mod forms;
pub mod home;
pub mod leaderboard;
pub mod like;
pub mod membership;
pub mod profile;
pub mod results;
pub mod search;
pub mod take;

use std::sync::atomic::{AtomicBool, Ordering};

/// Held while a request is in flight; a second acquire fails until it drops.
pub(crate) struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_flight_is_exclusive_until_dropped() {
        let flag = AtomicBool::new(false);
        let guard = InFlight::acquire(&flag).unwrap();
        assert!(InFlight::acquire(&flag).is_none());
        drop(guard);
        assert!(InFlight::acquire(&flag).is_some());
    }
}
