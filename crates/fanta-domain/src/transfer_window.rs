//! Transfer windows and the market gate
//!
//! A window is an administratively configured interval during which roster
//! composition may change. The engine only flips `active` (via [`reconcile`]);
//! [`is_open`] requires a window to be both flagged active and covering the
//! instant asked about.

use crate::{EngineError, WindowId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An interval during which transfers are permitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferWindow {
    /// Unique identifier
    pub id: WindowId,
    /// First instant of the window
    pub start: DateTime<Utc>,
    /// Last instant of the window
    pub end: DateTime<Utc>,
    /// Engine-maintained activity flag
    pub active: bool,
}

impl TransferWindow {
    /// Create a window, rejecting empty or inverted intervals
    ///
    /// New windows start flagged active; reconciliation corrects the flag once
    /// the window has ended.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, EngineError> {
        if start >= end {
            return Err(EngineError::Validation(format!(
                "transfer window start {} must be before end {}",
                start, end
            )));
        }
        Ok(Self {
            id: WindowId::new(),
            start,
            end,
            active: true,
        })
    }

    /// Whether `now` lies within `[start, end]`
    pub fn covers(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now <= self.end
    }
}

/// Windows whose flag changed during a reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowTransitions {
    /// Windows switched on
    pub opened: Vec<WindowId>,
    /// Windows switched off
    pub closed: Vec<WindowId>,
}

impl WindowTransitions {
    /// True when nothing changed
    pub fn is_empty(&self) -> bool {
        self.opened.is_empty() && self.closed.is_empty()
    }
}

/// Bring every window's `active` flag in line with `now`
///
/// Activates windows with `start <= now < end` that are inactive and
/// deactivates active windows with `now >= end`. Running it again with the
/// same `now` changes nothing.
pub fn reconcile(windows: &mut [TransferWindow], now: DateTime<Utc>) -> WindowTransitions {
    let mut transitions = WindowTransitions::default();

    for window in windows.iter_mut() {
        if !window.active && window.start <= now && now < window.end {
            window.active = true;
            transitions.opened.push(window.id);
        } else if window.active && now >= window.end {
            window.active = false;
            transitions.closed.push(window.id);
        }
    }

    transitions
}

/// Whether transfers are permitted at `now`
pub fn is_open(windows: &[TransferWindow], now: DateTime<Utc>) -> bool {
    windows.iter().any(|w| w.active && w.covers(now))
}

/// Earliest start among active windows that begin after `now`
pub fn next_opening(windows: &[TransferWindow], now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    windows
        .iter()
        .filter(|w| w.active && w.start > now)
        .map(|w| w.start)
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 1, hour, 0, 0).unwrap()
    }

    fn window(start: u32, end: u32, active: bool) -> TransferWindow {
        let mut w = TransferWindow::new(at(start), at(end)).unwrap();
        w.active = active;
        w
    }

    #[test]
    fn test_new_rejects_inverted_interval() {
        assert!(TransferWindow::new(at(10), at(10)).is_err());
        assert!(TransferWindow::new(at(11), at(10)).is_err());
    }

    #[test]
    fn test_reconcile_activates_and_deactivates() {
        let mut windows = vec![window(8, 12, false), window(2, 6, true)];

        let transitions = reconcile(&mut windows, at(9));

        assert!(windows[0].active);
        assert!(!windows[1].active);
        assert_eq!(transitions.opened, vec![windows[0].id]);
        assert_eq!(transitions.closed, vec![windows[1].id]);
    }

    #[test]
    fn test_reconcile_end_is_exclusive_for_activation() {
        let mut windows = vec![window(8, 12, false)];
        let transitions = reconcile(&mut windows, at(12));
        assert!(!windows[0].active);
        assert!(transitions.is_empty());
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut windows = vec![window(8, 12, false), window(2, 6, true), window(14, 16, true)];
        reconcile(&mut windows, at(9));
        let snapshot = windows.clone();

        let second = reconcile(&mut windows, at(9));

        assert!(second.is_empty());
        assert_eq!(windows, snapshot);
    }

    #[test]
    fn test_is_open_requires_flag_and_coverage() {
        let inactive = vec![window(8, 12, false)];
        assert!(!is_open(&inactive, at(9)));

        let active_elsewhere = vec![window(14, 16, true)];
        assert!(!is_open(&active_elsewhere, at(9)));

        let open = vec![window(8, 12, true)];
        assert!(is_open(&open, at(9)));
        assert!(is_open(&open, at(12)));
        assert!(!is_open(&open, at(12) + Duration::seconds(1)));
    }

    #[test]
    fn test_next_opening_picks_earliest_active_future_start() {
        let windows = vec![window(20, 22, true), window(14, 16, true), window(10, 11, false)];
        assert_eq!(next_opening(&windows, at(9)), Some(at(14)));
        assert_eq!(next_opening(&windows, at(21)), None);
    }

    fn window_strategy() -> impl Strategy<Value = TransferWindow> {
        (0i64..400, 1i64..120, any::<bool>()).prop_map(|(offset, length, active)| {
            let start = at(0) + Duration::hours(offset);
            let mut w = TransferWindow::new(start, start + Duration::hours(length)).unwrap();
            w.active = active;
            w
        })
    }

    proptest! {
        #[test]
        fn prop_reconcile_twice_flips_nothing(
            mut windows in prop::collection::vec(window_strategy(), 0..12),
            hours in 0i64..600,
        ) {
            let now = at(0) + Duration::hours(hours);
            reconcile(&mut windows, now);
            let snapshot = windows.clone();

            let second = reconcile(&mut windows, now);

            prop_assert!(second.is_empty());
            prop_assert_eq!(windows, snapshot);
        }

        #[test]
        fn prop_reconciled_flags_match_the_clock(
            mut windows in prop::collection::vec(window_strategy(), 0..12),
            hours in 0i64..600,
        ) {
            let now = at(0) + Duration::hours(hours);
            reconcile(&mut windows, now);

            for w in &windows {
                // windows that have not started keep whatever flag they had
                if now >= w.end {
                    prop_assert!(!w.active);
                } else if w.start <= now {
                    prop_assert!(w.active);
                }
            }
        }
    }
}
