// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Countdown to the registration deadline.
//!
//! The deadline is January 10 of the year after the current one, on the
//! host's local clock, recomputed on every tick. Once the deadline passes
//! the closed state latches for the rest of the process lifetime and
//! overrides anything the submitter or status checker would set.

use chrono::{DateTime, Datelike, Local, LocalResult, NaiveDate, TimeZone};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Replaces the countdown display once the deadline has passed.
pub const REGISTRATION_CLOSED_MESSAGE: &str = "REGISTRATION CLOSED!";

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// Whole days/hours/minutes/seconds remaining until the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// The deadline instant relative to `now`: January 10 of the following
/// year, midnight local time.
pub fn target_instant(now: &DateTime<Local>) -> DateTime<Local> {
    let naive = NaiveDate::from_ymd_opt(now.year() + 1, 1, 10)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("January 10 exists in every year");

    match now.timezone().from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        // Midnight skipped by a DST jump: land just after the gap
        LocalResult::None => now
            .timezone()
            .from_local_datetime(&(naive + chrono::Duration::hours(1)))
            .earliest()
            .unwrap_or(*now),
    }
}

/// Break a millisecond distance into display parts.
///
/// Returns `None` once the distance is negative, which latches the
/// closed state in the caller.
pub fn split_millis(distance_ms: i64) -> Option<CountdownParts> {
    if distance_ms < 0 {
        return None;
    }

    Some(CountdownParts {
        days: distance_ms / MS_PER_DAY,
        hours: (distance_ms % MS_PER_DAY) / MS_PER_HOUR,
        minutes: (distance_ms % MS_PER_HOUR) / MS_PER_MINUTE,
        seconds: (distance_ms % MS_PER_MINUTE) / MS_PER_SECOND,
    })
}

/// Time remaining until the deadline, or `None` when it has passed.
pub fn remaining(now: DateTime<Local>) -> Option<CountdownParts> {
    let distance = target_instant(&now) - now;
    split_millis(distance.num_milliseconds())
}

/// Rendered countdown, each unit as a two-digit zero-padded string.
#[derive(Debug, Clone, Serialize)]
pub struct CountdownView {
    pub closed: bool,
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CountdownView {
    fn open(parts: CountdownParts) -> Self {
        Self {
            closed: false,
            days: format!("{:02}", parts.days),
            hours: format!("{:02}", parts.hours),
            minutes: format!("{:02}", parts.minutes),
            seconds: format!("{:02}", parts.seconds),
            message: None,
        }
    }

    fn closed() -> Self {
        Self {
            closed: true,
            days: "00".to_string(),
            hours: "00".to_string(),
            minutes: "00".to_string(),
            seconds: "00".to_string(),
            message: Some(REGISTRATION_CLOSED_MESSAGE.to_string()),
        }
    }
}

/// Shared countdown state: the latest rendered view plus the permanent
/// closed latch checked by the submission path.
pub struct CountdownClock {
    view: RwLock<CountdownView>,
    closed: AtomicBool,
}

impl CountdownClock {
    /// Create the clock and render the first view immediately.
    pub fn new() -> Self {
        let clock = Self {
            view: RwLock::new(CountdownView::closed()),
            closed: AtomicBool::new(false),
        };
        clock.tick(Local::now());
        clock
    }

    /// Clock that is already past the deadline (the latch starts set).
    pub fn new_closed() -> Self {
        Self {
            view: RwLock::new(CountdownView::closed()),
            closed: AtomicBool::new(true),
        }
    }

    /// Recompute the view for `now`. Returns true once closed.
    pub fn tick(&self, now: DateTime<Local>) -> bool {
        if self.closed.load(Ordering::SeqCst) {
            return true;
        }

        match remaining(now) {
            Some(parts) => {
                *self.view.write().expect("countdown lock poisoned") = CountdownView::open(parts);
                false
            }
            None => {
                // Latch: nothing re-enables registration after this
                self.closed.store(true, Ordering::SeqCst);
                *self.view.write().expect("countdown lock poisoned") = CountdownView::closed();
                tracing::info!("Registration deadline passed, submissions disabled");
                true
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn view(&self) -> CountdownView {
        self.view.read().expect("countdown lock poisoned").clone()
    }
}

impl Default for CountdownClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Tick once a second until the deadline passes, then stop.
pub async fn run(clock: Arc<CountdownClock>) {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    loop {
        interval.tick().await;
        if clock.tick(Local::now()) {
            break;
        }
    }
}
