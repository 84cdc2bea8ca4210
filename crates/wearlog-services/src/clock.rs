//! Time sources for draft defaults and post ids.

use chrono::{Local, NaiveDate, Utc};

pub trait Clock: Send + Sync {
    /// Local calendar date.
    fn today(&self) -> NaiveDate;

    /// Unix time in milliseconds.
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub date: NaiveDate,
    pub millis: i64,
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }

    fn now_millis(&self) -> i64 {
        self.millis
    }
}

/// Zero-padded `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Korean short date, e.g. `2024. 3. 5.`
pub fn format_date_ko(date: NaiveDate) -> String {
    date.format("%Y. %-m. %-d.").to_string()
}

/// Hands out timestamp-derived ids that never repeat, even when two
/// submissions land in the same millisecond.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn next(&mut self, now_millis: i64) -> i64 {
        let id = now_millis.max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}
