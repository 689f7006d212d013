use chrono::{Days, NaiveDate};

use crate::{Calendar, StatusEmoji, long_date, lookup_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Earlier,
    Later,
}

/// Which day a session is looking at, and everything derived from it.
///
/// Every transition recomputes the display strings, the current user's
/// status and comment, the emoji and both navigation flags from the
/// calendar it is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    user: String,
    current: NaiveDate,
    pub display_date: String,
    pub lookup_key: String,
    /// `None` when the current date is not on the schedule.
    pub workout: Option<String>,
    pub status: Option<String>,
    pub comment: Option<String>,
    pub emoji: StatusEmoji,
    pub prior_enabled: bool,
    pub next_enabled: bool,
}

impl Navigation {
    pub fn new(user: impl Into<String>, today: NaiveDate, calendar: &Calendar) -> Self {
        let mut navigation = Self {
            user: user.into(),
            current: today,
            display_date: String::new(),
            lookup_key: String::new(),
            workout: None,
            status: None,
            comment: None,
            emoji: StatusEmoji::Unsure,
            prior_enabled: false,
            next_enabled: false,
        };
        navigation.goto(today, calendar);
        navigation
    }

    pub fn current(&self) -> NaiveDate {
        self.current
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn goto(&mut self, date: NaiveDate, calendar: &Calendar) {
        self.current = date;
        self.display_date = long_date(date);
        self.lookup_key = lookup_key(date);

        match calendar.get(date) {
            Ok(entry) => {
                let record = entry.record(&self.user);
                self.workout = Some(entry.workout.clone());
                self.status = record.map(|r| r.status.clone());
                self.comment = record.map(|r| r.comment.clone());
            }
            Err(_) => {
                self.workout = None;
                self.status = None;
                self.comment = None;
            }
        }

        self.prior_enabled = neighbour(date, Direction::Earlier, 1).is_some_and(|d| calendar.exists(d));
        self.next_enabled = neighbour(date, Direction::Later, 1).is_some_and(|d| calendar.exists(d));
        self.emoji = StatusEmoji::from_status(self.status.as_deref().unwrap_or_default());
    }

    /// Moves `days` away from the current date. A target missing from the
    /// calendar is a schedule boundary: nothing moves and that direction is
    /// disabled. Returns whether the date changed.
    pub fn shift(&mut self, direction: Direction, days: u64, calendar: &Calendar) -> bool {
        match neighbour(self.current, direction, days) {
            Some(target) if calendar.exists(target) => {
                self.goto(target, calendar);
                true
            }
            _ => {
                match direction {
                    Direction::Earlier => self.prior_enabled = false,
                    Direction::Later => self.next_enabled = false,
                }
                false
            }
        }
    }

    pub fn reset_to_today(&mut self, today: NaiveDate, calendar: &Calendar) {
        self.goto(today, calendar);
    }

    /// Re-reads the current date, e.g. after the calendar changed.
    pub fn refresh(&mut self, calendar: &Calendar) {
        self.goto(self.current, calendar);
    }
}

fn neighbour(date: NaiveDate, direction: Direction, days: u64) -> Option<NaiveDate> {
    match direction {
        Direction::Earlier => date.checked_sub_days(Days::new(days)),
        Direction::Later => date.checked_add_days(Days::new(days)),
    }
}
