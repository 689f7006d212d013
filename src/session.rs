use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::NaiveDate;
use tokio::sync::{Mutex, RwLock};
use trailhead_schedule::{
    Calendar, Completion, Direction, Navigation, ScheduleRepository, WRITE_PROMPT, record,
};

/// Source of "today" for new sessions and the Today button.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

pub fn local_clock() -> Clock {
    Arc::new(|| chrono::Local::now().date_naive())
}

/// One user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Prior,
    Next,
    Today,
    Record(Completion),
}

/// Everything one browser session sees. Never shared across sessions.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub calendar: Calendar,
    pub navigation: Navigation,
    pub last_write: String,
}

impl SessionState {
    pub fn new(user: &str, today: NaiveDate, calendar: Calendar) -> Self {
        let navigation = Navigation::new(user, today, &calendar);

        Self {
            calendar,
            navigation,
            last_write: WRITE_PROMPT.to_owned(),
        }
    }

    /// Applies `action`. A failed write leaves the state as it was.
    #[tracing::instrument(skip_all, fields(user = self.navigation.user()))]
    pub async fn apply(
        &mut self,
        action: Action,
        repository: &dyn ScheduleRepository,
        today: NaiveDate,
    ) -> trailhead_schedule::Result<()> {
        match action {
            Action::Prior => {
                self.navigation.shift(Direction::Earlier, 1, &self.calendar);
            }
            Action::Next => {
                self.navigation.shift(Direction::Later, 1, &self.calendar);
            }
            Action::Today => self.navigation.reset_to_today(today, &self.calendar),
            Action::Record(completion) => {
                self.last_write = record(
                    repository,
                    &mut self.calendar,
                    &mut self.navigation,
                    &completion,
                )
                .await?;
            }
        }

        Ok(())
    }
}

struct Slot {
    state: Arc<Mutex<SessionState>>,
    last_seen: std::sync::Mutex<Instant>,
}

impl Slot {
    fn touch(&self) -> Arc<Mutex<SessionState>> {
        *self
            .last_seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Instant::now();
        self.state.clone()
    }

    fn idle_for(&self) -> Duration {
        self.last_seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .elapsed()
    }
}

/// Server-side session states keyed by session id.
///
/// Each state sits behind its own lock so one session's interactions run
/// one at a time while other sessions proceed. A session left idle longer
/// than its auth token can live is dropped when the next session is created.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Slot>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            idle_ttl,
        }
    }

    /// Returns the session's state, loading the calendar on first access.
    pub async fn get_or_load(
        &self,
        sid: &str,
        user: &str,
        repository: &dyn ScheduleRepository,
        today: NaiveDate,
    ) -> trailhead_schedule::Result<Arc<Mutex<SessionState>>> {
        if let Some(slot) = self.sessions.read().await.get(sid) {
            return Ok(slot.touch());
        }

        let calendar = repository.load_calendar().await?;
        let state = Arc::new(Mutex::new(SessionState::new(user, today, calendar)));

        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, slot| slot.idle_for() < self.idle_ttl);
        if sessions.len() < before {
            tracing::info!(expired = before - sessions.len(), "Idle sessions dropped");
        }

        tracing::info!(sid, user, "Session created");

        Ok(sessions
            .entry(sid.to_owned())
            .or_insert_with(|| Slot {
                state,
                last_seen: std::sync::Mutex::new(Instant::now()),
            })
            .touch())
    }

    pub async fn remove(&self, sid: &str) -> bool {
        self.sessions.write().await.remove(sid).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
