//! Pomodoro timer state machine and stats.
//!
//! The timer itself is a plain synchronous state machine; the caller owns the
//! wall clock and calls [`PomodoroTimer::tick`] once per second. Completed
//! work sessions are recorded through the controller, which keeps the
//! counters under `pomodoroStats`.

use crate::settings::{PomodoroSettings, PomodoroStats};
use crate::store::{keys, Accessor, KvStore};
use crate::StoreError;

/// The current countdown phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    Break,
    LongBreak,
}

/// Emitted by [`PomodoroTimer::tick`] when a phase reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseCompletion {
    /// A work session finished; `sessions_completed` counts completed work
    /// sessions since the timer was created.
    Work { sessions_completed: u32 },
    Break,
    LongBreak,
}

/// Countdown state machine over one [`PomodoroSettings`] snapshot.
#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    settings: PomodoroSettings,
    phase: Phase,
    remaining_secs: u32,
    running: bool,
    work_sessions: u32,
}

impl PomodoroTimer {
    /// Starts paused at the beginning of a work phase.
    pub fn new(settings: PomodoroSettings) -> Self {
        let remaining_secs = settings.work_duration * 60;
        Self {
            settings,
            phase: Phase::Work,
            remaining_secs,
            running: false,
            work_sessions: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Back to a paused, full-length work phase. The session counter that
    /// drives long-break cadence is kept.
    pub fn reset(&mut self) {
        self.phase = Phase::Work;
        self.remaining_secs = self.settings.work_duration * 60;
        self.running = false;
    }

    /// Advances one second. Returns the completion when this tick finished a
    /// phase; the timer then sits at the start of the next phase, still
    /// running.
    pub fn tick(&mut self) -> Option<PhaseCompletion> {
        if !self.running || self.remaining_secs == 0 {
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs > 0 {
            return None;
        }

        match self.phase {
            Phase::Work => {
                self.work_sessions += 1;
                let long_break = self.settings.sessions_until_long_break > 0
                    && self.work_sessions % self.settings.sessions_until_long_break == 0;
                if long_break {
                    self.phase = Phase::LongBreak;
                    self.remaining_secs = self.settings.long_break_duration * 60;
                } else {
                    self.phase = Phase::Break;
                    self.remaining_secs = self.settings.break_duration * 60;
                }
                Some(PhaseCompletion::Work {
                    sessions_completed: self.work_sessions,
                })
            }
            Phase::Break => {
                self.phase = Phase::Work;
                self.remaining_secs = self.settings.work_duration * 60;
                Some(PhaseCompletion::Break)
            }
            Phase::LongBreak => {
                self.phase = Phase::Work;
                self.remaining_secs = self.settings.work_duration * 60;
                Some(PhaseCompletion::LongBreak)
            }
        }
    }
}

/// Controller over `pomodoroSettings` and `pomodoroStats`.
#[derive(Debug, Clone)]
pub struct PomodoroWidget {
    settings: Accessor<PomodoroSettings>,
    stats: Accessor<PomodoroStats>,
}

impl PomodoroWidget {
    pub fn new(store: KvStore) -> Self {
        Self {
            settings: Accessor::new(store.clone(), keys::POMODORO_SETTINGS),
            stats: Accessor::new(store, keys::POMODORO_STATS),
        }
    }

    pub async fn settings(&self) -> Result<PomodoroSettings, StoreError> {
        self.settings.get_or_default().await
    }

    pub async fn set_settings(&self, settings: PomodoroSettings) -> Result<(), StoreError> {
        self.settings.set(&settings).await
    }

    pub async fn toggle_sound(&self) -> Result<PomodoroSettings, StoreError> {
        self.settings
            .update(|s| s.sound_enabled = !s.sound_enabled)
            .await
    }

    pub async fn stats(&self) -> Result<PomodoroStats, StoreError> {
        self.stats.get_or_default().await
    }

    /// Builds a timer from the stored settings.
    pub async fn timer(&self) -> Result<PomodoroTimer, StoreError> {
        Ok(PomodoroTimer::new(self.settings().await?))
    }

    /// Records one finished work session.
    ///
    /// `today` is a `%Y-%m-%d` day string; the daily counter restarts when it
    /// differs from the stored one.
    pub async fn record_work_completion(&self, today: &str) -> Result<PomodoroStats, StoreError> {
        self.stats
            .update(|stats| {
                stats.total_sessions += 1;
                stats.today_sessions = if stats.last_session_date.as_deref() == Some(today) {
                    stats.today_sessions + 1
                } else {
                    1
                };
                stats.last_session_date = Some(today.to_string());
            })
            .await
    }
}

/// Today as the `%Y-%m-%d` day string the stats compare against.
pub fn today_string() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_settings() -> PomodoroSettings {
        PomodoroSettings {
            work_duration: 1,
            break_duration: 1,
            long_break_duration: 2,
            sessions_until_long_break: 2,
            sound_enabled: false,
        }
    }

    fn run_out_phase(timer: &mut PomodoroTimer) -> PhaseCompletion {
        loop {
            if let Some(done) = timer.tick() {
                return done;
            }
        }
    }

    #[test]
    fn timer_starts_paused_at_full_work_duration() {
        let timer = PomodoroTimer::new(PomodoroSettings::default());
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.remaining_secs(), 25 * 60);
        assert!(!timer.is_running());
    }

    #[test]
    fn tick_does_nothing_while_paused() {
        let mut timer = PomodoroTimer::new(quick_settings());
        assert!(timer.tick().is_none());
        assert_eq!(timer.remaining_secs(), 60);
    }

    #[test]
    fn work_alternates_with_breaks_and_every_second_is_long() {
        let mut timer = PomodoroTimer::new(quick_settings());
        timer.start();

        assert_eq!(
            run_out_phase(&mut timer),
            PhaseCompletion::Work { sessions_completed: 1 }
        );
        assert_eq!(timer.phase(), Phase::Break);

        assert_eq!(run_out_phase(&mut timer), PhaseCompletion::Break);
        assert_eq!(timer.phase(), Phase::Work);

        assert_eq!(
            run_out_phase(&mut timer),
            PhaseCompletion::Work { sessions_completed: 2 }
        );
        // Second completed work session hits the long-break cadence.
        assert_eq!(timer.phase(), Phase::LongBreak);
        assert_eq!(timer.remaining_secs(), 2 * 60);

        assert_eq!(run_out_phase(&mut timer), PhaseCompletion::LongBreak);
        assert_eq!(timer.phase(), Phase::Work);
    }

    #[test]
    fn reset_returns_to_paused_work() {
        let mut timer = PomodoroTimer::new(quick_settings());
        timer.start();
        run_out_phase(&mut timer);
        assert_eq!(timer.phase(), Phase::Break);

        timer.reset();
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.remaining_secs(), 60);
        assert!(!timer.is_running());
    }

    #[tokio::test]
    async fn stats_accumulate_within_a_day() {
        let widget = PomodoroWidget::new(KvStore::in_memory());

        let stats = widget.record_work_completion("2026-08-24").await.unwrap();
        assert_eq!(stats.total_sessions, 1);
        assert_eq!(stats.today_sessions, 1);

        let stats = widget.record_work_completion("2026-08-24").await.unwrap();
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.today_sessions, 2);
    }

    #[tokio::test]
    async fn daily_counter_resets_on_a_new_day() {
        let widget = PomodoroWidget::new(KvStore::in_memory());
        widget.record_work_completion("2026-08-23").await.unwrap();
        widget.record_work_completion("2026-08-23").await.unwrap();

        let stats = widget.record_work_completion("2026-08-24").await.unwrap();
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.today_sessions, 1);
        assert_eq!(stats.last_session_date.as_deref(), Some("2026-08-24"));
    }

    #[tokio::test]
    async fn toggle_sound_flips_and_persists() {
        let widget = PomodoroWidget::new(KvStore::in_memory());
        assert!(widget.settings().await.unwrap().sound_enabled);

        let settings = widget.toggle_sound().await.unwrap();
        assert!(!settings.sound_enabled);
        assert!(!widget.settings().await.unwrap().sound_enabled);
    }
}
