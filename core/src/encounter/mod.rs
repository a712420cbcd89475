pub mod actor;
pub mod dot;
pub mod metrics;

pub use actor::{Actor, DotSource, StatusGain};
pub use dot::{Dot, DotKey, PendingDot};
pub use metrics::{ActorMetrics, EncounterStats};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EncounterState {
    #[default]
    NotStarted,
    InCombat,
    PostCombat { exit_time: i64 },
}

/// Encounter lifecycle and timing.
///
/// `end_time` follows the most recent damaging effect while combat is active
/// and is frozen once combat ends. `last_damage_time` follows every damaging
/// effect regardless of state.
#[derive(Debug, Clone, Default)]
pub struct CombatClock {
    state: EncounterState,
    start_time: Option<i64>,
    end_time: Option<i64>,
    last_damage_time: Option<i64>,
}

impl CombatClock {
    /// Start combat. Returns false if combat was already started.
    pub fn enter(&mut self, time: i64) -> bool {
        if self.state != EncounterState::NotStarted {
            return false;
        }
        self.state = EncounterState::InCombat;
        self.start_time = Some(time);
        true
    }

    /// End combat. Only an active encounter can end, and only after it started.
    pub fn exit(&mut self, time: i64) -> bool {
        match (self.state, self.start_time) {
            (EncounterState::InCombat, Some(start)) if time > start => {
                self.state = EncounterState::PostCombat { exit_time: time };
                true
            }
            _ => false,
        }
    }

    pub fn record_damage(&mut self, time: i64) {
        self.last_damage_time = Some(time);
        if self.state == EncounterState::InCombat {
            self.end_time = Some(time);
        }
    }

    pub fn state(&self) -> EncounterState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == EncounterState::InCombat
    }

    pub fn start_time(&self) -> Option<i64> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<i64> {
        self.end_time
    }

    pub fn ended(&self) -> Option<i64> {
        match self.state {
            EncounterState::PostCombat { exit_time } => Some(exit_time),
            _ => None,
        }
    }

    pub fn last_damage_time(&self) -> Option<i64> {
        self.last_damage_time
    }

    /// Seconds between combat start and the last damaging effect. An empty or
    /// zero-length encounter counts as one second.
    pub fn duration_secs(&self) -> f64 {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) if end > start => end.saturating_sub(start) as f64 / 1000.0,
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_and_ends_once() {
        let mut clock = CombatClock::default();
        assert!(!clock.exit(500));
        assert!(clock.enter(1_000));
        assert!(!clock.enter(2_000));
        assert_eq!(clock.start_time(), Some(1_000));

        // exit must come after the start
        assert!(!clock.exit(1_000));
        assert!(clock.exit(9_000));
        assert!(!clock.exit(10_000));
        assert_eq!(clock.ended(), Some(9_000));
        assert!(!clock.enter(11_000));
    }

    #[test]
    fn end_time_only_moves_during_combat() {
        let mut clock = CombatClock::default();
        clock.record_damage(100);
        assert_eq!(clock.end_time(), None);
        assert_eq!(clock.last_damage_time(), Some(100));

        clock.enter(1_000);
        clock.record_damage(4_000);
        assert_eq!(clock.end_time(), Some(4_000));
        assert_eq!(clock.duration_secs(), 3.0);

        clock.exit(5_000);
        clock.record_damage(6_000);
        assert_eq!(clock.end_time(), Some(4_000));
        assert_eq!(clock.last_damage_time(), Some(6_000));
    }

    #[test]
    fn only_empty_encounter_duration_is_replaced() {
        let mut clock = CombatClock::default();
        clock.enter(1_000);
        clock.record_damage(1_000);
        assert_eq!(clock.duration_secs(), 1.0);

        clock.record_damage(1_200);
        assert_eq!(clock.duration_secs(), 0.2);
    }

    #[test]
    fn extreme_times_do_not_overflow_duration() {
        let mut clock = CombatClock::default();
        clock.enter(i64::MIN);
        clock.record_damage(i64::MAX);
        assert_eq!(clock.duration_secs(), i64::MAX as f64 / 1000.0);
    }
}
