//! Combat state machine for encounter lifecycle management.
//!
//! - NotStarted: waiting for a player to enter combat
//! - InCombat: active combat, `end_time` follows damaging effects
//! - PostCombat: terminal, later records are still accounted
//!
//! Transitions are driven only by in-combat ticks targeting a player.

use crate::combat_log::{CombatTransition, TickEvent};
use crate::encounter::CombatClock;
use crate::state::ActorRegistry;

use super::GameSignal;

/// Advance the combat state machine and emit CombatStarted/CombatEnded signals.
pub fn advance_combat_state(
    time: i64,
    tick: &TickEvent,
    registry: &mut ActorRegistry,
    clock: &mut CombatClock,
) -> Option<GameSignal> {
    let transition = tick.combat_transition()?;
    if registry.get_or_create(tick.target).is_npc {
        return None;
    }

    match transition {
        CombatTransition::Enter => {
            if !clock.enter(time) {
                return None;
            }
            tracing::info!(time, actor = tick.target, "Combat started");
            Some(GameSignal::CombatStarted { timestamp: time })
        }
        CombatTransition::Exit => {
            if !clock.exit(time) {
                return None;
            }
            let start_time = clock.start_time().unwrap_or(time);
            tracing::info!(
                time,
                duration_ms = time.saturating_sub(start_time),
                actor = tick.target,
                "Combat ended"
            );
            Some(GameSignal::CombatEnded {
                timestamp: time,
                start_time,
            })
        }
    }
}
