use crate::combat_log::{ActorId, SkillId, StatusId};
use crate::game_data::Job;

/// Signals emitted by the EventProcessor for cross-cutting concerns.
/// These describe state changes at a higher level than the raw records
/// and are informational only: the processor's state is already updated
/// by the time a handler sees them.
#[derive(Debug, Clone, PartialEq)]
pub enum GameSignal {
    // Combat lifecycle
    CombatStarted {
        timestamp: i64,
    },
    CombatEnded {
        timestamp: i64,
        start_time: i64,
    },

    // Actor state changes
    ActorDeath {
        actor_id: ActorId,
        death_count: u32,
        timestamp: i64,
    },
    /// Job inferred from a signature action.
    JobIdentified {
        actor_id: ActorId,
        job: Job,
        skill: SkillId,
        timestamp: i64,
    },

    // Dot tracking
    DotConfirmed {
        target_id: ActorId,
        source_id: ActorId,
        status: StatusId,
        edge_damage: f64,
        expires_at: i64,
        timestamp: i64,
    },
    /// A combined dot tick was attributed to its sources.
    DotDamageSplit {
        target_id: ActorId,
        value: i64,
        shares: Vec<(ActorId, i64)>,
        timestamp: i64,
    },
}

impl GameSignal {
    pub fn timestamp(&self) -> i64 {
        match self {
            GameSignal::CombatStarted { timestamp }
            | GameSignal::CombatEnded { timestamp, .. }
            | GameSignal::ActorDeath { timestamp, .. }
            | GameSignal::JobIdentified { timestamp, .. }
            | GameSignal::DotConfirmed { timestamp, .. }
            | GameSignal::DotDamageSplit { timestamp, .. } => *timestamp,
        }
    }
}
