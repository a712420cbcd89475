mod actions;
mod jobs;
mod statuses;

pub use actions::{ACTION_INFO, ActionInfo, lookup_action};
pub use jobs::{Job, Role};
pub use statuses::{STATUS_INFO, StatusInfo, TrackedBuff, lookup_status, tracked_buff};

use crate::combat_log::{ActorId, StatusId};

pub mod actor_id {
    use crate::combat_log::ActorId;

    /// Set on every player-controlled object id.
    pub const PLAYER_BIT: ActorId = 0x1000_0000;
    /// Owner/source id the server uses for "nobody" (environment, unowned NPCs).
    pub const NO_OWNER: ActorId = 0xE000_0000;
    /// Pseudo actor collecting party limit break damage.
    pub const LIMIT_BREAK: ActorId = -1;
}

pub mod flags {
    /// Effect flag: the effect applies to the action's source, not its target.
    pub const EFFECT_ON_SOURCE: u32 = 0x80;
    /// Effect param bit marking limit break damage.
    pub const PARAM_LIMIT_BREAK: i64 = 0x08;
}

pub mod effect_type {
    /// Raw effect type of a status the caster gains from its own action.
    pub const SOURCE_STATUS_GAIN: u8 = 16;
}

/// Thundercloud: the only free-cast proc whose window is tracked.
pub const PROC_STATUS: StatusId = 164;

/// Player-controlled actors carry the player bit in their object id.
#[inline]
pub const fn is_player_id(id: ActorId) -> bool {
    id & actor_id::PLAYER_BIT != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_bit_classifies_ids() {
        assert!(is_player_id(0x1000_0001));
        assert!(!is_player_id(0x4000_0001));
        // the limit break pseudo actor is grouped with players
        assert!(is_player_id(actor_id::LIMIT_BREAK));
    }
}
