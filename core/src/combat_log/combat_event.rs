use serde::{Deserialize, Serialize};

use crate::game_data::flags;

/// Object id of an actor, as used by the game server.
pub type ActorId = i64;
/// Action (skill) id.
pub type SkillId = u32;
/// Status effect id.
pub type StatusId = u32;

/// A decoded telemetry record. `time` is the game clock in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub time: i64,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl CombatEvent {
    pub fn new(time: i64, kind: EventKind) -> Self {
        Self { time, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Any of the action record sizes (1, 8, 16 or 24 targets).
    Action(ActionEvent),
    /// Full status snapshot: vitals plus the complete status list.
    StatusList(StatusListEvent),
    /// Vitals only.
    StatusStats(StatusStatsEvent),
    /// A single status started or was refreshed.
    Status(StatusEvent),
    AllianceInfo(RosterEvent),
    PartyInfo(RosterEvent),
    NpcSpawn(NpcSpawnEvent),
    PlayerSpawn(PlayerSpawnEvent),
    ObjectSpawn(ObjectSpawnEvent),
    Tick(TickEvent),
    #[serde(other)]
    Unknown,
}

// ─────────────────────────────────────────────────────────────────────────────
// Actions
// ─────────────────────────────────────────────────────────────────────────────

/// Wire size of an action record. Only affects how many effects it can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSize {
    #[default]
    Single,
    Aoe8,
    Aoe16,
    Aoe24,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEvent {
    pub source: ActorId,
    pub target: ActorId,
    pub skill: SkillId,
    #[serde(default)]
    pub size: ActionSize,
    #[serde(default)]
    pub effects: Vec<ActionEffect>,
}

impl ActionEvent {
    /// Returns true if any effect of this action has the given raw effect type.
    pub fn has_effect_type(&self, effect_type: u8) -> bool {
        self.effects.iter().any(|e| e.effect_type == effect_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Damage,
    Block,
    Parried,
    ApplyStatus,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionEffect {
    #[serde(default)]
    pub flags: u32,
    /// Raw effect type byte from the wire.
    #[serde(default)]
    pub effect_type: u8,
    /// Decoded effect type name.
    #[serde(default)]
    pub kind: EffectKind,
    /// Hit severity for damage effects; for status applications the raw byte
    /// carries the low bits of the dot's magnitude.
    #[serde(default)]
    pub severity: i64,
    /// Bonus percent folded into `value` (e.g. combo or positional bonus).
    #[serde(default)]
    pub bonus: i64,
    #[serde(default)]
    pub param: i64,
    /// Damage amount, or the status id for `ApplyStatus`.
    #[serde(default)]
    pub value: i64,
}

/// Outcome of a damage roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitSeverity {
    Normal,
    Critical,
    DirectHit,
    CriticalDirectHit,
    Unrecognized,
}

impl ActionEffect {
    pub fn is_damaging(&self) -> bool {
        matches!(
            self.kind,
            EffectKind::Damage | EffectKind::Block | EffectKind::Parried
        )
    }

    /// The effect lands on the action's source rather than its target.
    pub fn targets_source(&self) -> bool {
        self.flags & flags::EFFECT_ON_SOURCE != 0
    }

    /// Damage belongs to the party's limit break rather than the caster.
    pub fn is_limit_break(&self) -> bool {
        self.param & flags::PARAM_LIMIT_BREAK != 0
    }

    pub fn hit_severity(&self) -> HitSeverity {
        match self.severity {
            0 => HitSeverity::Normal,
            1 => HitSeverity::Critical,
            2 => HitSeverity::DirectHit,
            3 => HitSeverity::CriticalDirectHit,
            _ => HitSeverity::Unrecognized,
        }
    }

    /// Status id carried by an `ApplyStatus` effect.
    pub fn applied_status(&self) -> Option<StatusId> {
        if self.kind != EffectKind::ApplyStatus {
            return None;
        }
        StatusId::try_from(self.value).ok()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Statuses
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatusEntry {
    pub id: StatusId,
    pub source: ActorId,
    /// Remaining duration in seconds.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub param: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Vitals {
    pub hp: i64,
    pub max_hp: i64,
    #[serde(default)]
    pub shield: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusListEvent {
    pub target: ActorId,
    #[serde(flatten)]
    pub vitals: Vitals,
    #[serde(default)]
    pub statuses: Vec<StatusEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusStatsEvent {
    pub target: ActorId,
    #[serde(flatten)]
    pub vitals: Vitals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub target: ActorId,
    pub status: StatusEntry,
}

// ─────────────────────────────────────────────────────────────────────────────
// Roster / Spawns
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterMember {
    pub id: ActorId,
    pub name: String,
    #[serde(default)]
    pub job: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEvent {
    #[serde(default)]
    pub members: Vec<RosterMember>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActorInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub job: u8,
    #[serde(default)]
    pub owner: ActorId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcSpawnEvent {
    pub source: ActorId,
    #[serde(default)]
    pub owner: Option<ActorId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpawnEvent {
    pub source: ActorId,
    pub actor_info: ActorInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpawnEvent {
    pub source: ActorId,
    pub actor_info: ActorInfo,
}

// ─────────────────────────────────────────────────────────────────────────────
// Ticks
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickKind {
    StatusGain,
    StatusRemove,
    Death,
    Dot,
    InCombat,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickEvent {
    pub tick: TickKind,
    pub source: ActorId,
    pub target: ActorId,
    #[serde(default)]
    pub skill: SkillId,
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub param: i64,
}

impl TickEvent {
    /// In-combat ticks use the skill field as an enter (1) / leave (0) flag.
    pub fn combat_transition(&self) -> Option<CombatTransition> {
        if self.tick != TickKind::InCombat {
            return None;
        }
        match self.skill {
            1 => Some(CombatTransition::Enter),
            0 => Some(CombatTransition::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatTransition {
    Enter,
    Exit,
}
