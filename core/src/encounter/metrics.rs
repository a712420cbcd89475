use serde::Serialize;

use super::CombatClock;
use super::actor::Actor;
use crate::combat_log::ActorId;
use crate::context::resolve;
use crate::game_data::{Role, actor_id};

/// Read-only per-actor figures derived from an `Actor` at snapshot time.
#[derive(Debug, Clone, Serialize)]
pub struct ActorMetrics {
    pub actor_id: ActorId,
    pub name: String,
    pub job: &'static str,
    pub role: Role,

    // Damage dealing
    pub total_damage: i64,
    pub direct_damage: i64,
    pub dot_damage: i64,
    pub pet_damage: i64,
    pub dps: f64,
    /// Share of total damage that came from dot ticks.
    pub dot_pct: f32,

    // Hit rolls
    pub hits: u32,
    pub crit_pct: f32,
    pub dh_pct: f32,

    pub deaths: u32,
}

impl ActorMetrics {
    pub fn from_actor(actor: &Actor, duration_secs: f64) -> Self {
        // Percentages (avoid division by zero)
        let pct = |part: u32| {
            if actor.hits > 0 {
                (part as f32 / actor.hits as f32) * 100.0
            } else {
                0.0
            }
        };
        let dot_pct = if actor.damage_dealt > 0 {
            (actor.dot_damage_dealt as f32 / actor.damage_dealt as f32) * 100.0
        } else {
            0.0
        };

        Self {
            actor_id: actor.id,
            name: resolve(actor.name).to_string(),
            job: actor.job.abbreviation(),
            role: actor.job.role(),
            total_damage: actor.damage_dealt,
            direct_damage: actor.direct_damage_dealt(),
            dot_damage: actor.dot_damage_dealt,
            pet_damage: actor.pet_damage_dealt,
            dps: actor.damage_dealt as f64 / duration_secs,
            dot_pct,
            hits: actor.hits,
            crit_pct: pct(actor.crit),
            dh_pct: pct(actor.dh),
            deaths: actor.death_count,
        }
    }
}

/// Snapshot of an encounter for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct EncounterStats {
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub ended: Option<i64>,
    /// Positive, so per-second figures stay finite.
    pub duration_secs: f64,
    /// Players, highest damage first. Limit break damage is not listed.
    pub actors: Vec<ActorMetrics>,
}

impl EncounterStats {
    pub fn collect<'a>(clock: &CombatClock, actors: impl IntoIterator<Item = &'a Actor>) -> Self {
        let duration_secs = clock.duration_secs();
        let mut actors: Vec<ActorMetrics> = actors
            .into_iter()
            .filter(|a| !a.is_npc && a.id != actor_id::LIMIT_BREAK)
            .map(|a| ActorMetrics::from_actor(a, duration_secs))
            .collect();
        actors.sort_by(|a, b| {
            b.total_damage
                .cmp(&a.total_damage)
                .then(a.actor_id.cmp(&b.actor_id))
        });

        Self {
            start_time: clock.start_time(),
            end_time: clock.end_time(),
            ended: clock.ended(),
            duration_secs,
            actors,
        }
    }

    pub fn actor(&self, id: ActorId) -> Option<&ActorMetrics> {
        self.actors.iter().find(|a| a.actor_id == id)
    }

    pub fn total_damage(&self) -> i64 {
        self.actors.iter().map(|a| a.total_damage).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::intern;
    use crate::game_data::Job;

    #[test]
    fn metrics_skip_npcs_and_sort_by_damage() {
        let mut low = Actor::new(0x1000_0001);
        low.name = intern("Low Roller");
        low.damage_dealt = 1_000;
        low.hits = 4;
        low.crit = 1;
        low.dh = 2;

        let mut high = Actor::new(0x1000_0002);
        high.job = Job::Brd;
        high.damage_dealt = 5_000;
        high.dot_damage_dealt = 1_000;

        let mut npc = Actor::new(0x4000_0001);
        npc.damage_dealt = 9_000;

        let mut clock = CombatClock::default();
        clock.enter(1_000);
        clock.record_damage(11_000);

        let mut lb = Actor::new(actor_id::LIMIT_BREAK);
        lb.job = Job::LimitBreak;
        lb.damage_dealt = 20_000;

        let stats = EncounterStats::collect(&clock, [&low, &npc, &lb, &high]);
        assert_eq!(stats.duration_secs, 10.0);
        assert_eq!(stats.actors.len(), 2);
        assert_eq!(stats.actors[0].actor_id, 0x1000_0002);
        assert_eq!(stats.actors[0].job, "BRD");
        assert_eq!(stats.actors[0].dot_pct, 20.0);
        assert_eq!(stats.total_damage(), 6_000);

        let low = stats.actor(0x1000_0001).unwrap();
        assert_eq!(low.name, "Low Roller");
        assert_eq!(low.dps, 100.0);
        assert_eq!(low.crit_pct, 25.0);
        assert_eq!(low.dh_pct, 50.0);
    }

    #[test]
    fn empty_encounter_has_unit_duration() {
        let clock = CombatClock::default();
        let stats = EncounterStats::collect(&clock, std::iter::empty::<&Actor>());
        assert_eq!(stats.duration_secs, 1.0);
        assert!(stats.actors.is_empty());
    }
}
