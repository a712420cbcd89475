//! Per-combatant state.
//!
//! An `Actor` only mutates itself. Anything that touches a second actor (pet
//! damage relayed to an owner, reading the applier of a dot) goes through the
//! registry, which owns every actor.

use hashbrown::HashMap;

use super::dot::{Dot, DotKey, PendingDot};
use crate::combat_log::{
    ActionEffect, ActionEvent, ActorId, HitSeverity, StatusEntry, StatusId, Vitals,
};
use crate::context::{DamageModelConfig, IStr, empty_istr, npc_istr};
use crate::game_data::{
    Job, PROC_STATUS, effect_type, is_player_id, lookup_action, lookup_status, tracked_buff,
};

/// The wire encodes several dot parameters in a single byte.
const WRAP: i64 = 256;
/// Base critical damage bonus, in per-mille, before substat scaling.
const CRIT_DAMAGE_BASE: i64 = 350;

/// What the target of a dot needs to know about the actor that applied it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotSource {
    pub id: ActorId,
    pub p2d: Option<f64>,
    /// Crit parameter contributed by raid buffs currently on the source.
    pub crit_offset: i64,
}

/// A status record that may confirm a pending dot.
#[derive(Debug, Clone, Copy)]
pub enum StatusGain<'a> {
    /// Full status-start record: id, source and duration are known.
    Started(&'a StatusEntry),
    /// Status-gain tick: carries no duration.
    Ticked { status: StatusId, source: ActorId },
}

#[derive(Debug, Clone)]
pub struct Actor {
    pub id: ActorId,
    pub name: IStr,
    pub is_npc: bool,
    pub active: bool,
    pub job: Job,
    pub party: bool,
    pub is_obj: bool,
    /// Controlling actor of a pet or ground object. Lookup-only.
    pub owner: Option<ActorId>,

    pub hp: i64,
    pub max_hp: i64,
    pub shield: i64,

    /// Direct, pet and dot damage combined.
    pub damage_dealt: i64,
    /// Share of `damage_dealt` relayed from owned pets.
    pub pet_damage_dealt: i64,
    pub hits: u32,
    pub crit: u32,
    pub dh: u32,
    pub dot_damage_dealt: i64,
    pub dot_count: u32,
    pub death_count: u32,

    /// Most recent damage-per-potency estimate, unbuffed by crit/direct hit.
    pub p2d: Option<f64>,

    pub statuses: Vec<StatusEntry>,
    /// Confirmed dots ticking on this actor.
    pub dots: Vec<Dot>,
    pending_dots: HashMap<DotKey, PendingDot>,
    proc_window_end: Option<i64>,
}

impl Actor {
    pub fn new(id: ActorId) -> Self {
        let is_npc = !is_player_id(id);
        Self {
            id,
            name: if is_npc { npc_istr() } else { empty_istr() },
            is_npc,
            active: false,
            job: Job::Unknown,
            party: false,
            is_obj: false,
            owner: None,
            hp: 0,
            max_hp: 0,
            shield: 0,
            damage_dealt: 0,
            pet_damage_dealt: 0,
            hits: 0,
            crit: 0,
            dh: 0,
            dot_damage_dealt: 0,
            dot_count: 0,
            death_count: 0,
            p2d: None,
            statuses: Vec::new(),
            dots: Vec::new(),
            pending_dots: HashMap::new(),
            proc_window_end: None,
        }
    }

    // --- Vitals / Status snapshots ---

    pub fn set_vitals(&mut self, vitals: &Vitals) {
        self.hp = vitals.hp;
        self.max_hp = vitals.max_hp;
        self.shield = vitals.shield;
    }

    pub fn set_statuses(&mut self, vitals: &Vitals, statuses: &[StatusEntry]) {
        self.set_vitals(vitals);
        self.statuses = statuses.to_vec();
    }

    // --- Damage accounting ---

    /// Account one damaging effect dealt by this actor. Relaying to an owner is
    /// the caller's job.
    pub fn damage(
        &mut self,
        time: i64,
        action: &ActionEvent,
        effect: &ActionEffect,
        model: &DamageModelConfig,
    ) {
        let mut p2d = self.potency_ratio(time, action, effect).unwrap_or(0.0);

        self.damage_dealt = self.damage_dealt.saturating_add(effect.value);
        self.hits += 1;
        match effect.hit_severity() {
            HitSeverity::Normal | HitSeverity::Unrecognized => {}
            HitSeverity::Critical => {
                self.crit += 1;
                p2d /= model.crit_multiplier;
            }
            HitSeverity::DirectHit => {
                self.dh += 1;
                p2d /= model.direct_hit_multiplier;
            }
            HitSeverity::CriticalDirectHit => {
                self.crit += 1;
                self.dh += 1;
                p2d /= model.crit_multiplier;
                p2d /= model.direct_hit_multiplier;
            }
        }

        if p2d > 0.0 && p2d.is_finite() {
            self.p2d = Some(p2d);
        }
    }

    /// Damage per potency point of a hit, before crit/direct hit are divided out.
    fn potency_ratio(&self, time: i64, action: &ActionEvent, effect: &ActionEffect) -> Option<f64> {
        if effect.value <= 0 {
            return None;
        }
        let info = lookup_action(action.skill)?;
        let mut potency = info.base_potency()?;
        if self.proc_consumed(time, action)
            && let Some(proc_potency) = info.proc_potency
        {
            potency = proc_potency;
        }
        let unbonused = effect.value as f64 * (100.0 - effect.bonus as f64) / 100.0;
        Some(unbonused / potency as f64)
    }

    /// The proc is consumed either exactly when its window closes, or earlier by
    /// an action that immediately grants a fresh one (so no remove is sent).
    fn proc_consumed(&self, time: i64, action: &ActionEvent) -> bool {
        match self.proc_window_end {
            Some(end) => {
                time == end
                    || (time < end && action.has_effect_type(effect_type::SOURCE_STATUS_GAIN))
            }
            None => false,
        }
    }

    /// Damage dealt by a pet or object this actor owns.
    pub fn pet_damage(&mut self, amount: i64) {
        self.damage_dealt = self.damage_dealt.saturating_add(amount);
        self.pet_damage_dealt = self.pet_damage_dealt.saturating_add(amount);
    }

    pub fn dot_damage(&mut self, amount: i64) {
        self.dot_damage_dealt = self.dot_damage_dealt.saturating_add(amount);
        self.dot_count += 1;
        self.damage_dealt = self.damage_dealt.saturating_add(amount);
    }

    pub fn death(&mut self) {
        self.death_count += 1;
    }

    // --- Dots ---

    /// Snapshot of this actor as the applier of a dot.
    pub fn dot_source(&self) -> DotSource {
        let crit_offset = self
            .statuses
            .iter()
            .filter_map(|s| tracked_buff(s.id))
            .map(|b| b.source_crit_offset())
            .sum();
        DotSource {
            id: self.id,
            p2d: self.p2d,
            crit_offset,
        }
    }

    fn target_crit_offset(&self) -> i64 {
        self.statuses
            .iter()
            .filter_map(|s| tracked_buff(s.id))
            .map(|b| b.target_crit_offset())
            .sum()
    }

    /// Estimate the tick magnitude of a dot applied to this actor and stage it
    /// until the matching status-start record arrives.
    pub fn add_status(
        &mut self,
        source: &DotSource,
        effect: &ActionEffect,
        model: &DamageModelConfig,
    ) -> Option<&PendingDot> {
        let status = effect.applied_status()?;
        let potency = lookup_status(status)?.dot_potency()?;

        let guess = source.p2d.map(|p2d| p2d * potency as f64);
        let edge_damage = estimate_tick_damage(
            effect.severity,
            effect.param,
            source.crit_offset.saturating_add(self.target_crit_offset()),
            guess,
            model,
        );

        let pending = PendingDot {
            status,
            source: source.id,
            edge_damage,
        };
        let key = pending.key();
        self.pending_dots.insert(key, pending);
        self.pending_dots.get(&key)
    }

    /// Record a status start/gain. Returns the dot it confirmed, if any.
    pub fn apply_status(
        &mut self,
        time: i64,
        gain: StatusGain<'_>,
        duration_fallback: bool,
    ) -> Option<Dot> {
        let (status, source, duration) = match gain {
            StatusGain::Started(entry) => (entry.id, entry.source, Some(entry.duration)),
            StatusGain::Ticked { status, source } => {
                let duration = duration_fallback
                    .then(|| lookup_status(status).map(|s| s.duration))
                    .flatten();
                (status, source, duration)
            }
        };

        if status == PROC_STATUS {
            let window_ms = (duration.unwrap_or(0.0) * 1000.0) as i64;
            self.proc_window_end = Some(time.saturating_add(window_ms));
            return None;
        }

        // Tick gains only carry an estimated duration, keep them out of the list
        if let StatusGain::Started(entry) = gain {
            self.statuses
                .retain(|s| s.id != entry.id || s.source != entry.source);
            self.statuses.push(entry.clone());
        }

        // Without a duration the dot could never expire
        let duration = duration?;
        let pending = self.pending_dots.remove(&(source, status))?;
        let dot = pending.confirm(time, duration);
        // A refresh replaces the running instance from the same source
        self.dots
            .retain(|d| d.source != dot.source || d.status != dot.status);
        self.dots.push(dot.clone());
        Some(dot)
    }

    pub fn remove_status(&mut self, time: i64, status: StatusId) {
        if status == PROC_STATUS {
            self.proc_window_end = Some(time);
        }
    }

    /// Split one observed dot tick among the dots active at `time`, weighted by
    /// their estimated magnitudes. Shares always sum to `value` exactly; the
    /// last dot absorbs the rounding remainder.
    pub fn split_dot_damage(&mut self, time: i64, value: i64) -> HashMap<ActorId, i64> {
        self.dots.retain(|d| d.is_active_at(time));

        let mut shares = HashMap::new();
        if value <= 0 {
            return shares;
        }
        let total: f64 = self.dots.iter().map(|d| d.edge_damage).sum();
        if !(total.is_finite() && total > 0.0) {
            return shares;
        }

        let last = self.dots.len() - 1;
        let mut deducted: i64 = 0;
        for (i, dot) in self.dots.iter().enumerate() {
            let mut share = (value as f64 * dot.edge_damage / total).floor() as i64;
            deducted = deducted.saturating_add(share);
            if i == last {
                share = share.saturating_add(value.saturating_sub(deducted));
            }
            let credited = shares.entry(dot.source).or_insert(0);
            *credited = credited.saturating_add(share);
        }
        shares
    }

    // --- Accessors ---

    pub fn pending_dots(&self) -> impl Iterator<Item = &PendingDot> {
        self.pending_dots.values()
    }

    pub fn pending_dot(&self, source: ActorId, status: StatusId) -> Option<&PendingDot> {
        self.pending_dots.get(&(source, status))
    }

    pub fn proc_window_end(&self) -> Option<i64> {
        self.proc_window_end
    }

    /// Damage landed by this actor's own actions.
    pub fn direct_damage_dealt(&self) -> i64 {
        self.damage_dealt
            .saturating_sub(self.pet_damage_dealt)
            .saturating_sub(self.dot_damage_dealt)
    }
}

/// Reconstruct a dot's per-tick damage from the truncated values the wire
/// carries with its application.
fn estimate_tick_damage(
    raw: i64,
    crit_param: i64,
    buff_offset: i64,
    guess: Option<f64>,
    model: &DamageModelConfig,
) -> f64 {
    // Add 256 until the unbuffed parameter reaches the floor
    let mut crit = crit_param;
    let deficit = model
        .crit_rate_floor
        .saturating_sub(crit_param.saturating_sub(buff_offset));
    if deficit > 0 {
        let wraps = deficit / WRAP + i64::from(deficit % WRAP != 0);
        crit = crit.saturating_add(wraps.saturating_mul(WRAP));
    }
    let crit_damage = crit.saturating_add(CRIT_DAMAGE_BASE);

    // Add 256 until the estimate is within the window of the guess
    let mut edge = raw as f64;
    if let Some(guess) = guess.filter(|g| g.is_finite()) {
        let gap = guess - edge;
        if gap >= model.wrap_window {
            let wraps = ((gap - model.wrap_window) / WRAP as f64).floor() + 1.0;
            edge += wraps * WRAP as f64;
        }
    }

    let crit = crit as f64;
    let crit_damage = crit_damage as f64;
    edge * (1000.0 - crit + crit * (1000.0 + crit_damage) / 1000.0) / 1000.0
}
