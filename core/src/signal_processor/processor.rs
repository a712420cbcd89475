use std::sync::Arc;

use crate::combat_log::{
    ActionEvent, ActorId, CombatEvent, EffectKind, EventKind, RosterEvent, TickEvent, TickKind,
};
use crate::context::{CharacterStore, ParserConfig};
use crate::encounter::{Actor, CombatClock, EncounterState, EncounterStats, StatusGain};
use crate::game_data::{Job, actor_id};
use crate::signal_processor::signal::GameSignal;
use crate::state::ActorRegistry;

use super::combat_state;
use super::handler::SignalHandler;

/// Processes combat events in order, updates actors, and emits signals.
/// This is the single owner of the actor registry and the combat clock.
pub struct EventProcessor {
    registry: ActorRegistry,
    config: ParserConfig,
    clock: CombatClock,
    handlers: Vec<Box<dyn SignalHandler + Send>>,
}

impl EventProcessor {
    pub fn new(store: Arc<dyn CharacterStore>) -> Self {
        Self::with_config(store, ParserConfig::default())
    }

    pub fn with_config(store: Arc<dyn CharacterStore>, config: ParserConfig) -> Self {
        Self {
            registry: ActorRegistry::new(store, config.resolve_player_names),
            config,
            clock: CombatClock::default(),
            handlers: Vec::new(),
        }
    }

    pub fn add_signal_handler(&mut self, handler: impl SignalHandler + Send + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Process a batch of events in order.
    pub fn process_events<'a, I>(&mut self, events: I) -> Vec<GameSignal>
    where
        I: IntoIterator<Item = &'a CombatEvent>,
    {
        let mut signals = Vec::new();
        for event in events {
            signals.extend(self.process_event(event));
        }
        signals
    }

    /// Process a single event and return the signals it produced. Name lookups
    /// that completed since the previous event are applied first.
    pub fn process_event(&mut self, event: &CombatEvent) -> Vec<GameSignal> {
        self.registry.apply_resolved_names();
        let mut signals = Vec::new();
        let time = event.time;

        match &event.kind {
            EventKind::Action(action) => self.handle_action(time, action, &mut signals),
            EventKind::StatusList(list) => {
                self.registry
                    .get_or_create(list.target)
                    .set_statuses(&list.vitals, &list.statuses);
            }
            EventKind::StatusStats(stats) => {
                self.registry
                    .get_or_create(stats.target)
                    .set_vitals(&stats.vitals);
            }
            EventKind::Status(status) => self.handle_status_gain(
                time,
                status.target,
                StatusGain::Started(&status.status),
                &mut signals,
            ),
            EventKind::AllianceInfo(roster) => self.handle_roster(roster, false),
            EventKind::PartyInfo(roster) => self.handle_roster(roster, true),
            EventKind::NpcSpawn(spawn) => {
                self.registry.get_or_create(spawn.source).is_npc = true;
                if let Some(owner) = spawn.owner {
                    self.registry.set_owner(spawn.source, owner);
                }
            }
            EventKind::PlayerSpawn(spawn) => {
                let info = &spawn.actor_info;
                self.registry
                    .identify(spawn.source, &info.name, Job::from_id(info.job))
                    .is_npc = false;
            }
            EventKind::ObjectSpawn(spawn) => {
                self.registry.get_or_create(spawn.source).is_obj = true;
                self.registry.set_owner(spawn.source, spawn.actor_info.owner);
            }
            EventKind::Tick(tick) => self.handle_tick(time, tick, &mut signals),
            EventKind::Unknown => {}
        }

        if !signals.is_empty() {
            for handler in self.handlers.iter_mut() {
                handler.handle_signals(&signals, &self.registry);
            }
        }
        signals
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Actions
    // ═══════════════════════════════════════════════════════════════════════

    fn handle_action(&mut self, time: i64, action: &ActionEvent, signals: &mut Vec<GameSignal>) {
        let source = self.registry.get_or_create(action.source);
        source.active = true;
        if !source.job.is_known() {
            let job = Job::from_action(action.skill);
            if job.is_known() {
                source.job = job;
                signals.push(GameSignal::JobIdentified {
                    actor_id: action.source,
                    job,
                    skill: action.skill,
                    timestamp: time,
                });
            }
        }
        let source_is_player = !source.is_npc;
        self.registry.get_or_create(action.target);

        for effect in &action.effects {
            let target_id = if effect.targets_source() {
                action.source
            } else {
                action.target
            };
            let target_is_player = !self.registry.get_or_create(target_id).is_npc;

            if effect.is_damaging() {
                self.clock.record_damage(time);

                if effect.param == 0 || effect.value == 0 {
                    tracing::debug!(time, skill = action.skill, "Skipping zero-magnitude effect");
                    continue;
                }
                if source_is_player && target_is_player {
                    tracing::debug!(
                        time,
                        source = action.source,
                        target = target_id,
                        "Skipping friendly fire"
                    );
                    continue;
                }

                let credited = if effect.is_limit_break() {
                    actor_id::LIMIT_BREAK
                } else {
                    action.source
                };
                self.registry.record_damage(
                    credited,
                    time,
                    action,
                    effect,
                    &self.config.damage_model,
                );
            } else if effect.kind == EffectKind::ApplyStatus {
                self.registry.record_status_application(
                    target_id,
                    action.source,
                    effect,
                    &self.config.damage_model,
                );
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Statuses / Roster
    // ═══════════════════════════════════════════════════════════════════════

    fn handle_status_gain(
        &mut self,
        time: i64,
        target: ActorId,
        gain: StatusGain<'_>,
        signals: &mut Vec<GameSignal>,
    ) {
        let fallback = self.config.dot_duration_fallback;
        let Some(dot) = self
            .registry
            .get_or_create(target)
            .apply_status(time, gain, fallback)
        else {
            return;
        };

        tracing::debug!(
            time,
            target,
            source = dot.source,
            status = dot.status,
            edge_damage = dot.edge_damage,
            "Dot confirmed"
        );
        signals.push(GameSignal::DotConfirmed {
            target_id: target,
            source_id: dot.source,
            status: dot.status,
            edge_damage: dot.edge_damage,
            expires_at: dot.expires_at(),
            timestamp: time,
        });
    }

    fn handle_roster(&mut self, roster: &RosterEvent, party: bool) {
        for member in &roster.members {
            let actor = self
                .registry
                .identify(member.id, &member.name, Job::from_id(member.job));
            if party {
                actor.party = true;
                actor.is_npc = false;
                actor.active = true;
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Ticks
    // ═══════════════════════════════════════════════════════════════════════

    fn handle_tick(&mut self, time: i64, tick: &TickEvent, signals: &mut Vec<GameSignal>) {
        match tick.tick {
            TickKind::StatusGain => self.handle_status_gain(
                time,
                tick.target,
                StatusGain::Ticked {
                    status: tick.skill,
                    source: tick.source,
                },
                signals,
            ),
            TickKind::StatusRemove => {
                self.registry
                    .get_or_create(tick.target)
                    .remove_status(time, tick.skill);
            }
            TickKind::Death => {
                let actor = self.registry.get_or_create(tick.target);
                actor.death();
                signals.push(GameSignal::ActorDeath {
                    actor_id: tick.target,
                    death_count: actor.death_count,
                    timestamp: time,
                });
            }
            TickKind::Dot => self.handle_dot_tick(time, tick, signals),
            TickKind::InCombat => signals.extend(combat_state::advance_combat_state(
                time,
                tick,
                &mut self.registry,
                &mut self.clock,
            )),
            TickKind::Other => {}
        }
    }

    fn handle_dot_tick(&mut self, time: i64, tick: &TickEvent, signals: &mut Vec<GameSignal>) {
        // Ticks naming their skill also name their source
        if tick.skill != 0 {
            self.registry.record_dot_damage(tick.source, tick.value);
            return;
        }
        // Environmental ticks on players
        if tick.source == actor_id::NO_OWNER {
            return;
        }

        let split = self
            .registry
            .get_or_create(tick.target)
            .split_dot_damage(time, tick.value);
        if split.is_empty() {
            tracing::debug!(time, target = tick.target, value = tick.value, "Unattributed dot tick");
            return;
        }

        let mut shares: Vec<(ActorId, i64)> = split.into_iter().collect();
        shares.sort_unstable();
        for &(source, share) in &shares {
            self.registry.record_dot_damage(source, share);
        }
        tracing::trace!(time, target = tick.target, ?shares, "Dot tick split");
        signals.push(GameSignal::DotDamageSplit {
            target_id: tick.target,
            value: tick.value,
            shares,
            timestamp: time,
        });
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Snapshot access
    // ═══════════════════════════════════════════════════════════════════════

    /// Apply name lookups that have completed, without waiting. Returns how
    /// many were applied.
    pub fn apply_resolved_names(&mut self) -> usize {
        self.registry.apply_resolved_names()
    }

    /// Wait for every outstanding name lookup and apply the results.
    pub async fn settle_names(&mut self) {
        self.registry.settle_names().await;
    }

    pub fn stats(&self) -> EncounterStats {
        EncounterStats::collect(&self.clock, self.registry.actors())
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.registry.get(id)
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.registry.actors()
    }

    pub fn registry(&self) -> &ActorRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn state(&self) -> EncounterState {
        self.clock.state()
    }

    pub fn start_time(&self) -> Option<i64> {
        self.clock.start_time()
    }

    pub fn end_time(&self) -> Option<i64> {
        self.clock.end_time()
    }

    pub fn ended(&self) -> Option<i64> {
        self.clock.ended()
    }

    pub fn last_damage_time(&self) -> Option<i64> {
        self.clock.last_damage_time()
    }
}
