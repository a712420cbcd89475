//! Sole owner of every actor in an encounter.
//!
//! Name lookups run as spawned tasks against the character store and report
//! back over a channel. Results are only applied by the registry itself
//! (`apply_resolved_names` / `settle_names`), so the actor map never needs a
//! lock and event processing never waits on the store.

use std::sync::Arc;

use hashbrown::hash_map::Entry;
use hashbrown::{HashMap, HashSet};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::combat_log::{ActionEffect, ActionEvent, ActorId};
use crate::context::{
    CharacterStore, DamageModelConfig, IStr, NameStoreError, empty_istr, intern,
    limit_break_istr, unknown_istr,
};
use crate::encounter::{Actor, PendingDot};
use crate::game_data::{Job, actor_id};

/// Outcome of one name lookup, sent back from the lookup task.
#[derive(Debug)]
struct NameResolution {
    id: ActorId,
    result: Result<String, NameStoreError>,
}

struct NameResolver {
    store: Arc<dyn CharacterStore>,
    enabled: bool,
    /// Names known for this encounter, from rosters, spawns or the store.
    cache: HashMap<ActorId, IStr>,
    /// Ids with a lookup requested but not yet applied.
    in_flight: HashSet<ActorId>,
    /// Requests made without an async runtime; dispatched on the next settle.
    deferred: Vec<ActorId>,
    tx: mpsc::UnboundedSender<NameResolution>,
    rx: mpsc::UnboundedReceiver<NameResolution>,
}

impl NameResolver {
    fn new(store: Arc<dyn CharacterStore>, enabled: bool) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            store,
            enabled,
            cache: HashMap::new(),
            in_flight: HashSet::new(),
            deferred: Vec::new(),
            tx,
            rx,
        }
    }

    fn request(&mut self, id: ActorId) {
        if !self.enabled || !self.in_flight.insert(id) {
            return;
        }
        match Handle::try_current() {
            Ok(handle) => self.spawn_lookup(&handle, id),
            Err(_) => {
                tracing::warn!(actor = id, "No async runtime, deferring name lookup");
                self.deferred.push(id);
            }
        }
    }

    fn spawn_lookup(&self, handle: &Handle, id: ActorId) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        handle.spawn(async move {
            let result = store.get_character(id).await;
            // Registry dropped: nobody left to name
            let _ = tx.send(NameResolution { id, result });
        });
    }

    fn dispatch_deferred(&mut self) {
        if self.deferred.is_empty() {
            return;
        }
        let Ok(handle) = Handle::try_current() else {
            return;
        };
        for id in std::mem::take(&mut self.deferred) {
            self.spawn_lookup(&handle, id);
        }
    }

    /// Lookups that have actually been dispatched.
    fn outstanding(&self) -> usize {
        self.in_flight.len() - self.deferred.len()
    }
}

pub struct ActorRegistry {
    actors: HashMap<ActorId, Actor>,
    names: NameResolver,
}

impl ActorRegistry {
    pub fn new(store: Arc<dyn CharacterStore>, resolve_names: bool) -> Self {
        let mut actors = HashMap::new();
        actors.insert(actor_id::LIMIT_BREAK, limit_break_actor());
        Self {
            actors,
            names: NameResolver::new(store, resolve_names),
        }
    }

    // --- Actor access ---

    /// Return the actor for `id`, creating it on first reference.
    ///
    /// A new player actor takes its name from the encounter's name cache, or
    /// starts with an empty placeholder and gets a single lookup queued.
    pub fn get_or_create(&mut self, id: ActorId) -> &mut Actor {
        match self.actors.entry(id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let mut actor = Actor::new(id);
                if !actor.is_npc {
                    match self.names.cache.get(&id) {
                        Some(name) => actor.name = *name,
                        None => self.names.request(id),
                    }
                }
                tracing::trace!(actor = id, npc = actor.is_npc, "New actor");
                entry.insert(actor)
            }
        }
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    // --- Identity ---

    /// Record a name (and job, when known) reported by a roster or spawn record
    /// and persist the name to the character store.
    pub fn identify(&mut self, id: ActorId, name: &str, job: Job) -> &mut Actor {
        let name_key = (!name.is_empty()).then(|| intern(name));
        if let Some(key) = name_key {
            self.names.cache.insert(id, key);
            self.names.store.save_character(id, name);
        }

        let actor = self.get_or_create(id);
        if let Some(key) = name_key {
            actor.name = key;
        }
        if job.is_known() {
            actor.job = job;
        }
        actor
    }

    /// Attach a controlling actor. The no-owner sentinel and zero are ignored.
    pub fn set_owner(&mut self, id: ActorId, owner: ActorId) {
        if owner == 0 || owner == actor_id::NO_OWNER || owner == id {
            return;
        }
        self.get_or_create(owner);
        self.get_or_create(id).owner = Some(owner);
    }

    // --- Damage ---

    /// Account a damaging effect to `id` and relay it to the owner, if any.
    pub fn record_damage(
        &mut self,
        id: ActorId,
        time: i64,
        action: &ActionEvent,
        effect: &ActionEffect,
        model: &DamageModelConfig,
    ) {
        let actor = self.get_or_create(id);
        actor.damage(time, action, effect, model);
        let owner = actor.owner;
        self.relay_to_owner(owner, effect.value);
    }

    pub fn record_dot_damage(&mut self, id: ActorId, amount: i64) {
        let actor = self.get_or_create(id);
        actor.dot_damage(amount);
        let owner = actor.owner;
        self.relay_to_owner(owner, amount);
    }

    fn relay_to_owner(&mut self, owner: Option<ActorId>, amount: i64) {
        if let Some(owner) = owner {
            self.get_or_create(owner).pet_damage(amount);
        }
    }

    /// Stage a dot estimate on `target` for a status `source` applied.
    pub fn record_status_application(
        &mut self,
        target: ActorId,
        source: ActorId,
        effect: &ActionEffect,
        model: &DamageModelConfig,
    ) -> Option<PendingDot> {
        let source = self.get_or_create(source).dot_source();
        self.get_or_create(target)
            .add_status(&source, effect, model)
            .cloned()
    }

    // --- Name resolution ---

    /// Apply every name lookup that has completed so far. Never waits.
    pub fn apply_resolved_names(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(resolution) = self.names.rx.try_recv() {
            self.apply_resolution(resolution);
            applied += 1;
        }
        applied
    }

    /// Wait until every requested lookup has been applied.
    pub async fn settle_names(&mut self) {
        self.names.dispatch_deferred();
        while self.names.outstanding() > 0 {
            match self.names.rx.recv().await {
                Some(resolution) => self.apply_resolution(resolution),
                None => break,
            }
        }
    }

    /// Number of lookups requested but not yet applied.
    pub fn pending_names(&self) -> usize {
        self.names.in_flight.len()
    }

    fn apply_resolution(&mut self, NameResolution { id, result }: NameResolution) {
        self.names.in_flight.remove(&id);

        let name = match result {
            Ok(name) => {
                let key = intern(&name);
                // Roster and spawn names are newer than the store's
                self.names.cache.entry(id).or_insert(key);
                key
            }
            Err(NameStoreError::NotFound { .. }) => {
                tracing::debug!(actor = id, "No stored name");
                unknown_istr()
            }
            Err(e) => {
                tracing::warn!(actor = id, error = %e, "Name lookup failed");
                unknown_istr()
            }
        };

        // A roster or spawn record may have named the actor in the meantime
        if let Some(actor) = self.actors.get_mut(&id)
            && actor.name == empty_istr()
        {
            actor.name = name;
        }
    }
}

fn limit_break_actor() -> Actor {
    let mut actor = Actor::new(actor_id::LIMIT_BREAK);
    actor.name = limit_break_istr();
    actor.job = Job::LimitBreak;
    // Consumers divide by hits
    actor.hits = 1;
    actor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{MemoryCharacterStore, npc_istr, resolve};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PC: ActorId = 0x1000_0001;
    const PET: ActorId = 0x4000_0010;
    const NPC: ActorId = 0x4000_0001;

    #[derive(Default)]
    struct CountingStore {
        inner: MemoryCharacterStore,
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl CharacterStore for CountingStore {
        async fn get_character(&self, id: ActorId) -> Result<String, NameStoreError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.get_character(id).await
        }

        fn save_character(&self, id: ActorId, name: &str) {
            self.inner.save_character(id, name);
        }
    }

    struct OfflineStore;

    #[async_trait]
    impl CharacterStore for OfflineStore {
        async fn get_character(&self, _id: ActorId) -> Result<String, NameStoreError> {
            Err(NameStoreError::Unavailable("connection refused".into()))
        }

        fn save_character(&self, _id: ActorId, _name: &str) {}
    }

    fn registry_with(chars: &[(ActorId, &str)]) -> ActorRegistry {
        let store = MemoryCharacterStore::with_characters(chars.iter().map(|(id, n)| (*id, *n)));
        ActorRegistry::new(Arc::new(store), true)
    }

    #[test]
    fn limit_break_actor_exists_from_the_start() {
        let registry = registry_with(&[]);
        let lb = registry.get(actor_id::LIMIT_BREAK).unwrap();
        assert_eq!(resolve(lb.name), "Limit Break");
        assert_eq!(lb.job, Job::LimitBreak);
        assert_eq!(lb.hits, 1);
        assert!(!lb.is_npc);
    }

    #[tokio::test]
    async fn same_id_resolves_to_one_actor_and_one_lookup() {
        let store = Arc::new(CountingStore::default());
        let mut registry = ActorRegistry::new(store.clone(), true);

        registry.get_or_create(PC).hits = 7;
        assert_eq!(registry.get_or_create(PC).hits, 7);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.pending_names(), 1);

        registry.settle_names().await;
        assert_eq!(store.lookups.load(Ordering::SeqCst), 1);
        assert_eq!(registry.pending_names(), 0);
    }

    #[tokio::test]
    async fn resolved_name_replaces_placeholder() {
        let mut registry = registry_with(&[(PC, "Y'shtola Rhul")]);
        assert_eq!(registry.get_or_create(PC).name, empty_istr());

        registry.settle_names().await;
        assert_eq!(resolve(registry.get(PC).unwrap().name), "Y'shtola Rhul");
    }

    #[tokio::test]
    async fn unknown_character_falls_back() {
        let mut registry = registry_with(&[]);
        registry.get_or_create(PC);
        registry.settle_names().await;
        assert_eq!(registry.get(PC).unwrap().name, unknown_istr());
    }

    #[tokio::test]
    async fn store_failure_falls_back() {
        let mut registry = ActorRegistry::new(Arc::new(OfflineStore), true);
        registry.get_or_create(PC);
        registry.settle_names().await;
        assert_eq!(registry.get(PC).unwrap().name, unknown_istr());
    }

    #[tokio::test]
    async fn npcs_are_never_looked_up() {
        let store = Arc::new(CountingStore::default());
        let mut registry = ActorRegistry::new(store.clone(), true);
        assert_eq!(registry.get_or_create(NPC).name, npc_istr());
        registry.settle_names().await;
        assert_eq!(store.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn roster_name_wins_over_late_lookup() {
        let store = Arc::new(MemoryCharacterStore::with_characters([(PC, "Old Name")]));
        let mut registry = ActorRegistry::new(store.clone(), true);
        registry.get_or_create(PC);
        registry.identify(PC, "New Name", Job::Whm);
        registry.settle_names().await;

        let actor = registry.get(PC).unwrap();
        assert_eq!(resolve(actor.name), "New Name");
        assert_eq!(actor.job, Job::Whm);
        assert_eq!(registry.names.cache.get(&PC).map(|k| resolve(*k)), Some("New Name"));
        assert_eq!(store.get_character(PC).await.unwrap(), "New Name");
    }

    #[tokio::test]
    async fn identified_actor_needs_no_lookup() {
        let store = Arc::new(CountingStore::default());
        let mut registry = ActorRegistry::new(store.clone(), true);
        registry.identify(PC, "Thancred Waters", Job::Unknown);
        assert_eq!(registry.pending_names(), 0);
        assert_eq!(registry.get(PC).unwrap().job, Job::Unknown);
        registry.settle_names().await;
        assert_eq!(store.lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn lookup_without_runtime_is_deferred_until_settled() {
        let mut registry = registry_with(&[(PC, "Urianger Augurelt")]);
        registry.get_or_create(PC);
        assert_eq!(registry.pending_names(), 1);
        assert_eq!(registry.apply_resolved_names(), 0);

        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(registry.settle_names());
        assert_eq!(resolve(registry.get(PC).unwrap().name), "Urianger Augurelt");
    }

    #[test]
    fn disabled_resolution_keeps_placeholder() {
        let mut registry = ActorRegistry::new(Arc::new(MemoryCharacterStore::new()), false);
        registry.get_or_create(PC);
        assert_eq!(registry.pending_names(), 0);
        assert_eq!(registry.get(PC).unwrap().name, empty_istr());
    }

    #[test]
    fn pet_damage_is_relayed_to_owner() {
        let mut registry = ActorRegistry::new(Arc::new(MemoryCharacterStore::new()), false);
        registry.set_owner(PET, PC);
        registry.record_dot_damage(PET, 50);

        assert_eq!(registry.get(PET).unwrap().damage_dealt, 50);
        let owner = registry.get(PC).unwrap();
        assert_eq!(owner.damage_dealt, 50);
        assert_eq!(owner.pet_damage_dealt, 50);
    }

    #[test]
    fn sentinel_owner_is_ignored() {
        let mut registry = ActorRegistry::new(Arc::new(MemoryCharacterStore::new()), false);
        registry.set_owner(PET, actor_id::NO_OWNER);
        registry.set_owner(PET, 0);
        assert!(!registry.contains(PET));
        assert!(!registry.contains(actor_id::NO_OWNER));
    }
}
