pub mod combat_log;
pub mod context;
pub mod encounter;
pub mod game_data;
pub mod signal_processor;
pub mod state;

// Re-exports for convenience
pub use combat_log::*;
pub use context::{
    CharacterStore, ConfigError, MemoryCharacterStore, NameStoreError, ParserConfig,
    ParserConfigExt,
};
pub use encounter::{Actor, ActorMetrics, Dot, EncounterState, EncounterStats, PendingDot};
pub use game_data::{Job, Role};
pub use signal_processor::{EventProcessor, GameSignal, SignalHandler};
pub use state::ActorRegistry;
