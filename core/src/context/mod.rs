mod config;
mod error;
mod interner;
mod name_store;

pub use config::{DamageModelConfig, ParserConfig, ParserConfigExt};
pub use error::{ConfigError, NameStoreError};
pub use interner::{
    IStr, empty_istr, intern, limit_break_istr, npc_istr, resolve, unknown_istr,
};
pub use name_store::{CharacterStore, MemoryCharacterStore};
