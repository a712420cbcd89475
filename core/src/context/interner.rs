use lasso::{Spur, ThreadedRodeo};
use std::sync::OnceLock;

/// Interned actor name - 4 bytes instead of 24 for String.
pub type IStr = Spur;

/// Global interner for actor names.
static INTERNER: OnceLock<ThreadedRodeo> = OnceLock::new();

static PLACEHOLDERS: OnceLock<Placeholders> = OnceLock::new();

struct Placeholders {
    empty: Spur,
    npc: Spur,
    unknown: Spur,
    limit_break: Spur,
}

fn interner() -> &'static ThreadedRodeo {
    INTERNER.get_or_init(ThreadedRodeo::default)
}

fn placeholders() -> &'static Placeholders {
    PLACEHOLDERS.get_or_init(|| {
        let rodeo = interner();
        Placeholders {
            empty: rodeo.get_or_intern_static(""),
            npc: rodeo.get_or_intern_static("NPC"),
            unknown: rodeo.get_or_intern_static("Unknown"),
            limit_break: rodeo.get_or_intern_static("Limit Break"),
        }
    })
}

/// Intern a name, returning a key.
pub fn intern(s: &str) -> IStr {
    interner().get_or_intern(s)
}

/// Resolve an interned key back to a string.
pub fn resolve(key: IStr) -> &'static str {
    interner().resolve(&key)
}

/// Name of a player whose name has not been resolved yet. Use this instead of
/// IStr::default() since Spur::default() collides with the first interned string.
#[inline]
pub fn empty_istr() -> IStr {
    placeholders().empty
}

#[inline]
pub fn npc_istr() -> IStr {
    placeholders().npc
}

/// Name given to a player the name store could not resolve.
#[inline]
pub fn unknown_istr() -> IStr {
    placeholders().unknown
}

#[inline]
pub fn limit_break_istr() -> IStr {
    placeholders().limit_break
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_round_trip() {
        assert_eq!(resolve(empty_istr()), "");
        assert_eq!(resolve(npc_istr()), "NPC");
        assert_eq!(resolve(unknown_istr()), "Unknown");
        assert_eq!(resolve(limit_break_istr()), "Limit Break");
        assert_eq!(intern("NPC"), npc_istr());
    }
}
