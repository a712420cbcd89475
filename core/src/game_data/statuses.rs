//! Status metadata: dot potencies, default durations and tracked raid buffs.

use phf::phf_map;

use crate::combat_log::StatusId;

/// Raid buffs and debuffs that inflate the crit parameter reported with a dot
/// application. They must be subtracted before the crit rate can be recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedBuff {
    BattleLitany,
    BattleVoice,
    ChainStratagem,
    WanderersMinuet,
    ArmysPaeon,
}

impl TrackedBuff {
    /// Crit parameter contributed when the buff is on the dot's source.
    pub const fn source_crit_offset(&self) -> i64 {
        match self {
            TrackedBuff::BattleLitany => 100,
            TrackedBuff::WanderersMinuet => 20,
            _ => 0,
        }
    }

    /// Crit parameter contributed when the debuff is on the dot's target.
    pub const fn target_crit_offset(&self) -> i64 {
        match self {
            TrackedBuff::ChainStratagem => 100,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StatusInfo {
    pub name: &'static str,
    /// Potency per tick for damage-over-time statuses, 0 otherwise.
    pub potency: u32,
    /// Duration in seconds when applied without extensions.
    pub duration: f64,
    pub tracked: Option<TrackedBuff>,
}

impl StatusInfo {
    const fn dot(name: &'static str, potency: u32, duration: f64) -> Self {
        Self {
            name,
            potency,
            duration,
            tracked: None,
        }
    }

    const fn buff(name: &'static str, duration: f64, tracked: TrackedBuff) -> Self {
        Self {
            name,
            potency: 0,
            duration,
            tracked: Some(tracked),
        }
    }

    const fn plain(name: &'static str, duration: f64) -> Self {
        Self {
            name,
            potency: 0,
            duration,
            tracked: None,
        }
    }

    pub fn dot_potency(&self) -> Option<u32> {
        (self.potency > 0).then_some(self.potency)
    }
}

pub fn lookup_status(id: StatusId) -> Option<&'static StatusInfo> {
    STATUS_INFO.get(&id)
}

pub fn tracked_buff(id: StatusId) -> Option<TrackedBuff> {
    lookup_status(id).and_then(|s| s.tracked)
}

pub static STATUS_INFO: phf::Map<u32, StatusInfo> = phf_map! {
    // ═══════════════════════════════════════════════════════════════════════════
    // Damage over time
    // ═══════════════════════════════════════════════════════════════════════════
    248u32 => StatusInfo::dot("Circle of Scorn", 35, 15.0),
    725u32 => StatusInfo::dot("Goring Blade", 85, 21.0),
    1837u32 => StatusInfo::dot("Sonic Break", 90, 30.0),
    1838u32 => StatusInfo::dot("Bow Shock", 90, 15.0),
    1871u32 => StatusInfo::dot("Dia", 60, 30.0),
    1895u32 => StatusInfo::dot("Biolysis", 70, 30.0),
    1881u32 => StatusInfo::dot("Combust III", 55, 30.0),
    246u32 => StatusInfo::dot("Demolish", 65, 18.0),
    118u32 => StatusInfo::dot("Chaos Thrust", 50, 24.0),
    1228u32 => StatusInfo::dot("Higanbana", 45, 60.0),
    1200u32 => StatusInfo::dot("Caustic Bite", 40, 45.0),
    1201u32 => StatusInfo::dot("Stormbite", 50, 45.0),
    163u32 => StatusInfo::dot("Thunder III", 40, 24.0),
    1210u32 => StatusInfo::dot("Thunder IV", 30, 18.0),
    1214u32 => StatusInfo::dot("Bio III", 50, 30.0),
    1215u32 => StatusInfo::dot("Miasma III", 50, 30.0),

    // ═══════════════════════════════════════════════════════════════════════════
    // Procs
    // ═══════════════════════════════════════════════════════════════════════════
    164u32 => StatusInfo::plain("Thundercloud", 18.0),

    // ═══════════════════════════════════════════════════════════════════════════
    // Raid buffs / debuffs
    // ═══════════════════════════════════════════════════════════════════════════
    786u32 => StatusInfo::buff("Battle Litany", 20.0, TrackedBuff::BattleLitany),
    141u32 => StatusInfo::buff("Battle Voice", 20.0, TrackedBuff::BattleVoice),
    1221u32 => StatusInfo::buff("Chain Stratagem", 15.0, TrackedBuff::ChainStratagem),
    2216u32 => StatusInfo::buff("The Wanderer's Minuet", 30.0, TrackedBuff::WanderersMinuet),
    2218u32 => StatusInfo::buff("Army's Paeon", 30.0, TrackedBuff::ArmysPaeon),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dots_carry_potency_and_duration() {
        let scorn = lookup_status(248).unwrap();
        assert_eq!(scorn.dot_potency(), Some(35));
        assert_eq!(scorn.duration, 15.0);
        assert_eq!(lookup_status(164).and_then(|s| s.dot_potency()), None);
    }

    #[test]
    fn buff_offsets_depend_on_side() {
        let litany = tracked_buff(786).unwrap();
        assert_eq!(litany.source_crit_offset(), 100);
        assert_eq!(litany.target_crit_offset(), 0);

        let chain = tracked_buff(1221).unwrap();
        assert_eq!(chain.source_crit_offset(), 0);
        assert_eq!(chain.target_crit_offset(), 100);

        assert_eq!(tracked_buff(2216).map(|b| b.source_crit_offset()), Some(20));
        assert_eq!(tracked_buff(141).map(|b| b.source_crit_offset()), Some(0));
        assert!(tracked_buff(248).is_none());
    }
}
