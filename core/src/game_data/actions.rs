//! Action metadata: base potencies and job-identifying actions.
//!
//! Potencies are the uncombo'd, unbuffed values for the current patch. Only
//! actions that matter for potency reconstruction or job inference are listed.

use phf::phf_map;

use super::Job;
use crate::combat_log::SkillId;

#[derive(Debug, Clone, Copy)]
pub struct ActionInfo {
    pub name: &'static str,
    /// Base potency of the direct hit, 0 if the action deals no direct damage.
    pub potency: u32,
    /// Potency when the action consumes a free-cast proc (e.g. Thundercloud),
    /// which folds the whole dot into the initial hit.
    pub proc_potency: Option<u32>,
    /// Set when using this action identifies the caster's job.
    pub job: Option<Job>,
}

impl ActionInfo {
    const fn new(name: &'static str, potency: u32) -> Self {
        Self {
            name,
            potency,
            proc_potency: None,
            job: None,
        }
    }

    const fn signature(name: &'static str, potency: u32, job: Job) -> Self {
        Self {
            name,
            potency,
            proc_potency: None,
            job: Some(job),
        }
    }

    const fn with_proc(name: &'static str, potency: u32, proc_potency: u32) -> Self {
        Self {
            name,
            potency,
            proc_potency: Some(proc_potency),
            job: None,
        }
    }

    /// Potency of the direct hit, if any.
    pub fn base_potency(&self) -> Option<u32> {
        (self.potency > 0).then_some(self.potency)
    }
}

pub fn lookup_action(skill: SkillId) -> Option<&'static ActionInfo> {
    ACTION_INFO.get(&skill)
}

pub static ACTION_INFO: phf::Map<u32, ActionInfo> = phf_map! {
    // ═══════════════════════════════════════════════════════════════════════════
    // Tanks
    // ═══════════════════════════════════════════════════════════════════════════
    9u32 => ActionInfo::new("Fast Blade", 200),
    15u32 => ActionInfo::signature("Riot Blade", 100, Job::Pld),
    23u32 => ActionInfo::new("Circle of Scorn", 120),
    3538u32 => ActionInfo::new("Goring Blade", 100),
    3539u32 => ActionInfo::new("Royal Authority", 100),
    7384u32 => ActionInfo::new("Holy Spirit", 350),
    16460u32 => ActionInfo::new("Atonement", 550),
    31u32 => ActionInfo::signature("Heavy Swing", 200, Job::War),
    3617u32 => ActionInfo::signature("Hard Slash", 200, Job::Drk),
    16137u32 => ActionInfo::signature("Keen Edge", 200, Job::Gnb),
    16153u32 => ActionInfo::new("Sonic Break", 300),
    16159u32 => ActionInfo::new("Bow Shock", 200),

    // ═══════════════════════════════════════════════════════════════════════════
    // Healers
    // ═══════════════════════════════════════════════════════════════════════════
    16533u32 => ActionInfo::signature("Glare", 300, Job::Whm),
    16532u32 => ActionInfo::new("Dia", 120),
    16540u32 => ActionInfo::signature("Biolysis", 0, Job::Sch),
    7442u32 => ActionInfo::signature("Malefic III", 230, Job::Ast),
    16555u32 => ActionInfo::signature("Malefic IV", 250, Job::Ast),
    16554u32 => ActionInfo::new("Combust III", 0),

    // ═══════════════════════════════════════════════════════════════════════════
    // Melee
    // ═══════════════════════════════════════════════════════════════════════════
    53u32 => ActionInfo::signature("Bootshine", 200, Job::Mnk),
    66u32 => ActionInfo::new("Demolish", 90),
    75u32 => ActionInfo::signature("True Thrust", 290, Job::Drg),
    88u32 => ActionInfo::new("Chaos Thrust", 100),
    2240u32 => ActionInfo::signature("Spinning Edge", 230, Job::Nin),
    7477u32 => ActionInfo::signature("Hakaze", 200, Job::Sam),
    7489u32 => ActionInfo::new("Higanbana", 250),

    // ═══════════════════════════════════════════════════════════════════════════
    // Ranged
    // ═══════════════════════════════════════════════════════════════════════════
    16495u32 => ActionInfo::signature("Burst Shot", 250, Job::Brd),
    7406u32 => ActionInfo::new("Caustic Bite", 150),
    7407u32 => ActionInfo::new("Stormbite", 100),
    7411u32 => ActionInfo::signature("Heated Split Shot", 220, Job::Mch),
    15989u32 => ActionInfo::signature("Cascade", 250, Job::Dnc),
    15997u32 => ActionInfo::signature("Standard Step", 0, Job::Dnc),

    // ═══════════════════════════════════════════════════════════════════════════
    // Casters
    // ═══════════════════════════════════════════════════════════════════════════
    154u32 => ActionInfo::signature("Blizzard III", 240, Job::Blm),
    3577u32 => ActionInfo::new("Fire IV", 300),
    153u32 => ActionInfo::with_proc("Thunder III", 70, 390),
    7420u32 => ActionInfo::with_proc("Thunder IV", 50, 230),
    3579u32 => ActionInfo::signature("Ruin III", 200, Job::Smn),
    7424u32 => ActionInfo::new("Bio III", 0),
    7425u32 => ActionInfo::new("Miasma III", 50),
    7524u32 => ActionInfo::signature("Jolt II", 280, Job::Rdm),
};
