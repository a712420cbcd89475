//! Jobs and role mapping
//!
//! Maps the numeric class/job ids found in roster and spawn records to jobs,
//! and infers a job from signature actions when no roster record was seen.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::actions::lookup_action;
use crate::combat_log::SkillId;

/// Role in group content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Tank,
    Healer,
    Dps,
    /// Crafters, gatherers and pseudo actors.
    NonCombat,
}

/// Class or job of an actor.
///
/// Base classes (GLA, THM, ...) are kept separate from their jobs because the
/// game reports them separately for low level characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Job {
    #[default]
    Unknown,
    Gla,
    Pgl,
    Mrd,
    Lnc,
    Arc,
    Cnj,
    Thm,
    Cpt,
    Bsm,
    Arm,
    Gsm,
    Ltw,
    Wvr,
    Alc,
    Cul,
    Min,
    Btn,
    Fsh,
    Pld,
    Mnk,
    War,
    Drg,
    Brd,
    Whm,
    Blm,
    Acn,
    Smn,
    Sch,
    Rog,
    Nin,
    Mch,
    Drk,
    Ast,
    Sam,
    Rdm,
    Blu,
    Gnb,
    Dnc,
    /// Pseudo job of the party limit break actor.
    LimitBreak,
}

impl Job {
    /// Job from the numeric id used in roster and spawn records.
    pub const fn from_id(id: u8) -> Job {
        match id {
            1 => Job::Gla,
            2 => Job::Pgl,
            3 => Job::Mrd,
            4 => Job::Lnc,
            5 => Job::Arc,
            6 => Job::Cnj,
            7 => Job::Thm,
            8 => Job::Cpt,
            9 => Job::Bsm,
            10 => Job::Arm,
            11 => Job::Gsm,
            12 => Job::Ltw,
            13 => Job::Wvr,
            14 => Job::Alc,
            15 => Job::Cul,
            16 => Job::Min,
            17 => Job::Btn,
            18 => Job::Fsh,
            19 => Job::Pld,
            20 => Job::Mnk,
            21 => Job::War,
            22 => Job::Drg,
            23 => Job::Brd,
            24 => Job::Whm,
            25 => Job::Blm,
            26 => Job::Acn,
            27 => Job::Smn,
            28 => Job::Sch,
            29 => Job::Rog,
            30 => Job::Nin,
            31 => Job::Mch,
            32 => Job::Drk,
            33 => Job::Ast,
            34 => Job::Sam,
            35 => Job::Rdm,
            36 => Job::Blu,
            37 => Job::Gnb,
            38 => Job::Dnc,
            _ => Job::Unknown,
        }
    }

    /// Infer a job from a signature action. Returns `Unknown` for shared or
    /// unlisted actions.
    pub fn from_action(skill: SkillId) -> Job {
        lookup_action(skill).and_then(|a| a.job).unwrap_or(Job::Unknown)
    }

    pub const fn is_known(&self) -> bool {
        !matches!(self, Job::Unknown)
    }

    pub const fn abbreviation(&self) -> &'static str {
        match self {
            Job::Unknown => "Unknown",
            Job::Gla => "GLA",
            Job::Pgl => "PGL",
            Job::Mrd => "MRD",
            Job::Lnc => "LNC",
            Job::Arc => "ARC",
            Job::Cnj => "CNJ",
            Job::Thm => "THM",
            Job::Cpt => "CPT",
            Job::Bsm => "BSM",
            Job::Arm => "ARM",
            Job::Gsm => "GSM",
            Job::Ltw => "LTW",
            Job::Wvr => "WVR",
            Job::Alc => "ALC",
            Job::Cul => "CUL",
            Job::Min => "MIN",
            Job::Btn => "BTN",
            Job::Fsh => "FSH",
            Job::Pld => "PLD",
            Job::Mnk => "MNK",
            Job::War => "WAR",
            Job::Drg => "DRG",
            Job::Brd => "BRD",
            Job::Whm => "WHM",
            Job::Blm => "BLM",
            Job::Acn => "ACN",
            Job::Smn => "SMN",
            Job::Sch => "SCH",
            Job::Rog => "ROG",
            Job::Nin => "NIN",
            Job::Mch => "MCH",
            Job::Drk => "DRK",
            Job::Ast => "AST",
            Job::Sam => "SAM",
            Job::Rdm => "RDM",
            Job::Blu => "BLU",
            Job::Gnb => "GNB",
            Job::Dnc => "DNC",
            Job::LimitBreak => "LB",
        }
    }

    pub const fn role(&self) -> Role {
        match self {
            Job::Gla | Job::Mrd | Job::Pld | Job::War | Job::Drk | Job::Gnb => Role::Tank,
            Job::Cnj | Job::Whm | Job::Sch | Job::Ast => Role::Healer,
            Job::Pgl
            | Job::Lnc
            | Job::Arc
            | Job::Thm
            | Job::Acn
            | Job::Mnk
            | Job::Drg
            | Job::Brd
            | Job::Blm
            | Job::Smn
            | Job::Rog
            | Job::Nin
            | Job::Mch
            | Job::Sam
            | Job::Rdm
            | Job::Blu
            | Job::Dnc => Role::Dps,
            _ => Role::NonCombat,
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}
