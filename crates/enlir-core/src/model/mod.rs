//! Typed Enlir entities and the containers that carry them between stages
//!
//! Every entity carries a dense `Id` assigned at transform time (starting at
//! 1) and a human-readable `description`. Link fields start at 0 / empty and
//! are only filled in by the merge.

macro_rules! impl_record {
    ($ty:ty) => {
        impl $crate::model::Record for $ty {
            fn id(&self) -> $crate::model::Id {
                self.id
            }

            fn description(&self) -> &str {
                &self.description
            }
        }
    };
    ($ty:ty, $label:ident) => {
        impl $crate::model::Record for $ty {
            fn id(&self) -> $crate::model::Id {
                self.id
            }

            fn description(&self) -> &str {
                &self.description
            }

            fn label(&self) -> &str {
                &self.$label
            }
        }
    };
}
pub(crate) use impl_record;

mod ability;
mod character;
mod container;
mod equipment;
mod event;

pub use ability::{
    Ability, BraveAction, Command, LimitBreak, OrbRequirement, Other, OtherSource, SoulBreak,
    Status, SynchroCommand,
};
pub use character::{
    Character, LegendMateria, LegendSphere, RecordMateria, RecordSphere, StatsByLevelInfo,
};
pub use container::{EntityKind, IdLists, MergeResultsContainer, TransformResultsContainer};
pub use equipment::{Magicite, MagiciteSkill, Relic};
pub use event::{Event, Experience, Mission, MissionReward};

use serde::{Deserialize, Serialize};

/// Entity id; 0 means "unresolved" and never denotes a real record
pub type Id = u32;

/// Common surface of every entity collection member
pub trait Record {
    fn id(&self) -> Id;

    fn description(&self) -> &str;

    /// Most recognizable name, used for `(id, label)` lookup lists
    fn label(&self) -> &str {
        self.description()
    }
}

/// Combat profile shared by abilities, soul breaks, commands and the rest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionProfile {
    /// Id from the AbilityType list
    pub ability_type: Id,
    /// Id from the TargetType list
    pub target_type: Id,
    /// Id from the AutoTargetType list
    pub auto_target_type: Id,
    /// Id from the DamageFormulaType list
    pub damage_formula_type: Id,
    /// Damage or healing multiplier
    pub multiplier: f64,
    /// Ids from the Element list
    pub elements: Vec<Id>,
    /// Cast time in seconds
    pub cast_time: f64,
    /// Effect text; bracketed tokens name statuses
    pub effects: String,
    /// Can trigger counters
    pub is_counterable: bool,
}

/// Character or equipment stat line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: i64,
    pub atk: i64,
    pub def: i64,
    pub mag: i64,
    pub res: i64,
    pub mnd: i64,
    pub acc: i64,
    pub eva: i64,
    pub spd: i64,
}
