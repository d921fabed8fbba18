//! Abilities, soul breaks, limit breaks, commands, statuses and other effects

use super::{impl_record, ActionProfile, Id};
use serde::{Deserialize, Serialize};

/// Orb cost for one rank of a crafted ability
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbRequirement {
    /// Orb name as written
    pub orb_name: String,
    /// Id from the OrbType list
    pub orb_type: Id,
}

/// A crafted ability
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    /// Dense id assigned at transform time
    pub id: Id,
    /// Human-readable summary used in logs and lookups
    pub description: String,
    /// Ability name
    pub ability_name: String,
    /// Shared combat profile, flattened into the record
    #[serde(flatten)]
    pub action: ActionProfile,
    /// Id from the School list
    pub school: Id,
    /// Star rarity
    pub rarity: i64,
    /// Soul break gauge points gained on use
    pub soul_break_points_gained: i64,
    /// Uses per battle at rank 1
    pub uses_per_battle: i64,
    /// Orb costs per crafting rank
    pub orb_requirements: Vec<OrbRequirement>,
    /// Event that introduced it
    pub introducing_event_name: String,
    /// Link to the introducing event
    pub introducing_event_id: Id,
    /// Released on the global server
    pub is_in_global: bool,
    /// Worksheet row id
    pub enlir_id: String,
}
impl_record!(Ability, ability_name);

/// A status effect; a leaf that is matched into soul breaks and limit breaks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Status {
    /// Dense id assigned at transform time
    pub id: Id,
    /// Human-readable summary used in logs and lookups
    pub description: String,
    /// Name used in bracketed effect tokens
    pub common_name: String,
    /// What the status does
    pub effects: String,
    /// Duration in seconds, 0 when permanent
    pub default_duration: i64,
    /// Duration scaling from MND
    pub mind_modifier: f64,
    /// Statuses this one cannot coexist with
    pub exclusive_statuses: Vec<String>,
    /// Free-form notes
    pub notes: String,
    /// Worksheet row id
    pub enlir_id: String,
}
impl_record!(Status, common_name);

/// A command granted by a soul break
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Dense id assigned at transform time
    pub id: Id,
    /// Human-readable summary used in logs and lookups
    pub description: String,
    /// Command name
    pub command_name: String,
    /// Owning character, as written in the worksheet
    pub character_name: String,
    /// Link to the owning character
    pub character_id: Id,
    /// Soul break that grants it
    pub source_soul_break_name: String,
    /// Link to the granting soul break
    pub source_soul_break_id: Id,
    /// Shared combat profile, flattened into the record
    #[serde(flatten)]
    pub action: ActionProfile,
    /// Soul break gauge points gained on use
    pub soul_break_points_gained: i64,
    /// Id from the School list
    pub school: Id,
    /// Released on the global server
    pub is_in_global: bool,
    /// Worksheet row id
    pub enlir_id: String,
}
impl_record!(Command);

/// A command available in synchro mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynchroCommand {
    /// Dense id assigned at transform time
    pub id: Id,
    /// Human-readable summary used in logs and lookups
    pub description: String,
    /// Command name
    pub command_name: String,
    /// Owning character, as written in the worksheet
    pub character_name: String,
    /// Link to the owning character
    pub character_id: Id,
    /// Soul break that grants it
    pub source_soul_break_name: String,
    /// Link to the granting soul break
    pub source_soul_break_id: Id,
    /// Ability slot the command replaces
    pub synchro_ability_slot: i64,
    /// Condition for entering synchro mode
    pub synchro_condition: String,
    /// Shared combat profile, flattened into the record
    #[serde(flatten)]
    pub action: ActionProfile,
    /// Soul break gauge points gained on use
    pub soul_break_points_gained: i64,
    /// Id from the School list
    pub school: Id,
    /// Released on the global server
    pub is_in_global: bool,
    /// Worksheet row id
    pub enlir_id: String,
}
impl_record!(SynchroCommand);

/// A command whose power scales with brave level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BraveAction {
    /// Dense id assigned at transform time
    pub id: Id,
    /// Human-readable summary used in logs and lookups
    pub description: String,
    /// Brave action name
    pub brave_action_name: String,
    /// Owning character, as written in the worksheet
    pub character_name: String,
    /// Link to the owning character
    pub character_id: Id,
    /// Soul break that grants it
    pub source_soul_break_name: String,
    /// Link to the granting soul break
    pub source_soul_break_id: Id,
    /// Brave level, 0 to 3
    pub brave_level: i64,
    /// Condition that raises the brave level
    pub brave_condition: String,
    /// Shared combat profile, flattened into the record
    #[serde(flatten)]
    pub action: ActionProfile,
    /// Soul break gauge points gained on use
    pub soul_break_points_gained: i64,
    /// Id from the School list
    pub school: Id,
    /// Released on the global server
    pub is_in_global: bool,
    /// Worksheet row id
    pub enlir_id: String,
}
impl_record!(BraveAction);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoulBreak {
    /// Dense id assigned at transform time
    pub id: Id,
    /// Human-readable summary used in logs and lookups
    pub description: String,
    /// Soul break name
    pub soul_break_name: String,
    /// Owning character, as written in the worksheet
    pub character_name: String,
    /// Link to the owning character
    pub character_id: Id,
    /// Realm-qualified relic name, e.g. "Buster Sword (VII)"
    pub relic_name: String,
    /// Link to the relic
    pub relic_id: Id,
    /// Id from the Realm list
    pub realm: Id,
    /// Shared combat profile, flattened into the record
    #[serde(flatten)]
    pub action: ActionProfile,
    /// Gauge points needed to cast
    pub soul_break_points_required: i64,
    /// Id from the SoulBreakTier list
    pub soul_break_tier: Id,
    /// Bonus for mastering it in battle
    pub mastery_bonus: String,
    /// Released on the global server
    pub is_in_global: bool,
    /// Worksheet row id
    pub enlir_id: String,
    /// Commands granted while it is active
    pub commands: Vec<Command>,
    /// Synchro commands it grants
    pub synchro_commands: Vec<SynchroCommand>,
    /// Brave actions it grants
    pub brave_actions: Vec<BraveAction>,
    /// Statuses named in its effect text
    pub statuses: Vec<Status>,
    /// Other effects attributed to it
    pub other_effects: Vec<Other>,
}
impl_record!(SoulBreak, soul_break_name);

/// A limit break, the limit-gauge counterpart of a soul break
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LimitBreak {
    /// Dense id assigned at transform time
    pub id: Id,
    /// Human-readable summary used in logs and lookups
    pub description: String,
    /// Limit break name
    pub limit_break_name: String,
    /// Owning character, as written in the worksheet
    pub character_name: String,
    /// Link to the owning character
    pub character_id: Id,
    /// Realm-qualified relic name, e.g. "Buster Sword (VII)"
    pub relic_name: String,
    /// Link to the relic
    pub relic_id: Id,
    /// Id from the Realm list
    pub realm: Id,
    /// Shared combat profile, flattened into the record
    #[serde(flatten)]
    pub action: ActionProfile,
    /// Limit gauge points needed to cast
    pub minimum_lb_points: i64,
    /// Id from the LimitBreakTier list
    pub limit_break_tier: Id,
    /// Bonus granted on cast
    pub limit_break_bonus: String,
    /// Bonus for mastering it in battle
    pub mastery_bonus: String,
    /// Released on the global server
    pub is_in_global: bool,
    /// Worksheet row id
    pub enlir_id: String,
    /// Statuses named in its effect text
    pub statuses: Vec<Status>,
    /// Other effects attributed to it
    pub other_effects: Vec<Other>,
}
impl_record!(LimitBreak, limit_break_name);

/// Which entity produced an `Other` effect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "source_type", content = "source_id")]
pub enum OtherSource {
    #[default]
    Unresolved,
    Status(Id),
    SoulBreak(Id),
    LimitBreak(Id),
    RecordMateria(Id),
    Relic(Id),
    Command(Id),
    SynchroCommand(Id),
    LegendMateria(Id),
}

impl OtherSource {
    /// Id of the source record, 0 when unresolved
    pub fn id(&self) -> Id {
        match *self {
            OtherSource::Unresolved => 0,
            OtherSource::Status(id)
            | OtherSource::SoulBreak(id)
            | OtherSource::LimitBreak(id)
            | OtherSource::RecordMateria(id)
            | OtherSource::Relic(id)
            | OtherSource::Command(id)
            | OtherSource::SynchroCommand(id)
            | OtherSource::LegendMateria(id) => id,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            OtherSource::Unresolved => "Unresolved",
            OtherSource::Status(_) => "Status",
            OtherSource::SoulBreak(_) => "SoulBreak",
            OtherSource::LimitBreak(_) => "LimitBreak",
            OtherSource::RecordMateria(_) => "RecordMateria",
            OtherSource::Relic(_) => "Relic",
            OtherSource::Command(_) => "Command",
            OtherSource::SynchroCommand(_) => "SynchroCommand",
            OtherSource::LegendMateria(_) => "LegendMateria",
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, OtherSource::Unresolved)
    }
}

/// A named secondary effect attributed back to the entity that grants it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Other {
    /// Dense id assigned at transform time
    pub id: Id,
    /// Human-readable summary used in logs and lookups
    pub description: String,
    /// Effect name
    pub other_name: String,
    /// Owning character, as written in the worksheet
    pub character_name: String,
    /// Name of the entity that produces the effect
    pub source_name: String,
    /// Resolved producer of the effect
    pub source: OtherSource,
    /// Shared combat profile, flattened into the record
    #[serde(flatten)]
    pub action: ActionProfile,
    /// Soul break gauge points gained on use
    pub soul_break_points_gained: i64,
    /// Id from the School list
    pub school: Id,
    /// Worksheet row id
    pub enlir_id: String,
}
impl_record!(Other, other_name);
