//! Relics and magicite

use super::{impl_record, ActionProfile, Id, LimitBreak, SoulBreak, StatBlock};
use serde::{Deserialize, Serialize};

/// A piece of equipment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relic {
    /// Dense id assigned at transform time
    pub id: Id,
    /// Human-readable summary used in logs and lookups
    pub description: String,
    /// Bare relic name, without the realm suffix
    pub relic_name: String,
    /// Id from the Realm list
    pub realm: Id,
    /// Owning character, as written in the worksheet
    pub character_name: String,
    /// Link to the owning character
    pub character_id: Id,
    /// Id from the RelicType list
    pub relic_type: Id,
    /// Star rarity
    pub rarity: i64,
    /// Relic level the stats apply to
    pub level: i64,
    /// Stat line
    pub stats: StatBlock,
    /// Effect text
    pub effect: String,
    /// Soul break or limit break granted by the relic
    pub soul_break_name: String,
    /// Link to the granted soul break
    pub soul_break_id: Id,
    /// Granted soul break, once merged
    pub soul_break: Option<Box<SoulBreak>>,
    /// Link to the granted limit break
    pub limit_break_id: Id,
    /// Granted limit break, once merged
    pub limit_break: Option<Box<LimitBreak>>,
    /// Legend materia name
    pub legend_materia_name: String,
    /// Link to the legend materia
    pub legend_materia_id: Id,
    /// Synergy variant of the relic
    pub is_synergy: bool,
    /// Released on the global server
    pub is_in_global: bool,
    /// Worksheet row id
    pub enlir_id: String,
}
impl_record!(Relic);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Magicite {
    /// Dense id assigned at transform time
    pub id: Id,
    /// Human-readable summary used in logs and lookups
    pub description: String,
    /// Magicite name
    pub magicite_name: String,
    /// Id from the Realm list
    pub realm: Id,
    /// Star rarity
    pub rarity: i64,
    /// Id from the Element list
    pub element: Id,
    /// Passive effect texts
    pub passives: Vec<String>,
    /// Event that introduced it
    pub introducing_event_name: String,
    /// Link to the introducing event
    pub introducing_event_id: Id,
    /// Released on the global server
    pub is_in_global: bool,
    /// Worksheet row id
    pub enlir_id: String,
    /// Skills of this magicite
    pub magicite_skills: Vec<MagiciteSkill>,
}
impl_record!(Magicite, magicite_name);

/// A skill used by a summoned magicite
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MagiciteSkill {
    /// Dense id assigned at transform time
    pub id: Id,
    /// Human-readable summary used in logs and lookups
    pub description: String,
    /// Skill name
    pub magicite_skill_name: String,
    /// Realm-qualified magicite name, e.g. "Ramuh (IX)"
    pub magicite_name: String,
    /// Link to the magicite
    pub magicite_id: Id,
    /// Shared combat profile, flattened into the record
    #[serde(flatten)]
    pub action: ActionProfile,
    /// Worksheet row id
    pub enlir_id: String,
}
impl_record!(MagiciteSkill);
