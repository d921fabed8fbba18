//! Characters and the character-owned sphere and materia collections

use super::{impl_record, Id, Relic, StatBlock};
use serde::{Deserialize, Serialize};

/// Stats for one stat set (a level cap, or a sphere/board increment)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsByLevelInfo {
    /// Id from the StatSetType list
    pub stat_set: Id,
    /// Event that introduced it
    pub introducing_event_name: String,
    /// Link to the introducing event
    pub introducing_event_id: Id,
    /// Stat line
    pub stats: StatBlock,
}

/// A playable character
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Dense id assigned at transform time
    pub id: Id,
    /// Human-readable summary used in logs and lookups
    pub description: String,
    /// Owning character, as written in the worksheet
    pub character_name: String,
    /// Id from the Realm list
    pub realm: Id,
    /// Stats per level cap and board increment
    pub stats_by_level: Vec<StatsByLevelInfo>,
    /// RelicType ids the character can equip
    pub equipment_access: Vec<Id>,
    /// School ids the character can use
    pub school_access: Vec<Id>,
    /// Released on the global server
    pub is_in_global: bool,
    /// Worksheet row id
    pub enlir_id: String,
    /// Record spheres owned by the character
    pub record_spheres: Vec<RecordSphere>,
    /// Legend spheres owned by the character
    pub legend_spheres: Vec<LegendSphere>,
    /// Record materias owned by the character
    pub record_materias: Vec<RecordMateria>,
    /// Legend materias owned by the character
    pub legend_materias: Vec<LegendMateria>,
    /// Relics tied to the character
    pub relics: Vec<Relic>,
}
impl_record!(Character, character_name);

/// A record board sphere
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSphere {
    /// Dense id assigned at transform time
    pub id: Id,
    /// Human-readable summary used in logs and lookups
    pub description: String,
    /// Owning character, as written in the worksheet
    pub character_name: String,
    /// Link to the owning character
    pub character_id: Id,
    /// Id from the Realm list
    pub realm: Id,
    /// Sphere level, 1-based
    pub sphere_level: i64,
    /// Benefit text
    pub benefit: String,
    /// Released on the global server
    pub is_in_global: bool,
    /// Worksheet row id
    pub enlir_id: String,
}
impl_record!(RecordSphere);

/// A legend board sphere
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegendSphere {
    /// Dense id assigned at transform time
    pub id: Id,
    /// Human-readable summary used in logs and lookups
    pub description: String,
    /// Owning character, as written in the worksheet
    pub character_name: String,
    /// Link to the owning character
    pub character_id: Id,
    /// Id from the Realm list
    pub realm: Id,
    /// Sphere level, 1-based
    pub sphere_level: i64,
    /// Benefit text
    pub benefit: String,
    /// 1-based rank within the character's spheres ordered by id; 0 until merged
    pub tier: u32,
    /// Released on the global server
    pub is_in_global: bool,
    /// Worksheet row id
    pub enlir_id: String,
}
impl_record!(LegendSphere);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMateria {
    /// Dense id assigned at transform time
    pub id: Id,
    /// Human-readable summary used in logs and lookups
    pub description: String,
    /// Record materia name
    pub record_materia_name: String,
    /// Owning character, as written in the worksheet
    pub character_name: String,
    /// Link to the owning character
    pub character_id: Id,
    /// Id from the Realm list
    pub realm: Id,
    /// Effect text
    pub effect: String,
    /// How the materia is unlocked
    pub unlock_criteria: String,
    /// Released on the global server
    pub is_in_global: bool,
    /// Worksheet row id
    pub enlir_id: String,
}
impl_record!(RecordMateria);

/// A legend materia, usually tied to a relic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegendMateria {
    /// Dense id assigned at transform time
    pub id: Id,
    /// Human-readable summary used in logs and lookups
    pub description: String,
    /// Legend materia name
    pub legend_materia_name: String,
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
    /// Effect text
    pub effect: String,
    /// Bonus for mastering it in battle
    pub mastery_bonus: String,
    /// Released on the global server
    pub is_in_global: bool,
    /// Worksheet row id
    pub enlir_id: String,
}
impl_record!(LegendMateria);
