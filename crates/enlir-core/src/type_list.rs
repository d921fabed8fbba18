//! Static enumerated lookup tables used to turn worksheet text into ids
//!
//! Every list reserves id 0 for "Unknown"; a name that is not in the list
//! converts to 0. The tables are plain `static` data and are never mutated.

use crate::error::{Error, Result};
use crate::model::Id;
use serde::{Deserialize, Serialize};

/// A fixed id <-> name enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeList {
    pub name: &'static str,
    pub entries: &'static [(Id, &'static str)],
}

/// An `(id, label)` pair as handed to API consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdLabel {
    pub id: Id,
    pub label: String,
}

impl IdLabel {
    pub fn new(id: Id, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

impl TypeList {
    /// Display name for an id
    pub fn name_of(&self, id: Id) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, name)| *name)
    }

    /// Display name for an id, treating an undefined id as malformed input
    pub fn require_name_of(&self, id: Id) -> Result<&'static str> {
        self.name_of(id).ok_or(Error::UnknownTypeListId {
            list: self.name,
            id,
        })
    }

    /// Id for a name; exact match first, then ASCII case-insensitive, else 0
    pub fn id_of(&self, name: &str) -> Id {
        let name = name.trim();
        if name.is_empty() {
            return 0;
        }

        self.entries
            .iter()
            .find(|(_, entry)| *entry == name)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|(_, entry)| entry.eq_ignore_ascii_case(name))
            })
            .map(|(id, _)| *id)
            .unwrap_or(0)
    }

    /// Ids for a comma-separated list of names; unknown names are dropped
    pub fn ids_of_list(&self, names: &str) -> Vec<Id> {
        names
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty() && *n != "-")
            .filter_map(|n| match self.id_of(n) {
                0 => {
                    tracing::debug!(list = self.name, name = n, "unknown type list entry");
                    None
                }
                id => Some(id),
            })
            .collect()
    }

    /// The table as serializable pairs
    pub fn to_id_labels(&self) -> Vec<IdLabel> {
        self.entries
            .iter()
            .map(|(id, name)| IdLabel::new(*id, *name))
            .collect()
    }
}

pub static REALMS: TypeList = TypeList {
    name: "Realm",
    entries: &[
        (0, "Unknown"),
        (1, "I"),
        (2, "II"),
        (3, "III"),
        (4, "IV"),
        (5, "V"),
        (6, "VI"),
        (7, "VII"),
        (8, "VIII"),
        (9, "IX"),
        (10, "X"),
        (11, "XI"),
        (12, "XII"),
        (13, "XIII"),
        (14, "XIV"),
        (15, "XV"),
        (16, "Beyond"),
        (17, "Core"),
        (18, "FFT"),
        (19, "Type-0"),
        (20, "KH"),
    ],
};

pub static ELEMENTS: TypeList = TypeList {
    name: "Element",
    entries: &[
        (0, "Unknown"),
        (1, "Dark"),
        (2, "Earth"),
        (3, "Fire"),
        (4, "Holy"),
        (5, "Ice"),
        (6, "Lightning"),
        (7, "Poison"),
        (8, "Water"),
        (9, "Wind"),
        (10, "NE"),
    ],
};

pub static ABILITY_TYPES: TypeList = TypeList {
    name: "AbilityType",
    entries: &[
        (0, "Unknown"),
        (1, "BLK"),
        (2, "WHT"),
        (3, "PHY"),
        (4, "SUM"),
        (5, "NIN"),
        (6, "NAT"),
        (7, "BLU"),
        (8, "?"),
    ],
};

pub static TARGET_TYPES: TypeList = TypeList {
    name: "TargetType",
    entries: &[
        (0, "Unknown"),
        (1, "Self"),
        (2, "Single Ally"),
        (3, "All Allies"),
        (4, "Single Enemy"),
        (5, "All Enemies"),
        (6, "Random Enemies"),
        (7, "Single Target"),
        (8, "Random Ally"),
        (9, "Lowest HP% ally"),
        (10, "Sudden Death"),
        (11, "Single"),
        (12, "Group"),
    ],
};

pub static AUTO_TARGET_TYPES: TypeList = TypeList {
    name: "AutoTargetType",
    entries: &[
        (0, "Unknown"),
        (1, "Random enemy"),
        (2, "All enemies"),
        (3, "Self"),
        (4, "All allies"),
        (5, "Lowest HP% ally"),
        (6, "Single ally"),
        (7, "Random ally"),
        (8, "Ally without status"),
        (9, "Enemy without status"),
    ],
};

pub static DAMAGE_FORMULA_TYPES: TypeList = TypeList {
    name: "DamageFormulaType",
    entries: &[
        (0, "Unknown"),
        (1, "Physical"),
        (2, "Magical"),
        (3, "Hybrid"),
        (4, "Fixed"),
        (5, "Percentage"),
        (6, "Healing"),
        (7, "?"),
    ],
};

pub static SCHOOLS: TypeList = TypeList {
    name: "School",
    entries: &[
        (0, "Unknown"),
        (1, "Bard"),
        (2, "Black Magic"),
        (3, "Celerity"),
        (4, "Combat"),
        (5, "Dancer"),
        (6, "Darkness"),
        (7, "Dragoon"),
        (8, "Heavy"),
        (9, "Knight"),
        (10, "Machinist"),
        (11, "Monk"),
        (12, "Ninja"),
        (13, "Samurai"),
        (14, "Sharpshooter"),
        (15, "Special"),
        (16, "Spellblade"),
        (17, "Summoning"),
        (18, "Support"),
        (19, "Thief"),
        (20, "White Magic"),
        (21, "Witch"),
    ],
};

pub static SOUL_BREAK_TIERS: TypeList = TypeList {
    name: "SoulBreakTier",
    entries: &[
        (0, "Unknown"),
        (1, "Default"),
        (2, "SB"),
        (3, "SSB"),
        (4, "BSB"),
        (5, "Glint"),
        (6, "Glint+"),
        (7, "USB"),
        (8, "OSB"),
        (9, "AOSB"),
        (10, "CSB"),
        (11, "AASB"),
        (12, "SASB"),
        (13, "FSB"),
        (14, "ADSB"),
        (15, "Shared"),
    ],
};

pub static LIMIT_BREAK_TIERS: TypeList = TypeList {
    name: "LimitBreakTier",
    entries: &[(0, "Unknown"), (3, "GLB"), (4, "OLB")],
};

pub static RELIC_TYPES: TypeList = TypeList {
    name: "RelicType",
    entries: &[
        (0, "Unknown"),
        (1, "Dagger"),
        (2, "Sword"),
        (3, "Katana"),
        (4, "Axe"),
        (5, "Hammer"),
        (6, "Spear"),
        (7, "Fist"),
        (8, "Rod"),
        (9, "Staff"),
        (10, "Bow"),
        (11, "Instrument"),
        (12, "Whip"),
        (13, "Thrown"),
        (14, "Gun"),
        (15, "Book"),
        (16, "Blitzball"),
        (17, "Hairpin"),
        (18, "Gun-Arm"),
        (19, "Doll"),
        (20, "Keyblade"),
        (21, "Fan"),
        (22, "Shield"),
        (23, "Hat"),
        (24, "Helm"),
        (25, "Light Armor"),
        (26, "Heavy Armor"),
        (27, "Robe"),
        (28, "Bracer"),
        (29, "Accessory"),
    ],
};

pub static EQUIPMENT_TYPES: TypeList = TypeList {
    name: "EquipmentType",
    entries: &[(0, "Unknown"), (1, "Weapon"), (2, "Armor"), (3, "Accessory")],
};

pub static EVENT_TYPES: TypeList = TypeList {
    name: "EventType",
    entries: &[
        (0, "Unknown"),
        (1, "Challenge"),
        (2, "Festival"),
        (3, "Survival"),
        (4, "Collection"),
        (5, "Dungeon Update"),
        (6, "Magicite"),
        (7, "Nightmare"),
        (8, "Record Dungeon"),
        (9, "Crystal Tower"),
        (10, "Dreambreaker"),
        (11, "Labyrinth"),
        (12, "Mote"),
    ],
};

pub static MISSION_TYPES: TypeList = TypeList {
    name: "MissionType",
    entries: &[
        (0, "Unknown"),
        (1, "Event"),
        (2, "Beginner"),
        (3, "Daily"),
        (4, "Weekly"),
        (5, "Special"),
        (6, "Record Dungeon"),
    ],
};

pub static ORB_TYPES: TypeList = TypeList {
    name: "OrbType",
    entries: &[
        (0, "Unknown"),
        (1, "Power"),
        (2, "White"),
        (3, "Black"),
        (4, "Blue"),
        (5, "Summon"),
        (6, "Non-Elemental"),
        (7, "Fire"),
        (8, "Ice"),
        (9, "Lightning"),
        (10, "Earth"),
        (11, "Wind"),
        (12, "Holy"),
        (13, "Dark"),
        (14, "Water"),
    ],
};

pub static STAT_SET_TYPES: TypeList = TypeList {
    name: "StatSetType",
    entries: &[
        (0, "Unknown"),
        (1, "Level 50"),
        (2, "Level 65"),
        (3, "Level 80"),
        (4, "Level 99"),
        (5, "Record Spheres"),
        (6, "Legend Spheres"),
        (7, "Record Board"),
    ],
};

pub static STAT_TYPES: TypeList = TypeList {
    name: "StatType",
    entries: &[
        (0, "Unknown"),
        (1, "HP"),
        (2, "ATK"),
        (3, "DEF"),
        (4, "MAG"),
        (5, "RES"),
        (6, "MND"),
        (7, "ACC"),
        (8, "EVA"),
        (9, "SPD"),
    ],
};

/// Every static list, in the order they are published to consumers
pub static ALL_TYPE_LISTS: [&TypeList; 16] = [
    &ABILITY_TYPES,
    &AUTO_TARGET_TYPES,
    &DAMAGE_FORMULA_TYPES,
    &ELEMENTS,
    &EQUIPMENT_TYPES,
    &EVENT_TYPES,
    &MISSION_TYPES,
    &ORB_TYPES,
    &REALMS,
    &RELIC_TYPES,
    &SCHOOLS,
    &STAT_SET_TYPES,
    &STAT_TYPES,
    &SOUL_BREAK_TIERS,
    &LIMIT_BREAK_TIERS,
    &TARGET_TYPES,
];

/// Build `"{base} ({realm})"`, the realm-qualified form used by soul break,
/// limit break, legend materia and magicite skill sheets
pub fn realm_qualified_name(base: &str, realm: Id) -> Result<String> {
    let realm_name = REALMS.require_name_of(realm)?;
    Ok(format!("{} ({})", base, realm_name))
}

/// Orb type for an orb name such as "Major Black" or "Crystal Power"
pub fn orb_type_of(orb_name: &str) -> Id {
    const RANKS: &[&str] = &["Minor", "Lesser", "Greater", "Major", "Crystal"];

    let trimmed = orb_name.trim();
    let base = RANKS
        .iter()
        .find_map(|rank| {
            trimmed
                .strip_prefix(rank)
                .filter(|rest| rest.starts_with(' '))
        })
        .unwrap_or(trimmed);

    ORB_TYPES.id_of(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_of() {
        assert_eq!(REALMS.id_of("VII"), 7);
        assert_eq!(REALMS.id_of(" VII "), 7);
        assert_eq!(ELEMENTS.id_of("fire"), 3);
        assert_eq!(ELEMENTS.id_of("Gravity"), 0);
        assert_eq!(ELEMENTS.id_of(""), 0);
    }

    #[test]
    fn test_name_of_sparse_list() {
        assert_eq!(LIMIT_BREAK_TIERS.name_of(3), Some("GLB"));
        assert_eq!(LIMIT_BREAK_TIERS.name_of(1), None);
        assert!(LIMIT_BREAK_TIERS.require_name_of(1).is_err());
    }

    #[test]
    fn test_ids_of_list() {
        assert_eq!(ELEMENTS.ids_of_list("Fire, Ice"), vec![3, 5]);
        assert_eq!(ELEMENTS.ids_of_list("Fire, Gravity, ,Wind"), vec![3, 9]);
        assert!(ELEMENTS.ids_of_list("-").is_empty());
    }

    #[test]
    fn test_realm_qualified_name() {
        assert_eq!(realm_qualified_name("Buster Sword", 7).unwrap(), "Buster Sword (VII)");
        assert!(matches!(
            realm_qualified_name("Buster Sword", 99),
            Err(Error::UnknownTypeListId { list: "Realm", id: 99 })
        ));
    }

    #[test]
    fn test_orb_type_of() {
        assert_eq!(orb_type_of("Major Black"), 3);
        assert_eq!(orb_type_of("Crystal Power"), 1);
        assert_eq!(orb_type_of("Non-Elemental"), 6);
        assert_eq!(orb_type_of("Majorette"), 0);
    }

    #[test]
    fn test_every_list_reserves_zero() {
        for list in ALL_TYPE_LISTS {
            assert_eq!(list.name_of(0), Some("Unknown"), "{}", list.name);
        }
    }
}
