//! Small transform containers shared by unit tests

use crate::model::*;

fn text(s: &str) -> String {
    s.to_string()
}

/// Cloud (VII) with two relics, one soul break, one limit break and their
/// supporting records, plus a magicite and an event; every link unresolved
pub(crate) fn sample_graph() -> TransformResultsContainer {
    TransformResultsContainer {
        characters: vec![Character {
            id: 1,
            description: text("Cloud"),
            character_name: text("Cloud"),
            realm: 7,
            stats_by_level: vec![StatsByLevelInfo {
                stat_set: 1,
                introducing_event_name: text("Fat Chocobo"),
                stats: StatBlock {
                    hp: 3000,
                    atk: 120,
                    ..Default::default()
                },
                ..Default::default()
            }],
            ..Default::default()
        }],
        relics: vec![
            Relic {
                id: 1,
                description: text("Buster Sword (Cloud)"),
                relic_name: text("Buster Sword"),
                realm: 7,
                character_name: text("Cloud"),
                soul_break_name: text("Braver"),
                legend_materia_name: text("Sword Saint"),
                ..Default::default()
            },
            Relic {
                id: 2,
                description: text("Ultima Weapon (Cloud)"),
                relic_name: text("Ultima Weapon"),
                realm: 7,
                character_name: text("Cloud"),
                soul_break_name: text("Omnislash Version 5"),
                ..Default::default()
            },
        ],
        soul_breaks: vec![SoulBreak {
            id: 1,
            description: text("Braver"),
            soul_break_name: text("Braver"),
            character_name: text("Cloud"),
            relic_name: text("Buster Sword (VII)"),
            realm: 7,
            action: ActionProfile {
                multiplier: 5.5,
                effects: text("Five single attacks, grants [Haste] and [ATK +30%] to the user"),
                ..Default::default()
            },
            ..Default::default()
        }],
        limit_breaks: vec![LimitBreak {
            id: 1,
            description: text("Omnislash Version 5"),
            limit_break_name: text("Omnislash Version 5"),
            character_name: text("Cloud"),
            relic_name: text("Ultima Weapon (VII)"),
            realm: 7,
            action: ActionProfile {
                effects: text("Fifteen single attacks, grants [Haste] to the user"),
                ..Default::default()
            },
            ..Default::default()
        }],
        commands: vec![Command {
            id: 1,
            description: text("Braver - Cross Slash"),
            command_name: text("Cross Slash"),
            character_name: text("Cloud"),
            source_soul_break_name: text("Braver"),
            ..Default::default()
        }],
        legend_materias: vec![LegendMateria {
            id: 1,
            description: text("Sword Saint"),
            legend_materia_name: text("Sword Saint"),
            character_name: text("Cloud"),
            relic_name: text("Buster Sword (VII)"),
            realm: 7,
            ..Default::default()
        }],
        record_materias: vec![RecordMateria {
            id: 1,
            description: text("Cloud's Determination"),
            record_materia_name: text("Cloud's Determination"),
            character_name: text("Cloud"),
            realm: 7,
            ..Default::default()
        }],
        record_spheres: vec![RecordSphere {
            id: 1,
            description: text("Cloud Record Sphere 1"),
            character_name: text("Cloud"),
            realm: 7,
            sphere_level: 1,
            ..Default::default()
        }],
        legend_spheres: vec![
            LegendSphere {
                id: 1,
                description: text("Cloud Legend Sphere 1"),
                character_name: text("Cloud"),
                realm: 7,
                sphere_level: 1,
                ..Default::default()
            },
            LegendSphere {
                id: 2,
                description: text("Cloud Legend Sphere 2"),
                character_name: text("Cloud"),
                realm: 7,
                sphere_level: 2,
                ..Default::default()
            },
        ],
        statuses: vec![
            Status {
                id: 1,
                description: text("Haste"),
                common_name: text("Haste"),
                effects: text("Cast speed x2.00"),
                ..Default::default()
            },
            Status {
                id: 2,
                description: text("ATK +X%"),
                common_name: text("ATK +X%"),
                effects: text("ATK +X%"),
                ..Default::default()
            },
        ],
        others: vec![Other {
            id: 1,
            description: text("Haste - Quick Slash"),
            other_name: text("Quick Slash"),
            character_name: text("Cloud"),
            source_name: text("Haste"),
            ..Default::default()
        }],
        magicites: vec![Magicite {
            id: 1,
            description: text("Ramuh"),
            magicite_name: text("Ramuh"),
            realm: 9,
            rarity: 3,
            introducing_event_name: text("Fat Chocobo"),
            ..Default::default()
        }],
        magicite_skills: vec![MagiciteSkill {
            id: 1,
            description: text("Ramuh (IX) - Judgment Bolt"),
            magicite_skill_name: text("Judgment Bolt"),
            magicite_name: text("Ramuh (IX)"),
            ..Default::default()
        }],
        events: vec![Event {
            id: 1,
            description: text("Fat Chocobo"),
            event_name: text("Fat Chocobo"),
            realm: 9,
            event_type: 1,
            ..Default::default()
        }],
        missions: vec![Mission {
            id: 1,
            description: text("Defeat Ramuh"),
            mission_type: text("Event"),
            associated_event: text("Fat Chocobo"),
            ..Default::default()
        }],
        abilities: vec![Ability {
            id: 1,
            description: text("Full Break"),
            ability_name: text("Full Break"),
            school: 4,
            rarity: 3,
            ..Default::default()
        }],
        experiences: vec![Experience {
            id: 1,
            description: text("Level 1"),
            level: 1,
            ..Default::default()
        }],
        ..Default::default()
    }
}
