//! Object wire-up passes: attach nested copies of linked records
//!
//! Each join reads a link resolved by the id passes. A nested copy is taken
//! only once the attached record is itself complete, which is why soul breaks
//! are attached to relics after their own commands, statuses and other
//! effects, and relics to characters last.

use super::{MergeContext, PassStats};
use crate::error::Result;
use crate::model::{Id, Record};
use std::collections::HashMap;

pub(crate) const MAGICITE_SKILLS: &str = "magicite skills";
pub(crate) const RECORD_SPHERES: &str = "record spheres";
pub(crate) const LEGEND_SPHERES: &str = "legend spheres";
pub(crate) const RECORD_MATERIAS: &str = "record materias";
pub(crate) const LEGEND_MATERIAS: &str = "legend materias";
pub(crate) const COMMANDS: &str = "commands";
pub(crate) const SYNCHRO_COMMANDS: &str = "synchro commands";
pub(crate) const BRAVE_ACTIONS: &str = "brave actions";
pub(crate) const OTHERS: &str = "others";
pub(crate) const SOUL_BREAKS_TO_RELICS: &str = "soul breaks to relics";
pub(crate) const RELICS_TO_CHARACTERS: &str = "relics to characters";
pub(crate) const LEGEND_SPHERE_TIERS: &str = "legend sphere tiers";

/// Give every parent the children whose `link` names it
///
/// Children with an unresolved link (0) are counted as unresolved and
/// warned about.
fn attach_by_id<P: Record, C: Record + Clone>(
    parents: &mut [P],
    children: &[C],
    pass: &'static str,
    link: impl Fn(&C) -> Id,
    mut set: impl FnMut(&mut P, Vec<C>),
) -> PassStats {
    let mut stats = PassStats::new(pass);

    let mut groups: HashMap<Id, Vec<C>> = HashMap::new();
    for child in children {
        match link(child) {
            0 => {
                stats.unresolved += 1;
                tracing::warn!(pass, record = child.description(), "failed to attach record, no parent linked");
            }
            id => groups.entry(id).or_default().push(child.clone()),
        }
    }

    for parent in parents.iter_mut() {
        let attached = groups.remove(&parent.id()).unwrap_or_default();
        if !attached.is_empty() {
            stats.touched += 1;
        }
        tracing::debug!(pass, record = parent.description(), count = attached.len(), "wired up nested records");
        set(parent, attached);
    }

    stats
}

pub(crate) fn wire_magicite_skills(ctx: &mut MergeContext) -> Result<PassStats> {
    let graph = &mut ctx.graph;
    Ok(attach_by_id(
        &mut graph.magicites,
        &graph.magicite_skills,
        MAGICITE_SKILLS,
        |skill| skill.magicite_id,
        |magicite, skills| magicite.magicite_skills = skills,
    ))
}

pub(crate) fn wire_record_spheres(ctx: &mut MergeContext) -> Result<PassStats> {
    let graph = &mut ctx.graph;
    Ok(attach_by_id(
        &mut graph.characters,
        &graph.record_spheres,
        RECORD_SPHERES,
        |sphere| sphere.character_id,
        |character, spheres| character.record_spheres = spheres,
    ))
}

pub(crate) fn wire_legend_spheres(ctx: &mut MergeContext) -> Result<PassStats> {
    let graph = &mut ctx.graph;
    Ok(attach_by_id(
        &mut graph.characters,
        &graph.legend_spheres,
        LEGEND_SPHERES,
        |sphere| sphere.character_id,
        |character, spheres| character.legend_spheres = spheres,
    ))
}

pub(crate) fn wire_record_materias(ctx: &mut MergeContext) -> Result<PassStats> {
    let graph = &mut ctx.graph;
    Ok(attach_by_id(
        &mut graph.characters,
        &graph.record_materias,
        RECORD_MATERIAS,
        |materia| materia.character_id,
        |character, materias| character.record_materias = materias,
    ))
}

pub(crate) fn wire_legend_materias(ctx: &mut MergeContext) -> Result<PassStats> {
    let graph = &mut ctx.graph;
    Ok(attach_by_id(
        &mut graph.characters,
        &graph.legend_materias,
        LEGEND_MATERIAS,
        |materia| materia.character_id,
        |character, materias| character.legend_materias = materias,
    ))
}

pub(crate) fn wire_commands(ctx: &mut MergeContext) -> Result<PassStats> {
    let graph = &mut ctx.graph;
    Ok(attach_by_id(
        &mut graph.soul_breaks,
        &graph.commands,
        COMMANDS,
        |command| command.source_soul_break_id,
        |soul_break, commands| soul_break.commands = commands,
    ))
}

pub(crate) fn wire_synchro_commands(ctx: &mut MergeContext) -> Result<PassStats> {
    let graph = &mut ctx.graph;
    Ok(attach_by_id(
        &mut graph.soul_breaks,
        &graph.synchro_commands,
        SYNCHRO_COMMANDS,
        |command| command.source_soul_break_id,
        |soul_break, commands| soul_break.synchro_commands = commands,
    ))
}

pub(crate) fn wire_brave_actions(ctx: &mut MergeContext) -> Result<PassStats> {
    let graph = &mut ctx.graph;
    Ok(attach_by_id(
        &mut graph.soul_breaks,
        &graph.brave_actions,
        BRAVE_ACTIONS,
        |action| action.source_soul_break_id,
        |soul_break, actions| soul_break.brave_actions = actions,
    ))
}

/// Others whose source name appears in the soul break / limit break effect text
pub(crate) fn wire_others(ctx: &mut MergeContext) -> Result<PassStats> {
    let mut stats = PassStats::new(OTHERS);
    let graph = &mut ctx.graph;
    let others: Vec<_> = graph
        .others
        .iter()
        .filter(|other| !other.source_name.trim().is_empty())
        .collect();

    for soul_break in graph.soul_breaks.iter_mut() {
        soul_break.other_effects = others
            .iter()
            .filter(|other| soul_break.action.effects.contains(other.source_name.as_str()))
            .map(|&other| other.clone())
            .collect();
        if !soul_break.other_effects.is_empty() {
            stats.touched += 1;
            tracing::debug!(
                soul_break = %soul_break.description,
                count = soul_break.other_effects.len(),
                "wired up other effects"
            );
        }
    }
    for limit_break in graph.limit_breaks.iter_mut() {
        limit_break.other_effects = others
            .iter()
            .filter(|other| limit_break.action.effects.contains(other.source_name.as_str()))
            .map(|&other| other.clone())
            .collect();
        if !limit_break.other_effects.is_empty() {
            stats.touched += 1;
            tracing::debug!(
                limit_break = %limit_break.description,
                count = limit_break.other_effects.len(),
                "wired up other effects"
            );
        }
    }

    Ok(stats)
}

/// Relic.soul_break and Relic.limit_break from the ids resolved earlier
pub(crate) fn wire_soul_breaks_to_relics(ctx: &mut MergeContext) -> Result<PassStats> {
    let mut stats = PassStats::new(SOUL_BREAKS_TO_RELICS);
    let graph = &mut ctx.graph;
    let soul_breaks: HashMap<Id, _> = graph.soul_breaks.iter().map(|sb| (sb.id, sb)).collect();
    let limit_breaks: HashMap<Id, _> = graph.limit_breaks.iter().map(|lb| (lb.id, lb)).collect();

    for relic in graph.relics.iter_mut() {
        relic.soul_break = soul_breaks.get(&relic.soul_break_id).map(|&sb| Box::new(sb.clone()));
        relic.limit_break = limit_breaks.get(&relic.limit_break_id).map(|&lb| Box::new(lb.clone()));

        if relic.soul_break.is_some() || relic.limit_break.is_some() {
            stats.touched += 1;
            tracing::debug!(relic = %relic.description, "wired up soul break object");
        } else if !relic.soul_break_name.trim().is_empty() {
            stats.unresolved += 1;
            tracing::warn!(relic = %relic.description, soul_break = %relic.soul_break_name, "failed to wire up soul break object");
        }
    }

    Ok(stats)
}

pub(crate) fn wire_relics_to_characters(ctx: &mut MergeContext) -> Result<PassStats> {
    let graph = &mut ctx.graph;
    Ok(attach_by_id(
        &mut graph.characters,
        &graph.relics,
        RELICS_TO_CHARACTERS,
        |relic| relic.character_id,
        |character, relics| character.relics = relics,
    ))
}

/// LegendSphere.tier: 1-based rank by ascending id within each character
///
/// Written into the character's nested spheres and the top-level collection.
pub(crate) fn calculate_legend_sphere_tiers(ctx: &mut MergeContext) -> Result<PassStats> {
    let mut stats = PassStats::new(LEGEND_SPHERE_TIERS);
    let graph = &mut ctx.graph;
    let mut tiers: HashMap<Id, u32> = HashMap::new();

    for character in graph.characters.iter_mut() {
        if character.legend_spheres.is_empty() {
            continue;
        }
        character.legend_spheres.sort_by_key(|sphere| sphere.id);
        for (tier, sphere) in (1..).zip(character.legend_spheres.iter_mut()) {
            sphere.tier = tier;
            tiers.insert(sphere.id, tier);
        }
        stats.touched += 1;
        tracing::debug!(character = %character.description, "calculated legend sphere tiers");
    }

    for sphere in graph.legend_spheres.iter_mut() {
        match tiers.get(&sphere.id) {
            Some(&tier) => sphere.tier = tier,
            None => stats.unresolved += 1,
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MergeOptions;
    use crate::fixtures;
    use crate::model::LegendSphere;

    fn sphere(id: Id, character_id: Id) -> LegendSphere {
        LegendSphere {
            id,
            description: format!("Cloud Legend Sphere {}", id),
            character_name: "Cloud".to_string(),
            character_id,
            ..Default::default()
        }
    }

    #[test]
    fn test_legend_sphere_tiers_follow_id_order() {
        let mut graph = fixtures::sample_graph();
        graph.legend_spheres = vec![sphere(5, 1), sphere(2, 1), sphere(9, 1), sphere(4, 0)];
        let mut ctx = MergeContext::new(graph, MergeOptions::default());

        wire_legend_spheres(&mut ctx).unwrap();
        let stats = calculate_legend_sphere_tiers(&mut ctx).unwrap();

        let nested: Vec<_> = ctx.graph.characters[0]
            .legend_spheres
            .iter()
            .map(|s| (s.id, s.tier))
            .collect();
        assert_eq!(nested, vec![(2, 1), (5, 2), (9, 3)]);

        let top: Vec<_> = ctx.graph.legend_spheres.iter().map(|s| (s.id, s.tier)).collect();
        assert_eq!(top, vec![(5, 2), (2, 1), (9, 3), (4, 0)]);
        assert_eq!(stats.unresolved, 1);
    }

    #[test]
    fn test_commands_attach_by_resolved_soul_break() {
        let mut graph = fixtures::sample_graph();
        graph.commands[0].source_soul_break_id = 1;
        let mut ctx = MergeContext::new(graph, MergeOptions::default());

        let stats = wire_commands(&mut ctx).unwrap();

        assert_eq!(stats.touched, 1);
        assert_eq!(ctx.graph.soul_breaks[0].commands.len(), 1);
        assert_eq!(ctx.graph.soul_breaks[0].commands[0].command_name, "Cross Slash");
    }

    #[test]
    fn test_unlinked_children_count_as_unresolved() {
        let graph = fixtures::sample_graph();
        assert_eq!(graph.commands[0].source_soul_break_id, 0);
        let mut ctx = MergeContext::new(graph, MergeOptions::default());

        let stats = wire_commands(&mut ctx).unwrap();

        assert_eq!(stats.touched, 0);
        assert_eq!(stats.unresolved, 1);
        assert!(ctx.graph.soul_breaks[0].commands.is_empty());
    }

    #[test]
    fn test_others_attach_by_effect_text() {
        let mut graph = fixtures::sample_graph();
        graph.soul_breaks[0].action.effects = "Grants [Haste] to the user".to_string();
        graph.limit_breaks[0].action.effects = "Fifteen hits".to_string();
        graph.others.push(crate::model::Other {
            id: 2,
            description: "blank source".to_string(),
            ..Default::default()
        });
        let mut ctx = MergeContext::new(graph, MergeOptions::default());

        wire_others(&mut ctx).unwrap();

        assert_eq!(ctx.graph.soul_breaks[0].other_effects.len(), 1);
        assert!(ctx.graph.limit_breaks[0].other_effects.is_empty());
    }
}
