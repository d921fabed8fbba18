//! Id wire-up passes: fill in `*_id` link fields from name joins

use super::join::{non_blank, JoinIndex};
use super::{MergeContext, PassStats};
use crate::error::{Error, Result};
use crate::model::Id;
use crate::type_list::realm_qualified_name;

pub(crate) const CHECK_RELIC_NAMES: &str = "check relic names";
pub(crate) const LEGEND_MATERIA_IDS: &str = "legend materia ids";
pub(crate) const CHARACTER_IDS: &str = "character ids";
pub(crate) const SOUL_BREAK_IDS: &str = "soul break ids";
pub(crate) const RELIC_IDS: &str = "relic ids";
pub(crate) const MAGICITE_IDS: &str = "magicite ids";
pub(crate) const EVENT_IDS: &str = "event ids";

/// A relic name that already ends in "(...)" would make realm-qualified
/// joins against it unreliable
fn has_parenthesised_suffix(name: &str) -> bool {
    let name = name.trim_end();
    name.ends_with(')') && name.contains(" (")
}

pub(crate) fn check_relic_names(ctx: &mut MergeContext) -> Result<PassStats> {
    let mut stats = PassStats::new(CHECK_RELIC_NAMES);

    for relic in &ctx.graph.relics {
        stats.touched += 1;
        if !has_parenthesised_suffix(&relic.relic_name) {
            continue;
        }
        if ctx.options.strict_joins {
            return Err(Error::QualifiedRelicName {
                relic: relic.description.clone(),
            });
        }
        tracing::warn!(relic = %relic.description, "relic name already carries a parenthesised suffix");
        stats.unresolved += 1;
        ctx.diagnostics.suspicious_relic_names.push(relic.description.clone());
    }

    Ok(stats)
}

/// Relic.legend_materia_id by legend materia name and realm
pub(crate) fn wire_legend_materia_ids(ctx: &mut MergeContext) -> Result<PassStats> {
    let mut stats = PassStats::new(LEGEND_MATERIA_IDS);
    let strict = ctx.strict();
    let graph = &mut ctx.graph;

    let index = JoinIndex::build(&graph.legend_materias, |lm| {
        Some((lm.legend_materia_name.clone(), lm.realm))
    });
    index.resolve_into(
        &mut graph.relics,
        LEGEND_MATERIA_IDS,
        strict,
        &mut stats,
        |relic| Ok(non_blank(&relic.legend_materia_name).map(|name| (name, relic.realm))),
        |relic, id| relic.legend_materia_id = id,
    )?;

    Ok(stats)
}

/// character_id on every entity that names a character
pub(crate) fn wire_character_ids(ctx: &mut MergeContext) -> Result<PassStats> {
    let mut stats = PassStats::new(CHARACTER_IDS);
    let strict = ctx.strict();
    let graph = &mut ctx.graph;

    let index = JoinIndex::build(&graph.characters, |c| Some(c.character_name.clone()));
    let by_name = |name: &str| Ok(non_blank(name));

    macro_rules! wire {
        ($items:expr) => {
            index.resolve_into(
                &mut $items,
                CHARACTER_IDS,
                strict,
                &mut stats,
                |item| by_name(&item.character_name),
                |item, id| item.character_id = id,
            )?
        };
    }

    wire!(graph.record_spheres);
    wire!(graph.legend_spheres);
    wire!(graph.record_materias);
    wire!(graph.legend_materias);
    wire!(graph.relics);
    wire!(graph.commands);
    wire!(graph.synchro_commands);
    wire!(graph.brave_actions);
    wire!(graph.soul_breaks);
    wire!(graph.limit_breaks);

    Ok(stats)
}

/// source_soul_break_id on commands, brave actions and synchro commands, and
/// soul_break_id / limit_break_id on relics
pub(crate) fn wire_soul_break_ids(ctx: &mut MergeContext) -> Result<PassStats> {
    let mut stats = PassStats::new(SOUL_BREAK_IDS);
    let strict = ctx.strict();
    let graph = &mut ctx.graph;

    // (soul break name, trimmed character name)
    let by_character = JoinIndex::build(&graph.soul_breaks, |sb| {
        Some((sb.soul_break_name.clone(), sb.character_name.trim().to_string()))
    });
    let source_key = |source: &str, character: &str| {
        Ok(non_blank(source).map(|source| (source, character.trim().to_string())))
    };

    by_character.resolve_into(
        &mut graph.commands,
        SOUL_BREAK_IDS,
        strict,
        &mut stats,
        |c| source_key(&c.source_soul_break_name, &c.character_name),
        |c, id| c.source_soul_break_id = id,
    )?;
    by_character.resolve_into(
        &mut graph.synchro_commands,
        SOUL_BREAK_IDS,
        strict,
        &mut stats,
        |c| source_key(&c.source_soul_break_name, &c.character_name),
        |c, id| c.source_soul_break_id = id,
    )?;
    by_character.resolve_into(
        &mut graph.brave_actions,
        SOUL_BREAK_IDS,
        strict,
        &mut stats,
        |b| source_key(&b.source_soul_break_name, &b.character_name),
        |b, id| b.source_soul_break_id = id,
    )?;

    // (trimmed name, trimmed character, realm-qualified relic name, realm)
    type RelicKey = (String, String, String, Id);
    let soul_breaks: JoinIndex<RelicKey> = JoinIndex::build(&graph.soul_breaks, |sb| {
        Some((
            sb.soul_break_name.trim().to_string(),
            sb.character_name.trim().to_string(),
            sb.relic_name.clone(),
            sb.realm,
        ))
    });
    let limit_breaks: JoinIndex<RelicKey> = JoinIndex::build(&graph.limit_breaks, |lb| {
        Some((
            lb.limit_break_name.trim().to_string(),
            lb.character_name.trim().to_string(),
            lb.relic_name.clone(),
            lb.realm,
        ))
    });

    let mut relic_stats = PassStats::new(SOUL_BREAK_IDS);
    for relic in graph.relics.iter_mut() {
        if relic.soul_break_name.trim().is_empty() {
            continue;
        }
        let key = (
            relic.soul_break_name.trim().to_string(),
            relic.character_name.trim().to_string(),
            realm_qualified_name(&relic.relic_name, relic.realm)?,
            relic.realm,
        );

        // the relic's "Soul Break" column names either a soul break or a limit break
        let soul_break = soul_breaks.lookup(&key, strict, SOUL_BREAK_IDS, &relic.description)?;
        let limit_break = limit_breaks.lookup(&key, strict, SOUL_BREAK_IDS, &relic.description)?;
        relic.soul_break_id = soul_break.unwrap_or(0);
        relic.limit_break_id = limit_break.unwrap_or(0);

        if soul_break.is_some() || limit_break.is_some() {
            relic_stats.touched += 1;
            tracing::debug!(
                relic = %relic.description,
                soul_break_id = relic.soul_break_id,
                limit_break_id = relic.limit_break_id,
                "wired up relic soul break"
            );
        } else {
            relic_stats.unresolved += 1;
            tracing::warn!(
                relic = %relic.description,
                soul_break = %relic.soul_break_name,
                "failed to wire up soul break or limit break to relic"
            );
        }
    }

    stats.touched += relic_stats.touched;
    stats.unresolved += relic_stats.unresolved;
    Ok(stats)
}

/// relic_id on legend materia, soul breaks and limit breaks; the inverse of
/// the relic-side joins, keyed by realm-qualified relic name
pub(crate) fn wire_relic_ids(ctx: &mut MergeContext) -> Result<PassStats> {
    let mut stats = PassStats::new(RELIC_IDS);
    let strict = ctx.strict();
    let graph = &mut ctx.graph;

    // (qualified relic name, realm, character, legend materia name)
    let by_legend_materia = JoinIndex::try_build(&graph.relics, |r| {
        Ok(Some((
            realm_qualified_name(&r.relic_name, r.realm)?,
            r.realm,
            r.character_name.clone(),
            r.legend_materia_name.clone(),
        )))
    })?;
    // (qualified relic name, realm, character, soul break or limit break name)
    let by_soul_break = JoinIndex::try_build(&graph.relics, |r| {
        Ok(Some((
            realm_qualified_name(&r.relic_name, r.realm)?,
            r.realm,
            r.character_name.clone(),
            r.soul_break_name.clone(),
        )))
    })?;

    by_legend_materia.resolve_into(
        &mut graph.legend_materias,
        RELIC_IDS,
        strict,
        &mut stats,
        |lm| {
            Ok(non_blank(&lm.relic_name).map(|relic| {
                (relic, lm.realm, lm.character_name.clone(), lm.legend_materia_name.clone())
            }))
        },
        |lm, id| lm.relic_id = id,
    )?;
    by_soul_break.resolve_into(
        &mut graph.soul_breaks,
        RELIC_IDS,
        strict,
        &mut stats,
        |sb| {
            Ok(non_blank(&sb.relic_name).map(|relic| {
                (relic, sb.realm, sb.character_name.clone(), sb.soul_break_name.clone())
            }))
        },
        |sb, id| sb.relic_id = id,
    )?;
    by_soul_break.resolve_into(
        &mut graph.limit_breaks,
        RELIC_IDS,
        strict,
        &mut stats,
        |lb| {
            Ok(non_blank(&lb.relic_name).map(|relic| {
                (relic, lb.realm, lb.character_name.clone(), lb.limit_break_name.clone())
            }))
        },
        |lb, id| lb.relic_id = id,
    )?;

    Ok(stats)
}

/// MagiciteSkill.magicite_id via the realm-qualified magicite name
pub(crate) fn wire_magicite_ids(ctx: &mut MergeContext) -> Result<PassStats> {
    let mut stats = PassStats::new(MAGICITE_IDS);
    let strict = ctx.strict();
    let graph = &mut ctx.graph;

    let index = JoinIndex::try_build(&graph.magicites, |m| {
        realm_qualified_name(&m.magicite_name, m.realm).map(Some)
    })?;
    index.resolve_into(
        &mut graph.magicite_skills,
        MAGICITE_IDS,
        strict,
        &mut stats,
        |skill| Ok(non_blank(&skill.magicite_name)),
        |skill, id| skill.magicite_id = id,
    )?;

    Ok(stats)
}

/// Introducing / associated event ids by event name
pub(crate) fn wire_event_ids(ctx: &mut MergeContext) -> Result<PassStats> {
    let mut stats = PassStats::new(EVENT_IDS);
    let strict = ctx.strict();
    let graph = &mut ctx.graph;

    let index = JoinIndex::build(&graph.events, |e| Some(e.event_name.clone()));

    index.resolve_into(
        &mut graph.magicites,
        EVENT_IDS,
        strict,
        &mut stats,
        |m| Ok(non_blank(&m.introducing_event_name)),
        |m, id| m.introducing_event_id = id,
    )?;
    index.resolve_into(
        &mut graph.abilities,
        EVENT_IDS,
        strict,
        &mut stats,
        |a| Ok(non_blank(&a.introducing_event_name)),
        |a, id| a.introducing_event_id = id,
    )?;
    index.resolve_into(
        &mut graph.missions,
        EVENT_IDS,
        strict,
        &mut stats,
        |m| Ok(non_blank(&m.associated_event)),
        |m, id| m.associated_event_id = id,
    )?;

    for character in graph.characters.iter_mut() {
        for info in character.stats_by_level.iter_mut() {
            let Some(name) = non_blank(&info.introducing_event_name) else {
                continue;
            };
            match index.lookup(&name, strict, EVENT_IDS, &character.description)? {
                Some(id) => {
                    info.introducing_event_id = id;
                    stats.touched += 1;
                }
                None => {
                    stats.unresolved += 1;
                    tracing::warn!(
                        character = %character.description,
                        event = %name,
                        "failed to wire up introducing event to character stats"
                    );
                }
            }
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MergeOptions;
    use crate::fixtures;

    fn run(pass: crate::merge::PassFn, options: MergeOptions) -> (MergeContext, Result<PassStats>) {
        let mut ctx = MergeContext::new(fixtures::sample_graph(), options);
        let result = pass(&mut ctx);
        (ctx, result)
    }

    #[test]
    fn test_has_parenthesised_suffix() {
        assert!(has_parenthesised_suffix("Buster Sword (VII)"));
        assert!(has_parenthesised_suffix("Buster Sword (VII) "));
        assert!(!has_parenthesised_suffix("Buster Sword"));
        assert!(!has_parenthesised_suffix("Sword(s)"));
    }

    #[test]
    fn test_check_relic_names_warns_or_aborts() {
        let mut graph = fixtures::sample_graph();
        graph.relics[0].relic_name = "Buster Sword (VII)".to_string();

        let mut ctx = MergeContext::new(graph.clone(), MergeOptions::default());
        let stats = check_relic_names(&mut ctx).unwrap();
        assert_eq!(stats.unresolved, 1);
        assert_eq!(ctx.diagnostics.suspicious_relic_names.len(), 1);

        let strict = MergeOptions {
            strict_joins: true,
            ..Default::default()
        };
        let mut ctx = MergeContext::new(graph, strict);
        assert!(matches!(check_relic_names(&mut ctx), Err(Error::QualifiedRelicName { .. })));
    }

    #[test]
    fn test_character_ids_skip_blank_names() {
        let mut graph = fixtures::sample_graph();
        graph.limit_breaks[0].character_name = String::new();
        let mut ctx = MergeContext::new(graph, MergeOptions::default());

        wire_character_ids(&mut ctx).unwrap();

        assert_eq!(ctx.graph.relics[0].character_id, 1);
        assert_eq!(ctx.graph.soul_breaks[0].character_id, 1);
        assert_eq!(ctx.graph.limit_breaks[0].character_id, 0);
    }

    #[test]
    fn test_relic_soul_break_requires_exact_key() {
        let (ctx, result) = run(wire_soul_break_ids, MergeOptions::default());
        result.unwrap();

        // sample relic 1 grants soul break 1; relic 2 grants limit break 1
        assert_eq!(ctx.graph.relics[0].soul_break_id, 1);
        assert_eq!(ctx.graph.relics[0].limit_break_id, 0);
        assert_eq!(ctx.graph.relics[1].soul_break_id, 0);
        assert_eq!(ctx.graph.relics[1].limit_break_id, 1);
        assert_eq!(ctx.graph.commands[0].source_soul_break_id, 1);

        let mut graph = fixtures::sample_graph();
        graph.soul_breaks[0].relic_name = "Buster Sword (VIII)".to_string();
        let mut ctx = MergeContext::new(graph, MergeOptions::default());
        let stats = wire_soul_break_ids(&mut ctx).unwrap();
        assert_eq!(ctx.graph.relics[0].soul_break_id, 0);
        assert_eq!(stats.unresolved, 1);
    }

    #[test]
    fn test_relic_ids_are_inverse_of_relic_joins() {
        let (ctx, result) = run(wire_relic_ids, MergeOptions::default());
        result.unwrap();

        assert_eq!(ctx.graph.soul_breaks[0].relic_id, 1);
        assert_eq!(ctx.graph.limit_breaks[0].relic_id, 2);
        assert_eq!(ctx.graph.legend_materias[0].relic_id, 1);
    }

    #[test]
    fn test_magicite_and_event_ids() {
        let (ctx, result) = run(wire_magicite_ids, MergeOptions::default());
        result.unwrap();
        assert_eq!(ctx.graph.magicite_skills[0].magicite_id, 1);

        let (ctx, result) = run(wire_event_ids, MergeOptions::default());
        let stats = result.unwrap();
        assert_eq!(ctx.graph.magicites[0].introducing_event_id, 1);
        assert_eq!(ctx.graph.missions[0].associated_event_id, 1);
        assert_eq!(ctx.graph.characters[0].stats_by_level[0].introducing_event_id, 1);
        assert_eq!(stats.unresolved, 0);
    }
}
