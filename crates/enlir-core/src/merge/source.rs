//! Other.Source resolution: which entity produced each `Other` effect

use super::join::JoinIndex;
use super::{MergeContext, PassStats};
use crate::error::Result;
use crate::model::{Other, OtherSource, TransformResultsContainer};

pub(crate) const OTHER_SOURCES: &str = "other sources";

type Scoped = (String, String);

fn trimmed(name: &str) -> Option<String> {
    Some(name.trim().to_string())
}

/// Candidate source collections, keyed by trimmed name; soul breaks and
/// limit breaks are additionally scoped by trimmed character name
struct SourceIndexes {
    statuses: JoinIndex<String>,
    soul_breaks: JoinIndex<Scoped>,
    limit_breaks: JoinIndex<Scoped>,
    record_materias: JoinIndex<String>,
    relics: JoinIndex<String>,
    commands: JoinIndex<String>,
    synchro_commands: JoinIndex<String>,
    legend_materias: JoinIndex<String>,
}

impl SourceIndexes {
    fn build(graph: &TransformResultsContainer) -> Self {
        let scoped = |name: &str, character: &str| Some((name.trim().to_string(), character.trim().to_string()));
        Self {
            statuses: JoinIndex::build(&graph.statuses, |s| trimmed(&s.common_name)),
            soul_breaks: JoinIndex::build(&graph.soul_breaks, |sb| scoped(&sb.soul_break_name, &sb.character_name)),
            limit_breaks: JoinIndex::build(&graph.limit_breaks, |lb| scoped(&lb.limit_break_name, &lb.character_name)),
            record_materias: JoinIndex::build(&graph.record_materias, |rm| trimmed(&rm.record_materia_name)),
            relics: JoinIndex::build(&graph.relics, |r| trimmed(&r.relic_name)),
            commands: JoinIndex::build(&graph.commands, |c| trimmed(&c.command_name)),
            synchro_commands: JoinIndex::build(&graph.synchro_commands, |c| trimmed(&c.command_name)),
            legend_materias: JoinIndex::build(&graph.legend_materias, |lm| trimmed(&lm.legend_materia_name)),
        }
    }

    /// First collection, in priority order, holding a record named like the source
    fn find(&self, other: &Other, strict: bool, legacy: bool) -> Result<OtherSource> {
        let name = other.source_name.trim().to_string();
        if name.is_empty() {
            return Ok(OtherSource::Unresolved);
        }
        let scoped = (name.clone(), other.character_name.trim().to_string());
        let record = other.description.as_str();
        let by_name = |index: &JoinIndex<String>| index.lookup(&name, strict, OTHER_SOURCES, record);
        let by_character = |index: &JoinIndex<Scoped>| index.lookup(&scoped, strict, OTHER_SOURCES, record);

        if let Some(id) = by_name(&self.statuses)? {
            return Ok(OtherSource::Status(id));
        }
        if let Some(id) = by_character(&self.soul_breaks)? {
            return Ok(OtherSource::SoulBreak(id));
        }
        if !legacy {
            if let Some(id) = by_character(&self.limit_breaks)? {
                return Ok(OtherSource::LimitBreak(id));
            }
        }
        if let Some(id) = by_name(&self.record_materias)? {
            return Ok(OtherSource::RecordMateria(id));
        }
        if let Some(id) = by_name(&self.relics)? {
            return Ok(OtherSource::Relic(id));
        }
        if let Some(id) = by_name(&self.commands)? {
            return Ok(OtherSource::Command(id));
        }
        if !legacy {
            if let Some(id) = by_name(&self.synchro_commands)? {
                return Ok(OtherSource::SynchroCommand(id));
            }
        }
        if let Some(id) = by_name(&self.legend_materias)? {
            return Ok(OtherSource::LegendMateria(id));
        }

        Ok(OtherSource::Unresolved)
    }
}

/// Other.source, first exact name match wins
///
/// With `legacy_other_source_lookup` the LimitBreak and SynchroCommand
/// candidates are never consulted. Name trimming and ambiguity handling are
/// the same in both modes.
pub(crate) fn resolve_other_sources(ctx: &mut MergeContext) -> Result<PassStats> {
    let mut stats = PassStats::new(OTHER_SOURCES);
    let strict = ctx.strict();
    let legacy = ctx.options.legacy_other_source_lookup;
    let indexes = SourceIndexes::build(&ctx.graph);

    for other in ctx.graph.others.iter_mut() {
        let source = indexes.find(other, strict, legacy)?;
        other.source = source;

        if source.is_resolved() {
            stats.touched += 1;
            tracing::debug!(
                other = %other.description,
                source_type = source.type_name(),
                source_id = source.id(),
                "wired up other source"
            );
        } else {
            stats.unresolved += 1;
            tracing::warn!(other = %other.description, source = %other.source_name, "failed to wire up other source");
            ctx.diagnostics.unresolved_other_sources.push(other.description.clone());
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MergeOptions;
    use crate::fixtures;
    use crate::model::SoulBreak;

    fn resolve(graph: TransformResultsContainer, options: MergeOptions) -> MergeContext {
        let mut ctx = MergeContext::new(graph, options);
        resolve_other_sources(&mut ctx).unwrap();
        ctx
    }

    #[test]
    fn test_status_wins_over_soul_break() {
        let mut graph = fixtures::sample_graph();
        graph.soul_breaks.push(SoulBreak {
            id: 2,
            description: "Haste".to_string(),
            soul_break_name: "Haste".to_string(),
            character_name: "Cloud".to_string(),
            ..Default::default()
        });

        let ctx = resolve(graph, MergeOptions::default());

        assert_eq!(ctx.graph.others[0].source, OtherSource::Status(1));
    }

    #[test]
    fn test_soul_break_source_is_character_scoped() {
        let mut graph = fixtures::sample_graph();
        graph.others[0].source_name = " Braver ".to_string();

        let ctx = resolve(graph.clone(), MergeOptions::default());
        assert_eq!(ctx.graph.others[0].source, OtherSource::SoulBreak(1));

        graph.others[0].character_name = "Zack".to_string();
        let ctx = resolve(graph, MergeOptions::default());
        assert_eq!(ctx.graph.others[0].source, OtherSource::Unresolved);
        assert_eq!(ctx.diagnostics.unresolved_other_sources.len(), 1);
    }

    #[test]
    fn test_limit_break_source_skipped_in_legacy_mode() {
        let mut graph = fixtures::sample_graph();
        let limit_break = graph.limit_breaks[0].limit_break_name.clone();
        graph.others[0].source_name = limit_break;

        let ctx = resolve(graph.clone(), MergeOptions::default());
        assert_eq!(ctx.graph.others[0].source, OtherSource::LimitBreak(1));

        let legacy = MergeOptions {
            legacy_other_source_lookup: true,
            ..Default::default()
        };
        let ctx = resolve(graph, legacy);
        assert_eq!(ctx.graph.others[0].source, OtherSource::Unresolved);
    }

    #[test]
    fn test_legacy_mode_still_trims_legend_materia_names() {
        let mut graph = fixtures::sample_graph();
        graph.others[0].source_name = "Sword Saint ".to_string();
        graph.legend_materias[0].legend_materia_name = " Sword Saint".to_string();

        let legacy = MergeOptions {
            legacy_other_source_lookup: true,
            ..Default::default()
        };
        let ctx = resolve(graph, legacy);

        assert_eq!(ctx.graph.others[0].source, OtherSource::LegendMateria(1));
    }

    #[test]
    fn test_blank_source_is_unresolved() {
        let mut graph = fixtures::sample_graph();
        graph.others[0].source_name = "  ".to_string();

        let ctx = resolve(graph, MergeOptions::default());

        assert!(!ctx.graph.others[0].source.is_resolved());
    }
}
