use crate::model::{IdLists, MergeResultsContainer, Record, TransformResultsContainer};
use crate::type_list::{IdLabel, ALL_TYPE_LISTS};

fn id_labels<T: Record>(items: &[T]) -> Vec<IdLabel> {
    items
        .iter()
        .map(|item| IdLabel::new(item.id(), item.label()))
        .collect()
}

/// Move the merged collections into the result container and derive the
/// type-list tables and `(id, label)` lists
pub(crate) fn assemble(graph: TransformResultsContainer) -> MergeResultsContainer {
    let type_lists = ALL_TYPE_LISTS
        .iter()
        .map(|list| (list.name.to_string(), list.to_id_labels()))
        .collect();

    let id_lists = IdLists {
        abilities: id_labels(&graph.abilities),
        characters: id_labels(&graph.characters),
        commands: id_labels(&graph.commands),
        synchro_commands: id_labels(&graph.synchro_commands),
        brave_actions: id_labels(&graph.brave_actions),
        events: id_labels(&graph.events),
        experiences: id_labels(&graph.experiences),
        legend_materias: id_labels(&graph.legend_materias),
        legend_spheres: id_labels(&graph.legend_spheres),
        magicite_skills: id_labels(&graph.magicite_skills),
        magicites: id_labels(&graph.magicites),
        missions: id_labels(&graph.missions),
        others: id_labels(&graph.others),
        record_materias: id_labels(&graph.record_materias),
        record_spheres: id_labels(&graph.record_spheres),
        relics: id_labels(&graph.relics),
        soul_breaks: id_labels(&graph.soul_breaks),
        limit_breaks: id_labels(&graph.limit_breaks),
        statuses: id_labels(&graph.statuses),
    };

    let TransformResultsContainer {
        abilities,
        characters,
        commands,
        synchro_commands,
        brave_actions,
        events,
        experiences,
        legend_materias,
        legend_spheres,
        magicite_skills,
        magicites,
        missions,
        others,
        record_materias,
        record_spheres,
        relics,
        soul_breaks,
        limit_breaks,
        statuses,
    } = graph;

    MergeResultsContainer {
        abilities,
        characters,
        commands,
        synchro_commands,
        brave_actions,
        events,
        experiences,
        legend_materias,
        legend_spheres,
        magicite_skills,
        magicites,
        missions,
        others,
        record_materias,
        record_spheres,
        relics,
        soul_breaks,
        limit_breaks,
        statuses,
        type_lists,
        id_lists,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::model::EntityKind;

    #[test]
    fn test_assemble_builds_lookup_lists() {
        let graph = fixtures::sample_graph();
        let relic_count = graph.relics.len();

        let results = assemble(graph);

        assert_eq!(results.type_lists.len(), ALL_TYPE_LISTS.len());
        assert_eq!(results.type_lists["Element"][3], IdLabel::new(3, "Fire"));
        assert_eq!(results.id_list(EntityKind::Relic).len(), relic_count);
        // relics have no dedicated label field and fall back to the description
        assert_eq!(results.id_lists.relics[0].label, "Buster Sword (Cloud)");
        assert_eq!(results.id_lists.soul_breaks[0].label, "Braver");
    }
}
