//! Merge engine: cross-links independently transformed entity collections
//!
//! The worksheets carry no foreign keys, only human-readable names, so the
//! merge resolves links by name joins in an ordered sequence of passes. Id
//! passes run first and fill in the `*_id` link fields; object passes then
//! attach nested copies by joining on those ids; finally derived values are
//! computed and the result container is assembled.
//!
//! A failed join for a single record is not an error: the link stays at 0
//! and the pass counts it as unresolved. Any `Err` from a pass aborts the
//! whole run.

mod assemble;
mod ids;
mod join;
mod objects;
mod source;
mod status;

pub use status::{
    percentage_matches, scaling_runs, signed_percentage_matches, status_tokens, StatusResolution,
    StatusResolver,
};

use crate::config::MergeOptions;
use crate::error::{Error, Result};
use crate::model::{MergeResultsContainer, TransformResultsContainer};
use crate::storage::TransformStorage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-pass record counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassStats {
    /// Pass name, as listed in `PASSES`
    pub pass: String,
    /// Records whose link was filled in
    pub touched: usize,
    /// Records whose join found nothing
    pub unresolved: usize,
}

impl PassStats {
    /// Zeroed counts for the named pass
    pub fn new(pass: &str) -> Self {
        Self {
            pass: pass.to_string(),
            touched: 0,
            unresolved: 0,
        }
    }
}

/// Everything a run learned about the quality of its input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeDiagnostics {
    /// Stats for every pass that ran, in execution order
    pub passes: Vec<PassStats>,
    /// Bracketed status tokens no strategy could resolve, first-seen order
    pub missing_statuses: Vec<String>,
    /// Descriptions of `Other` records whose source matched nothing
    pub unresolved_other_sources: Vec<String>,
    /// Relics whose name already ends in a parenthesised suffix
    pub suspicious_relic_names: Vec<String>,
}

impl MergeDiagnostics {
    /// Get the stats of one pass by name
    pub fn pass(&self, name: &str) -> Option<&PassStats> {
        self.passes.iter().find(|p| p.pass == name)
    }

    pub(crate) fn record_missing_status(&mut self, token: &str) {
        if !self.missing_statuses.iter().any(|t| t == token) {
            self.missing_statuses.push(token.to_string());
        }
    }
}

/// The in-progress graph, owned exclusively by the pass currently running
#[derive(Debug)]
pub struct MergeContext {
    pub graph: TransformResultsContainer,
    pub options: MergeOptions,
    pub diagnostics: MergeDiagnostics,
}

impl MergeContext {
    pub fn new(graph: TransformResultsContainer, options: MergeOptions) -> Self {
        Self {
            graph,
            options,
            diagnostics: MergeDiagnostics::default(),
        }
    }

    pub(crate) fn strict(&self) -> bool {
        self.options.strict_joins
    }
}

pub type PassFn = fn(&mut MergeContext) -> Result<PassStats>;

/// Every pass, in execution order; later passes read links resolved earlier
pub const PASSES: &[(&str, PassFn)] = &[
    // id wire-up
    (ids::CHECK_RELIC_NAMES, ids::check_relic_names),
    (ids::LEGEND_MATERIA_IDS, ids::wire_legend_materia_ids),
    (ids::CHARACTER_IDS, ids::wire_character_ids),
    (ids::SOUL_BREAK_IDS, ids::wire_soul_break_ids),
    (ids::RELIC_IDS, ids::wire_relic_ids),
    (ids::MAGICITE_IDS, ids::wire_magicite_ids),
    (ids::EVENT_IDS, ids::wire_event_ids),
    (source::OTHER_SOURCES, source::resolve_other_sources),
    // object wire-up
    (objects::MAGICITE_SKILLS, objects::wire_magicite_skills),
    (objects::RECORD_SPHERES, objects::wire_record_spheres),
    (objects::LEGEND_SPHERES, objects::wire_legend_spheres),
    (objects::RECORD_MATERIAS, objects::wire_record_materias),
    (objects::LEGEND_MATERIAS, objects::wire_legend_materias),
    (objects::COMMANDS, objects::wire_commands),
    (objects::SYNCHRO_COMMANDS, objects::wire_synchro_commands),
    (objects::BRAVE_ACTIONS, objects::wire_brave_actions),
    (status::STATUSES, status::wire_statuses),
    (objects::OTHERS, objects::wire_others),
    (objects::SOUL_BREAKS_TO_RELICS, objects::wire_soul_breaks_to_relics),
    (objects::RELICS_TO_CHARACTERS, objects::wire_relics_to_characters),
    // derived values
    (objects::LEGEND_SPHERE_TIERS, objects::calculate_legend_sphere_tiers),
];

/// Output of one merge run
#[derive(Debug, Clone, PartialEq)]
pub struct MergeRun {
    pub results: MergeResultsContainer,
    pub diagnostics: MergeDiagnostics,
}

/// Run every pass over fresh transform output and assemble the result
///
/// Always feed this transform output, never a previous merge's output: link
/// fields are only reset to unresolved by the transform stage.
#[tracing::instrument(skip_all)]
pub fn execute_merge(graph: TransformResultsContainer, options: MergeOptions) -> Result<MergeRun> {
    let mut ctx = MergeContext::new(graph, options);

    for (name, pass) in PASSES {
        let stats = pass(&mut ctx).map_err(|e| {
            tracing::error!(pass = *name, error = %e, "merge pass failed, aborting merge");
            Error::MergeAborted {
                pass: *name,
                source: Box::new(e),
            }
        })?;

        tracing::info!(
            pass = *name,
            touched = stats.touched,
            unresolved = stats.unresolved,
            "finished merge pass"
        );
        ctx.diagnostics.passes.push(stats);
    }

    tracing::info!(count = ctx.diagnostics.missing_statuses.len(), "missing statuses found");
    for token in &ctx.diagnostics.missing_statuses {
        tracing::warn!(token = %token, "no matching status found for status text");
    }

    let MergeContext {
        graph, diagnostics, ..
    } = ctx;
    let results = assemble::assemble(graph);
    tracing::info!(
        characters = results.characters.len(),
        relics = results.relics.len(),
        soul_breaks = results.soul_breaks.len(),
        "assembled merge results"
    );

    Ok(MergeRun {
        results,
        diagnostics,
    })
}

/// Entry points for a merge run, differing only in where the input comes from
#[derive(Debug)]
pub struct MergeManager<S> {
    storage: S,
    options: MergeOptions,
}

impl<S: TransformStorage> MergeManager<S> {
    pub fn new(storage: S, options: MergeOptions) -> Self {
        Self { storage, options }
    }

    /// Merge the most recently stored transform snapshot
    pub fn merge_latest(&self) -> Result<MergeRun> {
        tracing::info!("merging latest transform results");
        let graph = self.storage.retrieve_latest_transform_results()?;
        execute_merge(graph, self.options)
    }

    /// Merge a specific stored transform snapshot
    pub fn merge_from_path(&self, path: &Path) -> Result<MergeRun> {
        tracing::info!(path = %path.display(), "merging transform results from file");
        let graph = self.storage.retrieve_transform_results(path)?;
        execute_merge(graph, self.options)
    }

    /// Merge transform output handed over directly
    pub fn merge(&self, graph: TransformResultsContainer) -> Result<MergeRun> {
        tracing::info!("merging supplied transform results");
        execute_merge(graph, self.options)
    }

    /// Get the backing snapshot storage
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::model::OtherSource;
    use crate::storage::SnapshotStore;
    use std::fs;

    fn temp_store(name: &str) -> SnapshotStore {
        let dir = std::env::temp_dir().join(format!("enlir-merge-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        SnapshotStore::new(dir)
    }

    #[test]
    fn test_full_merge_links_sample_graph() {
        let run = execute_merge(fixtures::sample_graph(), MergeOptions::default()).unwrap();
        let results = &run.results;

        let relic = &results.relics[0];
        assert_eq!(relic.character_id, 1);
        assert_eq!(relic.soul_break_id, 1);
        assert_eq!(relic.legend_materia_id, 1);
        let soul_break = relic.soul_break.as_ref().unwrap();
        assert_eq!(soul_break.soul_break_name, "Braver");
        assert_eq!(soul_break.commands.len(), 1);
        assert_eq!(soul_break.statuses.len(), 2);

        let cloud = &results.characters[0];
        assert_eq!(cloud.relics.len(), 2);
        assert_eq!(cloud.legend_spheres.len(), 2);
        assert_eq!(cloud.relics[0].soul_break.as_ref().unwrap().commands.len(), 1);

        assert_eq!(results.others[0].source, OtherSource::Status(1));
        assert_eq!(results.magicites[0].magicite_skills.len(), 1);
        assert_eq!(results.magicites[0].introducing_event_id, 1);
        assert_eq!(results.id_lists.characters[0].label, "Cloud");
        assert!(results.type_lists.contains_key("Realm"));
    }

    #[test]
    fn test_every_pass_reports_stats() {
        let run = execute_merge(fixtures::sample_graph(), MergeOptions::default()).unwrap();

        assert_eq!(run.diagnostics.passes.len(), PASSES.len());
        for ((name, _), stats) in PASSES.iter().zip(&run.diagnostics.passes) {
            assert_eq!(*name, stats.pass);
        }
        assert_eq!(run.diagnostics.pass(ids::CHARACTER_IDS).unwrap().unresolved, 0);
    }

    #[test]
    fn test_merge_is_repeatable_on_identical_input() {
        let first = execute_merge(fixtures::sample_graph(), MergeOptions::default()).unwrap();
        let second = execute_merge(fixtures::sample_graph(), MergeOptions::default()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_strict_ambiguous_character_aborts() {
        let mut graph = fixtures::sample_graph();
        let mut duplicate = graph.characters[0].clone();
        duplicate.id = 2;
        graph.characters.push(duplicate);

        let options = MergeOptions {
            strict_joins: true,
            ..Default::default()
        };
        let err = execute_merge(graph.clone(), options).unwrap_err();

        match err {
            Error::MergeAborted { pass, source } => {
                assert_eq!(pass, ids::CHARACTER_IDS);
                assert!(matches!(*source, Error::AmbiguousJoin { pass: ids::CHARACTER_IDS, count: 2, .. }));
            }
            other => panic!("unexpected error: {}", other),
        }

        // lenient mode takes the first candidate
        let run = execute_merge(graph, MergeOptions::default()).unwrap();
        assert_eq!(run.results.relics[0].character_id, 1);
    }

    #[test]
    fn test_unknown_realm_id_aborts() {
        let mut graph = fixtures::sample_graph();
        graph.relics[0].realm = 999;

        let err = execute_merge(graph, MergeOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MergeAborted { source, .. } if matches!(*source, Error::UnknownTypeListId { id: 999, .. })));
    }

    #[test]
    fn test_manager_reads_snapshots_from_storage() {
        let store = temp_store("manager");
        let mut older = fixtures::sample_graph();
        older.characters[0].character_name = "Zack".to_string();
        let newer = fixtures::sample_graph();

        let older_path = store.store_transform_results(&older).unwrap();
        let newer_path = store.store_transform_results(&newer).unwrap();
        assert_eq!(store.latest_transform_path().unwrap(), newer_path);

        let manager = MergeManager::new(&store, MergeOptions::default());

        let latest = manager.merge_latest().unwrap();
        let expected = execute_merge(newer.clone(), MergeOptions::default()).unwrap();
        assert_eq!(latest, expected);
        assert_eq!(latest.results.relics[0].character_id, 1);

        let from_path = manager.merge_from_path(&older_path).unwrap();
        let expected = execute_merge(older, MergeOptions::default()).unwrap();
        assert_eq!(from_path, expected);
        assert_eq!(from_path.results.relics[0].character_id, 0);

        let direct = manager.merge(newer).unwrap();
        assert_eq!(direct, latest);

        fs::remove_dir_all(store.root()).unwrap();
    }

    #[test]
    fn test_manager_surfaces_missing_snapshot() {
        let store = temp_store("empty");
        let manager = MergeManager::new(&store, MergeOptions::default());

        let err = manager.merge_latest().unwrap_err();
        assert!(matches!(err, Error::SnapshotNotFound { kind: "transform", .. }));

        let err = manager.merge_from_path(&store.root().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
