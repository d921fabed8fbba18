//! Enlir ETL CLI
//!
//! Command-line tool for validating, transforming, merging and querying
//! Enlir worksheet exports.

use clap::{Args, Parser, Subcommand};
use enlir_core::{
    scan_import_dir, validate_import, EntityKind, EnlirRepository, EtlConfig, MergeManager,
    MergeOptions, MergeRun, MergeStorage, SnapshotStore, TransformManager, TransformStorage,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "enlir-cli")]
#[command(about = "Enlir worksheet ETL", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (JSON); defaults apply when it does not exist
    #[arg(short, long, global = true, default_value = "enlir.json")]
    config: PathBuf,

    /// Snapshot store directory, overriding the config
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct MergeFlags {
    /// Abort on ambiguous joins and suspicious relic names
    #[arg(long)]
    strict: bool,

    /// Resolve Other sources the way older snapshots were built
    #[arg(long)]
    legacy_other_sources: bool,
}

impl MergeFlags {
    fn apply(&self, mut options: MergeOptions) -> MergeOptions {
        options.strict_joins |= self.strict;
        options.legacy_other_source_lookup |= self.legacy_other_sources;
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check that every worksheet is present with its required columns
    Validate {
        /// Directory of worksheet CSV exports, overriding the config
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Transform worksheets and store a transform snapshot
    Transform {
        /// Directory of worksheet CSV exports, overriding the config
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Merge a transform snapshot and store a merge snapshot
    Merge {
        /// Transform snapshot to merge; the latest one by default
        #[arg(long)]
        snapshot: Option<PathBuf>,

        #[command(flatten)]
        flags: MergeFlags,
    },

    /// Transform and merge in one go
    Run {
        /// Directory of worksheet CSV exports, overriding the config
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[command(flatten)]
        flags: MergeFlags,
    },

    /// Print one record of the latest merge snapshot as JSON
    Show {
        /// Entity collection, e.g. soul_breaks
        #[arg(short, long)]
        entity: EntityKind,

        #[arg(long)]
        id: u32,
    },

    /// Find records whose label contains some text
    Search {
        /// Entity collection, e.g. soul_breaks
        #[arg(short, long)]
        entity: EntityKind,

        #[arg(short, long)]
        text: String,
    },

    /// List the id/label lookup for an entity collection
    Lookups {
        /// Entity collection, e.g. soul_breaks
        #[arg(short, long)]
        entity: EntityKind,
    },

    /// Write a configuration file template
    CreateConfig {
        /// Output path for the config file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(config: &EtlConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> enlir_core::Result<()> {
    if let Commands::CreateConfig { output } = &cli.command {
        return cmd_create_config(output);
    }

    let mut config = EtlConfig::load_or_default(&cli.config)?;
    if let Some(store) = cli.store {
        config.storage_dir = store;
    }
    init_logging(&config);
    tracing::debug!(config = %cli.config.display(), store = %config.storage_dir.display(), "loaded configuration");

    let store = SnapshotStore::new(&config.storage_dir);

    match cli.command {
        Commands::Validate { input } => cmd_validate(input.as_deref().unwrap_or(config.import_dir.as_path())),
        Commands::Transform { input } => {
            cmd_transform(input.as_deref().unwrap_or(config.import_dir.as_path()), &store).map(|_| ())
        }
        Commands::Merge { snapshot, flags } => {
            cmd_merge(snapshot.as_deref(), &store, flags.apply(config.merge))
        }
        Commands::Run { input, flags } => {
            let path = cmd_transform(input.as_deref().unwrap_or(config.import_dir.as_path()), &store)?;
            cmd_merge(Some(path.as_path()), &store, flags.apply(config.merge))
        }
        Commands::Show { entity, id } => cmd_show(&store, entity, id),
        Commands::Search { entity, text } => cmd_search(&store, entity, &text),
        Commands::Lookups { entity } => cmd_lookups(&store, entity),
        Commands::CreateConfig { .. } => Ok(()),
    }
}

fn cmd_validate(input: &Path) -> enlir_core::Result<()> {
    let import = scan_import_dir(input)?;
    let report = validate_import(&import);

    println!("Scanned {}: {} worksheets, {} rows", input.display(), import.sheets.len(), import.total_rows());
    for path in &import.ignored_files {
        println!("  ignored {}", path.display());
    }
    println!();
    print!("{}", report);

    if !report.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_transform(input: &Path, store: &SnapshotStore) -> enlir_core::Result<PathBuf> {
    let import = scan_import_dir(input)?;
    let results = TransformManager::new().transform_all(&import)?;

    println!("Transformed {} worksheets from {}:", import.sheets.len(), input.display());
    for (kind, count) in results.counts() {
        println!("  {:<18} {}", kind.name(), count);
    }

    let path = store.store_transform_results(&results)?;
    println!("Stored transform snapshot: {}", path.display());
    Ok(path)
}

fn cmd_merge(snapshot: Option<&Path>, store: &SnapshotStore, options: MergeOptions) -> enlir_core::Result<()> {
    let manager = MergeManager::new(store, options);
    let run = match snapshot {
        Some(path) => manager.merge_from_path(path)?,
        None => manager.merge_latest()?,
    };

    print_diagnostics(&run);

    let path = store.store_merge_results(&run.results)?;
    println!();
    println!("Stored merge snapshot: {}", path.display());
    Ok(())
}

fn print_diagnostics(run: &MergeRun) {
    let diagnostics = &run.diagnostics;

    println!("Merge passes:");
    for stats in &diagnostics.passes {
        println!("  {:<32} {:>6} linked {:>6} unresolved", stats.pass, stats.touched, stats.unresolved);
    }

    if !diagnostics.missing_statuses.is_empty() {
        println!("\nMissing statuses ({}):", diagnostics.missing_statuses.len());
        for token in &diagnostics.missing_statuses {
            println!("  [{}]", token);
        }
    }
    if !diagnostics.unresolved_other_sources.is_empty() {
        println!("\nUnresolved other sources ({}):", diagnostics.unresolved_other_sources.len());
        for other in &diagnostics.unresolved_other_sources {
            println!("  {}", other);
        }
    }
    if !diagnostics.suspicious_relic_names.is_empty() {
        println!("\nSuspicious relic names ({}):", diagnostics.suspicious_relic_names.len());
        for relic in &diagnostics.suspicious_relic_names {
            println!("  {}", relic);
        }
    }
}

fn cmd_show(store: &SnapshotStore, entity: EntityKind, id: u32) -> enlir_core::Result<()> {
    let repository = EnlirRepository::from_storage(store)?;
    let snapshot = repository.current();

    match snapshot.results.record_json(entity, id)? {
        Some(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        None => {
            eprintln!("No {} record with id {}", entity, id);
            std::process::exit(1);
        }
    }
}

fn cmd_search(store: &SnapshotStore, entity: EntityKind, text: &str) -> enlir_core::Result<()> {
    let repository = EnlirRepository::from_storage(store)?;
    let found = repository.current().results.search_labels(entity, text);

    println!("{} matching '{}' ({}):", entity, text, found.len());
    for entry in &found {
        println!("  {:>6}  {}", entry.id, entry.label);
    }
    Ok(())
}

fn cmd_lookups(store: &SnapshotStore, entity: EntityKind) -> enlir_core::Result<()> {
    let repository = EnlirRepository::from_storage(store)?;
    let snapshot = repository.current();
    let entries = snapshot.results.id_list(entity);

    println!("{} ({}):", entity, entries.len());
    for entry in entries {
        println!("  {:>6}  {}", entry.id, entry.label);
    }
    Ok(())
}

fn cmd_create_config(output: &Path) -> enlir_core::Result<()> {
    let config = EtlConfig::default();
    config.save(output)?;

    println!("Created config file: {}", output.display());
    println!();
    println!("Edit the file to point at your worksheet exports, then run:");
    println!("  enlir-cli --config {} run", output.display());
    Ok(())
}
