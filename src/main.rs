//! scaffold-node: Scaffold a new workflow action node
//!
//! Derives the node type and names from a description, creates placeholder
//! definition and editor files, and registers the node in the type union
//! and both registries.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use node_scaffold::domain::WriteReport;
use node_scaffold::services::{ArtifactStore, DryRunStore, FsStore};
use node_scaffold::{NamingSpec, Project, ScaffoldConfig, ScaffoldService};

const NEXT_STEPS: &[&str] = &[
    "Implement params/defaults/summary in the new definition file.",
    "Replace placeholder UI in the new editor file.",
    "Run npm run check:node-registry",
    "Run npm run build",
    "Run npm run check:canvas-interaction",
];

/// Scaffold a new workflow action node
#[derive(Parser, Debug)]
#[command(name = "scaffold-node", version, about)]
struct Cli {
    /// Human description of the node
    #[arg(long)]
    description: String,

    /// Node type in snake_case (optional override)
    #[arg(long = "type", value_name = "NODE_TYPE")]
    node_type: Option<String>,

    /// UI label (optional override)
    #[arg(long)]
    label: Option<String>,

    /// Print planned writes without modifying files
    #[arg(long)]
    dry_run: bool,

    /// Project root (discovered from the current directory by default)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Print the plan as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging with RUST_LOG environment variable support
fn init_logging(verbose: bool, default_filter: &str) {
    let fallback = if verbose { "debug" } else { default_filter };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("[error] {}", error);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Unable to read current directory")?;
    let bootstrap = ScaffoldConfig::load(Some(cwd.as_path()))?;
    init_logging(cli.verbose, &bootstrap.logging.default_filter);

    let naming = NamingSpec::build(
        &cli.description,
        cli.node_type.as_deref(),
        cli.label.as_deref(),
    )?;
    let project = Project::open(&cwd, cli.root.clone())?;
    let service = ScaffoldService::new(project);

    if cli.dry_run {
        let mut store = DryRunStore::new(FsStore);
        execute(&service, &naming, &mut store, &cli)?;
    } else {
        let mut store = FsStore;
        execute(&service, &naming, &mut store, &cli)?;
    }

    Ok(())
}

fn execute<S: ArtifactStore>(
    service: &ScaffoldService,
    naming: &NamingSpec,
    store: &mut S,
    cli: &Cli,
) -> Result<WriteReport> {
    let project = service.project();
    let plan = service.plan(naming, store)?;

    if cli.json {
        let summary = plan.summary(&project.root_path, cli.dry_run);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Scaffolding node type: {}", naming.node_type);
        println!("Label: {}", naming.label);
        println!(
            "Definition: {}",
            project.relative(&project.definition_path(naming)).display()
        );
        println!(
            "Editor: {}",
            project.relative(&project.editor_path(naming)).display()
        );
    }

    let report = service.apply(&plan, store)?;

    if !cli.json {
        if cli.dry_run {
            for path in &report.written {
                println!("[dry-run] write {}", path.display());
            }
        }

        println!("\nNext steps:");
        for (index, step) in NEXT_STEPS.iter().enumerate() {
            println!("{}. {}", index + 1, step);
        }
    }

    Ok(report)
}
