//! conflictsweep command-line tool.
//!
//! Resolves merge-conflict markers in a working tree, lists the conflict
//! regions a sweep would touch, and generates / validates configuration
//! files.

mod style;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use conflictsweep_core::config::{BatchConfig, SweepConfig};
use conflictsweep_core::conflict::{
    parser, BatchReport, ConflictResolver, ResolutionPolicy, Segment,
};

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "conflictsweep.toml";

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// conflictsweep command-line tool.
#[derive(Parser, Debug)]
#[command(
    name = "conflictsweep",
    version,
    about = "Mechanically resolve merge-conflict markers in a working tree"
)]
struct Cli {
    /// Path to the TOML configuration file (default: ./conflictsweep.toml if
    /// present, otherwise the built-in batches).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory that batch paths are relative to (overrides `root`).
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve conflicts in the configured batches or the given files.
    Resolve {
        /// Policy to apply (keep-theirs, keep-ours, delete-region). Overrides
        /// each batch's own policy.
        #[arg(short, long)]
        policy: Option<ResolutionPolicy>,

        /// Report what would change without writing any file.
        #[arg(long)]
        dry_run: bool,

        /// Files to resolve instead of the configured batches.
        paths: Vec<PathBuf>,
    },

    /// List conflict regions without modifying anything.
    Scan {
        /// Files to scan instead of the configured batches.
        paths: Vec<PathBuf>,
    },

    /// Generate a configuration file with the built-in batches.
    Init {
        /// Output path for the generated config file.
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        output: PathBuf,
    },

    /// Validate a configuration file.
    Validate,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the progress lines.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { ref output } => cmd_init(output),
        Commands::Validate => cmd_validate(&cli),
        Commands::Resolve {
            policy,
            dry_run,
            ref paths,
        } => {
            let config = load_config(&cli)?;
            cmd_resolve(&config, policy, dry_run, paths)
        }
        Commands::Scan { ref paths } => {
            let config = load_config(&cli)?;
            cmd_scan(&config, paths)
        }
    }
}

// ---------------------------------------------------------------------------
// Config helpers
// ---------------------------------------------------------------------------

/// The config file to read, if any.
fn config_path(cli: &Cli) -> Option<PathBuf> {
    match &cli.config {
        Some(path) => Some(path.clone()),
        None => {
            let local = PathBuf::from(DEFAULT_CONFIG);
            local.exists().then_some(local)
        }
    }
}

fn load_config(cli: &Cli) -> Result<SweepConfig> {
    let mut config = match config_path(cli) {
        Some(path) => SweepConfig::load_and_validate(&path)
            .with_context(|| format!("failed to load configuration file {}", path.display()))?,
        None => {
            debug!("no configuration file, using built-in batches");
            SweepConfig::default()
        }
    };
    if let Some(root) = &cli.root {
        config.root = root.clone();
    }
    Ok(config)
}

fn build_resolver(config: &SweepConfig) -> Result<ConflictResolver> {
    ConflictResolver::from_config(config).context("invalid special-case declarations")
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

fn cmd_resolve(
    config: &SweepConfig,
    policy: Option<ResolutionPolicy>,
    dry_run: bool,
    paths: &[PathBuf],
) -> Result<()> {
    let resolver = build_resolver(config)?.with_dry_run(dry_run);

    let batches: Vec<BatchConfig> = if paths.is_empty() {
        config
            .batches
            .iter()
            .map(|b| BatchConfig {
                policy: policy.unwrap_or(b.policy),
                ..b.clone()
            })
            .collect()
    } else {
        vec![BatchConfig {
            name: "command-line".into(),
            policy: policy.unwrap_or_default(),
            paths: paths.to_vec(),
        }]
    };

    let mut reports: Vec<BatchReport> = Vec::with_capacity(batches.len());
    for batch in &batches {
        let report = resolver.run_batch(batch);
        for outcome in &report.outcomes {
            println!("{}", outcome);
        }
        reports.push(report);
    }

    print_summary(&reports, dry_run);
    Ok(())
}

fn print_summary(reports: &[BatchReport], dry_run: bool) {
    let resolved: usize = reports.iter().map(BatchReport::resolved).sum();
    let clean: usize = reports.iter().map(BatchReport::no_conflict).sum();
    let errors: usize = reports.iter().map(BatchReport::errors).sum();
    let regions: usize = reports.iter().map(BatchReport::regions).sum();

    let mut line = format!(
        "{} file(s) resolved ({} region(s)), {} without conflicts, {} failed",
        resolved, regions, clean, errors
    );
    if dry_run {
        line.push_str(" [dry run, nothing written]");
    }

    println!();
    if errors > 0 {
        println!("{}", style::warn(&line));
    } else {
        println!("{}", style::success(&line));
    }
}

fn cmd_scan(config: &SweepConfig, paths: &[PathBuf]) -> Result<()> {
    let resolver = build_resolver(config)?;
    let targets: Vec<PathBuf> = if paths.is_empty() {
        config
            .batches
            .iter()
            .flat_map(|b| b.paths.iter().cloned())
            .collect()
    } else {
        paths.to_vec()
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["File", "Lines", "End label", "Ours", "Theirs", "Action"]);

    let mut found = 0;
    for target in &targets {
        let path = resolver.locate(target);
        if !path.exists() {
            continue;
        }
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                println!("{}", style::error(&format!("{}: {}", path.display(), e)));
                continue;
            }
        };

        for segment in parser::parse(&content, &resolver.markers().ours_label) {
            let Segment::Region(region) = segment else {
                continue;
            };
            let action = if !resolver.matches_incoming(&region) {
                style::action_skip()
            } else if resolver.is_dead_declaration(&region) {
                style::action_delete()
            } else {
                style::action_resolve()
            };
            table.add_row(vec![
                Cell::new(path.display()),
                Cell::new(format!("{}-{}", region.start_line, region.end_line)),
                Cell::new(region.end_label),
                Cell::new(region.ours_lines()),
                Cell::new(region.theirs_lines()),
                Cell::new(action),
            ]);
            found += 1;
        }
    }

    println!();
    if found == 0 {
        println!("{}", style::success("No conflict regions found"));
        println!();
        return Ok(());
    }

    println!(
        "{}",
        style::header(&format!("Conflict Regions ({})", found))
    );
    println!(
        "{}",
        style::dim(&format!(
            "root: {}  incoming label: {}",
            resolver.root().display(),
            resolver.markers().incoming_label
        ))
    );
    println!();
    println!("{}", table);
    println!();
    Ok(())
}

fn cmd_init(output: &Path) -> Result<()> {
    SweepConfig::default()
        .write_new(output)
        .context("failed to write config file")?;

    println!("Default configuration written to {}", output.display());
    println!();
    println!("Next steps:");
    println!("  1. Set markers.incoming_label to the branch you merged");
    println!("  2. Replace the [[batch]] path lists with your conflicted files");
    println!(
        "  3. Validate with: conflictsweep validate --config {}",
        output.display()
    );
    println!(
        "  4. Preview with:  conflictsweep scan --config {}",
        output.display()
    );

    Ok(())
}

fn cmd_validate(cli: &Cli) -> Result<()> {
    let Some(path) = config_path(cli) else {
        anyhow::bail!(
            "no configuration file: pass --config or create {}",
            DEFAULT_CONFIG
        );
    };

    println!("Validating configuration: {}", path.display());
    println!();

    let config = SweepConfig::load_from_file(&path).context("failed to parse configuration")?;
    println!("  [OK] TOML structure is valid");

    match config.validate() {
        Ok(()) => println!("  [OK] All fields are valid"),
        Err(e) => {
            println!("  [FAIL] Validation error: {}", e);
            anyhow::bail!("configuration validation failed");
        }
    }
    build_resolver(&config)?;
    println!("  [OK] Special-case declarations compile");

    println!();
    println!("Configuration summary:");
    println!("  Root            : {}", config.root.display());
    println!("  Ours label      : {}", config.markers.ours_label);
    println!("  Incoming label  : {}", config.markers.incoming_label);
    println!(
        "  Declarations    : {}",
        config.special_case.declarations.len()
    );
    for batch in &config.batches {
        println!(
            "  Batch {:<10}: {} path(s), {}",
            batch.name,
            batch.paths.len(),
            batch.policy
        );
    }

    Ok(())
}
