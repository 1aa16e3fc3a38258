//! # zod-codepen
//!
//! Turn a JSON snapshot of Zod schemas into a standalone TypeScript module.
//!
//! ## Usage
//!
//! ```bash
//! # Generate ./generated/schemas.ts from a Zod 4 snapshot
//! zod-codepen generate schemas.json
//!
//! # Zod 3 snapshot, custom output, preview only
//! zod-codepen generate schemas.json --zod-version v3 --output src/zod.ts --dry-run
//!
//! # Initialize configuration
//! zod-codepen init
//!
//! # Verify the generated module is up to date
//! zod-codepen check schemas.json --path ./generated/schemas.ts
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use zod_codepen::ZodVersion;
use zod_codepen_cli::{
    config::{CliArgs, Config, ConfigManager},
    error::{CliError, CliResult},
    generator::{strip_header, ModuleGenerator},
    snapshot::load_snapshot,
    writer::{FileWriter, WriteResult},
};

#[derive(Parser)]
#[command(name = "zod-codepen")]
#[command(author, version, about = "Generate TypeScript Zod modules from schema snapshots", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a TypeScript module from a schema snapshot
    Generate {
        /// JSON snapshot mapping export names to schemas
        input: PathBuf,

        /// Output file for the generated module
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Zod major version of the snapshot (v3 or v4)
        #[arg(short = 'z', long)]
        zod_version: Option<ZodVersion>,

        /// Preview the module without writing it
        #[arg(long)]
        dry_run: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only export names matching this glob (repeatable)
        #[arg(long)]
        include: Vec<String>,

        /// Skip names matching this glob (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        /// Omit the `export type` section
        #[arg(long)]
        no_types: bool,

        /// Render objects on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Initialize a new zod-codepen configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "zod-codepen.toml")]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Check that a generated module is up to date
    Check {
        /// JSON snapshot mapping export names to schemas
        input: PathBuf,

        /// Path to the generated module (defaults to the configured output)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Zod major version of the snapshot (v3 or v4)
        #[arg(short = 'z', long)]
        zod_version: Option<ZodVersion>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Generate {
            input,
            output,
            zod_version,
            dry_run,
            config,
            include,
            exclude,
            no_types,
            compact,
        } => {
            let args = CliArgs {
                output,
                include_types: no_types.then_some(false),
                zod_version,
                format: compact.then_some(false),
                include,
                exclude,
            };
            cmd_generate(input, config, args, dry_run)
        }

        Commands::Init { output, force } => cmd_init(output, force),

        Commands::Check {
            input,
            path,
            zod_version,
            config,
        } => cmd_check(input, path, zod_version, config),
    }
}

fn load_config(config_path: Option<PathBuf>, args: &CliArgs) -> CliResult<Config> {
    let config = ConfigManager::load(config_path.as_deref())?;
    Ok(ConfigManager::merge_cli_args(config, args))
}

/// Generate command implementation.
fn cmd_generate(
    input: PathBuf,
    config_path: Option<PathBuf>,
    args: CliArgs,
    dry_run: bool,
) -> CliResult<()> {
    let config = load_config(config_path, &args)?;

    println!("{} {}", "Loading snapshot".cyan(), input.display());
    let snapshot = load_snapshot(&input)?;
    println!("  Found {} entr(ies)", snapshot.len().to_string().green());

    println!(
        "{}",
        format!("Serializing Zod {} schemas...", config.serialize.zod_version).cyan()
    );
    let output_path = config.output.file.clone();
    let module = ModuleGenerator::new(config).generate(&snapshot)?;

    println!(
        "  Exported {} schema(s)",
        module.exported.len().to_string().green()
    );
    if !module.failed.is_empty() {
        println!(
            "  {} {} schema(s) fell back to z.any(): {}",
            "Warning:".yellow(),
            module.failed.len(),
            module.failed.join(", ")
        );
    }
    if !module.filtered.is_empty() {
        println!("  Filtered {} name(s)", module.filtered.len());
    }
    if !module.skipped.is_empty() {
        println!("  Skipped {} non-schema value(s)", module.skipped.len());
    }

    let writer = FileWriter::new(dry_run);
    match writer.write(&output_path, &module.code)? {
        WriteResult::Written { path, bytes } => {
            println!(
                "{} Written {} bytes to {}",
                "✓".green(),
                bytes,
                path.display()
            );
        }
        WriteResult::Unchanged { path } => {
            println!("{} {} is up-to-date", "✓".green(), path.display());
        }
        WriteResult::DryRun { content, path } => {
            println!(
                "{} Would write to {}:",
                "[dry-run]".yellow(),
                path.display()
            );
            println!("{}", "─".repeat(60).dimmed());
            println!("{}", content);
            println!("{}", "─".repeat(60).dimmed());
        }
    }

    Ok(())
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> CliResult<()> {
    if output.exists() && !force {
        println!("  Use --force to overwrite");
        return Err(CliError::AlreadyExists { path: output });
    }

    std::fs::write(&output, ConfigManager::default_config_content())?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Check command implementation.
fn cmd_check(
    input: PathBuf,
    path: Option<PathBuf>,
    zod_version: Option<ZodVersion>,
    config_path: Option<PathBuf>,
) -> CliResult<()> {
    println!("{}", "Checking generated module...".cyan());

    let args = CliArgs {
        output: path,
        zod_version,
        ..Default::default()
    };
    let config = load_config(config_path, &args)?;
    let module_path = config.output.file.clone();

    if !module_path.exists() {
        return Err(CliError::Check(format!(
            "Generated module not found: {}",
            module_path.display()
        )));
    }
    let existing = std::fs::read_to_string(&module_path)?;

    let snapshot = load_snapshot(&input)?;
    let module = ModuleGenerator::new(config).generate(&snapshot)?;

    if strip_header(&existing).trim() == strip_header(&module.code).trim() {
        println!("{} {} is up-to-date", "✓".green(), module_path.display());
        Ok(())
    } else {
        println!("{} {} is out of date", "✗".red(), module_path.display());
        println!("  Run 'zod-codepen generate' to update");
        Err(CliError::Check(format!(
            "{} is out of date",
            module_path.display()
        )))
    }
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
