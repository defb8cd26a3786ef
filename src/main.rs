use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod interpreter;
mod interpreters;
mod layout;
mod registry;
mod status;

use config::RegistryConfig;
use interpreter::Interpreter;
use registry::InterpreterRegistry;
use status::InterpreterStatus;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to registry configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List known interpreters
    List {
        /// Only interpreters that are installed
        #[arg(long, conflicts_with = "not_installed")]
        installed: bool,

        /// Only interpreters that are not installed
        #[arg(long)]
        not_installed: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show which interpreter runs a script, based on its extension
    Which {
        #[arg(required = true)]
        script: PathBuf,
    },

    /// Show details for one interpreter
    Info {
        name: String,
    },

    /// Probe the install state of every interpreter
    Status {
        #[arg(long)]
        json: bool,
    },

    /// Print the starter template for a new script
    Template {
        name: String,
    },

    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(RegistryConfig::default_path);
    let loaded = RegistryConfig::load(&config_path);

    let log_level = match (&loaded, cli.verbose) {
        (_, true) => "debug".to_string(),
        (Ok(config), false) => config.log_level.clone(),
        (Err(_), false) => "info".to_string(),
    };
    setup_logging(&log_level);

    let config = config::init_config(loaded);
    debug!("Using configuration {:?}", config);

    let registry = Arc::new(interpreters::init_registry(&config)?);
    debug!("Registry holds {} interpreters", registry.len());

    match cli.command {
        Commands::List { installed, not_installed, json } => {
            let statuses: Vec<InterpreterStatus> = if installed {
                registry
                    .list_installed()
                    .iter()
                    .map(|interpreter| InterpreterStatus::new(&registry, interpreter.as_ref(), true))
                    .collect()
            } else if not_installed {
                registry
                    .list_not_installed()
                    .iter()
                    .map(|interpreter| InterpreterStatus::new(&registry, interpreter.as_ref(), false))
                    .collect()
            } else {
                registry
                    .list_all()
                    .iter()
                    .map(|interpreter| InterpreterStatus::probe(&registry, interpreter.as_ref()))
                    .collect()
            };
            print_statuses(&statuses, json)?;
        }

        Commands::Which { script } => {
            let script_name = script_file_name(&script);
            let interpreter = registry.find_by_extension(&script_name).ok_or_else(|| {
                anyhow!(
                    "No interpreter found for {:?}. Supported extensions: {}",
                    script,
                    supported_extensions(&registry).join(", ")
                )
            })?;

            println!("{} ({})", interpreter.name(), interpreter.nice_name());
            if !registry.is_installed(interpreter.name()) {
                println!("Note: {} is not installed", interpreter.name());
            }
            let command = interpreter.command_for(registry.layout(), &script);
            println!("{}", command.display_line());
        }

        Commands::Info { name } => {
            let interpreter = find(&registry, &name)?;
            let layout = registry.layout();

            println!("Name:       {}", interpreter.name());
            println!("Nice name:  {}", interpreter.nice_name());
            println!("Extension:  {}", interpreter.extension());
            println!("Binary:     {}", interpreter.binary(layout).display());
            println!("Install:    {}", layout.interpreter_dir(interpreter.name()).display());
            println!("Extras:     {}", layout.extras_dir(interpreter.name()).display());
            println!("Installed:  {}", registry.is_installed(interpreter.name()));
        }

        Commands::Status { json } => {
            let statuses = status::probe_all(Arc::clone(&registry)).await;
            print_statuses(&statuses, json)?;
        }

        Commands::Template { name } => {
            let interpreter = find(&registry, &name)?;
            print!("{}", interpreter.content_template());
        }

        Commands::InitConfig { force } => {
            write_default_config(&config_path, force)?;
        }
    }

    Ok(())
}

fn find<'a>(registry: &'a InterpreterRegistry, name: &str) -> Result<&'a Arc<dyn Interpreter>> {
    registry.find_by_name(name).ok_or_else(|| {
        let known: Vec<_> = registry.list_all().iter().map(|i| i.name()).collect();
        anyhow!("Unknown interpreter {:?}. Known interpreters: {}", name, known.join(", "))
    })
}

fn supported_extensions(registry: &InterpreterRegistry) -> Vec<&'static str> {
    registry.list_all().iter().map(|i| i.extension()).collect()
}

/// Extension lookup works on the bare file name so dots in parent
/// directories never count.
fn script_file_name(script: &Path) -> String {
    script
        .file_name()
        .unwrap_or(script.as_os_str())
        .to_string_lossy()
        .into_owned()
}

fn print_statuses(statuses: &[InterpreterStatus], json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(statuses).context("Failed to serialize status")?;
        println!("{}", out);
        return Ok(());
    }

    for status in statuses {
        let mark = if status.installed { "installed" } else { "not installed" };
        println!("{:<8} {:<6} {:<18} {}", status.name, status.extension, status.nice_name, mark);
    }
    Ok(())
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(anyhow!("Config file already exists at {:?} (use --force to overwrite)", path));
    }
    RegistryConfig::default().save(path)?;
    info!("Created default configuration at {:?}", path);
    println!("Wrote {}", path.display());
    Ok(())
}

fn setup_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
