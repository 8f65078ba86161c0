//! CLI entry point for stampline: the link command, its settings and the note picker.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use stampline_core::{
    app_data_dir, default_config_path, load_config, save_config, suggest_notes, vault_relative, Config,
    ConfigError, LinkCommand, NoteStore, Notifier, VaultStore,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stampline")]
#[command(about = "Add dated links to country-folder notes under an anchor in a target note")]
struct Cli {
    /// Settings file to use instead of the one in the app data directory.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log what is going on (same as RUST_LOG=debug for stampline).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a link to NOTE under the anchor line of the target note.
    Link {
        /// The active note (absolute, or relative to the vault).
        #[arg(value_name = "NOTE")]
        note: Option<PathBuf>,
        /// Date to stamp instead of today (YYYY-MM-DD).
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
        /// Print the updated target note instead of writing it.
        #[arg(long)]
        dry_run: bool,
    },
    /// Tell whether `link` would run for NOTE, and if not, why.
    Check {
        #[arg(value_name = "NOTE")]
        note: Option<PathBuf>,
    },
    /// Show or change settings.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// List known countries and their flags.
    Countries,
    /// List notes in the vault, optionally fuzzy filtered.
    Notes {
        #[arg(value_name = "QUERY")]
        query: Option<String>,
    },
    /// Show where stampline stores its settings.
    DataDir,
}

#[derive(clap::Subcommand)]
enum ConfigCommand {
    /// Print the current settings.
    Show,
    /// Set the vault directory.
    Vault {
        #[arg(value_name = "DIR")]
        path: PathBuf,
    },
    /// Pick the target note by fuzzy search over the vault.
    Target {
        #[arg(value_name = "QUERY")]
        query: String,
        /// Take the best match without asking.
        #[arg(long)]
        first: bool,
    },
    /// Set the country whose links get no flag.
    DefaultCountry {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Set the anchor line links are inserted under.
    Anchor {
        #[arg(value_name = "LINE")]
        line: String,
    },
    /// Add or replace a country folder name and its flag.
    AddCountry {
        #[arg(value_name = "NAME")]
        name: String,
        #[arg(value_name = "EMOJI")]
        emoji: String,
    },
    /// Remove a user-defined country.
    RemoveCountry {
        #[arg(value_name = "NAME")]
        name: String,
    },
}

/// Notices go to stderr, leaving stdout for output.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{}", message);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = match cli.config {
        Some(p) => p,
        None => default_config_path().ok_or(ConfigError::NoDataDir)?,
    };
    let mut config = load_config(&config_path);
    tracing::debug!(path = %config_path.display(), "loaded settings");

    match cli.command {
        Commands::Link { note, date, dry_run } => {
            let today = date.unwrap_or_else(|| Local::now().date_naive());
            let cmd = LinkCommand::new(&config, today);
            if let Err(e) = cmd.check_target() {
                StderrNotifier.notify(&e.to_string());
                std::process::exit(1);
            }
            let store = vault_store(&config)?;
            let active = active_note(store.root(), note.as_deref())?;
            if dry_run {
                let outcome = cmd.preview(&store, active.as_deref()).await?;
                println!("{}", outcome.content);
            } else if cmd
                .run_with_notice(&store, &StderrNotifier, active.as_deref())
                .await
                .is_err()
            {
                std::process::exit(1);
            }
        }
        Commands::Check { note } => {
            let active = match config.vault_root() {
                Some(root) => active_note(&root, note.as_deref())?,
                None => note.map(|p| p.to_string_lossy().into_owned()),
            };
            let cmd = LinkCommand::new(&config, Local::now().date_naive());
            match cmd.check(active.as_deref()) {
                Ok(ready) => {
                    println!("ready: {} -> {}", ready.document.path, ready.target);
                    println!("  {}", cmd.link_line(&ready));
                }
                Err(e) => {
                    println!("disabled: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Config(sub) => {
            if run_config(sub, &mut config).await? {
                save_config(&config_path, &config)
                    .with_context(|| format!("saving {}", config_path.display()))?;
            }
        }
        Commands::Countries => {
            for (name, emoji) in config.country_table().iter() {
                let marker = if name == config.default_country { " (default)" } else { "" };
                println!("{}  {}{}", emoji, name, marker);
            }
        }
        Commands::Notes { query } => {
            let store = vault_store(&config)?;
            let notes = store.list_notes().await?;
            for n in suggest_notes(&notes, query.as_deref().unwrap_or("")) {
                println!("{}", n);
            }
        }
        Commands::DataDir => match app_data_dir() {
            Some(p) => println!("{}", p.display()),
            None => eprintln!("Could not determine app data directory."),
        },
    }
    Ok(())
}

/// Applies a settings subcommand. Returns whether `config` changed and needs saving.
async fn run_config(sub: ConfigCommand, config: &mut Config) -> Result<bool> {
    match sub {
        ConfigCommand::Show => {
            print!("{}", config.to_toml()?);
            return Ok(false);
        }
        ConfigCommand::Vault { path } => {
            config.set_vault_root(&path)?;
            println!("vault: {}", config.vault_root.as_deref().unwrap_or_default());
        }
        ConfigCommand::Target { query, first } => {
            let store = vault_store(config)?;
            let notes = store.list_notes().await?;
            let target = pick_note(&notes, &query, first)?;
            config.set_target_note(&target)?;
            println!("target: {}", target);
        }
        ConfigCommand::DefaultCountry { name } => {
            config.set_default_country(&name)?;
            println!("default country: {}", config.default_country);
        }
        ConfigCommand::Anchor { line } => {
            config.set_anchor_line(&line)?;
            println!("anchor: {}", config.anchor_line);
        }
        ConfigCommand::AddCountry { name, emoji } => {
            config.add_country(&name, &emoji)?;
        }
        ConfigCommand::RemoveCountry { name } => {
            config.remove_country(&name)?;
        }
    }
    Ok(true)
}

/// Best match for `query`, asking the user when several notes match and we can.
fn pick_note(notes: &[String], query: &str, first: bool) -> Result<String> {
    let hits = suggest_notes(notes, query);
    match hits.as_slice() {
        [] => bail!("no note matches {:?}", query),
        [only] => Ok(only.to_string()),
        [best, ..] if first || !std::io::stdin().is_terminal() => Ok(best.to_string()),
        _ => {
            let shown = &hits[..hits.len().min(20)];
            let choice = dialoguer::Select::new()
                .with_prompt("Target note")
                .items(shown)
                .default(0)
                .interact_opt()?;
            match choice {
                Some(i) => Ok(shown[i].to_string()),
                None => bail!("no note selected"),
            }
        }
    }
}

fn vault_store(config: &Config) -> Result<VaultStore> {
    let root = config
        .vault_root()
        .context("no vault configured; run `stampline config vault <DIR>`")?;
    Ok(VaultStore::new(root))
}

fn active_note(root: &Path, note: Option<&Path>) -> Result<Option<String>> {
    note.map(|p| vault_relative(root, p).with_context(|| format!("resolving {}", p.display())))
        .transpose()
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("stampline_core=debug,stampline_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
