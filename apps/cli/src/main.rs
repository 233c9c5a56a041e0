//! JsonSettings CLI
//!
//! Inspect and edit key-value settings files from the command line.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;

use jsonsettings::{KeyValueFile, KeyValueSettings, KeyValueSettingsBuilder, SettingsFile};
use jsonsettings_logging::{init as init_logging, LogLevel};

/// JsonSettings - file-backed key-value settings
#[derive(Parser)]
#[command(name = "jsonsettings")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level (error, warn, info, debug, trace); overrides --verbose
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the whole settings file
    Show {
        /// Settings file
        file: PathBuf,
    },

    /// Print the value stored at a key
    Get {
        /// Settings file
        file: PathBuf,

        /// Key to read
        key: String,

        /// JSON value printed when the key is missing
        #[arg(long)]
        fallback: Option<String>,
    },

    /// Store a value at a key (JSON, or a plain string)
    Set {
        /// Settings file
        file: PathBuf,

        /// Key to write
        key: String,

        /// Value to store
        value: String,
    },

    /// Remove a key
    Remove {
        /// Settings file
        file: PathBuf,

        /// Key to remove
        key: String,
    },

    /// Create the file if missing, writing declared defaults into it
    Init {
        /// Settings file
        file: PathBuf,

        /// Default value (format: KEY=JSON)
        #[arg(short, long = "default")]
        defaults: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_level.unwrap_or(if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    }));

    match cli.command {
        Commands::Show { file } => show(&file),
        Commands::Get {
            file,
            key,
            fallback,
        } => get(&file, &key, fallback.as_deref()),
        Commands::Set { file, key, value } => set(&file, &key, &value),
        Commands::Remove { file, key } => remove(&file, &key),
        Commands::Init { file, defaults } => init(&file, &defaults),
    }
}

fn load_existing(file: &Path) -> Result<KeyValueSettings> {
    let mut settings = KeyValueSettings::new(file);
    settings
        .load(true)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    Ok(settings)
}

fn show(file: &Path) -> Result<()> {
    let settings = load_existing(file)?;
    if settings.document().is_empty() {
        info!("{} has no entries", file.display());
    }
    println!("{}", settings.document().to_pretty_string()?);
    Ok(())
}

fn get(file: &Path, key: &str, fallback: Option<&str>) -> Result<()> {
    let settings = load_existing(file)?;
    let value: Value = match fallback {
        Some(raw) => settings.get_or(key, parse_value(raw))?,
        None => settings.get(key)?,
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn set(file: &Path, key: &str, raw: &str) -> Result<()> {
    let mut settings = KeyValueSettingsBuilder::from_file(file)
        .load_if_exists()
        .with_context(|| format!("Failed to load {}", file.display()))?
        .build();
    settings.set_value(key, parse_value(raw));
    settings.save()?;
    info!("Set {} in {:?}", key, file);
    Ok(())
}

fn remove(file: &Path, key: &str) -> Result<()> {
    let mut settings = load_existing(file)?;
    if settings.remove(key).is_none() {
        bail!("No entry with key {} in {}", key, file.display());
    }
    settings.save()?;
    info!("Removed {} from {:?}", key, file);
    Ok(())
}

fn init(file: &Path, defaults: &[String]) -> Result<()> {
    let pairs = defaults
        .iter()
        .map(|pair| parse_default(pair))
        .collect::<Result<Vec<_>>>()?;

    let settings = KeyValueSettingsBuilder::from_file(file)
        .with_default_values(pairs)?
        .load_or_create()
        .with_context(|| format!("Failed to initialize {}", file.display()))?
        .build();

    println!("{}", settings.document().to_pretty_string()?);
    Ok(())
}

/// JSON when it parses, otherwise the raw text as a string
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Split `KEY=JSON`
fn parse_default(pair: &str) -> Result<(String, Value)> {
    match pair.split_once('=') {
        Some((key, raw)) if !key.is_empty() => Ok((key.to_string(), parse_value(raw))),
        _ => bail!("Invalid default {:?}, expected KEY=VALUE", pair),
    }
}
