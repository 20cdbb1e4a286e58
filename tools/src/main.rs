//! `scripa` command line tool.
//!
//! Usage:
//!   scripa --schemes schemes lookup th
//!   scripa --schemes schemes candidates aT35 --json
//!   scripa --schemes schemes compile ipa.bin
//!   scripa --snapshot ipa.bin interactive

mod interactive;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scripa_core::{Config, Dictionary, Engine, SchemeLoader};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scripa")]
#[command(about = "Inspect Scripa scheme dictionaries and try the transcription engine")]
#[command(version)]
struct Cli {
    /// Directory of scheme files
    #[arg(long, default_value = "schemes")]
    schemes: PathBuf,

    /// Load a compiled bincode snapshot instead of the scheme directory
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exact dictionary lookup
    Lookup { code: String },
    /// Values of every key starting with a prefix
    Prefix { prefix: String },
    /// Ranked candidates for a code
    Candidates {
        code: String,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the whole dictionary
    Dump,
    /// Write the loaded dictionary as a bincode snapshot
    Compile { output: PathBuf },
    /// Console demo: type codes line by line
    Interactive,
}

fn load_dictionary(cli: &Cli, config: &Config) -> Result<Dictionary> {
    if let Some(snapshot) = &cli.snapshot {
        return Dictionary::load_bincode(snapshot);
    }

    let mut dict = Dictionary::new();
    let loaded = SchemeLoader::from_config(config).load_dir(&cli.schemes, &mut dict);
    tracing::info!(files = loaded, keys = dict.len(), "loaded schemes");
    if loaded == 0 {
        anyhow::bail!("no scheme files loaded from {}", cli.schemes.display());
    }
    Ok(dict)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_toml(path)?,
        None => Config::default(),
    };
    let dict = load_dictionary(&cli, &config)?;

    match &cli.command {
        Command::Lookup { code } => {
            for value in dict.lookup(code) {
                println!("{value}");
            }
        }
        Command::Prefix { prefix } => {
            for value in dict.lookup_by_prefix(prefix) {
                println!("{value}");
            }
        }
        Command::Candidates { code, json } => {
            let engine = Engine::new(Arc::new(dict)).with_config(config);
            let records = engine.rank(code);
            if *json {
                let out = serde_json::to_string_pretty(&records)
                    .context("serialize candidates")?;
                println!("{out}");
            } else {
                for (i, r) in records.iter().enumerate() {
                    println!(
                        "{:>3}. {}  tone={} digits={} converted={} segments={}",
                        i + 1,
                        r.output,
                        r.tone_converted,
                        r.max_tone_digits,
                        r.total_converted,
                        r.segment_count
                    );
                }
            }
        }
        Command::Dump => print!("{dict}"),
        Command::Compile { output } => {
            dict.save_bincode(output)?;
            println!("Wrote {} keys to {}", dict.len(), output.display());
        }
        Command::Interactive => {
            let engine = Engine::new(Arc::new(dict)).with_config(config);
            interactive::run(engine)?;
        }
    }
    Ok(())
}
