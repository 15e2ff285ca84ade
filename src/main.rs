//! `hconf` command-line tool.
//!
//! Loads haproxy-style configuration files and prints what was parsed.
//!
//! ```text
//! hconf dump /etc/haproxy/haproxy.cfg
//! hconf -s global -s listen get haproxy.cfg --section listen --index 1 --key server
//! hconf watch haproxy.cfg
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use hconf::config::{load_settings, ReloadEvent, Settings, SourceWatcher};
use hconf::observability::logging;
use hconf::{dump, ConfigStore};

#[derive(Parser)]
#[command(name = "hconf")]
#[command(about = "Inspect haproxy-style sectioned configuration files", long_about = None)]
struct Cli {
    /// Settings file (TOML).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Recognized section name; repeat for several. Replaces the settings list.
    #[arg(short, long = "section-name")]
    sections: Vec<String>,

    /// Log level, overriding the settings file.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every section and key
    Dump {
        files: Vec<PathBuf>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print one section instance
    Get {
        files: Vec<PathBuf>,
        #[arg(long)]
        section: String,
        #[arg(long, default_value_t = 0)]
        index: usize,
        /// Only print records of this key
        #[arg(long)]
        key: Option<String>,
    },
    /// Reload whenever a source file changes
    Watch { files: Vec<PathBuf> },
}

impl Commands {
    fn files(&self) -> &[PathBuf] {
        match self {
            Commands::Dump { files, .. } | Commands::Get { files, .. } | Commands::Watch { files } => {
                files
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };
    if !cli.sections.is_empty() {
        settings.sections = cli.sections.clone();
    }
    if let Some(level) = &cli.log_level {
        settings.observability.log_level = level.clone();
    }
    if !cli.command.files().is_empty() {
        settings.sources = cli.command.files().to_vec();
    }

    logging::init(&settings.observability.log_level);

    if settings.sources.is_empty() {
        return Err("no configuration files given".into());
    }

    let store = ConfigStore::with_sections(settings.sections.iter().cloned());
    store.load_file(settings.sources.iter().cloned())?;

    match cli.command {
        Commands::Dump { json, .. } => {
            let model = store.snapshot();
            if json {
                println!("{}", dump::render_json(&model)?);
            } else {
                print!("{}", dump::render_text(&model));
            }
        }
        Commands::Get {
            section,
            index,
            key,
            ..
        } => {
            let header = store.section_at(&section, index)?;
            let keys = store.key_table_at(&section, index)?;
            match key {
                Some(key) => {
                    for record in keys.get(&key).unwrap_or_default() {
                        println!("{}", record);
                    }
                }
                None => print!("{}", dump::render_instance(&header, &keys)),
            }
        }
        Commands::Watch { .. } => watch(Arc::new(store)).await?,
    }

    Ok(())
}

async fn watch(store: Arc<ConfigStore>) -> Result<(), Box<dyn std::error::Error>> {
    let (watcher, mut events) = SourceWatcher::new(store.clone());
    let _handle = watcher.run()?;

    tracing::info!("Watching for changes, press Ctrl-C to stop");
    loop {
        tokio::select! {
            Some(event) = events.recv() => match event {
                ReloadEvent::Reloaded => {
                    let sections = store.all_sections();
                    let instances: usize = sections.values().map(Vec::len).sum();
                    println!("reloaded: {} section names, {} instances", sections.len(), instances);
                }
                ReloadEvent::Failed(reason) => println!("reload failed: {}", reason),
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
