/// Main entry point for the habit store MCP server
///
/// This file sets up logging, parses command line arguments, opens the
/// snapshot storage, and starts the MCP server. Requests arrive as JSON-RPC
/// over stdin/stdout; logs go to stderr.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use habit_store::{CompletionPolicy, HabitTrackerServer, StorageBackend};

/// Pick a writable data directory, falling back through the usual locations
fn get_default_data_path(backend: StorageBackend) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let file_name = match backend {
        StorageBackend::Sqlite => "habits.db",
        StorageBackend::Json => "habits.json",
    };

    let potential_paths = [
        dirs::home_dir().map(|p| p.join(".habit_store")),
        dirs::data_dir().map(|p| p.join("habit_store")),
        dirs::config_dir().map(|p| p.join("habit_store")),
        std::env::current_dir().ok().map(|p| p.join(".habit_store")),
    ];

    for dir in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(dir).is_err() {
            continue;
        }
        let marker = dir.join(".write_check");
        if std::fs::write(&marker, b"ok").is_ok() {
            let _ = std::fs::remove_file(&marker);
            return Ok(dir.join(file_name));
        }
    }

    let temp_dir = std::env::temp_dir().join("habit_store");
    std::fs::create_dir_all(&temp_dir)?;

    tracing::warn!("Using temporary directory for habit data: {}", temp_dir.display());
    Ok(temp_dir.join(file_name))
}

/// Command line arguments for the habit store server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the data file. If not provided, a default location in the
    /// user's home directory is used
    #[arg(long, env = "HABIT_STORE_DATA")]
    data: Option<PathBuf>,

    /// Storage backend: sqlite or json. Defaults to json for `.json` paths,
    /// sqlite otherwise
    #[arg(long)]
    backend: Option<StorageBackend>,

    /// Which habits count toward a day's completion: active, recorded or hybrid
    #[arg(long, default_value_t = CompletionPolicy::default())]
    policy: CompletionPolicy,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_store={}", log_level))
        .with_writer(std::io::stderr) // stdout carries the protocol
        .init();

    info!("Starting habit store MCP server");

    let (data_path, backend) = match args.data {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let backend = args.backend.unwrap_or_else(|| StorageBackend::from_path(&path));
            (path, backend)
        }
        None => {
            let backend = args.backend.unwrap_or(StorageBackend::Sqlite);
            (get_default_data_path(backend)?, backend)
        }
    };

    info!(
        "Using {} storage at {} with {} completion policy",
        backend,
        data_path.display(),
        args.policy
    );

    let storage = backend.open(&data_path)?;
    let server = HabitTrackerServer::new(storage, args.policy)?;

    server.run().await?;

    info!("Habit store MCP server shutdown complete");
    Ok(())
}
