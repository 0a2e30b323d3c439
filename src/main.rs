//! Binary entrypoint for the Rollkit CLI.
//!
//! Commands:
//! - `init` - write a starter `config.toml` and a world file with one GM
//! - `run [--as <who>] [--player-id <id>]` - start up, then route chat events read from stdin
//! - `check` - run the startup settings correction only
//! - `status` - list every setting with its stored value and validity
//!
//! `run` accepts one event per line: either host JSON
//! (`{"type":"api","content":"!apiCall --help","who":"Alice (GM)","playerid":"p1"}`)
//! or bare command text, which is sent as an API event from the `--as` player.
//!
//! See the library crate docs for module‑level details: `rollkit::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

use rollkit::api::Extension;
use rollkit::config::Config;
use rollkit::host::memory::MemoryHost;
use rollkit::host::ChatEvent;
use rollkit::logutil::escape_log;
use rollkit::state::file::JsonStateFile;
use rollkit::state::{StateRegistry, StateStore};

#[derive(Parser)]
#[command(name = "rollkit")]
#[command(about = "Chat command and settings extension for virtual tabletops")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration and world file
    Init,
    /// Start up and route chat events from stdin
    Run {
        /// Speaker for bare command lines
        #[arg(long = "as", default_value = "GM (GM)")]
        who: String,
        /// Player id for bare command lines
        #[arg(long, default_value = "gm")]
        player_id: String,
    },
    /// Repair missing or invalid settings and exit
    Check,
    /// Show every setting with its stored value
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            init_logging(&None, cli.verbose);
            if Path::new(&cli.config).exists() {
                warn!("{} already exists; leaving it untouched", cli.config);
                return Ok(());
            }
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
            let cfg = Config::load(&cli.config).await?;
            if let Some(world) = &cfg.storage.world_file {
                let host = MemoryHost::new().with_player("gm", "GM", true, true);
                host.save(Path::new(world))?;
                info!("Seeded world file at {}", world);
            }
        }
        Commands::Run { who, player_id } => {
            let config = Config::load(&cli.config).await?;
            init_logging(&Some(config.clone()), cli.verbose);
            info!("Starting Rollkit v{}", env!("CARGO_PKG_VERSION"));
            let mut ext = build_extension(&config)?;
            let report = ext.startup();
            debug!("startup: {:?}", report);
            flush_chat(&mut ext);

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let event = if line.starts_with('{') {
                    match serde_json::from_str::<ChatEvent>(line) {
                        Ok(ev) => ev,
                        Err(e) => {
                            warn!("Skipping malformed event '{}': {}", escape_log(line), e);
                            continue;
                        }
                    }
                } else {
                    ChatEvent::api(line, &who, &player_id)
                };
                let route = ext.handle_event(&event);
                debug!("route: {:?}", route);
                flush_chat(&mut ext);
            }
            save_world(&config, ext.host())?;
            info!("Input closed; shutting down");
        }
        Commands::Check => {
            let config = Config::load(&cli.config).await?;
            init_logging(&Some(config.clone()), cli.verbose);
            let mut ext = build_extension(&config)?;
            let corrections = ext.correct_state();
            flush_chat(&mut ext);
            println!("{} setting(s) corrected", corrections.len());
            for c in corrections {
                println!(
                    "  {}: {} -> {}",
                    c.name,
                    c.old.as_deref().unwrap_or("undefined"),
                    c.new
                );
            }
        }
        Commands::Status => {
            let config = Config::load(&cli.config).await?;
            init_logging(&Some(config.clone()), cli.verbose);
            let ext = build_extension(&config)?;
            println!(
                "{} ({}) state in {}",
                config.extension.name, config.extension.invocation, config.storage.state_file
            );
            for spec in ext.registry().iter() {
                let value = ext.store().get(spec.name);
                let verdict = match value.as_deref() {
                    None => "unset",
                    Some(v) if spec.is_acceptable(v) => "ok",
                    Some(_) if spec.ignore => "custom",
                    Some(_) => "invalid",
                };
                println!(
                    "  {:<16} {:<10} [{}] default={}{}",
                    spec.name,
                    value.as_deref().unwrap_or("-"),
                    verdict,
                    spec.default_or_true(),
                    if spec.hide { " (hidden)" } else { "" }
                );
            }
        }
    }

    Ok(())
}

fn build_extension(config: &Config) -> Result<Extension<MemoryHost>> {
    let registry = StateRegistry::builtin()?;
    let container = JsonStateFile::open(&config.storage.state_file)?;
    let store = StateStore::new(&config.extension.state_namespace, Box::new(container));
    let host = match &config.storage.world_file {
        Some(path) => MemoryHost::load(Path::new(path))?,
        None => MemoryHost::new(),
    };
    Ok(Extension::new(&config.extension, registry, store, host).with_macros(config.macros.clone()))
}

fn save_world(config: &Config, host: &MemoryHost) -> Result<()> {
    if let Some(path) = &config.storage.world_file {
        host.save(Path::new(path))?;
    }
    Ok(())
}

/// Print chat produced so far as `speaker: text` lines.
fn flush_chat(ext: &mut Extension<MemoryHost>) {
    for (speaker, text) in ext.host_mut().take_outbox() {
        println!("{}: {}", speaker, text);
    }
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    let configured = config
        .as_ref()
        .and_then(|c| c.logging.level.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Info);
    let level = match verbosity {
        0 => configured,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);

    let log_file = config
        .as_ref()
        .and_then(|c| c.logging.file.as_ref())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

    match log_file {
        Some(f) => {
            let file = std::sync::Arc::new(std::sync::Mutex::new(f));
            // Logs go to stderr; mirror there only when someone is watching.
            let is_tty = atty::is(atty::Stream::Stderr);
            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());
                if let Ok(mut guard) = file.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        }
        None => {
            builder.format(|fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
            });
        }
    }
    let _ = builder.try_init();
}
