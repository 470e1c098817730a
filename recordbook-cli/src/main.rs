use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use recordbook_core::config::Config;
use recordbook_core::core_store::store::{FileMap, RecordStore};
use recordbook_core::logging::{init_logging_with_config, LogConfig};
use recordbook_core::metrics::{init_metrics, Timer};
use recordbook_core::{CallContext, CallerId, RecordId, RecordPayload, StoreError};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "recordbook")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the record snapshot
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Identity issuing this call (falls back to RECORDBOOK_CALLER)
    #[arg(long)]
    caller: Option<String>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable JSON formatted logging
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List records created by the caller
    List,
    /// List every record
    ListAll,
    /// Show one of the caller's records
    Get { id: String },
    /// Print the caller identity
    Whoami,
    /// Show who created a record
    Creator { id: String },
    /// Create a record
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
    },
    /// Replace a record's title and attachment URL
    Update {
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
    },
    /// Delete one of the caller's records
    Delete { id: String },
    /// Find records whose title contains a keyword
    Search {
        #[arg(default_value = "")]
        keyword: String,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::List => "list",
            Command::ListAll => "list-all",
            Command::Get { .. } => "get",
            Command::Whoami => "whoami",
            Command::Creator { .. } => "creator",
            Command::Add { .. } => "add",
            Command::Update { .. } => "update",
            Command::Delete { .. } => "delete",
            Command::Search { .. } => "search",
        }
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    config.apply_env()?;

    if let Some(dir) = &args.data_dir {
        config.store.data_dir = dir.clone();
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.to_lowercase();
    }
    if args.json_logs {
        config.logging.json_format = true;
    }

    config.validate()?;
    Ok(config)
}

fn resolve_caller(args: &Args) -> Result<CallContext> {
    let raw = args
        .caller
        .clone()
        .or_else(|| std::env::var("RECORDBOOK_CALLER").ok())
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| anyhow!("no caller identity: pass --caller or set RECORDBOOK_CALLER"))?;
    Ok(CallContext::new(CallerId::new(raw)))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn dispatch(store: &mut RecordStore<FileMap>, ctx: &CallContext, command: Command) -> Result<()> {
    let caller = ctx.caller();
    match command {
        Command::List => print_json(&store.list_owned(caller)),
        Command::ListAll => print_json(&store.list_all()),
        Command::Get { id } => print_json(&store.get(&RecordId::new(id), caller)?),
        Command::Whoami => print_json(caller),
        Command::Creator { id } => print_json(&store.get_creator(&RecordId::new(id), caller)?),
        Command::Add { title, url } => {
            print_json(&store.add(RecordPayload::new(title, url), caller)?)
        }
        Command::Update { id, title, url } => print_json(&store.update(
            &RecordId::new(id),
            RecordPayload::new(title, url),
            caller,
        )?),
        Command::Delete { id } => print_json(&store.delete(&RecordId::new(id), caller)?),
        Command::Search { keyword } => print_json(&store.search(&keyword, caller)),
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;

    init_logging_with_config(LogConfig::from_config(&config.logging)?)?;
    init_metrics();

    let ctx = resolve_caller(&args)?;
    let command_name = args.command.name();
    debug!(caller = %ctx.caller(), command = command_name, "Dispatching call");

    let mut store = RecordStore::open(&config.store, config.access)?;

    let timer = Timer::new("store.operation.duration_ms");
    let result = dispatch(&mut store, &ctx, args.command);
    timer.stop();

    info!(command = command_name, ok = result.is_ok(), "Call finished");
    result
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<StoreError>() {
            // Store messages are printed verbatim; storage trouble gets its own code
            Some(err) => {
                eprintln!("{}", err);
                if err.is_logical() {
                    ExitCode::FAILURE
                } else {
                    ExitCode::from(2)
                }
            }
            None => {
                eprintln!("{:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}
