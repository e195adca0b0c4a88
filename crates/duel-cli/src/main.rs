//! `dbduel` - drive a DatabaseDuel session from the command line

mod logging;
mod render;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use duel_core::{
    DashboardConfig, DashboardSession, FixedLatencySimulator, SleepingSimulator, TimingSimulator,
};
use duel_loader::{DatasetLoader, UploadedFile};
use logging::{init_logging, LogFormat};
use std::path::PathBuf;
use std::sync::Arc;

fn cli() -> Command {
    Command::new("dbduel")
        .version(duel_core::VERSION)
        .about("DatabaseDuel - compare simulated database performance")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file (.toml, .yaml or .yml)"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .default_value("pretty")
                .value_parser(["pretty", "json"])
                .help("Log output format (logs go to stderr)"),
        )
        .subcommand(
            Command::new("show")
                .about("Run one session and print the dashboard")
                .arg(
                    Arg::new("select")
                        .long("select")
                        .short('s')
                        .action(ArgAction::Append)
                        .help("Backend to compare (repeatable; replaces the default selection)"),
                )
                .arg(
                    Arg::new("add")
                        .long("add")
                        .short('a')
                        .action(ArgAction::Append)
                        .help("Backend name to register before selecting (repeatable)"),
                )
                .arg(
                    Arg::new("upload")
                        .long("upload")
                        .short('u')
                        .value_parser(value_parser!(PathBuf))
                        .help("Tabular file to upload (csv, json, parquet, xlsx, xls, ods)"),
                )
                .arg(
                    Arg::new("measure")
                        .long("measure")
                        .action(ArgAction::SetTrue)
                        .help("Sleep the simulated latencies and report measured times"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(Command::new("formats").about("List supported upload extensions"))
        .subcommand(Command::new("config").about("Print the effective configuration as TOML"))
}

fn load_config(matches: &ArgMatches) -> Result<DashboardConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => DashboardConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(DashboardConfig::default()),
    }
}

async fn run_show(config: DashboardConfig, args: &ArgMatches) -> Result<()> {
    let simulator: Arc<dyn TimingSimulator> = if args.get_flag("measure") {
        Arc::new(SleepingSimulator::new(config.simulator.clone()))
    } else {
        Arc::new(FixedLatencySimulator::new(config.simulator.clone()))
    };
    let loader = DatasetLoader::new()
        .with_max_upload_bytes(config.max_upload_bytes)
        .with_cache_capacity(config.parse_cache_capacity);
    let mut session = DashboardSession::with_parts(config, simulator, loader)?;

    if let Some(names) = args.get_many::<String>("add") {
        for name in names {
            session.on_add_backend(name);
        }
    }
    if let Some(names) = args.get_many::<String>("select") {
        session.select(names.cloned());
    }
    let upload = args.get_one::<PathBuf>("upload").map(UploadedFile::from_path);
    if upload.is_some() {
        session.on_upload(upload).await;
    }

    // The sleeping simulator blocks while aggregating
    let snapshot = tokio::task::block_in_place(|| session.snapshot());

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render::render_text(&snapshot));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    let format = matches
        .get_one::<String>("log-format")
        .map_or(Ok(LogFormat::Pretty), |raw| LogFormat::parse(raw))?;
    init_logging(format)?;

    let config = load_config(&matches)?;

    match matches.subcommand() {
        Some(("show", args)) => run_show(config, args).await?,
        Some(("formats", _)) => {
            for extension in DatasetLoader::new().supported_extensions() {
                println!("{extension}");
            }
        }
        Some(("config", _)) => print!("{}", config.to_toml()?),
        _ => {}
    }
    Ok(())
}
