use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, info};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

use zephyr::cli::{Cli, Commands};
use zephyr::config::Config;
use zephyr::domain::OperationRecord;
use zephyr::poller::{PollEvent, Poller};
use zephyr::source::{HttpSource, OperationSource};
use zephyr::tui::{self, App, TuiRunner};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("zephyr")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("zephyr.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"))
        .target(env_logger::Target::Pipe(target))
        .init();
    // Until the config is read, info is the ceiling unless RUST_LOG says otherwise
    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(LevelFilter::Info);
    }

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// Narrow logging to the configured level unless RUST_LOG is in charge
fn apply_log_level(config: &Config) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    if let Some(level) = config.log_level.as_deref() {
        match level.parse::<LevelFilter>() {
            Ok(filter) => log::set_max_level(filter),
            Err(_) => log::warn!("Ignoring unknown log_level '{}'", level),
        }
    }
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        None => run_tui(config).await,
        Some(Commands::Watch { count }) => handle_watch_command(*count, cli.is_verbose(), config).await,
        Some(Commands::Once) => handle_once_command(cli.is_verbose(), config).await,
        Some(Commands::Eval { a, op, b }) => handle_eval_command(*a, op, *b, cli.is_verbose(), config),
    }
}

fn build_source(config: &Config) -> Result<Arc<dyn OperationSource>> {
    let source = HttpSource::new(config.source.http_config()).context("Failed to create HTTP source")?;
    Ok(Arc::new(source))
}

async fn run_tui(config: &Config) -> Result<()> {
    info!("Launching TUI mode");
    let (poller, events) = Poller::new(build_source(config)?, config.poll.poller_config());
    let app = App::new(poller, config.tui.scroll_page_size);

    let terminal = tui::init_terminal().context("Failed to initialize terminal")?;
    let mut runner = TuiRunner::new(terminal, app, events, config.tui.tick_rate_ms);
    let result = runner.run().await;

    tui::restore_terminal().context("Failed to restore terminal")?;
    result
}

async fn handle_watch_command(count: Option<u64>, verbose: bool, config: &Config) -> Result<()> {
    info!("Watching {} (count: {:?})", config.source.url, count);
    let (mut poller, mut events) = Poller::new(build_source(config)?, config.poll.poller_config());

    if verbose {
        println!("{} {} as {}", "Polling".cyan(), config.source.url, poller.formatter());
    }
    poller.start();

    let outcome = print_events(&mut events, count, verbose, tokio::signal::ctrl_c()).await;

    poller.shutdown().await;
    outcome.map(|_| ()).context("Polling stopped")
}

/// Print published results until `count` is reached, the loop fails, or
/// `interrupt` resolves. Returns how many results were printed.
async fn print_events<F: Future>(
    events: &mut UnboundedReceiver<PollEvent>,
    count: Option<u64>,
    verbose: bool,
    interrupt: F,
) -> Result<u64> {
    tokio::pin!(interrupt);

    let mut received = 0u64;
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(PollEvent::Published(published)) => {
                    println!("{}", result_line(&published.record, &published.text, verbose));
                    received += 1;
                    if count.is_some_and(|n| received >= n) {
                        return Ok(received);
                    }
                }
                Some(PollEvent::Failed(message)) => return Err(eyre::eyre!(message)),
                None => return Ok(received),
            },
            _ = &mut interrupt => {
                info!("Interrupted");
                return Ok(received);
            }
        }
    }
}

async fn handle_once_command(verbose: bool, config: &Config) -> Result<()> {
    let source = build_source(config)?;
    let record = source.fetch().await.context("Failed to fetch operation")?;
    print_result(&record, verbose, config)
}

fn handle_eval_command(a: i32, op: &str, b: i32, verbose: bool, config: &Config) -> Result<()> {
    print_result(&OperationRecord::new(a, b, op), verbose, config)
}

fn print_result(record: &OperationRecord, verbose: bool, config: &Config) -> Result<()> {
    let value = record.evaluate().context(format!("Failed to evaluate {}", record))?;
    let text = config.poll.format.format(value);
    println!("{}", result_line(record, &text, verbose));
    Ok(())
}

/// Bare result, or `a op b = result` when verbose
fn result_line(record: &OperationRecord, text: &str, verbose: bool) -> String {
    if verbose {
        format!("{} {}", format!("{} =", record).dimmed(), text.green())
    } else {
        text.to_string()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref())
        .context("Failed to load configuration")?
        .with_overrides(cli.url.as_deref(), cli.interval_ms, cli.format);
    config.validate().context("Invalid configuration")?;
    apply_log_level(&config);

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
