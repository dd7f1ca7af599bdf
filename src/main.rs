//! # Mystic Oracle Main Entry Point
//!
//! Parses arguments, sets up logging and the oracle client, and runs the
//! terminal game loop.

use clap::Parser;
use log::{error, info};
use mystic_oracle::{
    check_connection, ConnectionReport, ConnectionStatus, GameRules, GeminiClient, Hint,
    HintProvider, OracleConfig, OracleError, OracleResult, SceneCommand, SceneManager, UI,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::{JoinError, JoinHandle};

type Oracle = Arc<HintProvider<GeminiClient>>;

/// Command line arguments for the Mystic Oracle.
#[derive(Parser, Debug)]
#[command(name = "mystic-oracle")]
#[command(about = "Guess the secret number while an LLM oracle whispers hints")]
#[command(version)]
struct Args {
    /// Random seed for target selection
    #[arg(short, long)]
    seed: Option<u64>,

    /// Model identifier sent to the text-generation API
    #[arg(short, long)]
    model: Option<String>,

    /// Base URL of the text-generation API
    #[arg(long)]
    endpoint: Option<String>,

    /// Lose the round after this many wrong guesses
    #[arg(long)]
    max_guesses: Option<usize>,

    /// Check the API connection and exit
    #[arg(long)]
    test_connection: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> OracleResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;

    info!("Starting Mystic Oracle v{}", mystic_oracle::VERSION);

    let config = OracleConfig::from_env()
        .with_model(args.model.clone())
        .with_endpoint(args.endpoint.clone());
    config.validate()?;

    let provider: Oracle = Arc::new(HintProvider::new(
        GeminiClient::new(&config),
        config.model.clone(),
    ));

    if args.test_connection {
        return run_connection_test(&provider).await;
    }

    let mut rules = GameRules::default();
    if let Some(limit) = args.max_guesses {
        rules = rules.with_max_guesses(limit)?;
    }

    run_game(&args, rules, provider).await
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> OracleResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        use tracing::Level;

        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| OracleError::InvalidConfig(format!("logging: {}", e)))?;
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .try_init()
            .map_err(|e| OracleError::InvalidConfig(format!("logging: {}", e)))?;
    }

    Ok(())
}

/// Runs the connection check once and prints the result.
async fn run_connection_test(provider: &Oracle) -> OracleResult<()> {
    println!("Testing connection to {}...", provider.model());
    let report = check_connection(provider.as_ref()).await;
    println!("{}", UI::new().connection_panel(&report));
    Ok(())
}

/// Waits on an optional task; never resolves when there is none.
async fn wait_for<T>(task: &mut Option<JoinHandle<T>>) -> Result<T, JoinError> {
    match task {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    }
}

/// Hands a finished hint task to the scene; a crashed task yields the fallback.
fn finish_hint_task<R: Rng>(scenes: &mut SceneManager<R>, result: Result<Hint, JoinError>) {
    let hint = result.unwrap_or_else(|e| {
        error!("Hint task failed: {}", e);
        Hint::fallback()
    });
    scenes.finish_hint(hint);
}

/// Hands a finished connection check to the scene.
fn finish_check_task<R: Rng>(
    scenes: &mut SceneManager<R>,
    result: Result<ConnectionReport, JoinError>,
) {
    let report = result.unwrap_or_else(|e| {
        error!("Connection test task failed: {}", e);
        ConnectionReport {
            status: ConnectionStatus::Error,
            message: format!("Connection test failed: {}", e),
        }
    });
    scenes.show_connection_report(&report);
}

/// Waits for any in-flight hint or connection check so its result is shown.
async fn settle_pending<R: Rng>(
    scenes: &mut SceneManager<R>,
    pending_hint: &mut Option<JoinHandle<Hint>>,
    pending_check: &mut Option<JoinHandle<ConnectionReport>>,
) {
    if let Some(handle) = pending_hint.take() {
        info!("Waiting for the oracle before exiting");
        finish_hint_task(scenes, handle.await);
    }
    if let Some(handle) = pending_check.take() {
        finish_check_task(scenes, handle.await);
    }
}

/// Runs the terminal game loop until the player quits or input ends.
async fn run_game(args: &Args, rules: GameRules, provider: Oracle) -> OracleResult<()> {
    let rng = match args.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let mut scenes = SceneManager::new(rules, rng);
    let mut stdout = std::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending_hint: Option<JoinHandle<Hint>> = None;
    let mut pending_check: Option<JoinHandle<ConnectionReport>> = None;

    scenes.render(&mut stdout)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed");
                    settle_pending(&mut scenes, &mut pending_hint, &mut pending_check).await;
                    scenes.render(&mut stdout)?;
                    break;
                };
                match scenes.handle_line(&line) {
                    SceneCommand::Quit => {
                        info!("Player quit the game");
                        break;
                    }
                    SceneCommand::RequestHint(request) => {
                        let provider = Arc::clone(&provider);
                        pending_hint = Some(tokio::spawn(async move {
                            provider.get_hint(&request).await
                        }));
                    }
                    SceneCommand::TestConnection => {
                        let provider = Arc::clone(&provider);
                        pending_check = Some(tokio::spawn(async move {
                            check_connection(provider.as_ref()).await
                        }));
                    }
                    SceneCommand::None => {}
                }
            }
            result = wait_for(&mut pending_hint) => {
                pending_hint = None;
                finish_hint_task(&mut scenes, result);
            }
            result = wait_for(&mut pending_check) => {
                pending_check = None;
                finish_check_task(&mut scenes, result);
            }
        }

        scenes.render(&mut stdout)?;
    }

    println!();
    Ok(())
}
