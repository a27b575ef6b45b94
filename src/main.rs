use glucoplay::app::App;
use glucoplay::config::GameConfig;
use glucoplay::error::{is_recoverable, user_friendly_message};
use glucoplay::{Result, APP_NAME, LOG_FILE};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = match GameConfig::load() {
        Ok(config) => config,
        Err(e) if is_recoverable(&e) => {
            tracing::warn!(error = %e, "falling back to default configuration");
            eprintln!("{}", user_friendly_message(&e));
            GameConfig::default()
        }
        Err(e) => return Err(e),
    };
    tracing::info!(seed = ?config.seed, frame_ms = config.frame_interval.as_millis() as u64, "starting");

    let outcome = run(config).await;
    if let Err(e) = &outcome {
        tracing::error!(error = %e, "application error");
        eprintln!("{}", user_friendly_message(e));
    }
    outcome
}

/// Set up the terminal and play until the player quits
///
/// The app is dropped before returning so the terminal is restored
/// before any error is printed.
async fn run(config: GameConfig) -> Result<()> {
    let mut app = App::new(config)?;
    app.init()?;
    app.run().await
}

/// File logging; the terminal belongs to the TUI
fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_NAME);
    if std::fs::create_dir_all(&log_dir).is_err() {
        return;
    }

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the writer alive for the whole program
    Box::leak(Box::new(guard));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glucoplay=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .init();
}
