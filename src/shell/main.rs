mod terminal;

use attendance::shell::config::Config;
use attendance::shell::logging::init_tracing;
use attendance::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    let state = AppState::from_config(&config)?;
    tracing::info!(notice = ?config.notice_duration, "attendance terminal starting");

    terminal::run(state).await
}
