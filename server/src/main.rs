use pantry_server::{seed, telemetry, AppState, Config};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init();

    let config = Config::load()?;
    let state = AppState::connect(&config).await?;
    if config.seed_sample_data {
        seed::seed_sample_data(&state).await?;
    }

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, mode = %state.reconciler.mode(), "listening");
    pantry_server::run(listener, state).await?;

    info!("server stopped");
    Ok(())
}
