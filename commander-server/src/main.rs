use clap::Parser;
use commander_core::ticker::TickHandle;
use commander_core::{logging, Result};
use commander_server::config::Config;
use commander_server::routes;
use commander_server::state::AppState;
use commander_server::walkthrough;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    if let Err(err) = logging::init() {
        eprintln!("{err}");
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("commander-server failed: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<()> {
    let state = AppState::builtin()?;

    if config.demo {
        print!("{}", walkthrough::render(state.catalog.clone()));
        return Ok(());
    }

    let board = state.clone();
    let ticker = TickHandle::spawn(config.tick_interval(), move |_| {
        board.tick();
    });

    let app = routes::router(state);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("commander-server listening on {}", listener.local_addr()?);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    let ticker_clean = ticker.stop().await;
    info!(ticker_clean, "commander-server stopped");
    Ok(served?)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
}
