use std::sync::Arc;

mod command;
mod config;
mod handler;
mod logger;
mod response;
mod routes;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    // Build the Tokio runtime, sizing the thread pool from config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    // Bind failure is fatal; there is no retry
    let listener = server::create_reusable_listener(addr)?;

    let state = Arc::new(config::AppState::new(cfg)?);

    let signals = Arc::new(server::signal::SignalHandler::new());
    server::signal::start_signal_handler(Arc::clone(&signals));

    logger::log_server_start(&addr, &state.config);

    server::run(listener, state, signals).await
}
