use account_registry::{
    app,
    config::{LogFormat, ServerConfig},
};
use dotenv_flow::dotenv_flow;
use eyre::Result;
use std::{fs::OpenOptions, sync::Mutex};
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::{
    filter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer, Registry,
};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> Result<()> {
    // Load dotenv-flow variables
    dotenv_flow().ok();

    let config = ServerConfig::from_env()?;

    // Enable logging
    config_tracing(&config)?;

    // Load plugins, seeding the account registry
    let (mut plugin_container, router) = app(&config)?;

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutting down gracefully");
    plugin_container.unload()?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn config_tracing(config: &ServerConfig) -> Result<()> {
    // Console output is always on; a log file receives a copy.
    let mut layers = vec![format_layer(config.log_format, std::io::stdout, true)];
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        layers.push(format_layer(config.log_format, Mutex::new(file), false));
    }

    let filter = filter::Targets::new()
        .with_target("hyper::proto", Level::INFO)
        .with_target("tower_http::trace", Level::DEBUG)
        .with_default(config.log_level);

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .init();

    Ok(())
}

fn format_layer<W>(format: LogFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
        LogFormat::Text => fmt::layer().with_ansi(ansi).with_writer(writer).boxed(),
    }
}
