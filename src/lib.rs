pub mod config;
pub mod plugins;

use axum::Router;
use config::ServerConfig;
use eyre::Result;
use plugins::PluginContainer;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

pub fn app(config: &ServerConfig) -> Result<(PluginContainer, Router)> {
    let mut container = PluginContainer::new(plugins::registry(config));
    container.load()?;

    let router = Router::new()
        .merge(container.routes()?)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::new());

    Ok((container, router))
}
