mod config;
mod error;
mod html;
mod routes;

use std::sync::Arc;

use tickview_core::{
    DashboardSession, MarketDataSource, MockAdapter, ReqwestHttpClient, YahooAdapter,
};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LogFormat};
use crate::routes::{app_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let source: Arc<dyn MarketDataSource> = if config.mock {
        Arc::new(MockAdapter::default())
    } else {
        let http_client = ReqwestHttpClient::with_timeout_ms(config.timeout_ms)?;
        Arc::new(YahooAdapter::new(Arc::new(http_client)).with_timeout_ms(config.timeout_ms))
    };
    let state = AppState {
        session: DashboardSession::new(source),
    };

    info!(addr = %config.listen_addr, mock = config.mock, "listening");
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app_router(state)).await?;
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}
