// Broker gateway access.
mod broker {
    // Gateway HTTP client.
    pub mod api_caller;
    // Response structures returned by the gateway.
    pub mod response;
    // Historical data capability used by the handlers.
    pub mod source;
}
// HTTP client module.
mod http {
    // HTTP client implementation.
    pub mod client;
}
// Request handlers, one per page action.
mod handlers {
    pub mod dashboard;
    pub mod historical_data;
    pub mod trade;
}
// Persistence of the last trade order.
mod store {
    /// Single-file trade order storage.
    pub mod trade_order;
}
// Candlestick chart rendering.
mod chart;
// module storing defaults
mod constants;
// Form snapshots.
mod form;
// Data models.
mod model;
// HTML layout.
mod page;
// App state and routing.
mod server;

use std::{sync::Arc, time::Duration};

use actix_web::{App, HttpServer, middleware::Logger, web};
use clap::Parser;
use dotenv::dotenv;
use url::Url;

use broker::api_caller::GatewayClient;
use server::AppState;
use store::trade_order::TradeOrderStore;

// Command-line arguments, each with an environment fallback.
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "FX_DASHBOARD_HOST", default_value = constants::DEFAULT_HOST)]
    host: String,
    /// Port to listen on.
    #[arg(long, env = "FX_DASHBOARD_PORT", default_value_t = constants::DEFAULT_PORT)]
    port: u16,
    /// Base URL of the broker gateway.
    #[arg(long, env = "FX_GATEWAY_URL", default_value = constants::DEFAULT_GATEWAY_URL)]
    gateway_url: String,
    /// File the last trade order is written to.
    #[arg(long, env = "FX_TRADE_ORDER_PATH", default_value = constants::DEFAULT_TRADE_ORDER_PATH)]
    trade_order_path: String,
    /// Timeout for each gateway request, in seconds.
    #[arg(long, env = "FX_REQUEST_TIMEOUT_SECS", default_value_t = constants::DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,
}

#[actix_web::main]
// Main function entry point.
async fn main() {
    dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(err) = run(args).await {
        log::error!("dashboard stopped: {}", err);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let gateway_url = Url::parse(&args.gateway_url)
        .map_err(|e| format!("invalid gateway url {:?}: {}", args.gateway_url, e))?;
    let gateway = GatewayClient::new(gateway_url, Duration::from_secs(args.request_timeout_secs))?;
    log::info!("using broker gateway at {}", gateway.base_url());

    let store = TradeOrderStore::new(&args.trade_order_path);
    match store.load().await {
        Ok(Some(last)) => log::info!("last trade order on file: {}", last.confirmation()),
        Ok(None) => log::info!("no trade order on file yet"),
        Err(err) => log::warn!("existing trade order is unreadable: {}", err),
    }

    let state = web::Data::new(AppState {
        source: Arc::new(gateway),
        store,
    });

    log::info!("listening on http://{}:{}/", args.host, args.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(server::configure)
    })
    .bind((args.host.as_str(), args.port))?
    .run()
    .await?;

    Ok(())
}
