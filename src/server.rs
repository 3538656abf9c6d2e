use std::sync::Arc;

use actix_web::{
    HttpResponse, ResponseError,
    error::InternalError,
    http::{StatusCode, header::ContentType},
    web,
};

use crate::{
    broker::source::HistoricalDataSource,
    handlers::{dashboard, historical_data, trade},
    model::DashboardError,
    page,
    store::trade_order::TradeOrderStore,
};

/// Shared by every worker. Holds no per-user state.
pub struct AppState {
    pub source: Arc<dyn HistoricalDataSource>,
    pub store: TradeOrderStore,
}

pub fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

fn server_error() -> HttpResponse {
    HttpResponse::InternalServerError()
        .content_type(ContentType::html())
        .body(page::error_page())
}

impl ResponseError for DashboardError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        log::error!("request failed: {}", self);
        server_error()
    }
}

/// Registers the dashboard routes. Unreadable form bodies get the same
/// generic error page as handler failures.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(|err, req| {
        log::error!("bad form posted to {}: {}", req.path(), err);
        InternalError::from_response(err, server_error()).into()
    }))
    .route("/", web::get().to(dashboard::index))
    .route("/historical", web::post().to(historical_data::submit_query))
    .route("/trade", web::post().to(trade::submit_trade));
}
