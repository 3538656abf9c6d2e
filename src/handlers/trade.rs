use actix_web::{HttpResponse, web};

use crate::{
    form::TradeForm,
    model,
    page::DashboardPage,
    server::{AppState, html},
};

/// Records the submitted order, replacing whatever order was on file.
pub async fn submit_trade(
    state: web::Data<AppState>,
    form: web::Form<TradeForm>,
) -> model::Result<HttpResponse> {
    let snapshot = form.into_inner();
    let trade = snapshot.to_trade_request()?;

    state.store.replace(&trade).await?;

    let msg = trade.confirmation();
    log::info!(
        "trade submitted: {} (written to {})",
        msg,
        state.store.path().display()
    );

    let page = DashboardPage {
        trade: snapshot,
        trade_output: Some(msg),
        ..DashboardPage::default()
    };
    Ok(html(page.render()))
}
