use actix_web::{HttpResponse, web};

use crate::{
    chart::SvgChart,
    constants,
    form::HistoricalForm,
    model,
    page::DashboardPage,
    server::{AppState, html},
};

/// Fetches bars for the submitted pair and redraws the page with the chart.
///
/// A malformed pair or a failed fetch ends the request with the generic
/// error page; nothing is retried.
pub async fn submit_query(
    state: web::Data<AppState>,
    form: web::Form<HistoricalForm>,
) -> model::Result<HttpResponse> {
    let snapshot = form.into_inner();
    let (contract, query) = snapshot.to_request()?;

    log::info!(
        "historical query for {}.{}: end={:?} duration={} bar_size={} what_to_show={} use_rth={}",
        query.base_currency,
        query.quote_currency,
        query.end_datetime,
        query.duration,
        query.bar_size.as_str(),
        query.what_to_show.as_str(),
        query.use_rth
    );

    let candles = state.source.historical_data(&contract, &query).await?;
    log::info!("received {} bars for {}", candles.len(), snapshot.currency);

    let chart = SvgChart::new(constants::CHART_WIDTH, constants::CHART_HEIGHT)
        .render(&format!("Exchange Rate: {}", snapshot.currency), &candles);

    let page = DashboardPage {
        status: format!("Submitted query for {}", snapshot.currency),
        chart_svg: Some(chart),
        historical: snapshot,
        ..DashboardPage::default()
    };
    Ok(html(page.render()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};

    use crate::{
        model::{BarSize, Candle, WhatToShow},
        server::{
            configure,
            testing::{FakeSource, body_text, state_with},
        },
    };

    fn bars() -> Vec<Candle> {
        vec![
            Candle {
                date: "20240102".into(),
                open: 0.9000,
                high: 0.9100,
                low: 0.8950,
                close: 0.9050,
            },
            Candle {
                date: "20240103".into(),
                open: 0.9050,
                high: 0.9080,
                low: 0.8990,
                close: 0.9010,
            },
        ]
    }

    fn form(currency: &str, use_rth: &str) -> Vec<(&'static str, String)> {
        vec![
            ("currency", currency.to_string()),
            ("end_date", "20240105 12:00:00".to_string()),
            ("duration_num", "30".to_string()),
            ("duration_unit", "D".to_string()),
            ("bar_size", "1 hour".to_string()),
            ("what_to_show", "ASK".to_string()),
            ("use_rth", use_rth.to_string()),
        ]
    }

    #[actix_web::test]
    async fn renders_chart_and_status_for_pair() {
        let source = Arc::new(FakeSource {
            bars: bars(),
            ..FakeSource::default()
        });
        let app = test::init_service(
            App::new()
                .app_data(state_with(source.clone(), "hist_ok"))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/historical")
            .set_form(form("AUD.CAD", "Yes"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_text(resp).await;
        assert!(body.contains(r#"<div id="currency-output">Submitted query for AUD.CAD</div>"#));
        assert!(body.contains("Exchange Rate: AUD.CAD"));
        assert_eq!(body.matches(r#"class="wick""#).count(), 2);
        // Submitted values survive the round trip.
        assert!(body.contains(r#"<option value="1 hour" selected>"#));
        assert!(body.contains(r#"value="20240105 12:00:00""#));

        let seen = source.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (contract, query) = &seen[0];
        assert_eq!(contract.symbol, "AUD");
        assert_eq!(contract.currency, "CAD");
        assert_eq!(contract.sec_type, "CASH");
        assert_eq!(contract.exchange, "IDEALPRO");
        assert_eq!(query.end_datetime, "20240105 12:00:00");
        assert_eq!(query.duration, "30 D");
        assert_eq!(query.bar_size, BarSize::Hour1);
        assert_eq!(query.what_to_show, WhatToShow::Ask);
        assert!(query.use_rth);
    }

    #[actix_web::test]
    async fn rth_no_is_passed_as_false() {
        let source = Arc::new(FakeSource::default());
        let app = test::init_service(
            App::new()
                .app_data(state_with(source.clone(), "hist_rth"))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/historical")
            .set_form(form("EUR.USD", "No"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("No data"));

        assert!(!source.seen.lock().unwrap()[0].1.use_rth);
    }

    #[actix_web::test]
    async fn pair_without_separator_is_a_server_error() {
        let source = Arc::new(FakeSource::default());
        let app = test::init_service(
            App::new()
                .app_data(state_with(source.clone(), "hist_bad_pair"))
                .configure(configure),
        )
        .await;

        for pair in ["AUDCAD", ""] {
            let req = test::TestRequest::post()
                .uri("/historical")
                .set_form(form(pair, "Yes"))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert!(body_text(resp).await.contains("Internal Server Error"));
        }
        // Never reached the broker.
        assert!(source.seen.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn failed_fetch_is_a_server_error() {
        let source = Arc::new(FakeSource {
            fail_with: Some("gateway down".into()),
            ..FakeSource::default()
        });
        let app = test::init_service(
            App::new()
                .app_data(state_with(source, "hist_fail"))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/historical")
            .set_form(form("AUD.CAD", "Yes"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body_text(resp).await.contains("gateway down"));
    }

    #[actix_web::test]
    async fn unknown_bar_size_is_a_server_error() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(Arc::new(FakeSource::default()), "hist_bar"))
                .configure(configure),
        )
        .await;

        let mut fields = form("AUD.CAD", "Yes");
        fields[4].1 = "7 mins".into();
        let req = test::TestRequest::post()
            .uri("/historical")
            .set_form(fields)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
