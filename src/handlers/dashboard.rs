use actix_web::HttpResponse;

use crate::{page::DashboardPage, server::html};

/// Serves the dashboard with its default values.
pub async fn index() -> HttpResponse {
    html(DashboardPage::default().render())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test};

    use crate::server::{
        configure,
        testing::{FakeSource, body_text, state_with},
    };

    #[actix_web::test]
    async fn index_renders_both_sections() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(Arc::new(FakeSource::default()), "index"))
                .configure(configure),
        )
        .await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert!(resp.status().is_success());

        let body = body_text(resp).await;
        assert!(body.contains("Section 1: Fetch &amp; Display exchange rate historical data"));
        assert!(body.contains("Make a Trade"));
        assert!(body.contains("Enter a currency code"));
        assert!(body.contains(r#"action="/historical""#));
        assert!(body.contains(r#"action="/trade""#));
    }
}
