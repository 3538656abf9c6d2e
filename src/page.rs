use std::fmt::Write;

use crate::{
    constants,
    form::{HistoricalForm, TradeForm},
    model::{BarSize, DurationUnit, TradeAction, WhatToShow},
};

/// Escapes text for use in HTML bodies and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Everything needed to draw the dashboard once.
#[derive(Debug, Clone)]
pub struct DashboardPage {
    pub historical: HistoricalForm,
    pub trade: TradeForm,
    pub status: String,
    pub chart_svg: Option<String>,
    pub trade_output: Option<String>,
}

impl Default for DashboardPage {
    fn default() -> Self {
        DashboardPage {
            historical: HistoricalForm::default(),
            trade: TradeForm::default(),
            status: constants::INITIAL_STATUS.into(),
            chart_svg: None,
            trade_output: None,
        }
    }
}

fn checked(on: bool) -> &'static str {
    if on { " checked" } else { "" }
}

fn selected(on: bool) -> &'static str {
    if on { " selected" } else { "" }
}

impl DashboardPage {
    pub fn render(&self) -> String {
        let h = &self.historical;
        let mut html = String::with_capacity(8 * 1024);

        html.push_str(
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>FX Dashboard</title></head><body>\n",
        );

        html.push_str("<h3>Section 1: Fetch &amp; Display exchange rate historical data</h3>\n");
        let _ = writeln!(
            html,
            r#"<p>See the various currency pairs here: <a href="{}">currency pairs</a></p>"#,
            escape(constants::FX_PAIRS_URL)
        );

        html.push_str(r#"<form id="historical-form" method="post" action="/historical">"#);
        let _ = writeln!(
            html,
            r#"<div style="display: inline-block">Input Currency: <input id="currency-input" name="currency" type="text" value="{}"></div><br>"#,
            escape(&h.currency)
        );
        let _ = writeln!(
            html,
            r#"<div id="currency-output">{}</div><br>"#,
            escape(&self.status)
        );
        let _ = writeln!(
            html,
            r#"<div>End Date in YYYYMMDD HH:MM:SS Format:<input id="end-date" name="end_date" type="text" value="{}"></div><br>"#,
            escape(&h.end_date)
        );
        let _ = writeln!(
            html,
            r#"<div>Duration:<input id="duration-num" name="duration_num" type="number" value="{}"></div>"#,
            escape(&h.duration_num)
        );
        html.push_str(r#"<div id="duration-unit">"#);
        for unit in DurationUnit::ALL {
            let _ = write!(
                html,
                r#"<label><input type="radio" name="duration_unit" value="{v}"{}>{v}</label>"#,
                checked(unit == h.duration_unit),
                v = unit.as_str()
            );
        }
        html.push_str("</div><br>\n");

        html.push_str(r#"<div>Bar Size:<select id="bar-size" name="bar_size">"#);
        for size in BarSize::ALL {
            let _ = write!(
                html,
                r#"<option value="{v}"{}>{v}</option>"#,
                selected(size == h.bar_size),
                v = size.as_str()
            );
        }
        html.push_str("</select></div><br>\n");

        html.push_str(r#"<div>What to Show:<select id="what-to-show" name="what_to_show">"#);
        for kind in WhatToShow::ALL {
            let _ = write!(
                html,
                r#"<option value="{v}"{}>{v}</option>"#,
                selected(kind == h.what_to_show),
                v = kind.as_str()
            );
        }
        html.push_str("</select></div><br>\n");

        html.push_str(
            r#"<div id="use-RTH">Retrieve Data Only From Regular Trading Hours?:"#,
        );
        for label in [constants::RTH_YES, constants::RTH_NO] {
            let _ = write!(
                html,
                r#"<label><input type="radio" name="use_rth" value="{v}"{}>{v}</label>"#,
                checked(h.use_rth == label),
                v = label
            );
        }
        html.push_str("</div><br>\n");
        html.push_str(
            "<button id=\"submit-button\" type=\"submit\">Submit</button>\n</form><br>\n",
        );

        html.push_str(r#"<div id="candlestick-graph">"#);
        if let Some(svg) = &self.chart_svg {
            html.push_str(svg);
        }
        html.push_str("</div><br>\n");

        html.push_str("<h6>Make a Trade</h6>\n");
        let _ = writeln!(
            html,
            r#"<div id="trade-output">{}</div>"#,
            escape(self.trade_output.as_deref().unwrap_or(""))
        );
        html.push_str(r#"<form id="trade-form" method="post" action="/trade">"#);
        html.push_str(r#"<div id="buy-or-sell">"#);
        for action in TradeAction::ALL {
            let _ = write!(
                html,
                r#"<label><input type="radio" name="action" value="{v}"{}>{v}</label>"#,
                checked(action == self.trade.action),
                v = action.as_str()
            );
        }
        html.push_str("</div>\n");
        let _ = writeln!(
            html,
            r#"<input id="trade-currency" name="trade_currency" type="text" value="{}">"#,
            escape(&self.trade.trade_currency)
        );
        let _ = writeln!(
            html,
            r#"<input id="trade-amt" name="trade_amt" type="number" value="{}">"#,
            escape(&self.trade.trade_amt)
        );
        html.push_str("<button id=\"trade-button\" type=\"submit\">Trade</button>\n</form>\n");

        html.push_str("</body></html>\n");
        html
    }
}

/// Body of the generic error page. Carries no detail about the failure.
pub fn error_page() -> String {
    "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>500 Internal Server Error</title></head>\
     <body><h1>Internal Server Error</h1><p>The server encountered an internal error and was unable to complete your request.</p></body></html>\n"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn initial_page_shows_defaults() {
        let html = DashboardPage::default().render();
        assert!(html.contains(r#"name="currency" type="text" value="AUD.CAD""#));
        assert!(html.contains(r#"<div id="currency-output">Enter a currency code</div>"#));
        assert!(html.contains(r#"name="duration_num" type="number" value="30""#));
        assert!(html.contains(r#"value="D" checked"#));
        assert!(html.contains(r#"<option value="1 day" selected>"#));
        assert!(html.contains(r#"<option value="MIDPOINT" selected>"#));
        assert!(html.contains(r#"name="use_rth" value="Yes" checked"#));
        assert!(html.contains(r#"name="action" value="BUY" checked"#));
        assert!(html.contains(r#"value="AUDCAD""#));
        assert!(html.contains(r#"value="20000""#));
        assert!(html.contains(r#"<div id="trade-output"></div>"#));
    }

    #[test]
    fn submitted_values_are_echoed_escaped() {
        let page = DashboardPage {
            historical: HistoricalForm {
                currency: r#"EUR.USD"><script>"#.into(),
                ..HistoricalForm::default()
            },
            ..DashboardPage::default()
        };
        let html = page.render();
        assert!(html.contains("EUR.USD&quot;&gt;&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn error_page_is_generic() {
        let html = error_page();
        assert!(html.contains("Internal Server Error"));
    }
}
