use std::fmt::Write;

use chrono::{NaiveDate, NaiveDateTime};

use crate::{model::Candle, page::escape};

const BULLISH_COLOR: &str = "#26a69a";
const BEARISH_COLOR: &str = "#ef5350";
const WICK_COLOR: &str = "#888888";
const TEXT_COLOR: &str = "#444444";

/// Precomputed geometry for one candle.
#[derive(Debug, Clone)]
struct CandleRenderData {
    x: f64,
    high_y: f64,
    low_y: f64,
    open_y: f64,
    close_y: f64,
    is_bullish: bool,
    body_width: f64,
}

/// Scaling shared by every candle in the chart.
#[derive(Debug, Clone)]
struct ScaleParams {
    padding: f64,
    chart_width: f64,
    chart_height: f64,
    min_price: f64,
    max_price: f64,
    price_range: f64,
    candle_width: f64,
}

/// Server-side candlestick chart rendered as an inline SVG document.
pub struct SvgChart {
    width: u32,
    height: u32,
}

impl SvgChart {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Renders `candles` in the order given, oldest first.
    pub fn render(&self, title: &str, candles: &[Candle]) -> String {
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" class="candlestick-chart" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        svg.push_str(r##"<rect width="100%" height="100%" fill="#ffffff"/>"##);
        let _ = write!(
            svg,
            r#"<text class="chart-title" x="{}" y="24" text-anchor="middle" font-size="16" fill="{}">{}</text>"#,
            self.width as f64 / 2.0,
            TEXT_COLOR,
            escape(title)
        );

        if candles.is_empty() {
            let _ = write!(
                svg,
                r#"<text x="{}" y="{}" text-anchor="middle" font-size="14" fill="{}">No data</text>"#,
                self.width as f64 / 2.0,
                self.height as f64 / 2.0,
                TEXT_COLOR
            );
        } else {
            let params = self.calculate_scale_params(candles);
            for (i, candle) in candles.iter().enumerate() {
                let data = calculate_candle_render_data(i, candle, &params);
                render_single_candle(&mut svg, &data);
            }
            self.render_price_scale(&mut svg, &params);
            self.render_date_labels(&mut svg, candles, &params);
        }

        svg.push_str("</svg>");
        svg
    }

    fn calculate_scale_params(&self, candles: &[Candle]) -> ScaleParams {
        let padding = 50.0;
        let text_space = 70.0;
        let chart_width = self.width as f64 - (padding * 2.0) - text_space;
        let chart_height = self.height as f64 - (padding * 2.0);

        let mut min_price = f64::INFINITY;
        let mut max_price = f64::NEG_INFINITY;
        for candle in candles {
            min_price = min_price.min(candle.low);
            max_price = max_price.max(candle.high);
        }

        // A flat series would divide by zero.
        let mut price_range = max_price - min_price;
        if price_range <= 0.0 {
            price_range = 1.0;
        }

        ScaleParams {
            padding,
            chart_width,
            chart_height,
            min_price,
            max_price,
            price_range,
            candle_width: chart_width / candles.len() as f64,
        }
    }

    fn render_price_scale(&self, svg: &mut String, params: &ScaleParams) {
        let label_x = params.padding + params.chart_width + 8.0;
        let _ = write!(
            svg,
            r#"<text class="price-max" x="{:.1}" y="{:.1}" font-size="12" fill="{}">{:.5}</text>"#,
            label_x,
            params.padding + 4.0,
            TEXT_COLOR,
            params.max_price
        );
        let _ = write!(
            svg,
            r#"<text class="price-min" x="{:.1}" y="{:.1}" font-size="12" fill="{}">{:.5}</text>"#,
            label_x,
            params.padding + params.chart_height,
            TEXT_COLOR,
            params.min_price
        );
    }

    fn render_date_labels(&self, svg: &mut String, candles: &[Candle], params: &ScaleParams) {
        let y = self.height as f64 - params.padding / 2.0;
        if let Some(first) = candles.first() {
            let _ = write!(
                svg,
                r#"<text class="date-first" x="{:.1}" y="{:.1}" font-size="12" fill="{}">{}</text>"#,
                params.padding,
                y,
                TEXT_COLOR,
                escape(&format_bar_date(&first.date))
            );
        }
        if let [_, .., last] = candles {
            let _ = write!(
                svg,
                r#"<text class="date-last" x="{:.1}" y="{:.1}" text-anchor="end" font-size="12" fill="{}">{}</text>"#,
                params.padding + params.chart_width,
                y,
                TEXT_COLOR,
                escape(&format_bar_date(&last.date))
            );
        }
    }
}

fn price_to_y(price: f64, params: &ScaleParams) -> f64 {
    // Y grows downward.
    params.padding + ((params.max_price - price) / params.price_range) * params.chart_height
}

fn calculate_candle_render_data(index: usize, candle: &Candle, params: &ScaleParams) -> CandleRenderData {
    let x = params.padding + (index as f64 * params.candle_width) + (params.candle_width / 2.0);
    CandleRenderData {
        x,
        high_y: price_to_y(candle.high, params),
        low_y: price_to_y(candle.low, params),
        open_y: price_to_y(candle.open, params),
        close_y: price_to_y(candle.close, params),
        is_bullish: candle.close >= candle.open,
        body_width: params.candle_width * 0.6,
    }
}

fn render_single_candle(svg: &mut String, data: &CandleRenderData) {
    // Wick (high-low)
    let _ = write!(
        svg,
        r#"<line class="wick" x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}" stroke="{}" stroke-width="1"/>"#,
        data.high_y,
        data.low_y,
        WICK_COLOR,
        x = data.x
    );

    let color = if data.is_bullish { BULLISH_COLOR } else { BEARISH_COLOR };
    let body_top = data.open_y.min(data.close_y);
    let body_height = (data.open_y - data.close_y).abs();
    let left = data.x - data.body_width / 2.0;

    if body_height < 1.0 {
        // Doji
        let _ = write!(
            svg,
            r#"<line class="doji" x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="{}" stroke-width="1"/>"#,
            left,
            left + data.body_width,
            color,
            y = data.open_y
        );
    } else if data.is_bullish {
        let _ = write!(
            svg,
            r#"<rect class="body bullish" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="{}"/>"#,
            left, body_top, data.body_width, body_height, color
        );
    } else {
        let _ = write!(
            svg,
            r#"<rect class="body bearish" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{c}" stroke="{c}"/>"#,
            left,
            body_top,
            data.body_width,
            body_height,
            c = color
        );
    }
}

/// Reformats the broker's compact bar dates ("20240131" or
/// "20240131  15:30:00"); anything else is returned as is.
pub fn format_bar_date(raw: &str) -> String {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, "%Y%m%d %H:%M:%S") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(&normalized, "%Y%m%d") {
        return d.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(date: &str, open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle {
            date: date.into(),
            open,
            high,
            low,
            close,
        }
    }

    #[test]
    fn empty_series_says_no_data() {
        let svg = SvgChart::new(400, 200).render("Exchange Rate: AUD.CAD", &[]);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("No data"));
        assert!(svg.contains("Exchange Rate: AUD.CAD"));
    }

    #[test]
    fn one_body_and_wick_per_candle() {
        let candles = vec![
            candle("20240102", 0.90, 0.95, 0.88, 0.94),
            candle("20240103", 0.94, 0.96, 0.89, 0.90),
            candle("20240104", 0.90, 0.97, 0.85, 0.96),
        ];
        let svg = SvgChart::new(800, 400).render("t", &candles);
        assert_eq!(svg.matches(r#"class="wick""#).count(), 3);
        assert_eq!(svg.matches("body bullish").count(), 2);
        assert_eq!(svg.matches("body bearish").count(), 1);
        assert!(svg.contains("0.97000"));
        assert!(svg.contains("0.85000"));
        assert!(svg.contains("2024-01-02"));
        assert!(svg.contains("2024-01-04"));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn flat_series_renders_dojis_without_nan() {
        let candles = vec![candle("a", 1.0, 1.0, 1.0, 1.0), candle("b", 1.0, 1.0, 1.0, 1.0)];
        let svg = SvgChart::new(400, 200).render("flat", &candles);
        assert_eq!(svg.matches(r#"class="doji""#).count(), 2);
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn single_candle_gets_only_the_first_date_label() {
        let svg = SvgChart::new(400, 200).render("one", &[candle("20240102", 0.9, 0.95, 0.88, 0.94)]);
        assert!(svg.contains(r#"class="date-first""#));
        assert!(!svg.contains(r#"class="date-last""#));
    }

    #[test]
    fn title_is_escaped() {
        let svg = SvgChart::new(400, 200).render("<b>&", &[]);
        assert!(svg.contains("&lt;b&gt;&amp;"));
    }

    #[test]
    fn bar_dates_are_reformatted() {
        assert_eq!(format_bar_date("20240131"), "2024-01-31");
        assert_eq!(format_bar_date("20240131  15:30:00"), "2024-01-31 15:30");
        assert_eq!(format_bar_date("yesterday"), "yesterday");
    }
}
