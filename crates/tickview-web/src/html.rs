//! HTML rendering of a [`Page`].
//!
//! The whole page sits inside one GET form so editing the ticker or picking a
//! period resubmits both inputs and reruns the pass.

use std::fmt::Write;

use tickview_core::render::{PAGE_TITLE, PERIOD_SELECT_LABEL, TICKER_INPUT_LABEL};
use tickview_core::{
    format_currency, ChartDomain, ChartPoint, NumberLocale, Page, Period, SessionState, Widget,
};

const CHART_WIDTH: f64 = 720.0;
const CHART_HEIGHT: f64 = 280.0;
const AXIS_GUTTER: f64 = 80.0;

const STYLE: &str = "body{font-family:sans-serif;max-width:820px;margin:2rem auto;padding:0 1rem}\
h1{text-align:center}\
.columns{display:flex;gap:2rem}\
.column{flex:1}\
.metric{margin:.5rem 0}\
.metric .label{font-size:.85rem;color:#555}\
.metric .value{font-size:1.6rem}\
.error{color:#b71c1c}\
.text{white-space:pre-wrap}\
svg text{font-size:11px;fill:#555}";

pub fn render_page(page: &Page) -> String {
    let mut body = String::new();
    for widget in &page.widgets {
        render_widget(widget, &mut body);
    }
    document(&page.title, &body)
}

/// Error page that keeps the inputs so the user can correct them.
pub fn render_error(state: &SessionState, message: &str) -> String {
    let mut body = String::new();
    let _ = write!(body, "<h1>{}</h1>", escape(PAGE_TITLE));
    text_input(&mut body, "ticker", TICKER_INPUT_LABEL, &state.ticker);
    let options: Vec<(String, String)> = Period::ALL
        .iter()
        .map(|period| (period.code().to_owned(), period.label().to_owned()))
        .collect();
    selector(&mut body, "period", PERIOD_SELECT_LABEL, &options, state.period.code());
    let _ = write!(body, "<p class=\"error\">{}</p>", escape(message));
    document(PAGE_TITLE, &body)
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<title>{}</title><style>{STYLE}</style></head>\
<body><form method=\"get\" action=\"/\">{body}</form></body></html>",
        escape(title)
    )
}

fn render_widget(widget: &Widget, out: &mut String) {
    match widget {
        Widget::Heading { text } => {
            let _ = write!(out, "<h1>{}</h1>", escape(text));
        }
        Widget::Header { text } => {
            let _ = write!(out, "<h2>{}</h2>", escape(text));
        }
        Widget::Divider => out.push_str("<hr>"),
        Widget::TextInput { name, label, value } => text_input(out, name, label, value),
        Widget::Selector {
            name,
            label,
            options,
            selected,
        } => {
            let options: Vec<(String, String)> = options
                .iter()
                .map(|option| (option.value.clone(), option.label.clone()))
                .collect();
            selector(out, name, label, &options, selected);
        }
        Widget::Metric { label, value } => {
            let _ = write!(
                out,
                "<div class=\"metric\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>",
                escape(label),
                escape(value)
            );
        }
        Widget::Columns { columns } => {
            out.push_str("<div class=\"columns\">");
            for column in columns {
                out.push_str("<div class=\"column\">");
                for widget in column {
                    render_widget(widget, out);
                }
                out.push_str("</div>");
            }
            out.push_str("</div>");
        }
        Widget::LineChart {
            color,
            domain,
            points,
            ..
        } => line_chart(out, color, domain, points),
        Widget::Text { text } => {
            let _ = write!(out, "<p class=\"text\">{}</p>", escape(text));
        }
    }
}

fn text_input(out: &mut String, name: &str, label: &str, value: &str) {
    let _ = write!(
        out,
        "<label for=\"{name}\">{}</label><br>\
<input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{}\">",
        escape(label),
        escape(value),
        name = escape(name)
    );
}

fn selector(out: &mut String, name: &str, label: &str, options: &[(String, String)], selected: &str) {
    let _ = write!(
        out,
        "<label for=\"{name}\">{}</label><br><select id=\"{name}\" name=\"{name}\" onchange=\"this.form.submit()\">",
        escape(label),
        name = escape(name)
    );
    for (value, text) in options {
        let marker = if value == selected { " selected" } else { "" };
        let _ = write!(
            out,
            "<option value=\"{}\"{marker}>{}</option>",
            escape(value),
            escape(text)
        );
    }
    out.push_str("</select>");
}

/// Closing prices as an SVG polyline scaled to `domain`.
fn line_chart(out: &mut String, color: &str, domain: &ChartDomain, points: &[ChartPoint]) {
    let plot_width = CHART_WIDTH - AXIS_GUTTER;
    let last = points.len().saturating_sub(1).max(1) as f64;
    let coords: Vec<String> = points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let x = AXIS_GUTTER + index as f64 / last * plot_width;
            let y = (1.0 - domain.normalize(point.value)) * CHART_HEIGHT;
            format!("{x:.1},{y:.1}")
        })
        .collect();

    let _ = write!(
        out,
        "<svg viewBox=\"0 0 {CHART_WIDTH} {}\" width=\"100%\" role=\"img\" aria-label=\"Close by Date\">",
        CHART_HEIGHT + 20.0
    );
    let _ = write!(
        out,
        "<text x=\"0\" y=\"12\">{}</text><text x=\"0\" y=\"{CHART_HEIGHT}\">{}</text>",
        escape(&format_currency(domain.upper, 2, NumberLocale::EN_US)),
        escape(&format_currency(domain.lower, 2, NumberLocale::EN_US))
    );
    if let (Some(first), Some(final_point)) = (points.first(), points.last()) {
        let _ = write!(
            out,
            "<text x=\"{AXIS_GUTTER}\" y=\"{}\">{}</text>\
<text x=\"{CHART_WIDTH}\" y=\"{}\" text-anchor=\"end\">{}</text>",
            CHART_HEIGHT + 16.0,
            first.date.format_date(),
            CHART_HEIGHT + 16.0,
            final_point.date.format_date()
        );
    }
    let _ = write!(
        out,
        "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"2\" points=\"{}\"/></svg>",
        escape(color),
        coords.join(" ")
    );
}

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
