//! Pure page renderer.
//!
//! [`render`] turns one [`RenderContext`] into a [`Page`]: a flat, serializable
//! widget tree that hosts translate to terminal text or HTML. It performs no
//! I/O. The first required quote field that is absent aborts the render.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::format::{
    format_currency, format_currency_grouped, format_percent, NumberLocale,
};
use crate::stats::{ChartDomain, DerivedStatistics};
use crate::{
    fields, DashboardError, Period, PriceHistory, ProviderId, QuoteInfo, SessionState, Symbol,
    UtcDateTime,
};

pub const PAGE_TITLE: &str = "U.S. Stock Explorer";
pub const TICKER_INPUT_LABEL: &str = "Please enter the ticker symbol of the desired stock:";
pub const PERIOD_SELECT_LABEL: &str = "Choose a timeframe for performance evaluation:";
pub const CHART_COLOR: &str = "#2e7d32";

/// Everything one render pass knows. Built per request, dropped afterwards.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub request_id: Uuid,
    pub provider: ProviderId,
    pub state: SessionState,
    pub symbol: Symbol,
    pub quote_info: QuoteInfo,
    pub history: PriceHistory,
    pub stats: DerivedStatistics,
    pub locale: NumberLocale,
}

/// Rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
    pub request_id: Uuid,
    pub widgets: Vec<Widget>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: UtcDateTime,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    /// Page heading, centered.
    Heading { text: String },
    /// Section header.
    Header { text: String },
    Divider,
    TextInput {
        name: String,
        label: String,
        value: String,
    },
    Selector {
        name: String,
        label: String,
        options: Vec<SelectOption>,
        selected: String,
    },
    Metric { label: String, value: String },
    Columns { columns: Vec<Vec<Widget>> },
    LineChart {
        x_field: String,
        y_field: String,
        color: String,
        domain: ChartDomain,
        points: Vec<ChartPoint>,
    },
    Text { text: String },
}

impl Widget {
    fn metric(label: &str, value: String) -> Self {
        Self::Metric {
            label: label.to_owned(),
            value,
        }
    }

    fn header(text: String) -> Self {
        Self::Header { text }
    }

    fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// Build the dashboard page for one pass.
pub fn render(ctx: &RenderContext) -> Result<Page, DashboardError> {
    let info = &ctx.quote_info;
    let locale = ctx.locale;
    let money = |value: f64| format_currency(value, 2, locale);
    let ticker = ctx.symbol.as_str();

    let mut widgets = vec![
        Widget::Heading {
            text: PAGE_TITLE.to_owned(),
        },
        Widget::TextInput {
            name: String::from("ticker"),
            label: TICKER_INPUT_LABEL.to_owned(),
            value: ticker.to_owned(),
        },
        Widget::Divider,
        Widget::metric("Company Name", info.require(&info.short_name, fields::SHORT_NAME)?),
        Widget::metric("Sector", info.require(&info.sector, fields::SECTOR)?),
        Widget::Divider,
    ];

    let left = vec![
        Widget::metric(
            "Current Price",
            money(info.require(&info.current_price, fields::CURRENT_PRICE)?),
        ),
        Widget::metric(
            "52 Week Low",
            money(info.require(&info.fifty_two_week_low, fields::FIFTY_TWO_WEEK_LOW)?),
        ),
        Widget::metric(
            "Volume",
            format_currency_grouped(info.require(&info.volume, fields::VOLUME)?, locale),
        ),
    ];
    let right = vec![
        Widget::metric(
            "Market Cap",
            format_currency_grouped(info.require(&info.market_cap, fields::MARKET_CAP)?, locale),
        ),
        Widget::metric(
            "52 Week High",
            money(info.require(&info.fifty_two_week_high, fields::FIFTY_TWO_WEEK_HIGH)?),
        ),
        Widget::metric(
            "Avg. Volume",
            format_currency_grouped(
                info.require(&info.average_volume, fields::AVERAGE_VOLUME)?,
                locale,
            ),
        ),
    ];
    widgets.push(Widget::Columns {
        columns: vec![left, right],
    });

    widgets.push(Widget::Divider);
    widgets.push(period_selector(ctx.state.period));
    widgets.push(Widget::header(format!(
        "{ticker} {} Performance",
        ctx.history.period.label()
    )));
    widgets.push(price_chart(&ctx.history, &ctx.stats));

    let stats = &ctx.stats;
    widgets.push(Widget::Columns {
        columns: vec![
            vec![
                Widget::metric("Start Price", money(stats.start_price)),
                Widget::metric("Low Price", money(stats.min_close)),
            ],
            vec![
                Widget::metric("Current Price", money(stats.last_price)),
                Widget::metric("High Price", money(stats.max_close)),
            ],
            vec![Widget::metric(
                "Percentage Change",
                format_percent(stats.percent_change, 2, locale),
            )],
        ],
    });

    widgets.push(Widget::Divider);
    widgets.push(Widget::header(format!("About {ticker}")));
    widgets.push(Widget::text(info.require(
        &info.long_business_summary,
        fields::LONG_BUSINESS_SUMMARY,
    )?));

    widgets.push(Widget::Divider);
    widgets.push(Widget::text(format!(
        "-All data is derived from {}.",
        ctx.provider.display_name()
    )));

    Ok(Page {
        title: PAGE_TITLE.to_owned(),
        request_id: ctx.request_id,
        widgets,
    })
}

fn period_selector(selected: Period) -> Widget {
    Widget::Selector {
        name: String::from("period"),
        label: PERIOD_SELECT_LABEL.to_owned(),
        options: Period::ALL
            .iter()
            .map(|period| SelectOption {
                value: period.code().to_owned(),
                label: period.label().to_owned(),
            })
            .collect(),
        selected: selected.code().to_owned(),
    }
}

fn price_chart(history: &PriceHistory, stats: &DerivedStatistics) -> Widget {
    Widget::LineChart {
        x_field: String::from("Date"),
        y_field: String::from("Close"),
        color: CHART_COLOR.to_owned(),
        domain: stats.chart_domain(),
        points: history
            .bars
            .iter()
            .map(|bar| ChartPoint {
                date: bar.date,
                value: bar.close,
            })
            .collect(),
    }
}

impl Page {
    /// Depth-first iterator over every widget, including column contents.
    pub fn iter_widgets(&self) -> impl Iterator<Item = &Widget> {
        fn walk<'a>(widgets: &'a [Widget], out: &mut Vec<&'a Widget>) {
            for widget in widgets {
                out.push(widget);
                if let Widget::Columns { columns } = widget {
                    for column in columns {
                        walk(column, out);
                    }
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.widgets, &mut out);
        out.into_iter()
    }

    /// Value of the first metric with `label`.
    pub fn metric(&self, label: &str) -> Option<&str> {
        self.iter_widgets().find_map(|widget| match widget {
            Widget::Metric { label: l, value } if l == label => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn headers(&self) -> Vec<&str> {
        self.iter_widgets()
            .filter_map(|widget| match widget {
                Widget::Header { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn chart(&self) -> Option<(&ChartDomain, &[ChartPoint])> {
        self.iter_widgets().find_map(|widget| match widget {
            Widget::LineChart { domain, points, .. } => Some((domain, points.as_slice())),
            _ => None,
        })
    }
}
