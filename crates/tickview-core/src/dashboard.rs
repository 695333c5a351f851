//! One dashboard render pass.
//!
//! A [`DashboardSession`] borrows a provider and turns a [`SessionState`]
//! into a [`Page`]: fetch quote info, check it is complete, fetch the selected
//! period's history, compute statistics, render. Every pass refetches; no step
//! is retried. Incomplete quote info ends the pass before history is requested.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::data_source::{HistoryRequest, MarketDataSource};
use crate::format::NumberLocale;
use crate::render::{render, Page, RenderContext};
use crate::stats::compute_statistics;
use crate::{DashboardError, Period, PriceHistory, QuoteInfo, SessionState, Symbol};

/// Drives render passes against one provider.
#[derive(Clone)]
pub struct DashboardSession {
    source: Arc<dyn MarketDataSource>,
}

impl DashboardSession {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self { source }
    }

    /// Descriptive fields for `symbol`.
    pub async fn fetch_quote_info(&self, symbol: &Symbol) -> Result<QuoteInfo, DashboardError> {
        let mut info = self.source.quote_info(symbol).await?;
        if info.symbol.is_none() {
            info.symbol = Some(symbol.clone());
        }
        Ok(info)
    }

    /// Daily bars for `symbol` over `period`, ascending by date.
    pub async fn fetch_price_history(
        &self,
        symbol: &Symbol,
        period: Period,
    ) -> Result<PriceHistory, DashboardError> {
        let history = self
            .source
            .price_history(HistoryRequest::new(symbol.clone(), period))
            .await?;
        debug!(%symbol, period = %period, bars = history.len(), "fetched price history");
        Ok(history)
    }

    /// Gather everything a render pass needs.
    pub async fn prepare(&self, state: &SessionState) -> Result<RenderContext, DashboardError> {
        let symbol = state.symbol();
        let quote_info = self.fetch_quote_info(&symbol).await?;
        quote_info.ensure_complete()?;
        let history = self.fetch_price_history(&symbol, state.period).await?;
        let stats = compute_statistics(&history)?;

        Ok(RenderContext {
            request_id: Uuid::new_v4(),
            provider: self.source.id(),
            state: state.normalized(),
            symbol,
            quote_info,
            history,
            stats,
            locale: NumberLocale::default(),
        })
    }

    /// Full pass: fetch, compute, render.
    #[instrument(skip(self), fields(provider = %self.source.id()))]
    pub async fn run(&self, state: &SessionState) -> Result<Page, DashboardError> {
        let result = async {
            let ctx = self.prepare(state).await?;
            render(&ctx)
        }
        .await;

        match &result {
            Ok(page) => info!(
                request_id = %page.request_id,
                widgets = page.widgets.len(),
                "rendered dashboard"
            ),
            Err(error) => warn!(code = error.code(), error = %error, "dashboard render aborted"),
        }
        result
    }
}
