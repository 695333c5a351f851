use std::sync::Arc;

use tickview_core::{DashboardSession, MarketDataSource, Page, Period, SessionState};
use tracing::debug;

use crate::cli::ShowArgs;
use crate::error::CliError;

pub async fn run(args: &ShowArgs, source: Arc<dyn MarketDataSource>) -> Result<Page, CliError> {
    let period: Period = args.period.parse()?;
    let state = SessionState::new(args.ticker.as_str(), period);
    debug!(ticker = %state.ticker, period = %period, provider = %source.id(), "show");

    let page = DashboardSession::new(source).run(&state).await?;
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickview_core::MockAdapter;

    fn args(ticker: &str, period: &str) -> ShowArgs {
        ShowArgs {
            ticker: ticker.to_owned(),
            period: period.to_owned(),
        }
    }

    #[tokio::test]
    async fn renders_page_from_mock_provider() {
        let page = run(&args("msft", "3mo"), Arc::new(MockAdapter::default()))
            .await
            .expect("renders");

        assert_eq!(page.headers()[0], "MSFT 3 Month Performance");
    }

    #[tokio::test]
    async fn rejects_unknown_period_before_fetching() {
        let mock = Arc::new(MockAdapter::default().with_call_log());

        let error = run(&args("msft", "5y"), mock.clone())
            .await
            .expect_err("invalid period");

        assert_eq!(error.exit_code(), 2);
        assert!(mock.calls().is_empty());
    }
}
