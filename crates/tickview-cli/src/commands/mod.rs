mod periods;
mod show;

use std::sync::Arc;

use serde::Serialize;
use tickview_core::{MarketDataSource, MockAdapter, Page, ReqwestHttpClient, YahooAdapter};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub use periods::PeriodRow;

/// What a command hands to the output layer.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CommandOutput {
    Page(Page),
    Periods(Vec<PeriodRow>),
}

pub async fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    match &cli.command {
        Command::Show(args) => {
            let source = build_source(cli)?;
            show::run(args, source).await.map(CommandOutput::Page)
        }
        Command::Periods => Ok(CommandOutput::Periods(periods::run())),
    }
}

fn build_source(cli: &Cli) -> Result<Arc<dyn MarketDataSource>, CliError> {
    if cli.mock {
        return Ok(Arc::new(MockAdapter::default()));
    }

    let http_client = ReqwestHttpClient::with_timeout_ms(cli.timeout_ms)?;
    Ok(Arc::new(
        YahooAdapter::new(Arc::new(http_client)).with_timeout_ms(cli.timeout_ms),
    ))
}
