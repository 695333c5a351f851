//! Provider adapters.
//!
//! - [`YahooAdapter`]: Yahoo Finance `quoteSummary` + `chart` endpoints
//! - [`MockAdapter`]: deterministic offline data for demos and tests

mod mock;
mod yahoo;

pub use mock::{MockAdapter, MockCall};
pub use yahoo::{YahooAdapter, YahooAuthManager};
