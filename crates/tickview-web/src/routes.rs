use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tickview_core::{DashboardSession, Page, Period, SessionState, ValidationError};
use tower_http::trace::TraceLayer;

use crate::error::{ApiError, PageError};
use crate::html;

#[derive(Clone)]
pub struct AppState {
    pub session: DashboardSession,
}

/// Raw form inputs; both optional so a bare `/` shows the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub ticker: Option<String>,
    pub period: Option<String>,
}

impl PageQuery {
    /// Resolve into session inputs. On a bad period code the inputs are still
    /// returned, with the default period, so the error page can echo them.
    fn session_state(&self) -> Result<SessionState, (SessionState, ValidationError)> {
        let ticker = self.ticker.clone().unwrap_or_default();
        match self.period.as_deref().map(str::trim) {
            None | Some("") => Ok(SessionState::new(ticker, Period::default())),
            Some(code) => code
                .parse()
                .map(|period| SessionState::new(ticker.clone(), period))
                .map_err(|error| (SessionState::new(ticker, Period::default()), error)),
        }
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/page", get(api_page))
        .route("/healthz", get(healthz))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, PageError> {
    let session_state = query
        .session_state()
        .map_err(|(session_state, error)| PageError::new(session_state, error))?;

    match state.session.run(&session_state).await {
        Ok(page) => Ok(Html(html::render_page(&page))),
        Err(error) => Err(PageError::new(session_state.normalized(), error)),
    }
}

async fn api_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page>, ApiError> {
    let session_state = query.session_state().map_err(|(_, error)| error)?;
    let page = state.session.run(&session_state).await?;
    Ok(Json(page))
}

async fn healthz() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tickview_core::{MockAdapter, SourceError};
    use tower::ServiceExt;

    use super::*;

    fn app(mock: MockAdapter) -> Router {
        app_router(AppState {
            session: DashboardSession::new(Arc::new(mock)),
        })
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[tokio::test]
    async fn healthz_works() {
        let (status, body) = get(app(MockAdapter::default()), "/healthz").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn index_renders_requested_ticker() {
        let (status, body) = get(app(MockAdapter::default()), "/?ticker=msft").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>U.S. Stock Explorer</h1>"));
        assert!(body.contains("MSFT 1 Year Performance"));
        assert!(body.contains("<option value=\"1y\" selected>1 Year</option>"));
        assert!(body.contains("<polyline"));
    }

    #[tokio::test]
    async fn bare_index_uses_default_ticker() {
        let (status, body) = get(app(MockAdapter::default()), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("MSTR 1 Year Performance"));
    }

    #[tokio::test]
    async fn unknown_period_is_bad_request() {
        let (status, body) = get(app(MockAdapter::default()), "/?ticker=aapl&period=5y").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("invalid period"));
        assert!(body.contains("value=\"aapl\""));
    }

    #[tokio::test]
    async fn provider_failure_is_bad_gateway() {
        let mock = MockAdapter::default().with_failure(SourceError::unavailable("upstream down"));

        let (status, body) = get(app(mock), "/?ticker=aapl&period=3mo").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("upstream down"));
        assert!(body.contains("value=\"AAPL\""));
    }

    #[tokio::test]
    async fn api_page_returns_widget_tree() {
        let (status, body) = get(app(MockAdapter::default()), "/api/page?ticker=aapl&period=1mo").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).expect("json");
        assert_eq!(json["title"], "U.S. Stock Explorer");
        assert!(body.contains("AAPL 1 Month Performance"));
    }

    #[tokio::test]
    async fn api_page_reports_unknown_ticker_as_json() {
        let (status, body) = get(app(MockAdapter::default()), "/api/page?ticker=zzzz").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body).expect("json");
        assert_eq!(json["error"], "source.not_found");
    }
}
