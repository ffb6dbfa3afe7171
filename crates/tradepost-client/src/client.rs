//! HTTP client for the TradePost API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use tradepost_core::error::{AppError, ErrorKind};
use tradepost_core::result::AppResult;
use tradepost_core::types::ApiErrorResponse;

/// Base path of a locally running server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Query sent to `/listings/search`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub categories: Vec<String>,
    pub conditions: Vec<String>,
    pub location: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<String>,
    pub page: Option<u64>,
}

impl SearchQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        if !self.categories.is_empty() {
            pairs.push(("categories", self.categories.join(",")));
        }
        if !self.conditions.is_empty() {
            pairs.push(("conditions", self.conditions.join(",")));
        }
        if let Some(location) = &self.location {
            pairs.push(("location", location.clone()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("min_price", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("max_price", max.to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Deserialize)]
struct VersionBody {
    version: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// JSON client bound to one server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for `base_url`, e.g. `http://localhost:8080/api`.
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Failed to build HTTP client", e)
            })?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Client for [`DEFAULT_BASE_URL`].
    pub fn local() -> AppResult<Self> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// Attach a bearer token to subsequent requests.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /version`.
    pub async fn version(&self) -> AppResult<String> {
        let body: VersionBody = self.send(self.http.get(self.url("/version")?)).await?;
        Ok(body.version)
    }

    /// `POST /auth/login`. Stores the access token on success and returns
    /// the full session payload.
    pub async fn login(&mut self, email: &str, password: &str) -> AppResult<Value> {
        let request = self
            .http
            .post(self.url("/auth/login")?)
            .json(&serde_json::json!({ "email": email, "password": password }));
        let envelope: Envelope<Value> = self.send(request).await?;

        let token = envelope
            .data
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::external_service("Login response carried no access token"))?;
        self.token = Some(token.to_string());
        Ok(envelope.data)
    }

    /// `GET /listings/search`. Requires a token.
    pub async fn search(&self, query: &SearchQuery) -> AppResult<Value> {
        let mut url = self.url("/listings/search")?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.pairs() {
                pairs.append_pair(key, &value);
            }
        }
        let envelope: Envelope<Value> = self.send(self.http.get(url)).await?;
        Ok(envelope.data)
    }

    fn url(&self, path: &str) -> AppResult<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| AppError::validation(format!("Invalid URL '{raw}': {e}")))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            let kind = if e.is_timeout() || e.is_connect() {
                ErrorKind::ServiceUnavailable
            } else {
                ErrorKind::ExternalService
            };
            AppError::with_source(kind, format!("Request failed: {e}"), e)
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "API response");

        if !status.is_success() {
            let message = match response.json::<ApiErrorResponse>().await {
                Ok(body) => body.message,
                Err(_) => format!("Server returned {status}"),
            };
            return Err(AppError::new(kind_for_status(status.as_u16()), message));
        }

        response.json::<T>().await.map_err(|e| {
            AppError::with_source(ErrorKind::Serialization, "Unexpected response body", e)
        })
    }
}

/// Map an HTTP status back to an error kind.
fn kind_for_status(status: u16) -> ErrorKind {
    match status {
        400 => ErrorKind::Validation,
        401 => ErrorKind::Unauthorized,
        403 => ErrorKind::Forbidden,
        404 => ErrorKind::NotFound,
        409 => ErrorKind::Conflict,
        503 => ErrorKind::ServiceUnavailable,
        _ => ErrorKind::ExternalService,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_trimmed() {
        let client = ApiClient::new("http://example.test/api/").unwrap();
        assert_eq!(client.base_url(), "http://example.test/api");
        assert_eq!(
            client.url("/version").unwrap().as_str(),
            "http://example.test/api/version"
        );
    }

    #[test]
    fn test_search_query_pairs() {
        let query = SearchQuery {
            categories: vec!["Office Equipment".to_string(), "Industrial Equipment".to_string()],
            max_price: Some(500.0),
            sort: Some("price-asc".to_string()),
            ..Default::default()
        };
        let pairs = query.pairs();
        assert!(pairs.contains(&("categories", "Office Equipment,Industrial Equipment".to_string())));
        assert!(pairs.contains(&("max_price", "500".to_string())));
        assert!(pairs.contains(&("sort", "price-asc".to_string())));
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn test_status_kinds() {
        assert_eq!(kind_for_status(401), ErrorKind::Unauthorized);
        assert_eq!(kind_for_status(502), ErrorKind::ExternalService);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_unavailable() {
        let client = ApiClient::new("http://127.0.0.1:9/api").unwrap();
        let err = client.version().await.unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::ServiceUnavailable | ErrorKind::ExternalService
        ));
    }
}
