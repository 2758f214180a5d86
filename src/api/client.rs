use super::types::{
    CategoryRef, ContactRequest, Listing, MessageBody, ProductQuery, RemoteProduct,
};
use futures::StreamExt;
use reqwest::redirect::Policy;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Upper bound on any response body (2MB). A page of products is a few KB.
pub const MAX_RESPONSE_SIZE: usize = 2 * 1024 * 1024;

const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Non-success response whose body carried a `message` for the user.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Insecure API base URL: HTTPS required (except localhost)")]
    InsecureBaseUrl,
}

impl ApiError {
    /// The server-provided message, if the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Tunables for [`ApiClient::new`].
#[derive(Clone, Default)]
pub struct ClientOptions {
    /// Per-request timeout in seconds; 0 uses the default (20s).
    pub timeout_secs: u64,
    /// Optional bearer token sent with every request.
    pub token: Option<SecretString>,
}

/// Limit redirects to 3 hops and refuse loops.
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }
        let url = attempt.url();
        if attempt.previous().iter().any(|prev| prev.as_str() == url.as_str()) {
            return attempt.error("Redirect loop detected");
        }
        tracing::debug!(to = %url, hop = attempt.previous().len() + 1, "Following redirect");
        attempt.follow()
    })
}

/// Parse and vet the base URL.
///
/// HTTPS is required so a configured token never crosses the wire in
/// clear text; plain HTTP is tolerated for localhost during development.
fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
    let mut url =
        Url::parse(base_url.trim()).map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))?;

    match url.scheme() {
        "https" => {}
        "http" => {
            let is_local = matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"));
            if !is_local {
                tracing::error!(base_url = %url, "Rejecting non-HTTPS API base URL");
                return Err(ApiError::InsecureBaseUrl);
            }
            tracing::warn!(base_url = %url, "Using non-HTTPS API base URL (localhost only)");
        }
        other => {
            return Err(ApiError::InvalidBaseUrl(format!(
                "unsupported scheme '{}'",
                other
            )))
        }
    }

    // Url::join replaces the last segment unless the path ends with '/'
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// HTTP client for the storefront API.
///
/// Cheap to clone: the underlying reqwest pool and token are shared.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    token: Option<Arc<SecretString>>,
    timeout: Duration,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.base.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: &str, options: ClientOptions) -> Result<Self, ApiError> {
        let base = parse_base_url(base_url)?;
        let timeout_secs = if options.timeout_secs == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            options.timeout_secs
        };

        let http = reqwest::Client::builder()
            .redirect(create_redirect_policy())
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        tracing::info!(base_url = %base, timeout_secs, "API client configured");

        Ok(Self {
            http,
            base,
            token: options.token.map(Arc::new),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// The normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        tokio::time::timeout(self.timeout, self.authorize(request).send())
            .await
            .map_err(|_| ApiError::Timeout(self.timeout.as_secs()))?
            .map_err(ApiError::Network)
    }

    /// Fetch the category listing. A response without `data` yields an empty list.
    pub async fn fetch_categories(&self) -> Result<Vec<CategoryRef>, ApiError> {
        let url = self.endpoint("categories")?;
        tracing::debug!(url = %url, "Fetching categories");

        let response = self.send(self.http.get(url)).await?;
        let listing: Listing<CategoryRef> = decode_success(response).await?;
        let categories = listing.data.unwrap_or_default();

        tracing::info!(count = categories.len(), "Categories loaded");
        Ok(categories)
    }

    /// Fetch one page of the product listing.
    pub async fn fetch_products(
        &self,
        query: &ProductQuery,
    ) -> Result<Listing<RemoteProduct>, ApiError> {
        let mut url = self.endpoint("products")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &query.page.to_string());
            pairs.append_pair("limit", &query.limit.to_string());
            if let Some(category_id) = &query.category_id {
                pairs.append_pair("categoryId", category_id);
            }
        }
        tracing::debug!(
            url = %url,
            page = query.page,
            category = query.category_id.as_deref().unwrap_or("all"),
            "Fetching products"
        );

        let response = self.send(self.http.get(url)).await?;
        decode_success(response).await
    }

    /// Submit the contact form.
    ///
    /// Returns the server's confirmation `message`, or `None` when a success
    /// response carried none. Error responses with a `message` become
    /// [`ApiError::Rejected`].
    pub async fn submit_contact(&self, request: &ContactRequest) -> Result<Option<String>, ApiError> {
        let url = self.endpoint("contact-us")?;
        tracing::debug!(url = %url, "Submitting contact form");

        let response = self.send(self.http.post(url).json(request)).await?;
        let body: MessageBody = decode_success(response).await?;
        Ok(body.message.filter(|m| !m.is_empty()))
    }
}

/// Check the status and decode a JSON body.
///
/// Non-success responses are inspected for a `{ "message": ... }` body so the
/// server's wording can reach the user.
async fn decode_success<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let bytes = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<MessageBody>(&bytes)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty());
        tracing::debug!(status = status.as_u16(), has_message = message.is_some(), "API error response");
        return Err(match message {
            Some(message) => ApiError::Rejected {
                status: status.as_u16(),
                message,
            },
            None => ApiError::HttpStatus(status.as_u16()),
        });
    }

    Ok(serde_json::from_slice(&bytes)?)
}

async fn read_limited_bytes(response: reqwest::Response, limit: usize) -> Result<Vec<u8>, ApiError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(ApiError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(ApiError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(ApiError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri(), ClientOptions::default()).unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let url = parse_base_url("https://shop.example.com/api").unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/api/");
        assert_eq!(
            url.join("products").unwrap().as_str(),
            "https://shop.example.com/api/products"
        );
    }

    #[test]
    fn test_http_base_url_rejected() {
        let result = parse_base_url("http://shop.example.com/api");
        assert!(matches!(result, Err(ApiError::InsecureBaseUrl)));
    }

    #[test]
    fn test_localhost_http_allowed() {
        assert!(parse_base_url("http://localhost:3001/api").is_ok());
        assert!(parse_base_url("http://127.0.0.1:3001").is_ok());
    }

    #[test]
    fn test_unsupported_scheme_rejected() {
        let result = parse_base_url("ftp://shop.example.com");
        assert!(matches!(result, Err(ApiError::InvalidBaseUrl(_))));
        assert!(matches!(
            parse_base_url("not a url"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = ApiClient::new(
            "https://shop.example.com",
            ClientOptions {
                timeout_secs: 5,
                token: Some(SecretString::from("hunter2".to_string())),
            },
        )
        .unwrap();
        let output = format!("{:?}", client);
        assert!(!output.contains("hunter2"));
        assert!(output.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn test_fetch_categories_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"id": "a", "name": "Fish"}, {"id": "b", "name": "Meat"}]
            })))
            .mount(&server)
            .await;

        let categories = client_for(&server).fetch_categories().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].name, "Meat");
    }

    #[tokio::test]
    async fn test_fetch_categories_missing_data_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let categories = client_for(&server).fetch_categories().await.unwrap();
        assert!(categories.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_products_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .and(query_param("page", "3"))
            .and(query_param("limit", "12"))
            .and(query_param("categoryId", "fish"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"id": "1", "name": "Cod"}],
                "pagination": {"page": 3, "limit": 12, "total": 25, "totalPages": 3,
                               "hasNextPage": false, "hasPrevPage": true}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let listing = client_for(&server)
            .fetch_products(&ProductQuery {
                page: 3,
                limit: 12,
                category_id: Some("fish".into()),
            })
            .await
            .unwrap();
        assert_eq!(listing.data.unwrap().len(), 1);
        assert_eq!(listing.pagination.unwrap().total, 25);
    }

    #[tokio::test]
    async fn test_fetch_products_all_omits_category() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
            .mount(&server)
            .await;

        client_for(&server)
            .fetch_products(&ProductQuery {
                page: 1,
                limit: 12,
                category_id: None,
            })
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].url.as_str().contains("categoryId"));
    }

    #[tokio::test]
    async fn test_http_500_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_categories().await;
        assert!(matches!(result, Err(ApiError::HttpStatus(500))));
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_categories().await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("x".repeat(MAX_RESPONSE_SIZE + 1)),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_categories().await;
        assert!(matches!(result, Err(ApiError::ResponseTooLarge(_))));
    }

    #[tokio::test]
    async fn test_submit_contact_success_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/contact-us"))
            .and(body_json(serde_json::json!({
                "name": "Ada", "email": "ada@example.com", "subject": "Hi", "message": "Hello"
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({"message": "ok"})),
            )
            .mount(&server)
            .await;

        let message = client_for(&server)
            .submit_contact(&ContactRequest {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                subject: "Hi".into(),
                message: "Hello".into(),
            })
            .await
            .unwrap();
        assert_eq!(message.as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn test_submit_contact_rejection_carries_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/contact-us"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"message": "Invalid email"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .submit_contact(&ContactRequest {
                name: "Ada".into(),
                email: "nope".into(),
                subject: "Hi".into(),
                message: "Hello".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.server_message(), Some("Invalid email"));
        assert_eq!(err.to_string(), "Invalid email");
    }

    #[tokio::test]
    async fn test_bearer_token_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories"))
            .and(header("authorization", "Bearer s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(
            &server.uri(),
            ClientOptions {
                timeout_secs: 5,
                token: Some(SecretString::from("s3cret".to_string())),
            },
        )
        .unwrap();
        client.fetch_categories().await.unwrap();
    }
}
