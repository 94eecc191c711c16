//! Thin JSON-over-HTTP client for the admin REST API.
//!
//! Every request is checked for a 2xx status. Error bodies are logged, never parsed.

use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};

use super::error::ApiError;
use crate::shared::config::ApiConfig;

/// HTTP-клиент с общим базовым URL
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    /// Build a full API URL from a path
    ///
    /// # Example
    /// ```rust,ignore
    /// let url = client.url("/categories");
    /// ```
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self
            .send("GET", &url, self.client.get(&url).header("Accept", "application/json"))
            .await?;
        Self::decode(&url, response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .json(body);
        let response = self.send("POST", &url, request).await?;
        Self::decode(&url, response).await
    }

    /// POST с телом, ответ не читается (мутации возвращают пустой 2xx)
    pub async fn post_no_content<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.url(path);
        self.send("POST", &url, self.client.post(&url).json(body))
            .await
            .map(|_| ())
    }

    /// POST без тела
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        self.send(
            "POST",
            &url,
            self.client
                .post(&url)
                .header("Content-Type", "application/json"),
        )
        .await
        .map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        self.send("DELETE", &url, self.client.delete(&url))
            .await
            .map(|_| ())
    }

    async fn send(
        &self,
        method: &'static str,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        tracing::debug!("API: {} {}", method, url);

        let response = request.send().await.map_err(|e| {
            tracing::error!("API: {} {} failed: {}", method, url, e);
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            "API: {} {} returned {}: {}",
            method,
            url,
            status,
            preview(&body)
        );

        if status == reqwest::StatusCode::CONFLICT {
            return Err(ApiError::Conflict {
                method,
                url: url.to_string(),
            });
        }
        Err(ApiError::Status {
            method,
            url: url.to_string(),
            status: status.as_u16(),
        })
    }

    async fn decode<T: DeserializeOwned>(
        url: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| {
            tracing::error!("API: failed to parse {}: {}. Body: {}", url, e, preview(&body));
            ApiError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            }
        })
    }
}

/// Percent-encode a single path segment (ids are opaque and may contain anything)
pub fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn preview(body: &str) -> String {
    let preview: String = body.chars().take(300).collect();
    if preview.len() < body.len() {
        format!("{}...", preview)
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.url("/categories"), "http://localhost:3000/categories");
    }

    #[test]
    fn test_segment_encodes_reserved_characters() {
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
        assert_eq!(segment("42"), "42");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_json::<Vec<String>>("/categories")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_conflict_status_is_mapped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/categories/new"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .post_json::<_, serde_json::Value>("/categories/new", &serde_json::json!({ "name": "x" }))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_json::<Vec<String>>("/categories")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = client.get_json::<Vec<String>>("/categories").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
