// Search backend HTTP client.
// Builds requests against the configured base URL and converts non-success responses.

use std::time::Duration;

use reqwest::{
    Client, Response,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, ScoutError, SearchError};

/// HTTP client for the venue search backend.
pub struct SearchClient {
    client: Client,
    base_url: String,
}

impl SearchClient {
    /// Create a client for the backend at `base_url`.
    ///
    /// `timeout` bounds each request; the client never retries.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("venue-scout"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(ScoutError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// POST a JSON body.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> std::result::Result<Response, SearchError> {
        let url = self.url(endpoint);
        debug!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await?;
        check_response(response).await
    }

    /// GET with query parameters.
    pub async fn get_with_params<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> std::result::Result<Response, SearchError> {
        let url = self.url(endpoint);
        debug!(%url, "GET");
        let response = self.client.get(&url).query(params).send().await?;
        check_response(response).await
    }
}

/// Pass 2xx responses through; anything else becomes a `SearchError` carrying the body.
async fn check_response(response: Response) -> std::result::Result<Response, SearchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string()
    } else {
        body
    };
    Err(SearchError::http(status.as_u16(), message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = SearchClient::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/api/search"), "http://localhost:8000/api/search");
    }
}
