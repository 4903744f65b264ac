// Search backend endpoints.
// Location and keyword search over the HTTP client.

use serde::Deserialize;
use tracing::info;

use crate::error::SearchError;
use crate::geo::Coordinate;

use super::client::SearchClient;
use super::service::SearchService;
use super::types::RawResult;

const LOCATION_SEARCH: &str = "/api/search";
const KEYWORD_SEARCH: &str = "/api/search_by_keyword";

/// Response wrapper shared by both search endpoints.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawResult>,
}

impl SearchService for SearchClient {
    async fn search_by_location(
        &self,
        coordinate: Coordinate,
    ) -> Result<Vec<RawResult>, SearchError> {
        let response = self.post_json(LOCATION_SEARCH, &coordinate).await?;
        let wrapper: SearchResponse = response.json().await?;
        info!(%coordinate, count = wrapper.results.len(), "location search returned");
        Ok(wrapper.results)
    }

    async fn search_by_keyword(&self, keyword: &str) -> Result<Vec<RawResult>, SearchError> {
        let params = [("keyword", keyword)];
        let response = self.get_with_params(KEYWORD_SEARCH, &params).await?;
        let wrapper: SearchResponse = response.json().await?;
        info!(keyword, count = wrapper.results.len(), "keyword search returned");
        Ok(wrapper.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_without_results_is_empty() {
        let wrapper: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(wrapper.results.is_empty());
    }

    #[test]
    fn test_response_results_parse() {
        let wrapper: SearchResponse = serde_json::from_str(
            r#"{"results": [{"id": "a", "name": "A"}, {"id": "b", "name": "B", "rating": 4}]}"#,
        )
        .unwrap();
        assert_eq!(wrapper.results.len(), 2);
        assert_eq!(wrapper.results[1].rating, Some(4.0));
    }
}
