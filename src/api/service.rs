// Search service seam.
// The orchestrator only knows this trait; the HTTP client and test fakes implement it.

use std::future::Future;

use crate::error::SearchError;
use crate::geo::Coordinate;

use super::RawResult;

/// External venue search.
pub trait SearchService {
    /// Venues near a coordinate.
    fn search_by_location(
        &self,
        coordinate: Coordinate,
    ) -> impl Future<Output = Result<Vec<RawResult>, SearchError>>;

    /// Venues matching free text.
    fn search_by_keyword(
        &self,
        keyword: &str,
    ) -> impl Future<Output = Result<Vec<RawResult>, SearchError>>;
}
