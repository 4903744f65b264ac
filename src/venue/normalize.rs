// Result normalization.
// Derives distance, smoking status, recommendation, and display summary from raw records.

use std::cmp::Ordering;

use crate::api::RawResult;
use crate::geo::Coordinate;
use crate::geo::distance::Proximity;

use super::smoking::SmokingStatus;

/// Positive score at or above which a venue is marked recommended.
pub const RECOMMEND_THRESHOLD: u32 = 80;

/// Summaries the sentiment service emits when it has nothing real to say.
const SUMMARY_PLACEHOLDERS: &[&str] = &[
    "no data",
    "analysis error",
    "レビューがありません。",
    "レビュー情報の取得中にエラーが発生しました。",
    "センチメント分析中に予期せぬエラーが発生しました。",
];

/// Positive/negative review sentiment, present only when both scores are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentiment {
    pub positive: u32,
    pub negative: u32,
}

/// A venue ready for display.
///
/// Recomputed from the raw record and current origin on every render; never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayResult {
    pub id: String,
    pub name: String,
    pub address: String,
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
    pub coordinate: Option<Coordinate>,
    /// Distance and walking time from the search origin, together or not at all.
    pub proximity: Option<Proximity>,
    pub smoking_status: Option<SmokingStatus>,
    pub recommended: bool,
    pub sentiment: Option<Sentiment>,
    pub summary: Option<String>,
}

impl DisplayResult {
    pub fn distance_km(&self) -> Option<f64> {
        self.proximity.map(|p| p.distance_km)
    }

    pub fn walk_minutes(&self) -> Option<u32> {
        self.proximity.map(|p| p.walk_minutes)
    }
}

/// Normalize one raw record. `origin` is `None` for keyword searches.
pub fn normalize(raw: &RawResult, origin: Option<Coordinate>) -> DisplayResult {
    let coordinate = raw.coordinate();

    let sentiment = match (raw.positive_score, raw.negative_score) {
        (Some(positive), Some(negative)) => Some(Sentiment { positive, negative }),
        _ => None,
    };

    DisplayResult {
        id: raw.id.clone(),
        name: raw.name.clone(),
        address: raw.address.clone(),
        rating: raw.rating,
        rating_count: raw.user_ratings_total,
        coordinate,
        proximity: Proximity::between(origin, coordinate),
        smoking_status: raw.smoking_indicator().map(SmokingStatus::from_raw),
        recommended: raw
            .positive_score
            .is_some_and(|score| score >= RECOMMEND_THRESHOLD),
        sentiment,
        summary: display_summary(raw.summary.as_deref()),
    }
}

/// Normalize a result list and rank it by rating, then rating count, both descending.
/// Ties keep the service's order.
pub fn normalize_all(raws: &[RawResult], origin: Option<Coordinate>) -> Vec<DisplayResult> {
    let mut results: Vec<DisplayResult> = raws.iter().map(|raw| normalize(raw, origin)).collect();
    results.sort_by(rank);
    results
}

fn rank(a: &DisplayResult, b: &DisplayResult) -> Ordering {
    let rating = |r: &DisplayResult| r.rating.unwrap_or(0.0);
    let count = |r: &DisplayResult| r.rating_count.unwrap_or(0);

    rating(b)
        .total_cmp(&rating(a))
        .then_with(|| count(b).cmp(&count(a)))
}

fn display_summary(summary: Option<&str>) -> Option<String> {
    let summary = summary?.trim();
    if summary.is_empty() || SUMMARY_PLACEHOLDERS.contains(&summary) {
        return None;
    }
    Some(summary.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::sample;

    fn scored(positive: Option<u32>) -> RawResult {
        RawResult {
            positive_score: positive,
            ..sample("a", "A")
        }
    }

    fn with_extra(field: &str, value: &str) -> RawResult {
        let mut raw = sample("a", "A");
        raw.extra.insert(field.to_string(), value.into());
        raw
    }

    #[test]
    fn test_recommendation_threshold() {
        assert!(normalize(&scored(Some(80)), None).recommended);
        assert!(normalize(&scored(Some(100)), None).recommended);
        assert!(!normalize(&scored(Some(79)), None).recommended);
        assert!(!normalize(&scored(None), None).recommended);
    }

    #[test]
    fn test_bare_record_defaults() {
        let display = normalize(&sample("a", "A"), None);
        assert!(display.smoking_status.is_none());
        assert!(!display.recommended);
        assert!(display.distance_km().is_none());
        assert!(display.walk_minutes().is_none());
        assert!(display.sentiment.is_none());
        assert!(display.summary.is_none());
    }

    #[test]
    fn test_smoking_status_from_either_field() {
        let display = normalize(&with_extra("smoking_status", "分煙"), None);
        assert_eq!(display.smoking_status, Some(SmokingStatus::Separated));

        let display = normalize(&with_extra("smoking", "禁煙"), None);
        assert_eq!(display.smoking_status, Some(SmokingStatus::NoSmoking));

        let mut both = with_extra("smoking", "禁煙");
        both.extra.insert("smoking_status".to_string(), "喫煙可".into());
        let display = normalize(&both, None);
        assert_eq!(display.smoking_status, Some(SmokingStatus::SmokingAllowed));
    }

    #[test]
    fn test_placeholder_summaries_suppressed() {
        for placeholder in [
            "no data",
            "analysis error",
            "レビューがありません。",
            " レビュー情報の取得中にエラーが発生しました。\n",
            "センチメント分析中に予期せぬエラーが発生しました。",
            "",
            "   ",
        ] {
            let raw = RawResult {
                summary: Some(placeholder.to_string()),
                ..sample("a", "A")
            };
            assert!(normalize(&raw, None).summary.is_none(), "{:?}", placeholder);
        }

        let raw = RawResult {
            summary: Some("Friendly staff, clean tables.".to_string()),
            ..sample("a", "A")
        };
        assert_eq!(
            normalize(&raw, None).summary.as_deref(),
            Some("Friendly staff, clean tables.")
        );
    }

    #[test]
    fn test_distance_needs_origin_and_position() {
        let raw = RawResult {
            lat: Some(35.6895),
            lng: Some(139.6917),
            ..sample("a", "A")
        };

        let display = normalize(&raw, Some(Coordinate::new(35.6895, 139.6917)));
        assert_eq!(display.distance_km(), Some(0.0));
        assert_eq!(display.walk_minutes(), Some(0));

        let display = normalize(&raw, None);
        assert!(display.distance_km().is_none() && display.walk_minutes().is_none());

        let missing_lng = RawResult { lng: None, ..raw };
        let display = normalize(&missing_lng, Some(Coordinate::new(35.0, 139.0)));
        assert!(display.distance_km().is_none() && display.walk_minutes().is_none());
    }

    #[test]
    fn test_sentiment_requires_both_scores() {
        let raw = RawResult {
            positive_score: Some(85),
            negative_score: Some(15),
            ..sample("a", "A")
        };
        assert_eq!(
            normalize(&raw, None).sentiment,
            Some(Sentiment {
                positive: 85,
                negative: 15
            })
        );

        let raw = RawResult {
            negative_score: None,
            ..raw
        };
        assert!(normalize(&raw, None).sentiment.is_none());
    }

    #[test]
    fn test_ranking_by_rating_then_count() {
        let raws = vec![
            RawResult {
                rating: Some(4.0),
                user_ratings_total: Some(10),
                ..sample("low", "Low")
            },
            RawResult {
                rating: None,
                ..sample("unrated", "Unrated")
            },
            RawResult {
                rating: Some(4.5),
                user_ratings_total: Some(5),
                ..sample("top-few", "Top few")
            },
            RawResult {
                rating: Some(4.5),
                user_ratings_total: Some(50),
                ..sample("top-many", "Top many")
            },
        ];

        let ids: Vec<String> = normalize_all(&raws, None).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, ["top-many", "top-few", "low", "unrated"]);
    }
}
