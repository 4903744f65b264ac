// Venue display model.
// Normalizes raw search records into the canonical shape shown to the user.

pub mod normalize;
pub mod smoking;

pub use normalize::{DisplayResult, RECOMMEND_THRESHOLD, Sentiment, normalize, normalize_all};
pub use smoking::SmokingStatus;
