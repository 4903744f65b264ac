// Smoking status enumeration.

use std::fmt;

use serde::{Serialize, Serializer};

/// Normalized smoking policy of a venue.
///
/// Unrecognized raw values are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmokingStatus {
    NoSmoking,
    Separated,
    SmokingAllowed,
    Unknown,
    Other(String),
}

impl SmokingStatus {
    /// Map a raw indicator, accepting both the English and Japanese spellings the backend emits.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "no-smoking" | "non-smoking" | "禁煙" | "全面禁煙" | "完全禁煙" => Self::NoSmoking,
            "separated" | "分煙" => Self::Separated,
            "smoking-allowed" | "喫煙可" => Self::SmokingAllowed,
            "unknown" | "不明" => Self::Unknown,
            _ => Self::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::NoSmoking => "no-smoking",
            Self::Separated => "separated",
            Self::SmokingAllowed => "smoking-allowed",
            Self::Unknown => "unknown",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for SmokingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SmokingStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_spellings() {
        assert_eq!(SmokingStatus::from_raw("禁煙"), SmokingStatus::NoSmoking);
        assert_eq!(SmokingStatus::from_raw("全面禁煙"), SmokingStatus::NoSmoking);
        assert_eq!(SmokingStatus::from_raw("no-smoking"), SmokingStatus::NoSmoking);
        assert_eq!(SmokingStatus::from_raw("分煙"), SmokingStatus::Separated);
        assert_eq!(SmokingStatus::from_raw("喫煙可"), SmokingStatus::SmokingAllowed);
        assert_eq!(SmokingStatus::from_raw(" 不明 "), SmokingStatus::Unknown);
    }

    #[test]
    fn test_unrecognized_passes_through() {
        let status = SmokingStatus::from_raw("電子タバコのみ");
        assert_eq!(status, SmokingStatus::Other("電子タバコのみ".to_string()));
        assert_eq!(status.to_string(), "電子タバコのみ");
    }

    #[test]
    fn test_serializes_as_string() {
        assert_eq!(
            serde_json::to_string(&SmokingStatus::SmokingAllowed).unwrap(),
            r#""smoking-allowed""#
        );
    }
}
