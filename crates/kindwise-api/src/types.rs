//! Typed model of an insect identification
//!
//! These structs mirror the identification JSON returned by the Kindwise API.
//! They are built once from a response (see [`crate::mapping`]) and never
//! mutated afterwards.

use chrono::{DateTime, FixedOffset, Utc};
use serde_json::{Map, Value};

/// Processing state of an identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentificationStatus {
    Pending,
    Completed,
    Failed,
}

impl IdentificationStatus {
    /// Parse the wire code (`"PENDING"`, `"COMPLETED"`, `"FAILED"`)
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PENDING" => Some(Self::Pending),
            "COMPLETED" => Some(Self::Completed),
            "FAILED" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Wire code for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for IdentificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Envelope for one identification call
#[derive(Debug, Clone, PartialEq)]
pub struct Identification {
    pub access_token: String,
    pub model_version: String,
    pub custom_id: Option<i64>,
    pub input: Input,
    pub result: IdentificationResult,
    pub status: IdentificationStatus,
    pub sla_compliant_client: bool,
    pub sla_compliant_system: bool,
    pub created: DateTime<Utc>,
    pub completed: DateTime<Utc>,
}

/// Parameters the identification was produced from
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    /// Stored image URLs, in submission order
    pub images: Vec<String>,
    pub datetime: DateTime<FixedOffset>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub similar_images: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IdentificationResult {
    pub classification: Classification,
}

/// Ranked candidate species, in the order the service returned them
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub suggestions: Vec<Suggestion>,
}

impl Classification {
    /// Highest ranked suggestion, if any
    pub fn top(&self) -> Option<&Suggestion> {
        self.suggestions.first()
    }
}

/// One candidate identification
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub id: String,
    pub name: String,
    /// Service-supplied confidence in [0, 1], passed through as received
    pub probability: f64,
    /// Extra per-suggestion fields returned for the requested `details`
    pub details: Option<Map<String, Value>>,
    pub similar_images: Option<Vec<SimilarImage>>,
}

/// Reference image judged visually similar to the submitted one
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarImage {
    pub id: String,
    pub url: String,
    pub url_small: String,
    pub similarity: f64,
    pub license_name: String,
    pub license_url: String,
    pub citation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        for status in [
            IdentificationStatus::Pending,
            IdentificationStatus::Completed,
            IdentificationStatus::Failed,
        ] {
            assert_eq!(IdentificationStatus::from_code(status.as_str()), Some(status));
        }
        assert_eq!(IdentificationStatus::from_code("completed"), None);
        assert_eq!(IdentificationStatus::Completed.to_string(), "COMPLETED");
    }

    #[test]
    fn test_top_suggestion() {
        let classification = Classification {
            suggestions: vec![
                Suggestion {
                    id: "a".to_string(),
                    name: "Osmia bicornis".to_string(),
                    probability: 0.9,
                    details: None,
                    similar_images: None,
                },
                Suggestion {
                    id: "b".to_string(),
                    name: "Osmia cornuta".to_string(),
                    probability: 0.95,
                    details: None,
                    similar_images: None,
                },
            ],
        };

        // Ranking is the service's, not re-sorted by probability
        assert_eq!(classification.top().map(|s| s.id.as_str()), Some("a"));
        assert!(Classification { suggestions: vec![] }.top().is_none());
    }
}
