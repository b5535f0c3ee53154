//! Shared test data: one completed bee identification

use chrono::DateTime;
use serde_json::{json, Value};

use crate::types::*;

pub(crate) fn identification_json() -> Value {
    json!({
        "access_token": "TDp7etcIfwK8LCh",
        "completed": 1700642966.580449,
        "created": 1700642966.136448,
        "custom_id": null,
        "input": {
            "datetime": "2023-11-22T08:49:26.136448+00:00",
            "images": ["https://insect.kindwise.com/media/images/2acb5cf7bd7a48b2afda07ef54f42e16.jpg"],
            "latitude": null,
            "longitude": null,
            "similar_images": true
        },
        "model_version": "insect_id:1.0.1",
        "result": {
            "classification": {
                "suggestions": [
                    {
                        "details": {"entity_id": "3a16a1c61de4d33b", "language": "en"},
                        "id": "3a16a1c61de4d33b",
                        "name": "Osmia bicornis",
                        "probability": 0.9998153,
                        "similar_images": [
                            {
                                "citation": "Maarten Trekels",
                                "id": "08d93df0e7ecc5391d18be8e645a6baa",
                                "license_name": "CC BY 4.0",
                                "license_url": "https://creativecommons.org/licenses/by/4.0/",
                                "similarity": 0.707,
                                "url": "https://insect-id.ams3.cdn.digitaloceanspaces.com/similar_images/1/08d/93df0e7ecc5391d18be8e645a6baa.jpeg",
                                "url_small": "https://insect-id.ams3.cdn.digitaloceanspaces.com/similar_images/1/08d/93df0e7ecc5391d18be8e645a6baa.small.jpeg"
                            },
                            {
                                "citation": "John Forrester",
                                "id": "c9b945dda9d60950972250171bf31808",
                                "license_name": "CC BY 4.0",
                                "license_url": "https://creativecommons.org/licenses/by/4.0/",
                                "similarity": 0.698,
                                "url": "https://insect-id.ams3.cdn.digitaloceanspaces.com/similar_images/1/c9b/945dda9d60950972250171bf31808.jpeg",
                                "url_small": "https://insect-id.ams3.cdn.digitaloceanspaces.com/similar_images/1/c9b/945dda9d60950972250171bf31808.small.jpeg"
                            }
                        ]
                    }
                ]
            }
        },
        "sla_compliant_client": true,
        "sla_compliant_system": true,
        "status": "COMPLETED"
    })
}

pub(crate) fn identification() -> Identification {
    let mut details = serde_json::Map::new();
    details.insert("entity_id".to_string(), json!("3a16a1c61de4d33b"));
    details.insert("language".to_string(), json!("en"));

    Identification {
        access_token: "TDp7etcIfwK8LCh".to_string(),
        model_version: "insect_id:1.0.1".to_string(),
        custom_id: None,
        input: Input {
            images: vec![
                "https://insect.kindwise.com/media/images/2acb5cf7bd7a48b2afda07ef54f42e16.jpg"
                    .to_string(),
            ],
            datetime: DateTime::parse_from_rfc3339("2023-11-22T08:49:26.136448+00:00").unwrap(),
            latitude: None,
            longitude: None,
            similar_images: true,
        },
        result: IdentificationResult {
            classification: Classification {
                suggestions: vec![Suggestion {
                    id: "3a16a1c61de4d33b".to_string(),
                    name: "Osmia bicornis".to_string(),
                    probability: 0.9998153,
                    details: Some(details),
                    similar_images: Some(vec![
                        SimilarImage {
                            id: "08d93df0e7ecc5391d18be8e645a6baa".to_string(),
                            url: "https://insect-id.ams3.cdn.digitaloceanspaces.com/similar_images/1/08d/93df0e7ecc5391d18be8e645a6baa.jpeg".to_string(),
                            url_small: "https://insect-id.ams3.cdn.digitaloceanspaces.com/similar_images/1/08d/93df0e7ecc5391d18be8e645a6baa.small.jpeg".to_string(),
                            similarity: 0.707,
                            license_name: "CC BY 4.0".to_string(),
                            license_url: "https://creativecommons.org/licenses/by/4.0/".to_string(),
                            citation: "Maarten Trekels".to_string(),
                        },
                        SimilarImage {
                            id: "c9b945dda9d60950972250171bf31808".to_string(),
                            url: "https://insect-id.ams3.cdn.digitaloceanspaces.com/similar_images/1/c9b/945dda9d60950972250171bf31808.jpeg".to_string(),
                            url_small: "https://insect-id.ams3.cdn.digitaloceanspaces.com/similar_images/1/c9b/945dda9d60950972250171bf31808.small.jpeg".to_string(),
                            similarity: 0.698,
                            license_name: "CC BY 4.0".to_string(),
                            license_url: "https://creativecommons.org/licenses/by/4.0/".to_string(),
                            citation: "John Forrester".to_string(),
                        },
                    ]),
                }],
            },
        },
        status: IdentificationStatus::Completed,
        sla_compliant_client: true,
        sla_compliant_system: true,
        created: DateTime::from_timestamp_micros(1_700_642_966_136_448).unwrap(),
        completed: DateTime::from_timestamp_micros(1_700_642_966_580_449).unwrap(),
    }
}
