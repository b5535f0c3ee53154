//! Human readable rendering of identifications

use kindwise_api::Identification;

/// Multi-line summary: header, timing, then ranked suggestions
pub fn summary(identification: &Identification) -> String {
    let mut lines = vec![
        format!(
            "Identification {} ({}, model {})",
            identification.access_token, identification.status, identification.model_version
        ),
        format!(
            "Created {}, completed in {} ms",
            identification.created.format("%Y-%m-%d %H:%M:%S UTC"),
            (identification.completed - identification.created).num_milliseconds()
        ),
    ];

    let suggestions = &identification.result.classification.suggestions;
    if suggestions.is_empty() {
        lines.push("No suggestions".to_string());
    }

    for (rank, suggestion) in suggestions.iter().enumerate() {
        let mut line = format!(
            "{:>3}. {} {:.2}%",
            rank + 1,
            suggestion.name,
            suggestion.probability * 100.0
        );
        if let Some(ref images) = suggestion.similar_images {
            line.push_str(&format!(" [{} similar images]", images.len()));
        }
        lines.push(line);
    }

    lines.join("\n")
}
