//! Rust client for the Kindwise insect identification API
//!
//! Submits photos to `https://insect.kindwise.com/api/v1` and maps the
//! response onto a typed [`Identification`], or hands back the raw JSON.
//!
//! # Example
//!
//! ```no_run
//! use kindwise_api::{IdentifyOptions, InsectClient};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), kindwise_api::KindwiseError> {
//! let client = InsectClient::new("your-api-key")?;
//!
//! let options = IdentifyOptions::default()
//!     .details(["common_names", "url"])
//!     .language("en")
//!     .latitude_longitude(49.207, 16.608);
//! let identification = client.identify(Path::new("bee.jpeg"), &options).await?;
//!
//! for suggestion in &identification.result.classification.suggestions {
//!     println!("{} ({:.1}%)", suggestion.name, suggestion.probability * 100.0);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - `POST /identification` - Identify one or more images
//! - `GET /identification/{access_token}` - Fetch an existing identification
//! - `DELETE /identification/{access_token}` - Delete an identification

mod client;
mod config;
mod error;
mod mapping;
mod request;
mod types;

#[cfg(test)]
mod fixtures;

pub use client::{IdentificationOutput, InsectClient, ResponseFormat};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{KindwiseError, MappingError, Result};
pub use request::{
    delete_identification_request, encode_image, get_identification_request,
    identification_request, ApiRequest, IdentifyOptions, ImageSource,
};
pub use types::{
    Classification, Identification, IdentificationResult, IdentificationStatus, Input,
    SimilarImage, Suggestion,
};
