//! Request construction
//!
//! Everything here produces a plain [`ApiRequest`] description; sending it is
//! the client's job. Apart from reading image files nothing touches the
//! outside world.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{KindwiseError, Result};

const API_KEY_HEADER: &str = "api-key";

/// Where an image to identify comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// File on the local filesystem
    Path(PathBuf),
    /// Raw image bytes
    Bytes(Vec<u8>),
    /// Payload that is already base64 encoded
    Base64(String),
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// Base64 payload for an image
///
/// Files are read completely and closed before returning.
pub async fn encode_image(source: &ImageSource) -> Result<String> {
    match source {
        ImageSource::Path(path) => {
            let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => KindwiseError::ImageNotFound(path.clone()),
                _ => KindwiseError::ImageRead {
                    path: path.clone(),
                    source: e,
                },
            })?;
            Ok(STANDARD.encode(bytes))
        }
        ImageSource::Bytes(bytes) => Ok(STANDARD.encode(bytes)),
        ImageSource::Base64(encoded) => Ok(encoded.clone()),
    }
}

/// Optional parameters of an identification request
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifyOptions {
    /// Ask the service for similar reference images
    pub similar_images: bool,
    /// Extra per-suggestion fields to return (query parameter `details`)
    pub details: Vec<String>,
    /// Language code for localized details
    pub language: Option<String>,
    /// Where the photo was taken
    pub latitude_longitude: Option<(f64, f64)>,
    pub custom_id: Option<i64>,
}

impl Default for IdentifyOptions {
    fn default() -> Self {
        Self {
            similar_images: true,
            details: Vec::new(),
            language: None,
            latitude_longitude: None,
            custom_id: None,
        }
    }
}

impl IdentifyOptions {
    pub fn similar_images(mut self, similar_images: bool) -> Self {
        self.similar_images = similar_images;
        self
    }

    pub fn details<I, S>(mut self, details: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.details = details.into_iter().map(Into::into).collect();
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn latitude_longitude(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude_longitude = Some((latitude, longitude));
        self
    }

    pub fn custom_id(mut self, custom_id: i64) -> Self {
        self.custom_id = Some(custom_id);
        self
    }
}

/// A fully described HTTP request, ready to be sent
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

#[derive(Debug, Serialize)]
struct IdentificationBody<'a> {
    images: &'a [String],
    similar_images: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_id: Option<i64>,
}

/// `POST /identification` for already encoded images
pub fn identification_request(
    config: &ClientConfig,
    images: &[String],
    options: &IdentifyOptions,
) -> Result<ApiRequest> {
    let (latitude, longitude) = match options.latitude_longitude {
        Some((lat, lon)) => {
            validate_coordinates(lat, lon)?;
            (Some(lat), Some(lon))
        }
        None => (None, None),
    };

    let body = IdentificationBody {
        images,
        similar_images: options.similar_images,
        latitude,
        longitude,
        custom_id: options.custom_id,
    };

    Ok(ApiRequest {
        method: Method::POST,
        url: format!(
            "{}/identification{}",
            config.base_url,
            query_string(&options.details, options.language.as_deref())
        ),
        headers: headers(&config.api_key)?,
        body: Some(serde_json::to_value(&body).map_err(|e| {
            KindwiseError::Config(format!("Failed to encode request body: {}", e))
        })?),
    })
}

/// `GET /identification/{access_token}`
pub fn get_identification_request(
    config: &ClientConfig,
    access_token: &str,
    details: &[String],
    language: Option<&str>,
) -> Result<ApiRequest> {
    Ok(ApiRequest {
        method: Method::GET,
        url: format!(
            "{}/identification/{}{}",
            config.base_url,
            urlencoding::encode(access_token),
            query_string(details, language)
        ),
        headers: headers(&config.api_key)?,
        body: None,
    })
}

/// `DELETE /identification/{access_token}`
pub fn delete_identification_request(
    config: &ClientConfig,
    access_token: &str,
) -> Result<ApiRequest> {
    Ok(ApiRequest {
        method: Method::DELETE,
        url: format!(
            "{}/identification/{}",
            config.base_url,
            urlencoding::encode(access_token)
        ),
        headers: headers(&config.api_key)?,
        body: None,
    })
}

/// `?details=a,b&language=xx`, or empty when neither is set
fn query_string(details: &[String], language: Option<&str>) -> String {
    let mut params = Vec::new();
    if !details.is_empty() {
        let joined: Vec<String> = details
            .iter()
            .map(|d| urlencoding::encode(d).into_owned())
            .collect();
        params.push(format!("details={}", joined.join(",")));
    }
    if let Some(lang) = language {
        params.push(format!("language={}", urlencoding::encode(lang)));
    }

    if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    }
}

fn headers(api_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let key = HeaderValue::from_str(api_key)
        .map_err(|_| KindwiseError::Config("API key is not a valid header value".to_string()))?;
    headers.insert(HeaderName::from_static(API_KEY_HEADER), key);
    Ok(headers)
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(KindwiseError::InvalidCoordinates(latitude, longitude));
    }
    Ok(())
}
