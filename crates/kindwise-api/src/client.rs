//! Kindwise insect identification HTTP client

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{KindwiseError, Result};
use crate::request::{self, ApiRequest, IdentifyOptions, ImageSource};
use crate::types::Identification;

/// How an identification is handed back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Typed [`Identification`]
    #[default]
    Typed,
    /// The response JSON exactly as received
    Json,
}

/// An identification in the format the caller asked for
#[derive(Debug, Clone, PartialEq)]
pub enum IdentificationOutput {
    Typed(Identification),
    Json(Value),
}

impl IdentificationOutput {
    /// Validate the response body and shape it as requested
    ///
    /// The body is always mapped onto the typed model first, so a malformed
    /// response fails in both formats.
    pub fn from_body(body: Value, format: ResponseFormat) -> Result<Self> {
        let identification = Identification::from_value(&body)?;
        Ok(match format {
            ResponseFormat::Typed => Self::Typed(identification),
            ResponseFormat::Json => Self::Json(body),
        })
    }
}

/// Client for the Kindwise insect identification API
///
/// Holds only immutable configuration and a connection pool, so independent
/// calls may run concurrently on one instance.
pub struct InsectClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl InsectClient {
    /// Create a client for the default endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(api_key))
    }

    /// Create a client from explicit configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// Create a client configured from `KINDWISE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// URL identifications are posted to
    pub fn identify_url(&self) -> String {
        format!("{}/identification", self.config.base_url)
    }

    /// Build the identification request for one or more images
    ///
    /// All images are read and encoded before anything is sent.
    pub async fn identification_request(
        &self,
        images: &[ImageSource],
        options: &IdentifyOptions,
    ) -> Result<ApiRequest> {
        let mut encoded = Vec::with_capacity(images.len());
        for image in images {
            encoded.push(request::encode_image(image).await?);
        }
        request::identification_request(&self.config, &encoded, options)
    }

    /// Identify the insect in a single image
    pub async fn identify(
        &self,
        image: impl Into<ImageSource>,
        options: &IdentifyOptions,
    ) -> Result<Identification> {
        let request = self.identification_request(&[image.into()], options).await?;
        let body = self.execute_json(request).await?;
        Ok(Identification::from_value(&body)?)
    }

    /// Identify images, returning the typed model or the raw JSON body
    pub async fn identify_as(
        &self,
        images: &[ImageSource],
        options: &IdentifyOptions,
        format: ResponseFormat,
    ) -> Result<IdentificationOutput> {
        let request = self.identification_request(images, options).await?;
        let body = self.execute_json(request).await?;
        IdentificationOutput::from_body(body, format)
    }

    /// Fetch a previously created identification by access token
    pub async fn get_identification(
        &self,
        access_token: &str,
        details: &[String],
        language: Option<&str>,
    ) -> Result<Identification> {
        let request =
            request::get_identification_request(&self.config, access_token, details, language)?;
        let body = self.execute_json(request).await?;
        Ok(Identification::from_value(&body)?)
    }

    /// Like [`Self::get_identification`], in the requested format
    pub async fn get_identification_as(
        &self,
        access_token: &str,
        details: &[String],
        language: Option<&str>,
        format: ResponseFormat,
    ) -> Result<IdentificationOutput> {
        let request =
            request::get_identification_request(&self.config, access_token, details, language)?;
        let body = self.execute_json(request).await?;
        IdentificationOutput::from_body(body, format)
    }

    /// Delete an identification by access token
    pub async fn delete_identification(&self, access_token: &str) -> Result<()> {
        let request = request::delete_identification_request(&self.config, access_token)?;
        self.execute(request).await?;
        Ok(())
    }

    /// Send a request and decode the JSON response body
    pub async fn execute_json(&self, request: ApiRequest) -> Result<Value> {
        let response = self.execute(request).await?;
        Ok(response.json().await?)
    }

    /// Send a request; non-success statuses become [`KindwiseError::Api`]
    pub async fn execute(&self, request: ApiRequest) -> Result<reqwest::Response> {
        debug!(method = %request.method, url = %request.url, "Sending Kindwise request");

        let mut builder = self
            .http
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, url = %request.url, "Kindwise API returned error");
            return Err(KindwiseError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}
