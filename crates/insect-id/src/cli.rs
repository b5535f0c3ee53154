use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use kindwise_api::{ClientConfig, IdentifyOptions, ResponseFormat};

use crate::error::{CliError, Result};

/// Identify insects in photos with the Kindwise API
#[derive(Debug, Parser)]
#[command(name = "insect-id", version)]
pub struct Cli {
    /// Kindwise API key
    #[arg(long, env = "KINDWISE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API base URL
    #[arg(long, env = "KINDWISE_INSECT_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "KINDWISE_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit one or more photos of the same insect
    Identify {
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Skip the similar image search
        #[arg(long)]
        no_similar_images: bool,

        /// Extra suggestion fields, comma separated (e.g. common_names,url)
        #[arg(long, value_delimiter = ',')]
        details: Vec<String>,

        /// Language code for details
        #[arg(long)]
        language: Option<String>,

        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        #[arg(long)]
        custom_id: Option<i64>,

        /// Print the response JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Fetch an existing identification
    Get {
        access_token: String,

        #[arg(long, value_delimiter = ',')]
        details: Vec<String>,

        #[arg(long)]
        language: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// Delete an identification
    Delete { access_token: String },
}

impl Cli {
    /// Client configuration from flags (which already fall back to the environment)
    pub fn client_config(&self) -> Result<ClientConfig> {
        let api_key = self
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                CliError::Config("--api-key or KINDWISE_API_KEY is required".to_string())
            })?;

        let mut config = ClientConfig::new(api_key);
        if let Some(ref base_url) = self.base_url {
            config = config.with_base_url(base_url.as_str());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

/// Identification options for the `identify` subcommand
pub fn identify_options(
    no_similar_images: bool,
    details: &[String],
    language: Option<&str>,
    lat: Option<f64>,
    lon: Option<f64>,
    custom_id: Option<i64>,
) -> IdentifyOptions {
    let mut options = IdentifyOptions::default()
        .similar_images(!no_similar_images)
        .details(details.iter().map(|d| d.trim()).filter(|d| !d.is_empty()));
    if let Some(lang) = language {
        options = options.language(lang);
    }
    if let (Some(lat), Some(lon)) = (lat, lon) {
        options = options.latitude_longitude(lat, lon);
    }
    if let Some(id) = custom_id {
        options = options.custom_id(id);
    }
    options
}

pub fn response_format(json: bool) -> ResponseFormat {
    if json {
        ResponseFormat::Json
    } else {
        ResponseFormat::Typed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identify() {
        let cli = Cli::try_parse_from([
            "insect-id",
            "--api-key",
            "secret",
            "identify",
            "bee.jpeg",
            "--details",
            "common_names,url",
            "--language",
            "cz",
            "--lat",
            "49.2",
            "--lon",
            "-16.6",
            "--no-similar-images",
        ])
        .unwrap();

        assert_eq!(cli.api_key.as_deref(), Some("secret"));
        match cli.command {
            Command::Identify {
                images,
                no_similar_images,
                details,
                language,
                lat,
                lon,
                custom_id,
                json,
            } => {
                assert_eq!(images, vec![PathBuf::from("bee.jpeg")]);
                assert!(no_similar_images);
                assert_eq!(details, vec!["common_names", "url"]);
                assert_eq!(language.as_deref(), Some("cz"));
                assert_eq!(lat, Some(49.2));
                assert_eq!(lon, Some(-16.6));
                assert_eq!(custom_id, None);
                assert!(!json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_lat_requires_lon() {
        let result = Cli::try_parse_from([
            "insect-id",
            "--api-key",
            "secret",
            "identify",
            "bee.jpeg",
            "--lat",
            "49.2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_identify_requires_image() {
        let result = Cli::try_parse_from(["insect-id", "--api-key", "secret", "identify"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_identify_options() {
        let options = identify_options(
            true,
            &["image".to_string(), " ".to_string()],
            Some("cz"),
            Some(1.0),
            Some(2.0),
            Some(5),
        );
        assert!(!options.similar_images);
        assert_eq!(options.details, vec!["image"]);
        assert_eq!(options.language.as_deref(), Some("cz"));
        assert_eq!(options.latitude_longitude, Some((1.0, 2.0)));
        assert_eq!(options.custom_id, Some(5));

        assert_eq!(
            identify_options(false, &[], None, None, None, None),
            IdentifyOptions::default()
        );
    }

    #[test]
    fn test_client_config() {
        let cli = Cli::try_parse_from([
            "insect-id",
            "--api-key",
            "secret",
            "--base-url",
            "http://localhost:9000/api/v1/",
            "--timeout-secs",
            "5",
            "delete",
            "abc",
        ])
        .unwrap();

        let config = cli.client_config().unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, "http://localhost:9000/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_response_format() {
        assert_eq!(response_format(true), ResponseFormat::Json);
        assert_eq!(response_format(false), ResponseFormat::Typed);
    }
}
