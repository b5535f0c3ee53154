//! insect-id - identify insects in photos from the command line
//!
//! Thin front end over the `kindwise-api` client.

mod cli;
mod error;
mod output;

use clap::Parser;
use kindwise_api::{IdentificationOutput, ImageSource, InsectClient};
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::cli::{identify_options, response_format, Cli, Command};
use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging on stderr so stdout carries only results
    let env_filter = EnvFilter::from_default_env()
        .add_directive("insect_id=info".parse()?)
        .add_directive("kindwise_api=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    };

    let cli = Cli::parse();
    let config = cli.client_config()?;
    debug!(base_url = %config.base_url, "Using Kindwise endpoint");
    let client = InsectClient::with_config(config)?;

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
            let options = identify_options(
                no_similar_images,
                &details,
                language.as_deref(),
                lat,
                lon,
                custom_id,
            );
            let sources: Vec<ImageSource> = images.into_iter().map(ImageSource::Path).collect();
            info!(images = sources.len(), "Submitting identification");

            let identification = client
                .identify_as(&sources, &options, response_format(json))
                .await?;
            print_output(&identification)?;
        }
        Command::Get {
            access_token,
            details,
            language,
            json,
        } => {
            let identification = client
                .get_identification_as(
                    &access_token,
                    &details,
                    language.as_deref(),
                    response_format(json),
                )
                .await?;
            print_output(&identification)?;
        }
        Command::Delete { access_token } => {
            client.delete_identification(&access_token).await?;
            info!(access_token = %access_token, "Deleted identification");
        }
    }

    Ok(())
}

fn print_output(identification: &IdentificationOutput) -> Result<()> {
    match identification {
        IdentificationOutput::Typed(identification) => {
            println!("{}", output::summary(identification));
        }
        IdentificationOutput::Json(body) => {
            println!("{}", serde_json::to_string_pretty(body)?);
        }
    }
    Ok(())
}
