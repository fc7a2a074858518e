use crate::config::settings::Settings;
use crate::config::store::JsonLocationStore;
use crate::utils::error::{BadgeError, Result};
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "badge-reader")]
#[command(about = "Reports badges read by a USB card reader to the badge registration server")]
pub struct CliConfig {
    #[arg(long, default_value = "badge-reader.toml")]
    pub settings: PathBuf,

    #[arg(long, help = "Serial port of the reader (default: first USB reader found)")]
    pub port: Option<String>,

    #[arg(long, help = "Location tag to report under; remembered for next time")]
    pub location: Option<String>,

    #[arg(long, help = "Overrides server.base_url")]
    pub base_url: Option<String>,

    #[arg(long, help = "Overrides server.api_key")]
    pub api_key: Option<String>,

    #[arg(long, help = "List reader ports and exit")]
    pub list_ports: bool,

    #[arg(long, help = "List the server's locations and exit")]
    pub list_locations: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Settings file merged with command line overrides, validated.
    pub fn resolve_settings(&self) -> Result<Settings> {
        let mut settings = if self.settings.exists() {
            Settings::from_file(&self.settings)?
        } else {
            match (&self.base_url, &self.api_key) {
                (Some(base_url), Some(api_key)) => Settings::new(base_url, api_key),
                _ => {
                    return Err(BadgeError::Config {
                        message: format!(
                            "Settings file {} not found and --base-url/--api-key not given",
                            self.settings.display()
                        ),
                    })
                }
            }
        };

        if let Some(base_url) = &self.base_url {
            settings.server.base_url = base_url.clone();
        }
        if let Some(api_key) = &self.api_key {
            settings.server.api_key = api_key.clone();
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn location_file(&self, settings: &Settings) -> PathBuf {
        settings
            .storage
            .location_file
            .clone()
            .unwrap_or_else(JsonLocationStore::default_path)
    }
}
