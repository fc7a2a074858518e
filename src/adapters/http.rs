use crate::domain::model::{LocationDirectory, RegistrationOutcome, RegistrationReport};
use crate::domain::ports::{LocationSource, Registrar};
use crate::utils::error::{BadgeError, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

pub const REGISTRATION_PATH: &str = "/api/registration/add";
pub const LOCATIONS_PATH: &str = "/api/location/get";
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Deserialize)]
struct RegistrationResponse {
    status: bool,
}

/// Client for the remote badge registration service.
#[derive(Debug, Clone)]
pub struct BadgeServerClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl BadgeServerClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BadgeError::Config {
                message: format!("Cannot build HTTP client: {}", e),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Like `fetch_locations`, but keeps the failure reason.
    pub async fn try_fetch_locations(&self) -> Result<LocationDirectory> {
        let url = self.url(LOCATIONS_PATH);
        tracing::debug!("Fetching locations from {}", url);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| BadgeError::DirectoryFetch {
                message: e.to_string(),
            })?;

        if response.status() != StatusCode::OK {
            return Err(BadgeError::DirectoryFetch {
                message: format!("server answered {}", response.status()),
            });
        }

        let names: BTreeMap<String, String> =
            response
                .json()
                .await
                .map_err(|e| BadgeError::DirectoryFetch {
                    message: format!("unexpected directory body: {}", e),
                })?;
        Ok(LocationDirectory::from_name_to_tag(names))
    }
}

#[async_trait::async_trait]
impl LocationSource for BadgeServerClient {
    async fn fetch_locations(&self) -> LocationDirectory {
        match self.try_fetch_locations().await {
            Ok(directory) => directory,
            Err(e) => {
                tracing::warn!("{}", e);
                LocationDirectory::default()
            }
        }
    }
}

#[async_trait::async_trait]
impl Registrar for BadgeServerClient {
    async fn submit(&self, report: &RegistrationReport) -> RegistrationOutcome {
        let response = match self
            .client
            .post(self.url(REGISTRATION_PATH))
            .header(API_KEY_HEADER, &self.api_key)
            .json(report)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Registration request failed: {:?}", e);
                return RegistrationOutcome::TransportError(e.to_string());
            }
        };

        // only a 200 carries the accept/reject flag
        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("Registration of {} answered {}", report.badge_code, status);
            return RegistrationOutcome::Rejected;
        }

        match response.json::<RegistrationResponse>().await {
            Ok(RegistrationResponse { status: true }) => RegistrationOutcome::Accepted,
            Ok(RegistrationResponse { status: false }) => RegistrationOutcome::Rejected,
            Err(e) => RegistrationOutcome::TransportError(format!(
                "unexpected registration body: {}",
                e
            )),
        }
    }
}
