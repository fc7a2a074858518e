use crate::domain::model::{LocationDirectory, SessionConfig};
use crate::domain::ports::{LocationSource, LocationStore};
use crate::utils::error::{BadgeError, Result};

/// What the poll loop needs to arm a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmingTarget {
    pub port: String,
    pub location_tag: String,
    /// Directory name of the tag; sent as `location_key` in every report.
    pub location_key: String,
}

/// Operator selections plus the location directory of the current configuration.
pub struct Session<S: LocationStore> {
    store: S,
    persisted_tag: String,
    config: SessionConfig,
    directory: LocationDirectory,
}

impl<S: LocationStore> Session<S> {
    pub fn new(store: S) -> Result<Self> {
        let persisted_tag = store.load()?;
        tracing::debug!("Persisted location tag: '{}'", persisted_tag);
        Ok(Self {
            store,
            persisted_tag,
            config: SessionConfig::default(),
            directory: LocationDirectory::default(),
        })
    }

    /// Fetches a fresh directory; an unreachable server leaves it empty.
    pub async fn refresh_directory(&mut self, source: &dyn LocationSource) -> &LocationDirectory {
        self.directory = source.fetch_locations().await;
        tracing::info!("Location directory holds {} entries", self.directory.len());
        &self.directory
    }

    pub fn set_directory(&mut self, directory: LocationDirectory) {
        self.directory = directory;
    }

    pub fn directory(&self) -> &LocationDirectory {
        &self.directory
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Persisted tag if set and still offered, else the smallest offered tag, else empty.
    pub fn default_location_tag(&self) -> String {
        if !self.persisted_tag.is_empty() && self.directory.contains(&self.persisted_tag) {
            return self.persisted_tag.clone();
        }
        self.directory
            .tags()
            .first()
            .map(|tag| tag.to_string())
            .unwrap_or_default()
    }

    /// Preselects the first reader port and the default location, like the
    /// operator would see them offered.
    pub fn apply_defaults(&mut self, ports: &[String]) {
        if self.config.selected_port.is_none() {
            self.config.selected_port = ports.first().cloned();
        }
        if self.config.selected_location_tag.is_none() {
            let tag = self.default_location_tag();
            if !tag.is_empty() {
                self.config.selected_location_tag = Some(tag);
            }
        }
    }

    pub fn select_port(&mut self, port: &str) {
        tracing::debug!("Selected port {}", port);
        self.config.selected_port = Some(port.to_string());
    }

    /// Selects a location and writes it through to durable storage.
    pub fn select_location(&mut self, tag: &str) -> Result<()> {
        self.store.save(tag)?;
        self.persisted_tag = tag.to_string();
        self.config.selected_location_tag = Some(tag.to_string());
        tracing::debug!("Selected location {}", tag);
        Ok(())
    }

    pub fn arming_target(&self) -> Result<ArmingTarget> {
        let port = self
            .config
            .selected_port
            .as_deref()
            .filter(|port| !port.is_empty())
            .ok_or_else(|| BadgeError::MissingPrecondition {
                field: "serial port".to_string(),
            })?;
        let tag = self
            .config
            .selected_location_tag
            .as_deref()
            .filter(|tag| !tag.is_empty())
            .ok_or_else(|| BadgeError::MissingPrecondition {
                field: "location".to_string(),
            })?;
        let name = self
            .directory
            .name(tag)
            .ok_or_else(|| BadgeError::UnknownLocation {
                tag: tag.to_string(),
            })?;

        Ok(ArmingTarget {
            port: port.to_string(),
            location_tag: tag.to_string(),
            location_key: name.to_string(),
        })
    }
}
