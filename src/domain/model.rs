use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Card identifier read from the reader: 8 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardIdentifier(String);

impl CardIdentifier {
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of decoding one response from the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    NoData,
    InvalidFrame,
    Valid(CardIdentifier),
}

/// Body of `POST /api/registration/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationReport {
    pub location_key: String,
    pub badge_code: CardIdentifier,
    pub timestamp: String,
}

impl RegistrationReport {
    /// Builds a report stamped with the local time, second precision.
    pub fn now(location_key: &str, badge_code: CardIdentifier) -> Self {
        Self {
            location_key: location_key.to_string(),
            badge_code,
            timestamp: chrono::Local::now()
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Accepted,
    Rejected,
    TransportError(String),
}

impl RegistrationOutcome {
    pub fn feedback(&self) -> FeedbackKind {
        match self {
            RegistrationOutcome::Accepted => FeedbackKind::Accepted,
            _ => FeedbackKind::Rejected,
        }
    }
}

/// Audible feedback requested from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Accepted,
    Rejected,
}

impl FeedbackKind {
    pub const FREQUENCY_HZ: u32 = 1500;

    pub fn duration_ms(self) -> u64 {
        match self {
            FeedbackKind::Accepted => 200,
            FeedbackKind::Rejected => 800,
        }
    }
}

/// Location tag -> human-readable location name, as offered by the badge server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationDirectory {
    entries: BTreeMap<String, String>,
}

impl LocationDirectory {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// The server answers with `name -> tag`; the directory is keyed by tag.
    pub fn from_name_to_tag(names: BTreeMap<String, String>) -> Self {
        Self {
            entries: names.into_iter().map(|(name, tag)| (tag, name)).collect(),
        }
    }

    /// Tags in lexicographic order.
    pub fn tags(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn name(&self, tag: &str) -> Option<&str> {
        self.entries.get(tag).map(String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub selected_port: Option<String>,
    pub selected_location_tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorAction {
    SelectPort(String),
    SelectLocation(String),
    Start,
    Stop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_identifier_is_lowercase_hex() {
        let id = CardIdentifier::from_bytes([0x1A, 0x2B, 0x03, 0xFF]);
        assert_eq!(id.as_str(), "1a2b03ff");
    }

    #[test]
    fn test_report_timestamp_has_second_precision() {
        let report = RegistrationReport::now("Hall", CardIdentifier::from_bytes([0; 4]));
        assert_eq!(report.timestamp.len(), 19);
        assert_eq!(&report.timestamp[10..11], "T");
        assert!(!report.timestamp.contains('.'));
    }

    #[test]
    fn test_report_serializes_with_wire_field_names() {
        let report = RegistrationReport {
            location_key: "Hall".to_string(),
            badge_code: CardIdentifier::from_bytes([0x1a, 0x2b, 0x3c, 0x4d]),
            timestamp: "2026-10-19T08:30:00".to_string(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "location_key": "Hall",
                "badge_code": "1a2b3c4d",
                "timestamp": "2026-10-19T08:30:00"
            })
        );
    }

    #[test]
    fn test_directory_is_keyed_by_tag() {
        let mut names = BTreeMap::new();
        names.insert("Main hall".to_string(), "MH".to_string());
        names.insert("Annex".to_string(), "AX".to_string());
        let directory = LocationDirectory::from_name_to_tag(names);

        assert_eq!(directory.tags(), vec!["AX", "MH"]);
        assert_eq!(directory.name("MH"), Some("Main hall"));
        assert!(!directory.contains("Main hall"));
    }

    #[test]
    fn test_only_accepted_gets_success_tone() {
        assert_eq!(RegistrationOutcome::Accepted.feedback(), FeedbackKind::Accepted);
        assert_eq!(RegistrationOutcome::Rejected.feedback(), FeedbackKind::Rejected);
        assert_eq!(
            RegistrationOutcome::TransportError("timeout".to_string()).feedback(),
            FeedbackKind::Rejected
        );
        assert_eq!(FeedbackKind::Accepted.duration_ms(), 200);
        assert_eq!(FeedbackKind::Rejected.duration_ms(), 800);
    }
}
