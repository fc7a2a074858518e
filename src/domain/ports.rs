use crate::domain::model::{
    FeedbackKind, LocationDirectory, OperatorAction, RegistrationOutcome, RegistrationReport,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::io;
use std::time::Duration;

/// Line settings used when opening the reader's serial channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSettings {
    pub baud_rate: u32,
    pub data_bits: u8,
    pub parity: bool,
    pub stop_bits: u8,
    pub read_timeout: Duration,
}

impl ChannelSettings {
    /// 115200 8N1, 100 ms read timeout.
    pub fn reader() -> Self {
        Self {
            baud_rate: 115_200,
            data_bits: 8,
            parity: false,
            stop_bits: 1,
            read_timeout: Duration::from_millis(100),
        }
    }
}

/// Byte channel to the card reader. Both calls block for at most the read timeout.
pub trait Channel: Send {
    fn write_command(&mut self, command: &[u8]) -> io::Result<()>;

    /// Reads until `len` bytes arrived or the read timeout elapsed.
    fn read_frame(&mut self, len: usize) -> io::Result<Vec<u8>>;
}

pub trait ChannelOpener: Send + Sync {
    fn open(&self, port: &str, settings: &ChannelSettings) -> io::Result<Box<dyn Channel>>;
}

#[async_trait]
pub trait Registrar: Send + Sync {
    /// Never fails: transport problems come back as `RegistrationOutcome::TransportError`.
    async fn submit(&self, report: &RegistrationReport) -> RegistrationOutcome;
}

#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Empty directory when the server cannot be reached.
    async fn fetch_locations(&self) -> LocationDirectory;
}

/// Tone and log-line capabilities of the presentation layer.
pub trait Feedback: Send {
    fn signal(&mut self, kind: FeedbackKind);
    fn log_line(&mut self, line: &str);
}

#[async_trait]
pub trait OperatorConsole: Send {
    /// Hands control to the presentation layer and returns what the operator did meanwhile.
    async fn next_actions(&mut self) -> Vec<OperatorAction>;
}

/// Durable storage of the selected location tag.
pub trait LocationStore: Send {
    fn load(&self) -> Result<String>;
    fn save(&mut self, tag: &str) -> Result<()>;
}
