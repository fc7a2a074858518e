#![allow(dead_code)]

use async_trait::async_trait;
use badge_reader::core::frame;
use badge_reader::domain::model::{
    FeedbackKind, LocationDirectory, OperatorAction, RegistrationOutcome, RegistrationReport,
};
use badge_reader::domain::ports::{
    Channel, ChannelOpener, ChannelSettings, Feedback, LocationSource, LocationStore,
    OperatorConsole, Registrar,
};
use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::sync::{Arc, Mutex};

/// Reader replies handed out one per `read_frame`; an exhausted script reads nothing.
#[derive(Clone, Default)]
pub struct ScriptedChannel {
    replies: Arc<Mutex<VecDeque<io::Result<Vec<u8>>>>>,
    write_failures: Arc<Mutex<VecDeque<io::Error>>>,
    pub commands: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl ScriptedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn card(&self, id: [u8; 4]) -> &Self {
        self.push(Ok(frame::encode_response(id)))
    }

    pub fn nothing(&self) -> &Self {
        self.push(Ok(Vec::new()))
    }

    pub fn no_card(&self) -> &Self {
        let mut reply = frame::encode_response([0; 4]);
        reply[frame::MARKER_OFFSET] = 0x00;
        self.push(Ok(reply))
    }

    pub fn failure(&self) -> &Self {
        self.push(Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader unplugged")))
    }

    /// The next `write_command` fails instead of reaching the reader.
    pub fn write_failure(&self) -> &Self {
        self.write_failures
            .lock()
            .unwrap()
            .push_back(io::Error::new(io::ErrorKind::TimedOut, "write timed out"));
        self
    }

    fn push(&self, reply: io::Result<Vec<u8>>) -> &Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn command_count(&self) -> usize {
        self.commands.lock().unwrap().len()
    }
}

impl Channel for ScriptedChannel {
    fn write_command(&mut self, command: &[u8]) -> io::Result<()> {
        if let Some(e) = self.write_failures.lock().unwrap().pop_front() {
            return Err(e);
        }
        self.commands.lock().unwrap().push(command.to_vec());
        Ok(())
    }

    fn read_frame(&mut self, len: usize) -> io::Result<Vec<u8>> {
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Ok(mut bytes)) => {
                bytes.truncate(len);
                Ok(bytes)
            }
            Some(Err(e)) => Err(e),
            None => Ok(Vec::new()),
        }
    }
}

/// Opens the same scripted channel for every port except the ones marked missing.
#[derive(Clone, Default)]
pub struct ScriptedOpener {
    pub channel: ScriptedChannel,
    pub missing_ports: Vec<String>,
    pub opened: Arc<Mutex<Vec<(String, ChannelSettings)>>>,
}

impl ScriptedOpener {
    pub fn new(channel: ScriptedChannel) -> Self {
        Self {
            channel,
            ..Self::default()
        }
    }

    pub fn with_missing(mut self, port: &str) -> Self {
        self.missing_ports.push(port.to_string());
        self
    }
}

impl ChannelOpener for ScriptedOpener {
    fn open(&self, port: &str, settings: &ChannelSettings) -> io::Result<Box<dyn Channel>> {
        if self.missing_ports.iter().any(|p| p == port) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("No such file or directory: {}", port),
            ));
        }
        self.opened
            .lock()
            .unwrap()
            .push((port.to_string(), settings.clone()));
        Ok(Box::new(self.channel.clone()))
    }
}

/// Answers with queued outcomes (then `Accepted`) and remembers every report.
#[derive(Clone, Default)]
pub struct RecordingRegistrar {
    outcomes: Arc<Mutex<VecDeque<RegistrationOutcome>>>,
    pub reports: Arc<Mutex<Vec<RegistrationReport>>>,
}

impl RecordingRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&self, outcome: RegistrationOutcome) -> &Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }

    pub fn badge_codes(&self) -> Vec<String> {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.badge_code.to_string())
            .collect()
    }
}

#[async_trait]
impl Registrar for RecordingRegistrar {
    async fn submit(&self, report: &RegistrationReport) -> RegistrationOutcome {
        self.reports.lock().unwrap().push(report.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(RegistrationOutcome::Accepted)
    }
}

#[derive(Debug, Default)]
pub struct RecordingFeedback {
    pub signals: Vec<FeedbackKind>,
    pub lines: Vec<String>,
}

impl Feedback for RecordingFeedback {
    fn signal(&mut self, kind: FeedbackKind) {
        self.signals.push(kind);
    }

    fn log_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

pub struct StaticLocations(pub LocationDirectory);

impl StaticLocations {
    pub fn of(pairs: &[(&str, &str)]) -> Self {
        let entries: BTreeMap<String, String> = pairs
            .iter()
            .map(|(tag, name)| (tag.to_string(), name.to_string()))
            .collect();
        Self(LocationDirectory::new(entries))
    }
}

#[async_trait]
impl LocationSource for StaticLocations {
    async fn fetch_locations(&self) -> LocationDirectory {
        self.0.clone()
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    pub tag: Arc<Mutex<String>>,
}

impl LocationStore for MemoryStore {
    fn load(&self) -> badge_reader::Result<String> {
        Ok(self.tag.lock().unwrap().clone())
    }

    fn save(&mut self, tag: &str) -> badge_reader::Result<()> {
        *self.tag.lock().unwrap() = tag.to_string();
        Ok(())
    }
}

/// Plays back batches of operator actions, one batch per turn, then stops.
pub struct ScriptedConsole {
    turns: VecDeque<Vec<OperatorAction>>,
    pub turns_taken: usize,
}

impl ScriptedConsole {
    pub fn new(turns: Vec<Vec<OperatorAction>>) -> Self {
        Self {
            turns: turns.into(),
            turns_taken: 0,
        }
    }
}

#[async_trait]
impl OperatorConsole for ScriptedConsole {
    async fn next_actions(&mut self) -> Vec<OperatorAction> {
        self.turns_taken += 1;
        self.turns
            .pop_front()
            .unwrap_or_else(|| vec![OperatorAction::Stop])
    }
}
