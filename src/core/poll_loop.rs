use crate::core::debounce::DebounceEngine;
use crate::core::frame;
use crate::domain::model::{CardIdentifier, ReadOutcome, RegistrationOutcome, RegistrationReport};
use crate::domain::ports::{Channel, ChannelOpener, ChannelSettings, Feedback, Registrar};
use crate::utils::error::{BadgeError, Result};
use std::time::Duration;

/// Pause after every reported read.
pub const REPORT_THROTTLE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unarmed,
    Armed,
    Polling,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not armed; nothing was sent to the reader.
    Idle,
    NoData,
    InvalidFrame,
    Suppressed(CardIdentifier),
    Reported(CardIdentifier, RegistrationOutcome),
}

/// Channel and debounce state of one armed session.
struct ActiveSession {
    port: String,
    location_key: String,
    channel: Box<dyn Channel>,
    debounce: DebounceEngine,
}

enum LoopState {
    Unarmed,
    Armed(ActiveSession),
    Polling(ActiveSession),
    Stopped,
}

pub struct PollLoop<R: Registrar> {
    registrar: R,
    opener: Box<dyn ChannelOpener>,
    settings: ChannelSettings,
    throttle: Duration,
    state: LoopState,
}

impl<R: Registrar> PollLoop<R> {
    pub fn new(registrar: R, opener: Box<dyn ChannelOpener>) -> Self {
        Self {
            registrar,
            opener,
            settings: ChannelSettings::reader(),
            throttle: REPORT_THROTTLE,
            state: LoopState::Unarmed,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            LoopState::Unarmed => Phase::Unarmed,
            LoopState::Armed(_) => Phase::Armed,
            LoopState::Polling(_) => Phase::Polling,
            LoopState::Stopped => Phase::Stopped,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.phase() == Phase::Stopped
    }

    pub fn port(&self) -> Option<&str> {
        self.active().map(|session| session.port.as_str())
    }

    pub fn debounce(&self) -> Option<&DebounceEngine> {
        self.active().map(|session| &session.debounce)
    }

    fn active(&self) -> Option<&ActiveSession> {
        match &self.state {
            LoopState::Armed(session) | LoopState::Polling(session) => Some(session),
            _ => None,
        }
    }

    /// Opens `port` and starts a fresh session reporting under `location_key`.
    /// A previous session, if any, is torn down first; on failure the loop is
    /// left unarmed.
    pub fn arm(&mut self, port: &str, location_key: &str, feedback: &mut dyn Feedback) -> Result<()> {
        if self.is_stopped() {
            return Err(BadgeError::AlreadyStopped);
        }
        // release the old port before reopening, it may be the same device
        self.state = LoopState::Unarmed;

        match self.opener.open(port, &self.settings) {
            Ok(channel) => {
                tracing::info!("Serial port {} opened, reporting for '{}'", port, location_key);
                feedback.log_line(&format!("OK, serial port {} in use", port));
                self.state = LoopState::Armed(ActiveSession {
                    port: port.to_string(),
                    location_key: location_key.to_string(),
                    channel,
                    debounce: DebounceEngine::new(),
                });
                Ok(())
            }
            Err(source) => {
                tracing::error!("Cannot open serial port {}: {}", port, source);
                feedback.log_line(&format!("ERROR, cannot use serial port {}: {}", port, source));
                Err(BadgeError::ChannelOpen {
                    port: port.to_string(),
                    source,
                })
            }
        }
    }

    /// Terminal: no tick does anything after this.
    pub fn stop(&mut self) {
        if !self.is_stopped() {
            tracing::info!("Polling stopped");
        }
        self.state = LoopState::Stopped;
    }

    /// One round-trip with the reader. Channel failures end the session and
    /// are returned; registration failures are only reported.
    pub async fn tick(&mut self, feedback: &mut dyn Feedback) -> Result<TickOutcome> {
        self.state = match std::mem::replace(&mut self.state, LoopState::Unarmed) {
            LoopState::Armed(session) => LoopState::Polling(session),
            other => other,
        };
        let LoopState::Polling(session) = &mut self.state else {
            return Ok(TickOutcome::Idle);
        };

        let read = session
            .channel
            .write_command(&frame::encode_read_command())
            .and_then(|_| session.channel.read_frame(frame::RESPONSE_LEN));
        let bytes = match read {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("Serial channel failed on {}: {}", session.port, e);
                self.state = LoopState::Unarmed;
                return Err(BadgeError::ChannelIo(e));
            }
        };

        let identifier = match frame::decode_response(&bytes) {
            ReadOutcome::NoData => return Ok(TickOutcome::NoData),
            ReadOutcome::InvalidFrame => {
                tracing::trace!("Ignoring frame without a card");
                return Ok(TickOutcome::InvalidFrame);
            }
            ReadOutcome::Valid(identifier) => identifier,
        };

        if !session.debounce.observe(&identifier) {
            tracing::trace!(
                "Suppressed repeat of {} ({} reads)",
                identifier,
                session.debounce.repeat_count()
            );
            return Ok(TickOutcome::Suppressed(identifier));
        }

        let report = RegistrationReport::now(&session.location_key, identifier.clone());
        tracing::debug!("Reporting {} at {}", report.badge_code, report.timestamp);
        let outcome = self.registrar.submit(&report).await;

        let line = match &outcome {
            RegistrationOutcome::Accepted => {
                format!("OK, {} at {}", report.badge_code, report.timestamp)
            }
            RegistrationOutcome::Rejected => {
                format!("REJECTED, {} at {}", report.badge_code, report.timestamp)
            }
            RegistrationOutcome::TransportError(message) => {
                tracing::warn!("Registration of {} not delivered: {}", report.badge_code, message);
                format!(
                    "FAILED, {} at {}: {}",
                    report.badge_code, report.timestamp, message
                )
            }
        };
        tracing::info!("{}", line);
        feedback.log_line(&line);
        feedback.signal(outcome.feedback());

        tokio::time::sleep(self.throttle).await;
        Ok(TickOutcome::Reported(identifier, outcome))
    }
}
