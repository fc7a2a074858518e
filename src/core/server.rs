use crate::core::poll_loop::{Phase, PollLoop, TickOutcome};
use crate::core::session::Session;
use crate::domain::model::OperatorAction;
use crate::domain::ports::{Feedback, LocationSource, LocationStore, OperatorConsole, Registrar};
use crate::utils::error::Result;
use std::time::Duration;

/// Pause between console turns while nothing is armed.
const IDLE_PAUSE: Duration = Duration::from_millis(50);

/// Ties operator actions, session configuration and the poll loop together
/// on a single cooperative control loop.
pub struct BadgeServer<S: LocationStore, R: Registrar, F: Feedback> {
    session: Session<S>,
    poll_loop: PollLoop<R>,
    feedback: F,
}

impl<S: LocationStore, R: Registrar, F: Feedback> BadgeServer<S, R, F> {
    pub fn new(session: Session<S>, poll_loop: PollLoop<R>, feedback: F) -> Self {
        Self {
            session,
            poll_loop,
            feedback,
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn poll_loop(&self) -> &PollLoop<R> {
        &self.poll_loop
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    /// (Re)configures the session: fresh location directory, default selections.
    pub async fn configure(&mut self, source: &dyn LocationSource, ports: &[String]) {
        if self.session.refresh_directory(source).await.is_empty() {
            tracing::warn!("No locations received from the badge server");
            self.feedback.log_line("Cannot connect to the badge server");
        }
        self.session.apply_defaults(ports);
    }

    pub fn handle(&mut self, action: OperatorAction) -> Result<()> {
        tracing::debug!("Operator action: {:?}", action);
        match action {
            OperatorAction::SelectPort(port) => {
                self.session.select_port(&port);
                Ok(())
            }
            OperatorAction::SelectLocation(tag) => self.session.select_location(&tag),
            OperatorAction::Start => {
                let target = self.session.arming_target()?;
                self.poll_loop
                    .arm(&target.port, &target.location_key, &mut self.feedback)
            }
            OperatorAction::Stop => {
                self.poll_loop.stop();
                Ok(())
            }
        }
    }

    /// Runs until the operator stops the session or the reader fails.
    pub async fn run(&mut self, console: &mut dyn OperatorConsole) -> Result<()> {
        tracing::info!("Control loop running");
        loop {
            for action in console.next_actions().await {
                if let Err(e) = self.handle(action) {
                    if !e.is_recoverable() {
                        return Err(e);
                    }
                    tracing::warn!("{} ({})", e, e.recovery_suggestion());
                    self.feedback.log_line(&e.user_friendly_message());
                }
            }

            if self.poll_loop.phase() == Phase::Stopped {
                break;
            }

            if let TickOutcome::Idle = self.poll_loop.tick(&mut self.feedback).await? {
                tokio::time::sleep(IDLE_PAUSE).await;
            }
        }
        tracing::info!("Control loop finished");
        Ok(())
    }
}
