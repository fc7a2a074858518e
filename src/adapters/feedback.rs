use crate::domain::model::FeedbackKind;
use crate::domain::ports::Feedback;
use std::io::Write;
use std::process::Command;

/// How this platform plays a tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Beeper {
    /// The `beep` utility (needs access to the PC speaker input device).
    BeepCommand,
    /// ASCII BEL on the controlling terminal.
    TerminalBell,
    Silent,
}

impl Beeper {
    pub fn for_platform() -> Self {
        if cfg!(target_os = "linux") {
            Beeper::BeepCommand
        } else {
            Beeper::TerminalBell
        }
    }

    pub fn tone(self, frequency_hz: u32, duration_ms: u64) {
        match self {
            Beeper::BeepCommand => {
                let status = Command::new("beep")
                    .arg("-f")
                    .arg(frequency_hz.to_string())
                    .arg("-l")
                    .arg(duration_ms.to_string())
                    .status();
                if let Err(e) = status {
                    tracing::warn!("Cannot run beep: {}", e);
                }
            }
            Beeper::TerminalBell => {
                let mut out = std::io::stdout();
                let _ = out.write_all(b"\x07").and_then(|_| out.flush());
            }
            Beeper::Silent => {}
        }
    }
}

/// Operator feedback on a terminal: tones through the platform beeper, log
/// lines on stdout.
#[derive(Debug)]
pub struct ConsoleFeedback {
    beeper: Beeper,
}

impl ConsoleFeedback {
    pub fn new(beeper: Beeper) -> Self {
        Self { beeper }
    }
}

impl Default for ConsoleFeedback {
    fn default() -> Self {
        Self::new(Beeper::for_platform())
    }
}

impl Feedback for ConsoleFeedback {
    fn signal(&mut self, kind: FeedbackKind) {
        self.beeper.tone(FeedbackKind::FREQUENCY_HZ, kind.duration_ms());
    }

    fn log_line(&mut self, line: &str) {
        println!("{}", line);
    }
}
