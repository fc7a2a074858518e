pub mod debounce;
pub mod frame;
pub mod poll_loop;
pub mod server;
pub mod session;

pub use crate::domain::model::{CardIdentifier, ReadOutcome, RegistrationOutcome};
pub use crate::domain::ports::{Channel, ChannelOpener, Feedback, LocationSource, Registrar};
pub use crate::utils::error::Result;
