pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{JsonLocationStore, Settings};

pub use crate::core::{
    poll_loop::{Phase, PollLoop, TickOutcome},
    server::BadgeServer,
    session::Session,
};
pub use utils::error::{BadgeError, Result};
