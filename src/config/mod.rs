#[cfg(feature = "cli")]
pub mod cli;
pub mod settings;
pub mod store;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use settings::Settings;
pub use store::JsonLocationStore;
