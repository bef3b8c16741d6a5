// Application state management

pub mod config;
pub mod events;
pub mod settings;
pub mod status;

pub use config::ConfigManager;
pub use events::AppEvent;
pub use settings::{AppSettings, UpdateSettings};
pub use status::{StatusLevel, StatusMessage};
