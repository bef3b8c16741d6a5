pub mod dialogs;
pub mod error;
pub mod helpers;
pub mod state;
pub mod updater;

pub use error::{Error, Result};
