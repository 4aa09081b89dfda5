//! Command handlers for the ynab-sheet-sync CLI.

mod sync;

use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use sync::{sync, SyncReport};

/// What a command hands back to `main`: a one-line summary for the user plus the structured
/// result, which is only shown at debug verbosity.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    message: String,
    structure: T,
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn structure(&self) -> &T {
        &self.structure
    }

    /// Logs the message with `info!` and the structure, as JSON, with `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Ok(json) = serde_json::to_string_pretty(&self.structure) {
            debug!("Command output:\n\n{json}\n\n");
        }
    }
}
