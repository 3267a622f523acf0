use thiserror::Error;

/// Failures while obtaining the inventory. Both are fatal for the run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Error running {command}: {message}")]
    InventorySource { command: String, message: String },

    #[error("Error parsing inventory JSON: {0}")]
    InventoryParse(#[from] serde_json::Error),
}

impl Error {
    pub fn source_failure(command: &str, message: impl Into<String>) -> Self {
        Error::InventorySource {
            command: command.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
