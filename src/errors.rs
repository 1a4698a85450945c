use std::path::PathBuf;

use thiserror::Error;

use crate::netrc::NetrcError;

#[derive(Error, Debug)]
pub enum HkError {
    #[error("no command given")]
    MissingCommand,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Unrecognized global option '{0}'")]
    InvalidGlobalOption(String),

    #[error("Unrecognized argument '{arg}'. See 'hk help {command}'")]
    UnrecognizedArgument { arg: String, command: String },

    #[error("Invalid arguments for '{0}'. See 'hk help {0}'")]
    InvalidArguments(String),

    #[error("Unknown help topic: {0:?}. Run 'hk help'.")]
    UnknownHelpTopic(String),

    #[error("Unable to get home directory")]
    HomeDirectory,

    #[error("Unable to read {}", .path.display())]
    CredentialStoreUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to parse {}", .path.display())]
    CredentialStoreMalformed {
        path: PathBuf,
        #[source]
        source: NetrcError,
    },

    #[error("No credentials for {host} in {}", .path.display())]
    NoCredentials { host: String, path: PathBuf },

    #[error("Invalid URL {0:?}")]
    InvalidUrl(String, #[source] url::ParseError),

    #[error("Failed to fetch")]
    FetchError(#[from] reqwest::Error),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Unexpected error")]
    UnexpectedStatus { response: String },

    #[error("Unexpected error")]
    Decode(#[source] serde_json::Error),
}

impl HkError {
    /// Usage errors are followed by the full command listing.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            HkError::MissingCommand | HkError::UnknownCommand(_) | HkError::InvalidGlobalOption(_)
        )
    }
}
