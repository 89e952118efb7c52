use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain the text of a preview cue sheet.
///
/// Parsing itself never fails; only getting hold of the bytes can.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request for '{url}' failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid URL '{0}'")]
    InvalidUrl(String),
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}
