use std::path::PathBuf;

use thiserror::Error;

/// All errors that can occur when using the Bunny Stream client.
#[derive(Error, Debug)]
pub enum StreamError {
    /// The access key was rejected by the API (HTTP 401). Carries the
    /// configured key so operators can tell which credential failed.
    #[error("Authentication denied for access key '{access_key}'.")]
    Authentication { access_key: String },

    /// A video-scoped request returned HTTP 404. For [`fetch_video`] the
    /// identifier is the source URL, since no guid exists yet.
    ///
    /// [`fetch_video`]: crate::Client::fetch_video
    #[error("Could not find requested video: {id}")]
    VideoNotFound { id: String },

    /// A collection-scoped request returned HTTP 404.
    #[error("The requested collection was not found: {id}")]
    CollectionNotFound { id: String },

    /// The operation failed with a status the API does not give a more
    /// specific meaning. The message names the action that failed.
    #[error("{message}")]
    Operation { message: String },

    /// A local upload or caption file could not be read. Raised before any
    /// request is sent.
    #[error("could not read local file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A transport-level HTTP error from reqwest, including JSON decode
    /// failures on a success body.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The client could not be constructed from the given configuration.
    #[error("invalid client configuration: {message}")]
    Config { message: String },
}

/// A convenience alias for `Result<T, StreamError>`.
pub type Result<T> = std::result::Result<T, StreamError>;
