use thiserror::Error;

/// Fatal errors. Anything of this type ends the run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("at least one PROJECT must be provided")]
    NoProjects,

    #[error("invalid template: {0}")]
    Template(#[from] minijinja::Error),

    #[error("invalid endpoint pattern {pattern:?}: expected exactly one %s slot")]
    EndpointPattern { pattern: String },

    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Open(#[from] OpenError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to retrieve one endpoint. Logged, never fatal.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to get info for {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read response for {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Failure to render one payload. Never fatal.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to decode payload as JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("error executing template {template:?}: {message}")]
    Execute { template: String, message: String },

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum OpenError {
    #[error("Sorry, this platform is not supported: {0}")]
    UnsupportedPlatform(String),

    #[error("failed to launch {command}: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
