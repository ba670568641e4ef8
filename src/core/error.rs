use thiserror::Error;

/// Failure of a single feed fetch. Structural oddities inside a readable
/// document are not errors; the parser skips them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// DNS, connect, timeout or body read failure.
    #[error("transport error: {0}")]
    Transport(String),
    /// Upstream answered with a non-success status.
    #[error("upstream status {0}")]
    Status(u16),
    /// Body was not well-formed XML.
    #[error("malformed feed: {0}")]
    Malformed(String),
}

impl FeedError {
    /// Stable tag carried in the tool result next to the message.
    pub fn kind(&self) -> &'static str {
        match self {
            FeedError::Transport(_) => "transport",
            FeedError::Status(_) => "status",
            FeedError::Malformed(_) => "malformed",
        }
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        FeedError::Transport(e.to_string())
    }
}

impl From<quick_xml::encoding::EncodingError> for FeedError {
    fn from(e: quick_xml::encoding::EncodingError) -> Self {
        FeedError::Malformed(e.to_string())
    }
}

impl From<quick_xml::Error> for FeedError {
    fn from(e: quick_xml::Error) -> Self {
        FeedError::Malformed(e.to_string())
    }
}
