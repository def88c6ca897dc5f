use std::fmt;
#[derive(Debug)]
pub enum SpotFeedError {
    RequestError(reqwest::Error),
    ParseError(serde_json::Error),
    IoError(std::io::Error),
    Other(String),
}
impl fmt::Display for SpotFeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotFeedError::RequestError(e) => write!(f, "Request error: {}", e),
            SpotFeedError::ParseError(e) => write!(f, "Parse error: {}", e),
            SpotFeedError::IoError(e) => write!(f, "IO error: {}", e),
            SpotFeedError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}
impl std::error::Error for SpotFeedError {}
impl From<reqwest::Error> for SpotFeedError {
    fn from(err: reqwest::Error) -> Self {
        SpotFeedError::RequestError(err)
    }
}
impl From<serde_json::Error> for SpotFeedError {
    fn from(err: serde_json::Error) -> Self {
        SpotFeedError::ParseError(err)
    }
}
impl From<std::io::Error> for SpotFeedError {
    fn from(err: std::io::Error) -> Self {
        SpotFeedError::IoError(err)
    }
}
impl From<String> for SpotFeedError {
    fn from(s: String) -> SpotFeedError {
        SpotFeedError::Other(s)
    }
}
