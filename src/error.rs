use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by the XML document source.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("xml error: {0}")]
    Xml(String),
    #[error("document has no root element")]
    NoRootElement,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no document to load a floor plan from")]
    InvalidInput,
    #[error("malformed attribute '{attribute}' on <{element}>: {reason}")]
    MalformedAttribute {
        element: String,
        attribute: &'static str,
        reason: String,
    },
    #[error("duplicate cell at ({x}, {y}) on floor {level}")]
    DuplicateCell { level: i32, x: i32, y: i32 },
    #[error("floor level {level} defined more than once")]
    DuplicateFloor { level: i32 },
    #[error("floor {level} is already resolved and cannot take new tiles")]
    FloorSealed { level: i32 },
    #[error(transparent)]
    ParseFailure(#[from] DocumentError),
}

#[derive(Debug, Error)]
pub enum DumpError {
    #[error("xml write error: {0}")]
    Xml(String),
    #[error("json write error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
