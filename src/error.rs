use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A content block could not be rasterized (missing target, zero
    /// dimensions, undecodable asset).
    #[error("failed to render section {section}: {reason}")]
    Render { section: String, reason: String },

    /// A slice could not be encoded into the embedding image format.
    #[error("failed to encode slice {slice} of section {section}: {reason}")]
    Encoding {
        section: String,
        slice: usize,
        reason: String,
    },

    /// Export was requested before any content block was registered.
    #[error("no content sections to export")]
    MissingTarget,

    #[error("invalid export options: {0}")]
    Config(String),

    #[error("itinerary generation failed: {0}")]
    Generation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot {action} from the {from} view")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

impl Error {
    pub(crate) fn render(section: &str, reason: impl Into<String>) -> Self {
        Error::Render {
            section: section.to_string(),
            reason: reason.into(),
        }
    }
}
