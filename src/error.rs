//! # Error Types
//!
//! This module defines error types used throughout the plotline library.

use thiserror::Error;

/// Failure while reading path data or a `points` attribute.
///
/// A parse error only fails the element it came from; the document
/// collector drops that element and keeps going.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Nothing to parse
    #[error("empty geometry data")]
    Empty,

    /// A character that is neither a command, a number nor a separator
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },

    /// A number with no command to consume it
    #[error("unexpected number at offset {offset}")]
    UnexpectedNumber { offset: usize },

    /// A command ran out of arguments
    #[error("command '{command}' needs {expected} arguments, found {found}")]
    MissingArguments {
        command: char,
        expected: usize,
        found: usize,
    },

    /// Quadratic and arc commands
    #[error("command '{0}' is not supported")]
    UnsupportedCommand(char),

    /// A numeric literal that does not parse
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    /// A `points` token that is not an `x,y` pair
    #[error("invalid point '{0}'")]
    InvalidPoint(String),

    /// A coordinate overflowed to infinity or NaN
    #[error("coordinate is not finite")]
    NonFinite,
}

/// Main error type for plotline operations
#[derive(Debug, Error)]
pub enum PlotlineError {
    /// Path or points data could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The markup itself is malformed
    #[error("Document error: {0}")]
    Document(String),

    /// No usable geometry to build a mask from
    #[error("Artwork has no extent to fit on the canvas")]
    EmptyArtwork,

    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),

    /// Transport-level errors (connection, I/O)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Image processing error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON config error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
