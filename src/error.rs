//! Error types for widget setup and action dispatch.

use thiserror::Error;

/// Failures surfaced by the widget.
///
/// Element lookup errors are fatal to mounting. `InvalidIdentifier` is a contract
/// violation between the dropdown and the controller. `Request` is produced by
/// [`CatalogApi`](crate::CatalogApi) implementations and is only ever logged.
#[derive(Debug, Error)]
pub enum Error {
    /// No element matched the selector.
    #[error("element not found: {selector}")]
    MissingElement { selector: String },

    /// The selector matched an element of the wrong kind.
    #[error("element `{selector}` is not {expected}")]
    WrongElementKind {
        selector: String,
        expected: &'static str,
    },

    /// An item action carried an identifier that is not a primary key.
    #[error("invalid item identifier: {0:?}")]
    InvalidIdentifier(String),

    /// A catalog API call failed.
    #[error("request failed: {0}")]
    Request(String),

    /// The timer thread could not be started.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for widget operations.
pub type Result<T> = std::result::Result<T, Error>;
