//! unidoc Parser
//!
//! Parses a token stream from `unidoc-lexer` into a stream of structural
//! events: tag open/close, word runs, whitespace runs. Every event carries
//! its source span and a snapshot of its ancestor path.
//!
//! The parser's output is already well-formed (every tag closed, one root).
//! [`AutoCloser`] and [`AutoWrapper`] re-assert those guarantees as
//! independent stream-level stages, so event streams from other producers
//! can be repaired with the same machinery.

pub mod autoclose;
pub mod autowrap;
pub mod event;
pub mod parser;
pub mod path;

pub use autoclose::AutoCloser;
pub use autowrap::AutoWrapper;
pub use event::{ContentEvent, Event, EventKind, TagEvent};
pub use parser::Parser;
pub use path::{Path, PathElement, TagFrame};

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: i32,
    pub column: i32,
}

/// Parse source text through the full pipeline: parser, then
/// [`AutoCloser`], then [`AutoWrapper`].
pub fn parse_document(source: &str) -> Result<Vec<Event>, ParseError> {
    let events = Parser::parse(source)?;
    Ok(AutoWrapper::wrap(AutoCloser::close(events)))
}
