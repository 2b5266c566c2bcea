//! Error types for the Newick description parser.
//!
//! This module provides [ParseError] and [ParseErrorKind] for representing
//! and reporting errors that occur while parsing tree descriptions. A failed
//! parse never yields a partial hierarchy; the error carries the byte
//! position and a short context window of the offending input.

use crate::parser::byte_parser::ByteParser;
use thiserror::Error;

/// Default length of context provided by errors from the parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSE ERROR KIND
// =#========================================================================#=
/// Error categories that can occur while parsing a tree description.
#[derive(PartialEq, Debug, Clone, Error)]
pub enum ParseErrorKind {
    /// Input ended while a group was still open or a token was expected.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Parentheses do not balance (missing `)` or stray `)`).
    #[error("unbalanced parentheses - {0}")]
    UnbalancedParentheses(String),

    /// The token after `:` is not a finite floating-point number.
    #[error("invalid branch length: {0}")]
    InvalidBranchLength(String),

    /// Malformed description (missing delimiter, empty leaf label, ...).
    #[error("invalid tree description - {0}")]
    InvalidDescription(String),

    /// Non-whitespace content after the tree terminator.
    #[error("unexpected content after end of tree")]
    TrailingContent,
}

// =#========================================================================#=
// PARSE ERROR
// =#========================================================================#=
/// Parsing error with contextual information (position and surrounding bytes).
#[derive(Debug, Error)]
#[error("{kind} at position {position}; context: {context:?}")]
pub struct ParseError {
    kind: ParseErrorKind,
    position: usize,
    context: String,
}

impl ParseError {
    /// Creates a `ParseError` from an error kind and the parser state.
    pub fn from_parser(kind: ParseErrorKind, parser: &ByteParser) -> Self {
        Self {
            kind,
            position: parser.position(),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Convenience constructor for UnexpectedEof
    pub fn unexpected_eof(parser: &ByteParser) -> Self {
        Self::from_parser(ParseErrorKind::UnexpectedEof, parser)
    }

    /// Convenience constructor for UnbalancedParentheses
    pub fn unbalanced_parentheses(parser: &ByteParser, msg: String) -> Self {
        Self::from_parser(ParseErrorKind::UnbalancedParentheses(msg), parser)
    }

    /// Convenience constructor for InvalidBranchLength
    pub fn invalid_branch_length(parser: &ByteParser, msg: String) -> Self {
        Self::from_parser(ParseErrorKind::InvalidBranchLength(msg), parser)
    }

    /// Convenience constructor for InvalidDescription
    pub fn invalid_description(parser: &ByteParser, msg: String) -> Self {
        Self::from_parser(ParseErrorKind::InvalidDescription(msg), parser)
    }

    /// Convenience constructor for TrailingContent
    pub fn trailing_content(parser: &ByteParser) -> Self {
        Self::from_parser(ParseErrorKind::TrailingContent, parser)
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// Get the byte position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }
}
