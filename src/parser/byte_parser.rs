//! Low-level byte-by-byte parser for ASCII tree descriptions.
//!
//! This module provides [ByteParser], a cursor over an in-memory byte buffer
//! with support for peeking, consuming, and quote-aware label parsing. It is
//! the foundation the [newick](crate::newick) parser is built on. Tree
//! descriptions always arrive as complete strings, so the buffer is owned
//! directly rather than abstracted behind a streaming source.

use crate::parser::error::ParseError;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser for ASCII text with peek, consume, and label parsing.
///
/// # Features
/// - Whitespace skipping
/// - Quote-aware label parsing (single quotes with `''` escaping)
/// - Context extraction for error reporting
///
/// # Example
/// ```
/// use cladeview::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("(A:1.0,B:2.0);");
/// assert!(parser.consume_if(b'('));
/// let label = parser.parse_label(b"(),:; \t\n\r").unwrap();
/// assert_eq!(label, "A");
/// ```
pub struct ByteParser {
    /// The owned byte data being parsed
    input: Vec<u8>,
    /// Current position in the byte slice
    pos: usize,
}

impl ByteParser {
    /// Creates a new `ByteParser` from a string.
    pub fn for_str(input: &str) -> Self {
        Self {
            input: input.as_bytes().to_vec(),
            pos: 0,
        }
    }

    /// Peeks at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Gets the current byte and advances the position (consumes it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Skips (consumes) all consecutive whitespace characters.
    ///
    /// Whitespace includes: space, tab, newline, and carriage return.
    /// Whitespace around delimiters is insignificant in tree descriptions.
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Consumes the current byte if it matches the target byte.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek() == Some(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Returns the current parser position in the input.
    ///
    /// Useful for error messages.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns up to `k` bytes from the current position for error context.
    pub fn get_context(&self, k: usize) -> &[u8] {
        let end = (self.pos + k).min(self.input.len());
        &self.input[self.pos..end]
    }

    /// Returns a string from up to `k` bytes from the current position for
    /// error context. Invalid UTF-8 sequences are replaced with the Unicode
    /// replacement character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        String::from_utf8_lossy(self.get_context(k)).into_owned()
    }

    /// Parses a label (quoted or unquoted) with the given delimiter set.
    ///
    /// Automatically detects whether the label is quoted (single quotes)
    /// or unquoted and dispatches accordingly. Leading whitespace is skipped.
    ///
    /// # Arguments
    /// * `delimiters` - Byte array of characters that end an unquoted label
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<String, ParseError> {
        self.skip_whitespace();

        if self.peek() == Some(b'\'') {
            self.parse_quoted_label()
        } else {
            Ok(self.parse_unquoted_label(delimiters))
        }
    }

    /// Parses a quoted label enclosed in single quotes with escape support.
    ///
    /// Assumes the opening quote has not been consumed yet. Single quotes
    /// within the label are escaped by doubling them (e.g., `'Wilson''s'`
    /// becomes `Wilson's`).
    ///
    /// # Errors
    /// Returns an error if the quoted label is not closed before EOF.
    pub fn parse_quoted_label(&mut self) -> Result<String, ParseError> {
        self.next_byte(); // consume opening '

        let mut label = String::new();
        loop {
            match self.next_byte() {
                Some(b'\'') => {
                    // Check for escaped quote (two single quotes in a row)
                    if self.peek() == Some(b'\'') {
                        label.push('\'');
                        self.next_byte(); // consume second quote
                    } else {
                        // End of quoted label
                        return Ok(label);
                    }
                }
                Some(b) => label.push(b as char),
                None => return Err(ParseError::unexpected_eof(self)),
            }
        }
    }

    /// Parses an unquoted label until any of the given delimiters is
    /// encountered.
    pub fn parse_unquoted_label(&mut self, delimiters: &[u8]) -> String {
        let mut label = String::new();

        while let Some(b) = self.peek() {
            if delimiters.contains(&b) {
                break;
            }
            label.push(b as char);
            self.pos += 1;
        }

        label
    }
}
