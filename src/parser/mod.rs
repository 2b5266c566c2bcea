//! Basic low-level byte parser functionality.
pub mod byte_parser;
pub mod error;

pub use byte_parser::ByteParser;
pub use error::{ParseError, ParseErrorKind};
