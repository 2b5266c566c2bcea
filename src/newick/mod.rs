//! Newick-style tree description parser.
//!
//! This module parses nested-parenthesis tree descriptions into the
//! hierarchy model used by the [layout](crate::layout) and
//! [select](crate::select) passes.
//!
//! # Format
//! The accepted format has the following grammar:
//! * `tree ::= internal_vertex [';']`
//! * `vertex ::= internal_vertex | leaf`
//! * `internal_vertex ::= '(' vertex (',' vertex)* ')' [name] [branch_length]`
//! * `leaf ::= name [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace around the delimiters `( ) , : ;` is insignificant
//! * Names are mandatory on leaves, optional on internal vertices and the
//!   root; labels may be single-quoted with `''` escaping
//! * Branch lengths may use scientific notation and must be finite
//! * The trailing `;` is an optional terminator; anything but whitespace
//!   after it is an error
//!
//! A failed parse returns a [ParseError] and never a partial hierarchy.
//!
//! # Example
//! ```
//! use cladeview::newick::parse_str;
//!
//! let tree = parse_str("(A:0.1,B:0.2,(C:0.3,D:0.4)inner:0.5);").unwrap();
//! assert_eq!(tree.num_leaves(), 4);
//! assert!(tree.is_valid());
//! ```

mod parser;

use crate::model::Tree;
use crate::parser::byte_parser::ByteParser;
use crate::parser::error::ParseError;
use tracing::debug;

/// Parses a single tree description string into a [Tree].
///
/// # Arguments
/// * `description` - The nested-parenthesis description to parse
///
/// # Returns
/// * `Ok(Tree)` - The parsed hierarchy (valid by construction)
/// * `Err(ParseError)` - If the description is malformed; no partial tree
///   is returned
///
/// # Example
/// ```
/// use cladeview::newick::parse_str;
///
/// let tree = parse_str("((A:1,B:1):1,C:1);").unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// ```
pub fn parse_str<S: AsRef<str>>(description: S) -> Result<Tree, ParseError> {
    let mut byte_parser = ByteParser::for_str(description.as_ref());
    let tree = parser::parse_description(&mut byte_parser)?;

    debug!(
        leaves = tree.num_leaves(),
        vertices = tree.num_vertices(),
        "parsed tree description"
    );

    Ok(tree)
}
