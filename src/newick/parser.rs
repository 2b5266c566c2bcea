//! Recursive-descent parser turning tree descriptions into [Tree]s.

use crate::model::{BranchLength, Tree, TreeIndex};
use crate::parser::byte_parser::ByteParser;
use crate::parser::error::ParseError;

/// Label delimiters: parentheses, comma, colon, semicolon, whitespace
const NEWICK_LABEL_DELIMITERS: &[u8] = b"(),:; \t\n\r";

/// Parses a complete tree description and returns the finished hierarchy.
///
/// The description must open with `(` (a hierarchy always has an internal
/// root group); the trailing `;` is an optional terminator. Anything but
/// whitespace after the terminator is an error, as is a stray `)`.
pub(crate) fn parse_description(parser: &mut ByteParser) -> Result<Tree, ParseError> {
    parser.skip_whitespace();

    if parser.is_eof() {
        return Err(ParseError::unexpected_eof(parser));
    }
    if parser.peek() != Some(b'(') {
        let next_char = parser.peek().map(char::from);
        return Err(ParseError::invalid_description(
            parser,
            format!(
                "Expected '(' at start of tree description but found {:?}",
                next_char
            ),
        ));
    }

    let mut tree = Tree::new();
    let children = parse_children(parser, &mut tree)?;
    let name = parse_optional_name(parser)?;
    let branch_length = parse_branch_length(parser)?;

    // Optional terminating semicolon
    parser.skip_whitespace();
    parser.consume_if(b';');

    // Nothing but whitespace may follow
    parser.skip_whitespace();
    if !parser.is_eof() {
        if parser.peek() == Some(b')') {
            return Err(ParseError::unbalanced_parentheses(
                parser,
                "found ')' without matching '('".to_string(),
            ));
        }
        return Err(ParseError::trailing_content(parser));
    }

    tree.add_root(children, name, branch_length);

    Ok(tree)
}

/// Parses a vertex (either internal vertex or leaf) and returns its index:
/// - Skips leading whitespace
/// - Dispatches to `parse_internal_vertex` if it starts with `(`,
///   otherwise `parse_leaf`
fn parse_vertex(parser: &mut ByteParser, tree: &mut Tree) -> Result<TreeIndex, ParseError> {
    parser.skip_whitespace();
    if parser.peek() == Some(b'(') {
        parse_internal_vertex(parser, tree)
    } else {
        parse_leaf(parser, tree)
    }
}

/// Parses an internal vertex, adds it to the tree, and returns its index:
/// - `(child, ...)[name][:branch_length]`
/// - Calls `parse_children` to parse the child list
fn parse_internal_vertex(
    parser: &mut ByteParser,
    tree: &mut Tree,
) -> Result<TreeIndex, ParseError> {
    let children = parse_children(parser, tree)?;
    let name = parse_optional_name(parser)?;
    let branch_length = parse_branch_length(parser)?;

    Ok(tree.add_internal(children, name, branch_length))
}

/// Parses a child list `(child [, child]*)` and returns the child indices:
/// - Expects the parser at the opening `(`
///   (callers should have skipped leading whitespace)
///
/// # Returns
/// - Indices of the parsed child vertices (at least one)
/// - [ParseError] if the group is malformed or never closed
fn parse_children(
    parser: &mut ByteParser,
    tree: &mut Tree,
) -> Result<Vec<TreeIndex>, ParseError> {
    if !parser.consume_if(b'(') {
        let next_char = parser.peek().map(char::from);
        return Err(ParseError::invalid_description(
            parser,
            format!("Expected '(' before children but found {:?}", next_char),
        ));
    }

    let mut children = Vec::new();
    loop {
        children.push(parse_vertex(parser, tree)?);

        parser.skip_whitespace();
        if parser.consume_if(b',') {
            continue;
        }
        if parser.consume_if(b')') {
            break;
        }

        if parser.is_eof() {
            return Err(ParseError::unbalanced_parentheses(
                parser,
                "input ended before group was closed with ')'".to_string(),
            ));
        }
        let next_char = parser.peek().map(char::from);
        return Err(ParseError::invalid_description(
            parser,
            format!(
                "Expected ',' or ')' after child but found {:?}",
                next_char
            ),
        ));
    }

    Ok(children)
}

/// Parses a leaf vertex, adds it to the tree, and returns its index:
/// - `name[:branch_length]`
/// - Expects the parser at the start of the label
///   (callers should have skipped leading whitespace)
fn parse_leaf(parser: &mut ByteParser, tree: &mut Tree) -> Result<TreeIndex, ParseError> {
    let name = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
    if name.is_empty() {
        return Err(ParseError::invalid_description(
            parser,
            "Empty leaf label".to_string(),
        ));
    }
    let branch_length = parse_branch_length(parser)?;

    Ok(tree.add_leaf(name, branch_length))
}

/// Parses an optional vertex name following a `)`:
/// - Present iff the next non-whitespace byte is neither a delimiter nor EOF
/// - Quoted labels are allowed
fn parse_optional_name(parser: &mut ByteParser) -> Result<Option<String>, ParseError> {
    parser.skip_whitespace();

    match parser.peek() {
        Some(b'\'') => Ok(Some(parser.parse_quoted_label()?)),
        Some(b) if !NEWICK_LABEL_DELIMITERS.contains(&b) => {
            Ok(Some(parser.parse_unquoted_label(NEWICK_LABEL_DELIMITERS)))
        }
        _ => Ok(None),
    }
}

/// Parses an optional branch length `[:number]`:
/// - Skips whitespace before and after `:`
/// - Supports scientific notation (e.g., `1.5e-10`)
///
/// # Returns
/// - `Ok(Some(branch_length))` if found a branch length and was able to parse it
/// - `Ok(None)` if no branch length found
/// - [ParseError] if it couldn't parse the branch length value
fn parse_branch_length(parser: &mut ByteParser) -> Result<Option<BranchLength>, ParseError> {
    // Parse: Whitespace : Whitespace
    parser.skip_whitespace();
    if !parser.consume_if(b':') {
        return Ok(None);
    }
    parser.skip_whitespace();

    // Find end of branch length substring
    let mut branch_length_str = String::new();
    while let Some(b) = parser.peek() {
        // Valid characters for a float: digits, '.', '-', '+', 'e', 'E'
        if b.is_ascii_digit() || b == b'.' || b == b'-' || b == b'+' || b == b'e' || b == b'E' {
            branch_length_str.push(b as char);
            parser.next_byte(); // consume it
        } else {
            break; // Hit a delimiter like ',', ')', ';', or whitespace
        }
    }

    // Parse branch length substring; overflowing literals come back as
    // infinities and are rejected alongside garbage
    let value: f64 = branch_length_str.parse().map_err(|_| {
        ParseError::invalid_branch_length(parser, branch_length_str.clone())
    })?;
    if !value.is_finite() {
        return Err(ParseError::invalid_branch_length(parser, branch_length_str));
    }

    Ok(Some(BranchLength::new(value)))
}
