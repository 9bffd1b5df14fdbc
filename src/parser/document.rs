use tracing::{debug, trace};

use super::*;

/// Parse entries until the end of input.
///
/// Open objects live on an explicit stack of `(key, parent entries)` frames,
/// so nesting depth is bounded by memory, not by the call stack. A `}` closes
/// the innermost frame; at the top level it ends the document. End of input
/// closes every frame still open.
pub(super) fn parse_document<R: BufRead>(parser: &mut Parser<R>) -> Result<Node, VdfError> {
    let mut open: Vec<(String, Vec<Node>)> = Vec::new();
    let mut entries: Vec<Node> = Vec::new();

    loop {
        match parser.bump()? {
            Token::Eof => break,
            Token::RBrace => match open.pop() {
                Some((key, parent)) => close_frame(&mut entries, key, parent),
                None => break,
            },
            Token::LBrace => {
                trace!(line = parser.line(), "skipping stray '{{'");
            }
            Token::Pair(key, value) => {
                entries.push(Node::leaf(key, value));
            }
            Token::Key(key) => {
                if let Some(Token::LBrace) = parser.peek() {
                    parser.bump()?; // consume '{'
                    open.push((key, std::mem::take(&mut entries)));
                } else {
                    // Not a block and no value: keep the key, leave the next line alone.
                    trace!(key = %key, "key without block or value, keeping as empty leaf");
                    entries.push(Node::leaf(key, ""));
                }
            }
        }
    }

    if !open.is_empty() {
        trace!(depth = open.len(), "end of input inside object, closing implicitly");
    }
    while let Some((key, parent)) = open.pop() {
        close_frame(&mut entries, key, parent);
    }

    debug!(
        entries = entries.len(),
        lines = parser.line(),
        "parsed VDF document"
    );
    Ok(Node::object("", entries))
}

/// Wrap the current entries into an object named `key` and resume its parent.
fn close_frame(entries: &mut Vec<Node>, key: String, parent: Vec<Node>) {
    let children = std::mem::replace(entries, parent);
    entries.push(Node::object(key, children));
}
