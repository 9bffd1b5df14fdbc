// Author: Dustin Pilgrim
// License: MIT

use std::io::Write;

use crate::VdfError;
use crate::ast::{Node, NodeKind};

/// Write the children of `node` as VDF text, starting at `indent` tabs.
///
/// The node itself is never written: pass the root to serialize a whole
/// document, or pre-navigate to the node whose children you want emitted.
///
/// Layout matches what the client writes:
/// - objects as `"key"`, `{`, children one tab deeper, `}`
/// - leaves as `"key"\t\t"value"`
///
/// # Errors
/// Returns `StreamFailure` if the writer fails.
pub fn write_document<W: Write>(w: &mut W, node: &Node, indent: usize) -> Result<(), VdfError> {
    // One frame per open object: its remaining children and their depth.
    let mut stack = vec![(node.children().iter(), indent)];
    let mut tabs = "\t".repeat(indent);

    loop {
        let (next, depth) = match stack.last_mut() {
            Some((iter, depth)) => (iter.next(), *depth),
            None => break,
        };

        match next {
            Some(child) => {
                let indent_str = &tabs[..depth];
                match &child.kind {
                    NodeKind::Object(children) => {
                        write!(w, "{indent_str}\"{}\"\n{indent_str}{{\n", child.key)?;
                        stack.push((children.iter(), depth + 1));
                        if tabs.len() <= depth {
                            tabs.push('\t');
                        }
                    }
                    NodeKind::Leaf(value) => {
                        writeln!(w, "{indent_str}\"{}\"\t\t\"{}\"", child.key, value)?;
                    }
                }
            }
            None => {
                stack.pop();
                if depth > indent {
                    writeln!(w, "{}}}", &tabs[..depth - 1])?;
                }
            }
        }
    }

    Ok(())
}

/// Render the children of `node` as VDF text.
pub fn to_vdf_string(node: &Node) -> String {
    let mut out = Vec::new();
    // Writing into a Vec<u8> cannot fail.
    let _ = write_document(&mut out, node, 0);
    String::from_utf8_lossy(&out).into_owned()
}

/// Export the children of `node` to pretty JSON.
///
/// Objects become arrays of `{"key", "value"}` / `{"key", "children"}`
/// entries so file order and duplicate keys survive the conversion.
///
/// # Examples
/// ```
/// use vdf_cfg::{export::export_document_to_json, parse_str};
///
/// let root = parse_str("\"a\"\t\"1\"\n").unwrap();
/// let json = export_document_to_json(&root).unwrap();
/// assert!(json.contains("\"value\": \"1\""));
/// ```
pub fn export_document_to_json(node: &Node) -> Result<String, VdfError> {
    Ok(serde_json::to_string_pretty(node.children())?)
}

/// Read a VDF file and export it directly to JSON.
///
/// # Errors
/// Returns error if the file can't be opened or read.
pub fn export_vdf_file(path: &str) -> Result<String, VdfError> {
    let config = crate::config::LocalConfig::from_file(path)?;
    export_document_to_json(config.root())
}
