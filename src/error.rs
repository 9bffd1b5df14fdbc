use std::io;

use thiserror::Error;

/// The main error type for VDF reading, writing and editing.
///
/// Structural problems in the input are never reported here: the parser
/// absorbs them. Only I/O, lookups that require a node, and CLI-level
/// validation produce errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VdfError {
    /// Raised when the underlying reader or writer fails.
    #[error("[VDF] Stream Error: {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    StreamFailure {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },

    #[error("[VDF] File Error '{path}': {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },

    /// Raised by lookups that need the node to exist (e.g. the apps block).
    #[error("[VDF] Path '{path}' not found{}{}", hint_suffix(.hint), code_suffix(.code))]
    PathNotFound {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },

    #[error("[VDF] Invalid path '{path}': {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    InvalidPath {
        path: String,
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },

    /// Raised for a value the writer cannot quote, e.g. one holding `"`.
    #[error("[VDF] Invalid value '{value}': {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    InvalidValue {
        value: String,
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },

    /// Raised for non-numeric entries in an allow or deny list.
    #[error(
        "[VDF] Invalid entries in {list} list ({} non-numeric): {}{}{}",
        entry_count(.entries),
        join_entries(.entries),
        hint_suffix(.hint),
        code_suffix(.code)
    )]
    InvalidEntries {
        list: String,
        entries: Vec<String>,
        hint: Option<String>,
        code: Option<u32>,
    },

    #[error("[VDF] Export Error: {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    ExportError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h))
}

fn entry_count(entries: &[String]) -> usize {
    entries.len()
}

fn join_entries(entries: &[String]) -> String {
    entries.join(", ")
}

fn code_suffix(code: &Option<u32>) -> String {
    code.map_or(String::new(), |c| format!(" Code: {}", c))
}

impl From<io::Error> for VdfError {
    fn from(e: io::Error) -> Self {
        VdfError::StreamFailure {
            message: e.to_string(),
            hint: None,
            code: Some(100),
        }
    }
}

impl From<serde_json::Error> for VdfError {
    fn from(e: serde_json::Error) -> Self {
        VdfError::ExportError {
            message: e.to_string(),
            hint: None,
            code: Some(500),
        }
    }
}
