// Author: Dustin Pilgrim
// License: MIT

use std::io::BufRead;

use crate::VdfError;

mod scanner;
mod tokenizer;

pub use tokenizer::quoted_parts;

/// One significant line of VDF input.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // --- structure ---
    LBrace,
    RBrace,

    // --- entries ---
    Key(String),
    Pair(String, String),

    // --- layout ---
    Eof,
}

/// Line-oriented lexer over any buffered reader.
///
/// VDF is tokenized a line at a time: every significant line maps to exactly
/// one [`Token`]. Blank lines, `//` comments and lines without any quoted part
/// never reach the parser.
pub struct Lexer<R> {
    input: R,
    buf: Vec<u8>,
    line: usize,
}

impl<R: BufRead> Lexer<R> {
    pub fn new(input: R) -> Self {
        Lexer {
            input,
            buf: Vec::new(),
            line: 0,
        }
    }

    /// Number of raw lines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn next_token(&mut self) -> Result<Token, VdfError> {
        tokenizer::next_token(self)
    }
}
