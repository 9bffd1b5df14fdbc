use std::io::BufRead;

use crate::VdfError;
use crate::ast::Node;
use crate::lexer::{Lexer, Token};

mod document;

/// Recursive-descent parser over the line tokens of a VDF stream.
///
/// Parsing is lenient: missing closing braces, stray braces and decorative
/// lines are absorbed. The only error is a failure of the underlying reader.
pub struct Parser<R> {
    lexer: Lexer<R>,
    peek: Option<Token>,
}

impl<R: BufRead> Parser<R> {
    pub fn new(input: R) -> Result<Self, VdfError> {
        let mut lexer = Lexer::new(input);
        let peek = Some(lexer.next_token()?);
        Ok(Self { lexer, peek })
    }

    pub(crate) fn bump(&mut self) -> Result<Token, VdfError> {
        let curr = self.peek.take().unwrap_or(Token::Eof);
        self.peek = match curr {
            Token::Eof => Some(Token::Eof),
            _ => Some(self.lexer.next_token()?),
        };
        Ok(curr)
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.peek.as_ref()
    }

    pub(crate) fn line(&self) -> usize {
        self.lexer.line()
    }

    /// Parse the whole stream into a root object node.
    pub fn parse_document(&mut self) -> Result<Node, VdfError> {
        document::parse_document(self)
    }
}

impl<'a> Parser<&'a [u8]> {
    pub fn from_str(input: &'a str) -> Result<Self, VdfError> {
        Self::new(input.as_bytes())
    }
}

pub fn parse_reader<R: BufRead>(input: R) -> Result<Node, VdfError> {
    Parser::new(input)?.parse_document()
}

pub fn parse_str(input: &str) -> Result<Node, VdfError> {
    Parser::from_str(input)?.parse_document()
}
