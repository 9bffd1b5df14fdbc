use tracing::trace;

use super::*;
use super::scanner::next_significant_line;

pub(super) fn next_token<R: BufRead>(lexer: &mut Lexer<R>) -> Result<Token, VdfError> {
    while let Some(line) = next_significant_line(lexer)? {
        match line.as_str() {
            "{" => return Ok(Token::LBrace),
            "}" => return Ok(Token::RBrace),
            _ => {}
        }

        let mut parts = quoted_parts(&line).into_iter();
        match (parts.next(), parts.next()) {
            (Some(key), Some(value)) => return Ok(Token::Pair(key, value)),
            (Some(key), None) => return Ok(Token::Key(key)),
            _ => {
                trace!(line = lexer.line, "skipping line without quoted tokens");
            }
        }
    }

    Ok(Token::Eof)
}

/// Extract every `"..."` token of a line, in order.
///
/// Characters outside quotes are ignored. There is no escape handling, and a
/// quote left open at the end of the line drops its partial token.
pub fn quoted_parts(line: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == '"' {
            if in_quotes {
                parts.push(std::mem::take(&mut current));
            }
            in_quotes = !in_quotes;
        } else if in_quotes {
            current.push(ch);
        }
    }

    parts
}
