use super::*;

/// Read the next raw line, trimmed. `None` once the input is exhausted.
///
/// Bytes are decoded lossily so a stray non-UTF-8 byte never aborts a parse.
pub(super) fn next_line<R: BufRead>(lexer: &mut Lexer<R>) -> Result<Option<String>, VdfError> {
    lexer.buf.clear();
    let read = lexer.input.read_until(b'\n', &mut lexer.buf)?;
    if read == 0 {
        return Ok(None);
    }
    lexer.line += 1;
    Ok(Some(String::from_utf8_lossy(&lexer.buf).trim().to_string()))
}

/// Skip blank lines and `//` comments
pub(super) fn next_significant_line<R: BufRead>(
    lexer: &mut Lexer<R>,
) -> Result<Option<String>, VdfError> {
    while let Some(line) = next_line(lexer)? {
        if is_insignificant(&line) {
            continue;
        }
        return Ok(Some(line));
    }
    Ok(None)
}

pub(super) fn is_insignificant(line: &str) -> bool {
    line.is_empty() || line.starts_with("//")
}
