//! Helpers over the [`cssparser`] tokenizer, shared by the statement and
//! value parsers.

use cssparser::{BasicParseErrorKind, ParseError, ParseErrorKind, Parser, ParserInput, Token};

use super::error::{Error, ErrorKind};

/// Result of a function running inside a `cssparser` block.
pub(crate) type ParseResult<'i, T> = std::result::Result<T, ParseError<'i, Error>>;

pub(crate) fn syntax_error(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::Syntax, message)
}

/// Fail with a syntax error at the current position of `parser`.
pub(crate) fn fail<'i, T>(parser: &Parser<'i, '_>, message: impl Into<String>) -> ParseResult<'i, T> {
    Err(parser.new_custom_error(syntax_error(message)))
}

/// Convert a `cssparser` error to an engine error, without location.
pub(crate) fn into_error(error: ParseError<'_, Error>) -> Error {
    match error.kind {
        ParseErrorKind::Custom(error) => error,
        ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
            syntax_error(format!("unexpected {token:?}"))
        },
        ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
            syntax_error("unexpected end of input")
        },
        ParseErrorKind::Basic(_) => syntax_error("invalid syntax"),
    }
}

/// Consume every remaining token of the current block.
pub(crate) fn drain(parser: &mut Parser<'_, '_>) {
    while parser.next_including_whitespace_and_comments().is_ok() {}
}

/// Consume whitespace, but not comments.
pub(crate) fn skip_whitespace(parser: &mut Parser<'_, '_>) {
    loop {
        let state = parser.state();
        let is_space = matches!(
            parser.next_including_whitespace_and_comments(),
            Ok(Token::WhiteSpace(_))
        );
        if !is_space {
            parser.reset(&state);
            break;
        }
    }
}

/// Consume the block whose opening token was just returned by `parser`.
///
/// Returns the text between the delimiters, or `None` when the block is not
/// closed before the end of input.
pub(crate) fn skip_block<'i>(parser: &mut Parser<'i, '_>) -> Option<&'i str> {
    let start = parser.position();
    let end = parser
        .parse_nested_block(|parser| {
            drain(parser);
            Ok::<_, ParseError<'i, ()>>(parser.position().byte_index())
        })
        .ok()?;
    let block = parser.slice_from(start);
    let len = end - start.byte_index();
    (block.len() > len).then(|| &block[..len])
}

/// Split `text` at the tokens matching `is_separator`, outside strings and
/// blocks.
pub(crate) fn split_top_level<'a>(text: &'a str, is_separator: fn(&Token<'_>) -> bool) -> Vec<&'a str> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut parts = Vec::new();
    let mut start = 0;

    loop {
        let before = parser.position().byte_index();
        match parser.next_including_whitespace_and_comments().map(is_separator) {
            Ok(true) => {
                parts.push(&text[start..before]);
                start = parser.position().byte_index();
            },
            Ok(false) => {},
            Err(_) => break,
        }
    }

    parts.push(&text[start..]);
    parts
}

/// Return the byte range of the first token matching `is_target`, outside
/// strings and blocks.
pub(crate) fn find_top_level(text: &str, is_target: fn(&Token<'_>) -> bool) -> Option<(usize, usize)> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);

    loop {
        let before = parser.position().byte_index();
        if parser.next_including_whitespace_and_comments().ok().map(is_target)? {
            return Some((before, parser.position().byte_index()));
        }
    }
}

/// Replace block comments outside strings with a space.
pub(crate) fn strip_comments(text: &str) -> String {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut result = String::with_capacity(text.len());
    let mut start = 0;

    loop {
        let before = parser.position().byte_index();
        let is_comment = parser
            .next_including_whitespace_and_comments()
            .map(|token| matches!(token, Token::Comment(_)));
        match is_comment {
            Ok(true) => {
                result.push_str(&text[start..before]);
                result.push(' ');
                start = parser.position().byte_index();
            },
            Ok(false) => {},
            Err(_) => break,
        }
    }

    result.push_str(&text[start..]);
    result
}

#[cfg(test)]
mod tests {
    use cssparser::Token;

    use super::{find_top_level, split_top_level, strip_comments};

    #[test]
    fn split() {
        const CASES: [(&str, &[&str]); 4] = [
            ("a, b", &["a", " b"]),
            ("a:not(.b, .c), d", &["a:not(.b, .c)", " d"]),
            ("\"x, y\", z", &["\"x, y\"", " z"]),
            ("[title=\"a,b\"]", &["[title=\"a,b\"]"]),
        ];

        for (input, expected) in CASES {
            let result = split_top_level(input, |token| matches!(token, Token::Comma));
            assert_eq!(
                result, expected,
                "\nsplit_top_level({input:?}) expected {expected:?} but received {result:?}"
            );
        }
    }

    #[test]
    fn find() {
        let is_colon = |token: &Token<'_>| matches!(token, Token::Colon);

        assert_eq!(find_top_level("color: red", is_colon), Some((5, 6)));
        assert_eq!(find_top_level("url(a:b) c: d", is_colon), Some((10, 11)));
        assert_eq!(find_top_level("\"a:b\"", is_colon), None);
    }

    #[test]
    fn comments() {
        assert_eq!(strip_comments("a /* b */ c"), "a   c");
        assert_eq!(strip_comments("\"/* kept */\""), "\"/* kept */\"");
    }
}
