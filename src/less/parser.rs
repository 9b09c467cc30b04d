//! Parse LESS source text into a tree of statements.
//!
//! The text is tokenized by [`cssparser`]; `//` comments, which CSS lacks,
//! are blanked out first. Imports are not resolved here; see
//! [`super::import`].

use std::path::Path;

use cssparser::{ParseError, Parser as CssParser, ParserInput, Token};

use super::{
    ast::{
        Arg, AtRule, Declaration, Import, ImportOptions, MixinCall, Node, Param, Ruleset,
        Variable,
    },
    error::{Error, Location, Result},
    tokens::{
        find_top_level, into_error, skip_block, skip_whitespace, split_top_level,
        strip_comments, syntax_error, ParseResult,
    },
    value::{is_name_char, Value},
};

const EXTEND_UNSUPPORTED: &str = "extend is not supported";

/// Parse a LESS source into a list of statements.
pub(crate) fn parse(input: &str, filename: Option<&Path>) -> Result<Vec<Node>> {
    let text = strip_line_comments(input);
    let source = Source {
        text: &text,
        filename,
    };
    let mut parser_input = ParserInput::new(&text);
    let mut parser = CssParser::new(&mut parser_input);
    source
        .parse_block(&mut parser)
        .map_err(|error| source.convert_error(error))
}

/// What ends a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Semicolon,
    /// A `{`; the parser is at the start of the block.
    Block,
    /// The end of the enclosing block or of the input.
    End,
}

struct Source<'s> {
    text: &'s str,
    filename: Option<&'s Path>,
}

impl Source<'_> {
    fn location(&self, offset: usize) -> Location {
        Location::from_offset(self.text, offset, self.filename)
    }

    fn error<'i>(
        &self,
        parser: &CssParser<'i, '_>,
        offset: usize,
        message: impl Into<String>,
    ) -> ParseError<'i, Error> {
        parser.new_custom_error(syntax_error(message).at(&self.location(offset)))
    }

    fn convert_error(&self, error: ParseError<'_, Error>) -> Error {
        let location = Location {
            filename: self.filename.map(Path::to_path_buf),
            line: error.location.line as usize + 1,
            column: error.location.column as usize,
        };
        into_error(error).at(&location)
    }

    /// Parse statements up to the end of the current block.
    fn parse_block<'i>(&self, parser: &mut CssParser<'i, '_>) -> ParseResult<'i, Vec<Node>> {
        let mut nodes = Vec::new();

        loop {
            skip_whitespace(parser);
            let start = parser.position();
            let state = parser.state();
            let token = match parser.next_including_whitespace_and_comments() {
                Ok(token) => token.clone(),
                Err(_) => return Ok(nodes),
            };

            match token {
                Token::Comment(_) => {
                    let text = parser.slice_from(start);
                    if text.len() < 4 || !text.ends_with("*/") {
                        return Err(self.error(parser, start.byte_index(), "unterminated comment"));
                    }
                    nodes.push(Node::Comment(text.to_owned()));
                },
                Token::Semicolon => {},
                Token::CloseCurlyBracket => {
                    return Err(self.error(parser, start.byte_index(), "unexpected `}`"));
                },
                Token::AtKeyword(name) => {
                    let name = String::from(&*name);
                    nodes.push(self.parse_at_statement(parser, name, start.byte_index())?);
                },
                _ => {
                    parser.reset(&state);
                    nodes.extend(self.parse_statement(parser)?);
                },
            }
        }
    }

    /// Parse the `{ ... }` block just returned by `parser`.
    fn parse_body<'i>(&self, parser: &mut CssParser<'i, '_>, open: usize) -> ParseResult<'i, Vec<Node>> {
        let (nodes, end) = parser.parse_nested_block(|parser| -> ParseResult<'i, _> {
            let nodes = self.parse_block(parser)?;
            Ok((nodes, parser.position().byte_index()))
        })?;

        if parser.position().byte_index() == end {
            return Err(self.error(parser, open, "missing closing `}`"));
        }

        Ok(nodes)
    }

    /// Parse a variable declaration, an at-rule or an import, after its
    /// `@name`.
    fn parse_at_statement<'i>(
        &self,
        parser: &mut CssParser<'i, '_>,
        name: String,
        start: usize,
    ) -> ParseResult<'i, Node> {
        let location = self.location(start);
        let name_end = parser.position().byte_index();
        let state = parser.state();

        skip_whitespace(parser);
        let has_colon = matches!(parser.next_including_whitespace_and_comments(), Ok(Token::Colon));

        if !has_colon {
            parser.reset(&state);
            let (end, stop) = self.scan_statement(parser)?;
            return self.parse_at_rule(parser, name, name_end..end, stop, location);
        }

        let colon_end = parser.position().byte_index();
        let (end, stop) = self.scan_statement(parser)?;
        let value = self.text[colon_end..end].trim();

        if stop == Stop::Block {
            if value.is_empty() {
                return Err(self.error(parser, end, "detached rulesets are not supported"));
            }
            // A pseudo-class prelude, as in `@page :first`.
            return self.parse_at_rule(parser, name, name_end..end, stop, location);
        }

        let value = Value::parse(value).map_err(|error| -> ParseError<'i, Error> {
            parser.new_custom_error(error.at(&location))
        })?;

        Ok(Node::Variable(Variable {
            name,
            value,
            location,
        }))
    }

    fn parse_at_rule<'i>(
        &self,
        parser: &mut CssParser<'i, '_>,
        name: String,
        prelude: std::ops::Range<usize>,
        stop: Stop,
        location: Location,
    ) -> ParseResult<'i, Node> {
        let keyword = format!("@{name}");
        let open = prelude.end;
        let prelude = normalize_whitespace(&strip_comments(&self.text[prelude]));

        if stop == Stop::Block {
            if is_import(&keyword) {
                return Err(self.error(parser, open, "unexpected `{` after @import"));
            }
            let body = self.parse_body(parser, open)?;
            return Ok(Node::AtRule(AtRule {
                name: keyword,
                prelude,
                body: Some(body),
                location,
            }));
        }

        if is_import(&keyword) {
            return parse_import(&prelude, location.clone())
                .map(Node::Import)
                .map_err(|error| parser.new_custom_error(error.at(&location)));
        }

        Ok(Node::AtRule(AtRule {
            name: keyword,
            prelude,
            body: None,
            location,
        }))
    }

    /// Parse a ruleset, a mixin definition, a mixin call or a declaration.
    fn parse_statement<'i>(&self, parser: &mut CssParser<'i, '_>) -> ParseResult<'i, Option<Node>> {
        let start = parser.position().byte_index();
        let location = self.location(start);
        let (end, stop) = self.scan_statement(parser)?;
        let head = &self.text[start..end];

        if stop == Stop::Block {
            let (selectors, params) = parse_ruleset_head(head)
                .map_err(|error| -> ParseError<'i, Error> {
                    parser.new_custom_error(error.at(&location))
                })?;
            let body = self.parse_body(parser, end)?;
            return Ok(Some(Node::Ruleset(Ruleset {
                selectors,
                params,
                body,
                location,
            })));
        }

        let text = strip_comments(head);
        let text = text.trim();

        if text.is_empty() {
            return Ok(None);
        }

        let node = if text.contains(":extend(") {
            Err(syntax_error(EXTEND_UNSUPPORTED))
        } else if text.starts_with(['.', '#']) {
            parse_mixin_call(text).map(|(path, args, important)| {
                Node::MixinCall(MixinCall {
                    path,
                    args,
                    important,
                    location: location.clone(),
                })
            })
        } else {
            parse_declaration(text).map(|(name, value, important)| {
                Node::Declaration(Declaration {
                    name,
                    value,
                    important,
                    location: location.clone(),
                })
            })
        };

        node.map(Some)
            .map_err(|error| parser.new_custom_error(error.at(&location)))
    }

    /// Consume tokens up to a `;` or a `{` outside blocks, or up to the end
    /// of the current block.
    ///
    /// Returns the offset where the statement ends and what ended it.
    fn scan_statement<'i>(&self, parser: &mut CssParser<'i, '_>) -> ParseResult<'i, (usize, Stop)> {
        let mut after_at = false;

        loop {
            let before = parser.position().byte_index();
            let state = parser.state();
            let token = match parser.next_including_whitespace_and_comments() {
                Ok(token) => token.clone(),
                Err(_) => return Ok((before, Stop::End)),
            };

            match token {
                Token::Semicolon => return Ok((before, Stop::Semicolon)),
                // `@{name}`
                Token::CurlyBracketBlock if after_at => {},
                Token::CurlyBracketBlock => return Ok((before, Stop::Block)),
                Token::CloseCurlyBracket => {
                    parser.reset(&state);
                    return Ok((before, Stop::End));
                },
                Token::CloseParenthesis => return Err(self.error(parser, before, "unexpected `)`")),
                Token::CloseSquareBracket => return Err(self.error(parser, before, "unexpected `]`")),
                Token::BadString(_) => return Err(self.error(parser, before, "unterminated string")),
                _ => {},
            }

            after_at = matches!(token, Token::Delim('@'));
        }
    }
}

fn is_import(keyword: &str) -> bool {
    keyword.eq_ignore_ascii_case("@import") || keyword.eq_ignore_ascii_case("@import-once")
}

fn is_comma(token: &Token<'_>) -> bool {
    matches!(token, Token::Comma)
}

fn is_semicolon(token: &Token<'_>) -> bool {
    matches!(token, Token::Semicolon)
}

fn is_colon(token: &Token<'_>) -> bool {
    matches!(token, Token::Colon)
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace `//` comments with spaces, keeping byte offsets unchanged.
fn strip_line_comments(input: &str) -> String {
    #[derive(Clone, Copy)]
    enum State {
        Normal,
        Quoted(char),
        Block,
        Url,
    }

    let mut result = String::with_capacity(input.len());
    let mut state = State::Normal;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Normal => match c {
                '"' | '\'' => state = State::Quoted(c),
                '/' if chars.peek() == Some(&'*') => {
                    state = State::Block;
                    result.push(c);
                    result.extend(chars.next());
                    continue;
                },
                '/' if chars.peek() == Some(&'/') => {
                    result.push(' ');
                    while let Some(c) = chars.next_if(|c| *c != '\n') {
                        result.extend(std::iter::repeat(' ').take(c.len_utf8()));
                    }
                    continue;
                },
                '(' if result
                    .get(result.len().saturating_sub(3)..)
                    .is_some_and(|s| s.eq_ignore_ascii_case("url")) =>
                {
                    state = State::Url
                },
                _ => {},
            },
            State::Quoted(quote) => {
                if c == '\\' {
                    result.push(c);
                    result.extend(chars.next());
                    continue;
                }
                if c == quote {
                    state = State::Normal;
                }
            },
            State::Block => {
                if c == '*' && chars.peek() == Some(&'/') {
                    state = State::Normal;
                    result.push(c);
                    result.extend(chars.next());
                    continue;
                }
            },
            State::Url => {
                if c == ')' {
                    state = State::Normal;
                }
            },
        }
        result.push(c);
    }

    result
}

fn parse_ruleset_head(head: &str) -> Result<(Vec<String>, Option<Vec<Param>>)> {
    let head = strip_comments(head);
    let head = head.trim();

    if head.contains(":extend(") {
        return Err(syntax_error(EXTEND_UNSUPPORTED));
    }

    if let Some((name, params, rest)) = split_mixin_head(head) {
        let rest = rest.trim();
        if rest.starts_with("when") {
            return Err(syntax_error("mixin guards are not supported"));
        }
        if !rest.is_empty() {
            return Err(syntax_error(format!("unrecognised input `{rest}`")));
        }
        return Ok((vec![name.to_owned()], Some(parse_params(params)?)));
    }

    let selectors: Vec<String> = split_top_level(head, is_comma)
        .into_iter()
        .map(normalize_whitespace)
        .collect();

    if selectors.iter().any(String::is_empty) {
        return Err(syntax_error("expected a selector before `{`"));
    }

    Ok((selectors, None))
}

/// Split `.name(params) rest` into its parts.
fn split_mixin_head(head: &str) -> Option<(&str, &str, &str)> {
    let mut input = ParserInput::new(head);
    let mut parser = CssParser::new(&mut input);

    let (name_end, open) = match parser.next_including_whitespace().ok()?.clone() {
        Token::Delim('.') => match parser.next_including_whitespace().ok()?.clone() {
            Token::Function(_) => (parser.position().byte_index() - 1, true),
            Token::Ident(_) => (parser.position().byte_index(), false),
            _ => return None,
        },
        Token::IDHash(_) | Token::Hash(_) => (parser.position().byte_index(), false),
        _ => return None,
    };

    if !open {
        skip_whitespace(&mut parser);
        if !matches!(parser.next_including_whitespace(), Ok(Token::ParenthesisBlock)) {
            return None;
        }
    }

    let params = skip_block(&mut parser)?;
    let close = parser.position().byte_index();
    Some((&head[..name_end], params, &head[close..]))
}

/// Split mixin arguments or parameters.
///
/// Semicolons take precedence over commas, so that comma separated lists can
/// be passed as a single argument.
fn split_args(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let separator = if find_top_level(text, is_semicolon).is_some() {
        is_semicolon
    } else {
        is_comma
    };
    let mut parts: Vec<&str> = split_top_level(text, separator)
        .into_iter()
        .map(str::trim)
        .collect();
    if parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    parts
}

fn parse_variable_name(text: &str) -> Result<String> {
    let name = text.trim().strip_prefix('@').unwrap_or(text).trim();
    if name.is_empty() || !name.chars().all(is_name_char) {
        return Err(syntax_error(format!("invalid variable name `{text}`")));
    }
    Ok(name.to_owned())
}

fn parse_params(text: &str) -> Result<Vec<Param>> {
    split_args(text)
        .into_iter()
        .map(|param| {
            if param == "..." {
                return Ok(Param::Rest(None));
            }
            if !param.starts_with('@') {
                return Ok(Param::Pattern(Value::parse(param)?));
            }
            if let Some(name) = param.strip_suffix("...") {
                return Ok(Param::Rest(Some(parse_variable_name(name)?)));
            }
            match find_top_level(param, is_colon) {
                Some((colon, after)) => Ok(Param::Named {
                    name: parse_variable_name(&param[..colon])?,
                    default: Some(Value::parse(param[after..].trim())?),
                }),
                None => Ok(Param::Named {
                    name: parse_variable_name(param)?,
                    default: None,
                }),
            }
        })
        .collect()
}

fn parse_args(text: &str) -> Result<Vec<Arg>> {
    split_args(text)
        .into_iter()
        .map(|arg| {
            if arg.starts_with('@') {
                if let Some((colon, after)) = find_top_level(arg, is_colon) {
                    return Ok(Arg {
                        name: Some(parse_variable_name(&arg[..colon])?),
                        value: Value::parse(arg[after..].trim())?,
                    });
                }
            }
            Ok(Arg {
                name: None,
                value: Value::parse(arg)?,
            })
        })
        .collect()
}

fn strip_important(text: &str) -> Option<&str> {
    let bang = text.rfind('!')?;
    text[bang + 1..]
        .trim()
        .eq_ignore_ascii_case("important")
        .then(|| text[..bang].trim_end())
}

/// Parse `#ns > .name(args) !important`.
fn parse_mixin_call(text: &str) -> Result<(Vec<String>, Vec<Arg>, bool)> {
    let unrecognised = || syntax_error(format!("unrecognised input `{text}`"));

    let (text, important) = match strip_important(text) {
        Some(stripped) => (stripped, true),
        None => (text, false),
    };

    let mut input = ParserInput::new(text);
    let mut parser = CssParser::new(&mut input);
    let mut path = Vec::new();
    let mut args = None;

    while let Ok(token) = parser.next() {
        let token = token.clone();
        if args.is_some() {
            return Err(unrecognised());
        }
        match token {
            Token::Delim('>') if !path.is_empty() => {},
            Token::Delim('.') => match parser.next_including_whitespace().cloned() {
                Ok(Token::Ident(name)) => path.push(format!(".{}", &*name)),
                Ok(Token::Function(name)) => {
                    path.push(format!(".{}", &*name));
                    args = Some(skip_block(&mut parser).ok_or_else(|| syntax_error("missing closing `)`"))?);
                },
                _ => return Err(unrecognised()),
            },
            Token::IDHash(name) | Token::Hash(name) => path.push(format!("#{}", &*name)),
            Token::ParenthesisBlock if !path.is_empty() => {
                args = Some(skip_block(&mut parser).ok_or_else(|| syntax_error("missing closing `)`"))?);
            },
            _ => return Err(unrecognised()),
        }
    }

    if path.is_empty() {
        return Err(unrecognised());
    }

    let args = match args {
        Some(args) => parse_args(args)?,
        None => Vec::new(),
    };

    Ok((path, args, important))
}

fn parse_declaration(text: &str) -> Result<(String, Value, bool)> {
    let (colon, after) = find_top_level(text, is_colon)
        .ok_or_else(|| syntax_error(format!("unrecognised input `{text}`")))?;

    let name = text[..colon].trim();
    let valid_name = !name.is_empty()
        && name
            .chars()
            .all(|c| is_name_char(c) || matches!(c, '*' | '@' | '{' | '}' | '\\'));
    if !valid_name {
        return Err(syntax_error(format!("invalid property name `{name}`")));
    }

    let value = text[after..].trim();
    let (value, important) = match strip_important(value) {
        Some(stripped) => (stripped, true),
        None => (value, false),
    };

    if value.is_empty() {
        return Err(syntax_error(format!("expected a value for `{name}`")));
    }

    Ok((name.to_owned(), Value::parse(value)?, important))
}

/// Parse the prelude of `@import`: options, target and media queries.
fn parse_import(prelude: &str, location: Location) -> Result<Import> {
    let missing_paren = || syntax_error("missing closing `)`");

    let mut input = ParserInput::new(prelude);
    let mut parser = CssParser::new(&mut input);
    let mut options = ImportOptions::default();

    let mut start = parser.position();
    let mut token = parser.next().cloned();

    if let Ok(Token::ParenthesisBlock) = token {
        let block = skip_block(&mut parser).ok_or_else(missing_paren)?;
        for option in block.split(',').map(str::trim) {
            match option {
                "css" => options.css = true,
                "less" => options.less = true,
                "multiple" => options.multiple = true,
                "once" | "" => {},
                other => {
                    return Err(syntax_error(format!("unsupported import option `{other}`")))
                },
            }
        }
        start = parser.position();
        token = parser.next().cloned();
    }

    let path = match token {
        Ok(Token::QuotedString(path) | Token::UnquotedUrl(path)) => String::from(&*path),
        Ok(Token::Function(name)) if name.eq_ignore_ascii_case("url") => {
            let inner = skip_block(&mut parser).ok_or_else(missing_paren)?;
            inner.trim().trim_matches(['"', '\'']).to_owned()
        },
        _ => return Err(syntax_error("expected a file name after @import")),
    };

    let target = parser.slice_from(start).trim().to_owned();
    let media = prelude[parser.position().byte_index()..].trim().to_owned();

    Ok(Import {
        path,
        target,
        options,
        media,
        location,
    })
}

#[cfg(test)]
mod tests {
    use super::{parse, strip_line_comments};
    use crate::less::{
        ast::{Node, Param},
        error::ErrorKind,
    };

    fn body(node: &Node) -> &[Node] {
        match node {
            Node::Ruleset(ruleset) => &ruleset.body,
            _ => &[],
        }
    }

    #[test]
    fn line_comments() {
        const INPUT: &str = "a { b: url(http://x/y); } // c\n\"//d\"";

        let result = strip_line_comments(INPUT);

        assert_eq!(result.len(), INPUT.len());
        assert!(result.contains("url(http://x/y)"));
        assert!(!result.contains("// c"));
        assert!(result.contains("\"//d\""));
    }

    #[test]
    fn nested_rulesets() {
        let nodes = parse(
            concat!(
                "@color: #333;\n", //
                ".a, .b {\n",      //
                "  color: @color;\n",
                "  &:hover { color: red }\n",
                "}\n"
            ),
            None,
        )
        .unwrap();

        assert_eq!(nodes.len(), 2);
        assert!(matches!(nodes[0], Node::Variable(_)));
        assert!(
            matches!(
                &nodes[1],
                Node::Ruleset(ruleset)
                    if ruleset.selectors == [".a", ".b"]
                        && ruleset.body.len() == 2
                        && matches!(ruleset.body[1], Node::Ruleset(_))
            ),
            "{:?}",
            nodes[1]
        );
    }

    #[test]
    fn interpolated_selectors() {
        let nodes = parse(".icon-@{name} { @{property}-color: red; }", None).unwrap();

        assert!(
            matches!(
                &nodes[0],
                Node::Ruleset(ruleset)
                    if ruleset.selectors == [".icon-@{name}"]
                        && matches!(
                            &ruleset.body[0],
                            Node::Declaration(declaration) if declaration.name == "@{property}-color"
                        )
            ),
            "{:?}",
            nodes[0]
        );
    }

    #[test]
    fn mixins() {
        let nodes = parse(
            concat!(
                ".m(@a; @b: 2px; ...) { width: @a }\n",
                ".x { .m(1px, 2px; 3px) !important; #ns > .n; }\n"
            ),
            None,
        )
        .unwrap();

        assert!(
            matches!(
                &nodes[0],
                Node::Ruleset(definition)
                    if definition.selectors == [".m"]
                        && matches!(
                            definition.params.as_deref(),
                            Some([Param::Named { .. }, Param::Named { default: Some(_), .. }, Param::Rest(None)])
                        )
            ),
            "{:?}",
            nodes[0]
        );

        assert!(
            matches!(
                body(&nodes[1]),
                [Node::MixinCall(first), Node::MixinCall(second)]
                    if first.path == [".m"]
                        && first.args.len() == 2
                        && first.important
                        && second.path == ["#ns", ".n"]
                        && second.args.is_empty()
            ),
            "{:?}",
            nodes[1]
        );
    }

    #[test]
    fn imports() {
        let nodes = parse(
            "@import \"a\";\n@import (css) url(\"b.css\") screen;\n",
            None,
        )
        .unwrap();

        assert!(
            matches!(&nodes[0], Node::Import(import) if import.path == "a" && !import.is_css()),
            "{:?}",
            nodes[0]
        );
        assert!(
            matches!(
                &nodes[1],
                Node::Import(import)
                    if import.path == "b.css"
                        && import.media == "screen"
                        && import.to_css() == "@import url(\"b.css\") screen"
            ),
            "{:?}",
            nodes[1]
        );
    }

    #[test]
    fn at_rules() {
        const CASES: [(&str, &str, &str); 4] = [
            ("@page :first { margin: 1in; }", "@page", ":first"),
            ("@page{margin:0}", "@page", ""),
            ("@media screen and (min-width: 10px) { a { b: c } }", "@media", "screen and (min-width: 10px)"),
            ("@font-face { font-family: x; }", "@font-face", ""),
        ];

        for (input, name, prelude) in CASES {
            let nodes = parse(input, None).unwrap();
            assert!(
                matches!(
                    &nodes[..],
                    [Node::AtRule(rule)]
                        if rule.name == name
                            && rule.prelude == prelude
                            && rule.body.as_ref().is_some_and(|body| body.len() == 1)
                ),
                "\nparse({input:?}) expected {name} with prelude {prelude:?} but received {nodes:?}"
            );
        }
    }

    #[test]
    fn syntax_errors() {
        const CASES: [(&str, usize); 9] = [
            (".a {\n  color: red;\n", 1),
            (".a { color: red; }\n}", 2),
            (".a { color red; }", 1),
            (".a { b: \"c; }", 1),
            (".m() when (@a) { }", 1),
            ("@detached: {\n  a: b;\n}", 1),
            ("\n.a:extend(.b) { c: d }", 2),
            (".a {\n  &:extend(.b);\n}", 2),
            (".a {\n  width: ~`1 + 1`;\n}", 2),
        ];

        for (input, line) in CASES {
            let error = parse(input, None).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Syntax, "{input:?}");
            assert_eq!(
                error.location().map(|location| location.line),
                Some(line),
                "\nparse({input:?}) expected an error on line {line} but received {error}"
            );
        }
    }

    #[test]
    fn unsupported_messages() {
        const CASES: [(&str, &str); 4] = [
            (".a:extend(.b) { c: d }", "extend is not supported"),
            (".a { &:extend(.b all); }", "extend is not supported"),
            (".a { width: `1 + 1`; }", "JavaScript evaluation is not supported"),
            (".a { width: ~`1 + 1`; }", "JavaScript evaluation is not supported"),
        ];

        for (input, message) in CASES {
            let error = parse(input, None).unwrap_err();
            assert_eq!(
                error.message(),
                message,
                "\nparse({input:?}) expected {message:?} but received {error}"
            );
        }
    }
}
