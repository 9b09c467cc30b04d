//! Property values: parsing, operations and rendering.

use cssparser::{ParseError, Parser as CssParser, ParserInput, Token as CssToken};

use super::{
    color::Color,
    error::{Error, ErrorKind, Result},
    tokens::{fail, into_error, skip_block, ParseResult},
};

/// Arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

/// A number with an optional unit (e.g. `12px`, `50%`, `1.5`).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Number {
    pub(crate) value: f64,
    pub(crate) unit: String,
}

impl Number {
    pub(crate) fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

/// A value, either as parsed or as evaluated.
///
/// Evaluated values never contain `Variable`, `VariableRef`, `Operation`,
/// `Negative` or `Paren`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    Number(Number),
    Color(Color),
    Keyword(String),
    /// A string; `escaped` strings (`~"..."`) are rendered without quotes.
    Quoted {
        text: String,
        quote: char,
        escaped: bool,
    },
    Url(Box<Value>),
    /// `@name`
    Variable(String),
    /// `@@name`
    VariableRef(String),
    Call {
        name: String,
        args: Vec<Value>,
    },
    /// Function whose arguments are kept verbatim, such as `calc(...)`.
    RawCall {
        name: String,
        text: String,
    },
    Operation {
        op: Op,
        lhs: Box<Value>,
        rhs: Box<Value>,
    },
    Negative(Box<Value>),
    Paren(Box<Value>),
    /// `a/b` outside parentheses, where `/` is a separator.
    Slash(Box<Value>, Box<Value>),
    /// Space separated values.
    Expression(Vec<Value>),
    /// Comma separated values.
    List(Vec<Value>),
    /// Text passed through verbatim.
    Anonymous(String),
}

const JAVASCRIPT_UNSUPPORTED: &str = "JavaScript evaluation is not supported";

/// Functions whose arguments must not be parsed as LESS.
const RAW_FUNCTIONS: [&str; 7] = [
    "calc",
    "-webkit-calc",
    "-moz-calc",
    "expression",
    "element",
    "env",
    "var",
];

impl Value {
    /// Parse the value of a declaration or variable.
    ///
    /// Values that cannot be tokenized are passed through verbatim, unless
    /// they reference a variable.
    pub(crate) fn parse(input: &str) -> Result<Self> {
        if is_unicode_range(input) {
            return Ok(Self::Anonymous(input.trim().to_owned()));
        }
        match Self::parse_strict(input) {
            Ok(value) => Ok(value),
            Err(_) if !input.contains(['@', '`']) => Ok(Self::Anonymous(input.trim().to_owned())),
            Err(error) => Err(error),
        }
    }

    /// Parse a value, failing on any unrecognized input.
    pub(crate) fn parse_strict(input: &str) -> Result<Self> {
        let tokens = tokenize(input)?;
        if tokens.is_empty() {
            return Err(Error::new(ErrorKind::Syntax, "expected a value"));
        }
        let mut parser = ValueParser {
            tokens,
            pos: 0,
            depth: 0,
        };
        let value = parser.parse_list()?;
        if let Some(lexeme) = parser.tokens.get(parser.pos) {
            return Err(Error::new(
                ErrorKind::Syntax,
                format!("unexpected {} in value `{}`", lexeme.token, input.trim()),
            ));
        }
        Ok(value)
    }

    /// Render an evaluated value as CSS.
    pub(crate) fn to_css(&self, compress: bool) -> String {
        let separator = if compress { "," } else { ", " };
        match self {
            Self::Number(number) => format!("{}{}", format_number(number.value), number.unit),
            Self::Color(color) => color.to_css(compress),
            Self::Keyword(text) | Self::Anonymous(text) => text.clone(),
            Self::Quoted {
                text,
                quote,
                escaped,
            } => {
                if *escaped {
                    text.clone()
                } else {
                    format!("{quote}{text}{quote}")
                }
            },
            Self::Url(inner) => format!("url({})", inner.to_css(compress)),
            Self::Variable(name) => format!("@{name}"),
            Self::VariableRef(name) => format!("@@{name}"),
            Self::Call { name, args } => format!(
                "{name}({})",
                args.iter()
                    .map(|arg| arg.to_css(compress))
                    .collect::<Vec<_>>()
                    .join(separator)
            ),
            Self::RawCall { name, text } => format!("{name}({text})"),
            Self::Operation { op, lhs, rhs } => {
                let op = match op {
                    Op::Add => '+',
                    Op::Sub => '-',
                    Op::Mul => '*',
                    Op::Div => '/',
                };
                format!("{} {op} {}", lhs.to_css(compress), rhs.to_css(compress))
            },
            Self::Negative(inner) => format!("-{}", inner.to_css(compress)),
            Self::Paren(inner) => format!("({})", inner.to_css(compress)),
            Self::Slash(lhs, rhs) => format!("{}/{}", lhs.to_css(compress), rhs.to_css(compress)),
            Self::Expression(items) => items
                .iter()
                .map(|item| item.to_css(compress))
                .collect::<Vec<_>>()
                .join(" "),
            Self::List(items) => items
                .iter()
                .map(|item| item.to_css(compress))
                .collect::<Vec<_>>()
                .join(separator),
        }
    }

    /// Render as text, dropping the quotes of strings.
    ///
    /// Used for interpolation.
    pub(crate) fn to_unquoted(&self) -> String {
        match self {
            Self::Quoted { text, .. } => text.clone(),
            other => other.to_css(false),
        }
    }

    /// Interpret as a color, accepting color keywords.
    pub(crate) fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(color) => Some(color.clone()),
            Self::Keyword(name) => Color::from_keyword(name),
            _ => None,
        }
    }

    /// Apply an arithmetic operation on two evaluated values.
    pub(crate) fn operate(op: Op, lhs: &Value, rhs: &Value) -> Result<Value> {
        match (lhs, rhs) {
            (Value::Number(a), Value::Number(b)) => {
                let unit = if a.unit.is_empty() { &b.unit } else { &a.unit };
                Ok(Value::Number(Number::new(
                    apply(op, a.value, b.value)?,
                    unit.clone(),
                )))
            },
            (Value::Number(a), other) => {
                let color = other.as_color().ok_or_else(invalid_operands)?;
                operate_channels(&color, |c| apply(op, a.value, c))
            },
            (other, Value::Number(b)) => {
                let color = other.as_color().ok_or_else(invalid_operands)?;
                operate_channels(&color, |c| apply(op, c, b.value))
            },
            (a, b) => {
                let (a, b) = a
                    .as_color()
                    .zip(b.as_color())
                    .ok_or_else(invalid_operands)?;
                let mut rgb = [0.0; 3];
                for (i, channel) in rgb.iter_mut().enumerate() {
                    *channel = apply(op, a.rgb[i], b.rgb[i])?;
                }
                Ok(Value::Color(Color::from_rgba(rgb, a.alpha)))
            },
        }
    }
}

fn invalid_operands() -> Error {
    Error::new(ErrorKind::Operation, "operation on an invalid type")
}

fn operate_channels(color: &Color, f: impl Fn(f64) -> Result<f64>) -> Result<Value> {
    let mut rgb = [0.0; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        *channel = f(color.rgb[i])?;
    }
    Ok(Value::Color(Color::from_rgba(rgb, color.alpha)))
}

fn apply(op: Op, a: f64, b: f64) -> Result<f64> {
    match op {
        Op::Add => Ok(a + b),
        Op::Sub => Ok(a - b),
        Op::Mul => Ok(a * b),
        Op::Div if b == 0.0 => Err(Error::new(ErrorKind::Operation, "division by zero")),
        Op::Div => Ok(a / b),
    }
}

/// Format a number for CSS output.
///
/// Numbers are rounded to 8 decimals; trailing zeros are removed.
pub(crate) fn format_number(value: f64) -> String {
    let rounded = (value * 1e8).round() / 1e8;
    if rounded == rounded.trunc() && rounded.abs() < 1e15 {
        return format!("{}", rounded as i64);
    }
    let text = format!("{rounded:.8}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64, String),
    Hash(String),
    Variable(String),
    VariableRef(String),
    Quoted {
        text: String,
        quote: char,
        escaped: bool,
    },
    Url(String),
    RawCall(String, String),
    Ident(String),
    Function(String),
    Negate,
    Open,
    Close,
    Comma,
    Op(char),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value, unit) => write!(f, "`{}{unit}`", format_number(*value)),
            Self::Hash(text) => write!(f, "`#{text}`"),
            Self::Variable(name) => write!(f, "`@{name}`"),
            Self::VariableRef(name) => write!(f, "`@@{name}`"),
            Self::Quoted { text, quote, .. } => write!(f, "`{quote}{text}{quote}`"),
            Self::Url(_) => f.write_str("`url(...)`"),
            Self::RawCall(name, _) | Self::Function(name) => write!(f, "`{name}(`"),
            Self::Ident(name) => write!(f, "`{name}`"),
            Self::Negate => f.write_str("`-`"),
            Self::Open => f.write_str("`(`"),
            Self::Close => f.write_str("`)`"),
            Self::Comma => f.write_str("`,`"),
            Self::Op(op) => write!(f, "`{op}`"),
        }
    }
}

#[derive(Debug)]
struct Lexeme {
    token: Token,
    /// Whitespace or a comment precedes the token.
    space_before: bool,
    /// A number written with an explicit sign.
    signed: bool,
}

impl Lexeme {
    fn new(token: Token, space_before: bool) -> Self {
        Self {
            token,
            space_before,
            signed: false,
        }
    }
}

/// Split a value into lexemes.
fn tokenize(input: &str) -> Result<Vec<Lexeme>> {
    Ok(resolve_signs(lex(input)?))
}

fn lex(input: &str) -> Result<Vec<Lexeme>> {
    let mut parser_input = ParserInput::new(input);
    let mut parser = CssParser::new(&mut parser_input);
    let mut lexemes = Vec::new();
    lex_block(&mut parser, &mut lexemes).map_err(into_error)?;
    Ok(lexemes)
}

fn lex_block<'i>(parser: &mut CssParser<'i, '_>, lexemes: &mut Vec<Lexeme>) -> ParseResult<'i, ()> {
    let mut space_before = false;

    loop {
        let start = parser.position();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => return Ok(()),
        };
        let raw = parser.slice_from(start);

        let token = match token {
            CssToken::WhiteSpace(_) => {
                space_before = true;
                continue;
            },
            CssToken::Comment(_) => {
                if !raw.ends_with("*/") {
                    return fail(parser, "unterminated comment");
                }
                space_before = true;
                continue;
            },
            CssToken::Number { has_sign, .. } => {
                let token = number(parser, raw, "")?;
                lexemes.push(Lexeme {
                    token,
                    space_before,
                    signed: has_sign,
                });
                space_before = false;
                continue;
            },
            CssToken::Percentage { has_sign, .. } => {
                let token = number(parser, &raw[..raw.len() - 1], "%")?;
                lexemes.push(Lexeme {
                    token,
                    space_before,
                    signed: has_sign,
                });
                space_before = false;
                continue;
            },
            CssToken::Dimension { has_sign, unit, .. } => {
                let unit: &str = &unit;
                if !raw.ends_with(unit) {
                    return fail(parser, format!("unexpected `{raw}`"));
                }
                let number_len = raw.len() - unit.len();
                let unit_len = unit
                    .find(|c: char| !c.is_ascii_alphabetic())
                    .unwrap_or(unit.len());
                if unit_len == 0 {
                    return fail(parser, format!("unexpected `{raw}`"));
                }
                let token = number(parser, &raw[..number_len], &unit[..unit_len])?;
                lexemes.push(Lexeme {
                    token,
                    space_before,
                    signed: has_sign,
                });
                // `10px-5px` is read as a single dimension with unit `px-5px`.
                let rest = &raw[number_len + unit_len..];
                if !rest.is_empty() {
                    let rest = lex(rest).map_err(|error| -> ParseError<'i, Error> {
                        parser.new_custom_error(error)
                    })?;
                    lexemes.extend(rest);
                }
                space_before = false;
                continue;
            },
            CssToken::Hash(name) | CssToken::IDHash(name) => Token::Hash(String::from(&*name)),
            CssToken::AtKeyword(name) => Token::Variable(String::from(&*name)),
            CssToken::QuotedString(_) => quoted(parser, raw, false)?,
            CssToken::UnquotedUrl(_) => match raw.get(4..).and_then(|s| s.strip_suffix(')')) {
                Some(text) => Token::Url(text.trim().to_owned()),
                None => return fail(parser, "missing closing `)`"),
            },
            CssToken::Ident(name) => Token::Ident(String::from(&*name)),
            CssToken::Function(name) => {
                let lower = name.to_ascii_lowercase();
                if lower == "url" || RAW_FUNCTIONS.contains(&lower.as_str()) {
                    let Some(text) = skip_block(parser) else {
                        return fail(parser, "missing closing `)`");
                    };
                    let text = text.trim().to_owned();
                    if lower == "url" {
                        Token::Url(text)
                    } else {
                        Token::RawCall(String::from(&*name), text)
                    }
                } else {
                    lexemes.push(Lexeme::new(Token::Function(String::from(&*name)), space_before));
                    lex_nested(parser, lexemes)?;
                    Token::Close
                }
            },
            CssToken::ParenthesisBlock => {
                lexemes.push(Lexeme::new(Token::Open, space_before));
                lex_nested(parser, lexemes)?;
                Token::Close
            },
            CssToken::Delim('@') => match parser.next_including_whitespace_and_comments().cloned() {
                Ok(CssToken::AtKeyword(name)) => Token::VariableRef(String::from(&*name)),
                Ok(CssToken::CurlyBracketBlock) => match skip_block(parser) {
                    Some(name) => Token::Variable(name.trim().to_owned()),
                    None => return fail(parser, "missing closing `}` in interpolation"),
                },
                _ => return fail(parser, "expected a variable name after `@`"),
            },
            CssToken::Delim('~') => {
                let start = parser.position();
                match parser.next_including_whitespace_and_comments().cloned() {
                    Ok(CssToken::QuotedString(_)) => quoted(parser, parser.slice_from(start), true)?,
                    Ok(CssToken::Delim('`')) => return fail(parser, JAVASCRIPT_UNSUPPORTED),
                    _ => return fail(parser, "expected a string after `~`"),
                }
            },
            CssToken::Delim('`') => return fail(parser, JAVASCRIPT_UNSUPPORTED),
            CssToken::Delim(c @ ('+' | '-' | '*' | '/')) => Token::Op(c),
            CssToken::Comma => Token::Comma,
            CssToken::BadString(_) => return fail(parser, "unterminated string"),
            _ => return fail(parser, format!("unexpected `{}`", raw.trim())),
        };

        let close = matches!(token, Token::Close);
        lexemes.push(Lexeme::new(token, space_before && !close));
        space_before = false;
    }
}

/// Lex the parenthesized block just returned by `parser`.
fn lex_nested<'i>(parser: &mut CssParser<'i, '_>, lexemes: &mut Vec<Lexeme>) -> ParseResult<'i, ()> {
    let end = parser.parse_nested_block(|parser| -> ParseResult<'i, usize> {
        lex_block(parser, lexemes)?;
        Ok(parser.position().byte_index())
    })?;
    if parser.position().byte_index() == end {
        return fail(parser, "missing closing `)`");
    }
    Ok(())
}

fn number<'i>(parser: &CssParser<'i, '_>, text: &str, unit: &str) -> ParseResult<'i, Token> {
    match text.parse() {
        Ok(value) => Ok(Token::Number(value, unit.to_owned())),
        Err(_) => fail(parser, format!("invalid number `{text}`")),
    }
}

fn quoted<'i>(parser: &CssParser<'i, '_>, raw: &str, escaped: bool) -> ParseResult<'i, Token> {
    let quote = raw.chars().next().unwrap_or('"');
    match raw.get(1..).and_then(|rest| rest.strip_suffix(quote)) {
        Some(text) => Ok(Token::Quoted {
            text: text.to_owned(),
            quote,
            escaped,
        }),
        None => fail(parser, "unterminated string"),
    }
}

/// Decide whether `+` and `-` are operators, signs or negations.
///
/// The tokenizer attaches a sign to the following number, so `1px+2px`
/// comes out as two numbers. A signed number directly after an operand is
/// split back into an operator and a number. A `-` directly before a
/// variable or a parenthesis negates it, unless it follows an operand
/// without whitespace.
fn resolve_signs(lexemes: Vec<Lexeme>) -> Vec<Lexeme> {
    let mut result: Vec<Lexeme> = Vec::with_capacity(lexemes.len());
    let mut lexemes = lexemes.into_iter().peekable();

    while let Some(lexeme) = lexemes.next() {
        let after_operand = result.last().is_some_and(|last| last.token.is_operand());

        match lexeme.token {
            Token::Number(value, unit) if lexeme.signed && after_operand && !lexeme.space_before => {
                let op = if value.is_sign_negative() { '-' } else { '+' };
                result.push(Lexeme::new(Token::Op(op), false));
                result.push(Lexeme::new(Token::Number(value.abs(), unit), false));
            },
            Token::Op('-')
                if (lexeme.space_before || !after_operand)
                    && lexemes.peek().is_some_and(|next| {
                        !next.space_before
                            && matches!(
                                next.token,
                                Token::Variable(_) | Token::VariableRef(_) | Token::Open
                            )
                    }) =>
            {
                result.push(Lexeme::new(Token::Negate, lexeme.space_before));
            },
            token => result.push(Lexeme { token, ..lexeme }),
        }
    }

    result
}

impl Token {
    fn is_operand(&self) -> bool {
        matches!(
            self,
            Self::Number(..)
                | Self::Hash(_)
                | Self::Variable(_)
                | Self::VariableRef(_)
                | Self::Quoted { .. }
                | Self::RawCall(..)
                | Self::Close
        )
    }
}

/// `U+0025-00FF` cannot be tokenized as numbers.
fn is_unicode_range(input: &str) -> bool {
    input
        .trim_start()
        .get(..2)
        .is_some_and(|start| start.eq_ignore_ascii_case("u+"))
}

pub(crate) fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

struct ValueParser {
    tokens: Vec<Lexeme>,
    pos: usize,
    /// Parenthesis depth; `/` divides only inside parentheses.
    depth: usize,
}

impl ValueParser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|l| &l.token)
    }

    fn next(&mut self) -> Option<Token> {
        let lexeme = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(lexeme.token.clone())
    }

    fn expect_close(&mut self) -> Result<()> {
        match self.next() {
            Some(Token::Close) => Ok(()),
            Some(token) => Err(Error::new(
                ErrorKind::Syntax,
                format!("expected `)`, found {token}"),
            )),
            None => Err(Error::new(ErrorKind::Syntax, "missing closing `)`")),
        }
    }

    fn parse_list(&mut self) -> Result<Value> {
        let mut items = vec![self.parse_sequence()?];
        while self.peek() == Some(&Token::Comma) {
            self.pos += 1;
            items.push(self.parse_sequence()?);
        }
        Ok(if items.len() == 1 {
            items.remove(0)
        } else {
            Value::List(items)
        })
    }

    fn parse_sequence(&mut self) -> Result<Value> {
        let mut items = vec![self.parse_additive()?];
        loop {
            match self.peek() {
                None | Some(Token::Comma | Token::Close) => break,
                Some(Token::Op('/')) => {
                    self.pos += 1;
                    let rhs = self.parse_additive()?;
                    let lhs = items.pop().unwrap_or(Value::Anonymous(String::new()));
                    items.push(Value::Slash(Box::new(lhs), Box::new(rhs)));
                },
                Some(_) => items.push(self.parse_additive()?),
            }
        }
        Ok(if items.len() == 1 {
            items.remove(0)
        } else {
            Value::Expression(items)
        })
    }

    fn parse_additive(&mut self) -> Result<Value> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Token::Op('+')) => Op::Add,
                Some(Token::Op('-')) => Op::Sub,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.parse_multiplicative()?;
            lhs = Value::Operation {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> Result<Value> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Op('*')) => Op::Mul,
                Some(Token::Op('/')) if self.depth > 0 => Op::Div,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.parse_unary()?;
            lhs = Value::Operation {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Value> {
        if self.peek() == Some(&Token::Negate) {
            self.pos += 1;
            return Ok(Value::Negative(Box::new(self.parse_primary()?)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Value> {
        let Some(token) = self.next() else {
            return Err(Error::new(ErrorKind::Syntax, "unexpected end of value"));
        };

        let value = match token {
            Token::Number(value, unit) => Value::Number(Number::new(value, unit)),
            Token::Hash(text) => match Color::from_hex(&text) {
                Some(color) => Value::Color(color),
                None => Value::Keyword(format!("#{text}")),
            },
            Token::Variable(name) => Value::Variable(name),
            Token::VariableRef(name) => Value::VariableRef(name),
            Token::Quoted {
                text,
                quote,
                escaped,
            } => Value::Quoted {
                text,
                quote,
                escaped,
            },
            Token::Url(text) => {
                let inner = if text.starts_with(['"', '\'', '@']) {
                    Value::parse_strict(&text)?
                } else {
                    Value::Anonymous(text)
                };
                Value::Url(Box::new(inner))
            },
            Token::RawCall(name, text) => Value::RawCall { name, text },
            Token::Ident(name) => Value::Keyword(name),
            Token::Function(name) => {
                self.depth += 1;
                let mut args = Vec::new();
                if self.peek() != Some(&Token::Close) {
                    args.push(self.parse_sequence()?);
                    while self.peek() == Some(&Token::Comma) {
                        self.pos += 1;
                        args.push(self.parse_sequence()?);
                    }
                }
                self.expect_close()?;
                self.depth -= 1;
                Value::Call { name, args }
            },
            Token::Open => {
                self.depth += 1;
                let inner = self.parse_sequence()?;
                self.expect_close()?;
                self.depth -= 1;
                Value::Paren(Box::new(inner))
            },
            token => {
                return Err(Error::new(
                    ErrorKind::Syntax,
                    format!("unexpected {token}"),
                ))
            },
        };

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{format_number, Number, Op, Value};
    use crate::less::error::ErrorKind;

    fn number(value: f64, unit: &str) -> Value {
        Value::Number(Number::new(value, unit))
    }

    #[test]
    fn parse_space_separated() {
        let value = Value::parse("1px solid #000").unwrap();

        assert!(
            matches!(
                &value,
                Value::Expression(items)
                    if items.len() == 3
                        && items[0] == number(1.0, "px")
                        && items[1] == Value::Keyword("solid".to_owned())
            ),
            "{value:?}"
        );
    }

    #[test]
    fn parse_operations() {
        let value = Value::parse("@a + 2 * 3px").unwrap();

        assert_eq!(
            value,
            Value::Operation {
                op: Op::Add,
                lhs: Box::new(Value::Variable("a".to_owned())),
                rhs: Box::new(Value::Operation {
                    op: Op::Mul,
                    lhs: Box::new(number(2.0, "")),
                    rhs: Box::new(number(3.0, "px")),
                }),
            }
        );
    }

    #[test]
    fn parse_negative_numbers() {
        const CASES: [(&str, usize); 7] = [
            ("0 -10px", 2),
            ("0 - 10px", 1),
            ("10px-5px", 1),
            ("1px+2px", 1),
            ("-@a -@b", 2),
            ("@a -@b", 2),
            ("@a - @b", 1),
        ];

        for (input, expected) in CASES {
            let value = Value::parse(input).unwrap();
            let len = match &value {
                Value::Expression(items) => items.len(),
                _ => 1,
            };
            assert_eq!(
                len, expected,
                "\nparse({input:?}) expected {expected} items but received {value:?}"
            );
        }
    }

    #[test]
    fn parse_signs() {
        assert_eq!(
            Value::parse("10px-5px").unwrap(),
            Value::Operation {
                op: Op::Sub,
                lhs: Box::new(number(10.0, "px")),
                rhs: Box::new(number(5.0, "px")),
            }
        );
        assert_eq!(
            Value::parse("-@a").unwrap(),
            Value::Negative(Box::new(Value::Variable("a".to_owned())))
        );
        assert_eq!(Value::parse("-.5em").unwrap(), number(-0.5, "em"));
    }

    #[test]
    fn parse_exponents() {
        const CASES: [(&str, &str); 4] = [
            ("1e3px", "1000px"),
            ("2.5E-1", "0.25"),
            ("1em", "1em"),
            ("3ex", "3ex"),
        ];

        for (input, expected) in CASES {
            let result = Value::parse(input).unwrap().to_css(false);
            assert_eq!(
                result, expected,
                "\nparse({input:?}) expected {expected:?} but received {result:?}"
            );
        }
    }

    #[test]
    fn parse_slash_outside_parens() {
        let value = Value::parse("12px/1.5 serif").unwrap();
        assert_eq!(value.to_css(false), "12px/1.5 serif");

        let value = Value::parse("(12px / 2)").unwrap();
        assert!(matches!(value, Value::Paren(_)));
    }

    #[test]
    fn parse_raw_functions() {
        let value = Value::parse("calc(100% - 10px)").unwrap();
        assert_eq!(value.to_css(false), "calc(100% - 10px)");

        let value = Value::parse("url(http://example.com/a.png)").unwrap();
        assert_eq!(value.to_css(false), "url(http://example.com/a.png)");
    }

    #[test]
    fn parse_fallback_to_anonymous() {
        const CASES: [&str; 3] = [
            "progid:DXImageTransform.Microsoft.gradient(enabled=false)",
            "U+0025-00FF",
            "1px\\9",
        ];

        for input in CASES {
            let value = Value::parse(input).unwrap();
            assert_eq!(
                value,
                Value::Anonymous(input.to_owned()),
                "\nparse({input:?}) expected verbatim text but received {value:?}"
            );
        }

        assert!(Value::parse("@a = 1").is_err());
    }

    #[test]
    fn reject_javascript() {
        for input in ["`1 + 1`", "~`document.title`", "\"a\" `b`"] {
            let error = Value::parse(input).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Syntax, "{input:?}");
            assert_eq!(error.message(), "JavaScript evaluation is not supported");
        }

        let value = Value::parse("\"`quoted`\"").unwrap();
        assert!(matches!(value, Value::Quoted { .. }), "{value:?}");
    }

    #[test]
    fn render_list() {
        let value = Value::parse("\"Helvetica Neue\", Arial, sans-serif").unwrap();
        assert_eq!(value.to_css(false), "\"Helvetica Neue\", Arial, sans-serif");
        assert_eq!(value.to_css(true), "\"Helvetica Neue\",Arial,sans-serif");
    }

    #[test]
    fn operate() {
        let result = Value::operate(Op::Add, &number(1.0, "px"), &number(2.0, "")).unwrap();
        assert_eq!(result.to_css(false), "3px");

        let result =
            Value::operate(Op::Mul, &Value::parse("#111").unwrap(), &number(2.0, "")).unwrap();
        assert_eq!(result.to_css(false), "#222222");

        assert!(Value::operate(Op::Div, &number(1.0, ""), &number(0.0, "")).is_err());
        assert!(Value::operate(
            Op::Add,
            &Value::Keyword("solid".to_owned()),
            &number(1.0, "")
        )
        .is_err());
    }

    #[test]
    fn format() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1.0 / 3.0), "0.33333333");
        assert_eq!(format_number(-0.0), "0");
    }
}
