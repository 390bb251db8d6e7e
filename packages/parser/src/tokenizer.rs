use crate::error::{ParseError, ParseResult};
use logos::Logos;
use std::fmt;

/// Token types for the call-chain expression language
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token<'src> {
    // Literals
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice())]
    Ident(&'src str),

    // Raw string literal including quotes; escapes are decoded by the parser
    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice())]
    String(&'src str),

    // Digits followed by any run of digits and dots, e.g. `2`, `1.5`
    #[regex(r"[0-9][0-9.]*", |lex| lex.slice())]
    Number(&'src str),

    // Symbols
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("=")]
    Equals,
}

impl<'src> Token<'src> {
    /// Short name of the token class, used in "expected X" diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Bool(_) => "boolean",
            Token::Ident(_) => "identifier",
            Token::String(_) => "string",
            Token::Number(_) => "number",
            Token::LParen => "'('",
            Token::RParen => "')'",
            Token::Comma => "','",
            Token::Dot => "'.'",
            Token::Equals => "'='",
        }
    }
}

impl<'src> fmt::Display for Token<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Bool(b) => write!(f, "boolean {}", b),
            Token::Ident(s) => write!(f, "identifier '{}'", s),
            Token::String(s) => write!(f, "string {}", s),
            Token::Number(n) => write!(f, "number {}", n),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Comma => write!(f, "','"),
            Token::Dot => write!(f, "'.'"),
            Token::Equals => write!(f, "'='"),
        }
    }
}

/// Tokenize an expression, failing on the first character no token accepts
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token<'_>, std::ops::Range<usize>)>> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(source).spanned() {
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                let ch = source[span.start..].chars().next().unwrap_or('\0');
                if ch == '"' {
                    return Err(ParseError::invalid_string(span.start, "unterminated string literal"));
                }
                return Err(ParseError::unexpected_character(ch, span.start));
            }
        }
    }
    Ok(tokens)
}

/// Decode a raw string token (quotes included) using JSON escape rules.
///
/// `offset` is the byte offset of the opening quote, used for error positions.
pub fn unescape(raw: &str, offset: usize) -> ParseResult<String> {
    let inner = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| ParseError::invalid_string(offset, "string literal must be double-quoted"))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.char_indices();

    while let Some((i, c)) = chars.next() {
        let at = offset + 1 + i;
        if c != '\\' {
            if (c as u32) < 0x20 {
                return Err(ParseError::invalid_string(at, "control character in string literal"));
            }
            out.push(c);
            continue;
        }

        let (_, escape) = chars
            .next()
            .ok_or_else(|| ParseError::invalid_string(at, "dangling escape"))?;
        match escape {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let high = read_hex4(&mut chars, at)?;
                let code = if (0xD800..0xDC00).contains(&high) {
                    match (chars.next(), chars.next()) {
                        (Some((_, '\\')), Some((_, 'u'))) => {}
                        _ => {
                            return Err(ParseError::invalid_string(at, "unpaired surrogate escape"));
                        }
                    }
                    let low = read_hex4(&mut chars, at)?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(ParseError::invalid_string(at, "unpaired surrogate escape"));
                    }
                    0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                } else {
                    high
                };
                let decoded = char::from_u32(code)
                    .ok_or_else(|| ParseError::invalid_string(at, "unpaired surrogate escape"))?;
                out.push(decoded);
            }
            other => {
                return Err(ParseError::invalid_string(
                    at,
                    format!("unknown escape sequence '\\{}'", other),
                ));
            }
        }
    }

    Ok(out)
}

fn read_hex4(chars: &mut std::str::CharIndices<'_>, at: usize) -> ParseResult<u32> {
    let mut value = 0u32;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|(_, c)| c.to_digit(16))
            .ok_or_else(|| ParseError::invalid_string(at, "invalid \\u escape"))?;
        value = value * 16 + digit;
    }
    Ok(value)
}
