use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::tokenizer::{tokenize, unescape, Token};

/// Recursive-descent parser for call chains.
///
/// ```text
/// chain := call ('.' call)*
/// call  := IDENT '(' (arg (',' arg)*)? ')'
/// arg   := IDENT '=' value | value
/// value := STRING | NUMBER | BOOL | call
/// ```
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<(Token<'src>, std::ops::Range<usize>)>,
    pos: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> ParseResult<Self> {
        let tokens = tokenize(source)?;
        Ok(Self {
            source,
            tokens,
            pos: 0,
        })
    }

    /// Parse a complete call chain; trailing tokens are an error
    pub fn parse_call_chain(&mut self) -> ParseResult<CallChain> {
        let head = self.parse_call()?;
        let mut chain = Vec::new();

        while self.match_token(Token::Dot) {
            chain.push(self.parse_call()?);
        }

        if !self.is_at_end() {
            return Err(ParseError::unexpected_token(
                self.peek_pos(),
                "end of input",
                Self::format_token(self.peek()),
            ));
        }

        Ok(CallChain { head, chain })
    }

    /// Parse `name(args...)`
    fn parse_call(&mut self) -> ParseResult<Call> {
        let name = self.expect_ident()?;
        self.expect(Token::LParen)?;

        let mut args = Vec::new();
        if !self.check(Token::RParen) {
            loop {
                args.push(self.parse_arg()?);
                if !self.match_token(Token::Comma) {
                    break;
                }
            }
        }

        self.expect(Token::RParen)?;
        Ok(Call { name, args })
    }

    fn parse_arg(&mut self) -> ParseResult<Arg> {
        let named = matches!(self.peek(), Some((Token::Ident(_), _)))
            && matches!(self.peek_ahead(1), Some((Token::Equals, _)));

        if named {
            let name = self.expect_ident()?;
            self.expect(Token::Equals)?;
            let value = self.parse_value()?;
            return Ok(Arg::Named { name, value });
        }

        let value = self.parse_value()?;
        Ok(Arg::Positional { value })
    }

    fn parse_value(&mut self) -> ParseResult<Value> {
        match self.peek() {
            Some((Token::String(raw), span)) => {
                let value = unescape(raw, span.start)?;
                self.advance();
                Ok(Value::String(value))
            }
            Some((Token::Number(raw), _)) => {
                // Malformed decimals like `1.2.3` become NaN and normalize to 0
                let value = raw.parse::<f64>().unwrap_or(f64::NAN);
                self.advance();
                Ok(Value::Number(value))
            }
            Some((Token::Bool(b), _)) => {
                let value = *b;
                self.advance();
                Ok(Value::Bool(value))
            }
            Some((Token::Ident(_), _)) => Ok(Value::Call(self.parse_call()?)),
            _ => Err(self.error_expected("value")),
        }
    }

    // Helper methods

    fn peek(&self) -> Option<&(Token<'src>, std::ops::Range<usize>)> {
        self.tokens.get(self.pos)
    }

    fn peek_ahead(&self, offset: usize) -> Option<&(Token<'src>, std::ops::Range<usize>)> {
        self.tokens.get(self.pos + offset)
    }

    fn advance(&mut self) -> Option<&(Token<'src>, std::ops::Range<usize>)> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn check(&self, token: Token) -> bool {
        if let Some((t, _)) = self.peek() {
            std::mem::discriminant(t) == std::mem::discriminant(&token)
        } else {
            false
        }
    }

    fn match_token(&mut self, token: Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token) -> ParseResult<()> {
        if self.check(token.clone()) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_expected(token.kind_name()))
        }
    }

    fn expect_ident(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some((Token::Ident(s), _)) => {
                let val = s.to_string();
                self.advance();
                Ok(val)
            }
            _ => Err(self.error_expected("identifier")),
        }
    }

    /// Byte offset of the next token, or end of source at EOF
    fn peek_pos(&self) -> usize {
        self.peek()
            .map(|(_, span)| span.start)
            .unwrap_or(self.source.len())
    }

    fn error_expected(&self, expected: &str) -> ParseError {
        match self.peek() {
            None => ParseError::unexpected_eof(self.peek_pos(), expected),
            found => ParseError::unexpected_token(self.peek_pos(), expected, Self::format_token(found)),
        }
    }

    /// Format a token for display in error messages
    fn format_token(token: Option<&(Token, std::ops::Range<usize>)>) -> String {
        match token {
            None => "end of input".to_string(),
            Some((token, _)) => token.to_string(),
        }
    }
}

/// Parse expression text into a call chain
pub fn parse_call_chain(source: &str) -> ParseResult<CallChain> {
    Parser::new(source)?.parse_call_chain()
}

pub fn parse_selector(source: &str) -> ParseResult<Selector> {
    Ok(Selector {
        call_chain: parse_call_chain(source)?,
    })
}

pub fn parse_guard(source: &str) -> ParseResult<Guard> {
    Ok(Guard {
        call_chain: parse_call_chain(source)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_call() {
        let chain = parse_call_chain("heading(\"Title\")").unwrap();
        assert_eq!(chain.head.name, "heading");
        assert_eq!(chain.head.positional(0).and_then(Value::as_str), Some("Title"));
        assert!(chain.chain.is_empty());
    }

    #[test]
    fn test_parse_chain_with_named_args() {
        let chain = parse_call_chain("under(heading(\"A\")).match(\"foo\", occurrence=2).nth(1)").unwrap();
        assert_eq!(chain.head.name, "under");
        assert_eq!(chain.chain.len(), 2);
        assert_eq!(chain.chain[0].named("occurrence").and_then(Value::as_number), Some(2.0));
        assert_eq!(chain.chain[1].name, "nth");

        let inner = chain.head.positional(0).and_then(Value::as_call).unwrap();
        assert_eq!(inner.name, "heading");
    }

    #[test]
    fn test_parse_nested_named_call() {
        let chain = parse_call_chain("paragraphs(in=under(heading(\"X\")))").unwrap();
        let scope = chain.head.named("in").and_then(Value::as_call).unwrap();
        assert_eq!(scope.name, "under");
    }

    #[test]
    fn test_parse_empty_args() {
        let chain = parse_call_chain("blocks().one()").unwrap();
        assert!(chain.head.args.is_empty());
        assert_eq!(chain.chain[0].name, "one");
    }

    #[test]
    fn test_malformed_number_is_nan() {
        let chain = parse_call_chain("nth(1.2.3)").unwrap();
        assert!(chain.head.positional(0).and_then(Value::as_number).unwrap().is_nan());
    }

    #[test]
    fn test_missing_paren_reports_expected() {
        let err = parse_call_chain("heading \"A\")").unwrap_err();
        assert_eq!(
            err,
            ParseError::unexpected_token(8, "'('", "string \"A\"")
        );
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse_call_chain("one() two()").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { pos: 6, ref expected, .. } if expected == "end of input"));
    }

    #[test]
    fn test_unexpected_eof() {
        let err = parse_call_chain("heading(\"A\"").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { pos: 11, .. }));
    }

    #[test]
    fn test_dangling_comma_is_error() {
        assert!(parse_call_chain("all(true,)").is_err());
    }

    #[test]
    fn test_bare_literal_is_not_a_chain() {
        assert!(parse_call_chain("\"text\"").is_err());
    }
}
