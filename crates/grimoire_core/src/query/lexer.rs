use std::iter::Peekable;
use std::str::CharIndices;

use super::ast::{Op, ParseError, Span};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawValueKind {
    Word,
    Quoted,
    Regex,
}

/// Unparsed clause value with its position.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawValue {
    pub kind: RawValueKind,
    pub text: String,
    pub span: Span,
}

/// A `field OP value` run lexed as one unit; the parser types it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawClause {
    pub field: String,
    pub field_span: Span,
    pub op: Op,
    pub op_span: Span,
    pub value: RawValue,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Word(String),
    Quoted(String),
    Exact(String),
    LParen,
    RParen,
    Minus,
    Clause(RawClause),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

pub(crate) fn lex(input: &str) -> Result<Vec<Token>, ParseError> {
    Lexer {
        input,
        chars: input.char_indices().peekable(),
    }
    .run()
}

struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    fn run(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        while let Some(&(pos, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                self.chars.next();
                continue;
            }
            let token = match ch {
                '(' => {
                    self.chars.next();
                    Token {
                        kind: TokenKind::LParen,
                        span: Span::new(pos, pos + 1),
                    }
                }
                ')' => {
                    self.chars.next();
                    Token {
                        kind: TokenKind::RParen,
                        span: Span::new(pos, pos + 1),
                    }
                }
                '-' => {
                    self.chars.next();
                    Token {
                        kind: TokenKind::Minus,
                        span: Span::new(pos, pos + 1),
                    }
                }
                '"' | '\'' => {
                    let (text, span) = self.quoted(pos)?;
                    Token {
                        kind: TokenKind::Quoted(text),
                        span,
                    }
                }
                '!' => self.exact_name(pos)?,
                _ => self.word_or_clause(pos)?,
            };
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Consume a quoted string; the opening quote is still pending.
    fn quoted(&mut self, start: usize) -> Result<(String, Span), ParseError> {
        let (_, quote) = self.chars.next().expect("caller peeked the quote");
        let mut text = String::new();
        for (pos, ch) in self.chars.by_ref() {
            if ch == quote {
                return Ok((text, Span::new(start, pos + 1)));
            }
            text.push(ch);
        }
        Err(ParseError::new(
            "unterminated quoted string",
            Span::new(start, self.input.len()),
        ))
    }

    /// `!"…"` or `!word` — an exact-name clause.
    fn exact_name(&mut self, start: usize) -> Result<Token, ParseError> {
        self.chars.next(); // the '!'
        match self.chars.peek() {
            Some(&(pos, '"')) | Some(&(pos, '\'')) => {
                let (text, span) = self.quoted(pos)?;
                Ok(Token {
                    kind: TokenKind::Exact(text),
                    span: Span::new(start, span.end),
                })
            }
            Some(&(_, ch)) if !ch.is_whitespace() && ch != '(' && ch != ')' => {
                let (text, span) = self.bare_word(false);
                Ok(Token {
                    kind: TokenKind::Exact(text),
                    span: Span::new(start, span.end),
                })
            }
            _ => Err(ParseError::new(
                "expected a name after '!'",
                Span::new(start, start + 1),
            )),
        }
    }

    /// Read a bare word. When `stop_at_op` is set the word also ends at an
    /// operator character, which makes it a candidate field name.
    fn bare_word(&mut self, stop_at_op: bool) -> (String, Span) {
        let start = self
            .chars
            .peek()
            .map(|&(pos, _)| pos)
            .unwrap_or(self.input.len());
        let mut end = start;
        let mut text = String::new();
        while let Some(&(pos, ch)) = self.chars.peek() {
            if ch.is_whitespace() || ch == '(' || ch == ')' {
                break;
            }
            if stop_at_op && matches!(ch, ':' | '=' | '<' | '>') {
                break;
            }
            if stop_at_op && ch == '!' && self.peek_second() == Some('=') {
                break;
            }
            text.push(ch);
            end = pos + ch.len_utf8();
            self.chars.next();
        }
        (text, Span::new(start, end))
    }

    fn peek_second(&self) -> Option<char> {
        let mut clone = self.chars.clone();
        clone.next();
        clone.next().map(|(_, ch)| ch)
    }

    /// A bare word, or — when an operator follows directly — a whole
    /// `field OP value` clause.
    fn word_or_clause(&mut self, start: usize) -> Result<Token, ParseError> {
        let (field, field_span) = self.bare_word(true);
        let peeked = self.chars.peek().map(|&(_, ch)| ch);
        let op = match peeked {
            Some(':' | '=' | '<' | '>') => self.operator(),
            Some('!') if self.peek_second() == Some('=') => self.operator(),
            _ => {
                return Ok(Token {
                    kind: TokenKind::Word(field),
                    span: field_span,
                })
            }
        };
        let (op, op_span) = op;
        let value = self.clause_value(op_span)?;
        let span = Span::new(start, value.span.end);
        Ok(Token {
            kind: TokenKind::Clause(RawClause {
                field,
                field_span,
                op,
                op_span,
                value,
            }),
            span,
        })
    }

    fn operator(&mut self) -> (Op, Span) {
        let (start, first) = self.chars.next().expect("caller peeked the operator");
        let mut end = start + 1;
        let op = match first {
            ':' => Op::Colon,
            '=' => Op::Eq,
            '!' => {
                self.chars.next(); // the '=' peeked by the caller
                end += 1;
                Op::Ne
            }
            '<' | '>' => {
                let eq = matches!(self.chars.peek(), Some(&(_, '=')));
                if eq {
                    self.chars.next();
                    end += 1;
                }
                match (first, eq) {
                    ('<', true) => Op::Le,
                    ('<', false) => Op::Lt,
                    (_, true) => Op::Ge,
                    (_, false) => Op::Gt,
                }
            }
            _ => unreachable!("operator() called on a non-operator character"),
        };
        (op, Span::new(start, end))
    }

    fn clause_value(&mut self, op_span: Span) -> Result<RawValue, ParseError> {
        match self.chars.peek() {
            Some(&(pos, '"')) | Some(&(pos, '\'')) => {
                let (text, span) = self.quoted(pos)?;
                Ok(RawValue {
                    kind: RawValueKind::Quoted,
                    text,
                    span,
                })
            }
            Some(&(pos, '/')) => self.regex_value(pos),
            Some(&(_, ch)) if !ch.is_whitespace() && ch != '(' && ch != ')' => {
                let (text, span) = self.bare_word(false);
                Ok(RawValue {
                    kind: RawValueKind::Word,
                    text,
                    span,
                })
            }
            _ => Err(ParseError::new("missing value after operator", op_span)),
        }
    }

    fn regex_value(&mut self, start: usize) -> Result<RawValue, ParseError> {
        self.chars.next(); // the opening '/'
        let mut text = String::new();
        while let Some((pos, ch)) = self.chars.next() {
            match ch {
                '/' => {
                    return Ok(RawValue {
                        kind: RawValueKind::Regex,
                        text,
                        span: Span::new(start, pos + 1),
                    })
                }
                '\\' => match self.chars.next() {
                    // A `\/` escape yields a literal slash; everything else
                    // passes through for the regex engine to interpret.
                    Some((_, '/')) => text.push('/'),
                    Some((_, next)) => {
                        text.push('\\');
                        text.push(next);
                    }
                    None => break,
                },
                _ => text.push(ch),
            }
        }
        Err(ParseError::new(
            "unterminated regular expression",
            Span::new(start, self.input.len()),
        ))
    }
}
