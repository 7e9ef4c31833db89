use chrono::NaiveDate;
use regex::RegexBuilder;

use crate::corpus::{Colors, Game, Layout, Rarity};

use super::ast::{Expr, Field, FieldClass, FieldClause, Op, ParseError, Query, Span, Value};
use super::lexer::{lex, RawClause, RawValueKind, Token, TokenKind};
use super::predicates;

/// Parse a query string. Empty and whitespace-only input yields the empty
/// query (which matches nothing); every other failure is a [`ParseError`]
/// with a span into `input`.
pub fn parse(input: &str) -> Result<Query, ParseError> {
    let tokens = lex(input)?;
    if tokens.is_empty() {
        return Ok(Query::default());
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        input_len: input.len(),
    };
    let expr = parser.or_expr()?;
    if let Some(token) = parser.peek() {
        let message = match token.kind {
            TokenKind::RParen => "unexpected ')'",
            _ => "unexpected trailing input",
        };
        return Err(ParseError::new(message, token.span));
    }
    Ok(Query { expr: Some(expr) })
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    input_len: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eof_span(&self) -> Span {
        Span::new(self.input_len, self.input_len)
    }

    fn keyword(&self) -> Option<&'static str> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Word(word),
                ..
            }) if word.eq_ignore_ascii_case("or") => Some("or"),
            Some(Token {
                kind: TokenKind::Word(word),
                ..
            }) if word.eq_ignore_ascii_case("and") => Some("and"),
            _ => None,
        }
    }

    fn starts_primary(&self) -> bool {
        match self.peek() {
            Some(token) => !matches!(token.kind, TokenKind::RParen),
            None => false,
        }
    }

    fn or_expr(&mut self) -> Result<Expr, ParseError> {
        let mut parts = vec![self.and_expr()?];
        while self.keyword() == Some("or") {
            let or_span = self.bump().expect("keyword was peeked").span;
            if !self.starts_primary() {
                return Err(ParseError::new(
                    "expected expression after 'or'",
                    self.peek().map(|t| t.span).unwrap_or(or_span),
                ));
            }
            parts.push(self.and_expr()?);
        }
        Ok(if parts.len() == 1 {
            parts.pop().expect("parts is non-empty")
        } else {
            Expr::Or(parts)
        })
    }

    fn and_expr(&mut self) -> Result<Expr, ParseError> {
        let mut parts = vec![self.unary()?];
        loop {
            match self.keyword() {
                Some("and") => {
                    let and_span = self.bump().expect("keyword was peeked").span;
                    if !self.starts_primary() {
                        return Err(ParseError::new(
                            "expected expression after 'and'",
                            self.peek().map(|t| t.span).unwrap_or(and_span),
                        ));
                    }
                }
                Some(_) => break, // 'or' belongs to the caller
                None => {
                    if !self.starts_primary() {
                        break;
                    }
                }
            }
            parts.push(self.unary()?);
        }
        Ok(if parts.len() == 1 {
            parts.pop().expect("parts is non-empty")
        } else {
            Expr::And(parts)
        })
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(Token {
            kind: TokenKind::Minus,
            span,
        }) = self.peek()
        {
            let span = *span;
            self.bump();
            if !self.starts_primary() {
                return Err(ParseError::new("expected expression after '-'", span));
            }
            return Ok(Expr::Not(Box::new(self.unary()?)));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let token = match self.bump() {
            Some(token) => token,
            None => return Err(ParseError::new("expected expression", self.eof_span())),
        };
        match token.kind {
            TokenKind::LParen => {
                let expr = self.or_expr()?;
                match self.peek() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => {
                        self.bump();
                        Ok(expr)
                    }
                    _ => Err(ParseError::new("unclosed parenthesis", token.span)),
                }
            }
            TokenKind::RParen => Err(ParseError::new("unexpected ')'", token.span)),
            TokenKind::Quoted(text) => Ok(Expr::Name(text)),
            TokenKind::Exact(text) => Ok(Expr::ExactName(text)),
            TokenKind::Word(first) => {
                // Adjacent bare words merge into one name clause.
                let mut name = first;
                while let Some(Token {
                    kind: TokenKind::Word(word),
                    ..
                }) = self.peek()
                {
                    if self.keyword().is_some() {
                        break;
                    }
                    name.push(' ');
                    name.push_str(word);
                    self.bump();
                }
                Ok(Expr::Name(name))
            }
            TokenKind::Clause(raw) => self.field_clause(raw, token.span),
            TokenKind::Minus => Err(ParseError::new("expected expression after '-'", token.span)),
        }
    }

    fn field_clause(&mut self, raw: RawClause, span: Span) -> Result<Expr, ParseError> {
        if raw.field.is_empty() {
            return Err(ParseError::new(
                "expected a field name before the operator",
                raw.op_span,
            ));
        }
        let field = Field::from_name(&raw.field).ok_or_else(|| {
            ParseError::new(format!("unknown field '{}'", raw.field), raw.field_span)
        })?;
        let class = field.class();

        let op_ok = match class {
            FieldClass::Substring | FieldClass::Discrete | FieldClass::Mana => {
                matches!(raw.op, Op::Colon | Op::Eq | Op::Ne)
            }
            FieldClass::Format => matches!(raw.op, Op::Colon | Op::Eq),
            FieldClass::Is => raw.op == Op::Colon,
            FieldClass::Numeric
            | FieldClass::Rarity
            | FieldClass::ColorSet
            | FieldClass::Date => true,
        };
        if !op_ok {
            return Err(ParseError::new(
                format!("operator '{}' is not valid for '{}'", raw.op.as_str(), raw.field),
                raw.op_span,
            ));
        }

        let value = self.clause_value(field, class, &raw)?;
        Ok(Expr::Field(FieldClause {
            field,
            op: raw.op,
            value,
            span,
        }))
    }

    fn clause_value(
        &self,
        field: Field,
        class: FieldClass,
        raw: &RawClause,
    ) -> Result<Value, ParseError> {
        let text = &raw.value.text;
        let span = raw.value.span;

        if raw.value.kind == RawValueKind::Regex {
            // Regexes only make sense over textual fields.
            if !matches!(
                class,
                FieldClass::Substring | FieldClass::Discrete | FieldClass::Rarity
            ) {
                return Err(ParseError::new(
                    format!("regular expressions are not valid for '{}'", raw.field),
                    span,
                ));
            }
            let regex = RegexBuilder::new(text)
                .case_insensitive(true)
                .build()
                .map_err(|_| ParseError::new("invalid regular expression", span))?;
            return Ok(Value::Regex(regex));
        }

        match class {
            FieldClass::Numeric => Ok(text
                .parse::<f64>()
                .map(Value::Number)
                .unwrap_or_else(|_| Value::Text(text.clone()))),
            FieldClass::ColorSet => parse_color_value(text)
                .map(Value::ColorSet)
                .ok_or_else(|| ParseError::new(format!("invalid color value '{text}'"), span)),
            FieldClass::Date => parse_date_value(text)
                .map(Value::Date)
                .ok_or_else(|| ParseError::new(format!("invalid date '{text}'"), span)),
            FieldClass::Rarity => Rarity::from_name(text)
                .map(|r| Value::Text(r.as_str().to_string()))
                .ok_or_else(|| ParseError::new(format!("unknown rarity '{text}'"), span)),
            FieldClass::Is => {
                let name = text.to_ascii_lowercase();
                if !predicates::is_known(&name) {
                    return Err(ParseError::new(
                        format!("unknown is: predicate '{text}'"),
                        span,
                    ));
                }
                Ok(Value::Text(name))
            }
            FieldClass::Discrete if field == Field::Layout => Layout::from_name(text)
                .map(|l| Value::Text(l.as_str().to_string()))
                .ok_or_else(|| ParseError::new(format!("unknown layout '{text}'"), span)),
            FieldClass::Discrete if field == Field::Games => Game::from_name(text)
                .map(|g| Value::Text(g.as_str().to_string()))
                .ok_or_else(|| ParseError::new(format!("unknown game '{text}'"), span)),
            FieldClass::Format => Ok(Value::Text(text.to_ascii_lowercase())),
            _ => Ok(Value::Text(text.clone())),
        }
    }
}

/// Color values: a `wubrg` letter run, a color word, or colorless.
fn parse_color_value(text: &str) -> Option<Colors> {
    match text.to_ascii_lowercase().as_str() {
        "white" => Colors::from_letters("w"),
        "blue" => Colors::from_letters("u"),
        "black" => Colors::from_letters("b"),
        "red" => Colors::from_letters("r"),
        "green" => Colors::from_letters("g"),
        "colorless" => Some(Colors::EMPTY),
        letters => Colors::from_letters(letters),
    }
}

/// `YYYY` or `YYYY-MM-DD`.
fn parse_date_value(text: &str) -> Option<NaiveDate> {
    if text.len() == 4 && text.chars().all(|c| c.is_ascii_digit()) {
        let year = text.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}
