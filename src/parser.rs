//! Recursive-descent parser over the UCUM grammar.
//!
//! Unlike a conventional fail-fast parser, this one never aborts: every
//! unexpected token becomes a recorded [`ParseError`] and the parser
//! synchronizes (skips ahead to the next `.`, `/`, `)` or end of input)
//! before continuing, so later sub-expressions still get checked. This
//! mirrors the lexer's own "never throws" contract one layer up.

use crate::ast::{BinaryOp, ExponentFormat, Expression};
use crate::diagnostics::{ParseError, ParseErrorKind, ParseWarning, ParseWarningKind};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::registry;

/// Everything a parse produces: the best-effort AST plus whatever
/// diagnostics were recorded along the way. Always returned, never panics.
#[derive(Clone, Debug)]
pub struct ParseResult {
    pub ast: Option<Expression>,
    pub errors: Vec<ParseError>,
    pub warnings: Vec<ParseWarning>,
    pub source: String,
}

pub fn parse(source: &str) -> ParseResult {
    let tokens = Lexer::tokenize(source);
    let mut parser = Parser {
        tokens,
        pos: 0,
        errors: Vec::new(),
        warnings: Vec::new(),
        source_len: source.len(),
    };
    let ast = parser.parse_main_term();
    // Trailing input after a complete parse is reported once.
    if !parser.at_eof() {
        let tok = parser.current().clone();
        parser.errors.push(ParseError::new(
            ParseErrorKind::UnexpectedToken,
            format!("trailing input after complete expression: '{}'", tok.text),
            tok.position,
            tok.length.max(1),
        ));
    }
    ParseResult {
        ast,
        errors: parser.errors,
        warnings: parser.warnings,
        source: source.to_string(),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<ParseError>,
    warnings: Vec<ParseWarning>,
    source_len: usize,
}

impl Parser {
    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn at_eof(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    /// Skip ahead until `.`, `/`, `)` or EOF — the synchronization points
    /// named in §4.2's error recovery rule.
    fn synchronize(&mut self) {
        while !self.at_eof() {
            match self.current().kind {
                TokenKind::Dot | TokenKind::Slash | TokenKind::RParen => break,
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn record_unexpected(&mut self, message: impl Into<String>) {
        let tok = self.current().clone();
        let kind = if tok.kind == TokenKind::Eof {
            ParseErrorKind::UnexpectedEof
        } else {
            ParseErrorKind::UnexpectedToken
        };
        self.errors.push(
            ParseError::new(kind, message, tok.position, tok.length.max(1))
                .with_token(tok.text.clone()),
        );
    }

    // main_term := '/' term | term
    fn parse_main_term(&mut self) -> Option<Expression> {
        if self.current().kind == TokenKind::Slash {
            let tok = self.advance();
            let operand = self.parse_term()?;
            let span_len = operand.span().position + operand.span().length - tok.position;
            return Some(Expression::Unary {
                operand: Box::new(operand),
                span: crate::diagnostics::Span::new(tok.position, span_len),
            });
        }
        self.parse_term()
    }

    // term := term ('.' | '/') component | component   (left-associative)
    fn parse_term(&mut self) -> Option<Expression> {
        let mut left = self.parse_component()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Dot => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            let op_tok = self.advance();
            match self.parse_component() {
                Some(right) => {
                    let start = left.span().position;
                    let end = right.span().position + right.span().length;
                    left = Expression::Binary {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                        span: crate::diagnostics::Span::new(start, end - start),
                    };
                }
                None => {
                    self.record_unexpected(format!(
                        "expected a unit component after '{}'",
                        op_tok.text
                    ));
                    self.synchronize();
                    break;
                }
            }
        }
        Some(left)
    }

    // component := annotatable annotation? | annotation | factor | '(' term ')'
    fn parse_component(&mut self) -> Option<Expression> {
        match self.current().kind {
            TokenKind::LParen => {
                let open = self.advance();
                let inner = self.parse_term();
                let close_pos;
                if self.current().kind == TokenKind::RParen {
                    let close = self.advance();
                    close_pos = close.position + close.length;
                } else {
                    self.record_unexpected("missing closing ')'".to_string());
                    close_pos = self.current().position;
                }
                let inner = inner?;
                Some(Expression::Group {
                    inner: Box::new(inner),
                    span: crate::diagnostics::Span::new(open.position, close_pos - open.position),
                })
            }
            TokenKind::Digits => self.parse_factor(),
            TokenKind::Annotation => {
                let tok = self.advance();
                self.warn_if_long_annotation(&tok);
                Some(Expression::Factor {
                    value: 1,
                    annotation: Some(tok.text.clone()),
                    span: crate::diagnostics::Span::new(tok.position, tok.length),
                })
            }
            TokenKind::Atom => self.parse_annotatable(),
            _ => {
                self.record_unexpected(format!(
                    "unexpected token '{}' while parsing a unit component",
                    self.current().text
                ));
                self.synchronize();
                None
            }
        }
    }

    // factor := DIGITS
    fn parse_factor(&mut self) -> Option<Expression> {
        let tok = self.advance();
        match tok.text.parse::<u64>() {
            Ok(value) => {
                let mut span = crate::diagnostics::Span::new(tok.position, tok.length);
                let mut annotation = None;
                if self.current().kind == TokenKind::Annotation {
                    let ann = self.advance();
                    self.warn_if_long_annotation(&ann);
                    annotation = Some(ann.text.clone());
                    span.length = ann.position + ann.length - span.position;
                }
                Some(Expression::Factor {
                    value,
                    annotation,
                    span,
                })
            }
            Err(_) => {
                self.errors.push(ParseError::new(
                    ParseErrorKind::InvalidNumber,
                    format!("invalid integer literal '{}'", tok.text),
                    tok.position,
                    tok.length.max(1),
                ));
                None
            }
        }
    }

    // annotatable := simple_unit exponent?, then an optional trailing annotation
    fn parse_annotatable(&mut self) -> Option<Expression> {
        let atom_tok = self.advance();
        let (prefix, atom) = disambiguate(&atom_tok.text);

        let mut span_end = atom_tok.position + atom_tok.length;
        let (exponent, exponent_format) = self.parse_exponent();
        if exponent_format.is_some() {
            let last = &self.tokens[self.pos.saturating_sub(1)];
            span_end = last.position + last.length;
        }
        let exponent_format = exponent_format.unwrap_or(ExponentFormat::Implicit);
        let exponent = exponent.unwrap_or(1);

        let mut annotation = None;
        if self.current().kind == TokenKind::Annotation {
            let ann = self.advance();
            self.warn_if_long_annotation(&ann);
            span_end = ann.position + ann.length;
            annotation = Some(ann.text.clone());
        }

        Some(Expression::Unit {
            prefix,
            atom,
            exponent,
            exponent_format,
            annotation,
            span: crate::diagnostics::Span::new(atom_tok.position, span_end - atom_tok.position),
        })
    }

    // exponent := ('+'|'-')? DIGITS | '^' ('+'|'-')? DIGITS
    fn parse_exponent(&mut self) -> (Option<i32>, Option<ExponentFormat>) {
        match self.current().kind {
            TokenKind::Plus | TokenKind::Minus => {
                let sign_tok = self.advance();
                let negative = sign_tok.kind == TokenKind::Minus;
                if self.current().kind == TokenKind::Digits {
                    let digits = self.advance();
                    let magnitude: i32 = digits.text.parse().unwrap_or(1);
                    let value = if negative { -magnitude } else { magnitude };
                    (Some(value), Some(ExponentFormat::Signed))
                } else {
                    self.record_unexpected("expected digits after exponent sign".to_string());
                    (None, None)
                }
            }
            TokenKind::Digits => {
                // Bare digits immediately after an atom (no '^', no sign) are
                // still an exponent per the grammar's `factor` clashing with
                // `exponent` — UCUM resolves this by always treating a digit
                // run right after an atom as an exponent, not a new factor
                // component. There's no explicit sign or caret on the surface,
                // so this is the `Implicit` form (`m2`), not `Signed`
                // (`m+2`/`m-2`).
                let digits = self.advance();
                let value: i32 = digits.text.parse().unwrap_or(1);
                (Some(value), Some(ExponentFormat::Implicit))
            }
            _ => self.parse_caret_exponent(),
        }
    }

    fn parse_caret_exponent(&mut self) -> (Option<i32>, Option<ExponentFormat>) {
        // '^' is folded into ATOM scanning only for the `10*`/`10^`
        // dimensionless atoms; a bare caret elsewhere is lexed as Unknown
        // and handled here explicitly.
        if self.current().kind == TokenKind::Unknown && self.current().text == "^" {
            self.advance();
            let negative = matches!(self.current().kind, TokenKind::Minus);
            if negative || self.current().kind == TokenKind::Plus {
                self.advance();
            }
            if self.current().kind == TokenKind::Digits {
                let digits = self.advance();
                let magnitude: i32 = digits.text.parse().unwrap_or(1);
                let value = if negative { -magnitude } else { magnitude };
                return (Some(value), Some(ExponentFormat::Caret));
            }
            self.record_unexpected("expected digits after '^'".to_string());
        }
        (None, None)
    }

    fn warn_if_long_annotation(&mut self, tok: &Token) {
        if tok.text.len() > 50 {
            self.warnings.push(
                ParseWarning::new(
                    ParseWarningKind::Ambiguous,
                    "annotation longer than 50 characters may indicate a malformed expression",
                    tok.position,
                    tok.length,
                )
                .with_suggestion("keep annotations short; they are semantically inert"),
            );
        }
    }
}

/// Implements §4.2's prefix/atom disambiguation: try the atom whole first,
/// then every registry-prefix / metric-unit split, longest prefix first.
fn disambiguate(text: &str) -> (Option<String>, String) {
    if registry::find_unit(text).is_some() {
        return (None, text.to_string());
    }
    if text.starts_with('[') {
        // Bracket atoms are never split with a prefix.
        return (None, text.to_string());
    }
    let chars: Vec<char> = text.chars().collect();
    // Longest-prefix-match-first: try progressively shorter prefixes.
    for split in (1..chars.len()).rev() {
        let prefix_candidate: String = chars[..split].iter().collect();
        let unit_candidate: String = chars[split..].iter().collect();
        if registry::find_prefix(&prefix_candidate).is_some()
            && registry::is_metric_unit(&unit_candidate)
        {
            return (Some(prefix_candidate), unit_candidate);
        }
    }
    // Neither a known atom nor a known prefix+metric-unit split — defer to
    // canonicalization, which will report a registry miss.
    (None, text.to_string())
}
