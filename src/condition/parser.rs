//! Recursive-descent parser producing an expression tree.
//!
//! Precedence, lowest first:
//! - `||` / `or`
//! - `&&` / `and`
//! - `==` `!=` `<` `<=` `>` `>=` `in` `not in` `contains` `startsWith` `endsWith` `matches`
//! - `+` `-`
//! - `*` `/` `%`
//! - unary `!` / `not` / `-`
//! - member access `a.b`, `a[expr]`

use super::lexer::{Token, TokenKind, tokenize};
use super::value::Value;
use super::ExprError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    NotIn,
    Contains,
    StartsWith,
    EndsWith,
    Matches,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Ident(String),
    List(Vec<Expr>),
    Index(Box<Expr>, Box<Expr>),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

/// Deepest expression tree the parser builds. Both the parser and the
/// evaluator recurse once per level.
pub const MAX_DEPTH: usize = 64;

/// Parse a complete expression.
pub fn parse(input: &str) -> Result<Expr, ExprError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        cursor: 0,
        depth: 0,
    };
    let expr = parser.parse_or()?;
    match &parser.peek().kind {
        TokenKind::Eof => Ok(expr),
        other => Err(parser.error(format!("unexpected token {:?}", other))),
    }
}

struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // The token stream always ends with Eof, and the cursor never moves past it.
        &self.tokens[self.cursor]
    }

    fn peek_ahead(&self, n: usize) -> &TokenKind {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.cursor + n).min(last)].kind
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.cursor].clone();
        if token.kind != TokenKind::Eof {
            self.cursor += 1;
        }
        token
    }

    fn is_word(&self, word: &str) -> bool {
        matches!(&self.peek().kind, TokenKind::Ident(w) if w == word)
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<(), ExprError> {
        if self.peek().kind == kind {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!("expected {}", what)))
        }
    }

    fn error(&self, message: String) -> ExprError {
        ExprError::Syntax {
            pos: self.peek().pos,
            message,
        }
    }

    /// Claim `levels` more levels of nesting. A parse that fails here is
    /// abandoned, so nothing needs to be released on the error path.
    fn enter(&mut self, levels: usize) -> Result<(), ExprError> {
        self.depth += levels;
        if self.depth > MAX_DEPTH {
            return Err(self.error("expression nested too deeply".to_string()));
        }
        Ok(())
    }

    fn leave(&mut self, levels: usize) {
        self.depth -= levels;
    }

    fn parse_or(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.parse_and()?;
        let mut chained = 0;
        while self.peek().kind == TokenKind::OrOr || self.is_word("or") {
            self.advance();
            self.enter(1)?;
            chained += 1;
            let right = self.parse_and()?;
            left = Expr::Binary(BinaryOp::Or, Box::new(left), Box::new(right));
        }
        self.leave(chained);
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.parse_comparison()?;
        let mut chained = 0;
        while self.peek().kind == TokenKind::AndAnd || self.is_word("and") {
            self.advance();
            self.enter(1)?;
            chained += 1;
            let right = self.parse_comparison()?;
            left = Expr::Binary(BinaryOp::And, Box::new(left), Box::new(right));
        }
        self.leave(chained);
        Ok(left)
    }

    fn comparison_op(&self) -> Option<(BinaryOp, usize)> {
        let op = match &self.peek().kind {
            TokenKind::Eq => BinaryOp::Eq,
            TokenKind::Ne => BinaryOp::Ne,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::Le => BinaryOp::Le,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::Ge => BinaryOp::Ge,
            TokenKind::Ident(word) => match word.as_str() {
                "in" => BinaryOp::In,
                "contains" => BinaryOp::Contains,
                "startsWith" => BinaryOp::StartsWith,
                "endsWith" => BinaryOp::EndsWith,
                "matches" => BinaryOp::Matches,
                "not" if matches!(self.peek_ahead(1), TokenKind::Ident(w) if w == "in") => {
                    return Some((BinaryOp::NotIn, 2));
                }
                _ => return None,
            },
            _ => return None,
        };
        Some((op, 1))
    }

    fn parse_comparison(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.parse_additive()?;
        let mut chained = 0;
        while let Some((op, width)) = self.comparison_op() {
            for _ in 0..width {
                self.advance();
            }
            self.enter(1)?;
            chained += 1;
            let right = self.parse_additive()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        self.leave(chained);
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.parse_multiplicative()?;
        let mut chained = 0;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => {
                    self.leave(chained);
                    return Ok(left);
                }
            };
            self.advance();
            self.enter(1)?;
            chained += 1;
            let right = self.parse_multiplicative()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.parse_unary()?;
        let mut chained = 0;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => {
                    self.leave(chained);
                    return Ok(left);
                }
            };
            self.advance();
            self.enter(1)?;
            chained += 1;
            let right = self.parse_unary()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        let op = if self.peek().kind == TokenKind::Bang || self.is_word("not") {
            Some(UnaryOp::Not)
        } else if self.peek().kind == TokenKind::Minus {
            Some(UnaryOp::Neg)
        } else {
            None
        };
        match op {
            Some(op) => {
                self.advance();
                self.enter(1)?;
                let operand = self.parse_unary()?;
                self.leave(1);
                Ok(Expr::Unary(op, Box::new(operand)))
            }
            None => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> Result<Expr, ExprError> {
        let mut expr = self.parse_primary()?;
        let mut chained = 0;
        loop {
            match self.peek().kind {
                TokenKind::Dot => {
                    self.advance();
                    self.enter(1)?;
                    chained += 1;
                    let token = self.advance();
                    let TokenKind::Ident(name) = token.kind else {
                        return Err(ExprError::Syntax {
                            pos: token.pos,
                            message: "expected field name after '.'".to_string(),
                        });
                    };
                    let field = Expr::Literal(Value::Str(name));
                    expr = Expr::Index(Box::new(expr), Box::new(field));
                }
                TokenKind::LBracket => {
                    self.advance();
                    self.enter(1)?;
                    chained += 1;
                    let index = self.parse_or()?;
                    self.expect(TokenKind::RBracket, "']'")?;
                    expr = Expr::Index(Box::new(expr), Box::new(index));
                }
                _ => {
                    self.leave(chained);
                    return Ok(expr);
                }
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Int(i) => Ok(Expr::Literal(Value::Int(i))),
            TokenKind::Float(f) => Ok(Expr::Literal(Value::Float(f))),
            TokenKind::Str(s) => Ok(Expr::Literal(Value::Str(s))),
            TokenKind::Ident(word) => Ok(match word.as_str() {
                "true" => Expr::Literal(Value::Bool(true)),
                "false" => Expr::Literal(Value::Bool(false)),
                "nil" => Expr::Literal(Value::Nil),
                _ => Expr::Ident(word),
            }),
            TokenKind::LParen => {
                self.enter(1)?;
                let expr = self.parse_or()?;
                self.expect(TokenKind::RParen, "')'")?;
                self.leave(1);
                Ok(expr)
            }
            TokenKind::LBracket => {
                self.enter(1)?;
                let mut items = Vec::new();
                if self.peek().kind != TokenKind::RBracket {
                    loop {
                        items.push(self.parse_or()?);
                        if self.peek().kind != TokenKind::Comma {
                            break;
                        }
                        self.advance();
                    }
                }
                self.expect(TokenKind::RBracket, "']'")?;
                self.leave(1);
                Ok(Expr::List(items))
            }
            TokenKind::Eof => Err(ExprError::Syntax {
                pos: token.pos,
                message: "unexpected end of expression".to_string(),
            }),
            other => Err(ExprError::Syntax {
                pos: token.pos,
                message: format!("unexpected token {:?}", other),
            }),
        }
    }
}
