//! Tokenizer for the condition language.

use super::ExprError;

/// Kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Int(i64),
    Float(f64),
    Str(String),
    /// Identifier or word operator (`and`, `in`, `matches`, ...).
    Ident(String),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    Bang,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Eof,
}

/// A token with the byte offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

/// Split an expression into tokens, ending with [`TokenKind::Eof`].
pub fn tokenize(input: &str) -> Result<Vec<Token>, ExprError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        let start = i;

        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let is_float =
                i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit();
            if is_float {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                let text = &input[start..i];
                let value = text
                    .parse::<f64>()
                    .map_err(|e| syntax(start, format!("invalid number '{}': {}", text, e)))?;
                tokens.push(token(TokenKind::Float(value), start));
            } else {
                let text = &input[start..i];
                let value = text
                    .parse::<i64>()
                    .map_err(|e| syntax(start, format!("invalid number '{}': {}", text, e)))?;
                tokens.push(token(TokenKind::Int(value), start));
            }
            continue;
        }

        if c.is_ascii_alphabetic() || c == b'_' || c == b'$' {
            while i < bytes.len()
                && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'$')
            {
                i += 1;
            }
            tokens.push(token(TokenKind::Ident(input[start..i].to_string()), start));
            continue;
        }

        if c == b'"' || c == b'\'' {
            let (value, end) = read_string(input, start)?;
            tokens.push(token(TokenKind::Str(value), start));
            i = end;
            continue;
        }

        let next = bytes.get(i + 1).copied();
        let (kind, len) = match (c, next) {
            (b'=', Some(b'=')) => (TokenKind::Eq, 2),
            (b'!', Some(b'=')) => (TokenKind::Ne, 2),
            (b'<', Some(b'=')) => (TokenKind::Le, 2),
            (b'>', Some(b'=')) => (TokenKind::Ge, 2),
            (b'&', Some(b'&')) => (TokenKind::AndAnd, 2),
            (b'|', Some(b'|')) => (TokenKind::OrOr, 2),
            (b'<', _) => (TokenKind::Lt, 1),
            (b'>', _) => (TokenKind::Gt, 1),
            (b'!', _) => (TokenKind::Bang, 1),
            (b'(', _) => (TokenKind::LParen, 1),
            (b')', _) => (TokenKind::RParen, 1),
            (b'[', _) => (TokenKind::LBracket, 1),
            (b']', _) => (TokenKind::RBracket, 1),
            (b',', _) => (TokenKind::Comma, 1),
            (b'.', _) => (TokenKind::Dot, 1),
            (b'+', _) => (TokenKind::Plus, 1),
            (b'-', _) => (TokenKind::Minus, 1),
            (b'*', _) => (TokenKind::Star, 1),
            (b'/', _) => (TokenKind::Slash, 1),
            (b'%', _) => (TokenKind::Percent, 1),
            _ => {
                let ch = input[start..].chars().next().unwrap_or_default();
                return Err(syntax(start, format!("unexpected character '{}'", ch)));
            }
        };
        tokens.push(token(kind, start));
        i += len;
    }

    tokens.push(token(TokenKind::Eof, input.len()));
    Ok(tokens)
}

/// Read a quoted string starting at `start`. Returns the value and the offset
/// past the closing quote.
fn read_string(input: &str, start: usize) -> Result<(String, usize), ExprError> {
    let mut chars = input[start..].char_indices();
    let quote = match chars.next() {
        Some((_, q)) => q,
        None => return Err(syntax(start, "unterminated string".to_string())),
    };
    let mut value = String::new();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            c if c == quote => return Ok((value, start + offset + c.len_utf8())),
            '\\' => {
                let Some((esc_offset, esc)) = chars.next() else {
                    break;
                };
                let unescaped = match esc {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '\\' | '"' | '\'' => esc,
                    other => {
                        return Err(syntax(
                            start + esc_offset,
                            format!("unknown escape sequence '\\{}'", other),
                        ));
                    }
                };
                value.push(unescaped);
            }
            c => value.push(c),
        }
    }

    Err(syntax(start, "unterminated string".to_string()))
}

fn token(kind: TokenKind, pos: usize) -> Token {
    Token { kind, pos }
}

fn syntax(pos: usize, message: String) -> ExprError {
    ExprError::Syntax { pos, message }
}
