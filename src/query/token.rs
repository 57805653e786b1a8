//! Tokenizer for the pattern language.
//!
//! Produces a flat token list with byte positions so parse errors can point
//! at the offending spot. Keywords are not distinguished here; the parser
//! matches identifiers case-insensitively where the grammar expects one.

use crate::error::{GraphError, Result};

/// One lexed token plus the byte offset it started at.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Ident(String),
    Str(String),
    Int(i64),
    Float(f64),
    Colon,
    Pipe,
    Star,
    Dot,
    DotDot,
    Tilde,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Dash,
    ArrowRight,
    ArrowLeft,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl TokenKind {
    /// Human-readable rendering for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("identifier '{name}'"),
            TokenKind::Str(text) => format!("string \"{text}\""),
            TokenKind::Int(value) => format!("number {value}"),
            TokenKind::Float(value) => format!("number {value}"),
            TokenKind::Colon => "':'".into(),
            TokenKind::Pipe => "'|'".into(),
            TokenKind::Star => "'*'".into(),
            TokenKind::Dot => "'.'".into(),
            TokenKind::DotDot => "'..'".into(),
            TokenKind::Tilde => "'~'".into(),
            TokenKind::LBrace => "'{'".into(),
            TokenKind::RBrace => "'}'".into(),
            TokenKind::LBracket => "'['".into(),
            TokenKind::RBracket => "']'".into(),
            TokenKind::LParen => "'('".into(),
            TokenKind::RParen => "')'".into(),
            TokenKind::Dash => "'-'".into(),
            TokenKind::ArrowRight => "'->'".into(),
            TokenKind::ArrowLeft => "'<-'".into(),
            TokenKind::Eq => "'='".into(),
            TokenKind::Ne => "'!='".into(),
            TokenKind::Lt => "'<'".into(),
            TokenKind::Le => "'<='".into(),
            TokenKind::Gt => "'>'".into(),
            TokenKind::Ge => "'>='".into(),
        }
    }
}

/// Tokenizes a full pattern string.
pub(crate) fn tokenize(text: &str) -> Result<Vec<Token>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let byte = bytes[pos];
        if byte.is_ascii_whitespace() {
            pos += 1;
            continue;
        }
        let start = pos;
        let kind = match byte {
            b':' => {
                pos += 1;
                TokenKind::Colon
            }
            b'|' => {
                pos += 1;
                TokenKind::Pipe
            }
            b'*' => {
                pos += 1;
                TokenKind::Star
            }
            b'~' => {
                pos += 1;
                TokenKind::Tilde
            }
            b'{' => {
                pos += 1;
                TokenKind::LBrace
            }
            b'}' => {
                pos += 1;
                TokenKind::RBrace
            }
            b'[' => {
                pos += 1;
                TokenKind::LBracket
            }
            b']' => {
                pos += 1;
                TokenKind::RBracket
            }
            b'(' => {
                pos += 1;
                TokenKind::LParen
            }
            b')' => {
                pos += 1;
                TokenKind::RParen
            }
            b'.' => {
                if bytes.get(pos + 1) == Some(&b'.') {
                    pos += 2;
                    TokenKind::DotDot
                } else {
                    pos += 1;
                    TokenKind::Dot
                }
            }
            b'-' => {
                if bytes.get(pos + 1) == Some(&b'>') {
                    pos += 2;
                    TokenKind::ArrowRight
                } else {
                    pos += 1;
                    TokenKind::Dash
                }
            }
            b'<' => match bytes.get(pos + 1) {
                Some(&b'-') => {
                    pos += 2;
                    TokenKind::ArrowLeft
                }
                Some(&b'=') => {
                    pos += 2;
                    TokenKind::Le
                }
                _ => {
                    pos += 1;
                    TokenKind::Lt
                }
            },
            b'>' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    pos += 2;
                    TokenKind::Ge
                } else {
                    pos += 1;
                    TokenKind::Gt
                }
            }
            b'=' => {
                pos += 1;
                TokenKind::Eq
            }
            b'!' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    pos += 2;
                    TokenKind::Ne
                } else {
                    return Err(GraphError::parse(start, "expected '=' after '!'"));
                }
            }
            b'"' => {
                let (text, next) = scan_string(text, pos)?;
                pos = next;
                TokenKind::Str(text)
            }
            byte if byte.is_ascii_digit() => {
                let (kind, next) = scan_number(text, pos)?;
                pos = next;
                kind
            }
            byte if byte.is_ascii_alphabetic() || byte == b'_' => {
                let end = text[pos..]
                    .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
                    .map(|offset| pos + offset)
                    .unwrap_or(text.len());
                let ident = text[pos..end].to_owned();
                pos = end;
                TokenKind::Ident(ident)
            }
            other => {
                return Err(GraphError::parse(
                    start,
                    format!("unexpected character '{}'", other as char),
                ));
            }
        };
        tokens.push(Token { kind, pos: start });
    }
    Ok(tokens)
}

fn scan_string(text: &str, open: usize) -> Result<(String, usize)> {
    let mut out = String::new();
    let mut chars = text[open + 1..].char_indices();
    while let Some((offset, ch)) = chars.next() {
        match ch {
            '"' => return Ok((out, open + 1 + offset + 1)),
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, escaped @ ('"' | '\\'))) => out.push(escaped),
                Some((escape_at, other)) => {
                    return Err(GraphError::parse(
                        open + 1 + escape_at,
                        format!("unsupported escape '\\{other}'"),
                    ));
                }
                None => break,
            },
            other => out.push(other),
        }
    }
    Err(GraphError::parse(open, "unterminated string literal"))
}

fn scan_number(text: &str, start: usize) -> Result<(TokenKind, usize)> {
    let bytes = text.as_bytes();
    let mut pos = start;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    // A '.' starts a fraction only when a digit follows; '..' belongs to a
    // quantifier range.
    let mut float = false;
    if pos < bytes.len()
        && bytes[pos] == b'.'
        && bytes.get(pos + 1).is_some_and(u8::is_ascii_digit)
    {
        float = true;
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
    }
    let literal = &text[start..pos];
    let kind = if float {
        TokenKind::Float(
            literal
                .parse()
                .map_err(|_| GraphError::parse(start, format!("invalid number '{literal}'")))?,
        )
    } else {
        TokenKind::Int(
            literal
                .parse()
                .map_err(|_| GraphError::parse(start, format!("invalid number '{literal}'")))?,
        )
    };
    Ok((kind, pos))
}
