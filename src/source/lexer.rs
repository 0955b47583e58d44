// Fri Oct 16 2026 - Alex

use crate::source::SourceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Int,
    Float,
    Char,
    String,
    RawString,
    Comment,
    LineBreak,
    LParen,
    RParen,
    LBrack,
    RBrack,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Dot,
    Ellipsis,
    Star,
    Assign,
    Arrow,
    Op,
    Eof,
}

/// Token with its byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.start..self.end]
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

pub struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    /// Tokenizes the whole source. Line breaks are kept as tokens since the
    /// parser relies on them to attach comments and end field lines.
    pub fn tokenize(mut self) -> Result<Vec<Token>, SourceError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let eof = token.is(TokenKind::Eof);
            tokens.push(token);
            if eof {
                return Ok(tokens);
            }
        }
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn error(&self, offset: usize, message: &str) -> SourceError {
        SourceError::Lex {
            offset,
            message: message.to_string(),
        }
    }

    fn next_token(&mut self) -> Result<Token, SourceError> {
        while let Some(b) = self.peek(0) {
            if b == b' ' || b == b'\t' || b == b'\r' {
                self.pos += 1;
            } else {
                break;
            }
        }
        let start = self.pos;
        let Some(b) = self.peek(0) else {
            return Ok(Token {
                kind: TokenKind::Eof,
                start,
                end: start,
            });
        };
        let kind = match b {
            b'\n' => {
                self.pos += 1;
                TokenKind::LineBreak
            }
            b'/' if self.peek(1) == Some(b'/') => {
                while let Some(c) = self.peek(0) {
                    if c == b'\n' {
                        break;
                    }
                    self.pos += 1;
                }
                // keep a trailing \r out of the comment text
                let end = if self.pos > start && self.bytes[self.pos - 1] == b'\r' {
                    self.pos - 1
                } else {
                    self.pos
                };
                return Ok(Token {
                    kind: TokenKind::Comment,
                    start,
                    end,
                });
            }
            b'/' if self.peek(1) == Some(b'*') => {
                let close = self.src[start + 2..]
                    .find("*/")
                    .ok_or_else(|| self.error(start, "comment not terminated"))?;
                self.pos = start + 2 + close + 2;
                TokenKind::Comment
            }
            b'"' => {
                self.pos += 1;
                self.quoted(b'"', start, "string literal not terminated")?;
                TokenKind::String
            }
            b'\'' => {
                self.pos += 1;
                self.quoted(b'\'', start, "rune literal not terminated")?;
                TokenKind::Char
            }
            b'`' => {
                let close = self.src[start + 1..]
                    .find('`')
                    .ok_or_else(|| self.error(start, "raw string literal not terminated"))?;
                self.pos = start + 1 + close + 1;
                TokenKind::RawString
            }
            b'0'..=b'9' => self.number(),
            b'.' if matches!(self.peek(1), Some(b'0'..=b'9')) => self.number(),
            b'.' if self.peek(1) == Some(b'.') && self.peek(2) == Some(b'.') => {
                self.pos += 3;
                TokenKind::Ellipsis
            }
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b'[' => self.single(TokenKind::LBrack),
            b']' => self.single(TokenKind::RBrack),
            b'{' => self.single(TokenKind::LBrace),
            b'}' => self.single(TokenKind::RBrace),
            b',' => self.single(TokenKind::Comma),
            b';' => self.single(TokenKind::Semicolon),
            b'.' => self.single(TokenKind::Dot),
            b'*' => self.single(TokenKind::Star),
            b'<' if self.peek(1) == Some(b'-') => {
                self.pos += 2;
                TokenKind::Arrow
            }
            b'=' if self.peek(1) != Some(b'=') => self.single(TokenKind::Assign),
            _ if b == b'_' || b.is_ascii_alphabetic() || b >= 0x80 => {
                while let Some(c) = self.src[self.pos..].chars().next() {
                    if c == '_' || c.is_alphanumeric() {
                        self.pos += c.len_utf8();
                    } else {
                        break;
                    }
                }
                if self.pos == start {
                    // lone non identifier unicode char
                    let width = self.src[start..].chars().next().map_or(1, char::len_utf8);
                    self.pos += width;
                    TokenKind::Op
                } else {
                    TokenKind::Ident
                }
            }
            _ => {
                self.pos += 1;
                while let Some(c) = self.peek(0) {
                    if b"+-*/%&|^<>=!:~".contains(&c) {
                        self.pos += 1;
                    } else {
                        break;
                    }
                }
                TokenKind::Op
            }
        };
        Ok(Token {
            kind,
            start,
            end: self.pos,
        })
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    fn quoted(&mut self, quote: u8, start: usize, message: &str) -> Result<(), SourceError> {
        while let Some(c) = self.peek(0) {
            match c {
                b'\\' => self.pos += 2,
                b'\n' => break,
                c if c == quote => {
                    self.pos += 1;
                    return Ok(());
                }
                _ => self.pos += 1,
            }
        }
        Err(self.error(start, message))
    }

    fn number(&mut self) -> TokenKind {
        let mut kind = TokenKind::Int;
        while let Some(c) = self.peek(0) {
            match c {
                b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.pos += 1,
                b'.' => {
                    kind = TokenKind::Float;
                    self.pos += 1;
                }
                b'+' | b'-' if matches!(self.bytes[self.pos - 1], b'e' | b'E' | b'p' | b'P') => {
                    kind = TokenKind::Float;
                    self.pos += 1;
                }
                _ => break,
            }
        }
        kind
    }
}

/// Parses an integer literal: decimal, hex, octal or binary, with optional
/// digit separators.
pub fn parse_int(text: &str) -> Option<u64> {
    let clean: String = text.chars().filter(|&c| c != '_').collect();
    let lower = clean.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        u64::from_str_radix(bin, 2).ok()
    } else if let Some(oct) = lower.strip_prefix("0o") {
        u64::from_str_radix(oct, 8).ok()
    } else if lower.len() > 1 && lower.starts_with('0') {
        u64::from_str_radix(&lower[1..], 8).ok()
    } else {
        lower.parse().ok()
    }
}

/// Value of a string literal token, raw or interpreted.
pub fn unquote(literal: &str) -> Option<String> {
    if literal.len() >= 2 && literal.starts_with('`') && literal.ends_with('`') {
        return Some(literal[1..literal.len() - 1].replace('\r', ""));
    }
    if literal.len() < 2 || !literal.starts_with('"') || !literal.ends_with('"') {
        return None;
    }
    let mut out = String::new();
    let mut chars = literal[1..literal.len() - 1].chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '0' => out.push('\0'),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    Some(out)
}

/// Literal form of a tag value, raw when possible.
pub fn quote_tag(value: &str) -> String {
    if value.contains('`') || value.contains('\n') {
        format!("{:?}", value)
    } else {
        format!("`{}`", value)
    }
}
