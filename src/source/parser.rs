// Fri Oct 16 2026 - Alex

use crate::source::lexer::{parse_int, Lexer, Token, TokenKind};
use crate::source::position::{FileInfo, FileSet};
use crate::source::syntax::{
    ArrayLen, Block, ConstSpec, FieldDecl, SourceFile, StructExpr, TypeExpr, TypeSpec,
};
use crate::source::SourceError;
use std::path::Path;
use std::sync::Arc;

/// Parses one file and registers it in the file set.
pub fn parse_file(fset: &mut FileSet, path: &Path, content: String) -> Result<SourceFile, SourceError> {
    let info = fset.add_file(path.to_string_lossy(), &content);
    let tokens = Lexer::new(&content).tokenize().map_err(|err| match err {
        SourceError::Lex { offset, message } => SourceError::Syntax {
            position: info.position(info.pos(offset)).to_string(),
            message,
        },
        other => other,
    })?;
    let (package, root) = {
        let mut parser = Parser {
            src: &content,
            tokens,
            idx: 0,
            last_end: 0,
            info: Arc::clone(&info),
        };
        parser.parse()?
    };
    Ok(SourceFile {
        path: path.to_path_buf(),
        package,
        content,
        info,
        root,
    })
}

struct Parser<'a> {
    src: &'a str,
    tokens: Vec<Token>,
    idx: usize,
    last_end: usize,
    info: Arc<FileInfo>,
}

impl<'a> Parser<'a> {
    fn tok(&self, ahead: usize) -> Token {
        let last = self.tokens.len() - 1;
        self.tokens[(self.idx + ahead).min(last)]
    }

    fn kind(&self) -> TokenKind {
        self.tok(0).kind
    }

    fn text(&self, token: Token) -> &'a str {
        token.text(self.src)
    }

    fn at_ident(&self, word: &str) -> bool {
        let token = self.tok(0);
        token.is(TokenKind::Ident) && self.text(token) == word
    }

    fn bump(&mut self) -> Token {
        let token = self.tok(0);
        if !token.is(TokenKind::Eof) {
            self.idx += 1;
            self.last_end = token.end;
        }
        token
    }

    fn error(&self, message: impl Into<String>) -> SourceError {
        let token = self.tok(0);
        SourceError::Syntax {
            position: self.info.position(self.info.pos(token.start)).to_string(),
            message: message.into(),
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, SourceError> {
        if self.kind() == kind {
            Ok(self.bump())
        } else if self.kind() == TokenKind::Eof {
            Err(self.error(format!("unexpected end of file, expected {}", what)))
        } else {
            let found = self.text(self.tok(0)).to_string();
            Err(self.error(format!("expected {}, found {:?}", what, found)))
        }
    }

    fn skip_trivia(&mut self) {
        while matches!(
            self.kind(),
            TokenKind::LineBreak | TokenKind::Comment | TokenKind::Semicolon
        ) {
            self.bump();
        }
    }

    fn line_start(&self, offset: usize) -> usize {
        self.src[..offset].rfind('\n').map_or(0, |i| i + 1)
    }

    /// Whitespace in front of `offset` on its line, empty when other text
    /// precedes it.
    fn indent_of(&self, offset: usize) -> &'a str {
        let prefix = &self.src[self.line_start(offset)..offset];
        if prefix.chars().all(|c| c == ' ' || c == '\t') {
            prefix
        } else {
            ""
        }
    }

    fn line_indent(&self, offset: usize) -> &'a str {
        let start = self.line_start(offset);
        let line = &self.src[start..];
        let width = line.len() - line.trim_start_matches([' ', '\t']).len();
        &line[..width]
    }

    fn parse(&mut self) -> Result<(String, Block), SourceError> {
        self.skip_trivia();
        if !self.at_ident("package") {
            return Err(self.error("expected package clause"));
        }
        self.bump();
        let name = self.expect(TokenKind::Ident, "package name")?;
        let package = self.text(name).to_string();
        let mut root = Block {
            span: 0..self.src.len(),
            ..Block::default()
        };
        self.parse_items(&mut root, false)?;
        Ok((package, root))
    }

    fn parse_items(&mut self, block: &mut Block, closing: bool) -> Result<(), SourceError> {
        loop {
            let token = self.tok(0);
            match token.kind {
                TokenKind::Eof if closing => return Err(self.error("unexpected end of file, expected }")),
                TokenKind::Eof => return Ok(()),
                TokenKind::RBrace if closing => {
                    block.span.end = self.bump().end;
                    return Ok(());
                }
                TokenKind::RBrace => return Err(self.error("unexpected }")),
                TokenKind::LBrace => {
                    self.bump();
                    let mut child = Block {
                        span: token.start..token.end,
                        ..Block::default()
                    };
                    self.parse_items(&mut child, true)?;
                    block.blocks.push(child);
                }
                TokenKind::Ident => match self.text(token) {
                    // x.(type) in type switches
                    "type" if self.idx > 0 && self.tokens[self.idx - 1].is(TokenKind::LParen) => {
                        self.bump();
                    }
                    "type" => self.parse_type_decl(block)?,
                    "const" => self.parse_const_decl(block)?,
                    "struct" | "interface" if self.tok(1).is(TokenKind::LBrace) => {
                        self.bump();
                        self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace)?;
                    }
                    _ => {
                        self.bump();
                    }
                },
                _ => {
                    self.bump();
                }
            }
        }
    }

    fn skip_balanced(&mut self, open: TokenKind, close: TokenKind) -> Result<usize, SourceError> {
        self.expect(open, "opening delimiter")?;
        let mut depth = 1usize;
        loop {
            let token = self.bump();
            match token.kind {
                TokenKind::Eof => return Err(self.error("unbalanced delimiters")),
                kind if kind == open => depth += 1,
                kind if kind == close => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(token.end);
                    }
                }
                _ => {}
            }
        }
    }

    /// Comment lines directly above the token at `anchor`, each alone on
    /// its line, without blank lines in between.
    fn doc_before(&self, anchor: usize) -> (Vec<String>, Option<usize>) {
        let mut docs = Vec::new();
        let mut first = None;
        let mut i = anchor;
        while i >= 2
            && self.tokens[i - 1].is(TokenKind::LineBreak)
            && self.tokens[i - 2].is(TokenKind::Comment)
        {
            let comment = i - 2;
            if comment > 0 && !self.tokens[comment - 1].is(TokenKind::LineBreak) {
                break;
            }
            docs.push(self.text(self.tokens[comment]).to_string());
            first = Some(self.tokens[comment].start);
            i = comment;
        }
        docs.reverse();
        (docs, first)
    }

    fn parse_type_decl(&mut self, block: &mut Block) -> Result<(), SourceError> {
        let keyword = self.idx;
        self.bump();
        if self.kind() != TokenKind::LParen {
            let spec = self.parse_type_spec(keyword)?;
            block.specs.push(spec);
            return Ok(());
        }
        self.bump();
        loop {
            self.skip_trivia();
            match self.kind() {
                TokenKind::RParen => {
                    self.bump();
                    return Ok(());
                }
                TokenKind::Eof => return Err(self.error("unexpected end of file, expected )")),
                _ => {
                    let anchor = self.idx;
                    let spec = self.parse_type_spec(anchor)?;
                    block.specs.push(spec);
                }
            }
        }
    }

    fn parse_type_spec(&mut self, anchor: usize) -> Result<TypeSpec, SourceError> {
        let name = self.expect(TokenKind::Ident, "type name")?;
        let anchor_offset = self.tokens[anchor].start;
        let decl_start = if self.indent_of(anchor_offset).len() == anchor_offset - self.line_start(anchor_offset) {
            self.line_start(anchor_offset)
        } else {
            anchor_offset
        };
        let (doc, doc_offset) = self.doc_before(anchor);
        let doc_start = doc_offset.map_or(decl_start, |offset| self.line_start(offset));

        let mut generic = false;
        if self.kind() == TokenKind::LBrack
            && self.tok(1).is(TokenKind::Ident)
            && !self.tok(2).is(TokenKind::RBrack)
        {
            self.skip_balanced(TokenKind::LBrack, TokenKind::RBrack)?;
            generic = true;
        }
        let alias = self.kind() == TokenKind::Assign;
        if alias {
            self.bump();
        }

        let ty_start = self.tok(0).start;
        let ty = self.parse_type()?;
        let ty_end = self.last_end;

        let mut comment = Vec::new();
        let mut comment_end = ty_end;
        while self.kind() == TokenKind::Comment {
            let token = self.bump();
            comment.push(self.text(token).to_string());
            comment_end = token.end;
        }

        Ok(TypeSpec {
            name: self.text(name).to_string(),
            pos: self.info.pos(name.start),
            alias,
            generic,
            ty,
            ty_span: ty_start..ty_end,
            doc,
            doc_span: doc_start..decl_start,
            comment,
            comment_span: ty_end..comment_end,
            indent: self.indent_of(anchor_offset).to_string(),
            modified: false,
        })
    }

    fn parse_type(&mut self) -> Result<TypeExpr, SourceError> {
        let token = self.tok(0);
        match token.kind {
            TokenKind::Star => {
                self.bump();
                Ok(TypeExpr::Pointer(Box::new(self.parse_type()?)))
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.parse_type()?;
                self.expect(TokenKind::RParen, ")")?;
                Ok(inner)
            }
            TokenKind::LBrack => self.parse_array_or_slice(),
            TokenKind::Arrow => {
                self.bump();
                if !self.at_ident("chan") {
                    return Err(self.error("expected chan"));
                }
                self.bump();
                let elem = self.parse_type()?;
                Ok(TypeExpr::Chan(format!("<-chan {}", elem)))
            }
            TokenKind::Ident => match self.text(token) {
                "struct" => self.parse_struct().map(TypeExpr::Struct),
                "interface" => {
                    self.bump();
                    let start = self.tok(0).start;
                    let end = self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace)?;
                    let body = collapse_whitespace(&self.src[start..end]);
                    if body == "{}" || body == "{ }" {
                        Ok(TypeExpr::Interface("interface{}".to_string()))
                    } else {
                        Ok(TypeExpr::Interface(format!("interface {}", body)))
                    }
                }
                "map" => {
                    self.bump();
                    self.expect(TokenKind::LBrack, "[")?;
                    let key = self.parse_type()?;
                    self.expect(TokenKind::RBrack, "]")?;
                    let value = self.parse_type()?;
                    Ok(TypeExpr::Map(Box::new(key), Box::new(value)))
                }
                "chan" => {
                    self.bump();
                    let send = self.kind() == TokenKind::Arrow;
                    if send {
                        self.bump();
                    }
                    let elem = self.parse_type()?;
                    if send {
                        Ok(TypeExpr::Chan(format!("chan<- {}", elem)))
                    } else {
                        Ok(TypeExpr::Chan(format!("chan {}", elem)))
                    }
                }
                "func" => {
                    self.bump();
                    let start = token.start;
                    self.skip_balanced(TokenKind::LParen, TokenKind::RParen)?;
                    match self.kind() {
                        TokenKind::LParen => {
                            self.skip_balanced(TokenKind::LParen, TokenKind::RParen)?;
                        }
                        TokenKind::Ident | TokenKind::Star | TokenKind::LBrack | TokenKind::Arrow => {
                            self.parse_type()?;
                        }
                        _ => {}
                    }
                    Ok(TypeExpr::Func(collapse_whitespace(&self.src[start..self.last_end])))
                }
                _ => {
                    self.bump();
                    let first = self.text(token).to_string();
                    let (pkg, name) = if self.kind() == TokenKind::Dot {
                        self.bump();
                        let name = self.expect(TokenKind::Ident, "qualified type name")?;
                        (Some(first), self.text(name).to_string())
                    } else {
                        (None, first)
                    };
                    if self.kind() == TokenKind::LBrack {
                        let end = self.skip_balanced(TokenKind::LBrack, TokenKind::RBrack)?;
                        let base = match &pkg {
                            Some(pkg) => format!("{}.{}", pkg, name),
                            None => name,
                        };
                        return Ok(TypeExpr::Generic {
                            base,
                            text: collapse_whitespace(&self.src[token.start..end]),
                        });
                    }
                    Ok(TypeExpr::Name { pkg, name })
                }
            },
            TokenKind::Eof => Err(self.error("unexpected end of file, expected type")),
            _ => {
                let found = self.text(token).to_string();
                Err(self.error(format!("expected type, found {:?}", found)))
            }
        }
    }

    fn parse_array_or_slice(&mut self) -> Result<TypeExpr, SourceError> {
        self.bump();
        if self.kind() == TokenKind::RBrack {
            self.bump();
            return Ok(TypeExpr::Slice(Box::new(self.parse_type()?)));
        }
        let start = self.idx;
        let mut depth = 0usize;
        loop {
            match self.kind() {
                TokenKind::Eof => return Err(self.error("unexpected end of file in array length")),
                TokenKind::LBrack | TokenKind::LParen => depth += 1,
                TokenKind::RParen => depth = depth.saturating_sub(1),
                TokenKind::RBrack if depth == 0 => break,
                TokenKind::RBrack => depth -= 1,
                _ => {}
            }
            self.bump();
        }
        let inner = &self.tokens[start..self.idx];
        let len = match inner {
            [token] if token.is(TokenKind::Int) => match parse_int(self.text(*token)) {
                Some(n) => ArrayLen::Literal(n),
                None => return Err(self.error("invalid array length")),
            },
            [token] if token.is(TokenKind::Ident) => ArrayLen::Const(self.text(*token).to_string()),
            _ => {
                let from = inner.first().map_or(0, |t| t.start);
                let to = inner.last().map_or(0, |t| t.end);
                ArrayLen::Expr(collapse_whitespace(&self.src[from..to]))
            }
        };
        self.bump();
        let elem = self.parse_type()?;
        Ok(TypeExpr::Array {
            len,
            elem: Box::new(elem),
        })
    }

    fn parse_struct(&mut self) -> Result<StructExpr, SourceError> {
        let keyword = self.bump();
        self.expect(TokenKind::LBrace, "{")?;
        let mut fields = Vec::new();
        let mut pending = Vec::new();
        let mut field_indent = None;
        let close = loop {
            match self.kind() {
                TokenKind::LineBreak | TokenKind::Semicolon => {
                    self.bump();
                }
                TokenKind::Comment => {
                    let token = self.bump();
                    if field_indent.is_none() {
                        field_indent = self.body_indent(keyword.start, token.start);
                    }
                    pending.push(self.text(token).to_string());
                }
                TokenKind::RBrace => break self.bump(),
                TokenKind::Eof => return Err(self.error("unexpected end of file, expected }")),
                _ => {
                    if field_indent.is_none() {
                        field_indent = self.body_indent(keyword.start, self.tok(0).start);
                    }
                    let mut field = self.parse_field()?;
                    field.doc = std::mem::take(&mut pending);
                    fields.push(field);
                }
            }
        };
        let close_indent = if self.indent_of(close.start).len() == close.start - self.line_start(close.start) {
            self.indent_of(close.start)
        } else {
            self.line_indent(keyword.start)
        };
        Ok(StructExpr {
            span: keyword.start..close.end,
            fields,
            trailing: pending,
            close_indent: close_indent.to_string(),
            field_indent,
        })
    }

    /// Indentation of a struct body line starting at `offset`, when that
    /// line is below the `struct` keyword and holds nothing before it.
    fn body_indent(&self, keyword: usize, offset: usize) -> Option<String> {
        let start = self.line_start(offset);
        if start <= self.line_start(keyword) || start + self.indent_of(offset).len() != offset {
            return None;
        }
        Some(self.indent_of(offset).to_string())
    }

    fn parse_field(&mut self) -> Result<FieldDecl, SourceError> {
        let first = self.tok(0);
        let embedded = match first.kind {
            TokenKind::Star => true,
            TokenKind::Ident => matches!(
                self.tok(1).kind,
                TokenKind::Dot
                    | TokenKind::LineBreak
                    | TokenKind::Semicolon
                    | TokenKind::RBrace
                    | TokenKind::String
                    | TokenKind::RawString
                    | TokenKind::Comment
                    | TokenKind::Eof
            ),
            _ => return Err(self.error("expected field name or embedded type")),
        };

        let mut names = Vec::new();
        if !embedded {
            loop {
                let name = self.expect(TokenKind::Ident, "field name")?;
                names.push(self.text(name).to_string());
                if self.kind() != TokenKind::Comma {
                    break;
                }
                self.bump();
                while self.kind() == TokenKind::LineBreak {
                    self.bump();
                }
            }
        }

        let ty_start = self.tok(0).start;
        let ty = self.parse_type()?;
        let ty_text = self.src[ty_start..self.last_end].to_string();

        let tag = match self.kind() {
            TokenKind::String | TokenKind::RawString => {
                let token = self.bump();
                Some(self.text(token).to_string())
            }
            _ => None,
        };
        let mut comment = Vec::new();
        while self.kind() == TokenKind::Comment {
            let token = self.bump();
            comment.push(self.text(token).to_string());
        }
        match self.kind() {
            TokenKind::LineBreak | TokenKind::Semicolon | TokenKind::RBrace => {}
            _ => return Err(self.error("unexpected token after field declaration")),
        }

        Ok(FieldDecl {
            names,
            pos: self.info.pos(first.start),
            ty,
            ty_text,
            tag,
            doc: Vec::new(),
            comment,
        })
    }

    fn parse_const_decl(&mut self, block: &mut Block) -> Result<(), SourceError> {
        self.bump();
        if self.kind() != TokenKind::LParen {
            self.parse_const_spec(block, false);
            return Ok(());
        }
        self.bump();
        loop {
            self.skip_trivia();
            match self.kind() {
                TokenKind::RParen => {
                    self.bump();
                    return Ok(());
                }
                TokenKind::Eof => return Err(self.error("unexpected end of file, expected )")),
                _ => self.parse_const_spec(block, true),
            }
        }
    }

    /// Records `Name [Type] = <int literal>`, anything fancier is kept with
    /// an unknown value.
    fn parse_const_spec(&mut self, block: &mut Block, grouped: bool) {
        let start = self.idx;
        let mut depth = 0usize;
        loop {
            match self.kind() {
                TokenKind::Eof | TokenKind::LineBreak | TokenKind::Semicolon if depth == 0 => break,
                TokenKind::RParen if depth == 0 && grouped => break,
                TokenKind::LParen | TokenKind::LBrack | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBrack | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1)
                }
                TokenKind::Eof => break,
                _ => {}
            }
            self.bump();
        }
        let tokens: Vec<Token> = self.tokens[start..self.idx]
            .iter()
            .copied()
            .filter(|t| !matches!(t.kind, TokenKind::Comment | TokenKind::LineBreak))
            .collect();
        let Some(name) = tokens.first().filter(|t| t.is(TokenKind::Ident)) else {
            return;
        };
        if tokens.get(1).map_or(false, |t| t.is(TokenKind::Comma)) {
            return;
        }
        let value = tokens
            .iter()
            .position(|t| t.is(TokenKind::Assign))
            .and_then(|assign| match &tokens[assign + 1..] {
                [literal] if literal.is(TokenKind::Int) => parse_int(self.text(*literal)),
                _ => None,
            });
        block.consts.push(ConstSpec {
            name: self.text(*name).to_string(),
            value,
        });
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
