//! Lexical scanning of truncated PHP buffers.
//!
//! The lexer is deliberately tolerant: the input ends exactly at the cursor,
//! so unterminated strings and comments are normal and simply extend to the
//! end of the buffer. Whitespace and comments are elided from the token
//! stream; every token carries its byte offsets so callers can slice the
//! original source.

use memchr::{memchr, memmem};

/// The keywords the resolver cares about. Everything else PHP considers a
/// keyword (`return`, `if`, `echo`, ...) is lexed as a plain identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    Class,
    Function,
    Fn,
    Namespace,
    Use,
    New,
    Extends,
    Implements,
    As,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// `$name`, including the sigil.
    Variable,
    /// Identifier, possibly a namespaced path (`App\Models\User`, `\Foo`).
    Ident,
    Keyword(Keyword),
    /// Single- or double-quoted string literal, possibly unterminated.
    Str,
    Number,
    /// `->`
    Arrow,
    /// `?->`
    NullsafeArrow,
    /// `::`
    DoubleColon,
    /// `=>`
    DoubleArrow,
    /// A lone `=`, never part of `==`, `===`, `=>`, `<=`, `.=`, ...
    Assign,
    Comma,
    Semicolon,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    /// Any other operator or punctuation.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

/// Lazy token iterator over a source buffer.
pub(crate) struct Lexer<'src> {
    src: &'src [u8],
    pos: usize,
}

impl<'src> Lexer<'src> {
    pub(crate) fn new(src: &'src str) -> Self {
        let bytes = src.as_bytes();
        // Lexing starts after the PHP open tag; anything before it is an
        // HTML prologue. A buffer without an open tag is lexed in full.
        let pos = if let Some(at) = memmem::find(bytes, b"<?php") {
            at + 5
        } else if let Some(at) = memmem::find(bytes, b"<?") {
            at + 2
        } else {
            0
        };
        Lexer { src: bytes, pos }
    }

    fn peek(&self, ahead: usize) -> u8 {
        self.src.get(self.pos + ahead).copied().unwrap_or(0)
    }

    /// Skip a line comment (`//` or `#`), leaving `pos` at the newline.
    fn skip_line_comment(&mut self) {
        match memchr(b'\n', &self.src[self.pos..]) {
            Some(at) => self.pos += at,
            None => self.pos = self.src.len(),
        }
    }

    /// Skip a `/* ... */` comment; an unterminated one runs to end-of-buffer.
    fn skip_block_comment(&mut self) {
        match memmem::find(&self.src[self.pos..], b"*/") {
            Some(at) => self.pos += at + 2,
            None => self.pos = self.src.len(),
        }
    }

    /// Consume a string literal starting at the opening quote.
    fn scan_string(&mut self, quote: u8) {
        self.pos += 1;
        while self.pos < self.src.len() {
            match self.src[self.pos] {
                b'\\' => self.pos += 2,
                b if b == quote => {
                    self.pos += 1;
                    return;
                }
                _ => self.pos += 1,
            }
        }
        // Unterminated: the token extends to the end of the buffer, which
        // is the common case when the user is typing inside a literal.
        self.pos = self.src.len();
    }

    fn scan_ident(&mut self) {
        while self.pos < self.src.len() {
            let b = self.src[self.pos];
            if is_ident_char(b) {
                self.pos += 1;
            } else if b == b'\\' && is_ident_start(self.peek(1)) {
                // Namespace separator joining two path segments.
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn scan_number(&mut self) {
        while self.pos < self.src.len() {
            let b = self.src[self.pos];
            if b.is_ascii_alphanumeric() || b == b'.' || b == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

/// Operator characters that may be glued onto `<`, `>`, `!`, `+`, `*`, `%`,
/// `.`, `&`, `|`, `^` to form a compound operator (`<=>`, `!==`, `.=`, `**`,
/// `&&`, `||=`, ...). Compounds are all lexed as a single [`TokenKind::Other`].
fn is_compound_tail(b: u8) -> bool {
    matches!(b, b'=' | b'<' | b'>' | b'&' | b'|' | b'+' | b'*' | b'.')
}

fn keyword(word: &[u8]) -> Option<Keyword> {
    // PHP keywords are case-insensitive.
    let kw = match word.to_ascii_lowercase().as_slice() {
        b"class" => Keyword::Class,
        b"function" => Keyword::Function,
        b"fn" => Keyword::Fn,
        b"namespace" => Keyword::Namespace,
        b"use" => Keyword::Use,
        b"new" => Keyword::New,
        b"extends" => Keyword::Extends,
        b"implements" => Keyword::Implements,
        b"as" => Keyword::As,
        _ => return None,
    };
    Some(kw)
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if self.pos >= self.src.len() {
                return None;
            }
            let b = self.src[self.pos];
            if b.is_ascii_whitespace() {
                self.pos += 1;
                continue;
            }
            let start = self.pos;

            let kind = match b {
                b'/' if self.peek(1) == b'/' => {
                    self.skip_line_comment();
                    continue;
                }
                b'/' if self.peek(1) == b'*' => {
                    self.pos += 2;
                    self.skip_block_comment();
                    continue;
                }
                // `#[` opens a PHP 8 attribute, not a comment; lex the `#`
                // alone so the following brackets keep the tracker balanced.
                b'#' if self.peek(1) == b'[' => {
                    self.pos += 1;
                    TokenKind::Other
                }
                b'#' => {
                    self.skip_line_comment();
                    continue;
                }
                b'\'' | b'"' => {
                    self.scan_string(b);
                    TokenKind::Str
                }
                b'$' if is_ident_start(self.peek(1)) => {
                    self.pos += 1;
                    self.scan_ident();
                    TokenKind::Variable
                }
                b'\\' if is_ident_start(self.peek(1)) => {
                    self.pos += 1;
                    self.scan_ident();
                    TokenKind::Ident
                }
                _ if is_ident_start(b) => {
                    self.scan_ident();
                    match keyword(&self.src[start..self.pos]) {
                        Some(kw) => TokenKind::Keyword(kw),
                        None => TokenKind::Ident,
                    }
                }
                _ if b.is_ascii_digit() => {
                    self.scan_number();
                    TokenKind::Number
                }
                b'(' => {
                    self.pos += 1;
                    TokenKind::OpenParen
                }
                b')' => {
                    self.pos += 1;
                    TokenKind::CloseParen
                }
                b'[' => {
                    self.pos += 1;
                    TokenKind::OpenBracket
                }
                b']' => {
                    self.pos += 1;
                    TokenKind::CloseBracket
                }
                b'{' => {
                    self.pos += 1;
                    TokenKind::OpenBrace
                }
                b'}' => {
                    self.pos += 1;
                    TokenKind::CloseBrace
                }
                b',' => {
                    self.pos += 1;
                    TokenKind::Comma
                }
                b';' => {
                    self.pos += 1;
                    TokenKind::Semicolon
                }
                b'-' => {
                    if self.peek(1) == b'>' {
                        self.pos += 2;
                        TokenKind::Arrow
                    } else if self.peek(1) == b'=' || self.peek(1) == b'-' {
                        self.pos += 2;
                        TokenKind::Other
                    } else {
                        self.pos += 1;
                        TokenKind::Other
                    }
                }
                b'?' => {
                    if self.peek(1) == b'-' && self.peek(2) == b'>' {
                        self.pos += 3;
                        TokenKind::NullsafeArrow
                    } else {
                        // `??`, `?:`, `??=` collapse into one Other token so
                        // their trailing `=` is never mistaken for Assign.
                        self.pos += 1;
                        while matches!(self.peek(0), b'?' | b':' | b'=') {
                            self.pos += 1;
                        }
                        TokenKind::Other
                    }
                }
                b':' => {
                    if self.peek(1) == b':' {
                        self.pos += 2;
                        TokenKind::DoubleColon
                    } else {
                        self.pos += 1;
                        TokenKind::Other
                    }
                }
                b'=' => {
                    if self.peek(1) == b'>' {
                        self.pos += 2;
                        TokenKind::DoubleArrow
                    } else if self.peek(1) == b'=' {
                        self.pos += 2;
                        if self.peek(0) == b'=' {
                            self.pos += 1;
                        }
                        TokenKind::Other
                    } else {
                        self.pos += 1;
                        TokenKind::Assign
                    }
                }
                b'<' | b'>' | b'!' | b'+' | b'*' | b'%' | b'.' | b'&' | b'|' | b'^' => {
                    self.pos += 1;
                    while is_compound_tail(self.peek(0)) {
                        self.pos += 1;
                    }
                    TokenKind::Other
                }
                _ => {
                    self.pos += 1;
                    TokenKind::Other
                }
            };

            return Some(Token {
                kind,
                start,
                end: self.pos,
            });
        }
    }
}

/// A fully scanned buffer: the immutable source plus its token list.
pub(crate) struct TokenStream<'src> {
    src: &'src str,
    tokens: Vec<Token>,
}

impl<'src> TokenStream<'src> {
    pub(crate) fn scan(src: &'src str) -> Self {
        TokenStream {
            src,
            tokens: Lexer::new(src).collect(),
        }
    }

    pub(crate) fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub(crate) fn text(&self, tok: &Token) -> &'src str {
        &self.src[tok.start..tok.end]
    }

    /// The contents of a string literal token, with the quotes stripped
    /// (the closing quote may be absent) and `\\` / escaped-quote sequences
    /// unescaped.
    pub(crate) fn string_contents(&self, tok: &Token) -> String {
        let raw = self.text(tok);
        let quote = raw.as_bytes()[0] as char;
        let mut inner = &raw[1..];
        if inner.ends_with(quote) {
            inner = &inner[..inner.len() - 1];
        }
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    Some(esc) if esc == quote || esc == '\\' => out.push(esc),
                    Some(esc) => {
                        out.push('\\');
                        out.push(esc);
                    }
                    None => out.push('\\'),
                }
            } else {
                out.push(c);
            }
        }
        out
    }
}
