//! Lexer producing raw tokens.
//!
//! Comments and whitespace are dropped; line breaks survive only as the
//! `has_preceding_line_break` bit on the next token. A `/` starts a regular
//! expression when the previous token cannot end an expression. Template
//! literals come out as one token with their substitutions inside. A keyword
//! spelled after `.` or `?.` is a property name and lexes as `Identifier`.

use crate::error::ScanError;
use crate::syntax_kind::{PUNCTUATORS, string_to_token};
use crate::{SyntaxKind, Token};

/// Lex `source` into tokens terminated by an `EndOfFileToken`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ScanError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line_break: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line_break: false,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, ScanError> {
        loop {
            self.skip_trivia()?;
            let line_break = std::mem::take(&mut self.line_break);
            let start = self.pos;
            if start >= self.bytes.len() {
                self.tokens.push(Token::new(
                    SyntaxKind::EndOfFileToken,
                    start as u32,
                    start as u32,
                    line_break,
                ));
                return Ok(self.tokens);
            }
            let kind = self.scan_token()?;
            self.tokens
                .push(Token::new(kind, start as u32, self.pos as u32, line_break));
        }
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn current_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn skip_trivia(&mut self) -> Result<(), ScanError> {
        while let Some(byte) = self.peek(0) {
            match byte {
                b' ' | b'\t' | 0x0b | 0x0c => self.pos += 1,
                b'\n' | b'\r' => {
                    self.line_break = true;
                    self.pos += 1;
                }
                b'/' if self.peek(1) == Some(b'/') => {
                    self.pos = memchr::memchr(b'\n', &self.bytes[self.pos..])
                        .map_or(self.bytes.len(), |offset| self.pos + offset);
                }
                b'/' if self.peek(1) == Some(b'*') => {
                    let body_start = self.pos + 2;
                    let Some(offset) = memchr::memmem::find(&self.bytes[body_start..], b"*/")
                    else {
                        return Err(ScanError::UnterminatedComment {
                            pos: self.pos as u32,
                        });
                    };
                    let body = &self.bytes[body_start..body_start + offset];
                    if memchr::memchr2(b'\n', b'\r', body).is_some() {
                        self.line_break = true;
                    }
                    self.pos = body_start + offset + 2;
                }
                byte if byte >= 0x80 => match self.current_char() {
                    Some(ch) if ch.is_whitespace() || ch == '\u{feff}' => {
                        if matches!(ch, '\u{2028}' | '\u{2029}') {
                            self.line_break = true;
                        }
                        self.pos += ch.len_utf8();
                    }
                    _ => break,
                },
                _ => break,
            }
        }
        Ok(())
    }

    fn scan_token(&mut self) -> Result<SyntaxKind, ScanError> {
        let byte = self.bytes[self.pos];
        match byte {
            b'"' | b'\'' => {
                self.scan_string(byte)?;
                Ok(SyntaxKind::StringLiteral)
            }
            b'`' => {
                let start = self.pos;
                self.pos += 1;
                self.skip_template_rest(start)?;
                Ok(SyntaxKind::TemplateLiteral)
            }
            b'0'..=b'9' => Ok(self.scan_number()),
            b'.' if self.peek(1).is_some_and(|b| b.is_ascii_digit()) => Ok(self.scan_number()),
            b'/' if self.regex_allowed() => self.scan_regular_expression(),
            _ => {
                let Some(ch) = self.current_char() else {
                    return Err(ScanError::InvalidCharacter {
                        pos: self.pos as u32,
                        ch: char::REPLACEMENT_CHARACTER,
                    });
                };
                if is_identifier_start(ch) {
                    return Ok(self.scan_identifier());
                }
                self.scan_punctuation(ch)
            }
        }
    }

    fn regex_allowed(&self) -> bool {
        self.tokens
            .last()
            .is_none_or(|token| !token.kind.ends_expression())
    }

    fn scan_string(&mut self, quote: u8) -> Result<(), ScanError> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek(0) {
                None | Some(b'\n' | b'\r') => {
                    return Err(ScanError::UnterminatedString { pos: start as u32 });
                }
                Some(b'\\') => {
                    // a CRLF line continuation is one escape
                    self.pos += if self.peek(1) == Some(b'\r') && self.peek(2) == Some(b'\n') {
                        3
                    } else {
                        2
                    };
                }
                Some(byte) if byte == quote => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    /// Skip the rest of a template literal whose opening backtick is consumed.
    fn skip_template_rest(&mut self, start: usize) -> Result<(), ScanError> {
        loop {
            match self.peek(0) {
                None => return Err(ScanError::UnterminatedTemplate { pos: start as u32 }),
                Some(b'`') => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(b'\\') => self.pos += 2,
                Some(b'$') if self.peek(1) == Some(b'{') => {
                    self.pos += 2;
                    self.skip_substitution(start)?;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn skip_substitution(&mut self, start: usize) -> Result<(), ScanError> {
        let mut depth = 1usize;
        loop {
            let Some(byte) = self.peek(0) else {
                return Err(ScanError::UnterminatedTemplate { pos: start as u32 });
            };
            match byte {
                b'{' => {
                    depth += 1;
                    self.pos += 1;
                }
                b'}' => {
                    depth -= 1;
                    self.pos += 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                b'"' | b'\'' => self.scan_string(byte)?,
                b'`' => {
                    let nested = self.pos;
                    self.pos += 1;
                    self.skip_template_rest(nested)?;
                }
                b'/' if matches!(self.peek(1), Some(b'/' | b'*')) => {
                    // comments inside a substitution say nothing about the next token
                    let line_break = self.line_break;
                    self.skip_trivia()?;
                    self.line_break = line_break;
                }
                _ => self.pos += 1,
            }
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let radix_prefix = self.peek(0) == Some(b'0')
            && matches!(self.peek(1), Some(b'x' | b'X' | b'b' | b'B' | b'o' | b'O'));
        if radix_prefix {
            self.pos += 2;
            self.eat_while(|b| b.is_ascii_hexdigit() || b == b'_');
        } else {
            self.eat_while(|b| b.is_ascii_digit() || b == b'_');
            if self.peek(0) == Some(b'.') {
                self.pos += 1;
                self.eat_while(|b| b.is_ascii_digit() || b == b'_');
            }
            if matches!(self.peek(0), Some(b'e' | b'E')) {
                self.pos += 1;
                if matches!(self.peek(0), Some(b'+' | b'-')) {
                    self.pos += 1;
                }
                self.eat_while(|b| b.is_ascii_digit() || b == b'_');
            }
        }
        if self.peek(0) == Some(b'n') {
            self.pos += 1;
            return SyntaxKind::BigIntLiteral;
        }
        SyntaxKind::NumericLiteral
    }

    fn scan_regular_expression(&mut self) -> Result<SyntaxKind, ScanError> {
        let start = self.pos;
        self.pos += 1;
        let mut in_class = false;
        loop {
            match self.peek(0) {
                None | Some(b'\n' | b'\r') => {
                    return Err(ScanError::UnterminatedRegularExpression { pos: start as u32 });
                }
                Some(b'\\') => {
                    self.pos += 2;
                    continue;
                }
                Some(b'[') => in_class = true,
                Some(b']') => in_class = false,
                Some(b'/') if !in_class => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {}
            }
            self.pos += 1;
        }
        // flags
        self.eat_while(|b| b.is_ascii_alphabetic());
        Ok(SyntaxKind::RegularExpressionLiteral)
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(ch) = self.current_char() {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        if self.follows_member_access() {
            return SyntaxKind::Identifier;
        }
        string_to_token(&self.source[start..self.pos])
    }

    fn follows_member_access(&self) -> bool {
        self.tokens.last().is_some_and(|token| {
            matches!(
                token.kind,
                SyntaxKind::DotToken | SyntaxKind::QuestionDotToken
            )
        })
    }

    fn scan_punctuation(&mut self, ch: char) -> Result<SyntaxKind, ScanError> {
        let rest = &self.source[self.pos..];
        for &(text, kind) in PUNCTUATORS {
            if !rest.starts_with(text) {
                continue;
            }
            // `a?.5:b` is a conditional, not optional chaining
            if kind == SyntaxKind::QuestionDotToken
                && self.peek(2).is_some_and(|b| b.is_ascii_digit())
            {
                continue;
            }
            self.pos += text.len();
            return Ok(kind);
        }
        Err(ScanError::InvalidCharacter {
            pos: self.pos as u32,
            ch,
        })
    }

    fn eat_while(&mut self, predicate: impl Fn(u8) -> bool) {
        while self.peek(0).is_some_and(&predicate) {
            self.pos += 1;
        }
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphabetic()
}

fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphanumeric() || matches!(ch, '\u{200c}' | '\u{200d}')
}
