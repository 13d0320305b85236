//! On-demand tokenizer for the expression language

use std::borrow::Cow;
use std::iter::Peekable;
use std::str::CharIndices;

use super::ParseError;

/// Token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Variable,
    Constant,
    And,
    Or,
    Not,
    Xor,
    LeftParen,
    RightParen,
    Eof,
}

/// A lexed token
///
/// `text` is the source slice, except for constants, which are normalized to
/// ASCII `0`/`1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: Cow<'a, str>,
    /// Byte offset of the first character
    pub position: usize,
}

/// Produces one token at a time with single-token lookahead
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    peeked: Option<Token<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            chars: input.char_indices().peekable(),
            peeked: None,
        }
    }

    /// Look at the next token without consuming it
    pub fn peek(&mut self) -> Result<&Token<'a>, ParseError> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.scan()?,
        };
        Ok(self.peeked.insert(token))
    }

    /// Consume and return the next token
    ///
    /// Once the input is exhausted every call yields an `Eof` token.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Token<'a>, ParseError> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.scan(),
        }
    }

    fn scan(&mut self) -> Result<Token<'a>, ParseError> {
        while self.chars.next_if(|&(_, c)| c.is_whitespace()).is_some() {}

        let Some((start, c)) = self.chars.next() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                text: Cow::Borrowed(""),
                position: self.input.len(),
            });
        };

        let kind = match c {
            '・' | '&' | '*' => TokenKind::And,
            '+' | '|' | '＋' | '｜' => TokenKind::Or,
            '¬' | '~' | '!' | '！' => TokenKind::Not,
            '⊕' | '^' => TokenKind::Xor,
            '(' | '（' => TokenKind::LeftParen,
            ')' | '）' => TokenKind::RightParen,
            '0' | '０' => return Ok(constant("0", start)),
            '1' | '１' => return Ok(constant("1", start)),
            c if c.is_ascii_alphabetic() => return Ok(self.scan_variable(start)),
            other => {
                return Err(ParseError::new(
                    format!("Unexpected character: {}", other),
                    start,
                ))
            }
        };

        Ok(Token {
            kind,
            text: Cow::Borrowed(&self.input[start..start + c.len_utf8()]),
            position: start,
        })
    }

    fn scan_variable(&mut self, start: usize) -> Token<'a> {
        // the leading character is ASCII
        let mut end = start + 1;
        while let Some((offset, c)) = self.chars.next_if(|&(_, c)| is_name_continue(c)) {
            end = offset + c.len_utf8();
        }
        Token {
            kind: TokenKind::Variable,
            text: Cow::Borrowed(&self.input[start..end]),
            position: start,
        }
    }
}

fn constant(text: &'static str, position: usize) -> Token<'static> {
    Token {
        kind: TokenKind::Constant,
        text: Cow::Borrowed(text),
        position,
    }
}

fn is_name_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || ('\u{2080}'..='\u{2089}').contains(&c)
}
