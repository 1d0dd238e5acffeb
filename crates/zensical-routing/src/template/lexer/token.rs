// Copyright (c) 2025 Zensical and contributors

// SPDX-License-Identifier: MIT
// Third-party contributions licensed under DCO

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NON-INFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.

// ----------------------------------------------------------------------------

//! Token.

use std::fmt;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Token kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Kind {
    /// Run of literal characters, or an identifier inside rule parameters.
    Text(String),
    /// Variable name, without the leading `:`.
    Variable(String),
    /// Numeric literal.
    Number(Number),
    /// Quoted string, with quotes removed and escapes resolved.
    QuotedString(String),
    /// One of `[ ] ( ) , =`.
    Punctuation(char),
    /// End of input.
    End,
}

/// Numeric literal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    /// Integer.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Token.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// Token kind.
    pub kind: Kind,
    /// Byte offset in the template.
    pub position: usize,
}

/// Token stream.
///
/// Streams are produced by the [`Lexer`][] and always end with [`Kind::End`],
/// so peeking never runs out of tokens while the end hasn't been consumed.
///
/// [`Lexer`]: crate::template::Lexer
#[derive(Clone, Debug)]
pub struct Tokens {
    /// Tokens.
    tokens: Vec<Token>,
    /// Cursor.
    cursor: usize,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(kind: Kind, position: usize) -> Self {
        Self { kind, position }
    }

    /// Returns whether the token is the given punctuation mark.
    #[inline]
    #[must_use]
    pub fn is_punctuation(&self, mark: char) -> bool {
        self.kind == Kind::Punctuation(mark)
    }
}

impl Tokens {
    /// Creates a token stream.
    ///
    /// An end-of-input marker is appended, unless the given tokens already
    /// end with one.
    #[must_use]
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|token| token.kind != Kind::End) {
            let position = tokens.last().map_or(0, |token| token.position);
            tokens.push(Token::new(Kind::End, position));
        }
        Self { tokens, cursor: 0 }
    }

    /// Returns the next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> &Token {
        let index = self.cursor.min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Consumes and returns the next token.
    ///
    /// Once the end-of-input marker is reached, it is returned repeatedly.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
        token
    }

    /// Consumes the next token, if it is the given punctuation mark.
    pub fn eat(&mut self, mark: char) -> bool {
        let matched = self.peek().is_punctuation(mark);
        if matched {
            self.cursor += 1;
        }
        matched
    }
}

#[allow(clippy::must_use_candidate)]
impl Tokens {
    /// Returns the number of tokens, including the end-of-input marker.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns whether there are no tokens besides the end-of-input marker.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 1
    }

    /// Returns the tokens as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl fmt::Display for Kind {
    /// Formats the token kind for display.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Kind::Text(text) => write!(f, "text \"{text}\""),
            Kind::Variable(name) => write!(f, "variable \":{name}\""),
            Kind::Number(Number::Integer(value)) => write!(f, "number {value}"),
            Kind::Number(Number::Float(value)) => write!(f, "number {value}"),
            Kind::QuotedString(value) => write!(f, "string \"{value}\""),
            Kind::Punctuation(mark) => write!(f, "'{mark}'"),
            Kind::End => f.write_str("end of input"),
        }
    }
}

impl fmt::Display for Token {
    /// Formats the token for display.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at position {}", self.kind, self.position)
    }
}
