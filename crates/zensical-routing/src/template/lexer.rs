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

//! Lexer.

mod error;
mod token;

pub use error::{Error, Result};
pub use token::{Kind, Number, Token, Tokens};

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Maximum length of variable names.
pub const MAX_VARIABLE_LENGTH: usize = 32;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Lexer.
///
/// The lexer converts a template into a flat stream of tokens in a single
/// left-to-right scan. Outside of rule parameter lists, everything except for
/// variables and optional part brackets is coalesced into text tokens, which
/// keeps the number of nodes created by the [`Parser`][] small. Once a rule
/// list is opened with `(` directly after a variable, the lexer switches to
/// recognizing identifiers, numbers, quoted strings and arrays, until all
/// opened parentheses are closed again.
///
/// [`Parser`]: crate::template::Parser
#[derive(Debug)]
pub struct Lexer<'a> {
    /// Template.
    template: &'a str,
    /// Characters with byte offsets.
    chars: Vec<(usize, char)>,
    /// Current character index.
    index: usize,
    /// Emitted tokens.
    tokens: Vec<Token>,
    /// Open brackets and parentheses.
    stack: Vec<char>,
    /// Pending text and its starting position.
    text: Option<(String, usize)>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    /// Creates a lexer.
    #[must_use]
    pub fn new(template: &'a str) -> Self {
        Self {
            template,
            chars: template.char_indices().collect(),
            index: 0,
            tokens: Vec::new(),
            stack: Vec::new(),
            text: None,
        }
    }

    /// Lexes the given template into a token stream.
    ///
    /// # Errors
    ///
    /// This method returns an [`Error`], if a quoted string isn't terminated,
    /// a variable name is missing or longer than [`MAX_VARIABLE_LENGTH`], or
    /// a rule parameter list contains a character that can't start a token.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_routing::template::lexer::Kind;
    /// use zensical_routing::template::Lexer;
    ///
    /// // Lex template
    /// let tokens = Lexer::lex("/users/:id(int)")?;
    /// assert_eq!(tokens.peek().kind, Kind::Text("/users/".into()));
    /// # Ok(())
    /// # }
    /// ```
    pub fn lex(template: &'a str) -> Result<Tokens> {
        Self::new(template).run()
    }

    /// Runs the lexer until the end of input.
    fn run(mut self) -> Result<Tokens> {
        while let Some(char) = self.peek() {
            if self.stack.contains(&'(') {
                self.lex_parameter(char)?;
            } else {
                self.lex_template(char)?;
            }
        }

        // Flush remaining text and terminate stream
        self.flush();
        let end = Token::new(Kind::End, self.template.len());
        self.tokens.push(end);
        Ok(Tokens::new(self.tokens))
    }

    /// Lexes a character outside of rule parameter lists.
    fn lex_template(&mut self, char: char) -> Result {
        match char {
            ':' => {
                self.flush();
                self.lex_variable()
            }
            '[' => {
                self.flush();
                self.punctuation('[');
                self.stack.push('[');
                Ok(())
            }
            ']' => {
                self.flush();
                self.punctuation(']');
                if self.stack.last() == Some(&'[') {
                    self.stack.pop();
                }
                Ok(())
            }
            _ => {
                let position = self.position();
                self.text
                    .get_or_insert_with(|| (String::new(), position))
                    .0
                    .push(char);
                self.index += 1;
                Ok(())
            }
        }
    }

    /// Lexes a variable, including its default value and opening rule list.
    fn lex_variable(&mut self) -> Result {
        let position = self.position();
        self.index += 1;

        // Variable names must start with a letter or underscore, so a colon
        // followed by anything else is considered a malformed variable
        if !self.peek().is_some_and(|char| char.is_alphabetic() || char == '_')
        {
            return Err(Error::EmptyVariable { position });
        }
        let name = self.take_while(|char| char.is_alphanumeric() || char == '_');
        if name.chars().count() > MAX_VARIABLE_LENGTH {
            return Err(Error::VariableTooLong { name, position });
        }
        self.tokens.push(Token::new(Kind::Variable(name), position));

        // Default value
        if self.peek() == Some('=') {
            self.punctuation('=');
            self.lex_default()?;
        }

        // Rule list
        if self.peek() == Some('(') {
            self.punctuation('(');
            self.stack.push('(');
        }
        Ok(())
    }

    /// Lexes the default value of a variable.
    ///
    /// Numeric default values are kept as text, as they're substituted into
    /// URIs verbatim, so `1.0` and `007` must not be normalized.
    fn lex_default(&mut self) -> Result {
        match self.peek() {
            Some('"' | '\'') => self.lex_quoted(),
            Some(char) if self.starts_number(char) => {
                let position = self.position();
                let value = self.take_number();
                self.tokens.push(Token::new(Kind::Text(value), position));
                Ok(())
            }
            _ => {
                let position = self.position();
                let value = self.take_while(|char| {
                    char.is_alphanumeric() || char == '_' || char == '-'
                });
                if !value.is_empty() {
                    self.tokens.push(Token::new(Kind::Text(value), position));
                }
                Ok(())
            }
        }
    }

    /// Lexes a character inside a rule parameter list.
    fn lex_parameter(&mut self, char: char) -> Result {
        match char {
            '"' | '\'' => return self.lex_quoted(),
            '(' | '[' => {
                self.punctuation(char);
                self.stack.push(char);
            }
            ')' | ']' => {
                self.punctuation(char);
                let open = if char == ')' { '(' } else { '[' };
                if self.stack.last() == Some(&open) {
                    self.stack.pop();
                }
            }
            ',' => self.punctuation(','),
            _ if char.is_whitespace() => self.index += 1,
            _ if self.starts_number(char) => self.lex_number(),
            _ if char.is_alphabetic() || char == '_' => {
                let position = self.position();
                let text = self.take_while(|char| {
                    char.is_alphanumeric() || char == '_'
                });
                self.tokens.push(Token::new(Kind::Text(text), position));
            }
            _ => {
                let position = self.position();
                return Err(Error::UnexpectedCharacter { character: char, position });
            }
        }
        Ok(())
    }

    /// Lexes a quoted string, resolving backslash escapes.
    fn lex_quoted(&mut self) -> Result {
        let position = self.position();
        let Some(quote) = self.peek() else {
            return Err(Error::UnterminatedString { position });
        };
        self.index += 1;

        // Consume characters until the matching quote - a backslash escapes
        // the next character, which is taken verbatim
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(Error::UnterminatedString { position }),
                Some(char) if char == quote => {
                    self.index += 1;
                    break;
                }
                Some('\\') => {
                    self.index += 1;
                    let Some(char) = self.peek() else {
                        return Err(Error::UnterminatedString { position });
                    };
                    value.push(char);
                    self.index += 1;
                }
                Some(char) => {
                    value.push(char);
                    self.index += 1;
                }
            }
        }
        let token = Token::new(Kind::QuotedString(value), position);
        self.tokens.push(token);
        Ok(())
    }

    /// Lexes a number, classified by the presence of a decimal point.
    fn lex_number(&mut self) {
        let position = self.position();
        let value = self.take_number();

        // Integers that overflow are demoted to floating-point numbers
        let number = match value.parse::<i64>() {
            Ok(number) if !value.contains('.') => Number::Integer(number),
            _ => Number::Float(value.parse::<f64>().unwrap_or(f64::NAN)),
        };
        self.tokens.push(Token::new(Kind::Number(number), position));
    }

    /// Consumes a number, including its sign and decimal point.
    fn take_number(&mut self) -> String {
        let mut value = String::new();
        if let Some(sign @ ('-' | '+')) = self.peek() {
            value.push(sign);
            self.index += 1;
        }
        let mut seen_point = false;
        while let Some(char) = self.peek() {
            if char == '.' && !seen_point {
                seen_point = true;
            } else if !char.is_ascii_digit() {
                break;
            }
            value.push(char);
            self.index += 1;
        }
        value
    }

    /// Emits a punctuation token and advances.
    fn punctuation(&mut self, mark: char) {
        let position = self.position();
        self.tokens.push(Token::new(Kind::Punctuation(mark), position));
        self.index += 1;
    }

    /// Emits pending text, if any.
    fn flush(&mut self) {
        if let Some((text, position)) = self.text.take() {
            self.tokens.push(Token::new(Kind::Text(text), position));
        }
    }

    /// Consumes characters while the predicate holds.
    fn take_while<F>(&mut self, f: F) -> String
    where
        F: Fn(char) -> bool,
    {
        let mut value = String::new();
        while let Some(char) = self.peek().filter(|&char| f(char)) {
            value.push(char);
            self.index += 1;
        }
        value
    }

    /// Returns whether a number starts at the current character.
    fn starts_number(&self, char: char) -> bool {
        let next = self.chars.get(self.index + 1).map(|&(_, char)| char);
        match char {
            '-' | '+' | '.' => next.is_some_and(|next| next.is_ascii_digit()),
            _ => char.is_ascii_digit(),
        }
    }

    /// Returns the current character.
    #[inline]
    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).map(|&(_, char)| char)
    }

    /// Returns the byte offset of the current character.
    #[inline]
    fn position(&self) -> usize {
        self.chars
            .get(self.index)
            .map_or(self.template.len(), |&(position, _)| position)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Lexes the template and returns the token kinds.
    fn kinds(template: &str) -> Vec<Kind> {
        let tokens = Lexer::lex(template).unwrap();
        tokens.as_slice().iter().map(|token| token.kind.clone()).collect()
    }

    fn text(value: &str) -> Kind {
        Kind::Text(value.to_string())
    }

    fn variable(value: &str) -> Kind {
        Kind::Variable(value.to_string())
    }

    #[test]
    fn test_text_is_coalesced() {
        assert_eq!(kinds("/foo/bar.baz"), vec![text("/foo/bar.baz"), Kind::End]);
        assert_eq!(kinds(""), vec![Kind::End]);
    }

    #[test]
    fn test_variables() {
        assert_eq!(
            kinds("/users/:id/posts/:post_id"),
            vec![
                text("/users/"),
                variable("id"),
                text("/posts/"),
                variable("post_id"),
                Kind::End
            ]
        );
    }

    #[test]
    fn test_optional_parts() {
        assert_eq!(
            kinds("/foo[/:bar[/:baz]]"),
            vec![
                text("/foo"),
                Kind::Punctuation('['),
                text("/"),
                variable("bar"),
                Kind::Punctuation('['),
                text("/"),
                variable("baz"),
                Kind::Punctuation(']'),
                Kind::Punctuation(']'),
                Kind::End
            ]
        );
    }

    #[test]
    fn test_rules_with_parameters() {
        assert_eq!(
            kinds("/:id(int, between(1, 2.5, false))"),
            vec![
                text("/"),
                variable("id"),
                Kind::Punctuation('('),
                text("int"),
                Kind::Punctuation(','),
                text("between"),
                Kind::Punctuation('('),
                Kind::Number(Number::Integer(1)),
                Kind::Punctuation(','),
                Kind::Number(Number::Float(2.5)),
                Kind::Punctuation(','),
                text("false"),
                Kind::Punctuation(')'),
                Kind::Punctuation(')'),
                Kind::End
            ]
        );
    }

    #[test]
    fn test_rules_with_arrays_and_strings() {
        assert_eq!(
            kinds(r#":x(notIn(["a", 'b\'c'], -3))/y"#),
            vec![
                variable("x"),
                Kind::Punctuation('('),
                text("notIn"),
                Kind::Punctuation('('),
                Kind::Punctuation('['),
                Kind::QuotedString("a".into()),
                Kind::Punctuation(','),
                Kind::QuotedString("b'c".into()),
                Kind::Punctuation(']'),
                Kind::Punctuation(','),
                Kind::Number(Number::Integer(-3)),
                Kind::Punctuation(')'),
                Kind::Punctuation(')'),
                text("/y"),
                Kind::End
            ]
        );
    }

    #[test]
    fn test_default_values() {
        assert_eq!(
            kinds("/:page=1(int)"),
            vec![
                text("/"),
                variable("page"),
                Kind::Punctuation('='),
                text("1"),
                Kind::Punctuation('('),
                text("int"),
                Kind::Punctuation(')'),
                Kind::End
            ]
        );
        assert_eq!(
            kinds("/:lang=en-us/x"),
            vec![
                text("/"),
                variable("lang"),
                Kind::Punctuation('='),
                text("en-us"),
                text("/x"),
                Kind::End
            ]
        );
        assert_eq!(
            kinds("[/:version=1.0][/:code=007]"),
            vec![
                Kind::Punctuation('['),
                text("/"),
                variable("version"),
                Kind::Punctuation('='),
                text("1.0"),
                Kind::Punctuation(']'),
                Kind::Punctuation('['),
                text("/"),
                variable("code"),
                Kind::Punctuation('='),
                text("007"),
                Kind::Punctuation(']'),
                Kind::End
            ]
        );
    }

    #[test]
    fn test_punctuation_is_text_outside_of_rules() {
        assert_eq!(kinds("/a(b),c=d"), vec![text("/a(b),c=d"), Kind::End]);
    }

    #[test]
    fn test_positions() {
        let tokens = Lexer::lex("/a/:b").unwrap();
        let positions: Vec<_> =
            tokens.as_slice().iter().map(|token| token.position).collect();
        assert_eq!(positions, vec![0, 3, 5]);
    }

    #[test]
    fn test_errors() {
        let test_cases = vec![
            (r#"/:a(regex("foo))"#, Error::UnterminatedString { position: 10 }),
            ("/:", Error::EmptyVariable { position: 1 }),
            ("/:1", Error::EmptyVariable { position: 1 }),
            (
                "/:a(int;)",
                Error::UnexpectedCharacter { character: ';', position: 7 },
            ),
        ];
        for (template, expected) in test_cases {
            let result = Lexer::lex(template).unwrap_err();
            assert_eq!(result, expected, "Failed for template: {template}");
        }
    }

    #[test]
    fn test_variable_length() {
        let name = "a".repeat(MAX_VARIABLE_LENGTH);
        assert!(Lexer::lex(&format!("/:{name}")).is_ok());
        let name = "a".repeat(MAX_VARIABLE_LENGTH + 1);
        let result = Lexer::lex(&format!("/:{name}"));
        assert!(matches!(result, Err(Error::VariableTooLong { .. })));
    }
}
