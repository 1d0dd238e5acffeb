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

//! Parser.

use super::ast::{Argument, Invocation, Node, Variable};
use super::lexer::{Kind, Number, Token, Tokens};

mod error;

pub use error::{Error, Result};

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Parser context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Context {
    /// Host portion, delimited by `.`.
    Host,
    /// Path portion, delimited by `/`.
    Path,
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Parser.
///
/// Recursive-descent parser for the following grammar:
///
/// ```text
/// template      := [ host ] path
/// host_or_path  := { text | variable | optional_part }
/// optional_part := '[' host_or_path ']'
/// variable      := ':' NAME [ '=' default_value ] [ '(' rule_list ')' ]
/// rule_list     := rule { ',' rule }
/// rule          := NAME [ '(' parameter_list ')' ]
/// ```
///
/// Everything up to the first top-level `/` is considered to be the host, and
/// the remainder the path. Text is split into segment delimiters and literal
/// text according to the portion it belongs to.
#[derive(Debug)]
pub struct Parser {
    /// Token stream.
    tokens: Tokens,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Parser {
    /// Creates a parser.
    #[must_use]
    pub fn new(tokens: Tokens) -> Self {
        Self { tokens }
    }

    /// Parses the given token stream into a tree rooted in [`Node::Root`].
    ///
    /// # Errors
    ///
    /// This method returns an [`Error`], if the token stream violates the
    /// grammar, e.g., due to unbalanced brackets or misplaced punctuation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_routing::template::{Lexer, Parser};
    ///
    /// // Lex and parse template
    /// let tokens = Lexer::lex("/users/:id(int)")?;
    /// let root = Parser::parse(tokens)?;
    /// assert_eq!(root.variables().len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse(tokens: Tokens) -> Result<Node> {
        Self::new(tokens).parse_root()
    }

    /// Parses the root.
    fn parse_root(&mut self) -> Result<Node> {
        let mut host = Vec::new();
        let mut path = Vec::new();

        // Parse host until the first top-level text containing a slash, which
        // marks the beginning of the path, then continue with the path
        let mut context = Context::Host;
        loop {
            let token = self.tokens.next();
            match token.kind {
                Kind::Text(text) => {
                    if context == Context::Host {
                        if let Some(index) = text.find('/') {
                            push_text(&mut host, &text[..index], context);
                            context = Context::Path;
                            push_text(&mut path, &text[index..], context);
                            continue;
                        }
                    }
                    let nodes = select(&mut host, &mut path, context);
                    push_text(nodes, &text, context);
                }
                Kind::Variable(name) => {
                    let node = self.parse_variable(name)?;
                    select(&mut host, &mut path, context).push(node);
                }
                Kind::Punctuation('[') => {
                    let node = self.parse_optional(context, token.position)?;
                    select(&mut host, &mut path, context).push(node);
                }
                Kind::End => break,
                _ => return unexpected(token, "text, variable or '['"),
            }
        }

        // Assemble root, omitting the host if there is none
        let mut children = Vec::with_capacity(2);
        if !host.is_empty() {
            children.push(Node::Host(host));
        }
        children.push(Node::Path(path));
        Ok(Node::Root(children))
    }

    /// Parses an optional part after its opening bracket.
    fn parse_optional(
        &mut self, context: Context, position: usize,
    ) -> Result<Node> {
        let mut children = Vec::new();
        loop {
            let token = self.tokens.next();
            match token.kind {
                Kind::Text(text) => push_text(&mut children, &text, context),
                Kind::Variable(name) => {
                    children.push(self.parse_variable(name)?);
                }
                Kind::Punctuation('[') => {
                    let node = self.parse_optional(context, token.position)?;
                    children.push(node);
                }
                Kind::Punctuation(']') => {
                    return Ok(Node::OptionalPart(children));
                }
                Kind::End => return Err(Error::UnclosedOptional { position }),
                _ => return unexpected(token, "text, variable, '[' or ']'"),
            }
        }
    }

    /// Parses the default value and rule list of a variable.
    fn parse_variable(&mut self, name: String) -> Result<Node> {
        let mut children = Vec::new();

        // Default value
        if self.tokens.eat('=') {
            let token = self.tokens.next();
            let value = match token.kind {
                Kind::Text(value) | Kind::QuotedString(value) => {
                    Argument::String(value)
                }
                Kind::Number(number) => number.into(),
                _ => return unexpected(token, "default value"),
            };
            children.push(Node::Rule(Invocation::default_value(value)));
        }

        // Rule list
        let position = self.tokens.peek().position;
        if self.tokens.eat('(') {
            loop {
                let token = self.tokens.next();
                let slug = match token.kind {
                    Kind::Text(slug) => slug,
                    Kind::End => {
                        return Err(Error::UnclosedRuleList { position });
                    }
                    _ => return unexpected(token, "rule name"),
                };

                // Rules might have parameters, which are parsed recursively
                let start = self.tokens.peek().position;
                let args = if self.tokens.eat('(') {
                    self.parse_arguments(')', start)?
                } else {
                    Vec::new()
                };
                children.push(Node::Rule(Invocation::new(slug, args)));

                // Continue with the next rule or end the rule list
                let token = self.tokens.next();
                match token.kind {
                    Kind::Punctuation(',') => {}
                    Kind::Punctuation(')') => break,
                    Kind::End => {
                        return Err(Error::UnclosedRuleList { position });
                    }
                    _ => return unexpected(token, "',' or ')'"),
                }
            }
        }

        // Return variable
        Ok(Node::Variable(Variable { name, children }))
    }

    /// Parses arguments after the opening mark until the closing mark.
    fn parse_arguments(
        &mut self, close: char, position: usize,
    ) -> Result<Vec<Argument>> {
        let mut args = Vec::new();
        if self.tokens.eat(close) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_argument(position)?);
            let token = self.tokens.next();
            match token.kind {
                Kind::Punctuation(',') => {}
                Kind::Punctuation(mark) if mark == close => return Ok(args),
                Kind::End => return Err(Error::UnclosedRuleList { position }),
                _ => return unexpected(token, "',' or closing mark"),
            }
        }
    }

    /// Parses a single argument.
    fn parse_argument(&mut self, position: usize) -> Result<Argument> {
        let token = self.tokens.next();
        match token.kind {
            Kind::Number(number) => Ok(number.into()),
            Kind::QuotedString(value) => Ok(Argument::String(value)),
            Kind::Text(text) => {
                let start = self.tokens.peek().position;
                if self.tokens.eat('(') {
                    let args = self.parse_arguments(')', start)?;
                    return Ok(Argument::Rule(Invocation::new(text, args)));
                }
                Ok(match text.as_str() {
                    "true" => Argument::Bool(true),
                    "false" => Argument::Bool(false),
                    _ => Argument::String(text),
                })
            }
            Kind::Punctuation('[') => {
                self.parse_arguments(']', token.position).map(Argument::List)
            }
            Kind::End => Err(Error::UnclosedRuleList { position }),
            _ => unexpected(token, "argument"),
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl From<Number> for Argument {
    /// Creates an argument from a number.
    #[inline]
    fn from(number: Number) -> Self {
        match number {
            Number::Integer(value) => Argument::Integer(value),
            Number::Float(value) => Argument::Float(value),
        }
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Splits text into literal text and segment delimiters.
fn push_text(nodes: &mut Vec<Node>, text: &str, context: Context) {
    let delimiter = match context {
        Context::Host => '.',
        Context::Path => '/',
    };
    for (n, part) in text.split(delimiter).enumerate() {
        if n > 0 {
            nodes.push(Node::SegmentDelimiter(delimiter));
        }
        if !part.is_empty() {
            nodes.push(Node::Text(part.to_string()));
        }
    }
}

/// Selects the nodes of the host or path portion.
fn select<'a>(
    host: &'a mut Vec<Node>, path: &'a mut Vec<Node>, context: Context,
) -> &'a mut Vec<Node> {
    match context {
        Context::Host => host,
        Context::Path => path,
    }
}

/// Returns an unexpected token error.
#[inline]
fn unexpected<T>(token: Token, expected: &'static str) -> Result<T> {
    Err(Error::UnexpectedToken { token, expected })
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
