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

//! URI template.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::Node;
pub use lexer::Lexer;
pub use parser::Parser;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// URI template.
///
/// Templates combine a path template, which always starts with `/` and never
/// ends with one, unless it's the root path, with an optional host template,
/// which never ends with a `/`. Both are normalized during construction, so
/// `foo/` and `/foo` denote the same template.
///
/// Templates consist of literal text, variables prefixed with `:`, optional
/// parts enclosed in `[` and `]`, and rules that constrain variable values:
///
/// ```text
/// /users/:id(int)/posts[/:page=1(int, between(1, 100))]
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UriTemplate {
    /// Path template.
    path: String,
    /// Host template, optional.
    host: Option<String>,
    /// Whether the URI must use HTTPS.
    https: bool,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl UriTemplate {
    /// Creates a URI template from a path template.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_routing::template::UriTemplate;
    ///
    /// // Create template
    /// let template = UriTemplate::new("users/:id/");
    /// assert_eq!(template.path(), "/users/:id");
    /// ```
    #[must_use]
    pub fn new<P>(path: P) -> Self
    where
        P: AsRef<str>,
    {
        let path = path.as_ref().trim_matches('/');
        Self {
            path: format!("/{path}"),
            host: None,
            https: false,
        }
    }

    /// Sets the host template.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_routing::template::UriTemplate;
    ///
    /// // Create template with host
    /// let template = UriTemplate::new("/").with_host(":sub.example.com/");
    /// assert_eq!(template.host(), Some(":sub.example.com"));
    /// ```
    #[must_use]
    pub fn with_host<H>(mut self, host: H) -> Self
    where
        H: AsRef<str>,
    {
        let host = host.as_ref().trim_end_matches('/');
        self.host = (!host.is_empty()).then(|| host.to_string());
        self
    }

    /// Sets whether the URI must use HTTPS.
    #[must_use]
    pub fn with_https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    /// Lexes and parses the template.
    ///
    /// # Errors
    ///
    /// This method returns a [`parser::Error`], if the template is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_routing::template::UriTemplate;
    ///
    /// // Create and parse template
    /// let template = UriTemplate::new("/users/:id(int)");
    /// let root = template.parse()?;
    /// assert!(root.host().is_none());
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse(&self) -> parser::Result<Node> {
        parse(&self.to_string())
    }
}

#[allow(clippy::must_use_candidate)]
impl UriTemplate {
    /// Returns the path template.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the host template, if any.
    #[inline]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns whether the URI must use HTTPS.
    #[inline]
    pub fn is_https_only(&self) -> bool {
        self.https
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl fmt::Display for UriTemplate {
    /// Formats the template for display, i.e., the host followed by the path.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(host) = &self.host {
            f.write_str(host)?;
        }
        f.write_str(&self.path)
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Lexes and parses the given template string.
///
/// # Errors
///
/// This method returns a [`parser::Error`], if lexing or parsing fails.
pub fn parse(template: &str) -> parser::Result<Node> {
    Parser::parse(Lexer::lex(template)?)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_normalization() {
        let test_cases = vec![
            ("", "/"),
            ("/", "/"),
            ("//", "/"),
            ("foo", "/foo"),
            ("/foo/", "/foo"),
            ("foo[/:bar[/:baz]]", "/foo[/:bar[/:baz]]"),
        ];
        for (path, expected) in test_cases {
            let template = UriTemplate::new(path);
            assert_eq!(template.path(), expected, "Failed for path: {path}");
        }
    }

    #[test]
    fn test_host_normalization() {
        let template = UriTemplate::new("/").with_host("example.com/");
        assert_eq!(template.host(), Some("example.com"));
        let template = UriTemplate::new("/").with_host("");
        assert_eq!(template.host(), None);
    }

    #[test]
    fn test_parse_splits_host_and_path() {
        let template = UriTemplate::new("/:b").with_host(":a.example.com");
        let root = template.parse().unwrap();
        assert_eq!(root.host().map(<[Node]>::len), Some(5));
        assert_eq!(root.path().len(), 2);
    }
}
