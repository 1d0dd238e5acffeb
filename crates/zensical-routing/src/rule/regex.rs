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

//! Regular expression rule.

use crate::template::ast::Argument;

use super::{Error, Result, Rule};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Regular expression rule.
///
/// Values pass, if the pattern matches them entirely, e.g., `regex("[a-z]+")`.
/// Patterns without capture groups and anchors are inlined into compiled
/// route patterns when they're the only `regex` rule of a variable, which
/// lets the pattern take part in matching instead of only validating.
#[derive(Clone, Debug)]
pub struct Regex {
    /// Pattern as given.
    pattern: String,
    /// Compiled and anchored pattern.
    regex: regex::Regex,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Regex {
    /// Rule slug.
    pub const SLUG: &'static str = "regex";

    /// Creates a regular expression rule.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::InvalidArgument`], if the pattern is not
    /// a valid regular expression.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_routing::rule::{Regex, Rule};
    ///
    /// // Create rule and check values
    /// let rule = Regex::new("[a-z]{2}")?;
    /// assert!(rule.passes("en"));
    /// assert!(!rule.passes("eng"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn new<P>(pattern: P) -> Result<Self>
    where
        P: Into<String>,
    {
        let pattern = pattern.into();
        regex::Regex::new(&format!("^(?:{pattern})$"))
            .map(|regex| Self { pattern, regex })
            .map_err(|err| Error::invalid(Self::SLUG, err.to_string()))
    }

    /// Creates the rule from template arguments.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::InvalidArgument`], if the arguments are
    /// not a single string denoting a valid regular expression.
    pub fn from_args(args: &[Argument]) -> Result<Self> {
        match args {
            [arg] => match arg.as_str() {
                Some(pattern) => Self::new(pattern),
                None => Err(Error::invalid(Self::SLUG, "pattern must be a string")),
            },
            _ => Err(Error::invalid(Self::SLUG, "expected a single pattern")),
        }
    }

    /// Returns the pattern as given.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Rule for Regex {
    fn passes(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Returns whether the pattern can be inlined into a route pattern.
///
/// Inlining is only safe for valid patterns that neither introduce capture
/// groups, which would shift the indices of the route's variables, nor
/// contain anchors, which would break the surrounding pattern. Both are
/// determined from the parsed pattern, so `^` in negated classes like
/// `[^?]` and escaped `\$` are fine.
#[must_use]
pub fn inlinable(pattern: &str) -> bool {
    regex_syntax::Parser::new().parse(pattern).is_ok_and(|hir| {
        let properties = hir.properties();
        properties.explicit_captures_len() == 0
            && !properties.look_set().contains_anchor()
    })
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes() {
        let rule = Regex::new("[a-z]+|[0-9]+").unwrap();
        let test_cases = vec![
            ("abc", true),
            ("123", true),
            ("abc123", false),
            ("", false),
        ];
        for (value, expected) in test_cases {
            assert_eq!(rule.passes(value), expected, "Failed for: {value}");
        }
    }

    #[test]
    fn test_from_args_invalid() {
        let test_cases = vec![
            vec![],
            vec![Argument::String("(".into())],
            vec![Argument::Integer(1)],
        ];
        for args in test_cases {
            assert!(
                matches!(
                    Regex::from_args(&args),
                    Err(Error::InvalidArgument { .. })
                ),
                "Failed for: {args:?}"
            );
        }
    }

    #[test]
    fn test_inlinable() {
        let test_cases = vec![
            ("[a-z]+", true),
            ("(?:ab)+", true),
            ("(ab)+", false),
            ("^ab", false),
            ("ab$", false),
            ("(?m:^ab)", false),
            ("[^?]+", true),
            ("[^.]+", true),
            (r"[$]\$", true),
            ("(", false),
        ];
        for (pattern, expected) in test_cases {
            assert_eq!(inlinable(pattern), expected, "Failed for: {pattern}");
        }
    }
}
