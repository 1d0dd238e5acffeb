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

//! Exclusion rule.

use crate::template::ast::Argument;

use super::{Error, Result, Rule};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Exclusion rule.
///
/// Values pass, if they're not among the given values, e.g., for reserving
/// names with `notIn(["new", "edit"])`. Numbers are compared by their textual
/// representation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotIn {
    /// Excluded values.
    values: Vec<String>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl NotIn {
    /// Rule slug.
    pub const SLUG: &'static str = "notIn";

    /// Creates an exclusion rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_routing::rule::{NotIn, Rule};
    ///
    /// // Create rule and check values
    /// let rule = NotIn::new(["new", "edit"]);
    /// assert!(rule.passes("coffee"));
    /// assert!(!rule.passes("new"));
    /// ```
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates the rule from template arguments.
    ///
    /// Values can be given as separate arguments or as lists, which are
    /// flattened.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::InvalidArgument`], if an argument is a
    /// rule invocation.
    pub fn from_args(args: &[Argument]) -> Result<Self> {
        let mut values = Vec::new();
        flatten(args, &mut values)?;
        Ok(Self { values })
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Rule for NotIn {
    fn passes(&self, value: &str) -> bool {
        !self.values.iter().any(|excluded| excluded == value)
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Flattens arguments into their textual representation.
fn flatten(args: &[Argument], values: &mut Vec<String>) -> Result {
    for arg in args {
        match arg {
            Argument::List(nested) => flatten(nested, values)?,
            Argument::Rule(_) => {
                let message = "values must not be rules";
                return Err(Error::invalid(NotIn::SLUG, message));
            }
            _ => values.push(arg.to_string()),
        }
    }
    Ok(())
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::ast::Invocation;

    #[test]
    fn test_from_args() {
        let args = [
            Argument::List(vec![
                Argument::String("new".into()),
                Argument::Integer(0),
            ]),
            Argument::String("edit".into()),
        ];
        let rule = NotIn::from_args(&args).unwrap();
        let test_cases = vec![
            ("new", false),
            ("edit", false),
            ("0", false),
            ("1", true),
            ("coffee", true),
        ];
        for (value, expected) in test_cases {
            assert_eq!(rule.passes(value), expected, "Failed for: {value}");
        }
    }

    #[test]
    fn test_from_args_invalid() {
        let args = [Argument::Rule(Invocation::new("alpha", vec![]))];
        assert!(matches!(
            NotIn::from_args(&args),
            Err(Error::InvalidArgument { .. })
        ));
    }
}
