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

//! Between rule.

use crate::template::ast::Argument;

use super::{Error, Result, Rule};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Between rule.
///
/// Values pass, if they're numeric and lie within the bounds, which are
/// inclusive unless specified otherwise, e.g., `between(1, 10, false)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Between {
    /// Lower bound.
    min: f64,
    /// Upper bound.
    max: f64,
    /// Whether bounds are inclusive.
    inclusive: bool,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Between {
    /// Rule slug.
    pub const SLUG: &'static str = "between";

    /// Creates a between rule.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::InvalidArgument`], if a bound is not a
    /// number, or the lower bound is greater than the upper bound.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_routing::rule::{Between, Rule};
    ///
    /// // Create rule and check values
    /// let rule = Between::new(0.0, 2.0, true)?;
    /// assert!(rule.passes("2"));
    /// assert!(!rule.passes("3"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(min: f64, max: f64, inclusive: bool) -> Result<Self> {
        if min.is_nan() || max.is_nan() {
            return Err(Error::invalid(Self::SLUG, "bounds must be numbers"));
        }
        if min > max {
            let message = format!("minimum {min} is greater than maximum {max}");
            return Err(Error::invalid(Self::SLUG, message));
        }
        Ok(Self { min, max, inclusive })
    }

    /// Creates the rule from template arguments.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::InvalidArgument`], if the arguments are
    /// not two numbers, optionally followed by a boolean.
    pub fn from_args(args: &[Argument]) -> Result<Self> {
        let (min, max, inclusive) = match args {
            [min, max] => (min.as_f64(), max.as_f64(), Some(true)),
            [min, max, inclusive] => {
                (min.as_f64(), max.as_f64(), inclusive.as_bool())
            }
            _ => {
                let message = "expected minimum, maximum and inclusivity";
                return Err(Error::invalid(Self::SLUG, message));
            }
        };
        match (min, max, inclusive) {
            (Some(min), Some(max), Some(inclusive)) => {
                Self::new(min, max, inclusive)
            }
            (_, _, None) => {
                Err(Error::invalid(Self::SLUG, "inclusivity must be a boolean"))
            }
            _ => Err(Error::invalid(Self::SLUG, "bounds must be numbers")),
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Rule for Between {
    fn passes(&self, value: &str) -> bool {
        let Ok(value) = value.parse::<f64>() else {
            return false;
        };
        if self.inclusive {
            self.min <= value && value <= self.max
        } else {
            self.min < value && value < self.max
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive() {
        let rule = Between::new(0.0, 2.0, true).unwrap();
        let test_cases =
            vec![("0", true), ("1.5", true), ("2", true), ("3", false)];
        for (value, expected) in test_cases {
            assert_eq!(rule.passes(value), expected, "Failed for: {value}");
        }
    }

    #[test]
    fn test_exclusive() {
        let rule = Between::new(0.0, 2.0, false).unwrap();
        let test_cases =
            vec![("0", false), ("1", true), ("2", false), ("foo", false)];
        for (value, expected) in test_cases {
            assert_eq!(rule.passes(value), expected, "Failed for: {value}");
        }
    }

    #[test]
    fn test_from_args() {
        let args = [Argument::Integer(1), Argument::Float(2.5)];
        let rule = Between::from_args(&args).unwrap();
        assert_eq!(rule, Between { min: 1.0, max: 2.5, inclusive: true });

        let test_cases = vec![
            vec![],
            vec![Argument::Integer(1)],
            vec![Argument::Integer(2), Argument::Integer(1)],
            vec![Argument::String("a".into()), Argument::Integer(1)],
            vec![Argument::Integer(1), Argument::Integer(2), Argument::Integer(3)],
        ];
        for args in test_cases {
            assert!(
                matches!(
                    Between::from_args(&args),
                    Err(Error::InvalidArgument { .. })
                ),
                "Failed for: {args:?}"
            );
        }
    }
}
