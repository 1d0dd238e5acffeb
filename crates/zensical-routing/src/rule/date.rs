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

//! Date rule.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::template::ast::Argument;

use super::{Error, Result, Rule};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Date rule.
///
/// Values pass, if they can be parsed with at least one of the given formats,
/// which use `strftime` syntax, e.g., `date("%Y-%m-%d")`. Formats can denote
/// a date and time, a date or a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Date {
    /// Accepted formats.
    formats: Vec<String>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Date {
    /// Rule slug.
    pub const SLUG: &'static str = "date";

    /// Creates a date rule.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::InvalidArgument`], if no format is given.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_routing::rule::{Date, Rule};
    ///
    /// // Create rule and check values
    /// let rule = Date::new(["%Y-%m-%d"])?;
    /// assert!(rule.passes("2025-04-01"));
    /// assert!(!rule.passes("2025-13-01"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn new<I, S>(formats: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let formats: Vec<_> = formats.into_iter().map(Into::into).collect();
        if formats.is_empty() {
            Err(Error::invalid(Self::SLUG, "expected at least one format"))
        } else {
            Ok(Self { formats })
        }
    }

    /// Creates the rule from template arguments.
    ///
    /// Formats can be given as separate strings or as a list of strings.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::InvalidArgument`], if an argument is not
    /// a string, or no format is given.
    pub fn from_args(args: &[Argument]) -> Result<Self> {
        let args = match args {
            [Argument::List(values)] => values.as_slice(),
            _ => args,
        };
        let mut formats = Vec::with_capacity(args.len());
        for arg in args {
            let Some(format) = arg.as_str() else {
                return Err(Error::invalid(Self::SLUG, "formats must be strings"));
            };
            formats.push(format);
        }
        Self::new(formats)
    }

    /// Returns the accepted formats.
    #[must_use]
    pub fn formats(&self) -> &[String] {
        &self.formats
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Rule for Date {
    fn passes(&self, value: &str) -> bool {
        self.formats.iter().any(|format| {
            NaiveDateTime::parse_from_str(value, format).is_ok()
                || NaiveDate::parse_from_str(value, format).is_ok()
                || NaiveTime::parse_from_str(value, format).is_ok()
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
