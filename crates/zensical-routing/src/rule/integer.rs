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

//! Integer rule.

use crate::template::ast::Argument;

use super::{Result, Rule};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Integer rule.
///
/// Values pass, if they are decimal integers fitting into 64 bits, with an
/// optional minus sign. A leading plus sign is rejected, so only canonical
/// representations pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct Integer;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Integer {
    /// Rule slug.
    pub const SLUG: &'static str = "int";

    /// Creates the rule from template arguments, which are ignored.
    #[allow(clippy::unnecessary_wraps)]
    pub fn from_args(_args: &[Argument]) -> Result<Self> {
        Ok(Self)
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Rule for Integer {
    fn passes(&self, value: &str) -> bool {
        !value.starts_with('+') && value.parse::<i64>().is_ok()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes() {
        let test_cases = vec![
            ("0", true),
            ("42", true),
            ("-7", true),
            ("+5", false),
            ("1.0", false),
            ("", false),
            ("abc", false),
            ("99999999999999999999", false),
        ];
        for (value, expected) in test_cases {
            assert_eq!(Integer.passes(value), expected, "Failed for: {value}");
        }
    }
}
