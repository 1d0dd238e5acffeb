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

//! Numeric rule.

use crate::template::ast::Argument;

use super::{Result, Rule};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Numeric rule.
///
/// Values pass, if they denote a finite number, including signed, decimal
/// and exponential notation. Spelled-out values like `inf` don't pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct Numeric;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Numeric {
    /// Rule slug.
    pub const SLUG: &'static str = "numeric";

    /// Creates the rule from template arguments, which are ignored.
    #[allow(clippy::unnecessary_wraps)]
    pub fn from_args(_args: &[Argument]) -> Result<Self> {
        Ok(Self)
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Rule for Numeric {
    fn passes(&self, value: &str) -> bool {
        value.bytes().all(|byte| {
            byte.is_ascii_digit() || matches!(byte, b'+' | b'-' | b'.' | b'e' | b'E')
        }) && value.parse::<f64>().is_ok_and(f64::is_finite)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
