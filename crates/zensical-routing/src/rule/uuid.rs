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

//! UUID rule.

use uuid::{Uuid, Variant};

use crate::template::ast::Argument;

use super::{Result, Rule};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// UUID version 4 rule.
///
/// Values pass, if they're UUIDs of version 4 and RFC 4122 variant in their
/// hyphenated form, optionally wrapped in braces.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidV4;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl UuidV4 {
    /// Rule slug.
    pub const SLUG: &'static str = "uuidv4";

    /// Creates the rule from template arguments, which are ignored.
    #[allow(clippy::unnecessary_wraps)]
    pub fn from_args(_args: &[Argument]) -> Result<Self> {
        Ok(Self)
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Rule for UuidV4 {
    fn passes(&self, value: &str) -> bool {
        let value = value
            .strip_prefix('{')
            .and_then(|value| value.strip_suffix('}'))
            .unwrap_or(value);

        // Only accept the hyphenated form, as the parser is more lenient
        value.len() == 36
            && Uuid::try_parse(value).is_ok_and(|uuid| {
                uuid.get_version_num() == 4
                    && uuid.get_variant() == Variant::RFC4122
            })
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
            ("f47ac10b-58cc-4372-a567-0e02b2c3d479", true),
            ("{f47ac10b-58cc-4372-a567-0e02b2c3d479}", true),
            ("F47AC10B-58CC-4372-A567-0E02B2C3D479", true),
            ("f47ac10b58cc4372a5670e02b2c3d479", false),
            ("{f47ac10b-58cc-4372-a567-0e02b2c3d479", false),
            ("f47ac10b-58cc-1372-a567-0e02b2c3d479", false),
            ("f47ac10b-58cc-4372-c567-0e02b2c3d479", false),
            ("foo", false),
            ("", false),
        ];
        for (value, expected) in test_cases {
            assert_eq!(UuidV4.passes(value), expected, "Failed for: {value}");
        }
    }
}
