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

//! HTTP method.

use ahash::HashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use super::error::{Error, Result};

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Method {
    /// Returns the methods implied by the method.
    ///
    /// Registering a route for `GET` implicitly registers it for `HEAD`, as a
    /// `HEAD` request must be answered like the equivalent `GET` request.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_routing::http::Method;
    ///
    /// // Obtain implied methods
    /// let methods = Method::Get.implied();
    /// assert_eq!(methods, &[Method::Get, Method::Head]);
    /// ```
    #[must_use]
    pub const fn implied(&self) -> &'static [Method] {
        match self {
            Method::Get => &[Method::Get, Method::Head],
            Method::Head => &[Method::Head],
            Method::Post => &[Method::Post],
            Method::Put => &[Method::Put],
            Method::Delete => &[Method::Delete],
            Method::Options => &[Method::Options],
            Method::Trace => &[Method::Trace],
            Method::Patch => &[Method::Patch],
            Method::Connect => &[Method::Connect],
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl AsRef<str> for Method {
    /// Returns the string representation.
    #[inline]
    fn as_ref(&self) -> &str {
        self.name()
    }
}

// ----------------------------------------------------------------------------

impl fmt::Display for Method {
    /// Formats the method for display.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ----------------------------------------------------------------------------
// Macros
// ----------------------------------------------------------------------------

/// Defines and implements HTTP methods.
macro_rules! define_and_impl_method {
    (
        $(
            // Method definition
            $(#[$comment:meta])*
            $name:ident = $method:expr
        ),+
        $(,)?
    ) => {
        /// HTTP method.
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
            Serialize, Deserialize,
        )]
        #[serde(into = "String", try_from = "String")]
        pub enum Method {
            $(
                $(#[$comment])*
                $name,
            )+
        }

        impl Method {
            /// All methods, in declaration order.
            pub const ALL: &[Method] = &[$(Method::$name,)+];

            /// Returns the method name.
            ///
            /// # Examples
            ///
            /// ```
            /// use zensical_routing::http::Method;
            ///
            /// // Create method
            /// let method = Method::Get;
            ///
            /// // Obtain method name
            /// assert_eq!(method.name(), "GET");
            /// ```
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    $(
                        Method::$name => $method,
                    )+
                }
            }
        }

        /// Lookup table for HTTP methods (case-insensitive).
        static METHOD_LOOKUP_TABLE: LazyLock<HashMap<String, Method>> =
            LazyLock::new(|| {
                HashMap::from_iter([
                    $(
                        ($method.to_uppercase(), Method::$name),
                    )+
                ])
            });

        impl FromStr for Method {
            type Err = Error;

            /// Attempts to create a method from a string.
            ///
            /// # Errors
            ///
            /// This method returns [`Error::Method`], if the string does not
            /// match one of the known methods.
            ///
            /// # Examples
            ///
            /// ```
            /// # use std::error::Error;
            /// # fn main() -> Result<(), Box<dyn Error>> {
            /// use zensical_routing::http::Method;
            ///
            /// // Create method from string
            /// let method: Method = "get".parse()?;
            /// assert_eq!(method, Method::Get);
            /// # Ok(())
            /// # }
            /// ```
            fn from_str(value: &str) -> Result<Self> {
                METHOD_LOOKUP_TABLE
                    .get(&value.to_uppercase())
                    .copied()
                    .ok_or_else(|| Error::Method(value.to_string()))
            }
        }
    }
}

// ----------------------------------------------------------------------------

define_and_impl_method! {
    /// GET method
    Get = "GET",
    /// HEAD method
    Head = "HEAD",
    /// POST method
    Post = "POST",
    /// PUT method
    Put = "PUT",
    /// DELETE method
    Delete = "DELETE",
    /// OPTIONS method
    Options = "OPTIONS",
    /// TRACE method
    Trace = "TRACE",
    /// PATCH method
    Patch = "PATCH",
    /// CONNECT method
    Connect = "CONNECT",
}

// ----------------------------------------------------------------------------

impl From<Method> for String {
    /// Converts the method into its name.
    #[inline]
    fn from(method: Method) -> Self {
        method.name().to_string()
    }
}

impl TryFrom<String> for Method {
    type Error = Error;

    /// Attempts to create a method from its name.
    #[inline]
    fn try_from(value: String) -> Result<Self> {
        Method::from_str(&value)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        let test_cases = vec![
            ("GET", Some(Method::Get)),
            ("get", Some(Method::Get)),
            ("Patch", Some(Method::Patch)),
            ("connect", Some(Method::Connect)),
            ("BREW", None),
            ("", None),
        ];
        for (value, expected) in test_cases {
            let result = Method::from_str(value).ok();
            assert_eq!(result, expected, "Failed for method: {value}");
        }
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&Method::Delete).unwrap();
        assert_eq!(json, "\"DELETE\"");
        let method: Method = serde_json::from_str("\"delete\"").unwrap();
        assert_eq!(method, Method::Delete);
        assert!(serde_json::from_str::<Method>("\"BREW\"").is_err());
    }
}
