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

//! Rule error.

use std::result;
use thiserror::Error;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Rule error.
#[derive(Debug, Error)]
pub enum Error {
    /// No factory is registered for the slug.
    #[error("unknown rule: {0}")]
    Unknown(String),

    /// Factory can't be registered under the slug.
    #[error("invalid rule factory slug: \"{0}\"")]
    InvalidFactory(String),

    /// Arguments are malformed.
    #[error("invalid arguments for rule \"{slug}\": {message}")]
    InvalidArgument {
        /// Rule slug.
        slug: String,
        /// Description of the problem.
        message: String,
    },
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Error {
    /// Creates an invalid argument error.
    pub(crate) fn invalid<S, M>(slug: S, message: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Error::InvalidArgument {
            slug: slug.into(),
            message: message.into(),
        }
    }
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Rule result.
pub type Result<T = ()> = result::Result<T, Error>;
