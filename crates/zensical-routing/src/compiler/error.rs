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

//! Compiler error.

use std::result;
use thiserror::Error;

use crate::rule;
use crate::template::parser;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Compiler error.
#[derive(Debug, Error)]
pub enum Error {
    /// Template is malformed.
    #[error("invalid template \"{template}\": {source}")]
    Template {
        /// Template.
        template: String,
        /// Parser error.
        source: parser::Error,
    },

    /// Rule can't be created.
    #[error("invalid rule in route \"{route}\": {source}")]
    Rule {
        /// Route name or template.
        route: String,
        /// Rule error.
        source: rule::Error,
    },

    /// Named constraint is not registered.
    #[error("unknown constraint \"{name}\" in route \"{route}\"")]
    Constraint {
        /// Route name or template.
        route: String,
        /// Constraint name.
        name: String,
    },

    /// Regular expression error.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Compiler result.
pub type Result<T = ()> = result::Result<T, Error>;
