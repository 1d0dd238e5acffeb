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

//! Parser error.

use std::result;
use thiserror::Error;

use crate::template::lexer::{self, Token};

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Parser error.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// Lexer error.
    #[error(transparent)]
    Lexer(#[from] lexer::Error),

    /// Token violates the grammar.
    #[error("unexpected {token}, expected {expected}")]
    UnexpectedToken {
        /// Offending token.
        token: Token,
        /// Description of what was expected.
        expected: &'static str,
    },

    /// Optional part is not closed with `]`.
    #[error("unclosed optional part starting at position {position}")]
    UnclosedOptional {
        /// Position of the opening bracket.
        position: usize,
    },

    /// Rule or argument list is not closed.
    #[error("unclosed rule list starting at position {position}")]
    UnclosedRuleList {
        /// Position of the opening parenthesis or bracket.
        position: usize,
    },
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Parser result.
pub type Result<T = ()> = result::Result<T, Error>;
