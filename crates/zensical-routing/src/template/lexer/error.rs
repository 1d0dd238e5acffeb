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

//! Lexer error.

use std::result;
use thiserror::Error;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Lexer error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Quoted string is not terminated.
    #[error("unterminated string starting at position {position}")]
    UnterminatedString {
        /// Position of the opening quote.
        position: usize,
    },

    /// Variable name exceeds the maximum length.
    #[error("variable name \"{name}\" at position {position} is too long")]
    VariableTooLong {
        /// Variable name.
        name: String,
        /// Position of the variable.
        position: usize,
    },

    /// Variable name is missing after `:`.
    #[error("missing variable name at position {position}")]
    EmptyVariable {
        /// Position of the colon.
        position: usize,
    },

    /// Character is not allowed in rule parameters.
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter {
        /// Character.
        character: char,
        /// Position of the character.
        position: usize,
    },
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Lexer result.
pub type Result<T = ()> = result::Result<T, Error>;
