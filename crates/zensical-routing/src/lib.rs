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

//! URI template routing.
//!
//! Routes are registered with templates made of literal text, variables,
//! optional parts and rules, e.g., `/users/:id(int)[/:tab]`. Templates are
//! compiled into alternations of regular expressions for each method, which
//! are used to resolve requests to routes. The same templates are used to
//! create URIs for named routes, omitting optional parts whose variables are
//! not given.

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]

pub mod cache;
pub mod compiler;
pub mod http;
pub mod matcher;
pub mod route;
pub mod router;
pub mod rule;
pub mod template;
pub mod uri;

pub use router::Router;
