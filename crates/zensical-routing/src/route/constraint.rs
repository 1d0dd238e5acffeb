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

//! Route constraints.

use ahash::HashMap;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::http::Method;

use super::Route;

// ----------------------------------------------------------------------------
// Traits
// ----------------------------------------------------------------------------

/// Route constraint.
///
/// Route constraints are evaluated after a route's template matched and all
/// rules of its variables passed. If a constraint fails, the route is skipped
/// and matching continues with the next route. Constraints must be free of
/// side effects, as they're shared among all matches.
pub trait RouteConstraint: Send + Sync + 'static {
    /// Returns whether the constraint is satisfied in the given context.
    fn is_match(&self, context: &Context) -> bool;
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Matching context.
#[derive(Clone, Copy, Debug)]
pub struct Context<'a> {
    /// Requested method.
    pub method: Method,
    /// Requested host.
    pub host: &'a str,
    /// Requested path.
    pub path: &'a str,
    /// Extracted variables.
    pub variables: &'a BTreeMap<String, String>,
    /// Candidate route.
    pub route: &'a Route,
}

/// Route constraint registry.
///
/// Routes reference constraints by name, which are resolved through this
/// registry when compiling, so unknown names are caught early.
#[derive(Clone, Default)]
pub struct Constraints {
    /// Map names to constraints.
    constraints: HashMap<String, Arc<dyn RouteConstraint>>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Constraints {
    /// Creates an empty route constraint registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a constraint to the registry, replacing one of the same name.
    pub fn add<N, C>(&mut self, name: N, constraint: C)
    where
        N: Into<String>,
        C: RouteConstraint,
    {
        self.constraints.insert(name.into(), Arc::new(constraint));
    }

    /// Adds a constraint to the registry, and returns the registry.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_routing::route::{Constraints, Context};
    ///
    /// // Create registry with constraint
    /// let constraints = Constraints::new()
    ///     .with("admin", |context: &Context| context.host.starts_with("admin."));
    ///
    /// // Check constraint
    /// assert!(constraints.get("admin").is_some());
    /// ```
    #[must_use]
    pub fn with<N, C>(mut self, name: N, constraint: C) -> Self
    where
        N: Into<String>,
        C: RouteConstraint,
    {
        self.add(name, constraint);
        self
    }

    /// Returns the constraint with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn RouteConstraint>> {
        self.constraints.get(name).cloned()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl fmt::Debug for Constraints {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut names: Vec<_> = self.constraints.keys().collect();
        names.sort();
        f.debug_struct("Constraints")
            .field("names", &names)
            .finish()
    }
}

impl fmt::Debug for dyn RouteConstraint {
    /// Formats the route constraint for debugging.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RouteConstraint").finish_non_exhaustive()
    }
}

// ----------------------------------------------------------------------------
// Blanket implementations
// ----------------------------------------------------------------------------

impl<F> RouteConstraint for F
where
    F: Fn(&Context) -> bool + Send + Sync + 'static,
{
    #[inline]
    fn is_match(&self, context: &Context) -> bool {
        self(context)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
