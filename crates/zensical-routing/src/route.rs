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

//! Routes.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::http::Method;
use crate::template::UriTemplate;

mod builder;
mod collection;
pub mod constraint;

pub use builder::{Builder, Group, RouteBuilder};
pub use collection::RouteCollection;
pub use constraint::{Constraints, Context, RouteConstraint};

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Route constraint reference.
///
/// Method constraints are resolved when compiling, as routes are compiled
/// into separate groups for each method. Named constraints are looked up in
/// the [`Constraints`] registry and evaluated after a route matched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint {
    /// Allowed methods.
    Methods(BTreeSet<Method>),
    /// Named constraint.
    Named(String),
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Route.
///
/// A route binds a [`UriTemplate`] to an opaque [`Action`], together with its
/// constraints and middleware bindings. Routes are immutable once they're
/// part of a [`RouteCollection`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// URI template.
    template: UriTemplate,
    /// Action.
    action: Action,
    /// Constraints.
    constraints: Vec<Constraint>,
    /// Middleware bindings.
    middleware: Vec<Middleware>,
    /// Route name, optional.
    name: Option<String>,
}

/// Action.
///
/// Actions are opaque references to whatever handles a route, e.g., the name
/// of a controller, which are resolved by the caller after matching.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(String);

/// Middleware binding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Middleware {
    /// Middleware name.
    name: String,
    /// Middleware parameters.
    parameters: BTreeMap<String, String>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Route {
    /// Creates a route.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_routing::route::Route;
    /// use zensical_routing::template::UriTemplate;
    ///
    /// // Create route
    /// let route = Route::new(UriTemplate::new("/users/:id"), "users.show");
    /// assert_eq!(route.action().as_str(), "users.show");
    /// ```
    pub fn new<A>(template: UriTemplate, action: A) -> Self
    where
        A: Into<Action>,
    {
        Self {
            template,
            action: action.into(),
            constraints: Vec::new(),
            middleware: Vec::new(),
            name: None,
        }
    }

    /// Sets the route name.
    #[must_use]
    pub fn with_name<N>(mut self, name: N) -> Self
    where
        N: Into<String>,
    {
        self.name = Some(name.into());
        self
    }

    /// Adds a constraint to the route.
    #[must_use]
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Adds a middleware binding to the route.
    #[must_use]
    pub fn with_middleware(mut self, middleware: Middleware) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Returns the methods the route can be matched with.
    ///
    /// Method constraints are intersected, and each method is expanded into
    /// the methods it implies, e.g., `GET` implies `HEAD`. If the route has
    /// no method constraint, it can be matched with any method.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_routing::http::Method;
    /// use zensical_routing::route::{Constraint, Route};
    /// use zensical_routing::template::UriTemplate;
    ///
    /// // Create route with method constraint
    /// let route = Route::new(UriTemplate::new("/"), "home")
    ///     .with_constraint(Constraint::Methods([Method::Get].into()));
    ///
    /// // Obtain methods
    /// let methods = route.methods();
    /// assert!(methods.contains(&Method::Head));
    /// ```
    #[must_use]
    pub fn methods(&self) -> BTreeSet<Method> {
        let mut methods: BTreeSet<_> = Method::ALL.iter().copied().collect();
        for constraint in &self.constraints {
            if let Constraint::Methods(allowed) = constraint {
                let allowed: BTreeSet<_> = allowed
                    .iter()
                    .flat_map(Method::implied)
                    .copied()
                    .collect();
                methods.retain(|method| allowed.contains(method));
            }
        }
        methods
    }

    /// Returns the name of the route, or its template if it has none.
    pub(crate) fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.template.to_string(),
        }
    }
}

#[allow(clippy::must_use_candidate)]
impl Route {
    /// Returns the URI template.
    #[inline]
    pub fn template(&self) -> &UriTemplate {
        &self.template
    }

    /// Returns the action.
    #[inline]
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Returns the constraints.
    #[inline]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Returns the middleware bindings.
    #[inline]
    pub fn middleware(&self) -> &[Middleware] {
        &self.middleware
    }

    /// Returns the route name, if any.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

// ----------------------------------------------------------------------------

#[allow(clippy::must_use_candidate)]
impl Action {
    /// Returns the string representation.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ----------------------------------------------------------------------------

impl Middleware {
    /// Creates a middleware binding.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_routing::route::Middleware;
    ///
    /// // Create middleware binding with parameter
    /// let middleware = Middleware::new("auth").with("role", "admin");
    /// assert_eq!(middleware.parameter("role"), Some("admin"));
    /// ```
    pub fn new<N>(name: N) -> Self
    where
        N: Into<String>,
    {
        Self {
            name: name.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Adds a parameter to the middleware binding.
    #[must_use]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

#[allow(clippy::must_use_candidate)]
impl Middleware {
    /// Returns the middleware name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parameter with the given key.
    #[inline]
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    /// Returns all parameters.
    #[inline]
    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl From<&str> for Action {
    #[inline]
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Action {
    #[inline]
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_methods() {
        let test_cases = vec![
            (vec![], Method::ALL.to_vec()),
            (vec![vec![Method::Post]], vec![Method::Post]),
            (vec![vec![Method::Get]], vec![Method::Get, Method::Head]),
            (
                vec![vec![Method::Get, Method::Post], vec![Method::Post]],
                vec![Method::Post],
            ),
            (vec![vec![Method::Get], vec![Method::Put]], vec![]),
        ];
        for (constraints, expected) in test_cases {
            let route = constraints.iter().fold(
                Route::new(UriTemplate::new("/"), "home"),
                |route, methods| {
                    let methods = methods.iter().copied().collect();
                    route.with_constraint(Constraint::Methods(methods))
                },
            );
            let expected: BTreeSet<_> = expected.into_iter().collect();
            assert_eq!(route.methods(), expected, "Failed for: {constraints:?}");
        }
    }

    #[test]
    fn test_label() {
        let route = Route::new(UriTemplate::new("/users/:id"), "users.show");
        assert_eq!(route.label(), "/users/:id");
        assert_eq!(route.with_name("users").label(), "users");
    }
}
