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

//! Route builder.

use std::collections::BTreeSet;

use crate::http::Method;
use crate::template::UriTemplate;

use super::{Action, Constraint, Middleware, Route, RouteCollection};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Route builder.
///
/// Routes are registered with [`Builder::map`], optionally inside of nested
/// groups created with [`Builder::group`], which share a common path prefix,
/// host, HTTPS requirement, constraints and middleware bindings. Groups are
/// applied when building, so routes can be refined after mapping them.
///
/// # Examples
///
/// ```
/// use zensical_routing::http::Method;
/// use zensical_routing::route::{Builder, Group};
///
/// // Create builder and map routes
/// let mut builder = Builder::new();
/// builder.map([Method::Get], "/").to("home");
/// builder.group(Group::new().with_path("/users"), |builder| {
///     builder.map([Method::Get], "/:id").to("users.show").name("user");
/// });
///
/// // Build route collection
/// let routes = builder.build();
/// assert_eq!(routes.get("user").unwrap().template().path(), "/users/:id");
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    /// Routes in registration order.
    routes: Vec<RouteBuilder>,
    /// Current group.
    scope: Group,
}

/// Builder for a single route.
#[derive(Debug)]
pub struct RouteBuilder {
    /// Enclosing group at the time of mapping.
    scope: Group,
    /// Route-level options.
    options: Group,
    /// Allowed methods.
    methods: BTreeSet<Method>,
    /// Action.
    action: Action,
    /// Route name, optional.
    name: Option<String>,
}

/// Group options.
///
/// Groups are joined from the outside in: paths are joined with a single `/`,
/// and hosts are joined with a `.`, the inner host preceding the outer host.
/// HTTPS is required if any group requires it, and constraints as well as
/// middleware bindings are concatenated, outer groups first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Group {
    /// Path prefix, optional.
    path: Option<String>,
    /// Host, optional.
    host: Option<String>,
    /// Whether HTTPS is required.
    https: bool,
    /// Constraints.
    constraints: Vec<Constraint>,
    /// Middleware bindings.
    middleware: Vec<Middleware>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Builder {
    /// Creates a route builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps the given methods and path template to a route.
    ///
    /// If no methods are given, the route can be matched with any method.
    pub fn map<M, P>(&mut self, methods: M, path: P) -> &mut RouteBuilder
    where
        M: IntoIterator<Item = Method>,
        P: Into<String>,
    {
        let options = Group::new().with_path(path);
        self.routes.push(RouteBuilder {
            scope: self.scope.clone(),
            options,
            methods: methods.into_iter().collect(),
            action: Action::default(),
            name: None,
        });

        // Return the route that was just added for refinement
        let index = self.routes.len() - 1;
        &mut self.routes[index]
    }

    /// Registers routes inside a group.
    ///
    /// The group is joined with the enclosing group, if any, and applies to
    /// all routes that are mapped inside the given function.
    pub fn group<F>(&mut self, group: Group, f: F)
    where
        F: FnOnce(&mut Builder),
    {
        let scope = self.scope.join(&group);
        let previous = std::mem::replace(&mut self.scope, scope);
        f(self);
        self.scope = previous;
    }

    /// Builds the route collection.
    #[must_use]
    pub fn build(self) -> RouteCollection {
        self.routes.into_iter().map(RouteBuilder::build).collect()
    }
}

// ----------------------------------------------------------------------------

impl RouteBuilder {
    /// Sets the action.
    pub fn to<A>(&mut self, action: A) -> &mut Self
    where
        A: Into<Action>,
    {
        self.action = action.into();
        self
    }

    /// Sets the route name.
    pub fn name<N>(&mut self, name: N) -> &mut Self
    where
        N: Into<String>,
    {
        self.name = Some(name.into());
        self
    }

    /// Sets the host template.
    pub fn host<H>(&mut self, host: H) -> &mut Self
    where
        H: Into<String>,
    {
        self.options.host = Some(host.into());
        self
    }

    /// Sets whether the route requires HTTPS.
    pub fn https(&mut self, https: bool) -> &mut Self {
        self.options.https = https;
        self
    }

    /// Adds a constraint.
    pub fn constraint(&mut self, constraint: Constraint) -> &mut Self {
        self.options.constraints.push(constraint);
        self
    }

    /// Adds a middleware binding.
    pub fn middleware(&mut self, middleware: Middleware) -> &mut Self {
        self.options.middleware.push(middleware);
        self
    }

    /// Builds the route by joining it with its enclosing group.
    fn build(self) -> Route {
        let mut options = Group::new();
        if !self.methods.is_empty() {
            options.constraints.push(Constraint::Methods(self.methods));
        }
        let group = self.scope.join(&options).join(&self.options);

        // Create template from the joined group
        let mut template = UriTemplate::new(group.path.unwrap_or_default());
        if let Some(host) = group.host {
            template = template.with_host(host);
        }

        // Create route from template and joined options
        let mut route = Route::new(template.with_https(group.https), self.action);
        route.constraints = group.constraints;
        route.middleware = group.middleware;
        route.name = self.name;
        route
    }
}

// ----------------------------------------------------------------------------

impl Group {
    /// Creates empty group options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path prefix.
    #[must_use]
    pub fn with_path<P>(mut self, path: P) -> Self
    where
        P: Into<String>,
    {
        self.path = Some(path.into());
        self
    }

    /// Sets the host.
    #[must_use]
    pub fn with_host<H>(mut self, host: H) -> Self
    where
        H: Into<String>,
    {
        self.host = Some(host.into());
        self
    }

    /// Sets whether HTTPS is required.
    #[must_use]
    pub fn with_https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    /// Adds a constraint.
    #[must_use]
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Adds a middleware binding.
    #[must_use]
    pub fn with_middleware(mut self, middleware: Middleware) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Joins the group with an inner group.
    #[must_use]
    fn join(&self, inner: &Group) -> Self {
        let path = match (self.path.as_deref(), inner.path.as_deref()) {
            (Some(head), Some(tail)) => Some(join_path(head, tail)),
            (head, tail) => tail.or(head).map(ToString::to_string),
        };
        let host = match (self.host.as_deref(), inner.host.as_deref()) {
            (Some(tail), Some(head)) => Some(join_host(head, tail)),
            (tail, head) => head.or(tail).map(ToString::to_string),
        };

        // Concatenate constraints and middleware, outer ones first
        let constraints = self.constraints.iter().chain(&inner.constraints);
        let middleware = self.middleware.iter().chain(&inner.middleware);
        Group {
            path,
            host,
            https: self.https || inner.https,
            constraints: constraints.cloned().collect(),
            middleware: middleware.cloned().collect(),
        }
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Joins two paths with a single slash.
fn join_path(head: &str, tail: &str) -> String {
    let head = head.trim_end_matches('/');
    let tail = tail.trim_start_matches('/');
    format!("{head}/{tail}")
}

/// Joins two hosts with a dot, unless one of them already provides it.
fn join_host(head: &str, tail: &str) -> String {
    if head.is_empty() || tail.is_empty() {
        format!("{head}{tail}")
    } else if head.ends_with('.') || tail.starts_with('.') {
        format!("{head}{tail}")
    } else {
        format!("{head}.{tail}")
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        let test_cases = vec![
            ("/a", "b", "/a/b"),
            ("/a/", "/b", "/a/b"),
            ("/a", "/", "/a/"),
            ("", "b", "/b"),
        ];
        for (head, tail, expected) in test_cases {
            assert_eq!(
                join_path(head, tail),
                expected,
                "Failed for: {head} + {tail}"
            );
        }
    }

    #[test]
    fn test_join_host() {
        let test_cases = vec![
            ("api", "example.com", "api.example.com"),
            ("api.", "example.com", "api.example.com"),
            ("api", ".example.com", "api.example.com"),
            ("", "example.com", "example.com"),
        ];
        for (head, tail, expected) in test_cases {
            assert_eq!(
                join_host(head, tail),
                expected,
                "Failed for: {head} + {tail}"
            );
        }
    }

    #[test]
    fn test_group() {
        let mut builder = Builder::new();
        let outer = Group::new()
            .with_path("/admin/")
            .with_host("example.com")
            .with_constraint(Constraint::Named("outer".into()))
            .with_middleware(Middleware::new("auth"));
        builder.group(outer, |builder| {
            let inner = Group::new()
                .with_path("/users")
                .with_host(":tenant")
                .with_https(true)
                .with_constraint(Constraint::Named("inner".into()));
            builder.group(inner, |builder| {
                builder
                    .map([Method::Post], "/:id")
                    .to("users.update")
                    .constraint(Constraint::Named("route".into()))
                    .middleware(Middleware::new("log"));
            });
        });
        builder.map([] as [Method; 0], "/").to("home");

        // Check composed route
        let routes = builder.build();
        let route = &routes[0];
        assert_eq!(route.template().path(), "/admin/users/:id");
        assert_eq!(route.template().host(), Some(":tenant.example.com"));
        assert!(route.template().is_https_only());
        assert_eq!(
            route.constraints(),
            &[
                Constraint::Named("outer".into()),
                Constraint::Named("inner".into()),
                Constraint::Methods([Method::Post].into()),
                Constraint::Named("route".into()),
            ]
        );
        let names: Vec<_> = route.middleware().iter().map(Middleware::name).collect();
        assert_eq!(names, ["auth", "log"]);

        // Check that the group does not leak
        let route = &routes[1];
        assert_eq!(route.template().path(), "/");
        assert_eq!(route.template().host(), None);
        assert!(route.constraints().is_empty());
    }
}
