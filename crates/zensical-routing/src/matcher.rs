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

//! Matcher.

use regex::Captures;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::compiler::{Groups, Target};
use crate::http::Method;
use crate::route::{Context, Route, RouteCollection};
use crate::uri::encoding::decode;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Matcher.
///
/// The matcher resolves requests against the compiled groups of the method,
/// trying routes in registration order. The first route whose template
/// matches, whose variables pass all rules, and whose constraints are
/// satisfied wins. If a route is rejected by a rule or constraint, matching
/// continues with the routes following it.
#[derive(Debug)]
pub struct Matcher {
    /// Route collection.
    routes: Arc<RouteCollection>,
    /// Compiled groups for each method.
    groups: Groups,
}

/// Match result.
///
/// If no route was found, the allowed methods tell whether the request
/// matched a route under another method, which distinguishes a `405` from a
/// `404` response.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Match<'a> {
    /// Matched route, if any.
    route: Option<&'a Route>,
    /// Extracted variables.
    variables: BTreeMap<String, String>,
    /// Methods the request would have matched with.
    allowed_methods: Vec<Method>,
}

/// Request, after canonicalization.
#[derive(Clone, Copy, Debug)]
struct Request<'a> {
    /// Host.
    host: &'a str,
    /// Path.
    path: &'a str,
    /// Host followed by path.
    subject: &'a str,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Matcher {
    /// Creates a matcher from a route collection and its compiled groups.
    #[must_use]
    pub fn new(routes: Arc<RouteCollection>, groups: Groups) -> Self {
        Self { routes, groups }
    }

    /// Resolves a request.
    ///
    /// An empty path is treated as `/`. The path is matched as given first,
    /// and only if that fails, without its trailing slash, so templates that
    /// end in a slash stay reachable. The method is compared
    /// case-insensitively, and unknown methods never match, though they can
    /// still yield allowed methods.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use std::sync::Arc;
    /// use zensical_routing::compiler::Compiler;
    /// use zensical_routing::http::Method;
    /// use zensical_routing::matcher::Matcher;
    /// use zensical_routing::route::Builder;
    ///
    /// // Create and compile route collection
    /// let mut builder = Builder::new();
    /// builder.map([Method::Get], "/users/:id(int)").to("users.show");
    /// let routes = builder.build();
    /// let groups = Compiler::new().compile(&routes)?;
    ///
    /// // Create matcher and resolve request
    /// let matcher = Matcher::new(Arc::new(routes), groups);
    /// let result = matcher.resolve("GET", "example.com", "/users/42");
    /// assert_eq!(result.variables()["id"], "42");
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn resolve(&self, method: &str, host: &str, path: &str) -> Match<'_> {
        let paths = canonicalize(path);
        let subjects: Vec<_> =
            paths.iter().map(|path| format!("{host}{path}")).collect();
        let requests: Vec<_> = paths
            .iter()
            .zip(&subjects)
            .map(|(path, subject)| Request {
                host,
                path: path.as_str(),
                subject: subject.as_str(),
            })
            .collect();

        // Try to resolve the request with the requested method first
        let requested = method.parse::<Method>().ok();
        if let Some(method) = requested {
            let found = requests
                .iter()
                .find_map(|&request| self.find(method, request));
            if let Some(found) = found {
                return found;
            }
        }

        // Otherwise, collect all other methods that would have matched
        let allowed_methods = self
            .groups
            .keys()
            .copied()
            .filter(|&method| Some(method) != requested)
            .filter(|&method| {
                requests
                    .iter()
                    .any(|&request| self.find(method, request).is_some())
            })
            .collect();

        // Return non-match
        Match {
            route: None,
            variables: BTreeMap::new(),
            allowed_methods,
        }
    }

    /// Returns the route collection.
    #[inline]
    #[must_use]
    pub fn routes(&self) -> &RouteCollection {
        &self.routes
    }

    /// Returns the compiled groups.
    #[inline]
    #[must_use]
    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    /// Finds the first accepted route for the given method.
    fn find(&self, method: Method, request: Request) -> Option<Match<'_>> {
        for group in self.groups.get(&method)? {
            let Some(captures) = group.regex().captures(request.subject) else {
                continue;
            };

            // Determine the matched alternative from the first participating
            // capturing group, as the groups of all others don't participate
            let alternatives = group.alternatives();
            let Some(position) = alternatives
                .iter()
                .position(|alternative| captures.get(alternative.index()).is_some())
            else {
                continue;
            };

            // If the alternative is rejected, continue with the alternatives
            // following it, which need to be matched one by one, as the
            // combined expression only reports the leftmost alternative
            let alternative = &alternatives[position];
            let found = self.accept(
                method,
                request,
                alternative.target(),
                &captures,
                alternative.index(),
            );
            if found.is_some() {
                return found;
            }
            for alternative in &alternatives[position + 1..] {
                let target = alternative.target();
                let Some(captures) = target.regex.captures(request.subject) else {
                    continue;
                };
                let found = self.accept(method, request, target, &captures, 0);
                if found.is_some() {
                    return found;
                }
            }
        }
        None
    }

    /// Extracts variables, and evaluates rules and constraints.
    fn accept(
        &self, method: Method, request: Request, target: &Target,
        captures: &Captures, offset: usize,
    ) -> Option<Match<'_>> {
        let route = &self.routes[target.route];
        let mut variables = BTreeMap::new();
        for (n, slot) in target.variables.iter().enumerate() {
            let Some(value) = captures.get(offset + 1 + n) else {
                // Variables of optional parts that didn't participate in the
                // match are reported with their default value, if any
                if let Some(default) = &slot.default {
                    variables.insert(slot.name.clone(), default.clone());
                }
                continue;
            };

            // Reject the route if the value doesn't pass all rules
            let value = decode(value.as_str());
            if !slot.rules.iter().all(|rule| rule.passes(&value)) {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    route = %route.label(),
                    variable = %slot.name,
                    "rejected by rule"
                );
                return None;
            }
            variables.insert(slot.name.clone(), value.into_owned());
        }

        // Reject the route if a constraint is not satisfied
        let context = Context {
            method,
            host: request.host,
            path: request.path,
            variables: &variables,
            route,
        };
        let mut constraints = target.constraints.iter();
        if !constraints.all(|constraint| constraint.is_match(&context)) {
            #[cfg(feature = "tracing")]
            tracing::trace!(route = %route.label(), "rejected by constraint");
            return None;
        }

        // Return match
        Some(Match {
            route: Some(route),
            variables,
            allowed_methods: Vec::new(),
        })
    }
}

// ----------------------------------------------------------------------------

impl Match<'_> {
    /// Returns whether a route was found.
    #[inline]
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.route.is_some()
    }

    /// Consumes the match and returns the variables.
    #[inline]
    #[must_use]
    pub fn into_variables(self) -> BTreeMap<String, String> {
        self.variables
    }
}

#[allow(clippy::must_use_candidate)]
impl<'a> Match<'a> {
    /// Returns the matched route, if any.
    #[inline]
    pub fn route(&self) -> Option<&'a Route> {
        self.route
    }

    /// Returns the extracted variables.
    #[inline]
    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    /// Returns the methods the request would have matched with.
    #[inline]
    pub fn allowed_methods(&self) -> &[Method] {
        &self.allowed_methods
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Canonicalizes a request path, returning the candidates to match.
///
/// The first candidate is the path with a leading slash. If the path has a
/// trailing slash, the path without it follows as a second candidate.
fn canonicalize(path: &str) -> Vec<String> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.len() < path.len() {
        vec![format!("/{path}"), format!("/{trimmed}")]
    } else {
        vec![format!("/{path}")]
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{Compiler, Options};
    use crate::route::{Builder, Constraint, Constraints};

    fn matcher<F>(f: F) -> Matcher
    where
        F: FnOnce(&mut Builder),
    {
        let constraints = Constraints::new()
            .with("never", |_: &Context| false)
            .with("local", |context: &Context| context.host == "localhost");
        let compiler = Compiler::new()
            .with_constraints(constraints)
            .with_options(Options { max_routes_per_group: 2 });

        // Build and compile routes
        let mut builder = Builder::new();
        f(&mut builder);
        let routes = builder.build();
        let groups = compiler.compile(&routes).unwrap();
        Matcher::new(Arc::new(routes), groups)
    }

    fn action<'a>(result: &Match<'a>) -> Option<&'a str> {
        result.route().map(|route| route.action().as_str())
    }

    #[test]
    fn test_canonicalize() {
        let test_cases = vec![
            ("", vec!["/"]),
            ("/", vec!["/"]),
            ("/foo/", vec!["/foo/", "/foo"]),
            ("/foo", vec!["/foo"]),
            ("foo", vec!["/foo"]),
            ("foo//", vec!["/foo//", "/foo"]),
        ];
        for (path, expected) in test_cases {
            assert_eq!(canonicalize(path), expected, "Failed for: {path}");
        }
    }

    #[test]
    fn test_resolve() {
        let matcher = matcher(|builder| {
            builder.map([Method::Get], "/").to("home");
            builder.map([Method::Get], "/users/:id(int)").to("users.show");
            builder.map([Method::Get], "/users/:name").to("users.find");
            builder.map([Method::Get], "/blog[/:page=1]").to("blog");
        });
        let test_cases = vec![
            ("", Some("home"), vec![]),
            ("/users/42", Some("users.show"), vec![("id", "42")]),
            ("/users/42/", Some("users.show"), vec![("id", "42")]),
            ("/users/dave", Some("users.find"), vec![("name", "dave")]),
            ("/users/a%20b", Some("users.find"), vec![("name", "a b")]),
            ("/blog", Some("blog"), vec![("page", "1")]),
            ("/blog/3", Some("blog"), vec![("page", "3")]),
            ("/users", None, vec![]),
            ("/users/42/edit", None, vec![]),
        ];
        for (path, expected, variables) in test_cases {
            let result = matcher.resolve("GET", "example.com", path);
            assert_eq!(action(&result), expected, "Failed for: {path}");
            let variables: BTreeMap<_, _> = variables
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect();
            assert_eq!(result.variables(), &variables, "Failed for: {path}");
        }
    }

    #[test]
    fn test_resolve_trailing_slash() {
        let matcher = matcher(|builder| {
            builder.map([Method::Get], "/foo/[:bar]").to("foo");
            builder.map([Method::Get], "/baz").to("baz");
        });
        let test_cases = vec![
            ("/foo/", Some("foo")),
            ("/foo/1", Some("foo")),
            ("/foo/1/", Some("foo")),
            ("/foo", None),
            ("/baz", Some("baz")),
            ("/baz/", Some("baz")),
        ];
        for (path, expected) in test_cases {
            let result = matcher.resolve("GET", "example.com", path);
            assert_eq!(action(&result), expected, "Failed for: {path}");
        }
    }

    #[test]
    fn test_resolve_rejected() {
        let matcher = matcher(|builder| {
            builder.map([Method::Get], "/:id(alpha)").to("wrong");
            builder
                .map([Method::Get], "/bar12")
                .to("wrong")
                .constraint(Constraint::Named("never".into()));
            builder.map([Method::Get], "/:id(regex(\"bar[0-9]+\"))").to("right");
            builder.map([Method::Get], "/bar12").to("late");
        });
        let result = matcher.resolve("GET", "example.com", "/bar12");
        assert_eq!(action(&result), Some("right"));
        assert_eq!(result.variables()["id"], "bar12");
    }

    #[test]
    fn test_resolve_host() {
        let matcher = matcher(|builder| {
            builder.map([Method::Get], "/").host(":sub.example.com").to("sub");
            builder
                .map([Method::Get], "/")
                .to("local")
                .constraint(Constraint::Named("local".into()));
            builder.map([Method::Get], "/").to("any");
        });
        let test_cases = vec![
            ("api.example.com", "sub"),
            ("API.Example.com", "sub"),
            ("localhost", "local"),
            ("example.org", "any"),
        ];
        for (host, expected) in test_cases {
            let result = matcher.resolve("GET", host, "/");
            assert_eq!(action(&result), Some(expected), "Failed for: {host}");
        }
    }

    #[test]
    fn test_resolve_methods() {
        let matcher = matcher(|builder| {
            builder.map([Method::Get], "/a").to("a.show");
            builder.map([Method::Post], "/a").to("a.update");
            builder.map([Method::Post], "/b").to("b.update");
            builder.map([] as [Method; 0], "/c").to("c");
        });
        let test_cases = vec![
            ("GET", "/a", Some("a.show"), vec![]),
            ("head", "/a", Some("a.show"), vec![]),
            ("POST", "/a", Some("a.update"), vec![]),
            ("DELETE", "/a", None, vec![Method::Get, Method::Head, Method::Post]),
            ("GET", "/b", None, vec![Method::Post]),
            ("BREW", "/b", None, vec![Method::Post]),
            ("PATCH", "/c", Some("c"), vec![]),
            ("GET", "/d", None, vec![]),
        ];
        for (method, path, expected, allowed) in test_cases {
            let result = matcher.resolve(method, "example.com", path);
            assert_eq!(action(&result), expected, "Failed for: {method} {path}");
            assert_eq!(
                result.allowed_methods(),
                allowed.as_slice(),
                "Failed for: {method} {path}"
            );
        }
    }

    #[test]
    fn test_resolve_groups() {
        let matcher = matcher(|builder| {
            for n in 0..5 {
                builder.map([Method::Get], format!("/{n}/:id")).to(n.to_string());
            }
        });
        assert_eq!(matcher.groups()[&Method::Get].len(), 3);
        for n in 0..5 {
            let path = format!("/{n}/x");
            let result = matcher.resolve("GET", "example.com", &path);
            assert_eq!(
                action(&result),
                Some(n.to_string().as_str()),
                "Failed for: {path}"
            );
        }
    }
}
