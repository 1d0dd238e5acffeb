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

//! Compiler.
//!
//! Routes are compiled into one or more alternations of regular expressions
//! for each method, each alternative wrapped in a capturing group. For every
//! alternative, the compiler records the index of its capturing group and the
//! ordered variables of its route, which are captured by the groups directly
//! following it. This allows the matcher to determine the matched route from
//! the first participating alternative without relying on group names.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::http::Method;
use crate::route::{Constraint, Constraints, Route, RouteCollection, RouteConstraint};
use crate::rule::regex::inlinable;
use crate::rule::{self, Rule, Rules};
use crate::template::ast::{Node, Variable};

mod error;

pub use error::{Error, Result};

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Default character class of path variables.
const PATH_CLASS: &str = "[^/]+";

/// Default character class of host variables.
const HOST_CLASS: &str = "[^./]+";

/// Pattern matching any host, used for routes without host template.
const ANY_HOST: &str = "[^/]*";

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Compiler.
///
/// The compiler resolves rules and named constraints of routes through the
/// given registries, which is why compilation fails early for unknown rules
/// and constraints, as well as for malformed templates. Compilation is atomic,
/// so either all routes are compiled, or an error is returned.
#[derive(Debug, Default)]
pub struct Compiler {
    /// Rule registry.
    rules: Rules,
    /// Route constraint registry.
    constraints: Constraints,
    /// Compiler options.
    options: Options,
}

/// Compiler options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Maximum number of routes in a compiled group, at least 1.
    pub max_routes_per_group: usize,
}

/// Compiled group.
///
/// A compiled group is an alternation of the patterns of up to a configurable
/// number of routes, which are tried in registration order.
#[derive(Clone, Debug)]
pub struct CompiledGroup {
    /// Combined regular expression.
    regex: Regex,
    /// Alternatives in registration order.
    alternatives: Vec<Alternative>,
}

/// Alternative in a compiled group.
#[derive(Clone, Debug)]
pub struct Alternative {
    /// Index of the capturing group of the alternative.
    index: usize,
    /// Compiled route.
    target: Arc<Target>,
}

/// Compiled route.
///
/// Compiled routes are shared among the groups of all methods of a route, so
/// rules and constraints are only instantiated once.
#[derive(Debug)]
pub(crate) struct Target {
    /// Index of the route in the route collection.
    pub route: usize,
    /// Pattern without anchors.
    pub pattern: String,
    /// Anchored regular expression of the route alone.
    pub regex: Regex,
    /// Variables in template order.
    pub variables: Vec<Slot>,
    /// Named constraints.
    pub constraints: Vec<Arc<dyn RouteConstraint>>,
}

/// Compiled variable.
#[derive(Debug)]
pub(crate) struct Slot {
    /// Variable name.
    pub name: String,
    /// Default value, if any.
    pub default: Option<String>,
    /// Rules.
    pub rules: Vec<Box<dyn Rule>>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Compiler {
    /// Creates a compiler with the built-in rules and default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule registry.
    #[must_use]
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    /// Sets the route constraint registry.
    #[must_use]
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Sets the compiler options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Compiles the given routes into compiled groups for each method.
    ///
    /// Routes without method constraint are compiled for all methods. The
    /// compiled groups of each method are in registration order.
    ///
    /// # Errors
    ///
    /// This method returns an [`Error`], if a template is malformed, a rule
    /// or constraint is unknown, or a rule has invalid arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_routing::compiler::Compiler;
    /// use zensical_routing::http::Method;
    /// use zensical_routing::route::Builder;
    ///
    /// // Create route collection
    /// let mut builder = Builder::new();
    /// builder.map([Method::Get], "/users/:id(int)").to("users.show");
    /// let routes = builder.build();
    ///
    /// // Compile route collection
    /// let groups = Compiler::new().compile(&routes)?;
    /// assert!(groups.contains_key(&Method::Head));
    /// # Ok(())
    /// # }
    /// ```
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn compile(&self, routes: &RouteCollection) -> Result<Groups> {
        let mut methods: BTreeMap<Method, Vec<Arc<Target>>> = BTreeMap::new();
        for (index, route) in routes.iter().enumerate() {
            let target = Arc::new(self.compile_route(index, route)?);
            for method in route.methods() {
                methods.entry(method).or_default().push(Arc::clone(&target));
            }
        }

        // Split the routes of each method into chunks, and combine each chunk
        // into a single group, so patterns don't grow without bounds
        let size = self.options.max_routes_per_group.max(1);
        let mut groups = Groups::new();
        for (method, targets) in methods {
            let iter = targets.chunks(size).map(CompiledGroup::new);
            groups.insert(method, iter.collect::<Result<_>>()?);
        }

        // Log statistics
        #[cfg(feature = "tracing")]
        tracing::debug!(
            routes = routes.len(),
            methods = groups.len(),
            groups = groups.values().map(Vec::len).sum::<usize>(),
            "compiled routes"
        );
        Ok(groups)
    }

    /// Compiles a single route.
    fn compile_route(&self, index: usize, route: &Route) -> Result<Target> {
        let template = route.template();
        let root = template.parse().map_err(|source| Error::Template {
            template: template.to_string(),
            source,
        })?;

        // Hosts are compared case-insensitively, and routes without host
        // template match any host, as the subject always includes the host
        let mut pattern = String::new();
        if let Some(nodes) = root.host() {
            pattern.push_str("(?i:");
            write(&mut pattern, nodes, HOST_CLASS);
            pattern.push(')');
        } else {
            pattern.push_str(ANY_HOST);
        }
        write(&mut pattern, root.path(), PATH_CLASS);

        // Instantiate rules of variables
        let variables = root
            .variables()
            .into_iter()
            .map(|variable| self.compile_variable(route, variable))
            .collect::<Result<_>>()?;

        // Resolve named constraints
        let mut constraints = Vec::new();
        for constraint in route.constraints() {
            if let Constraint::Named(name) = constraint {
                let constraint = self.constraints.get(name).ok_or_else(|| {
                    Error::Constraint {
                        route: route.label(),
                        name: name.clone(),
                    }
                })?;
                constraints.push(constraint);
            }
        }

        // Return compiled route
        let regex = Regex::new(&format!("^{pattern}$"))?;
        Ok(Target {
            route: index,
            pattern,
            regex,
            variables,
            constraints,
        })
    }

    /// Compiles a single variable.
    fn compile_variable(
        &self, route: &Route, variable: &Variable,
    ) -> Result<Slot> {
        let rules = variable
            .rules()
            .map(|invocation| {
                self.rules.create(&invocation.slug, &invocation.args)
            })
            .collect::<rule::Result<_>>()
            .map_err(|source| Error::Rule { route: route.label(), source })?;

        // Return compiled variable
        Ok(Slot {
            name: variable.name.clone(),
            default: variable.default_value().map(ToString::to_string),
            rules,
        })
    }
}

// ----------------------------------------------------------------------------

impl CompiledGroup {
    /// Creates a compiled group from the given compiled routes.
    fn new(targets: &[Arc<Target>]) -> Result<Self> {
        let mut pattern = String::new();
        let mut alternatives = Vec::with_capacity(targets.len());

        // Each alternative occupies one capturing group for itself, followed
        // by one capturing group for each of its variables
        let mut index = 1;
        for target in targets {
            if !pattern.is_empty() {
                pattern.push('|');
            }
            pattern.push_str("(^");
            pattern.push_str(&target.pattern);
            pattern.push_str("$)");
            alternatives.push(Alternative {
                index,
                target: Arc::clone(target),
            });
            index += 1 + target.variables.len();
        }

        // Compile combined regular expression
        let regex = Regex::new(&pattern)?;
        Ok(Self { regex, alternatives })
    }

    /// Returns the combined regular expression.
    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}

#[allow(clippy::must_use_candidate)]
impl CompiledGroup {
    /// Returns the combined pattern.
    #[inline]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns the alternatives in registration order.
    #[inline]
    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }
}

// ----------------------------------------------------------------------------

impl Alternative {
    /// Returns the compiled route.
    pub(crate) fn target(&self) -> &Target {
        &self.target
    }

    /// Returns the names of the variables in template order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.target.variables.iter().map(|slot| slot.name.as_str())
    }
}

#[allow(clippy::must_use_candidate)]
impl Alternative {
    /// Returns the index of the capturing group of the alternative.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the index of the route in the route collection.
    #[inline]
    pub fn route(&self) -> usize {
        self.target.route
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Default for Options {
    /// Creates default compiler options.
    fn default() -> Self {
        Self { max_routes_per_group: 100 }
    }
}

impl PartialEq for CompiledGroup {
    /// Compares compiled groups by pattern and alternatives.
    fn eq(&self, other: &Self) -> bool {
        self.pattern() == other.pattern()
            && self.alternatives == other.alternatives
    }
}

impl PartialEq for Alternative {
    /// Compares alternatives by group index, route and variables.
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.target.route == other.target.route
            && self.target.pattern == other.target.pattern
            && self.variables().eq(other.variables())
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Writes the pattern for the given nodes.
fn write(pattern: &mut String, nodes: &[Node], class: &str) {
    for node in nodes {
        match node {
            Node::Root(children) | Node::Host(children) | Node::Path(children) => {
                write(pattern, children, class);
            }
            Node::Text(text) => pattern.push_str(&regex::escape(text)),
            Node::SegmentDelimiter(delimiter) => {
                let mut buffer = [0; 4];
                let delimiter = delimiter.encode_utf8(&mut buffer);
                pattern.push_str(&regex::escape(delimiter));
            }
            Node::Variable(variable) => {
                pattern.push('(');
                pattern.push_str(inline(variable).unwrap_or(class));
                pattern.push(')');
            }
            Node::OptionalPart(children) => {
                pattern.push_str("(?:");
                write(pattern, children, class);
                pattern.push_str(")?");
            }
            Node::Rule(_) => {}
        }
    }
}

/// Returns the pattern of the variable, if it can be inlined.
///
/// Patterns are only inlined if the variable carries exactly one regular
/// expression rule, next to any number of other rules. All rules are still
/// evaluated after matching.
fn inline(variable: &Variable) -> Option<&str> {
    let mut rules = variable
        .rules()
        .filter(|invocation| invocation.slug == rule::Regex::SLUG);
    match (rules.next(), rules.next()) {
        (Some(invocation), None) => {
            match invocation.args.as_slice() {
                [arg] => arg.as_str().filter(|pattern| inlinable(pattern)),
                _ => None,
            }
        }
        _ => None,
    }
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Compiled groups for each method.
pub type Groups = BTreeMap<Method, Vec<CompiledGroup>>;

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{Builder, Context};

    fn compile(paths: &[&str]) -> Result<Groups> {
        let mut builder = Builder::new();
        for path in paths {
            builder.map([Method::Post], *path).to(*path);
        }
        Compiler::new().compile(&builder.build())
    }

    #[test]
    fn test_pattern() {
        let test_cases = vec![
            ("/", r"(^[^/]*/$)"),
            ("/users/:id", r"(^[^/]*/users/([^/]+)$)"),
            ("/foo[/:bar]", r"(^[^/]*/foo(?:/([^/]+))?$)"),
            ("/v1.0/:id", r"(^[^/]*/v1\.0/([^/]+)$)"),
            (r#"/:id(regex("[0-9]+"))"#, r"(^[^/]*/([0-9]+)$)"),
            (r#"/:id(regex("([0-9]+)"))"#, r"(^[^/]*/([^/]+)$)"),
            ("/:id(int)", r"(^[^/]*/([^/]+)$)"),
            (r#"/:p(regex("[^?]+"))"#, r"(^[^/]*/([^?]+)$)"),
            (r#"/:p(regex(".+"), notIn(["x"]))"#, r"(^[^/]*/(.+)$)"),
            (r#"/:p(regex("a"), regex("b"))"#, r"(^[^/]*/([^/]+)$)"),
        ];
        for (path, expected) in test_cases {
            let groups = compile(&[path]).unwrap();
            let pattern = groups[&Method::Post][0].pattern();
            assert_eq!(pattern, expected, "Failed for: {path}");
        }
    }

    #[test]
    fn test_pattern_host() {
        let mut builder = Builder::new();
        builder.map([Method::Get], "/").host(":sub.example.com");
        let groups = Compiler::new().compile(&builder.build()).unwrap();
        assert_eq!(
            groups[&Method::Get][0].pattern(),
            r"(^(?i:([^./]+)\.example\.com)/$)"
        );
    }

    #[test]
    fn test_indices() {
        let groups = compile(&["/a/:x", "/b/:y/:z", "/c"]).unwrap();
        let group = &groups[&Method::Post][0];
        let indices: Vec<_> =
            group.alternatives().iter().map(Alternative::index).collect();
        assert_eq!(indices, [1, 3, 6]);
        assert_eq!(group.regex().captures_len(), 7);

        // Check variables of alternatives
        let variables: Vec<_> = group.alternatives()[1].variables().collect();
        assert_eq!(variables, ["y", "z"]);
    }

    #[test]
    fn test_methods() {
        let mut builder = Builder::new();
        builder.map([Method::Get], "/a");
        builder.map([] as [Method; 0], "/b");
        let groups = Compiler::new().compile(&builder.build()).unwrap();
        assert_eq!(groups.len(), Method::ALL.len());
        assert_eq!(groups[&Method::Get][0].alternatives().len(), 2);
        assert_eq!(groups[&Method::Head][0].alternatives().len(), 2);
        assert_eq!(groups[&Method::Post][0].alternatives().len(), 1);
    }

    #[test]
    fn test_chunks() {
        let mut builder = Builder::new();
        for n in 0..5 {
            builder.map([Method::Get], format!("/{n}/:id"));
        }
        let compiler = Compiler::new()
            .with_options(Options { max_routes_per_group: 2 });
        let groups = compiler.compile(&builder.build()).unwrap();
        let routes: Vec<Vec<_>> = groups[&Method::Get]
            .iter()
            .map(|group| {
                group.alternatives().iter().map(Alternative::route).collect()
            })
            .collect();
        assert_eq!(routes, vec![vec![0, 1], vec![2, 3], vec![4]]);
    }

    #[test]
    fn test_idempotence() {
        let paths = ["/a/:x(int)", "/b[/:y]", "/c"];
        assert_eq!(compile(&paths).unwrap(), compile(&paths).unwrap());
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            compile(&["/[:a"]),
            Err(Error::Template { .. })
        ));
        assert!(matches!(
            compile(&["/:a(unknown)"]),
            Err(Error::Rule { source: rule::Error::Unknown(_), .. })
        ));
        assert!(matches!(
            compile(&["/:a(between(3, 1))"]),
            Err(Error::Rule { source: rule::Error::InvalidArgument { .. }, .. })
        ));
    }

    #[test]
    fn test_constraints() {
        let mut builder = Builder::new();
        builder.map([Method::Get], "/").constraint(Constraint::Named("x".into()));
        let routes = builder.build();
        assert!(matches!(
            Compiler::new().compile(&routes),
            Err(Error::Constraint { .. })
        ));

        // Register constraint and compile again
        let constraints =
            Constraints::new().with("x", |_: &Context| true);
        let compiler = Compiler::new().with_constraints(constraints);
        assert!(compiler.compile(&routes).is_ok());
    }
}
