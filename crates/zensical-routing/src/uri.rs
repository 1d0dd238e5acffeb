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

//! URI factory.

use ahash::HashMap;
use std::mem;
use std::sync::{Arc, OnceLock};

use crate::route::RouteCollection;
use crate::template::Node;

pub(crate) mod encoding;
mod error;

pub use error::{Error, Result};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// URI factory.
///
/// The URI factory creates URIs from named routes by walking the trees of
/// their templates, which are parsed on first use and kept for the lifetime
/// of the factory. Optional parts are only included if all variables inside
/// of them are given, and omitted entirely otherwise.
#[derive(Debug)]
pub struct UriFactory {
    /// Route collection.
    routes: Arc<RouteCollection>,
    /// Parsed templates, indexed like routes.
    trees: Vec<OnceLock<Node>>,
}

/// Renderer for a single URI.
struct Renderer<'a> {
    /// Route name.
    route: &'a str,
    /// Variables not yet consumed.
    variables: HashMap<String, String>,
    /// Whether values are percent-encoded.
    encode: bool,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl UriFactory {
    /// Creates a URI factory.
    #[must_use]
    pub fn new(routes: Arc<RouteCollection>) -> Self {
        let trees = routes.iter().map(|_| OnceLock::new()).collect();
        Self { routes, trees }
    }

    /// Creates a URI for the route with the given name.
    ///
    /// Values are percent-encoded when they're part of the path. If the route
    /// has a host template, the URI is absolute, using `https` if the route
    /// requires it, and `http` otherwise. Required variables that are not
    /// given fall back to their default value, if any.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::NotFound`], if no route has the name, and
    /// [`Error::MissingVariable`], if a required variable is not given.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use std::sync::Arc;
    /// use zensical_routing::http::Method;
    /// use zensical_routing::route::Builder;
    /// use zensical_routing::uri::UriFactory;
    ///
    /// // Create route collection
    /// let mut builder = Builder::new();
    /// builder.map([Method::Get], "/users/:id[/:tab]").name("user");
    /// let routes = builder.build();
    ///
    /// // Create URI factory and URI
    /// let factory = UriFactory::new(Arc::new(routes));
    /// let uri = factory.create("user", [("id", 42)])?;
    /// assert_eq!(uri, "/users/42");
    /// # Ok(())
    /// # }
    /// ```
    pub fn create<I, K, V>(&self, name: &str, variables: I) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        let index = self
            .routes
            .index_of(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        let root = self.tree(name, index)?;

        // Render host first, which consumes its variables, then the path
        let mut renderer = Renderer {
            route: name,
            variables: variables
                .into_iter()
                .map(|(key, value)| (key.into(), value.to_string()))
                .collect(),
            encode: false,
        };
        let host = match root.host() {
            Some(nodes) => renderer.render_all(nodes)?,
            None => String::new(),
        };
        renderer.encode = true;
        let mut path = renderer.render_all(root.path())?;

        // Collapse duplicate leading slashes
        while path.starts_with("//") {
            path.remove(0);
        }

        // Prefix non-empty hosts with the scheme, and omit a lone slash
        if host.is_empty() {
            if path.is_empty() {
                path.push('/');
            }
            Ok(path)
        } else {
            let template = self.routes[index].template();
            let scheme = if template.is_https_only() { "https" } else { "http" };
            if path == "/" {
                path.clear();
            }
            Ok(format!("{scheme}://{host}{path}"))
        }
    }

    /// Returns the parsed template of the route at the given index.
    fn tree(&self, name: &str, index: usize) -> Result<&Node> {
        let cell = &self.trees[index];
        if let Some(tree) = cell.get() {
            return Ok(tree);
        }

        // Parse template outside of the cell, as parsing is fallible
        let tree = self.routes[index].template().parse().map_err(|source| {
            Error::Template { route: name.to_string(), source }
        })?;
        Ok(cell.get_or_init(|| tree))
    }
}

// ----------------------------------------------------------------------------

impl Renderer<'_> {
    /// Renders the given nodes, flushing pending delimiters at the end.
    fn render_all(&mut self, nodes: &[Node]) -> Result<String> {
        let mut output = String::new();
        let mut pending = String::new();
        self.render(nodes, &mut output, &mut pending, 0)?;
        output.push_str(&pending);
        Ok(output)
    }

    /// Renders the given nodes at the given optional part depth.
    ///
    /// Delimiters inside of optional parts are kept pending until text or a
    /// value follows them. Returns `false`, if a variable inside an optional
    /// part is not given, in which case the enclosing optional part must be
    /// omitted.
    fn render(
        &mut self, nodes: &[Node], output: &mut String, pending: &mut String,
        depth: usize,
    ) -> Result<bool> {
        for node in nodes {
            match node {
                Node::Root(children)
                | Node::Host(children)
                | Node::Path(children) => {
                    if !self.render(children, output, pending, depth)? {
                        return Ok(false);
                    }
                }
                Node::Text(text) => {
                    output.push_str(&mem::take(pending));
                    output.push_str(text);
                }
                Node::SegmentDelimiter(delimiter) => {
                    if depth > 0 {
                        pending.push(*delimiter);
                    } else {
                        output.push_str(&mem::take(pending));
                        output.push(*delimiter);
                    }
                }
                Node::Variable(variable) => {
                    let value = match self.variables.remove(&variable.name) {
                        Some(value) => value,
                        None if depth > 0 => return Ok(false),
                        None => match variable.default_value() {
                            Some(value) => value.to_string(),
                            None => {
                                return Err(Error::MissingVariable {
                                    route: self.route.to_string(),
                                    variable: variable.name.clone(),
                                });
                            }
                        },
                    };
                    output.push_str(&mem::take(pending));
                    if self.encode {
                        output.push_str(&encoding::encode(&value));
                    } else {
                        output.push_str(&value);
                    }
                }
                Node::OptionalPart(children) => {
                    let snapshot = self.variables.clone();
                    let mut buffer = String::new();
                    let mut trailing = String::new();
                    let complete =
                        self.render(children, &mut buffer, &mut trailing, depth + 1)?;

                    // Include the optional part only if it's complete and not
                    // empty, and restore consumed variables otherwise
                    if !complete {
                        self.variables = snapshot;
                    } else if !buffer.is_empty() {
                        output.push_str(&mem::take(pending));
                        output.push_str(&buffer);
                        pending.push_str(&trailing);
                    }
                }
                Node::Rule(_) => {}
            }
        }
        Ok(true)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;
    use crate::route::Builder;

    fn factory<F>(f: F) -> UriFactory
    where
        F: FnOnce(&mut Builder),
    {
        let mut builder = Builder::new();
        f(&mut builder);
        UriFactory::new(Arc::new(builder.build()))
    }

    #[test]
    fn test_create() {
        let factory = factory(|builder| {
            builder.map([Method::Get], "/").name("home");
            builder.map([Method::Get], "/users/:id").name("user");
            builder.map([Method::Get], "foo[/:bar[/:baz]]").name("foo");
            builder.map([Method::Get], "/blog[/:page=1]").name("blog");
            builder.map([Method::Get], "/posts/:page=1").name("posts");
            builder.map([Method::Get], "/files/:path").name("file");
        });
        let test_cases = vec![
            ("home", vec![], "/"),
            ("user", vec![("id", "42")], "/users/42"),
            ("user", vec![("id", "42"), ("tab", "x")], "/users/42"),
            ("foo", vec![], "/foo"),
            ("foo", vec![("baz", "1")], "/foo"),
            ("foo", vec![("bar", "1")], "/foo/1"),
            ("foo", vec![("bar", "1"), ("baz", "2")], "/foo/1/2"),
            ("blog", vec![], "/blog"),
            ("blog", vec![("page", "2")], "/blog/2"),
            ("posts", vec![], "/posts/1"),
            ("file", vec![("path", "a b/c")], "/files/a%20b%2Fc"),
        ];
        for (name, variables, expected) in test_cases {
            let uri = factory.create(name, variables.clone()).unwrap();
            assert_eq!(uri, expected, "Failed for: {name} {variables:?}");
        }
    }

    #[test]
    fn test_create_host() {
        let factory = factory(|builder| {
            builder
                .map([Method::Get], "")
                .host(":foo.:bar.example.com")
                .https(true)
                .name("secure");
            builder
                .map([Method::Get], "/docs")
                .host("[:lang.]example.com")
                .name("docs");
        });
        let test_cases = vec![
            (
                "secure",
                vec![("foo", "dave"), ("bar", "young")],
                "https://dave.young.example.com",
            ),
            ("docs", vec![], "http://example.com/docs"),
            ("docs", vec![("lang", "de")], "http://de.example.com/docs"),
        ];
        for (name, variables, expected) in test_cases {
            let uri = factory.create(name, variables.clone()).unwrap();
            assert_eq!(uri, expected, "Failed for: {name} {variables:?}");
        }
    }

    #[test]
    fn test_create_numbers() {
        let factory = factory(|builder| {
            builder.map([Method::Get], "/:a/:b").name("numbers");
        });
        let uri = factory.create("numbers", [("a", 1.5), ("b", 2.0)]).unwrap();
        assert_eq!(uri, "/1.5/2");
    }

    #[test]
    fn test_create_errors() {
        let factory = factory(|builder| {
            builder.map([Method::Get], "/:foo").name("foo");
            builder.map([Method::Get], "/[:foo").name("broken");
        });
        let err = factory.create("foo", [("bar", "1")]).unwrap_err();
        assert!(matches!(err, Error::MissingVariable { .. }));
        assert!(err.to_string().contains("foo"));
        assert!(matches!(
            factory.create("bar", [("foo", "1")]),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            factory.create("broken", [("foo", "1")]),
            Err(Error::Template { .. })
        ));
    }

    #[test]
    fn test_tree_cached() {
        let factory = factory(|builder| {
            builder.map([Method::Get], "/:id").name("id");
        });
        assert!(factory.trees[0].get().is_none());
        factory.create("id", [("id", 1)]).unwrap();
        assert!(factory.trees[0].get().is_some());
        assert_eq!(factory.create("id", [("id", 2)]).unwrap(), "/2");
    }
}
