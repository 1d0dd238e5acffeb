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

//! Router.

use std::sync::Arc;

use crate::cache::Cache;
use crate::compiler::{Compiler, Options};
use crate::matcher::{Match, Matcher};
use crate::route::{self, Constraints, RouteCollection};
use crate::rule::Rules;
use crate::uri::UriFactory;

mod error;

pub use error::{Error, Result};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Router.
///
/// Routers compile a route collection once, and then resolve requests and
/// create URIs from named routes. They're immutable after creation, so they
/// can be shared among threads.
///
/// # Examples
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use zensical_routing::http::Method;
/// use zensical_routing::route::Builder;
/// use zensical_routing::Router;
///
/// // Create route collection
/// let mut builder = Builder::new();
/// builder.map([Method::Get], "/users/:id(int)").to("users.show").name("user");
///
/// // Create router and resolve request
/// let router = Router::new(builder.build())?;
/// let result = router.resolve("GET", "example.com", "/users/42");
/// assert!(result.is_found());
///
/// // Create URI for named route
/// let uri = router.uri("user", [("id", 42)])?;
/// assert_eq!(uri, "/users/42");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Router {
    /// Matcher.
    matcher: Matcher,
    /// URI factory.
    factory: UriFactory,
}

/// Router builder.
#[derive(Debug, Default)]
pub struct Builder {
    /// Compiler.
    compiler: Compiler,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Router {
    /// Creates a router with the built-in rules and default options.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Compiler`], if compilation fails.
    pub fn new(routes: RouteCollection) -> Result<Self> {
        Self::builder().build(routes)
    }

    /// Creates a router builder.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_routing::compiler::Options;
    /// use zensical_routing::route::{Constraints, Context, RouteCollection};
    /// use zensical_routing::Router;
    ///
    /// // Create route constraint registry
    /// let constraints = Constraints::new()
    ///     .with("local", |context: &Context| context.host == "localhost");
    ///
    /// // Create router
    /// let router = Router::builder()
    ///     .with_constraints(constraints)
    ///     .with_options(Options { max_routes_per_group: 50 })
    ///     .build(RouteCollection::new())?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Resolves a request.
    ///
    /// This is a shortcut for [`Matcher::resolve`].
    #[inline]
    #[must_use]
    pub fn resolve(&self, method: &str, host: &str, path: &str) -> Match<'_> {
        self.matcher.resolve(method, host, path)
    }

    /// Creates a URI for the route with the given name.
    ///
    /// This is a shortcut for [`UriFactory::create`].
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Uri`], if the URI can't be created.
    pub fn uri<I, K, V>(&self, name: &str, variables: I) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        self.factory.create(name, variables).map_err(Into::into)
    }

    /// Returns the route collection.
    #[inline]
    #[must_use]
    pub fn routes(&self) -> &RouteCollection {
        self.matcher.routes()
    }
}

// ----------------------------------------------------------------------------

impl Builder {
    /// Sets the rule registry.
    #[must_use]
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.compiler = self.compiler.with_rules(rules);
        self
    }

    /// Sets the route constraint registry.
    #[must_use]
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.compiler = self.compiler.with_constraints(constraints);
        self
    }

    /// Sets the compiler options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.compiler = self.compiler.with_options(options);
        self
    }

    /// Builds the router from the given route collection.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Compiler`], if compilation fails.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn build(self, routes: RouteCollection) -> Result<Router> {
        let groups = self.compiler.compile(&routes)?;
        let routes = Arc::new(routes);
        Ok(Router {
            matcher: Matcher::new(Arc::clone(&routes), groups),
            factory: UriFactory::new(routes),
        })
    }

    /// Builds the router from the cache, or registers routes on a miss.
    ///
    /// The cache is read once, and if it doesn't contain a route collection,
    /// routes are registered with the given function and written back. Cache
    /// errors never prevent the router from being built, and are treated as
    /// misses, as the cache is only an optimization.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Compiler`], if compilation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_routing::cache::FileCache;
    /// use zensical_routing::http::Method;
    /// use zensical_routing::Router;
    ///
    /// // Create cache in a scratch directory
    /// let dir = tempfile::tempdir()?;
    /// let cache = FileCache::new(dir.path().join("routes.json"));
    ///
    /// // Create router from cache, or register routes
    /// let router = Router::builder().load(&cache, |builder| {
    ///     builder.map([Method::Get], "/").to("home");
    /// })?;
    /// assert_eq!(router.routes().len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn load<C, F>(self, cache: &C, f: F) -> Result<Router>
    where
        C: Cache,
        F: FnOnce(&mut route::Builder),
    {
        let routes = match cache.get() {
            Ok(Some(routes)) => routes,
            Ok(None) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("route cache miss");
                register(cache, f)
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(%err, "route cache unreadable");
                register(cache, f)
            }
        };
        self.build(routes)
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Registers routes, and writes them to the cache.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn register<C, F>(cache: &C, f: F) -> RouteCollection
where
    C: Cache,
    F: FnOnce(&mut route::Builder),
{
    let mut builder = route::Builder::new();
    f(&mut builder);

    // Write routes to the cache, which is allowed to fail
    let routes = builder.build();
    if let Err(err) = cache.set(&routes) {
        #[cfg(feature = "tracing")]
        tracing::warn!(%err, "route cache not writable");
    }
    routes
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::cache::{self, FileCache};
    use crate::http::Method;

    /// Cache that always fails.
    struct BrokenCache;

    impl Cache for BrokenCache {
        fn get(&self) -> cache::Result<Option<RouteCollection>> {
            Err(std::io::Error::other("broken").into())
        }

        fn set(&self, _: &RouteCollection) -> cache::Result {
            Err(std::io::Error::other("broken").into())
        }

        fn has(&self) -> bool {
            false
        }

        fn flush(&self) -> cache::Result {
            Ok(())
        }
    }

    #[test]
    fn test_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("routes.json"));
        let calls = Cell::new(0);
        let register = |builder: &mut route::Builder| {
            calls.set(calls.get() + 1);
            builder.map([Method::Get], "/:id").to("show").name("show");
        };

        // Load twice, which must register routes only once
        let router = Router::builder().load(&cache, register).unwrap();
        assert_eq!(router.uri("show", [("id", 1)]).unwrap(), "/1");
        let router = Router::builder().load(&cache, register).unwrap();
        assert!(router.resolve("GET", "", "/1").is_found());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_load_broken() {
        let router = Router::builder()
            .load(&BrokenCache, |builder| {
                builder.map([Method::Get], "/").to("home");
            })
            .unwrap();
        assert!(router.resolve("GET", "example.com", "/").is_found());
    }

    #[test]
    fn test_errors() {
        let mut builder = route::Builder::new();
        builder.map([Method::Get], "/:id(unknown)").name("show");
        assert!(matches!(
            Router::new(builder.build()),
            Err(Error::Compiler(_))
        ));
        let router = Router::new(RouteCollection::new()).unwrap();
        assert!(matches!(
            router.uri("show", [("id", 1)]),
            Err(Error::Uri(_))
        ));
    }
}
