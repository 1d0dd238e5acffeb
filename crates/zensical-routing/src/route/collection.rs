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

//! Route collection.

use ahash::HashMap;
use serde::{Deserialize, Serialize};
use std::ops::Index;
use std::slice::Iter;

use super::Route;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Route collection.
///
/// Routes are kept in registration order, which is the order in which they
/// are tried when matching. Named routes are additionally indexed by name,
/// and if more than one route claims a name, the last one is retrievable.
/// Collections are serialized as a list of routes, and the index is rebuilt
/// after deserialization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Route>", into = "Vec<Route>")]
pub struct RouteCollection {
    /// Routes in registration order.
    routes: Vec<Route>,
    /// Map names to route indices.
    names: HashMap<String, usize>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl RouteCollection {
    /// Creates an empty route collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route to the collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_routing::route::{Route, RouteCollection};
    /// use zensical_routing::template::UriTemplate;
    ///
    /// // Create route collection and add route
    /// let mut routes = RouteCollection::new();
    /// routes.add(Route::new(UriTemplate::new("/"), "home").with_name("home"));
    /// assert!(routes.get("home").is_some());
    /// ```
    pub fn add(&mut self, route: Route) {
        if let Some(name) = route.name() {
            self.names.insert(name.to_string(), self.routes.len());
        }
        self.routes.push(route);
    }

    /// Returns the route with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.index_of(name).map(|index| &self.routes[index])
    }

    /// Returns the index of the route with the given name.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    /// Returns an iterator over the routes in registration order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, Route> {
        self.routes.iter()
    }
}

#[allow(clippy::must_use_candidate)]
impl RouteCollection {
    /// Returns the number of routes.
    #[inline]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns whether there are any routes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Index<usize> for RouteCollection {
    type Output = Route;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.routes[index]
    }
}

impl From<Vec<Route>> for RouteCollection {
    /// Creates a route collection from routes in registration order.
    fn from(routes: Vec<Route>) -> Self {
        routes.into_iter().collect()
    }
}

impl From<RouteCollection> for Vec<Route> {
    #[inline]
    fn from(collection: RouteCollection) -> Self {
        collection.routes
    }
}

impl FromIterator<Route> for RouteCollection {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Route>,
    {
        let mut collection = Self::new();
        for route in iter {
            collection.add(route);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a RouteCollection {
    type Item = &'a Route;
    type IntoIter = Iter<'a, Route>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::UriTemplate;

    fn route(path: &str, action: &str, name: Option<&str>) -> Route {
        let route = Route::new(UriTemplate::new(path), action);
        match name {
            Some(name) => route.with_name(name),
            None => route,
        }
    }

    #[test]
    fn test_get() {
        let routes = RouteCollection::from(vec![
            route("/a", "first", Some("a")),
            route("/b", "second", None),
            route("/c", "third", Some("a")),
        ]);
        assert_eq!(routes.len(), 3);
        assert_eq!(routes.index_of("a"), Some(2));
        assert_eq!(routes.get("a").map(|r| r.action().as_str()), Some("third"));
        assert!(routes.get("b").is_none());
    }

    #[test]
    fn test_serde() {
        let routes = RouteCollection::from(vec![
            route("/users/:id", "users.show", Some("user")),
            route("/", "home", None),
        ]);
        let json = serde_json::to_string(&routes).unwrap();
        let restored: RouteCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, routes);
        assert_eq!(restored.index_of("user"), Some(0));
    }
}
