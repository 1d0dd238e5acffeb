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

//! Integration tests for resolving requests and creating URIs.

use std::collections::BTreeMap;

use zensical_routing::cache::{Cache, FileCache};
use zensical_routing::compiler::{Compiler, Options};
use zensical_routing::http::Method;
use zensical_routing::route::{Builder, Constraint, Constraints, Context, Group};
use zensical_routing::rule::{Alpha, Between, Rule, UuidV4};
use zensical_routing::uri;
use zensical_routing::Router;

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Registers the routes of a small application.
fn register(builder: &mut Builder) {
    builder.map([Method::Get], "/").to("home").name("home");
    builder.group(Group::new().with_path("/users"), |builder| {
        builder.map([Method::Get], "").to("users.list").name("users");
        builder
            .map([Method::Get], "/:id(int)[/:tab(notIn([\"edit\"]))]")
            .to("users.show")
            .name("user");
        builder.map([Method::Post], "/:id(int)").to("users.update");
    });
    builder.group(Group::new().with_host("example.com").with_https(true), |builder| {
        builder.map([Method::Get], "/docs[/:lang=en]").to("docs").name("docs");
        builder
            .map([Method::Get], "/posts/:date(date(\"%Y-%m-%d\"))/:slug")
            .host(":blog")
            .to("posts.show")
            .name("post");
    });
    builder
        .map([Method::Get], "/files/:uuid(uuidv4)")
        .to("files.show")
        .name("file");
}

/// Creates a router for the routes of a small application.
fn router() -> Router {
    let mut builder = Builder::new();
    register(&mut builder);
    Router::builder()
        .with_options(Options { max_routes_per_group: 3 })
        .build(builder.build())
        .unwrap()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[test]
fn compiles_idempotently() {
    let mut builder = Builder::new();
    register(&mut builder);
    let routes = builder.build();
    let compiler = Compiler::new();
    assert_eq!(
        compiler.compile(&routes).unwrap(),
        compiler.compile(&routes).unwrap()
    );
}

#[test]
fn roundtrips_uris() {
    let router = router();
    let test_cases = vec![
        ("home", "", vec![]),
        ("users", "", vec![]),
        ("user", "", vec![("id", "42")]),
        ("user", "", vec![("id", "42"), ("tab", "posts")]),
        ("docs", "example.com", vec![("lang", "de")]),
        (
            "post",
            "blog.example.com",
            vec![("blog", "blog"), ("date", "2025-04-01"), ("slug", "a b")],
        ),
        ("file", "", vec![("uuid", "f47ac10b-58cc-4372-a567-0e02b2c3d479")]),
    ];
    for (name, host, variables) in test_cases {
        let uri = router.uri(name, variables.clone()).unwrap();

        // Split absolute URIs into host and path
        let path = match uri.split_once("://") {
            Some((_, rest)) => {
                let index = rest.find('/').unwrap_or(rest.len());
                assert_eq!(&rest[..index], host, "Failed for: {name}");
                rest[index..].to_string()
            }
            None => uri.clone(),
        };

        // Resolve the created URI and compare variables
        let result = router.resolve("GET", host, &path);
        let route = result.route().unwrap_or_else(|| panic!("No match: {uri}"));
        assert_eq!(route.name(), Some(name), "Failed for: {uri}");
        let expected: BTreeMap<_, _> = variables
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        assert_eq!(result.variables(), &expected, "Failed for: {uri}");
    }
}

#[test]
fn prunes_optional_parts() {
    let mut builder = Builder::new();
    builder.map([Method::Get], "foo[/:bar[/:baz]]").name("foo");
    let router = Router::new(builder.build()).unwrap();
    assert_eq!(router.uri("foo", [("baz", "1")]).unwrap(), "/foo");
}

#[test]
fn roundtrips_trailing_slashes() {
    let mut builder = Builder::new();
    builder.map([Method::Get], "/foo/[:bar]").name("foo");
    builder.group(Group::new().with_path("/users"), |builder| {
        builder.map([Method::Get], "[/:id]").name("users");
    });
    let router = Router::new(builder.build()).unwrap();
    assert_eq!(router.uri("foo", [] as [(&str, &str); 0]).unwrap(), "/foo/");
    assert_eq!(router.uri("users", [] as [(&str, &str); 0]).unwrap(), "/users/");

    // Resolve the created URIs and compare variables
    let test_cases = vec![
        ("foo", vec![]),
        ("foo", vec![("bar", "1")]),
        ("users", vec![]),
        ("users", vec![("id", "1")]),
    ];
    for (name, variables) in test_cases {
        let uri = router.uri(name, variables.clone()).unwrap();
        let result = router.resolve("GET", "example.com", &uri);
        let route = result.route().unwrap_or_else(|| panic!("No match: {uri}"));
        assert_eq!(route.name(), Some(name), "Failed for: {uri}");
        let expected: BTreeMap<_, _> = variables
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        assert_eq!(result.variables(), &expected, "Failed for: {uri}");
    }
}

#[test]
fn keeps_numeric_default_values() {
    let mut builder = Builder::new();
    builder.map([Method::Get], "/api[/:version=1.0]").name("api");
    builder.map([Method::Get], "/code/:code=007").name("code");
    let router = Router::new(builder.build()).unwrap();

    // Defaults of variables that didn't participate in the match
    let result = router.resolve("GET", "example.com", "/api");
    assert_eq!(result.variables()["version"], "1.0");

    // Defaults of variables that weren't given
    let none = [] as [(&str, &str); 0];
    assert_eq!(router.uri("code", none).unwrap(), "/code/007");
}

#[test]
fn matches_multiple_segments_with_inlined_patterns() {
    let mut builder = Builder::new();
    builder
        .map([Method::Get], r#"/files/:path(regex("[^?]+"))"#)
        .to("files");
    builder
        .map([Method::Get], r#"/raw/:path(regex(".+"), notIn(["x"]))"#)
        .to("raw");
    let router = Router::new(builder.build()).unwrap();
    let test_cases = vec![
        ("/files/a/b", Some("files")),
        ("/raw/a/b", Some("raw")),
        ("/raw/x", None),
    ];
    for (path, expected) in test_cases {
        let result = router.resolve("GET", "example.com", path);
        assert_eq!(
            result.route().map(|route| route.action().as_str()),
            expected,
            "Failed for: {path}"
        );
    }
    let result = router.resolve("GET", "example.com", "/files/a/b");
    assert_eq!(result.variables()["path"], "a/b");
}

#[test]
fn substitutes_host_variables() {
    let mut builder = Builder::new();
    builder
        .map([Method::Get], "")
        .host(":foo.:bar.example.com")
        .https(true)
        .name("host");
    let router = Router::new(builder.build()).unwrap();
    assert_eq!(
        router.uri("host", [("foo", "dave"), ("bar", "young")]).unwrap(),
        "https://dave.young.example.com"
    );
}

#[test]
fn fails_on_missing_variable() {
    let mut builder = Builder::new();
    builder.map([Method::Get], "/:foo").name("foo");
    let router = Router::new(builder.build()).unwrap();
    let err = router.uri("foo", [] as [(&str, &str); 0]).unwrap_err();
    assert!(err.to_string().contains("foo"));
    assert!(matches!(
        err,
        zensical_routing::router::Error::Uri(uri::Error::MissingVariable { .. })
    ));
}

#[test]
fn breaks_ties_in_registration_order() {
    let constraints = Constraints::new().with("never", |_: &Context| false);
    let mut builder = Builder::new();
    builder
        .map([Method::Get], "/bar12")
        .to("wrong")
        .constraint(Constraint::Named("never".into()));
    builder.map([Method::Get], "/:foo(alpha)").to("wrong");
    builder.map([Method::Get], "/bar12").to("right");
    builder.map([Method::Get], "/:foo").to("late");
    let router = Router::builder()
        .with_constraints(constraints)
        .build(builder.build())
        .unwrap();
    let result = router.resolve("GET", "example.com", "/bar12");
    assert_eq!(result.route().map(|route| route.action().as_str()), Some("right"));
}

#[test]
fn enforces_rules() {
    let test_cases: Vec<(Box<dyn Rule>, &str, bool)> = vec![
        (Box::new(Alpha), "a", true),
        (Box::new(Alpha), "ab", true),
        (Box::new(Alpha), "", false),
        (Box::new(Alpha), "1", false),
        (Box::new(Alpha), "a b", false),
        (Box::new(Between::new(0.0, 2.0, true).unwrap()), "2", true),
        (Box::new(Between::new(0.0, 2.0, true).unwrap()), "3", false),
        (Box::new(UuidV4), "f47ac10b-58cc-4372-a567-0e02b2c3d479", true),
        (Box::new(UuidV4), "{f47ac10b-58cc-4372-a567-0e02b2c3d479}", true),
        (Box::new(UuidV4), "foo", false),
    ];
    for (rule, value, expected) in test_cases {
        assert_eq!(rule.passes(value), expected, "Failed for: {value}");
    }
}

#[test]
fn distinguishes_not_found_from_not_allowed() {
    let mut builder = Builder::new();
    builder.map([Method::Post], "/foo").to("create");
    builder.map([Method::Get], "/bar").to("show");
    let router = Router::new(builder.build()).unwrap();

    // Path matches under another method
    let result = router.resolve("GET", "example.com", "/foo");
    assert!(!result.is_found());
    assert_eq!(result.allowed_methods(), &[Method::Post]);

    // Path matches under GET and the implied HEAD
    let result = router.resolve("DELETE", "example.com", "/bar");
    assert_eq!(result.allowed_methods(), &[Method::Get, Method::Head]);

    // Path matches nowhere
    let result = router.resolve("GET", "example.com", "/baz");
    assert!(!result.is_found());
    assert!(result.allowed_methods().is_empty());
}

#[test]
fn matches_in_later_groups() {
    let mut builder = Builder::new();
    for n in 0..10 {
        builder.map([Method::Get], format!("/{n}/:id")).to(n.to_string());
    }
    let routes = builder.build();
    let compiler = Compiler::new().with_options(Options { max_routes_per_group: 3 });
    let groups = compiler.compile(&routes).unwrap();
    assert_eq!(groups[&Method::Get].len(), 4);

    // Resolve a route from the last group
    let router = Router::builder()
        .with_options(Options { max_routes_per_group: 3 })
        .build(routes)
        .unwrap();
    let result = router.resolve("GET", "example.com", "/9/x");
    assert_eq!(result.route().map(|route| route.action().as_str()), Some("9"));
    assert_eq!(result.variables()["id"], "x");
}

#[test]
fn loads_from_file_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cache = FileCache::new(dir.path().join("routes.json"));
    let router = Router::builder().load(&cache, register).unwrap();
    assert!(cache.has());

    // Load again from the cache, without registering routes
    let cached = Router::builder()
        .load(&cache, |_| panic!("Routes must be loaded from the cache"))
        .unwrap();
    assert_eq!(cached.routes(), router.routes());
    assert_eq!(cached.uri("user", [("id", 7)]).unwrap(), "/users/7");

    // Flush cache, and check that a corrupted cache is treated as a miss
    cache.flush().unwrap();
    std::fs::write(cache.path(), "[1, 2, 3]").unwrap();
    assert!(cache.get().is_err());
    let router = Router::builder().load(&cache, register).unwrap();
    assert!(router.resolve("GET", "", "/users/7").is_found());
}
