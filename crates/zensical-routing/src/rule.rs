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

//! Rules.
//!
//! Rules validate the values of variables after a template matched, e.g., to
//! ensure that an identifier is numeric. They are referenced by slug inside
//! templates, and instantiated with the arguments given in the template from
//! factories registered in [`Rules`].

use ahash::HashMap;
use std::fmt;

use crate::template::ast::{Argument, DEFAULT_SLUG};

mod alpha;
mod between;
mod date;
mod error;
mod integer;
mod not_in;
mod numeric;
pub mod regex;
mod uuid;

pub use alpha::Alpha;
pub use between::Between;
pub use date::Date;
pub use error::{Error, Result};
pub use integer::Integer;
pub use not_in::NotIn;
pub use numeric::Numeric;
pub use regex::Regex;
pub use uuid::UuidV4;

// ----------------------------------------------------------------------------
// Traits
// ----------------------------------------------------------------------------

/// Rule.
///
/// Rules must be free of side effects, as they're shared among all matches.
pub trait Rule: Send + Sync + 'static {
    /// Returns whether the given value passes the rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_routing::rule::{Alpha, Rule};
    ///
    /// // Check values against rule
    /// assert!(Alpha.passes("coffee"));
    /// assert!(!Alpha.passes("c0ffee"));
    /// ```
    fn passes(&self, value: &str) -> bool;
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Rule registry.
///
/// The registry maps slugs to factories, which create rules from arguments.
/// Using [`Rules::default`] creates a registry with all built-in rules, i.e.,
/// `alpha`, `numeric`, `int`, `between`, `date`, `regex`, `notIn` and `uuidv4`.
pub struct Rules {
    /// Map slugs to factories.
    factories: HashMap<String, Box<Factory>>,
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Rule factory.
pub type Factory = dyn Fn(&[Argument]) -> Result<Box<dyn Rule>> + Send + Sync;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Rules {
    /// Creates an empty rule registry.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_routing::rule::Rules;
    ///
    /// // Create rule registry
    /// let rules = Rules::new();
    /// assert!(!rules.contains("int"));
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self { factories: HashMap::default() }
    }

    /// Adds a rule factory to the registry.
    ///
    /// Factories registered with a slug that is already taken replace the
    /// existing factory, which allows to override built-in rules.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::InvalidFactory`], if the slug can't be
    /// referenced from a template, or is reserved for default values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_routing::rule::{Rule, Rules};
    ///
    /// // Create rule registry and add rule factory
    /// let mut rules = Rules::new();
    /// rules.add("even", |_args| {
    ///     let rule = |value: &str| {
    ///         value.parse::<u64>().is_ok_and(|value| value % 2 == 0)
    ///     };
    ///     Ok(Box::new(rule) as Box<dyn Rule>)
    /// })?;
    ///
    /// // Create rule from registry
    /// let rule = rules.create("even", &[])?;
    /// assert!(rule.passes("42"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn add<S, F>(&mut self, slug: S, factory: F) -> Result
    where
        S: Into<String>,
        F: Fn(&[Argument]) -> Result<Box<dyn Rule>> + Send + Sync + 'static,
    {
        let slug = slug.into();
        if !is_valid_slug(&slug) {
            return Err(Error::InvalidFactory(slug));
        }
        self.factories.insert(slug, Box::new(factory));
        Ok(())
    }

    /// Adds a rule factory to the registry and returns it.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::InvalidFactory`], if the slug is invalid.
    pub fn with<S, F>(mut self, slug: S, factory: F) -> Result<Self>
    where
        S: Into<String>,
        F: Fn(&[Argument]) -> Result<Box<dyn Rule>> + Send + Sync + 'static,
    {
        self.add(slug, factory).map(|()| self)
    }

    /// Creates a rule from the factory registered for the given slug.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Unknown`], if no factory is registered for
    /// the slug, or [`Error::InvalidArgument`], if the factory rejects the
    /// given arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_routing::rule::Rules;
    /// use zensical_routing::template::ast::Argument;
    ///
    /// // Create rule from registry
    /// let rules = Rules::default();
    /// let args = [Argument::Integer(1), Argument::Integer(10)];
    /// let rule = rules.create("between", &args)?;
    /// assert!(rule.passes("5"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn create(&self, slug: &str, args: &[Argument]) -> Result<Box<dyn Rule>> {
        self.factories
            .get(slug)
            .ok_or_else(|| Error::Unknown(slug.to_string()))
            .and_then(|factory| factory(args))
    }
}

#[allow(clippy::must_use_candidate)]
impl Rules {
    /// Returns whether a factory is registered for the given slug.
    #[inline]
    pub fn contains(&self, slug: &str) -> bool {
        self.factories.contains_key(slug)
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Default for Rules {
    /// Creates a rule registry with all built-in rules.
    fn default() -> Self {
        let builtins = [
            builtin(Alpha::SLUG, Alpha::from_args),
            builtin(Numeric::SLUG, Numeric::from_args),
            builtin(Integer::SLUG, Integer::from_args),
            builtin(Between::SLUG, Between::from_args),
            builtin(Date::SLUG, Date::from_args),
            builtin(Regex::SLUG, Regex::from_args),
            builtin(NotIn::SLUG, NotIn::from_args),
            builtin(UuidV4::SLUG, UuidV4::from_args),
        ];
        Self { factories: builtins.into_iter().collect() }
    }
}

impl fmt::Debug for Rules {
    /// Formats the rule registry for debugging.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut slugs: Vec<_> = self.factories.keys().collect();
        slugs.sort();
        f.debug_struct("Rules").field("factories", &slugs).finish()
    }
}

impl fmt::Debug for Box<dyn Rule> {
    /// Formats the rule for debugging.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Box<dyn Rule>")
    }
}

// ----------------------------------------------------------------------------
// Blanket implementations
// ----------------------------------------------------------------------------

impl<F> Rule for F
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    #[inline]
    fn passes(&self, value: &str) -> bool {
        self(value)
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Creates a registry entry from a rule constructor.
fn builtin<R, F>(slug: &str, f: F) -> (String, Box<Factory>)
where
    R: Rule,
    F: Fn(&[Argument]) -> Result<R> + Send + Sync + 'static,
{
    let factory = move |args: &[Argument]| boxed(f(args));
    (slug.to_string(), Box::new(factory))
}

/// Boxes the result of a rule constructor.
#[inline]
fn boxed<R>(result: Result<R>) -> Result<Box<dyn Rule>>
where
    R: Rule,
{
    result.map(|rule| Box::new(rule) as Box<dyn Rule>)
}

/// Returns whether the slug can be referenced from a template.
fn is_valid_slug(slug: &str) -> bool {
    let mut chars = slug.chars();
    let valid = chars
        .next()
        .is_some_and(|char| char.is_alphabetic() || char == '_')
        && chars.all(|char| char.is_alphanumeric() || char == '_');
    valid && slug != DEFAULT_SLUG
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins() {
        let rules = Rules::default();
        for slug in [
            "alpha", "numeric", "int", "between", "date", "regex", "notIn",
            "uuidv4",
        ] {
            assert!(rules.contains(slug), "Missing rule: {slug}");
        }
    }

    #[test]
    fn test_unknown() {
        let rules = Rules::new();
        let result = rules.create("int", &[]);
        assert!(matches!(result, Err(Error::Unknown(slug)) if slug == "int"));
    }

    #[test]
    fn test_invalid_factory() {
        let mut rules = Rules::new();
        for slug in ["", "1st", "foo-bar", "default"] {
            let result = rules.add(slug, |_| boxed(Alpha::from_args(&[])));
            assert!(
                matches!(result, Err(Error::InvalidFactory(_))),
                "Failed for slug: {slug}"
            );
        }
    }

    #[test]
    fn test_override() {
        let rules = Rules::default()
            .with("int", |_| Ok(Box::new(|_: &str| true) as Box<dyn Rule>))
            .unwrap();
        let rule = rules.create("int", &[]).unwrap();
        assert!(rule.passes("not a number"));
    }

    #[test]
    fn test_invalid_arguments_fail_fast() {
        let rules = Rules::default();
        let args = [Argument::Integer(3), Argument::Integer(1)];
        assert!(matches!(
            rules.create("between", &args),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            rules.create("date", &[]),
            Err(Error::InvalidArgument { .. })
        ));
    }
}
