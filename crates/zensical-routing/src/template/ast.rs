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

//! Abstract syntax tree.

use std::fmt;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Slug of default value invocations.
pub const DEFAULT_SLUG: &str = "default";

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Node.
///
/// Templates are parsed into a tree rooted in [`Node::Root`], which contains
/// an optional [`Node::Host`] and a mandatory [`Node::Path`] subtree. Nodes
/// own their children, and the tree is never mutated after parsing, so the
/// compiler and the URI factory can walk it by exhaustive matching.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Root, containing the host and path subtrees.
    Root(Vec<Node>),
    /// Host subtree.
    Host(Vec<Node>),
    /// Path subtree.
    Path(Vec<Node>),
    /// Literal text.
    Text(String),
    /// Variable.
    Variable(Variable),
    /// Segment delimiter, i.e., `/` in paths and `.` in hosts.
    SegmentDelimiter(char),
    /// Optional part.
    OptionalPart(Vec<Node>),
    /// Rule invocation, only found as a child of a variable.
    Rule(Invocation),
}

/// Rule argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Argument {
    /// String.
    String(String),
    /// Integer.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// List of arguments.
    List(Vec<Argument>),
    /// Nested rule invocation.
    Rule(Invocation),
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Variable.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    /// Variable name.
    pub name: String,
    /// Rule invocations.
    pub children: Vec<Node>,
}

/// Rule invocation.
///
/// Invocations are resolved against the [`Rules`][] registry by slug. Default
/// values are stored as invocations as well, which are flagged accordingly,
/// and carry the default value as their only argument.
///
/// [`Rules`]: crate::rule::Rules
#[derive(Clone, Debug, PartialEq)]
pub struct Invocation {
    /// Rule slug.
    pub slug: String,
    /// Rule arguments.
    pub args: Vec<Argument>,
    /// Whether the invocation represents a default value.
    pub is_default: bool,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Node {
    /// Returns the children of the node.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root(children)
            | Node::Host(children)
            | Node::Path(children)
            | Node::OptionalPart(children) => children,
            Node::Variable(variable) => &variable.children,
            Node::Text(_) | Node::SegmentDelimiter(_) | Node::Rule(_) => &[],
        }
    }

    /// Returns the children of the host subtree, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_routing::template::UriTemplate;
    ///
    /// // Parse template and obtain host
    /// let template = UriTemplate::new("/").with_host("example.com");
    /// let root = template.parse()?;
    /// assert!(root.host().is_some());
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn host(&self) -> Option<&[Node]> {
        self.children().iter().find_map(|node| match node {
            Node::Host(children) => Some(children.as_slice()),
            _ => None,
        })
    }

    /// Returns the children of the path subtree.
    #[must_use]
    pub fn path(&self) -> &[Node] {
        self.children()
            .iter()
            .find_map(|node| match node {
                Node::Path(children) => Some(children.as_slice()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Returns all variables of the subtree in template order.
    #[must_use]
    pub fn variables(&self) -> Vec<&Variable> {
        let mut variables = Vec::new();
        collect(self, &mut variables);
        variables
    }
}

impl Variable {
    /// Returns the rule invocations, excluding the default value.
    pub fn rules(&self) -> impl Iterator<Item = &Invocation> {
        self.invocations().filter(|invocation| !invocation.is_default)
    }

    /// Returns the default value, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<&Argument> {
        self.invocations()
            .find(|invocation| invocation.is_default)
            .and_then(|invocation| invocation.args.first())
    }

    /// Returns all invocations.
    fn invocations(&self) -> impl Iterator<Item = &Invocation> {
        self.children.iter().filter_map(|node| match node {
            Node::Rule(invocation) => Some(invocation),
            _ => None,
        })
    }
}

impl Invocation {
    /// Creates a rule invocation.
    #[must_use]
    pub fn new<S>(slug: S, args: Vec<Argument>) -> Self
    where
        S: Into<String>,
    {
        Self { slug: slug.into(), args, is_default: false }
    }

    /// Creates a default value invocation.
    #[must_use]
    pub fn default_value(value: Argument) -> Self {
        Self {
            slug: String::from(DEFAULT_SLUG),
            args: vec![value],
            is_default: true,
        }
    }
}

#[allow(clippy::must_use_candidate)]
impl Argument {
    /// Returns the string, if the argument is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Argument::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the number, if the argument is numeric.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Argument::Integer(value) => Some(*value as f64),
            Argument::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the boolean, if the argument is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Argument::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the list, if the argument is a list.
    pub fn as_list(&self) -> Option<&[Argument]> {
        match self {
            Argument::List(values) => Some(values),
            _ => None,
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl fmt::Display for Argument {
    /// Formats the argument for display.
    ///
    /// Strings are formatted without quotes, which makes the representation
    /// suitable for comparisons with matched values and for default values.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Argument::String(value) => f.write_str(value),
            Argument::Integer(value) => write!(f, "{value}"),
            Argument::Float(value) => write!(f, "{value}"),
            Argument::Bool(value) => write!(f, "{value}"),
            Argument::List(values) => {
                f.write_str("[")?;
                for (n, value) in values.iter().enumerate() {
                    if n > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
            Argument::Rule(invocation) => write!(f, "{invocation}"),
        }
    }
}

impl fmt::Display for Invocation {
    /// Formats the invocation for display.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.slug)?;
        if !self.args.is_empty() {
            f.write_str("(")?;
            for (n, arg) in self.args.iter().enumerate() {
                if n > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Collects variables in template order.
fn collect<'a>(node: &'a Node, variables: &mut Vec<&'a Variable>) {
    if let Node::Variable(variable) = node {
        variables.push(variable);
    } else {
        for child in node.children() {
            collect(child, variables);
        }
    }
}
