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

//! Route cache.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::route::RouteCollection;

mod error;

pub use error::{Error, Result};

// ----------------------------------------------------------------------------
// Traits
// ----------------------------------------------------------------------------

/// Route cache.
///
/// Caches persist route collections, so they don't need to be registered on
/// every start. Callers should treat caches as an optimization, and fall back
/// to registering routes if reading or writing fails.
pub trait Cache {
    /// Returns the cached route collection, if any.
    ///
    /// # Errors
    ///
    /// This method returns an [`Error`], if the cache can't be read, or does
    /// not contain a route collection.
    fn get(&self) -> Result<Option<RouteCollection>>;

    /// Stores the route collection.
    ///
    /// # Errors
    ///
    /// This method returns an [`Error`], if the cache can't be written.
    fn set(&self, routes: &RouteCollection) -> Result;

    /// Returns whether a route collection is cached.
    fn has(&self) -> bool;

    /// Removes the cached route collection.
    ///
    /// # Errors
    ///
    /// This method returns an [`Error`], if the cache can't be removed.
    fn flush(&self) -> Result;
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// File cache.
///
/// Route collections are stored as JSON in a single file. An empty cache is
/// represented by a missing file, or a file containing `null`.
#[derive(Clone, Debug)]
pub struct FileCache {
    /// Path to cache file.
    path: PathBuf,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl FileCache {
    /// Creates a file cache.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_routing::cache::FileCache;
    ///
    /// // Create file cache
    /// let cache = FileCache::new(".cache/routes.json");
    /// assert_eq!(cache.path().to_str(), Some(".cache/routes.json"));
    /// ```
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { path: path.into() }
    }

    /// Returns the path to the cache file.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Cache for FileCache {
    fn get(&self) -> Result<Option<RouteCollection>> {
        match fs::read(&self.path) {
            Ok(data) => serde_json::from_slice(&data).map_err(Into::into),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, routes: &RouteCollection) -> Result {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_vec(routes)?;
        fs::write(&self.path, content).map_err(Into::into)
    }

    fn has(&self) -> bool {
        self.path.is_file()
    }

    fn flush(&self) -> Result {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
