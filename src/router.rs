//! `Router` dispatches route strings to handler functions.
//!
//! Routes are plain strings made of segments separated by `.` or `/`, as used
//! by message routing metadata, e.g. `students.{id}.courses`:
//!
//! ```rust
//! use segroute::Router;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut router: Router = Router::new();
//! router.route("students.{id}", |ctx| {
//!     let id = ctx.variable("id").unwrap_or_default();
//!     println!("student {}", id);
//!     Ok(())
//! })?;
//!
//! router.fire("students.2020")?;
//! # Ok(())
//! # }
//! ```
//!
//! Each segment of a pattern is either a literal, matched exactly and
//! case-sensitively, or a named parameter:
//! ```ignore
//!  Syntax    Type
//!  {name}    named parameter, matches exactly one segment
//! ```
//!
//! A parameter must make up the whole segment; `user_{id}` is a literal.
//! When a path could match both a literal and a parameter at the same
//! position, the literal wins:
//! ```ignore
//!  Patterns: students.top
//!            students.{id}
//!
//!  students.top      match: students.top
//!  students.7        match: students.{id}, id="7"
//!  students.7.name   no match
//! ```
//!
//! Handlers receive a [`RouteContext`] exposing the captured parameters for
//! the duration of the call.

use crate::error::{FireError, InsertError, MergeError};
use crate::format::format_route;
use crate::params::PathVariables;
use crate::tree::PathTrie;

use std::borrow::Cow;
use std::fmt;
use tracing::{debug, trace};

/// A boxed route handler.
pub type Handler<E> = Box<dyn Fn(&RouteContext<'_, '_>) -> Result<(), E> + Send + Sync>;

/// The default handler error type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Read-only access to the parameters captured for the current dispatch.
///
/// A context only lives for the duration of a handler call.
pub struct RouteContext<'t, 'p> {
    path: &'p str,
    params: PathVariables<'t, 'p>,
}

impl<'t, 'p> RouteContext<'t, 'p> {
    /// The path that was fired.
    pub fn path(&self) -> &'p str {
        self.path
    }

    /// All captured parameters, in declaration order.
    pub fn params(&self) -> &PathVariables<'t, 'p> {
        &self.params
    }

    /// Returns the value captured for the parameter `name`.
    pub fn variable(&self, name: &str) -> Option<&'p str> {
        self.params.get(name)
    }

    /// Returns the value captured for `name`, or `default`.
    pub fn variable_or_default<'a>(&self, name: &str, default: &'a str) -> &'a str
    where
        'p: 'a,
    {
        self.params.get_or_default(name, default)
    }

    /// Returns the value captured for `name`, or the result of `compute`.
    ///
    /// `compute` is only called if `name` was not captured.
    pub fn variable_or_compute<F>(&self, name: &str, compute: F) -> Cow<'p, str>
    where
        F: FnOnce() -> String,
    {
        self.params.get_or_compute(name, compute)
    }
}

impl fmt::Debug for RouteContext<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteContext")
            .field("path", &self.path)
            .field("params", &self.params)
            .finish()
    }
}

/// Router is a container which dispatches route strings to handler functions.
///
/// The handler error type `E` is returned unchanged from [`fire`](Router::fire).
pub struct Router<E = BoxError> {
    trie: PathTrie<Option<Handler<E>>>,
}

impl<E> Default for Router<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Router<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.trie.len())
            .finish()
    }
}

impl<E> Router<E> {
    /// Creates a router without routes.
    pub fn new() -> Self {
        Router {
            trie: PathTrie::new(),
        }
    }

    /// Returns the number of registered routes, including reserved ones.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// Returns `true` if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Registers `handler` for `pattern`.
    ///
    /// ```rust
    /// use segroute::{InsertError, Router};
    ///
    /// let mut router: Router = Router::new();
    /// assert!(router.route("students.{id}", |_| Ok(())).is_ok());
    ///
    /// // parameter names do not distinguish routes
    /// let err = router.route("students/{name}", |_| Ok(())).unwrap_err();
    /// assert!(matches!(err, InsertError::Conflict { .. }));
    /// ```
    pub fn route<F>(&mut self, pattern: impl Into<String>, handler: F) -> Result<(), InsertError>
    where
        F: Fn(&RouteContext<'_, '_>) -> Result<(), E> + Send + Sync + 'static,
    {
        self.trie.insert(pattern, Some(Box::new(handler)))
    }

    /// Registers `handler` for the route built by filling the `{}` holes of
    /// `template` with `args`. See [`format_route`](crate::format_route).
    ///
    /// ```rust
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router: segroute::Router = segroute::Router::new();
    /// router.route_fmt("tenants.{}.users.{id}", &[&"acme"], |ctx| {
    ///     assert_eq!(ctx.variable("id"), Some("7"));
    ///     Ok(())
    /// })?;
    ///
    /// router.fire("tenants.acme.users.7")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn route_fmt<F>(
        &mut self,
        template: &str,
        args: &[&dyn fmt::Display],
        handler: F,
    ) -> Result<(), InsertError>
    where
        F: Fn(&RouteContext<'_, '_>) -> Result<(), E> + Send + Sync + 'static,
    {
        let pattern = format_route(template, args)?;
        self.route(pattern, handler)
    }

    /// Claims `pattern` without a handler.
    ///
    /// Later registrations of the same route conflict, and firing a path that
    /// matches it fails with [`FireError::NoHandler`].
    pub fn reserve(&mut self, pattern: impl Into<String>) -> Result<(), InsertError> {
        self.trie.insert(pattern, None)
    }

    /// Dispatches `path` to the handler of the matching route.
    pub fn fire(&self, path: &str) -> Result<(), FireError<E>> {
        let matched = match self.trie.find(path) {
            Ok(matched) => matched,
            Err(_) => {
                trace!(path = %path, "no route");
                return Err(FireError::NoRoute {
                    path: path.to_owned(),
                });
            }
        };

        let Some(handler) = matched.value else {
            debug!(path = %path, "route has no handler");
            return Err(FireError::NoHandler {
                path: path.to_owned(),
            });
        };

        let ctx = RouteContext {
            path,
            params: matched.params,
        };
        handler(&ctx).map_err(FireError::Handler)
    }

    /// Moves every route of `other` into this router.
    ///
    /// Conflicting routes of `other` are dropped; the rest are merged and the
    /// conflicts are reported together.
    pub fn merge(&mut self, other: Router<E>) -> Result<(), MergeError> {
        self.trie.merge(other.trie)
    }
}
