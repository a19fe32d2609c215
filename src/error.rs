use thiserror::Error;

/// Represents errors that can occur when inserting a new route.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Hash, PartialEq, Error)]
pub enum InsertError {
    /// Attempted to insert a path that conflicts with an existing route.
    ///
    /// Two patterns conflict when they are identical once every parameter is
    /// replaced by a wildcard, so `a.{x}` conflicts with `a/{y}`.
    #[error("insertion of '{path}' failed due to conflict with previously registered route: {with}")]
    Conflict {
        /// The route that was being inserted.
        path: String,
        /// The existing route that the insertion is conflicting with.
        with: String,
    },
    /// The route template could not be formatted.
    #[error("invalid route template: {0}")]
    Format(#[from] FormatError),
}

/// A failed match attempt.
///
/// ```
/// use segroute::{MatchError, PathTrie};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut trie = PathTrie::new();
/// trie.insert("home", "Welcome!")?;
/// trie.insert("blog.posts", "Our blog.")?;
///
/// // no routes match
/// if let Err(err) = trie.find("blog") {
///     assert_eq!(err, MatchError::NotFound);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
pub enum MatchError {
    /// No matching route was found.
    #[error("matching route not found")]
    NotFound,
}

/// Errors produced while building a route from a template.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Error)]
pub enum FormatError {
    /// A `{}` hole had no argument left to fill it.
    #[error("missing argument for placeholder #{index}")]
    MissingArgument {
        /// Zero-based index of the unfilled hole.
        index: usize,
    },
    /// More arguments were supplied than the template has holes.
    #[error("template has {expected} placeholders but {got} arguments were supplied")]
    UnusedArguments {
        /// Number of `{}` holes in the template.
        expected: usize,
        /// Number of arguments supplied.
        got: usize,
    },
    /// A `{` was never closed.
    #[error("unclosed '{{' at byte {offset}")]
    UnclosedBrace {
        /// Byte offset of the opening brace.
        offset: usize,
    },
    /// A `}` appeared without a matching `{`.
    #[error("unmatched '}}' at byte {offset}")]
    UnmatchedBrace {
        /// Byte offset of the stray brace.
        offset: usize,
    },
    /// An argument's `Display` implementation returned an error.
    #[error("argument #{index} failed to format")]
    Argument {
        /// Zero-based index of the failing argument.
        index: usize,
    },
}

/// Errors returned when dispatching a path through a [`Router`](crate::Router).
#[derive(Debug, PartialEq, Eq, Error)]
pub enum FireError<E> {
    /// No registered route matches the path.
    #[error("no route matches '{path}'")]
    NoRoute {
        /// The path that was fired.
        path: String,
    },
    /// A route matches but was reserved without a handler.
    #[error("route matching '{path}' has no handler")]
    NoHandler {
        /// The path that was fired.
        path: String,
    },
    /// The handler ran and failed.
    #[error("handler failed: {0}")]
    Handler(E),
}

impl<E> FireError<E> {
    /// Returns the handler's error, if the handler was the one that failed.
    pub fn into_handler_error(self) -> Option<E> {
        match self {
            FireError::Handler(err) => Some(err),
            _ => None,
        }
    }
}

/// Every conflict encountered while merging one router into another.
///
/// Routes that did not conflict were still merged.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("merge failed with {} conflicting route(s)", .0.len())]
pub struct MergeError(pub Vec<InsertError>);

impl MergeError {
    /// Returns the individual insertion errors.
    pub fn into_errors(self) -> Vec<InsertError> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = InsertError::Conflict {
            path: "a.{y}".into(),
            with: "a.{x}".into(),
        };
        assert_eq!(
            err.to_string(),
            "insertion of 'a.{y}' failed due to conflict with previously registered route: a.{x}"
        );

        let err = InsertError::from(FormatError::UnclosedBrace { offset: 3 });
        assert_eq!(err.to_string(), "invalid route template: unclosed '{' at byte 3");

        assert_eq!(
            FormatError::UnmatchedBrace { offset: 0 }.to_string(),
            "unmatched '}' at byte 0"
        );

        let err: FireError<std::fmt::Error> = FireError::NoRoute { path: "x".into() };
        assert_eq!(err.to_string(), "no route matches 'x'");

        assert_eq!(
            MergeError(vec![]).to_string(),
            "merge failed with 0 conflicting route(s)"
        );
    }

    #[test]
    fn fields_in_messages() {
        assert_eq!(
            FormatError::UnusedArguments {
                expected: 1,
                got: 3
            }
            .to_string(),
            "template has 1 placeholders but 3 arguments were supplied"
        );
        assert_eq!(
            FormatError::Argument { index: 2 }.to_string(),
            "argument #2 failed to format"
        );

        let err: FireError<&str> = FireError::NoHandler {
            path: "admin".into(),
        };
        assert_eq!(err.to_string(), "route matching 'admin' has no handler");
        assert_eq!(
            FireError::Handler("boom").to_string(),
            "handler failed: boom"
        );
    }

    #[test]
    fn handler_error_passthrough() {
        let err: FireError<&str> = FireError::Handler("boom");
        assert_eq!(err.into_handler_error(), Some("boom"));

        let err: FireError<&str> = FireError::NoHandler { path: "p".into() };
        assert_eq!(err.into_handler_error(), None);
    }
}
