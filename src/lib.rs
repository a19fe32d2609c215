//! A segment trie router for route strings such as `students.{id}.courses`.
//!
//! Routes are split on `.` and `/` into segments. Each segment of a registered
//! pattern is either matched literally or, when written as `{name}`, matches
//! any single segment and captures it under `name`.
//!
//! ```rust
//! use segroute::PathTrie;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut trie = PathTrie::new();
//! trie.insert("students.{id}.courses.{course}.score", 100)?;
//!
//! let matched = trie.find("students.123.courses.cs.score")?;
//! assert_eq!(*matched.value, 100);
//! assert_eq!(matched.params.get("id"), Some("123"));
//! assert_eq!(matched.params.get("course"), Some("cs"));
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`] builds handler dispatch on top of the trie.
#![deny(clippy::all)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
mod error;
mod format;
mod params;
mod path;
mod router;
mod tree;

pub use error::{FireError, FormatError, InsertError, MatchError, MergeError};
pub use format::format_route;
pub use params::{Iter as ParamsIter, PathVariables};
pub use path::{split_path, Segments};
pub use router::{BoxError, Handler, RouteContext, Router};
pub use tree::{Key, Match, MatchMut, Node, PathTrie};
