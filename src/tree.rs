use crate::error::{InsertError, MatchError, MergeError};
use crate::params::PathVariables;
use crate::path::split_path;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

// A placeholder must span the whole segment.
static PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{([A-Za-z_][A-Za-z0-9_]*)\}$").expect("placeholder pattern is valid"));

// Returns the parameter name if `segment` is a `{name}` placeholder.
fn placeholder(segment: &str) -> Option<&str> {
    PARAM
        .captures(segment)
        .and_then(|groups| groups.get(1))
        .map(|name| name.as_str())
}

/// The key a node is stored under in its parent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Matches a segment with exactly this text.
    Literal(String),
    /// Matches any segment. Every `{name}` placeholder at a given position
    /// shares this key, whatever its name.
    Wildcard,
}

// Terminal registration data.
#[derive(Debug)]
struct Leaf<V> {
    value: V,
    // The pattern as it was registered.
    pattern: String,
    // Segment indices of the placeholders, parallel to `names`.
    positions: Vec<usize>,
    names: Vec<String>,
}

/// A node in the segment trie.
///
/// Nodes are created on demand while routes are inserted and are never
/// removed. A node is a leaf if a route ends at it.
#[derive(Debug)]
pub struct Node<V> {
    key: Key,
    statics: HashMap<String, Node<V>>,
    wildcard: Option<Box<Node<V>>>,
    leaf: Option<Leaf<V>>,
}

impl<V> Node<V> {
    fn new(key: Key) -> Self {
        Node {
            key,
            statics: HashMap::new(),
            wildcard: None,
            leaf: None,
        }
    }

    /// The key this node is stored under.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Returns `true` if a route ends at this node.
    pub fn is_leaf(&self) -> bool {
        self.leaf.is_some()
    }

    /// The value registered at this node, if it is a leaf.
    pub fn value(&self) -> Option<&V> {
        self.leaf.as_ref().map(|leaf| &leaf.value)
    }

    /// The pattern registered at this node, if it is a leaf.
    pub fn pattern(&self) -> Option<&str> {
        self.leaf.as_ref().map(|leaf| leaf.pattern.as_str())
    }

    /// Returns the child stored under `key`.
    pub fn get_child(&self, key: &Key) -> Option<&Node<V>> {
        match key {
            Key::Literal(segment) => self.statics.get(segment),
            Key::Wildcard => self.wildcard.as_deref(),
        }
    }

    // Returns the child stored under `key`, creating it if absent. An existing
    // child is never replaced.
    fn child_or_insert(&mut self, key: Key) -> &mut Node<V> {
        match key {
            Key::Wildcard => self
                .wildcard
                .get_or_insert_with(|| Box::new(Node::new(Key::Wildcard))),
            Key::Literal(segment) => self
                .statics
                .entry(segment.clone())
                .or_insert_with(|| Node::new(Key::Literal(segment))),
        }
    }

    // Moves every leaf below this node into `routes`.
    fn drain_into(self, routes: &mut Vec<(String, V)>) {
        if let Some(leaf) = self.leaf {
            routes.push((leaf.pattern, leaf.value));
        }

        for (_, child) in self.statics {
            child.drain_into(routes);
        }

        if let Some(wildcard) = self.wildcard {
            wildcard.drain_into(routes);
        }
    }
}

/// A successful match: the registered value and the captured parameters.
#[derive(Debug)]
pub struct Match<'t, 'p, V> {
    /// The value stored under the matched route.
    pub value: &'t V,
    /// The parameters captured from the path.
    pub params: PathVariables<'t, 'p>,
}

/// A successful match with mutable access to the registered value.
#[derive(Debug)]
pub struct MatchMut<'t, 'p, V> {
    /// The value stored under the matched route.
    pub value: &'t mut V,
    /// The parameters captured from the path.
    pub params: PathVariables<'t, 'p>,
}

/// A routing table over `.`/`/` separated paths.
///
/// Routes are inserted once and then looked up any number of times. Lookups
/// take `&self` and never mutate the trie, so a built trie can be shared
/// between threads freely.
///
/// ```rust
/// use segroute::PathTrie;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut trie = PathTrie::new();
/// trie.insert("students.{id}", "student")?;
/// trie.insert("students/top", "leaderboard")?;
///
/// let matched = trie.find("students.777")?;
/// assert_eq!(*matched.value, "student");
/// assert_eq!(matched.params.get("id"), Some("777"));
///
/// // literal segments are preferred over parameters
/// assert_eq!(*trie.find("students.top")?.value, "leaderboard");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PathTrie<V> {
    root: Node<V>,
    routes: usize,
}

impl<V> Default for PathTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PathTrie<V> {
    /// Creates an empty trie.
    pub fn new() -> Self {
        PathTrie {
            root: Node::new(Key::Literal(String::new())),
            routes: 0,
        }
    }

    /// Returns the number of registered routes.
    pub fn len(&self) -> usize {
        self.routes
    }

    /// Returns `true` if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.routes == 0
    }

    /// Registers `value` under `pattern`.
    ///
    /// A segment written as `{name}` matches any single segment and captures
    /// it as `name`. Patterns that only differ in parameter names are the same
    /// route, and a second registration of a route is rejected, leaving the
    /// first one in place.
    pub fn insert(&mut self, pattern: impl Into<String>, value: V) -> Result<(), InsertError> {
        let pattern = pattern.into();
        let mut positions = Vec::new();
        let mut names = Vec::new();

        let mut current = &mut self.root;
        for (position, segment) in split_path(&pattern).enumerate() {
            let key = match placeholder(segment) {
                Some(name) => {
                    positions.push(position);
                    names.push(name.to_owned());
                    Key::Wildcard
                }
                None => Key::Literal(segment.to_owned()),
            };

            current = current.child_or_insert(key);
        }

        if let Some(existing) = &current.leaf {
            debug!(path = %pattern, with = %existing.pattern, "route conflict");
            return Err(InsertError::Conflict {
                path: pattern,
                with: existing.pattern.clone(),
            });
        }

        debug!(path = %pattern, params = names.len(), "route registered");
        current.leaf = Some(Leaf {
            value,
            pattern,
            positions,
            names,
        });
        self.routes += 1;
        Ok(())
    }

    /// Walks `path`, preferring literal children over the wildcard child at
    /// every step. Each segment consumed by a wildcard is reported to
    /// `capture` with its position.
    fn walk<'p>(&self, path: &'p str, mut capture: impl FnMut(usize, &'p str)) -> Option<&Node<V>> {
        let mut current = &self.root;

        for (position, segment) in split_path(path).enumerate() {
            current = match current.statics.get(segment) {
                Some(child) => child,
                None => {
                    let child = current.wildcard.as_deref()?;
                    capture(position, segment);
                    child
                }
            };
        }

        Some(current)
    }

    fn walk_mut<'p>(
        &mut self,
        path: &'p str,
        mut capture: impl FnMut(usize, &'p str),
    ) -> Option<&mut Node<V>> {
        let mut current = &mut self.root;

        for (position, segment) in split_path(path).enumerate() {
            current = if current.statics.contains_key(segment) {
                current.statics.get_mut(segment)?
            } else {
                let child = current.wildcard.as_deref_mut()?;
                capture(position, segment);
                child
            };
        }

        Some(current)
    }

    /// Finds the value registered for `path` and the parameters it captures.
    ///
    /// There is no backtracking: once a literal segment has been matched, the
    /// sibling parameter route is not considered for the rest of the path.
    pub fn find<'t, 'p>(&'t self, path: &'p str) -> Result<Match<'t, 'p, V>, MatchError> {
        let mut captures = Vec::new();
        let node = self
            .walk(path, |position, segment| captures.push((position, segment)))
            .ok_or(MatchError::NotFound)?;

        let leaf = node.leaf.as_ref().ok_or(MatchError::NotFound)?;
        Ok(Match {
            value: &leaf.value,
            params: bind(&leaf.positions, &leaf.names, &captures),
        })
    }

    /// Like [`find`](PathTrie::find), but with mutable access to the value.
    pub fn find_mut<'t, 'p>(&'t mut self, path: &'p str) -> Result<MatchMut<'t, 'p, V>, MatchError> {
        let mut captures = Vec::new();
        let node = self
            .walk_mut(path, |position, segment| captures.push((position, segment)))
            .ok_or(MatchError::NotFound)?;

        let Leaf {
            value,
            positions,
            names,
            ..
        } = node.leaf.as_mut().ok_or(MatchError::NotFound)?;
        Ok(MatchMut {
            value,
            params: bind(positions, names, &captures),
        })
    }

    /// Returns the node reached by walking `path`, whether or not a route
    /// ends there.
    ///
    /// ```rust
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut trie = segroute::PathTrie::new();
    /// trie.insert("foo.bar", 111)?;
    ///
    /// assert!(trie.load("foo/bar")?.is_leaf());
    /// assert!(!trie.load("foo")?.is_leaf());
    /// assert!(trie.load("baz").is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(&self, path: &str) -> Result<&Node<V>, MatchError> {
        self.walk(path, |_, _| {}).ok_or(MatchError::NotFound)
    }

    /// Moves every route of `other` into this trie.
    ///
    /// Routes that conflict with an existing route are dropped and reported
    /// together once the merge is done.
    pub fn merge(&mut self, other: PathTrie<V>) -> Result<(), MergeError> {
        let mut routes = Vec::with_capacity(other.routes);
        other.root.drain_into(&mut routes);
        routes.sort_by(|(a, _), (b, _)| a.cmp(b));

        let errors: Vec<_> = routes
            .into_iter()
            .filter_map(|(pattern, value)| self.insert(pattern, value).err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(MergeError(errors))
        }
    }
}

// Pairs every declared parameter name with the segment captured at its
// position, in declaration order.
fn bind<'t, 'p>(
    positions: &'t [usize],
    names: &'t [String],
    captures: &[(usize, &'p str)],
) -> PathVariables<'t, 'p> {
    if positions.is_empty() {
        return PathVariables::new();
    }

    let mut params = PathVariables::with_capacity(positions.len());
    for (position, name) in positions.iter().zip(names) {
        // a missing capture is skipped rather than reported
        if let Some(&(_, segment)) = captures.iter().find(|(at, _)| at == position) {
            params.push(name, segment);
        }
    }
    params
}
