use std::borrow::Cow;
use std::{fmt, slice};

/// The named path parameters captured by a route match.
///
/// Names borrow from the trie and values borrow from the matched path, so a
/// lookup never copies segment text. Parameters are kept in the order they
/// were declared in the registered pattern.
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut trie = segroute::PathTrie::new();
/// trie.insert("students.{id}.courses.{course}", true)?;
///
/// let matched = trie.find("students.42.courses.cs")?;
/// assert_eq!(matched.params.get("id"), Some("42"));
/// assert_eq!(matched.params.get_or_default("grade", "none"), "none");
///
/// for (name, value) in matched.params.iter() {
///     println!("{} = {}", name, value);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(PartialEq, Eq, Clone, Default)]
pub struct PathVariables<'k, 'v> {
    // Empty for routes without parameters; `Vec::new` does not allocate.
    pairs: Vec<(&'k str, &'v str)>,
}

impl<'k, 'v> PathVariables<'k, 'v> {
    pub(crate) fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, name: &'k str, value: &'v str) {
        self.pairs.push((name, value));
    }

    /// Returns the value of the first parameter registered under `name`.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&'v str> {
        let name = name.as_ref();
        self.pairs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|&(_, value)| value)
    }

    /// Returns the value registered under `name`, or `default` if there is none.
    pub fn get_or_default<'a>(&self, name: impl AsRef<str>, default: &'a str) -> &'a str
    where
        'v: 'a,
    {
        self.get(name).unwrap_or(default)
    }

    /// Returns the value registered under `name`, or the result of `compute`.
    ///
    /// `compute` only runs when the parameter is missing.
    pub fn get_or_compute<F>(&self, name: impl AsRef<str>, compute: F) -> Cow<'v, str>
    where
        F: FnOnce() -> String,
    {
        match self.get(name) {
            Some(value) => Cow::Borrowed(value),
            None => Cow::Owned(compute()),
        }
    }

    /// Returns the number of captured parameters.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no parameters were captured.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns an iterator over the `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> Iter<'_, 'k, 'v> {
        Iter {
            inner: self.pairs.iter(),
        }
    }
}

impl fmt::Debug for PathVariables<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'p, 'k, 'v> IntoIterator for &'p PathVariables<'k, 'v> {
    type Item = (&'k str, &'v str);
    type IntoIter = Iter<'p, 'k, 'v>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the names and values of captured [path variables](crate::PathVariables).
pub struct Iter<'p, 'k, 'v> {
    inner: slice::Iter<'p, (&'k str, &'v str)>,
}

impl<'k, 'v> Iterator for Iter<'_, 'k, 'v> {
    type Item = (&'k str, &'v str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_, '_, '_> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}
