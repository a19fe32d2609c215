//! Splitting route strings into segments.
//!
//! Both `.` and `/` delimit segments, so `students.{id}` and `students/{id}`
//! describe the same route. A delimiter only splits when it is not the first
//! byte of the remaining input; a leading delimiter folds into the text that
//! follows it.

use std::iter::FusedIterator;

/// Returns an iterator over the segments of `path`.
///
/// ```rust
/// let segments: Vec<_> = segroute::split_path("foo.bar/baz").collect();
/// assert_eq!(segments, ["foo", "bar", "baz"]);
/// ```
pub fn split_path(path: &str) -> Segments<'_> {
    Segments { rest: path }
}

/// An iterator over the non-empty segments of a path.
///
/// Cloning the iterator restarts scanning from the clone's position.
#[derive(Clone, Debug)]
pub struct Segments<'p> {
    rest: &'p str,
}

// Index of the first delimiter that is allowed to split `rest`.
//
// Each delimiter is located independently and ignored if its first occurrence
// is at index zero, even when a later occurrence exists.
fn split_at(rest: &str) -> Option<usize> {
    let slash = rest.find('/').filter(|&n| n > 0);
    let dot = rest.find('.').filter(|&n| n > 0);

    match (slash, dot) {
        (Some(slash), Some(dot)) => Some(slash.min(dot)),
        (slash, dot) => slash.or(dot),
    }
}

impl<'p> Iterator for Segments<'p> {
    type Item = &'p str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        match split_at(self.rest) {
            Some(i) => {
                let segment = &self.rest[..i];
                // delimiters are single ascii bytes
                self.rest = &self.rest[i + 1..];
                Some(segment)
            }
            None => Some(std::mem::take(&mut self.rest)),
        }
    }
}

impl FusedIterator for Segments<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    // path, segments
    fn split_tests() -> Vec<(&'static str, Vec<&'static str>)> {
        vec![
            ("foo.bar", vec!["foo", "bar"]),
            ("foo/bar", vec!["foo", "bar"]),
            ("foo/bar.baz", vec!["foo", "bar", "baz"]),
            ("students.{id}.courses", vec!["students", "{id}", "courses"]),
            ("single", vec!["single"]),
            ("", vec![]),
            // trailing delimiter
            ("foo.", vec!["foo"]),
            ("foo/", vec!["foo"]),
            // leading delimiters only split once they are no longer first
            ("/foo/bar", vec!["/foo/bar"]),
            (".foo.bar", vec![".foo.bar"]),
            ("/foo.bar", vec!["/foo", "bar"]),
            ("a//b", vec!["a", "/b"]),
            ("a./b", vec!["a", "/b"]),
            ("a..b", vec!["a", ".b"]),
            ("/", vec!["/"]),
            // non-ascii text around delimiters
            ("β.ʯ/ü", vec!["β", "ʯ", "ü"]),
        ]
    }

    #[test]
    fn test_split_path() {
        for (path, expected) in split_tests() {
            let got: Vec<_> = split_path(path).collect();
            assert_eq!(got, expected, "wrong segments for '{}'", path);
        }
    }

    #[test]
    fn segments_are_never_empty() {
        for (path, _) in split_tests() {
            assert!(split_path(path).all(|s| !s.is_empty()), "{}", path);
        }
    }

    #[test]
    fn restartable() {
        let mut segments = split_path("a.b.c");
        segments.next();

        let rest = segments.clone();
        assert_eq!(segments.collect::<Vec<_>>(), ["b", "c"]);
        assert_eq!(rest.collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn fused() {
        let mut segments = split_path("a");
        assert_eq!(segments.next(), Some("a"));
        assert_eq!(segments.next(), None);
        assert_eq!(segments.next(), None);
    }
}
