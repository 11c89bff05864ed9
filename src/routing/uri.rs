//! Remaining-URI bookkeeping.
//!
//! # Invariants
//! - `current` is the original path with the consumed prefixes stripped,
//!   in the order they were consumed
//! - `consumed.len()` equals the number of prefixes currently stripped
//! - `pop` restores exactly the URI that was current before the last strip

/// The URI still to be matched plus the stack of URIs it replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriStack {
    current: String,
    consumed: Vec<String>,
}

impl UriStack {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            current: if path.is_empty() { "/".to_string() } else { path },
            consumed: Vec::new(),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Number of prefixes currently stripped.
    pub fn depth(&self) -> usize {
        self.consumed.len()
    }

    /// Strip a literal prefix and push the previous URI.
    ///
    /// The prefix must end on a segment boundary: the remainder is empty or
    /// starts with `/`, unless the prefix itself ends with `/`. An empty
    /// remainder becomes `/`. Returns false, without mutation, on mismatch.
    pub fn strip_prefix(&mut self, prefix: &str) -> bool {
        let Some(rest) = self.current.strip_prefix(prefix) else {
            return false;
        };
        if !(rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/')) {
            return false;
        }

        let rest = match rest {
            "" => "/".to_string(),
            r if r.starts_with('/') => r.to_string(),
            r => format!("/{}", r),
        };
        let previous = std::mem::replace(&mut self.current, rest);
        self.consumed.push(previous);
        true
    }

    /// Undo the most recent strip.
    pub fn pop(&mut self) -> bool {
        match self.consumed.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Pop until only `depth` prefixes remain stripped.
    pub fn restore_to(&mut self, depth: usize) {
        while self.consumed.len() > depth {
            self.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_and_pop_round_trip() {
        let mut uri = UriStack::new("/planet/mars/moons");
        assert!(uri.strip_prefix("/planet"));
        assert_eq!(uri.current(), "/mars/moons");
        assert!(uri.strip_prefix("/mars"));
        assert_eq!(uri.current(), "/moons");
        assert_eq!(uri.depth(), 2);

        assert!(uri.pop());
        assert_eq!(uri.current(), "/mars/moons");
        assert!(uri.pop());
        assert_eq!(uri.current(), "/planet/mars/moons");
        assert!(!uri.pop());
        assert_eq!(uri.depth(), 0);
    }

    #[test]
    fn test_empty_remainder_becomes_root() {
        let mut uri = UriStack::new("/about");
        assert!(uri.strip_prefix("/about"));
        assert_eq!(uri.current(), "/");
    }

    #[test]
    fn test_prefix_must_end_on_segment_boundary() {
        let mut uri = UriStack::new("/aboutus");
        assert!(!uri.strip_prefix("/about"));
        assert_eq!(uri.current(), "/aboutus");
        assert_eq!(uri.depth(), 0);
    }

    #[test]
    fn test_prefix_with_trailing_slash() {
        let mut uri = UriStack::new("/api/users");
        assert!(uri.strip_prefix("/api/"));
        assert_eq!(uri.current(), "/users");
    }

    #[test]
    fn test_empty_prefix_consumes_nothing_but_counts() {
        let mut uri = UriStack::new("/play/Mr.Rabbit");
        assert!(uri.strip_prefix(""));
        assert_eq!(uri.current(), "/play/Mr.Rabbit");
        assert_eq!(uri.depth(), 1);
    }

    #[test]
    fn test_restore_to() {
        let mut uri = UriStack::new("/a/b/c");
        uri.strip_prefix("/a");
        uri.strip_prefix("/b");
        uri.strip_prefix("/c");
        uri.restore_to(1);
        assert_eq!(uri.current(), "/b/c");
        assert_eq!(uri.depth(), 1);
    }
}
