//! Captured URL parameters.

/// Reserved key under which a trailing `*` capture is stored.
pub const WILDCARD: &str = "*";

/// Parameter values captured while matching a route pattern.
///
/// Keys are unique; setting an existing key overwrites its value. The backing
/// storage is kept across [`Params::clear`] so a pooled context doesn't
/// reallocate for every request.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a captured value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Store a value, replacing any previous value for `key`.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => {
                existing.clear();
                existing.push_str(value);
            }
            None => self.entries.push((key.to_owned(), value.to_owned())),
        }
    }

    /// Remove a value and return it.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.swap_remove(pos).1)
    }

    /// True if `key` has a captured value.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over `(key, value)` pairs. Order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of captured values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every value, keeping the allocation.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Params {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut params = Params::new();
        params.set("id", "42");
        params.set("name", "gopher");

        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("name"), Some("gopher"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_last_write_wins() {
        let mut params = Params::new();
        params.set("id", "1");
        params.set("id", "2");

        assert_eq!(params.get("id"), Some("2"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut params: Params = [("*", "a/b"), ("id", "7")].into_iter().collect();

        assert_eq!(params.remove(WILDCARD), Some("a/b".to_string()));
        assert_eq!(params.remove(WILDCARD), None);
        assert!(params.contains("id"));
    }

    #[test]
    fn test_clear() {
        let mut params = Params::new();
        params.set("id", "1");
        params.clear();

        assert!(params.is_empty());
        assert_eq!(params.get("id"), None);
    }
}
