use std::collections::BTreeSet;

/// Literal surface strings whose tokens must be rendered emphasized.
///
/// Backed by an ordered set, so two sets holding the same words compare equal
/// and iterate identically no matter the order they were collected in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HighlightSet(BTreeSet<String>);

impl HighlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a surface. Empty strings are ignored.
    pub fn insert(&mut self, surface: impl Into<String>) -> bool {
        let surface = surface.into();
        if surface.is_empty() {
            return false;
        }
        self.0.insert(surface)
    }

    pub fn contains(&self, surface: &str) -> bool {
        self.0.contains(surface)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Surfaces in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for HighlightSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for surface in iter {
            set.insert(surface);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_independent_equality() {
        let a: HighlightSet = ["食べ", "る"].into_iter().collect();
        let b: HighlightSet = ["る", "食べ", "る"].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.iter().collect::<Vec<_>>(), b.iter().collect::<Vec<_>>());
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn empty_surfaces_ignored() {
        let mut set = HighlightSet::new();
        assert!(!set.insert(""));
        assert!(set.is_empty());
        assert!(set.insert("猫"));
        assert!(!set.insert("猫"));
        assert!(set.contains("猫"));
        assert!(!set.contains("犬"));
    }
}
