//! Keyed, insertion-ordered member collections.

use indexmap::IndexMap;
use indexmap::map::Values;
use phpgen_core::{Error, MemberKind, Result};

/// A named entry of a [`MemberMap`].
pub trait Member {
    /// Kind reported by duplicate and lookup errors.
    const KIND: MemberKind;

    fn name(&self) -> &str;

    /// Lookup key for `name`. Case-sensitive unless overridden.
    fn key(name: &str) -> String {
        name.to_string()
    }
}

/// Members keyed by name, iterated in insertion order.
///
/// Adding a member whose key exists fails unless `overwrite` is requested;
/// an overwritten member keeps its original position.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberMap<T> {
    entries: IndexMap<String, T>,
}

impl<T> Default for MemberMap<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<T: Member> MemberMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `item`, returning a handle to the stored member.
    pub fn add(&mut self, item: T, overwrite: bool) -> Result<&mut T> {
        let key = T::key(item.name());
        if !overwrite && self.entries.contains_key(&key) {
            return Err(Error::duplicate(T::KIND, item.name()));
        }
        let (index, _) = self.entries.insert_full(key, item);
        Ok(&mut self.entries[index])
    }

    pub fn get(&self, name: &str) -> Result<&T> {
        self.entries
            .get(&T::key(name))
            .ok_or_else(|| Error::not_found(T::KIND, name))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut T> {
        self.entries
            .get_mut(&T::key(name))
            .ok_or_else(|| Error::not_found(T::KIND, name))
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(&T::key(name))
    }

    /// Remove a member, keeping the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<T> {
        self.entries.shift_remove(&T::key(name))
    }

    /// Replace all members.
    pub fn set(&mut self, items: impl IntoIterator<Item = T>) -> Result<()> {
        self.entries.clear();
        for item in items {
            self.add(item, false)?;
        }
        Ok(())
    }
}

impl<T> MemberMap<T> {
    pub fn iter(&self) -> Values<'_, String, T> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Last member in insertion order.
    pub fn last(&self) -> Option<&T> {
        self.entries.last().map(|(_, v)| v)
    }
}

impl<'a, T> IntoIterator for &'a MemberMap<T> {
    type Item = &'a T;
    type IntoIter = Values<'a, String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(&'static str, u8);

    impl Member for Item {
        const KIND: MemberKind = MemberKind::Method;

        fn name(&self) -> &str {
            self.0
        }

        fn key(name: &str) -> String {
            name.to_ascii_lowercase()
        }
    }

    #[test]
    fn test_duplicate_requires_overwrite() {
        let mut map = MemberMap::new();
        map.add(Item("foo", 1), false).unwrap();
        let err = map.add(Item("FOO", 2), false).unwrap_err();
        assert!(matches!(
            *err,
            Error::DuplicateMember {
                kind: MemberKind::Method,
                ..
            }
        ));

        map.add(Item("Foo", 3), true).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("foo").unwrap().1, 3);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut map = MemberMap::new();
        map.add(Item("a", 1), false).unwrap();
        map.add(Item("b", 2), false).unwrap();
        map.add(Item("a", 3), true).unwrap();
        let order: Vec<_> = map.iter().map(|i| i.1).collect();
        assert_eq!(order, vec![3, 2]);
    }

    #[test]
    fn test_missing_member() {
        let mut map: MemberMap<Item> = MemberMap::new();
        assert!(matches!(*map.get("x").unwrap_err(), Error::NotFound { .. }));
        assert!(map.remove("x").is_none());
        assert!(!map.has("x"));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map = MemberMap::new();
        map.set([Item("a", 1), Item("b", 2), Item("c", 3)]).unwrap();
        map.remove("B");
        let names: Vec<_> = map.iter().map(|i| i.0).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(map.last().map(|i| i.0), Some("c"));
    }
}
