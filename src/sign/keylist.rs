//! Ordered lists of signing keys.

use core::{fmt, slice};

use std::vec::Vec;

use tracing::{trace, warn};

use super::error::Error;
use super::key::Key;

//------------ KeyList -------------------------------------------------------

/// An ordered list of signing keys.
///
/// The list owns the keys it holds. A key pushed onto the list is moved into
/// it and handed back to the caller when it is popped off again. Keys keep
/// the order in which they were pushed.
///
/// Growing the list never aborts on allocation failure. Instead,
/// [`push`][Self::push] hands the key back inside a [`PushError`] and leaves
/// the list unchanged.
#[derive(Debug, Default)]
pub struct KeyList<'a> {
    keys: Vec<Key<'a>>,
}

impl<'a> KeyList<'a> {
    /// Popping compacts storage only if more than this many slots are free.
    const SLACK: usize = 4;

    /// Creates a new, empty key list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of keys in the list.
    pub fn count(&self) -> usize {
        self.keys.len()
    }

    /// The number of keys in the list.
    pub fn len(&self) -> usize {
        self.count()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The number of keys the list can hold without growing its storage.
    pub fn capacity(&self) -> usize {
        self.keys.capacity()
    }

    /// Returns the key at position `index`.
    ///
    /// Returns `None` if `index` is not less than the number of keys.
    pub fn get(&self, index: usize) -> Option<&Key<'a>> {
        self.keys.get(index)
    }

    /// Returns the key at position `index` for modification.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Key<'a>> {
        self.keys.get_mut(index)
    }

    /// Returns the last key of the list.
    pub fn last(&self) -> Option<&Key<'a>> {
        self.keys.last()
    }

    /// Appends a key to the end of the list.
    ///
    /// If storage for the key cannot be allocated, the list is left as it
    /// was and the key is returned in the error.
    pub fn push(&mut self, key: Key<'a>) -> Result<(), PushError<'a>> {
        if let Err(err) = self.keys.try_reserve(1) {
            warn!(count = self.keys.len(), %err, "cannot grow key list");
            return Err(PushError { key });
        }
        self.keys.push(key);
        trace!(count = self.keys.len(), "pushed key");
        Ok(())
    }

    /// Removes the last key from the list and returns it.
    ///
    /// Returns `None` if the list is empty.
    pub fn pop(&mut self) -> Option<Key<'a>> {
        let key = self.keys.pop()?;
        trace!(count = self.keys.len(), "popped key");
        self.compact();
        Some(key)
    }

    /// Removes and releases all keys.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.compact();
    }

    /// Returns an iterator over the keys.
    pub fn iter(&self) -> slice::Iter<'_, Key<'a>> {
        self.keys.iter()
    }

    /// Returns an iterator over the keys for modification.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Key<'a>> {
        self.keys.iter_mut()
    }

    /// Releases excess storage.
    ///
    /// This only gives back storage when a significant amount of it is
    /// unused. The keys are moved into a smaller allocation only if that
    /// allocation succeeds. Otherwise the list keeps its current storage.
    fn compact(&mut self) {
        let count = self.keys.len();
        if self.keys.capacity() <= (count * 2).max(Self::SLACK) {
            return;
        }
        let mut keys = Vec::new();
        if let Err(err) = keys.try_reserve_exact(count) {
            warn!(count, %err, "cannot compact key list");
            return;
        }
        keys.extend(self.keys.drain(..));
        self.keys = keys;
        trace!(count, capacity = self.keys.capacity(), "compacted");
    }
}

//--- IntoIterator

impl<'a, 'k> IntoIterator for &'k KeyList<'a> {
    type Item = &'k Key<'a>;
    type IntoIter = slice::Iter<'k, Key<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for KeyList<'a> {
    type Item = Key<'a>;
    type IntoIter = std::vec::IntoIter<Key<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}

//------------ PushError -----------------------------------------------------

/// A key could not be pushed onto a key list.
///
/// The error keeps the key so the caller retains ownership of it.
pub struct PushError<'a> {
    key: Key<'a>,
}

impl<'a> PushError<'a> {
    /// Returns the key that could not be pushed.
    pub fn into_key(self) -> Key<'a> {
        self.key
    }

    /// Returns the error kind, which is always [`Error::Allocation`].
    pub fn kind(&self) -> Error {
        Error::Allocation
    }
}

impl From<PushError<'_>> for Error {
    fn from(err: PushError<'_>) -> Self {
        err.kind()
    }
}

impl fmt::Debug for PushError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushError").finish_non_exhaustive()
    }
}

impl fmt::Display for PushError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("failed to allocate storage for key")
    }
}

impl std::error::Error for PushError<'_> {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::SigningAlgorithm;

    /// Creates a key distinguishable by its key tag.
    fn key(tag: u16) -> Key<'static> {
        let mut key = Key::new();
        key.set_algorithm(SigningAlgorithm::HMACMD5);
        key.set_hmac_material(std::vec![tag as u8; 16]);
        key.set_keytag(tag);
        key
    }

    fn tags(list: &KeyList) -> std::vec::Vec<u16> {
        list.iter().map(Key::keytag).collect()
    }

    #[test]
    fn push_get_pop() {
        let mut list = KeyList::new();
        assert_eq!(list.count(), 0);
        list.push(key(1)).unwrap();
        list.push(key(2)).unwrap();
        list.push(key(3)).unwrap();
        assert_eq!(list.count(), 3);
        assert_eq!(list.get(0).unwrap().keytag(), 1);
        assert_eq!(list.get(1).unwrap().keytag(), 2);
        assert_eq!(list.get(2).unwrap().keytag(), 3);
        assert!(list.get(3).is_none());

        let popped = list.pop().unwrap();
        assert_eq!(popped.keytag(), 3);
        assert_eq!(popped.hmac(), Some(&[3u8; 16][..]));
        assert_eq!(list.count(), 2);
        assert!(list.get(2).is_none());
    }

    #[test]
    fn pop_empty() {
        let mut list = KeyList::new();
        assert!(list.pop().is_none());
        assert_eq!(list.count(), 0);
        assert!(list.is_empty());

        list.push(key(1)).unwrap();
        assert!(list.pop().is_some());
        assert!(list.pop().is_none());
        assert_eq!(list.count(), 0);
    }

    #[test]
    fn pop_push_round_trip() {
        let mut list = KeyList::new();
        for tag in 0..10 {
            list.push(key(tag)).unwrap();
        }
        let before = tags(&list);
        let last = list.pop().unwrap();
        list.push(last).unwrap();
        assert_eq!(list.count(), 10);
        assert_eq!(tags(&list), before);
    }

    #[test]
    fn pop_compacts() {
        let mut list = KeyList::new();
        for tag in 0..64 {
            list.push(key(tag)).unwrap();
        }
        for tag in (1..64).rev() {
            assert_eq!(list.pop().unwrap().keytag(), tag);
            assert!(list.capacity() <= (list.count() * 2).max(4));
        }
        assert_eq!(list.count(), 1);
        assert_eq!(list.get(0).unwrap().keytag(), 0);
    }

    #[test]
    fn clear_and_iterate() {
        let mut list = KeyList::new();
        for tag in 0..3 {
            list.push(key(tag)).unwrap();
        }
        for key in list.iter_mut() {
            key.set_ttl(300);
        }
        assert!((&list).into_iter().all(|key| key.ttl() == 300));
        assert_eq!(list.last().unwrap().keytag(), 2);
        list.get_mut(0).unwrap().set_keytag(7);
        assert_eq!(tags(&list), [7, 1, 2]);

        let owned: std::vec::Vec<_> = list.into_iter().collect();
        assert_eq!(owned.len(), 3);

        let mut list = KeyList::new();
        list.push(key(1)).unwrap();
        list.clear();
        assert!(list.is_empty());
        assert!(list.last().is_none());
    }

    #[test]
    fn push_error() {
        let err = PushError { key: key(9) };
        assert_eq!(err.kind(), Error::Allocation);
        assert_eq!(err.to_string(), "failed to allocate storage for key");
        let key = err.into_key();
        assert_eq!(key.keytag(), 9);
        assert_eq!(Error::from(PushError { key }), Error::Allocation);
    }
}
