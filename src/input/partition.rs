//! Active-set container
//!
//! [`ActiveSet`] keeps its entries split into an active prefix and an
//! inactive suffix:
//!
//! ```text
//! entries: [ a0 a1 a2 | i0 i1 ]
//!                     ^ active_len
//! ```
//!
//! Toggling an entry moves it across the boundary instead of flipping a flag,
//! so iterating the active entries never has to look at inactive ones.
//! Order inside each partition is not stable once entries have been toggled.
//!
//! Entries are addressed by [`Handle`]s. Handles come from a counter that
//! only increases, so a handle is never reused after its entry is removed and
//! stays valid however the backing storage gets reshuffled.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Stable identifier for an entry in an [`ActiveSet`] or observer list
///
/// `T` is the kind of entry the handle addresses. Every container counts
/// from zero, so the type parameter is what keeps a set handle from being
/// handed to a handler set:
///
/// ```compile_fail
/// use goldcore::input::{KeyboardDispatcher, KeyboardHandler, KeyboardSet};
///
/// let mut dispatcher = KeyboardDispatcher::new();
/// let set_handle = dispatcher.add(KeyboardSet::new());
///
/// let mut set = KeyboardSet::new();
/// set.add(KeyboardHandler::new());
/// set.remove(set_handle);
/// ```
pub struct Handle<T> {
    id: u64,
    _kind: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    fn new(id: u64) -> Self {
        Self {
            id,
            _kind: PhantomData,
        }
    }

    /// The raw id, for logging
    pub fn id(&self) -> u64 {
        self.id
    }
}

// Manual impls: derives would put bounds on `T`

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> PartialOrd for Handle<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Handle<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.id)
    }
}

impl<T> fmt::Display for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}

/// Hands out fresh [`Handle`]s
#[derive(Debug, Default)]
pub(crate) struct HandleAllocator {
    next: u64,
}

impl HandleAllocator {
    pub(crate) fn next<T>(&mut self) -> Handle<T> {
        let handle = Handle::new(self.next);
        self.next += 1;
        handle
    }
}

#[derive(Debug)]
struct Entry<T> {
    handle: Handle<T>,
    item: T,
}

/// Ordered collection partitioned into active and inactive entries
///
/// Lookups by handle are linear scans. The sets this is built for hold a
/// handful of entries.
#[derive(Debug)]
pub struct ActiveSet<T> {
    entries: Vec<Entry<T>>,
    active_len: usize,
    handles: HandleAllocator,
}

impl<T> ActiveSet<T> {
    /// Creates an empty set
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            active_len: 0,
            handles: HandleAllocator::default(),
        }
    }

    /// Adds an entry and returns its handle. New entries start active.
    pub fn insert(&mut self, item: T) -> Handle<T> {
        let handle = self.handles.next();
        self.entries.push(Entry { handle, item });

        // Swap the new entry to the front of the inactive partition, then
        // grow the active partition over it
        let last = self.entries.len() - 1;
        self.entries.swap(self.active_len, last);
        self.active_len += 1;

        handle
    }

    /// Removes an entry, returning it. Unknown handles are ignored.
    pub fn remove(&mut self, handle: Handle<T>) -> Option<T> {
        let index = self.index_of(handle)?;
        let entry = self.entries.remove(index);
        if index < self.active_len {
            self.active_len -= 1;
        }
        Some(entry.item)
    }

    /// Moves an entry into or out of the active partition
    ///
    /// Returns false if the handle is unknown. Setting the state an entry
    /// already has is a no-op.
    pub fn set_active(&mut self, handle: Handle<T>, active: bool) -> bool {
        let Some(index) = self.index_of(handle) else {
            return false;
        };

        if (index < self.active_len) == active {
            return true;
        }

        if active {
            self.entries.swap(index, self.active_len);
            self.active_len += 1;
        } else {
            let entry = self.entries.remove(index);
            self.entries.push(entry);
            self.active_len -= 1;
        }

        true
    }

    /// Returns true if the entry exists and is in the active partition
    pub fn is_active(&self, handle: Handle<T>) -> bool {
        self.index_of(handle)
            .is_some_and(|index| index < self.active_len)
    }

    /// Returns true if the handle refers to a live entry
    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.index_of(handle).is_some()
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        self.index_of(handle).map(|index| &self.entries[index].item)
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.index_of(handle)
            .map(move |index| &mut self.entries[index].item)
    }

    /// Iterates the active partition in storage order
    pub fn active(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries[..self.active_len].iter().map(|entry| &entry.item)
    }

    /// Iterates every entry with its handle and activation state
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T, bool)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.handle, &entry.item, index < self.active_len))
    }

    /// Handles in storage order, active ones first
    pub fn handles(&self) -> Vec<Handle<T>> {
        self.entries.iter().map(|entry| entry.handle).collect()
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of entries in the active partition
    pub fn active_len(&self) -> usize {
        self.active_len
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn index_of(&self, handle: Handle<T>) -> Option<usize> {
        self.entries.iter().position(|entry| entry.handle == handle)
    }
}

impl<T> Default for ActiveSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Every entry before the boundary must report active, every entry after
    /// it inactive.
    fn assert_partitioned<T>(set: &ActiveSet<T>) {
        for (index, (handle, _, active)) in set.iter().enumerate() {
            assert_eq!(active, index < set.active_len());
            assert_eq!(set.is_active(handle), active, "{handle} misreported");
        }
    }

    fn active_items(set: &ActiveSet<&'static str>) -> Vec<&'static str> {
        let mut items: Vec<_> = set.active().copied().collect();
        items.sort_unstable();
        items
    }

    #[test]
    fn test_insert_starts_active() {
        let mut set = ActiveSet::new();
        let a = set.insert("a");
        let b = set.insert("b");

        assert!(set.is_active(a));
        assert!(set.is_active(b));
        assert_eq!(set.active_len(), 2);
        assert_partitioned(&set);
    }

    #[test]
    fn test_insert_after_deactivation_keeps_partition() {
        let mut set = ActiveSet::new();
        let a = set.insert("a");
        let _b = set.insert("b");
        set.set_active(a, false);

        let c = set.insert("c");

        assert!(set.is_active(c));
        assert!(!set.is_active(a));
        assert_eq!(active_items(&set), vec!["b", "c"]);
        assert_partitioned(&set);
    }

    #[test]
    fn test_handles_are_never_reused() {
        let mut set = ActiveSet::new();
        let a = set.insert(1);
        set.remove(a);
        let b = set.insert(2);

        assert_ne!(a, b);
        assert!(b > a);
        assert_eq!(set.get(a), None);
        assert_eq!(set.get(b), Some(&2));
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut set = ActiveSet::new();
        let a = set.insert("a");
        let b = set.insert("b");
        let c = set.insert("c");

        assert!(set.set_active(b, false));
        assert_eq!(active_items(&set), vec!["a", "c"]);
        assert_partitioned(&set);

        // Deactivating twice changes nothing
        assert!(set.set_active(b, false));
        assert_eq!(set.active_len(), 2);

        assert!(set.set_active(b, true));
        assert_eq!(active_items(&set), vec!["a", "b", "c"]);
        assert_partitioned(&set);

        assert!(set.set_active(a, false));
        assert!(set.set_active(c, false));
        assert_eq!(active_items(&set), vec!["b"]);
        assert_partitioned(&set);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut set = ActiveSet::new();
        let a = set.insert("a");
        let b = set.insert("b");
        set.set_active(b, false);

        assert_eq!(set.remove(a), Some("a"));
        let after_first: Vec<_> = set.iter().map(|(h, item, active)| (h, *item, active)).collect();

        assert_eq!(set.remove(a), None);
        let after_second: Vec<_> = set.iter().map(|(h, item, active)| (h, *item, active)).collect();

        assert_eq!(after_first, after_second);
        assert_eq!(set.active_len(), 0);
        assert_partitioned(&set);
    }

    #[test]
    fn test_remove_inactive_keeps_active_len() {
        let mut set = ActiveSet::new();
        let a = set.insert("a");
        let b = set.insert("b");
        set.set_active(a, false);

        set.remove(a);

        assert_eq!(set.active_len(), 1);
        assert!(set.is_active(b));
        assert_partitioned(&set);
    }

    #[test]
    fn test_unknown_handle_is_noop() {
        let mut set: ActiveSet<u8> = ActiveSet::new();
        let mut other = ActiveSet::new();
        let foreign = other.insert(0u8);
        other.insert(1u8);
        let unknown = other.insert(2u8);

        assert!(!set.set_active(unknown, true));
        assert!(!set.is_active(foreign));
        assert_eq!(set.remove(unknown), None);
        assert!(set.is_empty());
    }

    /// Deterministic pseudo-random sequence of operations; the partition must
    /// hold after each one.
    #[test]
    fn test_partition_holds_under_mixed_operations() {
        let mut set = ActiveSet::new();
        let mut live = Vec::new();
        let mut seed: u32 = 0x2545_f491;

        for step in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;

            match seed % 4 {
                0 | 1 if live.len() < 16 => live.push(set.insert(step)),
                2 if !live.is_empty() => {
                    let handle = live.remove(seed as usize % live.len());
                    set.remove(handle);
                }
                _ if !live.is_empty() => {
                    let handle = live[seed as usize % live.len()];
                    set.set_active(handle, seed & 0x100 != 0);
                }
                _ => live.push(set.insert(step)),
            }

            assert_eq!(set.len(), live.len());
            assert_partitioned(&set);
        }
    }
}
