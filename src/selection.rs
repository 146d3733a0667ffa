//! Bounded, ordered photo selection
//!
//! Insertion order is selection order; an item's badge number is its 1-based
//! position, so removing one renumbers everything picked after it.

use tracing::debug;

use crate::error::ScanError;
use crate::media::MediaId;

/// Default number of photos a scan session accepts
pub const DEFAULT_CAPACITY: usize = 8;

/// Result of a successful toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    /// Selected with this badge number
    Added { number: usize },
    /// Deselected; was holding this badge number
    Removed { number: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet<K = MediaId> {
    items: Vec<K>,
    capacity: usize,
}

impl<K> Default for SelectionSet<K> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K> SelectionSet<K> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Selected ids in selection order
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<K: PartialEq + std::fmt::Debug> SelectionSet<K> {
    pub fn contains(&self, id: &K) -> bool {
        self.items.contains(id)
    }

    /// Badge number of `id`, 1-based
    pub fn index_of(&self, id: &K) -> Option<usize> {
        self.items.iter().position(|item| item == id).map(|i| i + 1)
    }

    /// Select `id`, or deselect it if already selected
    ///
    /// Fails without changing anything when `id` is new and the set is full.
    pub fn toggle(&mut self, id: K) -> Result<Toggled, ScanError> {
        if let Some(i) = self.items.iter().position(|item| item == &id) {
            self.items.remove(i);
            debug!("Deselected {:?} ({} left)", id, self.items.len());
            return Ok(Toggled::Removed { number: i + 1 });
        }

        if self.is_full() {
            debug!("Selection full, rejecting {:?}", id);
            return Err(ScanError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        debug!("Selected {:?} as #{}", id, self.items.len() + 1);
        self.items.push(id);
        Ok(Toggled::Added {
            number: self.items.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: usize) -> MediaId {
        MediaId::new(format!("p{}", n))
    }

    #[test]
    fn test_toggle_twice_restores_set() {
        let mut selection = SelectionSet::default();
        selection.toggle(id(1)).unwrap();
        selection.toggle(id(2)).unwrap();
        let before = selection.clone();

        assert_eq!(selection.toggle(id(3)), Ok(Toggled::Added { number: 3 }));
        assert_eq!(selection.toggle(id(3)), Ok(Toggled::Removed { number: 3 }));
        assert_eq!(selection, before);
    }

    #[test]
    fn test_ninth_toggle_fails_and_changes_nothing() {
        let mut selection = SelectionSet::default();
        for n in 1..=8 {
            assert_eq!(selection.toggle(id(n)), Ok(Toggled::Added { number: n }));
        }
        assert!(selection.is_full());
        let before = selection.clone();

        assert_eq!(
            selection.toggle(id(9)),
            Err(ScanError::CapacityExceeded { capacity: 8 })
        );
        assert_eq!(selection, before);

        // Deselecting still works when full
        assert_eq!(selection.toggle(id(8)), Ok(Toggled::Removed { number: 8 }));
        assert!(selection.toggle(id(9)).is_ok());
    }

    #[test]
    fn test_removal_renumbers_later_items() {
        let mut selection = SelectionSet::default();
        for n in 1..=4 {
            selection.toggle(id(n)).unwrap();
        }
        selection.toggle(id(2)).unwrap();

        assert_eq!(selection.index_of(&id(1)), Some(1));
        assert_eq!(selection.index_of(&id(2)), None);
        assert_eq!(selection.index_of(&id(3)), Some(2));
        assert_eq!(selection.index_of(&id(4)), Some(3));
        assert!(!selection.contains(&id(2)));
        assert_eq!(
            selection.iter().cloned().collect::<Vec<_>>(),
            vec![id(1), id(3), id(4)]
        );
    }

    #[test]
    fn test_clear_and_custom_capacity() {
        let mut selection: SelectionSet<u32> = SelectionSet::new(2);
        selection.toggle(1).unwrap();
        selection.toggle(2).unwrap();
        assert!(selection.toggle(3).is_err());
        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.capacity(), 2);
    }
}
