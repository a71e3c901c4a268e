//! Ordered session registry.
//!
//! Insertion order is tab order: the entry at position N is always tab N.
//! Every mutation that moves an entry reports the entry's new position to the
//! installed [`IndexObserver`] before returning, so per-entry state such as
//! "which tab am I" never goes stale.
//!
//! Out-of-range indices are programming errors and panic.

/// Receives the new position of every entry a mutation moved.
pub trait IndexObserver<T> {
    fn on_reindex(&mut self, entry: &mut T, index: usize);
}

/// Observer that ignores every notification. Installed by default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl<T> IndexObserver<T> for NoopObserver {
    fn on_reindex(&mut self, _entry: &mut T, _index: usize) {}
}

/// Entries that track their own registry position.
pub trait Reindex {
    fn set_index(&mut self, index: usize);
}

/// Observer that forwards every notification to [`Reindex::set_index`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SelfReindex;

impl<T: Reindex> IndexObserver<T> for SelfReindex {
    fn on_reindex(&mut self, entry: &mut T, index: usize) {
        entry.set_index(index);
    }
}

/// Initial slot count of the first allocation.
const INITIAL_CAPACITY: usize = 2;

pub struct SessionRegistry<T> {
    entries: Vec<T>,
    capacity: usize,
    observer: Box<dyn IndexObserver<T>>,
}

impl<T: 'static> Default for SessionRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> SessionRegistry<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            capacity: 0,
            observer: Box::new(NoopObserver),
        }
    }

    pub fn with_observer(observer: impl IndexObserver<T> + 'static) -> Self {
        let mut registry = Self::new();
        registry.reset(Box::new(observer));
        registry
    }

    /// Discard all entries and install `observer` for later mutations.
    pub fn reset(&mut self, observer: Box<dyn IndexObserver<T>>) {
        self.entries = Vec::new();
        self.capacity = 0;
        self.observer = observer;
    }

    /// Insert `entry` at `index`, shifting `[index, len)` one slot right.
    ///
    /// Shifted entries are reported right to left, then the new entry.
    pub fn insert(&mut self, index: usize, entry: T) {
        assert!(
            index <= self.entries.len(),
            "registry insert index {index} out of range (len {})",
            self.entries.len()
        );
        if self.entries.len() == self.capacity {
            self.grow();
        }

        self.entries.insert(index, entry);
        for i in (index + 1..self.entries.len()).rev() {
            self.observer.on_reindex(&mut self.entries[i], i);
        }
        self.observer.on_reindex(&mut self.entries[index], index);
    }

    /// Remove and return the entry at `index`, shifting the tail left.
    ///
    /// The caller owns the returned entry and is responsible for tearing it down.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.entries.len(),
            "registry remove index {index} out of range (len {})",
            self.entries.len()
        );
        let removed = self.entries.remove(index);
        for i in index..self.entries.len() {
            self.observer.on_reindex(&mut self.entries[i], i);
        }
        removed
    }

    /// Move the entry at `index` to `new_index`, rotating the entries between.
    pub fn exchange(&mut self, index: usize, new_index: usize) {
        let len = self.entries.len();
        assert!(
            index < len && new_index < len,
            "registry exchange {index} -> {new_index} out of range (len {len})"
        );
        if index == new_index {
            return;
        }

        if index < new_index {
            self.entries[index..=new_index].rotate_left(1);
            for i in index..=new_index {
                self.observer.on_reindex(&mut self.entries[i], i);
            }
        } else {
            self.entries[new_index..=index].rotate_right(1);
            for i in (new_index..=index).rev() {
                self.observer.on_reindex(&mut self.entries[i], i);
            }
        }
    }

    pub fn get(&self, index: usize) -> &T {
        assert!(
            index < self.entries.len(),
            "registry get index {index} out of range (len {})",
            self.entries.len()
        );
        &self.entries[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut T {
        assert!(
            index < self.entries.len(),
            "registry get index {index} out of range (len {})",
            self.entries.len()
        );
        &mut self.entries[index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slots allocated; starts at 2 and doubles when full.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.entries.iter_mut()
    }

    pub fn position(&self, predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.entries.iter().position(predicate)
    }

    /// Remove every entry, returning them in order without reindexing.
    pub fn drain_all(&mut self) -> Vec<T> {
        self.capacity = 0;
        std::mem::take(&mut self.entries)
    }

    fn grow(&mut self) {
        let new_capacity = if self.capacity == 0 {
            INITIAL_CAPACITY
        } else {
            self.capacity * 2
        };
        self.entries
            .reserve_exact(new_capacity - self.entries.len());
        log::trace!(
            "Session registry grew from {} to {} slots",
            self.capacity,
            new_capacity
        );
        self.capacity = new_capacity;
    }
}
