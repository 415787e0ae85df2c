use alloc::vec::Vec;

use super::handle::Handle;

/// Slot-based node storage with a LIFO free list.
///
/// A handle stays valid until its slot is removed; elements never move, so
/// a rebuild can relink nodes in place through their handles.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores `element` and returns its handle, recycling a freed slot when
    /// one is available.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `Handle::MAX` elements.
    pub(crate) fn insert(&mut self, element: T) -> Handle {
        if let Some(handle) = self.free.pop() {
            self.slots[handle.index()] = Some(element);
            return handle;
        }
        // Strict less-than: after the push the new index is `slots.len() - 1`,
        // which must still be representable as a `Handle`.
        assert!(
            self.slots.len() < Handle::MAX,
            "`Arena::insert()` - arena is at maximum capacity ({})",
            Handle::MAX
        );
        self.slots.push(Some(element));
        Handle::new(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.index()].as_ref().expect("`Arena::get()` - `handle` names a freed slot!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.index()].as_mut().expect("`Arena::get_mut()` - `handle` names a freed slot!")
    }

    /// Removes and returns the element at `handle`, releasing the slot.
    pub(crate) fn remove(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.index()].take().expect("`Arena::remove()` - `handle` names a freed slot!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
