use core::num::NonZero;

// Test builds use a narrow handle so the capacity limits stay reachable
// from unit tests.
#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Index of a node slot in the arena.
///
/// Stored shifted by one inside a `NonZero` so that `Option<Handle>` has the
/// same layout as `Handle`; a node carries three optional links and two
/// optional-free sizes, so the niche matters.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// Largest representable index; also the arena's maximum element count.
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::new()` - `index` exceeds `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        let shifted = index as RawHandle + 1;
        match NonZero::new(shifted) {
            Some(raw) => Self(raw),
            // Unreachable: `index + 1` is at least 1 and at most RawHandle::MAX.
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
