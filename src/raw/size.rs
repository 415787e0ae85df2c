use core::num::NonZero;

#[cfg(test)]
type RawSize = u16;
#[cfg(not(test))]
type RawSize = u32;

/// An element count for a subtree, sharing [`Handle`]'s range so the node
/// sizes can never exceed what the arena can address.
///
/// Like `Handle`, the count is stored shifted by one in a `NonZero` purely
/// for the niche; `Size::ZERO` is a valid, ordinary value.
///
/// [`Handle`]: super::handle::Handle
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub(crate) struct Size(NonZero<RawSize>);

impl Size {
    pub(crate) const MAX: usize = (RawSize::MAX - 1) as usize;
    pub(crate) const ZERO: Self = Self::new(0);
    pub(crate) const ONE: Self = Self::new(1);

    #[inline]
    pub(crate) const fn new(count: usize) -> Self {
        assert!(count <= Self::MAX, "`Size::new()` - `count` exceeds `Size::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        let shifted = count as RawSize + 1;
        match NonZero::new(shifted) {
            Some(raw) => Self(raw),
            // Unreachable: `count + 1` is at least 1 and at most RawSize::MAX.
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn get(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
