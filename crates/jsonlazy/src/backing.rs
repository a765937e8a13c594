use alloc::boxed::Box;
use core::ops::Deref;

/// The bytes behind a lazy value: the tokenizer's scan buffer, or a private
/// copy once the value has been detached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Backing<'a> {
    /// Borrowed from the tokenizer; aliased by every value over it and
    /// never written through.
    Shared(&'a [u8]),
    /// Exactly the bytes of the value's original slice.
    Owned(Box<[u8]>),
}

impl Backing<'_> {
    #[inline]
    #[must_use]
    pub(crate) fn as_slice(&self) -> &[u8] {
        match self {
            Backing::Shared(bytes) => bytes,
            Backing::Owned(bytes) => bytes,
        }
    }

    #[must_use]
    pub(crate) fn is_owned(&self) -> bool {
        matches!(self, Backing::Owned(_))
    }
}

impl Deref for Backing<'_> {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}
