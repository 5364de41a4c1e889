//! `Is` — a held value that can be borrowed from.

use core::fmt;

use crate::borrow::{Ptr, Ref};
use crate::live::{Anchor, Slot};

/// A value wrapped so the borrowing family can observe its lifetime.
///
/// An `Is<T>` is used wherever a plain `T` member or local would be used,
/// when long-lived [`Ref`]/[`Ptr`] borrows of it need to exist. Assigning
/// through [`set`](Is::set) replaces the *contents* — existing borrows stay
/// valid — while dropping the `Is` ends the value's observable life.
///
/// ```
/// use ward::Is;
///
/// let slot = Is::new(3_u64);
/// let peek = slot.borrow();
/// assert_eq!(peek.with(|v| *v), 3);
/// ```
pub struct Is<T> {
    slot: Slot<T>,
    anchor: Anchor,
}

impl<T> Is<T> {
    /// Creates a held value.
    pub fn new(value: T) -> Self {
        Self {
            slot: Slot::new(value),
            anchor: Anchor::new(),
        }
    }

    /// A reference to the held value.
    pub fn get(&self) -> &T {
        self.slot.get_ref()
    }

    /// Exclusive access to the held value.
    pub fn get_mut(&mut self) -> &mut T {
        self.slot.get_mut()
    }

    /// Replaces the contents in place. Existing borrows remain valid and
    /// observe the new value.
    pub fn set(&mut self, value: T) {
        *self.slot.get_mut() = value;
    }

    /// Consumes the wrapper and returns the value.
    pub fn into_inner(self) -> T {
        self.slot.into_inner()
    }

    /// Borrows the value as a non-owning reference.
    pub fn borrow(&self) -> Ref<T> {
        Ref::watching(self.slot.target(), self.anchor.watch())
    }

    /// Borrows the value as a non-owning pointer.
    pub fn borrow_ptr(&self) -> Ptr<T> {
        self.borrow().to_ptr()
    }
}

/// Copying a held value gives the copy an independent lifetime: borrows of
/// the original do not observe the copy, and vice versa.
impl<T: Clone> Clone for Is<T> {
    fn clone(&self) -> Self {
        Self::new(self.get().clone())
    }
}

impl<T: Default> Default for Is<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for Is<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> core::ops::Deref for Is<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T> core::ops::DerefMut for Is<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T: PartialEq> PartialEq for Is<T> {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl<T: fmt::Debug> fmt::Debug for Is<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Is").field(&self.get()).finish()
    }
}
