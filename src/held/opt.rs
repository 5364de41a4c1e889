//! `Opt` — an optional held value that can be borrowed from.

use core::fmt;

use crate::borrow::{Ptr, Ref};
use crate::live::{Anchor, Slot};
use crate::violation::null_access;

/// An optional value wrapped so the borrowing family can observe its
/// lifetime.
///
/// Each occupancy is a distinct life: [`insert`](Opt::insert),
/// [`reset`](Opt::reset), [`take`](Opt::take), and [`swap`](Opt::swap) all
/// end the current value's observable life, so borrows taken before the
/// transition are detected as dangling afterwards (safe build).
///
/// ```
/// use ward::Opt;
///
/// let mut maybe: Opt<&str> = Opt::empty();
/// assert!(maybe.is_none());
///
/// maybe.insert("present");
/// assert_eq!(maybe.value_or("absent"), "present");
///
/// maybe.reset();
/// assert_eq!(maybe.value_or("absent"), "absent");
/// ```
pub struct Opt<T> {
    cell: Option<(Slot<T>, Anchor)>,
}

impl<T> Opt<T> {
    /// Creates an empty wrapper.
    pub fn empty() -> Self {
        Self { cell: None }
    }

    /// Creates a wrapper holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            cell: Some((Slot::new(value), Anchor::new())),
        }
    }

    /// Whether a value is held.
    pub fn is_some(&self) -> bool {
        self.cell.is_some()
    }

    /// Whether the wrapper is empty.
    pub fn is_none(&self) -> bool {
        self.cell.is_none()
    }

    /// Stores `value`, dropping any previous value, and returns exclusive
    /// access to it. Starts a fresh observable life.
    pub fn insert(&mut self, value: T) -> &mut T {
        let (slot, _) = self.cell.insert((Slot::new(value), Anchor::new()));
        slot.get_mut()
    }

    /// Drops the held value, if any.
    pub fn reset(&mut self) {
        self.cell = None;
    }

    /// Moves the held value out, leaving the wrapper empty.
    pub fn take(&mut self) -> Option<T> {
        self.cell.take().map(|(slot, _)| slot.into_inner())
    }

    /// Exchanges contents with another wrapper.
    ///
    /// Both sides begin fresh observable lives: borrows taken from either
    /// wrapper before the swap are detected as dangling afterwards (safe
    /// build), even though the values themselves survive under new owners.
    pub fn swap(&mut self, other: &mut Opt<T>) {
        core::mem::swap(&mut self.cell, &mut other.cell);
        for side in [&mut self.cell, &mut other.cell] {
            if let Some((_, anchor)) = side {
                anchor.renew();
            }
        }
    }

    /// A reference to the held value, or `None` when empty.
    pub fn get(&self) -> Option<&T> {
        self.cell.as_ref().map(|(slot, _)| slot.get_ref())
    }

    /// Exclusive access to the held value, or `None` when empty.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.cell.as_mut().map(|(slot, _)| slot.get_mut())
    }

    /// The held value, cloned, or `default` when empty.
    pub fn value_or(&self, default: T) -> T
    where
        T: Clone,
    {
        self.get().cloned().unwrap_or(default)
    }

    /// Borrows the value as a non-owning reference.
    ///
    /// An empty wrapper fails: the safe build raises a null-reference
    /// violation, the fast build panics.
    pub fn borrow(&self) -> Ref<T> {
        match &self.cell {
            Some((slot, anchor)) => Ref::watching(slot.target(), anchor.watch()),
            None => null_access("borrowed a reference from an empty optional"),
        }
    }

    /// Borrows the value as a non-owning pointer; empty borrows null.
    pub fn borrow_ptr(&self) -> Ptr<T> {
        match &self.cell {
            Some((slot, anchor)) => Ref::watching(slot.target(), anchor.watch()).to_ptr(),
            None => Ptr::null(),
        }
    }
}

/// Copying gives the copy an independent lifetime, exactly as for
/// [`Is`](crate::Is).
impl<T: Clone> Clone for Opt<T> {
    fn clone(&self) -> Self {
        match self.get() {
            Some(value) => Self::new(value.clone()),
            None => Self::empty(),
        }
    }
}

impl<T> Default for Opt<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<T> for Opt<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> From<Option<T>> for Opt<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::new(value),
            None => Self::empty(),
        }
    }
}

impl<T> core::ops::Deref for Opt<T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self.get() {
            Some(value) => value,
            None => null_access("dereferenced an empty optional"),
        }
    }
}

impl<T> core::ops::DerefMut for Opt<T> {
    fn deref_mut(&mut self) -> &mut T {
        match self.get_mut() {
            Some(value) => value,
            None => null_access("dereferenced an empty optional"),
        }
    }
}

impl<T: PartialEq> PartialEq for Opt<T> {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl<T: fmt::Debug> fmt::Debug for Opt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("Opt").field(&value).finish(),
            None => f.write_str("Opt(empty)"),
        }
    }
}
