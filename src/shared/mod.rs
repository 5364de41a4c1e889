//! The shared-ownership family: [`SRef`], [`SPtr`], and [`WPtr`].
//!
//! All three wrap a reference-counted handle (`Rc`); the value lives while
//! any strong handle retains it. `SRef` is the non-nullable variant, `SPtr`
//! the nullable one, and `WPtr` the weak observer that can be upgraded back
//! into an `SPtr` with [`WPtr::lock`].
//!
//! In the safe build every strong handle also carries one clone of the
//! value's liveness anchor, so the anchor's allocation — and with it every
//! borrow taken from any handle — lives exactly as long as the value.

mod sptr;
mod sref;
mod wptr;

pub use sptr::SPtr;
pub use sref::SRef;
pub use wptr::WPtr;

use core::ptr::NonNull;
use std::rc::{Rc, Weak};

use crate::live::{Anchor, Watch};

/// Creates a non-nullable shared handle owning `value`.
pub fn make_sref<T>(value: T) -> SRef<T> {
    SRef::new(value)
}

/// Creates a nullable shared handle owning `value`.
pub fn make_sptr<T>(value: T) -> SPtr<T> {
    SPtr::new(value)
}

/// The payload of a strong shared handle: the counted value plus the
/// liveness anchor travelling with it.
pub(crate) struct SharedCore<T: ?Sized> {
    value: Rc<T>,
    anchor: Anchor,
}

impl<T> SharedCore<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value: Rc::new(value),
            anchor: Anchor::new(),
        }
    }
}

impl<T: ?Sized> SharedCore<T> {
    pub(crate) fn target(&self) -> NonNull<T> {
        NonNull::from(&*self.value)
    }

    pub(crate) fn value(&self) -> &T {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut T> {
        Rc::get_mut(&mut self.value)
    }

    pub(crate) fn watch(&self) -> Watch {
        self.anchor.watch()
    }

    pub(crate) fn strong_count(&self) -> usize {
        Rc::strong_count(&self.value)
    }

    pub(crate) fn downgrade(&self) -> (Weak<T>, Watch) {
        (Rc::downgrade(&self.value), self.anchor.watch())
    }
}

impl<T: ?Sized> Clone for SharedCore<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            anchor: self.anchor.clone(),
        }
    }
}

/// Rebuilds a strong core from the pieces a weak handle kept. `None` when
/// the value is already gone.
pub(crate) fn upgrade_parts<T: ?Sized>(value: &Weak<T>, watch: &Watch) -> Option<SharedCore<T>> {
    let value = value.upgrade()?;
    let anchor = watch.recover()?;
    Some(SharedCore { value, anchor })
}
