//! The borrowing family: [`Ref`] and [`Ptr`].
//!
//! Borrowing indirections do not own anything; they record an address and,
//! in the safe build, a [`Watch`](crate::live) on the owner's liveness
//! anchor. Resolving one answers "where is the value *now*": a live watch
//! yields the recorded address, an expired one yields nothing, and the
//! owner never learns it is being observed.
//!
//! In the fast build a `Ref` is exactly a `NonNull<T>` and a `Ptr` exactly
//! an `Option<NonNull<T>>`; nothing is tracked and the caller carries the
//! usual raw-pointer obligations (documented on the crate root).

mod pointer;
mod reference;

pub use pointer::Ptr;
pub use reference::Ref;

use core::ptr::NonNull;

use crate::live::Watch;

/// Borrows arbitrary data as a non-owning reference, bypassing liveness
/// tracking.
///
/// Intended for `static` or otherwise externally managed data; for actual
/// statics prefer the safe [`Ref::from_static`].
///
/// # Safety
///
/// The data must outlive every use of the resulting reference (and of
/// everything derived from it); neither build can detect a violation.
pub unsafe fn unsafe_ref<T: ?Sized>(value: &T) -> Ref<T> {
    Ref::from_core(BorrowCore::unchecked(NonNull::from(value)))
}

/// Borrows arbitrary data as a non-owning pointer, bypassing liveness
/// tracking.
///
/// # Safety
///
/// As [`unsafe_ref`].
pub unsafe fn unsafe_ptr<T: ?Sized>(value: &T) -> Ptr<T> {
    Ptr::from_core(Some(BorrowCore::unchecked(NonNull::from(value))))
}

/// The recorded address plus the liveness probe guarding it.
pub(crate) struct BorrowCore<T: ?Sized> {
    target: NonNull<T>,
    watch: Watch,
}

impl<T: ?Sized> BorrowCore<T> {
    pub(crate) fn watching(target: NonNull<T>, watch: Watch) -> Self {
        Self { target, watch }
    }

    pub(crate) fn unchecked(target: NonNull<T>) -> Self {
        Self {
            target,
            watch: Watch::forever(),
        }
    }

    /// The recorded address if the watched value is still alive, `None`
    /// otherwise. Never fails.
    pub(crate) fn peek(&self) -> Option<NonNull<T>> {
        if self.watch.alive() {
            Some(self.target)
        } else {
            None
        }
    }

    /// Splits the core into its recorded address and watch.
    pub(crate) fn into_parts(self) -> (NonNull<T>, Watch) {
        (self.target, self.watch)
    }
}

impl<T: ?Sized> Clone for BorrowCore<T> {
    fn clone(&self) -> Self {
        Self {
            target: self.target,
            watch: self.watch.clone(),
        }
    }
}

/// The currently resolved address as an integer, thin and metadata-free;
/// zero for null or dangling. This is what the borrow-family comparisons
/// order by.
pub(crate) fn resolved_addr<T: ?Sized>(target: Option<NonNull<T>>) -> usize {
    target.map_or(0, |ptr| ptr.as_ptr() as *const () as usize)
}
