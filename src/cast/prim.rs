//! Cast primitives — the pointer-level conversions every public cast
//! dispatches through.
//!
//! One function per handle kind (raw pointer, `Box`, `Rc`, `rc::Weak`) and
//! per cast intent. Each primitive produces exactly the address the native
//! pointer cast would produce; Rust pointer casts never adjust addresses, so
//! the `static`/`reinterpret` pairs share bodies and differ only in declared
//! intent. No validation happens here beyond the `dynamic` primitives'
//! `Any`-based type check; whatever checking exists is layered on by the
//! indirection types that consume these.

use core::any::Any;
use core::ptr::NonNull;
use std::rc::{Rc, Weak};

use super::Castable;

/// Strips mutability from a raw pointer. Always valid.
#[inline]
pub fn const_ptr<T: ?Sized>(ptr: *mut T) -> *const T {
    ptr as *const T
}

/// Restores mutability to a raw pointer.
///
/// # Safety
///
/// The caller must guarantee writable provenance: the pointer must have
/// originated from a mutable reference or allocation.
#[inline]
pub unsafe fn mut_ptr<T: ?Sized>(ptr: *const T) -> *mut T {
    ptr as *mut T
}

/// Reinterprets a raw pointer as pointing to an arbitrary other type.
///
/// # Safety
///
/// No relationship between `U` and `T` is checked; the caller owns every
/// consequence of the reinterpretation.
#[inline]
pub unsafe fn reinterpret_ptr<U: ?Sized, T>(ptr: *const U) -> *const T {
    ptr as *const T
}

/// Converts a raw pointer to a declared-compatible type without checking.
///
/// # Safety
///
/// The caller asserts the pointee really is a `T` (the usual use is
/// recovering the concrete type behind a `dyn` pointer).
#[inline]
pub unsafe fn static_ptr<U: ?Sized, T>(ptr: *const U) -> *const T {
    ptr as *const T
}

/// Run-time-verified conversion of a reference to a concrete type.
///
/// Returns the target-typed address when the referent's dynamic type is
/// exactly `T`, `None` otherwise. This check runs in both builds.
#[inline]
pub fn dynamic_ptr<U: Castable + ?Sized, T: Any>(value: &U) -> Option<NonNull<T>> {
    let any = value.as_any();
    if any.is::<T>() {
        NonNull::new(any as *const dyn Any as *const T as *mut T)
    } else {
        None
    }
}

/// Reinterprets an owning handle.
///
/// # Safety
///
/// As [`reinterpret_ptr`], and additionally `T` must have the same size and
/// alignment as the allocated value so the eventual deallocation is layout-
/// correct.
pub unsafe fn reinterpret_box<U: ?Sized, T>(handle: Box<U>) -> Box<T> {
    unsafe { Box::from_raw(Box::into_raw(handle) as *mut T) }
}

/// Converts an owning handle to a declared-compatible type without checking.
///
/// # Safety
///
/// As [`static_ptr`]; the allocation layout constraint holds automatically
/// when `T` is the pointee's concrete type.
pub unsafe fn static_box<U: ?Sized, T>(handle: Box<U>) -> Box<T> {
    unsafe { Box::from_raw(Box::into_raw(handle) as *mut T) }
}

/// Reinterprets a shared handle.
///
/// # Safety
///
/// As [`reinterpret_box`].
pub unsafe fn reinterpret_rc<U: ?Sized, T>(handle: Rc<U>) -> Rc<T> {
    unsafe { Rc::from_raw(Rc::into_raw(handle) as *const T) }
}

/// Converts a shared handle to a declared-compatible type without checking.
///
/// # Safety
///
/// As [`static_box`].
pub unsafe fn static_rc<U: ?Sized, T>(handle: Rc<U>) -> Rc<T> {
    unsafe { Rc::from_raw(Rc::into_raw(handle) as *const T) }
}

/// Reinterprets a weak shared handle.
///
/// # Safety
///
/// As [`reinterpret_rc`].
pub unsafe fn reinterpret_weak<U: ?Sized, T>(handle: Weak<U>) -> Weak<T> {
    unsafe { Weak::from_raw(Weak::into_raw(handle) as *const T) }
}

/// Converts a weak shared handle to a declared-compatible type without
/// checking.
///
/// # Safety
///
/// As [`static_rc`].
pub unsafe fn static_weak<U: ?Sized, T>(handle: Weak<U>) -> Weak<T> {
    unsafe { Weak::from_raw(Weak::into_raw(handle) as *const T) }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Named: Castable {
        fn name(&self) -> &'static str;
    }

    struct Alpha;
    impl Named for Alpha {
        fn name(&self) -> &'static str {
            "alpha"
        }
    }

    #[test]
    fn dynamic_ptr_accepts_the_exact_type() {
        let alpha = Alpha;
        let erased: &dyn Named = &alpha;
        let recovered = dynamic_ptr::<dyn Named, Alpha>(erased).expect("type matches");
        assert_eq!(recovered.as_ptr() as *const (), erased as *const dyn Named as *const ());
    }

    #[test]
    fn dynamic_ptr_rejects_other_types() {
        let alpha = Alpha;
        let erased: &dyn Named = &alpha;
        assert!(dynamic_ptr::<dyn Named, String>(erased).is_none());
    }

    #[test]
    fn rc_round_trip_preserves_the_address() {
        let rc: Rc<Alpha> = Rc::new(Alpha);
        let before = Rc::as_ptr(&rc) as *const ();
        let erased: Rc<dyn Named> =
            unsafe { Rc::from_raw(Rc::into_raw(rc) as *const dyn Named) };
        // SAFETY: the erased handle's pointee really is an `Alpha`.
        let concrete: Rc<Alpha> = unsafe { static_rc::<dyn Named, Alpha>(erased) };
        assert_eq!(Rc::as_ptr(&concrete) as *const (), before);
    }
}
