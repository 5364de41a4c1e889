//! `WPtr` — the weak observer of a shared value.

use core::any::Any;
use core::fmt;
use std::rc::Weak;

use super::{upgrade_parts, SPtr};
use crate::cast::{prim, tag, CastAs, Castable, Widen};
use crate::live::Watch;

/// A weak handle tracking a shared value without extending its lifetime.
///
/// A `WPtr` is not a pointer in its own right: the only way to reach the
/// value is [`lock`](WPtr::lock), which yields an [`SPtr`] — null once the
/// last strong handle has released the value.
///
/// ```
/// use ward::{make_sptr, WPtr};
///
/// let strong = make_sptr(7_i32);
/// let weak: WPtr<i32> = strong.downgrade();
/// assert_eq!(weak.lock().value_or(0), 7);
///
/// drop(strong);
/// assert!(weak.lock().is_null());
/// ```
pub struct WPtr<T: ?Sized> {
    value: Weak<T>,
    watch: Watch,
}

impl<T> WPtr<T> {
    /// Creates a weak handle that observes nothing and never locks.
    pub fn null() -> Self {
        Self {
            value: Weak::new(),
            watch: Watch::forever(),
        }
    }
}

impl<T: ?Sized> WPtr<T> {
    pub(crate) fn from_parts(value: Weak<T>, watch: Watch) -> Self {
        Self { value, watch }
    }

    /// Re-acquires a strong handle on the observed value, or a null handle
    /// if every strong handle is gone.
    pub fn lock(&self) -> SPtr<T> {
        SPtr::from_core(upgrade_parts(&self.value, &self.watch))
    }

    /// How many strong handles currently retain the observed value.
    pub fn strong_count(&self) -> usize {
        self.value.strong_count()
    }

    /// Whether the observed value is already gone (or nothing was ever
    /// observed).
    pub fn is_expired(&self) -> bool {
        self.value.strong_count() == 0
    }
}

impl<T: ?Sized> Clone for WPtr<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            watch: self.watch.clone(),
        }
    }
}

impl<T> Default for WPtr<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized> fmt::Debug for WPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_expired() {
            f.write_str("WPtr(expired)")
        } else {
            write!(f, "WPtr({} strong)", self.strong_count())
        }
    }
}

impl<U: ?Sized, T> CastAs<T, tag::Reinterpret> for WPtr<U> {
    type Output = WPtr<T>;

    unsafe fn cast_as(self) -> WPtr<T> {
        WPtr {
            // SAFETY: forwarded to the caller of `cast_reinterpret`; the
            // target must additionally match the observed allocation's
            // alignment for the weak bookkeeping to stay layout-correct.
            value: unsafe { prim::reinterpret_weak::<U, T>(self.value) },
            watch: self.watch,
        }
    }
}

impl<U: ?Sized, T> CastAs<T, tag::Static> for WPtr<U> {
    type Output = WPtr<T>;

    unsafe fn cast_as(self) -> WPtr<T> {
        WPtr {
            // SAFETY: the caller of `cast_static` asserts the pointee is a `T`.
            value: unsafe { prim::static_weak::<U, T>(self.value) },
            watch: self.watch,
        }
    }
}

impl<T: ?Sized> Widen for WPtr<T> {
    type Pointee = T;
    type Output<U: ?Sized> = WPtr<U>;

    unsafe fn widen_with<U: ?Sized>(
        self,
        coerce: impl FnOnce(*mut T) -> *mut U,
    ) -> WPtr<U> {
        WPtr {
            // SAFETY: `coerce` is a pure unsizing cast per the `Widen`
            // contract; the weak bookkeeping stays on the same allocation
            // (or on the dangling sentinel for a null handle).
            value: unsafe {
                Weak::from_raw(coerce(Weak::into_raw(self.value) as *mut T).cast_const())
            },
            watch: self.watch,
        }
    }
}

impl<U: Castable + ?Sized, T: Any> CastAs<T, tag::Dynamic> for WPtr<U> {
    type Output = WPtr<T>;

    unsafe fn cast_as(self) -> WPtr<T> {
        let verified = match self.value.upgrade() {
            Some(strong) => strong.as_any().is::<T>(),
            None => false,
        };
        if verified {
            // SAFETY: the dynamic type was just verified to be exactly `T`.
            unsafe { <Self as CastAs<T, tag::Static>>::cast_as(self) }
        } else {
            WPtr::null()
        }
    }
}
