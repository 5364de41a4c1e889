//! `SRef` — the non-nullable shared handle.

use core::any::Any;
use core::fmt;
use std::rc::Rc;

use super::{SharedCore, SPtr, WPtr};
use crate::borrow::{Ptr, Ref};
use crate::cast::{prim, tag, CastAs, CastClever, Castable, Widen};
use crate::violation::{self, ward_assert, ViolationKind};

/// A shared, reference-counted handle that always refers to a value.
///
/// There is no default constructor, no null state, and no `reset`: every
/// `SRef` that exists refers to a live value, and the value lives at least
/// as long as any `SRef`/[`SPtr`] clone of it.
///
/// ```
/// use ward::make_sref;
///
/// let counter = make_sref(41_u32);
/// let alias = counter.clone();
/// assert_eq!(*alias + 1, 42);
/// ```
///
/// Non-nullability is structural, so this does not compile:
///
/// ```compile_fail
/// let broken: ward::SRef<u32> = Default::default();
/// ```
///
/// Neither does conversion across unrelated pointee types — only the
/// explicit cast API crosses that line:
///
/// ```compile_fail
/// let number = ward::make_sref(5_i32);
/// let text: ward::SRef<String> = number;
/// ```
pub struct SRef<T: ?Sized> {
    pub(crate) core: SharedCore<T>,
}

impl<T> SRef<T> {
    /// Creates a new shared handle owning `value`.
    pub fn new(value: T) -> Self {
        Self {
            core: SharedCore::new(value),
        }
    }
}

impl<T: ?Sized> SRef<T> {
    /// A reference to the shared value.
    pub fn get(&self) -> &T {
        self.core.value()
    }

    /// Exclusive access to the value, available only while this is the sole
    /// strong handle and no [`WPtr`] observes it.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.core.value_mut()
    }

    /// How many strong handles (`SRef`/[`SPtr`]) share the value.
    pub fn strong_count(&self) -> usize {
        self.core.strong_count()
    }

    /// Widens to the nullable variant. Never fails.
    pub fn to_sptr(&self) -> SPtr<T> {
        SPtr::from_core(Some(self.core.clone()))
    }

    /// Starts weakly observing the value without extending its lifetime.
    pub fn downgrade(&self) -> WPtr<T> {
        let (value, watch) = self.core.downgrade();
        WPtr::from_parts(value, watch)
    }

    /// Borrows the value as a non-owning reference.
    pub fn borrow(&self) -> Ref<T> {
        Ref::watching(self.core.target(), self.core.watch())
    }

    /// Borrows the value as a non-owning pointer.
    pub fn borrow_ptr(&self) -> Ptr<T> {
        self.borrow().to_ptr()
    }
}

impl<T: ?Sized> Clone for SRef<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<T: ?Sized> core::ops::Deref for SRef<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T: fmt::Debug + ?Sized> fmt::Debug for SRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SRef").field(&self.get()).finish()
    }
}

impl<U: ?Sized, T> CastAs<T, tag::Reinterpret> for SRef<U> {
    type Output = SRef<T>;

    unsafe fn cast_as(self) -> SRef<T> {
        let SharedCore { value, anchor } = self.core;
        SRef {
            core: SharedCore {
                // SAFETY: forwarded to the caller of `cast_reinterpret`.
                value: unsafe { prim::reinterpret_rc::<U, T>(value) },
                anchor,
            },
        }
    }
}

impl<U: ?Sized, T> CastAs<T, tag::Static> for SRef<U> {
    type Output = SRef<T>;

    unsafe fn cast_as(self) -> SRef<T> {
        let SharedCore { value, anchor } = self.core;
        SRef {
            core: SharedCore {
                // SAFETY: the caller of `cast_static` asserts the pointee is a `T`.
                value: unsafe { prim::static_rc::<U, T>(value) },
                anchor,
            },
        }
    }
}

impl<U: Castable + ?Sized, T: Any> CastAs<T, tag::Dynamic> for SRef<U> {
    type Output = SRef<T>;

    unsafe fn cast_as(self) -> SRef<T> {
        if prim::dynamic_ptr::<U, T>(self.core.value()).is_none() {
            violation::raise(
                ViolationKind::CastMismatch,
                "dynamic cast of a shared reference to an unrelated type",
            );
        }
        // SAFETY: the dynamic type was just verified to be exactly `T`.
        unsafe { <Self as CastAs<T, tag::Static>>::cast_as(self) }
    }
}

impl<U: Castable + ?Sized, T: Any> CastClever<T> for SRef<U> {
    type Output = SRef<T>;

    unsafe fn cast_clever(self) -> SRef<T> {
        ward_assert!(
            prim::dynamic_ptr::<U, T>(self.core.value()).map(|p| p.as_ptr() as *const ())
                == Some(self.core.target().as_ptr() as *const ()),
            ViolationKind::CastMismatch,
            "clever cast of a shared reference disagrees with the dynamic type"
        );
        // SAFETY: forwarded to the caller of `cast_clever`.
        unsafe { <Self as CastAs<T, tag::Static>>::cast_as(self) }
    }
}

impl<T: ?Sized> Widen for SRef<T> {
    type Pointee = T;
    type Output<U: ?Sized> = SRef<U>;

    unsafe fn widen_with<U: ?Sized>(
        self,
        coerce: impl FnOnce(*mut T) -> *mut U,
    ) -> SRef<U> {
        let SharedCore { value, anchor } = self.core;
        let wide = coerce(Rc::into_raw(value) as *mut T);
        SRef {
            core: SharedCore {
                // SAFETY: `coerce` is a pure unsizing cast per the `Widen`
                // contract, so `wide` is the same allocation the `Rc` was
                // just dismantled into.
                value: unsafe { Rc::from_raw(wide.cast_const()) },
                anchor,
            },
        }
    }
}
