//! `URef` — the non-nullable exclusive handle.

use core::any::Any;
use core::fmt;

use super::{UniqueCore, UPtr};
use crate::borrow::{Ptr, Ref};
use crate::cast::{prim, tag, CastAs, CastClever, Castable, Widen};
use crate::violation::{self, ward_assert, ViolationKind};

/// An exclusive heap handle that always owns a value.
///
/// There is no default constructor, no null state, no argument-free
/// `reset`, and no way to copy one — moving is the only transfer.
///
/// ```
/// use ward::make_uref;
///
/// let mut config = make_uref(vec![1, 2, 3]);
/// config.get_mut().push(4);
/// assert_eq!(config.len(), 4);
/// ```
///
/// Exclusivity is structural; this does not compile:
///
/// ```compile_fail
/// let original = ward::make_uref(5_i32);
/// let copied = original.clone();
/// ```
pub struct URef<T: ?Sized> {
    pub(crate) core: UniqueCore<T>,
}

impl<T> URef<T> {
    /// Creates a new exclusive handle owning `value`.
    pub fn new(value: T) -> Self {
        Self {
            core: UniqueCore::new(value),
        }
    }

    /// Replaces the owned value.
    ///
    /// Borrows taken before the replacement observe the old value's end of
    /// life: in the safe build they subsequently report dangling.
    pub fn reset(&mut self, value: T) {
        self.core.replace(value);
    }
}

impl<T: ?Sized> URef<T> {
    /// A reference to the owned value.
    pub fn get(&self) -> &T {
        self.core.value()
    }

    /// Exclusive access to the owned value.
    pub fn get_mut(&mut self) -> &mut T {
        self.core.value_mut()
    }

    /// Exchanges the owned values (and their liveness) of two handles.
    ///
    /// Borrows follow their value to its new owner and stay valid.
    pub fn swap(&mut self, other: &mut URef<T>) {
        core::mem::swap(&mut self.core, &mut other.core);
    }

    /// Widens to the nullable variant, consuming this handle.
    pub fn into_uptr(self) -> UPtr<T> {
        UPtr::from_core(Some(self.core))
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

impl<T> URef<T> {
    /// Consumes the handle and returns the owned value.
    pub fn into_inner(self) -> T {
        *self.core.into_value()
    }
}

impl<T: ?Sized> core::ops::Deref for URef<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T: ?Sized> core::ops::DerefMut for URef<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T: fmt::Debug + ?Sized> fmt::Debug for URef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("URef").field(&self.get()).finish()
    }
}

impl<U: ?Sized, T> CastAs<T, tag::Reinterpret> for URef<U> {
    type Output = URef<T>;

    unsafe fn cast_as(self) -> URef<T> {
        let UniqueCore { value, anchor } = self.core;
        URef {
            core: UniqueCore {
                // SAFETY: forwarded to the caller of `cast_reinterpret`.
                value: unsafe { prim::reinterpret_box::<U, T>(value) },
                anchor,
            },
        }
    }
}

impl<U: ?Sized, T> CastAs<T, tag::Static> for URef<U> {
    type Output = URef<T>;

    unsafe fn cast_as(self) -> URef<T> {
        let UniqueCore { value, anchor } = self.core;
        URef {
            core: UniqueCore {
                // SAFETY: the caller of `cast_static` asserts the pointee is a `T`.
                value: unsafe { prim::static_box::<U, T>(value) },
                anchor,
            },
        }
    }
}

impl<U: Castable + ?Sized, T: Any> CastAs<T, tag::Dynamic> for URef<U> {
    type Output = URef<T>;

    unsafe fn cast_as(self) -> URef<T> {
        if prim::dynamic_ptr::<U, T>(self.core.value()).is_none() {
            violation::raise(
                ViolationKind::CastMismatch,
                "dynamic cast of a unique reference to an unrelated type",
            );
        }
        // SAFETY: the dynamic type was just verified to be exactly `T`.
        unsafe { <Self as CastAs<T, tag::Static>>::cast_as(self) }
    }
}

impl<U: Castable + ?Sized, T: Any> CastClever<T> for URef<U> {
    type Output = URef<T>;

    unsafe fn cast_clever(self) -> URef<T> {
        ward_assert!(
            prim::dynamic_ptr::<U, T>(self.core.value()).map(|p| p.as_ptr() as *const ())
                == Some(self.core.target().as_ptr() as *const ()),
            ViolationKind::CastMismatch,
            "clever cast of a unique reference disagrees with the dynamic type"
        );
        // SAFETY: forwarded to the caller of `cast_clever`.
        unsafe { <Self as CastAs<T, tag::Static>>::cast_as(self) }
    }
}

impl<T: ?Sized> Widen for URef<T> {
    type Pointee = T;
    type Output<U: ?Sized> = URef<U>;

    unsafe fn widen_with<U: ?Sized>(
        self,
        coerce: impl FnOnce(*mut T) -> *mut U,
    ) -> URef<U> {
        let UniqueCore { value, anchor } = self.core;
        let wide = coerce(Box::into_raw(value));
        URef {
            core: UniqueCore {
                // SAFETY: `coerce` is a pure unsizing cast per the `Widen`
                // contract, so `wide` is the same allocation the `Box` was
                // just dismantled into.
                value: unsafe { Box::from_raw(wide) },
                anchor,
            },
        }
    }
}
