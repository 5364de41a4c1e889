//! `UPtr` — the nullable exclusive handle.

use core::any::Any;
use core::fmt;

use super::{UniqueCore, URef};
use crate::borrow::{Ptr, Ref};
use crate::cast::{prim, tag, CastAs, CastClever, Castable, Widen};
use crate::violation::{null_access, ward_assert, ViolationKind};

/// An exclusive heap handle that may be null.
///
/// Null arises from default construction, [`reset`](UPtr::reset), or being
/// the source of a [`take`](UPtr::take). Like [`URef`], a `UPtr` cannot be
/// copied.
///
/// ```
/// use ward::{make_uptr, UPtr};
///
/// let mut slot = make_uptr(String::from("owned"));
/// let moved = slot.take();
/// assert!(slot.is_null());
/// assert_eq!(moved.get().map(String::as_str), Some("owned"));
/// ```
pub struct UPtr<T: ?Sized> {
    core: Option<UniqueCore<T>>,
}

impl<T> UPtr<T> {
    /// Creates a new exclusive handle owning `value`.
    pub fn new(value: T) -> Self {
        Self {
            core: Some(UniqueCore::new(value)),
        }
    }

    /// Stores a new owned value, dropping any previous one.
    pub fn set(&mut self, value: T) {
        self.core = Some(UniqueCore::new(value));
    }

    /// Moves the owned value (if any) out into a new handle, leaving this
    /// one null.
    ///
    /// The new handle is an observably distinct owner: borrows taken from
    /// this handle beforehand report dangling afterwards (safe build).
    pub fn take(&mut self) -> UPtr<T> {
        let core = self.core.take().map(|mut core| {
            core.sever();
            core
        });
        UPtr { core }
    }
}

impl<T: ?Sized> UPtr<T> {
    /// Creates a null handle.
    pub fn null() -> Self {
        Self { core: None }
    }

    pub(crate) fn from_core(core: Option<UniqueCore<T>>) -> Self {
        Self { core }
    }

    /// Whether this handle is null.
    pub fn is_null(&self) -> bool {
        self.core.is_none()
    }

    /// A reference to the owned value, or `None` for a null handle.
    pub fn get(&self) -> Option<&T> {
        self.core.as_ref().map(UniqueCore::value)
    }

    /// Exclusive access to the owned value, or `None` for a null handle.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.core.as_mut().map(UniqueCore::value_mut)
    }

    /// Drops the owned value, leaving the handle null.
    pub fn reset(&mut self) {
        self.core = None;
    }

    /// Exchanges the owned values (and their liveness) of two handles.
    pub fn swap(&mut self, other: &mut UPtr<T>) {
        core::mem::swap(&mut self.core, &mut other.core);
    }

    /// Narrows to the non-nullable variant, consuming this handle.
    ///
    /// A null handle fails: the safe build raises a null-reference
    /// violation, the fast build panics.
    pub fn into_uref(self) -> URef<T> {
        match self.core {
            Some(core) => URef { core },
            None => null_access("converted a null unique pointer to a unique reference"),
        }
    }

    /// Borrows the value as a non-owning reference.
    ///
    /// A null handle fails like [`UPtr::into_uref`].
    pub fn borrow(&self) -> Ref<T> {
        match &self.core {
            Some(core) => Ref::watching(core.target(), core.watch()),
            None => null_access("borrowed a reference from a null unique pointer"),
        }
    }

    /// Borrows the value as a non-owning pointer; null borrows null.
    pub fn borrow_ptr(&self) -> Ptr<T> {
        match &self.core {
            Some(core) => Ref::watching(core.target(), core.watch()).to_ptr(),
            None => Ptr::null(),
        }
    }

    /// The owned value, cloned, or `default` for a null handle.
    pub fn value_or(&self, default: T) -> T
    where
        T: Clone + Sized,
    {
        self.get().cloned().unwrap_or(default)
    }
}

impl<T: ?Sized> Default for UPtr<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized> From<URef<T>> for UPtr<T> {
    fn from(value: URef<T>) -> Self {
        value.into_uptr()
    }
}

impl<T: fmt::Debug + ?Sized> fmt::Debug for UPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("UPtr").field(&value).finish(),
            None => f.write_str("UPtr(null)"),
        }
    }
}

impl<U: ?Sized, T> CastAs<T, tag::Reinterpret> for UPtr<U> {
    type Output = UPtr<T>;

    unsafe fn cast_as(self) -> UPtr<T> {
        match self.core {
            Some(UniqueCore { value, anchor }) => UPtr {
                core: Some(UniqueCore {
                    // SAFETY: forwarded to the caller of `cast_reinterpret`.
                    value: unsafe { prim::reinterpret_box::<U, T>(value) },
                    anchor,
                }),
            },
            None => UPtr::null(),
        }
    }
}

impl<U: ?Sized, T> CastAs<T, tag::Static> for UPtr<U> {
    type Output = UPtr<T>;

    unsafe fn cast_as(self) -> UPtr<T> {
        match self.core {
            Some(UniqueCore { value, anchor }) => UPtr {
                core: Some(UniqueCore {
                    // SAFETY: the caller of `cast_static` asserts the pointee is a `T`.
                    value: unsafe { prim::static_box::<U, T>(value) },
                    anchor,
                }),
            },
            None => UPtr::null(),
        }
    }
}

impl<U: Castable + ?Sized, T: Any> CastAs<T, tag::Dynamic> for UPtr<U> {
    type Output = UPtr<T>;

    unsafe fn cast_as(self) -> UPtr<T> {
        let verified = match &self.core {
            Some(core) => prim::dynamic_ptr::<U, T>(core.value()).is_some(),
            None => false,
        };
        if verified {
            // SAFETY: the dynamic type was just verified to be exactly `T`.
            unsafe { <Self as CastAs<T, tag::Static>>::cast_as(self) }
        } else {
            UPtr::null()
        }
    }
}

impl<U: Castable + ?Sized, T: Any> CastClever<T> for UPtr<U> {
    type Output = UPtr<T>;

    unsafe fn cast_clever(self) -> UPtr<T> {
        ward_assert!(
            match &self.core {
                Some(core) => prim::dynamic_ptr::<U, T>(core.value())
                    .map(|p| p.as_ptr() as *const ())
                    == Some(core.target().as_ptr() as *const ()),
                None => true,
            },
            ViolationKind::CastMismatch,
            "clever cast of a unique pointer disagrees with the dynamic type"
        );
        // SAFETY: forwarded to the caller of `cast_clever`.
        unsafe { <Self as CastAs<T, tag::Static>>::cast_as(self) }
    }
}

impl<T: ?Sized> Widen for UPtr<T> {
    type Pointee = T;
    type Output<U: ?Sized> = UPtr<U>;

    unsafe fn widen_with<U: ?Sized>(
        self,
        coerce: impl FnOnce(*mut T) -> *mut U,
    ) -> UPtr<U> {
        match self.core {
            Some(UniqueCore { value, anchor }) => {
                let wide = coerce(Box::into_raw(value));
                UPtr {
                    core: Some(UniqueCore {
                        // SAFETY: `coerce` is a pure unsizing cast per the
                        // `Widen` contract, so `wide` is the same allocation
                        // the `Box` was just dismantled into.
                        value: unsafe { Box::from_raw(wide) },
                        anchor,
                    }),
                }
            }
            None => UPtr::null(),
        }
    }
}
