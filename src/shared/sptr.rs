//! `SPtr` — the nullable shared handle.

use core::any::Any;
use core::fmt;
use std::rc::Rc;

use super::{SharedCore, SRef, WPtr};
use crate::borrow::{Ptr, Ref};
use crate::cast::{prim, tag, CastAs, CastClever, Castable, Widen};
use crate::violation::{null_access, ward_assert, ViolationKind};

/// A shared, reference-counted handle that may be null.
///
/// A non-null `SPtr` behaves like an [`SRef`] clone; a null one supports
/// only the queries (`is_null`, `get`) and assignment-like operations.
///
/// ```
/// use ward::{make_sptr, SPtr};
///
/// let package = make_sptr(String::from("payload"));
/// assert!(!package.is_null());
///
/// let nothing: SPtr<String> = SPtr::null();
/// assert!(nothing.is_null());
/// assert_eq!(nothing.value_or(String::from("fallback")), "fallback");
/// ```
pub struct SPtr<T: ?Sized> {
    core: Option<SharedCore<T>>,
}

impl<T> SPtr<T> {
    /// Creates a new shared handle owning `value`.
    pub fn new(value: T) -> Self {
        Self {
            core: Some(SharedCore::new(value)),
        }
    }
}

impl<T: ?Sized> SPtr<T> {
    /// Creates a null handle.
    pub fn null() -> Self {
        Self { core: None }
    }

    pub(crate) fn from_core(core: Option<SharedCore<T>>) -> Self {
        Self { core }
    }

    /// Whether this handle is null.
    pub fn is_null(&self) -> bool {
        self.core.is_none()
    }

    /// A reference to the shared value, or `None` for a null handle.
    pub fn get(&self) -> Option<&T> {
        self.core.as_ref().map(SharedCore::value)
    }

    /// Exclusive access to the value; `None` for a null handle, while other
    /// strong handles share the value, or while a [`WPtr`] observes it.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.core.as_mut().and_then(SharedCore::value_mut)
    }

    /// How many strong handles share the value (zero for a null handle).
    pub fn strong_count(&self) -> usize {
        self.core.as_ref().map_or(0, SharedCore::strong_count)
    }

    /// Releases this handle's share of the value, leaving the handle null.
    pub fn reset(&mut self) {
        self.core = None;
    }

    /// Narrows to the non-nullable variant.
    ///
    /// A null handle fails: the safe build raises a null-reference
    /// violation, the fast build panics.
    pub fn to_sref(&self) -> SRef<T> {
        match &self.core {
            Some(core) => SRef { core: core.clone() },
            None => null_access("converted a null shared pointer to a shared reference"),
        }
    }

    /// Starts weakly observing the value without extending its lifetime.
    ///
    /// Downgrading a null handle yields a weak handle that never locks.
    pub fn downgrade(&self) -> WPtr<T>
    where
        T: Sized,
    {
        match &self.core {
            Some(core) => {
                let (value, watch) = core.downgrade();
                WPtr::from_parts(value, watch)
            }
            None => WPtr::null(),
        }
    }

    /// Borrows the value as a non-owning reference.
    ///
    /// A null handle fails like [`SPtr::to_sref`].
    pub fn borrow(&self) -> Ref<T> {
        match &self.core {
            Some(core) => Ref::watching(core.target(), core.watch()),
            None => null_access("borrowed a reference from a null shared pointer"),
        }
    }

    /// Borrows the value as a non-owning pointer; null borrows null.
    pub fn borrow_ptr(&self) -> Ptr<T> {
        match &self.core {
            Some(core) => Ref::watching(core.target(), core.watch()).to_ptr(),
            None => Ptr::null(),
        }
    }

    /// The shared value, cloned, or `default` for a null handle.
    pub fn value_or(&self, default: T) -> T
    where
        T: Clone + Sized,
    {
        self.get().cloned().unwrap_or(default)
    }
}

impl<T: ?Sized> Clone for SPtr<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<T: ?Sized> Default for SPtr<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized> From<&SRef<T>> for SPtr<T> {
    fn from(value: &SRef<T>) -> Self {
        value.to_sptr()
    }
}

impl<T: fmt::Debug + ?Sized> fmt::Debug for SPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("SPtr").field(&value).finish(),
            None => f.write_str("SPtr(null)"),
        }
    }
}

impl<U: ?Sized, T> CastAs<T, tag::Reinterpret> for SPtr<U> {
    type Output = SPtr<T>;

    unsafe fn cast_as(self) -> SPtr<T> {
        match self.core {
            Some(SharedCore { value, anchor }) => SPtr {
                core: Some(SharedCore {
                    // SAFETY: forwarded to the caller of `cast_reinterpret`.
                    value: unsafe { prim::reinterpret_rc::<U, T>(value) },
                    anchor,
                }),
            },
            None => SPtr::null(),
        }
    }
}

impl<U: ?Sized, T> CastAs<T, tag::Static> for SPtr<U> {
    type Output = SPtr<T>;

    unsafe fn cast_as(self) -> SPtr<T> {
        match self.core {
            Some(SharedCore { value, anchor }) => SPtr {
                core: Some(SharedCore {
                    // SAFETY: the caller of `cast_static` asserts the pointee is a `T`.
                    value: unsafe { prim::static_rc::<U, T>(value) },
                    anchor,
                }),
            },
            None => SPtr::null(),
        }
    }
}

impl<U: Castable + ?Sized, T: Any> CastAs<T, tag::Dynamic> for SPtr<U> {
    type Output = SPtr<T>;

    unsafe fn cast_as(self) -> SPtr<T> {
        let verified = match &self.core {
            Some(core) => prim::dynamic_ptr::<U, T>(core.value()).is_some(),
            None => false,
        };
        if verified {
            // SAFETY: the dynamic type was just verified to be exactly `T`.
            unsafe { <Self as CastAs<T, tag::Static>>::cast_as(self) }
        } else {
            SPtr::null()
        }
    }
}

impl<U: Castable + ?Sized, T: Any> CastClever<T> for SPtr<U> {
    type Output = SPtr<T>;

    unsafe fn cast_clever(self) -> SPtr<T> {
        ward_assert!(
            match &self.core {
                Some(core) => prim::dynamic_ptr::<U, T>(core.value())
                    .map(|p| p.as_ptr() as *const ())
                    == Some(core.target().as_ptr() as *const ()),
                None => true,
            },
            ViolationKind::CastMismatch,
            "clever cast of a shared pointer disagrees with the dynamic type"
        );
        // SAFETY: forwarded to the caller of `cast_clever`.
        unsafe { <Self as CastAs<T, tag::Static>>::cast_as(self) }
    }
}

impl<T: ?Sized> Widen for SPtr<T> {
    type Pointee = T;
    type Output<U: ?Sized> = SPtr<U>;

    unsafe fn widen_with<U: ?Sized>(
        self,
        coerce: impl FnOnce(*mut T) -> *mut U,
    ) -> SPtr<U> {
        match self.core {
            Some(SharedCore { value, anchor }) => {
                let wide = coerce(Rc::into_raw(value) as *mut T);
                SPtr {
                    core: Some(SharedCore {
                        // SAFETY: `coerce` is a pure unsizing cast per the
                        // `Widen` contract, so `wide` is the same allocation
                        // the `Rc` was just dismantled into.
                        value: unsafe { Rc::from_raw(wide.cast_const()) },
                        anchor,
                    }),
                }
            }
            None => SPtr::null(),
        }
    }
}
