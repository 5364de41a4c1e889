//! `Ptr` — the nullable borrowing indirection.

use core::any::Any;
use core::cmp::Ordering;
use core::fmt;
use core::ptr::NonNull;

use super::{resolved_addr, BorrowCore, Ref};
use crate::cast::{prim, tag, CastAs, CastClever, Castable, Widen};
use crate::held::{Is, Opt};
use crate::shared::{SPtr, SRef};
use crate::unique::{UPtr, URef};
use crate::violation::{self, null_access, ViolationKind};

/// A non-owning pointer to a value owned elsewhere, with an explicit null
/// state.
///
/// Everything said about [`Ref`] applies, plus: a `Ptr` may be null, and a
/// dangling `Ptr` *resolves* to null rather than failing — only value
/// access through it fails.
///
/// ```
/// use ward::{make_uptr, Ptr};
///
/// let owner = make_uptr(10_i32);
/// let observer: Ptr<i32> = owner.borrow_ptr();
/// assert!(!observer.is_null());
/// assert_eq!(observer.value_or(0), 10);
///
/// let nowhere: Ptr<i32> = Ptr::null();
/// assert!(nowhere.is_null());
/// ```
pub struct Ptr<T: ?Sized> {
    core: Option<BorrowCore<T>>,
}

impl<T: ?Sized> Ptr<T> {
    /// Creates a null pointer.
    pub fn null() -> Self {
        Self { core: None }
    }

    /// Borrows static data. Always valid, in both builds.
    pub fn from_static(value: &'static T) -> Self {
        Self {
            core: Some(BorrowCore::unchecked(NonNull::from(value))),
        }
    }

    pub(crate) fn from_core(core: Option<BorrowCore<T>>) -> Self {
        Self { core }
    }

    pub(crate) fn peek(&self) -> Option<NonNull<T>> {
        self.core.as_ref().and_then(BorrowCore::peek)
    }

    /// The borrowed value's current address: `None` when this pointer is
    /// null *or* its owner's value is gone.
    pub fn target(&self) -> Option<NonNull<T>> {
        self.peek()
    }

    /// Whether this pointer currently resolves to nothing (null or
    /// dangling).
    pub fn is_null(&self) -> bool {
        self.peek().is_none()
    }

    /// The borrowed value's current address as a raw pointer, null when
    /// unresolvable.
    pub fn get(&self) -> *const T
    where
        T: Sized,
    {
        self.peek()
            .map_or(core::ptr::null(), |target| target.as_ptr().cast_const())
    }

    /// Runs `f` on the borrowed value.
    ///
    /// Accessing a null pointer is a null-reference failure; accessing a
    /// dangling one is a dangling-borrow violation (safe build).
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self.peek() {
            Some(target) => {
                // SAFETY: liveness was just verified (safe build); the fast
                // build relies on the owner-outlives-borrow contract.
                let value = unsafe { target.as_ref() };
                f(value)
            }
            None if self.core.is_some() => violation::raise(
                ViolationKind::DanglingBorrow,
                "dereferenced a borrowed pointer whose owner's value is gone",
            ),
            None => null_access("dereferenced a null borrowed pointer"),
        }
    }

    /// Runs `f` on the borrowed value if the pointer resolves; `None`
    /// otherwise.
    pub fn try_with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.peek().map(|target| {
            // SAFETY: as in `with`.
            let value = unsafe { target.as_ref() };
            f(value)
        })
    }

    /// The borrowed value.
    ///
    /// # Safety
    ///
    /// As [`Ref::value`]: the owner's value must outlive every use of the
    /// returned reference. Fails like [`Ptr::with`] when unresolvable.
    pub unsafe fn value(&self) -> &T {
        match self.peek() {
            // SAFETY: resolution checks liveness now; the rest is the
            // caller's contract.
            Some(target) => unsafe { target.as_ref() },
            None if self.core.is_some() => violation::raise(
                ViolationKind::DanglingBorrow,
                "dereferenced a borrowed pointer whose owner's value is gone",
            ),
            None => null_access("dereferenced a null borrowed pointer"),
        }
    }

    /// The borrowed value, cloned, or `default` when unresolvable.
    pub fn value_or(&self, default: T) -> T
    where
        T: Clone + Sized,
    {
        self.try_with(T::clone).unwrap_or(default)
    }

    /// Narrows to the non-nullable variant.
    ///
    /// An unresolvable pointer fails: the safe build raises a
    /// null-reference violation, the fast build panics on null.
    pub fn to_ref(&self) -> Ref<T> {
        match (&self.core, self.peek()) {
            (Some(core), Some(_)) => Ref::from_core(core.clone()),
            _ => null_access("converted a null borrowed pointer to a reference"),
        }
    }

    /// Narrows to the non-nullable variant, or returns `fallback` when this
    /// pointer does not currently resolve. No dangling intermediate is ever
    /// constructed.
    pub fn to_ref_or(&self, fallback: Ref<T>) -> Ref<T> {
        match (&self.core, self.peek()) {
            (Some(core), Some(_)) => Ref::from_core(core.clone()),
            _ => fallback,
        }
    }
}

impl<T: ?Sized> Clone for Ptr<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<T: ?Sized> Default for Ptr<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized> From<Ref<T>> for Ptr<T> {
    fn from(reference: Ref<T>) -> Self {
        reference.to_ptr()
    }
}

impl<T: ?Sized> From<&SRef<T>> for Ptr<T> {
    fn from(owner: &SRef<T>) -> Self {
        owner.borrow_ptr()
    }
}

impl<T: ?Sized> From<&SPtr<T>> for Ptr<T> {
    fn from(owner: &SPtr<T>) -> Self {
        owner.borrow_ptr()
    }
}

impl<T: ?Sized> From<&URef<T>> for Ptr<T> {
    fn from(owner: &URef<T>) -> Self {
        owner.borrow_ptr()
    }
}

impl<T: ?Sized> From<&UPtr<T>> for Ptr<T> {
    fn from(owner: &UPtr<T>) -> Self {
        owner.borrow_ptr()
    }
}

impl<T> From<&Is<T>> for Ptr<T> {
    fn from(owner: &Is<T>) -> Self {
        owner.borrow_ptr()
    }
}

impl<T> From<&Opt<T>> for Ptr<T> {
    fn from(owner: &Opt<T>) -> Self {
        owner.borrow_ptr()
    }
}

impl<T: ?Sized> fmt::Debug for Ptr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.core.is_some(), self.peek()) {
            (_, Some(target)) => write!(f, "Ptr({:p})", target.as_ptr()),
            (true, None) => f.write_str("Ptr(<dangling>)"),
            (false, None) => f.write_str("Ptr(null)"),
        }
    }
}

impl<T: ?Sized> fmt::Pointer for Ptr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let addr = resolved_addr(self.peek()) as *const ();
        fmt::Pointer::fmt(&addr, f)
    }
}

impl<T: ?Sized> PartialEq for Ptr<T> {
    fn eq(&self, other: &Self) -> bool {
        resolved_addr(self.peek()) == resolved_addr(other.peek())
    }
}

impl<T: ?Sized> Eq for Ptr<T> {}

impl<T: ?Sized> PartialEq<Ref<T>> for Ptr<T> {
    fn eq(&self, other: &Ref<T>) -> bool {
        resolved_addr(self.peek()) == resolved_addr(other.peek())
    }
}

impl<T: ?Sized> PartialEq<*const T> for Ptr<T> {
    fn eq(&self, other: &*const T) -> bool {
        resolved_addr(self.peek()) == (*other as *const () as usize)
    }
}

impl<T: ?Sized> PartialOrd for Ptr<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: ?Sized> Ord for Ptr<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        resolved_addr(self.peek()).cmp(&resolved_addr(other.peek()))
    }
}

impl<T: ?Sized> PartialOrd<Ref<T>> for Ptr<T> {
    fn partial_cmp(&self, other: &Ref<T>) -> Option<Ordering> {
        Some(resolved_addr(self.peek()).cmp(&resolved_addr(other.peek())))
    }
}

impl<T: ?Sized> PartialOrd<*const T> for Ptr<T> {
    fn partial_cmp(&self, other: &*const T) -> Option<Ordering> {
        Some(resolved_addr(self.peek()).cmp(&(*other as *const () as usize)))
    }
}

impl<U: ?Sized, T> CastAs<T, tag::Reinterpret> for Ptr<U> {
    type Output = Ptr<T>;

    unsafe fn cast_as(self) -> Ptr<T> {
        match self.core {
            Some(core) => {
                let (target, watch) = core.into_parts();
                // SAFETY: forwarded to the caller of `cast_reinterpret`;
                // pure casts preserve non-nullness.
                let target = unsafe {
                    NonNull::new_unchecked(
                        prim::reinterpret_ptr::<U, T>(target.as_ptr().cast_const()) as *mut T,
                    )
                };
                Ptr {
                    core: Some(BorrowCore::watching(target, watch)),
                }
            }
            None => Ptr::null(),
        }
    }
}

impl<U: ?Sized, T> CastAs<T, tag::Static> for Ptr<U> {
    type Output = Ptr<T>;

    unsafe fn cast_as(self) -> Ptr<T> {
        match self.core {
            Some(core) => {
                let (target, watch) = core.into_parts();
                // SAFETY: the caller of `cast_static` asserts the pointee is
                // a `T`; pure casts preserve non-nullness.
                let target = unsafe {
                    NonNull::new_unchecked(
                        prim::static_ptr::<U, T>(target.as_ptr().cast_const()) as *mut T,
                    )
                };
                Ptr {
                    core: Some(BorrowCore::watching(target, watch)),
                }
            }
            None => Ptr::null(),
        }
    }
}

impl<U: Castable + ?Sized, T: Any> CastAs<T, tag::Dynamic> for Ptr<U> {
    type Output = Ptr<T>;

    unsafe fn cast_as(self) -> Ptr<T> {
        let verified = self
            .try_with(|value| prim::dynamic_ptr::<U, T>(value).is_some())
            .unwrap_or(false);
        if verified {
            // SAFETY: the dynamic type was just verified to be exactly `T`.
            unsafe { <Self as CastAs<T, tag::Static>>::cast_as(self) }
        } else {
            Ptr::null()
        }
    }
}

impl<U: Castable + ?Sized, T: Any> CastClever<T> for Ptr<U> {
    type Output = Ptr<T>;

    unsafe fn cast_clever(self) -> Ptr<T> {
        #[cfg(feature = "safe")]
        {
            if let Some(declared) = self.peek() {
                let declared = declared.as_ptr() as *const ();
                let verified = self
                    .try_with(|value| prim::dynamic_ptr::<U, T>(value))
                    .flatten()
                    .map(|p| p.as_ptr() as *const ());
                if verified != Some(declared) {
                    violation::raise(
                        ViolationKind::CastMismatch,
                        "clever cast of a borrowed pointer disagrees with the dynamic type",
                    );
                }
            }
        }
        // SAFETY: forwarded to the caller of `cast_clever`.
        unsafe { <Self as CastAs<T, tag::Static>>::cast_as(self) }
    }
}

impl<T: ?Sized> Widen for Ptr<T> {
    type Pointee = T;
    type Output<U: ?Sized> = Ptr<U>;

    unsafe fn widen_with<U: ?Sized>(
        self,
        coerce: impl FnOnce(*mut T) -> *mut U,
    ) -> Ptr<U> {
        match self.core {
            Some(core) => {
                let (target, watch) = core.into_parts();
                let wide = coerce(target.as_ptr());
                Ptr {
                    // SAFETY: `coerce` is a pure unsizing cast per the
                    // `Widen` contract, so it preserves non-nullness.
                    core: Some(BorrowCore::watching(
                        unsafe { NonNull::new_unchecked(wide) },
                        watch,
                    )),
                }
            }
            None => Ptr::null(),
        }
    }
}
