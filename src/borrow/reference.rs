//! `Ref` — the non-nullable borrowing indirection.

use core::any::Any;
use core::cmp::Ordering;
use core::fmt;
use core::ptr::NonNull;

use super::{resolved_addr, BorrowCore, Ptr};
use crate::cast::{prim, tag, CastAs, CastClever, Castable, Widen};
use crate::held::Is;
use crate::live::Watch;
use crate::shared::SRef;
use crate::unique::URef;
use crate::violation::{self, ViolationKind};

/// A non-owning reference to a value owned elsewhere.
///
/// A `Ref` is created from an owning indirection (or from static data) and
/// never represents null. It does not keep its owner's value alive; the
/// safe build detects accesses that outlive the owner and reports them as
/// dangling-borrow violations, while the fast build is exactly a raw
/// pointer and trusts the caller.
///
/// ```
/// use ward::make_sref;
///
/// let owner = make_sref([1_u8, 2, 3]);
/// let borrowed = owner.borrow();
/// assert_eq!(borrowed.with(|bytes| bytes[1]), 2);
/// ```
///
/// Non-nullability is structural; neither of these compiles:
///
/// ```compile_fail
/// let broken: ward::Ref<i32> = Default::default();
/// ```
///
/// ```compile_fail
/// let broken = ward::Ref::<i32>::null();
/// ```
///
/// And borrows hand out shared access only — mutation goes through the
/// owner, so this does not compile either:
///
/// ```compile_fail
/// let owner = ward::make_sref(1_i32);
/// owner.borrow().with(|value| *value = 2);
/// ```
pub struct Ref<T: ?Sized> {
    core: BorrowCore<T>,
}

impl<T: ?Sized> Ref<T> {
    /// Borrows static data. Always valid, in both builds.
    pub fn from_static(value: &'static T) -> Self {
        Self {
            core: BorrowCore::unchecked(NonNull::from(value)),
        }
    }

    pub(crate) fn from_core(core: BorrowCore<T>) -> Self {
        Self { core }
    }

    pub(crate) fn watching(target: NonNull<T>, watch: Watch) -> Self {
        Self {
            core: BorrowCore::watching(target, watch),
        }
    }

    pub(crate) fn peek(&self) -> Option<NonNull<T>> {
        self.core.peek()
    }

    /// The borrowed value's current address.
    ///
    /// In the safe build a dangling borrow raises a violation; in the fast
    /// build the recorded address comes back unchecked.
    pub fn target(&self) -> NonNull<T> {
        match self.core.peek() {
            Some(target) => target,
            None => violation::raise(
                ViolationKind::DanglingBorrow,
                "resolved a borrowed reference whose owner's value is gone",
            ),
        }
    }

    /// The borrowed value's current address as a raw pointer.
    ///
    /// Fails like [`Ref::target`] when dangling.
    pub fn get(&self) -> *const T {
        self.target().as_ptr().cast_const()
    }

    /// Runs `f` on the borrowed value.
    ///
    /// The liveness check happens on entry (safe build); the closure must
    /// not destroy or reset the owner while it runs.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let target = self.target();
        // SAFETY: liveness was just verified (safe build); the fast build
        // relies on the owner-outlives-borrow contract.
        let value = unsafe { target.as_ref() };
        f(value)
    }

    /// The borrowed value.
    ///
    /// # Safety
    ///
    /// The owner's value must outlive every use of the returned reference;
    /// the liveness check covers only this call, not the reference's
    /// lifetime. Prefer [`Ref::with`].
    pub unsafe fn value(&self) -> &T {
        // SAFETY: resolution checks liveness now; the rest is the caller's
        // contract.
        unsafe { self.target().as_ref() }
    }

    /// Widens to the nullable variant. Never fails.
    pub fn to_ptr(&self) -> Ptr<T> {
        Ptr::from_core(Some(self.core.clone()))
    }
}

impl<T: ?Sized> Clone for Ref<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<T> From<&SRef<T>> for Ref<T>
where
    T: ?Sized,
{
    fn from(owner: &SRef<T>) -> Self {
        owner.borrow()
    }
}

impl<T> From<&URef<T>> for Ref<T>
where
    T: ?Sized,
{
    fn from(owner: &URef<T>) -> Self {
        owner.borrow()
    }
}

impl<T> From<&Is<T>> for Ref<T> {
    fn from(owner: &Is<T>) -> Self {
        owner.borrow()
    }
}

impl<T: ?Sized> fmt::Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.core.peek() {
            Some(target) => write!(f, "Ref({:p})", target.as_ptr()),
            None => f.write_str("Ref(<dangling>)"),
        }
    }
}

impl<T: ?Sized> fmt::Pointer for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let addr = resolved_addr(self.core.peek()) as *const ();
        fmt::Pointer::fmt(&addr, f)
    }
}

impl<T: ?Sized> PartialEq for Ref<T> {
    fn eq(&self, other: &Self) -> bool {
        resolved_addr(self.core.peek()) == resolved_addr(other.core.peek())
    }
}

impl<T: ?Sized> Eq for Ref<T> {}

impl<T: ?Sized> PartialEq<Ptr<T>> for Ref<T> {
    fn eq(&self, other: &Ptr<T>) -> bool {
        resolved_addr(self.core.peek()) == resolved_addr(other.peek())
    }
}

impl<T: ?Sized> PartialEq<*const T> for Ref<T> {
    fn eq(&self, other: &*const T) -> bool {
        resolved_addr(self.core.peek()) == (*other as *const () as usize)
    }
}

impl<T: ?Sized> PartialOrd for Ref<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: ?Sized> Ord for Ref<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        resolved_addr(self.core.peek()).cmp(&resolved_addr(other.core.peek()))
    }
}

impl<T: ?Sized> PartialOrd<Ptr<T>> for Ref<T> {
    fn partial_cmp(&self, other: &Ptr<T>) -> Option<Ordering> {
        Some(resolved_addr(self.core.peek()).cmp(&resolved_addr(other.peek())))
    }
}

impl<T: ?Sized> PartialOrd<*const T> for Ref<T> {
    fn partial_cmp(&self, other: &*const T) -> Option<Ordering> {
        Some(resolved_addr(self.core.peek()).cmp(&(*other as *const () as usize)))
    }
}

impl<U: ?Sized, T> CastAs<T, tag::Reinterpret> for Ref<U> {
    type Output = Ref<T>;

    unsafe fn cast_as(self) -> Ref<T> {
        let (target, watch) = self.core.into_parts();
        // SAFETY: forwarded to the caller of `cast_reinterpret`; pure casts
        // preserve non-nullness.
        let target = unsafe {
            NonNull::new_unchecked(prim::reinterpret_ptr::<U, T>(target.as_ptr().cast_const()) as *mut T)
        };
        Ref {
            core: BorrowCore::watching(target, watch),
        }
    }
}

impl<U: ?Sized, T> CastAs<T, tag::Static> for Ref<U> {
    type Output = Ref<T>;

    unsafe fn cast_as(self) -> Ref<T> {
        let (target, watch) = self.core.into_parts();
        // SAFETY: the caller of `cast_static` asserts the pointee is a `T`;
        // pure casts preserve non-nullness.
        let target = unsafe {
            NonNull::new_unchecked(prim::static_ptr::<U, T>(target.as_ptr().cast_const()) as *mut T)
        };
        Ref {
            core: BorrowCore::watching(target, watch),
        }
    }
}

impl<U: Castable + ?Sized, T: Any> CastAs<T, tag::Dynamic> for Ref<U> {
    type Output = Ref<T>;

    unsafe fn cast_as(self) -> Ref<T> {
        let verified = self.with(|value| prim::dynamic_ptr::<U, T>(value).is_some());
        if !verified {
            violation::raise(
                ViolationKind::CastMismatch,
                "dynamic cast of a borrowed reference to an unrelated type",
            );
        }
        // SAFETY: the dynamic type was just verified to be exactly `T`.
        unsafe { <Self as CastAs<T, tag::Static>>::cast_as(self) }
    }
}

impl<U: Castable + ?Sized, T: Any> CastClever<T> for Ref<U> {
    type Output = Ref<T>;

    unsafe fn cast_clever(self) -> Ref<T> {
        #[cfg(feature = "safe")]
        {
            let declared = self.target().as_ptr() as *const ();
            let verified = self
                .with(|value| prim::dynamic_ptr::<U, T>(value))
                .map(|p| p.as_ptr() as *const ());
            if verified != Some(declared) {
                violation::raise(
                    ViolationKind::CastMismatch,
                    "clever cast of a borrowed reference disagrees with the dynamic type",
                );
            }
        }
        // SAFETY: forwarded to the caller of `cast_clever`.
        unsafe { <Self as CastAs<T, tag::Static>>::cast_as(self) }
    }
}

impl<T: ?Sized> Widen for Ref<T> {
    type Pointee = T;
    type Output<U: ?Sized> = Ref<U>;

    unsafe fn widen_with<U: ?Sized>(
        self,
        coerce: impl FnOnce(*mut T) -> *mut U,
    ) -> Ref<U> {
        let (target, watch) = self.core.into_parts();
        let wide = coerce(target.as_ptr());
        Ref {
            // SAFETY: `coerce` is a pure unsizing cast per the `Widen`
            // contract, so it preserves non-nullness.
            core: BorrowCore::watching(unsafe { NonNull::new_unchecked(wide) }, watch),
        }
    }
}
