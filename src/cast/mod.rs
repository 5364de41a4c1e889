//! The cast API — tag-selected conversions across every indirection family.
//!
//! Four generic operations cover the useful pointer casts:
//!
//! - [`cast_reinterpret`] converts between arbitrary pointee types and is
//!   never checked, in either build.
//! - [`cast_static`] recovers a declared concrete type behind an erased
//!   (`dyn`) handle without a run-time check.
//! - [`cast_dynamic`] performs the same recovery but verifies it against
//!   the pointee's dynamic type, in **both** builds. Nullable handles
//!   degrade to null on a mismatch; non-nullable handles raise a
//!   [`CastMismatch`](crate::ViolationKind::CastMismatch) violation.
//! - [`cast_clever`] is `cast_static` in the fast build; the safe build
//!   additionally runs the dynamic check and verifies the two agree.
//!
//! Widening in the other direction (concrete type to `dyn Trait`) is the
//! [`upcast!`](crate::upcast) macro, which feeds an unsizing raw-pointer
//! cast through [`Widen::widen_with`].
//!
//! Each operation preserves the ownership category of its operand: casting
//! an `SRef` yields an `SRef`, casting a `URef` consumes it and yields a
//! `URef`, and so on. Dispatch runs through the [`CastAs`] trait, selected
//! by the zero-sized [`tag`] types, so the whole mechanism resolves at
//! compile time.
//!
//! Run-time-verified casting needs a path from the pointee to
//! [`core::any::Any`]; the [`Castable`] trait provides it and is implemented
//! automatically for every `'static` type, so user traits opt in by listing
//! it as a supertrait:
//!
//! ```
//! use ward::{cast_dynamic, make_sptr, upcast, Castable, SPtr};
//!
//! trait Shape: Castable {
//!     fn sides(&self) -> u32;
//! }
//!
//! struct Square;
//! impl Shape for Square {
//!     fn sides(&self) -> u32 {
//!         4
//!     }
//! }
//!
//! let square = make_sptr(Square);
//! let erased: SPtr<dyn Shape> = upcast!(square => dyn Shape);
//! let recovered: SPtr<Square> = cast_dynamic(erased.clone());
//! assert!(!recovered.is_null());
//! let not_a_circle: SPtr<String> = cast_dynamic(erased);
//! assert!(not_a_circle.is_null());
//! ```

pub mod prim;

use core::any::Any;

/// Compile-time cast-intent selectors.
///
/// The tags carry no state; they exist to pick a [`CastAs`] implementation.
pub mod tag {
    mod sealed {
        pub trait Sealed {}
    }

    /// A cast intent selector. Sealed; the four tags below are the only
    /// implementors.
    pub trait Tag: sealed::Sealed {}

    /// Selects unchecked reinterpretation.
    pub struct Reinterpret;
    /// Selects the unchecked declared-type conversion.
    pub struct Static;
    /// Selects the run-time-verified conversion.
    pub struct Dynamic;
    /// Selects mutability-qualifier conversion (raw pointers only).
    pub struct Const;

    impl sealed::Sealed for Reinterpret {}
    impl Tag for Reinterpret {}
    impl sealed::Sealed for Static {}
    impl Tag for Static {}
    impl sealed::Sealed for Dynamic {}
    impl Tag for Dynamic {}
    impl sealed::Sealed for Const {}
    impl Tag for Const {}
}

/// Bridge from a pointee to [`Any`], enabling run-time-verified casts.
///
/// Implemented automatically for every `'static` type. Traits whose objects
/// should be dynamic-castable list it as a supertrait
/// (`trait Shape: Castable`), which puts `as_any` into their vtable.
pub trait Castable: Any {
    /// The pointee as an [`Any`] object.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> Castable for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A tag-selected conversion of one indirection type to another pointee
/// type, preserving the ownership category.
///
/// Implementations exist for every family/tag pairing that is meaningful;
/// `WPtr` has no clever form, and the held types (`Is`/`Opt`) participate
/// through borrows taken from them, since their value is stored in place.
pub trait CastAs<T, Mode: tag::Tag>: Sized {
    /// The same family of indirection around the new pointee type.
    type Output;

    /// Performs the conversion.
    ///
    /// # Safety
    ///
    /// Requirements depend on the tag; the `Dynamic` implementations are
    /// fully checked and are re-exposed safely through [`cast_dynamic`].
    unsafe fn cast_as(self) -> Self::Output;
}

/// The combined static-plus-verification cast.
pub trait CastClever<T>: Sized {
    /// The same family of indirection around the new pointee type.
    type Output;

    /// Performs the conversion.
    ///
    /// # Safety
    ///
    /// As `cast_static`; the safe build verifies the claim at run time.
    unsafe fn cast_clever(self) -> Self::Output;
}

/// Widening support: converts an indirection to a pointee type its current
/// pointee unsizes to (typically a `dyn Trait`).
///
/// Use through the [`upcast!`](crate::upcast) macro, which supplies the
/// coercion closure in the only shape the safety contract allows.
pub trait Widen: Sized {
    /// The pointee type of the handle being widened.
    type Pointee: ?Sized;
    /// The same family of indirection around the new pointee type.
    type Output<U: ?Sized>;

    /// Rebuilds the handle around the coerced pointer.
    ///
    /// # Safety
    ///
    /// `coerce` must be a pure unsizing or identity cast of its argument
    /// (`|p| p as *mut U`); returning any other pointer corrupts the
    /// handle's ownership.
    unsafe fn widen_with<U: ?Sized>(
        self,
        coerce: impl FnOnce(*mut Self::Pointee) -> *mut U,
    ) -> Self::Output<U>;
}

/// Widens an indirection to an unsized pointee type, preserving its family.
///
/// This is the explicit counterpart of C-family implicit upcasts: Rust user
/// types cannot participate in implicit coercion, so the conversion is
/// spelled at the call site.
///
/// ```
/// use ward::{make_sref, upcast, Castable, SRef};
///
/// trait Greet: Castable {
///     fn hello(&self) -> String;
/// }
///
/// struct En;
/// impl Greet for En {
///     fn hello(&self) -> String {
///         "hello".into()
///     }
/// }
///
/// let en = make_sref(En);
/// let any_lang: SRef<dyn Greet> = upcast!(en => dyn Greet);
/// assert_eq!(any_lang.hello(), "hello");
/// ```
#[macro_export]
macro_rules! upcast {
    ($handle:expr => $Target:ty) => {
        // SAFETY: the closure is exactly the unsizing cast the contract asks
        // for.
        unsafe { $crate::cast::Widen::widen_with($handle, |raw| raw as *mut $Target) }
    };
}

/// Reinterprets an indirection as pointing to an arbitrary other type.
///
/// Never checked, in either build.
///
/// # Safety
///
/// The caller owns every consequence; see [`prim::reinterpret_ptr`]. For
/// owning handles the target type must match the allocation's size and
/// alignment.
pub unsafe fn cast_reinterpret<T, S: CastAs<T, tag::Reinterpret>>(from: S) -> S::Output {
    unsafe { from.cast_as() }
}

/// Converts an indirection to a declared-compatible pointee type without a
/// run-time check.
///
/// # Safety
///
/// The caller asserts the pointee really is a `T`. Prefer [`cast_dynamic`]
/// or [`cast_clever`] when the claim deserves verification.
pub unsafe fn cast_static<T, S: CastAs<T, tag::Static>>(from: S) -> S::Output {
    unsafe { from.cast_as() }
}

/// Run-time-verified conversion to a concrete pointee type.
///
/// The check runs in both builds. Nullable handles come back null on a
/// mismatch; non-nullable handles raise a violation.
pub fn cast_dynamic<T, S: CastAs<T, tag::Dynamic>>(from: S) -> S::Output {
    // SAFETY: every `Dynamic`-tagged implementation verifies the pointee's
    // dynamic type before converting.
    unsafe { from.cast_as() }
}

/// The clever cast: exactly [`cast_static`] in the fast build, verified
/// against the dynamic type check in the safe build.
///
/// # Safety
///
/// As [`cast_static`]. An incorrect claim is caught (as a violation) only
/// in the safe build.
pub unsafe fn cast_clever<T, S: CastClever<T>>(from: S) -> S::Output {
    unsafe { from.cast_clever() }
}

pub use prim::{const_ptr as cast_const, mut_ptr as cast_mut};
