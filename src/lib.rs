//! # `ward` - Dual-Build Smart-Indirection Toolkit
//!
//! One set of pointer-shaped types, two compilations: a **fast** build where
//! every indirection is exactly its raw equivalent, and a **safe** build
//! where every indirection tracks the lifetime of what it points at and
//! loudly reports dangling borrows, null dereferences, and lying casts.
//!
//! Efficiency and safety pull in opposite directions, and a single
//! representation cannot satisfy both. `ward` does not try: the trade-off
//! point is chosen once, per build, by a cargo feature, and the whole
//! program is compiled on that side of it. The usual arrangement is a
//! release binary on `fast` and a debug/test binary on `safe`; the safe
//! build typically points straight at the buggy line that the fast build
//! would have turned into silent memory corruption.
//!
//! ## Build modes
//!
//! Exactly one of the `fast`/`safe` features must be enabled (`fast` is in
//! the default set, so a safe build uses `default-features = false`).
//! Neither mode leaks into any public signature: code written against this
//! crate recompiles unchanged in both.
//!
//! ## The nine types
//!
//! | Type      | May be null?         | Data lives as long as              |
//! |-----------|----------------------|------------------------------------|
//! | [`Is`]    | No                   | the `Is` exists                    |
//! | [`Opt`]   | Yes (empty state)    | the `Opt` exists and is not reset  |
//! | [`URef`]  | No                   | the `URef` exists                  |
//! | [`UPtr`]  | Yes                  | the `UPtr` exists and is not reset |
//! | [`SRef`]  | No                   | any strong shared handle exists    |
//! | [`SPtr`]  | Yes                  | any strong shared handle exists    |
//! | [`WPtr`]  | Yes (expired lock)   | not extended by the `WPtr`         |
//! | [`Ref`]   | No                   | someone else holds the data        |
//! | [`Ptr`]   | Yes                  | someone else holds the data        |
//!
//! Owning types are built through their factories ([`make_sref`],
//! [`make_uptr`], [`Is::new`], ...); borrowing types are built *from*
//! owning ones (`owner.borrow()`, `owner.borrow_ptr()`, the corresponding
//! `From` impls) and carry no destruction responsibility.
//!
//! ```
//! use ward::{make_sref, Ptr};
//!
//! let owner = make_sref(String::from("tracked"));
//! let observer: Ptr<String> = owner.borrow_ptr();
//! assert_eq!(observer.with(String::len), 7);
//! ```
//!
//! ## What each build checks
//!
//! Misuse that the type system can reject is rejected in **both** builds:
//! non-nullable types have no null or default constructor, the unique
//! family cannot be cloned, conversions between unrelated pointee types do
//! not exist, and borrows only ever hand out shared access.
//!
//! The rest is where the builds diverge. In the safe build, every owning
//! type keeps a reference-counted liveness anchor next to its value, and
//! every borrow watches that anchor through a weak handle; resolving a
//! borrow first asks the watch whether the value still exists. A failed
//! check raises a [`Violation`] through a configurable hook (see
//! [`set_violation_hook`]; the default panics). In the fast build the
//! anchors and watches are zero-sized, the checks evaporate, and a stale
//! access reads whatever memory is there — the documented price of the
//! fast half of the bargain.
//!
//! ## Fast mode and memory safety
//!
//! The borrowing family is the escape hatch from Rust's lifetime
//! discipline that makes the owner/observer split expressible at all, and
//! in the fast build it is *trusted*: a [`Ref`]/[`Ptr`] must not be
//! resolved after its owner's value is gone, and the owner must not be
//! mutated or destroyed while a resolved reference is in use. The safe
//! build exists to diagnose exactly these violations, and the two-step
//! resolve-then-use window it cannot close (a second thread destroying the
//! owner in between) is a known, accepted race: every type here is
//! single-threaded by design and none implements `Send` or `Sync`.
//!
//! ## Casts
//!
//! Pointee types relate through traits rather than inheritance: widening to
//! a `dyn Trait` is the explicit [`upcast!`] macro, and the four cast
//! operations ([`cast_static`], [`cast_dynamic`], [`cast_clever`],
//! [`cast_reinterpret`]) recover concrete types, preserving the ownership
//! category of their operand. See the [`cast`] module.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]

#[cfg(all(feature = "fast", feature = "safe"))]
compile_error!("the `fast` and `safe` features are mutually exclusive; enable exactly one");

#[cfg(not(any(feature = "fast", feature = "safe")))]
compile_error!(
    "no build mode chosen: enable exactly one of the `fast` and `safe` features \
     (`fast` is in the default feature set)"
);

pub mod borrow;
pub mod cast;
#[cfg(feature = "collections")]
pub mod collections;
pub mod held;
mod live;
#[cfg(feature = "serde")]
mod serde_impls;
pub mod shared;
pub mod unique;
pub mod violation;

pub use borrow::{unsafe_ptr, unsafe_ref, Ptr, Ref};
pub use cast::{
    cast_clever, cast_const, cast_dynamic, cast_mut, cast_reinterpret, cast_static, CastAs,
    CastClever, Castable, Widen,
};
pub use held::{Is, Opt};
pub use shared::{make_sptr, make_sref, SPtr, SRef, WPtr};
pub use unique::{make_uptr, make_uref, UPtr, URef};
pub use violation::{set_violation_hook, Violation, ViolationHook, ViolationKind};

/// The crate version, as recorded at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the build mode this crate was compiled in.
#[cfg(feature = "fast")]
pub const VARIANT: &str = "fast";

/// The name of the build mode this crate was compiled in.
#[cfg(feature = "safe")]
pub const VARIANT: &str = "safe";
