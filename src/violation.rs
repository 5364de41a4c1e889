//! Structured run-time failures and the overridable violation hook.
//!
//! The safe build reports every detected misuse (dangling borrow, null
//! dereference of a non-nullable handle, disagreeing clever cast) through a
//! single funnel: [`raise`] builds a [`Violation`] and hands it to the
//! installed hook. The default hook panics with the rendered violation,
//! which is what the test suite leans on; embedders that want an abort, a
//! log-and-exit, or a custom unwind install their own with
//! [`set_violation_hook`] before first use.
//!
//! Dynamic-cast verification funnels through here in both builds; everything
//! else is compiled out of the fast build.

use core::fmt;
use std::sync::OnceLock;

/// The category of a detected violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// A non-nullable indirection would have represented no object.
    NullReference,
    /// A borrowing indirection was accessed after its owner's value died.
    DanglingBorrow,
    /// A checked cast found the source does not have the requested type.
    CastMismatch,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViolationKind::NullReference => "null reference",
            ViolationKind::DanglingBorrow => "dangling borrow",
            ViolationKind::CastMismatch => "cast mismatch",
        };
        f.write_str(name)
    }
}

/// A detected misuse of an indirection type.
///
/// Violations are terminal: there is no recovery path, and the hook that
/// receives one must diverge.
#[derive(Debug, Clone)]
pub struct Violation {
    kind: ViolationKind,
    context: &'static str,
}

impl Violation {
    /// The category of the violation.
    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    /// A short description of the operation that tripped the check.
    pub fn context(&self) -> &'static str {
        self.context
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} violation: {}", self.kind, self.context)
    }
}

impl std::error::Error for Violation {}

/// The signature of a violation hook. The hook must diverge.
pub type ViolationHook = fn(&Violation) -> !;

static HOOK: OnceLock<ViolationHook> = OnceLock::new();

/// Installs a process-global violation hook.
///
/// May be called at most once, before any violation fires; the default
/// (panicking) hook is used until then.
///
/// # Panics
///
/// Panics if a hook is already installed.
pub fn set_violation_hook(hook: ViolationHook) {
    HOOK.set(hook)
        .expect("a violation hook is already installed");
}

/// Reports a violation through the installed hook. Never returns.
pub(crate) fn raise(kind: ViolationKind, context: &'static str) -> ! {
    let violation = Violation { kind, context };
    #[cfg(feature = "tracing")]
    tracing::error!(kind = %violation.kind, "indirection violation: {violation}");
    match HOOK.get() {
        Some(hook) => hook(&violation),
        None => panic!("{violation}"),
    }
}

/// Fails an access that found no object behind a handle.
///
/// The safe build classifies it as a violation; the fast build keeps only
/// the checks Rust makes structurally unavoidable (an `Option` already in
/// hand) and fails them as plain panics.
pub(crate) fn null_access(context: &'static str) -> ! {
    #[cfg(feature = "safe")]
    raise(ViolationKind::NullReference, context);
    #[cfg(feature = "fast")]
    panic!("{context}");
}

/// Verifies a safe-build-only invariant, reporting through the hook.
///
/// In the fast build the condition still type-checks but is never
/// evaluated, so the check costs nothing.
macro_rules! ward_assert {
    ($cond:expr, $kind:expr, $context:expr) => {
        #[cfg(feature = "safe")]
        {
            if !$cond {
                $crate::violation::raise($kind, $context);
            }
        }
        #[cfg(feature = "fast")]
        {
            let _ = || {
                let _ = $cond;
                ($kind, $context)
            };
        }
    };
}

pub(crate) use ward_assert;
