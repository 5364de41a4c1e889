//! The held family: [`Is`] and [`Opt`].
//!
//! A plain value has no way to tell its observers when it dies. Wrapping it
//! in one of these thin owning shells publishes a liveness signal that the
//! borrowing family can watch, so only values that are actually meant to be
//! borrowed from pay for the tracking — and in the fast build even they pay
//! nothing.
//!
//! `Is<T>` always holds a value; `Opt<T>` holds zero or one and treats
//! every occupancy transition (insert, reset, take, swap) as the end of the
//! previous value's life.

mod is;
mod opt;

pub use is::Is;
pub use opt::Opt;
