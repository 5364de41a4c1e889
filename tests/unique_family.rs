//! Behavior of the unique-ownership family: `URef`, `UPtr`.

mod common;

use common::{live_counter, Counted};
use ward::{make_uptr, make_uref, UPtr};

#[test]
fn uref_owns_exactly_one_value() {
    let live = live_counter();
    {
        let unique = make_uref(Counted::new(7, &live));
        assert_eq!(live.get(), 1);
        assert_eq!(unique.payload, 7);
    }
    assert_eq!(live.get(), 0);
}

#[test]
fn uref_reset_replaces_the_value() {
    let live = live_counter();
    let mut unique = make_uref(Counted::new(1, &live));
    unique.reset(Counted::new(2, &live));
    assert_eq!(live.get(), 1);
    assert_eq!(unique.payload, 2);
}

#[test]
fn uref_swap_exchanges_values() {
    let mut left = make_uref(String::from("left"));
    let mut right = make_uref(String::from("right"));
    left.swap(&mut right);
    assert_eq!(left.get(), "right");
    assert_eq!(right.get(), "left");
}

#[test]
fn uref_mutates_through_the_handle() {
    let mut unique = make_uref(vec![1_u8]);
    unique.get_mut().push(2);
    unique.push(3);
    assert_eq!(*unique, vec![1, 2, 3]);
}

#[test]
fn uref_widens_into_uptr_and_back() {
    let live = live_counter();
    let unique = make_uref(Counted::new(9, &live));
    let address = unique.get() as *const Counted;

    let widened: UPtr<Counted> = unique.into_uptr();
    assert!(!widened.is_null());
    assert_eq!(live.get(), 1);

    let narrowed = widened.into_uref();
    assert!(std::ptr::eq(narrowed.get(), address));
    drop(narrowed);
    assert_eq!(live.get(), 0);
}

#[test]
fn uref_into_inner_returns_the_value() {
    let unique = make_uref(String::from("inner"));
    assert_eq!(unique.into_inner(), "inner");
}

#[test]
fn uptr_starts_null_by_default() {
    let pointer: UPtr<i32> = UPtr::default();
    assert!(pointer.is_null());
    assert_eq!(pointer.get(), None);
    assert_eq!(pointer.value_or(0), 0);
}

#[test]
fn uptr_take_moves_ownership_out() {
    let live = live_counter();
    let mut source = make_uptr(Counted::new(5, &live));
    let taken = source.take();

    assert!(source.is_null());
    assert!(!taken.is_null());
    assert_eq!(live.get(), 1);
    assert_eq!(taken.get().map(|value| value.payload), Some(5));

    // Taking from a null pointer yields another null pointer.
    assert!(source.take().is_null());
    drop(taken);
    assert_eq!(live.get(), 0);
}

#[test]
fn uptr_set_and_reset_manage_the_value() {
    let live = live_counter();
    let mut pointer: UPtr<Counted> = UPtr::null();

    pointer.set(Counted::new(1, &live));
    assert_eq!(live.get(), 1);

    pointer.set(Counted::new(2, &live));
    assert_eq!(live.get(), 1);
    assert_eq!(pointer.get().map(|value| value.payload), Some(2));

    pointer.reset();
    assert!(pointer.is_null());
    assert_eq!(live.get(), 0);
}

#[test]
#[should_panic(expected = "converted a null unique pointer to a unique reference")]
fn narrowing_a_null_uptr_fails() {
    let pointer: UPtr<i32> = UPtr::null();
    let _ = pointer.into_uref();
}

#[test]
fn uptr_swap_exchanges_values_and_null_states() {
    let mut full = make_uptr(1_i32);
    let mut empty: UPtr<i32> = UPtr::null();
    full.swap(&mut empty);
    assert!(full.is_null());
    assert_eq!(empty.get(), Some(&1));
}
