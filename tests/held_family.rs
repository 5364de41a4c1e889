//! Behavior of the held family: `Is`, `Opt`.

mod common;

use common::{live_counter, Counted};
use ward::{Is, Opt};

#[test]
fn is_holds_a_value_for_its_whole_life() {
    let live = live_counter();
    {
        let held = Is::new(Counted::new(1, &live));
        assert_eq!(live.get(), 1);
        assert_eq!(held.payload, 1);
    }
    assert_eq!(live.get(), 0);
}

#[test]
fn is_set_replaces_contents_in_place() {
    let mut held = Is::new(10_i32);
    let before = held.get() as *const i32;
    held.set(20);
    assert_eq!(*held, 20);
    assert!(std::ptr::eq(held.get(), before));
}

#[test]
fn copied_is_values_have_independent_lifetimes() {
    let live = live_counter();
    let original = Is::new(Counted::new(4, &live));
    let copy = original.clone();

    assert_eq!(live.get(), 2);
    assert_eq!(original, copy);
    assert!(!std::ptr::eq(original.get(), copy.get()));

    drop(original);
    assert_eq!(live.get(), 1);
    assert_eq!(copy.payload, 4);
    drop(copy);
    assert_eq!(live.get(), 0);
}

#[test]
fn is_into_inner_unwraps() {
    let held = Is::new(String::from("held"));
    assert_eq!(held.into_inner(), "held");
}

#[test]
fn opt_transitions_between_empty_and_full() {
    let live = live_counter();
    let mut optional: Opt<Counted> = Opt::empty();
    assert!(optional.is_none());
    assert_eq!(live.get(), 0);

    optional.insert(Counted::new(1, &live));
    assert!(optional.is_some());
    assert_eq!(live.get(), 1);
    assert_eq!(optional.payload, 1);

    optional.reset();
    assert!(optional.is_none());
    assert_eq!(live.get(), 0);
}

#[test]
fn opt_take_moves_the_value_out() {
    let live = live_counter();
    let mut optional = Opt::new(Counted::new(6, &live));
    let value = optional.take().expect("was full");
    assert!(optional.is_none());
    assert_eq!(value.payload, 6);
    assert_eq!(live.get(), 1);
    drop(value);
    assert_eq!(live.get(), 0);

    assert!(optional.take().is_none());
}

#[test]
fn opt_swap_exchanges_contents() {
    let mut full = Opt::new(1_i32);
    let mut empty: Opt<i32> = Opt::default();
    full.swap(&mut empty);
    assert!(full.is_none());
    assert_eq!(empty.get(), Some(&1));
}

#[test]
fn opt_value_or_falls_back_when_empty() {
    let optional: Opt<i32> = Opt::empty();
    assert_eq!(optional.value_or(9), 9);
    assert_eq!(Opt::new(1).value_or(9), 1);
}

#[test]
#[should_panic(expected = "dereferenced an empty optional")]
fn dereferencing_an_empty_opt_fails() {
    let optional: Opt<i32> = Opt::empty();
    let _ = *optional;
}

#[test]
fn opt_converts_from_option() {
    let full: Opt<i32> = Opt::from(Some(2_i32));
    assert_eq!(full.get(), Some(&2));
    let empty: Opt<i32> = Opt::from(None::<i32>);
    assert!(empty.is_none());
}
