//! Representation guarantees: the fast build really is raw-equivalent.

use std::mem::size_of;

use ward::{Is, Ptr, Ref};

#[cfg(feature = "fast")]
#[test]
fn fast_borrows_are_pointer_sized() {
    assert_eq!(size_of::<Ref<u64>>(), size_of::<*const u64>());
    assert_eq!(size_of::<Ptr<u64>>(), size_of::<*const u64>());
    assert_eq!(size_of::<Option<Ref<u64>>>(), size_of::<*const u64>());
}

#[cfg(feature = "fast")]
#[test]
fn fast_owners_add_nothing_to_their_payload() {
    use ward::{SRef, UPtr, URef};

    assert_eq!(size_of::<Is<u64>>(), size_of::<u64>());
    assert_eq!(size_of::<URef<u64>>(), size_of::<Box<u64>>());
    assert_eq!(size_of::<UPtr<u64>>(), size_of::<Box<u64>>());
    assert_eq!(size_of::<SRef<u64>>(), size_of::<std::rc::Rc<u64>>());
}

#[cfg(feature = "safe")]
#[test]
fn safe_handles_carry_their_tracking() {
    // The exact layout is unspecified; what matters is that the liveness
    // side channel exists at all.
    assert!(size_of::<Ref<u64>>() > size_of::<*const u64>());
    assert!(size_of::<Is<u64>>() >= size_of::<Box<u64>>());
}

#[test]
fn no_build_mode_leaks_into_the_api() {
    // The same source constructs and uses every type in both builds; this
    // test compiling at all in both modes is most of the point.
    let held = Is::new(1_u8);
    let reference: Ref<u8> = held.borrow();
    let pointer: Ptr<u8> = held.borrow_ptr();
    assert_eq!(reference.with(|value| *value), 1);
    assert_eq!(pointer.value_or(0), 1);
}
