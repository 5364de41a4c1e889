//! Behavior of the borrowing family: `Ref`, `Ptr`.

mod common;

use common::{live_counter, Counted};
use ward::{make_sptr, make_sref, make_uptr, make_uref, Is, Opt, Ptr, Ref};

static SHARED_CONSTANT: u64 = 99;

#[test]
fn borrows_resolve_to_their_owner_address() {
    let live = live_counter();

    let shared = make_sref(Counted::new(1, &live));
    assert!(std::ptr::eq(shared.borrow().get(), shared.get()));

    let unique = make_uref(Counted::new(2, &live));
    assert!(std::ptr::eq(unique.borrow().get(), unique.get()));

    let held = Is::new(Counted::new(3, &live));
    assert!(std::ptr::eq(held.borrow().get(), held.get()));

    let optional = Opt::new(Counted::new(4, &live));
    assert!(std::ptr::eq(
        optional.borrow().get(),
        optional.get().expect("full")
    ));

    assert_eq!(live.get(), 4);
}

#[test]
fn borrowing_never_extends_a_lifetime() {
    let live = live_counter();
    let pointer;
    {
        let owner = make_uptr(Counted::new(5, &live));
        pointer = owner.borrow_ptr();
        assert!(!pointer.is_null());
        assert_eq!(live.get(), 1);
    }
    assert_eq!(live.get(), 0);
    // What `pointer` does now differs per build; that it never kept the
    // value alive does not.
}

#[test]
fn ptr_defaults_to_null() {
    let pointer: Ptr<i32> = Ptr::default();
    assert!(pointer.is_null());
    assert!(pointer.get().is_null());
    assert_eq!(pointer.try_with(|value| *value), None);
    assert_eq!(pointer.value_or(3), 3);
}

#[test]
#[should_panic(expected = "dereferenced a null borrowed pointer")]
fn accessing_a_null_ptr_fails() {
    let pointer: Ptr<i32> = Ptr::null();
    pointer.with(|value| *value);
}

#[test]
fn static_data_can_always_be_borrowed() {
    let reference = Ref::from_static(&SHARED_CONSTANT);
    assert_eq!(reference.with(|value| *value), 99);

    let pointer = Ptr::from_static(&SHARED_CONSTANT);
    assert_eq!(pointer.value_or(0), 99);
    assert!(reference == pointer);
}

#[test]
fn unsafe_entry_points_borrow_arbitrary_data() {
    let local = String::from("stack data");
    // SAFETY: `local` outlives both borrows and is not mutated below.
    let reference = unsafe { ward::unsafe_ref(&local) };
    let pointer = unsafe { ward::unsafe_ptr(&local) };
    assert_eq!(reference.with(String::len), local.len());
    assert!(pointer == reference.to_ptr());
}

#[test]
fn ref_widens_to_ptr_and_narrows_back() {
    let owner = make_sref(7_i32);
    let reference = owner.borrow();
    let pointer: Ptr<i32> = Ptr::from(reference.clone());

    assert!(!pointer.is_null());
    let narrowed = pointer.to_ref();
    assert!(std::ptr::eq(narrowed.get(), reference.get()));
}

#[test]
#[should_panic(expected = "converted a null borrowed pointer to a reference")]
fn narrowing_a_null_ptr_fails() {
    let pointer: Ptr<i32> = Ptr::null();
    let _ = pointer.to_ref();
}

#[test]
fn to_ref_or_uses_the_fallback_only_when_needed() {
    let owner = make_sref(1_i32);
    let fallback_owner = make_sref(2_i32);

    let full = owner.borrow_ptr();
    let resolved = full.to_ref_or(fallback_owner.borrow());
    assert_eq!(resolved.with(|value| *value), 1);

    let empty: Ptr<i32> = Ptr::null();
    let fallen_back = empty.to_ref_or(fallback_owner.borrow());
    assert_eq!(fallen_back.with(|value| *value), 2);
}

#[test]
fn comparisons_order_by_resolved_address() {
    let owner = make_sref([1_u8, 2]);
    let first = owner.borrow();
    let second = owner.borrow();

    assert_eq!(first, second);
    assert!(first == second.to_ptr());
    assert!(first == (owner.get() as *const [u8; 2]));
    assert!(first <= second);

    let other_owner = make_sref([3_u8, 4]);
    let other = other_owner.borrow();
    assert_ne!(first, other);
    // A consistent total order exists even across unrelated owners.
    assert!((first < other) != (other < first));
}

#[test]
fn null_ptrs_compare_equal() {
    let left: Ptr<u8> = Ptr::null();
    let right: Ptr<u8> = Ptr::null();
    assert_eq!(left, right);
    assert!(left == std::ptr::null::<u8>());
}

#[test]
fn borrows_from_every_owner_convert_via_from() {
    let shared = make_sref(1_i32);
    let shared_null = make_sptr(2_i32);
    let unique = make_uref(3_i32);
    let unique_null = make_uptr(4_i32);
    let held = Is::new(5_i32);
    let optional = Opt::new(6_i32);

    let borrows = [
        Ptr::from(&shared),
        Ptr::from(&shared_null),
        Ptr::from(&unique),
        Ptr::from(&unique_null),
        Ptr::from(&held),
        Ptr::from(&optional),
    ];
    for borrow in &borrows {
        assert!(!borrow.is_null());
    }

    assert_eq!(Ref::from(&shared).with(|value| *value), 1);
    assert_eq!(Ref::from(&unique).with(|value| *value), 3);
    assert_eq!(Ref::from(&held).with(|value| *value), 5);
}

#[test]
fn debug_formatting_never_resolves_blindly() {
    let owner = make_sref(8_i32);
    let reference = owner.borrow();
    assert!(format!("{reference:?}").starts_with("Ref(0x"));

    let null: Ptr<i32> = Ptr::null();
    assert_eq!(format!("{null:?}"), "Ptr(null)");
    assert_eq!(format!("{null:p}"), format!("{:p}", std::ptr::null::<()>()));
}
