//! Behavior of the shared-ownership family: `SRef`, `SPtr`, `WPtr`.

mod common;

use common::{live_counter, Counted};
use ward::{make_sptr, make_sref, SPtr, WPtr};

#[test]
fn sref_owns_and_exposes_its_value() {
    let shared = make_sref(Counted::new(10, &live_counter()));
    assert_eq!(shared.payload, 10);
    assert_eq!(shared.get().payload, 10);
    assert_eq!(shared.strong_count(), 1);
}

#[test]
fn cloning_an_sref_shares_the_value() {
    let live = live_counter();
    let original = make_sref(Counted::new(1, &live));
    let alias = original.clone();
    assert_eq!(live.get(), 1);
    assert_eq!(original.strong_count(), 2);
    assert!(std::ptr::eq(original.get(), alias.get()));

    drop(original);
    assert_eq!(live.get(), 1);
    drop(alias);
    assert_eq!(live.get(), 0);
}

#[test]
fn live_object_count_follows_every_derived_handle() {
    let live = live_counter();
    assert_eq!(live.get(), 0);
    {
        let shared = make_sref(Counted::new(3, &live));
        assert_eq!(live.get(), 1);

        let widened = shared.to_sptr();
        let reference = shared.borrow();
        let pointer = shared.borrow_ptr();
        assert_eq!(live.get(), 1);

        drop(shared);
        // The remaining strong handle still retains the value.
        assert_eq!(live.get(), 1);
        assert_eq!(widened.strong_count(), 1);
        drop((reference, pointer));
        drop(widened);
    }
    assert_eq!(live.get(), 0);
}

#[test]
fn sptr_starts_null_by_default() {
    let pointer: SPtr<i32> = SPtr::default();
    assert!(pointer.is_null());
    assert_eq!(pointer.get(), None);
    assert_eq!(pointer.strong_count(), 0);
    assert_eq!(pointer.value_or(-1), -1);
}

#[test]
fn sptr_widens_from_sref_and_narrows_back() {
    let shared = make_sref(String::from("payload"));
    let widened: SPtr<String> = SPtr::from(&shared);
    assert!(!widened.is_null());

    let narrowed = widened.to_sref();
    assert!(std::ptr::eq(shared.get(), narrowed.get()));
}

#[test]
#[should_panic(expected = "converted a null shared pointer to a shared reference")]
fn narrowing_a_null_sptr_fails() {
    let pointer: SPtr<i32> = SPtr::null();
    let _ = pointer.to_sref();
}

#[test]
fn resetting_an_sptr_releases_its_share() {
    let live = live_counter();
    let mut pointer = make_sptr(Counted::new(2, &live));
    let alias = pointer.clone();
    assert_eq!(live.get(), 1);

    pointer.reset();
    assert!(pointer.is_null());
    assert_eq!(live.get(), 1);

    drop(alias);
    assert_eq!(live.get(), 0);
}

#[test]
fn get_mut_requires_exclusivity() {
    let mut shared = make_sptr(5_i32);
    assert!(shared.get_mut().is_some());

    let alias = shared.clone();
    assert!(shared.get_mut().is_none());

    drop(alias);
    *shared.get_mut().expect("sole handle again") = 6;
    assert_eq!(shared.get(), Some(&6));
}

#[test]
fn wptr_does_not_extend_the_lifetime() {
    let live = live_counter();
    let strong = make_sptr(Counted::new(4, &live));
    let weak = strong.downgrade();
    assert_eq!(weak.strong_count(), 1);
    assert!(!weak.is_expired());

    let relocked = weak.lock();
    assert!(!relocked.is_null());
    assert_eq!(live.get(), 1);

    drop(strong);
    drop(relocked);
    assert_eq!(live.get(), 0);
    assert!(weak.is_expired());
    assert!(weak.lock().is_null());
}

#[test]
fn null_wptr_never_locks() {
    let weak: WPtr<u8> = WPtr::default();
    assert!(weak.is_expired());
    assert!(weak.lock().is_null());
}

#[test]
fn downgrading_a_null_sptr_yields_an_expired_wptr() {
    let pointer: SPtr<u8> = SPtr::null();
    assert!(pointer.downgrade().lock().is_null());
}

#[test]
fn variant_constant_names_the_build() {
    assert!(ward::VARIANT == "fast" || ward::VARIANT == "safe");
    #[cfg(feature = "fast")]
    assert_eq!(ward::VARIANT, "fast");
    #[cfg(feature = "safe")]
    assert_eq!(ward::VARIANT, "safe");
}
