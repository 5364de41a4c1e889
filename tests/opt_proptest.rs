//! Property test: `Opt<T>` agrees with `Option<T>` across arbitrary
//! operation sequences, in both builds.

use proptest::prelude::*;
use ward::Opt;

#[derive(Debug, Clone)]
enum Operation {
    Insert(i16),
    Reset,
    Take,
    ValueOr(i16),
    SwapWithNew(Option<i16>),
}

fn operations() -> impl Strategy<Value = Vec<Operation>> {
    proptest::collection::vec(
        prop_oneof![
            any::<i16>().prop_map(Operation::Insert),
            Just(Operation::Reset),
            Just(Operation::Take),
            any::<i16>().prop_map(Operation::ValueOr),
            proptest::option::of(any::<i16>()).prop_map(Operation::SwapWithNew),
        ],
        1..64,
    )
}

proptest! {
    #[test]
    fn opt_matches_std_option(ops in operations()) {
        let mut model: Option<i16> = None;
        let mut subject: Opt<i16> = Opt::empty();

        for op in ops {
            match op {
                Operation::Insert(value) => {
                    model = Some(value);
                    prop_assert_eq!(*subject.insert(value), value);
                }
                Operation::Reset => {
                    model = None;
                    subject.reset();
                }
                Operation::Take => {
                    prop_assert_eq!(subject.take(), model.take());
                }
                Operation::ValueOr(default) => {
                    prop_assert_eq!(subject.value_or(default), model.unwrap_or(default));
                }
                Operation::SwapWithNew(other_value) => {
                    let mut other_model = other_value;
                    let mut other: Opt<i16> = Opt::from(other_value);
                    subject.swap(&mut other);
                    core::mem::swap(&mut model, &mut other_model);
                    prop_assert_eq!(other.get().copied(), other_model);
                }
            }
            prop_assert_eq!(subject.is_some(), model.is_some());
            prop_assert_eq!(subject.get().copied(), model);
        }
    }
}
