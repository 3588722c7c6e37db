//! Re-fetch trigger shared by pages that reload after a mutation.

use std::rc::Rc;
use yew::prelude::*;

/// Bumped once per requested reload. Effects depend on the number.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Generation(pub u32);

impl Reducible for Generation {
    type Action = ();

    fn reduce(self: Rc<Self>, _: ()) -> Rc<Self> {
        Rc::new(Generation(self.0.wrapping_add(1)))
    }
}

/// A counter plus the callback that bumps it.
///
/// Dispatches are applied to the latest state, so two reloads requested
/// from the same render both count.
#[hook]
pub fn use_refresh() -> (u32, Callback<()>) {
    let generation = use_reducer(Generation::default);
    let refresh = {
        let generation = generation.dispatcher();
        Callback::from(move |_: ()| generation.dispatch(()))
    };
    (generation.0, refresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_each_dispatch_counts() {
        let start = Rc::new(Generation::default());
        let once = start.clone().reduce(());
        let twice = once.reduce(());
        assert_eq!(*twice, Generation(2));
        assert_eq!(*start, Generation(0));
    }

    #[wasm_bindgen_test]
    fn test_wraps_instead_of_overflowing() {
        let last = Rc::new(Generation(u32::MAX));
        assert_eq!(*last.reduce(()), Generation(0));
    }
}
