use std::cell::Cell;
use std::rc::Rc;

use yew::prelude::*;

/// Tracks whether the calling component is still mounted, so async work
/// that resolves late can skip its state updates.
#[derive(Clone, Default)]
pub struct MountedFlag(Rc<Cell<bool>>);

impl MountedFlag {
    pub fn is_mounted(&self) -> bool {
        self.0.get()
    }
}

#[hook]
pub fn use_mounted() -> MountedFlag {
    let flag = use_memo((), |_| MountedFlag(Rc::new(Cell::new(true))));
    let flag = (*flag).clone();

    {
        let flag = flag.clone();
        use_effect_with((), move |_| move || flag.0.set(false));
    }

    flag
}
