//! Cart Observer

use slotmap::new_key_type;

use crate::cart::CartState;

new_key_type! {
    /// Observer Key
    pub struct ObserverKey;
}

/// Receives a read-only snapshot of the cart after every dispatched action.
///
/// Observers are called synchronously, in subscription order, once the new state has been
/// committed. A no-op action (such as removing a product that isn't in the cart) still
/// publishes.
pub trait CartObserver<'a> {
    /// Called with the committed state after an action.
    fn on_change(&mut self, state: &CartState<'a>);
}

impl<'a, F> CartObserver<'a> for F
where
    F: FnMut(&CartState<'a>),
{
    fn on_change(&mut self, state: &CartState<'a>) {
        self(state);
    }
}

