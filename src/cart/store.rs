//! Cart Store

use std::{fmt, mem};

use rusty_money::iso::Currency;
use slotmap::SlotMap;
use tracing::debug;

use crate::{
    cart::{
        CartAction, CartState,
        observer::{CartObserver, ObserverKey},
        reduce,
    },
    products::{Product, ProductId},
};

/// Owns the cart state for a session and funnels every mutation through [`reduce`].
pub struct CartStore<'a> {
    state: CartState<'a>,
    observers: SlotMap<ObserverKey, Box<dyn CartObserver<'a> + 'a>>,
}

impl<'a> CartStore<'a> {
    /// Create an empty cart store.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            state: CartState::new(currency),
            observers: SlotMap::with_key(),
        }
    }

    /// The current cart snapshot.
    pub fn state(&self) -> &CartState<'a> {
        &self.state
    }

    /// Add one unit of a product.
    ///
    /// The product's price is stored as given; any discount must already be applied.
    pub fn add_to_cart(&mut self, product: Product<'a>) {
        self.dispatch(CartAction::Add(product));
    }

    /// Remove the line for a product, if present.
    pub fn remove_from_cart(&mut self, id: impl Into<ProductId>) {
        self.dispatch(CartAction::Remove(id.into()));
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.dispatch(CartAction::Clear);
    }

    /// Apply an action, then publish the new state to every observer.
    pub fn dispatch(&mut self, action: CartAction<'a>) {
        let name = action.name();
        let currency = self.state.currency();
        let previous = mem::replace(&mut self.state, CartState::new(currency));

        self.state = reduce(previous, action);

        debug!(
            action = name,
            lines = self.state.len(),
            items = self.state.item_count(),
            total = %self.state.total(),
            "cart updated"
        );

        for observer in self.observers.values_mut() {
            observer.on_change(&self.state);
        }
    }

    /// Register an observer, returning a key that can be used to unsubscribe.
    pub fn subscribe(&mut self, observer: impl CartObserver<'a> + 'a) -> ObserverKey {
        self.observers.insert(Box::new(observer))
    }

    /// Remove an observer. Returns `false` if the key was not subscribed.
    pub fn unsubscribe(&mut self, key: ObserverKey) -> bool {
        self.observers.remove(key).is_some()
    }

    /// Number of subscribed observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl fmt::Debug for CartStore<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use super::*;

    fn product<'a>(id: &str, minor: i64) -> Product<'a> {
        Product::new(id, format!("Product {id}"), Money::from_minor(minor, USD))
    }

    fn recorder(seen: Rc<RefCell<Vec<i64>>>) -> impl FnMut(&CartState<'_>) {
        move |state: &CartState<'_>| seen.borrow_mut().push(state.total().to_minor_units())
    }

    #[test]
    fn mutations_update_state() {
        let mut store = CartStore::new(USD);

        store.add_to_cart(product("1", 19999));
        store.add_to_cart(product("1", 19999));
        store.add_to_cart(product("2", 4999));

        assert_eq!(store.state().len(), 2);
        assert_eq!(store.state().item_count(), 3);
        assert_eq!(store.state().total(), Money::from_minor(44997, USD));

        store.remove_from_cart("1");

        assert_eq!(store.state().total(), Money::from_minor(4999, USD));

        store.clear_cart();

        assert!(store.state().is_empty());
    }

    #[test]
    fn observers_see_each_committed_state() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = CartStore::new(USD);

        store.subscribe(recorder(Rc::clone(&seen)));

        store.add_to_cart(product("1", 1000));
        store.add_to_cart(product("2", 250));
        store.remove_from_cart("missing");
        store.clear_cart();

        assert_eq!(*seen.borrow(), vec![1000, 1250, 1250, 0]);
    }

    #[test]
    fn observers_are_called_in_subscription_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut store = CartStore::new(USD);

        for name in ["badge", "summary"] {
            let order = Rc::clone(&order);

            store.subscribe(move |_state: &CartState<'_>| order.borrow_mut().push(name));
        }

        store.clear_cart();

        assert_eq!(*order.borrow(), vec!["badge", "summary"]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = CartStore::new(USD);

        let key = store.subscribe(recorder(Rc::clone(&seen)));
        store.add_to_cart(product("1", 1000));

        assert!(store.unsubscribe(key));
        assert!(!store.unsubscribe(key));
        assert_eq!(store.observer_count(), 0);

        store.add_to_cart(product("1", 1000));

        assert_eq!(*seen.borrow(), vec![1000]);
    }

    #[test]
    fn dispatch_matches_named_operations() -> TestResult {
        let mut named = CartStore::new(USD);
        let mut dispatched = CartStore::new(USD);

        named.add_to_cart(product("1", 500));
        named.remove_from_cart("1");
        named.add_to_cart(product("2", 700));

        dispatched.dispatch(CartAction::Add(product("1", 500)));
        dispatched.dispatch(CartAction::Remove(ProductId::from("1")));
        dispatched.dispatch(CartAction::Add(product("2", 700)));

        assert_eq!(named.state(), dispatched.state());
        assert_eq!(
            dispatched.state().get("2").ok_or("missing line")?.quantity(),
            1
        );

        Ok(())
    }

    #[test]
    fn debug_reports_observer_count() {
        let mut store = CartStore::new(USD);
        store.subscribe(|_state: &CartState<'_>| {});

        let debug = format!("{store:?}");

        assert!(debug.contains("observers: 1"), "unexpected debug output: {debug}");
    }
}
