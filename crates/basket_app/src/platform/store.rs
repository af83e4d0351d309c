//! Observable basket state manager.
//!
//! `BasketStore` owns the core state, runs the effects that `update` asks
//! for, and notifies subscribers with a fresh [`BasketViewModel`] after each
//! dispatch that changed something. It is driven from a single thread; the
//! only concurrent work is the catalog fetch inside the engine, whose result
//! is applied by [`BasketStore::pump`].

use std::time::Duration;

use basket_core::{update, BasketState, BasketViewModel, Money, Msg, Product};

use super::effects::EffectRunner;

pub type SubscriptionId = u64;

type Subscriber = Box<dyn FnMut(&BasketViewModel)>;

pub struct BasketStore {
    state: BasketState,
    runner: EffectRunner,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: SubscriptionId,
}

impl BasketStore {
    pub fn new(runner: EffectRunner) -> Self {
        Self {
            state: BasketState::new(),
            runner,
            subscribers: Vec::new(),
            next_subscription: 1,
        }
    }

    pub fn snapshot(&self) -> BasketViewModel {
        self.state.view()
    }

    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&BasketViewModel) + 'static,
    ) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    #[allow(dead_code)]
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Starts a catalog load unless one is already in flight.
    pub fn load_products(&mut self) {
        self.dispatch(Msg::LoadProducts);
    }

    pub fn add_to_basket(&mut self, product: Product) {
        self.dispatch(Msg::AddToBasket(product));
    }

    pub fn clear_items(&mut self) {
        self.dispatch(Msg::ClearItems);
    }

    pub fn total_price(&self) -> Money {
        self.state.total_price()
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let changed = state.consume_dirty();
        self.state = state;
        self.runner.run(effects);
        if changed {
            self.notify();
        }
    }

    /// Applies every finished engine result; returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(msg) = self.runner.poll() {
            self.dispatch(msg);
            applied += 1;
        }
        applied
    }

    /// Blocks up to `timeout` for one engine result and applies it.
    pub fn wait_for_engine(&mut self, timeout: Duration) -> bool {
        match self.runner.wait(timeout) {
            Some(msg) => {
                self.dispatch(msg);
                true
            }
            None => false,
        }
    }

    fn notify(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let view = self.state.view();
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&view);
        }
    }
}
